// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 命令行模块
///
/// 定义命令行参数及其对配置的覆盖
pub mod cli;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含目标、字典、代理、结果等核心实体以及分类和代理选择服务
pub mod domain;

/// 引擎模块
///
/// 实现发出探测请求的HTTP引擎
pub mod engines;

/// 基础设施模块
///
/// 提供结果报告和指标
pub mod infrastructure;

/// 队列模块
///
/// 实现任务队列
pub mod queue;

/// 工具模块
///
/// 提供文件读取、错误类型和日志初始化
pub mod utils;

/// 工作器模块
///
/// 实现固定大小的工作池和探测工作器
pub mod workers;
