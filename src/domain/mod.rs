// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含目录探测的核心逻辑，包括：
/// - 领域模型（models）：目标、字典、代理、任务和探测结果
/// - 服务（services）：结果分类和代理选择等纯逻辑
///
/// 领域层不依赖HTTP客户端或任何I/O实现。
pub mod models;
pub mod services;
