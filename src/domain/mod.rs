// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：模板、提取结果和账本状态
/// - 仓库接口（repositories）：模板、结果和账本的持久化抽象
/// - 服务（services）：模板提取
pub mod models;
pub mod repositories;
pub mod services;
