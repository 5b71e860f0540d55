// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层的持久化抽象，具体实现由基础设施层提供：
/// - 模板仓库（template_repository）：按域名解析提取模板
/// - 结果仓库（storage_repository）：按域名追加提取结果
/// - 账本仓库（ledger_repository）：记录完成与失败的URL
pub mod ledger_repository;
pub mod storage_repository;
pub mod template_repository;
