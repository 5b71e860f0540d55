// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施模块
///
/// 提供模板目录、结果日志和URL账本的文件实现
pub mod ledger_store;
pub mod result_store;
pub mod template_store;
