// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 顺序抓取流水线及其抓取器作用域管理
pub mod fetcher_guard;
pub mod pipeline;
