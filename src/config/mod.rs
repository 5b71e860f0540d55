// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置，包括目录布局、日志、浏览器驱动和请求间隔
pub mod layout;
pub mod script_settings;
pub mod settings;
