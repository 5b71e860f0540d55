// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序配置、项目目录布局以及驱动与间隔设置文件
pub mod config;

/// 领域模块
///
/// 包含模板、提取结果、账本状态以及仓库接口
pub mod domain;

/// 引擎模块
///
/// 实现基于浏览器的页面抓取
pub mod engines;

/// 基础设施模块
///
/// 提供模板、结果和账本的文件实现
pub mod infrastructure;

/// 工具模块
///
/// 提供错误类型、日志初始化和URL处理
pub mod utils;

/// 工作器模块
///
/// 实现顺序抓取流水线
pub mod workers;
