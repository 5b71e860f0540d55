// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::settings::Settings;
use crate::utils::errors::StartupError;
use crate::utils::telemetry::LogFiles;

/// 项目目录布局
///
/// ```text
/// <root>/config/uc_settings.txt       驱动启动参数，每行一个
/// <root>/config/script_settings.txt   请求间隔范围（两行：最小值、最大值）
/// <root>/urls/urls_list.txt           待处理URL
/// <root>/urls/urls_completed.txt      完成账本
/// <root>/urls/urls_failed.txt         失败账本
/// <root>/templates/<domain>.yml       提取模板
/// <root>/results/<domain>_results.txt 结果日志
/// ```
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    pub config_dir: PathBuf,
    pub urls_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub results_dir: PathBuf,
    pub driver_settings_file: PathBuf,
    pub delay_settings_file: PathBuf,
    pub urls_list_file: PathBuf,
    pub urls_completed_file: PathBuf,
    pub urls_failed_file: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let config_dir = root.join("config");
        let urls_dir = root.join("urls");

        Self {
            driver_settings_file: config_dir.join("uc_settings.txt"),
            delay_settings_file: config_dir.join("script_settings.txt"),
            urls_list_file: urls_dir.join("urls_list.txt"),
            urls_completed_file: urls_dir.join("urls_completed.txt"),
            urls_failed_file: urls_dir.join("urls_failed.txt"),
            templates_dir: root.join("templates"),
            results_dir: root.join("results"),
            config_dir,
            urls_dir,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.paths.root)
    }

    /// 创建缺失的目录和文件，已存在的内容保持不变
    pub fn bootstrap(&self) -> Result<(), StartupError> {
        for dir in [
            &self.config_dir,
            &self.urls_dir,
            &self.templates_dir,
            &self.results_dir,
        ] {
            fs::create_dir_all(dir).map_err(|source| StartupError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }

        for file in [
            &self.driver_settings_file,
            &self.delay_settings_file,
            &self.urls_list_file,
            &self.urls_completed_file,
            &self.urls_failed_file,
        ] {
            if !file.exists() {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(file)
                    .map_err(|source| StartupError::CreateFile {
                        path: file.clone(),
                        source,
                    })?;
                info!("Created {}", file.display());
            }
        }

        Ok(())
    }
}

impl LogFiles {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            info_log: PathBuf::from(&settings.logging.info_log),
            error_log: PathBuf::from(&settings.logging.error_log),
        }
    }
}

/// 读取文本文件的全部内容
pub fn read_text(path: &Path) -> Result<String, StartupError> {
    fs::read_to_string(path).map_err(|source| StartupError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}
