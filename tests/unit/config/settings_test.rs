// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置设置测试模块
///
/// 测试默认配置与项目目录布局的对应关系

#[cfg(test)]
mod tests {
    use pagesift::config::layout::ProjectLayout;
    use pagesift::config::settings::Settings;
    use pagesift::utils::telemetry::LogFiles;
    use std::path::PathBuf;

    #[test]
    fn test_layout_from_default_settings() {
        let settings = Settings::from_defaults().unwrap();
        let layout = ProjectLayout::from_settings(&settings);

        assert_eq!(
            layout.driver_settings_file,
            PathBuf::from("./project/config/uc_settings.txt")
        );
        assert_eq!(
            layout.delay_settings_file,
            PathBuf::from("./project/config/script_settings.txt")
        );
        assert_eq!(
            layout.urls_list_file,
            PathBuf::from("./project/urls/urls_list.txt")
        );
        assert_eq!(
            layout.urls_completed_file,
            PathBuf::from("./project/urls/urls_completed.txt")
        );
        assert_eq!(
            layout.urls_failed_file,
            PathBuf::from("./project/urls/urls_failed.txt")
        );
        assert_eq!(layout.templates_dir, PathBuf::from("./project/templates"));
        assert_eq!(layout.results_dir, PathBuf::from("./project/results"));
    }

    #[test]
    fn test_log_files_from_default_settings() {
        let settings = Settings::from_defaults().unwrap();
        let files = LogFiles::from_settings(&settings);

        assert_eq!(files.info_log, PathBuf::from("scraping.log"));
        assert_eq!(files.error_log, PathBuf::from("errors.log"));
    }
}
