// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use pagesift::config::layout::{read_text, ProjectLayout};
use pagesift::config::script_settings::{load_delay_policy, DriverSettings};
use pagesift::config::settings::Settings;
use pagesift::domain::services::extraction_service::TemplateExtractor;
use pagesift::engines::chromium_engine::ChromiumFetcherFactory;
use pagesift::infrastructure::ledger_store::{self, FileLedger};
use pagesift::infrastructure::result_store::JsonLinesResultStore;
use pagesift::infrastructure::template_store::FileTemplateRepository;
use pagesift::utils::errors::StartupError;
use pagesift::utils::telemetry::{self, LogFiles};
use pagesift::workers::pipeline::ScrapePipeline;
use tracing::info;

/// 主函数
///
/// 加载配置、创建目录、读取设置文件，然后顺序处理全部待处理URL
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Settings::new().map_err(StartupError::from)?;

    // 2. Initialize logging
    telemetry::init_telemetry(&LogFiles::from_settings(&settings))?;
    info!("Starting pagesift, project root: {}", settings.paths.root);

    // 3. Create directories and files
    let layout = ProjectLayout::from_settings(&settings);
    layout.bootstrap()?;

    // 4. Read settings files
    let driver_settings = DriverSettings::parse(&read_text(&layout.driver_settings_file)?);
    let delay = load_delay_policy(&read_text(&layout.delay_settings_file)?);

    // 5. Load pending URLs
    let ledger = Arc::new(FileLedger::new(
        &layout.urls_completed_file,
        &layout.urls_failed_file,
    ));
    let urls_list = read_text(&layout.urls_list_file)?;
    let mut pending =
        ledger_store::load_pending(&urls_list, ledger.as_ref(), settings.pipeline.retry_failed)
            .await?;

    // 6. Wire components
    let pipeline = ScrapePipeline::new(
        Arc::new(FileTemplateRepository::new(&layout.templates_dir)),
        Arc::new(ChromiumFetcherFactory::new(
            driver_settings,
            settings.driver.clone(),
        )),
        Arc::new(TemplateExtractor),
        Arc::new(JsonLinesResultStore::new(&layout.results_dir)),
        ledger,
        delay,
    );

    // 7. Run
    let report = pipeline.run(&mut pending).await;
    info!(
        "Run {} done: {}/{} completed, {} failed",
        report.run_id, report.completed, report.total, report.failed
    );

    Ok(())
}
