use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use scout_board::config::DashboardConfig;
use scout_board::data::source::DatasetCache;
use scout_board::export::{export_dataset, export_file_name, ExportFormat};
use scout_board::state::{PageView, Session};
use scout_board::table::TableView;

/// Usage: `scout-board [config.json] [export-dir]`
///
/// Loads the configured player table and prints the overview ranking.
/// With an export directory, the full ranking is also written there as CSV
/// and XLSX.
fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let export_dir = args.next().map(PathBuf::from);

    let config = DashboardConfig::load(config_path.as_deref())?;
    let cache = DatasetCache::new();
    let mut session = Session::open(config, &cache).context("loading player table")?;
    info!("Session ready with {} rows", session.dataset().len());

    let Some(PageView::Overview(page)) = session.refresh() else {
        anyhow::bail!(
            "{}",
            session
                .status_message
                .unwrap_or_else(|| "overview unavailable".to_string())
        );
    };

    println!("Ranking by {}", session.config().ranking_metric);
    print_table(&page.ranking);

    if let Some(dir) = export_dir {
        export_all(&page.export, &page.export_name, &dir)?;
    }
    Ok(())
}

fn print_table(table: &TableView) {
    // Badge URLs are noise on a terminal.
    println!("{}", table.headers[1..].join("\t"));
    for row in &table.rows {
        println!("{}", row[1..].join("\t"));
    }
}

fn export_all(dataset: &scout_board::Dataset, stem: &str, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating export dir {}", dir.display()))?;
    for format in [ExportFormat::Csv, ExportFormat::Xlsx] {
        let path = dir.join(export_file_name(stem, format));
        export_dataset(dataset, &path, format)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}
