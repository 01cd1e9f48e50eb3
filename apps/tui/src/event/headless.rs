use std::fs;
use std::path::{Path, PathBuf};

use chartkit::page::PageStats;
use chartkit::{svg, ChartFrame, PageDocument, UiState};
use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::pages::check_bundle;

/// Size of exported SVG documents.
const EXPORT_FRAME: ChartFrame = ChartFrame::new(720.0, 400.0);

#[derive(Debug, Serialize)]
pub struct HeadlessReport {
    pub generated_at: DateTime<Utc>,
    pub reveal_threshold: f64,
    pub pages: Vec<PageStats>,
}

/// Stats for the configured page, or every page when none is configured.
pub fn build_report(pages: &[PageDocument], config: &AppConfig) -> Result<HeadlessReport> {
    let selected: Vec<&PageDocument> = match config.page.as_deref() {
        Some(slug) => vec![chartkit::page::find_page(pages, slug)?],
        None => pages.iter().collect(),
    };
    Ok(HeadlessReport {
        generated_at: Utc::now(),
        reveal_threshold: config.reveal_threshold,
        pages: selected.into_iter().map(PageDocument::stats).collect(),
    })
}

pub fn render_text(report: &HeadlessReport) -> String {
    let mut out = String::new();
    out.push_str("\nData Module Pages\n");
    out.push_str("=================\n");
    for stats in &report.pages {
        out.push_str(&format!("\n{} ({})\n", stats.title, stats.slug));
        out.push_str(&format!("- sections: {}\n", stats.sections));
        out.push_str(&format!("- records: {}\n", stats.records));
        out.push_str(&format!("- places: {}\n", stats.places));
        if let Some((first, last)) = stats.year_span {
            out.push_str(&format!("- years: {first}-{last}\n"));
        }
        for (kind, count) in &stats.charts {
            out.push_str(&format!("- {kind} charts: {count}\n"));
        }
    }
    out
}

/// Writes `<slug>-<section>.svg` for every chart section into `dir`.
pub fn export_svgs(pages: &[PageDocument], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for page in pages {
        for (section, chart) in page.charts() {
            let scene = chart.scene(&EXPORT_FRAME, &UiState::default());
            let path = dir.join(format!("{}-{}.svg", page.slug, section.id));
            fs::write(&path, svg::render(&scene))?;
            debug!(path = %path.display(), "exported chart");
            written.push(path);
        }
    }
    info!(count = written.len(), "exported charts");
    Ok(written)
}

/// Run the application in headless mode (no UI)
pub fn run_headless(pages: &[PageDocument], config: &AppConfig, json: bool) -> Result<()> {
    let report = build_report(pages, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }

    if let Some(dir) = &config.export_dir {
        let written = export_svgs(pages, dir)?;
        eprintln!("Exported {} charts to {}", written.len(), dir.display());
    }
    Ok(())
}

/// Validates every bundled page; fails if any page does not load.
pub fn run_check() -> Result<()> {
    let mut failures = 0;
    for (name, outcome) in check_bundle() {
        match outcome {
            Ok(page) => println!("ok    {name} ({} sections)", page.sections.len()),
            Err(error) => {
                failures += 1;
                println!("FAIL  {name}: {error}");
            }
        }
    }
    if failures > 0 {
        return Err(eyre!("{failures} page(s) failed validation"));
    }
    Ok(())
}
