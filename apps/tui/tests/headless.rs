use data_modules_tui::event::{build_report, export_svgs, render_text};
use data_modules_tui::{pages, AppConfig};

#[test]
fn report_covers_every_page_by_default() {
    let pages = pages::load_bundle().unwrap();
    let report = build_report(&pages, &AppConfig::default()).unwrap();
    assert_eq!(report.pages.len(), pages.len());

    let text = render_text(&report);
    assert!(text.contains("The Rice Year (rice-seasons)"));
    assert!(text.contains("- years: 2005-2025"));
}

#[test]
fn report_narrows_to_the_configured_page() {
    let pages = pages::load_bundle().unwrap();
    let config = AppConfig {
        page: Some("temple-architecture".to_string()),
        ..AppConfig::default()
    };
    let report = build_report(&pages, &config).unwrap();
    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.pages[0].places, 0);

    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["pages"][0]["slug"], "temple-architecture");
    assert!(json["generated_at"].is_string());
}

#[test]
fn unknown_page_is_an_error() {
    let pages = pages::load_bundle().unwrap();
    let config = AppConfig {
        page: Some("nowhere".to_string()),
        ..AppConfig::default()
    };
    assert!(build_report(&pages, &config).is_err());
}

#[test]
fn export_writes_one_svg_per_chart_section() {
    let pages = pages::load_bundle().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("svg");
    let written = export_svgs(&pages, &out).unwrap();

    let charts: usize = pages.iter().map(|page| page.charts().count()).sum();
    assert_eq!(written.len(), charts);
    let calendar = std::fs::read_to_string(out.join("rice-seasons-calendar.svg")).unwrap();
    assert!(calendar.starts_with("<svg"));
    assert!(calendar.contains("data-key=\"0\""));
}

#[test]
fn bundled_pages_pass_check() {
    assert!(data_modules_tui::event::run_check().is_ok());
}
