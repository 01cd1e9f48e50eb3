use chartkit::scene::ChartFrame;
use chartkit::svg;
use chartkit::{PageDocument, UiState};

const PAGES: [&str; 3] = [
    include_str!("../../../data/pages/rice-seasons.json"),
    include_str!("../../../data/pages/coastal-tourism.json"),
    include_str!("../../../data/pages/temple-architecture.json"),
];

#[test]
fn bundled_pages_validate() {
    for source in PAGES {
        let page = PageDocument::from_json(source).unwrap();
        assert!(!page.sections.is_empty(), "{} has no sections", page.slug);
    }
}

#[test]
fn every_bundled_chart_renders_marks_and_targets() {
    let frame = ChartFrame::new(640.0, 360.0);
    for source in PAGES {
        let page = PageDocument::from_json(source).unwrap();
        for (section, chart) in page.charts() {
            let scene = chart.scene(&frame, &UiState::default());
            assert!(!scene.is_blank(), "{}/{} rendered blank", page.slug, section.id);
            assert!(!scene.regions.is_empty(), "{}/{} has no hit regions", page.slug, section.id);
            let document = svg::render(&scene);
            assert!(document.contains("data-key="));
        }
    }
}

#[test]
fn rice_calendar_wraps_the_winter_harvest() {
    let page = PageDocument::from_json(PAGES[0]).unwrap();
    let stats = page.stats();
    assert_eq!(stats.year_span, Some((2005, 2025)));
    assert_eq!(stats.places, 3);
    let calendar = page.section("calendar").and_then(|section| section.chart.as_ref()).unwrap();
    assert!(calendar.filters().contains(&"winter-harvest".to_string()));
}
