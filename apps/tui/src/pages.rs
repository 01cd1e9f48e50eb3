//! Page documents compiled into the binary.

use chartkit::PageDocument;
use color_eyre::eyre::{eyre, Result};

/// `(file name, JSON source)` for every bundled page, in menu order.
pub const BUNDLED: [(&str, &str); 3] = [
    (
        "rice-seasons.json",
        include_str!("../../../data/pages/rice-seasons.json"),
    ),
    (
        "coastal-tourism.json",
        include_str!("../../../data/pages/coastal-tourism.json"),
    ),
    (
        "temple-architecture.json",
        include_str!("../../../data/pages/temple-architecture.json"),
    ),
];

/// Parses and validates every bundled page.
pub fn load_bundle() -> Result<Vec<PageDocument>> {
    BUNDLED
        .iter()
        .map(|(name, source)| {
            PageDocument::from_json(source).map_err(|error| eyre!("{name}: {error}"))
        })
        .collect()
}

/// Validation outcome per bundled file, for `--check`.
pub fn check_bundle() -> Vec<(&'static str, chartkit::Result<PageDocument>)> {
    BUNDLED
        .iter()
        .map(|(name, source)| (*name, PageDocument::from_json(source)))
        .collect()
}

/// Index of the page to open: the configured slug, else the first page.
pub fn initial_page(pages: &[PageDocument], slug: Option<&str>) -> Result<usize> {
    match slug {
        None => Ok(0),
        Some(slug) => pages
            .iter()
            .position(|page| page.slug == slug)
            .ok_or_else(|| eyre!(chartkit::Error::UnknownPage(slug.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_loads_with_unique_slugs() {
        let pages = load_bundle().unwrap();
        assert_eq!(pages.len(), BUNDLED.len());
        let mut slugs: Vec<&str> = pages.iter().map(|page| page.slug.as_str()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), pages.len());
    }

    #[test]
    fn initial_page_resolves_slug() {
        let pages = load_bundle().unwrap();
        assert_eq!(initial_page(&pages, None).unwrap(), 0);
        assert_eq!(initial_page(&pages, Some("temple-architecture")).unwrap(), 2);
        assert!(initial_page(&pages, Some("missing")).is_err());
    }
}
