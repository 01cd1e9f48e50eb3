use chartkit::PageDocument;

const BUNDLED: [&str; 3] = [
    include_str!("../../../data/pages/rice-seasons.json"),
    include_str!("../../../data/pages/coastal-tourism.json"),
    include_str!("../../../data/pages/temple-architecture.json"),
];

/// Bundled pages that load; a broken page is reported and skipped so the
/// rest still render.
pub fn load_bundle() -> Vec<PageDocument> {
    BUNDLED
        .iter()
        .filter_map(|source| match PageDocument::from_json(source) {
            Ok(page) => Some(page),
            Err(error) => {
                web_sys::console::error_1(&format!("Failed to load page: {error}").into());
                None
            }
        })
        .collect()
}

/// Page named by the URL hash (`#slug`), else the first page.
pub fn pick<'a>(pages: &'a [PageDocument], hash: &str) -> Option<&'a PageDocument> {
    let slug = hash.trim_start_matches('#');
    pages
        .iter()
        .find(|page| page.slug == slug)
        .or_else(|| pages.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> Vec<PageDocument> {
        BUNDLED
            .iter()
            .map(|source| PageDocument::from_json(source).unwrap())
            .collect()
    }

    #[test]
    fn hash_selects_page() {
        let pages = bundle();
        assert_eq!(pick(&pages, "#coastal-tourism").unwrap().slug, "coastal-tourism");
        assert_eq!(pick(&pages, "").unwrap().slug, "rice-seasons");
        assert_eq!(pick(&pages, "#unknown").unwrap().slug, "rice-seasons");
        assert!(pick(&[], "#rice-seasons").is_none());
    }
}
