use chartkit::PageDocument;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// `/` popup that fuzzy-filters pages by title and slug.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Picker {
    pub query: String,
    pub selected: usize,
}

impl Picker {
    /// Page indices matching the query, best first. An empty query lists
    /// every page in bundle order.
    pub fn matches(&self, pages: &[PageDocument]) -> Vec<usize> {
        let query = self.query.trim();
        if query.is_empty() {
            return (0..pages.len()).collect();
        }
        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, usize)> = pages
            .iter()
            .enumerate()
            .filter_map(|(index, page)| {
                let haystack = format!("{} {}", page.title, page.slug);
                matcher
                    .fuzzy_match(&haystack, query)
                    .map(|score| (score, index))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, index)| index).collect()
    }

    pub fn push(&mut self, ch: char) {
        self.query.push(ch);
        self.selected = 0;
    }

    pub fn pop(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    pub fn step(&mut self, forward: bool, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if forward {
            self.selected = (self.selected + 1) % len;
        } else {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// The page the highlighted row points at.
    pub fn choice(&self, pages: &[PageDocument]) -> Option<usize> {
        self.matches(pages).get(self.selected).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::load_bundle;

    #[test]
    fn empty_query_lists_everything() {
        let pages = load_bundle().unwrap();
        assert_eq!(Picker::default().matches(&pages), vec![0, 1, 2]);
    }

    #[test]
    fn fuzzy_query_narrows_the_list() {
        let pages = load_bundle().unwrap();
        let mut picker = Picker::default();
        for ch in "tmpl".chars() {
            picker.push(ch);
        }
        let matches = picker.matches(&pages);
        assert_eq!(matches.first(), Some(&2));
        assert_eq!(picker.choice(&pages), Some(2));
    }

    #[test]
    fn selection_wraps() {
        let mut picker = Picker::default();
        picker.step(false, 3);
        assert_eq!(picker.selected, 2);
        picker.step(true, 3);
        assert_eq!(picker.selected, 0);
    }
}
