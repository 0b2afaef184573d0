use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::market::counter::count_term;
use crate::market::extract::{extract_corpus, TextCorpus};
use crate::market::ranking::{partition, recount_category, Partition};
use crate::market::taxonomy::{seed_category, CategoryKey, KeywordCategory, KeywordTerm};
use crate::market::MarketError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomTermOutcome {
    Added { count: usize },
    DuplicateIgnored,
    EmptyIgnored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub corpus_bytes: usize,
    pub found_terms: usize,
    pub total_terms: usize,
}

/// Market panel state for one session.
#[derive(Debug, Clone)]
pub struct KeywordAnalysisState {
    is_analyzing: bool,
    is_analyzed: bool,
    categories: BTreeMap<CategoryKey, KeywordCategory>,
    corpus: Option<TextCorpus>,
}

impl Default for KeywordAnalysisState {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordAnalysisState {
    pub fn new() -> Self {
        let categories = CategoryKey::ALL
            .into_iter()
            .map(|key| (key, seed_category(key)))
            .collect();
        KeywordAnalysisState {
            is_analyzing: false,
            is_analyzed: false,
            categories,
            corpus: None,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.is_analyzing
    }

    pub fn is_analyzed(&self) -> bool {
        self.is_analyzed
    }

    pub fn corpus(&self) -> Option<&TextCorpus> {
        self.corpus.as_ref()
    }

    pub fn category(&self, key: CategoryKey) -> &KeywordCategory {
        &self.categories[&key]
    }

    pub fn partition(&self, key: CategoryKey) -> Partition<'_> {
        partition(self.category(key))
    }

    pub fn begin_analysis(&mut self) {
        self.is_analyzing = true;
    }

    /// Clears the in-flight flag when the document never reached the parser.
    pub fn abort_analysis(&mut self) {
        self.is_analyzing = false;
    }

    /// Parses `bytes`, recounts every term (custom ones included) and re-ranks.
    /// On failure only the in-flight flag is cleared.
    pub fn analyze_document(
        &mut self,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<AnalysisSummary, MarketError> {
        self.is_analyzing = true;
        let corpus = match extract_corpus(file_name, bytes) {
            Ok(corpus) => corpus,
            Err(err) => {
                self.is_analyzing = false;
                return Err(err);
            }
        };

        let mut recounted = self.categories.clone();
        for category in recounted.values_mut() {
            recount_category(category, &corpus);
        }

        let total_terms = recounted.values().map(|c| c.items.len()).sum();
        let found_terms = recounted
            .values()
            .flat_map(|c| c.items.iter())
            .filter(|item| item.count > 0)
            .count();
        let summary = AnalysisSummary {
            corpus_bytes: corpus.len(),
            found_terms,
            total_terms,
        };

        self.categories = recounted;
        self.corpus = Some(corpus);
        self.is_analyzing = false;
        self.is_analyzed = true;
        info!(
            "Market analysis of {} complete: found={}/{} corpus_bytes={}",
            file_name, summary.found_terms, summary.total_terms, summary.corpus_bytes
        );
        Ok(summary)
    }

    pub fn add_custom_keyword(&mut self, key: CategoryKey, term: &str) -> CustomTermOutcome {
        let term = term.trim();
        if term.is_empty() {
            return CustomTermOutcome::EmptyIgnored;
        }

        let corpus = self.corpus.as_ref();
        let Some(category) = self.categories.get_mut(&key) else {
            return CustomTermOutcome::EmptyIgnored;
        };
        if category.contains_name(term) {
            debug!("Ignoring duplicate keyword '{}' in {}", term, key);
            return CustomTermOutcome::DuplicateIgnored;
        }

        let count = corpus.map(|corpus| count_term(term, corpus)).unwrap_or(0);
        category.items.insert(
            0,
            KeywordTerm {
                name: term.to_string(),
                count,
            },
        );
        debug!("Added keyword '{}' to {} with count={}", term, key, count);
        CustomTermOutcome::Added { count }
    }

    /// Returns to the seed view without discarding computed counts.
    pub fn reset(&mut self) {
        self.is_analyzed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(state: &KeywordAnalysisState, key: CategoryKey) -> Vec<String> {
        state
            .category(key)
            .items
            .iter()
            .map(|item| item.name.clone())
            .collect()
    }

    #[test]
    fn vintage_sheet_ranks_vintage_first() {
        let mut state = KeywordAnalysisState::new();
        state.begin_analysis();
        assert!(state.is_analyzing());

        state
            .analyze_document("styles.csv", b"vintage vintage vintage\n")
            .expect("analysis succeeds");

        assert!(state.is_analyzed());
        assert!(!state.is_analyzing());
        let view = state.partition(CategoryKey::Style);
        assert_eq!(view.found.len(), 1);
        assert_eq!(view.found[0].name, "Vintage (复古)");
        assert_eq!(view.found[0].count, 3);
        assert_eq!(state.category(CategoryKey::Style).items[0].name, "Vintage (复古)");
    }

    #[test]
    fn vintage_workbook_ranks_vintage_first() {
        let mut state = KeywordAnalysisState::new();
        state.begin_analysis();
        state
            .analyze_document("styles.xlsx", include_bytes!("fixtures/vintage_only.xlsx"))
            .expect("analysis succeeds");

        assert!(state.is_analyzed());
        let view = state.partition(CategoryKey::Style);
        assert_eq!(view.found[0].name, "Vintage (复古)");
        assert_eq!(view.found[0].count, 3);
        assert_eq!(state.category(CategoryKey::Style).items[0].name, "Vintage (复古)");
    }

    #[test]
    fn failed_parse_leaves_categories_untouched() {
        let mut state = KeywordAnalysisState::new();
        state
            .analyze_document("first.csv", b"pearl pearl diamond\n")
            .expect("analysis succeeds");
        let before = state.category(CategoryKey::Stone).clone();
        let corpus_before = state.corpus().cloned();

        state.begin_analysis();
        let err = state
            .analyze_document("broken.xlsx", b"\x00\x01garbage")
            .unwrap_err();
        assert!(matches!(err, MarketError::Parse(_)));
        assert!(!state.is_analyzing());
        assert!(state.is_analyzed());
        assert_eq!(state.category(CategoryKey::Stone), &before);
        assert_eq!(state.corpus().cloned(), corpus_before);
    }

    #[test]
    fn custom_keyword_without_corpus_counts_zero_and_goes_first() {
        let mut state = KeywordAnalysisState::new();
        let outcome = state.add_custom_keyword(CategoryKey::Material, "Copper");
        assert_eq!(outcome, CustomTermOutcome::Added { count: 0 });
        let first = &state.category(CategoryKey::Material).items[0];
        assert_eq!(first.name, "Copper");
        assert_eq!(first.count, 0);
    }

    #[test]
    fn custom_keyword_counts_against_cached_corpus_and_skips_ranking() {
        let mut state = KeywordAnalysisState::new();
        state
            .analyze_document("sheet.csv", b"brass brass copper platinum\n")
            .expect("analysis succeeds");
        let outcome = state.add_custom_keyword(CategoryKey::Material, " Copper ");
        assert_eq!(outcome, CustomTermOutcome::Added { count: 1 });
        assert_eq!(
            names(&state, CategoryKey::Material)[..3],
            ["Copper", "Brass (黄铜)", "Platinum (铂金)"]
        );
    }

    #[test]
    fn duplicate_custom_keyword_is_a_no_op() {
        let mut state = KeywordAnalysisState::new();
        let before = names(&state, CategoryKey::Stone);
        assert_eq!(
            state.add_custom_keyword(CategoryKey::Stone, "PEARL (珍珠)"),
            CustomTermOutcome::DuplicateIgnored
        );
        assert_eq!(
            state.add_custom_keyword(CategoryKey::Stone, "   "),
            CustomTermOutcome::EmptyIgnored
        );
        assert_eq!(names(&state, CategoryKey::Stone), before);

        state.add_custom_keyword(CategoryKey::Stone, "Opal");
        let after_first = names(&state, CategoryKey::Stone);
        state.add_custom_keyword(CategoryKey::Stone, "opal");
        assert_eq!(names(&state, CategoryKey::Stone), after_first);
    }

    #[test]
    fn reanalysis_recounts_custom_terms() {
        let mut state = KeywordAnalysisState::new();
        state.add_custom_keyword(CategoryKey::Element, "Moon");
        state
            .analyze_document("sheet.csv", b"moon moon star\n")
            .expect("analysis succeeds");
        let element = state.category(CategoryKey::Element);
        assert_eq!(element.items[0].name, "Moon");
        assert_eq!(element.items[0].count, 2);
        assert_eq!(element.items[1].name, "Star (星星)");
    }

    #[test]
    fn reset_keeps_counts() {
        let mut state = KeywordAnalysisState::new();
        state
            .analyze_document("sheet.csv", b"gothic\n")
            .expect("analysis succeeds");
        state.reset();
        assert!(!state.is_analyzed());
        assert_eq!(state.category(CategoryKey::Style).items[0].count, 1);
    }
}
