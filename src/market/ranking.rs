use crate::market::counter::count_term;
use crate::market::extract::TextCorpus;
use crate::market::taxonomy::{KeywordCategory, KeywordTerm};

/// Read-only view of a ranked category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<'a> {
    pub found: Vec<&'a KeywordTerm>,
    pub suggested: Vec<&'a KeywordTerm>,
}

/// Stable sort by descending count; ties keep their previous order.
pub fn rank_items(items: &mut [KeywordTerm]) {
    items.sort_by(|a, b| b.count.cmp(&a.count));
}

pub fn recount_category(category: &mut KeywordCategory, corpus: &TextCorpus) {
    for item in category.items.iter_mut() {
        item.count = count_term(&item.name, corpus);
    }
    rank_items(&mut category.items);
}

pub fn partition(category: &KeywordCategory) -> Partition<'_> {
    let (found, suggested): (Vec<&KeywordTerm>, Vec<&KeywordTerm>) =
        category.items.iter().partition(|item| item.count > 0);
    Partition { found, suggested }
}
