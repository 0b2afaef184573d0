use crate::market::extract::TextCorpus;

/// A term name split into its primary label and optional parenthetical alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermParts<'a> {
    pub primary: &'a str,
    pub alias: Option<&'a str>,
}

pub fn split_term(name: &str) -> TermParts<'_> {
    let primary = match name.find('(') {
        Some(index) => &name[..index],
        None => name,
    }
    .trim();

    let alias = name.find('(').and_then(|open| {
        let rest = &name[open + 1..];
        rest.find(')').map(|close| rest[..close].trim())
    });

    TermParts {
        primary,
        alias: alias.filter(|value| !value.is_empty()),
    }
}

/// Display value of a term with its alias stripped.
pub fn primary_label(name: &str) -> &str {
    split_term(name).primary
}

fn count_literal(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

/// Occurrences of the term's primary label plus occurrences of its alias.
pub fn count_term(name: &str, corpus: &TextCorpus) -> usize {
    if corpus.is_empty() {
        return 0;
    }

    let parts = split_term(name);
    let mut total = count_literal(corpus.as_str(), &parts.primary.to_lowercase());
    if let Some(alias) = parts.alias {
        total += count_literal(corpus.as_str(), &alias.to_lowercase());
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_primary_and_alias() {
        let parts = split_term("Rose Gold (玫瑰金)");
        assert_eq!(parts.primary, "Rose Gold");
        assert_eq!(parts.alias, Some("玫瑰金"));

        let plain = split_term("  Copper ");
        assert_eq!(plain.primary, "Copper");
        assert_eq!(plain.alias, None);

        let unclosed = split_term("Art Deco (艺术");
        assert_eq!(unclosed.primary, "Art Deco");
        assert_eq!(unclosed.alias, None);

        let empty_alias = split_term("Onyx ()");
        assert_eq!(empty_alias.alias, None);
    }

    #[test]
    fn multi_word_label_is_not_matched_token_by_token() {
        let corpus = TextCorpus::from_text("gold gold silver");
        assert_eq!(count_term("18K Gold (18K金)", &corpus), 0);
    }

    #[test]
    fn primary_and_alias_counts_are_additive() {
        let corpus = TextCorpus::from_text(r#"[["Vintage ring","复古 戒指"],["VINTAGE"]]"#);
        assert_eq!(count_term("Vintage (复古)", &corpus), 3);
    }

    #[test]
    fn counts_non_overlapping_literal_matches() {
        let corpus = TextCorpus::from_text("aaaa");
        assert_eq!(count_term("aa", &corpus), 2);

        let dotted = TextCorpus::from_text("a.b axb");
        assert_eq!(count_term("a.b", &dotted), 1);
    }

    #[test]
    fn empty_corpus_counts_zero() {
        assert_eq!(count_term("Diamond (钻石)", &TextCorpus::default()), 0);
    }

    #[test]
    fn count_grows_with_corpus() {
        let base = "minimalist ring, gold chain";
        let grown = format!("{base} minimalist minimalist");
        let before = count_term("Minimalist (极简)", &TextCorpus::from_text(base));
        let after = count_term("Minimalist (极简)", &TextCorpus::from_text(&grown));
        assert!(after >= before);
        assert_eq!(after - before, 2);
    }
}
