use anyhow::Result;

use crate::design::concepts::CreativeConcept;
use crate::design::gallery::{GalleryFilter, RenderStatus};
use crate::market::binder::is_active;
use crate::market::tags::derive_active_tags;
use crate::market::taxonomy::KeywordTerm;
use crate::market::CategoryKey;
use crate::state::Session;

fn render_terms(
    session: &Session,
    key: CategoryKey,
    terms: &[&KeywordTerm],
    with_counts: bool,
) -> String {
    if terms.is_empty() {
        return "-".to_string();
    }
    terms
        .iter()
        .map(|term| {
            let marker = if is_active(&session.design, key, &term.name, session.active_match) {
                "*"
            } else {
                ""
            };
            if with_counts {
                format!("{marker}{} ({})", term.name, term.count)
            } else {
                format!("{marker}{}", term.name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Found terms first, then zero-count suggestions, per category. Active
/// keywords are marked with `*`.
pub fn render_market_report(session: &Session) -> String {
    let mut report = String::new();
    let status = match session.market.corpus() {
        Some(corpus) if session.market.is_analyzed() => {
            format!("analyzed, {} bytes of sheet text", corpus.len())
        }
        _ => "not analyzed".to_string(),
    };
    report.push_str(&format!("Market keywords ({status})\n"));

    for key in CategoryKey::ALL {
        let view = session.market.partition(key);
        report.push_str(&format!("\n{}\n", key.label()));
        if session.market.is_analyzed() {
            report.push_str(&format!(
                "  found: {}\n",
                render_terms(session, key, &view.found, true)
            ));
            report.push_str(&format!(
                "  suggested: {}\n",
                render_terms(session, key, &view.suggested, false)
            ));
        } else {
            let all: Vec<&KeywordTerm> = session.market.category(key).items.iter().collect();
            report.push_str(&format!(
                "  terms: {}\n",
                render_terms(session, key, &all, false)
            ));
        }
    }
    report
}

pub fn render_design(session: &Session) -> Result<String> {
    let json = serde_json::to_string_pretty(&session.design)?;
    let tags = derive_active_tags(&session.design);
    Ok(format!(
        "Design configuration\n{json}\nActive tags: {}\n",
        if tags.is_empty() {
            "-".to_string()
        } else {
            tags.join(" | ")
        }
    ))
}

pub fn render_concepts(concepts: &[CreativeConcept]) -> String {
    concepts
        .iter()
        .enumerate()
        .map(|(index, concept)| format!("{:>2}. {} - {}\n", index + 1, concept.title, concept.reasoning))
        .collect()
}

pub fn render_gallery(session: &Session, filter: &GalleryFilter) -> String {
    let items = session.gallery.filtered(filter);
    let mut report = format!(
        "Gallery ({} of {} rendered)\n",
        items.len(),
        session.gallery.completed_count()
    );
    for item in items {
        let status = match item.status {
            RenderStatus::Loading => "loading",
            RenderStatus::Success => "done",
        };
        let url = if item.url.starts_with("data:") {
            format!("{} bytes of inline image data", item.url.len())
        } else {
            item.url.clone()
        };
        report.push_str(&format!(
            "- {} [{}]{} {} tags: {}\n",
            item.id,
            status,
            if item.saved { " saved" } else { "" },
            url,
            item.tags.join(", ")
        ));
    }
    report
}
