use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::design::model::DesignConfig;

pub const SAVED_FILTER: &str = "SAVED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStatus {
    Loading,
    Success,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDesign {
    pub id: String,
    pub url: String,
    pub prompt: String,
    pub timestamp: DateTime<Utc>,
    pub status: RenderStatus,
    pub tags: Vec<String>,
    pub saved: bool,
    pub config: DesignConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryFilter {
    All,
    Saved,
    Tag(String),
}

impl GalleryFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => GalleryFilter::All,
            Some(SAVED_FILTER) => GalleryFilter::Saved,
            Some(tag) => GalleryFilter::Tag(tag.to_string()),
        }
    }
}

/// Generated renders, newest first.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<GeneratedDesign>,
    next_seq: u64,
}

impl Gallery {
    pub fn items(&self) -> &[GeneratedDesign] {
        &self.items
    }

    /// Inserts a loading placeholder carrying the tags and config snapshot used
    /// for the request; returns its id.
    pub fn begin(&mut self, config: &DesignConfig, tags: Vec<String>) -> String {
        let timestamp = Utc::now();
        self.next_seq += 1;
        let id = format!("{}-{}", timestamp.timestamp_millis(), self.next_seq);
        self.items.insert(
            0,
            GeneratedDesign {
                id: id.clone(),
                url: String::new(),
                prompt: config.misc_prompts.clone(),
                timestamp,
                status: RenderStatus::Loading,
                tags,
                saved: false,
                config: config.clone(),
            },
        );
        id
    }

    pub fn complete(&mut self, id: &str, url: String) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.url = url;
                item.status = RenderStatus::Success;
                true
            }
            None => false,
        }
    }

    pub fn fail(&mut self, id: &str) {
        self.items.retain(|item| item.id != id);
    }

    pub fn toggle_saved(&mut self, id: &str) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.saved = !item.saved;
        Some(item.saved)
    }

    pub fn filtered(&self, filter: &GalleryFilter) -> Vec<&GeneratedDesign> {
        self.items
            .iter()
            .filter(|item| match filter {
                GalleryFilter::All => true,
                GalleryFilter::Saved => item.saved,
                GalleryFilter::Tag(tag) => item.tags.iter().any(|t| t == tag),
            })
            .collect()
    }

    pub fn completed_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.status != RenderStatus::Loading)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn placeholder_completes_or_disappears() {
        let mut gallery = Gallery::default();
        let config = DesignConfig::default();
        let first = gallery.begin(&config, tags(&["Pearl"]));
        let second = gallery.begin(&config, tags(&["Onyx"]));
        assert_eq!(gallery.items()[0].id, second);
        assert_eq!(gallery.completed_count(), 0);

        assert!(gallery.complete(&first, "data:image/png;base64,AAAA".to_string()));
        gallery.fail(&second);
        assert_eq!(gallery.items().len(), 1);
        assert_eq!(gallery.items()[0].status, RenderStatus::Success);
        assert_eq!(gallery.completed_count(), 1);
    }

    #[test]
    fn filters_by_tag_and_saved() {
        let mut gallery = Gallery::default();
        let config = DesignConfig::default();
        let pearl = gallery.begin(&config, tags(&["Pearl", "Vintage"]));
        gallery.begin(&config, tags(&["Onyx"]));

        assert_eq!(gallery.toggle_saved(&pearl), Some(true));
        assert_eq!(gallery.filtered(&GalleryFilter::All).len(), 2);
        assert_eq!(gallery.filtered(&GalleryFilter::parse(Some("SAVED")))[0].id, pearl);
        assert_eq!(gallery.filtered(&GalleryFilter::Tag("Vintage".to_string())).len(), 1);
        assert!(gallery.filtered(&GalleryFilter::Tag("Gothic".to_string())).is_empty());
        assert_eq!(gallery.toggle_saved("missing"), None);
    }
}
