use indexmap::IndexMap;

use crate::model::{DocumentStyleEntry, StyleDefinition};

/// Parsed styles of one conversion. Built fresh per document and never shared
/// between conversions.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    styles: IndexMap<String, StyleDefinition>,
    document_styles: Vec<DocumentStyleEntry>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a style definition. A later definition with the same id replaces
    /// the earlier one, which is returned.
    pub fn insert_style(&mut self, style: StyleDefinition) -> Option<StyleDefinition> {
        let previous = self.styles.insert(style.style_id.clone(), style);
        if let Some(prev) = &previous {
            log::debug!("Duplicate style id {}, keeping the later definition", prev.style_id);
        }
        previous
    }

    pub fn style(&self, style_id: &str) -> Option<&StyleDefinition> {
        self.styles.get(style_id)
    }

    /// Styles in the order they were first inserted.
    pub fn styles(&self) -> impl Iterator<Item = &StyleDefinition> {
        self.styles.values()
    }

    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    /// Appends a document style entry unless it carries neither CSS nor a
    /// style reference. Returns whether the entry was kept.
    pub fn push_document_style(&mut self, entry: DocumentStyleEntry) -> bool {
        if entry.is_noise() {
            return false;
        }
        self.document_styles.push(entry);
        true
    }

    pub fn document_styles(&self) -> &[DocumentStyleEntry] {
        &self.document_styles
    }

    pub fn into_parts(self) -> (IndexMap<String, StyleDefinition>, Vec<DocumentStyleEntry>) {
        (self.styles, self.document_styles)
    }
}
