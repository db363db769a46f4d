use indexmap::IndexMap;
use serde::Serialize;

/// CSS property name → value, in the order the properties were first set.
/// Re-setting a property replaces its value in place.
pub type CssMap = IndexMap<String, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleType {
    Paragraph,
    Character,
    Table,
    Numbering,
}

impl StyleType {
    /// Unknown or missing `w:type` values fall back to paragraph.
    pub fn from_attr(val: Option<&str>) -> Self {
        match val {
            Some("character") => StyleType::Character,
            Some("table") => StyleType::Table,
            Some("numbering") => StyleType::Numbering,
            _ => StyleType::Paragraph,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StyleType::Paragraph => "paragraph",
            StyleType::Character => "character",
            StyleType::Table => "table",
            StyleType::Numbering => "numbering",
        }
    }
}

/// Where a paragraph or run carrying a named style ends up in the HTML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMapping {
    pub selector: String,
    pub target_element: String,
    pub class_name: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDefinition {
    pub style_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub style_type: StyleType,
    pub css: CssMap,
    pub mapping: StyleMapping,
    pub based_on: Option<String>,
    pub next: Option<String>,
    pub is_default: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Paragraph,
    Run,
    Table,
}

/// Direct formatting found on one paragraph, run or table of the body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStyleEntry {
    pub element_type: ElementType,
    pub style_id: Option<String>,
    pub css: CssMap,
}

impl DocumentStyleEntry {
    /// An entry with no direct formatting and no style reference carries nothing.
    pub fn is_noise(&self) -> bool {
        self.css.is_empty() && self.style_id.is_none()
    }
}

/// Latin typefaces from the theme part. `None` when the package has no theme.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ThemeFonts {
    pub major: Option<String>,
    pub minor: Option<String>,
}

/// An embedded media part read up front, keyed by relationship id elsewhere.
#[derive(Clone, Debug)]
pub struct MediaPart {
    /// Path inside the package, e.g. `word/media/image1.png`.
    pub target: String,
    pub content_type: &'static str,
    pub data: Vec<u8>,
}
