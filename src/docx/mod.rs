mod properties;
mod styles;
pub mod units;
mod walker;

use std::collections::HashMap;
use std::io::{Read, Seek};

use indexmap::IndexMap;
use serde::Serialize;

use crate::css::{generate_css, style_map};
use crate::error::Error;
use crate::model::{DocumentStyleEntry, MediaPart, StyleDefinition, ThemeFonts};
use crate::registry::StyleRegistry;

pub use properties::PropertyRules;
pub use styles::{derive_mapping, heading_level, parse_style, parse_styles_xml, sanitize_class_name};
pub use walker::walk_document;

pub const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const DML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const IMAGE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Everything the styling layer pulls out of one DOCX package.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleExtraction {
    pub styles: IndexMap<String, StyleDefinition>,
    pub document_styles: Vec<DocumentStyleEntry>,
    pub css: String,
    /// Font names from `word/fontTable.xml`, sorted and deduplicated.
    pub fonts: Vec<String>,
    pub theme: ThemeFonts,
    pub style_map: Vec<String>,
    /// Embedded images keyed by relationship id.
    #[serde(skip)]
    pub media: HashMap<String, MediaPart>,
}

pub(crate) fn is_wml(node: roxmltree::Node, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

pub(crate) fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children().find(|n| is_wml(*n, name))
}

/// A `w:`-namespaced attribute of `node` itself.
pub(crate) fn w_attr<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<&'a str> {
    node.attribute((WML_NS, name))
}

/// The `w:val` of a `w:` child element.
pub(crate) fn wml_attr<'a>(node: roxmltree::Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| w_attr(n, "val"))
}

/// Parse a WML boolean toggle element (e.g., w:b, w:i, w:strike).
/// Present with no val or val other than "0"/"false"/"off" means true.
pub(crate) fn wml_bool(parent: roxmltree::Node, name: &str) -> Option<bool> {
    wml(parent, name).map(|n| w_attr(n, "val").is_none_or(|v| !matches!(v, "0" | "false" | "off")))
}

pub(crate) fn read_zip_text<R: Read + Seek>(
    zip: &mut zip::ZipArchive<R>,
    name: &str,
) -> Option<String> {
    let mut content = String::new();
    zip.by_name(name).ok()?.read_to_string(&mut content).ok()?;
    Some(content)
}

fn read_zip_bytes<R: Read + Seek>(zip: &mut zip::ZipArchive<R>, name: &str) -> Option<Vec<u8>> {
    let mut data = Vec::new();
    zip.by_name(name).ok()?.read_to_end(&mut data).ok()?;
    Some(data)
}

/// Runs the whole styling pipeline over one package: theme, font table and
/// media first, then styles, then the body walk, then CSS generation.
///
/// Only an unreadable ZIP or an unusable `word/document.xml` is an error;
/// every other part degrades to "not present".
pub fn extract<R: Read + Seek>(reader: R) -> Result<StyleExtraction, Error> {
    let mut zip = zip::ZipArchive::new(reader)
        .map_err(|_| Error::InvalidDocx("file is not a ZIP archive".into()))?;

    let theme = styles::parse_theme(&mut zip);
    let fonts = parse_font_table(&mut zip);
    let rels = parse_relationships(&mut zip);
    let media = load_media(&mut zip, &rels);

    let mut registry = StyleRegistry::new();
    let rules = PropertyRules::new(&theme);
    styles::parse_styles(&mut zip, &rules, &mut registry);

    let document_xml = read_zip_text(&mut zip, "word/document.xml")
        .ok_or_else(|| Error::InvalidDocx("missing word/document.xml (is this a DOCX file?)".into()))?;
    let xml = roxmltree::Document::parse(&document_xml)
        .map_err(|e| Error::InvalidDocx(format!("word/document.xml: {e}")))?;
    let body = wml(xml.root_element(), "body")
        .ok_or_else(|| Error::InvalidDocx("word/document.xml has no w:body".into()))?;

    let kept = walk_document(body, &rules, &mut registry);
    log::debug!(
        "{} named styles, {kept} document style entries, {} media parts",
        registry.style_count(),
        media.len()
    );

    let css = generate_css(&registry);
    let style_map = style_map(&registry);
    let (styles, document_styles) = registry.into_parts();

    Ok(StyleExtraction {
        styles,
        document_styles,
        css,
        fonts,
        theme,
        style_map,
        media,
    })
}

fn parse_font_table<R: Read + Seek>(zip: &mut zip::ZipArchive<R>) -> Vec<String> {
    let Some(xml_content) = read_zip_text(zip, "word/fontTable.xml") else {
        return vec![];
    };
    let xml = match roxmltree::Document::parse(&xml_content) {
        Ok(xml) => xml,
        Err(e) => {
            log::warn!("Skipping unparsable word/fontTable.xml: {e}");
            return vec![];
        }
    };
    let mut fonts: Vec<String> = xml
        .root_element()
        .children()
        .filter(|n| is_wml(*n, "font"))
        .filter_map(|n| w_attr(n, "name"))
        .filter(|name| !name.trim().is_empty())
        .map(String::from)
        .collect();
    fonts.sort();
    fonts.dedup();
    fonts
}

struct Relationship {
    target: String,
    kind: String,
    external: bool,
}

fn parse_rels_xml(xml_content: &str) -> HashMap<String, Relationship> {
    let mut rels = HashMap::new();
    let xml = match roxmltree::Document::parse(xml_content) {
        Ok(xml) => xml,
        Err(e) => {
            log::warn!("Skipping unparsable relationships part: {e}");
            return rels;
        }
    };
    for node in xml.root_element().children() {
        if node.tag_name().name() != "Relationship" {
            continue;
        }
        if node.tag_name().namespace().is_some_and(|ns| ns != REL_NS) {
            continue;
        }
        if let (Some(id), Some(target)) = (node.attribute("Id"), node.attribute("Target")) {
            rels.insert(
                id.to_string(),
                Relationship {
                    target: target.to_string(),
                    kind: node.attribute("Type").unwrap_or_default().to_string(),
                    external: node.attribute("TargetMode") == Some("External"),
                },
            );
        }
    }
    rels
}

fn parse_relationships<R: Read + Seek>(
    zip: &mut zip::ZipArchive<R>,
) -> HashMap<String, Relationship> {
    let Some(xml_content) = read_zip_text(zip, "word/_rels/document.xml.rels") else {
        return HashMap::new();
    };
    parse_rels_xml(&xml_content)
}

/// Reads every internal image relationship target once, so nothing later
/// needs to go back to the archive.
fn load_media<R: Read + Seek>(
    zip: &mut zip::ZipArchive<R>,
    rels: &HashMap<String, Relationship>,
) -> HashMap<String, MediaPart> {
    let mut media = HashMap::new();
    for (id, rel) in rels {
        if rel.external || rel.kind != IMAGE_REL_TYPE {
            continue;
        }
        let zip_path = rel
            .target
            .strip_prefix('/')
            .map(String::from)
            .unwrap_or_else(|| format!("word/{}", rel.target));
        let Some(data) = read_zip_bytes(zip, &zip_path) else {
            log::warn!("Image relationship {id} points at missing part {zip_path}");
            continue;
        };
        media.insert(
            id.clone(),
            MediaPart {
                content_type: content_type_for(&zip_path),
                target: zip_path,
                data,
            },
        );
    }
    media
}

fn content_type_for(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "emf" => "image/x-emf",
        "wmf" => "image/x-wmf",
        _ => "application/octet-stream",
    }
}
