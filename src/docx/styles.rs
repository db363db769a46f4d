use std::io::{Read, Seek};

use roxmltree::Node;

use crate::model::{CssMap, StyleDefinition, StyleMapping, StyleType, ThemeFonts};
use crate::registry::StyleRegistry;

use super::properties::PropertyRules;
use super::{DML_NS, WML_NS, is_wml, read_zip_text, wml, wml_attr};

fn dml<'a>(node: Node<'a, 'a>, name: &str) -> Option<Node<'a, 'a>> {
    node.children()
        .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(DML_NS))
}

fn latin_typeface<'a>(node: Node<'a, 'a>) -> Option<&'a str> {
    dml(node, "latin")
        .and_then(|n| n.attribute("typeface"))
        .filter(|tf| !tf.is_empty())
}

/// Major/minor Latin typefaces of the first theme part, if the package has one.
pub(super) fn parse_theme<R: Read + Seek>(zip: &mut zip::ZipArchive<R>) -> ThemeFonts {
    let mut theme = ThemeFonts::default();

    let mut names: Vec<String> = zip
        .file_names()
        .filter(|n| n.starts_with("word/theme/") && n.ends_with(".xml"))
        .map(|s| s.to_string())
        .collect();
    names.sort();
    let Some(xml_content) = names.first().and_then(|name| read_zip_text(zip, name)) else {
        log::debug!("No theme part, theme fonts unavailable");
        return theme;
    };
    let xml = match roxmltree::Document::parse(&xml_content) {
        Ok(xml) => xml,
        Err(e) => {
            log::warn!("Skipping unparsable theme part: {e}");
            return theme;
        }
    };

    for node in xml.descendants() {
        if node.tag_name().namespace() != Some(DML_NS) {
            continue;
        }
        match node.tag_name().name() {
            "majorFont" => theme.major = latin_typeface(node).map(str::to_string),
            "minorFont" => theme.minor = latin_typeface(node).map(str::to_string),
            _ => {}
        }
    }

    theme
}

/// Reads `word/styles.xml` into the registry. A missing or malformed part
/// leaves the registry without named styles.
pub(super) fn parse_styles<R: Read + Seek>(
    zip: &mut zip::ZipArchive<R>,
    rules: &PropertyRules,
    registry: &mut StyleRegistry,
) {
    let Some(xml_content) = read_zip_text(zip, "word/styles.xml") else {
        log::warn!("word/styles.xml missing, continuing without named styles");
        return;
    };
    match parse_styles_xml(&xml_content, rules) {
        Ok(styles) => {
            log::debug!("Parsed {} style definitions", styles.len());
            for style in styles {
                registry.insert_style(style);
            }
        }
        Err(e) => log::warn!("Skipping unparsable word/styles.xml: {e}"),
    }
}

/// Every `w:style` child of a styles part root, in document order.
pub fn parse_styles_xml(
    xml_content: &str,
    rules: &PropertyRules,
) -> Result<Vec<StyleDefinition>, roxmltree::Error> {
    let xml = roxmltree::Document::parse(xml_content)?;
    Ok(xml
        .root_element()
        .children()
        .filter(|n| is_wml(*n, "style"))
        .filter_map(|n| parse_style(n, rules))
        .collect())
}

/// One `w:style` element to a [`StyleDefinition`]. Styles without a
/// `w:styleId` cannot be referenced and are skipped.
pub fn parse_style(style_node: Node, rules: &PropertyRules) -> Option<StyleDefinition> {
    let Some(style_id) = style_node
        .attribute((WML_NS, "styleId"))
        .filter(|id| !id.trim().is_empty())
    else {
        log::debug!("Skipping w:style without styleId");
        return None;
    };
    let name = wml_attr(style_node, "name")
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(style_id);
    let style_type = StyleType::from_attr(style_node.attribute((WML_NS, "type")));
    let is_default = style_node
        .attribute((WML_NS, "default"))
        .is_some_and(|v| matches!(v, "1" | "true" | "on"));

    let mut css = CssMap::new();
    if let Some(ppr) = wml(style_node, "pPr") {
        rules.paragraph(ppr, &mut css);
    }
    if let Some(rpr) = wml(style_node, "rPr") {
        rules.run(rpr, &mut css);
    }
    if let Some(tbl_pr) = wml(style_node, "tblPr") {
        rules.table(tbl_pr, &mut css);
    }

    Some(StyleDefinition {
        style_id: style_id.to_string(),
        name: name.to_string(),
        style_type,
        css,
        mapping: derive_mapping(style_id, name, style_type),
        based_on: wml_attr(style_node, "basedOn").map(str::to_string),
        next: wml_attr(style_node, "next").map(str::to_string),
        is_default,
    })
}

pub fn derive_mapping(style_id: &str, name: &str, style_type: StyleType) -> StyleMapping {
    let lower = name.to_lowercase();
    let target_element = match style_type {
        StyleType::Paragraph if lower.contains("heading") => format!("h{}", heading_level(name)),
        StyleType::Paragraph if lower.contains("list") => "li".to_string(),
        StyleType::Paragraph => "p".to_string(),
        StyleType::Character => "span".to_string(),
        StyleType::Table => "table".to_string(),
        StyleType::Numbering => "ol".to_string(),
    };
    let prefix = match style_type {
        StyleType::Paragraph | StyleType::Numbering => "p",
        StyleType::Character => "r",
        StyleType::Table => "table",
    };
    StyleMapping {
        selector: format!("{prefix}[style-name='{}']", name.replace('\'', "\\'")),
        target_element,
        class_name: sanitize_class_name(style_id),
    }
}

/// First group of digits in a style name, clamped to `1..=6`. Names without
/// digits are level 1.
pub fn heading_level(name: &str) -> u8 {
    let digits: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 1;
    }
    // Anything too long to parse is far above the clamp anyway.
    let level = digits.parse::<u64>().unwrap_or(u64::MAX);
    level.clamp(1, 6) as u8
}

/// Turns a style id into a CSS class name matching `[a-zA-Z_-][a-zA-Z0-9_-]*`.
///
/// ASCII letters are lowercased, other ASCII becomes `-`, non-ASCII
/// characters become `u{hex}`. Dash runs collapse, edge dashes are trimmed
/// and a leading digit gets a `style-` prefix. Applying it twice is a no-op.
pub fn sanitize_class_name(style_id: &str) -> String {
    let mut raw = String::with_capacity(style_id.len());
    for c in style_id.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '_' => raw.push(c.to_ascii_lowercase()),
            c if c.is_ascii() => raw.push('-'),
            c => {
                raw.push('u');
                raw.push_str(&format!("{:x}", c as u32));
            }
        }
    }

    let mut collapsed = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }
    let trimmed = collapsed.trim_matches('-');

    if trimmed.is_empty() {
        "style".to_string()
    } else if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        format!("style-{trimmed}")
    } else {
        trimmed.to_string()
    }
}
