#![allow(dead_code)]

use std::io::{Cursor, Write};

use docxide_html::docx::PropertyRules;
use docxide_html::{CssMap, ThemeFonts};
use zip::write::SimpleFileOptions;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const A_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

/// Builds DOCX packages in memory, one part at a time.
#[derive(Default)]
pub struct DocxBuilder {
    parts: Vec<(String, Vec<u8>)>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn part(mut self, name: &str, content: impl Into<Vec<u8>>) -> Self {
        self.parts.push((name.to_string(), content.into()));
        self
    }

    /// `word/styles.xml` holding the given `w:style` elements.
    pub fn styles(self, styles: &str) -> Self {
        self.part("word/styles.xml", styles_xml(styles))
    }

    /// `word/document.xml` whose `w:body` holds `body`.
    pub fn body(self, body: &str) -> Self {
        self.part("word/document.xml", document_xml(body))
    }

    pub fn font_table(self, names: &[&str]) -> Self {
        let fonts: String = names
            .iter()
            .map(|n| format!(r#"<w:font w:name="{n}"/>"#))
            .collect();
        self.part(
            "word/fontTable.xml",
            format!(r#"<?xml version="1.0" encoding="UTF-8"?><w:fonts xmlns:w="{W_NS}">{fonts}</w:fonts>"#),
        )
    }

    pub fn theme(self, major: &str, minor: &str) -> Self {
        self.part(
            "word/theme/theme1.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8"?><a:theme xmlns:a="{A_NS}"><a:themeElements><a:fontScheme name="Office"><a:majorFont><a:latin typeface="{major}"/></a:majorFont><a:minorFont><a:latin typeface="{minor}"/></a:minorFont></a:fontScheme></a:themeElements></a:theme>"#
            ),
        )
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in &self.parts {
            zip.start_file(name.as_str(), options).unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }
}

pub fn styles_xml(styles: &str) -> String {
    format!(r#"<?xml version="1.0" encoding="UTF-8"?><w:styles xmlns:w="{W_NS}">{styles}</w:styles>"#)
}

pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="{W_NS}"><w:body>{body}</w:body></w:document>"#
    )
}

/// CSS produced by the run rules for `<w:rPr>{inner}</w:rPr>`.
pub fn run_css(inner: &str) -> CssMap {
    let xml = format!(r#"<w:rPr xmlns:w="{W_NS}">{inner}</w:rPr>"#);
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let theme = ThemeFonts::default();
    let mut css = CssMap::new();
    PropertyRules::new(&theme).run(doc.root_element(), &mut css);
    css
}

/// CSS produced by the paragraph rules for `<w:pPr>{inner}</w:pPr>`.
pub fn paragraph_css(inner: &str) -> CssMap {
    let xml = format!(r#"<w:pPr xmlns:w="{W_NS}">{inner}</w:pPr>"#);
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let theme = ThemeFonts::default();
    let mut css = CssMap::new();
    PropertyRules::new(&theme).paragraph(doc.root_element(), &mut css);
    css
}

/// CSS produced by the table rules for `<w:tblPr>{inner}</w:tblPr>`.
pub fn table_css(inner: &str) -> CssMap {
    let xml = format!(r#"<w:tblPr xmlns:w="{W_NS}">{inner}</w:tblPr>"#);
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let theme = ThemeFonts::default();
    let mut css = CssMap::new();
    PropertyRules::new(&theme).table(doc.root_element(), &mut css);
    css
}

pub fn css_get<'a>(css: &'a CssMap, property: &str) -> Option<&'a str> {
    css.get(property).map(String::as_str)
}
