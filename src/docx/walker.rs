use roxmltree::Node;

use crate::model::{CssMap, DocumentStyleEntry, ElementType};
use crate::registry::StyleRegistry;

use super::properties::PropertyRules;
use super::{WML_NS, wml, wml_attr};

/// Walks a `w:body` (or any subtree) in document order and records the
/// direct formatting of every paragraph, run and table. All other elements
/// are passed through. Returns the number of entries kept.
pub fn walk_document(body: Node, rules: &PropertyRules, registry: &mut StyleRegistry) -> usize {
    let mut kept = 0;
    for node in body.descendants() {
        if node.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        let entry = match node.tag_name().name() {
            "p" => paragraph_entry(node, rules),
            "r" => run_entry(node, rules),
            "tbl" => table_entry(node, rules),
            _ => continue,
        };
        if registry.push_document_style(entry) {
            kept += 1;
        }
    }
    kept
}

fn paragraph_entry(para: Node, rules: &PropertyRules) -> DocumentStyleEntry {
    let mut css = CssMap::new();
    let ppr = wml(para, "pPr");
    if let Some(ppr) = ppr {
        rules.paragraph(ppr, &mut css);
        // Paragraph-mark run properties.
        if let Some(rpr) = wml(ppr, "rPr") {
            rules.run(rpr, &mut css);
        }
    }
    DocumentStyleEntry {
        element_type: ElementType::Paragraph,
        style_id: ppr.and_then(|ppr| wml_attr(ppr, "pStyle")).map(str::to_string),
        css,
    }
}

fn run_entry(run: Node, rules: &PropertyRules) -> DocumentStyleEntry {
    let mut css = CssMap::new();
    let rpr = wml(run, "rPr");
    if let Some(rpr) = rpr {
        rules.run(rpr, &mut css);
    }
    DocumentStyleEntry {
        element_type: ElementType::Run,
        style_id: rpr.and_then(|rpr| wml_attr(rpr, "rStyle")).map(str::to_string),
        css,
    }
}

fn table_entry(table: Node, rules: &PropertyRules) -> DocumentStyleEntry {
    let mut css = CssMap::new();
    let tbl_pr = wml(table, "tblPr");
    if let Some(tbl_pr) = tbl_pr {
        rules.table(tbl_pr, &mut css);
    }
    DocumentStyleEntry {
        element_type: ElementType::Table,
        style_id: tbl_pr.and_then(|pr| wml_attr(pr, "tblStyle")).map(str::to_string),
        css,
    }
}
