use roxmltree::Node;

use crate::model::{CssMap, ThemeFonts};

use super::units::{
    BORDER_WIDTH_RANGE, FIRST_LINE_RANGE, HANGING_RANGE, INDENT_RANGE, LETTER_SPACING_RANGE,
    PAGE_LENGTH_RANGE, PARAGRAPH_SPACING_RANGE, PERCENT_RANGE, alignment, border_style,
    css_string, format_number, half_points_to_points, highlight_color, line_spacing,
    named_or_hex_color, parse_number, pt, theme_color, twips_in_range,
};
use super::{w_attr, wml, wml_attr, wml_bool};

const BORDER_SIDES: [&str; 4] = ["top", "left", "bottom", "right"];

fn set(css: &mut CssMap, property: &str, value: impl Into<String>) {
    css.insert(property.to_string(), value.into());
}

/// Translates OOXML property blocks (`w:pPr`, `w:rPr`, `w:tblPr`) into CSS
/// declarations. Shared by the style-definition parser and the body walker,
/// so named styles and direct formatting produce identical CSS.
pub struct PropertyRules<'t> {
    theme: &'t ThemeFonts,
}

impl<'t> PropertyRules<'t> {
    pub fn new(theme: &'t ThemeFonts) -> Self {
        Self { theme }
    }

    pub fn paragraph(&self, ppr: Node, css: &mut CssMap) {
        if let Some(jc) = wml_attr(ppr, "jc") {
            set(css, "text-align", alignment(jc));
        }

        if let Some(spacing) = wml(ppr, "spacing") {
            let in_range = |attr: &str| {
                w_attr(spacing, attr).and_then(|v| twips_in_range(v, &PARAGRAPH_SPACING_RANGE))
            };
            if let Some(before) = in_range("before").and_then(pt) {
                set(css, "margin-top", before);
            }
            if let Some(after) = in_range("after").and_then(pt) {
                set(css, "margin-bottom", after);
            }
            let line = w_attr(spacing, "line")
                .and_then(parse_number)
                .filter(|line| *line > 0.0)
                .and_then(|line| line_spacing(line, w_attr(spacing, "lineRule")))
                .filter(|value| {
                    parse_number(value.trim_end_matches("pt")).is_some_and(|v| v != 0.0)
                });
            if let Some(line) = line {
                set(css, "line-height", line);
            }
        }

        if let Some(ind) = wml(ppr, "ind") {
            let indent = |primary: &str, alias: &str| {
                w_attr(ind, primary)
                    .or_else(|| w_attr(ind, alias))
                    .and_then(|v| twips_in_range(v, &INDENT_RANGE))
            };
            if let Some(left) = indent("left", "start").and_then(pt) {
                set(css, "margin-left", left);
            }
            if let Some(right) = indent("right", "end").and_then(pt) {
                set(css, "margin-right", right);
            }
            if let Some(first) = w_attr(ind, "firstLine")
                .and_then(|v| twips_in_range(v, &FIRST_LINE_RANGE))
                .and_then(pt)
            {
                set(css, "text-indent", first);
            }
            // Stored as a positive distance, rendered as a negative indent.
            if let Some(hanging) = w_attr(ind, "hanging")
                .and_then(|v| twips_in_range(v, &HANGING_RANGE))
                .and_then(|hanging| pt(-hanging))
            {
                set(css, "text-indent", hanging);
            }
        }

        if let Some(pbdr) = wml(ppr, "pBdr") {
            apply_borders(pbdr, css);
        }

        if let Some(fill) = wml(ppr, "shd")
            .and_then(|shd| w_attr(shd, "fill"))
            .and_then(named_or_hex_color)
        {
            set(css, "background-color", fill);
        }
    }

    pub fn run(&self, rpr: Node, css: &mut CssMap) {
        if let Some(font) = wml(rpr, "rFonts").and_then(|rfonts| self.font_family(rfonts)) {
            set(css, "font-family", format!("{}, sans-serif", css_string(&font)));
        }

        // szCs is read after sz, so a valid complex-script size wins.
        for size_attr in ["sz", "szCs"] {
            if let Some(size) = wml_attr(rpr, size_attr)
                .and_then(parse_number)
                .and_then(half_points_to_points)
                .and_then(pt)
            {
                set(css, "font-size", size);
            }
        }

        if let Some(color) = wml(rpr, "color") {
            if let Some(theme) = w_attr(color, "themeColor") {
                set(css, "color", theme_color(theme));
            } else if let Some(hex) = w_attr(color, "val").and_then(named_or_hex_color) {
                set(css, "color", hex);
            }
        }

        if let Some(highlight) = wml_attr(rpr, "highlight").and_then(highlight_color) {
            set(css, "background-color", highlight);
        }

        if let Some(shd) = wml(rpr, "shd") {
            // Pure black run shading is dropped.
            if let Some(fill) = w_attr(shd, "fill")
                .and_then(named_or_hex_color)
                .filter(|fill| fill != "#000000")
            {
                set(css, "background-color", fill);
            }
            if !css.contains_key("color")
                && let Some(color) = w_attr(shd, "color").and_then(named_or_hex_color)
            {
                set(css, "color", color);
            }
        }

        match wml_bool(rpr, "b") {
            Some(true) => set(css, "font-weight", "bold"),
            Some(false) => set(css, "font-weight", "normal"),
            None => {}
        }
        match wml_bool(rpr, "i") {
            Some(true) => set(css, "font-style", "italic"),
            Some(false) => set(css, "font-style", "normal"),
            None => {}
        }

        if let Some(u) = wml(rpr, "u") {
            let decoration = match w_attr(u, "val") {
                Some("none") => "none",
                _ => "underline",
            };
            set(css, "text-decoration", decoration);
        }
        if wml_bool(rpr, "strike") == Some(true) || wml_bool(rpr, "dstrike") == Some(true) {
            set(css, "text-decoration", "line-through");
        }

        match wml_attr(rpr, "vertAlign") {
            Some("superscript") => {
                set(css, "vertical-align", "super");
                set(css, "font-size", "0.8em");
            }
            Some("subscript") => {
                set(css, "vertical-align", "sub");
                set(css, "font-size", "0.8em");
            }
            _ => {}
        }

        if let Some(spacing) = wml_attr(rpr, "spacing")
            .and_then(|v| twips_in_range(v, &LETTER_SPACING_RANGE))
            .and_then(pt)
        {
            set(css, "letter-spacing", spacing);
        }

        if wml_bool(rpr, "caps") == Some(true) {
            set(css, "text-transform", "uppercase");
        }
        if wml_bool(rpr, "smallCaps") == Some(true) {
            set(css, "font-variant", "small-caps");
        }
        if wml_bool(rpr, "vanish") == Some(true) {
            set(css, "display", "none");
        }
    }

    pub fn table(&self, tbl_pr: Node, css: &mut CssMap) {
        if let Some(width) = wml(tbl_pr, "tblW").and_then(table_width) {
            set(css, "width", width);
        }

        if let Some(borders) = wml(tbl_pr, "tblBorders") {
            apply_borders(borders, css);
        }

        if let Some(jc) = wml_attr(tbl_pr, "jc") {
            let margin = if jc == "center" { "auto" } else { "0" };
            set(css, "margin-left", margin);
            set(css, "margin-right", margin);
        }

        if let Some(spacing) = wml(tbl_pr, "tblCellSpacing")
            .and_then(|n| w_attr(n, "w"))
            .and_then(|v| twips_in_range(v, &PAGE_LENGTH_RANGE))
            .and_then(pt)
        {
            set(css, "border-spacing", spacing);
        }
    }

    /// First non-empty explicit font in ascii, eastAsia, hAnsi, cs order,
    /// then the theme font the `*Theme` attributes point at.
    fn font_family(&self, rfonts: Node) -> Option<String> {
        let explicit = ["ascii", "eastAsia", "hAnsi", "cs"]
            .into_iter()
            .filter_map(|attr| w_attr(rfonts, attr))
            .map(str::trim)
            .find(|font| !font.is_empty());
        if let Some(font) = explicit {
            return Some(font.to_string());
        }
        ["asciiTheme", "eastAsiaTheme", "hAnsiTheme", "cstheme"]
            .into_iter()
            .filter_map(|attr| w_attr(rfonts, attr))
            .find_map(|theme_font| {
                if theme_font.starts_with("major") {
                    self.theme.major.clone()
                } else if theme_font.starts_with("minor") {
                    self.theme.minor.clone()
                } else {
                    None
                }
            })
    }
}

fn table_width(tbl_w: Node) -> Option<String> {
    let raw = w_attr(tbl_w, "w")?;
    match w_attr(tbl_w, "type") {
        Some("pct") => {
            let percent = match raw.strip_suffix('%') {
                Some(direct) => parse_number(direct)?,
                // Fiftieths of a percent.
                None => parse_number(raw)? / 50.0,
            };
            if percent <= 0.0 || !PERCENT_RANGE.contains(&percent) {
                return None;
            }
            format_number(percent).map(|n| format!("{n}%"))
        }
        Some("dxa") | None => {
            let points = twips_in_range(raw, &PAGE_LENGTH_RANGE)?;
            if points <= 0.0 {
                return None;
            }
            pt(points)
        }
        _ => None,
    }
}

/// `w:pBdr` / `w:tblBorders` sides to `border-{side}`. `start`/`end`
/// stand in for missing `left`/`right`.
fn apply_borders(container: Node, css: &mut CssMap) {
    for side in BORDER_SIDES {
        let alias = match side {
            "left" => Some("start"),
            "right" => Some("end"),
            _ => None,
        };
        let node = wml(container, side).or_else(|| alias.and_then(|a| wml(container, a)));
        if let Some(value) = node.and_then(border_value) {
            set(css, &format!("border-{side}"), value);
        }
    }
}

/// `None` when `w:sz` is present but not a width in `(0, 12]` points.
fn border_value(node: Node) -> Option<String> {
    let val = w_attr(node, "val").unwrap_or("single");
    if val == "none" || val == "nil" {
        return Some("none".to_string());
    }
    // Eighths of a point; an absent size is a hairline of 1pt.
    let width = match w_attr(node, "sz") {
        None => 1.0,
        Some(sz) => parse_number(sz)
            .map(|sz| sz / 8.0)
            .filter(|w| *w > 0.0 && BORDER_WIDTH_RANGE.contains(w))?,
    };
    let color = w_attr(node, "color")
        .and_then(named_or_hex_color)
        .unwrap_or_else(|| "#000000".to_string());
    Some(format!("{} {} {}", pt(width)?, border_style(val), color))
}
