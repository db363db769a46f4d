//! Word measurement units and color names to CSS.
//!
//! Every function here is total: malformed input yields `None` (or a
//! documented default) and the caller omits the property.

use std::ops::RangeInclusive;

/// Paragraph spacing (`w:spacing@before/after`) accepted range, in points.
pub const PARAGRAPH_SPACING_RANGE: RangeInclusive<f64> = 0.0..=144.0;
/// Left/right indentation accepted range, in points.
pub const INDENT_RANGE: RangeInclusive<f64> = 0.0..=720.0;
/// First-line indentation accepted range, in points.
pub const FIRST_LINE_RANGE: RangeInclusive<f64> = -360.0..=360.0;
/// Hanging indentation accepted range, in points (before negation).
pub const HANGING_RANGE: RangeInclusive<f64> = 0.0..=360.0;
/// Character spacing (`w:spacing@val` in `w:rPr`) accepted range, in points.
pub const LETTER_SPACING_RANGE: RangeInclusive<f64> = -1584.0..=1584.0;
/// Absolute table widths, cell spacing and line heights, in points. 1584pt is Word's
/// largest page dimension.
pub const PAGE_LENGTH_RANGE: RangeInclusive<f64> = 0.0..=1584.0;
/// Border widths, in points (`w:sz` is eighths of a point, at most 96).
pub const BORDER_WIDTH_RANGE: RangeInclusive<f64> = 0.0..=12.0;
/// Percentage table widths.
pub const PERCENT_RANGE: RangeInclusive<f64> = 0.0..=100.0;
/// Largest font size accepted from a half-point value.
pub const MAX_FONT_SIZE_PT: f64 = 72.0;

pub const DEFAULT_HIGHLIGHT: &str = "#FFFF00";

/// Twentieths of a point to points, rounded to two decimals.
pub fn twips_to_points(twips: f64) -> f64 {
    ((twips / 20.0) * 100.0).round() / 100.0
}

/// Half-points (`w:sz`, `w:szCs`) to points. Sizes outside `(0, 72]` are
/// rejected rather than clamped.
pub fn half_points_to_points(half_points: f64) -> Option<f64> {
    let pt = half_points / 2.0;
    (pt > 0.0 && pt <= MAX_FONT_SIZE_PT).then_some(pt)
}

/// Parse a numeric OOXML attribute, rejecting NaN and infinities.
pub fn parse_number(val: &str) -> Option<f64> {
    val.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a point length, e.g. `14pt`, `10.5pt`, `-10pt`.
pub fn pt(value: f64) -> Option<String> {
    format_number(value).map(|n| format!("{n}pt"))
}

/// Shortest decimal rendering, never `-0`. `None` when the value (or its
/// rounding) is not finite.
pub fn format_number(value: f64) -> Option<String> {
    let rounded = (value * 100.0).round() / 100.0;
    if !rounded.is_finite() {
        return None;
    }
    if rounded == 0.0 {
        return Some("0".to_string());
    }
    Some(format!("{rounded}"))
}

/// `w:spacing@line` + `@lineRule` to a CSS `line-height`.
///
/// `exact` becomes a point length. Every other rule is read as 240ths of a
/// single line and becomes a unitless factor. `None` for lines taller than a
/// page.
pub fn line_spacing(line: f64, line_rule: Option<&str>) -> Option<String> {
    let points = twips_to_points(line);
    if !PAGE_LENGTH_RANGE.contains(&points.abs()) {
        return None;
    }
    match line_rule {
        Some("exact") => pt(points),
        _ => Some(format!("{:.2}", line / 240.0)),
    }
}

pub fn alignment(val: &str) -> &'static str {
    match val {
        "center" => "center",
        "right" | "end" => "right",
        "justify" | "both" | "distribute" => "justify",
        _ => "left",
    }
}

pub fn border_style(val: &str) -> &'static str {
    match val {
        "double" => "double",
        "dotted" => "dotted",
        "dashed" | "dashSmallGap" | "dotDash" | "dotDotDash" => "dashed",
        _ => "solid",
    }
}

/// Default Office palette for `w:themeColor` roles.
pub fn theme_color(name: &str) -> &'static str {
    match name {
        "dark1" | "text1" => "#000000",
        "light1" | "background1" => "#FFFFFF",
        "dark2" | "text2" => "#44546A",
        "light2" | "background2" => "#E7E6E6",
        "accent1" => "#4472C4",
        "accent2" => "#ED7D31",
        "accent3" => "#A5A5A5",
        "accent4" => "#FFC000",
        "accent5" => "#5B9BD5",
        "accent6" => "#70AD47",
        "hyperlink" => "#0563C1",
        "followedHyperlink" => "#954F72",
        _ => "#000000",
    }
}

/// `w:highlight@val` to hex. `none` means no highlight at all.
pub fn highlight_color(name: &str) -> Option<&'static str> {
    let hex = match name {
        "none" => return None,
        "yellow" => "#FFFF00",
        "green" => "#00FF00",
        "cyan" => "#00FFFF",
        "magenta" => "#FF00FF",
        "blue" => "#0000FF",
        "red" => "#FF0000",
        "darkBlue" => "#000080",
        "darkCyan" => "#008080",
        "darkGreen" => "#008000",
        "darkMagenta" => "#800080",
        "darkRed" => "#800000",
        "darkYellow" => "#808000",
        "darkGray" => "#808080",
        "lightGray" => "#C0C0C0",
        "black" => "#000000",
        "white" => "#FFFFFF",
        _ => DEFAULT_HIGHLIGHT,
    };
    Some(hex)
}

/// A six-digit hex color as `#RRGGBB`. `auto` and anything that does not
/// leave exactly six hex digits once other characters are stripped is `None`.
pub fn named_or_hex_color(val: &str) -> Option<String> {
    if val.eq_ignore_ascii_case("auto") {
        return None;
    }
    let hex: String = val.chars().filter(|c| c.is_ascii_hexdigit()).collect();
    if hex.len() != 6 {
        return None;
    }
    Some(format!("#{}", hex.to_ascii_uppercase()))
}

/// Twips attribute value to points, kept only when inside `range`.
pub fn twips_in_range(val: &str, range: &RangeInclusive<f64>) -> Option<f64> {
    let points = twips_to_points(parse_number(val)?);
    range.contains(&points).then_some(points)
}

/// A font name as a double-quoted CSS string.
///
/// Backslash and quote are backslash-escaped. Control characters and `<`
/// become hex escapes, so the result can sit inside an HTML `<style>`
/// element without ever forming `</style`.
pub fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' | '"' => {
                out.push('\\');
                out.push(c);
            }
            '<' => out.push_str("\\3c "),
            c if c.is_control() => out.push_str(&format!("\\{:x} ", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
