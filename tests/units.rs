use docxide_html::docx::units::{
    INDENT_RANGE, LETTER_SPACING_RANGE, PARAGRAPH_SPACING_RANGE, alignment, border_style,
    css_string, format_number, half_points_to_points, highlight_color, line_spacing, named_or_hex_color, parse_number, pt,
    theme_color, twips_in_range, twips_to_points,
};

#[test]
fn twips_convert_to_points_with_two_decimals() {
    assert_eq!(twips_to_points(240.0), 12.0);
    assert_eq!(twips_to_points(200.0), 10.0);
    assert_eq!(pt(twips_to_points(210.0)).as_deref(), Some("10.5pt"));
}

#[test]
fn half_points_outside_range_are_rejected() {
    assert_eq!(half_points_to_points(28.0), Some(14.0));
    assert_eq!(half_points_to_points(144.0), Some(72.0));
    assert_eq!(half_points_to_points(146.0), None);
    assert_eq!(half_points_to_points(0.0), None);
    assert_eq!(half_points_to_points(-4.0), None);
}

#[test]
fn numbers_must_be_finite() {
    assert_eq!(parse_number(" 12 "), Some(12.0));
    assert_eq!(parse_number("abc"), None);
    assert_eq!(parse_number("NaN"), None);
    assert_eq!(parse_number("inf"), None);
}

#[test]
fn formatting_drops_trailing_zeros_and_negative_zero() {
    assert_eq!(format_number(14.0).as_deref(), Some("14"));
    assert_eq!(format_number(10.25).as_deref(), Some("10.25"));
    assert_eq!(format_number(-0.001).as_deref(), Some("0"));
    assert_eq!(pt(-10.0).as_deref(), Some("-10pt"));
}

#[test]
fn overflowing_lengths_are_not_formatted() {
    assert_eq!(format_number(1e308), None);
    assert_eq!(format_number(f64::NAN), None);
    assert_eq!(pt(f64::MAX), None);
    assert_eq!(pt(f64::NEG_INFINITY), None);
    assert_eq!(twips_in_range("1e308", &LETTER_SPACING_RANGE), None);
    assert_eq!(twips_in_range("-40", &LETTER_SPACING_RANGE), Some(-2.0));
    assert_eq!(line_spacing(1e308, Some("exact")), None);
    assert_eq!(line_spacing(1e308, Some("auto")), None);
}

#[test]
fn line_spacing_is_exact_or_a_factor() {
    assert_eq!(line_spacing(240.0, Some("auto")).as_deref(), Some("1.00"));
    assert_eq!(line_spacing(360.0, None).as_deref(), Some("1.50"));
    assert_eq!(line_spacing(240.0, Some("exact")).as_deref(), Some("12pt"));
    assert_eq!(line_spacing(276.0, Some("atLeast")).as_deref(), Some("1.15"));
}

#[test]
fn font_names_become_escaped_css_strings() {
    assert_eq!(css_string("Calibri"), "\"Calibri\"");
    assert_eq!(css_string("Foo\\"), r#""Foo\\""#);
    assert_eq!(css_string(r#"a"b"#), r#""a\"b""#);
    assert_eq!(css_string("</style>"), r#""\3c /style>""#);
    assert_eq!(css_string("a\nb"), r#""a\a b""#);
}

#[test]
fn alignment_values() {
    assert_eq!(alignment("center"), "center");
    assert_eq!(alignment("both"), "justify");
    assert_eq!(alignment("distribute"), "justify");
    assert_eq!(alignment("end"), "right");
    assert_eq!(alignment("start"), "left");
    assert_eq!(alignment("bogus"), "left");
}

#[test]
fn border_styles_fall_back_to_solid() {
    assert_eq!(border_style("double"), "double");
    assert_eq!(border_style("dashSmallGap"), "dashed");
    assert_eq!(border_style("single"), "solid");
    assert_eq!(border_style("thinThickSmallGap"), "solid");
}

#[test]
fn theme_colors_resolve_to_hex() {
    assert_eq!(theme_color("accent1"), "#4472C4");
    assert_eq!(theme_color("text1"), "#000000");
    assert_eq!(theme_color("background1"), "#FFFFFF");
    assert_eq!(theme_color("unknownRole"), "#000000");
}

#[test]
fn highlight_names() {
    assert_eq!(highlight_color("yellow"), Some("#FFFF00"));
    assert_eq!(highlight_color("darkBlue"), Some("#000080"));
    assert_eq!(highlight_color("none"), None);
    assert_eq!(highlight_color("sparkly"), Some("#FFFF00"));
}

#[test]
fn hex_colors_are_normalized() {
    assert_eq!(named_or_hex_color("ff0000").as_deref(), Some("#FF0000"));
    assert_eq!(named_or_hex_color("#1f3763").as_deref(), Some("#1F3763"));
    assert_eq!(named_or_hex_color("auto"), None);
    assert_eq!(named_or_hex_color("AUTO"), None);
    assert_eq!(named_or_hex_color("fff"), None);
    assert_eq!(named_or_hex_color("red"), None);
}

#[test]
fn twips_range_checks() {
    assert_eq!(twips_in_range("240", &PARAGRAPH_SPACING_RANGE), Some(12.0));
    assert_eq!(twips_in_range("3000", &PARAGRAPH_SPACING_RANGE), None);
    assert_eq!(twips_in_range("-20", &PARAGRAPH_SPACING_RANGE), None);
    assert_eq!(twips_in_range("14400", &INDENT_RANGE), Some(720.0));
    assert_eq!(twips_in_range("14420", &INDENT_RANGE), None);
    assert_eq!(twips_in_range("wide", &INDENT_RANGE), None);
}
