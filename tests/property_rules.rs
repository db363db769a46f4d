mod common;

use common::{css_get, paragraph_css, run_css, table_css};

#[test]
fn hanging_indent_becomes_negative_text_indent() {
    let css = paragraph_css(r#"<w:ind w:left="720" w:hanging="200"/>"#);
    assert_eq!(css_get(&css, "text-indent"), Some("-10pt"));
    assert_eq!(css_get(&css, "margin-left"), Some("36pt"));
}

#[test]
fn hanging_wins_over_first_line() {
    let css = paragraph_css(r#"<w:ind w:firstLine="400" w:hanging="200"/>"#);
    assert_eq!(css_get(&css, "text-indent"), Some("-10pt"));
    let css = paragraph_css(r#"<w:ind w:firstLine="400"/>"#);
    assert_eq!(css_get(&css, "text-indent"), Some("20pt"));
}

#[test]
fn start_and_end_indents_stand_in_for_left_and_right() {
    let css = paragraph_css(r#"<w:ind w:start="240" w:end="480"/>"#);
    assert_eq!(css_get(&css, "margin-left"), Some("12pt"));
    assert_eq!(css_get(&css, "margin-right"), Some("24pt"));
}

#[test]
fn indents_outside_their_ranges_are_dropped() {
    let css = paragraph_css(r#"<w:ind w:left="20000" w:firstLine="8000" w:hanging="-20"/>"#);
    assert!(css.is_empty(), "{css:?}");
}

#[test]
fn line_spacing_rules() {
    let css = paragraph_css(r#"<w:spacing w:line="360" w:lineRule="auto"/>"#);
    assert_eq!(css_get(&css, "line-height"), Some("1.50"));
    let css = paragraph_css(r#"<w:spacing w:line="300" w:lineRule="exact"/>"#);
    assert_eq!(css_get(&css, "line-height"), Some("15pt"));
    let css = paragraph_css(r#"<w:spacing w:line="0"/>"#);
    assert!(!css.contains_key("line-height"));
}

#[test]
fn paragraph_borders_and_shading() {
    let css = paragraph_css(
        r#"<w:pBdr>
            <w:top w:val="single" w:sz="8" w:color="FF0000"/>
            <w:bottom w:val="nil"/>
            <w:start w:val="double" w:sz="4"/>
        </w:pBdr>
        <w:shd w:val="clear" w:fill="D9E2F3"/>"#,
    );
    assert_eq!(css_get(&css, "border-top"), Some("1pt solid #FF0000"));
    assert_eq!(css_get(&css, "border-bottom"), Some("none"));
    assert_eq!(css_get(&css, "border-left"), Some("0.5pt double #000000"));
    assert!(!css.contains_key("border-right"));
    assert_eq!(css_get(&css, "background-color"), Some("#D9E2F3"));
}

#[test]
fn highlight_without_color_sets_only_background() {
    let css = run_css(r#"<w:highlight w:val="yellow"/>"#);
    assert_eq!(css_get(&css, "background-color"), Some("#FFFF00"));
    assert!(!css.contains_key("color"));
}

#[test]
fn highlight_none_emits_nothing() {
    let css = run_css(r#"<w:highlight w:val="none"/>"#);
    assert!(css.is_empty());
}

#[test]
fn complex_script_size_overrides_when_valid() {
    let css = run_css(r#"<w:sz w:val="24"/><w:szCs w:val="32"/>"#);
    assert_eq!(css_get(&css, "font-size"), Some("16pt"));
    let css = run_css(r#"<w:sz w:val="24"/><w:szCs w:val="400"/>"#);
    assert_eq!(css_get(&css, "font-size"), Some("12pt"));
}

#[test]
fn superscript_forces_relative_size() {
    let css = run_css(r#"<w:sz w:val="24"/><w:vertAlign w:val="superscript"/>"#);
    assert_eq!(css_get(&css, "vertical-align"), Some("super"));
    assert_eq!(css_get(&css, "font-size"), Some("0.8em"));
}

#[test]
fn toggles_and_their_explicit_off_values() {
    let css = run_css(r#"<w:b/><w:i w:val="0"/><w:caps/><w:smallCaps w:val="false"/>"#);
    assert_eq!(css_get(&css, "font-weight"), Some("bold"));
    assert_eq!(css_get(&css, "font-style"), Some("normal"));
    assert_eq!(css_get(&css, "text-transform"), Some("uppercase"));
    assert!(!css.contains_key("font-variant"));
}

#[test]
fn strike_overrides_underline() {
    let css = run_css(r#"<w:u w:val="single"/><w:strike/>"#);
    assert_eq!(css_get(&css, "text-decoration"), Some("line-through"));
    let css = run_css(r#"<w:u w:val="double"/>"#);
    assert_eq!(css_get(&css, "text-decoration"), Some("underline"));
    let css = run_css(r#"<w:u w:val="none"/>"#);
    assert_eq!(css_get(&css, "text-decoration"), Some("none"));
}

#[test]
fn run_shading_ignores_pure_black_fill() {
    let css = run_css(r#"<w:shd w:val="clear" w:color="auto" w:fill="000000"/>"#);
    assert!(css.is_empty(), "{css:?}");
    let css = run_css(r#"<w:shd w:val="clear" w:color="FFFFFF" w:fill="1F3763"/>"#);
    assert_eq!(css_get(&css, "background-color"), Some("#1F3763"));
    assert_eq!(css_get(&css, "color"), Some("#FFFFFF"));
}

#[test]
fn explicit_color_is_not_replaced_by_shading_color() {
    let css = run_css(r#"<w:color w:val="FF0000"/><w:shd w:color="00FF00" w:fill="auto"/>"#);
    assert_eq!(css_get(&css, "color"), Some("#FF0000"));
    assert!(!css.contains_key("background-color"));
}

#[test]
fn font_attributes_are_tried_in_order() {
    let css = run_css(r#"<w:rFonts w:ascii="" w:eastAsia="SimSun" w:hAnsi="Arial"/>"#);
    assert_eq!(css_get(&css, "font-family"), Some("\"SimSun\", sans-serif"));
}

#[test]
fn letter_spacing_in_points() {
    let css = run_css(r#"<w:spacing w:val="40"/>"#);
    assert_eq!(css_get(&css, "letter-spacing"), Some("2pt"));
}

#[test]
fn table_width_alignment_and_borders() {
    let css = table_css(
        r#"<w:tblW w:w="5000" w:type="pct"/>
        <w:jc w:val="center"/>
        <w:tblBorders>
            <w:top w:val="single" w:sz="4" w:color="auto"/>
            <w:end w:val="dashed" w:sz="16" w:color="4472C4"/>
        </w:tblBorders>"#,
    );
    assert_eq!(css_get(&css, "width"), Some("100%"));
    assert_eq!(css_get(&css, "margin-left"), Some("auto"));
    assert_eq!(css_get(&css, "margin-right"), Some("auto"));
    assert_eq!(css_get(&css, "border-top"), Some("0.5pt solid #000000"));
    assert_eq!(css_get(&css, "border-right"), Some("2pt dashed #4472C4"));
}

#[test]
fn table_widths_in_twips_and_literal_percent() {
    let css = table_css(r#"<w:tblW w:w="4320" w:type="dxa"/>"#);
    assert_eq!(css_get(&css, "width"), Some("216pt"));
    let css = table_css(r#"<w:tblW w:w="50%" w:type="pct"/>"#);
    assert_eq!(css_get(&css, "width"), Some("50%"));
    let css = table_css(r#"<w:tblW w:w="0" w:type="auto"/>"#);
    assert!(!css.contains_key("width"));
}

#[test]
fn font_names_cannot_close_the_style_element() {
    let css = run_css(
        r#"<w:rFonts w:ascii="x&lt;/style&gt;&lt;script&gt;alert(1)&lt;/script&gt;"/>"#,
    );
    let family = css_get(&css, "font-family").unwrap();
    assert!(!family.contains("</"), "{family}");
    assert_eq!(
        family,
        r#""x\3c /style>\3c script>alert(1)\3c /script>", sans-serif"#
    );
}

#[test]
fn font_names_with_quotes_and_backslashes_stay_one_string() {
    let css = run_css(r#"<w:rFonts w:ascii="Foo\"/>"#);
    assert_eq!(css_get(&css, "font-family"), Some(r#""Foo\\", sans-serif"#));
    let css = run_css(r#"<w:rFonts w:ascii="a&quot;b"/>"#);
    assert_eq!(css_get(&css, "font-family"), Some(r#""a\"b", sans-serif"#));
}

#[test]
fn overflowing_letter_spacing_is_dropped() {
    let css = run_css(r#"<w:spacing w:val="1e308"/>"#);
    assert!(!css.contains_key("letter-spacing"), "{css:?}");
    let css = run_css(r#"<w:spacing w:val="-40"/>"#);
    assert_eq!(css_get(&css, "letter-spacing"), Some("-2pt"));
}

#[test]
fn overflowing_table_widths_are_dropped() {
    for tbl_w in [
        r#"<w:tblW w:w="1e308" w:type="pct"/>"#,
        r#"<w:tblW w:w="1e308" w:type="dxa"/>"#,
        r#"<w:tblW w:w="1e308"/>"#,
        r#"<w:tblW w:w="250%" w:type="pct"/>"#,
    ] {
        let css = table_css(tbl_w);
        assert!(!css.contains_key("width"), "{tbl_w}: {css:?}");
    }
}

#[test]
fn overflowing_border_sizes_drop_that_side() {
    let css = table_css(
        r#"<w:tblBorders>
            <w:top w:val="single" w:sz="1e308"/>
            <w:left w:val="single" w:sz="200"/>
            <w:bottom w:val="single" w:sz="8"/>
            <w:right w:val="single"/>
        </w:tblBorders>"#,
    );
    assert!(!css.contains_key("border-top"), "{css:?}");
    assert!(!css.contains_key("border-left"), "{css:?}");
    assert_eq!(css_get(&css, "border-bottom"), Some("1pt solid #000000"));
    assert_eq!(css_get(&css, "border-right"), Some("1pt solid #000000"));
}

#[test]
fn cell_spacing_in_points_unless_it_overflows() {
    let css = table_css(r#"<w:tblCellSpacing w:w="40" w:type="dxa"/>"#);
    assert_eq!(css_get(&css, "border-spacing"), Some("2pt"));
    let css = table_css(r#"<w:tblCellSpacing w:w="1e308" w:type="dxa"/>"#);
    assert!(!css.contains_key("border-spacing"), "{css:?}");
}

#[test]
fn overflowing_line_heights_are_dropped() {
    for rule in ["auto", "exact"] {
        let css = paragraph_css(&format!(
            r#"<w:spacing w:line="1e308" w:lineRule="{rule}"/>"#
        ));
        assert!(!css.contains_key("line-height"), "{rule}: {css:?}");
    }
}
