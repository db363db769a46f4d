//! Stylesheet generation from a [`StyleRegistry`].

use crate::model::{StyleDefinition, StyleType};
use crate::registry::StyleRegistry;

/// Document-wide defaults. Always emitted first so named-style rules override
/// them through source order alone.
pub const BASE_RULES: &str = r#"body {
  font-family: "Calibri", "Microsoft YaHei", "SimSun", sans-serif;
  font-size: 11pt;
  line-height: 1.08;
  color: #000000;
  background-color: #FFFFFF;
}
p {
  margin-top: 0;
  margin-bottom: 8pt;
}
h1, h2, h3, h4, h5, h6 {
  font-family: "Calibri Light", "Microsoft YaHei", sans-serif;
  font-weight: normal;
  margin-top: 12pt;
  margin-bottom: 0;
  color: #2F5496;
}
h1 { font-size: 16pt; }
h2 { font-size: 13pt; }
h3 { font-size: 12pt; color: #1F3763; }
h4 { font-size: 11pt; font-style: italic; }
h5, h6 { font-size: 11pt; }
ul, ol {
  margin-top: 0;
  margin-bottom: 8pt;
}
table {
  border-collapse: collapse;
  margin-bottom: 8pt;
}
td, th {
  padding: 0 5.4pt;
  vertical-align: top;
}
img {
  max-width: 100%;
}
"#;

/// Stylesheet used when injected HTML fails validation. Self-contained: it
/// does not rely on anything the document supplied.
pub const FALLBACK_CSS: &str = r#"html, body {
  margin: 0;
  padding: 0;
}
body {
  font-family: "Calibri", "Microsoft YaHei", "SimSun", "Arial", sans-serif;
  font-size: 11pt;
  line-height: 1.08;
  color: #000000;
  background-color: #FFFFFF;
  padding: 72pt;
}
p {
  margin: 0 0 8pt 0;
}
h1, h2, h3, h4, h5, h6 {
  font-family: "Calibri Light", "Microsoft YaHei", sans-serif;
  font-weight: normal;
  color: #2F5496;
  margin: 12pt 0 0 0;
}
h1 { font-size: 16pt; }
h2 { font-size: 13pt; }
h3 { font-size: 12pt; }
strong, b { font-weight: bold; }
em, i { font-style: italic; }
table {
  border-collapse: collapse;
  width: 100%;
}
td, th {
  border: 0.5pt solid #000000;
  padding: 0 5.4pt;
  vertical-align: top;
}
img {
  max-width: 100%;
}
"#;

/// Base rules followed by one class rule per named style that has CSS.
pub fn generate_css(registry: &StyleRegistry) -> String {
    let mut css = String::from(BASE_RULES);
    let mut rules = 0;
    for rule in registry.styles().filter_map(style_rule) {
        css.push('\n');
        css.push_str(&rule);
        rules += 1;
    }
    log::debug!(
        "Generated {rules} style rules from {} definitions",
        registry.style_count()
    );
    css
}

/// `.{class} { ... }` for one style, or `None` when it has no declarations.
pub fn style_rule(style: &StyleDefinition) -> Option<String> {
    if style.css.is_empty() {
        return None;
    }
    let mut rule = format!(".{} {{\n", style.mapping.class_name);
    for (property, value) in &style.css {
        rule.push_str(&format!("  {property}: {value};\n"));
    }
    rule.push_str("}\n");
    Some(rule)
}

/// HTML element a style's paragraphs or runs become. Character styles whose
/// name reads as bold or italic become `strong` / `em` rather than `span`.
pub fn refined_element(style: &StyleDefinition) -> &str {
    if style.style_type == StyleType::Character {
        let name = style.name.to_lowercase();
        if name.contains("strong") || name.contains("bold") {
            return "strong";
        }
        if name.contains("emphasis") || name.contains("italic") {
            return "em";
        }
    }
    &style.mapping.target_element
}

/// Mammoth-style map lines, e.g. `p[style-name='heading 1'] => h1.heading1:fresh`.
pub fn style_map(registry: &StyleRegistry) -> Vec<String> {
    registry
        .styles()
        .map(|style| {
            format!(
                "{} => {}.{}:fresh",
                style.mapping.selector,
                refined_element(style),
                style.mapping.class_name
            )
        })
        .collect()
}
