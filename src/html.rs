//! Merges stylesheets into HTML and forces `!important` on every declaration.
//!
//! This works on the HTML text with regular expressions rather than a parsed
//! tree. Attribute values that contain the literal text `style="` or unclosed
//! `<style>` elements are not handled.

use std::iter::Peekable;
use std::str::Chars;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::css::FALLBACK_CSS;

static STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>(.*?)</style\s*>")
        .expect("STYLE_BLOCK is a valid static regex pattern")
});
static STYLE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)(<[a-z][^<>]*?\s)style\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("STYLE_ATTR is a valid static regex pattern")
});
static DOCTYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<!doctype\b[^>]*>").expect("DOCTYPE is a valid static regex pattern")
});
static HTML_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<html\b[^>]*>").expect("HTML_OPEN is a valid static regex pattern")
});
static HTML_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</html\s*>").expect("HTML_CLOSE is a valid static regex pattern")
});
static HEAD_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<head\b[^>]*>").expect("HEAD_OPEN is a valid static regex pattern")
});
static HEAD_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</head\s*>").expect("HEAD_CLOSE is a valid static regex pattern")
});
static HEAD_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<head\b[^>]*>.*?</head\s*>")
        .expect("HEAD_ELEMENT is a valid static regex pattern")
});
static BODY_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<body\b[^>]*>").expect("BODY_OPEN is a valid static regex pattern")
});
static BODY_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<body\b[^>]*>(.*)</body\s*>")
        .expect("BODY_CONTENT is a valid static regex pattern")
});
static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title\b[^>]*>.*?</title\s*>")
        .expect("TITLE is a valid static regex pattern")
});

/// Font names that only show up in CSS derived from Word documents.
pub const WORD_FONT_MARKERS: &[&str] = &[
    "Calibri",
    "Cambria",
    "Aptos",
    "Microsoft YaHei",
    "SimSun",
    "SimHei",
    "宋体",
    "微软雅黑",
];

const META_CHARSET: &str = "<meta charset=\"UTF-8\">";

#[derive(Clone, Debug)]
pub struct InjectOptions {
    /// Append `!important` to every declaration in the merged stylesheet and
    /// in inline `style` attributes.
    pub force_important: bool,
    /// Check the result and fall back to [`FALLBACK_CSS`] when it looks unstyled.
    pub validate: bool,
    /// Extra font names accepted as evidence of Word styling, e.g. the
    /// document's font table.
    pub font_markers: Vec<String>,
}

impl Default for InjectOptions {
    fn default() -> Self {
        Self {
            force_important: true,
            validate: true,
            font_markers: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    RawHtml,
    StylesExtracted,
    StylesMerged,
    ImportantForced,
    Validated,
    ForceInjected,
    Final,
}

struct Injection {
    stage: Stage,
}

impl Injection {
    fn advance(&mut self, next: Stage) {
        log::debug!("style injection: {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }
}

/// [`inject_styles_with`] using the default options.
pub fn inject_styles(html: &str, css: &str) -> String {
    inject_styles_with(html, css, &InjectOptions::default())
}

/// Produces one complete HTML document whose single `<head>` `<style>` block
/// holds the CSS of every pre-existing `<style>` block followed by `css`.
///
/// When validation fails the head styling is rebuilt around
/// [`FALLBACK_CSS`], so the result is never unstyled.
pub fn inject_styles_with(html: &str, css: &str, options: &InjectOptions) -> String {
    let mut injection = Injection {
        stage: Stage::RawHtml,
    };

    let (mut doc, existing) = extract_style_blocks(html);
    injection.advance(Stage::StylesExtracted);

    let mut merged = merge_css(existing.iter().map(String::as_str).chain([css]));
    injection.advance(Stage::StylesMerged);

    if options.force_important {
        merged = force_important(&merged);
        doc = force_inline_styles(&doc);
        injection.advance(Stage::ImportantForced);
    }

    let mut doc = insert_style_block(&ensure_skeleton(&doc), &merged);
    if options.validate {
        let validation = validate_with(&doc, &options.font_markers);
        injection.advance(Stage::Validated);
        if !validation.passed() {
            log::warn!("Styled HTML failed validation ({validation:?}), injecting fallback stylesheet");
            doc = force_inject(&doc, &merged, options.force_important);
            injection.advance(Stage::ForceInjected);
        }
    }

    injection.advance(Stage::Final);
    doc
}

/// Removes every `<style>` element, returning the remaining HTML and the
/// trimmed, non-empty block contents in document order.
pub fn extract_style_blocks(html: &str) -> (String, Vec<String>) {
    let blocks = STYLE_BLOCK
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    (STYLE_BLOCK.replace_all(html, "").into_owned(), blocks)
}

fn merge_css<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Appends `!important` to every declaration of a stylesheet that lacks it.
/// Declarations inside `@font-face` and top-level at-rule statements such as
/// `@import` are left alone. Running it twice changes nothing.
pub fn force_important(css: &str) -> String {
    rewrite_declarations(css, false, false)
}

/// [`force_important`] for a bare declaration list, as found in a `style`
/// attribute. Character references such as `&quot;` are kept intact, and an
/// encoded quote opens or closes a CSS string.
pub fn force_declarations(declarations: &str) -> String {
    rewrite_declarations(declarations, true, true)
}

/// Forces `!important` inside every inline `style="..."` attribute.
pub fn force_inline_styles(html: &str) -> String {
    STYLE_ATTR
        .replace_all(html, |caps: &Captures| {
            let (quote, value) = match (caps.get(2), caps.get(3)) {
                (Some(v), _) => ('"', v.as_str()),
                (None, Some(v)) => ('\'', v.as_str()),
                (None, None) => return caps[0].to_string(),
            };
            format!(
                "{}style={quote}{}{quote}",
                &caps[1],
                force_declarations(value)
            )
        })
        .into_owned()
}

/// Single pass over CSS text. Tracks strings, comments, parentheses (for
/// `url(data:...;...)`) and block nesting; every `;`- or `}`-terminated
/// segment inside a forced block is treated as a declaration.
fn rewrite_declarations(css: &str, top_level_forced: bool, entities: bool) -> String {
    let mut out = String::with_capacity(css.len() + css.len() / 4);
    let mut segment = String::new();
    // One entry per open block: whether its declarations are forced.
    let mut blocks: Vec<bool> = Vec::new();
    let mut quote: Option<char> = None;
    let mut parens = 0usize;
    let mut chars = css.chars().peekable();

    let forced = |blocks: &[bool]| blocks.last().copied().unwrap_or(top_level_forced);

    while let Some(c) = chars.next() {
        if entities
            && c == '&'
            && let Some(reference) = take_char_reference(&mut chars)
        {
            segment.push('&');
            segment.push_str(&reference);
            match (quote, encoded_quote(&reference)) {
                (None, Some(q)) => quote = Some(q),
                (Some(open), Some(q)) if open == q => quote = None,
                _ => {}
            }
            continue;
        }
        if let Some(q) = quote {
            segment.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    segment.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => {
                quote = Some(c);
                segment.push(c);
            }
            '/' if chars.peek() == Some(&'*') => {
                segment.push(c);
                if let Some(star) = chars.next() {
                    segment.push(star);
                }
                let mut prev = '\0';
                for inner in chars.by_ref() {
                    segment.push(inner);
                    if prev == '*' && inner == '/' {
                        break;
                    }
                    prev = inner;
                }
            }
            '(' => {
                parens += 1;
                segment.push(c);
            }
            ')' => {
                parens = parens.saturating_sub(1);
                segment.push(c);
            }
            ';' if parens == 0 => {
                push_declaration(&mut out, &segment, forced(&blocks));
                out.push(';');
                segment.clear();
            }
            '{' if parens == 0 => {
                let font_face = strip_comments(&segment)
                    .trim_start()
                    .to_ascii_lowercase()
                    .starts_with("@font-face");
                let inherited = blocks.last().copied().unwrap_or(true);
                blocks.push(inherited && !font_face);
                out.push_str(&segment);
                out.push('{');
                segment.clear();
            }
            '}' if parens == 0 => {
                push_declaration(&mut out, &segment, forced(&blocks));
                out.push('}');
                segment.clear();
                blocks.pop();
            }
            _ => segment.push(c),
        }
    }
    push_declaration(&mut out, &segment, forced(&blocks));
    out
}

/// Consumes the rest of a character reference after `&`, up to and including
/// its `;`. Leaves `chars` untouched when no reference follows.
fn take_char_reference(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut ahead = chars.clone();
    let mut reference = String::new();
    while let Some(c) = ahead.next() {
        match c {
            ';' if !reference.is_empty() => {
                reference.push(';');
                for _ in reference.chars() {
                    chars.next();
                }
                return Some(reference);
            }
            c if (c.is_ascii_alphanumeric() || c == '#') && reference.len() < 32 => {
                reference.push(c);
            }
            _ => return None,
        }
    }
    None
}

fn encoded_quote(reference: &str) -> Option<char> {
    match reference.to_ascii_lowercase().as_str() {
        "quot;" | "#34;" | "#x22;" => Some('"'),
        "apos;" | "#39;" | "#x27;" => Some('\''),
        _ => None,
    }
}

fn push_declaration(out: &mut String, segment: &str, forced: bool) {
    if !forced || !is_declaration(segment) || has_important(segment) {
        out.push_str(segment);
        return;
    }
    let body = segment.trim_end();
    out.push_str(body);
    out.push_str(" !important");
    out.push_str(&segment[body.len()..]);
}

fn is_declaration(segment: &str) -> bool {
    let text = strip_comments(segment);
    let Some((property, value)) = text.split_once(':') else {
        return false;
    };
    let property = property.trim();
    !property.is_empty()
        && !property.starts_with('@')
        && property
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && !value.trim().is_empty()
}

fn has_important(segment: &str) -> bool {
    let text = strip_comments(segment);
    let text = text.trim_end();
    let len = text.len();
    len >= 9
        && text.is_char_boundary(len - 9)
        && text[len - 9..].eq_ignore_ascii_case("important")
        && text[..len - 9].trim_end().ends_with('!')
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Guarantees a DOCTYPE, an `<html>` element and a `<head>`. A bare fragment
/// is wrapped in a minimal HTML5 document with a UTF-8 charset.
pub fn ensure_skeleton(html: &str) -> String {
    let doctype = DOCTYPE
        .find(html)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "<!DOCTYPE html>".to_string());
    let content = DOCTYPE.replace(html, "");
    let content = content.trim();

    let mut doc = if HTML_OPEN.is_match(content) {
        content.to_string()
    } else if HEAD_OPEN.is_match(content) || BODY_OPEN.is_match(content) {
        format!("<html>\n{content}\n</html>")
    } else {
        format!("<html>\n<head>\n{META_CHARSET}\n</head>\n<body>\n{content}\n</body>\n</html>")
    };

    if !HEAD_OPEN.is_match(&doc)
        && let Some(html_open) = HTML_OPEN.find(&doc)
    {
        doc.insert_str(
            html_open.end(),
            &format!("\n<head>\n{META_CHARSET}\n</head>"),
        );
    }

    format!("{doctype}\n{doc}\n")
}

fn insert_style_block(doc: &str, css: &str) -> String {
    if css.trim().is_empty() {
        return doc.to_string();
    }
    let block = format!("<style>\n{}\n</style>\n", style_text(css));
    let at = HEAD_CLOSE
        .find(doc)
        .map(|m| m.start())
        .or_else(|| HEAD_OPEN.find(doc).map(|m| m.end()))
        .unwrap_or(0);
    let mut out = String::with_capacity(doc.len() + block.len());
    out.push_str(&doc[..at]);
    out.push_str(&block);
    out.push_str(&doc[at..]);
    out
}

/// CSS text safe to place inside a `<style>` element: `</` cannot close it.
/// `\/` is an escaped `/` in CSS, so the rules themselves are unchanged.
fn style_text(css: &str) -> String {
    css.replace("</", "<\\/")
}

/// What the validation pass looked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Validation {
    pub has_style: bool,
    pub has_doctype: bool,
    pub has_word_fonts: bool,
}

impl Validation {
    pub fn passed(&self) -> bool {
        self.has_style && self.has_doctype && self.has_word_fonts
    }
}

pub fn validate(html: &str) -> Validation {
    validate_with(html, &[])
}

fn validate_with(html: &str, extra_markers: &[String]) -> Validation {
    let lower = html.to_lowercase();
    let has_word_fonts = WORD_FONT_MARKERS
        .iter()
        .copied()
        .chain(extra_markers.iter().map(String::as_str))
        .filter(|m| !m.trim().is_empty())
        .any(|m| lower.contains(&m.to_lowercase()));
    Validation {
        has_style: STYLE_BLOCK
            .captures_iter(html)
            .any(|c| c.get(1).is_some_and(|m| !m.as_str().trim().is_empty())),
        has_doctype: DOCTYPE.is_match(html),
        has_word_fonts,
    }
}

/// Rebuilds the document around the fallback stylesheet. The merged CSS is
/// kept after it so document rules still win by source order. The body
/// content is carried over verbatim.
fn force_inject(doc: &str, merged_css: &str, force: bool) -> String {
    let body = match BODY_CONTENT.captures(doc).and_then(|c| c.get(1)) {
        Some(m) => m.as_str().trim().to_string(),
        None => {
            let stripped = HEAD_ELEMENT.replace_all(doc, "");
            let stripped = DOCTYPE.replace_all(&stripped, "");
            let stripped = HTML_OPEN.replace_all(&stripped, "");
            let stripped = HTML_CLOSE.replace_all(&stripped, "");
            stripped.trim().to_string()
        }
    };
    let title = TITLE
        .find(doc)
        .map(|m| format!("{}\n", m.as_str()))
        .unwrap_or_default();

    let mut css = merge_css([FALLBACK_CSS, merged_css].into_iter());
    if force {
        css = force_important(&css);
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n{META_CHARSET}\n{title}<style>\n{}\n</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        style_text(&css)
    )
}
