pub mod css;
pub mod docx;
mod error;
pub mod fs;
pub mod html;
pub mod model;
mod registry;

pub use css::{BASE_RULES, FALLBACK_CSS, generate_css, style_map};
pub use docx::StyleExtraction;
pub use error::{Error, Result};
pub use fs::SafeFs;
pub use html::{InjectOptions, inject_styles, inject_styles_with};
pub use model::{
    CssMap, DocumentStyleEntry, ElementType, StyleDefinition, StyleMapping, StyleType,
    ThemeFonts,
};
pub use registry::StyleRegistry;

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Reads a DOCX file and extracts its styles and generated CSS.
pub fn extract_styles(input: &Path) -> Result<StyleExtraction> {
    let t0 = Instant::now();

    let file = std::fs::File::open(input).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, input.display())),
        ),
        _ => Error::Io(e),
    })?;
    let extraction = docx::extract(std::io::BufReader::new(file))?;

    log::info!(
        "Timing: extract={:.1}ms ({} styles, {} document entries, css {} bytes)",
        t0.elapsed().as_secs_f64() * 1000.0,
        extraction.styles.len(),
        extraction.document_styles.len(),
        extraction.css.len(),
    );
    Ok(extraction)
}

pub fn extract_styles_from_bytes(input: &[u8]) -> Result<StyleExtraction> {
    docx::extract(Cursor::new(input))
}

/// Extracts the styles of `input` and injects them into `base_html`.
///
/// The document's font table counts as evidence of Word styling during
/// validation, alongside the built-in font list.
pub fn convert_docx_to_styled_html(input: &Path, base_html: &str) -> Result<String> {
    let t0 = Instant::now();

    let extraction = extract_styles(input)?;
    let t_extract = t0.elapsed();

    let html = styled_html(&extraction, base_html);
    let t_total = t0.elapsed();

    log::info!(
        "Timing: extract={:.1}ms, inject={:.1}ms, total={:.1}ms (output {} bytes)",
        t_extract.as_secs_f64() * 1000.0,
        (t_total - t_extract).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        html.len(),
    );

    Ok(html)
}

/// [`convert_docx_to_styled_html`] with every path confined to `fs`.
/// Returns the path written.
pub fn write_styled_html(
    fs: &SafeFs,
    input: &Path,
    base_html: &Path,
    output: &Path,
) -> Result<PathBuf> {
    let docx = fs.read(input)?;
    let base_html = fs.read_to_string(base_html)?;
    let extraction = extract_styles_from_bytes(&docx)?;
    fs.write(output, styled_html(&extraction, &base_html))
}

fn styled_html(extraction: &StyleExtraction, base_html: &str) -> String {
    let options = InjectOptions {
        font_markers: extraction.fonts.clone(),
        ..InjectOptions::default()
    };
    inject_styles_with(base_html, &extraction.css, &options)
}
