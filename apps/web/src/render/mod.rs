// PDF rendering: line layout → lopdf document with an embedded TrueType font.
// Layout and serialization are CPU-bound and run inside tokio::task::spawn_blocking.

pub mod font;
pub mod layout;
pub mod pdf;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use font::EmbeddedFont;
use layout::{layout_pages, US_LETTER};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("font not readable at {}: {source}", .path.display())]
    FontMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("font could not be parsed: {0}")]
    FontParse(#[from] ttf_parser::FaceParsingError),

    #[error("PDF serialization failed: {0}")]
    Pdf(String),

    #[error("render task failed: {0}")]
    Task(String),
}

/// Renders cleaned résumé text to a US Letter PDF using the font at `font_path`.
pub async fn render_resume_pdf(text: String, font_path: &Path) -> Result<Vec<u8>, RenderError> {
    let font = EmbeddedFont::load(font_path).await?;

    tokio::task::spawn_blocking(move || -> Result<Vec<u8>, RenderError> {
        let pages = layout_pages(&text, &US_LETTER);
        let bytes = pdf::write_pdf(&pages, &US_LETTER, &font)?;
        info!(
            "Rendered resume PDF: pages={}, bytes={}, font={}",
            pages.len(),
            bytes.len(),
            font.base_name()
        );
        Ok(bytes)
    })
    .await
    .map_err(|e| RenderError::Task(format!("spawn_blocking failed in PDF render: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_font_fails_render() {
        let dir = tempfile::tempdir().unwrap();
        let result = render_resume_pdf("Name: Ada".to_string(), &dir.path().join("none.ttf")).await;
        assert!(matches!(result, Err(RenderError::FontMissing { .. })));
    }
}
