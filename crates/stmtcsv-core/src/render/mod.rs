pub mod pdftoppm;

use crate::error::ExtractError;

/// A single page of a PDF rendered to a raster image.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub page_number: usize,
    pub png: Vec<u8>,
}

/// Trait for PDF page rendering backends.
pub trait PageRenderer: Send + Sync {
    /// Render every page of the PDF to an image, in page order.
    fn render_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageImage>, ExtractError>;

    /// Name of this rendering backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
