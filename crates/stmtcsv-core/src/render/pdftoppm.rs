use std::fs;
use std::io::Write;
use std::process::Command;

use crate::error::ExtractError;
use crate::render::{PageImage, PageRenderer};

/// Page rendering backend using pdftoppm (from poppler-utils).
///
/// `pdftoppm -png` writes one numbered image per page into a scratch
/// directory, which is read back in page order.
pub struct PdftoppmRenderer {
    dpi: u32,
}

impl PdftoppmRenderer {
    pub fn new() -> Self {
        PdftoppmRenderer { dpi: 150 }
    }

    pub fn with_dpi(dpi: u32) -> Self {
        PdftoppmRenderer { dpi }
    }

    /// Check if pdftoppm is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftoppm")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftoppmRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer for PdftoppmRenderer {
    fn render_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageImage>, ExtractError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| ExtractError::Render(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| ExtractError::Render(e.to_string()))?;
        let out_dir = tempfile::tempdir().map_err(|e| ExtractError::Render(e.to_string()))?;
        let prefix = out_dir.path().join("page");

        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(tmpfile.path())
            .arg(&prefix)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ExtractError::PdftoppmNotFound
                } else {
                    ExtractError::Render(format!("pdftoppm failed: {e}"))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ExtractError::PdftoppmFailed { code, stderr });
        }

        // Output names are page-1.png, page-2.png, ... with zero padding
        // that depends on the page count, so sort by the parsed page
        // number rather than lexicographically.
        let mut pages = Vec::new();
        for entry in fs::read_dir(out_dir.path())? {
            let path = entry?.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some(number) = stem
                .rsplit('-')
                .next()
                .and_then(|n| n.parse::<usize>().ok())
            else {
                continue;
            };
            pages.push(PageImage {
                page_number: number,
                png: fs::read(&path)?,
            });
        }
        pages.sort_by_key(|p| p.page_number);

        if pages.is_empty() {
            return Err(ExtractError::Render(
                "pdftoppm produced no page images".into(),
            ));
        }

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftoppm"
    }
}
