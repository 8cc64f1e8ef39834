pub mod analysis;
pub mod classify;
pub mod error;
pub mod export;
pub mod model;
pub mod render;
pub mod table;

use tracing::{debug, warn};

use analysis::{AnalysisResponse, BlockIndex, DocumentAnalyzer};
use classify::TableOutcome;
use error::ExtractError;
use model::Extraction;
use render::PageRenderer;
use table::extract_table;

/// Extract and classify every table of a single page response.
pub fn extract_page(response: &AnalysisResponse, year: Option<&str>) -> Extraction {
    let index = BlockIndex::build(response);
    let mut out = Extraction::default();

    for table_block in index.tables() {
        out.tables_seen += 1;
        let table = extract_table(table_block, &index);
        match classify::classify_table(&table, year) {
            TableOutcome::Rejected => {
                out.tables_skipped += 1;
                debug!(table_id = %table_block.id, "header does not match statement schema, skipping table");
            }
            TableOutcome::Accepted(records) => {
                debug!(table_id = %table_block.id, rows = records.len(), "table accepted");
                out.transactions.extend(records);
            }
            TableOutcome::Malformed(rows) => {
                warn!(table_id = %table_block.id, rows = rows.len(), "table did not reshape into the statement schema, routing rows to junk");
                out.junk.extend(rows);
            }
        }
    }

    out
}

/// Main entry point: render a PDF, analyze each page, and fold the
/// classified tables into one Extraction.
///
/// Pages are processed strictly in order with one blocking analysis call
/// per page. Renderer and analyzer failures propagate and abort the
/// document; per-table problems never do. `progress` is called before
/// each page is analyzed and is cosmetic only.
pub fn convert_document(
    pdf_bytes: &[u8],
    renderer: &dyn PageRenderer,
    analyzer: &dyn DocumentAnalyzer,
    year: Option<&str>,
    mut progress: impl FnMut(usize, usize),
) -> Result<Extraction, ExtractError> {
    let pages = renderer.render_pages(pdf_bytes)?;
    let page_count = pages.len();
    debug!(
        pages = page_count,
        renderer = renderer.backend_name(),
        analyzer = analyzer.backend_name(),
        "document rendered"
    );

    let mut out = Extraction::default();
    for page in &pages {
        progress(page.page_number, page_count);
        let response = analyzer.analyze(&page.png)?;
        out.merge(extract_page(&response, year));
    }

    Ok(out)
}
