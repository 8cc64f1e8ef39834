use std::ffi::OsStr;
use std::path::PathBuf;

use stmtcsv_core::analysis;
use stmtcsv_core::analysis::aws_cli::AwsCliAnalyzer;
use stmtcsv_core::error::ExtractError;
use stmtcsv_core::export;
use stmtcsv_core::model::{Extraction, YearSource};
use stmtcsv_core::render::pdftoppm::PdftoppmRenderer;

use crate::output;

pub fn run(
    inputs: Vec<PathBuf>,
    out: Option<PathBuf>,
    junk_out: Option<PathBuf>,
    year: Option<String>,
    year_offset: usize,
    region: &str,
    output_format: &str,
) -> Result<(), ExtractError> {
    let year_source = match year {
        Some(year) => YearSource::Fixed(year),
        None => YearSource::FileNameOffset(year_offset),
    };

    let renderer = PdftoppmRenderer::new();
    let analyzer = AwsCliAnalyzer::new(region);

    let mut total = Extraction::default();
    let file_count = inputs.len();

    for (file_index, input) in inputs.iter().enumerate() {
        let file_name = input
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or_default();
        let year = year_source.resolve(file_name);
        if year.is_none() {
            eprintln!(
                "warning: no 4-digit year found in '{file_name}', dates are kept as extracted"
            );
        }

        let is_json = input
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let extraction = if is_json {
            // Saved analysis responses, one per page.
            let json_bytes = std::fs::read(input)?;
            let pages = analysis::parse_saved(&json_bytes).map_err(|e| {
                ExtractError::ResponseLoad {
                    path: input.clone(),
                    reason: e.to_string(),
                }
            })?;
            let mut acc = Extraction::default();
            for response in &pages {
                acc.merge(stmtcsv_core::extract_page(response, year.as_deref()));
            }
            acc
        } else {
            let pdf_bytes = std::fs::read(input)?;
            stmtcsv_core::convert_document(
                &pdf_bytes,
                &renderer,
                &analyzer,
                year.as_deref(),
                |page, total_pages| {
                    eprintln!(
                        "Analyzing {file_name} ({}/{file_count}): page {page} of {total_pages}",
                        file_index + 1
                    );
                },
            )?
        };

        total.merge(extraction);
    }

    match output_format {
        "json" => output::json::print(&total)?,
        _ => output::table::print(&total),
    }

    if let Some(path) = out {
        export::write_csv(&path, &total.transactions)?;
        eprintln!(
            "{} transaction(s) written to {}",
            total.transactions.len(),
            path.display()
        );
    }

    if let Some(path) = junk_out {
        export::write_junk_csv(&path, &total.junk)?;
        eprintln!(
            "{} unrecognised row(s) written to {}",
            total.junk.len(),
            path.display()
        );
    }

    Ok(())
}
