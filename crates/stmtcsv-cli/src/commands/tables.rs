use std::path::PathBuf;

use stmtcsv_core::analysis::{self, BlockIndex};
use stmtcsv_core::error::ExtractError;
use stmtcsv_core::table::{extract_table, ReconstructedTable};

use crate::output;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), ExtractError> {
    let json_bytes = std::fs::read(&input_file)?;
    let pages = analysis::parse_saved(&json_bytes).map_err(|e| ExtractError::ResponseLoad {
        path: input_file.clone(),
        reason: e.to_string(),
    })?;

    let mut tables: Vec<(usize, ReconstructedTable)> = Vec::new();
    for (page_index, response) in pages.iter().enumerate() {
        let index = BlockIndex::build(response);
        for table_block in index.tables() {
            tables.push((page_index + 1, extract_table(table_block, &index)));
        }
    }

    match output_format {
        "json" => {
            let json = serde_json::to_string_pretty(&tables)?;
            println!("{json}");
        }
        _ => output::table::print_reconstructed(&tables),
    }

    Ok(())
}
