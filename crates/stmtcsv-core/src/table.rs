use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::{Block, BlockIndex, BlockType, SelectionStatus};

/// Row/column text matrix rebuilt from one TABLE block, plus the raw
/// per-cell confidence scores (unordered, whole-table aggregate).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconstructedTable {
    /// row index -> column index -> cell text. Indices are 1-based as
    /// reported by the service; row 1 is the header by convention.
    pub rows: BTreeMap<u32, BTreeMap<u32, String>>,
    pub scores: Vec<f64>,
}

/// Flatten a block's CHILD words and selection marks into a single string.
///
/// Purely numeric tokens containing thousands separators are wrapped in
/// double quotes so the comma survives downstream delimiter handling.
/// Selected selection marks contribute "X". Returns the empty string when
/// the block has no CHILD relationship; child ids missing from the index
/// are skipped.
pub fn reconstruct_text(block: &Block, index: &BlockIndex) -> String {
    let mut tokens: Vec<String> = Vec::new();

    for child_id in block.child_ids() {
        let Some(child) = index.get(child_id) else {
            continue;
        };
        match child.block_type {
            BlockType::Word => {
                if let Some(text) = child.text.as_deref() {
                    if is_separated_number(text) {
                        tokens.push(format!("\"{text}\""));
                    } else {
                        tokens.push(text.to_string());
                    }
                }
            }
            BlockType::SelectionElement => {
                if child.selection_status == Some(SelectionStatus::Selected) {
                    tokens.push("X".to_string());
                }
            }
            _ => {}
        }
    }

    tokens.join(" ")
}

/// A number with comma thousands separators, e.g. "1,234" or "12,345,678".
fn is_separated_number(text: &str) -> bool {
    if !text.contains(',') {
        return false;
    }
    let digits: String = text.chars().filter(|c| *c != ',').collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Rebuild the cell matrix of one TABLE block.
///
/// CELL children land at their reported row/column index with text from
/// [`reconstruct_text`]; non-cell children are ignored. The BTreeMaps give
/// consumers natural index order; nothing else is guaranteed.
pub fn extract_table(table: &Block, index: &BlockIndex) -> ReconstructedTable {
    let mut out = ReconstructedTable::default();

    for child_id in table.child_ids() {
        let Some(cell) = index.get(child_id) else {
            continue;
        };
        if cell.block_type != BlockType::Cell {
            continue;
        }
        let (Some(row), Some(col)) = (cell.row_index, cell.column_index) else {
            continue;
        };
        if let Some(confidence) = cell.confidence {
            out.scores.push(confidence);
        }
        out.rows
            .entry(row)
            .or_default()
            .insert(col, reconstruct_text(cell, index));
    }

    out
}
