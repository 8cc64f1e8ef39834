pub mod aws_cli;

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ExtractError;

/// Response of the document-analysis service for a single page image
/// (AnalyzeDocument with feature type TABLES). Only the block list is
/// consumed; the rest of the payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisResponse {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    Table,
    Cell,
    Word,
    SelectionElement,
    /// PAGE, LINE, MERGED_CELL and anything the service adds later.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionStatus {
    Selected,
    NotSelected,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Child,
    /// VALUE, MERGED_CELL and other edge types not consumed here.
    #[serde(other)]
    Other,
}

/// Typed edge from a block to a set of related blocks by id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Relationship {
    #[serde(rename = "Type")]
    pub kind: RelationshipType,
    #[serde(default)]
    pub ids: Vec<String>,
}

/// One node of the layout graph. Which optional fields are present
/// depends on the block type: WORD carries text, SELECTION_ELEMENT a
/// selection status, CELL row/column indices.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Block {
    pub id: String,
    pub block_type: BlockType,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub selection_status: Option<SelectionStatus>,
    #[serde(default)]
    pub row_index: Option<u32>,
    #[serde(default)]
    pub column_index: Option<u32>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Block {
    /// Child block ids across all CHILD relationships, in response order.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(|r| r.kind == RelationshipType::Child)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }
}

/// Id -> block lookup for one page response. Built once per page,
/// read-only afterwards, never persisted.
pub struct BlockIndex<'a> {
    by_id: HashMap<&'a str, &'a Block>,
    tables: Vec<&'a Block>,
}

impl<'a> BlockIndex<'a> {
    pub fn build(response: &'a AnalysisResponse) -> Self {
        let mut by_id = HashMap::with_capacity(response.blocks.len());
        let mut tables = Vec::new();
        for block in &response.blocks {
            by_id.insert(block.id.as_str(), block);
            if block.block_type == BlockType::Table {
                tables.push(block);
            }
        }
        BlockIndex { by_id, tables }
    }

    pub fn get(&self, id: &str) -> Option<&'a Block> {
        self.by_id.get(id).copied()
    }

    /// TABLE blocks in the order the service reported them.
    pub fn tables(&self) -> &[&'a Block] {
        &self.tables
    }
}

/// Backend that sends one page image to the analysis service.
pub trait DocumentAnalyzer: Send + Sync {
    fn analyze(&self, image_bytes: &[u8]) -> Result<AnalysisResponse, ExtractError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Parse responses saved to disk: either one response object or an array
/// of per-page responses.
pub fn parse_saved(json: &[u8]) -> Result<Vec<AnalysisResponse>, serde_json::Error> {
    match serde_json::from_slice::<Vec<AnalysisResponse>>(json) {
        Ok(pages) => Ok(pages),
        Err(_) => serde_json::from_slice::<AnalysisResponse>(json).map(|r| vec![r]),
    }
}
