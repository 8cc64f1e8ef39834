use serde::{Deserialize, Serialize};

/// Column headers of the statement schema, in output order.
pub const TRANSACTION_FIELDS: [&str; 5] = ["Date", "Transaction", "Credit", "Debit", "Balance"];

/// Default character offset of the 4-digit year within a statement file
/// name, matching names like "statement-2023-01.pdf".
pub const DEFAULT_YEAR_OFFSET: usize = 10;

/// One classified statement row. Created only by a successful reshape;
/// never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: String,
    pub transaction: String,
    pub credit: String,
    pub debit: String,
    pub balance: String,
}

/// A row that could not be reshaped into the statement schema, kept for
/// manual review. Cells are positional; `None` marks a column the row had
/// no cell for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JunkRow {
    pub cells: Vec<Option<String>>,
}

/// Where the statement year appended to each Date comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearSource {
    /// Use this year for every file.
    Fixed(String),
    /// Read 4 digits from the file name at this character offset.
    FileNameOffset(usize),
    /// Leave dates as extracted.
    None,
}

impl Default for YearSource {
    fn default() -> Self {
        YearSource::FileNameOffset(DEFAULT_YEAR_OFFSET)
    }
}

impl YearSource {
    /// Resolve the year for a given file name. Returns None when the name
    /// does not carry 4 ASCII digits at the configured offset.
    pub fn resolve(&self, file_name: &str) -> Option<String> {
        match self {
            YearSource::Fixed(year) => Some(year.clone()),
            YearSource::FileNameOffset(offset) => {
                let candidate: String = file_name.chars().skip(*offset).take(4).collect();
                if candidate.chars().count() == 4
                    && candidate.chars().all(|c| c.is_ascii_digit())
                {
                    Some(candidate)
                } else {
                    None
                }
            }
            YearSource::None => None,
        }
    }
}

/// Cumulative result of a run: accepted transactions plus rows needing
/// manual review, in processing order (file, then page, then table).
/// No deduplication, no sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub transactions: Vec<TransactionRecord>,
    pub junk: Vec<JunkRow>,
    /// Tables encountered across all pages.
    pub tables_seen: usize,
    /// Tables skipped because their header did not match the schema.
    pub tables_skipped: usize,
}

impl Extraction {
    pub fn merge(&mut self, other: Extraction) {
        self.transactions.extend(other.transactions);
        self.junk.extend(other.junk);
        self.tables_seen += other.tables_seen;
        self.tables_skipped += other.tables_skipped;
    }
}
