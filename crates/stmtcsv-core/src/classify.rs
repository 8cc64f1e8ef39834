use std::collections::BTreeMap;

use crate::model::{JunkRow, TransactionRecord};
use crate::table::ReconstructedTable;

/// Width of the statement schema: Date, Transaction, Credit, Debit, Balance.
const SCHEMA_WIDTH: usize = 5;

/// Outcome of classifying one reconstructed table. Terminal per table; a
/// table never splits between transactions and junk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    /// Header does not look like a transaction ledger; skipped silently.
    Rejected,
    /// All data rows reshaped into the statement schema.
    Accepted(Vec<TransactionRecord>),
    /// At least one row failed to reshape; every data row goes to junk.
    Malformed(Vec<JunkRow>),
}

/// Classify a reconstructed table against the statement schema.
///
/// Row 1 must carry "Date" in its first column to count as a transaction
/// ledger at all; other tables on the page (summary boxes, fee schedules)
/// are rejected outright rather than routed to junk. `year`, when present,
/// is appended space-separated to every Date.
pub fn classify_table(table: &ReconstructedTable, year: Option<&str>) -> TableOutcome {
    let Some(header) = table.rows.get(&1) else {
        return TableOutcome::Rejected;
    };
    let first_header = header.get(&1).map(String::as_str).unwrap_or("");
    if !first_header.contains("Date") {
        return TableOutcome::Rejected;
    }
    let header_width = header.len();

    let data_rows = || table.rows.iter().filter(|(row, _)| **row != 1);

    let mut records = Vec::new();
    for (_, row) in data_rows() {
        match reshape_row(row, year) {
            Some(record) => records.push(record),
            None => {
                // Uniform outcome per table: one bad row sends every data
                // row to manual review, nothing is silently dropped.
                let junk = data_rows()
                    .map(|(_, row)| junk_row(row, header_width))
                    .collect();
                return TableOutcome::Malformed(junk);
            }
        }
    }

    TableOutcome::Accepted(records)
}

/// Map a row's cells, in ascending column order, onto the five schema
/// fields. Returns None unless the row has exactly five cells.
fn reshape_row(row: &BTreeMap<u32, String>, year: Option<&str>) -> Option<TransactionRecord> {
    if row.len() != SCHEMA_WIDTH {
        return None;
    }
    let mut values = row.values().cloned();
    let mut date = values.next()?;
    if let Some(year) = year {
        date = format!("{date} {year}");
    }
    Some(TransactionRecord {
        date,
        transaction: values.next()?,
        credit: values.next()?,
        debit: values.next()?,
        balance: values.next()?,
    })
}

/// Positional cells for manual review, exactly as wide as the header row.
fn junk_row(row: &BTreeMap<u32, String>, header_width: usize) -> JunkRow {
    let cells = (1..=header_width as u32)
        .map(|col| row.get(&col).cloned())
        .collect();
    JunkRow { cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(u32, &str)]) -> BTreeMap<u32, String> {
        cells
            .iter()
            .map(|(col, text)| (*col, text.to_string()))
            .collect()
    }

    fn statement_header() -> BTreeMap<u32, String> {
        row(&[
            (1, "Date"),
            (2, "Transaction"),
            (3, "Credit"),
            (4, "Debit"),
            (5, "Balance"),
        ])
    }

    #[test]
    fn rejects_table_without_date_header() {
        let mut table = ReconstructedTable::default();
        table
            .rows
            .insert(1, row(&[(1, "Description"), (2, "Amount")]));
        table.rows.insert(2, row(&[(1, "Coffee"), (2, "$4.50")]));
        assert_eq!(classify_table(&table, None), TableOutcome::Rejected);
    }

    #[test]
    fn rejects_table_without_header_row() {
        let mut table = ReconstructedTable::default();
        table.rows.insert(2, row(&[(1, "Coffee")]));
        assert_eq!(classify_table(&table, None), TableOutcome::Rejected);
    }

    #[test]
    fn date_substring_in_header_is_enough() {
        let mut table = ReconstructedTable::default();
        table.rows.insert(
            1,
            row(&[
                (1, "Posting Date"),
                (2, "Transaction"),
                (3, "Credit"),
                (4, "Debit"),
                (5, "Balance"),
            ]),
        );
        assert_eq!(classify_table(&table, None), TableOutcome::Accepted(vec![]));
    }

    #[test]
    fn accepts_clean_rows_and_appends_year() {
        let mut table = ReconstructedTable::default();
        table.rows.insert(1, statement_header());
        table.rows.insert(
            2,
            row(&[
                (1, "01 Jan"),
                (2, "Coffee"),
                (3, ""),
                (4, "$4.50"),
                (5, "$95.50"),
            ]),
        );
        table.rows.insert(
            3,
            row(&[
                (1, "02 Jan"),
                (2, "Rent"),
                (3, ""),
                (4, "$800.00"),
                (5, "$(704.50)"),
            ]),
        );

        let TableOutcome::Accepted(records) = classify_table(&table, Some("2023")) else {
            panic!("expected accepted table");
        };
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            TransactionRecord {
                date: "01 Jan 2023".into(),
                transaction: "Coffee".into(),
                credit: "".into(),
                debit: "$4.50".into(),
                balance: "$95.50".into(),
            }
        );
        assert_eq!(records[1].date, "02 Jan 2023");
    }

    #[test]
    fn no_year_leaves_dates_untouched() {
        let mut table = ReconstructedTable::default();
        table.rows.insert(1, statement_header());
        table.rows.insert(
            2,
            row(&[
                (1, "01 Jan"),
                (2, "Coffee"),
                (3, ""),
                (4, "$4.50"),
                (5, "$95.50"),
            ]),
        );

        let TableOutcome::Accepted(records) = classify_table(&table, None) else {
            panic!("expected accepted table");
        };
        assert_eq!(records[0].date, "01 Jan");
    }

    #[test]
    fn one_bad_row_routes_whole_table_to_junk() {
        let mut table = ReconstructedTable::default();
        table.rows.insert(1, statement_header());
        table.rows.insert(
            2,
            row(&[
                (1, "01 Jan"),
                (2, "Coffee"),
                (3, ""),
                (4, "$4.50"),
                (5, "$95.50"),
            ]),
        );
        // Six raw columns: does not fit the schema.
        table.rows.insert(
            3,
            row(&[
                (1, "02 Jan"),
                (2, "Split"),
                (3, "payment"),
                (4, ""),
                (5, "$10.00"),
                (6, "$85.50"),
            ]),
        );

        let TableOutcome::Malformed(junk) = classify_table(&table, Some("2023")) else {
            panic!("expected malformed table");
        };
        // Both data rows land in junk, including the one that reshaped fine.
        assert_eq!(junk.len(), 2);
        // Junk rows are header-width positional lists.
        assert_eq!(junk[0].cells.len(), 5);
        assert_eq!(junk[0].cells[0].as_deref(), Some("01 Jan"));
        assert_eq!(junk[1].cells[4].as_deref(), Some("$10.00"));
    }

    #[test]
    fn short_row_fills_missing_positions_with_none() {
        let mut table = ReconstructedTable::default();
        table.rows.insert(1, statement_header());
        table
            .rows
            .insert(2, row(&[(1, "01 Jan"), (2, "Coffee"), (5, "$95.50")]));

        let TableOutcome::Malformed(junk) = classify_table(&table, None) else {
            panic!("expected malformed table");
        };
        assert_eq!(
            junk[0].cells,
            vec![
                Some("01 Jan".to_string()),
                Some("Coffee".to_string()),
                None,
                None,
                Some("$95.50".to_string()),
            ]
        );
    }

    #[test]
    fn header_only_table_yields_no_records() {
        let mut table = ReconstructedTable::default();
        table.rows.insert(1, statement_header());
        assert_eq!(classify_table(&table, None), TableOutcome::Accepted(vec![]));
    }

    #[test]
    fn classification_is_idempotent() {
        let mut table = ReconstructedTable::default();
        table.rows.insert(1, statement_header());
        table.rows.insert(
            2,
            row(&[
                (1, "01 Jan"),
                (2, "Coffee"),
                (3, ""),
                (4, "$4.50"),
                (5, "$95.50"),
            ]),
        );
        let first = classify_table(&table, Some("2023"));
        let second = classify_table(&table, Some("2023"));
        assert_eq!(first, second);
    }
}
