use stmtcsv_core::model::{Extraction, JunkRow, TransactionRecord, TRANSACTION_FIELDS};
use stmtcsv_core::table::ReconstructedTable;

pub fn print(result: &Extraction) {
    print_transactions(&result.transactions);

    if !result.junk.is_empty() {
        println!();
        println!("These transactions could not be recognised, please add them manually:");
        print_junk(&result.junk);
    }
}

fn print_transactions(transactions: &[TransactionRecord]) {
    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }

    let mut widths: Vec<usize> = TRANSACTION_FIELDS.iter().map(|h| h.len()).collect();
    for t in transactions {
        for (i, value) in fields(t).iter().enumerate() {
            widths[i] = widths[i].max(value.len());
        }
    }

    let header: Vec<String> = TRANSACTION_FIELDS.iter().map(|h| h.to_string()).collect();
    print_row(&header, &widths);
    for t in transactions {
        print_row(&fields(t), &widths);
    }
}

fn fields(t: &TransactionRecord) -> [String; 5] {
    [
        t.date.clone(),
        t.transaction.clone(),
        t.credit.clone(),
        t.debit.clone(),
        t.balance.clone(),
    ]
}

fn print_row(values: &[String], widths: &[usize]) {
    let cells: Vec<String> = values
        .iter()
        .zip(widths)
        .map(|(value, width)| format!("{:<width$}", value, width = *width))
        .collect();
    println!("  {}", cells.join("  ").trim_end());
}

fn print_junk(junk: &[JunkRow]) {
    for row in junk {
        let cells: Vec<&str> = row
            .cells
            .iter()
            .map(|cell| cell.as_deref().unwrap_or("-"))
            .collect();
        println!("  {}", cells.join(" | "));
    }
}

pub fn print_reconstructed(tables: &[(usize, ReconstructedTable)]) {
    if tables.is_empty() {
        println!("No tables found.");
        return;
    }

    for (i, (page, table)) in tables.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== Table {} (page {page}) ===", i + 1);
        for (row_index, row) in &table.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|(col, text)| format!("{col}:{text}"))
                .collect();
            println!("  {row_index}: {}", cells.join("  "));
        }
        if !table.scores.is_empty() {
            let avg = table.scores.iter().sum::<f64>() / table.scores.len() as f64;
            println!("  cell confidence avg: {avg:.1}");
        }
    }
}
