use stmtcsv_core::error::ExtractError;
use stmtcsv_core::model::Extraction;

pub fn print(result: &Extraction) -> Result<(), ExtractError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
