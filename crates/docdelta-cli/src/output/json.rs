use docdelta_core::error::DocDeltaError;
use docdelta_core::model::ChangeRecord;
use std::path::Path;

pub fn print(records: &[ChangeRecord]) -> Result<(), DocDeltaError> {
    let json = serde_json::to_string_pretty(records)?;
    println!("{json}");
    Ok(())
}

pub fn write(records: &[ChangeRecord], path: &Path) -> Result<(), DocDeltaError> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}
