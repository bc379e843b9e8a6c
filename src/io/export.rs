//! Export the rate table to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts:
//! ISO dates, `.` decimals, empty cells for missing maturities.

use std::path::Path;

use crate::error::AppError;
use crate::report::RateTable;

/// Write the rate table to a CSV file.
pub fn write_rate_table_csv(path: &Path, table: &RateTable) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    let mut header = Vec::with_capacity(table.columns.len() + 1);
    header.push("maturity_date".to_string());
    header.extend(table.columns.iter().cloned());
    wtr.write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (maturity, values) in &table.rows {
        let mut record = Vec::with_capacity(values.len() + 1);
        record.push(maturity.to_string());
        record.extend(values.iter().map(|v| v.map(|v| format!("{v:.2}")).unwrap_or_default()));
        wtr.write_record(&record)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    tracing::info!(path = %path.display(), rows = table.rows.len(), "rate table exported");
    Ok(())
}
