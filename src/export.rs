//! CSV export of labeled customers and segment summaries

use crate::error::Result;
use crate::pipeline::SegmentationReport;

/// Write one row per labeled customer to a CSV file.
pub fn write_customers_csv(report: &SegmentationReport, path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for customer in &report.customers {
        writer.serialize(customer)?;
    }
    writer.flush()?;
    log::info!("wrote {} customer rows to {}", report.customers.len(), path);
    Ok(())
}

/// Write one row per segment summary to a CSV file, rank order preserved.
pub fn write_summary_csv(report: &SegmentationReport, path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for summary in &report.summaries {
        writer.serialize(summary)?;
    }
    writer.flush()?;
    Ok(())
}
