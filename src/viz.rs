//! Chart rendering for segmentation reports using Plotters

use plotters::prelude::*;

use crate::error::{Result, SegmentError};
use crate::pipeline::SegmentationReport;

/// Color per segment rank: best rank first (skyblue, yellow, pink, then
/// fallbacks for larger k).
const SEGMENT_COLORS: [RGBColor; 5] = [
    RGBColor(135, 206, 235),
    RGBColor(255, 221, 51),
    RGBColor(255, 182, 193),
    RGBColor(144, 238, 144),
    RGBColor(216, 191, 216),
];

fn segment_color(rank: usize) -> RGBColor {
    if rank < SEGMENT_COLORS.len() {
        SEGMENT_COLORS[rank]
    } else {
        BLACK
    }
}

/// Rank index (0 = best) for each raw cluster id.
fn rank_of_cluster(report: &SegmentationReport) -> Vec<usize> {
    let k = report.profiles.len();
    let mut ranks = vec![0; k];
    for (rank, profile) in report.profiles.iter().enumerate() {
        ranks[profile.cluster_id] = rank;
    }
    ranks
}

/// Bar chart of customer counts per segment, best rank leftmost.
pub fn create_segment_size_chart(report: &SegmentationReport, output_path: &str) -> Result<()> {
    let k = report.summaries.len();
    let max_count = report
        .summaries
        .iter()
        .map(|s| s.count)
        .max()
        .unwrap_or(1) as f64;

    let root = BitMapBackend::new(output_path, (600, 400)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| SegmentError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Customers per Segment", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..(k as f64), 0f64..(max_count * 1.1))
        .map_err(|e| SegmentError::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Segment (rank order)")
        .y_desc("Number of Customers")
        .axis_desc_style(("sans-serif", 15))
        .draw()
        .map_err(|e| SegmentError::Plot(e.to_string()))?;

    for (rank, summary) in report.summaries.iter().enumerate() {
        let color = segment_color(rank);
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [
                    (rank as f64 + 0.1, 0.0),
                    (rank as f64 + 0.9, summary.count as f64),
                ],
                color.filled(),
            )))
            .map_err(|e| SegmentError::Plot(e.to_string()))?
            .label(summary.label.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y), (x + 10, y + 10)], color.filled()));
    }

    chart
        .configure_series_labels()
        .draw()
        .map_err(|e| SegmentError::Plot(e.to_string()))?;

    root.present().map_err(|e| SegmentError::Plot(e.to_string()))?;
    log::info!("segment size chart saved to {}", output_path);
    Ok(())
}

/// Scatter plot of Recency vs Monetary in original units, colored by
/// segment.
pub fn create_segment_scatter(report: &SegmentationReport, output_path: &str) -> Result<()> {
    let ranks = rank_of_cluster(report);

    let recency_max = report
        .customers
        .iter()
        .map(|c| c.recency as f64)
        .fold(f64::NEG_INFINITY, f64::max)
        + 1.0;
    let monetary_max = report
        .customers
        .iter()
        .map(|c| c.monetary)
        .fold(f64::NEG_INFINITY, f64::max)
        * 1.1
        + 1.0;

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| SegmentError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Recency vs Monetary by Segment", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(-1f64..recency_max, -1f64..monetary_max)
        .map_err(|e| SegmentError::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Recency (days)")
        .y_desc("Monetary")
        .axis_desc_style(("sans-serif", 15))
        .draw()
        .map_err(|e| SegmentError::Plot(e.to_string()))?;

    for customer in &report.customers {
        let color = segment_color(ranks[customer.cluster]);
        chart
            .draw_series(std::iter::once(Circle::new(
                (customer.recency as f64, customer.monetary),
                4,
                color.filled(),
            )))
            .map_err(|e| SegmentError::Plot(e.to_string()))?;
    }

    root.present().map_err(|e| SegmentError::Plot(e.to_string()))?;
    log::info!("segment scatter saved to {}", output_path);
    Ok(())
}

/// Render both charts: the main scatter at `base_output_path` and the size
/// bar chart alongside it.
pub fn generate_charts(report: &SegmentationReport, base_output_path: &str) -> Result<()> {
    create_segment_scatter(report, base_output_path)?;
    let sizes_path = base_output_path.replace(".png", "_sizes.png");
    create_segment_size_chart(report, &sizes_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Transaction;
    use crate::pipeline::{run_pipeline, PipelineConfig};
    use chrono::NaiveDate;
    use std::path::Path;
    use tempfile::tempdir;

    fn test_report() -> SegmentationReport {
        let tx = |customer_id: &str, date: &str, amount: f64| Transaction {
            customer_id: customer_id.to_string(),
            timestamp: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            amount,
        };
        let transactions = vec![
            tx("A", "2024-01-09", 500.0),
            tx("B", "2024-01-01", 10.0),
            tx("C", "2024-01-05", 120.0),
            tx("D", "2024-01-10", 300.0),
        ];
        run_pipeline(&transactions, &PipelineConfig::default()).unwrap()
    }

    #[test]
    fn test_create_segment_size_chart() {
        let report = test_report();
        let dir = tempdir().unwrap();
        let path = dir.path().join("sizes.png");
        let path = path.to_str().unwrap();

        create_segment_size_chart(&report, path).unwrap();
        assert!(Path::new(path).exists());
    }

    #[test]
    fn test_create_segment_scatter() {
        let report = test_report();
        let dir = tempdir().unwrap();
        let path = dir.path().join("scatter.png");
        let path = path.to_str().unwrap();

        create_segment_scatter(&report, path).unwrap();
        assert!(Path::new(path).exists());
    }

    #[test]
    fn test_generate_charts_writes_both_files() {
        let report = test_report();
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.png");
        let path = path.to_str().unwrap();

        generate_charts(&report, path).unwrap();
        assert!(Path::new(path).exists());
        assert!(Path::new(&path.replace(".png", "_sizes.png")).exists());
    }
}
