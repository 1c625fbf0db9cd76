//! rfmkit CLI entrypoint: load transactions, run the segmentation pipeline,
//! print the report, render charts, and optionally export CSVs.

use anyhow::Result;
use clap::Parser;
use rfmkit::{export, load_transactions, run_pipeline, viz, Args, LabelScheme, PipelineConfig};
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.verbose {
        println!("rfmkit - Customer Segmentation from RFM Analysis");
        println!("================================================\n");
    }

    let start_time = Instant::now();

    // Step 1: Load the transaction table
    if args.verbose {
        println!("Step 1: Loading transactions");
        println!("  Input file: {}", args.input);
    }
    let load_start = Instant::now();
    let transactions = load_transactions(&args.input)?;
    println!("✓ Loaded {} transactions", transactions.len());
    if args.verbose {
        println!("  Load time: {:.2}s", load_start.elapsed().as_secs_f64());
    }

    // Step 2: Run the pipeline
    let config = PipelineConfig {
        n_clusters: args.clusters,
        n_init: args.n_init,
        max_iters: args.max_iters,
        seed: args.seed,
        labels: LabelScheme::Auto,
    };
    if args.verbose {
        println!("\nStep 2: Running segmentation pipeline");
        println!("  Clusters: {}", config.n_clusters);
        println!("  Restarts: {}", config.n_init);
        println!("  Max iterations: {}", config.max_iters);
        println!("  Seed: {}", config.seed);
    }
    let pipeline_start = Instant::now();
    let report = run_pipeline(&transactions, &config)?;
    println!("✓ Segmented {} customers", report.customers.len());
    if args.verbose {
        println!(
            "  Pipeline time: {:.2}s",
            pipeline_start.elapsed().as_secs_f64()
        );
        println!("  Inertia: {:.4}", report.inertia);
        if !report.converged {
            println!("  Note: clustering stopped at the iteration cap");
        }
    }

    // Step 3: Print the segment report
    println!("\n=== Segment Summary ===");
    println!("  Segment      |  Count | Recency | Frequency | Monetary");
    println!("  -------------|--------|---------|-----------|---------");
    for summary in &report.summaries {
        println!(
            "  {:12} | {:6} | {:7.2} | {:9.2} | {:8.2}",
            summary.label,
            summary.count,
            summary.mean_recency,
            summary.mean_frequency,
            summary.mean_monetary
        );
    }
    println!();
    for summary in &report.summaries {
        println!("{}: {}", summary.label, summary.interpretation);
    }

    // Step 4: Render charts
    if args.verbose {
        println!("\nStep 4: Rendering charts");
        println!("  Output file: {}", args.output);
    }
    viz::generate_charts(&report, &args.output)?;
    println!("\n✓ Charts saved to: {}", args.output);
    println!(
        "  Segment sizes saved to: {}",
        args.output.replace(".png", "_sizes.png")
    );

    // Step 5: Optional CSV export
    if let Some(ref export_path) = args.export {
        export::write_customers_csv(&report, export_path)?;
        let summary_path = export_path.replace(".csv", "_summary.csv");
        export::write_summary_csv(&report, &summary_path)?;
        println!("✓ Exported labeled customers to: {}", export_path);
        println!("  Segment summary exported to: {}", summary_path);
    }

    println!(
        "\nTotal processing time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
