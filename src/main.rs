//! Diamond EDA CLI
//!
//! Runs the whole analysis in one pass: capability check, load, statistics,
//! charts, report.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use diamond_eda::cli::{Cli, EdaConfig};
use diamond_eda::error::EdaError;
use diamond_eda::pipeline::pivots::CARAT_BINS;
use diamond_eda::pipeline::{
    check_capabilities, compute_statistics, diagnostic, estimated_memory_mb, load_diamonds,
    overview,
};
use diamond_eda::report::{
    assemble_report, ensure_image_dir, export_tables_json, image_ref_dir, write_report,
    ExportMetadata, ReportInputs, RunSummary,
};
use diamond_eda::utils::{
    abandon_with_error, create_progress_bar, create_spinner, finish_with_success, print_banner,
    print_completion, print_config, print_count, print_info, print_step_header, print_success,
};
use diamond_eda::viz::{render_visualizations, ChartKind};

/// Exit status when a required runtime component is missing
const EXIT_MISSING_DEPENDENCY: i32 = 2;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Nothing is written before every required component is confirmed
    if let Err(err) = check_capabilities() {
        match &err {
            EdaError::DependencyMissing { missing } => eprintln!("{}", diagnostic(missing)),
            other => eprintln!("Error: {}", other),
        }
        std::process::exit(EXIT_MISSING_DEPENDENCY);
    }

    let config = cli.into_config()?;
    run(&config)
}

fn run(config: &EdaConfig) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &config.source.cache_path(),
        &config.image_dir,
        &config.report_path,
    );

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");

    let step_start = Instant::now();
    let spinner = create_spinner("Loading diamonds dataset...");
    let mut table = match load_diamonds(&config.source) {
        Ok(table) => table,
        Err(e) => {
            abandon_with_error(&spinner, "Dataset unavailable");
            return Err(e);
        }
    };
    finish_with_success(&spinner, "Dataset loaded");

    let (rows, cols) = table.shape();
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", estimated_memory_mb(&table));

    let overview = overview(&table, config.sample_rows)?;
    let mut summary = RunSummary::new(rows, cols);
    summary.record_stage("Load", step_start.elapsed());

    // Step 2: Summary statistics
    print_step_header(2, "Summary Statistics");

    let step_start = Instant::now();
    let spinner = create_spinner("Computing summary statistics...");
    table.derive_price_per_carat()?;
    let statistics = compute_statistics(&table)?;
    finish_with_success(&spinner, "Summary statistics computed");
    print_count("numeric column(s) correlated", statistics.correlation.len());
    summary.record_stage("Statistics", step_start.elapsed());

    // Step 3: Charts
    print_step_header(3, "Render Charts");

    let step_start = Instant::now();
    ensure_image_dir(&config.image_dir)?;
    table.derive_carat_bins(CARAT_BINS)?;

    let bar = create_progress_bar(ChartKind::ALL.len() as u64, "Rendering");
    let mut images = Vec::with_capacity(ChartKind::ALL.len());
    let rendered = render_visualizations(&table, &statistics, &config.image_dir, |kind| {
        images.push(config.image_dir.join(kind.file_name()));
        bar.inc(1);
    });
    let visualizations = match rendered {
        Ok(records) => records,
        Err(e) => {
            abandon_with_error(&bar, "Chart rendering failed");
            return Err(e);
        }
    };
    finish_with_success(&bar, "Charts rendered");
    summary.images = images;
    summary.record_stage("Charts", step_start.elapsed());

    // Step 4: Report
    print_step_header(4, "Write Report");

    let step_start = Instant::now();
    let ref_dir = image_ref_dir(&config.report_path, &config.image_dir);
    let doc = assemble_report(&ReportInputs {
        dataset_url: &config.source.url,
        overview: &overview,
        statistics: &statistics,
        visualizations: &visualizations,
        image_ref_dir: &ref_dir,
    });
    let tables = doc.tables();
    summary.summary_tables = tables.len();

    // The report is the last file written; it only exists after a full run
    if let Some(json_path) = &config.stats_json {
        let metadata = ExportMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            dataset_url: config.source.url.clone(),
            rows,
            columns: cols,
        };
        export_tables_json(json_path, metadata, tables)?;
        print_info(&format!("Summary tables exported to {}", json_path.display()));
    }

    write_report(&config.report_path, &doc)?;
    print_success(&format!("Report written to {}", config.report_path.display()));
    summary.report_path = Some(config.report_path.clone());
    summary.record_stage("Report", step_start.elapsed());

    summary.display();
    print_completion(&config.image_dir, &config.report_path);

    Ok(())
}
