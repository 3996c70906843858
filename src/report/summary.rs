//! End-of-run summary printed to the console

use std::path::PathBuf;
use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// What a run produced and how long each stage took
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows: usize,
    pub columns: usize,
    pub summary_tables: usize,
    pub images: Vec<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub stage_times: Vec<(&'static str, Duration)>,
}

impl RunSummary {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Default::default()
        }
    }

    pub fn record_stage(&mut self, stage: &'static str, elapsed: Duration) {
        self.stage_times.push((stage, elapsed));
    }

    pub fn total_time(&self) -> Duration {
        self.stage_times.iter().map(|(_, d)| *d).sum()
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("💎 Rows"),
            Cell::new(self.rows),
        ]);
        table.add_row(vec![
            Cell::new("📁 Columns"),
            Cell::new(self.columns),
        ]);
        table.add_row(vec![
            Cell::new("📊 Summary tables"),
            Cell::new(self.summary_tables),
        ]);
        table.add_row(vec![
            Cell::new("🖼️  Charts"),
            Cell::new(self.images.len()).fg(if self.images.len() == 6 {
                Color::Green
            } else {
                Color::Red
            }),
        ]);

        for (stage, elapsed) in &self.stage_times {
            table.add_row(vec![
                Cell::new(format!("⏱️  {}", stage)),
                Cell::new(format!("{:.2}s", elapsed.as_secs_f64())).fg(Color::Cyan),
            ]);
        }

        table.add_row(vec![
            Cell::new("✅ Total"),
            Cell::new(format!("{:.2}s", self.total_time().as_secs_f64()))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.images.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("🖼️").cyan(),
                style("CHART FILES").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for image in &self.images {
                println!("        {} {}", style("•").dim(), image.display());
            }
        }
    }
}
