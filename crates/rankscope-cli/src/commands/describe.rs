//! Describe command - statistics only.

use colored::Colorize;
use rankscope::{Pipeline, PipelineConfig};

use super::print_summary;

pub fn run(config: PipelineConfig, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::with_config(config);

    let datasets = pipeline.load()?;
    let prepared = pipeline.prepare(&datasets);
    let report = pipeline.report(&datasets, &prepared);

    if json_output {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    print_summary(&datasets, &prepared);
    println!("{}", report);

    if report.description.is_empty() {
        println!("{}", "No numeric columns to describe.".yellow());
    }

    Ok(())
}
