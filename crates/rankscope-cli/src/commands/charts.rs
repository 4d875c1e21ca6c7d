//! Charts command - render the charts without statistics.

use std::path::PathBuf;

use colored::Colorize;
use rankscope::{Pipeline, PipelineConfig};

use super::{render_charts, show_charts};

pub fn run(
    config: PipelineConfig,
    charts_dir: PathBuf,
    no_open: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::with_config(config.with_charts_dir(charts_dir));

    let output = pipeline.run()?;
    let (rendered, failure) = render_charts(&pipeline, &output);

    println!(
        "{} {} charts into {}",
        "Rendered".green().bold(),
        rendered.len(),
        pipeline.config().charts_dir.display()
    );
    show_charts(&rendered, no_open)?;

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
