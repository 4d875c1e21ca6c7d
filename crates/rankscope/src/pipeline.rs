//! Pipeline configuration and the end-to-end run.

use std::path::PathBuf;

use tracing::info;

use crate::chart::{
    BoxPlotData, ChartKind, ChartRenderer, ChartSet, ChartStyle, LineChartData, PieChartData,
    RenderedChart, country_share, price_by_country, top_revenue,
};
use crate::clean::{CleaningReport, Cleaner};
use crate::error::{RankscopeError, Result};
use crate::frame::{ConsolidationSummary, Frame, consolidate};
use crate::input::{Datasets, Loader, ParserConfig};
use crate::report::Report;
use crate::stats::{correlation_matrix, describe};

/// Dataset files expected in the archive, in load order.
pub const DEFAULT_FILES: [&str; 5] = [
    "Companies_ranked_by_Dividend_Yield.csv",
    "Companies_ranked_by_Earnings.csv",
    "Companies_ranked_by_Market_Cap.csv",
    "Companies_ranked_by_P_E_ratio.csv",
    "Companies_ranked_by_Revenue.csv",
];

pub const DEFAULT_ARCHIVE: &str = "world top companies.zip";
pub const DEFAULT_EXTRACT_DIR: &str = "world_top_companies/";
pub const DEFAULT_CHARTS_DIR: &str = "charts";

/// Names of the columns the charts refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub country: String,
    pub revenue: String,
    pub price: String,
    pub name: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            country: "country".to_string(),
            revenue: "revenue_ttm".to_string(),
            price: "price (GBP)".to_string(),
            name: "Name".to_string(),
        }
    }
}

/// Configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Zip archive holding the datasets.
    pub archive: PathBuf,
    /// Directory the archive is unpacked into and datasets are read from.
    pub extract_dir: PathBuf,
    /// Skip unpacking and read from `extract_dir` as is.
    pub skip_extract: bool,
    /// Dataset file names, in load order.
    pub files: Vec<String>,
    /// Which dataset the revenue chart is drawn from.
    pub revenue_file: String,
    /// Column names referenced by the charts.
    pub columns: ColumnNames,
    /// Countries in the pie chart.
    pub pie_top: usize,
    /// Companies in the revenue chart.
    pub line_top: usize,
    /// Countries in the box plot.
    pub box_top: usize,
    /// Where rendered charts are written.
    pub charts_dir: PathBuf,
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Chart size and typography.
    pub chart_style: ChartStyle,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            archive: PathBuf::from(DEFAULT_ARCHIVE),
            extract_dir: PathBuf::from(DEFAULT_EXTRACT_DIR),
            skip_extract: false,
            files: DEFAULT_FILES.iter().map(|f| f.to_string()).collect(),
            revenue_file: "Companies_ranked_by_Revenue.csv".to_string(),
            columns: ColumnNames::default(),
            pie_top: 10,
            line_top: 10,
            box_top: 5,
            charts_dir: PathBuf::from(DEFAULT_CHARTS_DIR),
            parser: ParserConfig::default(),
            chart_style: ChartStyle::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_archive(mut self, archive: impl Into<PathBuf>) -> Self {
        self.archive = archive.into();
        self
    }

    pub fn with_extract_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extract_dir = dir.into();
        self
    }

    pub fn with_skip_extract(mut self, skip: bool) -> Self {
        self.skip_extract = skip;
        self
    }

    pub fn with_charts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.charts_dir = dir.into();
        self
    }

    /// Check the configuration is internally consistent.
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(RankscopeError::Config("no dataset files configured".to_string()));
        }
        if !self.files.contains(&self.revenue_file) {
            return Err(RankscopeError::Config(format!(
                "revenue dataset '{}' is not among the configured files",
                self.revenue_file
            )));
        }
        if self.pie_top == 0 || self.line_top == 0 || self.box_top == 0 {
            return Err(RankscopeError::Config("chart sizes must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// The combined table after consolidation and cleaning.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub frame: Frame,
    pub consolidation: ConsolidationSummary,
    pub cleaning: CleaningReport,
}

/// Loaded datasets, the prepared table and its report. Charts are drawn
/// from this afterwards, one at a time.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub datasets: Datasets,
    pub prepared: Prepared,
    pub report: Report,
}

/// Runs load → consolidate → clean → describe, then charts.
pub struct Pipeline {
    config: PipelineConfig,
    cleaner: Cleaner,
}

impl Pipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            config,
            cleaner: Cleaner::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Read the configured datasets, unpacking the archive unless told not to.
    pub fn load(&self) -> Result<Datasets> {
        self.config.validate()?;
        let loader =
            Loader::new(self.config.files.iter().cloned()).with_parser(self.config.parser.clone());

        if self.config.skip_extract {
            loader.load_dir(&self.config.extract_dir)
        } else {
            loader.load(&self.config.archive, &self.config.extract_dir)
        }
    }

    /// Consolidate and clean the loaded datasets.
    pub fn prepare(&self, datasets: &Datasets) -> Prepared {
        let (mut frame, consolidation) = consolidate(datasets);
        let cleaning = self.cleaner.clean(&mut frame);

        Prepared {
            frame,
            consolidation,
            cleaning,
        }
    }

    /// Statistics over the prepared table.
    pub fn report(&self, datasets: &Datasets, prepared: &Prepared) -> Report {
        info!("computing descriptive statistics");
        Report {
            sources: datasets.iter().map(|d| d.source.clone()).collect(),
            consolidation: prepared.consolidation,
            cleaning: prepared.cleaning.clone(),
            description: describe(&prepared.frame),
            correlation: correlation_matrix(&prepared.frame),
        }
    }

    /// Row counts of the most frequent countries in the combined table.
    pub fn country_pie(&self, combined: &Frame) -> Result<PieChartData> {
        country_share(combined, &self.config.columns.country, self.config.pie_top)
    }

    /// Highest revenues of the revenue dataset as loaded, before cleaning.
    pub fn revenue_line(&self, datasets: &Datasets) -> Result<LineChartData> {
        let columns = &self.config.columns;
        let revenue = datasets
            .get(&self.config.revenue_file)
            .ok_or_else(|| RankscopeError::MissingDataset {
                name: self.config.revenue_file.clone(),
                dir: self.config.extract_dir.clone(),
            })?;

        top_revenue(
            &Frame::from_table(&revenue.table),
            &columns.revenue,
            &columns.name,
            self.config.line_top,
        )
    }

    /// Prices of the combined table grouped by the most frequent countries.
    pub fn price_box(&self, combined: &Frame) -> Result<BoxPlotData> {
        let columns = &self.config.columns;
        price_by_country(combined, &columns.country, &columns.price, self.config.box_top)
    }

    /// Inputs of all three charts.
    pub fn charts(&self, datasets: &Datasets, combined: &Frame) -> Result<ChartSet> {
        Ok(ChartSet {
            country_pie: self.country_pie(combined)?,
            revenue_line: self.revenue_line(datasets)?,
            price_box: self.price_box(combined)?,
        })
    }

    /// Load, consolidate, clean and compute the report.
    pub fn run(&self) -> Result<RunOutput> {
        let datasets = self.load()?;
        let prepared = self.prepare(&datasets);
        let report = self.report(&datasets, &prepared);

        Ok(RunOutput {
            datasets,
            prepared,
            report,
        })
    }

    /// Prepare and render a single chart. Each chart reads only its own
    /// columns.
    pub fn render_chart(&self, kind: ChartKind, output: &RunOutput) -> Result<RenderedChart> {
        let combined = &output.prepared.frame;
        let renderer = self.renderer();

        let rendered = match kind {
            ChartKind::CountryPie => renderer.render_country_pie(&self.country_pie(combined)?)?,
            ChartKind::RevenueLine => {
                renderer.render_revenue_line(&self.revenue_line(&output.datasets)?)?
            }
            ChartKind::PriceBox => renderer.render_price_box(&self.price_box(combined)?)?,
        };
        info!(chart = ?kind, path = %rendered.path.display(), "rendered chart");
        Ok(rendered)
    }

    fn renderer(&self) -> ChartRenderer {
        ChartRenderer::new(&self.config.charts_dir).with_style(self.config.chart_style.clone())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
