//! The three descriptive charts: country share pie, top revenue line and
//! price-by-country box plot.

mod data;
mod render;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use data::{
    BoxGroup, BoxPlotData, LineChartData, PieChartData, country_share, price_by_country,
    top_categories, top_revenue,
};
pub use render::{ChartRenderer, ChartStyle, format_compact};

use crate::error::Result;

pub const PIE_TITLE: &str = "Market Cap Distribution by Country (Top 10)";
pub const LINE_TITLE: &str = "Top 10 Companies by Revenue (Year: 2023)";
pub const BOX_TITLE: &str = "Price Distribution by Country (Top 5 Countries)";

/// Which chart a rendered file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    CountryPie,
    RevenueLine,
    PriceBox,
}

impl ChartKind {
    /// All charts, in display order.
    pub const ALL: [ChartKind; 3] = [ChartKind::CountryPie, ChartKind::RevenueLine, ChartKind::PriceBox];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::CountryPie => "market_cap_by_country.svg",
            ChartKind::RevenueLine => "top_revenue.svg",
            ChartKind::PriceBox => "price_by_country.svg",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::CountryPie => PIE_TITLE,
            ChartKind::RevenueLine => LINE_TITLE,
            ChartKind::PriceBox => BOX_TITLE,
        }
    }
}

/// Prepared inputs for all three charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    pub country_pie: PieChartData,
    pub revenue_line: LineChartData,
    pub price_box: BoxPlotData,
}

/// A chart written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedChart {
    pub kind: ChartKind,
    pub path: PathBuf,
}

impl ChartRenderer {
    pub fn render_country_pie(&self, data: &PieChartData) -> Result<RenderedChart> {
        let kind = ChartKind::CountryPie;
        let path = self.render_pie(data, kind.title(), kind.file_name())?;
        Ok(RenderedChart { kind, path })
    }

    pub fn render_revenue_line(&self, data: &LineChartData) -> Result<RenderedChart> {
        let kind = ChartKind::RevenueLine;
        let path = self.render_line(
            data,
            kind.title(),
            "Company Name",
            "Revenue (in Billion GBP)",
            kind.file_name(),
        )?;
        Ok(RenderedChart { kind, path })
    }

    pub fn render_price_box(&self, data: &BoxPlotData) -> Result<RenderedChart> {
        let kind = ChartKind::PriceBox;
        let path = self.render_box(data, kind.title(), "Country", "Price (GBP)", kind.file_name())?;
        Ok(RenderedChart { kind, path })
    }
}
