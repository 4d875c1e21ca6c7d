//! Chart rendering with [`plotters`].
//!
//! Charts are written as SVG files so rendering needs no system fonts and
//! works in headless environments.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::FontTransform;
use tracing::debug;

use super::data::{BoxPlotData, LineChartData, PieChartData};
use crate::error::{RankscopeError, Result};

/// Sampled viridis colormap, dark to light.
const VIRIDIS: [RGBColor; 10] = [
    RGBColor(0x44, 0x01, 0x54),
    RGBColor(0x48, 0x28, 0x78),
    RGBColor(0x3E, 0x4A, 0x89),
    RGBColor(0x31, 0x68, 0x8E),
    RGBColor(0x26, 0x82, 0x8E),
    RGBColor(0x1F, 0x9E, 0x89),
    RGBColor(0x35, 0xB7, 0x79),
    RGBColor(0x6D, 0xCD, 0x59),
    RGBColor(0xB4, 0xDE, 0x2C),
    RGBColor(0xFD, 0xE7, 0x25),
];

/// Qualitative "Set2" palette.
const SET2: [RGBColor; 8] = [
    RGBColor(0x66, 0xC2, 0xA5),
    RGBColor(0xFC, 0x8D, 0x62),
    RGBColor(0x8D, 0xA0, 0xCB),
    RGBColor(0xE7, 0x8A, 0xC3),
    RGBColor(0xA6, 0xD8, 0x54),
    RGBColor(0xFF, 0xD9, 0x2F),
    RGBColor(0xE5, 0xC4, 0x94),
    RGBColor(0xB3, 0xB3, 0xB3),
];

/// Size and typography shared by all charts.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub font: String,
    pub title_size: f64,
    pub label_size: f64,
    pub tick_size: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            font: "sans-serif".to_string(),
            title_size: 36.0,
            label_size: 24.0,
            tick_size: 16.0,
        }
    }
}

fn chart_err(e: impl std::fmt::Display) -> RankscopeError {
    RankscopeError::Chart(e.to_string())
}

/// Compact axis label for large magnitudes (e.g. `1.2T`, `640B`).
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.1}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}k", value / 1e3)
    } else {
        format!("{:.1}", value)
    }
}

/// Value range padded by 5% on each side, widened when degenerate.
fn padded_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    let pad = if max > min { (max - min) * 0.05 } else { min.abs().max(1.0) * 0.1 };
    Some((min - pad, max + pad))
}

/// Renders chart data to SVG files in an output directory.
pub struct ChartRenderer {
    output_dir: PathBuf,
    style: ChartStyle,
}

impl ChartRenderer {
    /// Create a renderer writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            style: ChartStyle::default(),
        }
    }

    /// Use a custom chart style.
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn prepare(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| RankscopeError::Io {
            path: self.output_dir.clone(),
            source: e,
        })?;
        Ok(self.output_dir.join(file_name))
    }

    fn size(&self) -> (u32, u32) {
        (self.style.width, self.style.height)
    }

    /// Draw a pie chart with percentage labels.
    ///
    /// With no slices only the title is drawn.
    pub fn render_pie(&self, data: &PieChartData, title: &str, file_name: &str) -> Result<PathBuf> {
        let path = self.prepare(file_name)?;
        let font = self.style.font.as_str();

        {
            let root = SVGBackend::new(&path, self.size()).into_drawing_area();
            root.fill(&WHITE).map_err(chart_err)?;
            let area = root
                .titled(title, (font, self.style.title_size).into_font().style(FontStyle::Bold))
                .map_err(chart_err)?;

            let sizes: Vec<f64> = data.counts.iter().map(|&c| c as f64).collect();
            if sizes.iter().sum::<f64>() > 0.0 {
                let (w, h) = area.dim_in_pixel();
                let center = (w as i32 / 2, h as i32 / 2);
                let radius = w.min(h) as f64 * 0.38;
                let colors: Vec<RGBColor> = (0..sizes.len())
                    .map(|i| VIRIDIS[i * VIRIDIS.len() / sizes.len()])
                    .collect();

                let mut pie = Pie::new(&center, &radius, &sizes, &colors, &data.labels);
                pie.start_angle(140.0);
                pie.label_style((font, self.style.tick_size).into_font().color(&BLACK));
                pie.percentages((font, self.style.tick_size).into_font().color(&WHITE));
                area.draw(&pie).map_err(chart_err)?;
            }

            root.present().map_err(chart_err)?;
        }
        debug!(path = %path.display(), slices = data.labels.len(), "rendered pie chart");
        Ok(path)
    }

    /// Draw a line with point markers over categorical x values.
    ///
    /// Category names are drawn in full, rotated to fit.
    pub fn render_line(
        &self,
        data: &LineChartData,
        title: &str,
        x_desc: &str,
        y_desc: &str,
        file_name: &str,
    ) -> Result<PathBuf> {
        let path = self.prepare(file_name)?;
        let Some((y_min, y_max)) = padded_range(data.values.iter().copied()) else {
            self.draw_empty(&path, title, x_desc, y_desc)?;
            debug!(path = %path.display(), "rendered empty line chart");
            return Ok(path);
        };
        let font = self.style.font.as_str();

        {
            let root = SVGBackend::new(&path, self.size()).into_drawing_area();
            root.fill(&WHITE).map_err(chart_err)?;

            let labels: Vec<String> = data.labels.clone();
            let mut chart = ChartBuilder::on(&root)
                .caption(title, (font, self.style.title_size).into_font().style(FontStyle::Bold))
                .margin(20)
                .x_label_area_size(self.style.width / 5)
                .y_label_area_size(110)
                .build_cartesian_2d(labels[..].into_segmented(), y_min..y_max)
                .map_err(chart_err)?;

            chart
                .configure_mesh()
                .x_desc(x_desc)
                .y_desc(y_desc)
                .axis_desc_style((font, self.style.label_size))
                .label_style((font, self.style.tick_size))
                .x_label_style(
                    (font, self.style.tick_size)
                        .into_font()
                        .transform(FontTransform::Rotate90),
                )
                .x_labels(labels.len())
                .x_label_formatter(&|v| match v {
                    SegmentValue::Exact(label) | SegmentValue::CenterOf(label) => label.to_string(),
                    SegmentValue::Last => String::new(),
                })
                .y_label_formatter(&|v| format_compact(*v))
                .draw()
                .map_err(chart_err)?;

            let points: Vec<(SegmentValue<&String>, f64)> = labels
                .iter()
                .zip(&data.values)
                .map(|(label, value)| (SegmentValue::CenterOf(label), *value))
                .collect();

            chart
                .draw_series(
                    (!points.is_empty())
                        .then(|| PathElement::new(points.clone(), BLUE.stroke_width(3))),
                )
                .map_err(chart_err)?;
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|(x, y)| Circle::new((x.clone(), *y), 6, BLUE.filled())),
                )
                .map_err(chart_err)?;

            root.present().map_err(chart_err)?;
        }
        debug!(path = %path.display(), "rendered line chart");
        Ok(path)
    }

    /// Draw one vertical box per group. Groups without values are skipped.
    pub fn render_box(
        &self,
        data: &BoxPlotData,
        title: &str,
        x_desc: &str,
        y_desc: &str,
        file_name: &str,
    ) -> Result<PathBuf> {
        let path = self.prepare(file_name)?;
        let groups: Vec<_> = data.groups.iter().filter(|g| !g.values.is_empty()).collect();
        let Some((y_min, y_max)) = padded_range(groups.iter().flat_map(|g| g.values.iter().copied())) else {
            self.draw_empty(&path, title, x_desc, y_desc)?;
            debug!(path = %path.display(), "rendered empty box plot");
            return Ok(path);
        };
        let font = self.style.font.as_str();

        {
            let root = SVGBackend::new(&path, self.size()).into_drawing_area();
            root.fill(&WHITE).map_err(chart_err)?;

            let labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();
            let quartiles: Vec<Quartiles> = groups.iter().map(|g| Quartiles::new(&g.values)).collect();

            let mut chart = ChartBuilder::on(&root)
                .caption(title, (font, self.style.title_size).into_font().style(FontStyle::Bold))
                .margin(20)
                .x_label_area_size(60)
                .y_label_area_size(110)
                .build_cartesian_2d(labels[..].into_segmented(), y_min as f32..y_max as f32)
                .map_err(chart_err)?;

            chart
                .configure_mesh()
                .x_desc(x_desc)
                .y_desc(y_desc)
                .axis_desc_style((font, self.style.label_size))
                .label_style((font, self.style.tick_size))
                .y_label_formatter(&|v| format_compact(*v as f64))
                .draw()
                .map_err(chart_err)?;

            chart
                .draw_series(labels.iter().zip(&quartiles).enumerate().map(|(i, (label, q))| {
                    Boxplot::new_vertical(SegmentValue::CenterOf(label), q)
                        .width(60)
                        .whisker_width(0.5)
                        .style(SET2[i % SET2.len()].stroke_width(2))
                }))
                .map_err(chart_err)?;

            root.present().map_err(chart_err)?;
        }
        debug!(path = %path.display(), "rendered box plot");
        Ok(path)
    }

    /// Title, axis descriptions and a bare 0..1 mesh, for charts without data.
    fn draw_empty(&self, path: &Path, title: &str, x_desc: &str, y_desc: &str) -> Result<()> {
        let font = self.style.font.as_str();
        let root = SVGBackend::new(path, self.size()).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (font, self.style.title_size).into_font().style(FontStyle::Bold))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(110)
            .build_cartesian_2d(0f64..1f64, 0f64..1f64)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .axis_desc_style((font, self.style.label_size))
            .label_style((font, self.style.tick_size))
            .draw()
            .map_err(chart_err)?;

        root.present().map_err(chart_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::data::BoxGroup;

    fn read_svg(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(2.5e12), "2.5T");
        assert_eq!(format_compact(6.4e11), "640.0B");
        assert_eq!(format_compact(1500.0), "1.5k");
        assert_eq!(format_compact(12.0), "12.0");
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range([0.0, 100.0].into_iter()), Some((-5.0, 105.0)));
        assert_eq!(padded_range([5.0].into_iter()), Some((4.5, 5.5)));
        assert_eq!(padded_range(std::iter::empty()), None);
    }

    #[test]
    fn test_line_keeps_full_company_names() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());
        let data = LineChartData {
            labels: vec!["Berkshire Hathaway".into(), "UnitedHealth Group".into()],
            values: vec![3.0e11, 2.8e11],
        };

        let path = renderer.render_line(&data, "Revenue", "Company Name", "Revenue", "line.svg").unwrap();

        let svg = read_svg(&path);
        assert!(svg.contains("Berkshire Hathaway"));
        assert!(svg.contains("UnitedHealth Group"));
    }

    #[test]
    fn test_empty_line_draws_axes() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());
        let empty = LineChartData {
            labels: vec![],
            values: vec![],
        };

        let path = renderer.render_line(&empty, "Revenue", "Company Name", "Revenue", "line.svg").unwrap();

        let svg = read_svg(&path);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Company Name"));
    }

    #[test]
    fn test_empty_box_and_pie_render() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());
        let empty_box = BoxPlotData {
            groups: vec![BoxGroup {
                label: "US".into(),
                values: vec![],
            }],
        };
        let empty_pie = PieChartData {
            labels: vec![],
            counts: vec![],
        };

        let boxes = renderer.render_box(&empty_box, "Price", "Country", "Price (GBP)", "box.svg").unwrap();
        let pie = renderer.render_pie(&empty_pie, "Share", "pie.svg").unwrap();

        assert!(read_svg(&boxes).contains("Price (GBP)"));
        assert!(read_svg(&pie).contains("Share"));
    }
}
