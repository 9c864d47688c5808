//! Static Chart Renderer
//! Draws the stacked bar chart of page usage by location into a PNG.
//!
//! Layout:
//! 1. Title centred above the plot
//! 2. One bar per location row, duplex pages at the bottom, simplex on top
//! 3. Location names as rotated x tick labels
//! 4. Legend in the upper right corner

use super::plotter::{ChartData, Series};
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

pub const CHART_TITLE: &str = "Busiest Printers in North Campus";
pub const X_LABEL: &str = "Printer Location";
pub const Y_LABEL: &str = "The Amount of Pages";

const FONT_FAMILY: &str = "sans-serif";
const TITLE_FONT_SIZE: u32 = 24;
const AXIS_FONT_SIZE: u32 = 14;
const TICK_FONT_SIZE: u32 = 10;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 800;

const BAR_ALPHA: f64 = 0.85;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

fn drawing<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `data` as a PNG at `path`, replacing any existing file.
    pub fn render_png(data: &ChartData, path: &Path) -> Result<(), RenderError> {
        if data.is_empty() {
            warn!("no complete rows to plot");
        }

        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, (FONT_FAMILY, TITLE_FONT_SIZE))
            .margin(20)
            .x_label_area_size(140)
            .y_label_area_size(80)
            .build_cartesian_2d(data.x_range(), 0f64..data.y_max())
            .map_err(drawing)?;

        let tick_style = TextStyle::from(
            FontDesc::new(
                FontFamily::Name(FONT_FAMILY),
                TICK_FONT_SIZE as f64,
                FontStyle::Normal,
            )
            .transform(FontTransform::Rotate90),
        );
        let label_formatter = |x: &f64| data.label_at(*x).unwrap_or_default().to_string();

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(data.len().max(1))
            .x_label_formatter(&label_formatter)
            .x_label_style(tick_style)
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .axis_desc_style((FONT_FAMILY, AXIS_FONT_SIZE))
            .draw()
            .map_err(drawing)?;

        for series in Series::ALL {
            let color = series.color();
            chart
                .draw_series(data.segments(series).into_iter().map(|seg| {
                    Rectangle::new(
                        [(seg.x0, seg.y0), (seg.x1, seg.y1)],
                        color.mix(BAR_ALPHA).filled(),
                    )
                }))
                .map_err(drawing)?
                .label(series.name())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.mix(BAR_ALPHA).filled())
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT_FAMILY, AXIS_FONT_SIZE))
            .draw()
            .map_err(drawing)?;

        root.present().map_err(drawing)?;
        info!(path = %path.display(), bars = data.len(), "rendered chart");
        Ok(())
    }
}
