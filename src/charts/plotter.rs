//! Chart Plotter Module
//! Turns the cleaned table into stacked bar geometry.

use crate::config::{DUPLEX_COL, LOCATION_COL, SIMPLEX_COL};
use crate::data::RecordTable;
use plotters::style::RGBColor;
use polars::prelude::PolarsResult;

/// Michigan Blue
pub const DUPLEX_COLOR: RGBColor = RGBColor(0x00, 0x27, 0x4C);
/// Maize
pub const SIMPLEX_COLOR: RGBColor = RGBColor(0xFF, 0xCB, 0x05);

/// Fraction of each slot covered by its bar.
pub const BAR_WIDTH: f64 = 0.85;

/// Headroom above the tallest bar.
const Y_PADDING: f64 = 1.05;

/// Stacked series, bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Duplex,
    Simplex,
}

impl Series {
    pub const ALL: [Series; 2] = [Series::Duplex, Series::Simplex];

    pub fn name(self) -> &'static str {
        match self {
            Series::Duplex => DUPLEX_COL,
            Series::Simplex => SIMPLEX_COL,
        }
    }

    pub fn color(self) -> RGBColor {
        match self {
            Series::Duplex => DUPLEX_COLOR,
            Series::Simplex => SIMPLEX_COLOR,
        }
    }
}

/// One bar per cleaned row.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedBar {
    pub location: String,
    pub duplex: f64,
    pub simplex: f64,
}

impl StackedBar {
    pub fn total(&self) -> f64 {
        self.duplex + self.simplex
    }
}

/// A filled rectangle in chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSegment {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

/// Bars in row order. Rows sharing a location stay separate.
#[derive(Debug, Clone, Default)]
pub struct ChartData {
    pub bars: Vec<StackedBar>,
}

impl ChartData {
    pub fn from_table(table: &RecordTable) -> PolarsResult<Self> {
        let locations = table.text_values(LOCATION_COL)?;
        let duplex = table.numeric_values(DUPLEX_COL)?;
        let simplex = table.numeric_values(SIMPLEX_COL)?;

        let bars = locations
            .into_iter()
            .zip(duplex)
            .zip(simplex)
            .map(|((location, duplex), simplex)| StackedBar {
                location,
                duplex,
                simplex,
            })
            .collect();

        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// X range with half a slot of margin on each side.
    pub fn x_range(&self) -> std::ops::Range<f64> {
        -0.5..(self.len().max(1) as f64 - 0.5)
    }

    pub fn y_max(&self) -> f64 {
        let tallest = self.bars.iter().map(StackedBar::total).fold(0.0, f64::max);
        if tallest > 0.0 {
            tallest * Y_PADDING
        } else {
            1.0
        }
    }

    /// Rectangles for `series`, centred on each bar's slot.
    pub fn segments(&self, series: Series) -> Vec<BarSegment> {
        let half = BAR_WIDTH / 2.0;
        self.bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let x = i as f64;
                let (y0, y1) = match series {
                    Series::Duplex => (0.0, bar.duplex),
                    Series::Simplex => (bar.duplex, bar.total()),
                };
                BarSegment {
                    x0: x - half,
                    x1: x + half,
                    y0,
                    y1,
                }
            })
            .collect()
    }

    /// Tick label for an x position; only slot centres are labelled.
    pub fn label_at(&self, x: f64) -> Option<&str> {
        let slot = x.round();
        if (x - slot).abs() > 1e-6 || slot < 0.0 {
            return None;
        }
        self.bars
            .get(slot as usize)
            .map(|bar| bar.location.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn bar(location: &str, duplex: f64, simplex: f64) -> StackedBar {
        StackedBar {
            location: location.to_string(),
            duplex,
            simplex,
        }
    }

    #[test]
    fn builds_one_bar_per_row_without_aggregation() {
        let csv = "Duplex Pages,Simplex Pages,Location / Department\n5,10,Lib\n1,2,Lib\n3,4,Hall\n";
        let table = RecordTable::read_csv(Cursor::new(csv.as_bytes().to_vec())).unwrap();
        let data = ChartData::from_table(&table).unwrap();

        assert_eq!(
            data.bars,
            vec![bar("Lib", 5.0, 10.0), bar("Lib", 1.0, 2.0), bar("Hall", 3.0, 4.0)]
        );
    }

    #[test]
    fn simplex_stacks_on_top_of_duplex() {
        let data = ChartData {
            bars: vec![bar("A", 5.0, 10.0), bar("B", 2.0, 0.0)],
        };

        let duplex = data.segments(Series::Duplex);
        let simplex = data.segments(Series::Simplex);

        assert_eq!((duplex[0].y0, duplex[0].y1), (0.0, 5.0));
        assert_eq!((simplex[0].y0, simplex[0].y1), (5.0, 15.0));
        assert_eq!((simplex[1].y0, simplex[1].y1), (2.0, 2.0));
    }

    #[test]
    fn bars_are_centred_with_fixed_width() {
        let data = ChartData {
            bars: vec![bar("A", 1.0, 1.0), bar("B", 1.0, 1.0)],
        };
        for (i, seg) in data.segments(Series::Duplex).iter().enumerate() {
            assert!((seg.x1 - seg.x0 - BAR_WIDTH).abs() < 1e-9);
            assert!(((seg.x0 + seg.x1) / 2.0 - i as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn labels_only_at_slot_centres() {
        let data = ChartData {
            bars: vec![bar("Lib", 1.0, 1.0), bar("Hall", 1.0, 1.0)],
        };
        assert_eq!(data.label_at(0.0), Some("Lib"));
        assert_eq!(data.label_at(1.0), Some("Hall"));
        assert_eq!(data.label_at(0.5), None);
        assert_eq!(data.label_at(2.0), None);
        assert_eq!(data.label_at(-1.0), None);
    }

    #[test]
    fn y_axis_leaves_headroom() {
        let data = ChartData {
            bars: vec![bar("A", 5.0, 15.0), bar("B", 1.0, 1.0)],
        };
        assert!((data.y_max() - 21.0).abs() < 1e-9);
        assert_eq!(ChartData::default().y_max(), 1.0);
        assert!(ChartData::default().is_empty());
        assert!(!data.is_empty());
    }

    #[test]
    fn series_use_fixed_colors() {
        assert_eq!(Series::Duplex.color(), RGBColor(0x00, 0x27, 0x4C));
        assert_eq!(Series::Simplex.color(), RGBColor(0xFF, 0xCB, 0x05));
        assert_eq!(Series::ALL.map(Series::name), [DUPLEX_COL, SIMPLEX_COL]);
    }
}
