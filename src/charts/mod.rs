//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::ChartData;
pub use renderer::StaticChartRenderer;
