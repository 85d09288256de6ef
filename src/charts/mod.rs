//! Charts module - Chart rendering

mod renderer;
mod style;

pub use renderer::StaticChartRenderer;
