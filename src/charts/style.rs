//! Chart colour schemes and marker shapes for each experiment.

use crate::config::ExperimentKind;
use plotters::style::RGBColor;

pub const WHEAT: RGBColor = RGBColor(245, 222, 179); // Overlay box
pub const YELLOW: RGBColor = RGBColor(255, 255, 0);
pub const LIGHT_BLUE: RGBColor = RGBColor(173, 216, 230);
pub const GRID: RGBColor = RGBColor(176, 176, 176);

/// Point marker drawn on top of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
}

/// Colours for one chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub line: RGBColor,
    pub marker_face: RGBColor,
    pub marker_edge: RGBColor,
    pub marker: MarkerShape,
    /// Background of the per-point time labels
    pub annotation_box: RGBColor,
}

impl ChartStyle {
    pub fn for_kind(kind: ExperimentKind) -> Self {
        match kind {
            ExperimentKind::Reducers => Self {
                line: RGBColor(44, 40, 145),        // #2C2891
                marker_face: RGBColor(230, 57, 70), // #E63946
                marker_edge: RGBColor(44, 40, 145),
                marker: MarkerShape::Circle,
                annotation_box: YELLOW,
            },
            ExperimentKind::Slowstart => Self {
                line: RGBColor(155, 34, 38),         // #9B2226
                marker_face: RGBColor(244, 162, 97), // #F4A261
                marker_edge: RGBColor(155, 34, 38),
                marker: MarkerShape::Square,
                annotation_box: LIGHT_BLUE,
            },
        }
    }
}
