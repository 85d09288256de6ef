//! Static Chart Renderer
//! Draws one experiment table as an annotated line chart and saves it as PNG.
//!
//! Layout:
//! 1. Two-line bold title centered above the plot
//! 2. Line + markers, x ticks at the tested configurations
//! 3. Every point labelled with its execution time
//! 4. "Best Performance" box in the upper-left corner of the plot area

use crate::charts::style::{ChartStyle, MarkerShape, GRID, WHEAT};
use crate::config::{format_value, FigureSettings};
use crate::data::ExperimentTable;
use crate::stats::ExperimentStats;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to plot")]
    NoData,
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type Chart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn drawing_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `table` (already sorted by key) to `output`.
    ///
    /// A failed render leaves no image behind.
    pub fn render(
        table: &ExperimentTable,
        stats: &ExperimentStats,
        figure: &FigureSettings,
        output: &Path,
    ) -> Result<(), RenderError> {
        if table.rows.is_empty() {
            return Err(RenderError::NoData);
        }

        let result = Self::render_to_file(table, stats, figure, output);
        if result.is_err() && output.exists() {
            let _ = fs::remove_file(output);
        }
        result
    }

    fn render_to_file(
        table: &ExperimentTable,
        stats: &ExperimentStats,
        figure: &FigureSettings,
        output: &Path,
    ) -> Result<(), RenderError> {
        let kind = table.kind;
        let style = ChartStyle::for_kind(kind);
        let (width, height) = figure.pixel_size();

        let root = BitMapBackend::new(output, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let title_h = figure.pt(figure.title_pt * 3.2);
        let (title_area, body) = root.split_vertically(title_h);
        Self::draw_title(&title_area, kind.title(), figure)?;

        let margin = figure.pt(12.0);
        let body = body.margin(0, margin, margin, margin);

        let keys = table.keys();
        let times = table.times();
        let x_range = Self::key_range(&keys);
        let y_range = Self::time_range(&times);
        log::debug!(
            "{} chart {}x{} px, x {:?}, y {:?}",
            kind,
            width,
            height,
            x_range,
            y_range
        );

        let mut chart = ChartBuilder::on(&body)
            .x_label_area_size(figure.pt(48.0))
            .y_label_area_size(figure.pt(60.0))
            .build_cartesian_2d(x_range, y_range.clone())
            .map_err(drawing_error)?;

        let axis_desc_style = ("sans-serif", figure.pt(figure.axis_label_pt))
            .into_font()
            .style(FontStyle::Bold)
            .color(&BLACK);
        let tick_style = ("sans-serif", figure.pt(figure.tick_pt))
            .into_font()
            .color(&BLACK);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(0)
            .y_labels(8)
            .light_line_style(TRANSPARENT)
            .bold_line_style(GRID.mix(0.3))
            .y_label_style(tick_style.clone())
            .y_label_formatter(&|y: &f64| format!("{:.0}", y))
            .x_desc(kind.x_label())
            .y_desc(kind.y_label())
            .axis_desc_style(axis_desc_style)
            .draw()
            .map_err(drawing_error)?;

        // Dashed vertical grid at every tested configuration.
        for &key in &keys {
            chart
                .draw_series(DashedLineSeries::new(
                    vec![(key, y_range.start), (key, y_range.end)],
                    figure.pt(4.0),
                    figure.pt(3.0),
                    GRID.mix(0.6).stroke_width(1),
                ))
                .map_err(drawing_error)?;
        }

        let points: Vec<(f64, f64)> = keys.iter().copied().zip(times.iter().copied()).collect();

        chart
            .draw_series(LineSeries::new(
                points.clone(),
                style.line.stroke_width(figure.pt(2.5)),
            ))
            .map_err(drawing_error)?;

        let radius = figure.pt(5.0) as i32;
        let edge = style.marker_edge.stroke_width(figure.pt(2.0));
        let face = style.marker_face.filled();
        let markers = match style.marker {
            MarkerShape::Circle => chart.draw_series(points.iter().map(|&point| {
                EmptyElement::at(point)
                    + Circle::new((0, 0), radius, face)
                    + Circle::new((0, 0), radius, edge)
            })),
            MarkerShape::Square => chart.draw_series(points.iter().map(|&point| {
                EmptyElement::at(point)
                    + Rectangle::new([(-radius, -radius), (radius, radius)], face)
                    + Rectangle::new([(-radius, -radius), (radius, radius)], edge)
            })),
        };
        markers.map_err(drawing_error)?;

        Self::draw_point_labels(&root, &chart, &points, &style, figure)?;
        Self::draw_x_ticks(&root, &chart, &keys, y_range.start, &tick_style, figure)?;

        let plot_area = chart.plotting_area().get_pixel_range();
        Self::draw_best_box(&root, plot_area, table, stats, figure)?;

        root.present().map_err(drawing_error)?;
        Ok(())
    }

    fn draw_title(
        area: &Area,
        lines: [&str; 2],
        figure: &FigureSettings,
    ) -> Result<(), RenderError> {
        let (w, h) = area.dim_in_pixel();
        let style = ("sans-serif", figure.pt(figure.title_pt))
            .into_font()
            .style(FontStyle::Bold)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));

        let center_x = (w / 2) as i32;
        let line_h = h as i32 / 3;
        for (i, line) in lines.iter().enumerate() {
            area.draw_text(line, &style, (center_x, line_h * (i as i32 + 1)))
                .map_err(drawing_error)?;
        }
        Ok(())
    }

    /// `"<time>s"` in a tinted box just above every point.
    fn draw_point_labels(
        root: &Area,
        chart: &Chart,
        points: &[(f64, f64)],
        style: &ChartStyle,
        figure: &FigureSettings,
    ) -> Result<(), RenderError> {
        let text_style = ("sans-serif", figure.pt(figure.annotation_pt))
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let offset = figure.pt(10.0) as i32;
        let pad = figure.pt(3.0) as i32;
        let fill = style.annotation_box.mix(0.3).filled();

        for &(x, y) in points {
            let label = format!("{}s", format_value(y));
            let (w, h) = root
                .estimate_text_size(&label, &text_style)
                .map_err(drawing_error)?;
            let (half_w, h) = (w as i32 / 2, h as i32);
            let (px, py) = chart.backend_coord(&(x, y));
            let bottom = py - offset;
            let top = bottom - h - 2 * pad;

            root.draw(&Rectangle::new(
                [(px - half_w - pad, top), (px + half_w + pad, bottom)],
                fill,
            ))
            .map_err(drawing_error)?;
            root.draw(&Text::new(label, (px, (top + bottom) / 2), text_style.clone()))
                .map_err(drawing_error)?;
        }
        Ok(())
    }

    /// X tick labels at the tested key values rather than evenly spaced.
    fn draw_x_ticks(
        root: &Area,
        chart: &Chart,
        keys: &[f64],
        y_floor: f64,
        tick_style: &TextStyle,
        figure: &FigureSettings,
    ) -> Result<(), RenderError> {
        let style = tick_style.pos(Pos::new(HPos::Center, VPos::Top));
        let tick_len = figure.pt(4.0) as i32;

        for &key in keys {
            let (px, py) = chart.backend_coord(&(key, y_floor));
            root.draw(&PathElement::new(
                vec![(px, py), (px, py + tick_len)],
                BLACK.stroke_width(1),
            ))
            .map_err(drawing_error)?;
            root.draw(&Text::new(format_value(key), (px, py + 2 * tick_len), style.clone()))
                .map_err(drawing_error)?;
        }
        Ok(())
    }

    fn draw_best_box(
        root: &Area,
        plot_area: (Range<i32>, Range<i32>),
        table: &ExperimentTable,
        stats: &ExperimentStats,
        figure: &FigureSettings,
    ) -> Result<(), RenderError> {
        let lines = Self::best_box_lines(table, stats);
        let style = ("sans-serif", figure.pt(figure.overlay_pt))
            .into_font()
            .color(&BLACK);

        let mut box_w = 0;
        let mut line_h = 0;
        for line in &lines {
            let (w, h) = root.estimate_text_size(line, &style).map_err(drawing_error)?;
            box_w = box_w.max(w as i32);
            line_h = line_h.max(h as i32);
        }

        let (xs, ys) = plot_area;
        let pad = figure.pt(5.0) as i32;
        let step = line_h * 6 / 5;
        let left = xs.start + (xs.end - xs.start) / 50;
        let top = ys.start + (ys.end - ys.start) / 50;
        let corners = [
            (left, top),
            (left + box_w + 2 * pad, top + step * lines.len() as i32 + 2 * pad),
        ];

        root.draw(&Rectangle::new(corners, WHEAT.mix(0.8).filled()))
            .map_err(drawing_error)?;
        root.draw(&Rectangle::new(corners, BLACK.mix(0.4).stroke_width(1)))
            .map_err(drawing_error)?;
        for (i, line) in lines.iter().enumerate() {
            root.draw(&Text::new(
                line.as_str(),
                (left + pad, top + pad + step * i as i32),
                style.clone(),
            ))
            .map_err(drawing_error)?;
        }
        Ok(())
    }

    /// Text of the "Best Performance" overlay.
    pub fn best_box_lines(table: &ExperimentTable, stats: &ExperimentStats) -> Vec<String> {
        vec![
            "Best Performance:".to_string(),
            table.kind.describe_key(stats.best.key),
            format!("{}s", format_value(stats.best.time_seconds)),
            format!("{:.1}% improvement", stats.improvement_pct),
        ]
    }

    /// Whether a font for chart text can be found on this machine.
    pub fn text_rendering_available() -> bool {
        let mut buffer = vec![0u8; 8 * 8 * 3];
        let area = BitMapBackend::with_buffer(&mut buffer, (8, 8)).into_drawing_area();
        let style = ("sans-serif", 12).into_font().color(&BLACK);
        area.estimate_text_size("80s", &style).is_ok()
    }

    fn key_range(keys: &[f64]) -> Range<f64> {
        let (lo, hi) = Self::bounds(keys);
        let span = hi - lo;
        let pad = if span > 0.0 {
            span * 0.05
        } else {
            (lo.abs() * 0.1).max(0.5)
        };
        (lo - pad)..(hi + pad)
    }

    /// Extra headroom above the highest point leaves space for its label.
    fn time_range(times: &[f64]) -> Range<f64> {
        let (lo, hi) = Self::bounds(times);
        let span = hi - lo;
        let unit = if span > 0.0 {
            span
        } else {
            (hi.abs() * 0.1).max(1.0)
        };
        (lo - unit * 0.1)..(hi + unit * 0.2)
    }

    fn bounds(values: &[f64]) -> (f64, f64) {
        values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}
