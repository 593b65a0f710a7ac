// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Rendering of the averaged contact matrix as a heatmap.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::{
    analysis::matrix::ContactMatrix, errors::PlotError, input::Plot,
    presentation::try_backup_file,
};

use super::colormap::Colormap;

/// Label of the horizontal axis.
const X_LABEL: &str = "Frames";
/// Label of the vertical axis.
const Y_LABEL: &str = "Protein index";
/// Label of the colorbar.
const COLORBAR_LABEL: &str = "Number of proteins in contact";

/// Font used for all text.
const FONT: &str = "sans-serif";
/// Size of the axis labels (in points).
const AXIS_LABEL_SIZE: f64 = 13.0;
/// Size of the tick labels and the colorbar label (in points).
const TICK_LABEL_SIZE: f64 = 10.0;

/// Number of segments the colorbar gradient is drawn with.
const COLORBAR_SEGMENTS: usize = 256;

/// Pseudocolor plot of a contact matrix.
/// Columns (frames) are drawn along the horizontal axis, rows (protein indices)
/// along the vertical axis with the first row at the bottom.
#[derive(Debug, Clone)]
pub struct Heatmap<'a> {
    matrix: &'a ContactMatrix,
    params: &'a Plot,
    colormap: Colormap,
    /// Range of values mapped onto the color scale.
    range: (f64, f64),
}

/// Format tick values, omitting the decimal part for whole numbers.
fn format_tick(value: &f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

impl<'a> Heatmap<'a> {
    /// Prepare a heatmap of the matrix.
    /// The range of the color scale is determined here, once per heatmap.
    pub fn new(matrix: &'a ContactMatrix, params: &'a Plot) -> Self {
        let range = match params.range() {
            Some([min, max]) => (min, max),
            None => matrix.finite_range().unwrap_or((0.0, 1.0)),
        };

        Heatmap {
            matrix,
            params,
            colormap: Colormap::default(),
            range,
        }
    }

    /// Range of values mapped onto the color scale.
    /// Either the user-specified range or the range of finite values of the matrix.
    #[inline(always)]
    pub fn value_range(&self) -> (f64, f64) {
        self.range
    }

    /// Range of the colorbar axis. Degenerate ranges are widened so the axis can be drawn.
    fn axis_range(&self) -> (f64, f64) {
        let (min, max) = self.range;
        if max > min {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        }
    }

    /// Get the color of a cell with the specified value.
    /// Returns `None` for values that should not be drawn.
    pub fn cell_color(&self, value: f64) -> Option<RGBColor> {
        if !value.is_finite() {
            return None;
        }

        let (min, max) = self.range;
        let t = if max > min {
            (value - min) / (max - min)
        } else {
            0.0
        };

        let (r, g, b) = self.colormap.color(t);
        Some(RGBColor(r, g, b))
    }

    /// Render the heatmap into an SVG file using the resolution for vector output.
    pub fn write_svg(&self, filename: impl AsRef<Path>, overwrite: bool) -> Result<(), PlotError> {
        let path = filename.as_ref();
        try_backup_file(path, "svg", overwrite).map_err(PlotError::CouldNotPrepareFile)?;

        let dpi = self.params.svg_dpi();
        let root = SVGBackend::new(path, self.params.pixel_size(dpi)).into_drawing_area();
        self.draw(&root, dpi)
            .and_then(|_| root.present())
            .map_err(|e| PlotError::CouldNotDraw(Box::from(path), e.to_string()))
    }

    /// Render the heatmap into a PNG file using the resolution for raster output.
    pub fn write_png(&self, filename: impl AsRef<Path>, overwrite: bool) -> Result<(), PlotError> {
        let path = filename.as_ref();
        try_backup_file(path, "png", overwrite).map_err(PlotError::CouldNotPrepareFile)?;

        let dpi = self.params.png_dpi();
        let root = BitMapBackend::new(path, self.params.pixel_size(dpi)).into_drawing_area();
        self.draw(&root, dpi)
            .and_then(|_| root.present())
            .map_err(|e| PlotError::CouldNotDraw(Box::from(path), e.to_string()))
    }

    /// Draw the heatmap with its colorbar onto the drawing area.
    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        dpi: u32,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        // points to pixels
        let px = |points: f64| (points * dpi as f64 / 72.0).round().max(1.0) as u32;

        root.fill(&WHITE)?;

        let (width, height) = root.dim_in_pixel();
        let (main_area, colorbar_area) = root.split_horizontally((width as f64 * 0.8) as u32);

        let margin_top = (height as f64 * 0.06) as u32;
        let margin_bottom = (height as f64 * 0.03) as u32;
        let x_label_area = px(TICK_LABEL_SIZE + AXIS_LABEL_SIZE + 12.0);
        let y_label_area = px(2.5 * TICK_LABEL_SIZE + AXIS_LABEL_SIZE + 12.0);

        let n_rows = self.matrix.n_rows();
        let n_cols = self.matrix.n_cols();

        let mut chart = ChartBuilder::on(&main_area)
            .margin_top(margin_top)
            .margin_bottom(margin_bottom)
            .margin_left(px(6.0))
            .margin_right(px(6.0))
            .x_label_area_size(x_label_area)
            .y_label_area_size(y_label_area)
            .build_cartesian_2d(0.0..n_cols as f64, 0.0..n_rows as f64)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(8)
            .y_labels(8)
            .x_label_formatter(&format_tick)
            .y_label_formatter(&format_tick)
            .label_style((FONT, px(TICK_LABEL_SIZE)))
            .axis_desc_style((FONT, px(AXIS_LABEL_SIZE)))
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .draw()?;

        chart.draw_series(self.matrix.rows().enumerate().flat_map(|(i, row)| {
            row.into_iter().enumerate().filter_map(move |(j, value)| {
                self.cell_color(value).map(|color| {
                    Rectangle::new(
                        [(j as f64, i as f64), ((j + 1) as f64, (i + 1) as f64)],
                        color.filled(),
                    )
                })
            })
        }))?;

        self.draw_colorbar(
            &colorbar_area,
            (margin_top, margin_bottom + x_label_area),
            (width as f64 * 0.05) as u32,
            &px,
        )
    }

    /// Draw the colorbar with its label.
    /// The colorbar is vertically aligned with the plotting area of the heatmap.
    fn draw_colorbar<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        (margin_top, margin_bottom): (u32, u32),
        bar_width: u32,
        px: &impl Fn(f64) -> u32,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let (min, max) = self.axis_range();

        let margin_left = px(10.0);
        let label_area = px(2.0 * TICK_LABEL_SIZE + TICK_LABEL_SIZE + 8.0);
        let margin_right = area
            .dim_in_pixel()
            .0
            .saturating_sub(margin_left + bar_width + label_area);

        let mut colorbar = ChartBuilder::on(area)
            .margin_top(margin_top)
            .margin_bottom(margin_bottom)
            .margin_left(margin_left)
            .margin_right(margin_right)
            .right_y_label_area_size(label_area)
            .build_cartesian_2d(0.0..1.0, min..max)?;

        let step = (max - min) / COLORBAR_SEGMENTS as f64;
        colorbar.draw_series((0..COLORBAR_SEGMENTS).filter_map(|k| {
            let low = min + step * k as f64;
            let high = low + step;
            self.cell_color(0.5 * (low + high)).map(|color| {
                Rectangle::new([(0.0, low), (1.0, high)], color.filled())
            })
        }))?;

        colorbar
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(6)
            .label_style((FONT, px(TICK_LABEL_SIZE)))
            .axis_desc_style((FONT, px(TICK_LABEL_SIZE)))
            .y_desc(COLORBAR_LABEL)
            .draw()?;

        Ok(())
    }
}
