// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Contains structures and methods for specifying the appearance of the heatmap.

use derive_builder::Builder;
use getset::CopyGetters;
use serde::Deserialize;

use crate::errors::PlotConfigError;

/// Default size of the figure in inches.
pub(crate) const DEFAULT_FIGURE_SIZE: [f32; 2] = [6.4, 4.8];
/// Default resolution of the vector output.
pub(crate) const DEFAULT_SVG_DPI: u32 = 600;
/// Default resolution of the raster output.
pub(crate) const DEFAULT_PNG_DPI: u32 = 1200;
/// Maximal number of pixels along one side of the image.
pub(crate) const MAX_IMAGE_SIDE: u64 = 32_768;
/// Maximal number of pixels of the image.
pub(crate) const MAX_IMAGE_PIXELS: u64 = 100_000_000;

/// Parameters of the rendered heatmap.
#[derive(Debug, Clone, Builder, CopyGetters, Deserialize)]
#[serde(deny_unknown_fields)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Plot {
    /// Width and height of the figure in inches.
    /// The default value is 6.4 x 4.8 inches.
    #[builder(default = "DEFAULT_FIGURE_SIZE")]
    #[serde(default = "default_figure_size", alias = "size")]
    #[getset(get_copy = "pub")]
    figure_size: [f32; 2],

    /// Resolution of the SVG output (dots per inch).
    /// The default value is 600.
    #[builder(default = "DEFAULT_SVG_DPI")]
    #[serde(default = "default_svg_dpi")]
    #[getset(get_copy = "pub")]
    svg_dpi: u32,

    /// Resolution of the PNG output (dots per inch).
    /// The default value is 1200.
    #[builder(default = "DEFAULT_PNG_DPI")]
    #[serde(default = "default_png_dpi")]
    #[getset(get_copy = "pub")]
    png_dpi: u32,

    /// Range of values covered by the colorbar.
    /// Values outside of the range are drawn using the color of the closest boundary.
    /// If not specified, the range spans from the lowest to the highest value of the matrix.
    #[builder(setter(strip_option), default)]
    #[serde(default)]
    #[getset(get_copy = "pub")]
    range: Option<[f64; 2]>,
}

impl Default for Plot {
    fn default() -> Self {
        Self {
            figure_size: DEFAULT_FIGURE_SIZE,
            svg_dpi: DEFAULT_SVG_DPI,
            png_dpi: DEFAULT_PNG_DPI,
            range: None,
        }
    }
}

fn default_figure_size() -> [f32; 2] {
    DEFAULT_FIGURE_SIZE
}

fn default_svg_dpi() -> u32 {
    DEFAULT_SVG_DPI
}

fn default_png_dpi() -> u32 {
    DEFAULT_PNG_DPI
}

fn validate_figure_size(size: [f32; 2]) -> Result<(), PlotConfigError> {
    // also catches NaN
    if !(size[0] > 0.0 && size[1] > 0.0) {
        Err(PlotConfigError::InvalidFigureSize(size[0], size[1]))
    } else {
        Ok(())
    }
}

fn validate_dpi(dpi: u32) -> Result<(), PlotConfigError> {
    if dpi == 0 {
        Err(PlotConfigError::InvalidDpi(dpi))
    } else {
        Ok(())
    }
}

/// Size of the image in pixels. Computed in f64 so that huge sizes do not saturate.
fn image_size(size: [f32; 2], dpi: u32) -> (u64, u64) {
    let width = (size[0] as f64 * dpi as f64).round().max(1.0);
    let height = (size[1] as f64 * dpi as f64).round().max(1.0);
    (width as u64, height as u64)
}

fn validate_image_size(size: [f32; 2], dpi: u32) -> Result<(), PlotConfigError> {
    let (width, height) = image_size(size, dpi);
    if width > MAX_IMAGE_SIDE
        || height > MAX_IMAGE_SIDE
        || width.saturating_mul(height) > MAX_IMAGE_PIXELS
    {
        Err(PlotConfigError::ImageTooLarge(width, height, dpi))
    } else {
        Ok(())
    }
}

fn validate_range(range: [f64; 2]) -> Result<(), PlotConfigError> {
    if !(range[0] < range[1]) || !range[0].is_finite() || !range[1].is_finite() {
        Err(PlotConfigError::InvalidRange(range[0], range[1]))
    } else {
        Ok(())
    }
}

impl Plot {
    /// Start providing heatmap parameters.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> PlotBuilder {
        PlotBuilder::default()
    }

    /// Check that the Plot is valid. This is used after deserializing the structure from the yaml config file.
    pub(crate) fn validate(&self) -> Result<(), PlotConfigError> {
        validate_figure_size(self.figure_size)?;
        validate_dpi(self.svg_dpi)?;
        validate_dpi(self.png_dpi)?;
        validate_image_size(self.figure_size, self.svg_dpi)?;
        validate_image_size(self.figure_size, self.png_dpi)?;
        if let Some(range) = self.range {
            validate_range(range)?;
        }

        Ok(())
    }

    /// Get the size of the image in pixels for the given resolution.
    /// The size is bounded by `MAX_IMAGE_SIDE` for every validated `Plot`.
    pub(crate) fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        let (width, height) = image_size(self.figure_size, dpi);
        (width as u32, height as u32)
    }

    /// Log basic info about the heatmap.
    pub(crate) fn info(&self) {
        log::info!(
            "Heatmap size: {} x {} inches.",
            self.figure_size[0],
            self.figure_size[1]
        );
        if let Some([min, max]) = self.range {
            log::info!("Colorbar range: {} to {}.", min, max);
        }
    }
}

impl PlotBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(size) = self.figure_size {
            validate_figure_size(size).map_err(|e| e.to_string())?;
        }

        if let Some(dpi) = self.svg_dpi {
            validate_dpi(dpi).map_err(|e| e.to_string())?;
        }

        if let Some(dpi) = self.png_dpi {
            validate_dpi(dpi).map_err(|e| e.to_string())?;
        }

        // unset fields fall back to their default values
        let size = self.figure_size.unwrap_or(DEFAULT_FIGURE_SIZE);
        let svg_dpi = self.svg_dpi.unwrap_or(DEFAULT_SVG_DPI);
        let png_dpi = self.png_dpi.unwrap_or(DEFAULT_PNG_DPI);
        validate_image_size(size, svg_dpi).map_err(|e| e.to_string())?;
        validate_image_size(size, png_dpi).map_err(|e| e.to_string())?;

        if let Some(Some(range)) = self.range {
            validate_range(range).map_err(|e| e.to_string())?;
        }

        Ok(())
    }
}
