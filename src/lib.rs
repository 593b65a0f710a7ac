// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! # protclus_avg: Averaging protein contact matrices from repeated simulations
//!
//! Crate for averaging contact matrices obtained by analyzing protein clustering
//! in several independent repeats of a molecular dynamics simulation.
//! The averaged matrix is rendered as a heatmap (protein index vs. frame)
//! and written in vector (SVG) and raster (PNG) formats.
//!
//! ## Usage
//!
//! Import the crate in your Rust code:
//!
//! ```rust
//! use protclus_avg::prelude::*;
//! ```
//!
//! `protclus-avg` is also available as a command line tool reading a yaml configuration file:
//! ```bash
//! $ protclus-avg config.yaml
//! ```
//!
//! ## Examples
//!
//! Averaging three repeats and writing the heatmaps.
//! ```no_run
//! use protclus_avg::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     // construct the analysis
//!     let averaging = Averaging::new()
//!             .base_path("simulations")                                   // directory containing the repeats
//!             .input_path("PROTCLUS_r1/PROTCLUS_STEP_3/raw_data.xvg")      // first repeat
//!             .input_path("PROTCLUS_r2/PROTCLUS_STEP_3/raw_data.xvg")      // second repeat
//!             .input_path("PROTCLUS_r3/PROTCLUS_STEP_3/raw_data.xvg")      // third repeat
//!             .output_svg("PROTCLUS_avg.svg")                              // vector output
//!             .output_png("PROTCLUS_avg.png")                              // raster output
//!             .build()?;
//!
//!     // activate colog if you want logging (requires the `colog` crate)
//!     colog::init();
//!
//!     // run the analysis and write the output
//!     averaging.run()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ***
//!
//! Input paths may also be glob patterns and the heatmap can be customized.
//!
//! ```no_run
//! use protclus_avg::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let averaging = Averaging::new()
//!             .input_path("PROTCLUS_r*/PROTCLUS_STEP_3/raw_data.xvg")     // all repeats
//!             .output_matrix("PROTCLUS_avg.dat")                           // averaged matrix
//!             .output_std("PROTCLUS_std.dat")                              // standard deviation
//!             .plot(
//!                 Plot::new()
//!                     .figure_size([8.0, 4.0])                             // size in inches
//!                     .svg_dpi(300)                                        // resolution of svg
//!                     .png_dpi(600)                                        // resolution of png
//!                     .range([0.0, 10.0])                                  // range of the colorbar
//!                     .build()?
//!             )
//!             .overwrite()                                                 // do not back up
//!             .build()?;
//!
//!     averaging.run()?;
//!
//!     Ok(())
//! }
//! ```

/// Version of the `protclus_avg` crate.
pub const PROTCLUS_AVG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod analysis;
pub mod errors;
pub mod input;
pub mod presentation;

/// This module contains re-exported public structures of the `protclus_avg` crate.
pub mod prelude {
    pub use super::input::{
        averaging::AveragingBuilder, plot::PlotBuilder, Averaging, Plot,
    };

    pub use super::analysis::{
        matrix::{load_matrices, ContactMatrix},
        reduce::{average, standard_deviation},
    };

    pub use super::presentation::{colormap::Colormap, heatmap::Heatmap};
}
