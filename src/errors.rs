// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! This module contains error types that can be returned by the `protclus_avg` crate.

use std::path::Path;

use colored::{ColoredString, Colorize};
use thiserror::Error;

fn path_to_yellow(path: &Path) -> ColoredString {
    path.to_string_lossy().to_string().yellow()
}

fn shape_to_yellow(shape: &(usize, usize)) -> ColoredString {
    format!("{}x{}", shape.0, shape.1).yellow()
}

/// Errors that can occur when reading and validating the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{} could not open the configuration file '{}'", "error:".red().bold(), .0.yellow())]
    CouldNotOpenConfig(String),

    #[error("{} could not understand the contents of the configuration file '{}' ({})", "error:".red().bold(), .0.yellow(), .1)]
    CouldNotParseConfig(String, serde_yaml::Error),

    #[error("{} no input matrices specified (hint: add '{}' to your configuration file)", "error:".red().bold(), "input_paths".yellow())]
    NoInputs,

    #[error("{} no output file specified (at least one of '{}', '{}', '{}', or '{}' is required)", "error:".red().bold(), "output_svg".yellow(), "output_png".yellow(), "output_matrix".yellow(), "output_std".yellow())]
    NoOutput,

    #[error("{}", .0)]
    InvalidPlot(PlotConfigError),
}

/// Errors that can occur when specifying the parameters of the heatmap.
#[derive(Error, Debug)]
pub enum PlotConfigError {
    #[error("{} invalid figure size '{}' x '{}' inches (both dimensions must be positive)", "error:".red().bold(), .0.to_string().yellow(), .1.to_string().yellow())]
    InvalidFigureSize(f32, f32),

    #[error("{} invalid resolution '{}' dpi (resolution must be positive)", "error:".red().bold(), .0.to_string().yellow())]
    InvalidDpi(u32),

    #[error("{} image of '{}' x '{}' pixels at '{}' dpi is too large (hint: decrease '{}' or the resolution)", "error:".red().bold(), .0.to_string().yellow(), .1.to_string().yellow(), .2.to_string().yellow(), "figure_size".yellow())]
    ImageTooLarge(u64, u64, u32),

    #[error("{} invalid color range: the minimum ('{}') must be lower than the maximum ('{}')", "error:".red().bold(), .0.to_string().yellow(), .1.to_string().yellow())]
    InvalidRange(f64, f64),
}

/// Errors that can occur when reading the input matrices.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("{} file '{}' was not found", "error:".red().bold(), path_to_yellow(.0))]
    FileNotFound(Box<Path>),

    #[error("{} could not read file '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotReadFile(Box<Path>),

    #[error("{} could not parse '{}' as a number (file '{}', line {})", "error:".red().bold(), .token.yellow(), path_to_yellow(.path), .line.to_string().yellow())]
    ParseError {
        path: Box<Path>,
        line: usize,
        token: String,
    },

    #[error("{} line {} of file '{}' contains '{}' values, but the previous lines contain '{}' values", "error:".red().bold(), .line.to_string().yellow(), path_to_yellow(.path), .found.to_string().yellow(), .expected.to_string().yellow())]
    InconsistentRow {
        path: Box<Path>,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{} file '{}' contains no data", "error:".red().bold(), path_to_yellow(.0))]
    EmptyFile(Box<Path>),

    #[error("{} no file matches the pattern '{}'", "error:".red().bold(), .0.yellow())]
    NoMatchingFiles(String),

    #[error("{} '{}' is not a valid file pattern", "error:".red().bold(), .0.yellow())]
    InvalidPattern(String),
}

/// Errors that can occur when reducing the input matrices.
#[derive(Error, Debug)]
pub enum ReduceError {
    #[error("{} no matrices to average", "error:".red().bold())]
    NoMatrices,

    #[error("{} matrix number {} has shape '{}' which does not match the shape of the first matrix ('{}')", "error:".red().bold(), .index.to_string().yellow(), shape_to_yellow(.found), shape_to_yellow(.expected))]
    ShapeMismatch {
        index: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("{} standard deviation requires at least '{}' matrices, but only '{}' provided", "error:".red().bold(), "2".yellow(), .0.to_string().yellow())]
    NotEnoughRepeats(usize),
}

/// Errors that can occur while writing the results.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("{} could not create file '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotCreateFile(Box<Path>),

    #[error("{} could not create a backup for file '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotBackupFile(Box<Path>),

    #[error("{} could not write line into '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotWriteLine(Box<Path>),
}

/// Errors that can occur while rendering the heatmap.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("{}", .0)]
    CouldNotPrepareFile(WriteError),

    #[error("{} could not draw the heatmap into '{}' ({})", "error:".red().bold(), path_to_yellow(.0), .1)]
    CouldNotDraw(Box<Path>, String),
}
