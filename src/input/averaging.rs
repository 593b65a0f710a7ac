// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Contains the implementation of the main `Averaging` structure and its methods.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use getset::{CopyGetters, Getters, Setters};
use serde::Deserialize;

use crate::errors::ConfigError;

use super::Plot;

/// Default name of the output SVG file.
pub(crate) const DEFAULT_OUTPUT_SVG: &str = "PROTCLUS_avg.svg";
/// Default name of the output PNG file.
pub(crate) const DEFAULT_OUTPUT_PNG: &str = "PROTCLUS_avg.png";

/// Structure holding all the information necessary to average the contact matrices.
#[derive(Debug, Clone, Builder, Getters, CopyGetters, Setters, Deserialize)]
#[serde(deny_unknown_fields)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Averaging {
    /// Paths to the files containing the contact matrices obtained for the individual simulation repeats.
    /// Relative paths are interpreted relative to `base_path`.
    /// Glob patterns (e.g., 'PROTCLUS_r*/PROTCLUS_STEP_3/raw_data.xvg') are expanded in alphabetical order.
    #[builder(setter(each(name = "input_path", into)))]
    #[serde(alias = "inputs", alias = "input")]
    #[getset(get = "pub")]
    input_paths: Vec<String>,
    /// Directory against which all relative input and output paths are resolved.
    /// If not specified, the current working directory is used.
    #[builder(setter(into), default = "String::from(\".\")")]
    #[serde(default = "default_base_path", alias = "directory", alias = "workdir")]
    #[getset(get = "pub")]
    base_path: String,
    /// Path to an output SVG file where the heatmap will be written.
    /// The default value is 'PROTCLUS_avg.svg'. Set to `null` to skip writing.
    #[builder(
        setter(into, strip_option),
        default = "Some(String::from(DEFAULT_OUTPUT_SVG))"
    )]
    #[serde(default = "default_output_svg", alias = "svg")]
    #[getset(get = "pub")]
    output_svg: Option<String>,
    /// Path to an output PNG file where the heatmap will be written.
    /// The default value is 'PROTCLUS_avg.png'. Set to `null` to skip writing.
    #[builder(
        setter(into, strip_option),
        default = "Some(String::from(DEFAULT_OUTPUT_PNG))"
    )]
    #[serde(default = "default_output_png", alias = "png")]
    #[getset(get = "pub")]
    output_png: Option<String>,
    /// Path to an output file where the averaged matrix will be written in a text format.
    /// Optional parameter.
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    #[getset(get = "pub")]
    output_matrix: Option<String>,
    /// Path to an output file where the standard deviation of the individual matrix elements will be written.
    /// Requires at least two input matrices. Optional parameter.
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    #[getset(get = "pub")]
    output_std: Option<String>,
    /// Appearance of the heatmap.
    #[builder(default)]
    #[serde(default)]
    #[getset(get = "pub")]
    plot: Plot,
    /// Be silent. Print nothing to the standard output during the analysis.
    #[builder(setter(custom), default = "false")]
    #[serde(default = "default_false")]
    #[getset(get_copy = "pub", set = "pub")]
    silent: bool,
    /// Do not make backups. Overwrite all output files.
    #[builder(setter(custom), default = "false")]
    #[serde(default = "default_false")]
    #[getset(get_copy = "pub", set = "pub")]
    overwrite: bool,
}

fn default_base_path() -> String {
    String::from(".")
}

fn default_output_svg() -> Option<String> {
    Some(String::from(DEFAULT_OUTPUT_SVG))
}

fn default_output_png() -> Option<String> {
    Some(String::from(DEFAULT_OUTPUT_PNG))
}

fn default_false() -> bool {
    false
}

fn validate_inputs(inputs: &[String]) -> Result<(), ConfigError> {
    if inputs.is_empty() {
        Err(ConfigError::NoInputs)
    } else {
        Ok(())
    }
}

fn validate_outputs(outputs: [bool; 4]) -> Result<(), ConfigError> {
    if outputs.iter().all(|&x| !x) {
        Err(ConfigError::NoOutput)
    } else {
        Ok(())
    }
}

impl Averaging {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> AveragingBuilder {
        AveragingBuilder::default()
    }

    /// Read the parameters of the averaging from a yaml configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Averaging, ConfigError> {
        let path_string = path.as_ref().to_string_lossy().to_string();
        let string =
            read_to_string(&path).map_err(|_| ConfigError::CouldNotOpenConfig(path_string.clone()))?;
        let averaging: Averaging = serde_yaml::from_str(&string)
            .map_err(|e| ConfigError::CouldNotParseConfig(path_string, e))?;

        averaging.validate()?;
        Ok(averaging)
    }

    /// Check that the Averaging structure is valid. Used after deserialization from config yaml file.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_inputs(&self.input_paths)?;
        validate_outputs([
            self.output_svg.is_some(),
            self.output_png.is_some(),
            self.output_matrix.is_some(),
            self.output_std.is_some(),
        ])?;

        self.plot.validate().map_err(ConfigError::InvalidPlot)?;

        Ok(())
    }

    /// Resolve a path relative to the base path.
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }

    /// Log basic info about the averaging.
    pub(crate) fn info(&self) {
        log::info!("Base directory: '{}'.", self.base_path);
        log::info!("Input matrices:");
        for input in self.input_paths.iter() {
            log::info!("    '{}'", input);
        }

        self.plot.info();
    }
}

impl AveragingBuilder {
    /// Be silent. Print nothing to the standard output during the analysis.
    #[inline(always)]
    pub fn silent(&mut self) -> &mut Self {
        self.silent = Some(true);
        self
    }

    /// Do not make backups. Overwrite all output files.
    #[inline(always)]
    pub fn overwrite(&mut self) -> &mut Self {
        self.overwrite = Some(true);
        self
    }

    /// Do not write the heatmap in the SVG format.
    #[inline(always)]
    pub fn no_svg(&mut self) -> &mut Self {
        self.output_svg = Some(None);
        self
    }

    /// Do not write the heatmap in the PNG format.
    #[inline(always)]
    pub fn no_png(&mut self) -> &mut Self {
        self.output_png = Some(None);
        self
    }

    /// Validate the process of averaging building.
    fn validate(&self) -> Result<(), String> {
        if let Some(inputs) = &self.input_paths {
            validate_inputs(inputs).map_err(|e| e.to_string())?;
        }

        // unset fields fall back to their default values
        let svg = !matches!(self.output_svg, Some(None));
        let png = !matches!(self.output_png, Some(None));
        let matrix = matches!(self.output_matrix, Some(Some(_)));
        let std = matches!(self.output_std, Some(Some(_)));
        validate_outputs([svg, png, matrix, std]).map_err(|e| e.to_string())?;

        Ok(())
    }
}
