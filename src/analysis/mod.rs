// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! This module contains the implementation of the averaging logic.

use std::path::PathBuf;

use crate::{
    input::Averaging,
    presentation::{self, heatmap::Heatmap},
    PROTCLUS_AVG_VERSION,
};

pub mod matrix;
pub mod reduce;

impl Averaging {
    /// Average the input matrices and write out the results.
    ///
    /// All input matrices are read and reduced before anything is written,
    /// so a failure leaves no partial output behind.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.info();

        let (paths, matrices): (Vec<PathBuf>, Vec<_>) =
            matrix::load_matrices(self.base_path(), self.input_paths())?
                .into_iter()
                .unzip();

        log::info!("Averaging {} contact matrices...", matrices.len());
        let averaged = reduce::average(&matrices)?;

        let deviation = match self.output_std() {
            Some(_) => Some(reduce::standard_deviation(&matrices)?),
            None => None,
        };

        // input matrices are no longer needed
        drop(matrices);

        let header = Self::header(&paths);

        if let Some(output) = self.output_matrix() {
            let path = self.resolve(output);
            log::info!("Writing the averaged matrix into '{}'...", path.display());
            presentation::write_matrix(
                &path,
                &averaged,
                &format!("# Averaged contact matrix.\n{}", header),
                self.overwrite(),
            )?;
        }

        if let (Some(output), Some(deviation)) = (self.output_std(), &deviation) {
            let path = self.resolve(output);
            log::info!(
                "Writing the standard deviation matrix into '{}'...",
                path.display()
            );
            presentation::write_matrix(
                &path,
                deviation,
                &format!("# Standard deviation of the contact matrices.\n{}", header),
                self.overwrite(),
            )?;
        }

        let heatmap = Heatmap::new(&averaged, self.plot());

        if let Some(output) = self.output_svg() {
            let path = self.resolve(output);
            log::info!("Writing heatmap into '{}'...", path.display());
            heatmap.write_svg(&path, self.overwrite())?;
        }

        if let Some(output) = self.output_png() {
            let path = self.resolve(output);
            log::info!("Writing heatmap into '{}'...", path.display());
            heatmap.write_png(&path, self.overwrite())?;
        }

        Ok(())
    }

    /// Construct a header for the output matrix files listing the input files.
    fn header(paths: &[PathBuf]) -> String {
        let mut header = format!(
            "# Calculated with 'protclus-avg v{}' from {} matrices:",
            PROTCLUS_AVG_VERSION,
            paths.len()
        );

        for path in paths {
            header.push_str(&format!("\n#   {}", path.display()));
        }

        header
    }
}
