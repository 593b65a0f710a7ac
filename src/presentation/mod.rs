// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! This module contains structures and methods for presenting the results of the averaging.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{analysis::matrix::ContactMatrix, errors::WriteError};

pub mod colormap;
pub mod heatmap;

/// Write a matrix into a text file. Each row of the matrix is written on a separate line.
/// The written file can be read back using `ContactMatrix::from_file`.
pub fn write_matrix(
    filename: impl AsRef<Path>,
    matrix: &ContactMatrix,
    header: &str,
    overwrite: bool,
) -> Result<(), WriteError> {
    let path = filename.as_ref();
    let mut writer = prepare_file(path, "matrix", overwrite)?;

    writeln!(writer, "{}", header)
        .map_err(|_| WriteError::CouldNotWriteLine(Box::from(path)))?;
    writeln!(
        writer,
        "# {} rows (protein index) x {} columns (frames)",
        matrix.n_rows(),
        matrix.n_cols()
    )
    .map_err(|_| WriteError::CouldNotWriteLine(Box::from(path)))?;

    for row in matrix.rows() {
        let line = row
            .iter()
            .map(|value| format!("{:.6}", value))
            .collect::<Vec<String>>()
            .join(" ");

        writeln!(writer, "{}", line)
            .map_err(|_| WriteError::CouldNotWriteLine(Box::from(path)))?;
    }

    writer
        .flush()
        .map_err(|_| WriteError::CouldNotWriteLine(Box::from(path)))?;

    Ok(())
}

/// Back up a file (if needed), create a new one and open it for buffered writing.
fn prepare_file(
    filename: &Path,
    file_type: &str,
    overwrite: bool,
) -> Result<BufWriter<File>, WriteError> {
    try_backup_file(filename, file_type, overwrite)?;
    let file =
        File::create(filename).map_err(|_| WriteError::CouldNotCreateFile(Box::from(filename)))?;

    Ok(BufWriter::new(file))
}

/// Back up an output file, if it is necessary and if it is requested.
pub(crate) fn try_backup_file(
    filename: &Path,
    file_type: &str,
    overwrite: bool,
) -> Result<(), WriteError> {
    if filename.exists() {
        if !overwrite {
            log::warn!(
                "Output {} file '{}' already exists. Backing it up.",
                file_type,
                filename.display()
            );
            backitup::backup(filename)
                .map_err(|_| WriteError::CouldNotBackupFile(Box::from(filename)))?;
        } else {
            log::warn!(
                "Output {} file '{}' already exists. It will be overwritten as requested.",
                file_type,
                filename.display()
            );
        }
    }

    Ok(())
}
