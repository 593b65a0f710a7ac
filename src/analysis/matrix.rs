// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Contains the implementation of the `ContactMatrix` structure and the reading of input files.

use std::io::ErrorKind;
use std::ops::Index;
use std::path::{Path, PathBuf};

use nalgebra::DMatrix;

use crate::errors::ReadError;

/// Matrix of contacts between proteins obtained for a single simulation repeat
/// (or averaged over several repeats).
/// Rows correspond to protein indices, columns correspond to trajectory frames.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMatrix(DMatrix<f64>);

impl ContactMatrix {
    /// Construct a matrix from a list of rows.
    /// Returns `None` if there are no rows, the rows are empty, or the rows have different lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<ContactMatrix> {
        let n_cols = rows.first()?.len();
        if n_cols == 0 || rows.iter().any(|row| row.len() != n_cols) {
            return None;
        }

        Some(ContactMatrix(DMatrix::from_fn(rows.len(), n_cols, |i, j| {
            rows[i][j]
        })))
    }

    /// Read a matrix from a text file containing whitespace-separated values.
    ///
    /// Each non-empty line corresponds to one row of the matrix.
    /// Lines starting with '#' or '@' (xvg comments and metadata) are ignored,
    /// as is anything following a '#' on a data line.
    pub fn from_file(path: impl AsRef<Path>) -> Result<ContactMatrix, ReadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ReadError::FileNotFound(Box::from(path)),
            _ => ReadError::CouldNotReadFile(Box::from(path)),
        })?;

        Self::parse(&content, path)
    }

    /// Parse the contents of a matrix file. `path` is only used for error reporting.
    pub fn parse(content: &str, path: &Path) -> Result<ContactMatrix, ReadError> {
        let mut values = Vec::new();
        let mut n_rows = 0;
        let mut n_cols = None;

        for (number, line) in content.lines().enumerate() {
            let data = line.split('#').next().unwrap_or("").trim();
            if data.is_empty() || data.starts_with('@') {
                continue;
            }

            let row = data
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|_| ReadError::ParseError {
                        path: Box::from(path),
                        line: number + 1,
                        token: token.to_owned(),
                    })
                })
                .collect::<Result<Vec<f64>, ReadError>>()?;

            match n_cols {
                None => n_cols = Some(row.len()),
                Some(expected) if expected != row.len() => {
                    return Err(ReadError::InconsistentRow {
                        path: Box::from(path),
                        line: number + 1,
                        expected,
                        found: row.len(),
                    })
                }
                Some(_) => (),
            }

            values.extend(row);
            n_rows += 1;
        }

        match n_cols {
            Some(n_cols) => Ok(ContactMatrix(DMatrix::from_row_slice(
                n_rows, n_cols, &values,
            ))),
            None => Err(ReadError::EmptyFile(Box::from(path))),
        }
    }

    /// Number of rows (protein indices) of the matrix.
    #[inline(always)]
    pub fn n_rows(&self) -> usize {
        self.0.nrows()
    }

    /// Number of columns (frames) of the matrix.
    #[inline(always)]
    pub fn n_cols(&self) -> usize {
        self.0.ncols()
    }

    /// Shape of the matrix as (rows, columns).
    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        self.0.shape()
    }

    /// Get the value at the specified row and column.
    /// Returns `None` if the position is out of bounds.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.0.get((row, col)).copied()
    }

    /// Get the underlying `nalgebra` matrix.
    #[inline(always)]
    pub fn data(&self) -> &DMatrix<f64> {
        &self.0
    }

    /// Iterate over the rows of the matrix.
    pub fn rows(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        self.0
            .row_iter()
            .map(|row| row.iter().copied().collect::<Vec<f64>>())
    }

    /// Get the lowest and the highest finite value of the matrix.
    /// Returns `None` if the matrix contains no finite value.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.0
            .iter()
            .copied()
            .filter(|x| x.is_finite())
            .fold(None, |acc, x| match acc {
                None => Some((x, x)),
                Some((min, max)) => Some((min.min(x), max.max(x))),
            })
    }
}

impl From<DMatrix<f64>> for ContactMatrix {
    #[inline(always)]
    fn from(value: DMatrix<f64>) -> Self {
        ContactMatrix(value)
    }
}

impl Index<(usize, usize)> for ContactMatrix {
    type Output = f64;

    #[inline(always)]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.0[index]
    }
}

/// Check whether the provided path should be treated as a glob pattern.
#[inline(always)]
fn is_pattern(path: &str) -> bool {
    path.contains(['*', '?', '['])
}

/// Resolve an input path against the base directory.
/// Glob patterns are expanded into all matching files (in alphabetical order).
fn expand_path(base_path: &Path, input: &str) -> Result<Vec<PathBuf>, ReadError> {
    if !is_pattern(input) {
        return Ok(vec![base_path.join(input)]);
    }

    let pattern = if Path::new(input).is_absolute() {
        input.to_owned()
    } else {
        let escaped_base = glob::Pattern::escape(&base_path.to_string_lossy());
        Path::new(&escaped_base)
            .join(input)
            .to_string_lossy()
            .to_string()
    };

    let entries =
        glob::glob(&pattern).map_err(|_| ReadError::InvalidPattern(input.to_owned()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| ReadError::CouldNotReadFile(Box::from(e.path())))?;
        if path.is_file() {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(ReadError::NoMatchingFiles(input.to_owned()));
    }

    Ok(paths)
}

/// Read all input matrices. Relative paths are resolved against `base_path`.
/// Reading stops at the first file that can not be read.
pub fn load_matrices(
    base_path: impl AsRef<Path>,
    input_paths: &[String],
) -> Result<Vec<(PathBuf, ContactMatrix)>, ReadError> {
    let mut matrices = Vec::new();

    for input in input_paths {
        for path in expand_path(base_path.as_ref(), input)? {
            log::info!("Reading contact matrix from '{}'...", path.display());
            let matrix = ContactMatrix::from_file(&path)?;
            log::info!(
                "Read a matrix of {} rows (proteins) and {} columns (frames).",
                matrix.n_rows(),
                matrix.n_cols()
            );
            matrices.push((path, matrix));
        }
    }

    Ok(matrices)
}
