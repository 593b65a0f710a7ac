// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Functions used in various integration tests.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use approx::assert_relative_eq;

/// Test utility. Diff the contents of two files without the first `skip` lines.
#[allow(dead_code)]
pub(super) fn diff_files_ignore_first(
    file1: impl AsRef<Path>,
    file2: impl AsRef<Path>,
    skip: usize,
) -> bool {
    let content1 = read_file_without_first_lines(file1, skip);
    let content2 = read_file_without_first_lines(file2, skip);
    content1 == content2
}

fn read_file_without_first_lines(file: impl AsRef<Path>, skip: usize) -> Vec<String> {
    let reader = BufReader::new(File::open(file).unwrap());
    reader
        .lines()
        .skip(skip)
        .map(|line| line.unwrap())
        .collect()
}

/// Test utility. Assert that the data lines of a matrix file match the expected values.
#[allow(dead_code)]
pub(super) fn assert_matrix_file(file: impl AsRef<Path>, expected: &[Vec<f64>]) {
    let reader = BufReader::new(File::open(file).unwrap());
    let rows: Vec<Vec<f64>> = reader
        .lines()
        .map(|line| line.unwrap())
        .filter(|line| !line.starts_with('#'))
        .map(|line| {
            line.split_whitespace()
                .map(|value| value.parse::<f64>().unwrap())
                .collect()
        })
        .collect();

    assert_eq!(rows.len(), expected.len(), "Number of rows differs");
    for (row, expected_row) in rows.iter().zip(expected) {
        assert_eq!(row.len(), expected_row.len(), "Number of columns differs");
        for (value, expected_value) in row.iter().zip(expected_row) {
            assert_relative_eq!(*value, *expected_value, epsilon = 1e-6);
        }
    }
}

/// Test utility. Write a matrix into a text file, one row per line.
#[allow(dead_code)]
pub(super) fn write_matrix_file(file: impl AsRef<Path>, rows: &[Vec<f64>]) {
    let content = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|value| value.to_string())
                .collect::<Vec<String>>()
                .join(" ")
        })
        .collect::<Vec<String>>()
        .join("\n");

    if let Some(parent) = file.as_ref().parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(file, content + "\n").unwrap();
}
