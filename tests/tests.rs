// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! Integration tests for the `protclus-avg` library.

mod common;

use std::{fs, path::Path};

use protclus_avg::{
    errors::{ReadError, ReduceError},
    prelude::*,
};
use tempfile::TempDir;

const INPUTS: [&str; 3] = [
    "PROTCLUS_r1/PROTCLUS_STEP_3/raw_data.xvg",
    "PROTCLUS_r2/PROTCLUS_STEP_3/raw_data.xvg",
    "PROTCLUS_r3/PROTCLUS_STEP_3/raw_data.xvg",
];

fn small_plot() -> Plot {
    Plot::new()
        .figure_size([3.0, 2.0])
        .svg_dpi(60)
        .png_dpi(40)
        .build()
        .unwrap()
}

/// Write the matrices of the individual repeats into the standard directory structure.
fn prepare_repeats(directory: &Path, matrices: &[Vec<Vec<f64>>]) {
    for (i, matrix) in matrices.iter().enumerate() {
        let path = directory.join(format!("PROTCLUS_r{}/PROTCLUS_STEP_3/raw_data.xvg", i + 1));
        common::write_matrix_file(path, matrix);
    }
}

fn count_files(directory: &Path) -> usize {
    fs::read_dir(directory)
        .unwrap()
        .filter(|entry| entry.as_ref().unwrap().path().is_file())
        .count()
}

#[test]
fn test_average_basic() {
    let output = TempDir::new().unwrap();
    let path_to_output = output.path().join("average.dat");

    let averaging = Averaging::new()
        .base_path("tests/files")
        .input_paths(INPUTS.iter().map(|x| x.to_string()).collect::<Vec<String>>())
        .output_matrix(path_to_output.to_str().unwrap())
        .no_svg()
        .no_png()
        .silent()
        .overwrite()
        .build()
        .unwrap();

    averaging.run().unwrap();

    // skip the header listing the input files
    assert!(common::diff_files_ignore_first(
        &path_to_output,
        "tests/files/PROTCLUS_avg.dat",
        5
    ));
}

#[test]
fn test_average_pattern() {
    let output = TempDir::new().unwrap();
    let path_to_output = output.path().join("average.dat");

    let averaging = Averaging::new()
        .base_path("tests/files")
        .input_path("PROTCLUS_r*/PROTCLUS_STEP_3/raw_data.xvg")
        .output_matrix(path_to_output.to_str().unwrap())
        .no_svg()
        .no_png()
        .silent()
        .overwrite()
        .build()
        .unwrap();

    averaging.run().unwrap();

    let content = fs::read_to_string(&path_to_output).unwrap();
    let header: Vec<&str> = content.lines().take(5).collect();
    assert_eq!(header[0], "# Averaged contact matrix.");
    assert!(header[1].ends_with("from 3 matrices:"));
    assert!(header[2].ends_with("PROTCLUS_r1/PROTCLUS_STEP_3/raw_data.xvg"));
    assert!(header[3].ends_with("PROTCLUS_r2/PROTCLUS_STEP_3/raw_data.xvg"));
    assert!(header[4].ends_with("PROTCLUS_r3/PROTCLUS_STEP_3/raw_data.xvg"));

    assert!(common::diff_files_ignore_first(
        &path_to_output,
        "tests/files/PROTCLUS_avg.dat",
        5
    ));
}

#[test]
fn test_average_std() {
    let output = TempDir::new().unwrap();
    let path_to_average = output.path().join("average.dat");
    let path_to_std = output.path().join("std.dat");

    let averaging = Averaging::new()
        .base_path("tests/files")
        .input_paths(INPUTS.iter().map(|x| x.to_string()).collect::<Vec<String>>())
        .output_matrix(path_to_average.to_str().unwrap())
        .output_std(path_to_std.to_str().unwrap())
        .no_svg()
        .no_png()
        .silent()
        .build()
        .unwrap();

    averaging.run().unwrap();

    common::assert_matrix_file(
        &path_to_std,
        &[
            vec![1.0, 0.0, 1.0, 0.0, 1.0],
            vec![1.0, 0.0, 1.0, 0.0, 0.0],
            vec![1.0, 0.0, 1.0, 0.0, 1.0],
            vec![0.0, 1.0, 0.0, 1.0, 0.0],
        ],
    );

    let content = fs::read_to_string(&path_to_std).unwrap();
    assert!(content.starts_with("# Standard deviation of the contact matrices."));
}

#[test]
fn test_average_std_single_repeat_fails() {
    let output = TempDir::new().unwrap();

    let averaging = Averaging::new()
        .base_path("tests/files")
        .input_path(INPUTS[0])
        .output_std(output.path().join("std.dat").to_str().unwrap())
        .no_svg()
        .no_png()
        .silent()
        .build()
        .unwrap();

    match averaging.run() {
        Ok(_) => panic!("Should have failed, but succeeded."),
        Err(e) => match e.downcast_ref::<ReduceError>() {
            Some(ReduceError::NotEnoughRepeats(1)) => (),
            _ => panic!("Incorrect error type returned: {}", e),
        },
    }

    assert_eq!(count_files(output.path()), 0);
}

#[test]
fn test_average_full_run_in_base_path() {
    let directory = TempDir::new().unwrap();
    prepare_repeats(
        directory.path(),
        &[
            vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            vec![vec![3.0, 4.0], vec![5.0, 6.0]],
            vec![vec![5.0, 6.0], vec![7.0, 8.0]],
        ],
    );

    let averaging = Averaging::new()
        .base_path(directory.path().to_str().unwrap())
        .input_paths(INPUTS.iter().map(|x| x.to_string()).collect::<Vec<String>>())
        .output_matrix("PROTCLUS_avg.dat")
        .plot(small_plot())
        .silent()
        .build()
        .unwrap();

    averaging.run().unwrap();

    // outputs are written into the base directory
    let svg = fs::read_to_string(directory.path().join("PROTCLUS_avg.svg")).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Frames"));
    assert!(svg.contains("Protein index"));
    assert!(svg.contains("Number of proteins in contact"));

    let png = fs::read(directory.path().join("PROTCLUS_avg.png")).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    common::assert_matrix_file(
        directory.path().join("PROTCLUS_avg.dat"),
        &[vec![3.0, 4.0], vec![5.0, 6.0]],
    );

    assert_eq!(count_files(directory.path()), 3);
}

#[test]
fn test_average_fail_shape_mismatch() {
    let output = TempDir::new().unwrap();

    let averaging = Averaging::new()
        .base_path("tests/files")
        .input_path(INPUTS[0])
        .input_path(INPUTS[1])
        .input_path("mismatch/raw_data.xvg")
        .output_svg(output.path().join("heatmap.svg").to_str().unwrap())
        .output_png(output.path().join("heatmap.png").to_str().unwrap())
        .output_matrix(output.path().join("average.dat").to_str().unwrap())
        .silent()
        .build()
        .unwrap();

    match averaging.run() {
        Ok(_) => panic!("Should have failed, but succeeded."),
        Err(e) => match e.downcast_ref::<ReduceError>() {
            Some(ReduceError::ShapeMismatch {
                index,
                expected,
                found,
            }) => {
                assert_eq!(*index, 3);
                assert_eq!(*expected, (4, 5));
                assert_eq!(*found, (4, 4));
            }
            _ => panic!("Incorrect error type returned: {}", e),
        },
    }

    assert_eq!(count_files(output.path()), 0);
}

#[test]
fn test_average_fail_missing_file() {
    let output = TempDir::new().unwrap();

    let averaging = Averaging::new()
        .base_path("tests/files")
        .input_path(INPUTS[0])
        .input_path("PROTCLUS_r4/PROTCLUS_STEP_3/raw_data.xvg")
        .output_svg(output.path().join("heatmap.svg").to_str().unwrap())
        .no_png()
        .silent()
        .build()
        .unwrap();

    match averaging.run() {
        Ok(_) => panic!("Should have failed, but succeeded."),
        Err(e) => match e.downcast_ref::<ReadError>() {
            Some(ReadError::FileNotFound(path)) => assert_eq!(
                path.to_path_buf(),
                Path::new("tests/files/PROTCLUS_r4/PROTCLUS_STEP_3/raw_data.xvg")
            ),
            _ => panic!("Incorrect error type returned: {}", e),
        },
    }

    assert_eq!(count_files(output.path()), 0);
}

#[test]
fn test_average_fail_parse() {
    let directory = TempDir::new().unwrap();
    prepare_repeats(directory.path(), &[vec![vec![1.0, 2.0]]]);
    fs::create_dir_all(directory.path().join("PROTCLUS_r2/PROTCLUS_STEP_3")).unwrap();
    fs::write(
        directory.path().join("PROTCLUS_r2/PROTCLUS_STEP_3/raw_data.xvg"),
        "1.0 two\n",
    )
    .unwrap();

    let averaging = Averaging::new()
        .base_path(directory.path().to_str().unwrap())
        .input_path(INPUTS[0])
        .input_path(INPUTS[1])
        .output_matrix("average.dat")
        .no_svg()
        .no_png()
        .silent()
        .build()
        .unwrap();

    match averaging.run() {
        Ok(_) => panic!("Should have failed, but succeeded."),
        Err(e) => match e.downcast_ref::<ReadError>() {
            Some(ReadError::ParseError { line, token, .. }) => {
                assert_eq!(*line, 1);
                assert_eq!(token, "two");
            }
            _ => panic!("Incorrect error type returned: {}", e),
        },
    }

    assert!(!directory.path().join("average.dat").exists());
}

#[test]
fn test_average_backup() {
    let output = TempDir::new().unwrap();
    let path_to_output = output.path().join("average.dat");

    let averaging = Averaging::new()
        .base_path("tests/files")
        .input_paths(INPUTS.iter().map(|x| x.to_string()).collect::<Vec<String>>())
        .output_matrix(path_to_output.to_str().unwrap())
        .no_svg()
        .no_png()
        .silent()
        .build()
        .unwrap();

    averaging.run().unwrap();
    averaging.run().unwrap();

    assert_eq!(count_files(output.path()), 2);

    for entry in fs::read_dir(output.path()).unwrap() {
        assert!(common::diff_files_ignore_first(
            entry.unwrap().path(),
            "tests/files/PROTCLUS_avg.dat",
            5
        ));
    }
}

#[test]
fn test_average_overwrite_is_idempotent() {
    let output = TempDir::new().unwrap();
    let path_to_output = output.path().join("average.dat");

    let averaging = Averaging::new()
        .base_path("tests/files")
        .input_paths(INPUTS.iter().map(|x| x.to_string()).collect::<Vec<String>>())
        .output_matrix(path_to_output.to_str().unwrap())
        .no_svg()
        .no_png()
        .silent()
        .overwrite()
        .build()
        .unwrap();

    averaging.run().unwrap();
    let first = fs::read_to_string(&path_to_output).unwrap();

    averaging.run().unwrap();
    let second = fs::read_to_string(&path_to_output).unwrap();

    assert_eq!(first, second);
    assert_eq!(count_files(output.path()), 1);
}

#[test]
fn test_average_from_yaml() {
    let directory = TempDir::new().unwrap();
    prepare_repeats(
        directory.path(),
        &[
            vec![vec![0.0, 1.0, 2.0]],
            vec![vec![2.0, 1.0, 0.0]],
        ],
    );

    let config = directory.path().join("config.yaml");
    fs::write(
        &config,
        format!(
            "input_paths: [\"PROTCLUS_r*/PROTCLUS_STEP_3/raw_data.xvg\"]\n\
             base_path: {}\n\
             output_svg: null\n\
             output_png: null\n\
             output_matrix: PROTCLUS_avg.dat\n\
             silent: true\n",
            directory.path().display()
        ),
    )
    .unwrap();

    let averaging = Averaging::from_file(&config).unwrap();
    averaging.run().unwrap();

    common::assert_matrix_file(
        directory.path().join("PROTCLUS_avg.dat"),
        &[vec![1.0, 1.0, 1.0]],
    );
}

#[test]
fn test_load_and_average_bit_identical() {
    let inputs: Vec<String> = INPUTS.iter().map(|x| x.to_string()).collect();

    let first: Vec<ContactMatrix> = load_matrices("tests/files", &inputs)
        .unwrap()
        .into_iter()
        .map(|(_, matrix)| matrix)
        .collect();
    let second: Vec<ContactMatrix> = load_matrices("tests/files", &inputs)
        .unwrap()
        .into_iter()
        .map(|(_, matrix)| matrix)
        .collect();

    let averaged_first = average(&first).unwrap();
    let averaged_second = average(&second).unwrap();

    assert_eq!(averaged_first.shape(), (4, 5));
    assert_eq!(averaged_first.shape(), averaged_second.shape());
    for (a, b) in averaged_first
        .data()
        .iter()
        .zip(averaged_second.data().iter())
    {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
