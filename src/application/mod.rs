// Released under MIT License.
// Copyright (c) 2024 Ladislav Bartos

//! This module contains the implementation of the `protclus-avg` binary.

use clap::Parser;
use colored::Colorize;
use protclus_avg::{prelude::Averaging, PROTCLUS_AVG_VERSION};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Average protein contact matrices obtained from multiple simulation repeats and plot the result as a heatmap."
)]
pub struct Args {
    #[arg(
        help = "Config yaml file",
        long_help = "Configuration yaml file specifying the input matrices and the outputs."
    )]
    pub config: String,

    #[arg(
        long = "silent",
        help = "Print nothing to the standard output",
        default_value_t = false
    )]
    pub silent: bool,

    #[arg(
        long = "overwrite",
        help = "Do not back up existing output files",
        default_value_t = false
    )]
    pub overwrite: bool,
}

fn print_result(success: bool) {
    let (symbol, message) = if success {
        (
            "✔".to_string().bright_green().bold(),
            "AVERAGING COMPLETED".to_string().bright_green().bold(),
        )
    } else {
        (
            "✖".to_string().red().bold(),
            "AVERAGING FAILED".to_string().red().bold(),
        )
    };

    let prefix = format!(
        "{}{}{}",
        "[".to_string().blue().bold(),
        symbol,
        "]".to_string().blue().bold()
    );
    println!("{} {}", prefix, message);
}

pub(crate) fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let mut averaging = match Averaging::from_file(&args.config) {
        Ok(x) => x,
        Err(e) => {
            // logger is not yet initialized
            colog::basic_builder()
                .filter(None, log::LevelFilter::Error)
                .init();
            log::error!("{}", e);
            return Err(Box::from(e));
        }
    };

    if args.silent {
        averaging.set_silent(true);
    }

    if args.overwrite {
        averaging.set_overwrite(true);
    }

    if averaging.silent() {
        colog::basic_builder()
            .filter(None, log::LevelFilter::Error)
            .init();
    } else {
        colog::init();
        let header = format!(">>> PROTCLUS-AVG v{} <<<", PROTCLUS_AVG_VERSION).bold();
        println!("\n{}\n", header);
        log::info!("Read config file '{}'.", args.config);
    }

    let result = averaging.run();

    if let Err(e) = &result {
        log::error!("{}", e);
    }

    if !averaging.silent() {
        print_result(result.is_ok());
    }

    result
}
