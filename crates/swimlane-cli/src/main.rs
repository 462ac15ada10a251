//! Swimlane CLI entry point.

use std::process;

use clap::Parser;
use log::{debug, error, info};

use swimlane_cli::{Args, error_adapter::to_reportable, init_logging};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    let log_level = init_logging(&args);

    info!(log_level:?; "Starting Swimlane");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = swimlane_cli::run(&args) {
        let mut report = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut report, &to_reportable(&err))
            .expect("Writing to String buffer is infallible");

        error!("Compilation failed\n{report}");
        process::exit(1);
    }

    info!("Completed successfully");
}
