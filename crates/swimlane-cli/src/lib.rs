//! CLI logic for the Swimlane BPMN compiler.
//!
//! This module contains the core CLI logic: read a structural model (or an
//! assistant reply wrapping one), apply an optional edit script, compile it
//! and write the BPMN document.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{LevelFilter, info, warn};

use swimlane::{CompileError, Compiler};

/// Installs the global logger at the level named by `--log-level`.
///
/// Unknown level names fall back to `warn`. Returns the level in effect.
pub fn init_logging(args: &Args) -> LevelFilter {
    let level = args.level_filter().unwrap_or_else(|| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
    level
}

/// Run the Swimlane CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CompileError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed models or edit scripts
/// - Models without pools
pub fn run(args: &Args) -> Result<(), CompileError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing model"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let compiler = Compiler::new(app_config);
    let mut model = if args.reply {
        compiler.parse_reply(&source)?
    } else {
        compiler.parse(&source)?
    };

    if let Some(edits_path) = &args.edits {
        info!(edits_path; "Reading edit script");
        let script = fs::read_to_string(edits_path)?;
        model = compiler.apply_edits(&model, &script)?;
    }

    if let Some(model_path) = &args.save_model {
        let json = model
            .to_json_pretty()
            .map_err(|err| CompileError::Export(err.to_string()))?;
        fs::write(model_path, json)?;
        info!(model_path; "Model saved");
    }

    let compilation = compiler.compile(&model)?;
    if !compilation.diagnostics().is_empty() {
        warn!(
            skipped = compilation.diagnostics().len();
            "Some elements were left out of the document"
        );
    }

    fs::write(&args.output, compilation.xml())?;

    info!(output_file = args.output; "BPMN exported successfully");

    Ok(())
}
