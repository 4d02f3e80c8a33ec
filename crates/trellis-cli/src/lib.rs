//! CLI logic for the Trellis diagram renderer.
//!
//! This module contains the core CLI logic: resolve configuration, load the
//! document, render it and write the SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::{debug, info};

use trellis::{DiagramSource, Renderer, TrellisError, export};

/// Run the Trellis CLI application
///
/// This function loads the input document, renders it with the resolved
/// configuration and writes the resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - File I/O and HTTP errors
/// - Configuration loading errors
/// - JSON parsing errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), TrellisError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;
    let mut renderer = Renderer::from_config(&app_config)?;

    renderer
        .load(DiagramSource::from_reference(&args.input))?
        .render();

    if let Some(info) = renderer.info().filter(|_| args.info) {
        let json = serde_json::to_string_pretty(&info)
            .map_err(|err| TrellisError::Export(Box::new(err)))?;
        println!("{json}");
    }

    if !args.highlight.is_empty() {
        debug!(nodes:? = args.highlight; "Highlighting path");
        renderer.highlight_path(&args.highlight, true);
    }

    export::write_svg(&args.output, renderer.export_svg())?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
