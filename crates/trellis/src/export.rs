//! Export of rendered diagrams.
//!
//! The renderer draws onto any [`DrawingSurface`](crate::surface::DrawingSurface).
//! This module provides the built-in SVG backend, [`SvgSurface`], and
//! helpers for writing the serialized markup to disk.
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`TrellisError::Export`] at the crate boundary.
//!
//! [`TrellisError::Export`]: crate::TrellisError::Export

mod svg;

use std::{fs, path::Path};

use log::{error, info};

pub use svg::SvgSurface;

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// Nothing was rendered, or the surface cannot serialize its content.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

/// Writes exported markup to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`Error::Render`] when `markup` is `None` and [`Error::Io`] when
/// the file cannot be written.
pub fn write_svg(path: impl AsRef<Path>, markup: Option<String>) -> Result<(), Error> {
    let path = path.as_ref();
    let Some(markup) = markup else {
        return Err(Error::Render("no diagram has been rendered".to_string()));
    };

    info!(path = path.display().to_string(); "Writing SVG file");
    fs::write(path, markup).map_err(|err| {
        error!(path = path.display().to_string(), err:err; "Failed to write SVG file");
        Error::Io(err)
    })
}
