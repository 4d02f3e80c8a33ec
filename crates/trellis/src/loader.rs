//! Document loading from memory, disk or HTTP.

use std::{fmt, fs, path::PathBuf};

use log::{debug, info};

use trellis_core::document::DiagramDocument;

use crate::error::TrellisError;

/// Where a diagram document comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagramSource {
    /// An already parsed document.
    Document(DiagramDocument),
    /// JSON text.
    Json(String),
    /// A JSON file on disk.
    Path(PathBuf),
    /// A JSON document fetched with an HTTP GET.
    Url(String),
}

impl DiagramSource {
    /// Interprets `reference` as a URL when it has an `http(s)://` scheme,
    /// and as a file path otherwise.
    pub fn from_reference(reference: &str) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            Self::Url(reference.to_string())
        } else {
            Self::Path(PathBuf::from(reference))
        }
    }

    /// Resolves the source into a document.
    ///
    /// # Errors
    ///
    /// - [`TrellisError::Io`] when a file cannot be read
    /// - [`TrellisError::Transport`] when a request fails or answers non-2xx
    /// - [`TrellisError::Parse`] when the JSON is malformed
    pub fn load(self) -> Result<DiagramDocument, TrellisError> {
        match self {
            Self::Document(document) => Ok(document),
            Self::Json(json) => parse(json),
            Self::Path(path) => {
                debug!(path = path.display().to_string(); "Reading diagram file");
                parse(fs::read_to_string(&path)?)
            }
            Self::Url(url) => {
                info!(url; "Fetching diagram");
                parse(fetch(&url)?)
            }
        }
    }
}

impl From<DiagramDocument> for DiagramSource {
    fn from(document: DiagramDocument) -> Self {
        Self::Document(document)
    }
}

impl fmt::Display for DiagramSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document(_) => f.write_str("<document>"),
            Self::Json(_) => f.write_str("<json>"),
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

fn fetch(url: &str) -> Result<String, TrellisError> {
    let mut response = ureq::get(url)
        .call()
        .map_err(|err| TrellisError::new_transport_error(url, err))?;
    response
        .body_mut()
        .read_to_string()
        .map_err(|err| TrellisError::new_transport_error(url, err))
}

fn parse(json: String) -> Result<DiagramDocument, TrellisError> {
    match DiagramDocument::from_json(&json) {
        Ok(document) => {
            debug!(
                nodes = document.nodes().len(),
                edges = document.edges().len();
                "Diagram parsed"
            );
            Ok(document)
        }
        Err(err) => Err(TrellisError::new_parse_error(err, json)),
    }
}
