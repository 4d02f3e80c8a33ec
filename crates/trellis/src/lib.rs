//! Trellis - Render JSON diagram documents to layered SVG
//!
//! A diagram document lists positioned nodes, the edges between them,
//! optional groups and free-floating annotations. This library resolves node
//! types to shapes and edge types to strokes, computes connection points and
//! routes, and draws the result onto a [`DrawingSurface`](surface::DrawingSurface)
//! in four stacked layers: groups, edges, nodes, labels.
//!
//! [`Renderer`] is the stateful, interactive API (highlighting, events,
//! zoom-to-fit). [`DiagramBuilder`] is the one-shot pipeline the CLI uses.

pub mod config;
pub mod event;
pub mod export;
pub mod layout;
pub mod loader;
pub mod scene;
pub mod surface;

mod error;
mod renderer;

pub use trellis_core::{catalog, color, document, draw, geometry};

pub use error::TrellisError;
pub use event::{DiagramEvent, EventKind};
pub use loader::DiagramSource;
pub use renderer::{
    DiagramInfo, EDGE_CLASS, EDGE_HIGHLIGHT_CLASS, HOVER_STROKE_WIDTH, NODE_CLASS,
    NODE_HIGHLIGHT_CLASS, Renderer, RendererState,
};

use log::{debug, info, trace};

use config::AppConfig;
use document::DiagramDocument;

/// Builder for loading and rendering diagram documents.
///
/// # Examples
///
/// ```rust,no_run
/// use trellis::{DiagramBuilder, config::AppConfig};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // Load from a file path or an http(s) URL
/// let diagram = builder.load("demos/flowchart.json")
///     .expect("Failed to load");
///
/// // Render to SVG
/// let svg = builder.render_svg(&diagram)
///     .expect("Failed to render");
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse JSON text into a diagram document.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Parse`] with the source attached when the JSON
    /// is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis::DiagramBuilder;
    ///
    /// let diagram = DiagramBuilder::default()
    ///     .parse(r#"{"nodes": [{"id": "A", "type": "start"}]}"#)?;
    /// assert_eq!(diagram.nodes().len(), 1);
    /// # Ok::<(), trellis::TrellisError>(())
    /// ```
    pub fn parse(&self, json: &str) -> Result<DiagramDocument, TrellisError> {
        info!("Parsing diagram document");
        let document = DiagramSource::Json(json.to_string()).load()?;
        trace!(document:?; "Parsed document");
        Ok(document)
    }

    /// Load a document from a file path or an `http(s)://` URL.
    ///
    /// # Errors
    ///
    /// Returns `TrellisError` for read, transport or parse failures.
    pub fn load(&self, reference: &str) -> Result<DiagramDocument, TrellisError> {
        DiagramSource::from_reference(reference).load()
    }

    /// Render a document to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Config`] for invalid configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis::DiagramBuilder;
    ///
    /// let builder = DiagramBuilder::default();
    /// let diagram = builder.parse(r#"{"nodes": [{"id": "A", "type": "page"}]}"#)?;
    /// let svg = builder.render_svg(&diagram)?;
    /// assert!(svg.contains("wf-diagram-node--page"));
    /// # Ok::<(), trellis::TrellisError>(())
    /// ```
    pub fn render_svg(&self, diagram: &DiagramDocument) -> Result<String, TrellisError> {
        info!(title = diagram.title().unwrap_or_default(); "Rendering diagram");
        let mut renderer = Renderer::from_config(&self.config)?;
        renderer.load(diagram.clone())?.render();

        let svg = renderer.export_svg().ok_or_else(|| {
            export::Error::Render("surface produced no markup".to_string())
        })?;
        debug!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}
