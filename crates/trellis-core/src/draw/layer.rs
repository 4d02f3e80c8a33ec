//! Z-ordered layers of a rendered diagram.
//!
//! Every top-level element of a scene belongs to one [`RenderLayer`]. The
//! layer order is part of the rendering contract: group boxes sit under edges,
//! edges under nodes, and labels above everything else. [`LayeredOutput`]
//! collects SVG nodes in any order and emits them grouped per layer, bottom
//! layer first.
//!
//! ```
//! # use trellis_core::draw::{LayeredOutput, RenderLayer};
//! # use svg::node::element::{Path, Rectangle};
//! let mut output = LayeredOutput::new();
//!
//! // Created out of order on purpose.
//! output.add_to_layer(RenderLayer::Nodes, Box::new(Rectangle::new()));
//! output.add_to_layer(RenderLayer::Edges, Box::new(Path::new()));
//!
//! let layers = output.render();
//! assert_eq!(layers.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Group bounding boxes and their labels.
    Groups,
    /// Edge paths and cardinality marks.
    Edges,
    /// Node shapes and node text.
    Nodes,
    /// Edge labels and annotations.
    Labels,
}

impl RenderLayer {
    /// All layers, bottom first.
    pub const ALL: [RenderLayer; 4] = [Self::Groups, Self::Edges, Self::Nodes, Self::Labels];

    /// Class name of the layer's SVG group.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Groups => "diagram-groups",
            Self::Edges => "diagram-edges",
            Self::Nodes => "diagram-nodes",
            Self::Labels => "diagram-labels",
        }
    }
}

/// SVG nodes tagged with the layer they belong to.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to `layer`. Nodes keep insertion order within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Moves every node of `other` into this output.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the output and returns one `<g>` per non-empty layer.
    ///
    /// Each group carries the layer name as its `class` and a `data-layer`
    /// attribute. Groups are returned bottom layer first.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable: document order survives within a layer.
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = layer_group(current_layer);

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);
                current_layer = layer;
                current_group = layer_group(layer);
            }
            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);
        result
    }
}

fn layer_group(layer: RenderLayer) -> svg_element::Group {
    svg_element::Group::new()
        .set("class", layer.name())
        .set("data-layer", layer.name())
}

#[cfg(test)]
mod tests {
    use svg::node::element::{Path, Rectangle, Text};

    use super::*;

    #[test]
    fn test_layer_order() {
        assert!(RenderLayer::Groups < RenderLayer::Edges);
        assert!(RenderLayer::Edges < RenderLayer::Nodes);
        assert!(RenderLayer::Nodes < RenderLayer::Labels);

        let mut sorted = RenderLayer::ALL;
        sorted.sort();
        assert_eq!(sorted, RenderLayer::ALL);
    }

    #[test]
    fn test_layer_names() {
        let names: Vec<_> = RenderLayer::ALL.iter().map(RenderLayer::name).collect();
        assert_eq!(
            names,
            ["diagram-groups", "diagram-edges", "diagram-nodes", "diagram-labels"]
        );
    }

    #[test]
    fn test_layered_output_empty() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layered_output_groups_by_layer() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Labels, Box::new(Text::new("label")));
        output.add_to_layer(RenderLayer::Nodes, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Nodes, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Groups, Box::new(Rectangle::new()));

        let layers = output.render();
        assert_eq!(layers.len(), 3);

        let markup: Vec<String> = layers.iter().map(|node| node.to_string()).collect();
        assert!(markup[0].contains(r#"data-layer="diagram-groups""#));
        assert!(markup[1].contains(r#"data-layer="diagram-nodes""#));
        assert!(markup[2].contains(r#"data-layer="diagram-labels""#));
    }

    #[test]
    fn test_layered_output_merge() {
        let mut first = LayeredOutput::new();
        first.add_to_layer(RenderLayer::Edges, Box::new(Path::new()));

        let mut second = LayeredOutput::new();
        second.add_to_layer(RenderLayer::Edges, Box::new(Path::new()));

        first.merge(second);
        assert_eq!(first.render().len(), 1);
    }
}
