//! Typed publish/subscribe for renderer events.

use std::{fmt, rc::Rc};

use log::trace;
use serde_json::Value;

use trellis_core::document::{DiagramDocument, Node};

/// Kinds of events a [`Renderer`](crate::Renderer) emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Fired once per successful render.
    Rendered,
    /// Fired when a node carrying a wireframe payload is clicked.
    NodeClick,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rendered => "diagram:rendered",
            Self::NodeClick => "diagram:node-click",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload delivered to event handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagramEvent {
    Rendered {
        diagram: Rc<DiagramDocument>,
    },
    NodeClick {
        node: Node,
        /// The node's `metadata.wireframe` value.
        wireframe: Value,
    },
}

impl DiagramEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Rendered { .. } => EventKind::Rendered,
            Self::NodeClick { .. } => EventKind::NodeClick,
        }
    }
}

type Handler = Box<dyn FnMut(&DiagramEvent)>;

/// Handlers registered on one renderer, called in registration order.
#[derive(Default)]
pub(crate) struct EventEmitter {
    handlers: Vec<(EventKind, Handler)>,
}

impl EventEmitter {
    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(&DiagramEvent) + 'static) {
        self.handlers.push((kind, Box::new(handler)));
    }

    /// Calls every handler subscribed to the event's kind.
    pub fn emit(&mut self, event: &DiagramEvent) {
        let kind = event.kind();
        let mut delivered = 0;
        for (_, handler) in self
            .handlers
            .iter_mut()
            .filter(|(subscribed, _)| *subscribed == kind)
        {
            handler(event);
            delivered += 1;
        }
        trace!(event = kind.name(), handlers = delivered; "Event emitted");
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers
            .iter()
            .filter(|(subscribed, _)| *subscribed == kind)
            .count()
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("rendered", &self.handler_count(EventKind::Rendered))
            .field("node_click", &self.handler_count(EventKind::NodeClick))
            .finish()
    }
}
