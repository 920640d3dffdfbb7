use crate::coords::RectF;
use crate::graph::Curve;
use crate::resources::TabPageType;

/// A textured quad from a resource image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    /// Destination, normalized canvas coordinates.
    pub client: RectF,
    /// Source, texture UV coordinates.
    pub image: RectF,
    /// Slot selected when the command was recorded.
    pub page: TabPageType,
}

/// A sampled parameter curve drawn inside `client`.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphCmd {
    pub client: RectF,
    pub curve: Curve,
}

/// Recorded draw command, executed in call order at present.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Image(ImageCmd),
    Graph(GraphCmd),
}
