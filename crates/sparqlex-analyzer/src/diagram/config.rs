//! Configuration types for Mermaid emission.

/// Flowchart layout direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// `TD` - top to bottom
    #[default]
    TopDown,
    /// `BT` - bottom to top
    BottomUp,
    /// `LR` - left to right
    LeftRight,
    /// `RL` - right to left
    RightLeft,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::TopDown => "TD",
            Direction::BottomUp => "BT",
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
        }
    }
}

/// Configuration for diagram rendering.
#[derive(Clone, Debug)]
pub struct DiagramConfig {
    /// Layout direction of the flowchart
    pub(crate) direction: Direction,
    /// Whether outputs of the outermost projection get the `projected` class
    pub(crate) mark_projected: bool,
    /// Base IRI used when the query has no known target endpoint
    pub(crate) fallback_base: String,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            mark_projected: true,
            fallback_base: "https://example.org/".to_string(),
        }
    }
}

impl DiagramConfig {
    /// Create a new DiagramConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout direction.
    pub fn direction(mut self, value: Direction) -> Self {
        self.direction = value;
        self
    }

    /// Set whether projected variables are highlighted.
    pub fn mark_projected(mut self, value: bool) -> Self {
        self.mark_projected = value;
        self
    }

    /// Set the base IRI used for queries without a target endpoint.
    pub fn fallback_base(mut self, value: impl Into<String>) -> Self {
        self.fallback_base = value.into();
        self
    }
}
