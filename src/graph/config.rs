//! Graph construction settings.

/// What [`Graph::connect`](super::Graph::connect) does when the destination
/// already has a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputReplacement {
    /// Disconnect the previous driver edge, then attach the new one.
    #[default]
    Detach,
    /// Fail with [`GraphError::InputAlreadyDriven`](crate::GraphError::InputAlreadyDriven).
    Reject,
}

/// Configuration for a graph.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Policy for a second driver on a normal node.
    pub input_replacement: InputReplacement,
    /// Whether validation accepts parameters without driver or default.
    pub allow_unresolved_parameters: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            input_replacement: InputReplacement::Detach,
            allow_unresolved_parameters: true,
        }
    }
}

impl GraphConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject second drivers and unresolved parameters.
    pub fn strict() -> Self {
        Self::new()
            .with_input_replacement(InputReplacement::Reject)
            .with_unresolved_parameters(false)
    }

    /// Set the input replacement policy.
    pub fn with_input_replacement(mut self, policy: InputReplacement) -> Self {
        self.input_replacement = policy;
        self
    }

    /// Allow or forbid unresolved parameters at validation time.
    pub fn with_unresolved_parameters(mut self, allow: bool) -> Self {
        self.allow_unresolved_parameters = allow;
        self
    }
}
