//! Tree construction options.

/// Configuration for [`RbTree::with_config`](crate::RbTree::with_config).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeConfig {
    /// Number of nodes to reserve in the arena up front (sentinel excluded).
    pub initial_capacity: usize,
}

impl TreeConfig {
    /// Set the initial arena capacity.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}
