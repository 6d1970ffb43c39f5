//! Blog Configuration

/// Blog application configuration
#[derive(Debug, Clone, Default)]
pub struct BlogConfig {
    /// When set, only the sender may update or delete a post or comment.
    /// Off by default: any authenticated user may edit any post or comment.
    pub enforce_ownership: bool,
}

impl BlogConfig {
    pub fn new(enforce_ownership: bool) -> Self {
        Self { enforce_ownership }
    }
}
