use std::fmt;

use crate::dom::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn entering(target: NodeId) -> Self {
        Self {
            target,
            is_intersecting: true,
        }
    }

    pub fn leaving(target: NodeId) -> Self {
        Self {
            target,
            is_intersecting: false,
        }
    }
}

/// Viewport-intersection capability: which elements currently want to hear
/// about intersection changes.
pub trait VisibilityObserver: fmt::Debug {
    fn observe(&mut self, target: NodeId);

    /// Returns whether `target` was being observed.
    fn unobserve(&mut self, target: NodeId) -> bool;

    fn is_observed(&self, target: NodeId) -> bool;

    /// Observed targets in registration order.
    fn observed(&self) -> Vec<NodeId>;
}

#[derive(Debug, Default, Clone)]
pub struct IntersectionRegistry {
    targets: Vec<NodeId>,
}

impl IntersectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VisibilityObserver for IntersectionRegistry {
    fn observe(&mut self, target: NodeId) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }

    fn unobserve(&mut self, target: NodeId) -> bool {
        let before = self.targets.len();
        self.targets.retain(|node| *node != target);
        self.targets.len() != before
    }

    fn is_observed(&self, target: NodeId) -> bool {
        self.targets.contains(&target)
    }

    fn observed(&self) -> Vec<NodeId> {
        self.targets.clone()
    }
}
