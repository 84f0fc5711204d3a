//! Render request type and merge rules

use crate::geometry::Dot;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind of full repaint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Repaint {
    /// Clear and redraw all content with one full refresh
    Standard,
    /// Flash black, then white, then redraw; clears ghosting
    AntiGhost,
}

/// What the panel needs after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RenderRequest {
    /// Panel already matches the state
    #[default]
    None,
    /// Only dots changed; the last dot to change is carried for logging
    Incremental(Dot),
    /// Everything must be redrawn
    Full(Repaint),
}

impl RenderRequest {
    fn rank(&self) -> u8 {
        match self {
            RenderRequest::None => 0,
            RenderRequest::Incremental(_) => 1,
            RenderRequest::Full(Repaint::Standard) => 2,
            RenderRequest::Full(Repaint::AntiGhost) => 3,
        }
    }

    /// Combine two requests, keeping the stronger one
    ///
    /// On a tie `later` wins, so two incremental requests keep the latest dot.
    pub fn merge(self, later: RenderRequest) -> RenderRequest {
        if later.rank() >= self.rank() {
            later
        } else {
            self
        }
    }

    /// Check if nothing needs drawing
    pub fn is_none(&self) -> bool {
        matches!(self, RenderRequest::None)
    }

    /// Check if this is a full repaint of either kind
    pub fn is_full(&self) -> bool {
        matches!(self, RenderRequest::Full(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOT_A: Dot = Dot::for_second(0);
    const DOT_B: Dot = Dot::for_second(1);

    #[test]
    fn test_merge_escalates() {
        let standard = RenderRequest::Full(Repaint::Standard);
        let anti_ghost = RenderRequest::Full(Repaint::AntiGhost);

        assert_eq!(RenderRequest::None.merge(RenderRequest::Incremental(DOT_A)), RenderRequest::Incremental(DOT_A));
        assert_eq!(RenderRequest::Incremental(DOT_A).merge(RenderRequest::None), RenderRequest::Incremental(DOT_A));
        assert_eq!(RenderRequest::Incremental(DOT_A).merge(standard), standard);
        assert_eq!(standard.merge(RenderRequest::Incremental(DOT_A)), standard);
        assert_eq!(anti_ghost.merge(standard), anti_ghost);
        assert_eq!(standard.merge(anti_ghost), anti_ghost);
    }

    #[test]
    fn test_merge_keeps_latest_dot() {
        let merged = RenderRequest::Incremental(DOT_A).merge(RenderRequest::Incremental(DOT_B));
        assert_eq!(merged, RenderRequest::Incremental(DOT_B));
    }

    #[test]
    fn test_predicates() {
        assert!(RenderRequest::default().is_none());
        assert!(RenderRequest::Full(Repaint::AntiGhost).is_full());
        assert!(!RenderRequest::Incremental(DOT_A).is_full());
    }
}
