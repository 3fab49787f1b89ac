//! The per-track visual tracking capability.
//!
//! The multi-object layer never looks at pixels itself. Each track owns one
//! [`SingleObjectTracker`] that moves its box from frame to frame, optionally
//! guided by a detection hint. [`AnchoredTracker`] is a frame-agnostic
//! implementation that re-anchors on hints and coasts on its last observed
//! motion otherwise.

use crate::{detection::Detection, rect::Rect};
use std::marker::PhantomData;

/// Output of one tracker update.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub rect: Rect<f32>,
    pub score: f32,
}

/// Capability that advances one object's box estimate across frames.
pub trait SingleObjectTracker {
    /// Opaque image type consumed by the tracker.
    type Frame;

    /// Advance the estimate on `frame`. `hint` is the detection matched to
    /// this track in the current cycle, if any.
    fn update(&mut self, frame: &Self::Frame, hint: Option<&Detection>) -> Estimate;

    /// Remaining lifespan after a cycle without a matching detection.
    fn decay_lifespan(&self, remaining: u32) -> u32 {
        remaining.saturating_sub(1)
    }
}

/*----------------------------------------------------------------------------
AnchoredTracker
----------------------------------------------------------------------------*/

/// Re-anchors on every hint and otherwise shifts the box by the displacement
/// seen between the last two anchors.
#[derive(Debug, Clone)]
pub struct AnchoredTracker<F = ()> {
    rect: Rect<f32>,
    score: f32,
    velocity: (f32, f32),
    anchored: bool,
    _frame: PhantomData<fn(&F)>,
}

impl<F> AnchoredTracker<F> {
    pub fn new() -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, 0.0, 0.0),
            score: 0.0,
            velocity: (0.0, 0.0),
            anchored: false,
            _frame: PhantomData,
        }
    }

    pub fn velocity(&self) -> (f32, f32) {
        self.velocity
    }
}

impl<F> Default for AnchoredTracker<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> SingleObjectTracker for AnchoredTracker<F> {
    type Frame = F;

    fn update(&mut self, _frame: &F, hint: Option<&Detection>) -> Estimate {
        match hint {
            Some(det) => {
                if self.anchored {
                    self.velocity = (det.rect.x() - self.rect.x(), det.rect.y() - self.rect.y());
                }
                self.rect = det.rect.clone();
                self.score = det.score;
                self.anchored = true;
            }
            None => {
                self.rect = self.rect.translated(self.velocity.0, self.velocity.1);
            }
        }

        Estimate {
            rect: self.rect.clone(),
            score: self.score,
        }
    }
}
