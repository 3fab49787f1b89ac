//! Cross-track non-maximum suppression.
//!
//! After a cycle has created and updated its tracks, two tracks can end up
//! on the same object (a coasting track drifts onto a region that also
//! spawned a new track). Tracks are visited by descending area; a smaller
//! track is suppressed when more than [`SUPPRESSION_OVERLAP_RATIO`] of its
//! own area lies inside a larger surviving track.
//!
//! When the suppressed track has been alive for more frames than the
//! survivor, the survivor takes over the suppressed track's identifier, so a
//! long-lived identity continues on the larger box.

use crate::{rect::Rect, single_tracker::SingleObjectTracker, track::Track};
use std::cmp::Ordering;
use tracing::debug;

pub const SUPPRESSION_OVERLAP_RATIO: f32 = 0.3;

/// What the planner needs to know about one track.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub rect: Rect<f32>,
    pub frame_count: usize,
}

/// One suppression decision, indices into the candidate list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suppression {
    pub suppressed: usize,
    /// Surviving track that covered it; `None` for a degenerate box.
    pub survivor: Option<usize>,
    /// The survivor adopts the suppressed track's identifier.
    pub transfer_id: bool,
    pub overlap_ratio: f32,
}

/// Decide which candidates to suppress. Decisions are returned in the order
/// they are taken and must be applied in that order.
pub fn plan_suppression(candidates: &[Candidate]) -> Vec<Suppression> {
    let n = candidates.len();
    let areas: Vec<f32> = candidates.iter().map(|c| c.rect.area()).collect();
    let mut is_suppressed = vec![false; n];
    let mut plan = Vec::new();

    for (idx, &area) in areas.iter().enumerate() {
        if area.is_nan() || area <= 0.0 {
            is_suppressed[idx] = true;
            plan.push(Suppression {
                suppressed: idx,
                survivor: None,
                transfer_id: false,
                overlap_ratio: 0.0,
            });
        }
    }

    // Stable: equal areas keep track-set order.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| areas[b].partial_cmp(&areas[a]).unwrap_or(Ordering::Equal));

    for (pos, &i) in order.iter().enumerate() {
        for &j in &order[pos + 1..] {
            if is_suppressed[i] || is_suppressed[j] {
                continue;
            }
            let Some(inter) = candidates[i].rect.intersection(&candidates[j].rect) else {
                continue;
            };
            let overlap_ratio = inter.area() / areas[j];
            if overlap_ratio > SUPPRESSION_OVERLAP_RATIO {
                is_suppressed[j] = true;
                plan.push(Suppression {
                    suppressed: j,
                    survivor: Some(i),
                    transfer_id: candidates[j].frame_count > candidates[i].frame_count,
                    overlap_ratio,
                });
            }
        }
    }

    plan
}

/// Run the suppression pass over `tracks`, forcing the lifespan of every
/// suppressed track to zero. Returns the number of tracks this pass took
/// from a positive lifespan to zero; tracks that were already expired are
/// still planned, so survivor decisions do not change, but are not counted
/// or logged again. Suppressed tracks stay in the slice; pruning removes
/// them.
pub fn suppress<S>(tracks: &mut [Track<S>]) -> usize
where
    S: SingleObjectTracker,
{
    let candidates: Vec<Candidate> = tracks
        .iter()
        .map(|t| Candidate {
            rect: t.get_rect().clone(),
            frame_count: t.get_frame_count(),
        })
        .collect();

    let mut newly_suppressed = 0;
    for step in &plan_suppression(&candidates) {
        let suppressed_id = tracks[step.suppressed].get_id();
        let was_live = !tracks[step.suppressed].is_expired();
        tracks[step.suppressed].nullify_lifespan();
        if step.transfer_id {
            if let Some(survivor) = step.survivor {
                tracks[survivor].adopt_id(suppressed_id);
            }
        }
        if !was_live {
            continue;
        }
        newly_suppressed += 1;

        match step.survivor {
            Some(survivor) => {
                debug!(
                    suppressed = %suppressed_id,
                    survivor = %tracks[survivor].get_id(),
                    overlap_ratio = step.overlap_ratio,
                    transfer_id = step.transfer_id,
                    "suppressed overlapping track"
                );
            }
            None => debug!(suppressed = %suppressed_id, "suppressed degenerate track"),
        }
    }

    newly_suppressed
}
