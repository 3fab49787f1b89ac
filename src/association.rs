//! Greedy detection-to-track association.
//!
//! Detections are visited in batch order; each one takes the first
//! still-unmatched track (in track-set order) whose overlap with the
//! detection exceeds [`MATCH_OVERLAP_RATIO`] of the detection's own area.
//! The result depends on iteration order and is not a global optimum.

use crate::{detection::Detection, rect::Rect};

/// Fraction of a detection's area a track must cover to claim it.
pub const MATCH_OVERLAP_RATIO: f32 = 0.3;

/// Outcome of one association pass. All index lists are ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Association {
    /// `(detection index, track index)` pairs in detection order.
    pub matches: Vec<(usize, usize)>,
    pub unmatched_detections: Vec<usize>,
    pub unmatched_tracks: Vec<usize>,
}

/// True when `track_rect` covers more than [`MATCH_OVERLAP_RATIO`] of the
/// detection's area. A zero-area detection never matches.
pub fn covers_detection(detection_rect: &Rect<f32>, track_rect: &Rect<f32>) -> bool {
    let area = detection_rect.area();
    detection_rect.intersection_area(track_rect) > area * MATCH_OVERLAP_RATIO
}

pub fn associate(track_rects: &[Rect<f32>], detections: &[Detection]) -> Association {
    let mut track_matched = vec![false; track_rects.len()];
    let mut assoc = Association::default();

    for (det_idx, det) in detections.iter().enumerate() {
        let candidate = track_rects
            .iter()
            .enumerate()
            .filter(|(track_idx, _)| !track_matched[*track_idx])
            .find(|(_, rect)| covers_detection(&det.rect, rect))
            .map(|(track_idx, _)| track_idx);

        match candidate {
            Some(track_idx) => {
                track_matched[track_idx] = true;
                assoc.matches.push((det_idx, track_idx));
            }
            None => assoc.unmatched_detections.push(det_idx),
        }
    }

    assoc.unmatched_tracks = track_matched
        .iter()
        .enumerate()
        .filter_map(|(idx, &matched)| (!matched).then_some(idx))
        .collect();

    assoc
}
