use crate::{
    detection::Detection,
    id_allocator::TrackId,
    rect::Rect,
    single_tracker::{Estimate, SingleObjectTracker},
};
use std::fmt::Debug;

/*----------------------------------------------------------------------------
Track struct
----------------------------------------------------------------------------*/

/// One live object: the current box estimate, its identity and remaining
/// lifespan, plus the metadata copied from the detection that created it.
/// The track owns its tracker; dropping the track drops the tracker.
pub struct Track<S>
where
    S: SingleObjectTracker,
{
    tracker: S,
    rect: Rect<f32>,
    score: f32,
    id: TrackId,
    frame_count: usize,
    lifespan: u32,
    range: f32,
    min_height: f32,
    max_height: f32,
}

impl<S> Debug for Track<S>
where
    S: SingleObjectTracker,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Track {{ id: {}, frame_count: {}, lifespan: {}, score: {}, rect: {:?} }}",
            self.id, self.frame_count, self.lifespan, self.score, self.rect
        )
    }
}

impl<S> Track<S>
where
    S: SingleObjectTracker,
{
    /// Create a track from an unmatched detection and run its first update
    /// with that detection as the hint.
    pub fn new(
        id: TrackId,
        detection: &Detection,
        tracker: S,
        frame: &S::Frame,
        lifespan: u32,
    ) -> Self {
        let mut track = Self {
            tracker,
            rect: detection.rect.clone(),
            score: detection.score,
            id,
            frame_count: 0,
            lifespan,
            range: detection.range,
            min_height: detection.min_height,
            max_height: detection.max_height,
        };
        track.refresh(frame, detection, lifespan);
        track
    }

    // Used by the suppression tests to build tracks with a given history.
    #[cfg(test)]
    pub(crate) fn dummy_track(id: u64, rect: Rect<f32>, frame_count: usize) -> Self
    where
        S: Default,
    {
        Self {
            tracker: S::default(),
            rect,
            score: 0.0,
            id: TrackId(id),
            frame_count,
            lifespan: 1,
            range: 0.0,
            min_height: 0.0,
            max_height: 0.0,
        }
    }

    pub fn get_rect(&self) -> &Rect<f32> {
        &self.rect
    }

    pub fn get_score(&self) -> f32 {
        self.score
    }

    pub fn get_id(&self) -> TrackId {
        self.id
    }

    /// Number of tracker updates this track has received, creation included.
    pub fn get_frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn get_lifespan(&self) -> u32 {
        self.lifespan
    }

    pub fn get_range(&self) -> f32 {
        self.range
    }

    pub fn get_height_band(&self) -> (f32, f32) {
        (self.min_height, self.max_height)
    }

    pub fn is_expired(&self) -> bool {
        self.lifespan == 0
    }

    /// Matched this cycle: re-anchor on the detection and restore the full
    /// lifespan.
    pub(crate) fn refresh(&mut self, frame: &S::Frame, detection: &Detection, lifespan: u32) {
        let estimate = self.tracker.update(frame, Some(detection));
        self.apply(estimate);
        self.lifespan = lifespan;
    }

    /// Unmatched this cycle: let the tracker coast and decay the lifespan by
    /// the tracker's own policy.
    pub(crate) fn propagate(&mut self, frame: &S::Frame) {
        let estimate = self.tracker.update(frame, None);
        self.apply(estimate);
        self.lifespan = self.tracker.decay_lifespan(self.lifespan);
    }

    pub(crate) fn nullify_lifespan(&mut self) {
        self.lifespan = 0;
    }

    pub(crate) fn adopt_id(&mut self, id: TrackId) {
        self.id = id;
    }

    fn apply(&mut self, estimate: Estimate) {
        self.rect = estimate.rect;
        self.score = estimate.score;
        self.frame_count += 1;
    }
}
