//! One tracking cycle over the live track set.
//!
//! Per frame: associate the detections with the live tracks, refresh the
//! matched tracks, let the unmatched ones coast, start a track for every
//! unmatched detection, suppress overlapping duplicates, prune expired
//! tracks, and assemble the per-track output.

use crate::{
    association::associate,
    config::TrackerConfig,
    detection::Detection,
    error::TrackError,
    id_allocator::IdAllocator,
    object::TrackedObject,
    rect::Rect,
    single_tracker::SingleObjectTracker,
    suppression::suppress,
    track::Track,
};
use tracing::{debug, trace};

/// Builds the tracker instance owned by a newly created track.
pub type TrackerFactory<S> = Box<dyn FnMut(&Detection) -> S + Send>;

pub struct MultiTracker<S>
where
    S: SingleObjectTracker,
{
    config: TrackerConfig,
    ids: Box<dyn IdAllocator + Send>,
    factory: TrackerFactory<S>,
    tracks: Vec<Track<S>>,
    cycle_count: usize,
}

impl<S> std::fmt::Debug for MultiTracker<S>
where
    S: SingleObjectTracker,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiTracker")
            .field("config", &self.config)
            .field("ids", &self.ids)
            .field("tracks", &self.tracks)
            .field("cycle_count", &self.cycle_count)
            .finish()
    }
}

impl<S> MultiTracker<S>
where
    S: SingleObjectTracker,
{
    /// Create a tracker; `factory` is called once per new track.
    ///
    /// # Errors
    /// Returns `TrackError::InvalidConfig` when `config` fails validation.
    pub fn new<F>(config: TrackerConfig, factory: F) -> Result<Self, TrackError>
    where
        F: FnMut(&Detection) -> S + Send + 'static,
    {
        config.validate()?;
        Ok(Self {
            ids: config.id_policy.build(),
            config,
            factory: Box::new(factory),
            tracks: Vec::new(),
            cycle_count: 0,
        })
    }

    /// Replace the identifier policy, e.g. with a custom allocator.
    pub fn with_id_allocator(self, ids: Box<dyn IdAllocator + Send>) -> Self {
        Self { ids, ..self }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn tracks(&self) -> &[Track<S>] {
        &self.tracks
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Number of cycles run so far.
    pub fn cycle_count(&self) -> usize {
        self.cycle_count
    }

    /// Run one full cycle on `frame` with the detections available for it
    /// (possibly none) and return the surviving tracks.
    pub fn step(&mut self, frame: &S::Frame, detections: &[Detection]) -> Vec<TrackedObject> {
        self.cycle_count += 1;
        let lifespan = self.config.default_lifespan;

        let track_rects: Vec<Rect<f32>> = self.tracks.iter().map(|t| t.get_rect().clone()).collect();
        let assoc = associate(&track_rects, detections);
        trace!(
            cycle = self.cycle_count,
            tracks = self.tracks.len(),
            detections = detections.len(),
            matched = assoc.matches.len(),
            "associated detections"
        );

        for &(det_idx, track_idx) in &assoc.matches {
            self.tracks[track_idx].refresh(frame, &detections[det_idx], lifespan);
        }
        for &track_idx in &assoc.unmatched_tracks {
            self.tracks[track_idx].propagate(frame);
        }

        for &det_idx in &assoc.unmatched_detections {
            let detection = &detections[det_idx];
            let id = self.ids.next_id();
            let tracker = (self.factory)(detection);
            let track = Track::new(id, detection, tracker, frame, lifespan);
            debug!(id = %id, rect = ?track.get_rect(), "created track");
            self.tracks.push(track);
        }

        suppress(&mut self.tracks);

        let before = self.tracks.len();
        self.tracks.retain(|t| !t.is_expired());
        let pruned = before - self.tracks.len();
        if pruned > 0 {
            debug!(pruned, remaining = self.tracks.len(), "pruned expired tracks");
        }

        self.assemble()
    }

    fn assemble(&self) -> Vec<TrackedObject> {
        let lifespan = self.config.default_lifespan;
        self.tracks
            .iter()
            .map(|t| {
                let (min_height, max_height) = t.get_height_band();
                TrackedObject {
                    rect: t.get_rect().clone(),
                    score: t.get_score(),
                    id: t.get_id(),
                    lifespan: t.get_lifespan(),
                    range: t.get_range(),
                    min_height,
                    max_height,
                    fresh: t.get_lifespan() == lifespan,
                }
            })
            .collect()
    }
}
