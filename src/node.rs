//! Event-driven front of the tracker.
//!
//! [`TrackerNode`] receives the two input streams through `on_frame` and
//! `on_detections`. Every frame runs a full tracking cycle on whatever
//! detections are buffered at that moment; a result is handed out only when
//! the [`SyncGate`] sees both a finished cycle and an accepted detection
//! batch since the last emission.

use crate::{
    config::TrackerConfig,
    detection::{Detection, DetectionBatch},
    detection_buffer::DetectionBuffer,
    error::TrackError,
    multi_tracker::MultiTracker,
    object::{FrameHeader, TrackedBatch},
    single_tracker::SingleObjectTracker,
    sync_gate::SyncGate,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

pub struct TrackerNode<S>
where
    S: SingleObjectTracker,
{
    tracker: MultiTracker<S>,
    buffer: DetectionBuffer,
    gate: SyncGate,
    label: String,
    last_result: Option<TrackedBatch>,
}

impl<S> std::fmt::Debug for TrackerNode<S>
where
    S: SingleObjectTracker,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerNode")
            .field("tracker", &self.tracker)
            .field("buffer", &self.buffer)
            .field("gate", &self.gate)
            .field("label", &self.label)
            .finish()
    }
}

impl<S> TrackerNode<S>
where
    S: SingleObjectTracker,
{
    /// # Errors
    /// Returns `TrackError::InvalidConfig` when `config` fails validation.
    pub fn new<F>(config: TrackerConfig, factory: F) -> Result<Self, TrackError>
    where
        F: FnMut(&Detection) -> S + Send + 'static,
    {
        Ok(Self::from_tracker(MultiTracker::new(config, factory)?))
    }

    pub fn from_tracker(tracker: MultiTracker<S>) -> Self {
        Self {
            tracker,
            buffer: DetectionBuffer::new(),
            gate: SyncGate::new(),
            label: String::new(),
            last_result: None,
        }
    }

    pub fn tracker(&self) -> &MultiTracker<S> {
        &self.tracker
    }

    pub fn buffer(&self) -> &DetectionBuffer {
        &self.buffer
    }

    pub fn gate(&self) -> &SyncGate {
        &self.gate
    }

    /// Object type of the most recently accepted detection batch.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Frame callback: always runs a tracking cycle, never waits for fresh
    /// detections.
    pub fn on_frame(&mut self, frame: &S::Frame, header: FrameHeader) -> Option<TrackedBatch> {
        let detections = self
            .buffer
            .take()
            .map(|batch| batch.detections)
            .unwrap_or_default();

        let objects = self.tracker.step(frame, &detections);
        self.last_result = Some(TrackedBatch {
            header,
            label: self.label.clone(),
            objects,
        });
        self.gate.mark_frame();

        self.try_emit()
    }

    /// Detection callback: buffers the batch unless the previous one is still
    /// waiting for a frame, in which case the new batch is dropped.
    pub fn on_detections(&mut self, batch: DetectionBatch) -> Option<TrackedBatch> {
        let label = batch.label.clone();
        if self.buffer.submit(batch) {
            self.label = label;
            self.gate.mark_detections();
        }

        self.try_emit()
    }

    fn try_emit(&mut self) -> Option<TrackedBatch> {
        if !self.gate.try_emit() {
            return None;
        }
        let result = self.last_result.take();
        if let Some(batch) = &result {
            debug!(
                seq = batch.header.seq,
                label = %batch.label,
                tracks = batch.len(),
                "emitting tracked batch"
            );
        }
        result
    }
}

/*-----------------------------------------------------------------------------
SharedTrackerNode
-----------------------------------------------------------------------------*/

/// Cloneable handle for callers that may dispatch the two callbacks from
/// different threads. Each callback holds the lock for its whole cycle.
pub struct SharedTrackerNode<S>
where
    S: SingleObjectTracker,
{
    inner: Arc<Mutex<TrackerNode<S>>>,
}

impl<S> Clone for SharedTrackerNode<S>
where
    S: SingleObjectTracker,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> SharedTrackerNode<S>
where
    S: SingleObjectTracker,
{
    pub fn new(node: TrackerNode<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(node)),
        }
    }

    pub fn on_frame(&self, frame: &S::Frame, header: FrameHeader) -> Option<TrackedBatch> {
        self.inner.lock().on_frame(frame, header)
    }

    pub fn on_detections(&self, batch: DetectionBatch) -> Option<TrackedBatch> {
        self.inner.lock().on_detections(batch)
    }

    /// Run `f` with exclusive access to the node.
    pub fn with_node<R>(&self, f: impl FnOnce(&TrackerNode<S>) -> R) -> R {
        f(&self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{rect::Rect, single_tracker::AnchoredTracker};

    type Node = TrackerNode<AnchoredTracker<()>>;

    fn node() -> Node {
        TrackerNode::new(TrackerConfig::default(), |_: &Detection| AnchoredTracker::new()).unwrap()
    }

    fn batch(label: &str, x: f32) -> DetectionBatch {
        DetectionBatch::new(label, vec![Detection::new(Rect::new(x, 0.0, 10.0, 10.0), 0.8)])
    }

    fn header(seq: u64) -> FrameHeader {
        FrameHeader::new(seq, seq as f64 * 0.1, "camera")
    }

    #[test]
    fn test_detection_then_frame_emits_once() {
        let mut node = node();

        assert!(node.on_detections(batch("car", 0.0)).is_none());
        let out = node.on_frame(&(), header(1)).unwrap();

        assert_eq!(out.header, header(1));
        assert_eq!(out.label, "car");
        assert_eq!(out.len(), 1);
        assert!(out.objects[0].fresh);
        assert_eq!(*node.gate(), SyncGate::default());
    }

    #[test]
    fn test_frame_alone_runs_cycle_without_emitting() {
        let mut node = node();
        node.on_detections(batch("car", 0.0));
        node.on_frame(&(), header(1));

        assert!(node.on_frame(&(), header(2)).is_none());
        assert_eq!(node.tracker().cycle_count(), 2);
        assert_eq!(node.tracker().tracks()[0].get_lifespan(), 7);
    }

    #[test]
    fn test_detection_after_frame_emits_pending_result() {
        let mut node = node();
        node.on_frame(&(), header(1));

        let out = node.on_detections(batch("person", 0.0)).unwrap();
        // The emitted result is the one computed on frame 1, before this
        // batch was consumed.
        assert_eq!(out.header.seq, 1);
        assert!(out.is_empty());
        assert!(node.buffer().is_pending());
        assert_eq!(node.label(), "person");
    }

    #[test]
    fn test_unconsumed_batch_drops_later_batches() {
        let mut node = node();
        node.on_detections(batch("car", 0.0));
        assert!(node.on_detections(batch("truck", 100.0)).is_none());
        assert_eq!(node.buffer().dropped_count(), 1);
        assert_eq!(node.label(), "car");

        let out = node.on_frame(&(), header(1)).unwrap();
        assert_eq!(out.label, "car");
        assert_eq!(out.objects[0].rect, Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_label_persists_across_frames() {
        let mut node = node();
        node.on_detections(batch("bicycle", 0.0));
        node.on_frame(&(), header(1));
        node.on_frame(&(), header(2));

        let out = node.on_detections(batch("bicycle", 1.0)).unwrap();
        assert_eq!(out.header.seq, 2);
        assert_eq!(out.label, "bicycle");
    }

    #[test]
    fn test_shared_node_matches_plain_node() {
        let mut plain = node();
        let shared = SharedTrackerNode::new(node());
        let handle = shared.clone();

        let events: Vec<Option<DetectionBatch>> = vec![
            Some(batch("car", 0.0)),
            None,
            None,
            Some(batch("car", 2.0)),
            Some(batch("car", 4.0)),
            None,
        ];

        for (seq, event) in events.into_iter().enumerate() {
            let (a, b) = match event {
                Some(b) => (plain.on_detections(b.clone()), handle.on_detections(b)),
                None => (
                    plain.on_frame(&(), header(seq as u64)),
                    shared.on_frame(&(), header(seq as u64)),
                ),
            };
            assert_eq!(a, b);
        }

        let count = shared.with_node(|n| n.tracker().track_count());
        assert_eq!(count, plain.tracker().track_count());
    }
}
