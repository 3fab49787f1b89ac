use crate::detection::DetectionBatch;
use tracing::debug;

/// Single-slot holder for the next detection batch.
///
/// A batch that arrives while the previous one has not been taken by a frame
/// cycle is dropped; the producer is never blocked and nothing is queued.
#[derive(Debug, Default)]
pub struct DetectionBuffer {
    pending: Option<DetectionBatch>,
    dropped: usize,
}

impl DetectionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `batch` if the slot is free. Returns `false` when the batch was
    /// dropped because an unconsumed batch is still buffered.
    pub fn submit(&mut self, batch: DetectionBatch) -> bool {
        if self.pending.is_some() {
            self.dropped += 1;
            debug!(
                label = %batch.label,
                detections = batch.len(),
                dropped_total = self.dropped,
                "dropping detection batch, previous batch not consumed yet"
            );
            return false;
        }
        self.pending = Some(batch);
        true
    }

    /// Hand out the buffered batch and free the slot.
    pub fn take(&mut self) -> Option<DetectionBatch> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Batches dropped since construction.
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{detection::Detection, rect::Rect};

    fn batch(label: &str, n: usize) -> DetectionBatch {
        DetectionBatch::new(
            label,
            (0..n)
                .map(|i| Detection::new(Rect::new(i as f32, 0.0, 1.0, 1.0), 1.0))
                .collect(),
        )
    }

    #[test]
    fn test_take_empty_is_none() {
        let mut buffer = DetectionBuffer::new();
        assert!(buffer.take().is_none());
        assert!(buffer.take().is_none());
    }

    #[test]
    fn test_submit_then_take_clears() {
        let mut buffer = DetectionBuffer::new();
        assert!(buffer.submit(batch("car", 2)));
        assert!(buffer.is_pending());

        assert_eq!(buffer.take(), Some(batch("car", 2)));
        assert!(!buffer.is_pending());
        assert!(buffer.take().is_none());
    }

    #[test]
    fn test_unconsumed_batch_is_not_overwritten() {
        let mut buffer = DetectionBuffer::new();
        assert!(buffer.submit(batch("car", 1)));
        assert!(!buffer.submit(batch("person", 3)));
        assert_eq!(buffer.dropped_count(), 1);

        assert_eq!(buffer.take(), Some(batch("car", 1)));
        assert!(buffer.submit(batch("person", 3)));
        assert_eq!(buffer.take(), Some(batch("person", 3)));
    }
}
