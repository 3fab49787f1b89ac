use crate::{id_allocator::TrackId, rect::Rect};
use serde::{Deserialize, Serialize};

/*------------------------------------------------------------------------------
FrameHeader struct
------------------------------------------------------------------------------*/

/// Identification of the frame a result was computed on. Copied verbatim
/// onto the emitted batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameHeader {
    pub seq: u64,
    /// Capture time in seconds.
    pub stamp: f64,
    /// Sensor or camera frame name.
    pub frame_id: String,
}

impl FrameHeader {
    pub fn new(seq: u64, stamp: f64, frame_id: impl Into<String>) -> Self {
        Self {
            seq,
            stamp,
            frame_id: frame_id.into(),
        }
    }
}

/*------------------------------------------------------------------------------
TrackedObject struct
------------------------------------------------------------------------------*/

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedObject {
    pub rect: Rect<f32>,
    pub score: f32,
    pub id: TrackId,
    pub lifespan: u32,
    pub range: f32,
    pub min_height: f32,
    pub max_height: f32,
    /// Refreshed by a detection this cycle rather than propagated.
    pub fresh: bool,
}

/*------------------------------------------------------------------------------
TrackedBatch struct
------------------------------------------------------------------------------*/

/// Everything emitted for one synchronized frame/detection pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackedBatch {
    pub header: FrameHeader,
    /// Object type of the detection stream.
    pub label: String,
    pub objects: Vec<TrackedObject>,
}

impl TrackedBatch {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn ids(&self) -> Vec<TrackId> {
        self.objects.iter().map(|o| o.id).collect()
    }
}
