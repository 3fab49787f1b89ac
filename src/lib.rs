pub mod association;
pub mod config;
pub mod detection;
pub mod detection_buffer;
pub mod error;
pub mod id_allocator;
pub mod multi_tracker;
pub mod node;
pub mod object;
pub mod rect;
pub mod single_tracker;
pub mod suppression;
pub mod sync_gate;
pub mod track;

pub use config::{IdPolicy, TrackerConfig};
pub use detection::{Detection, DetectionBatch};
pub use error::TrackError;
pub use id_allocator::{IdAllocator, MonotonicIdAllocator, TrackId, WrappingIdAllocator};
pub use multi_tracker::MultiTracker;
pub use node::{SharedTrackerNode, TrackerNode};
pub use object::{FrameHeader, TrackedBatch, TrackedObject};
pub use rect::Rect;
pub use single_tracker::{AnchoredTracker, Estimate, SingleObjectTracker};
pub use track::Track;
