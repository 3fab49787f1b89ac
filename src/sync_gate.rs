/// Two-flag gate between the frame stream and the detection stream.
///
/// A result becomes visible only after both streams have contributed since
/// the last emission. `try_emit` checks and resets both flags in one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncGate {
    frame_ready: bool,
    detections_ready: bool,
}

impl SyncGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracking cycle has produced a result.
    pub fn mark_frame(&mut self) {
        self.frame_ready = true;
    }

    /// A detection batch has been accepted.
    pub fn mark_detections(&mut self) {
        self.detections_ready = true;
    }

    pub fn frame_ready(&self) -> bool {
        self.frame_ready
    }

    pub fn detections_ready(&self) -> bool {
        self.detections_ready
    }

    /// Returns `true` and resets both flags when both are set.
    pub fn try_emit(&mut self) -> bool {
        if self.frame_ready && self.detections_ready {
            self.frame_ready = false;
            self.detections_ready = false;
            true
        } else {
            false
        }
    }
}
