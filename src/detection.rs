use crate::{error::TrackError, rect::Rect};
use serde::{Deserialize, Serialize};

/*------------------------------------------------------------------------------
Detection struct
------------------------------------------------------------------------------*/

/// One region reported by the upstream detector for a single frame, with the
/// side metadata the tracker carries through to its output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub rect: Rect<f32>,
    pub score: f32,
    /// Depth range estimate of the object.
    pub range: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl Detection {
    pub fn new(rect: Rect<f32>, score: f32) -> Self {
        Self {
            rect,
            score,
            range: 0.0,
            min_height: 0.0,
            max_height: 0.0,
        }
    }

    pub fn with_range(self, range: f32) -> Self {
        Self { range, ..self }
    }

    pub fn with_height_band(self, min_height: f32, max_height: f32) -> Self {
        Self {
            min_height,
            max_height,
            ..self
        }
    }

    pub fn get_rect(&self) -> &Rect<f32> {
        &self.rect
    }

    pub fn get_score(&self) -> f32 {
        self.score
    }
}

/*------------------------------------------------------------------------------
DetectionBatch struct
------------------------------------------------------------------------------*/

/// A labelled batch of detections. One batch replaces the previous one once
/// a frame cycle has consumed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionBatch {
    /// Free-text object type, e.g. `"car"` or `"person"`.
    pub label: String,
    pub detections: Vec<Detection>,
}

impl DetectionBatch {
    pub fn new(label: impl Into<String>, detections: Vec<Detection>) -> Self {
        Self {
            label: label.into(),
            detections,
        }
    }

    /// Build a batch from the parallel arrays a transport usually delivers.
    ///
    /// # Errors
    /// Returns `TrackError::MismatchedBatch` when the arrays differ in length.
    pub fn from_parts(
        label: impl Into<String>,
        rects: Vec<Rect<f32>>,
        scores: Vec<f32>,
        ranges: Vec<f32>,
        min_heights: Vec<f32>,
        max_heights: Vec<f32>,
    ) -> Result<Self, TrackError> {
        let n = rects.len();
        if [scores.len(), ranges.len(), min_heights.len(), max_heights.len()]
            .iter()
            .any(|&len| len != n)
        {
            return Err(TrackError::MismatchedBatch {
                rects: n,
                scores: scores.len(),
                ranges: ranges.len(),
                min_heights: min_heights.len(),
                max_heights: max_heights.len(),
            });
        }

        let detections = rects
            .into_iter()
            .zip(scores)
            .zip(ranges)
            .zip(min_heights.into_iter().zip(max_heights))
            .map(|(((rect, score), range), (min_height, max_height))| Detection {
                rect,
                score,
                range,
                min_height,
                max_height,
            })
            .collect();

        Ok(Self::new(label, detections))
    }

    /// Reject rectangles with negative or non-finite extents. Zero-sized
    /// rectangles are accepted; the tracker retires them by policy.
    pub fn validate(&self) -> Result<(), TrackError> {
        for (i, det) in self.detections.iter().enumerate() {
            if !det.rect.is_finite() {
                return Err(TrackError::InvalidDetection(format!(
                    "detection {} has a non-finite rect {:?}",
                    i, det.rect
                )));
            }
            if det.rect.width() < 0.0 || det.rect.height() < 0.0 {
                return Err(TrackError::InvalidDetection(format!(
                    "detection {} has negative size {}x{}",
                    i,
                    det.rect.width(),
                    det.rect.height()
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_zips_metadata() {
        let batch = DetectionBatch::from_parts(
            "car",
            vec![Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(50.0, 50.0, 5.0, 5.0)],
            vec![0.9, 0.4],
            vec![12.5, 30.0],
            vec![0.5, 0.2],
            vec![1.8, 1.1],
        )
        .unwrap();

        assert_eq!(batch.label, "car");
        assert_eq!(batch.len(), 2);
        assert_eq!(
            batch.detections[1],
            Detection::new(Rect::new(50.0, 50.0, 5.0, 5.0), 0.4)
                .with_range(30.0)
                .with_height_band(0.2, 1.1)
        );
    }

    #[test]
    fn test_from_parts_rejects_mismatched_lengths() {
        let result = DetectionBatch::from_parts(
            "car",
            vec![Rect::new(0.0, 0.0, 10.0, 10.0)],
            vec![0.9],
            vec![12.5, 30.0],
            vec![0.5],
            vec![1.8],
        );

        assert_eq!(
            result,
            Err(TrackError::MismatchedBatch {
                rects: 1,
                scores: 1,
                ranges: 2,
                min_heights: 1,
                max_heights: 1,
            })
        );
    }

    #[test]
    fn test_validate() {
        let ok = DetectionBatch::new(
            "person",
            vec![
                Detection::new(Rect::new(0.0, 0.0, 10.0, 10.0), 0.5),
                Detection::new(Rect::new(0.0, 0.0, 0.0, 0.0), 0.5),
            ],
        );
        assert!(ok.validate().is_ok());

        let negative = DetectionBatch::new(
            "person",
            vec![Detection::new(Rect::new(0.0, 0.0, -1.0, 10.0), 0.5)],
        );
        assert!(matches!(
            negative.validate(),
            Err(TrackError::InvalidDetection(_))
        ));

        let nan = DetectionBatch::new(
            "person",
            vec![Detection::new(Rect::new(f32::NAN, 0.0, 1.0, 10.0), 0.5)],
        );
        assert!(nan.validate().is_err());
    }
}
