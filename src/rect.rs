use nalgebra::Matrix1x4;
use num::Float;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Debug;

/* ------------------------------------------------------------------------------
 * Rect struct
 * ------------------------------------------------------------------------------ */

/// Axis-aligned rectangle stored as `[x, y, width, height]` (top-left corner plus size).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rect<T>
where
    T: Debug + Float,
{
    tlwh: Matrix1x4<T>,
}

impl<T> Rect<T>
where
    T: Debug + Float,
{
    pub fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            tlwh: Matrix1x4::new(x, y, width, height),
        }
    }

    #[inline(always)]
    pub fn x(&self) -> T {
        self.tlwh[(0, 0)]
    }

    #[inline(always)]
    pub fn set_x(&mut self, x: T) {
        self.tlwh[(0, 0)] = x;
    }

    #[inline(always)]
    pub fn y(&self) -> T {
        self.tlwh[(0, 1)]
    }

    #[inline(always)]
    pub fn set_y(&mut self, y: T) {
        self.tlwh[(0, 1)] = y;
    }

    #[inline(always)]
    pub fn width(&self) -> T {
        self.tlwh[(0, 2)]
    }

    #[inline(always)]
    pub fn set_width(&mut self, width: T) {
        self.tlwh[(0, 2)] = width;
    }

    #[inline(always)]
    pub fn height(&self) -> T {
        self.tlwh[(0, 3)]
    }

    #[inline(always)]
    pub fn set_height(&mut self, height: T) {
        self.tlwh[(0, 3)] = height;
    }

    /// Plain `width * height`. Negative extents yield a non-positive area,
    /// which the suppression pass treats as degenerate.
    pub fn area(&self) -> T {
        self.width() * self.height()
    }

    /// Intersection with `other`, or `None` when either overlap extent is
    /// not strictly positive.
    pub fn intersection(&self, other: &Rect<T>) -> Option<Rect<T>> {
        let [ax1, ay1, ax2, ay2] = self.get_xyxy();
        let [bx1, by1, bx2, by2] = other.get_xyxy();

        let x1 = ax1.max(bx1);
        let y1 = ay1.max(by1);
        let width = ax2.min(bx2) - x1;
        let height = ay2.min(by2) - y1;

        if width > T::zero() && height > T::zero() {
            Some(Rect::new(x1, y1, width, height))
        } else {
            None
        }
    }

    /// Intersection area, zero when the rectangles do not overlap.
    pub fn intersection_area(&self, other: &Rect<T>) -> T {
        self.intersection(other)
            .map(|r| r.area())
            .unwrap_or_else(T::zero)
    }

    /// Get bounding box as [x1, y1, x2, y2] format
    pub fn get_xyxy(&self) -> [T; 4] {
        [
            self.tlwh[(0, 0)],
            self.tlwh[(0, 1)],
            self.tlwh[(0, 0)] + self.tlwh[(0, 2)],
            self.tlwh[(0, 1)] + self.tlwh[(0, 3)],
        ]
    }

    /// Create Rect from [x1, y1, x2, y2] format
    pub fn from_xyxy(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// Shift the rectangle by `(dx, dy)` without changing its size.
    pub fn translated(&self, dx: T, dy: T) -> Self {
        Self::new(self.x() + dx, self.y() + dy, self.width(), self.height())
    }

    pub fn is_finite(&self) -> bool {
        [self.x(), self.y(), self.width(), self.height()]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl<T> From<[T; 4]> for Rect<T>
where
    T: Debug + Float,
{
    fn from(tlwh: [T; 4]) -> Self {
        Self::new(tlwh[0], tlwh[1], tlwh[2], tlwh[3])
    }
}

/* ------------------------------------------------------------------------------
 * Serde: a rect travels as a plain [x, y, width, height] array
 * ------------------------------------------------------------------------------ */
impl<T> Serialize for Rect<T>
where
    T: Debug + Float + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x(), self.y(), self.width(), self.height()].serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Rect<T>
where
    T: Debug + Float + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tlwh = <[T; 4]>::deserialize(deserializer)?;
        Ok(Self::from(tlwh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nearly_eq::assert_nearly_eq;

    #[test]
    fn test_area() {
        let rect = Rect::new(10.0_f32, 20.0, 4.0, 5.0);
        assert_nearly_eq!(rect.area(), 20.0);

        let degenerate = Rect::new(0.0_f32, 0.0, 0.0, 5.0);
        assert_nearly_eq!(degenerate.area(), 0.0);
    }

    #[test]
    fn test_intersection_overlapping() {
        let a = Rect::new(0.0_f32, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0_f32, 6.0, 10.0, 10.0);

        let inter = a.intersection(&b).unwrap();
        assert_eq!(inter, Rect::new(5.0, 6.0, 5.0, 4.0));
        assert_nearly_eq!(a.intersection_area(&b), 20.0);
        assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn test_intersection_touching_edges_is_empty() {
        let a = Rect::new(0.0_f32, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0_f32, 0.0, 10.0, 10.0);

        assert!(a.intersection(&b).is_none());
        assert_nearly_eq!(a.intersection_area(&b), 0.0);
    }

    #[test]
    fn test_intersection_contained() {
        let outer = Rect::new(0.0_f32, 0.0, 100.0, 100.0);
        let inner = Rect::new(20.0_f32, 30.0, 10.0, 10.0);

        assert_eq!(outer.intersection(&inner), Some(inner.clone()));
    }

    #[test]
    fn test_xyxy_conversion() {
        let rect = Rect::from_xyxy(1.0_f32, 2.0, 11.0, 22.0);
        assert_eq!(rect, Rect::new(1.0, 2.0, 10.0, 20.0));
        assert_eq!(rect.get_xyxy(), [1.0, 2.0, 11.0, 22.0]);
    }

    #[test]
    fn test_translated_keeps_size() {
        let rect = Rect::new(1.0_f32, 2.0, 3.0, 4.0).translated(10.0, -2.0);
        assert_eq!(rect, Rect::new(11.0, 0.0, 3.0, 4.0));
    }

    #[test]
    fn test_serde_as_tlwh_array() {
        let rect = Rect::new(1.0_f32, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&rect).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");
        let back: Rect<f32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rect);
    }
}
