use std::fmt;

use opencv::core::Rect;

/// Axis aligned box in pixel coordinates, `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Builds a box from its top-left and bottom-right (exclusive) corners.
    pub fn from_corners(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Self {
        Self::new(xmin, ymin, xmax - xmin, ymax - ymin)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        self.width as i64 * self.height as i64
    }

    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= x || bottom <= y {
            return None;
        }

        Some(BoundingBox::from_corners(x, y, right, bottom))
    }

    /// Intersection over union, `0.0` when the boxes do not overlap or both are empty.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let intersection = self.intersection(other).map(|b| b.area()).unwrap_or(0);
        let union = self.area() + other.area() - intersection;
        if union <= 0 {
            return 0.0;
        }

        (intersection as f64 / union as f64) as f32
    }

    /// Scales position and size, used to map a window found on a pyramid level
    /// back to the original image.
    pub fn scaled(&self, factor: f64) -> BoundingBox {
        BoundingBox {
            x: (self.x as f64 * factor).round() as i32,
            y: (self.y as f64 * factor).round() as i32,
            width: (self.width as f64 * factor).round() as i32,
            height: (self.height as f64 * factor).round() as i32,
        }
    }

    /// Restricts the box to an image of `cols` x `rows` pixels.
    pub fn clipped(&self, cols: i32, rows: i32) -> BoundingBox {
        let x = self.x.clamp(0, cols);
        let y = self.y.clamp(0, rows);
        let right = self.right().clamp(0, cols);
        let bottom = self.bottom().clamp(0, rows);

        BoundingBox::from_corners(x, y, right, bottom)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} x {} from ({}, {})]", self.width, self.height, self.x, self.y)
    }
}

impl From<BoundingBox> for Rect {
    fn from(b: BoundingBox) -> Self {
        Rect::new(b.x, b.y, b.width, b.height)
    }
}

impl From<Rect> for BoundingBox {
    fn from(r: Rect) -> Self {
        BoundingBox::new(r.x, r.y, r.width, r.height)
    }
}

/// Candidate window with the classifier score that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub score: f32,
}

impl Detection {
    pub fn new(bbox: BoundingBox, score: f32) -> Self {
        Self { bbox, score }
    }
}
