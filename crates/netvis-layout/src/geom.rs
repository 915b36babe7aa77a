#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// A node position handed to the resolver. The resolver mutates `x`/`y` in place; writing the
/// result back to wherever the node lives is the caller's job.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

impl PositionRecord {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self { id: id.into(), x, y }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
