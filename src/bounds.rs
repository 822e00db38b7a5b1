/// Axis-aligned rectangle bounding the region the points live in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl BoundingBox {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Self { min, max }
    }

    /// Rectangle with its lower corner at the origin.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new([0.0, 0.0], [width, height])
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    /// Width and height as an `[w, h]` pair.
    pub fn extent(&self) -> [f64; 2] {
        [self.width(), self.height()]
    }

    /// Half-open containment: the lower edges are inside, the upper edges are not.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min[0] && x < self.max[0] && y >= self.min[1] && y < self.max[1]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::from_size(500.0, 400.0)
    }
}
