use crate::bounds::BoundingBox;
use crate::error::{NearestError, Result};
use rand::prelude::*;
use rand::rngs::StdRng;

/// A point in the plane with a cosmetic radius.
///
/// The radius is only carried along for rendering; neither search looks at it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    /// A point with zero radius.
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn dist_sq(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

/// Inclusive range the cosmetic radius of generated points is drawn from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusBand {
    pub min: f64,
    pub max: f64,
}

impl RadiusBand {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
            return Err(NearestError::InvalidRadiusBand { min, max });
        }
        Ok(Self { min, max })
    }

    /// Band derived from a grid cell size: the largest radius is half the
    /// larger cell side and the smallest is half of that.
    pub fn from_cell_size(cell_size: [f64; 2]) -> Self {
        let max = cell_size[0].max(cell_size[1]) / 2.0;
        Self { min: max / 2.0, max }
    }
}

/// Ordered, immutable collection of points.
///
/// The position of a point in the set is its identity: neighbor results,
/// grid cells and renderers all refer to points by index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Wraps `points`, rejecting any with a non-finite coordinate.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if let Some(index) = points.iter().position(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(NearestError::NonFiniteCoordinate { index });
        }
        Ok(Self { points })
    }

    /// Builds a set from `(x, y)` pairs with zero radius.
    pub fn from_coords(coords: &[(f64, f64)]) -> Result<Self> {
        Self::new(coords.iter().map(|&(x, y)| Point::at(x, y)).collect())
    }

    /// Builds a set from a flat array of coordinates `[x, y, x, y, ...]`.
    /// The array must hold whole pairs.
    pub fn from_flat(coords: &[f64]) -> Result<Self> {
        if coords.len() % 2 != 0 {
            return Err(NearestError::OddCoordinateCount { len: coords.len() });
        }
        Self::new(coords.chunks_exact(2).map(|c| Point::at(c[0], c[1])).collect())
    }

    /// Places `count` points uniformly inside `bounds` with radii drawn from `band`.
    pub fn random<R: Rng>(count: usize, bounds: &BoundingBox, band: RadiusBand, rng: &mut R) -> Self {
        let w = bounds.width();
        let h = bounds.height();
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            let x = bounds.min[0] + rng.r#gen::<f64>() * w;
            let y = bounds.min[1] + rng.r#gen::<f64>() * h;
            let radius = band.min + rng.r#gen::<f64>() * (band.max - band.min);
            points.push(Point::new(x, y, radius));
        }
        Self { points }
    }

    /// Reproducible variant of [`PointSet::random`].
    pub fn random_seeded(count: usize, bounds: &BoundingBox, band: RadiusBand, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::random(count, bounds, band, &mut rng)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Flat `[x, y, x, y, ...]` copy of the positions.
    pub fn to_flat(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }
}

impl std::ops::Index<usize> for PointSet {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Seed used when the caller does not provide one.
///
/// In the browser it is drawn from `Math.random`; natively it is fixed so
/// unseeded runs stay reproducible.
pub fn default_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789
    }
}
