use crate::bounds::BoundingBox;
use crate::error::{NearestError, Result};
use crate::point::PointSet;
use log::debug;

/// Shape of a uniform grid laid over a rectangular region.
///
/// Only obtainable through the validating constructors, so every
/// `GridConfig` has at least one cell per axis and a positive cell size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    origin: [f64; 2],
    extent: [f64; 2],
    cells: [usize; 2],
}

impl GridConfig {
    /// Grid of `nx` by `ny` cells covering `bounds`.
    pub fn new(bounds: &BoundingBox, nx: usize, ny: usize) -> Result<Self> {
        Self::from_parts(bounds.min, bounds.extent(), nx, ny)
    }

    /// Grid of `nx` by `ny` cells with its lower corner at `origin`.
    pub fn from_parts(origin: [f64; 2], extent: [f64; 2], nx: usize, ny: usize) -> Result<Self> {
        if nx == 0 || ny == 0 {
            return Err(NearestError::invalid(format!("cell counts must be at least 1, got {nx}x{ny}")));
        }
        if nx.checked_mul(ny).is_none() {
            return Err(NearestError::invalid(format!("{nx}x{ny} cells overflow the cell count")));
        }
        if !(origin[0].is_finite() && origin[1].is_finite()) {
            return Err(NearestError::invalid(format!("origin {origin:?} is not finite")));
        }
        if !(extent[0].is_finite() && extent[1].is_finite()) || extent[0] <= 0.0 || extent[1] <= 0.0 {
            return Err(NearestError::invalid(format!("extent {extent:?} must be finite and positive")));
        }
        let config = Self { origin, extent, cells: [nx, ny] };
        let [cw, ch] = config.cell_size();
        if cw <= 0.0 || ch <= 0.0 {
            return Err(NearestError::invalid(format!("cell size {cw}x{ch} underflows")));
        }
        Ok(config)
    }

    pub fn origin(&self) -> [f64; 2] {
        self.origin
    }

    pub fn extent(&self) -> [f64; 2] {
        self.extent
    }

    /// Number of cells along X and Y.
    pub fn cells(&self) -> [usize; 2] {
        self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells[0] * self.cells[1]
    }

    /// Width and height of one cell.
    pub fn cell_size(&self) -> [f64; 2] {
        [self.extent[0] / self.cells[0] as f64, self.extent[1] / self.cells[1] as f64]
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.origin, [self.origin[0] + self.extent[0], self.origin[1] + self.extent[1]])
    }

    /// Cell coordinates for a position.
    ///
    /// Floor division by the cell size; anything outside the region, or
    /// pushed past the last grid line by rounding, is clamped to the nearest
    /// valid cell.
    pub fn locate(&self, x: f64, y: f64) -> (usize, usize) {
        let [cw, ch] = self.cell_size();
        let ix = clamp_axis((x - self.origin[0]) / cw, self.cells[0]);
        let iy = clamp_axis((y - self.origin[1]) / ch, self.cells[1]);
        (ix, iy)
    }

    /// Linear row-major index of cell `(ix, iy)`.
    ///
    /// Does not check the coordinates; see [`GridConfig::checked_bin_index`].
    #[inline]
    pub fn bin_index(&self, ix: usize, iy: usize) -> usize {
        ix + iy * self.cells[0]
    }

    /// Row-major index of cell `(ix, iy)`, or `None` outside the grid.
    pub fn checked_bin_index(&self, ix: usize, iy: usize) -> Option<usize> {
        (ix < self.cells[0] && iy < self.cells[1]).then(|| self.bin_index(ix, iy))
    }

    /// Lower corner of cell `(ix, iy)` in region coordinates.
    pub fn cell_origin(&self, ix: usize, iy: usize) -> [f64; 2] {
        let [cw, ch] = self.cell_size();
        [self.origin[0] + ix as f64 * cw, self.origin[1] + iy as f64 * ch]
    }
}

fn clamp_axis(scaled: f64, cells: usize) -> usize {
    let f = scaled.floor();
    if f.is_nan() || f <= 0.0 {
        0
    } else if f >= (cells - 1) as f64 {
        cells - 1
    } else {
        f as usize
    }
}

/// Heat-map shade for a cell holding `count` points: ten or more saturate to 1.
pub fn occupancy_alpha(count: usize) -> f64 {
    (count as f64 / 10.0).min(1.0)
}

/// Checkerboard parity of a cell, used to alternate point colours by cell.
pub fn cell_parity(ix: usize, iy: usize, nx: usize) -> bool {
    (ix + iy * nx) % 2 == 0
}

/// Uniform grid holding, per cell, the indices of the points inside it.
///
/// Built wholesale from one [`PointSet`]; every point index appears in
/// exactly one cell. There is no incremental update: a new point set means
/// a new index.
#[derive(Clone, Debug)]
pub struct GridIndex {
    config: GridConfig,
    /// Point indices per cell, row-major (`ix + iy * nx`).
    grid_bins: Vec<Vec<usize>>,
    /// Bin each point was placed in.
    point_bin_ids: Vec<usize>,
}

/// Builds the cell index for `points` in O(N).
pub fn build_grid(points: &PointSet, config: GridConfig) -> GridIndex {
    GridIndex::build(points, config)
}

impl GridIndex {
    pub fn build(points: &PointSet, config: GridConfig) -> Self {
        let mut grid_bins = vec![Vec::new(); config.cell_count()];
        let mut point_bin_ids = Vec::with_capacity(points.len());

        for (i, p) in points.iter().enumerate() {
            let (ix, iy) = config.locate(p.x, p.y);
            let bin_idx = config.bin_index(ix, iy);
            grid_bins[bin_idx].push(i);
            point_bin_ids.push(bin_idx);
        }

        debug!(
            "indexed {} points into {}x{} grid ({} occupied cells)",
            points.len(),
            config.cells[0],
            config.cells[1],
            grid_bins.iter().filter(|b| !b.is_empty()).count()
        );

        Self { config, grid_bins, point_bin_ids }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Number of cells along X and Y.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.config.cells[0], self.config.cells[1])
    }

    /// Number of points the index was built from.
    pub fn point_count(&self) -> usize {
        self.point_bin_ids.len()
    }

    /// Point indices in cell `(ix, iy)`, or `None` outside the grid.
    pub fn cell(&self, ix: usize, iy: usize) -> Option<&[usize]> {
        let bin = self.config.checked_bin_index(ix, iy)?;
        Some(&self.grid_bins[bin])
    }

    /// Cell holding point `index`, if the index is in range.
    pub fn cell_of(&self, index: usize) -> Option<(usize, usize)> {
        let bin = *self.point_bin_ids.get(index)?;
        let nx = self.config.cells[0];
        Some((bin % nx, bin / nx))
    }

    /// All cells in row-major order as `(ix, iy, residents)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &[usize])> + '_ {
        let nx = self.config.cells[0];
        self.grid_bins.iter().enumerate().map(move |(bin, residents)| (bin % nx, bin / nx, residents.as_slice()))
    }

    /// Bins of the clipped 3x3 block around `(ix, iy)`, row-major.
    pub fn neighborhood(&self, ix: usize, iy: usize) -> impl Iterator<Item = &[usize]> + '_ {
        let [nx, ny] = self.config.cells;
        let (x0, x1) = (ix.saturating_sub(1), (ix + 1).min(nx - 1));
        let (y0, y1) = (iy.saturating_sub(1), (iy + 1).min(ny - 1));
        (y0..=y1).flat_map(move |by| (x0..=x1).map(move |bx| self.grid_bins[self.config.bin_index(bx, by)].as_slice()))
    }

    /// Number of points per cell, row-major.
    pub fn occupancy(&self) -> Vec<usize> {
        self.grid_bins.iter().map(Vec::len).collect()
    }

    /// Heat-map shade of cell `(ix, iy)`, see [`occupancy_alpha`].
    pub fn occupancy_alpha(&self, ix: usize, iy: usize) -> Option<f64> {
        self.cell(ix, iy).map(|residents| occupancy_alpha(residents.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    #[test]
    fn test_grid_indexing_2d() {
        let bounds = BoundingBox::new([0.0, 0.0], [10.0, 10.0]);
        let config = GridConfig::new(&bounds, 10, 10).unwrap(); // 1x1 cells

        assert_eq!(config.locate(0.5, 0.5), (0, 0));
        assert_eq!(config.locate(1.5, 0.5), (1, 0));
        assert_eq!(config.locate(0.5, 1.5), (0, 1));
        assert_eq!(config.bin_index(0, 1), 10);
    }

    #[test]
    fn test_grid_line_uses_floor() {
        let config = GridConfig::new(&BoundingBox::from_size(200.0, 200.0), 2, 2).unwrap();
        assert_eq!(config.locate(100.0, 100.0), (1, 1));
        assert_eq!(config.locate(99.999, 0.0), (0, 0));
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let config = GridConfig::new(&BoundingBox::from_size(10.0, 10.0), 5, 5).unwrap();
        assert_eq!(config.locate(10.0, 10.0), (4, 4));
        assert_eq!(config.locate(1e9, -3.0), (4, 0));
        assert_eq!(config.locate(-0.1, 25.0), (0, 4));
    }

    #[test]
    fn test_offset_origin() {
        let bounds = BoundingBox::new([-50.0, 100.0], [50.0, 200.0]);
        let config = GridConfig::new(&bounds, 4, 4).unwrap();
        assert_eq!(config.cell_size(), [25.0, 25.0]);
        assert_eq!(config.locate(-50.0, 100.0), (0, 0));
        assert_eq!(config.locate(0.0, 150.0), (2, 2));
        assert_eq!(config.cell_origin(1, 3), [-25.0, 175.0]);
        assert_eq!(config.bounds(), bounds);
    }

    #[test]
    fn test_invalid_configurations() {
        let bounds = BoundingBox::from_size(10.0, 10.0);
        assert!(GridConfig::new(&bounds, 0, 3).is_err());
        assert!(GridConfig::new(&bounds, 3, 0).is_err());
        assert!(GridConfig::new(&BoundingBox::from_size(0.0, 10.0), 3, 3).is_err());
        assert!(GridConfig::new(&BoundingBox::from_size(10.0, -1.0), 3, 3).is_err());
        assert!(GridConfig::from_parts([f64::NAN, 0.0], [1.0, 1.0], 1, 1).is_err());
        assert!(GridConfig::from_parts([0.0, 0.0], [f64::INFINITY, 1.0], 1, 1).is_err());

        let err = GridConfig::new(&bounds, usize::MAX, 2).unwrap_err();
        assert!(matches!(err, NearestError::InvalidConfiguration { .. }), "{err}");
        assert!(GridConfig::new(&bounds, usize::MAX / 2 + 1, 2).is_err());
    }

    #[test]
    fn test_cell_out_of_range() {
        let coords: Vec<(f64, f64)> = (0..3).map(|i| (0.5 + i as f64, 1.5)).collect();
        let points = PointSet::from_coords(&coords).unwrap();
        let config = GridConfig::new(&BoundingBox::from_size(3.0, 3.0), 3, 3).unwrap();
        let grid = build_grid(&points, config);

        assert_eq!(grid.cell(0, 1), Some(&[0][..]));
        assert_eq!(grid.cell(2, 1), Some(&[2][..]));
        assert_eq!(grid.cell(3, 0), None);
        assert_eq!(grid.cell(0, 3), None);
        assert_eq!(config.checked_bin_index(3, 0), None);
        assert_eq!(config.checked_bin_index(2, 2), Some(8));
        assert_eq!(grid.occupancy_alpha(3, 0), None);
    }

    #[test]
    fn test_every_point_in_exactly_one_cell() {
        let points = PointSet::new(vec![
            Point::at(0.0, 0.0),
            Point::at(9.99, 9.99),
            Point::at(10.0, 10.0),
            Point::at(-4.0, 3.0),
            Point::at(5.0, 5.0),
        ])
        .unwrap();
        let config = GridConfig::new(&BoundingBox::from_size(10.0, 10.0), 3, 3).unwrap();
        let grid = build_grid(&points, config);

        let mut seen = vec![0; points.len()];
        for (_, _, residents) in grid.cells() {
            for &i in residents {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c == 1), "{:?}", seen);
        assert_eq!(grid.occupancy().iter().sum::<usize>(), points.len());
        assert_eq!(grid.cell_of(2), Some((2, 2)));
        assert_eq!(grid.cell_of(3), Some((0, 0)));
        assert_eq!(grid.cell_of(5), None);
    }

    #[test]
    fn test_neighborhood_is_clipped() {
        let config = GridConfig::new(&BoundingBox::from_size(3.0, 3.0), 3, 3).unwrap();
        let grid = build_grid(&PointSet::default(), config);

        assert_eq!(grid.neighborhood(0, 0).count(), 4);
        assert_eq!(grid.neighborhood(1, 0).count(), 6);
        assert_eq!(grid.neighborhood(1, 1).count(), 9);
        assert_eq!(grid.neighborhood(2, 2).count(), 4);
    }

    #[test]
    fn test_occupancy_alpha() {
        let coords: Vec<(f64, f64)> = (0..12).map(|i| (0.1 * i as f64, 0.5)).collect();
        let points = PointSet::from_coords(&coords).unwrap();
        let config = GridConfig::new(&BoundingBox::from_size(4.0, 4.0), 2, 2).unwrap();
        let grid = build_grid(&points, config);

        assert_eq!(grid.occupancy(), vec![12, 0, 0, 0]);
        assert_eq!(grid.occupancy_alpha(0, 0), Some(1.0));
        assert_eq!(grid.occupancy_alpha(1, 1), Some(0.0));
    }

    #[test]
    fn test_cell_parity() {
        assert!(cell_parity(0, 0, 15));
        assert!(!cell_parity(1, 0, 15));
        assert!(!cell_parity(0, 1, 15));
        assert!(cell_parity(0, 1, 16));
    }
}
