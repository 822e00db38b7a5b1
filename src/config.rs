use crate::bounds::BoundingBox;
use crate::error::Result;
use crate::grid::GridConfig;
use crate::point::{default_seed, RadiusBand};

/// Settings for one nearest-neighbor query.
///
/// Defaults describe a 500x400 region with 50 points over a 15x15 grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QueryConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Region the points are placed in; also the extent of the grid.
    pub bounds: BoundingBox,
    /// Grid cells along X and Y.
    pub grid_cells: [usize; 2],
    /// Radius band for generated points. Derived from the cell size when unset.
    pub radius_band: Option<RadiusBand>,
    /// RNG seed. Falls back to [`default_seed`] when unset.
    pub seed: Option<u64>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            point_count: 50,
            bounds: BoundingBox::default(),
            grid_cells: [15, 15],
            radius_band: None,
            seed: None,
        }
    }
}

impl QueryConfig {
    pub fn new(point_count: usize, bounds: BoundingBox, nx: usize, ny: usize) -> Self {
        Self { point_count, bounds, grid_cells: [nx, ny], ..Self::default() }
    }

    #[must_use]
    pub fn with_point_count(mut self, point_count: usize) -> Self {
        self.point_count = point_count;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_grid_cells(mut self, nx: usize, ny: usize) -> Self {
        self.grid_cells = [nx, ny];
        self
    }

    #[must_use]
    pub fn with_radius_band(mut self, band: RadiusBand) -> Self {
        self.radius_band = Some(band);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Grid described by these settings.
    ///
    /// # Errors
    /// [`NearestError::InvalidConfiguration`](crate::NearestError::InvalidConfiguration) for zero cell counts or a
    /// degenerate region.
    pub fn grid_config(&self) -> Result<GridConfig> {
        GridConfig::new(&self.bounds, self.grid_cells[0], self.grid_cells[1])
    }

    /// Radius band to generate points with.
    pub fn radius_band(&self) -> Result<RadiusBand> {
        match self.radius_band {
            Some(band) => RadiusBand::new(band.min, band.max),
            None => Ok(RadiusBand::from_cell_size(self.grid_config()?.cell_size())),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(default_seed)
    }

    /// Checks everything a query needs before any work is done.
    pub fn validate(&self) -> Result<()> {
        self.grid_config()?;
        self.radius_band()?;
        Ok(())
    }
}
