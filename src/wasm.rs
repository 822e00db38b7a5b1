use crate::bounds::BoundingBox;
use crate::config::QueryConfig;
use crate::point::{default_seed, PointSet};
use crate::query::{NeighborQuery, QueryReport};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

fn to_js(e: crate::NearestError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Nearest-neighbor query exposed to JavaScript.
///
/// Holds the report of the last run; the getters read from it and return
/// empty arrays before the first run.
#[wasm_bindgen(js_name = NeighborQuery)]
pub struct NeighborQueryWASM {
    inner: NeighborQuery,
    report: Option<QueryReport>,
}

#[wasm_bindgen(js_class = NeighborQuery)]
impl NeighborQueryWASM {
    /// Query over a `width` x `height` region starting at the origin with an
    /// `nx` x `ny` grid.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, nx: usize, ny: usize, point_count: usize) -> Result<NeighborQueryWASM, JsValue> {
        let config = QueryConfig::new(point_count, BoundingBox::from_size(width, height), nx, ny);
        let inner = NeighborQuery::new(config).map_err(to_js)?;
        Ok(NeighborQueryWASM { inner, report: None })
    }

    /// Generates points with a random seed and runs both searches.
    pub fn run(&mut self) -> Result<(), JsValue> {
        self.run_seeded(default_seed() as u32)
    }

    pub fn run_seeded(&mut self, seed: u32) -> Result<(), JsValue> {
        self.report = Some(self.inner.run_seeded(u64::from(seed)).map_err(to_js)?);
        Ok(())
    }

    /// Runs both searches on caller-supplied points `[x, y, x, y, ...]`.
    pub fn run_on(&mut self, coords: &[f64]) -> Result<(), JsValue> {
        let points = PointSet::from_flat(coords).map_err(to_js)?;
        self.report = Some(self.inner.run_on(points).map_err(to_js)?);
        Ok(())
    }

    /// Flat `[x, y, radius, ...]` of the last run's points.
    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Vec<f64> {
        self.report
            .as_ref()
            .map(|r| r.points().iter().flat_map(|p| [p.x, p.y, p.radius]).collect())
            .unwrap_or_default()
    }

    /// Brute-force neighbors, `-1` for none.
    #[wasm_bindgen(getter)]
    pub fn brute(&self) -> Vec<i32> {
        self.report.as_ref().map(|r| r.brute().to_signed()).unwrap_or_default()
    }

    /// Grid neighbors, `-1` for none.
    #[wasm_bindgen(getter)]
    pub fn grid(&self) -> Vec<i32> {
        self.report.as_ref().map(|r| r.grid().to_signed()).unwrap_or_default()
    }

    /// Points per cell, row-major.
    #[wasm_bindgen(getter)]
    pub fn occupancy(&self) -> Vec<u32> {
        self.report
            .as_ref()
            .map(|r| r.occupancy().iter().map(|&c| c as u32).collect())
            .unwrap_or_default()
    }

    #[wasm_bindgen(getter)]
    pub fn mismatch_count(&self) -> usize {
        self.report.as_ref().map_or(0, |r| r.consistency().mismatch_count())
    }

    #[wasm_bindgen(getter)]
    pub fn brute_comparisons(&self) -> usize {
        self.report.as_ref().map_or(0, |r| r.brute().comparisons())
    }

    #[wasm_bindgen(getter)]
    pub fn grid_comparisons(&self) -> usize {
        self.report.as_ref().map_or(0, |r| r.grid().comparisons())
    }
}
