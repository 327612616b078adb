use std::time::Instant;

use glam::I64Vec2;

use overmap_core::config::MapConfig;
use overmap_core::grid::snap_to_tile_center;
use overmap_core::types::{Marker, TileCoordinate, TileHandle, UserId, WorldId};
use overmap_render::canvas::BufferCanvas;
use overmap_render::tracker::{MarkerTracker, TileView};
use overmap_world::gui::TilePick;
use overmap_world::session::{self, MaterializeError, SessionResponse, TileMaterializer};
use overmap_world::store::SessionStore;

use crate::scenes::{self, SceneConfig};

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub marker_count: u32,
    pub frame_count: u32,
    pub timings: TimingSeries,
}

/// Hands out sequential handles; the bench has no real map artifacts.
#[derive(Default)]
struct CountingMaterializer {
    next_handle: u32,
}

impl TileMaterializer for CountingMaterializer {
    fn materialize(&mut self, _tile: &TileCoordinate) -> Result<TileHandle, MaterializeError> {
        self.next_handle += 1;
        Ok(TileHandle(self.next_handle))
    }
}

/// Runs render benchmarks against an in-memory canvas.
pub struct BenchmarkRunner {
    frame_count: u32,
    store: SessionStore,
    materializer: CountingMaterializer,
}

impl BenchmarkRunner {
    pub fn new(frame_count: u32) -> Self {
        Self {
            frame_count,
            store: SessionStore::new(),
            materializer: CountingMaterializer::default(),
        }
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&mut self, config: &SceneConfig) -> BenchmarkResult {
        log::info!(
            "Running scene '{}' ({} markers, scale {})...",
            config.name,
            config.marker_count,
            config.scale.ordinal()
        );

        let world = WorldId::new("bench");
        let user = UserId::new("bench-driver");
        let center = snap_to_tile_center(I64Vec2::ZERO, config.scale);

        // Drive the session path for the scene's tile, so the registry,
        // confirmation gate, and labeling machinery get exercised
        // alongside the renderer. Repeat runs find the tile recorded and
        // skip materialization.
        session::select_scale(
            &mut self.store,
            &user,
            config.scale.ordinal() as i32,
            &world,
            I64Vec2::ZERO,
        );
        let pick = TilePick {
            world: world.clone(),
            center,
            scale: config.scale,
        };
        let response = session::select_tile(&mut self.store, &user, Some(pick), &mut self.materializer)
            .expect("bench materializer cannot fail");
        if let SessionResponse::Relocate {
            created: Some(created),
            ..
        } = &response
        {
            log::debug!("  materialized '{}' for scene", created.label);
        }
        session::confirm(&mut self.store, &user, &world, center);

        let mut tracker = MarkerTracker::new(TileView {
            world: world.clone(),
            center,
            scale: config.scale,
        });

        // Pretend base terrain so restores are observable.
        let mut canvas = BufferCanvas::filled(24);
        let base = canvas.clone();

        let map_config = MapConfig {
            show_player_names: config.show_player_names,
            show_y_level: config.show_y_level,
            ..MapConfig::default()
        };

        let mut frame_times = Vec::with_capacity(self.frame_count as usize);
        for frame in 0..self.frame_count {
            let markers: Vec<Marker> = scenes::generate_markers(config, &world, frame);

            let frame_start = Instant::now();
            tracker.render_frame(&mut canvas, &markers, &map_config);
            frame_times.push(frame_start.elapsed().as_secs_f64() * 1000.0);
        }

        // A final empty frame must reproduce the base image exactly.
        tracker.render_frame(&mut canvas, &[], &map_config);
        if canvas != base {
            log::error!("scene '{}' corrupted the base image", config.name);
        }

        let timings = compute_timings(&frame_times);
        log::info!(
            "  Done: mean={:.3}ms, p95={:.3}ms, p99={:.3}ms",
            timings.mean_ms,
            timings.p95_ms,
            timings.p99_ms
        );

        BenchmarkResult {
            scene_name: config.name.to_string(),
            marker_count: config.marker_count,
            frame_count: self.frame_count,
            timings,
        }
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
