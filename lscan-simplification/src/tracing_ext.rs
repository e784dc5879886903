//! Tracing helpers for the simplification pipeline.
//!
//! The library never installs a subscriber. Hosts that want output set one up,
//! for example:
//!
//! ```rust,ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lscan_simplification=debug")
//!     .init();
//! ```
//!
//! Stage summaries are logged at INFO, per-face detail at DEBUG, and skipped
//! faces at WARN.

use lscan_core::{BoundingBox, FacetMesh};
use std::time::Instant;
use tracing::span::EnteredSpan;
use tracing::{debug, info, Level, Span};

/// Logs how long a pipeline stage took when dropped.
///
/// The stage span stays entered for the timer's lifetime, so events logged
/// during the stage nest under it.
///
/// ```rust,ignore
/// let _timer = StageTimer::new("boundary extraction");
/// // ... stage work ...
/// ```
pub struct StageTimer {
    stage: &'static str,
    start: Instant,
    span: EnteredSpan,
}

impl StageTimer {
    pub fn new(stage: &'static str) -> Self {
        let span = tracing::info_span!("simplify_stage", stage = stage).entered();
        debug!(target: "lscan_simplification::timing", stage = stage, "Starting stage");
        Self {
            stage,
            start: Instant::now(),
            span,
        }
    }

    /// Timer whose span also records how many items the stage received
    pub fn with_items(stage: &'static str, items: usize) -> Self {
        let span = tracing::info_span!("simplify_stage", stage = stage, items = items).entered();
        debug!(
            target: "lscan_simplification::timing",
            stage = stage,
            items = items,
            "Starting stage"
        );
        Self {
            stage,
            start: Instant::now(),
            span,
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        info!(
            target: "lscan_simplification::timing",
            stage = self.stage,
            elapsed_ms = format!("{:.2}", self.elapsed_ms()),
            "Stage completed"
        );
    }
}

/// Log facet count, distinct normals and extent of `mesh` at debug level
pub fn log_mesh_stats(mesh: &FacetMesh, context: &str) {
    if !tracing::enabled!(target: "lscan_simplification::mesh_state", Level::DEBUG) {
        return;
    }
    let (min, max) = mesh.bounding_box();
    let dims = max - min;

    debug!(
        target: "lscan_simplification::mesh_state",
        context = context,
        facets = mesh.len(),
        normals = mesh.normals().len(),
        dimensions = format!("{:.2} x {:.2} x {:.2}", dims.x, dims.y, dims.z),
        "Mesh state"
    );
}
