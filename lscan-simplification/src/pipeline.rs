//! The staged simplification pipeline
//!
//! Each stage is a plain function over the previous stage's output, so a host
//! can drive them one by one and check for cancellation in between.
//! [`Simplifier`] runs them all in order:
//!
//! 1. [`make_normal_groups`]: facets to validated triangles, grouped by normal
//! 2. [`make_faces`]: connected faces inside each group
//! 3. [`make_face_boundaries`]: unshared edges of each face
//! 4. [`make_simple_boundaries`]: collinear edges merged
//! 5. [`split_boundaries`]: boundaries split into loops
//! 6. [`find_outside_boundaries`]: outer loop moved to the front
//! 7. [`triangulate_faces`]: constrained triangulation per face
//! 8. [`reassemble`]: one facet mesh

use crate::boundary::{
    extract_boundary, simplify_boundary_with_cancel, FaceBoundary, SIMPLIFY_STAGE,
};
use crate::face::{assemble_faces, Face};
use crate::loops::{
    order_bucket, split_loops_with_cancel, Bucket, OuterLoopMethod, OuterLoopStrategy, SPLIT_STAGE,
};
use crate::normal_grouping::{group_by_normal, NormalGroup, DEFAULT_NORMAL_TOLERANCE};
use crate::reassembly::reassemble;
use crate::tracing_ext::{log_mesh_stats, StageTimer};
use lscan_core::{CancelFlag, Error, FacetMesh, Result, Vector3d, DEFAULT_PARALLEL_TOLERANCE};
use lscan_triangulation::{
    triangulate_face, TriangulatedFace, TriangulationConfig, DEFAULT_VERTICAL_THRESHOLD,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const NORMAL_GROUPING_STAGE: &str = "normal grouping";
pub const FACE_ASSEMBLY_STAGE: &str = "face assembly";
pub const BOUNDARY_STAGE: &str = "boundary extraction";
pub const OUTER_LOOP_STAGE: &str = "outer loop detection";
pub const TRIANGULATION_STAGE: &str = "triangulation";
pub const REASSEMBLY_STAGE: &str = "reassembly";

/// What to do when a single face cannot be triangulated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceErrorPolicy {
    /// Fail the whole run with the face's error
    #[default]
    Abort,
    /// Leave the face out of the output and record it in the report
    Skip,
}

/// Configuration for the simplification pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyConfig {
    /// Angle in degrees under which two facet normals count as equal
    pub normal_angle_tolerance: f64,
    /// Angle in degrees under which neighbouring boundary edges are merged
    pub merge_angle_tolerance: f64,
    /// |normal.z| below which a face is rotated before projection
    pub vertical_threshold: f64,
    /// How the outer loop of a face is chosen
    pub outer_loop: OuterLoopMethod,
    /// Handling of faces the triangulator rejects
    pub face_errors: FaceErrorPolicy,
    /// Triangulate faces on the rayon thread pool
    pub enable_parallel: bool,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            normal_angle_tolerance: DEFAULT_NORMAL_TOLERANCE,
            merge_angle_tolerance: DEFAULT_PARALLEL_TOLERANCE,
            vertical_threshold: DEFAULT_VERTICAL_THRESHOLD,
            outer_loop: OuterLoopMethod::default(),
            face_errors: FaceErrorPolicy::default(),
            enable_parallel: false,
        }
    }
}

impl SimplifyConfig {
    /// Reject negative or non-finite tolerances
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("normal_angle_tolerance", self.normal_angle_tolerance),
            ("merge_angle_tolerance", self.merge_angle_tolerance),
            ("vertical_threshold", self.vertical_threshold),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidData(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn triangulation(&self) -> TriangulationConfig {
        TriangulationConfig {
            vertical_threshold: self.vertical_threshold,
        }
    }
}

/// The loops of one face and its normal
#[derive(Debug, Clone, PartialEq)]
pub struct FaceLoops {
    pub loops: Bucket,
    pub normal: Vector3d,
}

/// A face left out under [`FaceErrorPolicy::Skip`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedFace {
    pub face: usize,
    pub reason: String,
}

/// Counts gathered while running the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimplifyReport {
    pub input_triangles: usize,
    pub normal_groups: usize,
    pub faces: usize,
    /// Boundary edges before collinear merging
    pub boundary_edges: usize,
    /// Boundary edges after collinear merging
    pub simplified_edges: usize,
    pub loops: usize,
    pub holes: usize,
    pub output_triangles: usize,
    pub skipped: Vec<SkippedFace>,
}

impl SimplifyReport {
    /// Output triangles divided by input triangles
    pub fn reduction_ratio(&self) -> f64 {
        if self.input_triangles == 0 {
            return 0.0;
        }
        self.output_triangles as f64 / self.input_triangles as f64
    }
}

/// Convert facets to triangles and group them by normal
pub fn make_normal_groups(mesh: &FacetMesh, tolerance: f64) -> Result<Vec<NormalGroup>> {
    let triangles = mesh.to_triangles()?;
    Ok(group_by_normal(triangles, tolerance))
}

/// Split every normal group into connected faces
pub fn make_faces(groups: Vec<NormalGroup>) -> Vec<Face> {
    groups.into_iter().flat_map(assemble_faces).collect()
}

/// Raw boundary of every face
pub fn make_face_boundaries(faces: &[Face]) -> Vec<FaceBoundary> {
    faces.iter().map(extract_boundary).collect()
}

/// Merge collinear edges on every boundary in place, returning the total merge count
pub fn make_simple_boundaries(
    boundaries: &mut [FaceBoundary],
    tolerance: f64,
    cancel: &CancelFlag,
) -> Result<usize> {
    let mut total = 0;
    for (face, boundary) in boundaries.iter_mut().enumerate() {
        let before = boundary.edges.len();
        let merges = simplify_boundary_with_cancel(&mut boundary.edges, tolerance, cancel)?;
        debug!(face, before, after = boundary.edges.len(), merges, "Simplified boundary");
        total += merges;
    }
    Ok(total)
}

/// Split every simplified boundary into loops
pub fn split_boundaries(
    boundaries: Vec<FaceBoundary>,
    cancel: &CancelFlag,
) -> Result<Vec<FaceLoops>> {
    boundaries
        .into_iter()
        .enumerate()
        .map(|(face, boundary)| {
            let loops = split_loops_with_cancel(boundary.edges, cancel)?;
            debug!(face, loops = loops.len(), "Split boundary");
            Ok(FaceLoops {
                loops,
                normal: boundary.normal,
            })
        })
        .collect()
}

/// Put each face's outer loop first
pub fn find_outside_boundaries<S>(faces: Vec<FaceLoops>, strategy: &S) -> Vec<FaceLoops>
where
    S: OuterLoopStrategy + ?Sized,
{
    faces
        .into_iter()
        .map(|face| FaceLoops {
            loops: order_bucket(face.loops, strategy),
            normal: face.normal,
        })
        .collect()
}

/// Triangulate every face.
///
/// Faces are checked against `cancel` before they start; cancellation always
/// aborts. Other per-face failures abort or are skipped according to `policy`.
/// Output keeps face order whether or not `parallel` is set.
pub fn triangulate_faces(
    faces: &[FaceLoops],
    config: &TriangulationConfig,
    policy: FaceErrorPolicy,
    parallel: bool,
    cancel: &CancelFlag,
) -> Result<(Vec<TriangulatedFace>, Vec<SkippedFace>)> {
    let triangulate_one = |(index, face): (usize, &FaceLoops)| {
        cancel.check(TRIANGULATION_STAGE)?;
        triangulate_face(index, &face.loops, &face.normal, config)
    };

    let results: Vec<Result<TriangulatedFace>> = if parallel {
        faces.par_iter().enumerate().map(triangulate_one).collect()
    } else {
        faces.iter().enumerate().map(triangulate_one).collect()
    };

    let mut triangulated = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();
    for result in results {
        match result {
            Ok(face) => triangulated.push(face),
            Err(err @ Error::Cancelled { .. }) => return Err(err),
            Err(err) => match policy {
                FaceErrorPolicy::Abort => return Err(err),
                FaceErrorPolicy::Skip => {
                    let face = err.face().unwrap_or_default();
                    warn!(face, error = %err, "Skipping face");
                    skipped.push(SkippedFace {
                        face,
                        reason: err.to_string(),
                    });
                }
            },
        }
    }

    Ok((triangulated, skipped))
}

/// Runs every stage of the pipeline with one configuration
#[derive(Debug, Clone, Default)]
pub struct Simplifier {
    config: SimplifyConfig,
    cancel: CancelFlag,
}

impl Simplifier {
    pub fn new(config: SimplifyConfig) -> Self {
        Self {
            config,
            cancel: CancelFlag::new(),
        }
    }

    /// Use `cancel` for every run of this simplifier
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &SimplifyConfig {
        &self.config
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    /// Simplify `mesh` into planar faces re-triangulated with as few triangles as possible
    pub fn run(&self, mesh: &FacetMesh) -> Result<FacetMesh> {
        self.execute(mesh, &self.cancel).map(|(mesh, _)| mesh)
    }

    /// [`Simplifier::run`] watching `cancel` instead of the simplifier's own flag
    pub fn run_with_cancel(&self, mesh: &FacetMesh, cancel: &CancelFlag) -> Result<FacetMesh> {
        self.execute(mesh, cancel).map(|(mesh, _)| mesh)
    }

    /// [`Simplifier::run`] that also returns per-stage counts
    pub fn run_with_report(&self, mesh: &FacetMesh) -> Result<(FacetMesh, SimplifyReport)> {
        self.execute(mesh, &self.cancel)
    }

    fn execute(&self, mesh: &FacetMesh, cancel: &CancelFlag) -> Result<(FacetMesh, SimplifyReport)> {
        self.config.validate()?;
        log_mesh_stats(mesh, "input");
        let mut report = SimplifyReport {
            input_triangles: mesh.len(),
            ..SimplifyReport::default()
        };

        cancel.check(NORMAL_GROUPING_STAGE)?;
        let groups = {
            let _timer = StageTimer::with_items(NORMAL_GROUPING_STAGE, mesh.len());
            make_normal_groups(mesh, self.config.normal_angle_tolerance)?
        };
        report.normal_groups = groups.len();
        info!(groups = groups.len(), "Grouped triangles by normal");

        cancel.check(FACE_ASSEMBLY_STAGE)?;
        let faces = {
            let _timer = StageTimer::with_items(FACE_ASSEMBLY_STAGE, groups.len());
            make_faces(groups)
        };
        report.faces = faces.len();
        info!(faces = faces.len(), "Assembled faces");

        cancel.check(BOUNDARY_STAGE)?;
        let mut boundaries = {
            let _timer = StageTimer::with_items(BOUNDARY_STAGE, faces.len());
            make_face_boundaries(&faces)
        };
        drop(faces);
        report.boundary_edges = boundaries.iter().map(|b| b.edges.len()).sum();
        info!(edges = report.boundary_edges, "Extracted boundaries");

        cancel.check(SIMPLIFY_STAGE)?;
        let merges = {
            let _timer = StageTimer::with_items(SIMPLIFY_STAGE, report.boundary_edges);
            make_simple_boundaries(&mut boundaries, self.config.merge_angle_tolerance, cancel)?
        };
        report.simplified_edges = boundaries.iter().map(|b| b.edges.len()).sum();
        info!(merges, edges = report.simplified_edges, "Simplified boundaries");

        cancel.check(SPLIT_STAGE)?;
        let face_loops = {
            let _timer = StageTimer::with_items(SPLIT_STAGE, boundaries.len());
            split_boundaries(boundaries, cancel)?
        };
        report.loops = face_loops.iter().map(|f| f.loops.len()).sum();
        report.holes = face_loops
            .iter()
            .map(|f| f.loops.len().saturating_sub(1))
            .sum();
        info!(loops = report.loops, holes = report.holes, "Split boundaries into loops");

        cancel.check(OUTER_LOOP_STAGE)?;
        let buckets = {
            let _timer = StageTimer::with_items(OUTER_LOOP_STAGE, face_loops.len());
            find_outside_boundaries(face_loops, &self.config.outer_loop)
        };

        cancel.check(TRIANGULATION_STAGE)?;
        let (triangulated, skipped) = {
            let _timer = StageTimer::with_items(TRIANGULATION_STAGE, buckets.len());
            triangulate_faces(
                &buckets,
                &self.config.triangulation(),
                self.config.face_errors,
                self.config.enable_parallel,
                cancel,
            )?
        };
        report.skipped = skipped;
        info!(
            faces = triangulated.len(),
            skipped = report.skipped.len(),
            "Triangulated faces"
        );

        cancel.check(REASSEMBLY_STAGE)?;
        let output = {
            let _timer = StageTimer::with_items(REASSEMBLY_STAGE, triangulated.len());
            reassemble(&triangulated)
        };
        report.output_triangles = output.len();
        info!(
            input = report.input_triangles,
            output = report.output_triangles,
            "Simplification finished"
        );
        log_mesh_stats(&output, "output");

        Ok((output, report))
    }
}
