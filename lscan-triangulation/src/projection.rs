//! Rotation of near-vertical faces into a workable projection plane
//!
//! Faces are triangulated in the xy plane by dropping z. A face whose normal
//! is almost horizontal would collapse to a sliver under that projection, so
//! it is first turned a quarter turn about the x or y axis. Quarter turns are
//! applied as exact coordinate permutations, so rotating back restores the
//! original coordinates bit for bit.

use lscan_core::{Point3d, Vector3d};
use spade::Point2;

/// Default |normal.z| below which a face counts as vertical
pub const DEFAULT_VERTICAL_THRESHOLD: f64 = 0.1;

/// The rotation applied to a face before projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneRotation {
    /// Face is close enough to horizontal; project as is
    None,
    /// Quarter turn about the x axis: `(x, y, z) -> (x, -z, y)`
    AboutX,
    /// Quarter turn about the y axis: `(x, y, z) -> (z, y, -x)`
    AboutY,
}

impl PlaneRotation {
    /// Pick the rotation for a face with `normal`.
    ///
    /// Vertical faces turn about whichever horizontal axis carries the smaller
    /// normal component, which brings the normal closest to the z axis.
    pub fn for_normal(normal: &Vector3d, vertical_threshold: f64) -> Self {
        if normal.z.abs() >= vertical_threshold {
            PlaneRotation::None
        } else if normal.x.abs() < normal.y.abs() {
            PlaneRotation::AboutX
        } else {
            PlaneRotation::AboutY
        }
    }

    /// Rotate a point into the projection frame
    pub fn apply(&self, p: &Point3d) -> Point3d {
        match self {
            PlaneRotation::None => *p,
            PlaneRotation::AboutX => Point3d::new(p.x, -p.z, p.y),
            PlaneRotation::AboutY => Point3d::new(p.z, p.y, -p.x),
        }
    }

    /// Rotate a point from the projection frame back to world space
    pub fn invert(&self, p: &Point3d) -> Point3d {
        match self {
            PlaneRotation::None => *p,
            PlaneRotation::AboutX => Point3d::new(p.x, p.z, -p.y),
            PlaneRotation::AboutY => Point3d::new(-p.z, p.y, p.x),
        }
    }

    /// Rotate a point and drop its depth, returning the depth alongside
    pub fn project(&self, p: &Point3d) -> (Point2<f64>, f64) {
        let r = self.apply(p);
        (Point2::new(r.x, r.y), r.z)
    }

    /// Inverse of [`PlaneRotation::project`]
    pub fn lift(&self, p: &Point2<f64>, depth: f64) -> Point3d {
        self.invert(&Point3d::new(p.x, p.y, depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection() {
        let t = DEFAULT_VERTICAL_THRESHOLD;
        assert_eq!(PlaneRotation::for_normal(&Vector3d::z(), t), PlaneRotation::None);
        assert_eq!(PlaneRotation::for_normal(&-Vector3d::z(), t), PlaneRotation::None);
        assert_eq!(PlaneRotation::for_normal(&Vector3d::y(), t), PlaneRotation::AboutX);
        assert_eq!(PlaneRotation::for_normal(&Vector3d::x(), t), PlaneRotation::AboutY);
        assert_eq!(
            PlaneRotation::for_normal(&Vector3d::new(0.0, 0.995, 0.0998), t),
            PlaneRotation::AboutX
        );
    }

    #[test]
    fn test_rotated_normal_is_vertical() {
        for normal in [Vector3d::x(), Vector3d::y(), -Vector3d::x(), -Vector3d::y()] {
            let rotation = PlaneRotation::for_normal(&normal, DEFAULT_VERTICAL_THRESHOLD);
            let turned = rotation.apply(&Point3d::from(normal));
            assert_eq!(turned.z.abs(), 1.0);
        }
    }

    #[test]
    fn test_invert_is_exact() {
        let p = Point3d::new(0.1, -7.3, 2.25);
        for rotation in [PlaneRotation::None, PlaneRotation::AboutX, PlaneRotation::AboutY] {
            assert_eq!(rotation.invert(&rotation.apply(&p)), p);
            let (flat, depth) = rotation.project(&p);
            assert_eq!(rotation.lift(&flat, depth), p);
        }
    }

    #[test]
    fn test_quarter_turns() {
        let p = Point3d::new(1.0, 2.0, 3.0);
        assert_eq!(PlaneRotation::None.apply(&p), p);
        assert_eq!(PlaneRotation::AboutX.apply(&p), Point3d::new(1.0, -3.0, 2.0));
        assert_eq!(PlaneRotation::AboutY.apply(&p), Point3d::new(3.0, 2.0, -1.0));

        let (flat, depth) = PlaneRotation::AboutY.project(&p);
        assert_eq!((flat, depth), (Point2::new(3.0, 2.0), -1.0));
    }
}
