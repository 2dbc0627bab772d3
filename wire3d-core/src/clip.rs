//! Near-plane clipping in camera space.
//!
//! Everything here works against the single plane `z = near_z`. A point is
//! in front of the plane iff `z < near_z`; points exactly on the plane count
//! as behind it.

use log::trace;

use crate::error::{ClipFault, RenderError};
use crate::math::Vec3;
use crate::projection::is_in_front_of;

/// Output of [`clip_triangle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClippedPolygon {
    Triangle([Vec3; 3]),
    Quad([Vec3; 4]),
}

impl ClippedPolygon {
    pub fn vertices(&self) -> &[Vec3] {
        match self {
            ClippedPolygon::Triangle(v) => v.as_slice(),
            ClippedPolygon::Quad(v) => v.as_slice(),
        }
    }
}

/// Finds where the segment `behind -> in_front` crosses the near plane.
///
/// `behind` must satisfy `z >= near_z` and `in_front` must satisfy
/// `z < near_z`; anything else is reported as a [`ClipFault`]. The returned
/// point has `z == near_z` exactly.
pub fn clip_point(behind: &Vec3, in_front: &Vec3, near_z: f64) -> Result<Vec3, RenderError> {
    let behind_ok = !is_in_front_of(behind, near_z);
    let front_ok = is_in_front_of(in_front, near_z);
    let fault = match (behind_ok, front_ok) {
        (true, true) => None,
        (true, false) => Some(ClipFault::BothBehind),
        (false, true) => Some(ClipFault::BothInFront),
        (false, false) => Some(ClipFault::Swapped),
    };
    if let Some(fault) = fault {
        return Err(RenderError::DegenerateClip(fault));
    }

    let t = (near_z - behind.z) / (in_front.z - behind.z);
    let mut clipped = behind + (in_front - behind) * t;
    clipped.z = near_z;
    Ok(clipped)
}

/// Clips a segment, keeping endpoint order.
///
/// Returns `None` when both endpoints are behind the near plane.
pub fn clip_line(start: &Vec3, end: &Vec3, near_z: f64) -> Result<Option<[Vec3; 2]>, RenderError> {
    let segment = match (is_in_front_of(start, near_z), is_in_front_of(end, near_z)) {
        (true, true) => Some([*start, *end]),
        (true, false) => Some([*start, clip_point(end, start, near_z)?]),
        (false, true) => Some([clip_point(start, end, near_z)?, *end]),
        (false, false) => None,
    };
    Ok(segment)
}

/// Clips a triangle that straddles the near plane.
///
/// With one vertex in front the result is a smaller triangle; with two it is
/// a quad ordered `front0, front1, clip(behind, front1), clip(behind, front0)`
/// so that its edges do not cross. Triangles entirely in front or entirely
/// behind must be handled by the caller and are rejected with
/// [`RenderError::InvalidVisibilityPartition`].
pub fn clip_triangle(points: &[Vec3; 3], near_z: f64) -> Result<ClippedPolygon, RenderError> {
    let mut in_front = [0usize; 3];
    let mut behind = [0usize; 3];
    let (mut nf, mut nb) = (0, 0);
    for (i, point) in points.iter().enumerate() {
        if is_in_front_of(point, near_z) {
            in_front[nf] = i;
            nf += 1;
        } else {
            behind[nb] = i;
            nb += 1;
        }
    }

    let polygon = match nf {
        1 => {
            let front = &points[in_front[0]];
            ClippedPolygon::Triangle([
                *front,
                clip_point(&points[behind[0]], front, near_z)?,
                clip_point(&points[behind[1]], front, near_z)?,
            ])
        }
        2 => {
            let (front0, front1) = (&points[in_front[0]], &points[in_front[1]]);
            let back = &points[behind[0]];
            ClippedPolygon::Quad([
                *front0,
                *front1,
                clip_point(back, front1, near_z)?,
                clip_point(back, front0, near_z)?,
            ])
        }
        n => return Err(RenderError::InvalidVisibilityPartition { in_front: n }),
    };
    trace!("clipped triangle with {nf} vertices in front");
    Ok(polygon)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn v(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3::new(x, y, z)
    }

    #[test]
    fn test_clip_point_lands_on_plane() {
        let behind = v(10.0, -4.0, 5.0);
        let front = v(-2.0, 8.0, -7.0);
        let p = clip_point(&behind, &front, -1.0).unwrap();
        assert_eq!(p.z, -1.0);
        // t = (-1 - 5) / (-7 - 5) = 0.5
        assert!((p - v(4.0, 2.0, -1.0)).norm() < EPS);
    }

    #[test]
    fn test_clip_point_stays_on_segment() {
        let behind = v(3.0, 1.0, 0.25);
        let front = v(-1.0, 2.0, -9.0);
        for near in [-0.001, -0.5, -3.0, -8.999] {
            let p = clip_point(&behind, &front, near).unwrap();
            let t = (near - behind.z) / (front.z - behind.z);
            assert!((0.0..=1.0).contains(&t));
            assert!((p - (behind + (front - behind) * t)).norm() < EPS);
            assert_eq!(p.z, near);
        }
    }

    #[test]
    fn test_clip_point_on_plane_is_behind() {
        let p = clip_point(&v(1.0, 1.0, -1.0), &v(1.0, 1.0, -3.0), -1.0).unwrap();
        assert!((p - v(1.0, 1.0, -1.0)).norm() < EPS);
    }

    #[test]
    fn test_clip_point_faults() {
        let front = v(0.0, 0.0, -5.0);
        let back = v(0.0, 0.0, 5.0);
        assert_eq!(
            clip_point(&front, &front, -1.0),
            Err(RenderError::DegenerateClip(ClipFault::BothInFront))
        );
        assert_eq!(
            clip_point(&back, &back, -1.0),
            Err(RenderError::DegenerateClip(ClipFault::BothBehind))
        );
        assert_eq!(
            clip_point(&front, &back, -1.0),
            Err(RenderError::DegenerateClip(ClipFault::Swapped))
        );
    }

    #[test]
    fn test_clip_line_keeps_order() {
        let a = v(0.0, 0.0, -10.0);
        let b = v(0.0, 10.0, 10.0);
        let [start, end] = clip_line(&a, &b, -1.0).unwrap().unwrap();
        assert_eq!(start, a);
        assert_eq!(end.z, -1.0);
        let [start, end] = clip_line(&b, &a, -1.0).unwrap().unwrap();
        assert_eq!(start.z, -1.0);
        assert_eq!(end, a);
        assert_eq!(clip_line(&b, &b, -1.0).unwrap(), None);
        assert_eq!(clip_line(&a, &a, -1.0).unwrap(), Some([a, a]));
    }

    #[test]
    fn test_one_in_front_gives_triangle() {
        let tri = [v(0.0, 0.0, -5.0), v(5.0, 0.0, 5.0), v(-5.0, 0.0, 5.0)];
        match clip_triangle(&tri, -1.0).unwrap() {
            ClippedPolygon::Triangle([a, b, c]) => {
                assert_eq!(a, tri[0]);
                assert_eq!(b.z, -1.0);
                assert_eq!(c.z, -1.0);
                // t = 0.6 from the behind vertex
                assert!((b - v(2.0, 0.0, -1.0)).norm() < EPS);
                assert!((c - v(-2.0, 0.0, -1.0)).norm() < EPS);
            }
            other => panic!("expected a triangle, got {other:?}"),
        }
    }

    #[test]
    fn test_two_in_front_gives_ordered_quad() {
        let tri = [v(-4.0, 0.0, -5.0), v(4.0, 0.0, -5.0), v(0.0, 0.0, 5.0)];
        let polygon = clip_triangle(&tri, -1.0).unwrap();
        let quad = match polygon {
            ClippedPolygon::Quad(q) => q,
            other => panic!("expected a quad, got {other:?}"),
        };
        assert_eq!(quad[0], tri[0]);
        assert_eq!(quad[1], tri[1]);
        // third vertex is clipped towards front1, fourth towards front0
        assert!(quad[2].x > 0.0);
        assert!(quad[3].x < 0.0);
        for p in polygon.vertices() {
            assert!(p.z <= -1.0 + EPS);
        }
    }

    #[test]
    fn test_partition_is_checked() {
        let behind = [v(0.0, 0.0, 5.0), v(1.0, 0.0, 5.0), v(0.0, 1.0, 5.0)];
        let in_front = [v(0.0, 0.0, -5.0), v(1.0, 0.0, -5.0), v(0.0, 1.0, -5.0)];
        assert_eq!(
            clip_triangle(&behind, -1.0),
            Err(RenderError::InvalidVisibilityPartition { in_front: 0 })
        );
        assert_eq!(
            clip_triangle(&in_front, -1.0),
            Err(RenderError::InvalidVisibilityPartition { in_front: 3 })
        );
    }
}
