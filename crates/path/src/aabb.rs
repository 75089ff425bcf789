//! Bounding rectangle computation for paths.

use crate::math::{point, Box2D, Point};
use crate::segment::PathSegment;

/// Paths made of move-to segments only never draw, so their bounds are the empty
/// rectangle at the origin. Some backends report the move-to points instead, which
/// breaks zero-length stroking with square or round caps.
pub(crate) fn has_only_move_to(segments: &[PathSegment]) -> bool {
    segments.iter().all(PathSegment::is_move_to)
}

/// Computes the rectangle containing every endpoint and control point of the path.
///
/// This is a conservative bound: curves never leave the polygon formed by their
/// control points.
pub(crate) fn control_points_bounding_box(segments: &[PathSegment]) -> Box2D {
    let mut min = point(f32::MAX, f32::MAX);
    let mut max = point(f32::MIN, f32::MIN);
    for segment in segments {
        for p in segment.points() {
            min = Point::min(min, p);
            max = Point::max(max, p);
        }
    }

    // Return an empty rectangle by default if there was no point in the path.
    if min == point(f32::MAX, f32::MAX) {
        return Box2D::zero();
    }

    Box2D { min, max }
}

/// Inclusive on all four edges, unlike `Box2D::contains`.
pub(crate) fn box_contains_inclusive(b: &Box2D, p: Point) -> bool {
    p.x >= b.min.x && p.x <= b.max.x && p.y >= b.min.y && p.y <= b.max.y
}

#[test]
fn control_point_bounds() {
    use crate::events::Events;
    use lyon_algorithms::aabb::bounding_box;

    let segments = [
        PathSegment::MoveTo(point(0.0, 0.0)),
        PathSegment::CubicCurveTo {
            ctrl1: point(-1.0, 2.0),
            ctrl2: point(3.0, -4.0),
            to: point(1.0, -1.0),
        },
    ];

    assert_eq!(
        control_points_bounding_box(&segments),
        Box2D {
            min: point(-1.0, -4.0),
            max: point(3.0, 2.0)
        },
    );

    let tight = bounding_box(Events::new(&segments));
    assert!(tight.min.x > -1.0);
    assert!(tight.min.y > -4.0);
    assert!(tight.max.x < 3.0);
    assert!(tight.max.y < 2.0);
}

#[test]
fn only_move_to() {
    assert!(has_only_move_to(&[]));
    assert!(has_only_move_to(&[
        PathSegment::MoveTo(point(1.0, 1.0)),
        PathSegment::MoveTo(point(5.0, 1.0)),
    ]));
    assert!(!has_only_move_to(&[
        PathSegment::MoveTo(point(1.0, 1.0)),
        PathSegment::CloseSubpath,
    ]));
}
