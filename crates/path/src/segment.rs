use crate::geom::traits::Transformation;
use crate::math::Point;

use arrayvec::ArrayVec;

/// One drawing instruction of a [`GeometricPath`](crate::GeometricPath).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadCurveTo { ctrl: Point, to: Point },
    CubicCurveTo { ctrl1: Point, ctrl2: Point, to: Point },
    CloseSubpath,
}

/// The type of a segment, without its points.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ElementKind {
    MoveTo,
    LineTo,
    QuadCurveTo,
    CubicCurveTo,
    CloseSubpath,
}

impl ElementKind {
    /// Number of points carried by elements of this kind.
    #[inline]
    pub fn point_count(self) -> usize {
        match self {
            ElementKind::MoveTo | ElementKind::LineTo => 1,
            ElementKind::QuadCurveTo => 2,
            ElementKind::CubicCurveTo => 3,
            ElementKind::CloseSubpath => 0,
        }
    }
}

/// What [`GeometricPath::apply`](crate::GeometricPath::apply) passes to its visitor.
///
/// Control points come first and the end point last, so `points.last()` is the position
/// the segment moves the pen to. Close elements have no points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathElement<'l> {
    pub kind: ElementKind,
    pub points: &'l [Point],
}

impl PathSegment {
    #[inline]
    pub fn kind(&self) -> ElementKind {
        match self {
            PathSegment::MoveTo(..) => ElementKind::MoveTo,
            PathSegment::LineTo(..) => ElementKind::LineTo,
            PathSegment::QuadCurveTo { .. } => ElementKind::QuadCurveTo,
            PathSegment::CubicCurveTo { .. } => ElementKind::CubicCurveTo,
            PathSegment::CloseSubpath => ElementKind::CloseSubpath,
        }
    }

    /// The points of the segment in the order documented on [`PathElement`].
    pub fn points(&self) -> ArrayVec<Point, 3> {
        let mut points = ArrayVec::new();
        match *self {
            PathSegment::MoveTo(to) | PathSegment::LineTo(to) => {
                points.push(to);
            }
            PathSegment::QuadCurveTo { ctrl, to } => {
                points.push(ctrl);
                points.push(to);
            }
            PathSegment::CubicCurveTo { ctrl1, ctrl2, to } => {
                points.push(ctrl1);
                points.push(ctrl2);
                points.push(to);
            }
            PathSegment::CloseSubpath => {}
        }

        points
    }

    /// The position the pen is at after this segment, if the segment carries it.
    #[inline]
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathSegment::MoveTo(to)
            | PathSegment::LineTo(to)
            | PathSegment::QuadCurveTo { to, .. }
            | PathSegment::CubicCurveTo { to, .. } => Some(to),
            PathSegment::CloseSubpath => None,
        }
    }

    #[inline]
    pub fn is_move_to(&self) -> bool {
        match self {
            PathSegment::MoveTo(..) => true,
            _ => false,
        }
    }

    /// Builds a segment from an element, or returns `None` if the number of points does
    /// not match the element kind.
    pub fn from_element(element: &PathElement) -> Option<Self> {
        let p = element.points;
        if p.len() != element.kind.point_count() {
            return None;
        }

        Some(match element.kind {
            ElementKind::MoveTo => PathSegment::MoveTo(p[0]),
            ElementKind::LineTo => PathSegment::LineTo(p[0]),
            ElementKind::QuadCurveTo => PathSegment::QuadCurveTo {
                ctrl: p[0],
                to: p[1],
            },
            ElementKind::CubicCurveTo => PathSegment::CubicCurveTo {
                ctrl1: p[0],
                ctrl2: p[1],
                to: p[2],
            },
            ElementKind::CloseSubpath => PathSegment::CloseSubpath,
        })
    }

    pub fn transformed<T: Transformation<f32>>(&self, mat: &T) -> Self {
        match *self {
            PathSegment::MoveTo(to) => PathSegment::MoveTo(mat.transform_point(to)),
            PathSegment::LineTo(to) => PathSegment::LineTo(mat.transform_point(to)),
            PathSegment::QuadCurveTo { ctrl, to } => PathSegment::QuadCurveTo {
                ctrl: mat.transform_point(ctrl),
                to: mat.transform_point(to),
            },
            PathSegment::CubicCurveTo { ctrl1, ctrl2, to } => PathSegment::CubicCurveTo {
                ctrl1: mat.transform_point(ctrl1),
                ctrl2: mat.transform_point(ctrl2),
                to: mat.transform_point(to),
            },
            PathSegment::CloseSubpath => PathSegment::CloseSubpath,
        }
    }
}

#[test]
fn element_point_counts() {
    use crate::math::point;

    let segments = [
        PathSegment::MoveTo(point(1.0, 2.0)),
        PathSegment::LineTo(point(3.0, 4.0)),
        PathSegment::QuadCurveTo {
            ctrl: point(5.0, 6.0),
            to: point(7.0, 8.0),
        },
        PathSegment::CubicCurveTo {
            ctrl1: point(1.0, 1.0),
            ctrl2: point(2.0, 2.0),
            to: point(3.0, 3.0),
        },
        PathSegment::CloseSubpath,
    ];

    for segment in &segments {
        let points = segment.points();
        assert_eq!(points.len(), segment.kind().point_count());
        assert_eq!(points.last().copied(), segment.end_point());

        let element = PathElement {
            kind: segment.kind(),
            points: &points,
        };
        assert_eq!(PathSegment::from_element(&element), Some(*segment));
    }

    let bad = PathElement {
        kind: ElementKind::QuadCurveTo,
        points: &[point(0.0, 0.0)],
    };
    assert_eq!(PathSegment::from_element(&bad), None);
}
