//! Canvas-style arc sweeps, tangent arcs and rounded rectangles.

use crate::geom::Arc;
use crate::math::*;
use crate::segment::PathSegment;

use std::f32::consts::PI;

/// Distance of the control points of a quarter circle of radius 1 to its endpoints.
const QUARTER_ARC_KAPPA: f32 = 0.552_284_8;

/// The radii of the four corners of a rounded rectangle.
///
/// Each corner is a quarter ellipse with the given horizontal and vertical radii.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CornerRadii {
    pub top_left: Size,
    pub top_right: Size,
    pub bottom_left: Size,
    pub bottom_right: Size,
}

impl CornerRadii {
    pub fn uniform(radius: Size) -> Self {
        CornerRadii {
            top_left: radius,
            top_right: radius,
            bottom_left: radius,
            bottom_right: radius,
        }
    }

    /// Whether the corners are non-negative and fit along every side of `rect`.
    pub fn fit_in(&self, rect: &Rect) -> bool {
        let w = rect.size.width;
        let h = rect.size.height;

        let corners = [self.top_left, self.top_right, self.bottom_left, self.bottom_right];
        if corners.iter().any(|r| !(r.width >= 0.0 && r.height >= 0.0)) {
            return false;
        }

        w >= self.top_left.width + self.top_right.width
            && w >= self.bottom_left.width + self.bottom_right.width
            && h >= self.top_left.height + self.bottom_left.height
            && h >= self.top_right.height + self.bottom_right.height
    }
}

/// Computes the signed sweep of a circular arc.
///
/// Angles grow from the positive x axis towards the positive y axis. With `clockwise`
/// set the arc runs towards decreasing angles. A difference of a full turn or more in
/// the direction of the arc produces a full circle, anything else wraps into a single
/// turn.
pub(crate) fn arc_sweep(start_angle: f32, end_angle: f32, clockwise: bool) -> f32 {
    let two_pi = 2.0 * PI;
    let delta = if clockwise {
        start_angle - end_angle
    } else {
        end_angle - start_angle
    };

    let sweep = if delta >= two_pi {
        two_pi
    } else {
        delta.rem_euclid(two_pi)
    };

    if clockwise {
        -sweep
    } else {
        sweep
    }
}

/// The shape of a rounded corner between the lines `from -> corner` and `corner -> to`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum TangentArc {
    /// The corner can't be rounded: draw a straight line to the corner.
    Line(Point),
    Arc(Arc<f32>),
}

pub(crate) fn tangent_arc(from: Point, corner: Point, to: Point, radius: f32) -> TangentArc {
    let v0 = from - corner;
    let v1 = to - corner;
    let l0 = v0.length();
    let l1 = v1.length();

    if radius == 0.0 || l0 == 0.0 || l1 == 0.0 {
        return TangentArc::Line(corner);
    }

    let d0 = v0 / l0;
    let d1 = v1 / l1;
    let cos = d0.dot(d1).max(-1.0).min(1.0);
    // Collinear lines have no corner to round.
    if (1.0 - cos.abs()) <= f32::EPSILON {
        return TangentArc::Line(corner);
    }

    let half_angle = cos.acos() * 0.5;
    let tangent_distance = radius / half_angle.tan();
    let center_distance = radius / half_angle.sin();

    let bisector = (d0 + d1).normalize();
    let center = corner + bisector * center_distance;
    let t0 = corner + d0 * tangent_distance;
    let t1 = corner + d1 * tangent_distance;

    // The arc always takes the short way around, which is less than half a turn.
    let start_angle = (t0 - center).angle_from_x_axis();
    let sweep_angle = start_angle.angle_to((t1 - center).angle_from_x_axis());

    TangentArc::Arc(Arc {
        center,
        radii: vector(radius, radius),
        start_angle,
        sweep_angle,
        x_rotation: Angle::zero(),
    })
}

/// Emits the segments of a rounded rectangle, clockwise on screen from the end of the
/// top-left corner.
///
/// The radii must fit in the rectangle.
pub(crate) fn rounded_rect_outline(
    rect: &Rect,
    radii: &CornerRadii,
    emit: &mut dyn FnMut(PathSegment),
) {
    let k = 1.0 - QUARTER_ARC_KAPPA;
    let (x0, y0) = (rect.min_x(), rect.min_y());
    let (x1, y1) = (rect.max_x(), rect.max_y());
    let tl = radii.top_left;
    let tr = radii.top_right;
    let bl = radii.bottom_left;
    let br = radii.bottom_right;

    let has_curve = |r: Size| r.width > 0.0 || r.height > 0.0;

    emit(PathSegment::MoveTo(point(x0 + tl.width, y0)));

    emit(PathSegment::LineTo(point(x1 - tr.width, y0)));
    if has_curve(tr) {
        emit(PathSegment::CubicCurveTo {
            ctrl1: point(x1 - tr.width * k, y0),
            ctrl2: point(x1, y0 + tr.height * k),
            to: point(x1, y0 + tr.height),
        });
    }

    emit(PathSegment::LineTo(point(x1, y1 - br.height)));
    if has_curve(br) {
        emit(PathSegment::CubicCurveTo {
            ctrl1: point(x1, y1 - br.height * k),
            ctrl2: point(x1 - br.width * k, y1),
            to: point(x1 - br.width, y1),
        });
    }

    emit(PathSegment::LineTo(point(x0 + bl.width, y1)));
    if has_curve(bl) {
        emit(PathSegment::CubicCurveTo {
            ctrl1: point(x0 + bl.width * k, y1),
            ctrl2: point(x0, y1 - bl.height * k),
            to: point(x0, y1 - bl.height),
        });
    }

    emit(PathSegment::LineTo(point(x0, y0 + tl.height)));
    if has_curve(tl) {
        emit(PathSegment::CubicCurveTo {
            ctrl1: point(x0, y0 + tl.height * k),
            ctrl2: point(x0 + tl.width * k, y0),
            to: point(x0 + tl.width, y0),
        });
    }
}

#[test]
fn sweeps() {
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    assert!(approx(arc_sweep(0.0, FRAC_PI_2, false), FRAC_PI_2));
    assert!(approx(arc_sweep(0.0, FRAC_PI_2, true), -(2.0 * PI - FRAC_PI_2)));
    assert!(approx(arc_sweep(FRAC_PI_2, 0.0, true), -FRAC_PI_2));
    assert!(approx(arc_sweep(0.0, 2.0 * PI, false), 2.0 * PI));
    assert!(approx(arc_sweep(0.0, 7.0 * PI, false), 2.0 * PI));
    assert!(approx(arc_sweep(0.0, -2.0 * PI, true), -2.0 * PI));
    assert!(approx(arc_sweep(1.0, 1.0, false), 0.0));
}

#[test]
fn right_angle_tangent_arc() {
    use std::f32::consts::FRAC_PI_2;

    let arc = match tangent_arc(point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0), 2.0) {
        TangentArc::Arc(arc) => arc,
        TangentArc::Line(..) => panic!("expected an arc"),
    };

    assert!((arc.center - point(8.0, 2.0)).length() < 1e-4);
    assert!((arc.from() - point(8.0, 0.0)).length() < 1e-4);
    assert!((arc.to() - point(10.0, 2.0)).length() < 1e-4);
    assert!((arc.sweep_angle.radians - FRAC_PI_2).abs() < 1e-4);

    assert_eq!(
        tangent_arc(point(0.0, 0.0), point(5.0, 0.0), point(10.0, 0.0), 2.0),
        TangentArc::Line(point(5.0, 0.0))
    );
    assert_eq!(
        tangent_arc(point(0.0, 0.0), point(0.0, 0.0), point(10.0, 0.0), 2.0),
        TangentArc::Line(point(0.0, 0.0))
    );
}
