//! The path data structure.

use crate::aabb::{box_contains_inclusive, control_points_bounding_box, has_only_move_to};
use crate::arc::{arc_sweep, rounded_rect_outline, tangent_arc, CornerRadii, TangentArc};
use crate::error::PathError;
use crate::events::Events;
use crate::geom::{Arc, CubicBezierSegment};
use crate::math::*;
use crate::measure::PathMeasurements;
use crate::segment::{PathElement, PathSegment};
use crate::stroke::{tessellate_stroke, StrokeContext, StrokeGeometry, StrokeStyleApplier};
use crate::{QueryOptions, WindRule};

use lyon_algorithms::aabb::bounding_box;
use lyon_algorithms::hit_test::hit_test_path;

use core::fmt;
use core::iter::FromIterator;
use core::slice;
use std::f32::consts::PI;

/// A mutable 2D path.
///
/// The path is an ordered log of [`PathSegment`]s. Cloning it copies the log, so clones
/// never affect each other.
///
/// Drawing segments are interpreted relatively to the current point, which is the end of
/// the previous segment. After a [`close_subpath`](Self::close_subpath), the current
/// point is the start of the closed sub-path.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct GeometricPath {
    segments: Vec<PathSegment>,
}

impl GeometricPath {
    /// Creates an empty path.
    pub fn new() -> Self {
        GeometricPath {
            segments: Vec::new(),
        }
    }

    pub fn with_capacity(segments: usize) -> Self {
        GeometricPath {
            segments: Vec::with_capacity(segments),
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn iter(&self) -> slice::Iter<PathSegment> {
        self.segments.iter()
    }

    /// Iterates over the normalized events of the path.
    ///
    /// Sub-paths are not closed implicitly, see [`Events::closing_sub_paths`].
    pub fn events(&self) -> Events {
        Events::new(&self.segments)
    }

    #[inline]
    pub fn push_segment(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Appends the segment described by an element, typically one received from
    /// [`apply`](Self::apply).
    pub fn push_element(&mut self, element: &PathElement) -> Result<(), PathError> {
        match PathSegment::from_element(element) {
            Some(segment) => {
                self.segments.push(segment);
                Ok(())
            }
            None => Err(PathError::PointCount {
                kind: element.kind,
                expected: element.kind.point_count(),
                found: element.points.len(),
            }),
        }
    }

    pub fn move_to(&mut self, to: Point) {
        self.segments.push(PathSegment::MoveTo(to));
    }

    pub fn add_line_to(&mut self, to: Point) {
        self.segments.push(PathSegment::LineTo(to));
    }

    pub fn add_quad_curve_to(&mut self, ctrl: Point, to: Point) {
        self.segments.push(PathSegment::QuadCurveTo { ctrl, to });
    }

    pub fn add_bezier_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.segments
            .push(PathSegment::CubicCurveTo { ctrl1, ctrl2, to });
    }

    fn push_cubic(&mut self, curve: &CubicBezierSegment<f32>) {
        self.add_bezier_curve_to(curve.ctrl1, curve.ctrl2, curve.to);
    }

    /// Rounds the corner formed by the lines from the current point to `p1` and from `p1`
    /// to `p2` with a circular arc of the given radius.
    ///
    /// A line to the start of the arc is added first. If the corner can't be rounded
    /// (coincident or collinear points, zero radius), a line to `p1` is added instead.
    /// Without a current point, `p1` becomes the current point.
    ///
    /// A negative or non-finite radius is ignored.
    pub fn add_arc_to(&mut self, p1: Point, p2: Point, radius: f32) {
        if !(radius >= 0.0 && radius.is_finite()) {
            log::debug!("Ignoring arc with invalid radius {:?}.", radius);
            return;
        }

        let from = match self.pen() {
            Some(from) => from,
            None => {
                self.move_to(p1);
                p1
            }
        };

        match tangent_arc(from, p1, p2, radius) {
            TangentArc::Line(to) => self.add_line_to(to),
            TangentArc::Arc(arc) => {
                let start = arc.from();
                if start != from {
                    self.add_line_to(start);
                }
                arc.for_each_cubic_bezier(&mut |curve| self.push_cubic(curve));
            }
        }
    }

    /// Adds a circular arc.
    ///
    /// Angles are in radians and grow from the x axis towards the y axis. With
    /// `clockwise` set, the arc runs towards decreasing angles. If the path has a current
    /// point, it is connected to the start of the arc with a line; otherwise the arc
    /// starts a new sub-path.
    ///
    /// Calls with a non-finite angle are ignored.
    pub fn add_arc(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    ) {
        if !start_angle.is_finite() || !end_angle.is_finite() {
            log::debug!(
                "Ignoring arc with non-finite angles ({:?}, {:?}).",
                start_angle,
                end_angle
            );
            return;
        }

        let arc = Arc {
            center,
            radii: vector(radius, radius),
            start_angle: Angle::radians(start_angle),
            sweep_angle: Angle::radians(arc_sweep(start_angle, end_angle, clockwise)),
            x_rotation: Angle::zero(),
        };

        let start = arc.from();
        match self.pen() {
            Some(current) if current == start => {}
            Some(_) => self.add_line_to(start),
            None => self.move_to(start),
        }

        arc.for_each_cubic_bezier(&mut |curve| self.push_cubic(curve));
    }

    /// Adds a closed sub-path going around the rectangle from its origin.
    pub fn add_rect(&mut self, rect: &Rect) {
        self.move_to(point(rect.min_x(), rect.min_y()));
        self.add_line_to(point(rect.max_x(), rect.min_y()));
        self.add_line_to(point(rect.max_x(), rect.max_y()));
        self.add_line_to(point(rect.min_x(), rect.max_y()));
        self.close_subpath();
    }

    /// Adds a closed sub-path approximating the ellipse inscribed in the rectangle with
    /// cubic bézier curves, starting from the middle of the right side.
    pub fn add_ellipse(&mut self, rect: &Rect) {
        let arc = Arc {
            center: rect.center(),
            radii: vector(rect.size.width * 0.5, rect.size.height * 0.5),
            start_angle: Angle::radians(0.0),
            sweep_angle: Angle::radians(2.0 * PI),
            x_rotation: Angle::zero(),
        };

        self.move_to(arc.from());
        arc.for_each_cubic_bezier(&mut |curve| self.push_cubic(curve));
        self.close_subpath();
    }

    /// Adds a rectangle with four identical elliptic corners.
    ///
    /// The radius is clamped to half of the rectangle's size. A negative component takes
    /// the value of the other one.
    pub fn add_rounded_rect(&mut self, rect: &Rect, radius: Size) {
        let mut radius = radius;
        if radius.width < 0.0 {
            radius.width = radius.height.max(0.0);
        }
        if radius.height < 0.0 {
            radius.height = radius.width;
        }

        let radius = size(
            radius.width.min(rect.size.width * 0.5),
            radius.height.min(rect.size.height * 0.5),
        );

        self.add_rounded_rect_with_radii(rect, &CornerRadii::uniform(radius));
    }

    /// Adds a rectangle with rounded corners, clockwise on screen.
    ///
    /// Empty rectangles are ignored. If the corners don't fit in the rectangle, a plain
    /// rectangle is added instead.
    pub fn add_rounded_rect_with_radii(&mut self, rect: &Rect, radii: &CornerRadii) {
        if !(rect.size.width > 0.0 && rect.size.height > 0.0) {
            return;
        }

        if !radii.fit_in(rect) {
            self.add_rect(rect);
            return;
        }

        let segments = &mut self.segments;
        rounded_rect_outline(rect, radii, &mut |segment| segments.push(segment));
        self.close_subpath();
    }

    pub fn close_subpath(&mut self) {
        self.segments.push(PathSegment::CloseSubpath);
    }

    /// Removes all segments.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn translate(&mut self, by: Vector) {
        let translation = Translation::new(by.x, by.y);
        for segment in &mut self.segments {
            *segment = segment.transformed(&translation);
        }
    }

    /// Applies the transform to every point of the path.
    pub fn transform(&mut self, transform: &Transform) {
        if self.segments.is_empty() || *transform == Transform::identity() {
            return;
        }

        for segment in &mut self.segments {
            *segment = segment.transformed(transform);
        }
    }

    /// Returns a transformed copy of the path.
    pub fn transformed(&self, transform: &Transform) -> Self {
        let mut path = self.clone();
        path.transform(transform);
        path
    }

    /// Whether the path draws nothing: it has no segment or only move-to segments.
    pub fn is_empty(&self) -> bool {
        has_only_move_to(&self.segments)
    }

    /// Whether the path has at least one segment.
    pub fn has_current_point(&self) -> bool {
        !self.segments.is_empty()
    }

    /// The end of the last segment, or the start of the sub-path if the last segment
    /// closes it.
    ///
    /// The path must have a current point. In release builds the origin is returned for
    /// an empty path.
    pub fn current_point(&self) -> Point {
        debug_assert!(
            self.has_current_point(),
            "current_point() requires a non-empty path"
        );
        self.pen().unwrap_or_else(Point::zero)
    }

    fn pen(&self) -> Option<Point> {
        let last = self.segments.last()?;
        if let Some(p) = last.end_point() {
            return Some(p);
        }

        let start = self.segments.iter().rev().find_map(|segment| match *segment {
            PathSegment::MoveTo(at) => Some(at),
            _ => None,
        });

        Some(start.unwrap_or_else(Point::zero))
    }

    fn control_box(&self) -> Box2D {
        if has_only_move_to(&self.segments) {
            return Box2D::zero();
        }

        control_points_bounding_box(&self.segments)
    }

    /// The rectangle containing every endpoint and control point.
    ///
    /// Paths made of move-to segments only have an empty rectangle at the origin as
    /// bounds, regardless of where they moved to.
    pub fn bounding_rect(&self) -> Rect {
        self.control_box().to_rect()
    }

    /// A conservative bounding rectangle, cheaper than
    /// [`tight_bounding_rect`](Self::tight_bounding_rect).
    ///
    /// Same result as [`bounding_rect`](Self::bounding_rect).
    pub fn fast_bounding_rect(&self) -> Rect {
        self.control_box().to_rect()
    }

    /// The smallest rectangle containing the path's curves.
    pub fn tight_bounding_rect(&self) -> Rect {
        if has_only_move_to(&self.segments) {
            return Rect::zero();
        }

        bounding_box(self.events()).to_rect()
    }

    /// Whether the point is inside the fill of the path.
    ///
    /// Open sub-paths are tested as if they were closed.
    pub fn contains(&self, point: Point, wind_rule: WindRule) -> bool {
        self.contains_with_options(point, wind_rule, &QueryOptions::DEFAULT)
    }

    pub fn contains_with_options(
        &self,
        point: Point,
        wind_rule: WindRule,
        options: &QueryOptions,
    ) -> bool {
        if !box_contains_inclusive(&self.control_box(), point) {
            return false;
        }

        hit_test_path(
            &point,
            self.events().closing_sub_paths(),
            wind_rule.into(),
            options.effective_tolerance(),
        )
    }

    /// Tessellates the stroke of the path into triangles.
    ///
    /// Without an applier, the default [`StrokeStyle`](crate::StrokeStyle) is used.
    pub fn stroke_geometry(&self, applier: Option<&dyn StrokeStyleApplier>) -> StrokeGeometry {
        self.stroke_geometry_with_options(applier, &QueryOptions::DEFAULT)
    }

    pub fn stroke_geometry_with_options(
        &self,
        applier: Option<&dyn StrokeStyleApplier>,
        options: &QueryOptions,
    ) -> StrokeGeometry {
        let mut context = StrokeContext::new(options.tolerance);
        if let Some(applier) = applier {
            applier.apply_stroke_style(&mut context);
        }

        tessellate_stroke(self.events(), context.style(), context.tolerance())
    }

    /// Whether the point is inside the stroke of the path, with the stroke style set by
    /// `applier`.
    pub fn stroke_contains(&self, applier: &dyn StrokeStyleApplier, point: Point) -> bool {
        self.stroke_contains_with_options(applier, point, &QueryOptions::DEFAULT)
    }

    pub fn stroke_contains_with_options(
        &self,
        applier: &dyn StrokeStyleApplier,
        point: Point,
        options: &QueryOptions,
    ) -> bool {
        self.stroke_geometry_with_options(Some(applier), options)
            .contains(point)
    }

    /// The bounds of the stroke of the path.
    ///
    /// Without an applier, the default [`StrokeStyle`](crate::StrokeStyle) is used. An
    /// empty stroke has an empty rectangle at the origin as bounds.
    pub fn stroke_bounding_rect(&self, applier: Option<&dyn StrokeStyleApplier>) -> Rect {
        self.stroke_bounding_rect_with_options(applier, &QueryOptions::DEFAULT)
    }

    pub fn stroke_bounding_rect_with_options(
        &self,
        applier: Option<&dyn StrokeStyleApplier>,
        options: &QueryOptions,
    ) -> Rect {
        self.stroke_geometry_with_options(applier, options)
            .bounding_box()
            .to_rect()
    }

    /// Calls the visitor once per segment, in order.
    pub fn apply<F>(&self, mut visitor: F)
    where
        F: FnMut(&PathElement),
    {
        for segment in &self.segments {
            let points = segment.points();
            visitor(&PathElement {
                kind: segment.kind(),
                points: &points,
            });
        }
    }

    /// Flattens the path to measure it.
    ///
    /// The tolerance is validated like [`QueryOptions::tolerance`](crate::QueryOptions::tolerance).
    pub fn measurements(&self, tolerance: f32) -> PathMeasurements {
        PathMeasurements::from_path(self, tolerance)
    }

    /// Length of the path, closing edges included.
    pub fn length(&self) -> f32 {
        self.measurements(QueryOptions::DEFAULT_TOLERANCE).length()
    }

    /// The point at distance `dist` along the path, if `dist` is within
    /// `0.0..=self.length()`.
    pub fn point_at_length(&self, dist: f32) -> Option<Point> {
        self.measurements(QueryOptions::DEFAULT_TOLERANCE)
            .point_at_length(dist)
    }

    /// The direction of the path at distance `dist`.
    pub fn angle_at_length(&self, dist: f32) -> Option<Angle> {
        self.measurements(QueryOptions::DEFAULT_TOLERANCE)
            .angle_at_length(dist)
    }
}

impl FromIterator<PathSegment> for GeometricPath {
    fn from_iter<T: IntoIterator<Item = PathSegment>>(iter: T) -> Self {
        GeometricPath {
            segments: iter.into_iter().collect(),
        }
    }
}

impl Extend<PathSegment> for GeometricPath {
    fn extend<T: IntoIterator<Item = PathSegment>>(&mut self, iter: T) {
        self.segments.extend(iter);
    }
}

impl<'l> IntoIterator for &'l GeometricPath {
    type Item = &'l PathSegment;
    type IntoIter = slice::Iter<'l, PathSegment>;

    fn into_iter(self) -> slice::Iter<'l, PathSegment> {
        self.segments.iter()
    }
}

impl fmt::Debug for GeometricPath {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        fn write_point(formatter: &mut fmt::Formatter, point: Point) -> fmt::Result {
            write!(formatter, " ")?;
            fmt::Debug::fmt(&point.x, formatter)?;
            write!(formatter, " ")?;
            fmt::Debug::fmt(&point.y, formatter)
        }

        write!(formatter, "\"")?;

        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(formatter, " ")?;
            }

            let command = match segment {
                PathSegment::MoveTo(..) => "M",
                PathSegment::LineTo(..) => "L",
                PathSegment::QuadCurveTo { .. } => "Q",
                PathSegment::CubicCurveTo { .. } => "C",
                PathSegment::CloseSubpath => "Z",
            };
            write!(formatter, "{}", command)?;

            for p in segment.points() {
                write_point(formatter, p)?;
            }
        }

        write!(formatter, "\"")
    }
}

#[cfg(test)]
fn trace(path: &GeometricPath) -> Vec<(crate::ElementKind, Vec<Point>)> {
    let mut trace = Vec::new();
    path.apply(|element| trace.push((element.kind, element.points.to_vec())));
    trace
}

#[cfg(test)]
fn square() -> GeometricPath {
    let mut path = GeometricPath::new();
    path.move_to(point(0.0, 0.0));
    path.add_line_to(point(10.0, 0.0));
    path.add_line_to(point(10.0, 10.0));
    path.close_subpath();
    path
}

#[cfg(test)]
fn curvy() -> GeometricPath {
    let mut path = GeometricPath::new();
    path.move_to(point(1.0, 2.0));
    path.add_line_to(point(4.0, 2.0));
    path.add_quad_curve_to(point(6.0, 0.0), point(8.0, 4.0));
    path.add_bezier_curve_to(point(9.0, 9.0), point(3.0, 12.0), point(0.0, 5.0));
    path.close_subpath();
    path.add_ellipse(&rect(20.0, 20.0, 6.0, 4.0));
    path
}

#[test]
fn square_example() {
    let path = square();

    assert_eq!(path.bounding_rect(), rect(0.0, 0.0, 10.0, 10.0));
    assert!(!path.is_empty());
    assert!(path.contains(point(5.0, 5.0), WindRule::NonZero));
    assert!(!path.contains(point(20.0, 20.0), WindRule::NonZero));

    // The closing edge cuts the square in half.
    assert!(path.contains(point(6.0, 4.0), WindRule::NonZero));
    assert!(path.contains(point(9.0, 1.0), WindRule::EvenOdd));
    assert!(!path.contains(point(4.0, 6.0), WindRule::NonZero));
}

#[test]
fn contains_center_of_square() {
    let mut path = GeometricPath::new();
    path.add_rect(&rect(0.0, 0.0, 10.0, 10.0));
    assert!(path.contains(point(5.0, 5.0), WindRule::NonZero));
    assert!(path.contains(point(5.0, 5.0), WindRule::EvenOdd));
}

#[test]
fn copies_are_independent() {
    let first = curvy();
    let before = trace(&first);

    let mut copy = first.clone();
    copy.add_line_to(point(100.0, 100.0));
    copy.translate(vector(1.0, 1.0));
    assert_eq!(trace(&first), before);

    let copy_trace = trace(&copy);
    let mut first = first;
    first.clear();
    assert_eq!(trace(&copy), copy_trace);
}

#[test]
fn empty_classification() {
    let mut path = GeometricPath::new();
    assert!(path.is_empty());
    assert!(!path.has_current_point());

    path.move_to(point(1.0, 2.0));
    path.move_to(point(3.0, 4.0));
    assert!(path.is_empty());
    assert!(path.has_current_point());
    assert_eq!(path.current_point(), point(3.0, 4.0));

    let builders: [fn(&mut GeometricPath); 6] = [
        |p: &mut GeometricPath| p.add_line_to(point(1.0, 1.0)),
        |p: &mut GeometricPath| p.add_quad_curve_to(point(1.0, 1.0), point(2.0, 0.0)),
        |p: &mut GeometricPath| {
            p.add_bezier_curve_to(point(1.0, 1.0), point(2.0, 1.0), point(3.0, 0.0))
        },
        |p: &mut GeometricPath| p.add_rect(&rect(0.0, 0.0, 1.0, 1.0)),
        |p: &mut GeometricPath| p.add_ellipse(&rect(0.0, 0.0, 1.0, 1.0)),
        |p: &mut GeometricPath| p.close_subpath(),
    ];

    for build in &builders {
        let mut path = GeometricPath::new();
        path.move_to(point(0.0, 0.0));
        build(&mut path);
        assert!(!path.is_empty());
    }
}

#[test]
fn move_to_only_bounds() {
    let mut path = GeometricPath::new();
    assert_eq!(path.bounding_rect(), Rect::zero());
    assert_eq!(path.fast_bounding_rect(), Rect::zero());

    path.move_to(point(10.0, 20.0));
    path.move_to(point(-5.0, 40.0));
    path.move_to(point(100.0, -3.0));
    assert_eq!(path.bounding_rect(), Rect::zero());
    assert_eq!(path.fast_bounding_rect(), Rect::zero());
    assert_eq!(path.tight_bounding_rect(), Rect::zero());
}

#[test]
fn control_polygon_bounds() {
    let mut path = GeometricPath::new();
    path.move_to(point(0.0, 0.0));
    path.add_quad_curve_to(point(5.0, 10.0), point(10.0, 0.0));

    assert_eq!(path.bounding_rect(), rect(0.0, 0.0, 10.0, 10.0));
    assert_eq!(path.fast_bounding_rect(), path.bounding_rect());

    let tight = path.tight_bounding_rect();
    assert!((tight.size.height - 5.0).abs() < 1e-4);
    assert!((tight.size.width - 10.0).abs() < 1e-4);
}

#[test]
fn identity_transform() {
    let mut path = curvy();
    let before = path.clone();

    path.transform(&Transform::identity());
    assert_eq!(path, before);
    assert_eq!(path.bounding_rect(), before.bounding_rect());
    assert_eq!(trace(&path), trace(&before));

    let mut empty = GeometricPath::new();
    empty.transform(&Transform::scale(2.0, 2.0));
    assert!(empty.segments().is_empty());
}

#[test]
fn translate_matches_transform() {
    let mut translated = curvy();
    let mut transformed = translated.clone();

    translated.translate(vector(3.5, -7.25));
    transformed.transform(&Transform::translation(3.5, -7.25));

    let a = trace(&translated);
    let b = trace(&transformed);
    assert_eq!(a.len(), b.len());
    for ((kind_a, points_a), (kind_b, points_b)) in a.iter().zip(b.iter()) {
        assert_eq!(kind_a, kind_b);
        for (pa, pb) in points_a.iter().zip(points_b.iter()) {
            assert!((*pa - *pb).length() < 1e-4);
        }
    }

    let ra = translated.bounding_rect();
    let rb = transformed.bounding_rect();
    assert!((ra.origin - rb.origin).length() < 1e-4);
    assert!((ra.size.width - rb.size.width).abs() < 1e-4);
    assert!((ra.size.height - rb.size.height).abs() < 1e-4);
}

#[test]
fn transform_scales_points() {
    let mut path = square();
    path.transform(&Transform::scale(2.0, 3.0));
    assert_eq!(path.bounding_rect(), rect(0.0, 0.0, 20.0, 30.0));
}

#[test]
fn non_finite_arc_angles() {
    let mut path = square();
    let before = trace(&path);

    path.add_arc(point(5.0, 5.0), 3.0, f32::NAN, 0.0, true);
    path.add_arc(point(5.0, 5.0), 3.0, 0.0, f32::INFINITY, false);
    path.add_arc(point(5.0, 5.0), 3.0, f32::NEG_INFINITY, 1.0, false);

    assert_eq!(trace(&path), before);
}

#[test]
fn arcs() {
    use std::f32::consts::FRAC_PI_2;

    let mut path = GeometricPath::new();
    path.add_arc(point(0.0, 0.0), 10.0, 0.0, FRAC_PI_2, false);

    // Move to the start of the arc, then a single quarter curve.
    assert_eq!(path.segments().len(), 2);
    assert_eq!(path.segments()[0], PathSegment::MoveTo(point(10.0, 0.0)));
    assert!((path.current_point() - point(0.0, 10.0)).length() < 1e-4);

    // Going the other way around takes three quarters.
    let mut path = GeometricPath::new();
    path.add_arc(point(0.0, 0.0), 10.0, 0.0, FRAC_PI_2, true);
    assert!((path.current_point() - point(0.0, 10.0)).length() < 1e-3);
    let bounds = path.tight_bounding_rect();
    assert!((bounds.origin - point(-10.0, -10.0)).length() < 1e-2);
    assert!((bounds.max_x() - 10.0).abs() < 1e-2);
    assert!((bounds.max_y() - 10.0).abs() < 1e-2);

    // With a current point, a line joins the arc.
    let mut path = GeometricPath::new();
    path.move_to(point(0.0, 0.0));
    path.add_arc(point(0.0, 0.0), 10.0, 0.0, PI, false);
    assert_eq!(path.segments()[1], PathSegment::LineTo(point(10.0, 0.0)));
}

#[test]
fn full_circle_arc() {
    let mut path = GeometricPath::new();
    path.add_arc(point(5.0, 5.0), 5.0, 0.0, 2.0 * PI, false);
    path.close_subpath();

    assert!(path.contains(point(5.0, 5.0), WindRule::NonZero));
    assert!(path.contains(point(9.5, 5.0), WindRule::NonZero));
    assert!(!path.contains(point(9.5, 9.5), WindRule::NonZero));
}

#[test]
fn arc_to() {
    let mut path = GeometricPath::new();
    path.move_to(point(0.0, 0.0));
    path.add_arc_to(point(10.0, 0.0), point(10.0, 10.0), 2.0);

    match path.segments()[1] {
        PathSegment::LineTo(to) => assert!((to - point(8.0, 0.0)).length() < 1e-4),
        other => panic!("expected a line, got {:?}", other),
    }
    assert!((path.current_point() - point(10.0, 2.0)).length() < 1e-4);

    let bounds = path.tight_bounding_rect();
    assert!((bounds.max_x() - 10.0).abs() < 1e-3);
    assert!((bounds.max_y() - 2.0).abs() < 1e-3);

    // Collinear points degenerate into a line.
    let mut path = GeometricPath::new();
    path.move_to(point(0.0, 0.0));
    path.add_arc_to(point(5.0, 0.0), point(10.0, 0.0), 2.0);
    assert_eq!(path.segments()[1], PathSegment::LineTo(point(5.0, 0.0)));

    // Without a current point, the corner becomes the current point.
    let mut path = GeometricPath::new();
    path.add_arc_to(point(5.0, 5.0), point(10.0, 0.0), 2.0);
    assert_eq!(path.segments()[0], PathSegment::MoveTo(point(5.0, 5.0)));
    assert_eq!(path.current_point(), point(5.0, 5.0));
}

#[test]
fn rect_and_ellipse() {
    let mut path = GeometricPath::new();
    path.add_rect(&rect(1.0, 2.0, 3.0, 4.0));
    assert_eq!(
        format!("{:?}", path),
        "\"M 1.0 2.0 L 4.0 2.0 L 4.0 6.0 L 1.0 6.0 Z\""
    );

    let mut path = GeometricPath::new();
    path.add_ellipse(&rect(0.0, 0.0, 20.0, 10.0));
    assert_eq!(path.segments()[0], PathSegment::MoveTo(point(20.0, 5.0)));
    assert_eq!(path.segments().last(), Some(&PathSegment::CloseSubpath));
    assert!((path.bounding_rect().size.width - 20.0).abs() < 1e-4);
    assert!(path.contains(point(10.0, 5.0), WindRule::NonZero));
    assert!(path.contains(point(19.0, 5.0), WindRule::NonZero));
    assert!(!path.contains(point(19.0, 9.0), WindRule::NonZero));
}

#[test]
fn rounded_rects() {
    let bounds = rect(0.0, 0.0, 20.0, 10.0);

    let mut path = GeometricPath::new();
    path.add_rounded_rect(&bounds, size(4.0, 4.0));
    assert_eq!(path.segments().last(), Some(&PathSegment::CloseSubpath));
    assert_eq!(path.bounding_rect(), bounds);
    assert!(!path.contains(point(0.5, 0.5), WindRule::NonZero));
    assert!(path.contains(point(10.0, 0.5), WindRule::NonZero));

    // Oversized uniform radii are clamped instead of falling back.
    let mut clamped = GeometricPath::new();
    clamped.add_rounded_rect(&bounds, size(50.0, 50.0));
    assert!(!clamped.contains(point(0.5, 0.5), WindRule::NonZero));
    assert!(clamped.contains(point(10.0, 5.0), WindRule::NonZero));

    // Per-corner radii that don't fit produce a plain rectangle.
    let radii = CornerRadii {
        top_left: size(15.0, 2.0),
        top_right: size(15.0, 2.0),
        ..CornerRadii::default()
    };
    let mut fallback = GeometricPath::new();
    fallback.add_rounded_rect_with_radii(&bounds, &radii);
    let mut plain = GeometricPath::new();
    plain.add_rect(&bounds);
    assert_eq!(fallback, plain);

    let mut empty = GeometricPath::new();
    empty.add_rounded_rect(&rect(0.0, 0.0, 0.0, 10.0), size(1.0, 1.0));
    assert!(empty.segments().is_empty());
}

#[test]
fn outside_fast_bounds() {
    let path = curvy();
    let bounds = path.fast_bounding_rect();

    for &p in &[
        point(bounds.min_x() - 0.1, bounds.min_y() + 1.0),
        point(bounds.max_x() + 0.1, bounds.min_y() + 1.0),
        point(bounds.min_x() + 1.0, bounds.max_y() + 0.1),
        point(f32::NAN, 0.0),
    ] {
        assert!(!path.contains(p, WindRule::NonZero));
        assert!(!path.contains(p, WindRule::EvenOdd));
    }
}

#[test]
fn open_sub_paths_are_closed_for_containment() {
    let mut path = GeometricPath::new();
    path.move_to(point(0.0, 0.0));
    path.add_line_to(point(10.0, 0.0));
    path.add_line_to(point(10.0, 10.0));
    path.add_line_to(point(0.0, 10.0));

    let before = path.clone();
    assert!(path.contains(point(5.0, 5.0), WindRule::NonZero));
    assert_eq!(path, before);
}

#[test]
fn apply_round_trip() {
    let path = curvy();

    let mut replayed = GeometricPath::new();
    path.apply(|element| replayed.push_element(element).unwrap());

    assert_eq!(trace(&replayed), trace(&path));
    assert_eq!(replayed, path);
}

#[test]
fn push_element_checks_point_count() {
    use crate::ElementKind;

    let mut path = GeometricPath::new();
    let result = path.push_element(&PathElement {
        kind: ElementKind::CubicCurveTo,
        points: &[point(0.0, 0.0), point(1.0, 1.0)],
    });

    assert_eq!(
        result,
        Err(PathError::PointCount {
            kind: ElementKind::CubicCurveTo,
            expected: 3,
            found: 2,
        })
    );
    assert!(path.segments().is_empty());
}

#[test]
fn current_point_after_close() {
    let mut path = square();
    assert_eq!(path.current_point(), point(0.0, 0.0));

    path.add_line_to(point(0.0, 5.0));
    assert_eq!(path.current_point(), point(0.0, 5.0));
}

#[test]
fn measurements() {
    let mut path = GeometricPath::new();
    path.add_rect(&rect(0.0, 0.0, 10.0, 10.0));

    assert!((path.length() - 40.0).abs() < 1e-3);
    assert!((path.point_at_length(20.0).unwrap() - point(10.0, 10.0)).length() < 1e-3);
    assert!(path.angle_at_length(5.0).unwrap().radians.abs() < 1e-5);
    assert_eq!(path.point_at_length(50.0), None);
}

#[test]
fn hole_in_square() {
    let mut path = GeometricPath::new();
    path.add_rect(&rect(0.0, 0.0, 1.0, 1.0));
    path.move_to(point(0.25, 0.25));
    path.add_line_to(point(0.75, 0.25));
    path.add_line_to(point(0.75, 0.75));
    path.add_line_to(point(0.20, 0.75));
    path.close_subpath();

    let options = QueryOptions::tolerance(0.1);
    let hit = |x, y, rule| path.contains_with_options(point(x, y), rule, &options);

    assert!(!hit(-1.0, 0.5, WindRule::EvenOdd));
    assert!(!hit(2.0, 0.5, WindRule::EvenOdd));
    assert!(!hit(2.0, 0.0, WindRule::EvenOdd));
    assert!(!hit(0.5, -1.0, WindRule::EvenOdd));
    assert!(!hit(0.5, 2.0, WindRule::EvenOdd));

    assert!(!hit(0.5, 0.5, WindRule::EvenOdd));
    assert!(hit(0.5, 0.5, WindRule::NonZero));
    assert!(hit(0.2, 0.5, WindRule::EvenOdd));
    assert!(hit(0.8, 0.5, WindRule::EvenOdd));
}

#[test]
fn double_square_winding() {
    let mut path = GeometricPath::new();
    path.move_to(point(0.0, 0.0));
    for _ in 0..2 {
        path.add_line_to(point(1.0, 0.0));
        path.add_line_to(point(1.0, 1.0));
        path.add_line_to(point(0.0, 1.0));
        path.add_line_to(point(0.0, 0.0));
    }
    path.close_subpath();

    assert!(path.contains(point(0.5, 0.5), WindRule::NonZero));
    assert!(!path.contains(point(0.5, 0.5), WindRule::EvenOdd));
}

#[test]
fn point_aligned_with_vertex() {
    let mut path = GeometricPath::new();
    path.move_to(point(0.0, 50.0));
    path.add_line_to(point(50.0, 50.0));
    path.add_line_to(point(50.0, 0.0));
    path.add_line_to(point(100.0, 0.0));
    path.add_line_to(point(100.0, 100.0));
    path.add_line_to(point(0.0, 100.0));
    path.add_line_to(point(0.0, 50.0));
    path.close_subpath();

    let options = QueryOptions::tolerance(1.0);
    assert!(path.contains_with_options(point(55.0, 50.0), WindRule::EvenOdd, &options));
}

#[test]
fn unusable_tolerances() {
    let mut path = GeometricPath::new();
    path.move_to(point(0.0, 0.0));
    path.add_quad_curve_to(point(5.0, 10.0), point(10.0, 0.0));
    path.close_subpath();

    let style = crate::StrokeStyle::DEFAULT.with_line_width(2.0);
    for &tolerance in &[0.0, -1.0, f32::NAN, f32::INFINITY] {
        let options = QueryOptions::DEFAULT.with_tolerance(tolerance);

        assert!(path.contains_with_options(point(5.0, 2.0), WindRule::NonZero, &options));
        assert!(!path.contains_with_options(point(5.0, 6.0), WindRule::NonZero, &options));

        assert!(path.stroke_contains_with_options(&style, point(5.0, 0.5), &options));
        assert!(!path.stroke_contains_with_options(&style, point(5.0, 2.0), &options));

        let bounds = path.stroke_bounding_rect_with_options(Some(&style), &options);
        assert!(bounds.min_y() <= -1.0 + 1e-3);
        assert!(bounds.max_y() >= 5.0);
    }

    for &tolerance in &[0.0, f32::NAN] {
        let measure = path.measurements(tolerance);
        assert!(measure.length() > 20.0);
    }
}

#[test]
fn collect_segments() {
    let path: GeometricPath = square().iter().copied().collect();
    assert_eq!(path, square());

    let mut extended = GeometricPath::new();
    extended.extend(square().iter().copied());
    assert_eq!(extended.segments().len(), 4);
}

#[test]
fn path_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GeometricPath>();
}
