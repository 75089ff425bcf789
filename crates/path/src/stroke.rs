//! Stroke styles and stroke tessellation.
//!
//! A stroke query never reads a style stored in the path. Instead, a
//! [`StrokeStyleApplier`] configures a [`StrokeContext`] that only lives for the duration
//! of the query. The path is then tessellated into the triangles covering its stroke with
//! lyon's stroke tessellator, after splitting it into dashes if the style has any.
//!
//! ```
//! use geopath::{GeometricPath, LineJoin, StrokeContext};
//! use geopath::math::{point, rect};
//!
//! let mut path = GeometricPath::new();
//! path.move_to(point(0.0, 0.0));
//! path.add_line_to(point(10.0, 0.0));
//! path.add_line_to(point(10.0, 10.0));
//!
//! let applier = |ctx: &mut StrokeContext| {
//!     ctx.set_line_width(2.0);
//!     ctx.set_line_join(LineJoin::Bevel);
//! };
//!
//! assert_eq!(path.stroke_bounding_rect(Some(&applier)), rect(0.0, -1.0, 11.0, 11.0));
//! assert!(!path.stroke_contains(&applier, point(10.9, -0.9)));
//! ```

pub use crate::dash::DashPattern;

use crate::aabb::box_contains_inclusive;
use crate::events::{Events, SubPath};
use crate::geom::{LineSegment, Triangle};
use crate::math::*;
use crate::usable_tolerance;

use lyon_algorithms::measure::{PathMeasurements, SampleType};
use lyon_path::Path;
use lyon_tessellation::geometry_builder::{BuffersBuilder, Positions, VertexBuffers};
use lyon_tessellation::{StrokeOptions, StrokeTessellator};

#[cfg(test)]
use crate::path::GeometricPath;

/// Line cap as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinecapProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineCap {
    /// The stroke for each sub-path does not extend beyond its two endpoints.
    /// A zero length sub-path will therefore not have any stroke.
    Butt,
    /// At the end of each sub-path, the shape representing the stroke will be
    /// extended by a rectangle with the same width as the stroke width and
    /// whose length is half of the stroke width. If a sub-path has zero length,
    /// then the resulting effect is that the stroke for that sub-path consists
    /// solely of a square with side length equal to the stroke width, centered
    /// at the sub-path's point.
    Square,
    /// At the end of each sub-path, the shape representing the stroke will be extended
    /// by a half circle with a radius equal to half of the stroke width.
    /// If a sub-path has zero length, then the resulting effect is that the stroke for
    /// that sub-path consists solely of a full circle centered at the sub-path's point.
    Round,
}

impl Default for LineCap {
    fn default() -> Self {
        LineCap::Butt
    }
}

impl From<LineCap> for lyon_tessellation::LineCap {
    fn from(cap: LineCap) -> Self {
        match cap {
            LineCap::Butt => lyon_tessellation::LineCap::Butt,
            LineCap::Square => lyon_tessellation::LineCap::Square,
            LineCap::Round => lyon_tessellation::LineCap::Round,
        }
    }
}

/// Line join as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinejoinProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineJoin {
    /// A sharp corner is to be used to join path segments, unless the miter
    /// length exceeds the miter limit, in which case the join is beveled.
    Miter,
    /// A round corner is to be used to join path segments.
    Round,
    /// A bevelled corner is to be used to join path segments.
    Bevel,
}

impl Default for LineJoin {
    fn default() -> Self {
        LineJoin::Miter
    }
}

impl From<LineJoin> for lyon_tessellation::LineJoin {
    fn from(join: LineJoin) -> Self {
        match join {
            LineJoin::Miter => lyon_tessellation::LineJoin::Miter,
            LineJoin::Round => lyon_tessellation::LineJoin::Round,
            LineJoin::Bevel => lyon_tessellation::LineJoin::Bevel,
        }
    }
}

/// The parameters that shape a stroke.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StrokeStyle {
    /// Default value: `StrokeStyle::DEFAULT_LINE_WIDTH`.
    pub line_width: f32,

    /// What cap to use at both ends of each open sub-path.
    ///
    /// Default value: `LineCap::Butt`.
    pub line_cap: LineCap,

    /// Default value: `LineJoin::Miter`.
    pub line_join: LineJoin,

    /// Ratio between the miter length and the line width above which miter joins are
    /// beveled.
    ///
    /// Default value: `StrokeStyle::DEFAULT_MITER_LIMIT`.
    pub miter_limit: f32,

    /// Default value: `None` (solid line).
    pub dash: Option<DashPattern>,
}

impl StrokeStyle {
    pub const DEFAULT_LINE_WIDTH: f32 = 1.0;
    pub const DEFAULT_MITER_LIMIT: f32 = 10.0;
    pub const DEFAULT_LINE_CAP: LineCap = LineCap::Butt;
    pub const DEFAULT_LINE_JOIN: LineJoin = LineJoin::Miter;

    pub const DEFAULT: Self = StrokeStyle {
        line_width: Self::DEFAULT_LINE_WIDTH,
        line_cap: Self::DEFAULT_LINE_CAP,
        line_join: Self::DEFAULT_LINE_JOIN,
        miter_limit: Self::DEFAULT_MITER_LIMIT,
        dash: None,
    };

    #[inline]
    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    #[inline]
    pub fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.line_cap = cap;
        self
    }

    #[inline]
    pub fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }

    #[inline]
    pub fn with_miter_limit(mut self, limit: f32) -> Self {
        self.miter_limit = limit;
        self
    }

    #[inline]
    pub fn with_dash(mut self, dash: DashPattern) -> Self {
        self.dash = Some(dash);
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The scratch state a stroke query hands to its [`StrokeStyleApplier`].
///
/// A context is created for each query and dropped when the query returns.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeContext {
    style: StrokeStyle,
    tolerance: f32,
}

impl StrokeContext {
    /// Creates a context with the default style.
    ///
    /// The tolerance is validated like [`QueryOptions::tolerance`](crate::QueryOptions::tolerance).
    pub fn new(tolerance: f32) -> Self {
        StrokeContext {
            style: StrokeStyle::DEFAULT,
            tolerance: usable_tolerance(tolerance),
        }
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.style.line_width = width;
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.style.line_cap = cap;
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.style.line_join = join;
    }

    pub fn set_miter_limit(&mut self, limit: f32) {
        self.style.miter_limit = limit;
    }

    pub fn set_line_dash(&mut self, dash: Option<DashPattern>) {
        self.style.dash = dash;
    }
}

/// Configures the stroke style of a [`StrokeContext`] before a stroke query runs.
///
/// Implemented for [`StrokeStyle`] and for closures taking a `&mut StrokeContext`.
pub trait StrokeStyleApplier {
    fn apply_stroke_style(&self, context: &mut StrokeContext);
}

impl StrokeStyleApplier for StrokeStyle {
    fn apply_stroke_style(&self, context: &mut StrokeContext) {
        context.set_style(self.clone());
    }
}

impl<F> StrokeStyleApplier for F
where
    F: Fn(&mut StrokeContext),
{
    fn apply_stroke_style(&self, context: &mut StrokeContext) {
        self(context)
    }
}

/// The triangles covering the stroke of a path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeGeometry {
    vertices: Vec<Point>,
    indices: Vec<u32>,
}

impl StrokeGeometry {
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Three indices into [`vertices`](Self::vertices) per triangle.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle<f32>> + '_ {
        self.indices.chunks_exact(3).map(move |triangle| Triangle {
            a: self.vertices[triangle[0] as usize],
            b: self.vertices[triangle[1] as usize],
            c: self.vertices[triangle[2] as usize],
        })
    }

    /// Whether a triangle of the stroke contains the point, edges included.
    pub fn contains(&self, p: Point) -> bool {
        if self.is_empty() || !box_contains_inclusive(&self.bounding_box(), p) {
            return false;
        }

        // Triangles share edges along the middle of the stroke.
        let on_edge = |edge: LineSegment<f32>| {
            edge.square_distance_to_point(p) <= EDGE_EPSILON * EDGE_EPSILON
        };

        self.triangles().any(|triangle| {
            triangle.contains_point(p)
                || on_edge(triangle.ab())
                || on_edge(triangle.bc())
                || on_edge(triangle.ca())
        })
    }

    /// The smallest box containing the triangles, empty at the origin if there are none.
    pub fn bounding_box(&self) -> Box2D {
        if self.vertices.is_empty() {
            return Box2D::zero();
        }

        Box2D::from_points(&self.vertices)
    }
}

const EDGE_EPSILON: f32 = 1e-4;

fn stroke_options(style: &StrokeStyle, tolerance: f32) -> StrokeOptions {
    let miter_limit = if style.miter_limit >= StrokeOptions::MINIMUM_MITER_LIMIT {
        style.miter_limit
    } else {
        StrokeOptions::MINIMUM_MITER_LIMIT
    };

    StrokeOptions::DEFAULT
        .with_tolerance(tolerance)
        .with_line_width(style.line_width)
        .with_line_cap(style.line_cap.into())
        .with_line_join(style.line_join.into())
        .with_miter_limit(miter_limit)
}

/// Splits each sub-path into the dashes of the pattern.
///
/// Sub-paths without length are kept whole and keep their caps.
fn dashed(sub_paths: Vec<SubPath>, dash: &DashPattern, tolerance: f32) -> Vec<Path> {
    let mut output = Vec::with_capacity(sub_paths.len());

    for sub_path in sub_paths {
        if sub_path.is_point {
            output.push(sub_path.path);
            continue;
        }

        let measurements = PathMeasurements::from_path(&sub_path.path, tolerance);
        let length = measurements.length();
        if !(length > 0.0) {
            output.push(sub_path.path);
            continue;
        }

        let mut sampler = measurements.create_sampler(&sub_path.path, SampleType::Distance);
        let mut pieces = Path::builder();
        dash.for_each_dash(length, &mut |range| {
            if range.is_empty() {
                pieces.begin(sampler.sample(range.start).position());
                pieces.end(false);
            } else {
                sampler.split_range(range, &mut pieces);
            }
        });

        output.push(pieces.build());
    }

    output
}

/// Tessellates the stroke of a path.
///
/// Strokes without a positive width are empty.
pub(crate) fn tessellate_stroke(
    events: Events,
    style: &StrokeStyle,
    tolerance: f32,
) -> StrokeGeometry {
    if !(style.line_width > 0.0 && style.line_width.is_finite()) {
        return StrokeGeometry::default();
    }

    let sub_paths = events.sub_paths();
    let paths = match &style.dash {
        Some(dash) => dashed(sub_paths, dash, tolerance),
        None => sub_paths.into_iter().map(|sub_path| sub_path.path).collect(),
    };

    let options = stroke_options(style, tolerance);
    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
    let mut tessellator = StrokeTessellator::new();

    for path in &paths {
        let result = tessellator.tessellate_path(
            path,
            &options,
            &mut BuffersBuilder::new(&mut buffers, Positions),
        );

        if let Err(e) = result {
            log::error!("Stroke tessellation failed: {:?}", e);
            return StrokeGeometry::default();
        }
    }

    log::trace!(
        "Stroke of {} path(s) has {} vertices and {} triangles.",
        paths.len(),
        buffers.vertices.len(),
        buffers.indices.len() / 3
    );

    StrokeGeometry {
        vertices: buffers.vertices,
        indices: buffers.indices,
    }
}

#[cfg(test)]
fn line_path() -> GeometricPath {
    let mut path = GeometricPath::new();
    path.move_to(point(0.0, 0.0));
    path.add_line_to(point(10.0, 0.0));
    path
}

#[cfg(test)]
fn assert_rect_eq(actual: Rect, expected: Rect) {
    let close = |a: f32, b: f32| (a - b).abs() < 0.02;
    assert!(
        close(actual.origin.x, expected.origin.x)
            && close(actual.origin.y, expected.origin.y)
            && close(actual.size.width, expected.size.width)
            && close(actual.size.height, expected.size.height),
        "{:?} != {:?}",
        actual,
        expected
    );
}

#[test]
fn line_caps_extend_bounds() {
    let path = line_path();
    let style = StrokeStyle::DEFAULT.with_line_width(2.0);

    assert_rect_eq(
        path.stroke_bounding_rect(Some(&style)),
        rect(0.0, -1.0, 10.0, 2.0),
    );
    assert_rect_eq(
        path.stroke_bounding_rect(Some(&style.clone().with_line_cap(LineCap::Square))),
        rect(-1.0, -1.0, 12.0, 2.0),
    );
    assert_rect_eq(
        path.stroke_bounding_rect(Some(&style.with_line_cap(LineCap::Round))),
        rect(-1.0, -1.0, 12.0, 2.0),
    );
}

#[test]
fn default_stroke_style() {
    let path = line_path();
    assert_rect_eq(path.stroke_bounding_rect(None), rect(0.0, -0.5, 10.0, 1.0));
}

#[test]
fn line_caps_hit_testing() {
    let path = line_path();
    let butt = StrokeStyle::DEFAULT.with_line_width(2.0);
    let square = butt.clone().with_line_cap(LineCap::Square);
    let round = butt.clone().with_line_cap(LineCap::Round);

    assert!(path.stroke_contains(&butt, point(5.0, 0.9)));
    assert!(!path.stroke_contains(&butt, point(5.0, 1.5)));
    assert!(!path.stroke_contains(&butt, point(10.5, 0.0)));

    assert!(path.stroke_contains(&square, point(10.5, 0.0)));
    assert!(path.stroke_contains(&square, point(10.9, 0.9)));

    assert!(path.stroke_contains(&round, point(10.5, 0.0)));
    assert!(!path.stroke_contains(&round, point(10.9, 0.9)));
    assert!(path.stroke_contains(&round, point(-0.5, 0.5)));
}

#[test]
fn line_joins() {
    let mut path = line_path();
    path.add_line_to(point(10.0, 10.0));

    let miter = StrokeStyle::DEFAULT.with_line_width(2.0);
    let bevel = miter.clone().with_line_join(LineJoin::Bevel);
    let round = miter.clone().with_line_join(LineJoin::Round);
    let clipped_miter = miter.clone().with_miter_limit(1.0);

    let corner = point(10.9, -0.9);
    assert!(path.stroke_contains(&miter, corner));
    assert!(!path.stroke_contains(&bevel, corner));
    assert!(!path.stroke_contains(&round, corner));
    assert!(!path.stroke_contains(&clipped_miter, corner));

    // Inside of the turn.
    assert!(path.stroke_contains(&bevel, point(9.5, 0.5)));

    assert_rect_eq(
        path.stroke_bounding_rect(Some(&miter)),
        rect(0.0, -1.0, 11.0, 11.0),
    );
}

#[test]
fn closed_sub_paths_have_no_caps() {
    let mut path = GeometricPath::new();
    path.add_rect(&rect(0.0, 0.0, 10.0, 10.0));

    let style = StrokeStyle::DEFAULT
        .with_line_width(2.0)
        .with_line_cap(LineCap::Square);

    assert_rect_eq(
        path.stroke_bounding_rect(Some(&style)),
        rect(-1.0, -1.0, 12.0, 12.0),
    );
    assert!(path.stroke_contains(&style, point(-0.9, -0.9)));
    assert!(!path.stroke_contains(&style, point(5.0, 5.0)));
}

#[test]
fn dashed_line() {
    let path = line_path();
    let style = StrokeStyle::DEFAULT
        .with_line_width(2.0)
        .with_dash(DashPattern::new(vec![4.0, 2.0], 0.0).unwrap());

    assert!(path.stroke_contains(&style, point(2.0, 0.0)));
    assert!(!path.stroke_contains(&style, point(5.0, 0.0)));
    assert!(path.stroke_contains(&style, point(7.0, 0.0)));
}

#[test]
fn zero_length_sub_paths() {
    let mut path = GeometricPath::new();
    path.move_to(point(5.0, 5.0));
    path.add_line_to(point(5.0, 5.0));

    let butt = StrokeStyle::DEFAULT.with_line_width(2.0);
    assert_eq!(path.stroke_bounding_rect(Some(&butt)), Rect::zero());

    let square = butt.clone().with_line_cap(LineCap::Square);
    assert_rect_eq(
        path.stroke_bounding_rect(Some(&square)),
        rect(4.0, 4.0, 2.0, 2.0),
    );

    let round = butt.with_line_cap(LineCap::Round);
    assert_rect_eq(
        path.stroke_bounding_rect(Some(&round)),
        rect(4.0, 4.0, 2.0, 2.0),
    );
    assert!(path.stroke_contains(&round, point(5.5, 5.5)));
}

#[test]
fn move_to_only_paths_have_no_stroke() {
    let mut path = GeometricPath::new();
    path.move_to(point(5.0, 5.0));
    path.move_to(point(15.0, 5.0));

    let style = StrokeStyle::DEFAULT.with_line_cap(LineCap::Round);
    assert!(path.stroke_geometry(Some(&style)).is_empty());
    assert_eq!(path.stroke_bounding_rect(Some(&style)), Rect::zero());
    assert!(!path.stroke_contains(&style, point(5.0, 5.0)));
}

#[test]
fn applier_runs_once_per_query() {
    use std::cell::Cell;

    let path = line_path();
    let calls = Cell::new(0);
    let applier = |ctx: &mut StrokeContext| {
        calls.set(calls.get() + 1);
        ctx.set_line_width(6.0);
    };

    assert!(path.stroke_contains(&applier, point(5.0, 2.5)));
    assert_eq!(calls.get(), 1);

    assert_rect_eq(
        path.stroke_bounding_rect(Some(&applier)),
        rect(0.0, -3.0, 10.0, 6.0),
    );
    assert_eq!(calls.get(), 2);
}

#[test]
fn zero_width_stroke_is_empty() {
    let path = line_path();
    let style = StrokeStyle::DEFAULT.with_line_width(0.0);
    assert_eq!(path.stroke_bounding_rect(Some(&style)), Rect::zero());
}

#[test]
fn zero_length_dashes_are_dots() {
    let path = line_path();
    let dots = DashPattern::new(vec![0.0, 4.0], 0.0).unwrap();
    let round = StrokeStyle::DEFAULT
        .with_line_width(2.0)
        .with_line_cap(LineCap::Round)
        .with_dash(dots.clone());

    assert!(path.stroke_contains(&round, point(0.0, 0.0)));
    assert!(path.stroke_contains(&round, point(4.0, 0.0)));
    assert!(path.stroke_contains(&round, point(8.5, 0.5)));
    assert!(!path.stroke_contains(&round, point(2.0, 0.0)));
    assert!(!path.stroke_contains(&round, point(10.0, 0.0)));
    assert_rect_eq(
        path.stroke_bounding_rect(Some(&round)),
        rect(-1.0, -1.0, 10.0, 2.0),
    );

    let square = round.clone().with_line_cap(LineCap::Square);
    assert!(path.stroke_contains(&square, point(4.9, 0.9)));
    assert!(!path.stroke_contains(&square, point(6.0, 0.0)));

    let butt = round.with_line_cap(LineCap::Butt);
    assert!(path.stroke_geometry(Some(&butt)).is_empty());
}

#[test]
fn dashed_closed_sub_path() {
    let mut path = GeometricPath::new();
    path.add_rect(&rect(0.0, 0.0, 10.0, 10.0));

    let style = StrokeStyle::DEFAULT
        .with_line_width(2.0)
        .with_dash(DashPattern::new(vec![5.0], 0.0).unwrap());

    // Painted: the first half of every side.
    assert!(path.stroke_contains(&style, point(2.0, 0.0)));
    assert!(!path.stroke_contains(&style, point(7.0, 0.0)));
    assert!(path.stroke_contains(&style, point(10.0, 2.0)));
    assert!(!path.stroke_contains(&style, point(10.0, 7.0)));
    assert!(path.stroke_contains(&style, point(0.0, 8.0)));
}

#[test]
fn stroke_triangles() {
    let path = line_path();
    let style = StrokeStyle::DEFAULT.with_line_width(2.0);
    let geometry = path.stroke_geometry(Some(&style));

    assert!(!geometry.is_empty());
    assert_eq!(geometry.indices().len() % 3, 0);
    assert_eq!(geometry.triangles().count(), geometry.indices().len() / 3);
    for &index in geometry.indices() {
        assert!((index as usize) < geometry.vertices().len());
    }

    // Points on the edges of the stroke are inside.
    assert!(geometry.contains(point(5.0, 1.0)));
    assert!(geometry.contains(point(0.0, 0.0)));
    assert!(!geometry.contains(point(f32::NAN, 0.0)));
}
