#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::match_like_matches_macro)]

//! A mutable 2D geometric path.
//!
//! [`GeometricPath`] owns an ordered log of segments (move, line, quadratic and cubic
//! curves, close) and answers the questions renderers and hit-testers ask about it:
//! whether a point is inside the fill or the stroke, what the bounds are, and what the
//! path looks like after an affine transformation.
//!
//! External code inspects the geometry through [`GeometricPath::apply`], which hands out
//! one [`PathElement`] per segment, or through the normalized [`PathEvent`] stream.
//!
//! # Examples
//!
//! ```
//! use geopath::{GeometricPath, WindRule};
//! use geopath::math::{point, rect};
//!
//! let mut path = GeometricPath::new();
//! path.move_to(point(0.0, 0.0));
//! path.add_line_to(point(10.0, 0.0));
//! path.add_line_to(point(10.0, 10.0));
//! path.close_subpath();
//!
//! assert_eq!(path.bounding_rect(), rect(0.0, 0.0, 10.0, 10.0));
//! assert!(path.contains(point(5.0, 5.0), WindRule::NonZero));
//! assert!(!path.contains(point(20.0, 20.0), WindRule::NonZero));
//! ```
//!
//! # Stroke queries
//!
//! Stroke hit-testing and stroke bounds need a stroke style. The style is not stored in
//! the path: callers pass a [`StrokeStyleApplier`] which configures a scratch
//! [`StrokeContext`] created for the duration of the query.
//!
//! ```
//! use geopath::{GeometricPath, LineCap, StrokeStyle};
//! use geopath::math::point;
//!
//! let mut path = GeometricPath::new();
//! path.move_to(point(0.0, 0.0));
//! path.add_line_to(point(10.0, 0.0));
//!
//! let style = StrokeStyle::DEFAULT
//!     .with_line_width(4.0)
//!     .with_line_cap(LineCap::Square);
//!
//! assert!(path.stroke_contains(&style, point(10.5, 1.0)));
//! assert!(!path.stroke_contains(&style, point(5.0, 3.0)));
//! ```

pub use lyon_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod aabb;
mod arc;
mod dash;
mod error;
mod events;
pub mod measure;
mod path;
mod segment;
pub mod stroke;

#[doc(inline)]
pub use crate::arc::CornerRadii;
#[doc(inline)]
pub use crate::error::PathError;
#[doc(inline)]
pub use crate::events::{Events, PathEvent};
#[doc(inline)]
pub use crate::measure::PathMeasurements;
#[doc(inline)]
pub use crate::path::GeometricPath;
#[doc(inline)]
pub use crate::segment::{ElementKind, PathElement, PathSegment};
#[doc(inline)]
pub use crate::stroke::{
    DashPattern, LineCap, LineJoin, StrokeContext, StrokeGeometry, StrokeStyle,
    StrokeStyleApplier,
};

pub mod math {
    //! f32 versions of the euclid types used everywhere in this crate.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Alias for ```euclid::default::Size2D<f32>```.
    pub type Size = euclid::default::Size2D<f32>;

    /// Alias for ```euclid::default::Rect<f32>```
    pub type Rect = euclid::default::Rect<f32>;

    /// Alias for ```euclid::default::Box2D<f32>```
    pub type Box2D = euclid::default::Box2D<f32>;

    /// Alias for ```euclid::default::Transform2D<f32>```
    pub type Transform = euclid::default::Transform2D<f32>;

    /// Alias for ```euclid::default::Translation2D<f32>```
    pub type Translation = euclid::Translation2D<f32, euclid::UnknownUnit, euclid::UnknownUnit>;

    /// An angle in radians (f32).
    pub type Angle = euclid::Angle<f32>;

    /// Shorthand for `Rect::new(Point::new(x, y), Size::new(w, h))`.
    #[inline]
    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect {
            origin: point(x, y),
            size: size(w, h),
        }
    }

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    /// Shorthand for `Size::new(w, h)`.
    #[inline]
    pub fn size(w: f32, h: f32) -> Size {
        Size::new(w, h)
    }
}

/// The wind rule defines how to determine what is inside and what is outside of the shape
/// when testing containment.
///
/// See the SVG specification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum WindRule {
    NonZero,
    EvenOdd,
}

impl WindRule {
    #[inline]
    pub fn is_in(&self, winding_number: i32) -> bool {
        match *self {
            WindRule::EvenOdd => winding_number % 2 != 0,
            WindRule::NonZero => winding_number != 0,
        }
    }

    #[inline]
    pub fn is_out(&self, winding_number: i32) -> bool {
        !self.is_in(winding_number)
    }
}

impl Default for WindRule {
    fn default() -> Self {
        WindRule::NonZero
    }
}

impl From<WindRule> for lyon_path::FillRule {
    fn from(rule: WindRule) -> Self {
        match rule {
            WindRule::NonZero => lyon_path::FillRule::NonZero,
            WindRule::EvenOdd => lyon_path::FillRule::EvenOdd,
        }
    }
}

/// Parameters for the containment, stroke and measurement queries.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct QueryOptions {
    /// Maximum allowed distance between a curve and the line segments approximating it.
    ///
    /// Values below `QueryOptions::MINIMUM_TOLERANCE` are raised to it. Zero, negative
    /// and non-finite values fall back to `QueryOptions::DEFAULT_TOLERANCE`.
    ///
    /// Default value: `QueryOptions::DEFAULT_TOLERANCE`.
    pub tolerance: f32,
}

impl QueryOptions {
    pub const DEFAULT_TOLERANCE: f32 = 0.01;
    pub const MINIMUM_TOLERANCE: f32 = 1e-4;

    pub const DEFAULT: Self = QueryOptions {
        tolerance: Self::DEFAULT_TOLERANCE,
    };

    #[inline]
    pub fn tolerance(tolerance: f32) -> Self {
        Self::DEFAULT.with_tolerance(tolerance)
    }

    #[inline]
    pub const fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The tolerance the queries flatten curves with.
    #[inline]
    pub fn effective_tolerance(&self) -> f32 {
        usable_tolerance(self.tolerance)
    }
}

// Curve flattening asserts on tolerances that are not strictly positive.
pub(crate) fn usable_tolerance(tolerance: f32) -> f32 {
    if tolerance > 0.0 && tolerance.is_finite() {
        return tolerance.max(QueryOptions::MINIMUM_TOLERANCE);
    }

    log::debug!(
        "Invalid tolerance {:?}, using {:?} instead.",
        tolerance,
        QueryOptions::DEFAULT_TOLERANCE
    );

    QueryOptions::DEFAULT_TOLERANCE
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn invalid_tolerances() {
    let tolerance = |t: f32| QueryOptions::tolerance(t).effective_tolerance();

    assert_eq!(tolerance(0.5), 0.5);
    assert_eq!(tolerance(1e-9), QueryOptions::MINIMUM_TOLERANCE);
    assert_eq!(tolerance(0.0), QueryOptions::DEFAULT_TOLERANCE);
    assert_eq!(tolerance(-1.0), QueryOptions::DEFAULT_TOLERANCE);
    assert_eq!(tolerance(f32::NAN), QueryOptions::DEFAULT_TOLERANCE);
    assert_eq!(tolerance(f32::INFINITY), QueryOptions::DEFAULT_TOLERANCE);
}

#[test]
fn wind_rules() {
    assert!(WindRule::NonZero.is_in(-2));
    assert!(WindRule::EvenOdd.is_out(-2));
    assert!(WindRule::EvenOdd.is_in(-1));
    assert!(WindRule::NonZero.is_out(0));
}
