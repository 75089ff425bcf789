//! Measure distances along a path.
//!
//! Curves are flattened once by lyon's path measurements, then every query samples the
//! cached edges.

use crate::events::PathEvent;
use crate::math::*;
use crate::path::GeometricPath;
use crate::usable_tolerance;

use lyon_algorithms::measure::{self, SampleType};
use lyon_path::Path;

/// The result of sampling a path.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathSample {
    position: Point,
    tangent: Vector,
}

impl PathSample {
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Unit vector in the drawing direction.
    #[inline]
    pub fn tangent(&self) -> Vector {
        self.tangent
    }

    #[inline]
    pub fn angle(&self) -> Angle {
        self.tangent.angle_from_x_axis()
    }
}

/// Flattened edges of a path with their cumulative length.
///
/// Closed sub-paths include their closing edge. Zero-length edges are not measured, so a
/// path made of zero-length sub-paths measures as empty.
pub struct PathMeasurements {
    path: Path,
    measurements: measure::PathMeasurements,
}

impl PathMeasurements {
    /// The tolerance is validated like [`QueryOptions::tolerance`](crate::QueryOptions::tolerance).
    pub fn from_path(path: &GeometricPath, tolerance: f32) -> Self {
        let mut builder = Path::builder();
        for sub_path in path.events().sub_paths() {
            if sub_path.is_point {
                continue;
            }

            for evt in sub_path.path.iter() {
                match evt {
                    PathEvent::Begin { at } => {
                        builder.begin(at);
                    }
                    PathEvent::Line { to, .. } => {
                        builder.line_to(to);
                    }
                    PathEvent::Quadratic { ctrl, to, .. } => {
                        builder.quadratic_bezier_to(ctrl, to);
                    }
                    PathEvent::Cubic {
                        ctrl1, ctrl2, to, ..
                    } => {
                        builder.cubic_bezier_to(ctrl1, ctrl2, to);
                    }
                    // A closing edge of zero length can't be sampled.
                    PathEvent::End { last, first, close } => {
                        builder.end(close && last != first);
                    }
                }
            }
        }

        let path = builder.build();
        let measurements = measure::PathMeasurements::from_path(&path, usable_tolerance(tolerance));

        PathMeasurements { path, measurements }
    }

    /// Total length of the path.
    pub fn length(&self) -> f32 {
        self.measurements.length()
    }

    /// Samples the path at `dist` from its start.
    ///
    /// Returns `None` if the path has no length or if `dist` is outside of
    /// `0.0..=self.length()`.
    pub fn sample(&self, dist: f32) -> Option<PathSample> {
        let length = self.length();
        if !(length > 0.0 && dist >= 0.0 && dist <= length) {
            return None;
        }

        let mut sampler = self
            .measurements
            .create_sampler(&self.path, SampleType::Distance);
        let sample = sampler.sample(dist);

        Some(PathSample {
            position: sample.position(),
            tangent: sample.tangent(),
        })
    }

    pub fn point_at_length(&self, dist: f32) -> Option<Point> {
        self.sample(dist).map(|sample| sample.position())
    }

    /// Direction of the path at `dist`, measured from the x axis towards the y axis.
    pub fn angle_at_length(&self, dist: f32) -> Option<Angle> {
        self.sample(dist).map(|sample| sample.angle())
    }
}

#[cfg(test)]
fn approx_point(a: Point, b: Point) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn measure_square() {
    let mut path = GeometricPath::new();
    path.add_rect(&rect(0.0, 0.0, 10.0, 10.0));

    let measure = PathMeasurements::from_path(&path, 0.01);
    assert!((measure.length() - 40.0).abs() < 1e-4);

    assert!(approx_point(measure.point_at_length(0.0).unwrap(), point(0.0, 0.0)));
    assert!(approx_point(measure.point_at_length(15.0).unwrap(), point(10.0, 5.0)));
    assert!(approx_point(measure.point_at_length(35.0).unwrap(), point(0.0, 5.0)));
    assert!(approx_point(measure.point_at_length(40.0).unwrap(), point(0.0, 0.0)));

    let down = measure.angle_at_length(15.0).unwrap();
    assert!((down.radians - std::f32::consts::FRAC_PI_2).abs() < 1e-5);

    assert_eq!(measure.point_at_length(-1.0), None);
    assert_eq!(measure.point_at_length(41.0), None);
    assert_eq!(measure.point_at_length(f32::NAN), None);
}

#[test]
fn measure_open_sub_paths() {
    let mut path = GeometricPath::new();
    path.move_to(point(0.0, 0.0));
    path.add_line_to(point(10.0, 0.0));
    path.move_to(point(0.0, 10.0));
    path.add_line_to(point(0.0, 20.0));

    let measure = PathMeasurements::from_path(&path, 0.01);
    // The jump between sub-paths is not part of the length.
    assert!((measure.length() - 20.0).abs() < 1e-4);
    assert!(approx_point(measure.point_at_length(12.0).unwrap(), point(0.0, 12.0)));
}

#[test]
fn measure_quarter_circle() {
    use std::f32::consts::{FRAC_PI_2, PI};

    let mut path = GeometricPath::new();
    path.add_arc(point(0.0, 0.0), 10.0, 0.0, FRAC_PI_2, false);

    let measure = PathMeasurements::from_path(&path, 0.001);
    assert!((measure.length() - 5.0 * PI).abs() < 0.05);

    let end = measure.point_at_length(measure.length()).unwrap();
    assert!((end - point(0.0, 10.0)).length() < 1e-3);
}

#[test]
fn measure_empty() {
    let mut path = GeometricPath::new();
    assert_eq!(PathMeasurements::from_path(&path, 0.01).length(), 0.0);

    path.move_to(point(1.0, 1.0));
    path.add_line_to(point(1.0, 1.0));
    let measure = PathMeasurements::from_path(&path, 0.01);
    assert_eq!(measure.length(), 0.0);
    assert_eq!(measure.point_at_length(0.0), None);

    assert_eq!(measure.angle_at_length(0.0), None);
}

#[test]
fn closing_edge_without_length() {
    let mut path = GeometricPath::new();
    path.move_to(point(0.0, 0.0));
    path.add_line_to(point(10.0, 0.0));
    path.add_line_to(point(0.0, 0.0));
    path.close_subpath();

    let measure = path.measurements(0.01);
    assert!((measure.length() - 20.0).abs() < 1e-4);
    assert!(approx_point(measure.point_at_length(20.0).unwrap(), point(0.0, 0.0)));
    assert!(approx_point(measure.point_at_length(15.0).unwrap(), point(5.0, 0.0)));

    let back = measure.angle_at_length(15.0).unwrap();
    assert!((back.radians.abs() - std::f32::consts::PI).abs() < 1e-5);
}
