extern crate geopath;
#[macro_use]
extern crate bencher;

use geopath::math::{point, rect, vector, Point, Transform};
use geopath::{DashPattern, GeometricPath, LineCap, LineJoin, PathEvent, StrokeStyle, WindRule};

use bencher::Bencher;

#[cfg(feature = "profiling")]
const N: usize = 100;
#[cfg(not(feature = "profiling"))]
const N: usize = 1;

fn build_path(path: &mut GeometricPath) {
    for _ in 0..N {
        for i in 0..10 {
            path.move_to(point(0.0, i as f32 * 10.0));
            for _ in 0..1_000 {
                path.add_line_to(point(1.0, 0.0));
                path.add_bezier_curve_to(point(2.0, 0.0), point(2.0, 1.0), point(2.0, 2.0));
                path.add_quad_curve_to(point(2.0, 0.0), point(2.0, 1.0));
            }
            path.close_subpath();
        }
    }
}

fn shapes() -> GeometricPath {
    let mut path = GeometricPath::new();
    for i in 0..100 {
        let x = (i % 10) as f32 * 30.0;
        let y = (i / 10) as f32 * 30.0;
        match i % 3 {
            0 => path.add_rect(&rect(x, y, 20.0, 20.0)),
            1 => path.add_ellipse(&rect(x, y, 20.0, 10.0)),
            _ => path.add_rounded_rect(&rect(x, y, 20.0, 20.0), geopath::math::size(4.0, 4.0)),
        }
    }

    path
}

fn path_build_empty(bench: &mut Bencher) {
    bench.iter(|| {
        let mut path = GeometricPath::new();
        build_path(&mut path);
        path
    });
}

fn path_build_prealloc(bench: &mut Bencher) {
    bench.iter(|| {
        let mut path = GeometricPath::with_capacity(N * 30_020);
        build_path(&mut path);
        path
    });
}

fn path_events(bench: &mut Bencher) {
    let mut path = GeometricPath::new();
    build_path(&mut path);

    let mut p = point(0.0, 0.0);
    bench.iter(|| {
        for evt in path.events() {
            p += match evt {
                PathEvent::Begin { at: p }
                | PathEvent::Line { to: p, .. }
                | PathEvent::Quadratic { to: p, .. }
                | PathEvent::Cubic { to: p, .. }
                | PathEvent::End { last: p, .. } => p.to_vector(),
            };
        }
    });
}

fn path_apply(bench: &mut Bencher) {
    let mut path = GeometricPath::new();
    build_path(&mut path);

    let mut p = point(0.0, 0.0);
    bench.iter(|| {
        path.apply(|element| {
            if let Some(last) = element.points.last() {
                p += last.to_vector();
            }
        });
    });
}

fn path_transform(bench: &mut Bencher) {
    let mut path = GeometricPath::new();
    build_path(&mut path);
    let transform = Transform::rotation(geopath::math::Angle::degrees(30.0))
        .then_translate(vector(5.0, 5.0));

    bench.iter(|| {
        path.transform(&transform);
    });
}

fn bounding_rect(bench: &mut Bencher) {
    let path = shapes();
    bench.iter(|| path.bounding_rect());
}

fn tight_bounding_rect(bench: &mut Bencher) {
    let path = shapes();
    bench.iter(|| path.tight_bounding_rect());
}

fn contains(bench: &mut Bencher) {
    let path = shapes();
    let points: Vec<Point> = (0..100)
        .map(|i| point((i * 7 % 300) as f32 + 0.5, (i * 13 % 300) as f32 + 0.5))
        .collect();

    bench.iter(|| {
        points
            .iter()
            .filter(|p| path.contains(**p, WindRule::NonZero))
            .count()
    });
}

fn stroke_contains(bench: &mut Bencher) {
    let path = shapes();
    let style = StrokeStyle::DEFAULT
        .with_line_width(3.0)
        .with_line_join(LineJoin::Round);

    bench.iter(|| path.stroke_contains(&style, point(10.0, 0.5)));
}

fn stroke_bounding_rect(bench: &mut Bencher) {
    let path = shapes();
    let style = StrokeStyle::DEFAULT
        .with_line_width(3.0)
        .with_line_cap(LineCap::Square);

    bench.iter(|| path.stroke_bounding_rect(Some(&style)));
}

fn dashed_stroke_geometry(bench: &mut Bencher) {
    let path = shapes();
    let dash = DashPattern::new(vec![4.0, 2.0, 0.0, 2.0], 1.0).unwrap();
    let style = StrokeStyle::DEFAULT
        .with_line_width(2.0)
        .with_line_cap(LineCap::Round)
        .with_dash(dash);

    bench.iter(|| path.stroke_geometry(Some(&style)).indices().len());
}

benchmark_group!(builder, path_build_empty, path_build_prealloc);

benchmark_group!(iter, path_events, path_apply, path_transform);

benchmark_group!(
    queries,
    bounding_rect,
    tight_bounding_rect,
    contains,
    stroke_contains,
    stroke_bounding_rect,
    dashed_stroke_geometry
);

benchmark_main!(builder, iter, queries);
