use crate::math::Point;
use crate::segment::PathSegment;

use lyon_path::Path;

use core::slice;

/// A path event, as consumed by lyon's tessellators and algorithms.
pub use lyon_path::PathEvent;

/// An iterator of [`PathEvent`] over the segments of a path.
///
/// Sub-paths are always delimited by a `Begin`/`End` pair. Drawing segments appended
/// after a close start a new sub-path at the closed sub-path's first point, and drawing
/// segments appended before any move-to are skipped since they have no start point.
#[derive(Clone)]
pub struct Events<'l> {
    segments: slice::Iter<'l, PathSegment>,
    first: Point,
    current: Point,
    has_current_point: bool,
    in_sub_path: bool,
    close_all: bool,
    pending: Option<PathEvent>,
}

impl<'l> Events<'l> {
    pub(crate) fn new(segments: &'l [PathSegment]) -> Self {
        Events {
            segments: segments.iter(),
            first: Point::zero(),
            current: Point::zero(),
            has_current_point: false,
            in_sub_path: false,
            close_all: false,
            pending: None,
        }
    }

    /// Reports every sub-path as closed, without touching the path itself.
    pub fn closing_sub_paths(mut self) -> Self {
        self.close_all = true;
        self
    }

    fn end_sub_path(&mut self, close: bool) -> Option<PathEvent> {
        if !self.in_sub_path {
            return None;
        }

        self.in_sub_path = false;
        let last = self.current;
        self.current = self.first;

        Some(PathEvent::End {
            last,
            first: self.first,
            close,
        })
    }

    // Returns false if the edge must be skipped.
    fn begin_if_needed(&mut self) -> bool {
        if self.in_sub_path {
            return true;
        }

        if !self.has_current_point {
            log::debug!("Skipping a drawing segment without a current point.");
            return false;
        }

        self.first = self.current;
        self.in_sub_path = true;
        self.pending = Some(PathEvent::Begin { at: self.first });

        true
    }

    // Queues the edge behind a pending Begin, if any.
    fn emit(&mut self, edge: PathEvent) -> PathEvent {
        self.current = edge.to();
        match self.pending.take() {
            Some(begin) => {
                self.pending = Some(edge);
                begin
            }
            None => edge,
        }
    }
}

impl<'l> Iterator for Events<'l> {
    type Item = PathEvent;

    fn next(&mut self) -> Option<PathEvent> {
        if let Some(evt) = self.pending.take() {
            return Some(evt);
        }

        loop {
            let segment = match self.segments.next() {
                Some(segment) => segment,
                None => {
                    let close = self.close_all;
                    return self.end_sub_path(close);
                }
            };

            match *segment {
                PathSegment::MoveTo(at) => {
                    let close = self.close_all;
                    let end = self.end_sub_path(close);
                    self.first = at;
                    self.current = at;
                    self.has_current_point = true;
                    self.in_sub_path = true;

                    let begin = PathEvent::Begin { at };
                    return match end {
                        Some(end) => {
                            self.pending = Some(begin);
                            Some(end)
                        }
                        None => Some(begin),
                    };
                }
                PathSegment::LineTo(to) => {
                    if !self.begin_if_needed() {
                        continue;
                    }
                    let from = self.current;
                    return Some(self.emit(PathEvent::Line { from, to }));
                }
                PathSegment::QuadCurveTo { ctrl, to } => {
                    if !self.begin_if_needed() {
                        continue;
                    }
                    let from = self.current;
                    return Some(self.emit(PathEvent::Quadratic { from, ctrl, to }));
                }
                PathSegment::CubicCurveTo { ctrl1, ctrl2, to } => {
                    if !self.begin_if_needed() {
                        continue;
                    }
                    let from = self.current;
                    return Some(self.emit(PathEvent::Cubic {
                        from,
                        ctrl1,
                        ctrl2,
                        to,
                    }));
                }
                PathSegment::CloseSubpath => {
                    if let Some(end) = self.end_sub_path(true) {
                        return Some(end);
                    }
                }
            }
        }
    }
}

/// A drawing sub-path, rebuilt as a lyon path without zero-length edges.
pub(crate) struct SubPath {
    pub path: Path,
    /// The sub-path has no edge left and is a single point, ending open.
    pub is_point: bool,
}

impl<'l> Events<'l> {
    /// Collects the sub-paths that draw something.
    ///
    /// Lone move-tos are dropped. Sub-paths that are closed or have drawing segments but
    /// never leave their start point become a single point.
    pub(crate) fn sub_paths(self) -> Vec<SubPath> {
        let mut sub_paths = Vec::new();
        let mut builder = Path::builder();
        let mut start = Point::zero();
        let mut edges = 0;
        let mut draws = false;

        for evt in self {
            match evt {
                PathEvent::Begin { at } => {
                    start = at;
                    edges = 0;
                    draws = false;
                }
                PathEvent::End { close, .. } => {
                    if !(draws || close) {
                        continue;
                    }

                    if edges == 0 {
                        builder.begin(start);
                        builder.end(false);
                    } else {
                        builder.end(close);
                    }

                    sub_paths.push(SubPath {
                        path: std::mem::replace(&mut builder, Path::builder()).build(),
                        is_point: edges == 0,
                    });
                }
                edge => {
                    draws = true;
                    if is_degenerate(&edge) {
                        continue;
                    }

                    if edges == 0 {
                        builder.begin(start);
                    }
                    edges += 1;

                    match edge {
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
                        PathEvent::Begin { .. } | PathEvent::End { .. } => {}
                    }
                }
            }
        }

        sub_paths
    }
}

fn is_degenerate(edge: &PathEvent) -> bool {
    match *edge {
        PathEvent::Line { from, to } => from == to,
        PathEvent::Quadratic { from, ctrl, to } => from == ctrl && ctrl == to,
        PathEvent::Cubic {
            from,
            ctrl1,
            ctrl2,
            to,
        } => from == ctrl1 && ctrl1 == ctrl2 && ctrl2 == to,
        PathEvent::Begin { .. } | PathEvent::End { .. } => false,
    }
}

#[cfg(test)]
fn collect(segments: &[PathSegment], close_all: bool) -> std::vec::Vec<PathEvent> {
    let events = Events::new(segments);
    if close_all {
        events.closing_sub_paths().collect()
    } else {
        events.collect()
    }
}

#[test]
fn open_and_closed_sub_paths() {
    use crate::math::point;

    let segments = [
        PathSegment::MoveTo(point(0.0, 0.0)),
        PathSegment::LineTo(point(1.0, 0.0)),
        PathSegment::MoveTo(point(5.0, 5.0)),
        PathSegment::LineTo(point(6.0, 5.0)),
        PathSegment::CloseSubpath,
    ];

    assert_eq!(
        collect(&segments, false),
        vec![
            PathEvent::Begin { at: point(0.0, 0.0) },
            PathEvent::Line {
                from: point(0.0, 0.0),
                to: point(1.0, 0.0)
            },
            PathEvent::End {
                last: point(1.0, 0.0),
                first: point(0.0, 0.0),
                close: false
            },
            PathEvent::Begin { at: point(5.0, 5.0) },
            PathEvent::Line {
                from: point(5.0, 5.0),
                to: point(6.0, 5.0)
            },
            PathEvent::End {
                last: point(6.0, 5.0),
                first: point(5.0, 5.0),
                close: true
            },
        ]
    );

    let closed = collect(&segments, true);
    assert_eq!(
        closed[2],
        PathEvent::End {
            last: point(1.0, 0.0),
            first: point(0.0, 0.0),
            close: true
        }
    );
}

#[test]
fn drawing_after_close_restarts_at_first_point() {
    use crate::math::point;

    let segments = [
        PathSegment::MoveTo(point(1.0, 1.0)),
        PathSegment::LineTo(point(2.0, 1.0)),
        PathSegment::CloseSubpath,
        PathSegment::LineTo(point(1.0, 3.0)),
    ];

    let events = collect(&segments, false);
    assert_eq!(events.len(), 6);
    assert_eq!(events[3], PathEvent::Begin { at: point(1.0, 1.0) });
    assert_eq!(
        events[4],
        PathEvent::Line {
            from: point(1.0, 1.0),
            to: point(1.0, 3.0)
        }
    );
}

#[test]
fn drawing_without_current_point_is_skipped() {
    use crate::math::point;

    let segments = [
        PathSegment::LineTo(point(2.0, 1.0)),
        PathSegment::CloseSubpath,
        PathSegment::MoveTo(point(0.0, 0.0)),
    ];

    assert_eq!(
        collect(&segments, false),
        vec![
            PathEvent::Begin { at: point(0.0, 0.0) },
            PathEvent::End {
                last: point(0.0, 0.0),
                first: point(0.0, 0.0),
                close: false
            },
        ]
    );
}

#[test]
fn sub_paths_without_length() {
    use crate::math::point;

    let segments = [
        PathSegment::MoveTo(point(0.0, 0.0)),
        PathSegment::MoveTo(point(1.0, 1.0)),
        PathSegment::LineTo(point(1.0, 1.0)),
        PathSegment::MoveTo(point(2.0, 2.0)),
        PathSegment::CloseSubpath,
        PathSegment::MoveTo(point(3.0, 3.0)),
        PathSegment::LineTo(point(3.0, 3.0)),
        PathSegment::LineTo(point(4.0, 3.0)),
        PathSegment::CloseSubpath,
    ];

    let sub_paths = Events::new(&segments).sub_paths();
    assert_eq!(sub_paths.len(), 3);

    assert!(sub_paths[0].is_point);
    assert_eq!(
        sub_paths[0].path.iter().collect::<Vec<_>>(),
        vec![
            PathEvent::Begin { at: point(1.0, 1.0) },
            PathEvent::End {
                last: point(1.0, 1.0),
                first: point(1.0, 1.0),
                close: false
            },
        ]
    );

    assert!(sub_paths[1].is_point);

    assert!(!sub_paths[2].is_point);
    assert_eq!(
        sub_paths[2].path.iter().collect::<Vec<_>>(),
        vec![
            PathEvent::Begin { at: point(3.0, 3.0) },
            PathEvent::Line {
                from: point(3.0, 3.0),
                to: point(4.0, 3.0)
            },
            PathEvent::End {
                last: point(4.0, 3.0),
                first: point(3.0, 3.0),
                close: true
            },
        ]
    );
}
