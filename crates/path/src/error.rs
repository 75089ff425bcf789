use crate::segment::ElementKind;

use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum PathError {
    #[error("{kind:?} element expects {expected} point(s), got {found}.")]
    PointCount {
        kind: ElementKind,
        expected: usize,
        found: usize,
    },
    #[error("Dash length {0} is negative or not finite.")]
    InvalidDashLength(f32),
    #[error("Dash pattern has no length.")]
    ZeroLengthDashCycle,
}
