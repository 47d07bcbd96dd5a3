#![forbid(unsafe_code)]

//! Closed-form geometry primitives used by `mfas`.
//!
//! - [`Unit3`]: a unit-norm 3D direction (relative camera translations, projection axes).
//! - [`Point2`]: a 2D point with vector-space and manifold operations.
//!
//! Derivative-bearing operations take optional `&mut` Jacobian slots: a `Some` slot is
//! overwritten with the derivative, a `None` slot skips the computation entirely.

pub mod error;
pub mod point2;
pub mod unit3;

pub use error::{Error, Result};
pub use point2::Point2;
pub use unit3::Unit3;

/// Capability the edge weight builder needs from a direction measurement.
///
/// Implemented by [`Unit3`] and by raw `nalgebra::Vector3<f64>` (for callers that carry
/// unnormalized relative translations).
pub trait Direction {
    /// Scalar projection of `self` onto `other`.
    fn dot(&self, other: &Self) -> f64;

    fn norm(&self) -> f64;
}

impl Direction for nalgebra::Vector3<f64> {
    fn dot(&self, other: &Self) -> f64 {
        nalgebra::Matrix::dot(self, other)
    }

    fn norm(&self) -> f64 {
        nalgebra::Matrix::norm(self)
    }
}
