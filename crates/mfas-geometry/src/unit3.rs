use crate::Direction;
use crate::error::{Error, Result};
use nalgebra::{Unit, Vector3};

/// Norms at or below this are treated as degenerate when normalizing.
const MIN_NORM: f64 = 1e-12;

/// A direction in 3D, stored as a unit vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit3 {
    p: Unit<Vector3<f64>>,
}

impl Unit3 {
    /// Normalizes `v`. Fails if `v` is (numerically) zero or not finite.
    pub fn new(v: Vector3<f64>) -> Result<Self> {
        let norm = v.norm();
        if !norm.is_finite() || norm <= MIN_NORM {
            return Err(Error::ZeroNorm { norm });
        }
        Ok(Self {
            p: Unit::new_unchecked(v / norm),
        })
    }

    pub fn from_xyz(x: f64, y: f64, z: f64) -> Result<Self> {
        Self::new(Vector3::new(x, y, z))
    }

    pub fn from_unit(p: Unit<Vector3<f64>>) -> Self {
        Self { p }
    }

    pub fn x(&self) -> f64 {
        self.p.x
    }

    pub fn y(&self) -> f64 {
        self.p.y
    }

    pub fn z(&self) -> f64 {
        self.p.z
    }

    pub fn as_vector(&self) -> &Vector3<f64> {
        self.p.as_ref()
    }

    pub fn dot(&self, q: &Unit3) -> f64 {
        self.p.into_inner().dot(&q.p.into_inner())
    }

    pub fn equals(&self, q: &Unit3, tol: f64) -> bool {
        (self.p.into_inner() - q.p.into_inner()).amax() <= tol
    }
}

impl Direction for Unit3 {
    fn dot(&self, other: &Self) -> f64 {
        Unit3::dot(self, other)
    }

    fn norm(&self) -> f64 {
        1.0
    }
}

impl std::ops::Neg for Unit3 {
    type Output = Unit3;

    fn neg(self) -> Unit3 {
        Unit3 { p: -self.p }
    }
}

impl std::fmt::Display for Unit3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
    }
}
