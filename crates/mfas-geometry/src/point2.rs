//! A 2D point with closed-form group and manifold operations.
//!
//! The group operation is vector addition, so most Jacobians are `±I`. They are still offered
//! through optional output slots so `Point2` can be used interchangeably with non-trivial
//! manifold types by optimizers.

use nalgebra::{Matrix1x2, Matrix2, Vector2};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub};

/// Below this norm the derivative of `norm` is undefined; a fixed gradient is reported instead.
const NORM_DERIVATIVE_EPS: f64 = 1e-10;

/// Center distance below which two circles are treated as concentric.
const CONCENTRIC_EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2 {
    v: Vector2<f64>,
}

impl Point2 {
    pub const DIM: usize = 2;

    pub fn new(x: f64, y: f64) -> Self {
        Self {
            v: Vector2::new(x, y),
        }
    }

    pub fn origin() -> Self {
        Self::default()
    }

    pub fn from_vector(v: Vector2<f64>) -> Self {
        Self { v }
    }

    pub fn x(&self) -> f64 {
        self.v.x
    }

    pub fn y(&self) -> f64 {
        self.v.y
    }

    pub fn vector(&self) -> Vector2<f64> {
        self.v
    }

    pub fn dim(&self) -> usize {
        Self::DIM
    }

    pub fn equals(&self, q: &Point2, tol: f64) -> bool {
        (self.x() - q.x()).abs() <= tol && (self.y() - q.y()).abs() <= tol
    }

    // Group

    pub fn identity() -> Self {
        Self::origin()
    }

    pub fn inverse(&self, h: Option<&mut Matrix2<f64>>) -> Self {
        if let Some(h) = h {
            *h = -Matrix2::identity();
        }
        -*self
    }

    pub fn compose(
        &self,
        q: &Point2,
        h1: Option<&mut Matrix2<f64>>,
        h2: Option<&mut Matrix2<f64>>,
    ) -> Self {
        if let Some(h1) = h1 {
            *h1 = Matrix2::identity();
        }
        if let Some(h2) = h2 {
            *h2 = Matrix2::identity();
        }
        *self + *q
    }

    /// `q - self`, i.e. `compose(inverse(self), q)`.
    pub fn between(
        &self,
        q: &Point2,
        h1: Option<&mut Matrix2<f64>>,
        h2: Option<&mut Matrix2<f64>>,
    ) -> Self {
        if let Some(h1) = h1 {
            *h1 = -Matrix2::identity();
        }
        if let Some(h2) = h2 {
            *h2 = Matrix2::identity();
        }
        *q - *self
    }

    // Manifold

    pub fn retract(
        &self,
        delta: &Vector2<f64>,
        h1: Option<&mut Matrix2<f64>>,
        h2: Option<&mut Matrix2<f64>>,
    ) -> Self {
        if let Some(h1) = h1 {
            *h1 = Matrix2::identity();
        }
        if let Some(h2) = h2 {
            *h2 = Matrix2::identity();
        }
        Self::from_vector(self.v + delta)
    }

    pub fn local_coordinates(
        &self,
        q: &Point2,
        h1: Option<&mut Matrix2<f64>>,
        h2: Option<&mut Matrix2<f64>>,
    ) -> Vector2<f64> {
        if let Some(h1) = h1 {
            *h1 = -Matrix2::identity();
        }
        if let Some(h2) = h2 {
            *h2 = Matrix2::identity();
        }
        q.v - self.v
    }

    // Vector space

    pub fn norm(&self, h: Option<&mut Matrix1x2<f64>>) -> f64 {
        let r = self.v.norm();
        if let Some(h) = h {
            *h = if r > NORM_DERIVATIVE_EPS {
                Matrix1x2::new(self.x() / r, self.y() / r)
            } else {
                Matrix1x2::new(1.0, 1.0)
            };
        }
        r
    }

    pub fn distance(
        &self,
        q: &Point2,
        h1: Option<&mut Matrix1x2<f64>>,
        h2: Option<&mut Matrix1x2<f64>>,
    ) -> f64 {
        let d = *q - *self;
        if h1.is_none() && h2.is_none() {
            return d.norm(None);
        }
        let mut h = Matrix1x2::zeros();
        let r = d.norm(Some(&mut h));
        if let Some(h1) = h1 {
            *h1 = -h;
        }
        if let Some(h2) = h2 {
            *h2 = h;
        }
        r
    }

    /// The point scaled to unit norm. Not finite for the origin.
    pub fn unit(&self) -> Self {
        *self / self.norm(None)
    }

    /// Circle-circle intersection given radii normalized by the center distance `d`.
    ///
    /// Returns `(f, h)`: the distance along the center line to the chord, and the half chord
    /// length, both as fractions of `d`. `None` when the circles do not intersect. `h` is exactly
    /// zero when the circles touch (within `tol`).
    pub fn circle_circle_intersection_normalized(
        r_over_d: f64,
        s_over_d: f64,
        tol: f64,
    ) -> Option<Point2> {
        let r2 = r_over_d * r_over_d;
        let f = 0.5 + 0.5 * (r2 - s_over_d * s_over_d);
        let h2 = r2 - f * f;
        if h2 < -tol {
            None
        } else if h2 < tol {
            Some(Point2::new(f, 0.0))
        } else {
            Some(Point2::new(f, h2.sqrt()))
        }
    }

    /// Intersection points of the circles `(c1, r1)` and `(c2, r2)`: zero, one or two points.
    ///
    /// Concentric circles yield no points (either none or infinitely many exist).
    pub fn circle_circle_intersection(
        c1: Point2,
        r1: f64,
        c2: Point2,
        r2: f64,
        tol: f64,
    ) -> Vec<Point2> {
        let d = (c2 - c1).norm(None);
        if d < CONCENTRIC_EPS {
            return Vec::new();
        }
        let fh = Self::circle_circle_intersection_normalized(r1 / d, r2 / d, tol);
        Self::circle_circle_intersection_from(c1, c2, fh)
    }

    /// Expands a normalized `(f, h)` solution back into absolute intersection points.
    pub fn circle_circle_intersection_from(
        c1: Point2,
        c2: Point2,
        fh: Option<Point2>,
    ) -> Vec<Point2> {
        let Some(fh) = fh else {
            return Vec::new();
        };
        let c12 = c2 - c1;
        let p = c1 + c12 * fh.x();
        if fh.y() == 0.0 {
            return vec![p];
        }
        let offset = Point2::new(-c12.y(), c12.x()) * fh.y();
        vec![p + offset, p - offset]
    }
}

impl Add for Point2 {
    type Output = Point2;

    fn add(self, q: Point2) -> Point2 {
        Point2::from_vector(self.v + q.v)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, q: Point2) -> Point2 {
        Point2::from_vector(self.v - q.v)
    }
}

impl Neg for Point2 {
    type Output = Point2;

    fn neg(self) -> Point2 {
        Point2::from_vector(-self.v)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;

    fn mul(self, s: f64) -> Point2 {
        Point2::from_vector(self.v * s)
    }
}

impl Mul<Point2> for f64 {
    type Output = Point2;

    fn mul(self, p: Point2) -> Point2 {
        p * self
    }
}

impl Div<f64> for Point2 {
    type Output = Point2;

    fn div(self, s: f64) -> Point2 {
        Point2::from_vector(self.v / s)
    }
}

impl AddAssign for Point2 {
    fn add_assign(&mut self, q: Point2) {
        self.v += q.v;
    }
}

impl MulAssign<f64> for Point2 {
    fn mul_assign(&mut self, s: f64) {
        self.v *= s;
    }
}

impl Default for Point2 {
    fn default() -> Self {
        Self {
            v: Vector2::zeros(),
        }
    }
}

impl From<Vector2<f64>> for Point2 {
    fn from(v: Vector2<f64>) -> Self {
        Self::from_vector(v)
    }
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}
