use mfas_geometry::Point2;
use nalgebra::{Matrix1x2, Matrix2, Vector2};

const TOL: f64 = 1e-9;

fn numerical_gradient(f: impl Fn(&Point2) -> f64, p: &Point2) -> Matrix1x2<f64> {
    let eps = 1e-6;
    let dx = Vector2::new(eps, 0.0);
    let dy = Vector2::new(0.0, eps);
    let gx = (f(&p.retract(&dx, None, None)) - f(&p.retract(&-dx, None, None))) / (2.0 * eps);
    let gy = (f(&p.retract(&dy, None, None)) - f(&p.retract(&-dy, None, None))) / (2.0 * eps);
    Matrix1x2::new(gx, gy)
}

#[test]
fn arithmetic_matches_coordinates() {
    let p = Point2::new(1.0, 2.0);
    let q = Point2::new(-3.0, 0.5);
    assert_eq!(p + q, Point2::new(-2.0, 2.5));
    assert_eq!(p - q, Point2::new(4.0, 1.5));
    assert_eq!(-p, Point2::new(-1.0, -2.0));
    assert_eq!(p * 2.0, Point2::new(2.0, 4.0));
    assert_eq!(2.0 * p, p * 2.0);
    assert_eq!(p / 2.0, Point2::new(0.5, 1.0));

    let mut r = p;
    r += q;
    r *= 2.0;
    assert_eq!(r, Point2::new(-4.0, 5.0));
}

#[test]
fn group_operations_and_jacobians() {
    let p = Point2::new(1.0, 2.0);
    let q = Point2::new(4.0, -1.0);

    let mut h = Matrix2::zeros();
    assert_eq!(p.inverse(Some(&mut h)), Point2::new(-1.0, -2.0));
    assert_eq!(h, -Matrix2::identity());

    let (mut h1, mut h2) = (Matrix2::zeros(), Matrix2::zeros());
    assert_eq!(p.compose(&q, Some(&mut h1), Some(&mut h2)), p + q);
    assert_eq!(h1, Matrix2::identity());
    assert_eq!(h2, Matrix2::identity());

    let between = p.between(&q, Some(&mut h1), Some(&mut h2));
    assert_eq!(between, p.inverse(None).compose(&q, None, None));
    assert_eq!(h1, -Matrix2::identity());
    assert_eq!(h2, Matrix2::identity());

    assert_eq!(p.compose(&Point2::identity(), None, None), p);
}

#[test]
fn retract_and_local_coordinates_are_inverse() {
    let p = Point2::new(0.3, -7.0);
    let q = Point2::new(2.0, 5.5);
    let (mut h1, mut h2) = (Matrix2::zeros(), Matrix2::zeros());
    let d = p.local_coordinates(&q, Some(&mut h1), Some(&mut h2));
    assert_eq!(h1, -Matrix2::identity());
    assert_eq!(h2, Matrix2::identity());
    assert!(p.retract(&d, None, None).equals(&q, TOL));
    assert_eq!(p.dim(), 2);
}

#[test]
fn norm_and_distance_with_derivatives() {
    let p = Point2::new(3.0, 4.0);
    let mut h = Matrix1x2::zeros();
    assert!((p.norm(Some(&mut h)) - 5.0).abs() < TOL);
    let expected = numerical_gradient(|x| x.norm(None), &p);
    assert!((h - expected).amax() < 1e-6);

    let q = Point2::new(-1.0, 2.0);
    let (mut h1, mut h2) = (Matrix1x2::zeros(), Matrix1x2::zeros());
    let d = p.distance(&q, Some(&mut h1), Some(&mut h2));
    assert!((d - (p - q).norm(None)).abs() < TOL);
    let e1 = numerical_gradient(|x| x.distance(&q, None, None), &p);
    let e2 = numerical_gradient(|x| p.distance(x, None, None), &q);
    assert!((h1 - e1).amax() < 1e-6);
    assert!((h2 - e2).amax() < 1e-6);
}

#[test]
fn norm_derivative_at_origin_is_finite() {
    let mut h = Matrix1x2::zeros();
    assert_eq!(Point2::origin().norm(Some(&mut h)), 0.0);
    assert!(h.iter().all(|v| v.is_finite()));
}

#[test]
fn unit_has_norm_one() {
    let u = Point2::new(-6.0, 8.0).unit();
    assert!((u.norm(None) - 1.0).abs() < TOL);
    assert!(u.equals(&Point2::new(-0.6, 0.8), TOL));
}

#[test]
fn circle_circle_intersection_two_points() {
    let c1 = Point2::new(0.0, 0.0);
    let c2 = Point2::new(2.0, 0.0);
    let sols = Point2::circle_circle_intersection(c1, 2.0_f64.sqrt(), c2, 2.0_f64.sqrt(), 1e-9);
    assert_eq!(sols.len(), 2);
    assert!(sols[0].equals(&Point2::new(1.0, 1.0), TOL));
    assert!(sols[1].equals(&Point2::new(1.0, -1.0), TOL));
}

#[test]
fn circle_circle_intersection_touching_and_disjoint() {
    let c1 = Point2::new(0.0, 0.0);
    let c2 = Point2::new(4.0, 0.0);

    let touching = Point2::circle_circle_intersection(c1, 1.0, c2, 3.0, 1e-9);
    assert_eq!(touching.len(), 1);
    assert!(touching[0].equals(&Point2::new(1.0, 0.0), TOL));

    assert!(Point2::circle_circle_intersection(c1, 1.0, c2, 1.0, 1e-9).is_empty());
    assert!(Point2::circle_circle_intersection(c1, 1.0, c1, 1.0, 1e-9).is_empty());
}

#[test]
fn circle_circle_intersection_normalized_reports_geometry() {
    let fh = Point2::circle_circle_intersection_normalized(1.0, 1.0, 1e-9).unwrap();
    assert!((fh.x() - 0.5).abs() < TOL);
    assert!((fh.y() - 0.75_f64.sqrt()).abs() < TOL);
    assert!(Point2::circle_circle_intersection_normalized(0.1, 0.1, 1e-9).is_none());
}

mod props {
    use super::*;
    use proptest::prelude::*;

    fn point() -> impl Strategy<Value = Point2> {
        (-1e3f64..1e3, -1e3f64..1e3).prop_map(|(x, y)| Point2::new(x, y))
    }

    proptest! {
        #[test]
        fn local_coordinates_undo_retract(p in point(), q in point()) {
            let d = p.local_coordinates(&q, None, None);
            prop_assert!(p.retract(&d, None, None).equals(&q, 1e-9));
        }

        #[test]
        fn distance_is_symmetric_and_subadditive(a in point(), b in point(), c in point()) {
            let ab = a.distance(&b, None, None);
            prop_assert!((ab - b.distance(&a, None, None)).abs() < 1e-9);
            prop_assert!(ab <= a.distance(&c, None, None) + c.distance(&b, None, None) + 1e-9);
        }
    }
}
