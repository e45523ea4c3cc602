use nalgebra::Vector3;

/// Right-handed cross product `a × b`.
#[inline]
pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

#[inline]
pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b)
}

/// Returns the unit vector along `v`.
///
/// A zero-length vector is returned unchanged instead of producing NaNs, so
/// downstream callers must tolerate a zero result.
#[inline]
pub fn normalize(v: &Vector3<f64>) -> Vector3<f64> {
    v.try_normalize(0.0).unwrap_or(*v)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn cross_follows_right_hand_rule() {
        let z = cross(&Vector3::x(), &Vector3::y());
        assert_eq!(z, Vector3::z());
        let neg_z = cross(&Vector3::y(), &Vector3::x());
        assert_eq!(neg_z, -Vector3::z());
    }

    #[test]
    fn cross_is_orthogonal_to_both_inputs() {
        let a = Vector3::new(1.2, -0.4, 3.3);
        let b = Vector3::new(-2.0, 0.7, 0.1);
        let c = cross(&a, &b);
        assert!(dot(&c, &a).abs() < EPS);
        assert!(dot(&c, &b).abs() < EPS);
    }

    #[test]
    fn dot_matches_componentwise_sum() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, -5.0, 6.0);
        assert_eq!(dot(&a, &b), 12.0);
    }

    #[test]
    fn normalize_produces_unit_length() {
        let v = normalize(&Vector3::new(3.0, 0.0, 4.0));
        assert!((dot(&v, &v).sqrt() - 1.0).abs() < EPS);
        assert!((v.x - 0.6).abs() < EPS);
        assert!((v.z - 0.8).abs() < EPS);
    }

    #[test]
    fn cross_of_general_vectors() {
        let c = cross(&Vector3::new(1.0, 2.0, 3.0), &Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(c, Vector3::new(-3.0, 6.0, -3.0));
    }

    #[test]
    fn normalize_passes_zero_vector_through() {
        let zero = Vector3::zeros();
        let n = normalize(&zero);
        assert_eq!(n, zero);
        assert!(n.iter().all(|c| c.is_finite()));
    }
}
