use super::vector::{cross, dot, normalize};
use nalgebra::Point3;

pub fn distance(p1: &Point3<f64>, p2: &Point3<f64>) -> f64 {
    nalgebra::distance(p1, p2)
}

/// Angle at vertex `p2` between the rays towards `p1` and `p3`, in radians within `[0, π]`.
///
/// Coincident points yield a defined but meaningless value; the cosine is clamped
/// before `acos` so floating-point drift can never leave its domain.
pub fn bond_angle(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>) -> f64 {
    let v1 = normalize(&(p1 - p2));
    let v2 = normalize(&(p3 - p2));
    dot(&v1, &v2).clamp(-1.0, 1.0).acos()
}

/// Signed torsion about the `p2`–`p3` bond, in radians within `(-π, π]`.
pub fn dihedral(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>, p4: &Point3<f64>) -> f64 {
    let v1 = p2 - p1;
    let v2 = p3 - p2;
    let v3 = p4 - p3;

    let n1 = normalize(&cross(&v1, &v2));
    let n2 = normalize(&cross(&v2, &v3));

    let cos_theta = dot(&n1, &n2);
    let sin_theta = dot(&cross(&n1, &n2), &normalize(&v2));

    sin_theta.atan2(cos_theta)
}

/// Converts a bond angle to degrees. The result stays within `[0, 180]`.
#[inline]
pub fn angle_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Converts a signed torsion to degrees within `[0, 360)`.
pub fn dihedral_degrees(radians: f64) -> f64 {
    let mut degrees = radians.to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    // A tiny negative torsion rounds up to exactly 360 after the shift.
    if degrees >= 360.0 { 0.0 } else { degrees }
}
