pub mod line_3d;
pub mod polygon_2d;
pub mod ray;
pub mod triangle_3d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3D rotation type.
pub type Rotation3 = nalgebra::Rotation3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Builds a rotation from Euler angles applied in X, Y, Z order (radians).
///
/// The resulting matrix is `Rx * Ry * Rz`, matching the convention used by
/// the rendering side for object rotations.
#[must_use]
pub fn euler_xyz(angles: &Vector3) -> Rotation3 {
    Rotation3::from_axis_angle(&Vector3::x_axis(), angles.x)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), angles.y)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), angles.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn euler_zero_is_identity() {
        let r = euler_xyz(&Vector3::zeros());
        let p = r * Point3::new(1.0, 2.0, 3.0);
        assert_relative_eq!(p, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn euler_quarter_turn_about_y() {
        let r = euler_xyz(&Vector3::new(0.0, FRAC_PI_2, 0.0));
        let p = r * Point3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(p, Point3::new(0.0, 0.0, -1.0), epsilon = 1e-12);
    }
}
