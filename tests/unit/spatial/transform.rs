//! Tests for yaw-only transforms

#[cfg(test)]
mod tests {
    use floorgen::spatial::Transform;
    use glam::Vec3;

    // Tests yaw rotates about the vertical axis
    // Verified by converting degrees with the wrong factor
    #[test]
    fn test_rotation_about_y() {
        let quarter = Transform::new(Vec3::ZERO, 90.0).rotation();
        let turned = quarter * Vec3::X;

        assert!((turned - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!((quarter * Vec3::Y - Vec3::Y).length() < 1e-5);
    }

    // Tests the default and positional constructors carry no rotation
    #[test]
    fn test_unrotated_constructors() {
        let origin = Transform::default();
        assert_eq!(origin.position, Vec3::ZERO);

        let placed = Transform::at(Vec3::new(1.0, 2.0, 3.0));
        assert!(placed.yaw_degrees.abs() < f32::EPSILON);
        assert!(placed.rotation().angle_between(glam::Quat::IDENTITY) < 1e-6);
    }
}
