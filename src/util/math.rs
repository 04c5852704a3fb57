//! Angle helpers for template rotation.

/// Computes sine and cosine for an angle in degrees.
pub(crate) fn sin_cos_deg(angle_deg: f32) -> (f32, f32) {
    angle_deg.to_radians().sin_cos()
}

/// Returns true if the angle is a whole number of turns.
pub(crate) fn is_identity_angle(angle_deg: f32) -> bool {
    angle_deg % 360.0 == 0.0
}

#[cfg(test)]
mod tests {
    use super::{is_identity_angle, sin_cos_deg};

    #[test]
    fn sin_cos_deg_matches_quadrants() {
        let (sin, cos) = sin_cos_deg(90.0);
        assert!(sin > 0.999);
        assert!(cos.abs() < 1e-6);
    }

    #[test]
    fn full_turns_are_identity() {
        assert!(is_identity_angle(0.0));
        assert!(is_identity_angle(-720.0));
        assert!(!is_identity_angle(90.0));
    }
}
