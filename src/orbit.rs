use glam::{Mat4, Vec3};

/// Point light that revolves around the world origin while enabled.
///
/// The rotation is about the origin, not the light's own center: the light
/// traces a circle at whatever radius it currently has from the Y axis.
#[derive(Debug, Clone, Copy)]
pub struct LightOrbit {
    pub position: Vec3,
    pub angular_velocity: f32,
    orbiting: bool,
}

impl LightOrbit {
    pub fn new(position: Vec3, angular_velocity: f32) -> Self {
        Self {
            position,
            angular_velocity,
            orbiting: true,
        }
    }

    pub fn is_orbiting(&self) -> bool {
        self.orbiting
    }

    /// Start orbiting. Returns true only on the paused -> orbiting
    /// transition, so a held key cannot retrigger it.
    pub fn resume(&mut self) -> bool {
        if self.orbiting {
            return false;
        }
        self.orbiting = true;
        true
    }

    /// Stop orbiting. Returns true only on the orbiting -> paused
    /// transition.
    pub fn pause(&mut self) -> bool {
        if !self.orbiting {
            return false;
        }
        self.orbiting = false;
        true
    }

    /// Rotate the light about the world Y axis by one frame's angle.
    /// Radius from the Y axis and height are preserved.
    pub fn advance(&mut self, delta_seconds: f32) {
        if !self.orbiting {
            return;
        }
        let rotation = Mat4::from_rotation_y(self.angular_velocity * delta_seconds);
        self.position = rotation.transform_point3(self.position);
    }
}

impl Default for LightOrbit {
    fn default() -> Self {
        Self::new(Vec3::new(4.0, 8.0, 12.0), 45.0_f32.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbits_by_default() {
        let light = LightOrbit::default();
        assert!(light.is_orbiting());
        assert_eq!(light.position, Vec3::new(4.0, 8.0, 12.0));
    }

    #[test]
    fn resume_and_pause_are_edge_triggered() {
        let mut light = LightOrbit::default();

        // Already orbiting - resuming again is a no-op.
        assert!(!light.resume());
        assert!(light.pause());
        assert!(!light.pause());
        assert!(light.resume());
    }

    #[test]
    fn paused_light_does_not_move() {
        let mut light = LightOrbit::default();
        light.pause();

        let before = light.position;
        light.advance(2.0);
        assert_eq!(light.position, before);
    }

    #[test]
    fn advance_preserves_height_and_radius() {
        let mut light = LightOrbit::default();
        let before = light.position;

        light.advance(1.0);

        assert!((light.position.y - before.y).abs() < 1e-5);
        let radius_before = (before.x * before.x + before.z * before.z).sqrt();
        let radius_after =
            (light.position.x * light.position.x + light.position.z * light.position.z).sqrt();
        assert!((radius_after - radius_before).abs() < 1e-4);
    }

    #[test]
    fn zero_delta_leaves_position_unchanged() {
        let mut light = LightOrbit::default();
        let before = light.position;
        light.advance(0.0);
        assert!(light.position.distance(before) < 1e-6);
    }
}
