use glam::Vec2;

use super::{Obstacle, Sdf};

#[derive(Debug, Clone, Copy)]
pub struct Circle {
    pub position: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
}

impl Circle {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Circle {
            position: pos,
            radius,
            velocity: Vec2::ZERO,
        }
    }

    /// Teleports the circle, leaving the surrounding fluid undisturbed.
    pub fn set_position(&mut self, pos: Vec2) {
        self.position = pos;
        self.velocity = Vec2::ZERO;
    }

    /// Moves the circle to `pos`, imparting the velocity of the motion on
    /// the fluid. Should be called every time step.
    pub fn move_to(&mut self, pos: Vec2, dt: f32) {
        self.velocity = (pos - self.position) / dt;
        self.position = pos;
    }
}

impl Obstacle for Circle {
    fn sdf(&self, p: Vec2) -> Sdf {
        let d = (p - self.position).length();

        Sdf {
            distance: d - self.radius,
            gradient: (p - self.position) / d,
        }
    }

    fn velocity(&self, _p: Vec2) -> Vec2 {
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdf_is_negative_inside_and_points_outward() {
        let circle = Circle::new(Vec2::new(1.0, 1.0), 0.5);

        let inside = circle.sdf(Vec2::new(1.2, 1.0));
        assert!((inside.distance + 0.3).abs() < 1e-6);
        assert!((inside.gradient - Vec2::X).length() < 1e-6);

        let outside = circle.sdf(Vec2::new(1.0, 2.0));
        assert!((outside.distance - 0.5).abs() < 1e-6);
        assert!((outside.gradient - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn moving_imparts_velocity_and_teleporting_clears_it() {
        let mut circle = Circle::new(Vec2::ZERO, 0.25);

        circle.move_to(Vec2::new(0.1, -0.2), 0.1);
        assert!((circle.velocity - Vec2::new(1.0, -2.0)).length() < 1e-6);

        circle.set_position(Vec2::ONE);
        assert_eq!(circle.velocity, Vec2::ZERO);
        assert_eq!(circle.position, Vec2::ONE);
    }
}
