//! World transforms for the three bodies.
//!
//! Each transform is the parent's transform times the body's local
//! rotation/translation, composed as plain matrices.

use glam::{Mat4, Vec3};

use crate::scene::{Body, SceneState};

/// Distance from the sun to the earth's center.
pub const EARTH_ORBIT_RADIUS: f32 = 3.0;

/// Offset of the moon inside the earth's (spinning) frame.
pub const MOON_ORBIT_RADIUS: f32 = 0.5;

/// A body's placement for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BodyPose {
    pub body: Body,
    /// Object → world, without the body's radius.
    pub world: Mat4,
}

/// Rotation about +Y by `degrees`.
///
/// The angle is reduced modulo 360 in `f64` before narrowing, so unbounded
/// angles keep their precision.
pub fn rotation_y(degrees: f64) -> Mat4 {
    Mat4::from_rotation_y(degrees.rem_euclid(360.0).to_radians() as f32)
}

/// Poses in draw order: sun, earth, moon.
///
/// - sun: identity; its angle only drives the earth's revolution
/// - earth: `Ry(sun) * T(3, 0, 0) * Ry(earth)`
/// - moon: `earth * T(0.5, 0, 0) * Ry(moon)`
///
/// The moon is offset inside the earth's spinning frame, so it circles the
/// earth once per earth day and only spins in place at its own rate.
pub fn compose(state: &SceneState) -> [BodyPose; 3] {
    let sun = Mat4::IDENTITY;

    let earth = rotation_y(state.sun)
        * Mat4::from_translation(Vec3::X * EARTH_ORBIT_RADIUS)
        * rotation_y(state.earth);

    let moon = earth * Mat4::from_translation(Vec3::X * MOON_ORBIT_RADIUS) * rotation_y(state.moon);

    [
        BodyPose {
            body: Body::Sun,
            world: sun,
        },
        BodyPose {
            body: Body::Earth,
            world: earth,
        },
        BodyPose {
            body: Body::Moon,
            world: moon,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    impl BodyPose {
        fn center(&self) -> Vec3 {
            self.world.transform_point3(Vec3::ZERO)
        }
    }

    fn near(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    fn state(sun: f64, earth: f64, moon: f64) -> SceneState {
        SceneState { sun, earth, moon }
    }

    #[test]
    fn draw_order_is_sun_earth_moon() {
        let poses = compose(&SceneState::default());
        let order: Vec<Body> = poses.iter().map(|p| p.body).collect();
        assert_eq!(order, Body::ALL.to_vec());
    }

    #[test]
    fn sun_stays_at_origin_unrotated() {
        let poses = compose(&SceneState::at(1234.5));
        assert_eq!(poses[0].world, Mat4::IDENTITY);
    }

    #[test]
    fn positions_at_start() {
        let [_, earth, moon] = compose(&SceneState::at(0.0));
        assert!(near(earth.center(), Vec3::new(3.0, 0.0, 0.0)));
        assert!(near(moon.center(), Vec3::new(3.5, 0.0, 0.0)));
    }

    #[test]
    fn sun_angle_revolves_the_earth() {
        let [_, earth, _] = compose(&state(90.0, 0.0, 0.0));
        // +90 degrees about +Y takes +X to -Z.
        assert!(near(earth.center(), Vec3::new(0.0, 0.0, -3.0)));
        assert!((earth.center().length() - EARTH_ORBIT_RADIUS).abs() < 1e-5);
    }

    #[test]
    fn earth_spin_does_not_move_the_earth() {
        let [_, a, _] = compose(&state(30.0, 0.0, 0.0));
        let [_, b, _] = compose(&state(30.0, 123.0, 0.0));
        assert!(near(a.center(), b.center()));
    }

    #[test]
    fn moon_follows_earth_spin_not_its_own_angle() {
        // The moon is offset inside the spinning earth frame: its position
        // tracks the earth's spin, and its own angle only turns it in place.
        let [_, earth, moon] = compose(&state(0.0, 90.0, 0.0));
        assert!(near(moon.center(), earth.center() + Vec3::new(0.0, 0.0, -0.5)));

        let [_, _, spun] = compose(&state(0.0, 90.0, 200.0));
        assert!(near(spun.center(), moon.center()));
    }

    #[test]
    fn moon_stays_at_fixed_distance_from_earth() {
        for t in [0.0, 10.0, 500.0, 86_400.0] {
            let [_, earth, moon] = compose(&SceneState::at(t));
            let d = (moon.center() - earth.center()).length();
            assert!((d - MOON_ORBIT_RADIUS).abs() < 1e-4, "t = {t}: {d}");
        }
    }

    #[test]
    fn unbounded_angles_match_their_reduced_form() {
        let big = rotation_y(3_600_000.0 + 45.0);
        let small = rotation_y(45.0);
        assert!(big.abs_diff_eq(small, 1e-6));
    }
}
