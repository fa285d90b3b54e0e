//! Bodies of the scene and their per-frame rotation angles.

/// Seconds in one day.
const DAY: f64 = 24.0 * 3600.0;

/// Simulated seconds per wall-clock second, shared by every body.
pub const SPEED_MULTIPLIER: f64 = 10_000.0;

/// One of the three spheres in the scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Body {
    Sun,
    Earth,
    Moon,
}

impl Body {
    /// Draw order.
    pub const ALL: [Body; 3] = [Body::Sun, Body::Earth, Body::Moon];

    /// Position in [`Body::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rotation period in seconds: a year for the sun, a day for the earth,
    /// a sidereal month for the moon.
    pub const fn period_seconds(self) -> f64 {
        match self {
            Body::Sun => 365.25 * DAY,
            Body::Earth => DAY,
            Body::Moon => 27.3 * DAY,
        }
    }

    pub const fn radius(self) -> f32 {
        match self {
            Body::Sun => 1.0,
            Body::Earth => 0.3,
            Body::Moon => 0.1,
        }
    }

    /// Texture file, relative to the working directory.
    pub const fn texture_path(self) -> &'static str {
        match self {
            Body::Sun => "sun.jpg",
            Body::Earth => "earth.jpg",
            Body::Moon => "moon.jpg",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Earth => "earth",
            Body::Moon => "moon",
        }
    }

    /// Rotation angle in degrees after `elapsed_seconds`, unbounded.
    pub fn angle_at(self, elapsed_seconds: f64) -> f64 {
        elapsed_seconds * SPEED_MULTIPLIER / self.period_seconds() * 360.0
    }
}

/// Rotation angles for one frame, in degrees.
///
/// Fully determined by elapsed time: nothing carries over between frames.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SceneState {
    pub sun: f64,
    pub earth: f64,
    pub moon: f64,
}

impl SceneState {
    /// Angles after `elapsed_seconds` of wall-clock time.
    ///
    /// Negative or non-finite inputs are treated as zero.
    pub fn at(elapsed_seconds: f64) -> Self {
        let t = if elapsed_seconds.is_finite() {
            elapsed_seconds.max(0.0)
        } else {
            0.0
        };
        Self {
            sun: Body::Sun.angle_at(t),
            earth: Body::Earth.angle_at(t),
            moon: Body::Moon.angle_at(t),
        }
    }
}
