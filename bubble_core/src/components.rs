use glam::Vec2;

/// Stable identifier of a gift, shared with the gift list provider
pub type GiftId = String;

/// Gift tag component - ties a bubble to the gift it shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftTag {
    pub id: GiftId,
    pub exchanged: bool, // Presentation only, refreshed on every ingest
}

impl GiftTag {
    pub fn new(id: impl Into<GiftId>) -> Self {
        Self {
            id: id.into(),
            exchanged: false,
        }
    }
}

/// Bubble component - the circle on screen
#[derive(Debug, Clone, Copy)]
pub struct Bubble {
    pub pos: Vec2,   // Centre, viewport pixels
    pub radius: f32, // Fixed for the bubble's lifetime
}

impl Bubble {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }

    /// Diameter, as the renderer sizes the image
    pub fn size(&self) -> f32 {
        self.radius * 2.0
    }

    /// Circles touching or overlapping
    pub fn overlaps(&self, other: &Bubble) -> bool {
        let reach = self.radius + other.radius;
        self.pos.distance_squared(other.pos) <= reach * reach
    }
}

/// Drift component - polar velocity with a slow speed swing
#[derive(Debug, Clone, Copy)]
pub struct Drift {
    pub speed: f32, // Pixels per tick, never negative
    pub angle: f32, // Heading in degrees, [0, 360)
    pub accel: f32, // Signed change of speed per tick
}

impl Drift {
    pub fn new(speed: f32, angle: f32, accel: f32) -> Self {
        Self {
            speed,
            angle: normalize_degrees(angle),
            accel,
        }
    }

    /// Displacement for one tick
    pub fn velocity(&self) -> Vec2 {
        let rad = self.angle.to_radians();
        Vec2::new(rad.cos(), rad.sin()) * self.speed
    }

    /// Replace speed and heading from a cartesian velocity, keeping acceleration
    pub fn set_velocity(&mut self, vel: Vec2) {
        self.speed = vel.length();
        self.angle = if self.speed > 0.0 {
            normalize_degrees(vel.y.atan2(vel.x).to_degrees())
        } else {
            0.0
        };
    }
}

/// Collider component - collision eligibility gate
#[derive(Debug, Clone, Copy, Default)]
pub struct Collider {
    pub collidable: bool,
}

/// Highlight component - set while the renderer shows the "new gift" effect
#[derive(Debug, Clone, Copy, Default)]
pub struct Highlight {
    pub is_new: bool,
}

/// Wrap an angle in degrees into [0, 360)
pub fn normalize_degrees(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0 in f32
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
        assert_eq!(normalize_degrees(-1e-9), 0.0);
        assert_eq!(normalize_degrees(f32::NAN), 0.0);
    }

    #[test]
    fn test_bubble_overlap_is_inclusive() {
        let a = Bubble::new(Vec2::new(0.0, 0.0), 100.0);
        let touching = Bubble::new(Vec2::new(200.0, 0.0), 100.0);
        let apart = Bubble::new(Vec2::new(200.5, 0.0), 100.0);
        assert!(a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
        assert_eq!(a.size(), 200.0);
    }

    #[test]
    fn test_drift_velocity_roundtrips_heading() {
        let mut drift = Drift::new(0.5, 135.0, 0.005);
        let vel = drift.velocity();
        assert!(vel.x < 0.0 && vel.y > 0.0);

        drift.set_velocity(Vec2::new(0.0, -2.0));
        assert!((drift.speed - 2.0).abs() < 1e-6);
        assert!((drift.angle - 270.0).abs() < 1e-4);
        assert_eq!(drift.accel, 0.005, "Acceleration survives a velocity change");
    }

    #[test]
    fn test_zero_velocity_has_zero_heading() {
        let mut drift = Drift::new(0.5, 42.0, -0.005);
        drift.set_velocity(Vec2::ZERO);
        assert_eq!(drift.speed, 0.0);
        assert_eq!(drift.angle, 0.0);
    }
}
