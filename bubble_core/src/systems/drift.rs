use crate::{Config, Drift, Events, SimRng};
use hecs::World;
use rand::Rng;

/// Swing each bubble's speed between the low threshold and the speed cap.
///
/// A bubble that has slowed down to the threshold turns around on a fresh
/// random heading, which keeps the drift from looking periodic.
pub fn accelerate(world: &mut World, config: &Config, rng: &mut SimRng, events: &mut Events) {
    for (_entity, drift) in world.query_mut::<&mut Drift>() {
        if drift.accel > 0.0 && drift.speed >= config.speed_max {
            drift.accel = -drift.accel;
        } else if drift.accel < 0.0 && drift.speed <= config.low_speed_threshold {
            drift.accel = -drift.accel;
            drift.angle = rng.0.gen_range(0.0..360.0);
            events.reheadings += 1;
        }

        drift.speed = (drift.speed + drift.accel).max(0.0);
    }
}
