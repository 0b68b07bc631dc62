use crate::{normalize_degrees, Bubble, Drift, Events, Viewport};
use hecs::World;

/// Reflect headings of bubbles whose next step would carry their edge off
/// screen. Horizontal and vertical reflections are independent, so a bubble
/// heading into a corner bounces off both walls in one tick.
pub fn reflect_walls(world: &mut World, viewport: &Viewport, events: &mut Events) {
    for (_entity, (bubble, drift)) in world.query_mut::<(&Bubble, &mut Drift)>() {
        let step = drift.velocity();
        let next = bubble.pos + step;
        let mut bounced = false;

        if (step.x < 0.0 && next.x - bubble.radius < 0.0)
            || (step.x > 0.0 && next.x + bubble.radius > viewport.width)
        {
            drift.angle = 180.0 - drift.angle;
            bounced = true;
        }

        if (step.y < 0.0 && next.y - bubble.radius < 0.0)
            || (step.y > 0.0 && next.y + bubble.radius > viewport.height)
        {
            drift.angle = 360.0 - drift.angle;
            bounced = true;
        }

        drift.angle = normalize_degrees(drift.angle);
        if bounced {
            events.wall_bounces += 1;
        }
    }
}
