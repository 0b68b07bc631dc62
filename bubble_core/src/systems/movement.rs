use crate::{Bubble, Drift};
use hecs::World;

/// Move each bubble one tick along its heading
pub fn integrate(world: &mut World) {
    for (_entity, (bubble, drift)) in world.query_mut::<(&mut Bubble, &Drift)>() {
        bubble.pos += drift.velocity();
    }
}
