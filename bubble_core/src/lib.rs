//! Floating gift bubbles for the gift-exchange gallery
//!
//! Bodies live in a `hecs` world; one [`step`] advances every bubble by one
//! animation frame. [`BubbleSimulator`] bundles the world with its resources
//! for hosts that just want to feed gift lists in and read positions out.

pub mod components;
pub mod config;
pub mod params;
pub mod resources;
pub mod simulator;
pub mod systems;
pub mod viewport;

pub use components::*;
pub use config::*;
pub use params::*;
pub use resources::*;
pub use simulator::*;
pub use systems::{BodySpec, IngestError, IngestReport, Ingestible};
pub use viewport::*;

use hecs::World;
use systems::*;

/// Advance the simulation by one tick
pub fn step(
    world: &mut World,
    index: &BodyIndex,
    viewport: &Viewport,
    config: &Config,
    rng: &mut SimRng,
    events: &mut Events,
) {
    // Clear events at start of tick
    events.clear();

    // 1. Swing speed, re-head slow bubbles
    accelerate(world, config, rng, events);

    // 2-3. Bounce off the viewport edges
    reflect_walls(world, viewport, events);

    // 4. Move
    integrate(world);

    // 5. Arm bubbles that drifted clear of everything
    activate_colliders(world, index, events);

    // 6. Bubble vs bubble
    resolve_collisions(world, index, events);
}

/// Helper to create a bubble entity and register it in the index
pub fn create_body(
    world: &mut World,
    index: &mut BodyIndex,
    tag: GiftTag,
    bubble: Bubble,
    drift: Drift,
    collidable: bool,
    is_new: bool,
) -> hecs::Entity {
    let id = tag.id.clone();
    let entity = world.spawn((
        tag,
        bubble,
        drift,
        Collider { collidable },
        Highlight { is_new },
    ));
    index.insert(id, entity);
    entity
}
