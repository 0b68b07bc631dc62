use crate::systems::{ingest_items, insert_spec};
use crate::{
    step, BodyIndex, BodySpec, Bubble, Collider, Config, ConfigError, Events, GiftId, GiftTag,
    Highlight, IngestError, IngestReport, Ingestible, SimRng, Viewport,
};
use glam::Vec2;
use hecs::{Entity, World};

/// What the renderer needs to draw one bubble
#[derive(Debug, Clone, PartialEq)]
pub struct BodySnapshot {
    pub id: GiftId,
    pub pos: Vec2,
    pub radius: f32,
    pub size: f32,
    pub collidable: bool,
    pub is_new: bool,
    pub exchanged: bool,
}

/// Owns the bubble world and everything a tick needs.
///
/// Single-threaded: the host calls [`Self::tick`] once per animation frame
/// and [`Self::add_bodies`] whenever a fresh gift list arrives, both from
/// the same event loop.
pub struct BubbleSimulator {
    world: World,
    index: BodyIndex,
    viewport: Viewport,
    config: Config,
    rng: SimRng,
    events: Events,
    ticks: u64,
}

impl BubbleSimulator {
    pub fn new(viewport: Viewport, config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        // Re-check in case the fields were set directly
        let viewport = Viewport::new(viewport.width, viewport.height)?;

        Ok(Self {
            world: World::new(),
            index: BodyIndex::new(),
            viewport,
            config,
            rng: SimRng::new(seed),
            events: Events::new(),
            ticks: 0,
        })
    }

    /// Spawn bubbles for gifts not seen before; known gifts keep their motion
    pub fn add_bodies<I>(&mut self, items: I) -> IngestReport
    where
        I: IntoIterator,
        I::Item: Ingestible,
    {
        ingest_items(
            &mut self.world,
            &mut self.index,
            items,
            &self.viewport,
            &self.config,
            &mut self.rng,
        )
    }

    pub fn insert_body(&mut self, spec: BodySpec) -> Result<Entity, IngestError> {
        insert_spec(&mut self.world, &mut self.index, spec)
    }

    pub fn tick(&mut self) {
        step(
            &mut self.world,
            &self.index,
            &self.viewport,
            &self.config,
            &mut self.rng,
            &mut self.events,
        );
        self.ticks += 1;
    }

    /// Snapshot of every bubble, in spawn order
    pub fn bodies(&self) -> Vec<BodySnapshot> {
        self.index
            .order()
            .iter()
            .filter_map(|&entity| self.snapshot(entity))
            .collect()
    }

    pub fn body(&self, id: &str) -> Option<BodySnapshot> {
        self.index.get(id).and_then(|entity| self.snapshot(entity))
    }

    fn snapshot(&self, entity: Entity) -> Option<BodySnapshot> {
        let mut query = self
            .world
            .query_one::<(&GiftTag, &Bubble, &Collider, &Highlight)>(entity)
            .ok()?;
        let (tag, bubble, collider, highlight) = query.get()?;
        Some(BodySnapshot {
            id: tag.id.clone(),
            pos: bubble.pos,
            radius: bubble.radius,
            size: bubble.size(),
            collidable: collider.collidable,
            is_new: highlight.is_new,
            exchanged: tag.exchanged,
        })
    }

    /// End the "new gift" highlight for every bubble
    pub fn clear_new_flags(&mut self) {
        for (_entity, highlight) in self.world.query_mut::<&mut Highlight>() {
            highlight.is_new = false;
        }
    }

    /// Change the bounds, pulling bubbles that are now off screen back in
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        let viewport = Viewport::new(width, height)?;
        for (_entity, bubble) in self.world.query_mut::<&mut Bubble>() {
            bubble.pos = viewport.clamp_center(bubble.pos, bubble.radius);
        }
        self.viewport = viewport;
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Events of the last tick
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
