use crate::GiftId;
use hecs::Entity;
use std::collections::HashMap;

/// Random number generator
pub struct SimRng(pub rand::rngs::StdRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Lookup from gift id to entity, plus the stable spawn order that
/// collision sweeps iterate in
#[derive(Debug, Clone, Default)]
pub struct BodyIndex {
    by_id: HashMap<GiftId, Entity>,
    order: Vec<Entity>,
}

impl BodyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<Entity> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn insert(&mut self, id: GiftId, entity: Entity) {
        self.by_id.insert(id, entity);
        self.order.push(entity);
    }

    /// Entities in spawn order
    pub fn order(&self) -> &[Entity] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Events that occurred during the last tick
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub wall_bounces: u32,
    pub reheadings: u32,  // Slow bubbles that picked a fresh random heading
    pub activations: u32, // Bubbles that became collidable
    pub collisions: Vec<(usize, usize)>, // Resolved pairs, as spawn-order indices
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.wall_bounces = 0;
        self.reheadings = 0;
        self.activations = 0;
        self.collisions.clear();
    }
}
