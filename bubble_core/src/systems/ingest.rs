use crate::{
    create_body, BodyIndex, Bubble, Config, Drift, GiftId, GiftTag, SimRng, Viewport,
};
use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use thiserror::Error;

/// Anything the gift list provider hands over that names a gift
pub trait Ingestible {
    fn gift_id(&self) -> &str;

    fn is_exchanged(&self) -> bool {
        false
    }
}

impl Ingestible for str {
    fn gift_id(&self) -> &str {
        self
    }
}

impl Ingestible for String {
    fn gift_id(&self) -> &str {
        self
    }
}

impl<T: Ingestible + ?Sized> Ingestible for &T {
    fn gift_id(&self) -> &str {
        (**self).gift_id()
    }

    fn is_exchanged(&self) -> bool {
        (**self).is_exchanged()
    }
}

/// Why a body was not created
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    #[error("gift id is empty")]
    EmptyId,

    #[error("gift {0} already has a bubble")]
    Duplicate(GiftId),

    #[error("radius must be finite and positive, got {0}")]
    Radius(f32),

    #[error("speed must be finite and non-negative, got {0}")]
    Speed(f32),

    #[error("position and heading must be finite")]
    NonFinite,
}

/// Outcome of one ingest batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub spawned: Vec<GiftId>,
    pub updated: usize, // Known gifts whose exchanged flag changed
    pub rejected: Vec<IngestError>,
}

impl IngestReport {
    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty() && self.updated == 0 && self.rejected.is_empty()
    }
}

/// Explicitly placed body, for hosts restoring a layout and for scenarios
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub id: GiftId,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub angle: f32,
    pub accel: f32,
    pub collidable: bool,
    pub is_new: bool,
    pub exchanged: bool,
}

impl BodySpec {
    pub fn new(id: impl Into<GiftId>, pos: Vec2, radius: f32) -> Self {
        Self {
            id: id.into(),
            pos,
            radius,
            speed: 0.0,
            angle: 0.0,
            accel: 0.0,
            collidable: false,
            is_new: false,
            exchanged: false,
        }
    }

    pub fn with_drift(mut self, speed: f32, angle: f32, accel: f32) -> Self {
        self.speed = speed;
        self.angle = angle;
        self.accel = accel;
        self
    }

    pub fn collidable(mut self, collidable: bool) -> Self {
        self.collidable = collidable;
        self
    }
}

/// Spawn a bubble for every gift not seen before.
///
/// Known ids keep their kinematics; only their exchanged flag follows the
/// provider. The same id twice in one batch spawns once.
pub fn ingest_items<I>(
    world: &mut World,
    index: &mut BodyIndex,
    items: I,
    viewport: &Viewport,
    config: &Config,
    rng: &mut SimRng,
) -> IngestReport
where
    I: IntoIterator,
    I::Item: Ingestible,
{
    let mut report = IngestReport::default();

    for item in items {
        let id = item.gift_id();
        if id.is_empty() {
            report.rejected.push(IngestError::EmptyId);
            continue;
        }

        if let Some(entity) = index.get(id) {
            if let Ok(mut tag) = world.get::<&mut GiftTag>(entity) {
                if tag.exchanged != item.is_exchanged() {
                    tag.exchanged = item.is_exchanged();
                    report.updated += 1;
                }
            }
            continue;
        }

        let mut tag = GiftTag::new(id);
        tag.exchanged = item.is_exchanged();
        spawn_random(world, index, tag, viewport, config, rng);
        report.spawned.push(id.to_string());
    }

    report
}

/// Spawn a body with randomized size, placement and drift
pub fn spawn_random(
    world: &mut World,
    index: &mut BodyIndex,
    tag: GiftTag,
    viewport: &Viewport,
    config: &Config,
    rng: &mut SimRng,
) -> Entity {
    let radius = sample(rng, config.radius_min, config.radius_max);
    let (min, max) = viewport.center_range(radius);
    let pos = Vec2::new(sample(rng, min.x, max.x), sample(rng, min.y, max.y));

    let speed = sample(rng, config.speed_min, config.speed_max);
    let angle = rng.0.gen_range(0.0..360.0);
    let accel = if rng.0.gen_bool(0.5) {
        config.acceleration
    } else {
        -config.acceleration
    };

    create_body(
        world,
        index,
        tag,
        Bubble::new(pos, radius),
        Drift::new(speed, angle, accel),
        false,
        true,
    )
}

/// Place a body exactly as described
pub fn insert_spec(
    world: &mut World,
    index: &mut BodyIndex,
    spec: BodySpec,
) -> Result<Entity, IngestError> {
    if spec.id.is_empty() {
        return Err(IngestError::EmptyId);
    }
    if index.contains(&spec.id) {
        return Err(IngestError::Duplicate(spec.id));
    }
    if !spec.radius.is_finite() || spec.radius <= 0.0 {
        return Err(IngestError::Radius(spec.radius));
    }
    if !spec.speed.is_finite() || spec.speed < 0.0 {
        return Err(IngestError::Speed(spec.speed));
    }
    if !(spec.pos.is_finite() && spec.angle.is_finite() && spec.accel.is_finite()) {
        return Err(IngestError::NonFinite);
    }

    let tag = GiftTag {
        id: spec.id,
        exchanged: spec.exchanged,
    };
    Ok(create_body(
        world,
        index,
        tag,
        Bubble::new(spec.pos, spec.radius),
        Drift::new(spec.speed, spec.angle, spec.accel),
        spec.collidable,
        spec.is_new,
    ))
}

fn sample(rng: &mut SimRng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.0.gen_range(lo..=hi)
    } else {
        lo
    }
}
