use crate::{BodyIndex, Bubble, Collider, Drift, Events};
use glam::Vec2;
use hecs::{Entity, World};

/// Per-tick copy of the collision-relevant state of one body
#[derive(Debug, Clone, Copy)]
struct Contact {
    entity: Entity,
    bubble: Bubble,
    drift: Drift,
    collidable: bool,
    hit: bool,
}

/// Collect bodies in spawn order without holding borrows on the world
fn gather(world: &World, index: &BodyIndex) -> Vec<Contact> {
    index
        .order()
        .iter()
        .filter_map(|&entity| {
            let bubble = *world.get::<&Bubble>(entity).ok()?;
            let drift = *world.get::<&Drift>(entity).ok()?;
            let collider = *world.get::<&Collider>(entity).ok()?;
            Some(Contact {
                entity,
                bubble,
                drift,
                collidable: collider.collidable,
                hit: false,
            })
        })
        .collect()
}

/// Arm bubbles that no longer overlap anything.
///
/// Fresh bubbles spawn at random spots and may sit on top of others; they
/// stay out of collision response until they have drifted clear.
pub fn activate_colliders(world: &mut World, index: &BodyIndex, events: &mut Events) {
    let bodies = gather(world, index);

    for (i, body) in bodies.iter().enumerate() {
        if body.collidable {
            continue;
        }

        let clear = bodies
            .iter()
            .enumerate()
            .all(|(j, other)| i == j || !body.bubble.overlaps(&other.bubble));

        if clear {
            if let Ok(mut collider) = world.get::<&mut Collider>(body.entity) {
                collider.collidable = true;
                events.activations += 1;
            }
        }
    }
}

/// Resolve overlapping collidable pairs in spawn order.
///
/// Both participants are disarmed after a hit, so a body takes part in at
/// most one resolution per sweep and the first pair found wins. Contacts
/// involving three or more bubbles settle over the following ticks.
pub fn resolve_collisions(world: &mut World, index: &BodyIndex, events: &mut Events) {
    let mut bodies = gather(world, index);

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if !bodies[i].collidable {
                break;
            }
            if !bodies[j].collidable || !bodies[i].bubble.overlaps(&bodies[j].bubble) {
                continue;
            }

            let (vel_a, vel_b) = elastic_exchange(
                bodies[i].bubble.pos,
                bodies[i].drift.velocity(),
                bodies[j].bubble.pos,
                bodies[j].drift.velocity(),
            );

            for (k, vel) in [(i, vel_a), (j, vel_b)] {
                bodies[k].drift.set_velocity(vel);
                bodies[k].collidable = false;
                bodies[k].hit = true;
            }
            events.collisions.push((i, j));
        }
    }

    for body in bodies.iter().filter(|b| b.hit) {
        if let Ok((drift, collider)) =
            world.query_one_mut::<(&mut Drift, &mut Collider)>(body.entity)
        {
            *drift = body.drift;
            collider.collidable = false;
        }
    }
}

/// Equal-mass elastic collision between two circles.
///
/// Velocities are split along the line between the centres: the normal
/// components swap, the tangential components stay. Coincident centres use
/// a normal along +x.
pub fn elastic_exchange(pos_a: Vec2, vel_a: Vec2, pos_b: Vec2, vel_b: Vec2) -> (Vec2, Vec2) {
    let delta = pos_b - pos_a;
    let hit_angle = if delta.length_squared() > 0.0 {
        delta.y.atan2(delta.x)
    } else {
        0.0
    };

    let normal = Vec2::from_angle(hit_angle);
    let tangent = normal.perp();

    let (a_n, a_t) = (vel_a.dot(normal), vel_a.dot(tangent));
    let (b_n, b_t) = (vel_b.dot(normal), vel_b.dot(tangent));

    (normal * b_n + tangent * a_t, normal * a_n + tangent * b_t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_body, GiftTag};

    fn angle_diff(a: f32, b: f32) -> f32 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    fn spawn(
        world: &mut World,
        index: &mut BodyIndex,
        pos: Vec2,
        drift: Drift,
        collidable: bool,
    ) -> Entity {
        let tag = GiftTag::new(format!("g{}", index.len()));
        create_body(
            world,
            index,
            tag,
            Bubble::new(pos, 100.0),
            drift,
            collidable,
            false,
        )
    }

    #[test]
    fn test_head_on_collision_swaps_headings() {
        let mut world = World::new();
        let mut index = BodyIndex::new();
        let mut events = Events::new();
        let a = spawn(
            &mut world,
            &mut index,
            Vec2::new(300.0, 300.0),
            Drift::new(0.5, 0.0, 0.0),
            true,
        );
        let b = spawn(
            &mut world,
            &mut index,
            Vec2::new(450.0, 300.0),
            Drift::new(0.5, 180.0, 0.0),
            true,
        );

        resolve_collisions(&mut world, &index, &mut events);

        let da = *world.get::<&Drift>(a).unwrap();
        let db = *world.get::<&Drift>(b).unwrap();
        assert!(angle_diff(da.angle, 180.0) < 1e-3, "got {}", da.angle);
        assert!(angle_diff(db.angle, 0.0) < 1e-3, "got {}", db.angle);
        let energy = da.speed * da.speed + db.speed * db.speed;
        assert!((energy - 0.5).abs() < 1e-5);
        assert_eq!(events.collisions, vec![(0, 1)]);
        assert!(!world.get::<&Collider>(a).unwrap().collidable);
        assert!(!world.get::<&Collider>(b).unwrap().collidable);
    }

    #[test]
    fn test_glancing_collision_conserves_energy() {
        let pos_a = Vec2::new(0.0, 0.0);
        let pos_b = Vec2::new(120.0, 90.0);
        let vel_a = Vec2::new(0.6, 0.1);
        let vel_b = Vec2::new(-0.2, 0.35);

        let (out_a, out_b) = elastic_exchange(pos_a, vel_a, pos_b, vel_b);

        let before = vel_a.length_squared() + vel_b.length_squared();
        let after = out_a.length_squared() + out_b.length_squared();
        assert!((before - after).abs() < 1e-5);
        // Momentum is conserved too for equal masses
        assert!(((vel_a + vel_b) - (out_a + out_b)).length() < 1e-5);
    }

    #[test]
    fn test_coincident_centres_stay_finite() {
        let pos = Vec2::new(200.0, 200.0);
        let (out_a, out_b) =
            elastic_exchange(pos, Vec2::new(0.5, 0.2), pos, Vec2::new(-0.3, 0.1));
        assert!(out_a.is_finite() && out_b.is_finite());
        // Normal along +x: x components swap, y components stay
        assert!((out_a - Vec2::new(-0.3, 0.2)).length() < 1e-6);
        assert!((out_b - Vec2::new(0.5, 0.1)).length() < 1e-6);
    }

    #[test]
    fn test_first_pair_wins_per_sweep() {
        let mut world = World::new();
        let mut index = BodyIndex::new();
        let mut events = Events::new();
        // Middle bubble overlaps both neighbours
        spawn(
            &mut world,
            &mut index,
            Vec2::new(200.0, 300.0),
            Drift::new(0.5, 0.0, 0.0),
            true,
        );
        spawn(
            &mut world,
            &mut index,
            Vec2::new(350.0, 300.0),
            Drift::new(0.5, 180.0, 0.0),
            true,
        );
        let c = spawn(
            &mut world,
            &mut index,
            Vec2::new(500.0, 300.0),
            Drift::new(0.5, 180.0, 0.0),
            true,
        );

        resolve_collisions(&mut world, &index, &mut events);

        assert_eq!(events.collisions, vec![(0, 1)]);
        assert!(world.get::<&Collider>(c).unwrap().collidable);
        assert_eq!(world.get::<&Drift>(c).unwrap().angle, 180.0);
    }

    #[test]
    fn test_non_collidable_pairs_are_skipped() {
        let mut world = World::new();
        let mut index = BodyIndex::new();
        let mut events = Events::new();
        let a = spawn(
            &mut world,
            &mut index,
            Vec2::new(300.0, 300.0),
            Drift::new(0.5, 0.0, 0.0),
            false,
        );
        spawn(
            &mut world,
            &mut index,
            Vec2::new(400.0, 300.0),
            Drift::new(0.5, 180.0, 0.0),
            true,
        );

        resolve_collisions(&mut world, &index, &mut events);

        assert!(events.collisions.is_empty());
        assert_eq!(world.get::<&Drift>(a).unwrap().angle, 0.0);
    }

    #[test]
    fn test_activation_waits_for_clearance() {
        let mut world = World::new();
        let mut index = BodyIndex::new();
        let mut events = Events::new();
        let a = spawn(
            &mut world,
            &mut index,
            Vec2::new(300.0, 300.0),
            Drift::new(0.5, 0.0, 0.0),
            false,
        );
        let b = spawn(
            &mut world,
            &mut index,
            Vec2::new(450.0, 300.0),
            Drift::new(0.5, 0.0, 0.0),
            false,
        );
        let lone = spawn(
            &mut world,
            &mut index,
            Vec2::new(1000.0, 300.0),
            Drift::new(0.5, 0.0, 0.0),
            false,
        );

        activate_colliders(&mut world, &index, &mut events);

        assert!(!world.get::<&Collider>(a).unwrap().collidable);
        assert!(!world.get::<&Collider>(b).unwrap().collidable);
        assert!(world.get::<&Collider>(lone).unwrap().collidable);
        assert_eq!(events.activations, 1);

        // Separate the pair and check again
        world.get::<&mut Bubble>(b).unwrap().pos.x = 520.0;
        activate_colliders(&mut world, &index, &mut events);
        assert!(world.get::<&Collider>(a).unwrap().collidable);
        assert!(world.get::<&Collider>(b).unwrap().collidable);
        assert_eq!(events.activations, 3);
    }
}
