//! Integration tests for keyframe reconciliation through the ECS schedule.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test reconcile_integration
//! ```

use bevy_ecs::prelude::*;

use spritereel::components::attribute::{Attribute, Axis};
use spritereel::components::mapposition::MapPosition;
use spritereel::components::part::{NodeKind, Part};
use spritereel::components::track::KeyframeTrack;
use spritereel::document::spawn_part;
use spritereel::resources::cellmapstore::{Cell, CellMap, CellMapStore};
use spritereel::resources::timeline::Timeline;
use spritereel::systems::reconcile::reconcile_parts;

const EPSILON: f32 = 1e-6;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(total_frames: usize) -> World {
    let mut world = World::new();
    world.insert_resource(Timeline::new(total_frames, 30.0));
    world.insert_resource(CellMapStore::default());
    world
}

fn tick_reconcile(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(reconcile_parts);
    schedule.run(world);
}

fn set_frame(world: &mut World, frame: usize, reverse: bool) {
    let mut timeline = world.resource_mut::<Timeline>();
    timeline.current_frame = frame;
    timeline.reverse = reverse;
}

fn add_key(world: &mut World, entity: Entity, frame: usize, attribute: Attribute) {
    world
        .get_mut::<KeyframeTrack>(entity)
        .unwrap()
        .add_key(frame, attribute);
}

fn pos_x(value: f32) -> Attribute {
    Attribute::Position {
        axis: Axis::X,
        value,
    }
}

#[test]
fn first_reconcile_to_frame_zero_replays_only_frame_zero() {
    let mut world = make_world(10);
    let entity = spawn_part(&mut world, "body", NodeKind::Visual, None, 10);
    add_key(&mut world, entity, 0, pos_x(5.0));
    add_key(&mut world, entity, 1, pos_x(50.0));

    tick_reconcile(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 5.0), "frame 1 must not fire yet");
    let part = world.get::<Part>(entity).unwrap();
    assert_eq!(part.last_applied, Some(0));
    assert!(part.changed);
}

#[test]
fn reconciling_same_frame_again_clears_changed_and_applies_nothing() {
    let mut world = make_world(10);
    let entity = spawn_part(&mut world, "body", NodeKind::Visual, None, 10);
    add_key(&mut world, entity, 0, pos_x(5.0));

    tick_reconcile(&mut world);
    assert!(world.get::<Part>(entity).unwrap().changed);

    // Scribble on the channel; a second reconcile of the same frame must not
    // re-apply the key over it.
    world.get_mut::<MapPosition>(entity).unwrap().pos.x = 123.0;
    tick_reconcile(&mut world);

    let part = world.get::<Part>(entity).unwrap();
    assert!(!part.changed);
    assert!(approx_eq(
        world.get::<MapPosition>(entity).unwrap().pos.x,
        123.0
    ));
}

#[test]
fn direct_scrub_equals_split_scrub() {
    // f0 < f1 < f2: reconciling 0→8 applies exactly what 0→3 then 3→8 does.
    let build = |world: &mut World| {
        let entity = spawn_part(world, "body", NodeKind::Visual, None, 10);
        for f in 0..10 {
            add_key(world, entity, f, pos_x(f as f32 * 10.0));
            add_key(
                world,
                entity,
                f,
                Attribute::Opacity {
                    value: f as f32 / 10.0,
                },
            );
        }
        entity
    };

    let mut direct = make_world(10);
    let direct_entity = build(&mut direct);
    set_frame(&mut direct, 8, false);
    tick_reconcile(&mut direct);

    let mut split = make_world(10);
    let split_entity = build(&mut split);
    set_frame(&mut split, 3, false);
    tick_reconcile(&mut split);
    set_frame(&mut split, 8, false);
    tick_reconcile(&mut split);

    let a = direct.get::<MapPosition>(direct_entity).unwrap().pos;
    let b = split.get::<MapPosition>(split_entity).unwrap().pos;
    assert!(approx_eq(a.x, b.x));
    let pa = direct.get::<Part>(direct_entity).unwrap();
    let pb = split.get::<Part>(split_entity).unwrap();
    assert!(approx_eq(pa.local_alpha, pb.local_alpha));
    assert_eq!(pa.last_applied, pb.last_applied);
}

#[test]
fn intermediate_keys_fire_when_scrubbing_past_them() {
    let mut world = make_world(10);
    let entity = spawn_part(&mut world, "body", NodeKind::Visual, None, 10);
    add_key(
        &mut world,
        entity,
        3,
        Attribute::Visibility { visible: true },
    );
    add_key(&mut world, entity, 5, pos_x(55.0));

    // Jump straight to frame 7; both the visibility toggle at 3 and the
    // position at 5 must have landed.
    set_frame(&mut world, 7, false);
    tick_reconcile(&mut world);

    let part = world.get::<Part>(entity).unwrap();
    assert!(part.local_visible);
    assert!(part.changed);
    assert!(approx_eq(
        world.get::<MapPosition>(entity).unwrap().pos.x,
        55.0
    ));
}

#[test]
fn reverse_from_last_frame_to_zero_skips_the_last_keyframe() {
    let mut world = make_world(5);
    let entity = spawn_part(&mut world, "body", NodeKind::Visual, None, 5);
    for f in 0..5 {
        add_key(&mut world, entity, f, pos_x(f as f32));
    }

    // Forward to the last frame first.
    set_frame(&mut world, 4, false);
    tick_reconcile(&mut world);
    assert!(approx_eq(
        world.get::<MapPosition>(entity).unwrap().pos.x,
        4.0
    ));

    // Reverse down to 0: frames 3, 2, 1, 0 replay in descending order, so
    // frame 0's key wins; frame 4's key must not re-fire.
    set_frame(&mut world, 0, true);
    tick_reconcile(&mut world);
    assert!(approx_eq(
        world.get::<MapPosition>(entity).unwrap().pos.x,
        0.0
    ));
    assert_eq!(world.get::<Part>(entity).unwrap().last_applied, Some(0));
}

#[test]
fn forward_wrap_replays_from_the_start() {
    let mut world = make_world(6);
    let entity = spawn_part(&mut world, "body", NodeKind::Visual, None, 6);
    add_key(&mut world, entity, 0, pos_x(0.0));
    add_key(&mut world, entity, 5, pos_x(5.0));

    set_frame(&mut world, 5, false);
    tick_reconcile(&mut world);
    assert!(approx_eq(
        world.get::<MapPosition>(entity).unwrap().pos.x,
        5.0
    ));

    // Looping timeline wrapped to frame 1: the cursor resets and frames
    // 0..=1 replay.
    set_frame(&mut world, 1, false);
    tick_reconcile(&mut world);
    assert!(approx_eq(
        world.get::<MapPosition>(entity).unwrap().pos.x,
        0.0
    ));
}

#[test]
fn keyless_track_never_moves_its_cursor() {
    let mut world = make_world(10);
    let entity = spawn_part(&mut world, "static", NodeKind::Visual, None, 10);

    set_frame(&mut world, 7, false);
    tick_reconcile(&mut world);

    let part = world.get::<Part>(entity).unwrap();
    assert_eq!(part.last_applied, None);
    assert!(!part.changed);
}

#[test]
fn failing_part_halts_but_siblings_keep_animating() {
    let mut world = make_world(10);
    world.insert_resource(CellMapStore::new(vec![CellMap {
        name: "m".into(),
        texture_key: "m.png".into(),
        cells: vec![Cell {
            name: "only".into(),
            uv_min: glam::Vec2::ZERO,
            uv_max: glam::Vec2::ONE,
            size: glam::Vec2::ONE,
            pivot: glam::Vec2::splat(0.5),
        }],
    }]));

    let broken = spawn_part(&mut world, "broken", NodeKind::Visual, None, 10);
    add_key(&mut world, broken, 1, Attribute::Cell { map: 0, cell: 99 });
    add_key(&mut world, broken, 2, pos_x(2.0));

    let healthy = spawn_part(&mut world, "healthy", NodeKind::Visual, None, 10);
    for f in 0..10 {
        add_key(&mut world, healthy, f, pos_x(f as f32));
    }

    set_frame(&mut world, 3, false);
    tick_reconcile(&mut world);

    // The broken part froze: halted, cursor advanced, frame 2's key skipped.
    let part = world.get::<Part>(broken).unwrap();
    assert!(part.halted);
    assert_eq!(part.last_applied, Some(3));
    assert!(approx_eq(
        world.get::<MapPosition>(broken).unwrap().pos.x,
        0.0
    ));

    // The sibling reconciled the same tick and keeps animating afterwards.
    assert!(approx_eq(
        world.get::<MapPosition>(healthy).unwrap().pos.x,
        3.0
    ));
    set_frame(&mut world, 5, false);
    tick_reconcile(&mut world);
    assert!(approx_eq(
        world.get::<MapPosition>(healthy).unwrap().pos.x,
        5.0
    ));
    // Halted parts are skipped entirely.
    assert_eq!(world.get::<Part>(broken).unwrap().last_applied, Some(3));
}
