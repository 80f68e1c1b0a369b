use bevy::prelude::*;
use avian3d::prelude::*;
use crate::common::test_utils::run_system_once;

#[test]
fn spawns_ground_and_walls_on_enter() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_arena);

    let walls = world.query::<(&Name, &RigidBody)>().iter(&world)
        .filter(|(n, rb)| n.as_str().starts_with("Wall") && matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(walls, 4);

    let ground = world.query::<&Name>().iter(&world)
        .filter(|n| n.as_str() == "Ground")
        .count();
    assert_eq!(ground, 1);
}

#[test]
fn platforms_are_static_world_colliders() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_platforms);

    let platforms: Vec<_> = world.query::<(&Name, &CollisionLayers)>().iter(&world)
        .filter(|(n, _)| n.as_str().starts_with("Platform"))
        .collect();
    assert_eq!(platforms.len(), 4);

    for (_, layers) in platforms {
        assert!(layers.memberships.has_all(crate::common::layers::Layer::World));
    }
}
