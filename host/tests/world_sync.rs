use std::time::Duration;

use lightrig_host::interface::prelude::*;
use lightrig_host::World;

fn test_config() -> RigConfig {
    RigConfig {
        fixture_count: 6,
        step_delay: Duration::from_millis(50),
        ..Default::default()
    }
}

fn solid(cfg: &RigConfig, palette_index: usize) -> Emissive {
    Emissive::lit(cfg.palette[palette_index].scale(cfg.intensity))
}

#[test]
fn world_starts_dark_and_unowned() {
    let world = World::new_seeded(test_config(), 3, 1).unwrap();
    assert_eq!(world.owner(), None);
    for p in 0..3 {
        assert_eq!(world.mode(p), Mode::Off);
        assert!(world.fixtures(p).lit_indices().is_empty());
    }
}

#[test]
fn invalid_config_refused_at_construction() {
    let cfg = RigConfig {
        step_delay: Duration::ZERO,
        ..test_config()
    };
    assert!(World::new_seeded(cfg, 1, 1).is_err());
}

#[test]
fn interaction_converges_all_replicas() {
    let cfg = test_config();
    let mut world = World::new_seeded(cfg.clone(), 3, 1).unwrap();

    world.use_prop(1).unwrap();

    // The actor applies locally before any delivery
    assert_eq!(world.mode(1), Mode::SolidA);

    world.tick(Duration::from_millis(10));
    for p in 0..3 {
        assert_eq!(world.mode(p), Mode::SolidA);
        assert!(world
            .fixtures(p)
            .states()
            .iter()
            .all(|e| *e == solid(&cfg, 0)));
    }
}

#[test]
fn ownership_follows_the_last_actor() {
    let mut world = World::new_seeded(test_config(), 3, 1).unwrap();

    world.use_prop(0).unwrap();
    world.tick(Duration::from_millis(10));
    let first_owner = world.owner().unwrap();

    world.use_prop(2).unwrap();
    world.tick(Duration::from_millis(10));
    let second_owner = world.owner().unwrap();

    assert_ne!(first_owner, second_owner);
}

#[test]
fn four_interactions_return_to_off() {
    let mut world = World::new_seeded(test_config(), 2, 1).unwrap();

    for _ in 0..4 {
        world.use_prop(0).unwrap();
        world.tick(Duration::from_millis(10));
    }

    for p in 0..2 {
        assert_eq!(world.mode(p), Mode::Off);
        assert!(world.fixtures(p).lit_indices().is_empty());
    }
}

#[test]
fn chase_advances_on_the_step_delay() {
    let cfg = test_config();
    let mut world = World::new_seeded(cfg.clone(), 1, 1).unwrap();

    // Off -> SolidA -> SolidB -> Chase
    for _ in 0..3 {
        world.use_prop(0).unwrap();
    }
    assert_eq!(world.mode(0), Mode::Chase);

    // Entry ran the first step immediately: fixture 0 is lit
    assert_eq!(world.fixtures(0).lit_indices(), vec![0]);

    // Nothing moves before the delay elapses
    world.tick(Duration::from_millis(49));
    assert_eq!(world.fixtures(0).lit_indices(), vec![0]);

    // Each elapsed delay advances the lit fixture by one, circularly
    for k in 1..=8 {
        world.tick(Duration::from_millis(50));
        assert_eq!(world.fixtures(0).lit_indices(), vec![k % 6]);
    }
}

#[test]
fn big_tick_catches_up_multiple_steps() {
    let mut world = World::new_seeded(test_config(), 1, 1).unwrap();
    for _ in 0..3 {
        world.use_prop(0).unwrap();
    }

    // 4 delays in one tick: the deferred step re-arms and fires 4 times
    world.tick(Duration::from_millis(200));
    assert_eq!(world.fixtures(0).lit_indices(), vec![4]);
}

#[test]
fn leaving_chase_freezes_the_rig_dark() {
    let mut world = World::new_seeded(test_config(), 2, 1).unwrap();
    for _ in 0..3 {
        world.use_prop(0).unwrap();
    }
    world.tick(Duration::from_millis(120));

    // Advance out of Chase back to Off
    world.use_prop(0).unwrap();
    world.tick(Duration::from_millis(500));

    for p in 0..2 {
        assert_eq!(world.mode(p), Mode::Off);
        assert!(world.fixtures(p).lit_indices().is_empty());
    }
}

#[test]
fn chase_runs_on_every_replica() {
    let mut world = World::new_seeded(test_config(), 2, 1).unwrap();
    for _ in 0..3 {
        world.use_prop(0).unwrap();
    }
    world.tick(Duration::from_millis(10));

    assert_eq!(world.mode(1), Mode::Chase);
    assert_eq!(world.fixtures(1).lit_indices().len(), 1);

    world.tick(Duration::from_millis(500));
    assert_eq!(world.fixtures(0).lit_indices().len(), 1);
    assert_eq!(world.fixtures(1).lit_indices().len(), 1);
}

#[test]
fn empty_rig_survives_the_full_cycle() {
    let cfg = RigConfig {
        fixture_count: 0,
        ..test_config()
    };
    let mut world = World::new_seeded(cfg, 2, 1).unwrap();

    for _ in 0..8 {
        world.use_prop(0).unwrap();
        world.tick(Duration::from_millis(200));
    }

    assert_eq!(world.mode(0), Mode::Off);
    assert!(!world.fixtures(0).states().iter().any(|e| e.enabled));
}
