// src/spawner/director.rs
//! The spawn director: owns the cadence timer and the live-actor roster,
//! and runs one spawn attempt per interval expiry.

use bevy::prelude::*;
use rand::Rng;

use crate::spawner::core::{Placement, SpawnHost, SpawnRule, SurfaceSampler};
use crate::spawner::{geometry, resolve, select};

/// Tick-driven spawn controller. One of these lives as a resource; tests
/// drive it directly with fake hosts/surfaces.
#[derive(Resource)]
pub struct SpawnDirector {
    /// Authored rules; may be empty.
    pub rules: Vec<SpawnRule>,
    /// Seconds between spawn attempts.
    pub spawn_interval: f32,
    /// Cap on simultaneously live spawned actors.
    pub max_alive: usize,
    elapsed: f32,
    alive: Vec<Entity>,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self::new(2.0, 30)
    }
}

impl SpawnDirector {
    pub fn new(spawn_interval: f32, max_alive: usize) -> Self {
        Self {
            rules: Vec::new(),
            spawn_interval,
            max_alive,
            elapsed: 0.0,
            alive: Vec::new(),
        }
    }

    /// Roster size as of the last prune. Stale handles linger here until the
    /// next spawn attempt sweeps them.
    pub fn alive_count(&self) -> usize {
        self.alive.len()
    }

    /// Advance the cadence timer by `dt` seconds. When the timer crosses the
    /// interval it resets to zero and runs a single spawn attempt; a large
    /// `dt` spanning several intervals still fires only once.
    pub fn advance(
        &mut self,
        dt: f32,
        rng: &mut impl Rng,
        host: &mut dyn SpawnHost,
        surface: &dyn SurfaceSampler,
    ) -> Option<Entity> {
        self.elapsed += dt;
        if self.elapsed < self.spawn_interval {
            return None;
        }
        self.elapsed = 0.0;
        self.try_spawn(rng, host, surface)
    }

    /// One spawn attempt: prune the roster, honor the cap, pick a rule,
    /// place, snap, instantiate. Every failure path is a plain `None`;
    /// nothing here is an error.
    pub fn try_spawn(
        &mut self,
        rng: &mut impl Rng,
        host: &mut dyn SpawnHost,
        surface: &dyn SurfaceSampler,
    ) -> Option<Entity> {
        self.alive.retain(|&actor| host.is_alive(actor));
        if self.alive.len() >= self.max_alive {
            return None;
        }

        let rule = select::pick_rule(&self.rules, rng)?;
        let prefab = rule.prefab.as_ref()?;

        let (position, rotation) = match &rule.placement {
            Placement::Ring { center, radius, radius_jitter } => {
                let (origin, _) = host.transform_of(*center)?;
                let raw = geometry::ring_position(origin, *radius, *radius_jitter, rng);
                resolve::snap_to_surface(raw, Quat::IDENTITY, rule.surface_search, surface)?
            }
            Placement::Points { points } => {
                let pick = geometry::pick_point(points, rng)?;
                let (raw, facing) = host.transform_of(pick)?;
                resolve::snap_to_surface(raw, facing, rule.surface_search, surface)?
            }
        };

        let actor = host.instantiate(prefab, position, rotation)?;
        self.alive.push(actor);
        debug!("spawner: actor {:?} up at {:?}", actor, position);
        Some(actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawner::core::ActorPrefab;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::{HashMap, HashSet};

    struct Flat;
    impl SurfaceSampler for Flat {
        fn sample(&self, p: Vec3, _r: f32) -> Option<Vec3> {
            Some(Vec3::new(p.x, 0.0, p.z))
        }
    }

    struct Nowhere;
    impl SurfaceSampler for Nowhere {
        fn sample(&self, _p: Vec3, _r: f32) -> Option<Vec3> {
            None
        }
    }

    struct TestHost {
        world: World,
        anchors: HashMap<Entity, (Vec3, Quat)>,
        dead: HashSet<Entity>,
        spawned: Vec<(Entity, Vec3, Quat)>,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                world: World::new(),
                anchors: HashMap::new(),
                dead: HashSet::new(),
                spawned: Vec::new(),
            }
        }

        fn add_anchor(&mut self, position: Vec3, rotation: Quat) -> Entity {
            let e = self.world.spawn_empty().id();
            self.anchors.insert(e, (position, rotation));
            e
        }
    }

    impl SpawnHost for TestHost {
        fn is_alive(&self, actor: Entity) -> bool {
            !self.dead.contains(&actor)
        }

        fn transform_of(&self, reference: Entity) -> Option<(Vec3, Quat)> {
            self.anchors.get(&reference).copied()
        }

        fn instantiate(
            &mut self,
            _prefab: &ActorPrefab,
            position: Vec3,
            rotation: Quat,
        ) -> Option<Entity> {
            let e = self.world.spawn_empty().id();
            self.spawned.push((e, position, rotation));
            Some(e)
        }
    }

    fn pill() -> Option<ActorPrefab> {
        Some(ActorPrefab::Pill { radius: 0.5, length: 1.0, color: [0.8, 0.2, 0.2] })
    }

    fn ring_rule(center: Entity) -> SpawnRule {
        SpawnRule {
            prefab: pill(),
            weight: 1.0,
            placement: Placement::Ring { center, radius: 10.0, radius_jitter: 0.0 },
            surface_search: 6.0,
        }
    }

    fn points_rule(points: Vec<Entity>) -> SpawnRule {
        SpawnRule {
            prefab: pill(),
            weight: 1.0,
            placement: Placement::Points { points },
            surface_search: 6.0,
        }
    }

    #[test]
    fn interval_fires_once_and_resets() {
        let mut host = TestHost::new();
        let center = host.add_anchor(Vec3::ZERO, Quat::IDENTITY);
        let mut director = SpawnDirector::new(2.0, 30);
        director.rules = vec![ring_rule(center)];
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        for _ in 0..3 {
            director.advance(1.0, &mut rng, &mut host, &Flat);
        }
        assert_eq!(host.spawned.len(), 1);
        assert_eq!(director.elapsed, 0.0);

        // One more second is not enough again; the next one is.
        director.advance(1.0, &mut rng, &mut host, &Flat);
        assert_eq!(host.spawned.len(), 1);
        director.advance(1.0, &mut rng, &mut host, &Flat);
        assert_eq!(host.spawned.len(), 2);
    }

    #[test]
    fn oversized_step_does_not_burst() {
        let mut host = TestHost::new();
        let center = host.add_anchor(Vec3::ZERO, Quat::IDENTITY);
        let mut director = SpawnDirector::new(2.0, 30);
        director.rules = vec![ring_rule(center)];
        let mut rng = ChaCha8Rng::seed_from_u64(22);

        director.advance(10.0, &mut rng, &mut host, &Flat);
        assert_eq!(host.spawned.len(), 1);
    }

    #[test]
    fn cap_holds_and_pruning_frees_slots() {
        let mut host = TestHost::new();
        let center = host.add_anchor(Vec3::ZERO, Quat::IDENTITY);
        let mut director = SpawnDirector::new(1.0, 3);
        director.rules = vec![ring_rule(center)];
        let mut rng = ChaCha8Rng::seed_from_u64(23);

        for _ in 0..10 {
            director.advance(1.0, &mut rng, &mut host, &Flat);
            assert!(director.alive_count() <= 3);
        }
        assert_eq!(host.spawned.len(), 3);

        // Two actors die externally; the roster frees up on the next attempt.
        host.dead.insert(host.spawned[0].0);
        host.dead.insert(host.spawned[1].0);
        for _ in 0..5 {
            director.advance(1.0, &mut rng, &mut host, &Flat);
            assert!(director.alive_count() <= 3);
        }
        assert_eq!(host.spawned.len(), 5);
    }

    #[test]
    fn empty_rule_set_never_spawns() {
        let mut host = TestHost::new();
        let mut director = SpawnDirector::new(1.0, 30);
        let mut rng = ChaCha8Rng::seed_from_u64(24);

        for _ in 0..20 {
            assert!(director.advance(1.0, &mut rng, &mut host, &Flat).is_none());
        }
        assert!(host.spawned.is_empty());
        assert_eq!(director.alive_count(), 0);
    }

    #[test]
    fn failing_surface_never_spawns() {
        let mut host = TestHost::new();
        let center = host.add_anchor(Vec3::ZERO, Quat::IDENTITY);
        let mut director = SpawnDirector::new(1.0, 30);
        director.rules = vec![ring_rule(center)];
        let mut rng = ChaCha8Rng::seed_from_u64(25);

        for _ in 0..20 {
            assert!(director.advance(1.0, &mut rng, &mut host, &Nowhere).is_none());
        }
        assert!(host.spawned.is_empty());
    }

    #[test]
    fn rule_without_prefab_is_inert() {
        let mut host = TestHost::new();
        let center = host.add_anchor(Vec3::ZERO, Quat::IDENTITY);
        let mut rule = ring_rule(center);
        rule.prefab = None;
        let mut director = SpawnDirector::new(1.0, 30);
        director.rules = vec![rule];
        let mut rng = ChaCha8Rng::seed_from_u64(26);

        for _ in 0..10 {
            director.advance(1.0, &mut rng, &mut host, &Flat);
        }
        assert!(host.spawned.is_empty());
    }

    #[test]
    fn missing_ring_center_skips_the_tick() {
        let mut host = TestHost::new();
        // An entity the host knows nothing about.
        let gone = host.world.spawn_empty().id();
        let mut director = SpawnDirector::new(1.0, 30);
        director.rules = vec![ring_rule(gone)];
        let mut rng = ChaCha8Rng::seed_from_u64(27);

        for _ in 0..10 {
            assert!(director.advance(1.0, &mut rng, &mut host, &Flat).is_none());
        }
        assert!(host.spawned.is_empty());
    }

    #[test]
    fn dangling_point_entry_skips_the_tick() {
        let mut host = TestHost::new();
        let gone = host.world.spawn_empty().id();
        let mut director = SpawnDirector::new(1.0, 30);
        director.rules = vec![points_rule(vec![gone])];
        let mut rng = ChaCha8Rng::seed_from_u64(30);

        for _ in 0..10 {
            assert!(director.advance(1.0, &mut rng, &mut host, &Flat).is_none());
        }
        assert!(host.spawned.is_empty());
    }

    #[test]
    fn point_spawn_carries_the_anchor_pose() {
        let mut host = TestHost::new();
        let facing = Quat::from_rotation_y(0.7);
        let post = host.add_anchor(Vec3::new(4.0, 1.0, -2.0), facing);
        let mut director = SpawnDirector::new(1.0, 30);
        director.rules = vec![points_rule(vec![post])];
        let mut rng = ChaCha8Rng::seed_from_u64(28);

        director.advance(1.0, &mut rng, &mut host, &Flat);
        let (_, position, rotation) = host.spawned[0];
        assert_eq!(position, Vec3::new(4.0, 0.0, -2.0));
        assert_eq!(rotation, facing);
    }

    #[test]
    fn ring_spawn_faces_identity() {
        let mut host = TestHost::new();
        let center = host.add_anchor(Vec3::ZERO, Quat::from_rotation_y(1.2));
        let mut director = SpawnDirector::new(1.0, 30);
        director.rules = vec![ring_rule(center)];
        let mut rng = ChaCha8Rng::seed_from_u64(29);

        director.advance(1.0, &mut rng, &mut host, &Flat);
        let (_, _, rotation) = host.spawned[0];
        assert_eq!(rotation, Quat::IDENTITY);
    }
}
