//! Ghost trails: detached, fading snapshots of nodes.
//!
//! Lifecycle is strictly linear: spawned at life 1.0, aged every tick,
//! removed on the tick life reaches zero. Nothing is ever revived.

use bevy::math::{Vec3, Vec4};
use rand::Rng;
use serde::Deserialize;

use crate::graph::clamp_probability;

/// Life below this counts as zero; absorbs f32 drift from repeated subtraction
const LIFE_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TrailConfig {
    /// Chance per node per tick of leaving a ghost
    pub spawn_probability: f64,
    /// Opacity is multiplied by this every tick
    pub opacity_decay: f32,
    /// Subtracted from remaining life every tick
    pub life_decay: f32,
    /// Opacity of a freshly spawned ghost
    pub start_opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrailId(pub u64);

/// Frozen copy of a node's look at spawn time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSnapshot {
    pub position: Vec3,
    pub scale: f32,
    pub rotation_y: f32,
    /// RGB; opacity lives on the trail
    pub color: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostTrail {
    pub id: TrailId,
    pub snapshot: TrailSnapshot,
    pub opacity: f32,
    /// In (0, 1] while the trail is alive
    pub remaining_life: f32,
}

impl GhostTrail {
    pub fn color(&self) -> Vec4 {
        self.snapshot.color.extend(self.opacity)
    }
}

/// Owns every live ghost trail
#[derive(Debug, Default)]
pub struct TrailManager {
    trails: Vec<GhostTrail>,
    /// Ids removed since the last drain, for the renderer to despawn
    removed: Vec<TrailId>,
    next_id: u64,
}

impl TrailManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// With probability `probability`, start a new ghost from `snapshot`
    pub fn spawn_maybe(
        &mut self,
        snapshot: TrailSnapshot,
        probability: f64,
        start_opacity: f32,
        rng: &mut impl Rng,
    ) -> Option<TrailId> {
        if !rng.random_bool(clamp_probability(probability)) {
            return None;
        }

        let id = TrailId(self.next_id);
        self.next_id += 1;

        self.trails.push(GhostTrail {
            id,
            snapshot,
            opacity: start_opacity.clamp(0.0, 1.0),
            remaining_life: 1.0,
        });
        log::trace!("spawned ghost trail {}", id.0);

        Some(id)
    }

    /// Age every live trail by one tick; returns how many were removed
    pub fn age_all(&mut self, opacity_decay: f32, life_decay: f32) -> usize {
        let before = self.trails.len();
        let removed = &mut self.removed;

        self.trails.retain_mut(|trail| {
            trail.opacity *= opacity_decay;
            trail.remaining_life -= life_decay;

            if trail.remaining_life <= LIFE_EPSILON {
                trail.remaining_life = 0.0;
                removed.push(trail.id);
                log::trace!("ghost trail {} expired", trail.id.0);
                false
            } else {
                true
            }
        });

        before - self.trails.len()
    }

    /// Take the ids removed since the last call
    pub fn drain_removed(&mut self) -> std::vec::Drain<'_, TrailId> {
        self.removed.drain(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GhostTrail> {
        self.trails.iter()
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }
}

#[cfg(test)]
impl TrailManager {
    pub fn get(&self, id: TrailId) -> Option<&GhostTrail> {
        self.trails.iter().find(|t| t.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn snapshot() -> TrailSnapshot {
        TrailSnapshot {
            position: Vec3::new(1.0, 2.0, 3.0),
            scale: 1.1,
            rotation_y: 0.0,
            color: Vec3::new(1.0, 0.2, 1.0),
        }
    }

    #[test]
    fn test_trail_removed_after_exactly_fifty_ticks() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut trails = TrailManager::new();
        let id = trails.spawn_maybe(snapshot(), 1.0, 0.4, &mut rng).unwrap();

        for tick in 1..50 {
            assert_eq!(trails.age_all(0.95, 0.02), 0, "removed early at tick {tick}");
            assert!(trails.get(id).is_some());
        }

        assert_eq!(trails.age_all(0.95, 0.02), 1, "should be removed on tick 50");
        assert!(trails.is_empty());
        assert_eq!(trails.drain_removed().collect::<Vec<_>>(), vec![id]);
    }

    #[test]
    fn test_life_strictly_decreases() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut trails = TrailManager::new();
        let id = trails.spawn_maybe(snapshot(), 1.0, 0.4, &mut rng).unwrap();

        let mut last_life = 1.0;
        let mut last_opacity = 0.4;
        while let Some(trail) = trails.get(id).copied() {
            assert!(trail.remaining_life > 0.0 && trail.remaining_life <= 1.0);
            assert!(trail.remaining_life <= last_life);
            assert!(trail.opacity <= last_opacity);
            last_life = trail.remaining_life;
            last_opacity = trail.opacity;
            trails.age_all(0.96, 0.015);
        }

        assert_eq!(trails.drain_removed().count(), 1);
    }

    #[test]
    fn test_spawn_probability_respected() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut trails = TrailManager::new();

        for _ in 0..100 {
            assert!(trails.spawn_maybe(snapshot(), 0.0, 0.4, &mut rng).is_none());
        }
        assert!(trails.is_empty());

        let spawned = (0..10_000)
            .filter(|_| trails.spawn_maybe(snapshot(), 0.01, 0.4, &mut rng).is_some())
            .count();
        assert!((60..=140).contains(&spawned), "spawned {spawned} of 10000 at p=0.01");
    }

    #[test]
    fn test_nan_probability_never_spawns() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut trails = TrailManager::new();

        for p in [f64::NAN, f64::INFINITY, -3.0] {
            assert!(trails.spawn_maybe(snapshot(), p, 0.4, &mut rng).is_none());
        }
        assert!(trails.is_empty());
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut trails = TrailManager::new();
        let mut source = snapshot();
        let id = trails.spawn_maybe(source, 1.0, 0.4, &mut rng).unwrap();

        source.position = Vec3::new(100.0, 0.0, 0.0);
        trails.age_all(0.95, 0.02);

        let trail = trails.get(id).unwrap();
        assert_eq!(trail.snapshot.position, Vec3::new(1.0, 2.0, 3.0));
        assert!((trail.opacity - 0.38).abs() < 1e-6);
        assert!((trail.color().w - trail.opacity).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut trails = TrailManager::new();

        let a = trails.spawn_maybe(snapshot(), 1.0, 0.4, &mut rng).unwrap();
        let b = trails.spawn_maybe(snapshot(), 1.0, 0.4, &mut rng).unwrap();
        assert_ne!(a, b);
        assert_eq!(trails.len(), 2);
    }
}
