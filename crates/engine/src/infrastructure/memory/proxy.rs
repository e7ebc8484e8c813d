//! In-memory proxy entities.
//!
//! Proxies live in a shared registry so tests can count leaks and step a
//! trivial physics integration (position += velocity per host tick).

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use glam::DVec3;

use crate::infrastructure::ports::{ProxyEntity, ProxyError, ProxyFactoryPort};
use structmover_domain::{BlockData, BlockPos, WorldId};

#[derive(Debug, Clone)]
pub struct ProxyBody {
    pub world: WorldId,
    pub data: BlockData,
    pub position: DVec3,
    pub velocity: DVec3,
}

type Registry = Arc<DashMap<u64, ProxyBody>>;

pub struct InMemoryProxies {
    live: Registry,
    next_id: AtomicU64,
    spawned: AtomicUsize,
    /// Spawns allowed before every further spawn fails
    spawn_budget: AtomicUsize,
}

impl Default for InMemoryProxies {
    fn default() -> Self {
        Self {
            live: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(1),
            spawned: AtomicUsize::new(0),
            spawn_budget: AtomicUsize::new(usize::MAX),
        }
    }
}

impl InMemoryProxies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every spawn after the next `count` fail.
    pub fn fail_after(&self, count: usize) {
        self.spawn_budget.store(count, Ordering::SeqCst);
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn spawned_count(&self) -> usize {
        self.spawned.load(Ordering::SeqCst)
    }

    pub fn bodies(&self) -> Vec<ProxyBody> {
        self.live.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Integrate one host tick of motion for every live proxy.
    pub fn physics_tick(&self) {
        for mut entry in self.live.iter_mut() {
            let body = entry.value_mut();
            body.position += body.velocity;
        }
    }
}

impl ProxyFactoryPort for InMemoryProxies {
    fn spawn(
        &self,
        world: WorldId,
        position: DVec3,
        data: &BlockData,
    ) -> Result<Box<dyn ProxyEntity>, ProxyError> {
        let allowed = self
            .spawn_budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |budget| {
                budget.checked_sub(1)
            })
            .is_ok();
        if !allowed {
            return Err(ProxyError::spawn_failed(
                BlockPos::from_center(position),
                "entity limit reached",
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.live.insert(
            id,
            ProxyBody {
                world,
                data: data.clone(),
                position,
                velocity: DVec3::ZERO,
            },
        );
        self.spawned.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemoryProxy {
            id,
            live: self.live.clone(),
            last: position,
        }))
    }
}

struct InMemoryProxy {
    id: u64,
    live: Registry,
    /// Last known position, kept after destruction
    last: DVec3,
}

impl ProxyEntity for InMemoryProxy {
    fn set_velocity(&mut self, velocity: DVec3) {
        if let Some(mut body) = self.live.get_mut(&self.id) {
            body.velocity = velocity;
        }
    }

    fn velocity(&self) -> DVec3 {
        self.live
            .get(&self.id)
            .map_or(DVec3::ZERO, |body| body.velocity)
    }

    fn position(&self) -> DVec3 {
        self.live
            .get(&self.id)
            .map_or(self.last, |body| body.position)
    }

    fn destroy(&mut self) {
        if let Some((_, body)) = self.live.remove(&self.id) {
            self.last = body.position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destroy_removes_from_registry() {
        let proxies = InMemoryProxies::new();
        let mut proxy = proxies
            .spawn(WorldId::new(), DVec3::new(0.5, 64.5, 0.5), &BlockData::solid("oak_planks"))
            .unwrap();
        proxy.set_velocity(DVec3::new(0.1, 0.0, 0.0));
        proxies.physics_tick();
        assert!((proxy.position().x - 0.6).abs() < 1e-12);
        assert_eq!(proxies.live_count(), 1);

        proxy.destroy();
        assert_eq!(proxies.live_count(), 0);
        assert!((proxy.position().x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn spawn_budget_is_enforced() {
        let proxies = InMemoryProxies::new();
        proxies.fail_after(1);
        let data = BlockData::solid("stone");
        assert!(proxies.spawn(WorldId::new(), DVec3::ZERO, &data).is_ok());
        assert!(proxies.spawn(WorldId::new(), DVec3::ZERO, &data).is_err());
        assert_eq!(proxies.spawned_count(), 1);
    }
}
