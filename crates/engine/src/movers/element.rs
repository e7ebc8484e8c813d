//! Animated elements and their proxies.

use glam::DVec3;

use crate::infrastructure::ports::ProxyEntity;
use structmover_domain::{BlockData, BlockPos};

/// Owned proxy handle, destroyed exactly once.
///
/// The proxy is destroyed by [`ProxyGuard::destroy`] or, failing that, when
/// the guard is dropped.
#[derive(Default)]
pub struct ProxyGuard {
    proxy: Option<Box<dyn ProxyEntity>>,
}

impl ProxyGuard {
    pub fn new(proxy: Box<dyn ProxyEntity>) -> Self {
        Self { proxy: Some(proxy) }
    }

    pub fn is_live(&self) -> bool {
        self.proxy.is_some()
    }

    pub fn position(&self) -> Option<DVec3> {
        self.proxy.as_ref().map(|proxy| proxy.position())
    }

    pub fn velocity(&self) -> DVec3 {
        self.proxy
            .as_ref()
            .map_or(DVec3::ZERO, |proxy| proxy.velocity())
    }

    pub fn set_velocity(&mut self, velocity: DVec3) {
        if let Some(proxy) = self.proxy.as_mut() {
            proxy.set_velocity(velocity);
        }
    }

    /// Destroy the current proxy and take ownership of `proxy` instead.
    pub fn replace(&mut self, proxy: Box<dyn ProxyEntity>) {
        self.destroy();
        self.proxy = Some(proxy);
    }

    pub fn destroy(&mut self) {
        if let Some(mut proxy) = self.proxy.take() {
            proxy.destroy();
        }
    }
}

impl Drop for ProxyGuard {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// One detached voxel of a moving structure.
pub struct AnimatedElement {
    pub origin: BlockPos,
    pub data: BlockData,
    /// Payload after the motion's quarter turn, for oriented blocks
    pub rotated: Option<BlockData>,
    pub radius: f64,
    pub proxy: ProxyGuard,
}

impl AnimatedElement {
    pub fn new(origin: BlockPos, data: BlockData, rotated: Option<BlockData>, radius: f64) -> Self {
        Self {
            origin,
            data,
            rotated,
            radius,
            proxy: ProxyGuard::default(),
        }
    }

    pub fn can_rotate(&self) -> bool {
        self.rotated.is_some()
    }

    /// Payload to materialize at the destination.
    pub fn final_data(&self) -> &BlockData {
        self.rotated.as_ref().unwrap_or(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingProxy {
        destroyed: Arc<AtomicUsize>,
    }

    impl ProxyEntity for CountingProxy {
        fn set_velocity(&mut self, _velocity: DVec3) {}

        fn velocity(&self) -> DVec3 {
            DVec3::ZERO
        }

        fn position(&self) -> DVec3 {
            DVec3::ZERO
        }

        fn destroy(&mut self) {
            self.destroyed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn guard_destroys_exactly_once() {
        let destroyed = Arc::new(AtomicUsize::new(0));
        let mut guard = ProxyGuard::new(Box::new(CountingProxy {
            destroyed: destroyed.clone(),
        }));
        guard.destroy();
        guard.destroy();
        drop(guard);
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_a_live_guard_destroys_its_proxy() {
        let destroyed = Arc::new(AtomicUsize::new(0));
        let first = Box::new(CountingProxy {
            destroyed: destroyed.clone(),
        });
        let second = Box::new(CountingProxy {
            destroyed: destroyed.clone(),
        });
        {
            let mut guard = ProxyGuard::new(first);
            guard.replace(second);
            assert_eq!(destroyed.load(Ordering::SeqCst), 1);
        }
        assert_eq!(destroyed.load(Ordering::SeqCst), 2);
    }
}
