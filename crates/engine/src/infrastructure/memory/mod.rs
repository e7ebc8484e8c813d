//! In-memory adapters for the host-facing ports.
//!
//! Used by the demo binary and by tests. A real host replaces these with
//! bindings to its world, entity and storage APIs.

mod access;
mod proxy;
mod store;
mod world;

pub use access::{AllowAll, TracingNotifier};
pub use proxy::{InMemoryProxies, ProxyBody};
pub use store::InMemoryStructureStore;
pub use world::InMemoryWorld;
