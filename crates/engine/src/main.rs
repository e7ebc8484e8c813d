//! Structmover Engine - demo entry point.
//!
//! Runs the engine against the in-memory world: a sliding gate opens, waits
//! for its auto-close and slides back.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use structmover_domain::{
    BlockData, BlockPos, Cuboid, PlayerId, Structure, StructureType, WorldId,
};
use structmover_engine::app::{Adapters, App};
use structmover_engine::infrastructure::clock::SystemClock;
use structmover_engine::infrastructure::config::EngineConfig;
use structmover_engine::infrastructure::memory::{
    AllowAll, InMemoryProxies, InMemoryStructureStore, InMemoryWorld, TracingNotifier,
};
use structmover_engine::infrastructure::ports::{Repeat, SchedulerPort, StructureStorePort};
use structmover_engine::infrastructure::scheduler::TokioScheduler;

/// How long the demo runs before shutting the engine down.
const DEMO_SECS: u64 = 8;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "structmover_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Structmover Engine");

    let config = EngineConfig::load()?;
    tracing::debug!(?config, "Loaded configuration");

    let (scheduler, _worker) = TokioScheduler::start(tokio::runtime::Handle::current());
    let scheduler = Arc::new(scheduler);
    let world = Arc::new(InMemoryWorld::new());
    let proxies = Arc::new(InMemoryProxies::new());
    let store = Arc::new(InMemoryStructureStore::new());

    let app = Arc::new(App::new(
        config,
        Adapters {
            world: world.clone(),
            proxies: proxies.clone(),
            scheduler: scheduler.clone(),
            store: store.clone(),
            clock: Arc::new(SystemClock::new()),
            permissions: Arc::new(AllowAll),
            notifier: Arc::new(TracingNotifier),
        },
    ));

    // Proxies drift with their velocity once per host tick
    let physics = proxies.clone();
    scheduler.run_repeating(
        Box::new(move || {
            physics.physics_tick();
            Repeat::Continue
        }),
        0,
        1,
    );

    let gate = Structure::new(
        "demo gate",
        WorldId::new(),
        PlayerId::new(),
        StructureType::SlidingDoor,
        Cuboid::from_corners(BlockPos::new(0, 64, 0), BlockPos::new(4, 66, 0)),
        BlockPos::new(0, 64, 0),
    )
    .with_auto_close(3);
    world.fill(gate.world_id(), &gate.cuboid(), &BlockData::solid("spruce_planks"));
    store.insert(gate.clone());

    let opener = app.clone();
    let gate_id = gate.id();
    scheduler.run_on_sync_thread(Box::new(move || {
        let result = opener.toggle(gate_id, 0.0, false, false);
        tracing::info!(structure_id = %gate_id, result = %result, "Toggled demo gate");
    }));

    tokio::select! {
        _ = tokio::time::sleep(Duration::from_secs(DEMO_SECS)) => {}
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted"),
    }

    let (done_tx, done_rx) = tokio::sync::oneshot::channel();
    let stopping = app.clone();
    scheduler.run_on_sync_thread(Box::new(move || {
        let aborted = stopping.shutdown();
        let _ = done_tx.send(aborted);
    }));
    let aborted = done_rx.await?;

    if let Ok(Some(stored)) = store.get(gate_id) {
        tracing::info!(
            structure_id = %gate_id,
            open = stored.is_open(),
            cuboid = ?stored.cuboid(),
            aborted,
            "Demo finished"
        );
    }
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
