// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Host-loop demo: drives an event tree the way a per-frame update loop would.

use std::cell::Cell;
use std::env;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use mercury_events::config::{load_and_validate_config, TreeConfig};
use mercury_events::event::{once, Listener, Timing, Tree};
use tracing_subscriber::EnvFilter;

const TICKS: u64 = 5;

/// Per-tick payload dispatched to the `stage` subtree
#[derive(Debug, Clone, Copy)]
struct Tick {
    frame: u64,
}

fn load(args: &[String]) -> Result<TreeConfig> {
    match args.get(1) {
        Some(path) => load_and_validate_config(path)
            .with_context(|| format!("loading config from {}", path)),
        None => Ok(TreeConfig::default()),
    }
}

fn init_tracing(config: &TreeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = load(&args)?;
    init_tracing(&config);

    let mut tree: Tree<Tick> = Tree::with_config(config);

    let every = Rc::new(Cell::new(0u32));
    let first_two = Rc::new(Cell::new(0u32));

    let seen = Rc::clone(&every);
    tree.listen(
        "stage/sprites",
        "tick",
        Listener::new(move |tick: &Tick, ctx| {
            seen.set(seen.get() + 1);
            tracing::info!(frame = tick.frame, path = ctx.path, "sprite update");
        }),
        Timing::Deferred,
    );

    let seen = Rc::clone(&first_two);
    tree.listen(
        "stage/intro",
        "tick",
        once(
            Listener::new(move |tick: &Tick, _| {
                seen.set(seen.get() + 1);
                tracing::info!(frame = tick.frame, "intro frame");
            }),
            2,
        ),
        Timing::Deferred,
    );

    for frame in 0..TICKS {
        // Listens queued above land on the first poll, so frame 0's tick
        // reaches them on the second.
        tree.poll();
        tree.dispatch("stage", "tick", Tick { frame }, Timing::Deferred);
    }
    tree.poll();

    println!("ticks:               {}", TICKS);
    println!("sprite listener:     {} calls", every.get());
    println!("intro (once x2):     {} calls", first_two.get());
    println!("intro still listed:  {}", tree.listener_count("stage/intro", "tick") > 0);
    Ok(())
}
