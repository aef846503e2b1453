//! # Example: basic
//!
//! Plain hub with three consumers pulling at different speeds.
//!
//! Demonstrates how to:
//! - Create a plain [`Hub`] and hand out [`Subscription`]s.
//! - Pull events with [`Subscription::next`] until the hub closes.
//! - Close the hub and watch every consumer finish.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► Hub::new()                      (spawns coordinator)
//!   ├─► subscribe() × 3 ─► consumer tasks loop on next()
//!   ├─► publish(1..=10)                 (slow consumer misses some)
//!   └─► close()
//!         └─► every consumer gets None and reports what it saw
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=hubcast=debug cargo run --example basic
//! ```

use std::time::Duration;

use hubcast::{Config, Hub, Subscription};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

fn consumer(
    name: &'static str,
    mut sub: Subscription<u32>,
    pause: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let token = CancellationToken::new();
        let mut seen = Vec::new();
        while let Some(ev) = sub.next(&token).await {
            seen.push(ev);
            tokio::time::sleep(pause).await;
        }
        println!("[{name}] hub closed after {seen:?}");
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 1. A short request timeout keeps the slow consumer from pacing the others.
    let hub = Hub::with_config(Config {
        request_timeout: Duration::from_millis(5),
        ..Config::default()
    })?;

    // 2. Consumers with different speeds
    let handles = vec![
        consumer("fast", hub.subscribe().await, Duration::ZERO),
        consumer("medium", hub.subscribe().await, Duration::from_millis(2)),
        consumer("slow", hub.subscribe().await, Duration::from_millis(20)),
    ];

    // 3. Publish
    let token = CancellationToken::new();
    for n in 1..=10 {
        hub.publish(&token, n).await;
        tokio::time::sleep(Duration::from_millis(3)).await;
    }

    // 4. Close and wait for consumers
    hub.close().await;
    for h in handles {
        h.await?;
    }
    Ok(())
}
