//! # Example: cancel
//!
//! Cancelling a blocked publish and a blocked pull with a [`CancellationToken`].
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► subscribe() "idle"               (never pulls)
//!   ├─► publish(1), publish(2)           (coordinator waits on "idle"; queue fills)
//!   ├─► publish(3) with deadline token   → false after 100ms, nothing recorded
//!   ├─► waiter.next() with deadline      → None after 100ms
//!   └─► close()                          (does not wait for "idle")
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example cancel
//! ```

use std::time::Duration;

use hubcast::Hub;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

fn deadline(after: Duration) -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        child.cancel();
    });
    token
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let hub = Hub::new();
    let _idle = hub.subscribe().await;
    let mut waiter = hub.subscribe().await;

    let token = CancellationToken::new();
    hub.publish(&token, 1).await;
    hub.publish(&token, 2).await;

    let accepted = hub.publish(&deadline(Duration::from_millis(100)), 3).await;
    println!("[publish] 3 accepted: {accepted}");

    let got = waiter.next(&deadline(Duration::from_millis(100))).await;
    println!("[waiter] next: {got:?}");

    hub.close().await;
    println!("[hub] closed");
    Ok(())
}
