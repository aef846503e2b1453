//! # Example: history_replay
//!
//! History-preserving hub: late subscribers replay recent events before going live.
//!
//! ## Flow
//! ```text
//! Hub::with_history(4)
//!   ├─► publish(-4, -3, -2, -1)         (no subscribers yet; recorded in history)
//!   ├─► subscribe() "late"
//!   │     └─► replay -4 -3 -2 -1, then live
//!   ├─► publish(1, 2)
//!   └─► "late" prints [-4, -3, -2, -1, 1, 2]
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example history_replay
//! ```

use hubcast::Hub;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let hub = Hub::with_history(4)?;
    let token = CancellationToken::new();

    for n in [-4, -3, -2, -1] {
        hub.publish(&token, n).await;
    }

    let mut late = hub.subscribe().await;
    let reader = tokio::spawn(async move {
        let token = CancellationToken::new();
        let mut seen = Vec::new();
        while seen.len() < 6 {
            match late.next(&token).await {
                Some(ev) => seen.push(ev),
                None => break,
            }
        }
        late.close();
        seen
    });

    for n in [1, 2] {
        hub.publish(&token, n).await;
    }

    println!("[late] saw {:?}", reader.await?);
    hub.close().await;
    Ok(())
}
