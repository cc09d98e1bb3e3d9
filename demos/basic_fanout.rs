//! # Demo: basic_fanout
//!
//! One producer, two consumers, every message delivered to both and
//! reclaimed exactly once afterwards.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► Queue::new(reclaimer)
//!   ├─► attach alpha, attach beta
//!   ├─► spawn reader per consumer
//!   ├─► publish 5 messages
//!   └─► shutdown ──► streams end ──► readers join
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic_fanout
//! ```

use std::sync::Arc;

use fanoutq::{Queue, ReclaimFn, ReclaimerRef};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1) Reclaimer: runs once per message, after both consumers received it
    let reclaimer: ReclaimerRef<String> = ReclaimFn::arc("printer", |msg: Arc<String>| {
        println!("[reclaimed] {msg}");
    });

    // 2) Queue with default configuration
    let queue = Queue::new(reclaimer);

    // 3) Two consumers with small buffers
    let mut alpha = queue.attach(4).await?;
    let mut beta = queue.attach(4).await?;

    let readers = vec![
        tokio::spawn(async move {
            while let Some(msg) = alpha.recv().await {
                println!("[alpha] {msg}");
            }
        }),
        tokio::spawn(async move {
            while let Some(msg) = beta.recv().await {
                println!("[beta] {msg}");
            }
        }),
    ];

    // 4) Publish a handful of messages
    for i in 0..5 {
        queue.publish(format!("message-{i}")).await?;
    }

    // 5) Drain the pipeline; consumer streams end, readers finish
    queue.shutdown().await?;
    for reader in readers {
        let _ = reader.await;
    }

    println!("[main] done: every message delivered twice, reclaimed once.");
    Ok(())
}
