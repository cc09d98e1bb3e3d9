//! # Demo: dynamic_attach_detach
//!
//! Attach and detach consumers while the producer keeps publishing.
//!
//! Demonstrates how to:
//! - Run a steady consumer from the start.
//! - From a "controller" task, attach a late consumer mid-stream (it only
//!   sees later messages), read a few, then detach and drain it.
//! - Shut the queue down and observe the final reclaim tally.
//!
//! ## Run
//! ```bash
//! cargo run --example dynamic_attach_detach
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use fanoutq::{Queue, QueueConfig, ReclaimFn, ReclaimerRef};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1) Count reclaims so the final tally is visible
    let reclaimed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&reclaimed);
    let reclaimer: ReclaimerRef<String> = ReclaimFn::arc("counter", move |msg: Arc<String>| {
        counter.fetch_add(1, Ordering::Relaxed);
        println!("[reclaimed] {msg}");
    });

    // 2) Configure the queue
    let cfg = QueueConfig {
        input_capacity: 8,
        grace: Duration::from_secs(5),
        ..QueueConfig::default()
    };
    let queue = Arc::new(Queue::with_config(reclaimer, cfg));

    // 3) Producer: 20 ticks, one every 100 ms
    let producer = {
        let q = Arc::clone(&queue);
        tokio::spawn(async move {
            for i in 0..20u32 {
                if q.publish(format!("tick-{i}")).await.is_err() {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        })
    };

    // 4) Steady consumer attached from the start
    let mut steady = queue.attach(4).await?;
    let steady_reader = tokio::spawn(async move {
        while let Some(msg) = steady.recv().await {
            println!("[steady] {msg}");
        }
    });

    // 5) Controller: attach a late consumer mid-stream, then detach it
    let controller = {
        let q = Arc::clone(&queue);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(550)).await;
            println!("[controller] attach late consumer (misses earlier ticks)");
            let Ok(mut late) = q.attach(4).await else {
                return;
            };

            for _ in 0..5 {
                match late.recv().await {
                    Some(msg) => println!("[late] {msg}"),
                    None => break,
                }
            }

            println!("[controller] detach late consumer");
            q.detach(&late).await;
            // Drain deliveries that were already in flight at detach time.
            while late.recv().await.is_some() {}
        })
    };

    let _ = producer.await;
    let _ = controller.await;

    // 6) Drain the pipeline; the steady stream ends
    queue.shutdown().await?;
    let _ = steady_reader.await;

    println!(
        "[main] finished: {} message(s) reclaimed.",
        reclaimed.load(Ordering::Relaxed)
    );
    Ok(())
}
