use std::time::{Duration, Instant};

use activity::{CounterConfig, DecayingCounter};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = CounterConfig::from_toml("characteristic_time_secs = 60.0")?;
    let mut counter: DecayingCounter = config.build()?;
    let mut ts = Instant::now();

    for i in 0..1000 {
        counter.increment(ts, 1);
        ts += Duration::from_secs(1);

        if i % 100 == 0 {
            info!(tick = i, hz = counter.hz(), "{counter}");
        }
    }

    // A late event, one minute stale.
    counter.increment(ts - Duration::from_secs(60), 1);

    info!(hz = counter.hz(), next = ?counter.next_expected(ts), "{counter}");
    Ok(())
}
