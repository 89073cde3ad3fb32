//! A decaying activity counter.
//!
//! A decaying counter is appropriate to estimate the best candidate to evict from, say, a cache,
//! assuming the event stream is some Poisson process.
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use activity::DecayingCounter;
//!
//! let mut counter = DecayingCounter::new(Duration::from_secs(60));
//! let start = Instant::now();
//!
//! counter.increment(start, 120);
//!
//! assert_eq!(counter.hz(), 2.0);
//! assert_eq!(counter.next_expected(start), Duration::from_millis(500));
//! assert_eq!(counter.to_string(), "500ms (2 Hz)");
//! ```
//!
//! Out-of-order events and merges of counters with different characteristic times are
//! approximations; their correction factors are provisional.

pub use config::CounterConfig;
pub use counter::{merge, DecayingCounter};
pub use error::{ActivityError, ActivityResult};
pub use item::Item;

pub mod config;
mod counter;
mod error;
mod item;
