use std::fmt;
use std::ops::Add;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::error::{ActivityError, ActivityResult};
use crate::item::{elapsed_ratio, Item};

/// A decaying activity counter.
///
/// The counter keeps an exponentially decayed count of events along with the time it was last
/// normalized to. Assuming the events come from a Poisson process, the decayed count divided by
/// the characteristic time estimates the recent event rate, which makes the counter a cheap way to
/// pick the least active entry of a cache or to guess when the next event will arrive.
///
/// Good choices for the characteristic time are larger than the expected interval between events
/// and small enough that the estimate follows changing circumstances. With several events per
/// second and eviction decisions every few minutes, a characteristic time of a few minutes works.
///
/// The counter is a plain value with no internal synchronization; callers serialize access.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DecayingCounter {
    tau: Duration,
    value: f64,
    timestamp: Option<Instant>,
}

impl DecayingCounter {
    /// Creates an empty counter. A zero characteristic time is accepted, but every estimate the
    /// counter produces will be degenerate (infinite or NaN).
    pub fn new(characteristic_time: Duration) -> Self {
        Self {
            tau: characteristic_time,
            value: 0.0,
            timestamp: None,
        }
    }

    /// Creates an empty counter, rejecting a zero characteristic time.
    pub fn try_new(characteristic_time: Duration) -> ActivityResult<Self> {
        if characteristic_time.is_zero() {
            return Err(ActivityError::NonPositiveCharacteristicTime {
                given: characteristic_time,
            });
        }

        Ok(Self::new(characteristic_time))
    }

    pub fn characteristic_time(&self) -> Duration {
        self.tau
    }

    /// The decayed count as of [`last_update`](Self::last_update).
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The time the value was last normalized to; `None` until the first in-order event.
    pub fn last_update(&self) -> Option<Instant> {
        self.timestamp
    }

    /// Records a single event now.
    pub fn tick(&mut self) {
        self.increment(Instant::now(), 1)
    }

    /// Records the given event.
    pub fn update<I>(&mut self, item: I)
    where
        I: Item,
    {
        self.increment(item.timestamp(), item.count())
    }

    /// Records `count` events at `timestamp`.
    ///
    /// An event older than the last update is discounted by its staleness and added without moving
    /// the reference time. This approximates, rather than re-derives, the decayed value.
    pub fn increment(&mut self, timestamp: Instant, count: i64) {
        let delta = elapsed_ratio(self.timestamp, Some(timestamp), self.tau);

        if delta >= 0.0 {
            self.value = self.value * (-delta).exp() + count as f64;
            self.timestamp = Some(timestamp);
        } else {
            trace!(delta, count, "out of order event");
            self.value += delta.exp() * count as f64;
        }
    }

    /// The estimated event frequency in Hertz.
    ///
    /// The value is not decayed to the present; the rate is as of the last update. See
    /// [`hz_at`](Self::hz_at) for the rate decayed to a given instant.
    pub fn hz(&self) -> f64 {
        self.value / self.tau.as_secs_f64()
    }

    /// The estimated event frequency in Hertz at `now`, assuming no events since the last update.
    pub fn hz_at(&self, now: Instant) -> f64 {
        if self.value == 0.0 {
            return 0.0;
        }

        let delta = elapsed_ratio(self.timestamp, Some(now), self.tau);
        self.hz() * (-delta).exp()
    }

    /// The time from `now` until the next expected event, given no event happened since the last
    /// update and the source is a Poisson process with a mean interval much smaller than the
    /// characteristic time.
    ///
    /// Returns [`Duration::MAX`] when no event is expected or the estimate does not fit a duration.
    pub fn next_expected(&self, now: Instant) -> Duration {
        if self.value <= 0.0 {
            return Duration::MAX;
        }

        // tau / (value * exp(-delta))
        let delta = elapsed_ratio(self.timestamp, Some(now), self.tau);
        let secs = delta.exp() * self.tau.as_secs_f64() / self.value;

        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

/// Combines the counters of two independent event streams into the counter of their union.
///
/// The result uses the smaller characteristic time of the two, scaling the other value into its
/// units. This is only exact when both characteristic times are equal.
pub fn merge(a: DecayingCounter, b: DecayingCounter) -> DecayingCounter {
    let (mut a, b) = if a.tau > b.tau { (b, a) } else { (a, b) };

    if a.tau != b.tau {
        debug!(
            kept = ?a.tau,
            scaled = ?b.tau,
            "merging counters with different characteristic times"
        );
    }

    let scaled = a.tau.as_secs_f64() * b.value / b.tau.as_secs_f64();
    let delta = elapsed_ratio(a.timestamp, b.timestamp, a.tau);

    if delta >= 0.0 {
        a.value = a.value * (-delta).exp() + scaled;
        a.timestamp = b.timestamp;
    } else {
        a.value += delta.exp() * scaled;
    }

    a
}

impl Add for DecayingCounter {
    type Output = DecayingCounter;

    fn add(self, other: Self) -> Self::Output {
        merge(self, other)
    }
}

impl fmt::Display for DecayingCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value == 0.0 {
            return write!(f, "\u{221E} (0 Hz)");
        }

        let tau = self.tau.as_secs_f64();
        let period = Period(tau / self.value);

        if self.value > tau {
            write!(f, "{} ({} Hz)", period, two_significant(self.value / tau))
        } else {
            write!(f, "{}", period)
        }
    }
}

/// A signed interval in seconds, printed like a [`Duration`].
struct Period(f64);

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0.0 { "-" } else { "" };

        match Duration::try_from_secs_f64(self.0.abs()) {
            Ok(duration) => write!(f, "{sign}{duration:?}"),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

/// Formats a number with two significant figures, switching to exponent notation for very large or
/// small magnitudes.
fn two_significant(x: f64) -> String {
    if x == 0.0 || !x.is_finite() {
        return format!("{x}");
    }

    let digits = 1 - x.abs().log10().floor() as i32;
    let rounded = if digits >= 0 {
        let scale = 10f64.powi(digits);
        (x * scale).round() / scale
    } else {
        let scale = 10f64.powi(-digits);
        (x / scale).round() * scale
    };
    let exponent = rounded.abs().log10().floor() as i32;

    if (-4..2).contains(&exponent) {
        format!("{rounded}")
    } else {
        format!("{rounded:e}")
    }
}
