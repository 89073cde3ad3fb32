use std::time::{Duration, Instant};

/// An event in a stream of inputs.
pub trait Item {
    /// The arrival timestamp for this event.
    fn timestamp(&self) -> Instant;

    /// The number of simultaneous events this item stands for.
    /// Negative counts retract previously recorded events.
    fn count(&self) -> i64 {
        1
    }
}

impl Item for Instant {
    fn timestamp(&self) -> Instant {
        *self
    }
}

impl Item for (Instant, i64) {
    fn timestamp(&self) -> Instant {
        self.0
    }

    fn count(&self) -> i64 {
        self.1
    }
}

impl<I> Item for &I
where
    I: Item,
{
    fn timestamp(&self) -> Instant {
        (*self).timestamp()
    }

    fn count(&self) -> i64 {
        (*self).count()
    }
}

/// Seconds (including fractional time) from `earlier` to `later`; negative when `later` precedes `earlier`.
pub(crate) fn signed_secs(later: Instant, earlier: Instant) -> f64 {
    later
        .checked_duration_since(earlier)
        .as_ref()
        .map(Duration::as_secs_f64)
        .unwrap_or_else(|| -1.0 * earlier.duration_since(later).as_secs_f64())
}

/// The elapsed time from `from` to `to` measured in units of `tau`.
///
/// A missing timestamp is the epoch, infinitely far in the past.
pub(crate) fn elapsed_ratio(from: Option<Instant>, to: Option<Instant>, tau: Duration) -> f64 {
    match (from, to) {
        (Some(from), Some(to)) => signed_secs(to, from) / tau.as_secs_f64(),
        (None, Some(_)) => f64::INFINITY,
        (Some(_), None) => f64::NEG_INFINITY,
        (None, None) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        let now = Instant::now();

        assert_eq!(now.count(), 1);
        assert_eq!((now, 5).count(), 5);
        assert_eq!((&(now, -2)).count(), -2);
        assert_eq!((now, 5).timestamp(), now);
    }

    #[test]
    fn signed() {
        let now = Instant::now();
        let later = now + Duration::from_millis(1500);

        assert_eq!(signed_secs(later, now), 1.5);
        assert_eq!(signed_secs(now, later), -1.5);
        assert_eq!(signed_secs(now, now), 0.0);
    }

    #[test]
    fn ratio() {
        let now = Instant::now();
        let tau = Duration::from_secs(10);

        assert_eq!(elapsed_ratio(Some(now), Some(now + Duration::from_secs(5)), tau), 0.5);
        assert_eq!(elapsed_ratio(Some(now + Duration::from_secs(5)), Some(now), tau), -0.5);
        assert_eq!(elapsed_ratio(None, Some(now), tau), f64::INFINITY);
        assert_eq!(elapsed_ratio(Some(now), None, tau), f64::NEG_INFINITY);
        assert_eq!(elapsed_ratio(None, None, tau), 0.0);
    }

    #[test]
    fn zero_tau() {
        let now = Instant::now();
        let ratio = elapsed_ratio(Some(now), Some(now + Duration::from_secs(1)), Duration::ZERO);

        assert_eq!(ratio, f64::INFINITY);
    }
}
