use std::time::Duration;

use rand::Rng;

/// A duration drawn uniformly from `[0, upper)`; zero when `upper` is zero.
pub fn jitter(upper: Duration) -> Duration {
    let upper_ms = upper.as_millis() as u64;
    if upper_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..upper_ms))
}

/// Sleeps for a random duration below `upper_seconds` and returns how long it waited.
pub async fn random_delay_seconds(upper_seconds: u64) -> Duration {
    random_delay(Duration::from_secs(upper_seconds)).await
}

pub async fn random_delay(upper: Duration) -> Duration {
    let wait = jitter(upper);
    if !wait.is_zero() {
        tokio::time::sleep(wait).await;
    }
    wait
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_stays_below_upper_bound() {
        let upper = Duration::from_millis(50);
        for _ in 0..200 {
            assert!(jitter(upper) < upper);
        }
    }

    #[test]
    fn zero_upper_bound_means_no_wait() {
        assert_eq!(jitter(Duration::ZERO), Duration::ZERO);
        assert_eq!(jitter(Duration::from_micros(900)), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn random_delay_sleeps_for_the_chosen_duration() {
        let start = tokio::time::Instant::now();
        let waited = random_delay_seconds(10).await;
        assert!(waited < Duration::from_secs(10));
        assert!(start.elapsed() >= waited);
    }
}
