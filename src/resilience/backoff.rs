//! Retry policy and exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry that follows failed attempt `attempt` (1-based),
    /// without jitter: `base * 2^(attempt - 1)`, capped at `max_delay_ms`.
    pub fn nominal_delay_ms(&self, attempt: u32) -> u64 {
        let Some(doublings) = attempt.checked_sub(1) else {
            return 0;
        };
        let factor = 1u64.checked_shl(doublings).unwrap_or(u64::MAX);
        self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms)
    }

    /// Nominal delay plus up to 10% random jitter.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let nominal = self.nominal_delay_ms(attempt);
        let jitter = rand::thread_rng().gen_range(0..=nominal / 10);
        Duration::from_millis(nominal.saturating_add(jitter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(base_delay_ms: u64, max_delay_ms: u64) -> RetryPolicy {
        RetryPolicy {
            max_attempts: 5,
            base_delay_ms,
            max_delay_ms,
        }
    }

    #[test]
    fn test_nominal_delay_doubles_then_caps() {
        let p = policy(100, 1000);
        let delays: Vec<u64> = (0..=6).map(|a| p.nominal_delay_ms(a)).collect();
        assert_eq!(delays, vec![0, 100, 200, 400, 800, 1000, 1000]);
    }

    #[test]
    fn test_huge_attempt_does_not_overflow() {
        assert_eq!(policy(u64::MAX, 5000).nominal_delay_ms(200), 5000);
        assert_eq!(policy(3, u64::MAX).nominal_delay_ms(64), u64::MAX);
    }

    #[test]
    fn test_jitter_stays_within_ten_percent() {
        let p = policy(1000, 60_000);
        for attempt in 1..=4 {
            let nominal = p.nominal_delay_ms(attempt) as u128;
            let actual = p.delay_after(attempt).as_millis();
            assert!(actual >= nominal && actual <= nominal + nominal / 10);
        }
        assert_eq!(p.delay_after(0), Duration::ZERO);
    }
}
