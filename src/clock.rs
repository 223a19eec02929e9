use std::time::Duration;

pub const TIMER_HZ: u32 = 60;
pub const DEFAULT_IPS: u32 = 700;

/// How many instruction cycles and timer ticks are due this pass.
#[derive(Debug, PartialEq, Eq)]
pub struct Batch {
    pub cycles: u32,
    pub timer_ticks: u32,
}

/// Converts elapsed wall-clock time into whole instruction cycles and 60 Hz
/// timer ticks. Each rate keeps its own remainder so neither drifts and
/// neither depends on how often the host calls in.
pub struct Clock {
    cycle_period: Duration,
    timer_period: Duration,
    cycle_debt: Duration,
    timer_debt: Duration,
}

impl Clock {
    pub fn new(ips: u32) -> Self {
        Self {
            cycle_period: Duration::from_secs(1) / ips.max(1),
            timer_period: Duration::from_secs(1) / TIMER_HZ,
            cycle_debt: Duration::ZERO,
            timer_debt: Duration::ZERO,
        }
    }

    /// Account for `elapsed` time and return the work that became due.
    pub fn advance(&mut self, elapsed: Duration) -> Batch {
        self.cycle_debt += elapsed;
        self.timer_debt += elapsed;
        Batch {
            cycles: Self::drain(&mut self.cycle_debt, self.cycle_period),
            timer_ticks: Self::drain(&mut self.timer_debt, self.timer_period),
        }
    }

    /// Time until something is next due, so the host can sleep instead of
    /// spinning.
    pub fn until_next_due(&self) -> Duration {
        let cycle = self.cycle_period.saturating_sub(self.cycle_debt);
        let timer = self.timer_period.saturating_sub(self.timer_debt);
        cycle.min(timer)
    }

    fn drain(debt: &mut Duration, period: Duration) -> u32 {
        let due = (debt.as_nanos() / period.as_nanos()) as u32;
        *debt -= period * due;
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rates_are_independent() {
        let mut clock = Clock::new(120);
        let batch = clock.advance(Duration::from_millis(1000));
        assert_eq!(batch.cycles, 120);
        assert_eq!(batch.timer_ticks, 60);
    }

    #[test]
    fn remainder_carries_over() {
        let mut clock = Clock::new(100);
        // 15ms at 100 ips is one cycle with 5ms left over
        let batch = clock.advance(Duration::from_millis(15));
        assert_eq!(batch.cycles, 1);
        // another 5ms completes the next period
        let batch = clock.advance(Duration::from_millis(5));
        assert_eq!(batch.cycles, 1);
    }

    #[test]
    fn nothing_due_before_a_full_period() {
        let mut clock = Clock::new(100);
        let batch = clock.advance(Duration::from_millis(9));
        assert_eq!(batch, Batch { cycles: 0, timer_ticks: 0 });
        assert_eq!(clock.until_next_due(), Duration::from_millis(1));
    }
}
