/// An 8-bit down-counter decremented at 60 Hz. Holds at zero.
#[derive(Debug, Default)]
pub struct Timer {
    count: u8,
}

impl Timer {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    pub fn set(&mut self, value: u8) {
        self.count = value;
    }

    pub fn get(&self) -> u8 {
        self.count
    }

    pub fn tick(&mut self) {
        self.count = self.count.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_at_zero() {
        let mut timer = Timer::new();
        timer.set(2);
        timer.tick();
        timer.tick();
        timer.tick();
        assert_eq!(timer.get(), 0);
    }
}
