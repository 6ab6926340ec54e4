use std::time::Duration;

/// Frame clock handed to every component tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Time {
    pub delta: Duration,
    pub total: Duration,
    pub frame: u64,
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.total += delta;
        self.frame += 1;
    }

    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_accumulates() {
        let mut time = Time::new();
        time.advance(Duration::from_millis(10));
        time.advance(Duration::from_millis(20));
        assert_eq!(time.frame, 2);
        assert_eq!(time.delta, Duration::from_millis(20));
        assert_eq!(time.total, Duration::from_millis(30));
    }
}
