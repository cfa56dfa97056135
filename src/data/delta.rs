use std::time::Instant;

/// Frame timer. Long stalls are clamped to one second.
pub struct Delta {
    last_call: Instant,
}

impl Delta {
    pub fn new() -> Self {
        Self {
            last_call: Instant::now(),
        }
    }

    pub fn reset(&mut self) {
        self.last_call = Instant::now();
    }

    /// Seconds since the previous call.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_call);
        self.last_call = now;
        elapsed.as_secs_f32().clamp(0.0, 1.0)
    }
}

impl Default for Delta {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_bounded() {
        let mut delta = Delta::default();
        let first = delta.tick();
        assert!((0.0..=1.0).contains(&first));

        delta.last_call -= std::time::Duration::from_secs(5);
        assert_eq!(delta.tick(), 1.0);

        delta.reset();
        assert!(delta.tick() < 1.0);
    }
}
