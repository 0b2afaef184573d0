use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::config::CONFIG;

/// Fixed-window gate in front of design generation.
#[derive(Debug)]
pub struct GenerationCooldown {
    window: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Default for GenerationCooldown {
    fn default() -> Self {
        GenerationCooldown::new(Duration::from_millis(CONFIG.generation_cooldown_ms))
    }
}

impl GenerationCooldown {
    pub fn new(window: Duration) -> Self {
        GenerationCooldown {
            window,
            last_request: Mutex::new(None),
        }
    }

    /// Records a request at `now` unless one landed inside the window; on
    /// rejection returns the time left.
    pub fn try_acquire_at(&self, now: Instant) -> Result<(), Duration> {
        let mut last = self.last_request.lock();

        if let Some(previous) = *last {
            let elapsed = now.saturating_duration_since(previous);
            if elapsed < self.window {
                let remaining = self.window - elapsed;
                warn!(
                    "Generation rejected by cooldown: remaining_ms={}",
                    remaining.as_millis()
                );
                return Err(remaining);
            }
        }

        *last = Some(now);
        info!("Generation slot acquired (window_ms={})", self.window.as_millis());
        Ok(())
    }

    pub fn try_acquire(&self) -> Result<(), Duration> {
        self.try_acquire_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_request_inside_window_is_rejected() {
        let cooldown = GenerationCooldown::new(Duration::from_millis(2000));
        let start = Instant::now();
        assert!(cooldown.try_acquire_at(start).is_ok());

        let remaining = cooldown
            .try_acquire_at(start + Duration::from_millis(500))
            .expect_err("inside window");
        assert_eq!(remaining, Duration::from_millis(1500));

        assert!(cooldown
            .try_acquire_at(start + Duration::from_millis(2000))
            .is_ok());
    }

    #[test]
    fn rejected_request_does_not_extend_window() {
        let cooldown = GenerationCooldown::new(Duration::from_millis(1000));
        let start = Instant::now();
        assert!(cooldown.try_acquire_at(start).is_ok());
        assert!(cooldown
            .try_acquire_at(start + Duration::from_millis(900))
            .is_err());
        assert!(cooldown
            .try_acquire_at(start + Duration::from_millis(1000))
            .is_ok());
    }

    #[test]
    fn zero_window_never_blocks() {
        let cooldown = GenerationCooldown::new(Duration::ZERO);
        let now = Instant::now();
        assert!(cooldown.try_acquire_at(now).is_ok());
        assert!(cooldown.try_acquire_at(now).is_ok());
    }
}
