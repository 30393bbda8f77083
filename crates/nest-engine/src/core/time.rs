/// Fixed-rate tick clock.
///
/// The host reports wall-clock frame deltas; the field always advances in
/// whole ticks (velocities are in units per tick), so motion speed does not
/// depend on the display refresh rate.
#[derive(Debug, Clone)]
pub struct TickClock {
    /// Seconds per tick.
    dt: f32,
    /// Unspent frame time.
    accumulator: f32,
    max_ticks: u32,
}

impl TickClock {
    pub fn new(dt: f32, max_ticks: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_ticks: max_ticks.max(1),
        }
    }

    /// Add a frame delta (seconds) and return how many ticks to run.
    /// Negative or non-finite deltas count as zero; a long stall is capped at
    /// `max_ticks` and the excess dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        self.accumulator = self.accumulator.min(self.dt * self.max_ticks as f32);
        let ticks = (self.accumulator / self.dt) as u32;
        self.accumulator -= ticks as f32 * self.dt;
        ticks
    }

    /// Drop any accumulated time (used when the loop restarts).
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tick_per_refresh_at_sixty_hz() {
        let mut clock = TickClock::new(1.0 / 60.0, 10);
        assert_eq!(clock.advance(1.0 / 60.0), 1);
    }

    #[test]
    fn partial_frames_accumulate() {
        let mut clock = TickClock::new(1.0 / 60.0, 10);
        assert_eq!(clock.advance(0.008), 0);
        assert_eq!(clock.advance(0.010), 1);
    }

    #[test]
    fn stall_is_capped() {
        let mut clock = TickClock::new(1.0 / 60.0, 4);
        assert_eq!(clock.advance(5.0), 4);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn bogus_deltas_are_ignored() {
        let mut clock = TickClock::new(1.0 / 60.0, 10);
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(f32::INFINITY), 0);
        assert_eq!(clock.advance(1.0 / 60.0), 1);
    }

    #[test]
    fn reset_drops_accumulated_time() {
        let mut clock = TickClock::new(1.0 / 60.0, 10);
        clock.advance(0.015);
        clock.reset();
        assert_eq!(clock.advance(0.005), 0);
        assert_eq!(clock.advance(0.010), 0);
        assert_eq!(clock.advance(0.002), 1);
    }
}
