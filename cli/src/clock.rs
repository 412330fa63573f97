use std::time::Duration;

use minefield_core::{MinePlacer, Session};
use web_time::Instant;

/// Turns wall-clock time into whole-second session ticks.
///
/// The session only counts ticks, so the driver delivers any full seconds that
/// passed since the previous delivery before each command is applied.
#[derive(Debug)]
pub(crate) struct TickDriver {
    last_tick: Instant,
}

impl TickDriver {
    pub(crate) fn start() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(last_tick: Instant) -> Self {
        Self { last_tick }
    }

    pub(crate) fn catch_up<P: MinePlacer>(&mut self, session: &mut Session<P>) -> u64 {
        self.catch_up_at(session, Instant::now())
    }

    fn catch_up_at<P: MinePlacer>(&mut self, session: &mut Session<P>, now: Instant) -> u64 {
        let whole_secs = now.saturating_duration_since(self.last_tick).as_secs();
        self.last_tick += Duration::from_secs(whole_secs);

        let mut delivered = 0;
        while delivered < whole_secs && session.tick() {
            delivered += 1;
        }
        delivered
    }
}
