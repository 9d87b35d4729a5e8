//! Fixed-period scheduler driving `World::step`

use std::thread;
use std::time::{Duration, Instant};

use ball_simulation::World;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickerStats {
    pub ticks: u64,
    /// Triggers dropped because a tick overran its period
    pub coalesced: u64,
}

pub struct Ticker {
    period: Duration,
}

impl Ticker {
    /// A zero period runs ticks back to back
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Step `world` once per period, handing it to `on_tick` after each
    /// step. Runs `ticks` times, or forever for `None`.
    ///
    /// A step that overruns does not queue catch-up ticks: the missed
    /// triggers are dropped and the schedule restarts from now.
    pub fn run<F>(&self, world: &mut World, ticks: Option<u64>, mut on_tick: F) -> TickerStats
    where
        F: FnMut(&World),
    {
        let mut stats = TickerStats::default();
        let mut deadline = Instant::now() + self.period;

        while ticks.map_or(true, |limit| stats.ticks < limit) {
            world.step();
            on_tick(world);
            stats.ticks += 1;

            if self.period.is_zero() {
                continue;
            }

            let now = Instant::now();
            if now < deadline {
                thread::sleep(deadline - now);
                deadline += self.period;
            } else {
                let missed = ((now - deadline).as_nanos() / self.period.as_nanos()) as u64;
                if missed > 0 {
                    log::warn!("tick {} overran, dropping {} triggers", world.tick(), missed);
                    stats.coalesced += missed;
                }
                deadline = now + self.period;
            }
        }

        stats
    }
}
