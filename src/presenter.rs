//! Text presentation of the running world
//!
//! Stands in for a drawing surface: it only reads the world between ticks
//! and reports through the logger.

use ball_simulation::World;

pub struct TextPresenter {
    /// Body whose coordinates go in the info box
    watch: usize,
    /// Report every this many ticks
    every: u64,
}

impl TextPresenter {
    pub fn new(watch: usize, every: u64) -> Self {
        Self {
            watch,
            every: every.max(1),
        }
    }

    /// Report text for the world's current tick, if this tick is reported
    pub fn report(&self, world: &World) -> Option<String> {
        if world.tick() % self.every != 0 {
            return None;
        }

        let momentum = world.total_momentum();
        let stats = world.last_step();
        let mut text = format!(
            "tick {} | E = {:.4e} | p = ({:.3e}, {:.3e}) | contacts {} | walls {}",
            world.tick(),
            world.total_kinetic_energy(),
            momentum.x,
            momentum.y,
            stats.contacts,
            stats.wall_hits
        );
        if let Some(info) = world.overlay_text(self.watch) {
            text.push_str(&format!("\n[body {}]\n{}", self.watch, info));
        }
        Some(text)
    }

    pub fn present(&self, world: &World) {
        if let Some(text) = self.report(world) {
            for line in text.lines() {
                log::info!("{}", line);
            }
        }
    }
}
