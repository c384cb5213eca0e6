//! Scripted shepherd for headless runs: every few seconds it selects the
//! whole herd and sends it to a random point.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use shepherd_core::commands::PlayerCommand;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: ChaCha8Rng,
    interval: f32,
    next_order_at: f32,
    margin: f32,
}

impl Autopilot {
    pub fn new(seed: u64, interval: f32, margin: f32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            interval,
            next_order_at: 0.0,
            margin,
        }
    }

    /// Orders due at `elapsed` seconds of game time. Empty until the next order is due.
    pub fn orders(&mut self, elapsed: f32, world_size: Vec2) -> Vec<PlayerCommand> {
        if elapsed < self.next_order_at {
            return Vec::new();
        }
        self.next_order_at = elapsed + self.interval;

        let low = Vec2::splat(self.margin).min(world_size / 2.0);
        let high = (world_size - low).max(low);
        let target = Vec2::new(
            self.pick(low.x, high.x),
            self.pick(low.y, high.y),
        );
        tracing::debug!(x = target.x, y = target.y, "autopilot order");
        vec![
            PlayerCommand::SelectAll,
            PlayerCommand::MoveSelected { target },
        ]
    }

    fn pick(&mut self, low: f32, high: f32) -> f32 {
        if high > low {
            self.rng.gen_range(low..high)
        } else {
            low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_follow_interval() {
        let world = Vec2::new(1280.0, 720.0);
        let mut pilot = Autopilot::new(1, 3.0, 50.0);

        let first = pilot.orders(0.0, world);
        assert_eq!(first.len(), 2);
        assert!(matches!(first[0], PlayerCommand::SelectAll));
        match first[1] {
            PlayerCommand::MoveSelected { target } => {
                assert!(target.x >= 50.0 && target.x <= 1230.0);
                assert!(target.y >= 50.0 && target.y <= 670.0);
            }
            ref other => panic!("unexpected {other:?}"),
        }

        assert!(pilot.orders(1.0, world).is_empty());
        assert!(pilot.orders(2.9, world).is_empty());
        assert_eq!(pilot.orders(3.0, world).len(), 2);
    }
}
