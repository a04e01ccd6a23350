//! Shared positions owned by the scene and read by the engine

use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;

/// A position the scene keeps up to date (a player, a charging weapon) that
/// homing particles and following emitters read every frame.
///
/// Cloning shares the same underlying point.
#[derive(Clone, Debug, Default)]
pub struct TrackedPoint(Rc<Cell<Vec2>>);

impl TrackedPoint {
    pub fn new(position: Vec2) -> Self {
        Self(Rc::new(Cell::new(position)))
    }

    pub fn get(&self) -> Vec2 {
        self.0.get()
    }

    pub fn set(&self, position: Vec2) {
        self.0.set(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_position() {
        let player = TrackedPoint::new(Vec2::ZERO);
        let seen_by_engine = player.clone();
        player.set(Vec2::new(3.0, 4.0));
        assert_eq!(seen_by_engine.get(), Vec2::new(3.0, 4.0));
        seen_by_engine.set(Vec2::new(-1.0, 0.0));
        assert_eq!(player.get(), Vec2::new(-1.0, 0.0));
    }
}
