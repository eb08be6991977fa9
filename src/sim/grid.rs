//! Brick grid layout and level completion

use super::collision::Rect;
use super::mode::GameMode;
use super::state::{Brick, BrickState};
use crate::consts::*;

/// Number of brick rows for a level (level 1 has two rows)
pub fn rows_for_level(level: u32) -> u32 {
    level + 1
}

/// Lay out `BRICK_COLUMNS x (level + 1)` bricks for a fresh level.
///
/// Pure: the same mode and level always produce the same grid. Bricks are
/// ordered column by column, top to bottom within a column.
pub fn build_grid(mode: GameMode, level: u32) -> Vec<Brick> {
    let policy = mode.policy();
    let rows = rows_for_level(level);
    let mut bricks = Vec::with_capacity((BRICK_COLUMNS * rows) as usize);

    for col in 0..BRICK_COLUMNS {
        for row in 0..rows {
            let rect = Rect::new(
                col as f32 * (BRICK_WIDTH + BRICK_GAP) + BRICK_LEFT_MARGIN,
                row as f32 * (BRICK_HEIGHT + BRICK_GAP) + policy.brick_top_margin,
                BRICK_WIDTH,
                BRICK_HEIGHT,
            );
            bricks.push(Brick::new(rect, policy.bricks_fall));
        }
    }

    bricks
}

/// True once every brick is Removed.
///
/// The tick advances on `no_active_bricks` instead, so bricks still in the
/// air never hold a level open.
pub fn is_level_cleared(bricks: &[Brick]) -> bool {
    bricks.iter().all(|b| b.state == BrickState::Removed)
}

/// True once no brick can be hit by the ball any more
pub fn no_active_bricks(bricks: &[Brick]) -> bool {
    !bricks.iter().any(|b| b.is_active())
}
