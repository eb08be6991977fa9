//! Game modes and the policy each one implies
//!
//! The tick never matches on `GameMode` directly; it asks the `ModePolicy`
//! at the handful of points where modes differ.

use serde::{Deserialize, Serialize};

use crate::consts::{BRICK_TOP_MARGIN, BRICK_TOP_MARGIN_TWO_FACE};

/// Mode chosen from the menu, fixed for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// One paddle, hit bricks vanish
    Basic,
    /// One paddle, hit bricks fall and can cost a life
    Advanced,
    /// Paddles top and bottom, both edges lose a life, hit bricks fall
    TwoFace,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Basic, GameMode::Advanced, GameMode::TwoFace];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Basic => "Basic",
            GameMode::Advanced => "Advanced",
            GameMode::TwoFace => "Two-Face",
        }
    }

    /// Menu entry label
    pub fn menu_label(&self) -> &'static str {
        match self {
            GameMode::Basic => "Basic Mode",
            GameMode::Advanced => "Advanced Mode",
            GameMode::TwoFace => "Two-Face Mode",
        }
    }

    pub fn policy(&self) -> ModePolicy {
        match self {
            GameMode::Basic => ModePolicy {
                top_paddle: false,
                bricks_fall: false,
                top_edge: TopEdge::Wall,
                brick_top_margin: BRICK_TOP_MARGIN,
            },
            GameMode::Advanced => ModePolicy {
                top_paddle: false,
                bricks_fall: true,
                top_edge: TopEdge::Wall,
                brick_top_margin: BRICK_TOP_MARGIN,
            },
            GameMode::TwoFace => ModePolicy {
                top_paddle: true,
                bricks_fall: true,
                top_edge: TopEdge::Goal,
                brick_top_margin: BRICK_TOP_MARGIN_TWO_FACE,
            },
        }
    }
}

/// What happens when the ball reaches the top of the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopEdge {
    /// Ball bounces back down
    Wall,
    /// Ball is lost unless the top paddle returns it
    Goal,
}

/// Mode-dependent decisions consulted by the grid builder and the tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModePolicy {
    /// Second paddle along the top edge, mirroring the bottom paddle's input
    pub top_paddle: bool,
    /// Hit bricks detach and fall instead of vanishing
    pub bricks_fall: bool,
    pub top_edge: TopEdge,
    /// Vertical offset of the first brick row
    pub brick_top_margin: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_policy() {
        let p = GameMode::Basic.policy();
        assert!(!p.top_paddle);
        assert!(!p.bricks_fall);
        assert_eq!(p.top_edge, TopEdge::Wall);
    }

    #[test]
    fn test_advanced_policy() {
        let p = GameMode::Advanced.policy();
        assert!(!p.top_paddle);
        assert!(p.bricks_fall);
        assert_eq!(p.top_edge, TopEdge::Wall);
    }

    #[test]
    fn test_two_face_policy_reserves_top_margin() {
        let p = GameMode::TwoFace.policy();
        assert!(p.top_paddle);
        assert!(p.bricks_fall);
        assert_eq!(p.top_edge, TopEdge::Goal);
        assert!(p.brick_top_margin > GameMode::Basic.policy().brick_top_margin);
    }
}
