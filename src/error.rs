use thiserror::Error;

use crate::map::Position;

/// プレイヤー操作が拒否された理由。
/// `Display` の文言はそのままステータス欄に表示される。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("You are in combat! Finish the fight before moving on.")]
    InCombat,
    #[error("You are not in combat.")]
    NotInCombat,
    #[error("Game over! Reload to play again.")]
    GameOver,
    #[error("There is no tile at {0}.")]
    OutOfBounds(Position),
    #[error("You can only move to neighboring tiles of revealed tiles.")]
    Unreachable,
    #[error("This tile has already been used.")]
    TileUsed,
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("map layout needs {expected} tiles but {actual} were given")]
    InvalidLayout { expected: usize, actual: usize },
}
