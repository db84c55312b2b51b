use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// 戦闘中にプレイヤーが選べる行動。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PlayerAction {
    Attack,
    Repair,
    Evade,
}

impl FromStr for PlayerAction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attack" => Ok(PlayerAction::Attack),
            "repair" => Ok(PlayerAction::Repair),
            "evade" => Ok(PlayerAction::Evade),
            _ => Err(GameError::UnknownAction(s.to_owned())),
        }
    }
}

impl std::fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlayerAction::Attack => "attack",
            PlayerAction::Repair => "repair",
            PlayerAction::Evade => "evade",
        };
        write!(f, "{}", s)
    }
}

/// 敵の行動。攻撃か修理の二択。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EnemyAction {
    Attack,
    Repair,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!("attack".parse::<PlayerAction>(), Ok(PlayerAction::Attack));
        assert_eq!(" Repair ".parse::<PlayerAction>(), Ok(PlayerAction::Repair));
        assert_eq!("EVADE".parse::<PlayerAction>(), Ok(PlayerAction::Evade));
        assert_eq!(
            "board".parse::<PlayerAction>(),
            Err(GameError::UnknownAction("board".to_owned()))
        );
    }
}
