use rand::Rng;
use serde::{Deserialize, Serialize};

/// 宝タイルを踏んだ時に起こるランダムイベント。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SeaEvent {
    Treasure,
    Ambush,
    Storm,
    Trader,
}

impl SeaEvent {
    pub const ALL: [SeaEvent; 4] = [
        SeaEvent::Treasure,
        SeaEvent::Ambush,
        SeaEvent::Storm,
        SeaEvent::Trader,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// イベント発生時の見出し。効果の説明は呼び出し側で追記する。
    pub fn message(&self) -> &'static str {
        match self {
            SeaEvent::Treasure => "You found hidden treasure!",
            SeaEvent::Ambush => "Pirates ambush you!",
            SeaEvent::Storm => "A storm hits! Visibility is reduced.",
            SeaEvent::Trader => "You encounter a friendly trader.",
        }
    }
}
