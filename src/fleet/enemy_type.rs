use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::fleet::ship::{Ship, MAX_EVASION};

/// 敵艦の特殊能力。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SpecialAbility {
    HighEvasion,
    Balanced,
    HeavyAttack,
}

impl SpecialAbility {
    /// 戦闘開始時に表示するヒント。特に無い場合は `None`。
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SpecialAbility::HighEvasion => Some("This enemy is quick and hard to hit!"),
            SpecialAbility::HeavyAttack => {
                Some("This enemy has heavy cannons and deals more damage!")
            }
            SpecialAbility::Balanced => None,
        }
    }
}

/// 敵艦の雛形。テーブル自体は不変で、生成時に能力補正を適用したコピーを作る。
#[derive(Debug, Clone, Copy)]
pub struct EnemyType {
    pub name: &'static str,
    pub health: u16,
    pub attack_power: u16,
    pub evasion: u16,
    pub special_ability: SpecialAbility,
    pub emoji: &'static str,
    pub color: &'static str,
}

pub const ENEMY_TYPES: [EnemyType; 3] = [
    EnemyType {
        name: "Schooner",
        health: 50,
        attack_power: 10,
        evasion: 30,
        special_ability: SpecialAbility::HighEvasion,
        emoji: "⛵",
        color: "#ff7f50",
    },
    EnemyType {
        name: "Frigate",
        health: 80,
        attack_power: 15,
        evasion: 15,
        special_ability: SpecialAbility::Balanced,
        emoji: "🚤",
        color: "#ff6347",
    },
    EnemyType {
        name: "Man-of-War",
        health: 120,
        attack_power: 25,
        evasion: 5,
        special_ability: SpecialAbility::HeavyAttack,
        emoji: "🚢",
        color: "#ff4500",
    },
];

impl EnemyType {
    /// 能力補正を一度だけ適用した艦船を生成する。
    pub fn spawn(&self) -> Ship {
        let (attack_power, evasion) = match self.special_ability {
            SpecialAbility::HighEvasion => (self.attack_power, self.evasion + 10),
            SpecialAbility::HeavyAttack => (self.attack_power + 5, self.evasion),
            SpecialAbility::Balanced => (self.attack_power, self.evasion),
        };
        Ship::new(
            self.name,
            self.health,
            attack_power,
            evasion.min(MAX_EVASION),
            Some(self.special_ability),
            self.emoji,
            self.color,
        )
    }
}

pub fn create_random_enemy<R: Rng + ?Sized>(rng: &mut R) -> Ship {
    let idx = rng.random_range(0..ENEMY_TYPES.len());
    ENEMY_TYPES[idx].spawn()
}
