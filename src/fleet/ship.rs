use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::fleet::enemy_type::SpecialAbility;

/// 回避率の上限 (%)。
pub const MAX_EVASION: u16 = 100;

/// 海戦に参加する艦船。プレイヤー艦と敵艦の両方を表す。
///
/// `evasion` と `attack_power` は一時的な補正 (嵐、回避行動) で変化するため、
/// 補正前の値を `base_*` に保持し、ラウンド終了時に [`Ship::reset_stats`] で戻す。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    name: String,
    health: u16,
    max_health: u16,
    attack_power: u16,
    base_attack_power: u16,
    evasion: u16,
    base_evasion: u16,
    special_ability: Option<SpecialAbility>,
    emoji: String,
    color: String,
}

/// 1 発の砲撃の結果。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum HitOutcome {
    Evaded,
    Hit { damage: u16, health: u16 },
}

impl Ship {
    pub fn new(
        name: &str,
        health: u16,
        attack_power: u16,
        evasion: u16,
        special_ability: Option<SpecialAbility>,
        emoji: &str,
        color: &str,
    ) -> Self {
        let evasion = evasion.min(MAX_EVASION);
        Self {
            name: name.to_owned(),
            health,
            max_health: health,
            attack_power,
            base_attack_power: attack_power,
            evasion,
            base_evasion: evasion,
            special_ability,
            emoji: emoji.to_owned(),
            color: color.to_owned(),
        }
    }

    /// プレイヤーの旗艦。
    pub fn black_pearl() -> Self {
        Self::new("The Black Pearl", 100, 20, 20, None, "🛥️", "#1e90ff")
    }

    // -- getters --
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn health(&self) -> u16 {
        self.health
    }
    pub fn max_health(&self) -> u16 {
        self.max_health
    }
    pub fn attack_power(&self) -> u16 {
        self.attack_power
    }
    pub fn evasion(&self) -> u16 {
        self.evasion
    }
    pub fn special_ability(&self) -> Option<SpecialAbility> {
        self.special_ability
    }
    pub fn emoji(&self) -> &str {
        &self.emoji
    }
    pub fn color(&self) -> &str {
        &self.color
    }

    /// 体力バー表示用の割合 (0.0 ~ 100.0)。
    pub fn health_percentage(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f64 / self.max_health as f64 * 100.0
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }

    /// 被弾処理。`random[0, 1) * 100 < evasion` なら回避、それ以外は体力を減らす (0 で下げ止まり)。
    pub fn take_damage<R: Rng + ?Sized>(&mut self, damage: u16, rng: &mut R) -> HitOutcome {
        let r: f64 = rng.random();
        if r * 100.0 < self.evasion as f64 {
            return HitOutcome::Evaded;
        }
        self.health = self.health.saturating_sub(damage);
        HitOutcome::Hit {
            damage,
            health: self.health,
        }
    }

    /// 最大体力を超えない範囲で最大 `cap` だけ回復し、実際の回復量を返す。
    pub fn repair(&mut self, cap: u16) -> u16 {
        let amount = cap.min(self.max_health - self.health);
        self.health += amount;
        amount
    }

    pub fn raise_evasion(&mut self, bonus: u16) {
        self.evasion = self.evasion.saturating_add(bonus).min(MAX_EVASION);
    }

    /// 一時的な補正をすべて解除する。
    pub fn reset_stats(&mut self) {
        self.evasion = self.base_evasion;
        self.attack_power = self.base_attack_power;
    }

    #[cfg(test)]
    pub(crate) fn set_evasion_for_test(&mut self, evasion: u16) {
        self.evasion = evasion;
        self.base_evasion = evasion;
    }

    #[cfg(test)]
    pub(crate) fn set_health_for_test(&mut self, health: u16) {
        self.health = health.min(self.max_health);
    }
}
