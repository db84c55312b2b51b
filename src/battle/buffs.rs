use serde::{Deserialize, Serialize};

use crate::fleet::Ship;

/// 一時的な補正の種類。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Buff {
    /// 嵐による回避上昇。次の戦闘ラウンド終了まで有効。
    Storm,
    /// 回避行動。そのラウンドのみ有効。
    Evasive,
}

/// プレイヤー艦にかかっている一時補正。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemporaryBuffs {
    storm: bool,
    evasive: bool,
}

impl TemporaryBuffs {
    pub fn is_active(&self, buff: Buff) -> bool {
        match buff {
            Buff::Storm => self.storm,
            Buff::Evasive => self.evasive,
        }
    }

    /// 嵐補正を付与する。既に有効なら重ねがけせず false を返す。
    pub fn apply_storm(&mut self, ship: &mut Ship, bonus: u16) -> bool {
        if self.storm {
            return false;
        }
        ship.raise_evasion(bonus);
        self.storm = true;
        true
    }

    pub fn apply_evasive(&mut self, ship: &mut Ship, bonus: u16) {
        ship.raise_evasion(bonus);
        self.evasive = true;
    }

    /// ラウンド終了処理。補正を全て解除して基本値に戻し、切れた補正を返す。
    pub fn expire(&mut self, ship: &mut Ship) -> Vec<Buff> {
        let expired = [(Buff::Storm, self.storm), (Buff::Evasive, self.evasive)]
            .into_iter()
            .filter_map(|(buff, active)| active.then_some(buff))
            .collect::<Vec<_>>();
        if !expired.is_empty() {
            ship.reset_stats();
        }
        *self = Self::default();
        expired
    }
}
