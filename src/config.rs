use log::warn;
use serde::{Deserialize, Serialize};

use crate::map::{Position, TileKind};

/// 盤面の一辺の上限。これを超える値はデフォルトに戻す。
pub const MAX_MAP_SIZE: usize = 64;

/// 戦闘中の修理量を乱数で決める場合の範囲 (両端を含む)。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepairRange {
    pub min: u16,
    pub max: u16,
}

/// フロントエンドから受け取るゲーム設定。
/// 未指定の項目はデフォルト値で補完される。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub map_size: usize,
    pub start_position: Position,
    /// 開始直後に敵と遭遇するかどうか。
    pub opening_encounter: bool,
    pub repair_amount: u16,
    /// 指定時は戦闘中の修理量を `min..=max` の乱数にする。未指定なら `repair_amount` 固定。
    pub repair_range: Option<RepairRange>,
    /// 修理後に再び修理できるまでのラウンド数。0 なら制限なし。
    pub repair_cooldown: u8,
    pub storm_bonus: u16,
    pub evade_bonus: u16,
    pub enemy_repair_chance: f64,
    pub seed: Option<u64>,
    /// 固定マップ (行優先)。`map_size * map_size` 個必要。
    pub layout: Option<Vec<TileKind>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_size: 5,
            start_position: Position::new(2, 2),
            opening_encounter: true,
            repair_amount: 10,
            repair_range: None,
            repair_cooldown: 0,
            storm_bonus: 10,
            evade_bonus: 20,
            enemy_repair_chance: 0.5,
            seed: None,
            layout: None,
        }
    }
}

impl GameConfig {
    /// 受けとった設定の妥当性を検証し、必要に応じて修正する。
    /// 修正した場合は false を返す。
    pub fn validate(&mut self) -> bool {
        let mut valid = true;
        if self.map_size == 0 || self.map_size > MAX_MAP_SIZE {
            warn!(
                "Map size {} must be between 1 and {MAX_MAP_SIZE}, falling back to default",
                self.map_size
            );
            self.map_size = Self::default().map_size;
            valid = false;
        }
        if self.start_position.x >= self.map_size || self.start_position.y >= self.map_size {
            warn!(
                "Start position {} is outside the {}x{} map, using the center",
                self.start_position, self.map_size, self.map_size
            );
            self.start_position = Position::new(self.map_size / 2, self.map_size / 2);
            valid = false;
        }
        if !(0.0..=1.0).contains(&self.enemy_repair_chance) {
            warn!(
                "Enemy repair chance {} is not a probability, clamping",
                self.enemy_repair_chance
            );
            self.enemy_repair_chance = if self.enemy_repair_chance.is_nan() {
                Self::default().enemy_repair_chance
            } else {
                self.enemy_repair_chance.clamp(0.0, 1.0)
            };
            valid = false;
        }
        if let Some(range) = self.repair_range {
            if range.min > range.max {
                warn!(
                    "Repair range {}..={} is reversed, swapping",
                    range.min, range.max
                );
                self.repair_range = Some(RepairRange {
                    min: range.max,
                    max: range.min,
                });
                valid = false;
            }
        }
        if let Some(layout) = &self.layout {
            let expected = self.map_size.checked_mul(self.map_size);
            if expected != Some(layout.len()) {
                warn!(
                    "Layout has {} tiles but the map needs {:?}, ignoring it",
                    layout.len(),
                    expected
                );
                self.layout = None;
                valid = false;
            }
        }
        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let mut config = GameConfig::default();
        assert!(config.validate());
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"openingEncounter": false, "seed": 42}"#).unwrap();
        assert!(!config.opening_encounter);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.map_size, 5);
        assert_eq!(config.start_position, Position::new(2, 2));
    }

    #[test]
    fn test_validate_corrects_bad_values() {
        let mut config = GameConfig {
            map_size: 3,
            start_position: Position::new(4, 0),
            enemy_repair_chance: 1.5,
            layout: Some(vec![TileKind::Island; 4]),
            ..GameConfig::default()
        };
        assert!(!config.validate());
        assert_eq!(config.start_position, Position::new(1, 1));
        assert_eq!(config.enemy_repair_chance, 1.0);
        assert!(config.layout.is_none());
    }

    #[test]
    fn test_validate_rejects_huge_map_size() {
        let mut config = GameConfig {
            map_size: usize::MAX,
            layout: Some(vec![]),
            ..GameConfig::default()
        };
        assert!(!config.validate());
        assert_eq!(config.map_size, 5);
        assert_eq!(config.start_position, Position::new(2, 2));
        assert!(config.layout.is_none());

        let mut config = GameConfig {
            map_size: MAX_MAP_SIZE,
            start_position: Position::new(0, 0),
            ..GameConfig::default()
        };
        assert!(config.validate());
        assert_eq!(config.map_size, MAX_MAP_SIZE);
    }

    #[test]
    fn test_validate_swaps_reversed_repair_range() {
        let mut config: GameConfig =
            serde_json::from_str(r#"{"repairRange": {"min": 15, "max": 5}, "repairCooldown": 2}"#)
                .unwrap();
        assert!(!config.validate());
        assert_eq!(config.repair_range, Some(RepairRange { min: 5, max: 15 }));
        assert_eq!(config.repair_cooldown, 2);
    }

    #[test]
    fn test_validate_zero_map_size() {
        let mut config = GameConfig {
            map_size: 0,
            ..GameConfig::default()
        };
        assert!(!config.validate());
        assert_eq!(config.map_size, 5);
        assert_eq!(config.start_position, Position::new(2, 2));
    }
}
