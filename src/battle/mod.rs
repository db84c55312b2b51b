mod action;
mod buffs;
mod damage;

pub use action::{EnemyAction, PlayerAction};
pub use buffs::{Buff, TemporaryBuffs};

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::fleet::{HitOutcome, Ship};
use crate::status::StatusLog;
use damage::roll_damage;

/// プレイヤーの行動結果。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "action")]
pub enum PlayerTurn {
    Attack { damage: u16, outcome: HitOutcome },
    Repair { amount: u16 },
    /// 修理の待機中だった。`remaining` はあと何ラウンド待つか。
    RepairOnCooldown { remaining: u8 },
    Evade { evasion: u16 },
    /// 解釈できない行動。何もせずにターンを失う。
    Idle,
}

/// 敵の行動結果。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "action")]
pub enum EnemyTurn {
    Attack { damage: u16, outcome: HitOutcome },
    Repair { amount: u16 },
}

/// 1 ラウンド分の結果。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoundReport {
    pub round: u32,
    pub player_turn: PlayerTurn,
    /// 敵が撃沈された場合は `None`。
    pub enemy_turn: Option<EnemyTurn>,
    pub enemy_defeated: bool,
    pub player_destroyed: bool,
}

// 1 回の遭遇戦の進行を管理する構造体
#[derive(Debug, Clone)]
pub struct Combat {
    enemy: Ship,
    round: u32,
    player_repair_cooldown: u8,
    enemy_repair_cooldown: u8,
}

impl Combat {
    pub fn new(enemy: Ship) -> Self {
        Self {
            enemy,
            round: 0,
            player_repair_cooldown: 0,
            enemy_repair_cooldown: 0,
        }
    }

    pub fn enemy(&self) -> &Ship {
        &self.enemy
    }

    #[cfg(test)]
    pub(crate) fn enemy_mut(&mut self) -> &mut Ship {
        &mut self.enemy
    }

    /// 解決済みのラウンド数。
    pub fn round(&self) -> u32 {
        self.round
    }

    /// プレイヤーの行動、続いて (撃沈されていなければ) 敵の行動を解決する。
    /// `action` が `None` のときプレイヤーはターンを失う。
    /// 一時補正の解除は呼び出し側のラウンド終了処理で行う。
    pub fn resolve_round<R: Rng + ?Sized>(
        &mut self,
        player: &mut Ship,
        buffs: &mut TemporaryBuffs,
        action: Option<PlayerAction>,
        config: &GameConfig,
        status: &mut StatusLog,
        rng: &mut R,
    ) -> RoundReport {
        self.round += 1;
        self.player_repair_cooldown = self.player_repair_cooldown.saturating_sub(1);
        self.enemy_repair_cooldown = self.enemy_repair_cooldown.saturating_sub(1);

        let player_turn = self.player_turn(player, buffs, action, config, status, rng);
        let mut summary = match player_turn {
            PlayerTurn::Attack {
                damage,
                outcome: HitOutcome::Hit { .. },
            } => format!("You attacked and dealt {damage} damage! "),
            PlayerTurn::Attack {
                outcome: HitOutcome::Evaded,
                ..
            } => format!("You attacked but {} slipped away! ", self.enemy.name()),
            PlayerTurn::Repair { amount } => {
                format!("You repaired your ship for {amount} health! ")
            }
            PlayerTurn::RepairOnCooldown { remaining } => {
                format!("Repair is on cooldown for {remaining} more turns. ")
            }
            PlayerTurn::Evade { evasion } => {
                format!("You take evasive action! Evasion is now {evasion}. ")
            }
            PlayerTurn::Idle => "Unknown action. ".to_owned(),
        };

        let enemy_turn = if self.enemy.is_destroyed() {
            None
        } else {
            let turn = self.enemy_turn(player, config, status, rng);
            summary += &match turn {
                EnemyTurn::Attack {
                    damage,
                    outcome: HitOutcome::Hit { .. },
                } => format!("The enemy attacked and dealt {damage} damage!"),
                EnemyTurn::Attack {
                    outcome: HitOutcome::Evaded,
                    ..
                } => "The enemy attacked but missed!".to_owned(),
                EnemyTurn::Repair { amount } => {
                    format!("The enemy repaired for {amount} health!")
                }
            };
            Some(turn)
        };
        status.append(summary.trim_end());

        let report = RoundReport {
            round: self.round,
            player_turn,
            enemy_turn,
            enemy_defeated: self.enemy.is_destroyed(),
            player_destroyed: player.is_destroyed(),
        };
        debug!("Round report: {report:?}");
        report
    }

    fn player_turn<R: Rng + ?Sized>(
        &mut self,
        player: &mut Ship,
        buffs: &mut TemporaryBuffs,
        action: Option<PlayerAction>,
        config: &GameConfig,
        status: &mut StatusLog,
        rng: &mut R,
    ) -> PlayerTurn {
        let Some(action) = action else {
            return PlayerTurn::Idle;
        };
        match action {
            PlayerAction::Attack => {
                let damage = roll_damage(player.attack_power(), rng);
                let outcome = self.enemy.take_damage(damage, rng);
                push_hit_log(status, &self.enemy, outcome);
                PlayerTurn::Attack { damage, outcome }
            }
            PlayerAction::Repair if self.player_repair_cooldown > 0 => {
                PlayerTurn::RepairOnCooldown {
                    remaining: self.player_repair_cooldown,
                }
            }
            PlayerAction::Repair => {
                let amount = player.repair(repair_cap(config, rng));
                self.player_repair_cooldown = config.repair_cooldown;
                status.append(format!("{} repairs for {amount} health!", player.name()));
                PlayerTurn::Repair { amount }
            }
            PlayerAction::Evade => {
                buffs.apply_evasive(player, config.evade_bonus);
                PlayerTurn::Evade {
                    evasion: player.evasion(),
                }
            }
        }
    }

    fn enemy_turn<R: Rng + ?Sized>(
        &mut self,
        player: &mut Ship,
        config: &GameConfig,
        status: &mut StatusLog,
        rng: &mut R,
    ) -> EnemyTurn {
        // 修理の待機中なら攻撃に切り替える
        let action = if rng.random_bool(config.enemy_repair_chance)
            && self.enemy_repair_cooldown == 0
        {
            EnemyAction::Repair
        } else {
            EnemyAction::Attack
        };
        match action {
            EnemyAction::Attack => {
                let damage = roll_damage(self.enemy.attack_power(), rng);
                let outcome = player.take_damage(damage, rng);
                push_hit_log(status, player, outcome);
                EnemyTurn::Attack { damage, outcome }
            }
            EnemyAction::Repair => {
                let amount = self.enemy.repair(repair_cap(config, rng));
                self.enemy_repair_cooldown = config.repair_cooldown;
                status.append(format!("{} repairs for {amount} health!", self.enemy.name()));
                EnemyTurn::Repair { amount }
            }
        }
    }
}

/// 戦闘中の修理上限。`repair_range` があればその範囲で振る。
fn repair_cap<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> u16 {
    match config.repair_range {
        Some(range) => rng.random_range(range.min..=range.max),
        None => config.repair_amount,
    }
}

fn push_hit_log(status: &mut StatusLog, target: &Ship, outcome: HitOutcome) {
    match outcome {
        HitOutcome::Evaded => status.append(format!("{} evades the attack!", target.name())),
        HitOutcome::Hit { damage, health } => status.append(format!(
            "{} takes {damage} damage! Current health: {health}",
            target.name()
        )),
    }
}
