use log::{debug, error, info};
use rand::Rng;

use crate::battle::{Buff, Combat, PlayerAction, RoundReport, TemporaryBuffs};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::events::SeaEvent;
use crate::fleet::{create_random_enemy, Ship};
use crate::map::{Position, SeaMap, TileKind};
use crate::status::StatusLog;

/// ゲームの進行状態。
#[derive(Debug, Clone)]
pub enum GameState {
    Exploration,
    Combat(Combat),
    /// プレイヤー艦が沈没した。`restart` するまで何も受け付けない。
    GameOver,
}

/// 探索と戦闘を行き来する状態機械。乱数源は差し替え可能。
#[derive(Debug)]
pub struct Game<R: Rng> {
    config: GameConfig,
    rng: R,
    map: SeaMap,
    player: Ship,
    position: Position,
    state: GameState,
    buffs: TemporaryBuffs,
    status: StatusLog,
}

impl<R: Rng> Game<R> {
    pub fn new(mut config: GameConfig, mut rng: R) -> Self {
        config.validate();
        let map = build_map(&config, &mut rng);
        let mut game = Self {
            position: config.start_position,
            config,
            rng,
            map,
            player: Ship::black_pearl(),
            state: GameState::Exploration,
            buffs: TemporaryBuffs::default(),
            status: StatusLog::new(),
        };
        game.set_sail();
        game
    }

    /// 同じ設定で新しい航海を始める。
    pub fn restart(&mut self) {
        info!("Restarting voyage");
        self.map = build_map(&self.config, &mut self.rng);
        self.player = Ship::black_pearl();
        self.position = self.config.start_position;
        self.state = GameState::Exploration;
        self.buffs = TemporaryBuffs::default();
        self.status.replace("A new voyage begins.");
        self.set_sail();
    }

    // 開始地点と隣接タイルを公開し、必要なら最初の遭遇戦を始める
    fn set_sail(&mut self) {
        self.map.reveal(self.position);
        self.map.reveal_neighbors(self.position);
        info!(
            "Voyage started at {} on a {}x{} map",
            self.position,
            self.map.size(),
            self.map.size()
        );
        if self.config.opening_encounter {
            let enemy = create_random_enemy(&mut self.rng);
            self.start_combat(enemy);
        }
        self.status.flush_debug();
    }

    // -- getters --
    pub fn map(&self) -> &SeaMap {
        &self.map
    }
    pub fn player(&self) -> &Ship {
        &self.player
    }
    pub fn position(&self) -> Position {
        self.position
    }
    pub fn state(&self) -> &GameState {
        &self.state
    }
    pub fn status(&self) -> &StatusLog {
        &self.status
    }
    pub fn is_buff_active(&self, buff: Buff) -> bool {
        self.buffs.is_active(buff)
    }
    pub fn enemy(&self) -> Option<&Ship> {
        match &self.state {
            GameState::Combat(combat) => Some(combat.enemy()),
            _ => None,
        }
    }
    pub fn is_in_combat(&self) -> bool {
        matches!(self.state, GameState::Combat(_))
    }

    /// 拒否理由をステータス欄に流してそのまま返す。
    pub fn reject(&mut self, err: GameError) -> GameError {
        debug!("Rejected: {err}");
        self.status.append(&err);
        err
    }

    // -- 探索 --
    pub fn click_tile(&mut self, pos: Position) -> Result<(), GameError> {
        match self.state {
            GameState::Combat(_) => return Err(self.reject(GameError::InCombat)),
            GameState::GameOver => return Err(self.reject(GameError::GameOver)),
            GameState::Exploration => {}
        }
        let Some((kind, used)) = self.map.tile(pos).map(|t| (t.kind(), t.is_used())) else {
            return Err(self.reject(GameError::OutOfBounds(pos)));
        };
        if !self.map.is_reachable(pos) {
            return Err(self.reject(GameError::Unreachable));
        }
        if used {
            return Err(self.reject(GameError::TileUsed));
        }

        self.map.mark_used(pos);
        self.position = pos;
        debug!("Moved to {pos}: {kind:?}");

        match kind {
            TileKind::Skull => {
                let enemy = create_random_enemy(&mut self.rng);
                self.start_combat(enemy);
            }
            TileKind::Treasure => {
                let event = SeaEvent::random(&mut self.rng);
                self.apply_event(event);
                // 待ち伏せで戦闘に入っても隣接タイルは公開する
                self.map.reveal_neighbors(pos);
            }
            TileKind::Island => {
                self.status.append("You discovered an island.");
                self.map.reveal_neighbors(pos);
            }
            TileKind::OpenSea => {
                self.status.append("Just open sea.");
                self.map.reveal_neighbors(pos);
            }
        }
        self.status.flush_debug();
        Ok(())
    }

    fn apply_event(&mut self, event: SeaEvent) {
        let mut message = event.message().to_owned();
        match event {
            SeaEvent::Treasure => {
                let healed = self.repair_player();
                message += &format!(" You gain {healed} health from the treasure!");
            }
            SeaEvent::Ambush => {
                let enemy = create_random_enemy(&mut self.rng);
                message += " An enemy appears! Prepare for battle.";
                self.start_combat(enemy);
            }
            SeaEvent::Storm => {
                let bonus = self.config.storm_bonus;
                if self.buffs.apply_storm(&mut self.player, bonus) {
                    message += &format!(" Your evasion is increased by {bonus} for this turn.");
                }
            }
            SeaEvent::Trader => {
                let repaired = self.repair_player();
                message += &format!(" The trader repairs your ship by {repaired} health.");
            }
        }
        debug!("Sea event: {event:?}");
        self.status.append(message);
    }

    fn repair_player(&mut self) -> u16 {
        let amount = self.player.repair(self.config.repair_amount);
        self.status.append(format!(
            "{} repairs for {amount} health!",
            self.player.name()
        ));
        amount
    }

    // -- 戦闘 --
    pub fn start_combat(&mut self, enemy: Ship) {
        info!("Combat started against {}", enemy.name());
        self.status
            .append(format!("An enemy ship approaches: {}", enemy.name()));
        if let Some(hint) = enemy.special_ability().and_then(|a| a.hint()) {
            self.status.append(hint);
        }
        self.state = GameState::Combat(Combat::new(enemy));
    }

    fn end_combat(&mut self) {
        info!("Combat ended");
        self.state = GameState::Exploration;
        self.map.reveal_neighbors(self.position);
    }

    pub fn player_action(&mut self, action: PlayerAction) -> Result<RoundReport, GameError> {
        self.play_round(Some(action))
    }

    /// 文字列で受け取った行動を解釈して実行する。
    /// 解釈できない行動でも戦闘中ならターンを失い、敵は行動する。
    pub fn perform(&mut self, action: &str) -> Result<RoundReport, GameError> {
        let action = action
            .parse::<PlayerAction>()
            .inspect_err(|err| debug!("{err}"))
            .ok();
        self.play_round(action)
    }

    fn play_round(&mut self, action: Option<PlayerAction>) -> Result<RoundReport, GameError> {
        let combat = match &mut self.state {
            GameState::Combat(combat) => combat,
            GameState::GameOver => return Err(self.reject(GameError::GameOver)),
            GameState::Exploration => return Err(self.reject(GameError::NotInCombat)),
        };
        if self.player.is_destroyed() || combat.enemy().is_destroyed() {
            return Err(self.reject(GameError::GameOver));
        }
        match action {
            Some(action) => debug!("Player action: {action}"),
            None => debug!("Player loses the turn"),
        }

        let report = combat.resolve_round(
            &mut self.player,
            &mut self.buffs,
            action,
            &self.config,
            &mut self.status,
            &mut self.rng,
        );

        if report.enemy_defeated {
            self.status.append("You have defeated the enemy!");
            self.end_combat();
        }
        if report.player_destroyed {
            info!("Player ship destroyed after {} rounds", report.round);
            self.status.append("Your ship has been destroyed!");
            self.state = GameState::GameOver;
        }

        self.process_end_of_turn();
        self.status.flush_debug();
        Ok(report)
    }

    // ラウンド終了時の処理 (一時補正の解除)
    fn process_end_of_turn(&mut self) {
        let expired = self.buffs.expire(&mut self.player);
        if expired.contains(&Buff::Storm) {
            self.status
                .append("The storm has passed. Your evasion returns to normal.");
        }
    }
}

fn build_map<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> SeaMap {
    match &config.layout {
        Some(layout) => SeaMap::from_layout(config.map_size, layout).unwrap_or_else(|err| {
            error!("Invalid layout, generating a random map: {err}");
            SeaMap::generate(config.map_size, rng)
        }),
        None => SeaMap::generate(config.map_size, rng),
    }
}
