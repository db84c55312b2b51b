/// フロントエンドとゲームコア間のインターフェースを定義する。
/// このモジュールで定義される構造体は、シリアライズ可能でなければならない。
/// また、それらのメソッドは単なるゲッターに限定し、原則的にロジックを含めてはならない。
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use crate::battle::{PlayerAction, RoundReport};
pub use crate::config::GameConfig;
pub use crate::map::{Position, TileKind};

use crate::fleet::Ship;
use crate::game::{Game, GameState};
use crate::map::Tile;

/// 画面の切り替えに使う状態の種類。
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StateKind {
    Exploration,
    Combat,
    GameOver,
}

/// 盤面とステータス欄の描画に必要な情報一式。
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub state: StateKind,
    pub map_size: usize,
    pub player: ShipView,
    pub enemy: Option<ShipView>,
    pub tiles: Vec<TileView>,
    pub player_position: Position,
    pub status: Vec<String>,
}

/// タイル 1 枚分。`symbol` は踏んだタイルのみ。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TileView {
    pub x: usize,
    pub y: usize,
    pub revealed: bool,
    pub used: bool,
    pub symbol: Option<String>,
}

/// 艦名と体力バー。
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShipView {
    pub name: String,
    pub health: u16,
    pub max_health: u16,
    pub health_percentage: f64,
    pub evasion: u16,
    pub attack_power: u16,
    pub emoji: String,
    pub color: String,
}

/// クリックや行動への応答。拒否された場合は `error` に理由が入る。
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub ok: bool,
    pub error: Option<String>,
    pub round: Option<RoundReport>,
    pub view: GameView,
}

impl From<&Ship> for ShipView {
    fn from(ship: &Ship) -> Self {
        Self {
            name: ship.name().to_owned(),
            health: ship.health(),
            max_health: ship.max_health(),
            health_percentage: ship.health_percentage(),
            evasion: ship.evasion(),
            attack_power: ship.attack_power(),
            emoji: ship.emoji().to_owned(),
            color: ship.color().to_owned(),
        }
    }
}

impl From<&Tile> for TileView {
    fn from(tile: &Tile) -> Self {
        let pos = tile.position();
        Self {
            x: pos.x,
            y: pos.y,
            revealed: tile.is_revealed(),
            used: tile.is_used(),
            symbol: tile.is_used().then(|| tile.kind().symbol().to_owned()),
        }
    }
}

impl<R: Rng> From<&Game<R>> for GameView {
    fn from(game: &Game<R>) -> Self {
        let state = match game.state() {
            GameState::Exploration => StateKind::Exploration,
            GameState::Combat(_) => StateKind::Combat,
            GameState::GameOver => StateKind::GameOver,
        };
        Self {
            state,
            map_size: game.map().size(),
            player: game.player().into(),
            enemy: game.enemy().map(ShipView::from),
            tiles: game.map().tiles().iter().map(TileView::from).collect(),
            player_position: game.position(),
            status: game.status().lines().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_view_hides_unused_symbols() {
        let mut kinds = vec![TileKind::OpenSea; 25];
        kinds[7] = TileKind::Island; // (2, 1)
        let config = GameConfig {
            opening_encounter: false,
            layout: Some(kinds),
            ..GameConfig::default()
        };
        let mut game = Game::new(config, StdRng::seed_from_u64(8));
        game.click_tile(Position::new(2, 1)).unwrap();

        let view = GameView::from(&game);
        assert_eq!(view.state, StateKind::Exploration);
        assert_eq!(view.tiles.len(), 25);
        assert_eq!(
            view.tiles[7],
            TileView {
                x: 2,
                y: 1,
                revealed: true,
                used: true,
                symbol: Some("🏝️".to_owned()),
            }
        );
        // 開始地点は公開済みだが未使用
        assert_eq!(view.tiles[12].symbol, None);
        assert!(view.tiles[12].revealed);
        assert!(view.enemy.is_none());
        assert_eq!(view.player_position, Position::new(2, 1));
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let game = Game::new(GameConfig::default(), StdRng::seed_from_u64(9));
        let json = serde_json::to_value(GameView::from(&game)).unwrap();
        assert_eq!(json["state"], "combat");
        assert_eq!(json["mapSize"], 5);
        assert_eq!(json["player"]["name"], "The Black Pearl");
        assert_eq!(json["player"]["healthPercentage"], 100.0);
        assert_eq!(json["playerPosition"]["x"], 2);
        assert!(json["enemy"]["maxHealth"].is_u64());
    }
}
