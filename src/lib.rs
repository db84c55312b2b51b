use log::{error, info};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod battle;
pub mod config;
pub mod error;
pub mod events;
pub mod fleet;
pub mod game;
pub mod interface;
pub mod map;
pub mod status;
mod utils;

use crate::error::GameError;
use crate::game::Game;
use crate::interface::{GameConfig, GameView, Position, Response, RoundReport};

static INIT: std::sync::Once = std::sync::Once::new();

fn initialize() {
    INIT.call_once(|| {
        utils::set_panic_hook();
        wasm_logger::init(wasm_logger::Config::default()); // ロガー初期化
        info!("Logger initialized");
    });
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|err| {
        error!("Failed to serialize response: {:?}", err);
        JsValue::NULL
    })
}

/// ブラウザから操作する航海ゲームのハンドル。
#[wasm_bindgen]
pub struct Voyage {
    game: Game<StdRng>,
}

#[wasm_bindgen]
impl Voyage {
    /// `config` が undefined/null ならデフォルト設定、不正な場合もデフォルトで続行する。
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Voyage {
        initialize();

        let config = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            match serde_wasm_bindgen::from_value::<GameConfig>(config) {
                Ok(c) => c,
                Err(err) => {
                    error!("Failed to parse game config: {:?}", err);
                    GameConfig::default()
                }
            }
        };

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        info!("Game created");
        Voyage {
            game: Game::new(config, rng),
        }
    }

    #[wasm_bindgen(js_name = clickTile)]
    pub fn click_tile(&mut self, x: usize, y: usize) -> JsValue {
        let result = self.game.click_tile(Position::new(x, y)).map(|()| None);
        to_js(&self.respond(result))
    }

    #[wasm_bindgen(js_name = playerAction)]
    pub fn player_action(&mut self, action: &str) -> JsValue {
        let result = self.game.perform(action).map(Some);
        to_js(&self.respond(result))
    }

    pub fn view(&self) -> JsValue {
        to_js(&GameView::from(&self.game))
    }

    pub fn restart(&mut self) -> JsValue {
        self.game.restart();
        self.view()
    }
}

impl Voyage {
    fn respond(&self, result: Result<Option<RoundReport>, GameError>) -> Response {
        let (ok, error, round) = match result {
            Ok(round) => (true, None, round),
            Err(err) => (false, Some(err.to_string()), None),
        };
        Response {
            ok,
            error,
            round,
            view: GameView::from(&self.game),
        }
    }
}
