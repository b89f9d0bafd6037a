pub mod game;
pub mod utils;

use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

pub use game::{
    Board, Cell, CellView, ConfigError, GameConfig, GameEngine, GameResult, GameSnapshot,
    GameState, GameStatus, IgnoreReason, IntegrityError, Mark, MarkTally, MoveOutcome,
    MoveResolution, Player, PlayerCode, Position, RuleError, BOARD_CELLS, WINNING_TRIPLES,
};

use utils::{log, log_warn};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() {
    set_panic_hook();
}

fn to_js_error(error: RuleError) -> JsValue {
    to_value(&error).unwrap_or_else(|serialize_err| JsValue::from_str(&serialize_err.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|error| to_js_error(error.into()))
}

fn engine_from_js(state: JsValue) -> Result<GameEngine, JsValue> {
    let state: GameState = from_value(state).map_err(JsValue::from)?;
    GameEngine::from_state(GameConfig::default(), state).map_err(to_js_error)
}

fn report_outcome(outcome: &MoveOutcome) {
    if let MoveOutcome::Ignored { position, reason } = outcome {
        log_warn!("move at {position} ignored: {reason:?}");
    }
}

/// 一局浏览器游戏：前端持有会话，并根据每次调用返回的快照重新渲染。
#[wasm_bindgen]
pub struct GameSession {
    engine: GameEngine,
}

#[wasm_bindgen]
impl GameSession {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<GameSession, JsValue> {
        let config = if let Some(json) = config_json {
            serde_json::from_str(&json).map_err(|error| to_js_error(error.into()))?
        } else {
            GameConfig::default()
        };
        let engine = GameEngine::new(config).map_err(to_js_error)?;
        log!("tic-tac-toe session started");
        Ok(GameSession { engine })
    }

    /// 为当前玩家在 `position`（1-9）落子并返回新快照。点击已占用的格子或已结束的棋盘不会改变任何状态。
    pub fn apply_move(&mut self, position: u8) -> Result<String, JsValue> {
        let position = Position::new(position).map_err(to_js_error)?;
        let outcome = self.engine.apply_move(position);
        report_outcome(&outcome);
        to_json(&self.engine.snapshot())
    }

    pub fn reset(&mut self) -> Result<String, JsValue> {
        self.engine.reset();
        log!("tic-tac-toe board reset");
        to_json(&self.engine.snapshot())
    }

    pub fn evaluate_result(&self) -> Result<String, JsValue> {
        to_json(&self.engine.evaluate_result())
    }

    pub fn mark_count(&self, symbol: &str) -> usize {
        self.engine.mark_count(symbol)
    }

    pub fn is_resolved(&self) -> bool {
        self.engine.status() == GameStatus::Resolved
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        to_json(&self.engine.snapshot())
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_value(&self.engine.snapshot()).map_err(JsValue::from)
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        to_json(self.engine.state())
    }
}

/// 返回内置 X/O 对局的初始状态。
#[wasm_bindgen(js_name = "createGameState")]
pub fn create_game_state() -> Result<JsValue, JsValue> {
    to_value(GameEngine::default().state()).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "defaultConfig")]
pub fn default_config() -> Result<JsValue, JsValue> {
    to_value(&GameConfig::default()).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "applyMove")]
pub fn apply_move(state: JsValue, position: u8) -> Result<JsValue, JsValue> {
    let position = Position::new(position).map_err(to_js_error)?;
    let mut engine = engine_from_js(state)?;
    let resolution = engine.resolve_move(position);
    report_outcome(&resolution.outcome);
    to_value(&resolution).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "evaluateResult")]
pub fn evaluate_result(state: JsValue) -> Result<JsValue, JsValue> {
    let engine = engine_from_js(state)?;
    to_value(&engine.evaluate_result()).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "markCount")]
pub fn mark_count(state: JsValue, symbol: &str) -> Result<usize, JsValue> {
    let engine = engine_from_js(state)?;
    Ok(engine.mark_count(symbol))
}

#[wasm_bindgen(js_name = "gameSnapshot")]
pub fn game_snapshot(state: JsValue) -> Result<JsValue, JsValue> {
    let engine = engine_from_js(state)?;
    to_value(&engine.snapshot()).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "validateState")]
pub fn validate_state(state: JsValue) -> Result<(), JsValue> {
    engine_from_js(state).map(|_| ())
}

#[cfg(feature = "console_error_panic_hook")]
fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

#[cfg(not(feature = "console_error_panic_hook"))]
fn set_panic_hook() {}
