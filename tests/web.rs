//! 绑定层测试，使用 `wasm-pack test --headless --chrome` 在无头浏览器中运行。

#![cfg(target_arch = "wasm32")]

use tictactoe_wasm::{
    apply_move, create_game_state, evaluate_result, mark_count, validate_state, GameSession,
    GameSnapshot, GameStatus, MoveResolution, RuleError,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn snapshot_from(json: &str) -> GameSnapshot {
    serde_json::from_str(json).expect("snapshot json")
}

#[wasm_bindgen_test]
fn session_plays_to_a_win_and_resets() {
    let mut session = GameSession::new(None).expect("default session");
    let mut last = String::new();
    for position in [1, 4, 2, 5, 3] {
        last = session.apply_move(position).expect("move accepted");
    }
    let snapshot = snapshot_from(&last);
    assert_eq!(snapshot.status, GameStatus::Resolved);
    assert!(session.is_resolved());
    assert_eq!(session.mark_count("X"), 3);

    let after_reset = snapshot_from(&session.reset().expect("reset"));
    assert_eq!(after_reset.status, GameStatus::InProgress);
    assert!(after_reset.cells.iter().all(|cell| cell.occupant.is_none()));
}

#[wasm_bindgen_test]
fn session_rejects_out_of_range_position() {
    let mut session = GameSession::new(None).expect("default session");
    assert!(session.apply_move(0).is_err());
    assert!(session.apply_move(10).is_err());
}

#[wasm_bindgen_test]
fn session_rejects_invalid_config_json() {
    assert!(GameSession::new(Some(r#"{"starting_player": 3}"#.into())).is_err());
    let error = GameSession::new(Some("not json".into()))
        .err()
        .expect("malformed json is rejected");
    let error: RuleError = serde_wasm_bindgen::from_value(error).expect("tagged rule error");
    assert!(matches!(error, RuleError::Serialization { .. }));
}

#[wasm_bindgen_test]
fn stateless_bindings_thread_state_through_js() {
    let mut state = create_game_state().expect("initial state");
    for position in [1, 4, 2, 5, 3] {
        let resolution = apply_move(state, position).expect("move applied");
        let parsed: MoveResolution =
            serde_wasm_bindgen::from_value(resolution).expect("resolution shape");
        state = serde_wasm_bindgen::to_value(&parsed.state).expect("state to js");
    }

    assert_eq!(mark_count(state.clone(), "O").expect("count"), 2);
    let result = evaluate_result(state.clone()).expect("evaluated");
    assert!(!result.is_undefined());
    assert!(validate_state(state).is_ok());
}

#[wasm_bindgen_test]
fn validate_state_rejects_garbage() {
    assert!(validate_state(JsValue::from_str("board")).is_err());
}
