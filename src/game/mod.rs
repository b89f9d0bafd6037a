//! 井字棋核心逻辑模块（棋盘状态、配置、规则引擎）。

pub mod config;
pub mod rules;
pub mod state;

pub use config::{ConfigError, GameConfig, PLAYER_ONE, PLAYER_TWO, WINNING_TRIPLES};
pub use rules::{
    CellView,
    GameEngine,
    GameSnapshot,
    IgnoreReason,
    MarkTally,
    MoveOutcome,
    MoveResolution,
    RuleError,
};
pub use state::{
    Board,
    Cell,
    GameResult,
    GameState,
    GameStatus,
    IntegrityError,
    Mark,
    Player,
    PlayerCode,
    Position,
    BOARD_CELLS,
};
