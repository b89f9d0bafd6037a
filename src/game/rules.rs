use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::{
    config::{ConfigError, GameConfig, WINNING_TRIPLES},
    state::{
        GameResult, GameState, GameStatus, IntegrityError, Mark, Player, PlayerCode, Position,
        BOARD_CELLS,
    },
};

/// 轮流落子时出现连线所需的最少占用格数。
const MIN_OCCUPIED_FOR_RESULT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[serde(tag = "type")]
pub enum RuleError {
    #[display("position {value} is outside the board (expected 1-9)")]
    InvalidPosition { value: u8 },
    #[display("invalid game configuration: {error}")]
    InvalidConfig {
        #[error(source)]
        error: ConfigError,
    },
    #[display("game state failed integrity check: {error}")]
    IntegrityViolation {
        #[error(source)]
        error: IntegrityError,
    },
    #[display("serialization failed: {message}")]
    Serialization { message: String },
}

impl From<serde_json::Error> for RuleError {
    fn from(error: serde_json::Error) -> Self {
        RuleError::Serialization {
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IgnoreReason {
    CellOccupied,
    GameResolved,
}

/// `apply_move` 的执行结果。被拒绝的落子不是错误：状态保持不变，并给出原因。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum MoveOutcome {
    Placed {
        position: Position,
        player: PlayerCode,
    },
    Ignored {
        position: Position,
        reason: IgnoreReason,
    },
}

impl MoveOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, MoveOutcome::Placed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellView {
    pub position: Position,
    pub occupant: Option<Player>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkTally {
    pub mark: Mark,
    pub count: usize,
}

/// 提供给视图层的只读对局快照。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSnapshot {
    pub cells: Vec<CellView>,
    /// 对局结束后为空。
    pub current_player: Option<Player>,
    pub result: Option<GameResult>,
    pub status: GameStatus,
    pub tally: Vec<MarkTally>,
}

/// 落子后的状态及落子结果，供自行保存状态的调用方使用。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveResolution {
    pub state: GameState,
    pub outcome: MoveOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GameResult>,
}

#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Result<Self, RuleError> {
        config
            .validate()
            .map_err(|error| RuleError::InvalidConfig { error })?;
        let state = GameState::new(config.starting_player);
        Ok(Self { config, state })
    }

    /// 从引擎外部保存的状态恢复对局。
    pub fn from_state(config: GameConfig, state: GameState) -> Result<Self, RuleError> {
        config
            .validate()
            .map_err(|error| RuleError::InvalidConfig { error })?;
        state
            .integrity_check(&config)
            .map_err(|error| RuleError::IntegrityViolation { error })?;
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// 当前行棋玩家；对局结束后返回 `None`。
    pub fn current_player(&self) -> Option<&Player> {
        if self.evaluate_result().is_some() {
            return None;
        }
        self.config.player(self.state.current_player)
    }

    pub fn status(&self) -> GameStatus {
        match self.evaluate_result() {
            Some(_) => GameStatus::Resolved,
            None => GameStatus::InProgress,
        }
    }

    #[instrument(skip(self))]
    pub fn apply_move(&mut self, position: Position) -> MoveOutcome {
        if self.evaluate_result().is_some() {
            debug!("move ignored, game already resolved");
            return MoveOutcome::Ignored {
                position,
                reason: IgnoreReason::GameResolved,
            };
        }

        let player = self.state.current_player;
        if !self.state.board.place(position, player) {
            debug!("move ignored, cell occupied");
            return MoveOutcome::Ignored {
                position,
                reason: IgnoreReason::CellOccupied,
            };
        }

        if let Some(next) = self.config.player(player).map(|p| p.switch_to) {
            self.state.current_player = next;
        }
        debug!(player, next = self.state.current_player, "move placed");

        if let Some(result) = self.evaluate_result() {
            info!(?result, "game resolved");
        }

        MoveOutcome::Placed { position, player }
    }

    /// 每次调用都根据棋盘重新推导结果。
    pub fn evaluate_result(&self) -> Option<GameResult> {
        let board = &self.state.board;
        let occupied = board.occupied_count();
        if occupied < MIN_OCCUPIED_FOR_RESULT {
            return None;
        }

        for triple in WINNING_TRIPLES {
            if let [Some(a), Some(b), Some(c)] = triple.map(|position| board.occupant(position)) {
                if a == b && b == c {
                    if let Some(player) = self.config.player(a) {
                        return Some(GameResult::Winner {
                            player: player.clone(),
                        });
                    }
                }
            }
        }

        if occupied == BOARD_CELLS {
            return Some(GameResult::Tie);
        }
        None
    }

    pub fn reset(&mut self) {
        self.state = GameState::new(self.config.starting_player);
        debug!(starting = self.state.current_player, "game reset");
    }

    /// 使用 `symbol` 标记的玩家所占的格子数。
    pub fn mark_count(&self, symbol: &str) -> usize {
        self.config
            .player_with_mark(symbol)
            .map(|player| self.state.board.count_of(player.code))
            .unwrap_or(0)
    }

    pub fn tally(&self) -> Vec<MarkTally> {
        self.config
            .players
            .iter()
            .map(|player| MarkTally {
                mark: player.mark.clone(),
                count: self.state.board.count_of(player.code),
            })
            .collect()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let cells = self
            .state
            .board
            .cells()
            .iter()
            .map(|cell| CellView {
                position: cell.position,
                occupant: cell
                    .occupant
                    .and_then(|code| self.config.player(code))
                    .cloned(),
            })
            .collect();
        let result = self.evaluate_result();
        let status = if result.is_some() {
            GameStatus::Resolved
        } else {
            GameStatus::InProgress
        };

        GameSnapshot {
            cells,
            current_player: self.current_player().cloned(),
            result,
            status,
            tally: self.tally(),
        }
    }

    /// 执行落子，并将新状态与落子结果打包返回。
    pub fn resolve_move(&mut self, position: Position) -> MoveResolution {
        let outcome = self.apply_move(position);
        MoveResolution {
            state: self.state.clone(),
            outcome,
            result: self.evaluate_result(),
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        let config = GameConfig::default();
        let state = GameState::new(config.starting_player);
        Self { config, state }
    }
}
