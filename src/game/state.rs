use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::rules::RuleError;

/// 棋盘格子数。
pub const BOARD_CELLS: usize = 9;

/// 玩家标识（1 或 2）。
pub type PlayerCode = u8;

/// 棋盘位置，按行优先顺序编号 1 到 9。
///
/// ```text
/// 1 | 2 | 3
/// ---------
/// 4 | 5 | 6
/// ---------
/// 7 | 8 | 9
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Position(pub(crate) u8);

impl Position {
    pub const FIRST: u8 = 1;
    pub const LAST: u8 = BOARD_CELLS as u8;

    pub fn new(value: u8) -> Result<Self, RuleError> {
        if (Self::FIRST..=Self::LAST).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RuleError::InvalidPosition { value })
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// 该位置在棋盘数组中的下标（从 0 开始）。
    pub fn index(self) -> usize {
        usize::from(self.0 - Self::FIRST)
    }

    pub fn all() -> impl Iterator<Item = Position> {
        (Self::FIRST..=Self::LAST).map(Position)
    }
}

impl TryFrom<u8> for Position {
    type Error = RuleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Position::new(value)
    }
}

impl From<Position> for u8 {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 玩家使用的标记，仅用于展示，不参与规则判断。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Mark {
    pub name: String,
    /// 前端绘制该标记时使用的图标名。
    #[serde(default)]
    pub icon_name: String,
}

impl Mark {
    pub fn new(name: impl Into<String>, icon_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon_name: icon_name.into(),
        }
    }
}

/// 参与对局的两名玩家之一。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub code: PlayerCode,
    pub name: String,
    pub mark: Mark,
    /// 下一个行棋玩家的标识。
    pub switch_to: PlayerCode,
}

impl Player {
    pub fn new(code: PlayerCode, name: impl Into<String>, mark: Mark, switch_to: PlayerCode) -> Self {
        Self {
            code,
            name: name.into(),
            mark,
            switch_to,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cell {
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupant: Option<PlayerCode>,
}

impl Cell {
    pub fn empty(position: Position) -> Self {
        Self {
            position,
            occupant: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

/// 3x3 棋盘，第 `i` 个格子始终对应位置 `i + 1`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|index| Cell::empty(Position(index as u8 + Position::FIRST))),
        }
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    pub fn cell(&self, position: Position) -> &Cell {
        &self.cells[position.index()]
    }

    pub fn occupant(&self, position: Position) -> Option<PlayerCode> {
        self.cell(position).occupant
    }

    pub fn is_empty(&self, position: Position) -> bool {
        self.cell(position).is_empty()
    }

    /// 占据一个空格子。若格子已被占用则返回 `false`，棋盘保持不变。
    pub fn place(&mut self, position: Position, code: PlayerCode) -> bool {
        let cell = &mut self.cells[position.index()];
        if cell.occupant.is_some() {
            return false;
        }
        cell.occupant = Some(code);
        true
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn count_of(&self, code: PlayerCode) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.occupant == Some(code))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// 对局结果。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum GameResult {
    Winner { player: Player },
    Tie,
}

impl GameResult {
    pub fn winner(&self) -> Option<&Player> {
        match self {
            GameResult::Winner { player } => Some(player),
            GameResult::Tie => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Resolved,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[serde(tag = "type")]
pub enum IntegrityError {
    #[display("slot {index} holds position {position}")]
    MisplacedCell { index: usize, position: Position },
    #[display("position {position} is held by unknown player {code}")]
    UnknownOccupant { position: Position, code: PlayerCode },
    #[display("current player {code} is not configured")]
    UnknownCurrentPlayer { code: PlayerCode },
}

/// 对局的可变部分：棋盘以及当前行棋玩家。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    #[serde(default)]
    pub board: Board,
    pub current_player: PlayerCode,
}

impl GameState {
    pub fn new(current_player: PlayerCode) -> Self {
        Self {
            board: Board::new(),
            current_player,
        }
    }

    /// 依据 `config` 中的玩家校验可能来自引擎外部的状态。
    pub fn integrity_check(&self, config: &GameConfig) -> Result<(), IntegrityError> {
        if config.player(self.current_player).is_none() {
            return Err(IntegrityError::UnknownCurrentPlayer {
                code: self.current_player,
            });
        }

        for (index, cell) in self.board.cells().iter().enumerate() {
            if cell.position.index() != index {
                return Err(IntegrityError::MisplacedCell {
                    index,
                    position: cell.position,
                });
            }
            if let Some(code) = cell.occupant {
                if config.player(code).is_none() {
                    return Err(IntegrityError::UnknownOccupant {
                        position: cell.position,
                        code,
                    });
                }
            }
        }

        Ok(())
    }
}
