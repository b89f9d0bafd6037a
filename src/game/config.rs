//! 固定的对局配置：两名玩家、先手玩家以及获胜连线。

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::state::{Mark, Player, PlayerCode, Position};

pub const PLAYER_ONE: PlayerCode = 1;
pub const PLAYER_TWO: PlayerCode = 2;

/// 结束对局的八条连线，按此顺序检查。
pub const WINNING_TRIPLES: [[Position; 3]; 8] = [
    [Position(1), Position(5), Position(9)],
    [Position(3), Position(5), Position(7)],
    [Position(1), Position(2), Position(3)],
    [Position(4), Position(5), Position(6)],
    [Position(7), Position(8), Position(9)],
    [Position(1), Position(4), Position(7)],
    [Position(2), Position(5), Position(8)],
    [Position(3), Position(6), Position(9)],
];

static DEFAULT_CONFIG: Lazy<GameConfig> = Lazy::new(|| GameConfig {
    players: [
        Player::new(PLAYER_ONE, "Player One", Mark::new("X", "close"), PLAYER_TWO),
        Player::new(PLAYER_TWO, "Player Two", Mark::new("O", "circle"), PLAYER_ONE),
    ],
    starting_player: PLAYER_ONE,
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[serde(tag = "type")]
pub enum ConfigError {
    #[display("player code {code} is not 1 or 2")]
    UnsupportedPlayerCode { code: PlayerCode },
    #[display("player code {code} is used twice")]
    DuplicatePlayerCode { code: PlayerCode },
    #[display("player {code} hands the turn to {target}, expected the other player")]
    InvalidSwitchTarget { code: PlayerCode, target: PlayerCode },
    #[display("player {code} has an empty mark name")]
    EmptyMark { code: PlayerCode },
    #[display("mark {name} is assigned to both players")]
    DuplicateMark { name: String },
    #[display("starting player {code} is not configured")]
    UnknownStartingPlayer { code: PlayerCode },
}

/// 每个会话不可变的配置。宿主页面可以用 JSON 覆盖任意字段，缺省字段回退到内置的 X/O 对局。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub players: [Player; 2],
    pub starting_player: PlayerCode,
}

impl GameConfig {
    pub fn player(&self, code: PlayerCode) -> Option<&Player> {
        self.players.iter().find(|player| player.code == code)
    }

    pub fn player_with_mark(&self, symbol: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.mark.name == symbol)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let [first, second] = &self.players;

        for player in &self.players {
            if player.code != PLAYER_ONE && player.code != PLAYER_TWO {
                return Err(ConfigError::UnsupportedPlayerCode { code: player.code });
            }
            if player.mark.name.trim().is_empty() {
                return Err(ConfigError::EmptyMark { code: player.code });
            }
        }

        if first.code == second.code {
            return Err(ConfigError::DuplicatePlayerCode { code: first.code });
        }

        for (player, other) in [(first, second), (second, first)] {
            if player.switch_to != other.code {
                return Err(ConfigError::InvalidSwitchTarget {
                    code: player.code,
                    target: player.switch_to,
                });
            }
        }

        if first.mark.name == second.mark.name {
            return Err(ConfigError::DuplicateMark {
                name: first.mark.name.clone(),
            });
        }

        if self.player(self.starting_player).is_none() {
            return Err(ConfigError::UnknownStartingPlayer {
                code: self.starting_player,
            });
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_x_and_o() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.starting_player, PLAYER_ONE);
        assert_eq!(config.player(PLAYER_ONE).map(|p| p.mark.name.as_str()), Some("X"));
        assert_eq!(config.player(PLAYER_TWO).map(|p| p.mark.name.as_str()), Some("O"));
        assert_eq!(config.player_with_mark("O").map(|p| p.code), Some(PLAYER_TWO));
        assert!(config.player(3).is_none());
    }

    #[test]
    fn winning_triples_cover_rows_columns_and_diagonals_once() {
        let mut seen = std::collections::HashSet::new();
        for triple in WINNING_TRIPLES {
            let mut sorted: Vec<u8> = triple.iter().map(|p| p.get()).collect();
            sorted.sort_unstable();
            assert!(seen.insert(sorted), "triple {triple:?} listed twice");
        }
        assert_eq!(seen.len(), 8);
        assert_eq!(WINNING_TRIPLES[0].map(Position::get), [1, 5, 9]);
        assert_eq!(WINNING_TRIPLES[7].map(Position::get), [3, 6, 9]);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"starting_player": 2}"#).expect("partial config");
        assert_eq!(config.starting_player, PLAYER_TWO);
        assert_eq!(config.players, GameConfig::default().players);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_broken_player_setups() {
        let mut config = GameConfig::default();
        config.players[1].code = 5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnsupportedPlayerCode { code: 5 })
        );

        let mut config = GameConfig::default();
        config.players[1].code = PLAYER_ONE;
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicatePlayerCode { code: PLAYER_ONE })
        );

        let mut config = GameConfig::default();
        config.players[0].switch_to = PLAYER_ONE;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSwitchTarget {
                code: PLAYER_ONE,
                target: PLAYER_ONE
            })
        );

        let mut config = GameConfig::default();
        config.players[1].mark = Mark::new("X", "close");
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateMark { name: "X".into() })
        );

        let mut config = GameConfig::default();
        config.players[0].mark.name = "  ".into();
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyMark { code: PLAYER_ONE })
        );

        let mut config = GameConfig::default();
        config.starting_player = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownStartingPlayer { code: 0 })
        );
    }
}
