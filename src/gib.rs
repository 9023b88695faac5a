use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use tracing::warn;

use crate::timecontrol::parse_time_settings;
use crate::types::{Color, GameProperty, GameResult, Move, TimeSettings};

/// Raw header block: property name to unquoted value.
pub type Header = HashMap<String, String>;

const GAME_INFO: &str = "GAMEINFOMAIN";
const KOMI: &str = "GAMEGONGJE";
const SCORE: &str = "GAMEZIPSU";
const PLACE: &str = "GAMEPLACE";
const BLACK_NAME: &str = "GAMEBLACKNAME";
const WHITE_NAME: &str = "GAMEWHITENAME";
const DATE: &str = "GAMEDATE";
const RESULT_CODE: &str = "GRLT";
const TIME_CODE: &str = "GTIME";

/// A parsed GIB document.
///
/// `header` and `game` are fixed at construction. Every decoded view is
/// computed on first access and cached for the lifetime of the value; the
/// place and player names borrow straight from the header.
#[derive(Clone, Default)]
pub struct Gib {
    header: Header,
    game: Vec<GameProperty>,
    derived: Derived,
}

#[derive(Clone, Default)]
struct Derived {
    game_info: OnceLock<HashMap<String, String>>,
    handicap: OnceLock<u32>,
    komi: OnceLock<Option<f64>>,
    game_score: OnceLock<f64>,
    game_result: OnceLock<Option<GameResult>>,
    moves: OnceLock<Vec<Move>>,
    time_settings: OnceLock<Option<TimeSettings>>,
    game_date: OnceLock<Option<DateTime<Utc>>>,
}

impl Gib {
    pub fn new(header: Header, game: Vec<GameProperty>) -> Self {
        Self {
            header,
            game,
            derived: Derived::default(),
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn game(&self) -> &[GameProperty] {
        &self.game
    }

    /// `GAMEINFOMAIN` holds `NAME:VALUE` pairs separated by commas.
    fn game_info(&self) -> &HashMap<String, String> {
        self.derived
            .game_info
            .get_or_init(|| parse_game_info(self.header.get(GAME_INFO).map(String::as_str)))
    }

    /// Number of handicap stones; 0 when the game has no `INI` record.
    pub fn handicap(&self) -> u32 {
        *self.derived.handicap.get_or_init(|| {
            let mut declared = self.game.iter().filter_map(|property| match property {
                GameProperty::Init { handicap } => Some(*handicap),
                _ => None,
            });

            match (declared.next(), declared.next()) {
                (Some(handicap), None) => handicap,
                (None, _) => 0,
                (Some(_), Some(_)) => {
                    warn!("handicap declared more than once, assuming no handicap");
                    0
                }
            }
        })
    }

    pub fn komi(&self) -> Option<f64> {
        *self
            .derived
            .komi
            .get_or_init(|| self.header.get(KOMI).and_then(|raw| parse_tenths(raw)))
    }

    pub fn game_place(&self) -> Option<&str> {
        self.header.get(PLACE).map(String::as_str)
    }

    pub fn player_black(&self) -> Option<&str> {
        self.header.get(BLACK_NAME).map(String::as_str)
    }

    pub fn player_white(&self) -> Option<&str> {
        self.header.get(WHITE_NAME).map(String::as_str)
    }

    /// Winning margin; defaults to 0 when the header carries none.
    fn game_score(&self) -> f64 {
        *self.derived.game_score.get_or_init(|| {
            self.header
                .get(SCORE)
                .and_then(|raw| parse_tenths(raw))
                .unwrap_or(0.0)
        })
    }

    pub fn game_result(&self) -> Option<GameResult> {
        *self.derived.game_result.get_or_init(|| {
            let code = self.game_info().get(RESULT_CODE)?.parse::<i32>().ok()?;
            match code {
                0 => Some(GameResult::Score {
                    winner: Color::Black,
                    score: self.game_score(),
                }),
                1 => Some(GameResult::Score {
                    winner: Color::White,
                    score: self.game_score(),
                }),
                3 => Some(GameResult::Resignation {
                    winner: Color::Black,
                }),
                4 => Some(GameResult::Resignation {
                    winner: Color::White,
                }),
                7 => Some(GameResult::Time {
                    winner: Color::Black,
                }),
                8 => Some(GameResult::Time {
                    winner: Color::White,
                }),
                _ => None,
            }
        })
    }

    /// Moves and passes in document order.
    ///
    /// Passes carry no color in the document; theirs follows move-number
    /// parity, with White moving first in games of two or more handicap stones.
    pub fn moves(&self) -> &[Move] {
        self.derived.moves.get_or_init(|| {
            let starting_color = if self.handicap() >= 2 {
                Color::White
            } else {
                Color::Black
            };
            let color_of = |move_number: i32| {
                if move_number % 2 == 0 {
                    starting_color.opposite()
                } else {
                    starting_color
                }
            };

            self.game
                .iter()
                .filter_map(|property| match *property {
                    GameProperty::Init { .. } => None,
                    GameProperty::Pass { move_number } => Some(Move::Pass {
                        color: color_of(move_number),
                        move_number,
                    }),
                    GameProperty::Move {
                        move_number,
                        color,
                        x,
                        y,
                    } => Some(Move::Point {
                        color,
                        move_number,
                        x,
                        y,
                    }),
                })
                .collect()
        })
    }

    pub fn time_settings(&self) -> Option<TimeSettings> {
        *self
            .derived
            .time_settings
            .get_or_init(|| parse_time_settings(self.game_info().get(TIME_CODE)?))
    }

    /// Start of the game, from `GAMEDATE` (`year-month-day-hour-minute-second`).
    pub fn game_date(&self) -> Option<DateTime<Utc>> {
        *self
            .derived
            .game_date
            .get_or_init(|| parse_game_date(self.header.get(DATE)?))
    }
}

impl PartialEq for Gib {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header && self.game == other.game
    }
}

impl fmt::Debug for Gib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gib")
            .field("header", &self.header)
            .field("game", &self.game)
            .finish()
    }
}

fn parse_tenths(raw: &str) -> Option<f64> {
    raw.parse::<i32>().ok().map(|value| f64::from(value) / 10.0)
}

fn parse_game_info(raw: Option<&str>) -> HashMap<String, String> {
    let mut info = HashMap::new();
    let Some(raw) = raw else {
        return info;
    };

    for entry in raw.split(',').filter(|entry| !entry.is_empty()) {
        let parts: Vec<&str> = entry.split(':').collect();
        match parts.as_slice() {
            [name, value] => {
                info.insert((*name).to_string(), (*value).to_string());
            }
            _ => warn!(entry, "skipping malformed {GAME_INFO} entry"),
        }
    }

    info
}

fn parse_game_date(raw: &str) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = raw.split('-').map(str::trim).collect();
    let [year, month, day, hour, minute, second] = parts.as_slice() else {
        return None;
    };

    let date = NaiveDate::from_ymd_opt(
        year.parse().ok()?,
        month.parse().ok()?,
        day.parse().ok()?,
    )?;
    let time = NaiveTime::from_hms_opt(
        hour.parse().ok()?,
        minute.parse().ok()?,
        second.parse().ok()?,
    )?;

    Some(Utc.from_utc_datetime(&NaiveDateTime::new(date, time)))
}
