/// Stone color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

/// One record of the game block, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameProperty {
    /// A stone placement (`STO`). `x` and `y` are zero-based board coordinates.
    Move {
        move_number: i32,
        color: Color,
        x: i32,
        y: i32,
    },
    /// Handicap declaration (`INI`).
    Init { handicap: u32 },
    /// A pass (`SKI`). The record carries no color.
    Pass { move_number: i32 },
}

/// A move with its color resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Point {
        color: Color,
        move_number: i32,
        x: i32,
        y: i32,
    },
    Pass {
        color: Color,
        move_number: i32,
    },
}

impl Move {
    pub fn color(&self) -> Color {
        match *self {
            Self::Point { color, .. } | Self::Pass { color, .. } => color,
        }
    }

    pub fn move_number(&self) -> i32 {
        match *self {
            Self::Point { move_number, .. } | Self::Pass { move_number, .. } => move_number,
        }
    }
}

/// How the game ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameResult {
    /// Counted game; `score` is the winning margin.
    Score { winner: Color, score: f64 },
    Resignation { winner: Color },
    /// The loser ran out of time.
    Time { winner: Color },
}

impl GameResult {
    pub fn winner(&self) -> Color {
        match *self {
            Self::Score { winner, .. } | Self::Resignation { winner } | Self::Time { winner } => {
                winner
            }
        }
    }
}

/// Byo-yomi style clock settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSettings {
    pub time_limit_seconds: u32,
    pub overtime_seconds: u32,
    pub overtime_periods: u32,
}
