//! JSON rendering of a game's derived views, for tools that consume game
//! summaries rather than GIB text.

use serde_json::{Map, Value, json};

use crate::gib::Gib;
use crate::types::{GameResult, Move};

/// `[{"color":"black","move":1,"x":3,"y":3}, {"color":"white","move":2,"pass":true}, ...]`
pub fn moves_to_json(moves: &[Move]) -> String {
    Value::Array(moves.iter().map(move_value).collect()).to_string()
}

/// Summary object with the players, rules, result, clock, date and moves.
pub fn gib_to_json(gib: &Gib) -> String {
    let mut summary = Map::new();
    summary.insert("black".into(), json!(gib.player_black()));
    summary.insert("white".into(), json!(gib.player_white()));
    summary.insert("place".into(), json!(gib.game_place()));
    summary.insert("handicap".into(), json!(gib.handicap()));
    summary.insert("komi".into(), json!(gib.komi()));
    summary.insert(
        "result".into(),
        gib.game_result().as_ref().map_or(Value::Null, result_value),
    );
    summary.insert(
        "time".into(),
        gib.time_settings().map_or(Value::Null, |time| {
            json!({
                "limit": time.time_limit_seconds,
                "overtime": time.overtime_seconds,
                "periods": time.overtime_periods,
            })
        }),
    );
    summary.insert(
        "date".into(),
        json!(gib.game_date().map(|date| date.to_rfc3339())),
    );
    summary.insert(
        "moves".into(),
        Value::Array(gib.moves().iter().map(move_value).collect()),
    );

    Value::Object(summary).to_string()
}

fn move_value(mv: &Move) -> Value {
    match *mv {
        Move::Point {
            color,
            move_number,
            x,
            y,
        } => json!({ "color": color.as_str(), "move": move_number, "x": x, "y": y }),
        Move::Pass { color, move_number } => {
            json!({ "color": color.as_str(), "move": move_number, "pass": true })
        }
    }
}

fn result_value(result: &GameResult) -> Value {
    let winner = result.winner().as_str();
    match *result {
        GameResult::Score { score, .. } => {
            json!({ "winner": winner, "by": "score", "score": score })
        }
        GameResult::Resignation { .. } => json!({ "winner": winner, "by": "resignation" }),
        GameResult::Time { .. } => json!({ "winner": winner, "by": "time" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gib::Header;
    use crate::types::{Color, GameProperty};

    #[test]
    fn test_moves_json() {
        let moves = [
            Move::Point {
                color: Color::Black,
                move_number: 1,
                x: 3,
                y: 3,
            },
            Move::Pass {
                color: Color::White,
                move_number: 2,
            },
        ];
        assert_eq!(
            moves_to_json(&moves),
            r#"[{"color":"black","move":1,"x":3,"y":3},{"color":"white","move":2,"pass":true}]"#
        );
    }

    #[test]
    fn test_empty_moves_json() {
        assert_eq!(moves_to_json(&[]), "[]");
    }

    #[test]
    fn test_summary_json() {
        let header: Header = [
            ("GAMEBLACKNAME", "kim \"the wall\""),
            ("GAMEGONGJE", "65"),
            ("GAMEINFOMAIN", "GRLT:0,GTIME:600-20-3"),
            ("GAMEZIPSU", "35"),
            ("GAMEDATE", "2020- 8- 4-11- 7-47"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
        let gib = Gib::new(header, vec![GameProperty::Pass { move_number: 1 }]);

        let parsed: Value = serde_json::from_str(&gib_to_json(&gib)).unwrap();
        assert_eq!(parsed["black"], "kim \"the wall\"");
        assert_eq!(parsed["white"], Value::Null);
        assert_eq!(parsed["handicap"], 0);
        assert_eq!(parsed["komi"], 6.5);
        assert_eq!(
            parsed["result"],
            json!({ "winner": "black", "by": "score", "score": 3.5 })
        );
        assert_eq!(parsed["time"]["periods"], 3);
        assert_eq!(parsed["date"], "2020-08-04T11:07:47+00:00");
        assert_eq!(parsed["moves"][0]["pass"], true);
    }

    #[test]
    fn test_summary_json_without_header() {
        let parsed: Value = serde_json::from_str(&gib_to_json(&Gib::default())).unwrap();
        assert_eq!(parsed["result"], Value::Null);
        assert_eq!(parsed["time"], Value::Null);
        assert_eq!(parsed["date"], Value::Null);
        assert_eq!(parsed["moves"], json!([]));
    }
}
