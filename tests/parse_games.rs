use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use gibson::{
    Color, Compression, Error, GameResult, Move, ParseErrorKind, TimeSettings, parse, parse_path,
    parse_path_with, parse_reader,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_even_game_from_path() {
    let gib = parse_path(fixture("even_game.gib")).unwrap();

    assert_eq!(gib.game_place(), Some("Tygem Baduk"));
    assert_eq!(gib.player_black(), Some("lee (5D)"));
    assert_eq!(gib.player_white(), Some("park (6D)"));
    assert_eq!(gib.komi(), Some(6.5));
    assert_eq!(gib.handicap(), 0);
    assert_eq!(
        gib.game_result(),
        Some(GameResult::Score {
            winner: Color::Black,
            score: 3.5
        })
    );
    assert_eq!(
        gib.time_settings(),
        Some(TimeSettings {
            time_limit_seconds: 600,
            overtime_seconds: 30,
            overtime_periods: 3,
        })
    );
    assert_eq!(
        gib.game_date(),
        Some(Utc.with_ymd_and_hms(2020, 8, 4, 11, 7, 47).unwrap())
    );

    let moves = gib.moves();
    assert_eq!(moves.len(), 6);
    assert_eq!(
        moves[4],
        Move::Pass {
            color: Color::Black,
            move_number: 5
        }
    );
    assert_eq!(
        moves[5],
        Move::Point {
            color: Color::White,
            move_number: 6,
            x: 16,
            y: 13
        }
    );
}

#[test]
fn test_handicap_game_from_path() {
    let gib = parse_path(fixture("handicap_game.gib")).unwrap();

    assert_eq!(gib.handicap(), 3);
    assert_eq!(gib.komi(), Some(0.5));
    assert_eq!(
        gib.game_result(),
        Some(GameResult::Resignation {
            winner: Color::White
        })
    );

    let colors: Vec<Color> = gib.moves().iter().map(Move::color).collect();
    assert_eq!(colors, vec![Color::White, Color::Black, Color::White]);
}

#[test]
fn test_string_path_and_reader_agree() {
    for name in ["even_game.gib", "handicap_game.gib"] {
        let path = fixture(name);
        let text = fs::read_to_string(&path).unwrap();

        let from_string = parse(&text).unwrap();
        let from_path = parse_path(&path).unwrap();
        let from_reader = parse_reader(File::open(&path).unwrap()).unwrap();

        assert_eq!(from_string, from_path, "{name}");
        assert_eq!(from_string, from_reader, "{name}");
    }
}

#[test]
fn test_zstd_compressed_path() {
    let text = fs::read(fixture("even_game.gib")).unwrap();
    let mut file = tempfile::Builder::new().suffix(".gib.zst").tempfile().unwrap();
    file.write_all(&zstd::encode_all(text.as_slice(), 3).unwrap())
        .unwrap();

    let detected = parse_path(file.path()).unwrap();
    let forced = parse_path_with(file.path(), Compression::Zstd).unwrap();

    assert_eq!(detected, forced);
    assert_eq!(detected.player_white(), Some("park (6D)"));
}

#[test]
fn test_truncated_file_reports_position() {
    let text = fs::read_to_string(fixture("handicap_game.gib")).unwrap();
    let truncated = text.replace("\\GE\n", "");

    let err = parse(&truncated).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Syntax);
    assert_eq!(err.description, "expected 'STO', 'SKI', 'INI' or '\\GE', found end of input");
    assert_eq!(err.marker.start_line, 16);
    assert_eq!(err.marker.start_column, 1);
}

#[test]
fn test_bad_record_in_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "\\HS\n\\HE\n\\GS\nSTO 0 1 1 3 3\nSTO 0 2 0 4 4\n\\GE\n").unwrap();

    match parse_path(file.path()).unwrap_err() {
        Error::Parse(err) => {
            assert_eq!(err.kind, ParseErrorKind::Semantic);
            assert_eq!(err.marker.start_line, 5);
            assert_eq!(err.marker.start_column, 9);
            assert!(err.to_string().contains("line 5, column 9"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}
