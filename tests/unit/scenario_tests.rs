//! End-to-end replays through `run`, checking quote lines, diagnostics, and
//! final status byte-for-byte.

use pricer_rs::{PricerError, run};
use std::io::{BufReader, Cursor, Seek, Write};

fn replay(target: u64, input: &str) -> (String, String, Result<(), PricerError>) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let status = run(target, Cursor::new(input.as_bytes()), &mut out, &mut err);
    (
        String::from_utf8(out).expect("quotes are ascii"),
        String::from_utf8(err).expect("diagnostics are ascii"),
        status,
    )
}

#[test]
fn bid_forms_once_the_sell_side_reaches_target() {
    let input = "\
28800538 A b S 44.26 100
28800562 A c S 44.10 100
";
    let (out, err, status) = replay(200, input);
    assert_eq!(out, "28800562 B 8836.00\n");
    assert_eq!(err, "");
    assert!(status.is_ok());
}

#[test]
fn bid_collapses_to_na_when_liquidity_drains() {
    let input = "\
28800538 A b S 44.26 100
28800562 A c S 44.10 100
28800744 R b 100
";
    let (out, _, status) = replay(200, input);
    assert_eq!(out, "28800562 B 8836.00\n28800744 B NA\n");
    assert!(status.is_ok());
}

#[test]
fn ask_tracks_displacement_and_reduction() {
    let input = "\
1 A x B 10.00 300
2 A y B 13.00 200
3 R y 100
";
    let (out, _, status) = replay(200, input);
    assert_eq!(out, "1 S 2000.00\n2 S 2600.00\n3 S 2300.00\n");
    assert!(status.is_ok());
}

#[test]
fn single_share_target_follows_the_best_price() {
    let input = "\
1 A a S 50.00 1
2 A b S 40.00 1
3 R b 1
";
    let (out, _, status) = replay(1, input);
    assert_eq!(out, "1 B 50.00\n2 B 40.00\n3 B 50.00\n");
    assert!(status.is_ok());
}

#[test]
fn parse_errors_report_once_per_run_and_reset() {
    let input = "\
garbage
also garbage
28800538 A b S 44.26 100
still bad
";
    let (out, err, status) = replay(200, input);
    assert_eq!(out, "");
    assert_eq!(err, "Parser error.\nParser error.\n");
    assert_eq!(status.unwrap_err().exit_code(), 7);
}

#[test]
fn unknown_reduce_leaves_the_quotes_untouched() {
    let input = "\
1 A a S 44.00 100
2 R unknown 10
";
    let (out, err, status) = replay(100, input);
    assert_eq!(out, "1 B 4400.00\n");
    assert_eq!(err, "No matching Add found.\n");
    assert_eq!(status.unwrap_err().exit_code(), 5);
}

#[test]
fn oversized_target_never_produces_a_quote() {
    let input = "\
1 A a S 44.00 100
2 A b S 45.00 100
3 R a 50
4 R a 50
";
    let (out, _, status) = replay(100_000, input);
    assert_eq!(out, "");
    assert!(status.is_ok());
}

#[test]
fn both_sides_quote_independently() {
    let input = "\
1 A b1 B 10.00 150
2 A s1 S 11.00 150
3 A b2 B 9.50 250
4 A s2 S 11.50 150
5 R b1 150
";
    let (out, _, status) = replay(200, input);
    assert_eq!(
        out,
        "3 S 1975.00\n4 B 2225.00\n5 S 1900.00\n",
        "ask forms at 150@10.00+50@9.50, bid at 150@11.00+50@11.50, \
         then the ask rebuilds from 9.50 alone"
    );
    assert!(status.is_ok());
}

#[test]
fn empty_stream_is_a_clean_success() {
    let (out, err, status) = replay(200, "");
    assert_eq!(out, "");
    assert_eq!(err, "");
    assert!(status.is_ok());
}

#[test]
fn last_failure_wins_the_exit_code() {
    let input = "\
garbage
1 A a S 44.00 100
2 R ghost 5
";
    let (_, err, status) = replay(100, input);
    assert_eq!(err, "Parser error.\nNo matching Add found.\n");
    assert_eq!(status.unwrap_err().exit_code(), 5);
}

#[test]
fn file_backed_replay_matches_in_memory() {
    let input = "\
28800538 A b S 44.26 100
28800562 A c S 44.10 100
28800744 R b 100
28800758 A d S 44.18 100
";
    let mut file = tempfile::tempfile().expect("create temp log");
    file.write_all(input.as_bytes()).expect("write temp log");
    file.rewind().expect("rewind temp log");

    let mut out = Vec::new();
    let status = run(200, BufReader::new(file), &mut out, std::io::sink());
    assert!(status.is_ok());

    let (expected, _, _) = replay(200, input);
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}
