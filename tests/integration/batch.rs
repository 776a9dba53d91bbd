//! Batch Decoding Tests
//!
//! Parallel decoding must give the same outcomes, in the same order, as a
//! sequential pass, and a bad line must not affect its neighbours.

use graffiti_decoder::cli::commands::batch::{decode_batch, parse_batch_lines, BatchOutcome};
use graffiti_decoder::DecoderOptions;

use crate::common::fixtures::{hello_tx, mixed_tx, null_data_script, p2pkh_tx, plain_tx, TxBuilder};

fn sample_file() -> String {
    format!(
        "# sample batch\n{}\n\n{}\n  {}  \nnot-hex\n# trailing comment\n{}\n",
        hello_tx().hex(),
        plain_tx().hex(),
        mixed_tx().hex(),
        p2pkh_tx().hex(),
    )
}

#[test]
fn test_parse_batch_lines_skips_blanks_and_comments() {
    let content = sample_file();
    let lines = parse_batch_lines(&content);

    let numbers: Vec<usize> = lines.iter().map(|(line, _)| *line).collect();
    assert_eq!(numbers, vec![2, 4, 5, 6, 8]);
    assert_eq!(lines[2].1, mixed_tx().hex());
}

#[test]
fn test_outcomes_follow_input_order() {
    let content = sample_file();
    let lines = parse_batch_lines(&content);
    let outcomes = decode_batch(&lines, DecoderOptions::default(), 4).unwrap();

    assert_eq!(outcomes.len(), 5);
    let order: Vec<usize> = outcomes
        .iter()
        .map(|outcome| match outcome {
            BatchOutcome::Decoded { line, .. } | BatchOutcome::Failed { line, .. } => *line,
        })
        .collect();
    assert_eq!(order, vec![2, 4, 5, 6, 8]);

    match &outcomes[0] {
        BatchOutcome::Decoded { report, .. } => {
            assert!(report.graffiti);
            assert_eq!(report.records[0].text.as_deref(), Some("Hello"));
        }
        other => panic!("expected decoded line, got {:?}", other),
    }
    match &outcomes[1] {
        BatchOutcome::Decoded { report, .. } => assert!(!report.graffiti),
        other => panic!("expected decoded line, got {:?}", other),
    }
    match &outcomes[3] {
        BatchOutcome::Failed { line, kind, message } => {
            assert_eq!(*line, 6);
            assert_eq!(*kind, "invalid_hex");
            assert!(message.starts_with("Invalid hex input"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(!outcomes[4].is_failure());
}

#[test]
fn test_parallel_matches_sequential() {
    let hexes: Vec<String> = (0..64u32)
        .map(|i| {
            TxBuilder::new()
                .signed_input()
                .output(0, null_data_script(format!("message {}", i).as_bytes()))
                .build()
                .hex()
        })
        .collect();
    let lines: Vec<(usize, &str)> = hexes
        .iter()
        .enumerate()
        .map(|(idx, hex)| (idx + 1, hex.as_str()))
        .collect();

    let sequential = decode_batch(&lines, DecoderOptions::default(), 1).unwrap();
    let parallel = decode_batch(&lines, DecoderOptions::default(), 8).unwrap();
    assert_eq!(sequential, parallel);

    for (i, outcome) in parallel.iter().enumerate() {
        match outcome {
            BatchOutcome::Decoded { report, .. } => {
                assert_eq!(report.records[0].text, Some(format!("message {}", i)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

#[test]
fn test_empty_batch() {
    let outcomes = decode_batch(&[], DecoderOptions::default(), 4).unwrap();
    assert!(outcomes.is_empty());
}

#[test]
fn test_batch_respects_p2pkh_option() {
    let hex = p2pkh_tx().hex();
    let lines = vec![(1, hex.as_str())];
    let outcomes = decode_batch(
        &lines,
        DecoderOptions {
            include_p2pkh: false,
        },
        2,
    )
    .unwrap();

    match &outcomes[0] {
        BatchOutcome::Decoded { report, .. } => assert!(!report.graffiti),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_structural_failure_kind_reported() {
    let mut truncated = hello_tx().hex();
    truncated.truncate(truncated.len() - 8);
    let lines = vec![(1, truncated.as_str())];
    let outcomes = decode_batch(&lines, DecoderOptions::default(), 1).unwrap();

    match &outcomes[0] {
        BatchOutcome::Failed { kind, .. } => assert_eq!(*kind, "truncated_input"),
        other => panic!("expected failure, got {:?}", other),
    }
}
