//! Graffiti Extraction Tests
//!
//! Covers the concrete carrier scenarios and the properties every successful
//! decode must satisfy:
//! - records never outnumber outputs
//! - every offset lies inside the buffer and points at the payload
//! - output order is preserved
//! - decoding is idempotent

use graffiti_decoder::{extract_graffiti, DecoderOptions, GraffitiDecoder, Location};

use crate::common::fixtures::{
    hello_tx, mixed_tx, null_data_script, p2pkh_script, p2pkh_tx, plain_tx, BuiltTx, TxBuilder,
};

/// Offsets in range and pointing at the bytes reported as payload
fn assert_records_consistent(tx: &BuiltTx, output_count: usize) {
    let extraction = extract_graffiti(&tx.bytes).unwrap();
    assert!(extraction.records.len() <= output_count);
    assert_eq!(extraction.has_graffiti(), !extraction.records.is_empty());

    for record in &extraction.records {
        assert_ne!(record.location, Location::None);
        assert!(record.offset < tx.bytes.len());
        assert_eq!(
            &tx.bytes[record.offset..record.offset + record.payload.len()],
            record.payload.as_slice()
        );
    }
}

#[test]
fn test_null_data_hello() {
    let tx = hello_tx();
    let extraction = extract_graffiti(&tx.bytes).unwrap();

    assert!(extraction.has_graffiti());
    assert_eq!(extraction.records.len(), 1);

    let record = &extraction.records[0];
    assert_eq!(record.location, Location::NullData);
    assert_eq!(record.payload, b"Hello");
    assert_eq!(record.offset, tx.script_offsets[0] + 2);
    assert_eq!(record.vout, 0);
}

#[test]
fn test_p2pkh_hash_extracted() {
    let tx = p2pkh_tx();
    let extraction = extract_graffiti(&tx.bytes).unwrap();

    assert_eq!(extraction.records.len(), 1);
    let record = &extraction.records[0];
    assert_eq!(record.location, Location::P2pkh);
    assert_eq!(record.payload, b"kilroy was here!!!!!");
    assert_eq!(record.offset, tx.script_offsets[0] + 3);
}

#[test]
fn test_only_matching_output_reported() {
    let tx = TxBuilder::new()
        .signed_input()
        .output(1_000, vec![0x51]) // OP_TRUE
        .output(0, null_data_script(b"graffiti"))
        .build();

    let extraction = extract_graffiti(&tx.bytes).unwrap();
    assert!(extraction.has_graffiti());
    assert_eq!(extraction.records.len(), 1);
    assert_eq!(extraction.records[0].vout, 1);
    assert_eq!(extraction.records[0].offset, tx.script_offsets[1] + 2);
}

#[test]
fn test_no_carriers_means_no_graffiti() {
    let tx = plain_tx();
    let extraction = extract_graffiti(&tx.bytes).unwrap();

    assert!(!extraction.has_graffiti());
    assert!(extraction.records.is_empty());
}

#[test]
fn test_zero_outputs() {
    let tx = TxBuilder::new().signed_input().build();
    let extraction = extract_graffiti(&tx.bytes).unwrap();
    assert!(!extraction.has_graffiti());
}

#[test]
fn test_mixed_outputs_keep_order() {
    let tx = mixed_tx();
    let extraction = extract_graffiti(&tx.bytes).unwrap();

    let summary: Vec<(usize, Location)> = extraction
        .records
        .iter()
        .map(|record| (record.vout, record.location))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, Location::NullData),
            (3, Location::P2pkh),
            (4, Location::NullData),
        ]
    );

    // 300-byte payload needs OP_PUSHDATA2: 0x6a 0x4d <len16>
    let big = &extraction.records[2];
    assert_eq!(big.payload.len(), 300);
    assert_eq!(big.offset, tx.script_offsets[4] + 4);

    assert_records_consistent(&tx, 5);
}

#[test]
fn test_empty_op_return_push_recorded() {
    let tx = TxBuilder::new()
        .signed_input()
        .output(0, vec![0x6a, 0x00])
        .output(0, vec![0x6a, 0x4c, 0x00])
        .build();

    let extraction = extract_graffiti(&tx.bytes).unwrap();
    assert_eq!(extraction.records.len(), 2);
    assert!(extraction.has_graffiti());

    let direct = &extraction.records[0];
    assert_eq!(direct.location, Location::NullData);
    assert!(direct.payload.is_empty());
    assert_eq!(direct.offset, tx.script_offsets[0] + 2);

    let pushdata1 = &extraction.records[1];
    assert!(pushdata1.payload.is_empty());
    assert_eq!(pushdata1.offset, tx.script_offsets[1] + 3);

    assert_records_consistent(&tx, 2);
}

#[test]
fn test_pushdata1_offset() {
    let payload = vec![b'x'; 80];
    let tx = TxBuilder::new()
        .signed_input()
        .output(0, null_data_script(&payload))
        .build();

    let extraction = extract_graffiti(&tx.bytes).unwrap();
    assert_eq!(extraction.records[0].offset, tx.script_offsets[0] + 3);
    assert_eq!(extraction.records[0].payload, payload);
}

#[test]
fn test_many_outputs_need_wide_varint() {
    let mut builder = TxBuilder::new().signed_input();
    for i in 0..300u32 {
        let script = if i % 100 == 0 {
            null_data_script(&i.to_le_bytes())
        } else {
            vec![0x51]
        };
        builder = builder.output(1, script);
    }
    let tx = builder.build();

    let extraction = extract_graffiti(&tx.bytes).unwrap();
    let vouts: Vec<usize> = extraction.records.iter().map(|r| r.vout).collect();
    assert_eq!(vouts, vec![0, 100, 200]);
    assert_eq!(extraction.records[2].payload, 200u32.to_le_bytes());
    assert_records_consistent(&tx, 300);
}

#[test]
fn test_decoding_is_idempotent() {
    let tx = mixed_tx();
    let first = extract_graffiti(&tx.bytes).unwrap();
    let second = extract_graffiti(&tx.bytes).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_decoder_without_p2pkh() {
    let tx = mixed_tx();
    let decoder = GraffitiDecoder::new(DecoderOptions {
        include_p2pkh: false,
    });
    let extraction = decoder.decode(&tx.bytes).unwrap();

    assert_eq!(extraction.count(Location::P2pkh), 0);
    assert_eq!(extraction.count(Location::NullData), 2);
}

#[test]
fn test_version_and_locktime_do_not_matter() {
    let tx = TxBuilder::new()
        .version(-7)
        .lock_time(0xdead_beef)
        .input(Vec::new())
        .output(0, null_data_script(b"x"))
        .output(0, p2pkh_script([0; 20]))
        .build();

    let extraction = extract_graffiti(&tx.bytes).unwrap();
    assert_eq!(extraction.records.len(), 2);
    assert_records_consistent(&tx, 2);
}
