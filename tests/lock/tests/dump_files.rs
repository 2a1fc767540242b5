//! Dump lock tests: frame files on disk, digests and JSON snapshots.

use std::fs::File;
use std::io::{BufReader, BufWriter};

use boundq_kernel::dump::{read_frames, CollectSink, FrameWriter};
use boundq_kernel::table::{StatePriorityHashtable, StatePriorityHashtableDF};
use boundq_search::digest::{DigestSink, DOMAIN_DUMP_CHAIN, DOMAIN_DUMP_DIGEST};
use boundq_search::snapshot::{table_snapshot, table_snapshot_bytes};
use lock_tests::{lcg_priorities, tagged, TaggedState};
use sha2::{Digest, Sha256};

fn table_from(seed: u64, n: usize) -> StatePriorityHashtable<TaggedState> {
    let mut table = StatePriorityHashtable::new(32);
    for (id, p) in (0u64..).zip(lcg_priorities(seed, n, -6, 6)) {
        table.push(tagged(id, p));
    }
    table
}

#[test]
fn frame_file_holds_every_state_in_dump_order() {
    let table = table_from(5, 120);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frontier.frames");

    let mut writer = FrameWriter::new(BufWriter::new(File::create(&path).unwrap()));
    table.dump(&mut writer).unwrap();
    assert_eq!(writer.frames(), 120);
    drop(writer.finish().unwrap());

    let frames = read_frames(BufReader::new(File::open(&path).unwrap())).unwrap();
    let mut order = CollectSink::default();
    table.dump(&mut order).unwrap();

    let file_priorities: Vec<i32> = frames.iter().map(|f| f.priority).collect();
    assert_eq!(file_priorities, order.priorities);

    let file_ids: Vec<u64> = frames
        .iter()
        .map(|f| u64::from_le_bytes(f.bytes.as_slice().try_into().unwrap()))
        .collect();
    let table_ids: Vec<u64> = table.iter().map(|(_, s)| s.id).collect();
    assert_eq!(file_ids, table_ids);
}

#[test]
fn dump_of_empty_table_writes_empty_file() {
    let table: StatePriorityHashtableDF<TaggedState> = StatePriorityHashtableDF::new(4);
    let file = tempfile::NamedTempFile::new().unwrap();

    let mut writer = FrameWriter::new(file.reopen().unwrap());
    table.dump(&mut writer).unwrap();
    drop(writer.finish().unwrap());

    assert_eq!(std::fs::metadata(file.path()).unwrap().len(), 0);
}

#[test]
fn digest_is_reproducible_for_identical_histories() {
    let digest = |table: &StatePriorityHashtable<TaggedState>| {
        let mut sink = DigestSink::new();
        table.dump(&mut sink).unwrap();
        sink.finish().to_content_hash()
    };
    assert_eq!(digest(&table_from(42, 300)), digest(&table_from(42, 300)));
    assert_ne!(digest(&table_from(42, 300)), digest(&table_from(43, 300)));
}

#[test]
fn snapshot_written_to_disk_parses_back() {
    let table = table_from(9, 40);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frontier.json");
    std::fs::write(&path, table_snapshot_bytes(&table)).unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(parsed, table_snapshot(&table));
    assert_eq!(parsed["len"], 40);

    let priorities: Vec<i64> = parsed["states"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["priority"].as_i64().unwrap())
        .collect();
    assert!(priorities.windows(2).all(|w| w[0] >= w[1]));
}

/// Recompute the chain straight from a frame file with `sha2`, without going
/// through `DigestSink`.
#[test]
fn digest_matches_independent_chain_over_file_bytes() {
    let table = table_from(31, 64);
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut writer = FrameWriter::new(file.reopen().unwrap());
    table.dump(&mut writer).unwrap();
    drop(writer.finish().unwrap());
    let bytes = std::fs::read(file.path()).unwrap();

    let mut chain: [u8; 32] = Sha256::digest(DOMAIN_DUMP_DIGEST).into();
    let mut offset = 0;
    let mut frames = 0u64;
    while offset < bytes.len() {
        let len = u32::from_le_bytes(bytes[offset + 4..offset + 8].try_into().unwrap()) as usize;
        let end = offset + 8 + len;
        let mut h = Sha256::new();
        h.update(DOMAIN_DUMP_CHAIN);
        h.update(chain);
        h.update(&bytes[offset..end]);
        chain = h.finalize().into();
        offset = end;
        frames += 1;
    }

    let mut sink = DigestSink::new();
    table.dump(&mut sink).unwrap();
    let digest = sink.finish();
    assert_eq!(digest.frames, frames);
    assert_eq!(digest.to_content_hash(), format!("sha256:{}", hex::encode(chain)));
}
