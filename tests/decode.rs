mod common;

use common::{block_index_bytes, locator, verse_index_bytes, write_streams, zlib, TestamentBuilder};
use sword_commentary::sword::format::streams::{self, ExtensionFamily, TestamentStreams};
use sword_commentary::sword::versification::{Book, Versification};
use sword_commentary::{
    decode_module, DecodeOptions, IndexLayout, MarkupDialect, ModuleDriver, ModuleOutput,
    ModuleReader, SwordError, Testament, TrailingBytes,
};
use tempfile::TempDir;

fn decode_streams(
    driver: ModuleDriver,
    testament: Testament,
    streams: &TestamentStreams,
) -> ModuleOutput {
    let reader = ModuleReader::new(".", driver);
    let mut output = ModuleOutput::default();
    reader
        .decode_testament(testament, streams, &mut output)
        .expect("decode testament");
    output
}

#[test]
fn synthetic_module_round_trips() {
    static OLD: [Book; 1] = [Book {
        name: "Synthetic",
        slug: "synthetic",
        osis: "Syn",
        chapters: &[3],
    }];
    let dir = TempDir::new().unwrap();
    TestamentBuilder::new(2)
        .verse(0, "Hello there friend")
        .verse(1, "  Second verse text  ")
        .verse(2, "Third verse content\n")
        .write(dir.path(), Testament::Old, 'b', IndexLayout::Compact);

    let output = ModuleReader::new(dir.path(), ModuleDriver::ZCom)
        .with_versification(Versification { old: &OLD, new: &[] })
        .decode()
        .expect("decode");

    assert_eq!(output.len(), 3);
    assert_eq!(output.get("synthetic-1-1"), Some("Hello there friend"));
    assert_eq!(output.get("synthetic-1-2"), Some("Second verse text"));
    assert_eq!(output.get("synthetic-1-3"), Some("Third verse content"));
    assert_eq!(output.report.decoded, 3);
    assert_eq!(output.report.blocks_decompressed, 2);
    assert_eq!(output.report.testaments_decoded, vec![Testament::Old]);
    assert_eq!(output.report.testaments_skipped, vec![Testament::New]);
}

#[test]
fn both_testaments_map_to_kjv_keys() {
    let dir = TempDir::new().unwrap();
    TestamentBuilder::new(8)
        .verse(0, r#"<hi type="bold">Creation</hi> of the heavens"#)
        .verse(31, "The heavens and the earth were finished")
        .write(dir.path(), Testament::Old, 'b', IndexLayout::Wide);
    TestamentBuilder::new(8)
        .verse(0, "The book of the generation")
        .verse(7956, "The grace of our Lord be with you")
        .write(dir.path(), Testament::New, 'b', IndexLayout::Wide);

    let output = decode_module(dir.path(), ModuleDriver::ZCom4).expect("decode");
    assert_eq!(output.get("genesis-1-1"), Some("**Creation** of the heavens"));
    assert_eq!(output.get("genesis-2-1"), Some("The heavens and the earth were finished"));
    assert_eq!(output.get("matthew-1-1"), Some("The book of the generation"));
    assert_eq!(output.get("revelation-22-21"), Some("The grace of our Lord be with you"));
    assert_eq!(output.len(), 4);
    // Every gap between the written verses is a zero-length locator.
    assert_eq!(output.report.empty, 30 + 7955);
    assert!(output.entries.values().all(|text| !text.is_empty()));
}

#[test]
fn chapter_family_files_are_found_in_nested_directories() {
    let root = TempDir::new().unwrap();
    let data_dir = root.path().join("modules").join("comments").join("zcom").join("barnes");
    TestamentBuilder::new(4)
        .verse(0, "Paul, a servant of Jesus Christ")
        .write(&data_dir, Testament::New, 'c', IndexLayout::Compact);

    let located = streams::locate(root.path(), Testament::New).unwrap().expect("nt streams");
    assert_eq!(located.family, ExtensionFamily::Chapter);
    assert_eq!(located.data, data_dir.join("nt.czz"));
    assert!(streams::locate(root.path(), Testament::Old).unwrap().is_none());

    let output = decode_module(root.path(), ModuleDriver::ZCom).expect("decode");
    assert_eq!(output.get("matthew-1-1"), Some("Paul, a servant of Jesus Christ"));
}

#[test]
fn book_family_is_preferred_over_chapter_family() {
    let dir = TempDir::new().unwrap();
    TestamentBuilder::new(1)
        .verse(0, "From the book-blocked files")
        .write(dir.path(), Testament::Old, 'b', IndexLayout::Compact);
    TestamentBuilder::new(1)
        .verse(0, "From the chapter-blocked files")
        .write(dir.path(), Testament::Old, 'c', IndexLayout::Compact);

    let output = decode_module(dir.path(), ModuleDriver::ZCom).unwrap();
    assert_eq!(output.get("genesis-1-1"), Some("From the book-blocked files"));
}

#[test]
fn wrong_driver_misreads_the_index() {
    let streams = TestamentBuilder::new(4)
        .verse(0, "Alpha verse commentary")
        .verse(1, "Beta verse commentary")
        .verse(2, "Gamma verse commentary")
        .verse(3, "Delta verse commentary")
        .verse(4, "Epsilon verse commentary")
        .build(IndexLayout::Wide);

    let right = decode_streams(ModuleDriver::ZCom4, Testament::Old, &streams);
    assert_eq!(right.len(), 5);

    let wrong = decode_streams(ModuleDriver::ZCom, Testament::Old, &streams);
    assert_ne!(wrong.entries, right.entries);
}

#[test]
fn zero_length_locators_are_skipped_silently() {
    let streams = TestamentBuilder::new(4)
        .verse(1, "Only the second verse has text")
        .absent()
        .build(IndexLayout::Compact);

    let output = decode_streams(ModuleDriver::ZCom, Testament::Old, &streams);
    assert_eq!(output.len(), 1);
    assert_eq!(output.get("genesis-1-2"), Some("Only the second verse has text"));
    assert_eq!(output.report.empty, 2);
    assert_eq!(output.report.skipped(), 0);
}

#[test]
fn bad_blocks_skip_only_the_affected_verses() {
    let good = zlib(b"Good block text for verse one.Verse two is also good.");
    let garbage = vec![0x55u8; 16];
    let mut data = good.clone();
    data.extend_from_slice(&garbage);

    let streams = TestamentStreams {
        block_index: block_index_bytes(&[
            (0, good.len() as u32),
            (good.len() as u32, garbage.len() as u32),
            (0, 0),
        ]),
        verse_index: verse_index_bytes(
            &[
                locator(0, 0, 30),   // genesis-1-1
                locator(7, 0, 20),   // block index past the directory
                locator(1, 0, 20),   // corrupt block
                locator(2, 0, 20),   // zero-length block
                locator(0, 30, 500), // slice past the end of the block
                locator(0, 30, 23),  // genesis-1-6
            ],
            IndexLayout::Compact,
        ),
        data,
    };

    let output = decode_streams(ModuleDriver::ZCom, Testament::Old, &streams);
    assert_eq!(output.get("genesis-1-1"), Some("Good block text for verse one."));
    assert_eq!(output.get("genesis-1-6"), Some("Verse two is also good."));
    assert_eq!(output.len(), 2);
    assert_eq!(output.report.bad_block, 3);
    assert_eq!(output.report.out_of_bounds, 1);
    assert_eq!(output.report.skipped(), 4);
    assert_eq!(output.report.blocks_decompressed, 1);
}

#[test]
fn short_text_is_discarded_below_the_threshold() {
    let streams = TestamentBuilder::new(4)
        .verse(0, "Ten chars!")
        .verse(1, "Eleven char")
        .verse(2, r#"<hi type="bold">See</hi>"#)
        .build(IndexLayout::Compact);

    let output = decode_streams(ModuleDriver::ZCom, Testament::Old, &streams);
    assert_eq!(output.get("genesis-1-1"), None);
    assert_eq!(output.get("genesis-1-2"), Some("Eleven char"));
    assert_eq!(output.report.too_short, 2);

    let reader = ModuleReader::new(".", ModuleDriver::ZCom)
        .with_options(DecodeOptions::default().with_min_text_chars(1));
    let mut relaxed = ModuleOutput::default();
    reader
        .decode_testament(Testament::Old, &streams, &mut relaxed)
        .unwrap();
    assert_eq!(relaxed.get("genesis-1-1"), Some("Ten chars!"));
    assert_eq!(relaxed.get("genesis-1-3"), Some("**See**"));
}

#[test]
fn verses_beyond_the_versification_are_skipped() {
    static OLD: [Book; 1] = [Book {
        name: "Tiny",
        slug: "tiny",
        osis: "Tiny",
        chapters: &[2],
    }];
    let streams = TestamentBuilder::new(2)
        .verse(0, "First verse of tiny")
        .verse(1, "Second verse of tiny")
        .verse(2, "Past the end of the book")
        .verse(3, "Also past the end")
        .build(IndexLayout::Compact);

    let reader = ModuleReader::new(".", ModuleDriver::ZCom)
        .with_versification(Versification { old: &OLD, new: &[] });
    let mut output = ModuleOutput::default();
    reader.decode_testament(Testament::Old, &streams, &mut output).unwrap();

    assert_eq!(output.len(), 2);
    assert_eq!(output.get("tiny-1-2"), Some("Second verse of tiny"));
    assert_eq!(output.report.out_of_range, 2);
}

#[test]
fn html_dialect_is_selectable() {
    let streams = TestamentBuilder::new(2)
        .verse(0, r#"<span class="bld">Verse 1.</span>&mdash;In the beginning"#)
        .build(IndexLayout::Compact);

    let reader = ModuleReader::new(".", ModuleDriver::ZCom)
        .with_options(DecodeOptions::default().with_dialect(MarkupDialect::Html));
    let mut output = ModuleOutput::default();
    reader.decode_testament(Testament::Old, &streams, &mut output).unwrap();
    assert_eq!(output.get("genesis-1-1"), Some("**Verse 1.**--In the beginning"));
}

#[test]
fn strict_mode_skips_a_misaligned_testament() {
    let dir = TempDir::new().unwrap();
    let mut old = TestamentBuilder::new(2)
        .verse(0, "Old testament commentary")
        .build(IndexLayout::Compact);
    old.verse_index.push(0xff);
    write_streams(dir.path(), Testament::Old, 'b', &old);
    TestamentBuilder::new(2)
        .verse(0, "New testament commentary")
        .write(dir.path(), Testament::New, 'b', IndexLayout::Compact);

    let strict = ModuleReader::new(dir.path(), ModuleDriver::ZCom)
        .with_options(DecodeOptions::default().with_trailing_bytes(TrailingBytes::Reject))
        .decode()
        .unwrap();
    assert_eq!(strict.len(), 1);
    assert_eq!(strict.get("matthew-1-1"), Some("New testament commentary"));
    assert_eq!(strict.report.testaments_skipped, vec![Testament::Old]);

    let lenient = decode_module(dir.path(), ModuleDriver::ZCom).unwrap();
    assert_eq!(lenient.len(), 2);
    assert_eq!(lenient.get("genesis-1-1"), Some("Old testament commentary"));
}

#[test]
fn missing_sibling_stream_skips_the_testament() {
    let dir = TempDir::new().unwrap();
    TestamentBuilder::new(2)
        .verse(0, "Old testament commentary")
        .write(dir.path(), Testament::Old, 'b', IndexLayout::Compact);
    TestamentBuilder::new(2)
        .verse(0, "New testament commentary")
        .write(dir.path(), Testament::New, 'b', IndexLayout::Compact);
    std::fs::remove_file(dir.path().join("nt.bzv")).unwrap();

    let located = streams::locate(dir.path(), Testament::New).unwrap().unwrap();
    assert!(matches!(
        located.load(),
        Err(SwordError::StreamMissing { stream: "verse index", .. })
    ));

    let output = decode_module(dir.path(), ModuleDriver::ZCom).unwrap();
    assert_eq!(output.len(), 1);
    assert_eq!(output.report.testaments_skipped, vec![Testament::New]);
}

#[test]
fn unreadable_modules_fail() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        decode_module(dir.path().join("absent"), ModuleDriver::ZCom),
        Err(SwordError::ModuleNotFound(_))
    ));
    assert!(matches!(
        decode_module(dir.path(), ModuleDriver::ZCom),
        Err(SwordError::NoTestamentData(_))
    ));
}

#[test]
fn output_serializes_as_a_flat_json_object() {
    let dir = TempDir::new().unwrap();
    TestamentBuilder::new(2)
        .verse(0, "In the beginning — “God” created")
        .write(dir.path(), Testament::Old, 'b', IndexLayout::Compact);
    let output = decode_module(dir.path(), ModuleDriver::ZCom).unwrap();

    let path = dir.path().join("out.json");
    output.write_json(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, r#"{"genesis-1-1":"In the beginning — “God” created"}"#);

    let parsed: std::collections::HashMap<String, String> =
        serde_json::from_str(&output.to_json(true).unwrap()).unwrap();
    assert_eq!(parsed.len(), 1);
}
