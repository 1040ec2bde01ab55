use std::{path::PathBuf, sync::Arc};

use asterix::{AsterixDecoder, AsterixError};
use asterix_core::{
    BitField, DataItem, DecodeError, DecodeOptions, FixedFormat, Framing, ItemFormat, Record,
    Schema, SchemaProvider, SchemaRegistry, UapSlot, Value,
};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// One-octet `010` item with a `SAC` field at presence bit 1.
fn sac_schema(category: u8) -> Schema {
    Schema::new(
        category,
        vec![UapSlot::Item("010".to_string())],
        vec![DataItem::new(
            "010",
            vec![ItemFormat::Fixed(FixedFormat::new(
                1,
                vec![BitField::range("SAC", 8, 1)],
            ))],
        )],
    )
    .unwrap()
}

fn sac(record: &Record) -> Option<u64> {
    record.get("010")?.get("SAC")?.as_u64()
}

#[test]
fn decode_single_record() {
    let decoder = AsterixDecoder::builder()
        .with_schema(sac_schema(1))
        .build()
        .unwrap();

    let decoded = decoder.decode(&[0x01, 0x80, 0xFF]);

    let records = decoded.records(1).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(sac(&records[0]), Some(255));
    assert!(decoded.unsupported.is_empty());
}

#[test]
fn decode_reports_unsupported_category() {
    let decoder = AsterixDecoder::builder()
        .with_schema(sac_schema(1))
        .build()
        .unwrap();

    let decoded = decoder.decode(&[0xFE, 0x80, 0x01]);

    assert!(decoded.is_unsupported(0xFE));
    assert_eq!(decoded.records(0xFE).map(<[Record]>::len), Some(0));
    assert_eq!(
        decoder.decode_message(&[0xFE, 0x80, 0x01]),
        Err(DecodeError::CategoryUnsupported { category: 0xFE })
    );
}

#[test]
fn decode_hex_accepts_loose_formatting() {
    let decoder = AsterixDecoder::builder()
        .with_schema(sac_schema(1))
        .build()
        .unwrap();

    // odd digit count: the leading zero of the category is implied
    let decoded = decoder.decode_hex("0x1 80 2a\n80 2b").unwrap();
    let sacs: Vec<_> = decoded.records(1).unwrap().iter().filter_map(sac).collect();
    assert_eq!(sacs, vec![0x2A, 0x2B]);

    let err = decoder.decode_hex("01 80 zz").unwrap_err();
    assert!(matches!(err, AsterixError::Hex(_)));
}

#[test]
fn explicit_schema_overrides_provider() {
    let mut fallback = SchemaRegistry::new();
    fallback.register(sac_schema(1));
    fallback.register(sac_schema(2));

    let override_schema = Schema::new(
        1,
        vec![UapSlot::Spare, UapSlot::Item("010".to_string())],
        sac_schema(1).items().to_vec(),
    )
    .unwrap();

    let decoder = AsterixDecoder::builder()
        .with_provider(Arc::new(fallback))
        .with_schema(override_schema)
        .build()
        .unwrap();

    assert_eq!(decoder.schema(1).unwrap().uap().len(), 2);
    assert_eq!(decoder.schema(2).unwrap().uap().len(), 1);
    assert!(decoder.schema(3).is_none());
    // the decoder itself is a provider
    assert!(SchemaProvider::schema(&decoder, 2).is_some());
}

#[test]
fn decode_batch_preserves_order() {
    let decoder = AsterixDecoder::builder()
        .with_schema(sac_schema(1))
        .build()
        .unwrap();

    let inputs: Vec<Vec<u8>> = (0..32u8).map(|sac| vec![0x01, 0x80, sac]).collect();
    let decoded = decoder.decode_batch(&inputs);

    assert_eq!(decoded.len(), 32);
    for (expected, result) in (0..32u64).zip(&decoded) {
        assert_eq!(sac(&result.records(1).unwrap()[0]), Some(expected));
    }
}

#[test]
fn decode_file_with_data_block_framing() {
    let decoder = AsterixDecoder::builder()
        .with_schema(sac_schema(1))
        .with_options(DecodeOptions::default().with_framing(Framing::DataBlock))
        .build()
        .unwrap();

    let decoded = decoder
        .decode_file(&fixture_path("cat001_blocks.bin"))
        .unwrap();

    let sacs: Vec<_> = decoded.records(1).unwrap().iter().filter_map(sac).collect();
    assert_eq!(sacs, vec![7, 8]);
    assert!(decoded.is_unsupported(0xFE));

    let err = decoder
        .decode_file(&fixture_path("missing.bin"))
        .unwrap_err();
    assert!(matches!(err, AsterixError::Io(_)));
}

#[test]
fn schema_dir_loads_descriptors() {
    let decoder = AsterixDecoder::builder()
        .with_schema_dir(fixture_path("schemas"))
        .build()
        .unwrap();

    assert_eq!(decoder.schema(1).unwrap().edition(), Some("1.1"));

    // cat 2: 010 at bit 1, spare at bit 2, 000 at bit 3
    let decoded = decoder.decode_hex("02 a0 0102 03").unwrap();
    let record = &decoded.records(2).unwrap()[0];
    assert_eq!(record.ids().collect::<Vec<_>>(), vec!["010", "000"]);
    assert_eq!(record.get("000").unwrap().get("TYP"), Some(&Value::UInt(3)));
}

#[test]
fn missing_schema_dir_fails_to_build() {
    let result = AsterixDecoder::builder()
        .with_schema_dir(fixture_path("no-such-dir"))
        .build();
    assert!(matches!(result, Err(AsterixError::Schema(_))));
}
