use asterix_codec::{decode_message, decode_stream};
use asterix_core::{
    BitField, CompoundFormat, DataItem, DecodeError, DecodeOptions, FixedFormat, Framing,
    IndicatorConvention, ItemFormat, ItemValue, RepetitiveFormat, Schema, SchemaRegistry,
    UapSlot, Value, VariableFormat,
};

fn byte_field(name: &str) -> FixedFormat {
    FixedFormat::new(1, vec![BitField::range(name, 8, 1)])
}

fn fx_block(name: &str) -> FixedFormat {
    FixedFormat::new(1, vec![BitField::range(name, 8, 2), BitField::bit("FX", 1)])
}

fn uap(slots: &[&str]) -> Vec<UapSlot> {
    slots
        .iter()
        .map(|slot| match *slot {
            "-" => UapSlot::Spare,
            id => UapSlot::Item(id.to_string()),
        })
        .collect()
}

/// Category 1 test layout:
/// 1: 010 fixed, 2: spare, 3: 020 variable, 4: 030 repetitive,
/// 5: 040 compound, 6: 999 (no definition).
fn cat1() -> Schema {
    let items = vec![
        DataItem::new("010", vec![ItemFormat::Fixed(byte_field("SAC"))]),
        DataItem::new(
            "020",
            vec![ItemFormat::Variable(VariableFormat {
                blocks: vec![fx_block("TYP"), fx_block("EXT")],
            })],
        ),
        DataItem::new(
            "030",
            vec![ItemFormat::Repetitive(RepetitiveFormat {
                element: FixedFormat::new(2, vec![BitField::range("MODE3A", 12, 1)]),
            })],
        ),
        DataItem::new(
            "040",
            vec![ItemFormat::Compound(CompoundFormat {
                indicator: Some(VariableFormat {
                    blocks: vec![fx_block("IND")],
                }),
                subfields: vec![
                    ItemFormat::Fixed(byte_field("A")),
                    ItemFormat::Fixed(FixedFormat::new(
                        1,
                        vec![BitField::range("B", 8, 1).signed().with_scale(0.5)],
                    )),
                ],
            })],
        ),
    ];
    Schema::new(1, uap(&["010", "-", "020", "030", "040", "999"]), items).unwrap()
}

fn registry() -> SchemaRegistry {
    [cat1()].into_iter().collect()
}

fn sac(record: &asterix_core::Record) -> Option<u64> {
    record.get("010")?.get("SAC")?.as_u64()
}

#[test]
fn single_fixed_item_end_to_end() {
    let message = decode_message(&[0x01, 0x80, 0xFF], &registry(), &DecodeOptions::default())
        .unwrap();

    assert_eq!(message.category, 1);
    assert_eq!(message.records.len(), 1);
    let record = &message.records[0];
    assert_eq!(record.ids().collect::<Vec<_>>(), vec!["010"]);
    assert_eq!(sac(record), Some(255));
}

#[test]
fn consecutive_records_until_end_of_input() {
    let message = decode_message(
        &[0x01, 0x80, 0x01, 0x80, 0x02, 0x80, 0x03],
        &registry(),
        &DecodeOptions::default(),
    )
    .unwrap();

    let sacs: Vec<_> = message.records.iter().filter_map(sac).collect();
    assert_eq!(sacs, vec![1, 2, 3]);
}

#[test]
fn variable_item_reports_consumed_octets() {
    // fspec bit 3 (020), one block with FX clear, then a second record
    let message = decode_message(
        &[0x01, 0b0010_0000, 0x04, 0x80, 0x09],
        &registry(),
        &DecodeOptions::default(),
    )
    .unwrap();

    assert_eq!(message.records.len(), 2);
    match message.records[0].get("020") {
        Some(ItemValue::Variable { fields, len }) => {
            assert_eq!(*len, 1);
            assert_eq!(fields.get("TYP"), Some(&Value::UInt(2)));
            assert!(!fields.contains("EXT"));
        }
        other => panic!("unexpected 020 value: {other:?}"),
    }
    assert_eq!(sac(&message.records[1]), Some(9));
}

#[test]
fn repetitive_item_never_reads_past_input() {
    // REP = 3 but only two elements follow
    let message = decode_message(
        &[0x01, 0b0001_0000, 0x03, 0x01, 0x23, 0x04, 0x56],
        &registry(),
        &DecodeOptions::default(),
    )
    .unwrap();

    assert_eq!(message.records.len(), 1);
    let list = message.records[0].get("030").and_then(ItemValue::as_list).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].get("MODE3A"), Some(&Value::UInt(0x123)));
    assert_eq!(list[1].get("MODE3A"), Some(&Value::UInt(0x456)));
}

#[test]
fn compound_item_with_presence_indicator() {
    // indicator 0b0100_0000 selects subfield 2 only
    let message = decode_message(
        &[0x01, 0b0000_1000, 0b0100_0000, 0xFC],
        &registry(),
        &DecodeOptions::default(),
    )
    .unwrap();

    let value = message.records[0].get("040").unwrap();
    assert!(value.get("A").is_none());
    assert_eq!(value.get("B"), Some(&Value::Float(-2.0)));
}

#[test]
fn compound_item_with_legacy_indicator() {
    // indicator descriptor is child 0; octet 0 FX selects child 1 (subfield A)
    let options = DecodeOptions::default().with_indicator(IndicatorConvention::LegacyFxSlot);
    let message = decode_message(
        &[0x01, 0b0000_1000, 0x01, 0x00, 0x2A],
        &registry(),
        &options,
    )
    .unwrap();

    let value = message.records[0].get("040").unwrap();
    assert_eq!(value.get("A"), Some(&Value::UInt(42)));
    assert!(value.get("B").is_none());
}

#[test]
fn spare_undefined_and_out_of_uap_bits_are_ignored() {
    // bits 2 (spare), 6 (undefined item) and 7 (beyond the uap)
    let message = decode_message(
        &[0x01, 0b0100_0110, 0x80, 0x05],
        &registry(),
        &DecodeOptions::default(),
    )
    .unwrap();

    assert_eq!(message.records.len(), 2);
    assert!(message.records[0].is_empty());
    assert_eq!(sac(&message.records[1]), Some(5));
}

#[test]
fn truncated_fspec_yields_a_partial_record() {
    let message = decode_message(&[0x01, 0x80, 0x07, 0x81], &registry(), &DecodeOptions::default())
        .unwrap();
    assert_eq!(message.records.len(), 2);
    assert_eq!(sac(&message.records[0]), Some(7));
    // FX announces another octet that never comes; 010 reads zero padding
    assert_eq!(sac(&message.records[1]), Some(0));

    let message = decode_message(&[0x01, 0x81], &registry(), &DecodeOptions::default()).unwrap();
    assert_eq!(message.records.len(), 1);
    assert_eq!(message.records[0].ids().collect::<Vec<_>>(), vec!["010"]);
    assert_eq!(sac(&message.records[0]), Some(0));
}

#[test]
fn truncated_field_is_zero_padded() {
    let schema = Schema::new(
        2,
        uap(&["010"]),
        vec![DataItem::new(
            "010",
            vec![ItemFormat::Fixed(FixedFormat::new(
                2,
                vec![BitField::range("SAC", 16, 9), BitField::range("SIC", 8, 1)],
            ))],
        )],
    )
    .unwrap();
    let registry: SchemaRegistry = [schema].into_iter().collect();

    let message = decode_message(&[0x02, 0x80, 0x11], &registry, &DecodeOptions::default())
        .unwrap();
    let value = message.records[0].get("010").unwrap();
    assert_eq!(value.get("SAC"), Some(&Value::UInt(0x11)));
    assert_eq!(value.get("SIC"), Some(&Value::UInt(0)));
}

#[test]
fn sibling_formats_merge_into_one_value() {
    let schema = Schema::new(
        3,
        uap(&["010"]),
        vec![DataItem::new(
            "010",
            vec![
                ItemFormat::Fixed(byte_field("A")),
                ItemFormat::Fixed(byte_field("B")),
            ],
        )],
    )
    .unwrap();
    let registry: SchemaRegistry = [schema].into_iter().collect();

    let message = decode_message(&[0x03, 0x80, 0x01, 0x02], &registry, &DecodeOptions::default())
        .unwrap();
    assert_eq!(message.records.len(), 1);
    let fields = message.records[0].get("010").and_then(ItemValue::fields).unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields.get("B"), Some(&Value::UInt(2)));
}

#[test]
fn fixed_and_variable_siblings_keep_all_fields() {
    let fixed_then_variable = Schema::new(
        3,
        uap(&["010"]),
        vec![DataItem::new(
            "010",
            vec![
                ItemFormat::Fixed(byte_field("A")),
                ItemFormat::Variable(VariableFormat {
                    blocks: vec![fx_block("B")],
                }),
            ],
        )],
    )
    .unwrap();
    let variable_then_fixed = Schema::new(
        4,
        uap(&["010"]),
        vec![DataItem::new(
            "010",
            vec![
                ItemFormat::Variable(VariableFormat {
                    blocks: vec![fx_block("B")],
                }),
                ItemFormat::Fixed(byte_field("A")),
            ],
        )],
    )
    .unwrap();
    let registry: SchemaRegistry = [fixed_then_variable, variable_then_fixed]
        .into_iter()
        .collect();
    let options = DecodeOptions::default();

    let message = decode_message(&[0x03, 0x80, 0x11, 0x04], &registry, &options).unwrap();
    match message.records[0].get("010").unwrap() {
        ItemValue::Variable { fields, len } => {
            assert_eq!(fields.get("A"), Some(&Value::UInt(0x11)));
            assert_eq!(fields.get("B"), Some(&Value::UInt(2)));
            assert_eq!(fields.get("FX"), Some(&Value::UInt(0)));
            assert_eq!(*len, 1);
        }
        other => panic!("unexpected value: {other:?}"),
    }

    let message = decode_message(&[0x04, 0x80, 0x04, 0x11], &registry, &options).unwrap();
    match message.records[0].get("010").unwrap() {
        ItemValue::Variable { fields, len } => {
            assert_eq!(fields.get("B"), Some(&Value::UInt(2)));
            assert_eq!(fields.get("A"), Some(&Value::UInt(0x11)));
            assert_eq!(*len, 1);
        }
        other => panic!("unexpected value: {other:?}"),
    }
}

#[test]
fn message_edge_cases() {
    let options = DecodeOptions::default();
    assert_eq!(
        decode_message(&[], &registry(), &options),
        Err(DecodeError::OutOfData { offset: 0 })
    );
    assert_eq!(
        decode_message(&[0xFE, 0x80, 0x01], &registry(), &options),
        Err(DecodeError::CategoryUnsupported { category: 0xFE })
    );
    let empty = decode_message(&[0x01], &registry(), &options).unwrap();
    assert!(empty.records.is_empty());
}

#[test]
fn unsupported_category_is_reported() {
    let decoded = decode_stream(&[0xFE, 0x80, 0x01], &registry(), &DecodeOptions::default());
    assert!(decoded.is_unsupported(0xFE));
    assert_eq!(decoded.records(0xFE), Some(&[][..]));
    assert_eq!(decoded.record_count(), 0);
}

#[test]
fn data_blocks_are_decoded_in_sequence() {
    let data = [
        0x01, 0x00, 0x05, 0x80, 0x07, // cat 1, one record
        0xFE, 0x00, 0x04, 0x00, // unsupported, skipped
        0x01, 0x00, 0x07, 0x80, 0x08, 0x80, 0x09, // cat 1, two records
    ];
    let options = DecodeOptions::default().with_framing(Framing::DataBlock);
    let decoded = decode_stream(&data, &registry(), &options);

    let sacs: Vec<_> = decoded.records(1).unwrap().iter().filter_map(sac).collect();
    assert_eq!(sacs, vec![7, 8, 9]);
    assert!(decoded.is_unsupported(0xFE));
    assert_eq!(decoded.categories().collect::<Vec<_>>(), vec![1, 0xFE]);
}

#[test]
fn block_records_stop_at_block_end() {
    // the first block's length leaves the trailing record to the next block
    let data = [0x01, 0x00, 0x05, 0x80, 0x07, 0x01, 0x00, 0x05, 0x80, 0x08];
    let options = DecodeOptions::default().with_framing(Framing::DataBlock);
    let decoded = decode_stream(&data, &registry(), &options);
    assert_eq!(decoded.record_count(), 2);
}

#[test]
fn invalid_block_length_keeps_earlier_blocks() {
    let data = [0x01, 0x00, 0x05, 0x80, 0x07, 0x01, 0x00, 0x02, 0x80, 0x08];
    let options = DecodeOptions::default().with_framing(Framing::DataBlock);
    let decoded = decode_stream(&data, &registry(), &options);

    let sacs: Vec<_> = decoded.records(1).unwrap().iter().filter_map(sac).collect();
    assert_eq!(sacs, vec![7]);
}

#[test]
fn overlong_block_is_clamped_to_input() {
    let data = [0x01, 0x01, 0x00, 0x80, 0x07];
    let options = DecodeOptions::default().with_framing(Framing::DataBlock);
    let decoded = decode_stream(&data, &registry(), &options);
    assert_eq!(decoded.record_count(), 1);
}

#[test]
fn empty_input_decodes_to_nothing() {
    for framing in [Framing::Unframed, Framing::DataBlock] {
        let options = DecodeOptions::default().with_framing(framing);
        let decoded = decode_stream(&[], &registry(), &options);
        assert!(decoded.records.is_empty());
        assert!(decoded.unsupported.is_empty());
    }
}
