use super::*;

/// Strings: "test", "end", "identifier", "+", "name" (22 blob bytes).
/// Layout: header 0..64, blob 64..86, table 128..152, kinds 192..204,
/// fields 256..258, padded to 320.
fn sample() -> Vec<u8> {
    let mut b = DescriptorBuilder::new("test");
    let ident = b.node_kind("identifier", true).unwrap();
    b.node_kind("+", false).unwrap();
    b.field("name").unwrap();
    b.root(ident).unwrap();
    b.build().unwrap()
}

/// Rewrite the header checksum after tampering with section bytes.
fn reseal(bytes: &mut [u8]) {
    let checksum = crc32fast::hash(&bytes[HEADER_SIZE..]);
    bytes[8..12].copy_from_slice(&checksum.to_le_bytes());
}

fn edit_header(bytes: &mut [u8], f: impl FnOnce(&mut Header)) {
    let mut header = Header::read(bytes).unwrap();
    f(&mut header);
    bytes[..HEADER_SIZE].copy_from_slice(&header.to_bytes());
}

#[test]
fn parse_sample() {
    let bytes = sample();
    assert_eq!(bytes.len(), 320);

    let d = Descriptor::parse(&bytes).unwrap();
    assert_eq!(d.name(), "test");
    assert_eq!(d.abi_version(), DEFAULT_ABI_VERSION);
    assert_eq!(d.node_kind_count(), 3);
    assert_eq!(d.field_count(), 1);
    assert_eq!(d.root(), Some(1));

    let offsets = d.offsets();
    assert_eq!(offsets.str_blob, 64);
    assert_eq!(offsets.str_table, 128);
    assert_eq!(offsets.node_kinds, 192);
    assert_eq!(offsets.fields, 256);
    assert_eq!(offsets.end, 258);
}

#[test]
fn node_kind_lookup() {
    let bytes = sample();
    let d = Descriptor::parse(&bytes).unwrap();

    assert_eq!(d.node_kind_name(0), Some("end"));
    assert_eq!(d.node_kind_name(1), Some("identifier"));
    assert_eq!(d.node_kind_name(2), Some("+"));
    assert_eq!(d.node_kind_name(3), None);

    assert!(!d.node_kind(0).unwrap().is_named());
    assert!(d.node_kind(1).unwrap().is_named());
    assert!(!d.node_kind(2).unwrap().is_named());

    let names: Vec<_> = d
        .node_kinds()
        .map(|(id, entry)| (id, d.string(entry.name).unwrap()))
        .collect();
    assert_eq!(names, vec![(0, "end"), (1, "identifier"), (2, "+")]);
}

#[test]
fn field_lookup() {
    let bytes = sample();
    let d = Descriptor::parse(&bytes).unwrap();

    let one = FieldId::new(1).unwrap();
    let two = FieldId::new(2).unwrap();
    assert_eq!(d.field_name(one), Some("name"));
    assert_eq!(d.field_name(two), None);
    assert_eq!(d.fields().collect::<Vec<_>>(), vec![(one, "name")]);
}

#[test]
fn string_out_of_range_lookup() {
    let bytes = sample();
    let d = Descriptor::parse(&bytes).unwrap();
    assert_eq!(d.string(StringId(4)), Some("name"));
    assert_eq!(d.string(StringId(5)), None);
}

#[test]
fn descriptors_compare_by_bytes() {
    let a = sample();
    let b = sample();
    assert_eq!(Descriptor::parse(&a).unwrap(), Descriptor::parse(&b).unwrap());

    let other = DescriptorBuilder::new("other").build().unwrap();
    assert_ne!(
        Descriptor::parse(&a).unwrap(),
        Descriptor::parse(&other).unwrap()
    );
}

#[test]
fn debug_output() {
    let bytes = sample();
    let d = Descriptor::parse(&bytes).unwrap();
    insta::assert_snapshot!(format!("{d:?}"), @r#"Descriptor { name: "test", abi_version: 14, node_kinds: 3, fields: 1, size: 320 }"#);
}

#[test]
fn truncated() {
    let bytes = sample();
    assert_eq!(
        Descriptor::parse(&bytes[..300]),
        Err(DescriptorError::SizeMismatch {
            header: 320,
            actual: 300
        })
    );
}

#[test]
fn trailing_bytes() {
    let mut bytes = sample();
    bytes.extend_from_slice(&[0; 64]);
    assert!(matches!(
        Descriptor::parse(&bytes),
        Err(DescriptorError::SizeMismatch { header: 320, .. })
    ));
}

#[test]
fn section_out_of_bounds() {
    let mut bytes = sample();
    bytes.truncate(256);
    edit_header(&mut bytes, |h| h.total_size = 256);

    assert_eq!(
        Descriptor::parse(&bytes),
        Err(DescriptorError::SectionOutOfBounds {
            section: "fields",
            end: 258,
            len: 256
        })
    );
}

#[test]
fn hostile_counts() {
    let mut bytes = sample();
    edit_header(&mut bytes, |h| {
        h.str_blob_size = u32::MAX;
        h.node_kinds_count = u16::MAX;
    });

    assert!(matches!(
        Descriptor::parse(&bytes),
        Err(DescriptorError::SectionOutOfBounds {
            section: "string blob",
            ..
        })
    ));
}

#[test]
fn checksum_mismatch() {
    let mut bytes = sample();
    bytes[64] ^= 0xFF;

    let err = Descriptor::parse(&bytes).unwrap_err();
    assert!(matches!(err, DescriptorError::ChecksumMismatch { .. }));
}

#[test]
fn bad_string_table() {
    let mut bytes = sample();
    bytes[132..136].copy_from_slice(&100u32.to_le_bytes());
    reseal(&mut bytes);

    assert_eq!(
        Descriptor::parse(&bytes),
        Err(DescriptorError::InvalidStringTable(1))
    );
}

#[test]
fn non_monotonic_string_table() {
    let mut bytes = sample();
    // entry 2 ("identifier") starts before entry 1 ("end")
    bytes[136..140].copy_from_slice(&1u32.to_le_bytes());
    reseal(&mut bytes);

    assert_eq!(
        Descriptor::parse(&bytes),
        Err(DescriptorError::InvalidStringTable(2))
    );
}

#[test]
fn invalid_utf8() {
    let mut bytes = sample();
    bytes[64] = 0xFF;
    reseal(&mut bytes);

    assert_eq!(
        Descriptor::parse(&bytes),
        Err(DescriptorError::InvalidUtf8(0))
    );
}

#[test]
fn name_out_of_range() {
    let mut bytes = sample();
    edit_header(&mut bytes, |h| h.name = 99);

    let err = Descriptor::parse(&bytes).unwrap_err();
    insta::assert_snapshot!(err, @"header name refers to string 99, but the table has 5");
}

#[test]
fn node_kind_name_out_of_range() {
    let mut bytes = sample();
    bytes[192..194].copy_from_slice(&7u16.to_le_bytes());
    reseal(&mut bytes);

    assert_eq!(
        Descriptor::parse(&bytes),
        Err(DescriptorError::StringOutOfRange {
            section: "node kinds",
            id: 7,
            count: 5
        })
    );
}

#[test]
fn root_out_of_range() {
    let mut bytes = sample();
    edit_header(&mut bytes, |h| h.root = 50);

    let err = Descriptor::parse(&bytes).unwrap_err();
    insta::assert_snapshot!(err, @"root node kind 50 out of range (3 node kinds)");
}

#[test]
fn no_root() {
    let bytes = DescriptorBuilder::new("bare").build().unwrap();
    let d = Descriptor::parse(&bytes).unwrap();
    assert_eq!(d.root(), None);
    assert_eq!(d.node_kind_count(), 1);
    assert_eq!(d.field_count(), 0);
    assert_eq!(d.fields().count(), 0);
}

#[test]
fn parse_ignores_abi_version() {
    let mut bytes = sample();
    edit_header(&mut bytes, |h| h.abi_version = 0);
    assert_eq!(Descriptor::parse(&bytes).unwrap().abi_version(), 0);
}

#[test]
fn with_header_matching_bytes() {
    let bytes = sample();
    let header = Header::read(&bytes).unwrap();
    let d = Descriptor::with_header(&bytes, header).unwrap();
    assert_eq!(d, Descriptor::parse(&bytes).unwrap());
}

#[test]
fn with_header_rejects_forged_header() {
    let bytes = sample();
    let mut header = Header::read(&bytes).unwrap();
    header.abi_version = 99;
    header.name = 1;

    let err = Descriptor::with_header(&bytes, header).unwrap_err();
    assert_eq!(err, DescriptorError::HeaderMismatch);
    insta::assert_snapshot!(err, @"header does not match the descriptor bytes");
}

#[test]
fn with_header_rejects_short_input() {
    let bytes = sample();
    let header = Header::read(&bytes).unwrap();
    assert_eq!(
        Descriptor::with_header(&bytes[..16], header),
        Err(DescriptorError::TooSmall(16))
    );
}

#[test]
fn error_messages() {
    insta::assert_snapshot!(DescriptorError::Null, @"descriptor reference is null");
    insta::assert_snapshot!(DescriptorError::TooSmall(12), @"descriptor too small: 12 bytes (minimum 64)");
    insta::assert_snapshot!(
        DescriptorError::ChecksumMismatch { expected: 0xdead, actual: 0xbeef },
        @"checksum mismatch: header says 0x0000dead, computed 0x0000beef"
    );
}
