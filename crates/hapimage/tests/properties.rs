//! Property-based tests for the Hap Image header.

use bytes::{BufMut, BytesMut};
use hapimage::{
    encode_image_header, is_top_level, read_image_header, write_image_header, Compressor,
    ErrorKind, PixelFormat, SectionHeader, SectionType, IMAGE_HEADER_SIZE, SIGNATURE,
};
use proptest::prelude::*;

fn arb_frame_type() -> impl Strategy<Value = SectionType> {
    prop_oneof![
        Just(SectionType::MULTIPLE_IMAGES),
        (0..Compressor::ALL.len(), 0..PixelFormat::ALL.len())
            .prop_map(|(c, p)| SectionType::frame(Compressor::ALL[c], PixelFormat::ALL[p])),
    ]
}

/// Type tags the reader neither records nor rejects.
fn arb_unknown_type() -> impl Strategy<Value = SectionType> {
    any::<u8>()
        .prop_filter("must be an auxiliary tag", |t| {
            !is_top_level(*t) && *t != SectionType::DIMENSIONS.as_u8()
        })
        .prop_map(SectionType)
}

fn put_section(buf: &mut BytesMut, section_type: SectionType, body: &[u8], extended: bool) {
    let header = if extended {
        SectionHeader::extended(body.len() as u32, section_type)
    } else {
        SectionHeader::for_body(body.len() as u32, section_type)
    };
    header.put(buf);
    buf.put_slice(body);
}

fn file(width: u32, height: u32, frame_type: SectionType, frame_body: &[u8]) -> BytesMut {
    let mut buf = BytesMut::new();
    encode_image_header(width, height, &mut buf);
    put_section(&mut buf, frame_type, frame_body, false);
    buf
}

proptest! {
    #[test]
    fn dimensions_roundtrip(
        width in any::<u32>(),
        height in any::<u32>(),
        frame_type in arb_frame_type(),
        frame_body in proptest::collection::vec(any::<u8>(), 1..64),
    ) {
        let mut out = vec![0u8; IMAGE_HEADER_SIZE];
        let used = write_image_header(width, height, &mut out).unwrap();
        prop_assert_eq!(used, IMAGE_HEADER_SIZE);

        let mut buf = BytesMut::from(&out[..used]);
        put_section(&mut buf, frame_type, &frame_body, false);

        let header = read_image_header(&buf).unwrap();
        prop_assert_eq!(header.width, width);
        prop_assert_eq!(header.height, height);
        prop_assert_eq!(header.frame_type, frame_type);
        prop_assert_eq!(header.frame, &buf[IMAGE_HEADER_SIZE..]);
    }

    #[test]
    fn truncated_prefixes_never_succeed(
        width in any::<u32>(),
        height in any::<u32>(),
        frame_body in proptest::collection::vec(any::<u8>(), 1..64),
        cut in any::<prop::sample::Index>(),
    ) {
        let buf = file(width, height, SectionType(0xBB), &frame_body);
        let len = cut.index(buf.len());
        let err = read_image_header(&buf[..len]).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::BadImage);
    }

    #[test]
    fn arbitrary_bytes_never_panic(data in proptest::collection::vec(any::<u8>(), 0..128)) {
        let mut buf = SIGNATURE.to_vec();
        buf.extend_from_slice(&data);
        if let Ok(header) = read_image_header(&buf) {
            prop_assert!(header.frame_range().end <= buf.len());
            prop_assert!(header.frame_type.is_top_level());
        }
    }

    #[test]
    fn signature_gate(
        signature in any::<[u8; 4]>().prop_filter("must differ", |s| *s != SIGNATURE),
        frame_body in proptest::collection::vec(any::<u8>(), 1..16),
    ) {
        let mut buf = file(1, 1, SectionType(0xAE), &frame_body);
        buf[..4].copy_from_slice(&signature);
        let err = read_image_header(&buf).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::BadImage);
    }

    #[test]
    fn extended_header_matches_compact(
        section_type in any::<u8>(),
        body in proptest::collection::vec(any::<u8>(), 1..512),
    ) {
        let mut compact = BytesMut::new();
        put_section(&mut compact, SectionType(section_type), &body, false);
        let mut extended = BytesMut::new();
        put_section(&mut extended, SectionType(section_type), &body, true);

        let a = SectionHeader::decode(&compact).unwrap();
        let b = SectionHeader::decode(&extended).unwrap();
        prop_assert_eq!(a.header_length(), 4);
        prop_assert_eq!(b.header_length(), 8);
        prop_assert_eq!(a.body_length(), b.body_length());
        prop_assert_eq!(a.section_type(), b.section_type());
    }

    #[test]
    fn unknown_sections_are_tolerated(
        width in any::<u32>(),
        height in any::<u32>(),
        extras in proptest::collection::vec(
            (arb_unknown_type(), proptest::collection::vec(any::<u8>(), 0..32), any::<bool>()),
            0..4,
        ),
    ) {
        let mut buf = BytesMut::new();
        buf.put_slice(&SIGNATURE);
        for (section_type, body, extended) in &extras {
            put_section(&mut buf, *section_type, body, *extended);
        }
        let mut dims = BytesMut::new();
        dims.put_u32_le(width);
        dims.put_u32_le(height);
        put_section(&mut buf, SectionType::DIMENSIONS, &dims, false);
        let frame_offset = buf.len();
        put_section(&mut buf, SectionType(0xCF), b"frame", false);

        let header = read_image_header(&buf).unwrap();
        prop_assert_eq!((header.width, header.height), (width, height));
        prop_assert_eq!(header.frame_offset, frame_offset);
    }
}

#[test]
fn classifier_is_total() {
    let top_level: Vec<u8> = (0..=u8::MAX).filter(|&t| is_top_level(t)).collect();
    assert_eq!(top_level.len(), 13);
    assert!(top_level.contains(&0x0D));
    assert!(!top_level.contains(&0x05));
}

#[test]
fn minimal_buffer_exactness() {
    let mut exact = [0u8; 16];
    assert_eq!(write_image_header(1, 1, &mut exact), Ok(16));

    let mut short = [0u8; 15];
    let err = write_image_header(1, 1, &mut short).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BufferTooSmall);
}
