use super::*;

#[test]
fn test_header_unmarshal() -> Result<()> {
    let raw = [0x84u8, 0xcd, 0x00, 0x04, 0xff, 0xff];
    let mut buf = &raw[..];

    let header = Header::unmarshal(&mut buf)?;
    assert_eq!(
        header,
        Header {
            padding: false,
            count: FORMAT_TMMBN,
            packet_type: PacketType::TransportSpecificFeedback,
            length: 4,
        }
    );
    // The cursor stops right after the header.
    assert_eq!(buf.remaining(), 2);

    Ok(())
}

#[test]
fn test_header_unmarshal_padding() -> Result<()> {
    let raw = [0xa1u8, 0xc8, 0x00, 0x07];
    let mut buf = &raw[..];

    let header = Header::unmarshal(&mut buf)?;
    assert!(header.padding);
    assert_eq!(header.count, 1);
    assert_eq!(header.packet_type, PacketType::SenderReport);
    assert_eq!(header.length, 7);

    Ok(())
}

#[test]
fn test_header_unmarshal_too_short() {
    let raw = [0x84u8, 0xcd, 0x00];
    let mut buf = &raw[..];

    assert_eq!(Header::unmarshal(&mut buf), Err(Error::PacketTooShort));
}

#[test]
fn test_header_unmarshal_bad_version() {
    let raw = [0x44u8, 0xcd, 0x00, 0x04];
    let mut buf = &raw[..];

    assert_eq!(Header::unmarshal(&mut buf), Err(Error::BadVersion(1)));
}

#[test]
fn test_header_serialize() {
    let header = Header::new_feedback(FORMAT_TMMBN, 4);

    let mut buffer = [0u8; HEADER_LENGTH];
    let mut index = 0;
    header.serialize(&mut buffer, &mut index);

    assert_eq!(index, HEADER_LENGTH);
    assert_eq!(buffer, [0x84, 0xcd, 0x00, 0x04]);
}

#[test]
fn test_packet_type() {
    assert_eq!(
        PacketType::from(205),
        PacketType::TransportSpecificFeedback
    );
    assert_eq!(PacketType::from(42), PacketType::Unsupported);
    assert_eq!(PacketType::TransportSpecificFeedback.to_string(), "TSFB");
}
