#[cfg(test)]
mod header_test;

use std::fmt;

use bytes::Buf;

use crate::error::{Error, Result};

/// The only RTCP version in use.
pub const VERSION: u8 = 2;
/// Wire size of the RTCP common header in bytes.
pub const HEADER_LENGTH: usize = 4;

pub const VERSION_SHIFT: u8 = 6;
pub const VERSION_MASK: u8 = 0x3;
pub const PADDING_SHIFT: u8 = 5;
pub const PADDING_MASK: u8 = 0x1;
pub const COUNT_MASK: u8 = 0x1f;

/// Feedback message type identifying TMMBN within transport feedback,
/// RFC 5104 Section 4.2.2.
pub const FORMAT_TMMBN: u8 = 4;

/// PacketType specifies the type of an RTCP packet as carried in the second
/// byte of the common header.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum PacketType {
    #[default]
    Unsupported = 0,
    SenderReport = 200,
    ReceiverReport = 201,
    SourceDescription = 202,
    Goodbye = 203,
    ApplicationDefined = 204,
    TransportSpecificFeedback = 205,
    PayloadSpecificFeedback = 206,
    ExtendedReport = 207,
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PacketType::Unsupported => "Unsupported",
            PacketType::SenderReport => "SR",
            PacketType::ReceiverReport => "RR",
            PacketType::SourceDescription => "SDES",
            PacketType::Goodbye => "BYE",
            PacketType::ApplicationDefined => "APP",
            PacketType::TransportSpecificFeedback => "TSFB",
            PacketType::PayloadSpecificFeedback => "PSFB",
            PacketType::ExtendedReport => "XR",
        };
        write!(f, "{s}")
    }
}

impl From<u8> for PacketType {
    fn from(b: u8) -> Self {
        match b {
            200 => PacketType::SenderReport,
            201 => PacketType::ReceiverReport,
            202 => PacketType::SourceDescription,
            203 => PacketType::Goodbye,
            204 => PacketType::ApplicationDefined,
            205 => PacketType::TransportSpecificFeedback,
            206 => PacketType::PayloadSpecificFeedback,
            207 => PacketType::ExtendedReport,
            _ => PacketType::Unsupported,
        }
    }
}

/// Header is the common RTCP packet header described in RFC 3550
/// Section 6.4.1.
///
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |V=2|P|  count  |  packet type  |            length             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Header {
    /// When set, this packet contains additional padding octets at the end
    /// which are not part of the control information.
    pub padding: bool,
    /// Report count, source count or feedback message type, depending on
    /// the packet type. 5 bits.
    pub count: u8,
    /// The RTCP packet type.
    pub packet_type: PacketType,
    /// Length of this packet in 32-bit words minus one, header included.
    pub length: u16,
}

impl Header {
    /// Header for a transport feedback packet of `length` 32-bit words
    /// minus one.
    pub fn new_feedback(count: u8, length: u16) -> Self {
        Header {
            padding: false,
            count,
            packet_type: PacketType::TransportSpecificFeedback,
            length,
        }
    }

    /// Reads a header from the front of `raw_packet`, advancing it past the
    /// four header bytes.
    pub fn unmarshal<B: Buf>(raw_packet: &mut B) -> Result<Self> {
        if raw_packet.remaining() < HEADER_LENGTH {
            return Err(Error::PacketTooShort);
        }

        let b0 = raw_packet.get_u8();
        let version = (b0 >> VERSION_SHIFT) & VERSION_MASK;
        if version != VERSION {
            return Err(Error::BadVersion(version));
        }

        Ok(Header {
            padding: ((b0 >> PADDING_SHIFT) & PADDING_MASK) > 0,
            count: b0 & COUNT_MASK,
            packet_type: PacketType::from(raw_packet.get_u8()),
            length: raw_packet.get_u16(),
        })
    }

    /// Writes the four header bytes at `*index`, advancing it. The caller
    /// has already checked the room.
    pub(crate) fn serialize(&self, buffer: &mut [u8], index: &mut usize) {
        buffer[*index] = (VERSION << VERSION_SHIFT)
            | (u8::from(self.padding) << PADDING_SHIFT)
            | (self.count & COUNT_MASK);
        buffer[*index + 1] = self.packet_type as u8;
        buffer[*index + 2..*index + HEADER_LENGTH].copy_from_slice(&self.length.to_be_bytes());
        *index += HEADER_LENGTH;
    }
}
