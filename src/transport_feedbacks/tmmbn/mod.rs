
use bytes::Buf;

use crate::error::{Error, Result};
use crate::header::{FORMAT_TMMBN, HEADER_LENGTH, Header, PacketType};
use crate::packet::Packet;

/// Wire size of the feedback block shared by all RFC 4585 feedback
/// messages: SSRC of packet sender, SSRC of media source.
pub const COMMON_FEEDBACK_LENGTH: usize = 8;

/// The bitrate mantissa occupies 17 bits.
const MAX_MANTISSA: u64 = (1 << 17) - 1;
/// The packet overhead occupies 9 bits.
const MAX_OVERHEAD: u16 = (1 << 9) - 1;
/// The header length field counts 16 bits of 32-bit words, which caps how
/// many items one physical packet can carry.
const MAX_CHUNK_ITEMS: usize =
    ((u16::MAX as usize + 1) * 4 - HEADER_LENGTH - COMMON_FEEDBACK_LENGTH) / TmmbItem::LENGTH;

/// TmmbItem is one media source's bandwidth ceiling within a TMMBN
/// notification.
///
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                              SSRC                             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// | MxTBR Exp |        MxTBR Mantissa           |Measured Overhead|
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///
/// The bitrate is `mantissa << exponent` bits per second.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TmmbItem {
    ssrc: u32,
    bitrate_bps: u64,
    packet_overhead: u16,
}

impl TmmbItem {
    /// Wire size of one item in bytes.
    pub const LENGTH: usize = 8;

    /// Creates an item. `packet_overhead` must fit the 9-bit wire field;
    /// out-of-range values are rejected here so they can never reach the
    /// wire truncated.
    pub fn new(ssrc: u32, bitrate_bps: u64, packet_overhead: u16) -> Result<Self> {
        if packet_overhead > MAX_OVERHEAD {
            return Err(Error::OverheadOutOfRange(packet_overhead));
        }
        Ok(TmmbItem {
            ssrc,
            bitrate_bps,
            packet_overhead,
        })
    }

    /// The media source the ceiling applies to.
    pub fn ssrc(&self) -> u32 {
        self.ssrc
    }

    /// The ceiling in bits per second.
    pub fn bitrate_bps(&self) -> u64 {
        self.bitrate_bps
    }

    /// Per-packet overhead the ceiling accounts for, in bytes.
    pub fn packet_overhead(&self) -> u16 {
        self.packet_overhead
    }

    fn parse<B: Buf>(buf: &mut B) -> Result<Self> {
        let ssrc = buf.get_u32();
        let packed = buf.get_u32();

        let exponent = packed >> 26;
        let mantissa = u64::from((packed >> 9) & 0x1ffff);
        let packet_overhead = (packed & 0x1ff) as u16;

        let bitrate_bps = mantissa << exponent;
        if bitrate_bps >> exponent != mantissa {
            return Err(Error::BitrateOverflow);
        }

        Ok(TmmbItem {
            ssrc,
            bitrate_bps,
            packet_overhead,
        })
    }

    /// Writes the item at `*index`; the caller has already checked the room
    /// for `LENGTH` bytes.
    fn serialize(&self, buffer: &mut [u8], index: &mut usize) {
        // Smallest exponent keeping the mantissa in 17 bits. Shifting down
        // floors the bitrate to the nearest representable value.
        let mut exponent = 0u32;
        let mut mantissa = self.bitrate_bps;
        while mantissa > MAX_MANTISSA {
            mantissa >>= 1;
            exponent += 1;
        }

        let packed = (exponent << 26) | ((mantissa as u32) << 9) | u32::from(self.packet_overhead);
        buffer[*index..*index + 4].copy_from_slice(&self.ssrc.to_be_bytes());
        buffer[*index + 4..*index + Self::LENGTH].copy_from_slice(&packed.to_be_bytes());
        *index += Self::LENGTH;
    }
}

/// Tmmbn is the Temporary Maximum Media Stream Bit Rate Notification,
/// RFC 5104 Section 4.2.2.
///
/// Within the common feedback block the "SSRC of packet sender" names the
/// notifying sender; the "SSRC of media source" is not used by this subtype
/// and is always zero on the wire, so it is not part of this type's surface.
/// The bounded sources live in the item list, one item per source, in
/// insertion order.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Tmmbn {
    sender_ssrc: u32,
    items: Vec<TmmbItem>,
}

impl Tmmbn {
    /// Feedback message type identifying TMMBN to the RTCP dispatcher.
    pub const FEEDBACK_MESSAGE_TYPE: u8 = FORMAT_TMMBN;

    /// Empty notification from `sender_ssrc`.
    pub fn new(sender_ssrc: u32) -> Self {
        Tmmbn {
            sender_ssrc,
            items: vec![],
        }
    }

    /// The "SSRC of packet sender" of the common feedback block.
    pub fn sender_ssrc(&self) -> u32 {
        self.sender_ssrc
    }

    /// Bounded sources in wire order.
    pub fn items(&self) -> &[TmmbItem] {
        &self.items
    }

    /// Appends a ceiling of `bitrate_kbps` for `ssrc`.
    pub fn add_tmmbr(&mut self, ssrc: u32, bitrate_kbps: u32, packet_overhead: u16) -> Result<()> {
        self.add_item(TmmbItem::new(
            ssrc,
            u64::from(bitrate_kbps) * 1000,
            packet_overhead,
        )?);
        Ok(())
    }

    /// Appends an item; insertion order is wire order.
    pub fn add_item(&mut self, item: TmmbItem) {
        self.items.push(item);
    }

    /// Parses the feedback payload that follows an already validated common
    /// header. `payload` must hold exactly the block the header declares.
    pub fn parse(header: &Header, payload: &[u8]) -> Result<Self> {
        if header.packet_type != PacketType::TransportSpecificFeedback
            || header.count != FORMAT_TMMBN
        {
            return Err(Error::WrongType);
        }
        if payload.len() < COMMON_FEEDBACK_LENGTH
            || (payload.len() - COMMON_FEEDBACK_LENGTH) % TmmbItem::LENGTH != 0
        {
            return Err(Error::Malformed);
        }

        let mut buf = payload;
        let sender_ssrc = buf.get_u32();
        // Media source SSRC, unused by this subtype.
        let _ = buf.get_u32();

        let mut items = Vec::with_capacity(buf.remaining() / TmmbItem::LENGTH);
        while buf.has_remaining() {
            items.push(TmmbItem::parse(&mut buf)?);
        }

        Ok(Tmmbn { sender_ssrc, items })
    }

    /// Bytes of one physical packet carrying `items` items.
    fn chunk_length(items: usize) -> usize {
        HEADER_LENGTH + COMMON_FEEDBACK_LENGTH + TmmbItem::LENGTH * items
    }

    /// Writes one self-contained packet covering `items`; the caller has
    /// already checked the room.
    fn serialize_chunk(&self, items: &[TmmbItem], buffer: &mut [u8], index: &mut usize) {
        let length = (Self::chunk_length(items.len()) / 4 - 1) as u16;
        Header::new_feedback(FORMAT_TMMBN, length).serialize(buffer, index);

        buffer[*index..*index + 4].copy_from_slice(&self.sender_ssrc.to_be_bytes());
        // Media source SSRC is always zero for this subtype.
        buffer[*index + 4..*index + COMMON_FEEDBACK_LENGTH].copy_from_slice(&0u32.to_be_bytes());
        *index += COMMON_FEEDBACK_LENGTH;

        for item in items {
            item.serialize(buffer, index);
        }
    }
}

impl Packet for Tmmbn {
    fn block_length(&self) -> usize {
        Self::chunk_length(self.items.len())
    }

    fn serialize(
        &self,
        buffer: &mut [u8],
        index: &mut usize,
        max_length: usize,
        on_packet_ready: &mut dyn FnMut(&[u8]),
    ) -> Result<()> {
        let max_length = max_length.min(buffer.len());
        let mut rest = self.items.as_slice();
        let mut wrote_any = false;

        while !wrote_any || !rest.is_empty() {
            let needed = Self::chunk_length(usize::from(!rest.is_empty()));
            let room = max_length.saturating_sub(*index);
            if room < needed {
                if *index == 0 {
                    return Err(Error::BufferExhausted);
                }
                // Hand off everything written so far; items stay whole.
                on_packet_ready(&buffer[..*index]);
                *index = 0;
                continue;
            }

            let count = ((room - Self::chunk_length(0)) / TmmbItem::LENGTH)
                .min(rest.len())
                .min(MAX_CHUNK_ITEMS);
            self.serialize_chunk(&rest[..count], buffer, index);
            rest = &rest[count..];
            wrote_any = true;
        }

        Ok(())
    }
}
