#![warn(rust_2018_idioms)]
#![allow(dead_code)]

//! Implements encoding and decoding of the RTCP Temporary Maximum Media
//! Stream Bit Rate Notification (TMMBN) feedback packet according to
//! RFC 5104, Section 4.2.2.
//!
//! TMMBN is sent by a media sender to announce the set of bandwidth ceilings
//! it is currently honoring, one entry per bounded media source. This crate
//! covers the one feedback subtype and its transport-feedback framing; a
//! generic RTCP dispatcher above it parses the common header, recognizes
//! transport feedback with FMT 4 and hands over the raw feedback payload.
//!
//! Decoding a TMMBN packet handed over by the dispatcher:
//!```nobuild
//!     let header = Header::unmarshal(&mut buf)?;
//!     let tmmbn = Tmmbn::parse(&header, buf)?;
//!     for item in tmmbn.items() {
//!         // item.ssrc(), item.bitrate_bps(), item.packet_overhead()
//!     }
//!```
//!
//! Encoding into a caller-owned outbound buffer:
//!```nobuild
//!     let mut tmmbn = Tmmbn::new(sender_ssrc);
//!     tmmbn.add_tmmbr(media_ssrc, bitrate_kbps, packet_overhead)?;
//!
//!     let raw = tmmbn.build()?;
//!     // or, spanning physical packets:
//!     tmmbn.serialize(&mut buffer, &mut index, max_length, &mut on_packet_ready)?;
//!```

mod error;
pub mod header;
pub mod packet;
pub mod transport_feedbacks;

pub use error::{Error, Result};
pub use header::{FORMAT_TMMBN, HEADER_LENGTH, Header, PacketType};
pub use packet::Packet;
pub use transport_feedbacks::tmmbn::{COMMON_FEEDBACK_LENGTH, TmmbItem, Tmmbn};
