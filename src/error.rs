use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Buffer ends before a full RTCP common header.
    #[error("packet too short")]
    PacketTooShort,
    /// Common header carries an RTCP version other than 2.
    #[error("invalid rtcp version {0}")]
    BadVersion(u8),
    /// Header does not describe a TMMBN packet (PT 205, FMT 4).
    #[error("header is not a tmmbn feedback packet")]
    WrongType,
    /// Feedback payload is not a whole number of bandwidth limit items.
    #[error("tmmbn payload is not a whole number of items")]
    Malformed,
    /// Packed mantissa and exponent expand past a 64-bit bitrate.
    #[error("bitrate does not fit a 64-bit value")]
    BitrateOverflow,
    /// Output buffer cannot hold a feedback block even after a flush.
    #[error("output buffer exhausted")]
    BufferExhausted,
    /// Packet overhead exceeds the 9-bit wire field.
    #[error("packet overhead {0} exceeds the 9-bit wire field")]
    OverheadOutOfRange(u16),
}
