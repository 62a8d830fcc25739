use bytes::BytesMut;

use crate::error::Result;

/// Packet is the surface the outbound packet writer drives: a packet knows
/// its exact wire size and writes itself into a caller-owned buffer, handing
/// full buffers to `on_packet_ready` as it goes.
pub trait Packet {
    /// Exact number of bytes `serialize` writes for the current contents,
    /// RTCP common header included. The framer uses this to decide whether
    /// the packet fits a budget before serializing.
    fn block_length(&self) -> usize;

    /// Writes the packet into `buffer` starting at `*index`, never past
    /// `max_length`.
    ///
    /// When the next atomic unit does not fit, the written prefix
    /// `&buffer[..*index]` is handed to `on_packet_ready` and the index
    /// resets to zero before writing resumes, so one logical packet may span
    /// several physical packets. The callback runs synchronously and must
    /// not serialize into the same packet.
    ///
    /// On success `*index` has advanced by exactly the bytes written. On
    /// failure the index is unspecified beyond atomic units staying whole.
    fn serialize(
        &self,
        buffer: &mut [u8],
        index: &mut usize,
        max_length: usize,
        on_packet_ready: &mut dyn FnMut(&[u8]),
    ) -> Result<()>;

    /// Serializes into a freshly allocated buffer sized by `block_length`.
    fn build(&self) -> Result<BytesMut> {
        let mut buffer = BytesMut::with_capacity(self.block_length());
        buffer.resize(self.block_length(), 0);

        let mut index = 0;
        let max_length = buffer.len();
        // The buffer holds the whole packet, so the callback never fires.
        let mut on_packet_ready = |_: &[u8]| {};
        self.serialize(&mut buffer, &mut index, max_length, &mut on_packet_ready)?;

        buffer.truncate(index);
        Ok(buffer)
    }
}
