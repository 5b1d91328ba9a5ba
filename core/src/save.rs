//! The loaded saved-game aggregate: one decoded header plus the opaque
//! remainder of the file, with validated mutation and checksum upkeep.

use std::io::{Read, Write};

use crate::checksum;
use crate::class::Class;
use crate::constants::{CharacterStatus, FILE_ID, FILE_VERSION_110, HEADER_LEN};
use crate::error::SaveError;
use crate::header::{Header, offset};
use crate::name;

/// One loaded save file.
///
/// Owned exclusively by its caller for a single load / mutate / write
/// cycle. The serialized length is fixed at construction: the header is
/// always [`Header::LEN`] bytes and the tail is carried byte-for-byte.
pub struct SavedGame {
    header: Header,
    tail: Vec<u8>,
}

impl SavedGame {
    /// Reads a saved game from a byte source of known total size.
    ///
    /// Construction is all-or-nothing: the source must yield exactly
    /// `total_size` bytes, and any short read aborts without returning a
    /// partially populated value.
    ///
    /// # Arguments
    /// * `reader` - Byte source positioned at the start of the file.
    /// * `total_size` - Total file size in bytes; must be at least the
    ///   header size.
    ///
    /// # Returns
    /// * The decoded save, or `InvalidSize` / `TooSmall` / `Io`.
    pub fn read_from<R: Read>(reader: &mut R, total_size: i64) -> Result<Self, SaveError> {
        if total_size < 0 {
            return Err(SaveError::InvalidSize(total_size));
        }
        if (total_size as usize) < HEADER_LEN {
            return Err(SaveError::TooSmall(total_size));
        }

        let mut fixed = [0u8; HEADER_LEN];
        reader.read_exact(&mut fixed)?;
        let header = Header::decode(&fixed);

        let mut tail = vec![0u8; total_size as usize - HEADER_LEN];
        reader.read_exact(&mut tail)?;

        // Carried as-is either way; older or modded files still round-trip.
        if header.file_id != FILE_ID {
            log::warn!("unexpected file id {:#010x}", header.file_id);
        }
        if header.file_version != FILE_VERSION_110 {
            log::warn!("unexpected file version {}", header.file_version);
        }

        log::debug!(
            "loaded {} byte save, class byte {}, level {}",
            total_size,
            header.class,
            header.level
        );

        Ok(SavedGame { header, tail })
    }

    /// Serialized size of this save in bytes. Constant over the lifetime
    /// of the value.
    pub fn total_len(&self) -> usize {
        HEADER_LEN + self.tail.len()
    }

    /// Encodes the save into `out`, header first, tail verbatim.
    ///
    /// `out` must hold at least [`total_len`](Self::total_len) bytes;
    /// callers size the buffer before encoding.
    pub fn encode_into(&self, out: &mut [u8]) -> Result<(), SaveError> {
        let needed = self.total_len();
        if out.len() < needed {
            return Err(SaveError::BufferTooSmall {
                needed,
                got: out.len(),
            });
        }

        let mut fixed = [0u8; HEADER_LEN];
        self.header.encode(&mut fixed);
        out[..HEADER_LEN].copy_from_slice(&fixed);
        out[HEADER_LEN..needed].copy_from_slice(&self.tail);

        Ok(())
    }

    /// Serializes the save into a fresh buffer of exactly
    /// [`total_len`](Self::total_len) bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut fixed = [0u8; HEADER_LEN];
        self.header.encode(&mut fixed);

        let mut out = Vec::with_capacity(self.total_len());
        out.extend_from_slice(&fixed);
        out.extend_from_slice(&self.tail);
        out
    }

    /// Writes the serialized save to a byte sink.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), SaveError> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Recomputes the checksum and stores it in the header.
    ///
    /// The stored checksum field is zeroed, the full file is serialized,
    /// hashed, and the new value written back. If serialization fails the
    /// prior checksum is restored before the error is returned; the save
    /// is never left half-mutated.
    ///
    /// # Returns
    /// * The new checksum value, also stored in the header.
    pub fn recompute_checksum(&mut self) -> Result<u32, SaveError> {
        let previous = self.header.checksum;
        self.header.checksum = 0;

        let mut buf = vec![0u8; self.total_len()];
        if let Err(err) = self.encode_into(&mut buf) {
            self.header.checksum = previous;
            return Err(SaveError::Checksum(Box::new(err)));
        }

        let value = checksum::compute(&buf);
        self.header.checksum = value;

        log::debug!("checksum recomputed: {value:#010x}");
        Ok(value)
    }

    /// The checksum currently stored in the header, as read from the file
    /// or written by the last [`recompute_checksum`](Self::recompute_checksum).
    pub fn stored_checksum(&self) -> u32 {
        self.header.checksum
    }

    /// Checks the stored checksum against the file contents without
    /// mutating the save.
    pub fn verify_checksum(&self) -> bool {
        let mut buf = self.to_bytes();
        buf[offset::CHECKSUM..offset::CHECKSUM + 4].fill(0);
        checksum::compute(&buf) == self.header.checksum
    }

    /// The character name: the name field up to its first zero byte, or
    /// all sixteen bytes when no terminator is present.
    pub fn name(&self) -> &str {
        name::decode_field(&self.header.name)
    }

    /// Renames the character.
    ///
    /// `candidate` must be 2-15 characters: one or two runs of ASCII
    /// letters with at most one `-` or `_` strictly between the runs. On
    /// success the field is rewritten left-aligned and zero-filled; on
    /// failure it is left untouched.
    pub fn set_name(&mut self, candidate: &str) -> Result<(), SaveError> {
        name::validate(candidate)?;
        self.header.name = name::encode_field(candidate);

        log::debug!("character renamed to {candidate:?}");
        Ok(())
    }

    /// The character class, decoded from the raw class byte.
    ///
    /// `None` is only observable for inputs whose class byte was
    /// corrupted outside this crate; [`set_class`](Self::set_class) is
    /// the sole writer of the field.
    pub fn class(&self) -> Option<Class> {
        Class::from_u8(self.header.class)
    }

    /// The raw class byte as stored on the wire.
    pub fn class_raw(&self) -> u8 {
        self.header.class
    }

    /// Sets the character class from its byte code.
    ///
    /// Only the seven codes 0-6 are accepted; anything else returns
    /// `InvalidClass` and leaves the stored byte unchanged.
    pub fn set_class(&mut self, value: u8) -> Result<(), SaveError> {
        match Class::from_u8(value) {
            Some(class) => {
                self.header.class = value;
                log::debug!("character class set to {}", class.name());
                Ok(())
            }
            None => Err(SaveError::InvalidClass(value)),
        }
    }

    /// Character level byte.
    pub fn level(&self) -> u8 {
        self.header.level
    }

    /// Last-saved timestamp as stored on the wire.
    pub fn timestamp(&self) -> u32 {
        self.header.timestamp
    }

    /// Current map id.
    pub fn map_id(&self) -> u32 {
        self.header.map_id
    }

    /// File version code.
    pub fn file_version(&self) -> u32 {
        self.header.file_version
    }

    /// Raw progression byte.
    pub fn progression(&self) -> u8 {
        self.header.progression
    }

    /// Status byte as flags; unknown bits are retained.
    pub fn status(&self) -> CharacterStatus {
        CharacterStatus::from_bits_retain(self.header.status)
    }

    /// Read access to the decoded header. Mutation goes through the
    /// validated setters only.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The opaque tail: every byte past the header, preserved verbatim.
    pub fn tail(&self) -> &[u8] {
        &self.tail
    }
}
