//! Module file header (18 bytes).

use crate::constants::{
    HEADER_SIZE, MAGIC, MIN_CONSTANT_SIZE, MIN_PROCEDURE_SIZE, MIN_SYMBOL_SIZE, VERSION_MIN,
};
use crate::cursor::Cursor;
use crate::error::LoadError;
use crate::loader::LoaderConfig;

/// File header - the first 18 bytes of a module file.
///
/// The section counts are advisory upper bounds used to pre-size containers;
/// [`Header::read`] rejects counts whose minimum encoded footprint cannot fit
/// in the remaining buffer, so they are never trusted allocation sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: u32,
    pub version: u16,
    pub procedure_count: u32,
    pub constant_count: u32,
    pub symbol_count: u32,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION_MIN,
            procedure_count: 0,
            constant_count: 0,
            symbol_count: 0,
        }
    }
}

impl Header {
    /// Decode and validate the header.
    ///
    /// Magic is checked before any other field is interpreted, then the
    /// version, then the count sanity ceiling.
    pub fn read(cursor: &mut Cursor<'_>, config: &LoaderConfig) -> Result<Self, LoadError> {
        let magic = cursor.read_u32()?;
        if magic != config.magic {
            return Err(LoadError::BadMagic {
                expected: config.magic,
                found: magic,
            });
        }

        let version = cursor.read_u16()?;
        if version < config.min_version || version > config.max_version {
            return Err(LoadError::UnsupportedVersion {
                found: version,
                min: config.min_version,
                max: config.max_version,
            });
        }

        let header = Self {
            magic,
            version,
            procedure_count: cursor.read_u32()?,
            constant_count: cursor.read_u32()?,
            symbol_count: cursor.read_u32()?,
        };
        header.check_counts(cursor.remaining())?;
        Ok(header)
    }

    /// Reject counts that could not possibly be satisfied by the remaining
    /// buffer, assuming the minimum encoded size for every entry.
    fn check_counts(&self, remaining: usize) -> Result<(), LoadError> {
        let floor = self.procedure_count as u64 * MIN_PROCEDURE_SIZE as u64
            + self.constant_count as u64 * MIN_CONSTANT_SIZE as u64
            + self.symbol_count as u64 * MIN_SYMBOL_SIZE as u64;
        if floor > remaining as u64 {
            return Err(LoadError::MalformedHeader {
                detail: format!(
                    "declared counts need at least {floor} bytes, {remaining} remain"
                ),
            });
        }
        Ok(())
    }

    /// Encode the header to its fixed 18-byte layout.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic.to_le_bytes());
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..10].copy_from_slice(&self.procedure_count.to_le_bytes());
        bytes[10..14].copy_from_slice(&self.constant_count.to_le_bytes());
        bytes[14..18].copy_from_slice(&self.symbol_count.to_le_bytes());
        bytes
    }
}
