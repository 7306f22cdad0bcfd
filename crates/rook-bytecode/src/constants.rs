//! Container format constants.

/// Magic bytes at the start of every module file, read as a little-endian u32.
pub const MAGIC: u32 = u32::from_le_bytes(*b"ROOK");

/// Lowest format version this loader accepts.
pub const VERSION_MIN: u16 = 1;
/// Highest format version this loader accepts.
pub const VERSION_MAX: u16 = 1;

/// Fixed header size: magic (4) + version (2) + three section counts (4 each).
pub const HEADER_SIZE: usize = 18;

/// Constant pool tags.
pub const TAG_INT: u8 = 0;
pub const TAG_FLOAT: u8 = 1;
pub const TAG_STRING: u8 = 2;
pub const TAG_REF: u8 = 3;

/// Smallest possible encoded constant: tag + u32 payload (string or ref).
pub const MIN_CONSTANT_SIZE: usize = 5;
/// Smallest possible encoded symbol: namespace + name length + kind + target.
pub const MIN_SYMBOL_SIZE: usize = 10;
/// Smallest possible encoded procedure: arity + local slots + code length.
pub const MIN_PROCEDURE_SIZE: usize = 8;
