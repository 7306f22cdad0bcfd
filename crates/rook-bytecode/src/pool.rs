//! Constant pool: the table of literal values referenced by index.

use std::sync::Arc;

use crate::constants::{TAG_FLOAT, TAG_INT, TAG_REF, TAG_STRING};
use crate::cursor::Cursor;
use crate::error::LoadError;
use crate::interner::StringCache;

/// A literal value in the constant pool.
///
/// A constant's index is its position of first appearance in the file.
#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    /// Back-reference to an earlier pool entry. Forward and self references
    /// are rejected at decode time.
    Ref(u32),
}

impl Constant {
    /// The wire tag selecting this variant.
    pub fn tag(&self) -> u8 {
        match self {
            Constant::Int(_) => TAG_INT,
            Constant::Float(_) => TAG_FLOAT,
            Constant::Str(_) => TAG_STRING,
            Constant::Ref(_) => TAG_REF,
        }
    }
}

/// Decode `count` constants from the cursor.
pub fn read_pool(
    cursor: &mut Cursor<'_>,
    count: u32,
    cache: Option<&StringCache>,
) -> Result<Vec<Constant>, LoadError> {
    let mut pool = Vec::with_capacity(count as usize);
    for index in 0..count {
        let tag = cursor.read_tag()?;
        let constant = match tag {
            TAG_INT => Constant::Int(cursor.read_u64()? as i64),
            TAG_FLOAT => Constant::Float(f64::from_bits(cursor.read_u64()?)),
            TAG_STRING => {
                let s = cursor.read_length_prefixed_str()?;
                let s = match cache {
                    Some(cache) => cache.intern(s),
                    None => Arc::from(s),
                };
                Constant::Str(s)
            }
            TAG_REF => {
                let target = cursor.read_u32()?;
                // A constant may only reference an earlier entry.
                if target >= index {
                    return Err(LoadError::IndexOutOfRange {
                        what: "constant",
                        found: target,
                        limit: index,
                    });
                }
                Constant::Ref(target)
            }
            _ => return Err(LoadError::UnknownConstantTag { index, tag }),
        };
        pool.push(constant);
    }
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(constants: &[Constant]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for c in constants {
            bytes.push(c.tag());
            match c {
                Constant::Int(v) => bytes.extend_from_slice(&(*v as u64).to_le_bytes()),
                Constant::Float(v) => bytes.extend_from_slice(&v.to_bits().to_le_bytes()),
                Constant::Str(s) => {
                    bytes.extend_from_slice(&(s.len() as u32).to_le_bytes());
                    bytes.extend_from_slice(s.as_bytes());
                }
                Constant::Ref(i) => bytes.extend_from_slice(&i.to_le_bytes()),
            }
        }
        bytes
    }

    #[test]
    fn decodes_all_variants() {
        let constants = vec![
            Constant::Int(-7),
            Constant::Float(1.5),
            Constant::Str(Arc::from("hello")),
            Constant::Ref(2),
        ];
        let bytes = encode(&constants);

        let pool = read_pool(&mut Cursor::new(&bytes), 4, None).unwrap();
        assert_eq!(pool, constants);
    }

    #[test]
    fn unknown_tag_rejected() {
        let bytes = [9u8, 0, 0, 0, 0];
        let err = read_pool(&mut Cursor::new(&bytes), 1, None).unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnknownConstantTag { index: 0, tag: 9 }
        ));
    }

    #[test]
    fn forward_reference_rejected() {
        // Entry 0 referencing entry 1 would be a forward reference.
        let bytes = encode(&[Constant::Ref(1)]);
        let err = read_pool(&mut Cursor::new(&bytes), 1, None).unwrap_err();
        assert!(matches!(
            err,
            LoadError::IndexOutOfRange {
                what: "constant",
                found: 1,
                limit: 0
            }
        ));
    }

    #[test]
    fn self_reference_rejected() {
        let bytes = encode(&[Constant::Int(0), Constant::Ref(1)]);
        let err = read_pool(&mut Cursor::new(&bytes), 2, None).unwrap_err();
        assert!(matches!(
            err,
            LoadError::IndexOutOfRange {
                what: "constant",
                found: 1,
                limit: 1
            }
        ));
    }

    #[test]
    fn truncated_payload_propagates() {
        // Int tag with only 3 payload bytes.
        let bytes = [TAG_INT, 1, 2, 3];
        let err = read_pool(&mut Cursor::new(&bytes), 1, None).unwrap_err();
        assert!(matches!(err, LoadError::TruncatedInput { .. }));
    }

    #[test]
    fn cache_shares_repeated_strings() {
        let cache = StringCache::new();
        let bytes = encode(&[
            Constant::Str(Arc::from("dup")),
            Constant::Str(Arc::from("dup")),
        ]);

        let pool = read_pool(&mut Cursor::new(&bytes), 2, Some(&cache)).unwrap();
        let (Constant::Str(a), Constant::Str(b)) = (&pool[0], &pool[1]) else {
            panic!("expected two string constants");
        };
        assert!(Arc::ptr_eq(a, b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn float_bits_roundtrip_exactly() {
        let weird = f64::from_bits(0x7FF8_0000_0000_0001); // a NaN payload
        let bytes = encode(&[Constant::Float(weird)]);
        let pool = read_pool(&mut Cursor::new(&bytes), 1, None).unwrap();
        let Constant::Float(v) = pool[0] else {
            panic!("expected float");
        };
        assert_eq!(v.to_bits(), weird.to_bits());
    }
}
