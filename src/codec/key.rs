use super::KeyEncoder;
use crate::error::{GeoRangeError, Result};
use crate::subspace::Subspace;
use crate::tuple;
use bytes::Bytes;

/// Default [`KeyEncoder`]: the cell code is the last tuple element after the
/// subspace prefix.
///
/// Keys must be laid out as `subspace + (.., code)`. Extra elements may come
/// before the code but not after it: a key packed as `(code, id)` sorts inside
/// the planned ranges yet decodes `id` as the cell code (or fails with
/// `NotAnInteger`). Stores with another layout should read their own index
/// with [`tuple::unpack_uint`] or plug in a different [`KeyEncoder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TupleKeyEncoder;

impl KeyEncoder for TupleKeyEncoder {
    fn encode_key(&self, subspace: &Subspace, code: u64) -> Bytes {
        subspace.pack_u64(code)
    }

    fn decode_key(&self, subspace: &Subspace, key: &[u8]) -> Result<u64> {
        let rest = subspace.strip_prefix(key).ok_or_else(|| {
            GeoRangeError::MalformedKey(format!("key is outside subspace {}", subspace))
        })?;
        tuple::unpack_uint(rest, -1)
    }
}
