use uuid::Uuid;

use crate::error::{Error, Result};

/// Decodes a 16 byte binary id into its hyphenated UUID form.
pub fn binary_to_uuid_string(bytes: &[u8]) -> Result<String> {
    let uuid = Uuid::from_slice(bytes).map_err(|_| Error::InvalidBinaryId { len: bytes.len() })?;
    Ok(uuid.hyphenated().to_string())
}

pub fn uuid_to_binary(uuid: &Uuid) -> Vec<u8> {
    uuid.as_bytes().to_vec()
}
