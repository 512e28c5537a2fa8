//! Text encodings for the binary values that appear in a schema file.
//!
//! Addresses are written in their base58 form. Secret keys are written as a
//! string holding a bracketed, comma-joined list of decimal bytes, e.g.
//! `"[12,201,7]"`, which is what the TypeScript tooling around the oracle
//! program produces for a `Uint8Array`.

/// Fixed length of on-chain name buffers.
pub const NAME_LEN: usize = 32;

/// Permission codes understood by the oracle program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SwitchboardPermission {
    PermitOracleHeartbeat = 1,
    PermitOracleQueueUsage = 2,
}

impl SwitchboardPermission {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(SwitchboardPermission::PermitOracleHeartbeat),
            2 => Some(SwitchboardPermission::PermitOracleQueueUsage),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SwitchboardPermission::PermitOracleHeartbeat => "PERMIT_ORACLE_HEARTBEAT",
            SwitchboardPermission::PermitOracleQueueUsage => "PERMIT_ORACLE_QUEUE_USAGE",
        }
    }
}

/// Human readable tag for a permission code. Unknown codes map to `NONE`.
pub fn to_permission_string(code: u32) -> &'static str {
    SwitchboardPermission::from_code(code).map_or("NONE", SwitchboardPermission::as_str)
}

/// Decodes a NUL padded name buffer, dropping the trailing padding only.
pub fn to_utf8(buffer: &[u8]) -> String {
    let end = buffer
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    String::from_utf8_lossy(&buffer[..end]).into_owned()
}

/// Encodes a name into a NUL padded buffer, truncating to the last whole
/// character that fits in [`NAME_LEN`] bytes.
pub fn to_name_buffer(name: &str) -> [u8; NAME_LEN] {
    let mut buffer = [0u8; NAME_LEN];
    let mut len = name.len().min(NAME_LEN);
    while !name.is_char_boundary(len) {
        len -= 1;
    }
    buffer[..len].copy_from_slice(&name.as_bytes()[..len]);
    buffer
}

/// `"[1,2,3]"` for `[1, 2, 3]`.
pub fn encode_secret_key(bytes: &[u8]) -> String {
    let joined = bytes
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("[{joined}]")
}

pub fn decode_secret_key(text: &str) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Serde adapter for a required address.
pub mod pubkey {
    use std::str::FromStr;

    use anchor_lang::prelude::Pubkey;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(key)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let text = String::deserialize(deserializer)?;
        Pubkey::from_str(&text)
            .map_err(|e| de::Error::custom(format!("invalid address {text}: {e}")))
    }
}

/// Serde adapter for an optional address.
pub mod pubkey_option {
    use anchor_lang::prelude::Pubkey;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        key: &Option<Pubkey>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match key {
            Some(key) => super::pubkey::serialize(key, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Pubkey>, D::Error> {
        #[derive(Deserialize)]
        struct Wrapped(#[serde(with = "super::pubkey")] Pubkey);

        Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(key)| key))
    }
}

/// Serde adapter for an optional secret key.
///
/// Reads both the canonical string form and a plain JSON array of numbers.
pub mod secret_key_option {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Bytes(Vec<u8>),
    }

    pub fn serialize<S: Serializer>(
        key: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match key {
            Some(bytes) => serializer.serialize_str(&super::encode_secret_key(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Repr::Bytes(bytes)) => Ok(Some(bytes)),
            Some(Repr::Text(text)) => super::decode_secret_key(&text)
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid secretKey {text}: {e}"))),
        }
    }
}
