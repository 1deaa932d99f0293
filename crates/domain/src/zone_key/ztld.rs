//! Textual form of a zone identifier (spec §4.2 "zTLD").
//!
//! Encodes the 36-byte `(type_tag ‖ key)` tuple as base-32 using a fixed,
//! Crockford-style 32-character alphabet (digits then uppercase letters,
//! omitting `I`, `L`, `O`, `U` to avoid transcription ambiguity) —
//! matching the alphabet GNUnet's own zTLD text forms use.

use std::sync::LazyLock;

use data_encoding::{Encoding, Specification};

use crate::errors::{GnsError, GnsResult};

const ALPHABET: &str = "0123456789ABCDEFGHJKMNPQRSTVWXYZ";

static ZTLD_ENCODING: LazyLock<Encoding> = LazyLock::new(|| {
    let mut spec = Specification::new();
    spec.symbols.push_str(ALPHABET);
    spec.padding = None;
    spec.encoding().expect("fixed 32-symbol alphabet is valid")
});

pub fn encode(bytes: &[u8]) -> String {
    ZTLD_ENCODING.encode(bytes)
}

pub fn decode(text: &str) -> GnsResult<Vec<u8>> {
    ZTLD_ENCODING
        .decode(text.as_bytes())
        .map_err(|e| GnsError::BadZone(format!("invalid zTLD encoding: {e}")))
}
