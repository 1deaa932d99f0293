use thiserror::Error;

/// Error taxonomy for the GNS resolution pipeline.
///
/// Mirrors spec §7: crypto/block errors are fatal for the current
/// resolution step, transport errors are retryable, DNS errors are final
/// once fallback has been chosen, and missing/expired blocks are not
/// errors at all (they resolve to an empty record set upstream).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GnsError {
    // -- Input --
    #[error("bad zone key: {0}")]
    BadZone(String),
    #[error("bad label: {0}")]
    BadLabel(String),
    #[error("unknown top-level zone: {0}")]
    UnknownTLD(String),

    // -- Crypto --
    #[error("signature verification failed")]
    BadSignature,
    #[error("derived key computation failed: {0}")]
    BadDerivedKey(String),
    #[error("block decryption failed")]
    DecryptFailed,

    // -- Block / record-set --
    #[error("block has expired")]
    BlockExpired,
    #[error("invalid record type: {0}")]
    InvalidRecordType(u32),
    #[error("invalid record body: {0}")]
    InvalidRecordBody(String),
    #[error("invalid mix of record types in block")]
    InvalidRecordMix,
    #[error("invalid zone key record")]
    InvalidZoneKey,
    #[error("invalid CNAME record")]
    InvalidCNAME,
    #[error("invalid VPN record")]
    InvalidVPN,
    #[error("record set truncated")]
    Truncated,
    #[error("record set has a bad count field")]
    BadCount,
    #[error("record set padding is not zero")]
    NonZeroPadding,
    #[error("relative expiration underflowed against publication time")]
    RelativeExpirationUnderflow,

    // -- Transport --
    #[error("collaborator service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("invalid response type from collaborator service")]
    InvalidResponseType,
    #[error("invalid correlation id in collaborator response")]
    InvalidID,

    // -- DNS --
    #[error("no DNS servers could be resolved for fallback")]
    NoDNSQueries,
    #[error("all DNS fallback queries returned empty results")]
    NoDNSResults,
    #[error("DNS fallback timed out")]
    DNSTimedOut,

    // -- Control --
    #[error("resolution interrupted")]
    Interrupted,
    #[error("resolution cancelled")]
    Cancelled,
}

pub type GnsResult<T> = Result<T, GnsError>;
