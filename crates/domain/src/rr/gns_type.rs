use std::fmt;
use std::str::FromStr;

/// The type tag carried by a resource record, either a legacy DNS type
/// (IANA numbering, stored verbatim inside a GNS block) or a type native
/// to GNS itself.
///
/// GNS-native numbers follow the convention used by the `gnunet-rs`
/// client bindings (`PKEY` at `65536` and onward); this repository is not
/// derived from upstream GNUnet source, so these constants are a
/// self-consistent supplement rather than a claim of bit-exact parity
/// with any particular GNUnet release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GNSType(pub u32);

impl GNSType {
    // Legacy, DNS-compatible types (IANA numbers).
    pub const A: GNSType = GNSType(1);
    pub const NS: GNSType = GNSType(2);
    pub const CNAME: GNSType = GNSType(5);
    pub const SOA: GNSType = GNSType(6);
    pub const PTR: GNSType = GNSType(12);
    pub const MX: GNSType = GNSType(15);
    pub const TXT: GNSType = GNSType(16);
    pub const AAAA: GNSType = GNSType(28);
    pub const DNSKEY: GNSType = GNSType(48);
    pub const TLSA: GNSType = GNSType(52);
    pub const CAA: GNSType = GNSType(257);

    // GNS-native types.
    pub const PKEY: GNSType = GNSType(65536);
    pub const NICK: GNSType = GNSType(65537);
    pub const LEHO: GNSType = GNSType(65538);
    pub const VPN: GNSType = GNSType(65539);
    pub const GNS2DNS: GNSType = GNSType(65540);
    pub const EDKEY: GNSType = GNSType(65541);
    pub const REDIRECT: GNSType = GNSType(65542);
    pub const BOX: GNSType = GNSType(65543);
    pub const DNS_CNAME: GNSType = GNSType(65544);

    /// Wildcard used by the client API and by `requested_types` filters to
    /// mean "every type".
    pub const ANY: GNSType = GNSType(0);

    pub const fn is_zone_delegation(self) -> bool {
        matches!(self, GNSType::PKEY | GNSType::EDKEY)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GNSType::A => "A",
            GNSType::NS => "NS",
            GNSType::CNAME => "CNAME",
            GNSType::SOA => "SOA",
            GNSType::PTR => "PTR",
            GNSType::MX => "MX",
            GNSType::TXT => "TXT",
            GNSType::AAAA => "AAAA",
            GNSType::DNSKEY => "DNSKEY",
            GNSType::TLSA => "TLSA",
            GNSType::CAA => "CAA",
            GNSType::PKEY => "PKEY",
            GNSType::NICK => "NICK",
            GNSType::LEHO => "LEHO",
            GNSType::VPN => "VPN",
            GNSType::GNS2DNS => "GNS2DNS",
            GNSType::EDKEY => "EDKEY",
            GNSType::REDIRECT => "REDIRECT",
            GNSType::BOX => "BOX",
            GNSType::DNS_CNAME => "CNAME_GNS",
            GNSType::ANY => "ANY",
            GNSType(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for GNSType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GNSType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "A" => GNSType::A,
            "NS" => GNSType::NS,
            "CNAME" => GNSType::CNAME,
            "SOA" => GNSType::SOA,
            "PTR" => GNSType::PTR,
            "MX" => GNSType::MX,
            "TXT" => GNSType::TXT,
            "AAAA" => GNSType::AAAA,
            "DNSKEY" => GNSType::DNSKEY,
            "TLSA" => GNSType::TLSA,
            "CAA" => GNSType::CAA,
            "PKEY" => GNSType::PKEY,
            "NICK" => GNSType::NICK,
            "LEHO" => GNSType::LEHO,
            "VPN" => GNSType::VPN,
            "GNS2DNS" => GNSType::GNS2DNS,
            "EDKEY" => GNSType::EDKEY,
            "REDIRECT" => GNSType::REDIRECT,
            "BOX" => GNSType::BOX,
            "CNAME_GNS" | "DNS_CNAME" => GNSType::DNS_CNAME,
            "ANY" => GNSType::ANY,
            other => return Err(format!("unknown GNS record type: {other}")),
        })
    }
}

/// A set of requested types passed to a lookup; `Any` matches everything.
#[derive(Debug, Clone)]
pub enum TypeList {
    Any,
    Only(Vec<GNSType>),
}

impl TypeList {
    pub fn matches(&self, ty: GNSType) -> bool {
        match self {
            TypeList::Any => true,
            TypeList::Only(types) => types.contains(&ty),
        }
    }
}
