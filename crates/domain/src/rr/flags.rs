use bitflags::bitflags;

bitflags! {
    /// Per-record flags carried alongside a [`crate::rr::record::ResourceRecord`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GNSFlags: u16 {
        /// Resolution must fail if this record cannot be processed, rather
        /// than being silently skipped.
        const CRITICAL = 0x0001;
        /// Only delivered once its non-shadow same-type sibling has expired.
        const SHADOW = 0x0002;
        /// Ignored for handler co-existence counting.
        const SUPPLEMENTAL = 0x0004;
        /// `expire` is a relative offset (microseconds from publication)
        /// rather than an absolute timestamp.
        const RELATIVE_EXPIRATION = 0x0008;
        /// Never leaves the owning zone's local store (not delivered to
        /// remote resolvers, excluded from published record sets).
        const PRIVATE = 0x0010;
    }
}

impl GNSFlags {
    pub fn is_shadow(self) -> bool {
        self.contains(GNSFlags::SHADOW)
    }

    pub fn is_supplemental(self) -> bool {
        self.contains(GNSFlags::SUPPLEMENTAL)
    }

    pub fn is_relative_expiration(self) -> bool {
        self.contains(GNSFlags::RELATIVE_EXPIRATION)
    }
}
