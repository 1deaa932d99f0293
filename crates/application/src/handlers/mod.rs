//! Per-type record handlers and the co-existence normalization pipeline
//! (spec §4.4).
//!
//! Each GNS type that needs special behavior gets a handler; everything
//! else falls through to [`plain::PlainHandler`], which just carries the
//! record through to the final answer untouched.

mod cname;
mod gns2dns;
mod gns_box;
mod leho;
mod nick;
mod plain;
mod redirect;
mod vpn;
mod zone_key;

use std::collections::HashMap;

use gns_domain::{GNSFlags, GNSType, GnsError, GnsResult, RecordSet, ResourceRecord, TypeList};

pub use cname::CnameHandler;
pub use gns2dns::Gns2DnsHandler;
pub use gns_box::{BoxEntry, BoxHandler};
pub use leho::LehoHandler;
pub use nick::NickHandler;
pub use plain::PlainHandler;
pub use redirect::RedirectHandler;
pub use vpn::VpnHandler;
pub use zone_key::ZoneKeyHandler;

/// Context a handler needs beyond the record itself: whether the block
/// being processed lives at its zone's apex label, and which labels
/// remain to be resolved after this one.
pub struct HandlerContext<'a> {
    pub is_apex: bool,
    pub remaining_labels: &'a [String],
}

/// The capability set every per-type handler exposes (spec §4.4).
pub trait Handler: Send {
    fn name(&self) -> &'static str;

    /// Folds one record of this handler's type into its state. May
    /// reject a malformed or (where forbidden) duplicate record.
    fn add(&mut self, rec: &ResourceRecord, ctx: &HandlerContext) -> GnsResult<()>;

    /// Whether this handler's presence is consistent with the rest of
    /// the block's (post-normalization) per-type record counts.
    fn coexist(&self, counts: &HashMap<GNSType, usize>, ctx: &HandlerContext) -> bool;

    /// This handler's contribution to the final filtered answer.
    fn records(&self, requested: &TypeList) -> RecordSet;
}

/// A built handler, keyed by GNS type. Carries the priority-dispatch
/// handlers (`ZoneKey`, `Gns2Dns`, `Box`) as distinguishable variants so
/// the resolver's step 4f can match on them directly, per the fixed
/// priority order of spec §4.6 ("first match wins").
pub enum BuiltHandler {
    ZoneKey(ZoneKeyHandler),
    Gns2Dns(Gns2DnsHandler),
    Box(BoxHandler),
    Leho(LehoHandler),
    Cname(CnameHandler),
    Vpn(VpnHandler),
    Redirect(RedirectHandler),
    Nick(NickHandler),
    Plain(PlainHandler),
}

impl BuiltHandler {
    fn new_for(ty: GNSType) -> Self {
        match ty {
            GNSType::PKEY | GNSType::EDKEY => BuiltHandler::ZoneKey(ZoneKeyHandler::default()),
            GNSType::GNS2DNS => BuiltHandler::Gns2Dns(Gns2DnsHandler::default()),
            GNSType::BOX => BuiltHandler::Box(BoxHandler::default()),
            GNSType::LEHO => BuiltHandler::Leho(LehoHandler::default()),
            GNSType::DNS_CNAME => BuiltHandler::Cname(CnameHandler::default()),
            GNSType::VPN => BuiltHandler::Vpn(VpnHandler::default()),
            GNSType::REDIRECT => BuiltHandler::Redirect(RedirectHandler::default()),
            GNSType::NICK => BuiltHandler::Nick(NickHandler::default()),
            _ => BuiltHandler::Plain(PlainHandler::default()),
        }
    }

    fn inner(&self) -> &dyn Handler {
        match self {
            BuiltHandler::ZoneKey(h) => h,
            BuiltHandler::Gns2Dns(h) => h,
            BuiltHandler::Box(h) => h,
            BuiltHandler::Leho(h) => h,
            BuiltHandler::Cname(h) => h,
            BuiltHandler::Vpn(h) => h,
            BuiltHandler::Redirect(h) => h,
            BuiltHandler::Nick(h) => h,
            BuiltHandler::Plain(h) => h,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Handler {
        match self {
            BuiltHandler::ZoneKey(h) => h,
            BuiltHandler::Gns2Dns(h) => h,
            BuiltHandler::Box(h) => h,
            BuiltHandler::Leho(h) => h,
            BuiltHandler::Cname(h) => h,
            BuiltHandler::Vpn(h) => h,
            BuiltHandler::Redirect(h) => h,
            BuiltHandler::Nick(h) => h,
            BuiltHandler::Plain(h) => h,
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner().name()
    }

    pub fn records(&self, requested: &TypeList) -> RecordSet {
        self.inner().records(requested)
    }
}

/// Builds the handler list for a block's effective record set (spec
/// §4.4 passes 1-4).
pub fn build_handlers(
    records: &[ResourceRecord],
    now: u64,
    published_at: u64,
    ctx: &HandlerContext,
) -> GnsResult<HashMap<GNSType, BuiltHandler>> {
    // Pass 1: collect shadow records per type.
    let mut shadows: HashMap<GNSType, Vec<&ResourceRecord>> = HashMap::new();
    for rec in records {
        if rec.flags.is_shadow() {
            shadows.entry(rec.record_type).or_default().push(rec);
        }
    }

    // Pass 2: substitute expired non-shadow records with a live shadow
    // sibling, or drop them.
    let mut effective: Vec<ResourceRecord> = Vec::new();
    for rec in records {
        if rec.flags.is_shadow() {
            continue;
        }
        if rec.is_expired(now, published_at)? {
            if let Some(candidates) = shadows.get(&rec.record_type) {
                if let Some(replacement) = candidates
                    .iter()
                    .find(|s| !s.is_expired(now, published_at).unwrap_or(true))
                {
                    let mut repl = (*replacement).clone();
                    repl.flags.remove(GNSFlags::SHADOW);
                    effective.push(repl);
                }
            }
        } else {
            effective.push(rec.clone());
        }
    }

    // Pass 3: skip supplemental records; bump counts, instantiate/extend
    // handlers for the rest.
    let mut counts: HashMap<GNSType, usize> = HashMap::new();
    let mut handlers: HashMap<GNSType, BuiltHandler> = HashMap::new();
    for rec in &effective {
        if rec.flags.is_supplemental() {
            continue;
        }
        *counts.entry(rec.record_type).or_insert(0) += 1;
        let handler = handlers
            .entry(rec.record_type)
            .or_insert_with(|| BuiltHandler::new_for(rec.record_type));
        handler.inner_mut().add(rec, ctx)?;
    }

    // Pass 4: every handler must accept the final per-type counts.
    for handler in handlers.values() {
        if !handler.inner().coexist(&counts, ctx) {
            return Err(GnsError::InvalidRecordMix);
        }
    }

    Ok(handlers)
}
