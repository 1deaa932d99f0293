use std::collections::HashMap;

use gns_domain::{GNSType, GnsError, GnsResult, RecordSet, ResourceRecord, TypeList, ZonePublic};

use super::{Handler, HandlerContext};

/// `PKEY`/`EDKEY`: re-roots resolution into the delegated zone. Sole
/// record in its block; forbidden at the apex label (spec §4.4 table).
#[derive(Default)]
pub struct ZoneKeyHandler {
    pub zone: Option<ZonePublic>,
    record: Option<ResourceRecord>,
}

impl Handler for ZoneKeyHandler {
    fn name(&self) -> &'static str {
        "ZoneKey"
    }

    fn add(&mut self, rec: &ResourceRecord, ctx: &HandlerContext) -> GnsResult<()> {
        if ctx.is_apex {
            return Err(GnsError::InvalidZoneKey);
        }
        if self.zone.is_some() {
            return Err(GnsError::InvalidZoneKey);
        }
        self.zone = Some(ZonePublic::from_bytes(&rec.data)?);
        self.record = Some(rec.clone());
        Ok(())
    }

    fn coexist(&self, counts: &HashMap<GNSType, usize>, ctx: &HandlerContext) -> bool {
        !ctx.is_apex && counts.len() == 1 && counts.values().sum::<usize>() == 1
    }

    fn records(&self, requested: &TypeList) -> RecordSet {
        match &self.record {
            Some(rec) if requested.matches(rec.record_type) => RecordSet::new(vec![rec.clone()]),
            _ => RecordSet::default(),
        }
    }
}
