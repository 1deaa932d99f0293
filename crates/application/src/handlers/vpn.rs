use std::collections::HashMap;

use gns_domain::{GNSType, GnsResult, RecordSet, ResourceRecord, TypeList};

use super::{Handler, HandlerContext};

/// `VPN`: coexists with anything.
#[derive(Default)]
pub struct VpnHandler {
    records: Vec<ResourceRecord>,
}

impl Handler for VpnHandler {
    fn name(&self) -> &'static str {
        "VPN"
    }

    fn add(&mut self, rec: &ResourceRecord, _ctx: &HandlerContext) -> GnsResult<()> {
        self.records.push(rec.clone());
        Ok(())
    }

    fn coexist(&self, _counts: &HashMap<GNSType, usize>, _ctx: &HandlerContext) -> bool {
        true
    }

    fn records(&self, requested: &TypeList) -> RecordSet {
        RecordSet::new(
            self.records
                .iter()
                .filter(|rec| requested.matches(rec.record_type))
                .cloned()
                .collect(),
        )
    }
}
