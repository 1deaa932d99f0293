use std::collections::HashMap;

use gns_domain::{GNSType, GnsResult, RecordSet, ResourceRecord, TypeList};

use super::{Handler, HandlerContext};

/// Catch-all for every type with no special co-existence rule (the
/// legacy DNS-compatible types and any unrecognized GNS-native type):
/// carried straight through to the final answer.
#[derive(Default)]
pub struct PlainHandler {
    records: Vec<ResourceRecord>,
}

impl Handler for PlainHandler {
    fn name(&self) -> &'static str {
        "Plain"
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
