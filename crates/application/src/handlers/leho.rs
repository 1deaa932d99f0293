use std::collections::HashMap;

use gns_domain::{GNSType, GnsError, GnsResult, RecordSet, ResourceRecord, TypeList};

use super::{Handler, HandlerContext};

/// `LEHO`: legacy hostname, exactly one per block, coexists with others.
#[derive(Default)]
pub struct LehoHandler {
    record: Option<ResourceRecord>,
}

impl Handler for LehoHandler {
    fn name(&self) -> &'static str {
        "LEHO"
    }

    fn add(&mut self, rec: &ResourceRecord, _ctx: &HandlerContext) -> GnsResult<()> {
        if self.record.is_some() {
            return Err(GnsError::InvalidRecordBody(
                "only one LEHO record is allowed per block".into(),
            ));
        }
        self.record = Some(rec.clone());
        Ok(())
    }

    fn coexist(&self, counts: &HashMap<GNSType, usize>, _ctx: &HandlerContext) -> bool {
        counts.get(&GNSType::LEHO) == Some(&1)
    }

    fn records(&self, requested: &TypeList) -> RecordSet {
        match &self.record {
            Some(rec) if requested.matches(rec.record_type) => RecordSet::new(vec![rec.clone()]),
            _ => RecordSet::default(),
        }
    }
}
