use std::collections::HashMap;

use gns_domain::{GNSType, GnsError, GnsResult, RecordSet, ResourceRecord, TypeList};

use super::{Handler, HandlerContext};

/// `NICK`: only valid at the apex label, at most one non-shadow record.
#[derive(Default)]
pub struct NickHandler {
    record: Option<ResourceRecord>,
}

impl Handler for NickHandler {
    fn name(&self) -> &'static str {
        "NICK"
    }

    fn add(&mut self, rec: &ResourceRecord, ctx: &HandlerContext) -> GnsResult<()> {
        if !ctx.is_apex {
            return Err(GnsError::InvalidRecordBody(
                "NICK is only valid at a zone's apex label".into(),
            ));
        }
        if self.record.is_some() {
            return Err(GnsError::InvalidRecordBody(
                "only one non-shadow NICK record is allowed".into(),
            ));
        }
        self.record = Some(rec.clone());
        Ok(())
    }

    fn coexist(&self, counts: &HashMap<GNSType, usize>, ctx: &HandlerContext) -> bool {
        ctx.is_apex && counts.get(&GNSType::NICK) == Some(&1)
    }

    fn records(&self, requested: &TypeList) -> RecordSet {
        match &self.record {
            Some(rec) if requested.matches(rec.record_type) => RecordSet::new(vec![rec.clone()]),
            _ => RecordSet::default(),
        }
    }
}
