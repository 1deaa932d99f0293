use std::collections::HashMap;

use gns_domain::{GNSType, GnsError, GnsResult, RecordSet, ResourceRecord, TypeList};

use super::{Handler, HandlerContext};

/// `DNS_CNAME`: sole record in its block. The spec's two worked
/// scenarios disagree on whether CNAME may coexist with supplemental
/// records; this implementation takes the stricter "sole record" rule
/// (spec §A.3 Open Question resolution).
#[derive(Default)]
pub struct CnameHandler {
    record: Option<ResourceRecord>,
}

impl Handler for CnameHandler {
    fn name(&self) -> &'static str {
        "CNAME"
    }

    fn add(&mut self, rec: &ResourceRecord, _ctx: &HandlerContext) -> GnsResult<()> {
        if self.record.is_some() {
            return Err(GnsError::InvalidCNAME);
        }
        self.record = Some(rec.clone());
        Ok(())
    }

    fn coexist(&self, counts: &HashMap<GNSType, usize>, _ctx: &HandlerContext) -> bool {
        counts.len() == 1 && counts.get(&GNSType::DNS_CNAME) == Some(&1)
    }

    fn records(&self, requested: &TypeList) -> RecordSet {
        match &self.record {
            Some(rec) if requested.matches(rec.record_type) => RecordSet::new(vec![rec.clone()]),
            _ => RecordSet::default(),
        }
    }
}
