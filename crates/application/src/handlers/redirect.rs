use std::collections::HashMap;

use gns_domain::{GNSType, GnsResult, RecordSet, ResourceRecord, TypeList};

use super::{Handler, HandlerContext};

/// `REDIRECT`: forbidden at the apex label; other record types may only
/// appear alongside it as supplemental or fully-shadowed records, both
/// of which are already excluded from `counts` by the time `coexist` is
/// called (pass 2 drops shadowed records with no live replacement, pass
/// 3 skips supplemental ones).
#[derive(Default)]
pub struct RedirectHandler {
    records: Vec<ResourceRecord>,
}

impl Handler for RedirectHandler {
    fn name(&self) -> &'static str {
        "REDIRECT"
    }

    fn add(&mut self, rec: &ResourceRecord, _ctx: &HandlerContext) -> GnsResult<()> {
        self.records.push(rec.clone());
        Ok(())
    }

    fn coexist(&self, counts: &HashMap<GNSType, usize>, ctx: &HandlerContext) -> bool {
        !ctx.is_apex && counts.len() == 1 && counts.contains_key(&GNSType::REDIRECT)
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
