use std::collections::HashMap;

use gns_domain::{GNSFlags, GNSType, GnsError, GnsResult, RecordSet, ResourceRecord, TypeList};

use super::{Handler, HandlerContext};

/// A single boxed record: `proto:u16 ‖ svc:u16 ‖ record_type:u32 ‖ inner_data`.
#[derive(Debug, Clone)]
pub struct BoxEntry {
    pub proto: u16,
    pub svc: u16,
    pub record_type: GNSType,
    pub data: Vec<u8>,
}

/// `BOX`: coexists with anything; only activates when resolution's
/// remaining labels are exactly `_svc._proto` and match a boxed entry's
/// protocol/service numbers (spec §4.4, §4.6 step 4f).
#[derive(Default)]
pub struct BoxHandler {
    pub entries: Vec<BoxEntry>,
}

impl BoxHandler {
    pub fn activate(&self, proto: u16, svc: u16) -> Option<ResourceRecord> {
        self.entries
            .iter()
            .find(|e| e.proto == proto && e.svc == svc)
            .map(|e| ResourceRecord::new(0, e.record_type, GNSFlags::empty(), e.data.clone()))
    }
}

impl Handler for BoxHandler {
    fn name(&self) -> &'static str {
        "BOX"
    }

    fn add(&mut self, rec: &ResourceRecord, _ctx: &HandlerContext) -> GnsResult<()> {
        if rec.data.len() < 8 {
            return Err(GnsError::InvalidRecordBody("BOX record too short".into()));
        }
        let proto = u16::from_be_bytes(rec.data[0..2].try_into().unwrap());
        let svc = u16::from_be_bytes(rec.data[2..4].try_into().unwrap());
        let record_type = u32::from_be_bytes(rec.data[4..8].try_into().unwrap());
        self.entries.push(BoxEntry {
            proto,
            svc,
            record_type: GNSType(record_type),
            data: rec.data[8..].to_vec(),
        });
        Ok(())
    }

    fn coexist(&self, _counts: &HashMap<GNSType, usize>, _ctx: &HandlerContext) -> bool {
        true
    }

    fn records(&self, requested: &TypeList) -> RecordSet {
        if requested.matches(GNSType::BOX) {
            RecordSet::new(
                self.entries
                    .iter()
                    .map(|e| {
                        let mut data = Vec::with_capacity(8 + e.data.len());
                        data.extend_from_slice(&e.proto.to_be_bytes());
                        data.extend_from_slice(&e.svc.to_be_bytes());
                        data.extend_from_slice(&e.record_type.0.to_be_bytes());
                        data.extend_from_slice(&e.data);
                        ResourceRecord::new(0, GNSType::BOX, GNSFlags::empty(), data)
                    })
                    .collect(),
            )
        } else {
            RecordSet::default()
        }
    }
}
