use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Locally configured root zones: names that resolve step 2b (spec
/// §4.6) recognizes directly, mapping a root label to a zTLD text form
/// rather than requiring it to be embedded in the query or found in the
/// local identity store.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RootZonesConfig {
    /// Root label -> zTLD string, e.g. `"gnu" = "000G0037FH3QTBCK..."`.
    #[serde(default)]
    pub zones: HashMap<String, String>,
}

impl RootZonesConfig {
    pub fn lookup(&self, label: &str) -> Option<&str> {
        self.zones.get(label).map(String::as_str)
    }
}
