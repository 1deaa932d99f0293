/// The reserved apex label of a zone: the record set attached directly to
/// the zone's public key, with no further label.
pub const APEX_LABEL: &str = "@";

/// Splits a dotted name into its labels in root-first order (the
/// rightmost label of the input becomes the first element), matching the
/// resolver's label-by-label walk in spec §4.6 step 1.
///
/// `"leaf.inter.root"` becomes `["root", "inter", "leaf"]`.
pub fn split_to_root_first(name: &str) -> Vec<String> {
    let mut labels: Vec<String> = name.split('.').map(|s| s.to_string()).collect();
    labels.reverse();
    labels
}

pub fn is_apex(label: &str) -> bool {
    label == APEX_LABEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_reverses() {
        assert_eq!(
            split_to_root_first("leaf.inter.root"),
            vec!["root", "inter", "leaf"]
        );
    }

    #[test]
    fn single_label() {
        assert_eq!(split_to_root_first("root"), vec!["root"]);
    }
}
