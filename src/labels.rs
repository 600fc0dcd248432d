use std::collections::BTreeMap;

use kube::api::ListParams;

/// Equality-based selector matching all given labels
///
/// Pairs are ordered by key, so equal maps always produce equal selectors.
pub fn labels_to_selector(labels: &BTreeMap<String, String>) -> String {
    labels
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(",")
}

/// List parameters selecting objects with all given labels
pub fn labels_to_list_params(labels: &BTreeMap<String, String>) -> ListParams {
    let params = ListParams::default();
    if labels.is_empty() {
        return params;
    }
    params.labels(&labels_to_selector(labels))
}
