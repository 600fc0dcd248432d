mod role;
mod role_binding;

use std::collections::BTreeMap;

pub use role::{create_role, delete_role, get_role, list_roles, prepare_role};
pub use role_binding::{create_role_binding, prepare_role_binding};

pub const RBAC_API_GROUP: &str = "rbac.authorization.k8s.io";

/// Api server omits empty maps, so do we
fn non_empty(map: BTreeMap<String, String>) -> Option<BTreeMap<String, String>> {
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}
