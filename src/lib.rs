//! Helpers for managing RBAC roles and role bindings in kubernetes cluster
//!
//! Objects are created, fetched and removed through the api server; manifests
//! given as plain text are handed to `kubectl` unmodified.

mod error;
pub mod kubectl;
pub mod kubemodel;
pub mod labels;
pub mod options;
pub mod rbac;
pub mod util;

pub use error::{Error, Result};
pub use kubectl::{kubectl_apply_from_string, kubectl_delete_from_string, run_kubectl};
pub use labels::{labels_to_list_params, labels_to_selector};
pub use options::KubectlOptions;
pub use rbac::{
    create_role, create_role_binding, delete_role, get_role, list_roles, prepare_role,
    prepare_role_binding,
};
