use std::collections::BTreeMap;

use k8s_openapi::{
    api::rbac::v1::{RoleBinding, RoleRef, Subject},
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use kube::{api::PostParams, Api};

use super::non_empty;
use crate::{kubemodel::ObjectRef, options::KubectlOptions, Error, Result};

const KIND: &str = "RoleBinding";

/// Build role binding object, without touching cluster
pub fn prepare_role_binding(
    namespace: &str,
    name: &str,
    labels: BTreeMap<String, String>,
    annotations: BTreeMap<String, String>,
    subjects: Vec<Subject>,
    role_ref: RoleRef,
) -> RoleBinding {
    RoleBinding {
        metadata: ObjectMeta {
            name: Some(name.to_owned()),
            namespace: Some(namespace.to_owned()),
            labels: non_empty(labels),
            annotations: non_empty(annotations),
            ..Default::default()
        },
        subjects: Some(subjects),
        role_ref,
    }
}

pub async fn create_role_binding(
    options: &KubectlOptions,
    role_binding: &RoleBinding,
) -> Result<()> {
    let namespace = role_binding
        .metadata
        .namespace
        .as_deref()
        .unwrap_or_else(|| options.namespace_or_default());
    let name = role_binding.metadata.name.as_deref().unwrap_or_default();
    log::debug!(
        "Creating {} for {} {}",
        ObjectRef::namespaced(KIND, namespace, name),
        role_binding.role_ref.kind,
        role_binding.role_ref.name
    );

    let api: Api<RoleBinding> = Api::namespaced(options.client().await?, namespace);
    api.create(&PostParams::default(), role_binding)
        .await
        .map_err(Error::Cluster)?;
    Ok(())
}
