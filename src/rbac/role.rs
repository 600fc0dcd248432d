use std::collections::BTreeMap;

use k8s_openapi::{
    api::rbac::v1::{PolicyRule, Role},
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use kube::{
    api::{DeleteParams, ListParams, PostParams},
    Api,
};

use super::non_empty;
use crate::{kubemodel::ObjectRef, options::KubectlOptions, Error, Result};

const KIND: &str = "Role";

/// Build role object, without touching cluster
pub fn prepare_role(
    namespace: &str,
    name: &str,
    labels: BTreeMap<String, String>,
    annotations: BTreeMap<String, String>,
    rules: Vec<PolicyRule>,
) -> Role {
    Role {
        metadata: ObjectMeta {
            name: Some(name.to_owned()),
            namespace: Some(namespace.to_owned()),
            labels: non_empty(labels),
            annotations: non_empty(annotations),
            ..Default::default()
        },
        rules: Some(rules),
    }
}

pub async fn create_role(options: &KubectlOptions, role: &Role) -> Result<()> {
    let namespace = role
        .metadata
        .namespace
        .as_deref()
        .unwrap_or_else(|| options.namespace_or_default());
    let name = role.metadata.name.as_deref().unwrap_or_default();
    log::debug!("Creating {}", ObjectRef::namespaced(KIND, namespace, name));

    let api: Api<Role> = Api::namespaced(options.client().await?, namespace);
    api.create(&PostParams::default(), role)
        .await
        .map_err(Error::Cluster)?;
    Ok(())
}

pub async fn get_role(options: &KubectlOptions, namespace: &str, name: &str) -> Result<Role> {
    let api: Api<Role> = Api::namespaced(options.client().await?, namespace);
    api.get(name)
        .await
        .map_err(|e| Error::from_kube(e, ObjectRef::namespaced(KIND, namespace, name)))
}

/// Delete existing role, deleting absent role is an error
pub async fn delete_role(options: &KubectlOptions, namespace: &str, name: &str) -> Result<()> {
    let object = ObjectRef::namespaced(KIND, namespace, name);
    log::debug!("Deleting {}", object);

    let api: Api<Role> = Api::namespaced(options.client().await?, namespace);
    api.delete(name, &DeleteParams::default())
        .await
        .map_err(|e| Error::from_kube(e, object))?;
    Ok(())
}

/// List roles in namespace, filtered by selectors in `params`
pub async fn list_roles(
    options: &KubectlOptions,
    namespace: &str,
    params: &ListParams,
) -> Result<Vec<Role>> {
    log::trace!(
        "Listing roles in {} matching {:?}",
        namespace,
        params.label_selector
    );
    let api: Api<Role> = Api::namespaced(options.client().await?, namespace);
    let list = api.list(params).await.map_err(Error::Cluster)?;
    Ok(list.items)
}
