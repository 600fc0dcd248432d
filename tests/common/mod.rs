#![allow(dead_code)]

use std::{collections::BTreeMap, ffi::OsString};

use k8s_openapi::{
    api::core::v1::{Namespace, ServiceAccount},
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use kube::{api::PostParams, Api};
use kuberole::{
    kubectl_apply_from_string, options::kube_config_path_from_home_dir, run_kubectl,
    util::scoped_name, KubectlOptions,
};

pub const TEST_ROLE: &str = "test-role";
pub const TEST_ROLE_BINDING: &str = "test-role-binding";
pub const TEST_SERVICE_ACCOUNT: &str = "test-service-account";

pub fn test_role_name(namespace: &str) -> String {
    scoped_name(namespace, TEST_ROLE)
}

pub fn test_role_binding_name(namespace: &str) -> String {
    scoped_name(namespace, TEST_ROLE_BINDING)
}

pub fn test_service_account_name(namespace: &str) -> String {
    scoped_name(namespace, TEST_SERVICE_ACCOUNT)
}

pub fn test_labels() -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert("gruntwork.io/test-key".to_owned(), "value".to_owned());
    labels.insert("gruntwork.io/test-key-two".to_owned(), "value-two".to_owned());
    labels
}

/// Role granting pod read, secret read and port-forward
pub fn example_role_yaml(name: &str, namespace: &str) -> String {
    format!(
        r#"---
apiVersion: rbac.authorization.k8s.io/v1
kind: Role
metadata:
  name: {name}
  namespace: {namespace}
rules:
- apiGroups:
  - ""
  resources:
  - pods
  verbs:
  - get
  - list
- apiGroups:
  - ""
  resources:
  - secrets
  verbs:
  - get
- apiGroups:
  - ""
  resources:
  - pods/portforward
  verbs:
  - create
"#,
        name = name,
        namespace = namespace,
    )
}

pub fn kubectl_options() -> KubectlOptions {
    kubectl_options_for(std::env::var_os("KUBECONFIG"))
}

/// `KUBECONFIG` may hold a path list, kube and kubectl resolve it themselves
pub fn kubectl_options_for(kubeconfig_env: Option<OsString>) -> KubectlOptions {
    let config_path = match kubeconfig_env {
        Some(_) => None,
        None => kube_config_path_from_home_dir().ok(),
    };
    KubectlOptions::new(None, config_path, None)
}

pub fn unique_id() -> String {
    let id = uuid::Uuid::new_v4().to_simple().to_string();
    id[..8].to_owned()
}

/// Namespace removed from cluster on drop, errors are ignored
pub struct TestNamespace {
    pub name: String,
    options: KubectlOptions,
}

impl TestNamespace {
    pub async fn create(options: &KubectlOptions) -> Self {
        let name = unique_id();
        let client = options.client().await.unwrap();
        let api: Api<Namespace> = Api::all(client);
        api.create(
            &PostParams::default(),
            &Namespace {
                metadata: ObjectMeta {
                    name: Some(name.clone()),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .await
        .unwrap();
        Self {
            name,
            options: options.clone(),
        }
    }

    /// Options targeting this namespace
    pub fn options(&self) -> KubectlOptions {
        self.options.with_namespace(&self.name)
    }
}

impl Drop for TestNamespace {
    fn drop(&mut self) {
        let _ = run_kubectl(
            &self.options,
            &["delete", "namespace", self.name.as_str(), "--wait=false"],
        );
    }
}

pub async fn create_service_account(options: &KubectlOptions, namespace: &str, name: &str) {
    let client = options.client().await.unwrap();
    let api: Api<ServiceAccount> = Api::namespaced(client, namespace);
    api.create(
        &PostParams::default(),
        &ServiceAccount {
            metadata: ObjectMeta {
                name: Some(name.to_owned()),
                ..Default::default()
            },
            ..Default::default()
        },
    )
    .await
    .unwrap();
}

/// Apply example role into namespace, returning applied manifest
pub fn apply_example_role(options: &KubectlOptions, namespace: &str) -> String {
    let manifest = example_role_yaml(&test_role_name(namespace), namespace);
    kubectl_apply_from_string(options, &manifest).unwrap();
    manifest
}
