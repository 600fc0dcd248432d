use std::{collections::BTreeMap, convert::TryFrom, path::PathBuf};

use kube::{
    config::{KubeConfigOptions, Kubeconfig},
    Client, Config,
};

use crate::{Error, Result};

pub const DEFAULT_NAMESPACE: &str = "default";

/// Addresses a cluster, both for api client and for spawned kubectl
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KubectlOptions {
    /// Kubeconfig context, current context is used if unset
    pub context_name: Option<String>,
    /// Kubeconfig file, inferred from environment if unset
    pub config_path: Option<PathBuf>,
    pub namespace: Option<String>,
    /// Additional environment for kubectl invocations
    pub env: BTreeMap<String, String>,
}

impl KubectlOptions {
    pub fn new(
        context_name: Option<String>,
        config_path: Option<PathBuf>,
        namespace: Option<String>,
    ) -> Self {
        Self {
            context_name,
            config_path,
            namespace,
            env: BTreeMap::new(),
        }
    }

    pub fn with_namespace(&self, namespace: &str) -> Self {
        Self {
            namespace: Some(namespace.to_owned()),
            ..self.clone()
        }
    }

    pub fn namespace_or_default(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Build api client for cluster pointed by these options
    pub async fn client(&self) -> Result<Client> {
        let config = match &self.config_path {
            Some(path) => {
                log::trace!("Loading kubeconfig from {}", path.display());
                let kubeconfig = Kubeconfig::read_from(path).map_err(Error::Config)?;
                let options = KubeConfigOptions {
                    context: self.context_name.clone(),
                    ..Default::default()
                };
                Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(Error::Config)?
            }
            None if self.context_name.is_some() => {
                let options = KubeConfigOptions {
                    context: self.context_name.clone(),
                    ..Default::default()
                };
                Config::from_kubeconfig(&options)
                    .await
                    .map_err(Error::Config)?
            }
            None => Config::infer().await.map_err(Error::Config)?,
        };
        Client::try_from(config).map_err(Error::Config)
    }
}

/// Kubeconfig location used by kubectl when nothing else is specified
pub fn kube_config_path_from_home_dir() -> Result<PathBuf> {
    let mut path = dirs::home_dir().ok_or(Error::MissingHome)?;
    path.push(".kube");
    path.push("config");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_fallback() {
        let options = KubectlOptions::default();
        assert_eq!(options.namespace_or_default(), "default");
        let options = options.with_namespace("ns1");
        assert_eq!(options.namespace_or_default(), "ns1");
    }

    #[test]
    fn with_namespace_keeps_rest() {
        let mut options = KubectlOptions::new(
            Some("kind-test".to_owned()),
            Some(PathBuf::from("/tmp/kubeconfig")),
            None,
        );
        options.env.insert("HTTPS_PROXY".to_owned(), "localhost:3128".to_owned());
        let scoped = options.with_namespace("ns1");
        assert_eq!(scoped.context_name, options.context_name);
        assert_eq!(scoped.config_path, options.config_path);
        assert_eq!(scoped.env, options.env);
        assert_eq!(scoped.namespace.as_deref(), Some("ns1"));
    }

    #[test]
    fn home_kubeconfig() {
        if let Ok(path) = kube_config_path_from_home_dir() {
            assert!(path.ends_with(".kube/config"));
        }
    }
}
