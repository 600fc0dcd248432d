use subprocess::PopenError;
use thiserror::Error;

use crate::{kubemodel::ObjectRef, util::IdentStr};

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(ObjectRef),
    #[error("cluster error: {0}")]
    Cluster(kube::Error),
    #[error("failed to load kubeconfig: {0}")]
    Config(kube::Error),
    #[error("home directory is unknown, can't locate kubeconfig")]
    MissingHome,
    #[error("kubectl failed:\n{0}")]
    Kubectl(IdentStr),
    #[error("kubectl binary not found in path: {0}")]
    KubectlNotFound(std::io::Error),
    #[error("spawn error: {0}")]
    Popen(PopenError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Classifies api error for a single named object
    pub(crate) fn from_kube(err: kube::Error, object: ObjectRef) -> Self {
        match err {
            kube::Error::Api(apierror) if apierror.code == 404 => Self::NotFound(object),
            e => Self::Cluster(e),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
