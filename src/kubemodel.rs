use std::fmt::{self, Display};

/// Identifies object in cluster
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectRef {
    // Role, RoleBinding
    pub kind: &'static str,

    pub name: String,
    pub namespace: Option<String>,
}

impl ObjectRef {
    pub fn namespaced(kind: &'static str, namespace: &str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_owned(),
            namespace: Some(namespace.to_owned()),
        }
    }
}

impl Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)?;
        if let Some(ns) = &self.namespace {
            write!(f, " in {}", ns)?;
        }
        Ok(())
    }
}
