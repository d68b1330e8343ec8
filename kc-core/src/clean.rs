//! The subset of a kubeconfig that context switching needs. Read-only; the
//! write path goes through [`crate::direct`] so nothing else is lost.

use std::{fs, path::Path};

use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::{Error, Result};

pub const DEFAULT_NAMESPACE: &str = "default";

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextSpec {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cluster: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub context: ContextSpec,
}

impl Context {
    /// The namespace kubectl would use, treating a missing or empty field
    /// as `default`.
    pub fn namespace_or_default(&self) -> &str {
        match self.context.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => ns,
            _ => DEFAULT_NAMESPACE,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct KubeConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_context: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub contexts: Vec<Context>,
}

impl KubeConfig {
    pub fn from_yaml(path: &Path, data: &str) -> Result<Self> {
        serde_yaml::from_str(data).map_err(|source| Error::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Reads the file fresh from disk. An empty context list is reported as
    /// [`Error::EmptyConfig`] rather than handed back as an empty menu.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_yaml(path, &data)?;

        debug!(
            path = %path.display(),
            contexts = config.contexts.len(),
            current = %config.current_context,
            "loaded kubeconfig"
        );

        if config.contexts.is_empty() {
            return Err(Error::EmptyConfig);
        }
        Ok(config)
    }

    pub fn is_current(&self, name: &str) -> bool {
        self.current_context == name
    }
}

// kubectl writes `contexts: null` for an empty list.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
