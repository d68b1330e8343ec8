//! The whole kubeconfig document, as used on the write path. Only the fields
//! kc touches are typed; everything else is carried through as opaque YAML.

use std::{fs, io, io::Write as _, path::Path};

use indexmap::IndexMap;
use serde::*;
use serde_yaml::Value as YamlValue;
use tracing::debug;

use crate::{Error, Result};

type Extra = IndexMap<String, YamlValue>;

// region: Context
// Typed fields are `Option<Option<T>>`/`Option<YamlValue>`: the outer `None`
// means the key was absent, so an explicit `null` is written back as `null`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ContextSpec {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub cluster: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub user: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub namespace: Option<Option<String>>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Context {
    pub name: String,
    #[serde(default)]
    pub context: ContextSpec,
    #[serde(flatten)]
    pub extra: Extra,
}
// endregion

// region: Common
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct KubeConfig {
    #[serde(
        rename = "apiVersion",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub api_version: Option<YamlValue>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub kind: Option<YamlValue>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub preferences: Option<YamlValue>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub clusters: Option<YamlValue>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub contexts: Option<Option<Vec<Context>>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub current_context: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub users: Option<YamlValue>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Only called for keys that exist, so `null` becomes `Some(null)`.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl KubeConfig {
    pub fn from_yaml(path: &Path, data: &str) -> Result<Self> {
        serde_yaml::from_str(data).map_err(|source| Error::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_yaml(path, &data)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(Error::Serialize)
    }

    pub fn context_mut(&mut self, name: &str) -> Option<&mut Context> {
        self.contexts
            .as_mut()?
            .as_mut()?
            .iter_mut()
            .find(|ctx| ctx.name == name)
    }

    /// Sets the namespace of the context called exactly `name`.
    pub fn set_namespace(&mut self, name: &str, namespace: &str) -> Result<()> {
        let context = self
            .context_mut(name)
            .ok_or_else(|| Error::NotFound(name.to_owned()))?;
        context.context.namespace = Some(Some(namespace.to_owned()));
        Ok(())
    }
}

/// Replaces the whole file with `kc`. Not atomic: a crash mid-write can leave
/// a truncated file behind, and nothing guards against concurrent writers.
pub fn write_config(kc: &KubeConfig, path: &Path) -> Result<()> {
    let data = kc.to_yaml()?;
    let write_err = |source| Error::Write {
        path: path.to_owned(),
        source,
    };

    let mut file = open_private(path).map_err(write_err)?;
    file.write_all(data.as_bytes()).map_err(write_err)?;
    file.sync_all().map_err(write_err)?;

    debug!(path = %path.display(), bytes = data.len(), "wrote kubeconfig");
    Ok(())
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies when the file is created
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Re-reads `path`, sets the namespace of `context`, and writes the document
/// back. If the context has disappeared since it was selected the file is
/// left alone and [`Error::NotFound`] is returned.
pub fn update_context_namespace(path: &Path, context: &str, namespace: &str) -> Result<()> {
    let mut kc = KubeConfig::read_from(path)?;
    kc.set_namespace(context, namespace)?;
    debug!(context, namespace, "updating context namespace");
    write_config(&kc, path)
}
// endregion
