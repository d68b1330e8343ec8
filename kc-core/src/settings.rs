use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{Error, Result};

pub const KUBECONFIG_ENV: &str = "KUBECONFIG";
pub const KUBECTL_ENV: &str = "KC_KUBECTL";
pub const DEFAULT_KUBECTL: &str = "kubectl";

/// Where the kubeconfig lives and which binary applies context switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub kubeconfig: PathBuf,
    pub kubectl: PathBuf,
}

impl Settings {
    /// Resolves settings from the process environment. An explicit path
    /// (from the command line) wins over `KUBECONFIG`.
    pub fn from_env(explicit_kubeconfig: Option<PathBuf>) -> Result<Self> {
        let kubeconfig = match explicit_kubeconfig {
            Some(path) => path,
            None => kubeconfig_path(env::var_os(KUBECONFIG_ENV), dirs::home_dir())?,
        };
        let kubectl = kubectl_program(env::var_os(KUBECTL_ENV));

        debug!(kubeconfig = %kubeconfig.display(), kubectl = %kubectl.display(), "resolved settings");

        Ok(Self {
            kubeconfig,
            kubectl,
        })
    }
}

pub fn kube_dir(home: &Path) -> PathBuf {
    home.join(".kube")
}

/// `KUBECONFIG` is taken verbatim as a single path when set and non-empty.
pub fn kubeconfig_path(env_value: Option<OsString>, home: Option<PathBuf>) -> Result<PathBuf> {
    match env_value.filter(|v| !v.is_empty()) {
        Some(path) => Ok(PathBuf::from(path)),
        None => home
            .map(|home| kube_dir(&home).join("config"))
            .ok_or(Error::NoHomeDir),
    }
}

fn kubectl_program(env_value: Option<OsString>) -> PathBuf {
    env_value
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_KUBECTL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_wins() {
        let path = kubeconfig_path(
            Some("/tmp/other-config".into()),
            Some(PathBuf::from("/home/me")),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/other-config"));
    }

    #[test]
    fn empty_env_falls_back_to_home() {
        let path = kubeconfig_path(Some("".into()), Some(PathBuf::from("/home/me"))).unwrap();
        assert_eq!(path, PathBuf::from("/home/me/.kube/config"));
    }

    #[test]
    fn no_home_is_an_error() {
        assert!(matches!(kubeconfig_path(None, None), Err(Error::NoHomeDir)));
    }

    #[test]
    fn kubectl_defaults_to_path_lookup() {
        assert_eq!(kubectl_program(None), PathBuf::from("kubectl"));
        assert_eq!(kubectl_program(Some("".into())), PathBuf::from("kubectl"));
        assert_eq!(
            kubectl_program(Some("/opt/bin/kubectl".into())),
            PathBuf::from("/opt/bin/kubectl")
        );
    }
}
