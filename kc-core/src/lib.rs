pub mod clean;
pub mod direct;
pub mod error;
pub mod kubectl;
pub mod matcher;
pub mod settings;

pub use clean::{Context, ContextSpec, KubeConfig, DEFAULT_NAMESPACE};
pub use direct::update_context_namespace;
pub use error::{Error, Result};
pub use kubectl::{resolve_namespaces, Kubectl, KubectlCli, FALLBACK_NAMESPACES};
pub use matcher::{find_context, Match};
pub use settings::Settings;
