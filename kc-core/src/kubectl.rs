use std::{
    path::PathBuf,
    process::{Command, Output},
};

use tracing::debug;

use crate::{Error, Result};

/// Offered when the cluster can't be asked for its namespaces.
pub const FALLBACK_NAMESPACES: [&str; 4] =
    ["default", "kube-system", "kube-public", "kube-node-lease"];

const NAMESPACE_JSONPATH: &str = "jsonpath={.items[*].metadata.name}";

/// The external Kubernetes CLI. kc never talks to a cluster itself.
pub trait Kubectl {
    /// `config use-context NAME`
    fn use_context(&self, name: &str) -> Result<()>;

    /// Live namespace names for `context`.
    fn namespaces(&self, context: &str) -> Result<Vec<String>>;
}

#[derive(Debug, Clone)]
pub struct KubectlCli {
    program: PathBuf,
}

impl KubectlCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        let program = self.program.display().to_string();
        debug!(%program, ?args, "running");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| Error::Spawn {
                program: program.clone(),
                source,
            })?;

        debug!(%program, status = %output.status, "finished");
        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(Error::ExternalTool {
                program,
                status: output.status,
                output: combined,
            });
        }
        Ok(output)
    }
}

impl Kubectl for KubectlCli {
    fn use_context(&self, name: &str) -> Result<()> {
        self.run(&["config", "use-context", name]).map(|_| ())
    }

    fn namespaces(&self, context: &str) -> Result<Vec<String>> {
        let output = self.run(&[
            "--context",
            context,
            "get",
            "namespaces",
            "-o",
            NAMESPACE_JSONPATH,
        ])?;
        Ok(parse_namespaces(&String::from_utf8_lossy(&output.stdout)))
    }
}

fn parse_namespaces(output: &str) -> Vec<String> {
    output.split_whitespace().map(str::to_owned).collect()
}

/// Namespaces to offer for `context`. Failures are not errors here: the user
/// can always type a custom name, so a fixed list is offered instead.
pub fn resolve_namespaces(kubectl: &impl Kubectl, context: &str) -> Vec<String> {
    match kubectl.namespaces(context) {
        Ok(namespaces) if namespaces.is_empty() => {
            debug!(context, "cluster reported no namespaces");
            vec![FALLBACK_NAMESPACES[0].to_owned()]
        }
        Ok(namespaces) => namespaces,
        Err(err) => {
            debug!(context, error = %err, "namespace query failed, using fallback list");
            FALLBACK_NAMESPACES.iter().map(|ns| ns.to_string()).collect()
        }
    }
}
