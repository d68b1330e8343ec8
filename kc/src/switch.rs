use std::fmt;
use std::io::Write;
use std::path::Path;

use anyhow::Context as _;
use kc_core::{find_context, update_context_namespace, Error, KubeConfig, Kubectl, Match};

use crate::{menu, style};

/// A lookup failure whose message and hint have already been written out.
#[derive(Debug)]
pub struct Reported(pub Error);

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Reported {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

pub fn use_context(kubectl: &impl Kubectl, name: &str, out: &mut impl Write) -> anyhow::Result<()> {
    kubectl
        .use_context(name)
        .context("switching context")?;
    writeln!(out)?;
    writeln!(
        out,
        "{} {}",
        style::success(format!("{} Successfully switched to context:", style::CHECK)),
        style::highlight(name)
    )?;
    Ok(())
}

pub fn set_namespace(
    path: &Path,
    context: &str,
    namespace: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    update_context_namespace(path, context, namespace).context("updating namespace")?;
    writeln!(
        out,
        "{} {}",
        style::success(format!("{} Namespace set to:", style::CHECK)),
        style::highlight(namespace)
    )?;
    Ok(())
}

/// Switches to the context named (fully or partially) by `name` without
/// asking anything, then applies `namespace` if given.
pub fn run(
    kc: &KubeConfig,
    path: &Path,
    name: &str,
    namespace: Option<&str>,
    kubectl: &impl Kubectl,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<()> {
    let found = match find_context(&kc.contexts, name) {
        Ok(found) => found,
        Err(e) if !matches!(e, Error::NotFound(_) | Error::Ambiguous { .. }) => {
            return Err(e.into())
        }
        Err(e) => {
            match &e {
                Error::NotFound(_) => {
                    writeln!(err, "{}", style::error(format!("Error: {e}")))?;
                    menu::available_contexts(err, kc)?;
                }
                Error::Ambiguous { matches, .. } => {
                    writeln!(err, "{}", style::error(format!("Error: {e}:")))?;
                    for m in matches {
                        writeln!(err, "  - {m}")?;
                    }
                }
                _ => {}
            }
            return Err(Reported(e).into());
        }
    };

    if let Match::Inferred(ctx) = found {
        writeln!(out, "{}", style::muted(format!("Using context: {}", ctx.name)))?;
    }

    let selected = found.name();
    use_context(kubectl, selected, out)?;

    if let Some(namespace) = namespace {
        set_namespace(path, selected, namespace, out)?;
    }
    Ok(())
}
