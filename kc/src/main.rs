mod interactive;
mod menu;
mod prompt;
mod style;
mod switch;
#[cfg(test)]
mod testing;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use kc_core::{KubeConfig, KubectlCli, Settings};
use tracing_subscriber::EnvFilter;

use crate::interactive::Session;
use crate::prompt::ConsolePrompter;

const EXAMPLES: &str = "\
Examples:
  kc                          # Interactive mode
  kc prod-cluster             # Switch to context
  kc prod-cluster default     # Switch context and set namespace
  kc -c prod-cluster          # Switch to context (flag style)
  kc -c prod-cluster -n dev   # Switch context and set namespace (flag style)";

/// Kubernetes Context and Namespace Switcher
#[derive(Parser, Debug)]
#[command(version, disable_version_flag = true, after_help = EXAMPLES)]
struct Cli {
    /// Context name to switch to
    #[arg(short = 'c', long = "context", value_name = "NAME")]
    context: Option<String>,

    /// Namespace to set on the chosen context
    #[arg(short = 'n', long = "namespace", value_name = "NAMESPACE")]
    namespace: Option<String>,

    /// Kubeconfig to use instead of $KUBECONFIG or ~/.kube/config
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,

    /// Log what kc is doing to stderr
    #[arg(long)]
    verbose: bool,

    /// Show version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    #[arg(value_name = "CONTEXT")]
    context_arg: Option<String>,

    #[arg(value_name = "NAMESPACE")]
    namespace_arg: Option<String>,
}

impl Cli {
    /// Flags win; positionals only fill what the flags left empty. Empty
    /// strings count as not given.
    fn target(&self) -> (Option<&str>, Option<&str>) {
        fn given(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.is_empty())
        }
        let context = given(&self.context).or(given(&self.context_arg));
        let namespace = given(&self.namespace).or(given(&self.namespace_arg));
        (context, namespace)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = Settings::from_env(cli.kubeconfig.clone())?;
    let kc = KubeConfig::load(&settings.kubeconfig)?;
    let kubectl = KubectlCli::new(&settings.kubectl);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.target() {
        (Some(context), namespace) => switch::run(
            &kc,
            &settings.kubeconfig,
            context,
            namespace,
            &kubectl,
            &mut out,
            &mut io::stderr(),
        ),
        (None, namespace) => {
            let outcome = Session {
                kc: &kc,
                path: &settings.kubeconfig,
                kubectl: &kubectl,
                prompter: &mut ConsolePrompter,
                out: &mut out,
                namespace,
            }
            .run()?;
            tracing::debug!(?outcome, "interactive session finished");
            Ok(())
        }
    }
}

fn report(err: &anyhow::Error) {
    if err.downcast_ref::<switch::Reported>().is_some() {
        return;
    }
    let mut stderr = io::stderr();
    for cause in err.chain() {
        if let Some(kc_core::Error::ExternalTool { output, .. }) = cause.downcast_ref::<kc_core::Error>() {
            let _ = write!(stderr, "{output}");
        }
    }
    let _ = writeln!(stderr, "{}", style::error(format!("Error: {err:#}")));
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("kc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_means_interactive() {
        assert_eq!(parse(&[]).target(), (None, None));
    }

    #[test]
    fn positionals_act_like_flags() {
        assert_eq!(
            parse(&["prod", "dev"]).target(),
            (Some("prod"), Some("dev"))
        );
        assert_eq!(
            parse(&["-c", "prod", "-n", "dev"]).target(),
            (Some("prod"), Some("dev"))
        );
    }

    #[test]
    fn flags_win_over_positionals() {
        assert_eq!(
            parse(&["-c", "prod", "other", "ns"]).target(),
            (Some("prod"), Some("ns"))
        );
    }

    #[test]
    fn namespace_flag_alone_stays_interactive() {
        assert_eq!(parse(&["-n", "dev"]).target(), (None, Some("dev")));
    }

    #[test]
    fn empty_context_means_interactive() {
        assert_eq!(parse(&["-c", ""]).target(), (None, None));
        assert_eq!(parse(&["-c", "", "prod"]).target(), (Some("prod"), None));
        assert_eq!(parse(&["", "-n", ""]).target(), (None, None));
    }

    #[test]
    fn version_flag_short_and_long() {
        for flag in ["-v", "--version"] {
            let err = Cli::try_parse_from(["kc", flag]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
            assert!(!err.use_stderr());
        }
    }

    #[test]
    fn unknown_flag_is_an_error() {
        let err = Cli::try_parse_from(["kc", "--bogus"]).unwrap_err();
        assert!(err.use_stderr());
    }
}
