//! The numbered-menu flow used when no context is named on the command line.

use std::io::Write;
use std::path::Path;

use anyhow::Context as _;
use kc_core::{resolve_namespaces, Context, Error, KubeConfig, Kubectl};
use tracing::debug;

use crate::menu::{self, Choice};
use crate::prompt::Prompter;
use crate::{style, switch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Cancelled,
    Switched {
        context: String,
        namespace: Option<String>,
    },
}

#[derive(Debug)]
enum State<'a> {
    ShowContexts,
    SelectContext,
    ContextChosen(&'a Context),
    AskNamespace(&'a Context),
    ShowNamespaces(&'a Context),
    SelectNamespace(&'a Context, Vec<String>),
    CustomNamespace(&'a Context),
    NamespaceChosen(&'a Context, String),
    Done(Outcome),
}

pub struct Session<'a, K, P, W> {
    pub kc: &'a KubeConfig,
    pub path: &'a Path,
    pub kubectl: &'a K,
    pub prompter: &'a mut P,
    pub out: &'a mut W,
    /// Namespace given with `-n`; applied without asking once a context is
    /// picked.
    pub namespace: Option<&'a str>,
}

impl<'a, K: Kubectl, P: Prompter, W: Write> Session<'a, K, P, W> {
    pub fn run(mut self) -> anyhow::Result<Outcome> {
        let mut state = State::ShowContexts;
        loop {
            debug!(?state, "interactive step");
            state = match state {
                State::Done(outcome) => return Ok(outcome),
                state => self.step(state)?,
            };
        }
    }

    fn step(&mut self, state: State<'a>) -> anyhow::Result<State<'a>> {
        let kc = self.kc;
        Ok(match state {
            State::ShowContexts => {
                menu::contexts(self.out, kc)?;
                State::SelectContext
            }
            State::SelectContext => {
                let len = kc.contexts.len();
                let answer = self.ask(&format!("Select context [1-{len}] (0 to cancel)"))?;
                match menu::parse_choice(&answer, len)? {
                    Choice::Zero => {
                        writeln!(self.out)?;
                        writeln!(self.out, "{}", style::warning("Operation cancelled"))?;
                        State::Done(Outcome::Cancelled)
                    }
                    Choice::Item(i) => State::ContextChosen(&kc.contexts[i]),
                }
            }
            State::ContextChosen(ctx) => {
                switch::use_context(self.kubectl, &ctx.name, self.out)?;
                match self.namespace {
                    Some(ns) => State::NamespaceChosen(ctx, ns.to_owned()),
                    None => State::AskNamespace(ctx),
                }
            }
            State::AskNamespace(ctx) => {
                // a closed stdin reads as "no"
                let answer = self
                    .ask("Do you want to set a namespace? [y/N]")
                    .unwrap_or_default();
                if menu::is_yes(&answer) {
                    State::ShowNamespaces(ctx)
                } else {
                    State::Done(switched(ctx, None))
                }
            }
            State::ShowNamespaces(ctx) => {
                let namespaces = resolve_namespaces(self.kubectl, &ctx.name);
                menu::namespaces(self.out, &namespaces, ctx.namespace_or_default())?;
                State::SelectNamespace(ctx, namespaces)
            }
            State::SelectNamespace(ctx, namespaces) => {
                let len = namespaces.len();
                let answer = self.ask(&format!("Select namespace [1-{len}] (0 for custom)"))?;
                match menu::parse_choice(&answer, len)? {
                    Choice::Zero => State::CustomNamespace(ctx),
                    Choice::Item(i) => State::NamespaceChosen(ctx, namespaces[i].clone()),
                }
            }
            State::CustomNamespace(ctx) => {
                let answer = self
                    .prompter
                    .read_line("Enter namespace name")
                    .context("reading namespace name")?;
                let name = answer.trim();
                if name.is_empty() {
                    return Err(Error::InvalidInput("namespace name is empty".into()).into());
                }
                State::NamespaceChosen(ctx, name.to_owned())
            }
            State::NamespaceChosen(ctx, ns) => {
                writeln!(self.out)?;
                switch::set_namespace(self.path, &ctx.name, &ns, self.out)?;
                State::Done(switched(ctx, Some(ns)))
            }
            State::Done(outcome) => State::Done(outcome),
        })
    }

    fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        menu::rule(self.out)?;
        self.out.flush()?;
        self.prompter.read_line(prompt).context("reading selection")
    }
}

fn switched(ctx: &Context, namespace: Option<String>) -> Outcome {
    Outcome::Switched {
        context: ctx.name.clone(),
        namespace,
    }
}
