use tracing::debug;

use crate::{clean::Context, Error, Result};

/// How a requested name was resolved to a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match<'a> {
    Exact(&'a Context),
    /// The only context whose name contains the request. Callers echo this
    /// back so the user sees which context was picked.
    Inferred(&'a Context),
}

impl<'a> Match<'a> {
    pub fn context(self) -> &'a Context {
        match self {
            Match::Exact(ctx) | Match::Inferred(ctx) => ctx,
        }
    }

    pub fn name(self) -> &'a str {
        &self.context().name
    }
}

/// Exact name first, then a unique substring match.
pub fn find_context<'a>(contexts: &'a [Context], name: &str) -> Result<Match<'a>> {
    if let Some(ctx) = contexts.iter().find(|ctx| ctx.name == name) {
        debug!(name, "exact context match");
        return Ok(Match::Exact(ctx));
    }

    let candidates: Vec<&Context> = contexts
        .iter()
        .filter(|ctx| ctx.name.contains(name))
        .collect();

    match candidates.as_slice() {
        [] => Err(Error::NotFound(name.to_owned())),
        [only] => {
            debug!(name, matched = %only.name, "inferred context from partial name");
            Ok(Match::Inferred(*only))
        }
        many => Err(Error::Ambiguous {
            name: name.to_owned(),
            matches: many.iter().map(|ctx| ctx.name.clone()).collect(),
        }),
    }
}
