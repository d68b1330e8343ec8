use std::io::{self, Write};

use kc_core::{Error, KubeConfig};

use crate::style;

/// A parsed menu answer. `0` means "cancel" on the context menu and
/// "custom" on the namespace menu; callers decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Zero,
    /// Zero-based position in the listed items.
    Item(usize),
}

pub fn parse_choice(input: &str, len: usize) -> Result<Choice, Error> {
    let input = input.trim();
    let n: usize = input
        .parse()
        .map_err(|_| Error::InvalidInput(format!("'{input}' is not a number")))?;
    match n {
        0 => Ok(Choice::Zero),
        n if n <= len => Ok(Choice::Item(n - 1)),
        n => Err(Error::InvalidInput(format!(
            "{n} is not between 1 and {len}"
        ))),
    }
}

/// Only `y`/`Y` count as yes.
pub fn is_yes(input: &str) -> bool {
    matches!(input.trim(), "y" | "Y")
}

fn banner(w: &mut impl Write, title: &str) -> io::Result<()> {
    let width = style::RULE.chars().count();
    writeln!(w)?;
    writeln!(w, "{}", style::header(format!("╭{}╮", style::RULE)))?;
    writeln!(
        w,
        "{}",
        style::header(format!("│{:^width$}│", title, width = width))
    )?;
    writeln!(w, "{}", style::header(format!("╰{}╯", style::RULE)))?;
    writeln!(w)
}

pub fn rule(w: &mut impl Write) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{}", style::header(style::RULE))
}

fn entry(w: &mut impl Write, number: usize, name: &str, current: bool) -> io::Result<()> {
    if current {
        writeln!(
            w,
            " {} [{}] {}",
            style::current(style::CURRENT_MARKER),
            style::index(number),
            style::current(name)
        )
    } else {
        writeln!(w, "   [{}] {}", style::index(number), name)
    }
}

pub fn contexts(w: &mut impl Write, kc: &KubeConfig) -> io::Result<()> {
    banner(w, "Kubernetes Context Switcher")?;

    for (i, ctx) in kc.contexts.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        entry(w, i + 1, &ctx.name, kc.is_current(&ctx.name))?;
        writeln!(w, "{}", style::muted(format!("      ├─ cluster: {}", ctx.context.cluster)))?;
        writeln!(w, "{}", style::muted(format!("      └─ user: {}", ctx.context.user)))?;
    }
    Ok(())
}

pub fn namespaces(w: &mut impl Write, namespaces: &[String], current: &str) -> io::Result<()> {
    banner(w, "Available Namespaces")?;

    for (i, ns) in namespaces.iter().enumerate() {
        entry(w, i + 1, ns, ns == current)?;
    }

    writeln!(w)?;
    writeln!(
        w,
        "   [{}] {}",
        style::index(0),
        style::muted("Enter custom namespace")
    )
}

/// Bullet list of every context, current one marked.
pub fn available_contexts(w: &mut impl Write, kc: &KubeConfig) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "Available contexts:")?;
    for ctx in &kc.contexts {
        let marker = if kc.is_current(&ctx.name) {
            style::current(style::CURRENT_MARKER).to_string()
        } else {
            " ".to_owned()
        };
        writeln!(w, "  {marker} {}", ctx.name)?;
    }
    Ok(())
}
