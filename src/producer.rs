//! Materializing expansion: rewrite the axiom `n` times into one flat string.
//!
//! Every substitution is wrapped in `<` `>` so the flat string carries the
//! same scale depth the recursive interpreter applies per rule level.
//! Walking the result at evaluation depth 0 therefore draws the same figure
//! as interpreting the grammar on the fly at evaluation depth `n`, with one
//! exception: digits at the end of a rule body. The recursive walk discards
//! them when the body ends, while the flat string carries them on to the
//! next `+` or `-` after the substitution.

use crate::command::{Command, commands};
use crate::error::{RenderError, Result};
use crate::grammar::Grammar;
use std::collections::HashMap;
use std::convert::Infallible;

/// Applies `iterations` rewrite passes to `axiom`.
///
/// Output length can grow exponentially; no guard is applied. Use
/// [`produce_bounded`] or [`produce_with`] when the inputs are untrusted.
pub fn produce(axiom: &str, rules: &HashMap<char, String>, iterations: u32) -> String {
    let mut current = axiom.to_string();
    let mut poll = || Ok::<(), Infallible>(());
    for iteration in 0..iterations {
        let mut next = String::with_capacity(current.len() * 2);
        match rewrite(&current, rules, &mut next, usize::MAX, &mut poll) {
            Ok(_) => {}
            Err(never) => match never {},
        }
        current = next;
        tracing::trace!(iteration, len = current.len(), "rewrite pass");
    }
    current
}

/// Like [`produce`], failing as soon as the string exceeds `max_len` bytes.
///
/// # Errors
///
/// Returns [`RenderError::ExpansionLimitExceeded`] when the limit is crossed.
pub fn produce_bounded(
    axiom: &str,
    rules: &HashMap<char, String>,
    iterations: u32,
    max_len: usize,
) -> Result<String> {
    produce_with(axiom, rules, iterations, Some(max_len), || Ok(()))
}

/// Like [`produce`], calling `poll` once per scanned token.
///
/// An error from `poll` aborts the expansion and is returned as is; this is
/// how a host cancels a long expansion or caps the work spent on it.
///
/// # Errors
///
/// Returns whatever `poll` returns, or [`RenderError::ExpansionLimitExceeded`]
/// when `max_len` is given and crossed.
pub fn produce_with(
    axiom: &str,
    rules: &HashMap<char, String>,
    iterations: u32,
    max_len: Option<usize>,
    mut poll: impl FnMut() -> Result<()>,
) -> Result<String> {
    let limit = max_len.unwrap_or(usize::MAX);
    let mut current = axiom.to_string();
    for iteration in 0..iterations {
        let mut next = String::with_capacity(current.len() * 2);
        let within_limit = rewrite(&current, rules, &mut next, limit, &mut poll)
            .inspect_err(|err| tracing::warn!(iteration, %err, "expansion aborted"))?;
        if !within_limit {
            let err = RenderError::ExpansionLimitExceeded {
                len: next.len(),
                limit,
            };
            tracing::warn!(iteration, %err, "expansion aborted");
            return Err(err);
        }
        current = next;
        tracing::trace!(iteration, len = current.len(), "rewrite pass");
    }
    Ok(current)
}

impl Grammar {
    /// The axiom rewritten `iterations` times by this grammar's rules.
    pub fn produce(&self, iterations: u32) -> String {
        produce(&self.axiom, &self.rules, iterations)
    }
}

/// One rewrite pass of `current` into `next`.
///
/// Polls before every token. Stops and returns `Ok(false)` once `next`
/// grows past `limit` bytes.
fn rewrite<E, P>(
    current: &str,
    rules: &HashMap<char, String>,
    next: &mut String,
    limit: usize,
    poll: &mut P,
) -> std::result::Result<bool, E>
where
    P: FnMut() -> std::result::Result<(), E>,
{
    for command in commands(current) {
        poll()?;
        match command {
            Command::Symbol(symbol) => match rules.get(&symbol) {
                Some(replacement) => {
                    next.push('<');
                    next.push_str(replacement);
                    next.push('>');
                }
                None if Command::is_draw(symbol) => next.push('F'),
                None if Command::is_move(symbol) => next.push('G'),
                None => next.push(symbol),
            },
            Command::Turn {
                direction,
                multiplier,
            } => {
                if multiplier != 0 {
                    next.push_str(&multiplier.to_string());
                }
                next.push(direction.symbol());
            }
            Command::Push => next.push('['),
            Command::Pop => next.push(']'),
            Command::EnterScale => next.push('<'),
            Command::ExitScale => next.push('>'),
            Command::ForcedDraw => next.push('|'),
        }
        if next.len() > limit {
            return Ok(false);
        }
    }
    Ok(true)
}
