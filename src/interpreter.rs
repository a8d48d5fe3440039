//! Interpreter that walks a [`Grammar`] with a [`Turtle`] and emits into a [`LineSink`].
//!
//! The entry point is [`Interpreter`]. Configure it with a [`RenderConfig`]
//! and call [`Interpreter::render`]; [`render`] does the same with the
//! default configuration.
//!
//! # Strategies
//!
//! [`EvaluationStrategy::Recursive`] (the default) never materializes the
//! expansion. Each nonterminal is expanded in place by re-entering the walk
//! on its rule body, one level deeper, until the grammar's
//! `evaluation_depth` is reached. Memory stays proportional to the depth.
//!
//! [`EvaluationStrategy::Materialized`] first rewrites the axiom
//! `evaluation_depth` times with [`produce_with`] and then walks the flat
//! string without further expansion. The limits and the cancel flag are
//! polled while the string is built as well as while it is walked.
//!
//! Both apply one scale-depth increment per substitution and draw the same
//! figure, except when a rule body ends in digits (see [`crate::producer`]).

use crate::command::{Command, commands};
use crate::error::{RenderError, Result};
use crate::grammar::Grammar;
use crate::producer::produce_with;
use crate::sink::LineSink;
use crate::turtle::Turtle;
use glam::DVec2;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// How the grammar is expanded before it reaches the turtle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EvaluationStrategy {
    /// Expand rules on demand while walking.
    #[default]
    Recursive,
    /// Produce the full command string first, then walk it flat.
    Materialized,
}

/// Configuration for grammar interpretation.
///
/// The defaults impose no limits: a grammar with a large evaluation depth
/// will run for as long as its expansion takes.
#[derive(Clone, Debug, Default)]
pub struct RenderConfig {
    /// Which expansion path to use.
    pub strategy: EvaluationStrategy,
    /// Hard ceiling on dispatched commands (letters, turns, brackets, markers).
    /// With [`EvaluationStrategy::Materialized`], tokens scanned while
    /// building the flat string count as well.
    pub max_commands: Option<u64>,
    /// Hard ceiling on the materialized string length, in bytes.
    /// Only used by [`EvaluationStrategy::Materialized`].
    pub max_expansion_len: Option<usize>,
    /// Polled once per command or scanned token; a `true` value aborts the render.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl RenderConfig {
    pub fn with_strategy(mut self, strategy: EvaluationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_commands(mut self, limit: u64) -> Self {
        self.max_commands = Some(limit);
        self
    }

    pub fn with_max_expansion_len(mut self, limit: usize) -> Self {
        self.max_expansion_len = Some(limit);
        self
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }
}

/// Counters gathered during a successful render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Commands dispatched, nonterminal expansions included. Includes the
    /// tokens scanned during a materialized expansion.
    pub commands: u64,
    /// `line_to` calls emitted.
    pub segments: u64,
    /// `move_to` calls emitted, the initial one included.
    pub moves: u64,
    /// Deepest rule nesting reached by the walk.
    pub max_recursion: u32,
}

/// Interprets a [`Grammar`] into [`LineSink`] calls.
#[derive(Clone, Debug, Default)]
pub struct Interpreter {
    config: RenderConfig,
}

impl Interpreter {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draws `grammar` into `sink`.
    ///
    /// A fresh [`Turtle`] starts at the origin with the grammar's initial
    /// heading and depth scale, and an initial `move_to(origin)` is emitted.
    /// Calls made before an error remain in the sink.
    ///
    /// The recursive strategy nests one call frame per rule level, so a rule
    /// that keeps expanding (`A` to `A`) with a very large `evaluation_depth`
    /// overflows the thread's stack and aborts the process. Set
    /// [`RenderConfig::with_max_commands`] for untrusted grammars: every
    /// level dispatches at least one command, so the limit also caps the depth.
    ///
    /// # Errors
    ///
    /// Fails only when a limit or the cancel flag of the [`RenderConfig`]
    /// trips. Malformed command strings are never an error.
    pub fn render<S: LineSink + ?Sized>(&self, grammar: &Grammar, sink: &mut S) -> Result<RenderStats> {
        let _span = tracing::debug_span!(
            "render",
            axiom = %grammar.axiom,
            rules = grammar.rules.len(),
            depth = grammar.evaluation_depth,
            strategy = ?self.config.strategy
        )
        .entered();

        let mut counter = CountingSink {
            inner: sink,
            segments: 0,
            moves: 0,
        };
        let mut turtle = Turtle::new(&mut counter);
        turtle.set_heading(grammar.initial_heading);
        turtle.set_depth_scale(grammar.depth_scale);
        turtle.move_to(DVec2::ZERO);

        let mut walk = Walk {
            grammar,
            config: &self.config,
            turtle,
            commands: 0,
            max_recursion: 0,
        };

        let result = match self.config.strategy {
            EvaluationStrategy::Recursive => {
                walk.walk(&grammar.axiom, 0, grammar.evaluation_depth)
            }
            EvaluationStrategy::Materialized => {
                let flat = produce_with(
                    &grammar.axiom,
                    &grammar.rules,
                    grammar.evaluation_depth,
                    self.config.max_expansion_len,
                    || walk.check(),
                );
                let flat = match flat {
                    Ok(flat) => flat,
                    Err(err) => {
                        tracing::warn!(%err, commands = walk.commands, "expansion aborted");
                        return Err(err);
                    }
                };
                tracing::debug!(len = flat.len(), "expansion materialized");
                walk.walk(&flat, 0, 0)
            }
        };
        let (commands, max_recursion) = (walk.commands, walk.max_recursion);
        if let Err(err) = &result {
            tracing::warn!(%err, commands, "render aborted");
        }
        result?;

        let stats = RenderStats {
            commands,
            segments: counter.segments,
            moves: counter.moves,
            max_recursion,
        };
        tracing::debug!(?stats, "render finished");
        Ok(stats)
    }
}

/// Draws `grammar` into `sink` with the default [`RenderConfig`].
///
/// # Errors
///
/// None in practice: the default configuration sets no limits.
pub fn render<S: LineSink + ?Sized>(grammar: &Grammar, sink: &mut S) -> Result<RenderStats> {
    Interpreter::default().render(grammar, sink)
}

/// Forwards to the caller's sink while counting calls.
struct CountingSink<'a, S: LineSink + ?Sized> {
    inner: &'a mut S,
    segments: u64,
    moves: u64,
}

impl<S: LineSink + ?Sized> LineSink for CountingSink<'_, S> {
    fn move_to(&mut self, point: DVec2) {
        self.moves += 1;
        self.inner.move_to(point);
    }

    fn line_to(&mut self, point: DVec2) {
        self.segments += 1;
        self.inner.line_to(point);
    }
}

/// State of one render: the turtle plus the guards.
struct Walk<'g, 't, S: LineSink + ?Sized> {
    grammar: &'g Grammar,
    config: &'g RenderConfig,
    turtle: Turtle<'t, S>,
    commands: u64,
    max_recursion: u32,
}

impl<S: LineSink + ?Sized> Walk<'_, '_, S> {
    fn check(&mut self) -> Result<()> {
        self.commands += 1;
        if let Some(limit) = self.config.max_commands
            && self.commands > limit
        {
            return Err(RenderError::CommandLimitExceeded { limit });
        }
        if let Some(flag) = &self.config.cancel
            && flag.load(Ordering::Relaxed)
        {
            return Err(RenderError::Cancelled);
        }
        Ok(())
    }

    fn walk(&mut self, rule: &str, depth: u32, max_depth: u32) -> Result<()> {
        self.max_recursion = self.max_recursion.max(depth);
        let grammar = self.grammar;
        let step = grammar.step_length;

        for command in commands(rule) {
            self.check()?;
            match command {
                Command::Symbol(symbol) => {
                    if depth < max_depth
                        && let Some(body) = grammar.rule(symbol)
                    {
                        self.turtle.enter_scale();
                        self.walk(body, depth + 1, max_depth)?;
                        self.turtle.exit_scale();
                    } else if Command::is_draw(symbol) {
                        self.turtle.pen_down();
                        self.turtle.forward(step);
                    } else if Command::is_move(symbol) {
                        self.turtle.pen_up();
                        self.turtle.forward(step);
                    }
                    // Other letters name rules but have no geometric effect.
                }
                Command::Turn {
                    direction,
                    multiplier,
                } => {
                    let factor = Command::turn_factor(direction, multiplier);
                    self.turtle.turn(grammar.turn_angle * factor);
                }
                Command::Push => self.turtle.save_state(),
                Command::Pop => {
                    if !self.turtle.restore_state() {
                        tracing::debug!(depth, "unmatched `]` ignored");
                    }
                }
                Command::EnterScale => self.turtle.enter_scale(),
                Command::ExitScale => self.turtle.exit_scale(),
                Command::ForcedDraw => {
                    self.turtle.pen_down();
                    self.turtle.forward(step);
                }
            }
        }
        Ok(())
    }
}
