//! The fixed command alphabet and its tokenizer.
//!
//! A command string is scanned left to right, one ASCII character at a
//! time. Non-ASCII characters and ASCII characters outside the alphabet
//! (spaces, punctuation) contribute nothing. Digits are not commands on
//! their own: they accumulate into a pending multiplier that the next
//! `+` or `-` consumes.

use std::str::Chars;

/// Rotation direction of a turn command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnDirection {
    /// `+`: toward the positive angle convention (clockwise on screen, +Y to +X).
    Right,
    /// `-`: toward the negative angle convention.
    Left,
}

impl TurnDirection {
    /// The character this direction is written as.
    pub fn symbol(self) -> char {
        match self {
            Self::Right => '+',
            Self::Left => '-',
        }
    }

    /// `1.0` for [`Right`](Self::Right), `-1.0` for [`Left`](Self::Left).
    pub fn sign(self) -> f64 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }
}

/// A single token of the command alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// An ASCII letter. Whether it is a nonterminal, a draw (`F`/`f`),
    /// a move (`G`/`g`) or inert depends on the rule table and the caller.
    Symbol(char),
    /// `+` / `-` with the multiplier accumulated from preceding digits.
    /// A multiplier of `0` means no digits were given.
    Turn {
        direction: TurnDirection,
        multiplier: u64,
    },
    /// `[`: save position and heading.
    Push,
    /// `]`: restore the most recently saved position and heading.
    Pop,
    /// `<`: increment the scale depth.
    EnterScale,
    /// `>`: decrement the scale depth.
    ExitScale,
    /// `|`: draw forward regardless of the preceding `F`/`G`.
    ForcedDraw,
}

impl Command {
    /// Whether a symbol is a terminal draw-forward (`F`, case-insensitive).
    pub fn is_draw(symbol: char) -> bool {
        symbol.eq_ignore_ascii_case(&'F')
    }

    /// Whether a symbol is a terminal move-forward (`G`, case-insensitive).
    pub fn is_move(symbol: char) -> bool {
        symbol.eq_ignore_ascii_case(&'G')
    }

    /// The effective turn factor: the multiplier, or `1` when none was given.
    pub fn turn_factor(direction: TurnDirection, multiplier: u64) -> f64 {
        let magnitude = if multiplier == 0 { 1.0 } else { multiplier as f64 };
        direction.sign() * magnitude
    }
}

/// Iterator over the [`Command`]s of a string.
///
/// Holds the pending digit multiplier between tokens. A multiplier still
/// pending when the input ends is discarded.
#[derive(Clone, Debug)]
pub struct Commands<'a> {
    chars: Chars<'a>,
    multiplier: u64,
}

impl<'a> Commands<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
            multiplier: 0,
        }
    }

    fn take_multiplier(&mut self) -> u64 {
        std::mem::take(&mut self.multiplier)
    }
}

impl Iterator for Commands<'_> {
    type Item = Command;

    fn next(&mut self) -> Option<Command> {
        for c in self.chars.by_ref() {
            if !c.is_ascii() {
                continue;
            }
            let command = match c {
                c if c.is_ascii_alphabetic() => Command::Symbol(c),
                '+' => Command::Turn {
                    direction: TurnDirection::Right,
                    multiplier: self.take_multiplier(),
                },
                '-' => Command::Turn {
                    direction: TurnDirection::Left,
                    multiplier: self.take_multiplier(),
                },
                '[' => Command::Push,
                ']' => Command::Pop,
                '<' => Command::EnterScale,
                '>' => Command::ExitScale,
                '|' => Command::ForcedDraw,
                '0'..='9' => {
                    let digit = u64::from(c as u8 - b'0');
                    self.multiplier = self.multiplier.saturating_mul(10).saturating_add(digit);
                    continue;
                }
                _ => continue,
            };
            return Some(command);
        }
        None
    }
}

/// Tokenizes `input` into [`Command`]s.
pub fn commands(input: &str) -> Commands<'_> {
    Commands::new(input)
}
