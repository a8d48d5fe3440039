//! # lsys-turtle
//!
//! An engine-agnostic turtle interpreter for character L-Systems.
//!
//! A [`Grammar`] (axiom, rewrite rules, angles, step length) is walked by a
//! 2D [`Turtle`] that emits `move_to`/`line_to` calls into any [`LineSink`]:
//! a rasterizer, a vector path builder, or a [`PathRecorder`] in tests.
//! The crate performs no rasterization, file I/O or UI work.
//!
//! ```
//! use lsys_turtle::{Grammar, PathRecorder, render};
//!
//! let grammar = Grammar::new("F").with_rule('F', "F+F--F+F").with_evaluation_depth(3);
//! let mut path = PathRecorder::new();
//! let stats = render(&grammar, &mut path).unwrap();
//! assert_eq!(stats.segments, 64);
//! ```

pub mod command;
pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod producer;
pub mod sink;
pub mod turtle;

pub use command::*;
pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use producer::*;
pub use sink::*;
pub use turtle::*;
