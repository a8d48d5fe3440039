//! The grammar configuration record and a catalog of classic presets.

use crate::turtle::Angle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A character L-System plus the turtle parameters used to draw it.
///
/// Plain data: immutable for the duration of a render, serializable
/// losslessly through any serde format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Grammar {
    /// The command string walked at depth 0.
    pub axiom: String,

    /// Production rules, keyed by the symbol they replace.
    pub rules: HashMap<char, String>,

    /// Heading applied before the first command.
    pub initial_heading: Angle,

    /// Base distance of `F`, `G` and `|`.
    pub step_length: f64,

    /// Base rotation of `+` and `-`. Positive turns right.
    pub turn_angle: Angle,

    /// Per-scale-depth multiplier on the step length. Expected to be in `(0, 1]`;
    /// not enforced.
    pub depth_scale: f64,

    /// Maximum number of nested rule substitutions the interpreter performs.
    /// Growth is exponential in this value; keep it `<= 6` for branching
    /// rules and below `15` otherwise.
    pub evaluation_depth: u32,
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            axiom: "F".to_string(),
            rules: HashMap::new(),
            initial_heading: Angle::ZERO,
            step_length: 10.0,
            turn_angle: Angle::from_degrees(90.0),
            depth_scale: 1.0,
            evaluation_depth: 4,
        }
    }
}

impl Grammar {
    /// A default grammar with the given axiom and no rules.
    pub fn new(axiom: impl Into<String>) -> Self {
        Self {
            axiom: axiom.into(),
            ..Default::default()
        }
    }

    /// Adds or replaces the rule for `symbol` (builder pattern).
    pub fn with_rule(mut self, symbol: char, body: impl Into<String>) -> Self {
        self.rules.insert(symbol, body.into());
        self
    }

    pub fn with_initial_heading(mut self, heading: Angle) -> Self {
        self.initial_heading = heading;
        self
    }

    pub fn with_turn_angle(mut self, angle: Angle) -> Self {
        self.turn_angle = angle;
        self
    }

    pub fn with_step_length(mut self, length: f64) -> Self {
        self.step_length = length;
        self
    }

    pub fn with_depth_scale(mut self, scale: f64) -> Self {
        self.depth_scale = scale;
        self
    }

    pub fn with_evaluation_depth(mut self, depth: u32) -> Self {
        self.evaluation_depth = depth;
        self
    }

    /// The replacement body for `symbol`, if it has a rule.
    pub fn rule(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }
}

/// Well-known figures, ready to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    SierpinskiGasket,
    KochIsland,
    BentBigH,
    DragonCurve,
    SierpinskiMaze,
    SierpinskiSnowflake,
    PenroseTiling,
    QuadricKochIsland,
    Tree2,
}

impl Preset {
    pub const ALL: [Preset; 9] = [
        Preset::SierpinskiGasket,
        Preset::KochIsland,
        Preset::BentBigH,
        Preset::DragonCurve,
        Preset::SierpinskiMaze,
        Preset::SierpinskiSnowflake,
        Preset::PenroseTiling,
        Preset::QuadricKochIsland,
        Preset::Tree2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::SierpinskiGasket => "Sierpinski gasket",
            Self::KochIsland => "Koch island",
            Self::BentBigH => "Bent big H",
            Self::DragonCurve => "Dragon curve",
            Self::SierpinskiMaze => "Sierpinski maze",
            Self::SierpinskiSnowflake => "Sierpinski snowflake",
            Self::PenroseTiling => "Penrose tiling",
            Self::QuadricKochIsland => "Quadric Koch island",
            Self::Tree2 => "Tree-2",
        }
    }

    pub fn grammar(self) -> Grammar {
        let deg = Angle::from_degrees;
        match self {
            Self::SierpinskiGasket => Grammar::new("F--F--F")
                .with_initial_heading(deg(90.0))
                .with_turn_angle(deg(60.0))
                .with_rule('F', "F--F--F--GG")
                .with_rule('G', "GG"),
            Self::KochIsland => Grammar::new("F++F++F")
                .with_initial_heading(deg(30.0))
                .with_turn_angle(deg(60.0))
                .with_rule('F', "F-F++F-F"),
            Self::BentBigH => Grammar::new("[F]--F")
                .with_turn_angle(deg(80.0))
                .with_depth_scale(0.65)
                .with_rule('F', "|[+F][-F]"),
            Self::DragonCurve => Grammar::new("F")
                .with_initial_heading(deg(90.0))
                .with_turn_angle(deg(45.0))
                .with_evaluation_depth(12)
                .with_rule('F', "[+F][+G--G4-F]")
                .with_rule('G', "-G++G-"),
            Self::SierpinskiMaze => Grammar::new("F")
                .with_initial_heading(deg(30.0))
                .with_turn_angle(deg(60.0))
                .with_rule('F', "[GF][+G3-F][G+G+F]")
                .with_rule('G', "GG"),
            Self::SierpinskiSnowflake => Grammar::new("F4-F4-F4-F4-F")
                .with_initial_heading(deg(18.0))
                .with_turn_angle(deg(18.0))
                .with_rule('F', "F4-F4-F10-F++F4-F"),
            Self::PenroseTiling => Grammar::new("[X]++[X]++[X]++[X]++[X]")
                .with_turn_angle(deg(36.0))
                .with_rule('W', "YF++ZF4-XF[-YF4-WF]++")
                .with_rule('X', "+YF--ZF[3-WF--XF]+")
                .with_rule('Y', "-WF++XF[+++YF++ZF]-")
                .with_rule('Z', "--YF++++WF[+ZF++++XF]--XF")
                .with_rule('F', ""),
            Self::QuadricKochIsland => Grammar::new("F-F-F-F")
                .with_turn_angle(deg(90.0))
                .with_rule('F', "F-F+F+FF-F-F+F"),
            Self::Tree2 => Grammar::new("F")
                .with_turn_angle(deg(8.0))
                .with_depth_scale(0.4)
                .with_rule('F', "|[5+F][7-F]-|[4+F][6-F]-|[3+F][5-F]-|F"),
        }
    }
}
