//! Line-based round scripts
//!
//! ```text
//! # approach slowly, reach in, grab
//! ring 0 0
//! finger 4 0
//! tick 0.1 x5
//! finger 1 0
//! enter
//! tick 0.25
//! touch
//! tick 0.1
//! ```

use glam::Vec2;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::core::round::Round;
use crate::types::{FrameInput, RoundSnapshot, ScriptCommand, ScriptError, ScriptReason, ZoneEdge};

lazy_static! {
    static ref RE_COMMENT: Regex = Regex::new(r"^\s*(#.*)?$").unwrap();

    static ref RE_WORD: Regex = Regex::new(r"^\s*(?i)([a-z]+)\b").unwrap();

    static ref RE_POINT: Regex = Regex::new(
        r"^\s*(?i)(finger|ring)\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)\s*$"
    ).unwrap();

    static ref RE_TICK: Regex = Regex::new(
        r"^\s*(?i)tick\s+(\d+(?:\.\d+)?)(?:\s+x(\d+))?\s*$"
    ).unwrap();

    static ref RE_BARE: Regex = Regex::new(
        r"^\s*(?i)(enter|exit|touch|bite|restart)\s*$"
    ).unwrap();
}

/// Parser for round scripts
#[derive(Debug, Default)]
pub struct ScriptParser;

impl ScriptParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one line. Blank lines and comments give `None`.
    pub fn parse_line(&self, line: &str) -> Result<Option<ScriptCommand>, ScriptReason> {
        if RE_COMMENT.is_match(line) {
            return Ok(None);
        }
        // Trailing comments
        let line = line.split('#').next().unwrap_or_default();

        if let Some(caps) = RE_POINT.captures(line) {
            let x = parse_number(&caps[2])?;
            let y = parse_number(&caps[3])?;
            let at = Vec2::new(x, y);
            return Ok(Some(if caps[1].eq_ignore_ascii_case("finger") {
                ScriptCommand::Finger { at }
            } else {
                ScriptCommand::Ring { at }
            }));
        }

        if let Some(caps) = RE_TICK.captures(line) {
            let dt = parse_number(&caps[1])?;
            let repeat = match caps.get(2) {
                Some(n) => n.as_str().parse::<u32>().map_err(|_| ScriptReason::R202_SCRIPT_BAD_ARGUMENTS)?,
                None => 1,
            };
            return Ok(Some(ScriptCommand::Tick { dt, repeat }));
        }

        if let Some(caps) = RE_BARE.captures(line) {
            let command = match caps[1].to_ascii_lowercase().as_str() {
                "enter" => ScriptCommand::Enter,
                "exit" => ScriptCommand::Exit,
                "touch" => ScriptCommand::Touch,
                "bite" => ScriptCommand::Bite,
                _ => ScriptCommand::Restart,
            };
            return Ok(Some(command));
        }

        // Known word with bad arguments, or an unknown word
        let known = RE_WORD.captures(line).is_some_and(|caps| {
            matches!(
                caps[1].to_ascii_lowercase().as_str(),
                "finger" | "ring" | "tick" | "enter" | "exit" | "touch" | "bite" | "restart"
            )
        });
        if known {
            Err(ScriptReason::R202_SCRIPT_BAD_ARGUMENTS)
        } else {
            Err(ScriptReason::R201_SCRIPT_UNKNOWN_COMMAND)
        }
    }

    /// Parse a whole script, stopping at the first bad line
    pub fn parse(&self, text: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
        let mut commands = Vec::new();
        for (i, line) in text.lines().enumerate() {
            match self.parse_line(line) {
                Ok(Some(command)) => commands.push(command),
                Ok(None) => {}
                Err(reason) => return Err(ScriptError { line: i + 1, reason }),
            }
        }
        Ok(commands)
    }

    /// Read and parse a script file
    pub fn parse_file(&self, path: &str) -> Result<Vec<ScriptCommand>, ScriptError> {
        let text = std::fs::read_to_string(path).map_err(|_| ScriptError {
            line: 0,
            reason: ScriptReason::R203_SCRIPT_UNREADABLE,
        })?;
        self.parse(&text)
    }
}

fn parse_number(s: &str) -> Result<f32, ScriptReason> {
    s.parse::<f32>().map_err(|_| ScriptReason::R202_SCRIPT_BAD_ARGUMENTS)
}

/// Feeds script commands into a round.
///
/// Positions persist between ticks. Edges, touches and bites are queued and
/// delivered with the next tick.
#[derive(Debug)]
pub struct ScriptDriver {
    round: Round,
    finger: Vec2,
    ring: Vec2,
    pending: FrameInput,
}

impl ScriptDriver {
    pub fn new(round: Round) -> Self {
        Self {
            round,
            finger: crate::types::FAR_AWAY,
            ring: Vec2::ZERO,
            pending: FrameInput::default(),
        }
    }

    /// Apply one command, returning a snapshot for every step it caused
    pub fn apply(&mut self, command: &ScriptCommand) -> Vec<RoundSnapshot> {
        debug!(?command, "script command");
        match command {
            ScriptCommand::Finger { at } => {
                self.finger = *at;
                Vec::new()
            }
            ScriptCommand::Ring { at } => {
                self.ring = *at;
                Vec::new()
            }
            ScriptCommand::Enter => {
                self.pending.zone = ZoneEdge::Entered;
                Vec::new()
            }
            ScriptCommand::Exit => {
                self.pending.zone = ZoneEdge::Exited;
                Vec::new()
            }
            ScriptCommand::Touch => {
                self.pending.ring_touched = true;
                Vec::new()
            }
            ScriptCommand::Bite => {
                self.pending.force_bite = true;
                Vec::new()
            }
            ScriptCommand::Restart => {
                self.pending = FrameInput::default();
                vec![self.round.restart()]
            }
            ScriptCommand::Tick { dt, repeat } => (0..*repeat)
                .map(|_| {
                    let input = FrameInput {
                        dt: *dt,
                        finger: self.finger,
                        ring: self.ring,
                        ..std::mem::take(&mut self.pending)
                    };
                    self.round.step(&input)
                })
                .collect(),
        }
    }

    /// Apply every command in order
    pub fn run(&mut self, commands: &[ScriptCommand]) -> Vec<RoundSnapshot> {
        commands.iter().flat_map(|c| self.apply(c)).collect()
    }

    pub fn round(&self) -> &Round {
        &self.round
    }
}
