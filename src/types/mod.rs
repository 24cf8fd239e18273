//! Core types for Ringbite

mod config;
mod frame;
mod input;
mod output;
mod phase;
mod reason;
mod record;
mod round;
mod script;

pub use config::{floor_duration, BiteMode, ConfigReason, EligibilityPolicy, MouthConfig, OpeningCollect};
pub use frame::{Frame, FrameReason, FrameTable};
pub use input::{FrameInput, ZoneEdge, FAR_AWAY};
pub use output::{CollectOutcome, MouthSnapshot};
pub use phase::MouthPhase;
pub use reason::ReasonCode;
pub use record::{RecordReason, RoundRecord};
pub use round::{HandState, RoundOutcome, RoundSnapshot};
pub use script::{ScriptCommand, ScriptError, ScriptReason};
