//! Core modules for Ringbite

pub mod proximity;
pub mod sweep;
pub mod notifier;
pub mod mouth;
pub mod arbiter;
pub mod round;
pub mod script;
pub mod record;
pub mod loader;
pub mod api;

pub use proximity::ProximityGate;
pub use sweep::{interpolate_frame, lerp_frame, progress, BiteTimeline, Sweep};
pub use notifier::{BiteNotifier, ListenerId};
pub use mouth::{MouthStateMachine, UNSET_FRAME};
pub use arbiter::CollectionArbiter;
pub use round::Round;
pub use script::{ScriptDriver, ScriptParser};
pub use record::{fingerprint, fingerprint_hex, load_record, save_record, verify_record};
pub use loader::{load_config, load_frame_table, parse_frame_table};
pub use api::{create_router, run_server};
