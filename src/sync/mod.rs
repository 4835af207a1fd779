pub mod engine;
pub mod format;
pub mod trigger;

pub use engine::{SyncOutcome, TickMark, VisualSyncEngine};
pub use format::{DateDigits, TimeDigits};
pub use trigger::{TriggerEvent, TriggerKind};
