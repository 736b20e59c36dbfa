//! Viewer session: chat polling, contest countdown and their timers.
//!
//! None of this is used by the aggregation core, which holds no state.

pub mod chat;
pub mod context;
pub mod countdown;
pub mod task;

pub use chat::{ChatMessage, Transcript, TranscriptLine};
pub use context::DashboardSession;
pub use countdown::format_countdown;
pub use task::RepeatingTask;
