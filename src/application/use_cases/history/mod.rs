//! Listening History Use Cases

mod get_listening_history;
mod record_playback;

pub use get_listening_history::{GetListeningHistoryUseCase, GetRecentPlaysUseCase};
pub use record_playback::RecordPlaybackUseCase;
