//! Session recording and replay

pub mod entry;
pub mod recorder;

pub use entry::{EntryType, RecordEntry};
pub use recorder::{RecordingMetadata, SessionRecording, TranscriptRecorder};
