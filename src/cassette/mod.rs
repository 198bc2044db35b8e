//! Cassette format for recording and replaying completion exchanges.

pub mod format;
pub mod recorder;
pub mod replayer;

pub use format::{Cassette, Exchange, Outcome};
pub use recorder::CassetteRecorder;
pub use replayer::CassetteReplayer;
