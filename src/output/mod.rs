//! Output boundary for pattern demonstrations.
//!
//! States and proxies write lines through an [`Emitter`]. Translation is
//! applied here, at the boundary, by wrapping an emitter in
//! [`Translated`]; the state machine itself never sees the translator.

mod emitter;
mod translate;

pub use emitter::{Console, Emitter, Recorder, Translated};
pub use translate::{Passthrough, Phrasebook, TranslateError, Translator};
