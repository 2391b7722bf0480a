//! Line emitters.

use super::translate::Translator;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// Sink for one line of demonstration output.
pub trait Emitter: Send + Sync {
    fn emit(&self, line: &str);

    /// Emit `text` followed by a space and `name`.
    ///
    /// Only `text` is subject to translation; `name` is an identifier and
    /// is always written verbatim.
    fn emit_named(&self, text: &str, name: &str) {
        self.emit(&format!("{text} {name}"));
    }
}

/// Writes each line to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console;

impl Emitter for Console {
    fn emit(&self, line: &str) {
        println!("{line}");
    }
}

/// Keeps every emitted line in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    lines: Mutex<Vec<String>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn lines(&self) -> Vec<String> {
        self.guard().clone()
    }

    /// Lines containing `needle`, in emission order.
    pub fn lines_matching(&self, needle: &str) -> Vec<String> {
        self.guard()
            .iter()
            .filter(|line| line.contains(needle))
            .cloned()
            .collect()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.guard().iter().any(|l| l == line)
    }

    pub fn clear(&self) {
        self.guard().clear();
    }
}

impl Emitter for Recorder {
    fn emit(&self, line: &str) {
        self.guard().push(line.to_string());
    }
}

/// Translates each line before passing it on.
///
/// A failed translation is logged and the original line is emitted
/// instead; the failure never reaches the caller.
///
/// # Example
///
/// ```rust
/// use statecraft::output::{Emitter, Phrasebook, Recorder, Translated};
/// use std::sync::Arc;
///
/// let recorder = Arc::new(Recorder::new());
/// let phrasebook = Phrasebook::from_pairs([("hello", "hola")]);
/// let emitter = Translated::new(recorder.clone(), phrasebook, "in", "es");
///
/// emitter.emit("hello");
/// emitter.emit("goodbye");
///
/// assert_eq!(recorder.lines(), vec!["hola", "goodbye"]);
/// ```
pub struct Translated<T: Translator> {
    inner: Arc<dyn Emitter>,
    translator: T,
    source: String,
    target: String,
}

impl<T: Translator> Translated<T> {
    pub fn new(
        inner: Arc<dyn Emitter>,
        translator: T,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            translator,
            source: source.into(),
            target: target.into(),
        }
    }
}

impl<T: Translator> Translated<T> {
    fn translate(&self, text: &str) -> String {
        match self.translator.translate(text, &self.source, &self.target) {
            Ok(translated) => translated,
            Err(error) => {
                warn!(%error, "translation failed, emitting original text");
                text.to_string()
            }
        }
    }
}

impl<T: Translator> Emitter for Translated<T> {
    fn emit(&self, line: &str) {
        self.inner.emit(&self.translate(line));
    }

    fn emit_named(&self, text: &str, name: &str) {
        self.inner.emit_named(&self.translate(text), name);
    }
}
