//! Read-aloud support.
//!
//! Text is reduced to plain prose, cut into utterances a speech engine can
//! take in one call, and played through a `Speaker` one item at a time. The
//! session never owns a queue; navigation does not cancel playback.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pulldown_cmark::{Event, Parser, TagEnd};
use tracing::debug;

use quiz_core::model::QuestionRecord;

use crate::error::SpeechError;

/// Longest utterance handed to a speaker by default, in characters.
pub const DEFAULT_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    text: String,
}

impl Utterance {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A speech engine.
pub trait Speaker {
    /// Speak one utterance, returning once it has been handed off.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Engine` if the engine rejects the utterance.
    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError>;
}

/// Shared stop flag for a playing queue.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackOutcome {
    pub spoken: usize,
    pub cancelled: bool,
}

/// A finite list of utterances plus the flag that can stop it.
#[derive(Debug, Clone, Default)]
pub struct SpeechQueue {
    items: Vec<Utterance>,
    cancel: CancelHandle,
}

impl SpeechQueue {
    #[must_use]
    pub fn new(items: Vec<Utterance>) -> Self {
        Self {
            items,
            cancel: CancelHandle::default(),
        }
    }

    #[must_use]
    pub fn from_text(text: &str, max_chars: usize) -> Self {
        Self::new(utterances(text, max_chars))
    }

    /// The question, followed by the answer when `include_answer` is set.
    #[must_use]
    pub fn for_question(record: &QuestionRecord, include_answer: bool, max_chars: usize) -> Self {
        let mut items = utterances(record.question(), max_chars);
        if include_answer {
            items.extend(utterances(record.answer(), max_chars));
        }
        Self::new(items)
    }

    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    #[must_use]
    pub fn items(&self) -> &[Utterance] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Speak every item in order, checking the cancel flag before each one.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first engine error.
    pub fn play(&self, speaker: &mut dyn Speaker) -> Result<PlaybackOutcome, SpeechError> {
        let mut spoken = 0;
        for item in &self.items {
            if self.cancel.is_cancelled() {
                debug!(spoken, total = self.items.len(), "speech cancelled");
                return Ok(PlaybackOutcome {
                    spoken,
                    cancelled: true,
                });
            }
            speaker.speak(item)?;
            spoken += 1;
        }
        Ok(PlaybackOutcome {
            spoken,
            cancelled: false,
        })
    }
}

/// Reduce markdown/HTML-flavoured text to plain prose.
///
/// Block-level HTML is converted to markdown and read for its text; inline
/// tags are dropped while the text between them is kept.
#[must_use]
pub fn plain_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_plain(text, &mut out, true);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn push_plain(text: &str, out: &mut String, convert_html: bool) {
    let mut html = String::new();
    for event in Parser::new(text) {
        match event {
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            Event::Html(block) => html.push_str(&block),
            Event::End(TagEnd::HtmlBlock) => flush_html(&mut html, out, convert_html),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => out.push(' '),
            _ => {}
        }
    }
    flush_html(&mut html, out, convert_html);
}

// Converted markdown is read once more without conversion, so HTML that
// survives html2md is dropped rather than recursed into.
fn flush_html(html: &mut String, out: &mut String, convert: bool) {
    if html.is_empty() {
        return;
    }
    if convert {
        push_plain(&html2md::parse_html(html), out, false);
    }
    out.push(' ');
    html.clear();
}

/// Split `text` into utterances of at most `max_chars` characters.
///
/// Sentences are kept whole where they fit; longer sentences break between
/// words, and single words longer than the limit are split hard.
#[must_use]
pub fn utterances(text: &str, max_chars: usize) -> Vec<Utterance> {
    let mut chunker = Chunker::new(max_chars.max(1));
    for sentence in sentences(&plain_text(text)) {
        chunker.push_sentence(&sentence);
    }
    chunker.finish()
}

fn sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
        if word.ends_with(['.', '!', '?']) {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

struct Chunker {
    max: usize,
    current: String,
    len: usize,
    out: Vec<Utterance>,
}

impl Chunker {
    fn new(max: usize) -> Self {
        Self {
            max,
            current: String::new(),
            len: 0,
            out: Vec::new(),
        }
    }

    fn push_sentence(&mut self, sentence: &str) {
        let len = sentence.chars().count();
        if self.fits(len) {
            self.append(sentence, len);
            return;
        }
        self.flush();
        if len <= self.max {
            self.append(sentence, len);
            return;
        }
        for word in sentence.split_whitespace() {
            self.push_word(word);
        }
    }

    fn push_word(&mut self, word: &str) {
        let len = word.chars().count();
        if self.fits(len) {
            self.append(word, len);
            return;
        }
        self.flush();
        if len <= self.max {
            self.append(word, len);
            return;
        }
        let chars: Vec<char> = word.chars().collect();
        for piece in chars.chunks(self.max) {
            self.out.push(Utterance::new(piece.iter().collect::<String>()));
        }
    }

    fn fits(&self, len: usize) -> bool {
        if self.current.is_empty() {
            len <= self.max
        } else {
            self.len + 1 + len <= self.max
        }
    }

    fn append(&mut self, text: &str, len: usize) {
        if !self.current.is_empty() {
            self.current.push(' ');
            self.len += 1;
        }
        self.current.push_str(text);
        self.len += len;
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.out.push(Utterance::new(std::mem::take(&mut self.current)));
            self.len = 0;
        }
    }

    fn finish(mut self) -> Vec<Utterance> {
        self.flush();
        self.out
    }
}
