//! Sequence matcher: rolling buffer of recent keys for chord detection
//!
//! The buffer accumulates plain key presses and is compared against every
//! active sequence shortcut from its tail, so a stray key never aborts a
//! chord the user restarts mid-buffer. Only an exact match or the rolling
//! timeout clears it.

use std::time::{Duration, Instant};

use crate::types::KeyCode;

/// Inactivity window after which accumulated sequence state is discarded
pub const DEFAULT_SEQUENCE_TIMEOUT: Duration = Duration::from_millis(1000);

/// How a candidate sequence relates to the current buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SeqMatch {
    /// The buffer tail equals the whole sequence
    Exact,
    /// A buffer tail equals a leading part of the sequence
    Prefix,
    None,
}

/// Match a candidate sequence against the buffer, tail-first
///
/// Exact: the last `seq.len()` buffered keys equal the sequence. Prefix:
/// some shorter buffer tail equals the sequence's leading elements, so the
/// chord may still complete. Tails are rescanned on every press, which is
/// what lets `g g c` complete a `g c` chord.
pub(crate) fn match_tail(buffer: &[KeyCode], seq: &[KeyCode]) -> SeqMatch {
    if seq.is_empty() {
        return SeqMatch::None;
    }
    if buffer.len() >= seq.len() && buffer[buffer.len() - seq.len()..] == *seq {
        return SeqMatch::Exact;
    }
    let max_tail = seq.len().saturating_sub(1).min(buffer.len());
    for len in (1..=max_tail).rev() {
        if buffer[buffer.len() - len..] == seq[..len] {
            return SeqMatch::Prefix;
        }
    }
    SeqMatch::None
}

/// Ordered list of recently pressed keys plus the rolling expiry deadline
#[derive(Debug)]
pub struct SequenceBuffer {
    keys: Vec<KeyCode>,
    deadline: Option<Instant>,
    timeout: Duration,
}

impl SequenceBuffer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            keys: Vec::new(),
            deadline: None,
            timeout,
        }
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Append a key, first discarding state older than the timeout,
    /// then re-arming the deadline
    pub fn push(&mut self, key: KeyCode, now: Instant) {
        if matches!(self.deadline, Some(deadline) if now > deadline) {
            tracing::trace!("sequence buffer expired");
            self.keys.clear();
        }
        self.keys.push(key);
        self.deadline = Some(now + self.timeout);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.deadline = None;
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// Buffered keys joined for status-bar display
    pub fn pending_display(&self) -> Option<String> {
        if self.keys.is_empty() {
            None
        } else {
            Some(
                self.keys
                    .iter()
                    .map(|k| format!("{}", k).to_lowercase())
                    .collect::<Vec<_>>()
                    .join(" "),
            )
        }
    }
}

impl Default for SequenceBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_SEQUENCE_TIMEOUT)
    }
}
