//! Structured log view of a hook failure.
//!
//! The crate never writes logs itself. Callers that want to record a failure
//! borrow a [`FailureLog`] from it and hand the fields to whatever logger
//! they use.
//!
//! - Borrows from `NativeHookFailure` with explicit lifetime
//! - Cannot outlive the failure that created it
//! - Accessors do not allocate
//! - `write_to` bounds every free-text field
//!
//! Text held by a failure is stored in [`DetailField`], which zeroizes owned
//! buffers on drop. Platform detail such as display names or user paths
//! does not linger in freed memory after the failure is handled.

use crate::FailureCode;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use zeroize::Zeroize;

/// Maximum length for any individual field in formatted output (DoS prevention)
const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Upper bound on `source()` links followed when walking a cause chain.
pub const MAX_CAUSE_DEPTH: usize = 16;

// ============================================================================
// Detail Field
// ============================================================================

/// Text value with zeroization for owned data.
///
/// Borrowed values are assumed static and are not zeroized.
#[derive(Debug, Clone)]
pub struct DetailField {
    value: Cow<'static, str>,
}

impl DetailField {
    /// The stored text, unmodified.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.value.as_ref()
    }
}

impl From<&'static str> for DetailField {
    fn from(value: &'static str) -> Self {
        Self {
            value: Cow::Borrowed(value),
        }
    }
}

impl From<String> for DetailField {
    fn from(value: String) -> Self {
        Self {
            value: Cow::Owned(value),
        }
    }
}

impl From<Cow<'static, str>> for DetailField {
    fn from(value: Cow<'static, str>) -> Self {
        Self { value }
    }
}

impl Zeroize for DetailField {
    fn zeroize(&mut self) {
        if let Cow::Owned(ref mut s) = self.value {
            s.zeroize();
        }
    }
}

impl Drop for DetailField {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Display for DetailField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Failure Log
// ============================================================================

/// Structured log entry borrowed from a `NativeHookFailure`.
///
/// # Example
///
/// ```rust
/// # use native_hook_errors::{FailureCode, NativeHookFailure};
/// let err = NativeHookFailure::new(FailureCode::WinSetHook, "SetWindowsHookEx failed");
/// let mut line = String::new();
/// err.failure_log().write_to(&mut line).unwrap();
/// assert_eq!(line, "[E-WIN-30] WIN_SET_HOOK message='SetWindowsHookEx failed'");
/// ```
#[derive(Debug)]
pub struct FailureLog<'a> {
    /// Failure code.
    pub code: FailureCode,
    /// Explicit message, if one was supplied.
    pub message: Option<&'a str>,
    /// Immediate cause, if one was supplied.
    pub cause: Option<&'a (dyn Error + 'static)>,
    /// Producer-attached diagnostic pairs, in insertion order.
    pub metadata: &'a [(&'static str, DetailField)],
    /// Raw native value when the producer reported a code outside the table.
    pub unrecognized: Option<u16>,
}

impl<'a> FailureLog<'a> {
    /// Write the entry as a single line.
    ///
    /// Borrowed text is written in place; each link of the cause chain is
    /// rendered to a temporary `String` before truncation.
    ///
    /// Format:
    /// `[<code>] <NAME> native=0x<HH> message='..' cause='..' <key>='..'`
    /// where every segment after the name is present only when set, and one
    /// `cause` segment is written per link of the cause chain.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.code.name())?;

        if let Some(raw) = self.unrecognized {
            write!(f, " native=0x{:02X}", raw)?;
        }

        if let Some(message) = self.message {
            write!(f, " message='{}'", truncate_with_indicator(message))?;
        }

        for cause in self.causes() {
            let text = cause.to_string();
            write!(f, " cause='{}'", truncate_with_indicator(&text))?;
        }

        for (key, value) in self.metadata {
            write!(f, " {}='{}'", key, truncate_with_indicator(value.as_str()))?;
        }

        Ok(())
    }

    /// Failure code.
    #[inline]
    pub const fn code(&self) -> FailureCode {
        self.code
    }

    /// Explicit message, if one was supplied.
    #[inline]
    pub const fn message(&self) -> Option<&'a str> {
        self.message
    }

    /// Producer metadata in insertion order.
    #[inline]
    pub const fn metadata(&self) -> &'a [(&'static str, DetailField)] {
        self.metadata
    }

    /// Raw native value for codes outside the table.
    #[inline]
    pub const fn unrecognized(&self) -> Option<u16> {
        self.unrecognized
    }

    /// Walk the cause chain starting at the immediate cause.
    ///
    /// Stops after [`MAX_CAUSE_DEPTH`] links so a cyclic `source()`
    /// implementation cannot hang the logger.
    #[inline]
    pub fn causes(&self) -> Causes<'a> {
        Causes {
            next: self.cause,
            remaining: MAX_CAUSE_DEPTH,
        }
    }

    /// Deepest reachable cause.
    pub fn root_cause(&self) -> Option<&'a (dyn Error + 'static)> {
        self.causes().last()
    }
}

/// Iterator over a failure's cause chain. See [`FailureLog::causes`].
#[derive(Debug)]
pub struct Causes<'a> {
    next: Option<&'a (dyn Error + 'static)>,
    remaining: usize,
}

impl<'a> Iterator for Causes<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = current.source();
        Some(current)
    }
}

/// Truncate a string for display to prevent DoS via extremely long messages.
///
/// Returns a Cow<str> to avoid allocation when no truncation is needed.
fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    // Last char boundary at or before the limit
    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NativeHookFailure;
    use std::io;

    #[derive(Debug)]
    struct Layered {
        text: &'static str,
        inner: Option<io::Error>,
    }

    impl fmt::Display for Layered {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.text)
        }
    }

    impl Error for Layered {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            self.inner.as_ref().map(|e| e as &(dyn Error + 'static))
        }
    }

    /// Error whose source points back at itself.
    #[derive(Debug)]
    struct SelfReferential;

    impl fmt::Display for SelfReferential {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("loop")
        }
    }

    impl Error for SelfReferential {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(self)
        }
    }

    #[test]
    fn truncate_ascii() {
        let s = "a".repeat(MAX_FIELD_OUTPUT_LEN + 10);
        let truncated = truncate_with_indicator(&s);

        assert!(truncated.len() <= MAX_FIELD_OUTPUT_LEN);
        assert!(truncated.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn no_truncate_when_under_limit() {
        let s = "short string";
        let truncated = truncate_with_indicator(s);

        assert!(matches!(truncated, Cow::Borrowed(_)));
        assert_eq!(truncated, s);
    }

    #[test]
    fn truncate_utf8_boundary() {
        // 2-byte chars
        let s = "й".repeat(MAX_FIELD_OUTPUT_LEN);
        let truncated = truncate_with_indicator(&s);

        assert!(truncated.len() <= MAX_FIELD_OUTPUT_LEN);
        assert!(truncated.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn exactly_at_limit() {
        let s = "a".repeat(MAX_FIELD_OUTPUT_LEN);
        let truncated = truncate_with_indicator(&s);

        assert!(matches!(truncated, Cow::Borrowed(_)));
        assert_eq!(truncated.len(), MAX_FIELD_OUTPUT_LEN);
    }

    #[test]
    fn detail_field_zeroizes_owned() {
        let mut field = DetailField::from(String::from(":0.0"));
        assert!(matches!(field.value, Cow::Owned(_)));

        field.zeroize();
        assert_eq!(field.as_str(), "");
    }

    #[test]
    fn detail_field_doesnt_zeroize_borrowed() {
        let mut field = DetailField::from("static");
        field.zeroize();
        assert_eq!(field.as_str(), "static");
    }

    #[test]
    fn write_to_includes_every_segment() {
        let cause = Layered {
            text: "XRecordEnableContext returned 0",
            inner: Some(io::Error::new(io::ErrorKind::Other, "BadMatch")),
        };
        let err = NativeHookFailure::with_cause(
            crate::FailureCode::X11RecordEnableContext,
            "could not enable record context",
            cause,
        )
        .with_metadata("display", ":0");

        let mut line = String::new();
        err.failure_log().write_to(&mut line).unwrap();

        assert_eq!(
            line,
            "[E-X11-24] X11_RECORD_ENABLE_CONTEXT message='could not enable record context' \
             cause='XRecordEnableContext returned 0' cause='BadMatch' display=':0'"
        );
    }

    #[test]
    fn write_to_reports_unrecognized_native_code() {
        let err = NativeHookFailure::from_native(0x57, "future darwin failure");
        let mut line = String::new();
        err.failure_log().write_to(&mut line).unwrap();

        assert!(line.starts_with("[E-GEN-00] UNKNOWN_FAILURE native=0x57"));
    }

    #[test]
    fn write_to_truncates_long_messages() {
        let err = NativeHookFailure::from_message("x".repeat(5000));
        let mut line = String::new();
        err.failure_log().write_to(&mut line).unwrap();

        assert!(line.contains(TRUNCATION_INDICATOR));
        assert!(line.len() < 2 * MAX_FIELD_OUTPUT_LEN);
    }

    #[test]
    fn causes_walks_chain_to_root() {
        let err = NativeHookFailure::from_cause(Layered {
            text: "outer",
            inner: Some(io::Error::from(io::ErrorKind::PermissionDenied)),
        });
        let log = err.failure_log();

        assert_eq!(log.causes().count(), 2);
        let root = log.root_cause().unwrap();
        assert!(root.downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn causes_is_bounded_for_cycles() {
        let err = NativeHookFailure::from_cause(SelfReferential);
        assert_eq!(err.failure_log().causes().count(), MAX_CAUSE_DEPTH);
    }

    #[test]
    fn empty_log_has_no_causes() {
        let err = NativeHookFailure::unknown();
        let log = err.failure_log();
        assert!(log.causes().next().is_none());
        assert!(log.root_cause().is_none());
        assert!(log.metadata().is_empty());
    }
}
