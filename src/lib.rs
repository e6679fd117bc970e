//! # Native Hook Errors
//!
//! Failure taxonomy and error carrier for global keyboard/mouse hook backends.
//!
//! A hook library drives three unrelated native subsystems (X11/XRecord,
//! Win32 low-level hooks, Darwin event taps). Each of them fails in its own
//! way; this crate gives all of them one shape:
//!
//! 1. **A closed, stable code table** ([`FailureCode`]) grouped by origin
//!    in the high nibble, with values that never change
//! 2. **One carrier** ([`NativeHookFailure`]) holding a code, an optional
//!    message and an optional underlying cause, none of which is ever lost
//! 3. **A borrowed log view** ([`FailureLog`]) for whatever logger the
//!    caller uses
//!
//! Installing hooks, running native threads and retrying are the hook
//! library's business; this crate only describes what went wrong.
//!
//! ## Quick Start
//!
//! ```rust
//! use native_hook_errors::{FailureCode, NativeHookFailure, Result};
//!
//! fn install_hook(registered: bool) -> Result<()> {
//!     if !registered {
//!         return Err(NativeHookFailure::new(
//!             FailureCode::WinSetHook,
//!             "SetWindowsHookEx failed",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = install_hook(false).unwrap_err();
//! assert_eq!(err.code(), FailureCode::WinSetHook);
//! assert_eq!(err.to_string(), "SetWindowsHookEx failed (E-WIN-30)");
//! ```
//!
//! ## Reporting From A Native Bridge
//!
//! ```rust
//! use native_hook_errors::{FailureCode, FailureOrigin, NativeHookFailure};
//!
//! // Raw (code, message) pair as delivered by the native side.
//! let err = NativeHookFailure::from_native(0x40, "AXIsProcessTrusted returned false");
//!
//! match err.code() {
//!     FailureCode::DarwinAxapiDisabled => {
//!         println!("{}", err.remediation().unwrap());
//!     }
//!     code if code.origin() == FailureOrigin::X11 => println!("X11 failure: {err}"),
//!     _ => println!("hook failure: {err}"),
//! }
//! ```
//!
//! ## Features
//!
//! - `serde`: serialize codes as their fixed numeric values and failures as flat records

#![warn(missing_docs)]
#![warn(clippy::all)]

use smallvec::SmallVec;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::io;
use std::result;
use std::sync::Arc;

pub mod codes;
pub mod convenience;
pub mod definitions;
pub mod logging;
#[cfg(feature = "serde")]
mod serialization;

pub use codes::*;
pub use definitions::{CodeInfo, CODE_TABLE};
pub use logging::*;

/// Type alias for Results using the hook failure carrier.
pub type Result<T> = result::Result<T, NativeHookFailure>;

/// Shared handle to an underlying error.
///
/// The carrier holds a reference to its cause; cloning a failure shares the
/// same cause rather than copying it.
pub type SharedCause = Arc<dyn Error + Send + Sync + 'static>;

/// Inline capacity for producer metadata before spilling to the heap.
const INLINE_METADATA: usize = 4;

/// A failed hook operation: code, optional message, optional cause.
///
/// # Key Properties
///
/// - Code defaults to [`FailureCode::UnknownFailure`] when none is supplied
/// - An explicit message is stored exactly as given
/// - A cause is kept as a shared reference and exposed via [`Error::source`]
/// - Immutable once handed out; `Clone`, `Send` and `Sync`
/// - Owned text is zeroized on drop
///
/// # Constructor Forms
///
/// | Supplied | Constructor |
/// |---|---|
/// | nothing | [`unknown`](Self::unknown), `Default` |
/// | code | [`from_code`](Self::from_code), `From<FailureCode>` |
/// | message | [`from_message`](Self::from_message) |
/// | code, message | [`new`](Self::new) |
/// | message, cause | [`from_message_and_cause`](Self::from_message_and_cause) |
/// | code, message, cause | [`with_cause`](Self::with_cause) |
/// | cause | [`from_cause`](Self::from_cause), `From<io::Error>` |
/// | code, cause | [`from_code_and_cause`](Self::from_code_and_cause) |
///
/// # Description Without A Message
///
/// When no explicit message is set, [`description`](Self::description) and
/// `Display` fall back to the cause's own text, then to the code summary.
/// [`message`](Self::message) never synthesizes anything.
#[must_use = "hook failures should be handled or reported"]
#[derive(Debug, Clone, Default)]
pub struct NativeHookFailure {
    code: FailureCode,
    message: Option<DetailField>,
    cause: Option<SharedCause>,
    metadata: SmallVec<[(&'static str, DetailField); INLINE_METADATA]>,
    unrecognized: Option<u16>,
}

impl NativeHookFailure {
    #[inline]
    fn assemble(
        code: FailureCode,
        message: Option<Cow<'static, str>>,
        cause: Option<SharedCause>,
    ) -> Self {
        Self {
            code,
            message: message.map(DetailField::from),
            cause,
            metadata: SmallVec::new(),
            unrecognized: None,
        }
    }

    // Constructors, one per combination of supplied parts.

    /// No finer-grained information available.
    #[inline]
    pub fn unknown() -> Self {
        Self::assemble(FailureCode::UnknownFailure, None, None)
    }

    /// Code only.
    #[inline]
    pub fn from_code(code: FailureCode) -> Self {
        Self::assemble(code, None, None)
    }

    /// Message only; code is `UNKNOWN_FAILURE`.
    #[inline]
    pub fn from_message(message: impl Into<Cow<'static, str>>) -> Self {
        Self::assemble(FailureCode::UnknownFailure, Some(message.into()), None)
    }

    /// Code and message. This is the shape native producers raise.
    #[inline]
    pub fn new(code: FailureCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self::assemble(code, Some(message.into()), None)
    }

    /// Message and cause; code is `UNKNOWN_FAILURE`.
    #[inline]
    pub fn from_message_and_cause<E>(message: impl Into<Cow<'static, str>>, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::assemble(
            FailureCode::UnknownFailure,
            Some(message.into()),
            Some(Arc::new(cause)),
        )
    }

    /// Code, message and cause.
    #[inline]
    pub fn with_cause<E>(code: FailureCode, message: impl Into<Cow<'static, str>>, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::assemble(code, Some(message.into()), Some(Arc::new(cause)))
    }

    /// Cause only; code is `UNKNOWN_FAILURE`.
    #[inline]
    pub fn from_cause<E>(cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::assemble(FailureCode::UnknownFailure, None, Some(Arc::new(cause)))
    }

    /// Code and cause, no explicit message.
    #[inline]
    pub fn from_code_and_cause<E>(code: FailureCode, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::assemble(code, None, Some(Arc::new(cause)))
    }

    /// Code and an already shared cause.
    ///
    /// Used when several failures report the same underlying error.
    #[inline]
    pub fn from_shared_cause(code: FailureCode, cause: SharedCause) -> Self {
        Self::assemble(code, None, Some(cause))
    }

    /// Capture the calling thread's last OS error as the cause.
    ///
    /// Call immediately after the failing native call (`GetLastError` on
    /// Windows, `errno` elsewhere).
    #[inline]
    pub fn last_os_error(code: FailureCode) -> Self {
        Self::from_code_and_cause(code, io::Error::last_os_error())
    }

    /// Build from a raw `(code, message)` pair delivered by a native producer.
    ///
    /// Values outside the table are reported as `UNKNOWN_FAILURE` and the raw
    /// value is kept, see [`unrecognized_code`](Self::unrecognized_code).
    pub fn from_native(raw: u16, message: impl Into<Cow<'static, str>>) -> Self {
        match FailureCode::from_u16(raw) {
            Some(code) => Self::new(code, message),
            None => {
                let mut failure = Self::new(FailureCode::UnknownFailure, message);
                failure.unrecognized = Some(raw);
                failure
            }
        }
    }

    /// Attach a diagnostic key/value pair (errno, display name, ...).
    ///
    /// Construction-time builder step; pairs keep insertion order.
    #[inline]
    pub fn with_metadata(mut self, key: &'static str, value: impl Into<Cow<'static, str>>) -> Self {
        self.metadata.push((key, DetailField::from(value.into())));
        self
    }

    // Accessors.

    /// The failure code.
    #[inline]
    pub const fn code(&self) -> FailureCode {
        self.code
    }

    /// Raw wire value of the code.
    #[inline]
    pub const fn code_value(&self) -> u16 {
        self.code.as_u16()
    }

    /// Origin subsystem.
    ///
    /// For an unrecognized native value the origin is taken from its high
    /// nibble when a backend owns it.
    #[inline]
    pub fn origin(&self) -> FailureOrigin {
        self.unrecognized
            .and_then(FailureOrigin::of)
            .unwrap_or(self.code.origin())
    }

    /// Explicit message, exactly as supplied.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(DetailField::as_str)
    }

    /// Underlying cause, if any.
    #[inline]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Clone of the shared cause handle.
    #[inline]
    pub fn shared_cause(&self) -> Option<SharedCause> {
        self.cause.clone()
    }

    /// Producer metadata in insertion order.
    #[inline]
    pub fn metadata(&self) -> &[(&'static str, DetailField)] {
        &self.metadata
    }

    /// Raw native value when the producer reported a code outside the table.
    #[inline]
    pub const fn unrecognized_code(&self) -> Option<u16> {
        self.unrecognized
    }

    /// Best available human-readable text.
    ///
    /// Explicit non-empty message, else the cause's own description, else
    /// the code summary. Never empty; [`message`](Self::message) still
    /// returns an empty explicit message as supplied.
    pub fn description(&self) -> Cow<'_, str> {
        if let Some(message) = self.message() {
            if !message.is_empty() {
                return Cow::Borrowed(message);
            }
        }
        if let Some(cause) = &self.cause {
            let text = cause.to_string();
            if !text.is_empty() {
                return Cow::Owned(text);
            }
        }
        Cow::Borrowed(self.code.summary())
    }

    /// Remediation hint for the code, or for the origin of an unrecognized value.
    #[inline]
    pub fn remediation(&self) -> Option<&'static str> {
        match self.unrecognized {
            Some(_) => self.origin().remediation(),
            None => self.code.remediation(),
        }
    }

    /// Structured log view borrowing from this failure.
    #[inline]
    pub fn failure_log(&self) -> FailureLog<'_> {
        FailureLog {
            code: self.code,
            message: self.message(),
            cause: self.cause.as_deref().map(|c| c as &(dyn Error + 'static)),
            metadata: &self.metadata,
            unrecognized: self.unrecognized,
        }
    }

    /// Callback-style access to the log view.
    ///
    /// ```rust
    /// # use native_hook_errors::{FailureCode, NativeHookFailure};
    /// let err = NativeHookFailure::from_code(FailureCode::ThreadStart);
    /// let name = err.with_failure_log(|log| log.code().name());
    /// assert_eq!(name, "THREAD_START");
    /// ```
    #[inline]
    pub fn with_failure_log<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&FailureLog<'_>) -> R,
    {
        let log = self.failure_log();
        f(&log)
    }
}

impl fmt::Display for NativeHookFailure {
    /// Format: `"<description> (<code>)"`, with the raw value appended for
    /// unrecognized native codes.
    ///
    /// Example: `"SetWindowsHookEx failed (E-WIN-30)"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unrecognized {
            Some(raw) => write!(f, "{} ({}, native 0x{:02X})", self.description(), self.code, raw),
            None => write!(f, "{} ({})", self.description(), self.code),
        }
    }
}

impl Error for NativeHookFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn Error + 'static))
    }
}

impl From<FailureCode> for NativeHookFailure {
    #[inline]
    fn from(code: FailureCode) -> Self {
        Self::from_code(code)
    }
}

impl From<io::Error> for NativeHookFailure {
    #[inline]
    fn from(cause: io::Error) -> Self {
        Self::from_cause(cause)
    }
}

impl From<UnrecognizedCode> for NativeHookFailure {
    fn from(err: UnrecognizedCode) -> Self {
        let mut failure = Self::unknown();
        failure.unrecognized = Some(err.value);
        failure
    }
}
