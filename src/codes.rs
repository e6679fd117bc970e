//! Failure code space - a closed, stable table of 16-bit native failure codes.
//!
//! Every hook backend reports failures through the same numeric table. The
//! values cross the native bridge as plain integers, so they are part of the
//! public contract and are never renumbered.
//!
//! # Origin Structure
//!
//! The high nibble of a code identifies the subsystem that produced it:
//!
//! - **GEN** (`0x0_`): generic failures with no finer classification
//! - **THR** (`0x1_`): native hook thread lifecycle
//! - **X11** (`0x2_`): X11 display / XRecord backend
//! - **WIN** (`0x3_`): Win32 low-level hook backend
//! - **DAR** (`0x4_`): Darwin accessibility / event-tap backend
//!
//! # Forward Compatibility
//!
//! `FailureCode` is `#[non_exhaustive]`: consumers must keep a default arm
//! when matching, because the table may grow. Raw values that are not (yet)
//! in the table are rejected by `TryFrom<u16>` with an [`UnrecognizedCode`]
//! that still reports the origin when the high nibble is known.
//!
//! # Example
//!
//! ```rust
//! use native_hook_errors::{FailureCode, FailureOrigin};
//!
//! let code = FailureCode::try_from(0x24u16).unwrap();
//! assert_eq!(code, FailureCode::X11RecordEnableContext);
//! assert_eq!(code.origin(), FailureOrigin::X11);
//! assert_eq!(code.to_string(), "E-X11-24");
//! ```

use crate::definitions;
use std::fmt;

// ============================================================================
// Failure Origin
// ============================================================================

/// Subsystem a failure code originates from, selected by the high nibble.
///
/// Origins are small fieldless metadata and are passed by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureOrigin {
    /// Generic failures (`0x00`-`0x0F`).
    Generic,
    /// Native hook thread lifecycle (`0x10`-`0x1F`).
    Thread,
    /// X11 / XRecord backend (`0x20`-`0x2F`).
    X11,
    /// Win32 low-level hook backend (`0x30`-`0x3F`).
    Windows,
    /// Darwin accessibility / event-tap backend (`0x40`-`0x4F`).
    Darwin,
}

impl FailureOrigin {
    /// All origins in ascending numeric order.
    pub const ALL: [FailureOrigin; 5] = [
        Self::Generic,
        Self::Thread,
        Self::X11,
        Self::Windows,
        Self::Darwin,
    ];

    /// Classify a raw code by its high nibble.
    ///
    /// Returns `None` for nibbles no backend has claimed.
    #[inline]
    pub const fn of(raw: u16) -> Option<Self> {
        match raw >> 4 {
            0x0 => Some(Self::Generic),
            0x1 => Some(Self::Thread),
            0x2 => Some(Self::X11),
            0x3 => Some(Self::Windows),
            0x4 => Some(Self::Darwin),
            _ => None,
        }
    }

    /// The high nibble shared by every code of this origin.
    #[inline]
    pub const fn nibble(self) -> u16 {
        match self {
            Self::Generic => 0x0,
            Self::Thread => 0x1,
            Self::X11 => 0x2,
            Self::Windows => 0x3,
            Self::Darwin => 0x4,
        }
    }

    /// Inclusive numeric range reserved for this origin.
    #[inline]
    pub const fn range(self) -> (u16, u16) {
        let base = self.nibble() << 4;
        (base, base | 0x0F)
    }

    /// Check whether a raw value falls inside this origin's range.
    #[inline]
    pub const fn contains(self, raw: u16) -> bool {
        let (start, end) = self.range();
        raw >= start && raw <= end
    }

    /// Short tag used in the `E-<TAG>-<HH>` display format.
    #[inline]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Generic => "GEN",
            Self::Thread => "THR",
            Self::X11 => "X11",
            Self::Windows => "WIN",
            Self::Darwin => "DAR",
        }
    }

    /// Human-readable subsystem name.
    #[inline]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Generic => "Generic",
            Self::Thread => "Hook thread",
            Self::X11 => "X11",
            Self::Windows => "Windows",
            Self::Darwin => "Darwin",
        }
    }

    /// Remediation hint shared by every code of this origin.
    ///
    /// Individual codes may carry a more specific hint, see
    /// [`FailureCode::remediation`].
    #[inline]
    pub const fn remediation(self) -> Option<&'static str> {
        match self {
            Self::Generic => None,
            Self::Thread => Some("Check process thread limits before starting the hook again."),
            Self::X11 => Some("Verify that DISPLAY names a running X server with the RECORD extension."),
            Self::Windows => Some("Inspect the attached OS error; the hook must be installed from a thread that pumps messages."),
            Self::Darwin => Some("Grant this application accessibility access in System Settings > Privacy & Security > Accessibility."),
        }
    }
}

impl fmt::Display for FailureOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Failure Code (Primary Identity Type)
// ============================================================================

/// A native hook failure code.
///
/// The discriminants are the wire values exchanged with the native bridge.
/// `UnknownFailure` is the default when a producer supplies no code.
///
/// Display format is `E-<TAG>-<HH>`, e.g. `E-WIN-30` for [`FailureCode::WinSetHook`].
#[repr(u16)]
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FailureCode {
    /// Unknown failure.
    #[default]
    UnknownFailure = 0x00,
    /// General hook failure.
    HookFailure = 0x01,

    /// Native thread create failure.
    ThreadCreate = 0x10,
    /// Native thread initialization failure.
    ThreadInit = 0x11,
    /// Native thread start failure.
    ThreadStart = 0x12,

    /// The X11 display could not be opened.
    X11OpenDisplay = 0x20,
    /// The XRecord extension was not found.
    X11RecordNotFound = 0x21,
    /// XRecord could not allocate a record range.
    X11RecordAllocRange = 0x22,
    /// XRecord could not create a context.
    X11RecordCreateContext = 0x23,
    /// XRecord could not enable the context.
    X11RecordEnableContext = 0x24,

    /// `SetWindowsHookEx` failed to register the low level hook.
    WinSetHook = 0x30,

    /// Access for assistive devices is disabled.
    DarwinAxapiDisabled = 0x40,
    /// An event port could not be created.
    DarwinCreateEventPort = 0x41,
    /// A run loop source could not be created.
    DarwinCreateRunLoopSource = 0x42,
    /// The current run loop could not be acquired.
    DarwinGetRunLoop = 0x43,
    /// A run loop observer could not be created.
    DarwinCreateObserver = 0x44,
}

impl FailureCode {
    /// Look up a code by its raw wire value.
    #[inline]
    pub const fn from_u16(raw: u16) -> Option<Self> {
        match raw {
            0x00 => Some(Self::UnknownFailure),
            0x01 => Some(Self::HookFailure),
            0x10 => Some(Self::ThreadCreate),
            0x11 => Some(Self::ThreadInit),
            0x12 => Some(Self::ThreadStart),
            0x20 => Some(Self::X11OpenDisplay),
            0x21 => Some(Self::X11RecordNotFound),
            0x22 => Some(Self::X11RecordAllocRange),
            0x23 => Some(Self::X11RecordCreateContext),
            0x24 => Some(Self::X11RecordEnableContext),
            0x30 => Some(Self::WinSetHook),
            0x40 => Some(Self::DarwinAxapiDisabled),
            0x41 => Some(Self::DarwinCreateEventPort),
            0x42 => Some(Self::DarwinCreateRunLoopSource),
            0x43 => Some(Self::DarwinGetRunLoop),
            0x44 => Some(Self::DarwinCreateObserver),
            _ => None,
        }
    }

    /// Raw wire value.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Subsystem this code belongs to.
    #[inline]
    pub const fn origin(self) -> FailureOrigin {
        match self {
            Self::UnknownFailure | Self::HookFailure => FailureOrigin::Generic,
            Self::ThreadCreate | Self::ThreadInit | Self::ThreadStart => FailureOrigin::Thread,
            Self::X11OpenDisplay
            | Self::X11RecordNotFound
            | Self::X11RecordAllocRange
            | Self::X11RecordCreateContext
            | Self::X11RecordEnableContext => FailureOrigin::X11,
            Self::WinSetHook => FailureOrigin::Windows,
            Self::DarwinAxapiDisabled
            | Self::DarwinCreateEventPort
            | Self::DarwinCreateRunLoopSource
            | Self::DarwinGetRunLoop
            | Self::DarwinCreateObserver => FailureOrigin::Darwin,
        }
    }

    /// Position of this code in [`definitions::CODE_TABLE`].
    #[inline]
    pub(crate) const fn table_index(self) -> usize {
        match self {
            Self::UnknownFailure => 0,
            Self::HookFailure => 1,
            Self::ThreadCreate => 2,
            Self::ThreadInit => 3,
            Self::ThreadStart => 4,
            Self::X11OpenDisplay => 5,
            Self::X11RecordNotFound => 6,
            Self::X11RecordAllocRange => 7,
            Self::X11RecordCreateContext => 8,
            Self::X11RecordEnableContext => 9,
            Self::WinSetHook => 10,
            Self::DarwinAxapiDisabled => 11,
            Self::DarwinCreateEventPort => 12,
            Self::DarwinCreateRunLoopSource => 13,
            Self::DarwinGetRunLoop => 14,
            Self::DarwinCreateObserver => 15,
        }
    }

    /// Canonical constant name shared with the native bridge, e.g. `WIN_SET_HOOK`.
    #[inline]
    pub fn name(self) -> &'static str {
        definitions::info(self).name
    }

    /// One-line description of what failed.
    #[inline]
    pub fn summary(self) -> &'static str {
        definitions::info(self).summary
    }

    /// Most specific remediation hint available for this code.
    ///
    /// Falls back to the origin-wide hint when the code has none of its own.
    #[inline]
    pub fn remediation(self) -> Option<&'static str> {
        definitions::info(self)
            .remediation
            .or(self.origin().remediation())
    }

    /// `false` for the catch-all codes `UNKNOWN_FAILURE` and `HOOK_FAILURE`.
    #[inline]
    pub const fn is_specific(self) -> bool {
        !matches!(self, Self::UnknownFailure | Self::HookFailure)
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E-{}-{:02X}", self.origin().tag(), self.as_u16())
    }
}

impl From<FailureCode> for u16 {
    #[inline]
    fn from(code: FailureCode) -> Self {
        code.as_u16()
    }
}

impl TryFrom<u16> for FailureCode {
    type Error = UnrecognizedCode;

    #[inline]
    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        Self::from_u16(raw).ok_or(UnrecognizedCode { value: raw })
    }
}

// ============================================================================
// Unrecognized Code
// ============================================================================

/// A raw value that is not part of the failure code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnrecognizedCode {
    /// The rejected raw value.
    pub value: u16,
}

impl UnrecognizedCode {
    /// Origin implied by the high nibble, if any backend owns it.
    #[inline]
    pub const fn origin(&self) -> Option<FailureOrigin> {
        FailureOrigin::of(self.value)
    }
}

impl fmt::Display for UnrecognizedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.origin() {
            Some(origin) => write!(
                f,
                "unrecognized native failure code 0x{:02X} in the {} range",
                self.value, origin
            ),
            None => write!(f, "unrecognized native failure code 0x{:02X}", self.value),
        }
    }
}

impl std::error::Error for UnrecognizedCode {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Origin Tests
    // ========================================================================

    #[test]
    fn origin_ranges_are_disjoint() {
        for (i, a) in FailureOrigin::ALL.iter().enumerate() {
            for b in &FailureOrigin::ALL[i + 1..] {
                let (a_start, a_end) = a.range();
                let (b_start, _) = b.range();
                assert!(a_end < b_start, "{a:?} overlaps {b:?}");
                assert!(a_start < b_start);
            }
        }
    }

    #[test]
    fn origin_of_uses_high_nibble() {
        assert_eq!(FailureOrigin::of(0x00), Some(FailureOrigin::Generic));
        assert_eq!(FailureOrigin::of(0x1F), Some(FailureOrigin::Thread));
        assert_eq!(FailureOrigin::of(0x25), Some(FailureOrigin::X11));
        assert_eq!(FailureOrigin::of(0x30), Some(FailureOrigin::Windows));
        assert_eq!(FailureOrigin::of(0x44), Some(FailureOrigin::Darwin));
        assert_eq!(FailureOrigin::of(0x50), None);
        assert_eq!(FailureOrigin::of(0xFFFF), None);
    }

    #[test]
    fn darwin_origin_hints_at_accessibility() {
        let hint = FailureOrigin::Darwin.remediation().unwrap();
        assert!(hint.contains("accessibility"));
        assert!(FailureOrigin::Generic.remediation().is_none());
    }

    // ========================================================================
    // Code Tests
    // ========================================================================

    #[test]
    fn code_origin_matches_nibble() {
        for info in definitions::CODE_TABLE.iter() {
            let code = info.code;
            assert_eq!(FailureOrigin::of(code.as_u16()), Some(code.origin()));
            assert!(code.origin().contains(code.as_u16()));
        }
    }

    #[test]
    fn from_u16_inverts_as_u16() {
        for info in definitions::CODE_TABLE.iter() {
            assert_eq!(FailureCode::from_u16(info.code.as_u16()), Some(info.code));
        }
        assert_eq!(FailureCode::from_u16(0x02), None);
        assert_eq!(FailureCode::from_u16(0x31), None);
    }

    #[test]
    fn default_is_unknown_failure() {
        assert_eq!(FailureCode::default(), FailureCode::UnknownFailure);
        assert_eq!(FailureCode::default().as_u16(), 0x00);
    }

    #[test]
    fn display_format() {
        assert_eq!(FailureCode::UnknownFailure.to_string(), "E-GEN-00");
        assert_eq!(FailureCode::ThreadStart.to_string(), "E-THR-12");
        assert_eq!(FailureCode::X11RecordEnableContext.to_string(), "E-X11-24");
        assert_eq!(FailureCode::WinSetHook.to_string(), "E-WIN-30");
        assert_eq!(FailureCode::DarwinCreateObserver.to_string(), "E-DAR-44");
    }

    #[test]
    fn catch_all_codes_are_not_specific() {
        assert!(!FailureCode::UnknownFailure.is_specific());
        assert!(!FailureCode::HookFailure.is_specific());
        assert!(FailureCode::ThreadCreate.is_specific());
        assert!(FailureCode::DarwinAxapiDisabled.is_specific());
    }

    #[test]
    fn remediation_prefers_code_specific_hint() {
        let specific = FailureCode::X11RecordNotFound.remediation().unwrap();
        assert_ne!(Some(specific), FailureOrigin::X11.remediation());

        // No code-specific hint: inherits the origin's.
        assert_eq!(
            FailureCode::X11RecordAllocRange.remediation(),
            FailureOrigin::X11.remediation()
        );
        assert_eq!(FailureCode::UnknownFailure.remediation(), None);
    }

    // ========================================================================
    // Unrecognized Code Tests
    // ========================================================================

    #[test]
    fn try_from_rejects_unknown_values() {
        let err = FailureCode::try_from(0x25u16).unwrap_err();
        assert_eq!(err, UnrecognizedCode { value: 0x25 });
        assert_eq!(err.origin(), Some(FailureOrigin::X11));
        assert!(err.to_string().contains("0x25"));
        assert!(err.to_string().contains("X11"));
    }

    #[test]
    fn unrecognized_without_origin() {
        let err = FailureCode::try_from(0x99u16).unwrap_err();
        assert_eq!(err.origin(), None);
        assert_eq!(err.to_string(), "unrecognized native failure code 0x99");
    }
}
