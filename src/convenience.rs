//! Convenience macros for producers raising hook failures.
//!
//! # Usage
//!
//! ```rust
//! # use native_hook_errors::{hook_failure, FailureCode};
//! let display = ":0";
//! let err = hook_failure!(FailureCode::X11OpenDisplay, "XOpenDisplay({}) returned NULL", display);
//! assert_eq!(err.message(), Some("XOpenDisplay(:0) returned NULL"));
//! ```
//!
//! ```rust
//! # use native_hook_errors::{ensure_hook, FailureCode, Result};
//! fn enable_context(status: i32) -> Result<()> {
//!     ensure_hook!(status != 0, FailureCode::X11RecordEnableContext, "status {}", status);
//!     Ok(())
//! }
//! assert!(enable_context(0).is_err());
//! ```
//!
//! Note: the message form always formats, so it allocates. That is fine on
//! failure paths.

/// Build a [`NativeHookFailure`](crate::NativeHookFailure).
///
/// - `hook_failure!(code)`: code only
/// - `hook_failure!(code, "fmt", args..)`: code and formatted message
#[macro_export]
macro_rules! hook_failure {
    ($code:expr $(,)?) => {
        $crate::NativeHookFailure::from_code($code)
    };
    ($code:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::NativeHookFailure::new($code, ::std::format!($fmt $(, $arg)*))
    };
}

/// Return early with a hook failure unless a condition holds.
///
/// The failure is converted with `Into`, so the enclosing function may return
/// any error type implementing `From<NativeHookFailure>`.
#[macro_export]
macro_rules! ensure_hook {
    ($cond:expr, $code:expr $(,)?) => {
        if !$cond {
            return ::std::result::Result::Err($crate::hook_failure!($code).into());
        }
    };
    ($cond:expr, $code:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        if !$cond {
            return ::std::result::Result::Err($crate::hook_failure!($code, $fmt $(, $arg)*).into());
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{FailureCode, NativeHookFailure, Result};

    #[test]
    fn hook_failure_code_only() {
        let err = hook_failure!(FailureCode::ThreadCreate);
        assert_eq!(err.code(), FailureCode::ThreadCreate);
        assert!(err.message().is_none());
    }

    #[test]
    fn hook_failure_formats_message() {
        let status = 5;
        let err = hook_failure!(FailureCode::WinSetHook, "GetLastError={}", status);
        assert_eq!(err.message(), Some("GetLastError=5"));

        let err = hook_failure!(FailureCode::HookFailure, "inline {status}");
        assert_eq!(err.message(), Some("inline 5"));
    }

    #[test]
    fn ensure_hook_passes_and_fails() {
        fn check(ok: bool) -> Result<u8> {
            ensure_hook!(ok, FailureCode::DarwinGetRunLoop);
            Ok(1)
        }
        assert_eq!(check(true).unwrap(), 1);
        assert_eq!(check(false).unwrap_err().code(), FailureCode::DarwinGetRunLoop);
    }

    #[test]
    fn ensure_hook_converts_into_caller_error() {
        #[derive(Debug)]
        struct Wrapper(NativeHookFailure);

        impl From<NativeHookFailure> for Wrapper {
            fn from(err: NativeHookFailure) -> Self {
                Wrapper(err)
            }
        }

        fn install(port: Option<u32>) -> std::result::Result<u32, Wrapper> {
            ensure_hook!(port.is_some(), FailureCode::DarwinCreateEventPort, "tap port missing");
            Ok(port.unwrap_or_default())
        }

        let Wrapper(err) = install(None).unwrap_err();
        assert_eq!(err.code(), FailureCode::DarwinCreateEventPort);
        assert_eq!(err.message(), Some("tap port missing"));
    }
}
