use native_hook_errors::{
    ensure_hook, hook_failure, FailureCode, FailureOrigin, NativeHookFailure, Result,
};
use std::io;

// Stand-ins for the native backends. Each one fails the way the real
// backend would report it across the bridge.

fn install_x11(display: &str) -> Result<()> {
    let record_extension_present = false;
    ensure_hook!(
        record_extension_present,
        FailureCode::X11RecordNotFound,
        "XRecordQueryVersion failed on {}",
        display
    );
    Ok(())
}

fn install_windows() -> Result<()> {
    // What SetWindowsHookExW + GetLastError would produce for ERROR_ACCESS_DENIED.
    let os_error = io::Error::from_raw_os_error(5);
    Err(NativeHookFailure::with_cause(
        FailureCode::WinSetHook,
        "SetWindowsHookEx failed",
        os_error,
    )
    .with_metadata("hook", "WH_KEYBOARD_LL"))
}

fn install_darwin() -> Result<()> {
    // Raw (code, message) pair exactly as the native side raises it.
    Err(NativeHookFailure::from_native(0x40, "AXIsProcessTrustedWithOptions returned false"))
}

fn install_future_backend() -> Result<()> {
    Err(NativeHookFailure::from_native(0x45, "CGEventTapIsEnabled returned false"))
}

fn report(err: &NativeHookFailure) {
    println!("  Display:   {}", err);
    println!("  Code:      {} ({})", err.code(), err.code().name());
    println!("  Origin:    {}", err.origin());

    err.with_failure_log(|log| {
        let mut line = String::new();
        if log.write_to(&mut line).is_ok() {
            println!("  Log:       {}", line);
        }
    });

    match err.code() {
        FailureCode::DarwinAxapiDisabled => println!("  -> prompt the user for accessibility access"),
        FailureCode::WinSetHook => println!("  -> inspect the OS error and retry from a message-loop thread"),
        code if code.origin() == FailureOrigin::X11 => println!("  -> fall back to polling input"),
        _ => println!("  -> abort hook startup"),
    }

    if let Some(hint) = err.remediation() {
        println!("  Hint:      {}", hint);
    }
}

fn main() {
    println!("--- Hook Install Failures ---\n");

    let attempts: [(&str, fn() -> Result<()>); 4] = [
        ("x11", || install_x11(":0")),
        ("windows", install_windows),
        ("darwin", install_darwin),
        ("future", install_future_backend),
    ];

    for (backend, install) in attempts {
        println!("[{}]", backend);
        if let Err(err) = install() {
            report(&err);
        }
        println!();
    }

    let generic = hook_failure!(FailureCode::HookFailure, "hook stopped after {} events", 0);
    println!("[generic]");
    report(&generic);
}
