//! Detaching from the console window while the alarm waits.

use log::debug;

/// Detaches the process from its console so no empty terminal window stays around while waiting.
#[cfg(target_os = "windows")]
pub fn hide() {
    // SAFETY: FreeConsole takes no arguments and only fails if there is no console to free
    let freed = unsafe { windows_sys::Win32::System::Console::FreeConsole() };
    if freed == 0 {
        debug!("no console to hide");
    } else {
        debug!("console hidden");
    }
}

/// Terminals on other platforms belong to the user, leave them alone.
#[cfg(not(target_os = "windows"))]
pub fn hide() {
    debug!("console hiding is only done on windows");
}
