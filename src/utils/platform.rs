//! Platform utilities.

use std::process::{Command, Stdio};

/// Program that opens a URL with the user's default handler
const OPENER: (&str, &[&str]) = {
    #[cfg(target_os = "macos")]
    {
        ("open", &[])
    }

    #[cfg(target_os = "windows")]
    {
        ("cmd", &["/C", "start", ""])
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        ("xdg-open", &[])
    }
};

/// Open `url` in the default browser. Failures are only logged.
pub fn open_browser(url: &str) {
    let (program, args) = OPENER;
    let result = Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    match result {
        Ok(_) => crate::debug!("serve"; "opened {} with {}", url, program),
        Err(e) => crate::log!("serve"; "could not open browser ({}): {}", program, e),
    }
}
