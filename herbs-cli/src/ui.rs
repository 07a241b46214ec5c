//! Progress feedback for the herbs CLI
//!
//! # Quiet Mode
//!
//! Spinners are suppressed when:
//! - `--quiet` flag is passed
//! - `HERBS_QUIET=1` environment variable is set
//! - stderr is not a TTY (piped output)

use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Global quiet mode state
static QUIET_MODE: OnceLock<bool> = OnceLock::new();

fn quiet_from(flag: bool, env_value: Option<&str>, stderr_is_tty: bool) -> bool {
    flag || env_value == Some("1") || !stderr_is_tty
}

/// Initialize quiet mode from flags and environment
///
/// Call this once at startup with the --quiet flag value.
pub fn init_quiet_mode(quiet_flag: bool) {
    let env_value = std::env::var("HERBS_QUIET").ok();
    let is_quiet = quiet_from(
        quiet_flag,
        env_value.as_deref(),
        std::io::stderr().is_terminal(),
    );

    QUIET_MODE.set(is_quiet).ok();
}

pub fn is_quiet() -> bool {
    *QUIET_MODE.get().unwrap_or(&false)
}

fn message_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Create a spinner that respects quiet mode
pub fn spinner(msg: impl Into<String>) -> Option<ProgressBar> {
    if is_quiet() {
        return None;
    }

    let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

pub fn finish_success(pb: Option<ProgressBar>, msg: impl Into<String>) {
    if let Some(pb) = pb {
        pb.set_style(message_style());
        pb.finish_with_message(format!("✓ {}", msg.into()));
    }
}

pub fn finish_error(pb: Option<ProgressBar>, msg: impl Into<String>) {
    if let Some(pb) = pb {
        pb.set_style(message_style());
        pb.finish_with_message(format!("✗ {}", msg.into()));
    }
}

/// Await `f` behind a spinner, then show success or the error.
///
/// In quiet mode, just runs the operation silently.
pub async fn with_spinner_async<T, E: std::fmt::Display>(
    msg: impl Into<String>,
    success_msg: impl Into<String>,
    f: impl std::future::Future<Output = Result<T, E>>,
) -> Result<T, E> {
    let msg = msg.into();
    let pb = spinner(&msg);

    match f.await {
        Ok(result) => {
            finish_success(pb, success_msg);
            Ok(result)
        }
        Err(e) => {
            finish_error(pb, format!("{}: {}", msg, e));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_forces_quiet() {
        assert!(quiet_from(true, None, true));
    }

    #[test]
    fn env_var_forces_quiet() {
        assert!(quiet_from(false, Some("1"), true));
        assert!(!quiet_from(false, Some("0"), true));
    }

    #[test]
    fn piped_stderr_is_quiet() {
        assert!(quiet_from(false, None, false));
        assert!(!quiet_from(false, None, true));
    }
}
