//! CLI command messaging
//!
//! Tagged, colored one-liners for the non-TUI commands (`config`, `assign`,
//! `topic`, `snapshot`).

const COLOR_INFO: &str = "\x1b[1;33m";
const COLOR_WARN: &str = "\x1b[1;91m";
const COLOR_ERROR: &str = "\x1b[1;31m";
const COLOR_SUCCESS: &str = "\x1b[1;32m";
const COLOR_RESET: &str = "\x1b[0m";

fn format_tagged(color: &str, tag: &str, title: &str, details: &str) -> String {
    if details.is_empty() {
        format!("{}[{}]{} {}", color, tag, COLOR_RESET, title)
    } else {
        format!("{}[{}]{} {}\t {}", color, tag, COLOR_RESET, title, details)
    }
}

/// Print CLI command info message
pub fn print_info(title: &str, details: &str) {
    println!("{}", format_tagged(COLOR_INFO, "INFO", title, details));
}

/// Print CLI command warn message
pub fn print_warn(title: &str, details: &str) {
    eprintln!("{}", format_tagged(COLOR_WARN, "WARN", title, details));
}

/// Print CLI command error
pub fn print_error(title: &str, details: Option<&str>) {
    eprintln!("{}", format_tagged(COLOR_ERROR, "ERROR", title, details.unwrap_or_default()));
}

/// Print CLI command success
pub fn print_success(title: &str, details: &str) {
    println!("{}", format_tagged(COLOR_SUCCESS, "SUCCESS", title, details));
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}
