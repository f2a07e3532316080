//! Colored status lines

use crossterm::style::{Color, Stylize, style};

/// Types of operation status
#[derive(Debug, Clone, PartialEq)]
pub enum OperationStatus {
    InProgress,
    Success,
    Warning,
}

impl OperationStatus {
    fn symbol(&self) -> &'static str {
        match self {
            OperationStatus::InProgress => "⏳",
            OperationStatus::Success => "✅",
            OperationStatus::Warning => "⚠️",
        }
    }

    fn color(&self) -> Color {
        match self {
            OperationStatus::InProgress => Color::Cyan,
            OperationStatus::Success => Color::Green,
            OperationStatus::Warning => Color::Yellow,
        }
    }
}

/// Colors are used only on a terminal and when NO_COLOR is unset
pub fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

/// Render a status line without printing it
pub fn format_status(message: &str, status: &OperationStatus, color: bool) -> String {
    // Space before emoji prevents terminal clipping
    if color {
        format!(" {} {}", status.symbol(), style(message).with(status.color()))
    } else {
        format!(" {} {}", status.symbol(), message)
    }
}

/// Display operation status with color output
pub fn display_status(message: &str, status: OperationStatus) {
    let line = format_status(message, &status, use_color());
    match status {
        OperationStatus::Warning => eprintln!("{}", line),
        _ => println!("{}", line),
    }
}

/// Print a `key: value` pair with the key highlighted
pub fn display_field(key: &str, value: &str) {
    if use_color() {
        println!("{}: {}", style(key).bold(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_status_plain() {
        assert_eq!(
            format_status("Uploaded web-0.1.1.tgz", &OperationStatus::Success, false),
            " ✅ Uploaded web-0.1.1.tgz"
        );
        assert_eq!(
            format_status("Release web not found", &OperationStatus::Warning, false),
            " ⚠️ Release web not found"
        );
    }

    #[test]
    fn test_format_status_colored() {
        let line = format_status("Upgrading web", &OperationStatus::InProgress, true);
        assert!(line.starts_with(" ⏳ "));
        assert!(line.contains("Upgrading web"));
    }
}
