//! mIRC-style text decoration helpers.
//!
//! These wrap text with the control bytes clients use for inline
//! markup. They sit above the core: decorated text is sent through the
//! ordinary `send`/`send_chat` operations.

/// Bold delimiter (0x02).
pub const BOLD: char = '\u{02}';
/// Color delimiter (0x03).
pub const COLOR: char = '\u{03}';
/// Underline delimiter (0x1F).
pub const UNDERLINE: char = '\u{1F}';

/// Extension methods for decorating outbound text.
pub trait TextFormatExt {
    /// Wrap in bold delimiters.
    fn bold(&self) -> String;

    /// Wrap in underline delimiters.
    fn underline(&self) -> String;

    /// Prefix with a color code and close the color run.
    fn color(&self, code: u8) -> String;
}

impl TextFormatExt for str {
    fn bold(&self) -> String {
        format!("{BOLD}{}{BOLD}", self)
    }

    fn underline(&self) -> String {
        format!("{UNDERLINE}{}{UNDERLINE}", self)
    }

    fn color(&self, code: u8) -> String {
        format!("{COLOR}{code}{}{COLOR}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold() {
        assert_eq!("hi".bold(), "\u{02}hi\u{02}");
    }

    #[test]
    fn test_underline() {
        assert_eq!("hi".underline(), "\u{1F}hi\u{1F}");
    }

    #[test]
    fn test_color() {
        assert_eq!("hi".color(3), "\u{03}3hi\u{03}");
        assert_eq!("hi".color(12), "\u{03}12hi\u{03}");
    }

    #[test]
    fn test_nesting() {
        assert_eq!("hi".bold().underline(), "\u{1F}\u{02}hi\u{02}\u{1F}");
    }
}
