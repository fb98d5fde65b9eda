use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

#[macro_export]
macro_rules! print_fg {
    ($out:expr, $color:expr, $($arg:tt)*) => {
        $crate::styled($out, $color, false, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! print_bg {
    ($out:expr, $color:expr, $($arg:tt)*) => {
        $crate::styled($out, $color, true, &format!($($arg)*))
    };
}

/// Write one line, colored when `color` is set.
pub fn styled(
    out: &mut impl Write,
    color: Option<Color>,
    background: bool,
    text: &str,
) -> io::Result<()> {
    match color {
        Some(color) if background => {
            queue!(out, SetBackgroundColor(color), Print(text), ResetColor)?
        }
        Some(color) => queue!(out, SetForegroundColor(color), Print(text), ResetColor)?,
        None => queue!(out, Print(text))?,
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_has_no_escape_codes() {
        let mut out = Vec::new();
        print_fg!(&mut out, None, "{} tasks", 3).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "3 tasks\n");
    }

    #[test]
    fn colored_output_is_wrapped() {
        let mut out = Vec::new();
        print_bg!(&mut out, Some(Color::DarkRed), "oops").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('\u{1b}'));
        assert!(text.contains("oops"));
        assert!(text.ends_with('\n'));
    }
}
