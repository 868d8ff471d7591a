//! Text layout and colour for the terminal.

use colored::Colorize;

/// Narrowest wrap width accepted.
pub const MIN_WIDTH: usize = 20;
/// Widest wrap width accepted.
pub const MAX_WIDTH: usize = 200;

/// Greedy word wrap. Existing line breaks are kept and lines that already
/// fit are left alone, so tables pass through unchanged.
pub fn wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    text.lines()
        .map(|line| wrap_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, width: usize) -> String {
    if line.chars().count() <= width {
        return line.to_string();
    }
    let mut out = String::new();
    let mut current = 0;
    for word in line.split_whitespace() {
        let len = word.chars().count();
        if current > 0 && current + 1 + len > width {
            out.push('\n');
            current = 0;
        } else if current > 0 {
            out.push(' ');
            current += 1;
        }
        out.push_str(word);
        current += len;
    }
    out
}

/// Colour narration that marks a turning point.
pub fn style(text: &str) -> String {
    if text.starts_with("Battle!") {
        text.red().bold().to_string()
    } else if text.starts_with("Victory!") || text.starts_with("LEVEL UP!") {
        text.green().bold().to_string()
    } else if text.starts_with("THE END") {
        text.yellow().bold().to_string()
    } else if text.starts_with("You have fallen") {
        text.red().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lines_are_untouched() {
        assert_eq!(wrap("a short line", 40), "a short line");
        assert_eq!(wrap("one\ntwo", 40), "one\ntwo");
    }

    #[test]
    fn long_lines_break_at_words() {
        let text = "the quick brown fox jumps over the lazy dog";
        let wrapped = wrap(text, 15);
        assert_eq!(wrapped, "the quick brown\nfox jumps over\nthe lazy dog");
        assert!(wrapped.lines().all(|l| l.chars().count() <= 15));
    }

    #[test]
    fn overlong_words_stay_whole() {
        assert_eq!(wrap("a supercalifragilistic b", 8), "a\nsupercalifragilistic\nb");
    }

    #[test]
    fn style_without_colour_is_identity() {
        colored::control::set_override(false);
        assert_eq!(style("Battle! You face: Wolf."), "Battle! You face: Wolf.");
        assert_eq!(style("The road is quiet."), "The road is quiet.");
    }
}
