//! Character-by-character text reveal with a pause between lines.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterConfig {
    pub char_delay: Duration,
    pub line_pause: Duration,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            char_delay: Duration::from_millis(30),
            line_pause: Duration::from_millis(500),
        }
    }
}

/// Reveals `lines` over time.  Feed it elapsed time with
/// [`advance`](Typewriter::advance); it keeps any leftover so frame
/// jitter doesn't slow the reveal down.
#[derive(Debug, Clone)]
pub struct Typewriter {
    lines: Vec<String>,
    config: TypewriterConfig,
    line: usize,
    /// Characters of `lines[line]` revealed so far.
    chars: usize,
    carry: Duration,
}

impl Typewriter {
    pub fn new<I, S>(lines: I, config: TypewriterConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            config,
            line: 0,
            chars: 0,
            carry: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.carry += elapsed;
        while !self.is_done() {
            let len = self.lines[self.line].chars().count();
            let step = if self.chars < len {
                self.config.char_delay
            } else {
                self.config.line_pause
            };
            if self.carry < step {
                break;
            }
            self.carry -= step;
            if self.chars < len {
                self.chars += 1;
            } else {
                self.line += 1;
                self.chars = 0;
            }
        }
        if self.is_done() {
            self.carry = Duration::ZERO;
        }
    }

    pub fn is_done(&self) -> bool {
        self.line >= self.lines.len()
    }

    /// Lines revealed so far; the last one may be partial.
    pub fn visible_lines(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.lines.iter().take(self.line).map(String::as_str).collect();
        if let Some(current) = self.lines.get(self.line) {
            if self.chars > 0 {
                let end = current
                    .char_indices()
                    .nth(self.chars)
                    .map_or(current.len(), |(i, _)| i);
                out.push(&current[..end]);
            }
        }
        out
    }

    /// Index of the line carrying the cursor: the fully typed line that is
    /// waiting out its pause.
    pub fn cursor_line(&self) -> Option<usize> {
        let current = self.lines.get(self.line)?;
        (self.chars > 0 && self.chars == current.chars().count()).then_some(self.line)
    }

    pub fn reset(&mut self) {
        self.line = 0;
        self.chars = 0;
        self.carry = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn reveals_one_char_per_delay() {
        let mut tw = Typewriter::new(["abc", "de"], TypewriterConfig::default());
        tw.advance(ms(29));
        assert!(tw.visible_lines().is_empty());
        tw.advance(ms(1));
        assert_eq!(tw.visible_lines(), vec!["a"]);
        tw.advance(ms(60));
        assert_eq!(tw.visible_lines(), vec!["abc"]);
        assert_eq!(tw.cursor_line(), Some(0));

        tw.advance(ms(499));
        assert_eq!(tw.cursor_line(), Some(0));
        tw.advance(ms(1 + 30));
        assert_eq!(tw.visible_lines(), vec!["abc", "d"]);
        assert_eq!(tw.cursor_line(), None);
    }

    #[test]
    fn large_step_finishes_everything() {
        let mut tw = Typewriter::new(["Karachi", "Kolachi"], TypewriterConfig::default());
        tw.advance(Duration::from_secs(10));
        assert!(tw.is_done());
        assert_eq!(tw.visible_lines(), vec!["Karachi", "Kolachi"]);
    }

    #[test]
    fn multibyte_text_is_split_on_chars() {
        let mut tw = Typewriter::new(["کراچی"], TypewriterConfig::default());
        tw.advance(ms(60));
        assert_eq!(tw.visible_lines(), vec!["کر"]);
    }
}
