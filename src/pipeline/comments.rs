/// Removes `//` and `/* */` comments line by line.
///
/// The stripper remembers an open block comment between calls, so feed it the
/// emitted lines of one file in order.
///
/// # Example
/// ```
/// use sift::pipeline::comments::CommentStripper;
///
/// let mut stripper = CommentStripper::default();
/// assert_eq!(stripper.strip("int a = 1; // counter"), "int a = 1;");
/// assert_eq!(stripper.strip("String s = \"//not a comment\";"), "String s = \"//not a comment\";");
/// assert_eq!(stripper.strip("x /* starts"), "x");
/// assert_eq!(stripper.strip("still inside"), "");
/// assert_eq!(stripper.strip("ends */ y"), " y");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentStripper {
    in_block: bool,
}

impl CommentStripper {
    /// Returns `line` without its comments. Trailing whitespace left behind by
    /// a removed comment is trimmed; lines without comments come back
    /// unchanged.
    pub fn strip(&mut self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut chars = line.chars().peekable();
        let mut quote: Option<char> = None;
        let mut removed = self.in_block;

        while let Some(c) = chars.next() {
            if self.in_block {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    self.in_block = false;
                }
                continue;
            }

            if let Some(q) = quote {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == q {
                    quote = None;
                }
                continue;
            }

            match (c, chars.peek()) {
                ('"' | '\'', _) => {
                    quote = Some(c);
                    out.push(c);
                },
                ('/', Some('/')) => {
                    removed = true;
                    break;
                },
                ('/', Some('*')) => {
                    chars.next();
                    self.in_block = true;
                    removed = true;
                },
                _ => out.push(c),
            }
        }

        if removed {
            out.truncate(out.trim_end().len());
        }
        out
    }

    /// Returns `true` while a block comment is open.
    ///
    /// # Example
    /// ```
    /// use sift::pipeline::comments::CommentStripper;
    ///
    /// let mut stripper = CommentStripper::default();
    /// stripper.strip("copy src/*.java");
    /// assert!(stripper.in_block_comment());
    /// ```
    #[must_use]
    pub const fn in_block_comment(&self) -> bool {
        self.in_block
    }
}
