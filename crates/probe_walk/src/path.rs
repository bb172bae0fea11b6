use std::fmt;

// -----------------------------------------------------------------------------
// Path

/// The remaining segments of a navigation request.
///
/// Handlers consume the path from the front with [`Path::pop`]. The segments
/// are stored in reverse order so that popping is cheap.
///
/// # Text form
///
/// Segments are separated by `/`. A `!` escapes the following character, so
/// `!/` is a literal slash inside a segment and `!!` a literal `!`.
///
/// ```
/// use probe_walk::Path;
///
/// let path = Path::parse("headers/content!/type");
/// assert_eq!(path.segments().collect::<Vec<_>>(), ["headers", "content/type"]);
/// assert_eq!(path.to_string(), "headers/content!/type");
/// ```
///
/// The empty string is the empty path, so a path holding a single empty
/// segment has no text form of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    stack: Vec<String>,
}

impl Path {
    /// Creates an empty path.
    #[inline]
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Creates a path from segments in navigation order.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stack: Vec<String> = segments.into_iter().map(Into::into).collect();
        stack.reverse();
        Self { stack }
    }

    /// Parses the `/`-separated text form.
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::new();
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            match c {
                '!' => current.push(chars.next().unwrap_or('!')),
                '/' => segments.push(core::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
        segments.push(current);

        Self::from_segments(segments)
    }

    /// Returns the next segment without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    /// Consumes and returns the next segment.
    #[inline]
    pub fn pop(&mut self) -> Option<String> {
        self.stack.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Iterates the remaining segments in navigation order.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.stack.iter().rev().map(String::as_str)
    }

    /// Splits off the final segment, returning the path leading to it.
    pub fn split_last(mut self) -> Option<(Path, String)> {
        if self.stack.is_empty() {
            return None;
        }
        let last = self.stack.remove(0);
        Some((self, last))
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    #[inline]
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            for c in segment.chars() {
                if matches!(c, '/' | '!') {
                    f.write_str("!")?;
                }
                fmt::Write::write_char(f, c)?;
            }
        }
        Ok(())
    }
}
