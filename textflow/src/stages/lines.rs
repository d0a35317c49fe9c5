//! Line splitting and joining shared by the line-oriented stages.
//!
//! Lines are separated by `\n`. A single trailing `\n` terminates the last
//! line instead of opening an empty one, and `\r` is ordinary content.
//! Joining restores the trailing terminator when the source text had one
//! and at least one line survives. A result whose last line is empty is
//! always terminated, so one empty line never joins to the same text as
//! no lines at all.

/// A text payload broken into lines, remembering its trailing terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Lines<'a> {
    lines: Vec<&'a str>,
    terminated: bool,
}

impl<'a> Lines<'a> {
    /// Splits text into lines.
    pub(crate) fn split(text: &'a str) -> Self {
        Self {
            lines: text.split_terminator('\n').collect(),
            terminated: text.ends_with('\n'),
        }
    }

    /// Keeps only the lines matching the predicate, preserving order.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.lines.retain(|line| keep(line));
    }

    /// Sorts the lines by byte order. Equal lines keep their relative order.
    pub(crate) fn sort(&mut self) {
        self.lines.sort();
    }

    /// Returns the number of lines.
    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }

    /// Joins the lines back into one text payload.
    pub(crate) fn join(&self) -> String {
        let mut out = self.lines.join("\n");
        match self.lines.last() {
            Some(last) if self.terminated || last.is_empty() => out.push('\n'),
            _ => {}
        }
        out
    }
}
