use std::iter::FusedIterator;

use crate::types::is_valid_label;

/// One hostname label and where it starts in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostnamePart<'a> {
    /// Byte offset of the label's first byte
    pub offset: usize,
    /// Label bytes, without separators
    pub label: &'a [u8],
}

/// Iterates the labels of `buf[start..end]` right to left.
///
/// For `foo\0bar\0com` with a NUL separator this yields `com`, `bar`, then
/// `foo`. A single trailing separator (the root dot of a fully-qualified
/// name) is skipped. Iteration stops for good at the first empty label or
/// label starting with `!`.
#[derive(Debug, Clone)]
pub struct HostnameParts<'a> {
    buf: &'a [u8],
    start: usize,
    end: usize,
    sep: u8,
    /// Position of the last separator seen; `None` before the first call
    cursor: Option<usize>,
    done: bool,
}

impl<'a> HostnameParts<'a> {
    pub fn new(buf: &'a [u8], start: usize, end: usize, sep: u8) -> Self {
        let end = end.min(buf.len());
        Self {
            buf,
            start,
            end,
            sep,
            cursor: None,
            done: false,
        }
    }

    fn next_offset(&mut self) -> Option<usize> {
        let last = match self.cursor {
            Some(last) => last,
            None => {
                let trailing_sep = self.end > self.start && self.buf[self.end - 1] == self.sep;
                let last = if trailing_sep { self.end - 1 } else { self.end };
                self.cursor = Some(last);
                last
            }
        };

        if self.start > last {
            return None;
        }

        if let Some(pos) = self.buf[self.start..last]
            .iter()
            .rposition(|&b| b == self.sep)
        {
            let sep_at = self.start + pos;
            self.cursor = Some(sep_at);
            return Some(sep_at + 1);
        }

        // No separator left: the leftmost label has no separator in front of
        // it, so visit it once unless it is empty.
        if last != self.start && self.buf[self.start] != self.sep {
            self.cursor = Some(self.start);
            return Some(self.start);
        }

        None
    }

    fn label_at(&self, offset: usize) -> &'a [u8] {
        let rest = &self.buf[offset..self.end];
        let len = rest
            .iter()
            .position(|&b| b == self.sep)
            .unwrap_or(rest.len());
        &rest[..len]
    }
}

impl<'a> Iterator for HostnameParts<'a> {
    type Item = HostnamePart<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let part = self.next_offset().and_then(|offset| {
            let label = self.label_at(offset);
            is_valid_label(label).then_some(HostnamePart { offset, label })
        });

        if part.is_none() {
            self.done = true;
        }
        part
    }
}

impl FusedIterator for HostnameParts<'_> {}
