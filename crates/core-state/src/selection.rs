use core_text::Buffer;

/// Mark + active-region flag. Together with the cursor this defines the region used by
/// visual mode and by pending operators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    mark: Option<usize>,
    active: bool,
    linewise: bool,
}

/// Resolved region: `[begin, end)` plus where the cursor goes after an operator that
/// revisits the whole range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSpan {
    pub begin: usize,
    pub end: usize,
    pub restore: usize,
}

impl SelectionSpan {
    pub fn is_empty(&self) -> bool {
        self.begin >= self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.begin..self.end
    }
}

impl Selection {
    pub fn mark(&self) -> Option<usize> {
        self.mark
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_linewise(&self) -> bool {
        self.linewise
    }

    /// Set the mark at `pos` and activate the region.
    pub fn begin(&mut self, pos: usize) {
        self.mark = Some(pos);
        self.active = true;
    }

    /// Move the mark without touching the active flag.
    pub fn set_mark(&mut self, pos: usize) {
        self.mark = Some(pos);
    }

    pub fn set_linewise(&mut self, linewise: bool) {
        self.linewise = linewise;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Inclusive selection between mark and `pos`, end-exclusive in the result. Linewise
    /// selections widen to whole lines, including the newline that ends the last one.
    /// `None` without a mark.
    pub fn span(&self, buf: &Buffer, pos: usize) -> Option<SelectionSpan> {
        let mark = self.mark?;
        let (mut begin, mut end) = bounds(mark, pos, buf.len());
        if self.linewise {
            begin = buf.line_start(begin);
            end = buf.line_end(end.saturating_sub(1).max(begin));
            if buf.char_at(end) == Some('\n') {
                end += 1;
            }
        }
        Some(SelectionSpan {
            begin,
            end,
            restore: begin,
        })
    }
}

/// Order-independent `(min, max + 1)` clamped to the buffer length.
pub fn bounds(mark: usize, pos: usize, len: usize) -> (usize, usize) {
    let begin = mark.min(pos).min(len);
    let end = (mark.max(pos) + 1).min(len).max(begin);
    (begin, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn span_is_inclusive_of_both_ends() {
        let buf = Buffer::from("hello world");
        let mut sel = Selection::default();
        assert_eq!(sel.span(&buf, 3), None);
        sel.begin(6);
        let span = sel.span(&buf, 2).unwrap();
        assert_eq!((span.begin, span.end, span.restore), (2, 7, 2));
        assert_eq!(buf.slice(span.range()), "llo w");
    }

    #[test]
    fn span_clamps_past_end_cursor() {
        let buf = Buffer::from("abc");
        let mut sel = Selection::default();
        sel.begin(1);
        let span = sel.span(&buf, 3).unwrap();
        assert_eq!(span.range(), 1..3);
    }

    #[test]
    fn linewise_span_widens_to_lines() {
        let buf = Buffer::from("one\ntwo\nthree");
        let mut sel = Selection::default();
        sel.begin(5);
        sel.set_linewise(true);
        let span = sel.span(&buf, 5).unwrap();
        assert_eq!(buf.slice(span.range()), "two\n");
        let last = sel.span(&buf, 10).unwrap();
        assert_eq!(buf.slice(last.range()), "two\nthree");
    }

    #[test]
    fn reset_clears_everything() {
        let mut sel = Selection::default();
        sel.begin(4);
        sel.set_linewise(true);
        sel.reset();
        assert_eq!(sel, Selection::default());
    }

    proptest! {
        #[test]
        fn bounds_are_order_independent(m in 0usize..200, p in 0usize..200, len in 0usize..200) {
            prop_assert_eq!(bounds(m, p, len), bounds(p, m, len));
            let (b, e) = bounds(m, p, len);
            prop_assert!(b <= e && e <= len);
        }
    }
}
