//! Normalizes the different ways a caller can name a sub-region into a canonical, bounds checked
//! `(offset, count)` pair.

use core::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use crate::error::{ArrayError, Result};

/// A position counted either from the start or from the end of a buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Index {
    value: usize,
    from_end: bool,
}

impl Index {
    /// `value` elements after the start.
    pub const fn from_start(value: usize) -> Self {
        Self {
            value,
            from_end: false,
        }
    }

    /// `value` elements before the end. `Index::from_end(0)` is one past the last element.
    pub const fn from_end(value: usize) -> Self {
        Self {
            value,
            from_end: true,
        }
    }

    pub const fn value(self) -> usize {
        self.value
    }

    pub const fn is_from_end(self) -> bool {
        self.from_end
    }

    /// Absolute position for a buffer of `len` elements, `None` if it lies before the start.
    /// Positions past the end are returned as is and rejected by the range resolution.
    #[inline]
    pub const fn offset(self, len: usize) -> Option<usize> {
        if self.from_end {
            len.checked_sub(self.value)
        } else {
            Some(self.value)
        }
    }
}

impl From<usize> for Index {
    fn from(value: usize) -> Self {
        Index::from_start(value)
    }
}

/// Start and exclusive end, each of which may count from the end of the buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IndexRange {
    pub start: Index,
    pub end: Index,
}

impl IndexRange {
    pub const fn new(start: Index, end: Index) -> Self {
        Self { start, end }
    }

    /// The whole buffer, whatever its length.
    pub const fn all() -> Self {
        Self::new(Index::from_start(0), Index::from_end(0))
    }

    /// Resolves the range against a buffer of `len` elements.
    ///
    /// Returns `None` instead of an error so callers can report the failure in their own terms.
    #[inline]
    pub fn offset_and_count(&self, len: usize) -> Option<(usize, usize)> {
        let start = self.start.offset(len)?;
        let end = self.end.offset(len)?;

        if end > len || start > end {
            return None;
        }

        Some((start, end - start))
    }
}

impl From<Range<usize>> for IndexRange {
    fn from(range: Range<usize>) -> Self {
        IndexRange::new(range.start.into(), range.end.into())
    }
}

impl From<RangeInclusive<usize>> for IndexRange {
    fn from(range: RangeInclusive<usize>) -> Self {
        // An inclusive end of usize::MAX can't be valid for any buffer, saturating keeps it
        // out of bounds.
        let end = range.end().saturating_add(1);
        IndexRange::new((*range.start()).into(), end.into())
    }
}

impl From<RangeFrom<usize>> for IndexRange {
    fn from(range: RangeFrom<usize>) -> Self {
        IndexRange::new(range.start.into(), Index::from_end(0))
    }
}

impl From<RangeTo<usize>> for IndexRange {
    fn from(range: RangeTo<usize>) -> Self {
        IndexRange::new(Index::from_start(0), range.end.into())
    }
}

impl From<RangeToInclusive<usize>> for IndexRange {
    fn from(range: RangeToInclusive<usize>) -> Self {
        IndexRange::new(Index::from_start(0), range.end.saturating_add(1).into())
    }
}

impl From<RangeFull> for IndexRange {
    fn from(_: RangeFull) -> Self {
        IndexRange::all()
    }
}

/// Validates a signed `offset`/`count` pair against a buffer of `len` elements.
///
/// Negative values are `InvalidArgumentRange`, an end past `len` or an overflowing addition is
/// `OutOfBounds`.
pub fn offset_count(len: usize, offset: isize, count: isize) -> Result<(usize, usize)> {
    if offset < 0 {
        tracing::debug!(offset, "rejected negative offset");
        return Err(ArrayError::invalid_range(
            "offset",
            format!("must not be negative, got {offset}"),
        ));
    }

    if count < 0 {
        tracing::debug!(count, "rejected negative count");
        return Err(ArrayError::invalid_range(
            "count",
            format!("must not be negative, got {count}"),
        ));
    }

    offset_count_unsigned(len, offset as usize, count as usize)
}

/// Same as [`offset_count`] for callers that already hold unsigned values.
pub fn offset_count_unsigned(len: usize, offset: usize, count: usize) -> Result<(usize, usize)> {
    // Slices never exceed isize::MAX bytes, an offset that doesn't fit means the caller mixed up
    // signed and unsigned values somewhere.
    debug_assert!(
        offset <= isize::MAX as usize,
        "offset {offset} exceeds the signed index range"
    );

    match offset.checked_add(count) {
        Some(end) if end <= len => Ok((offset, count)),
        _ => {
            tracing::debug!(offset, count, len, "range out of bounds");
            Err(ArrayError::OutOfBounds { offset, count, len })
        }
    }
}

/// Resolves any range-like value against a buffer of `len` elements.
pub fn resolve(len: usize, range: impl Into<IndexRange>) -> Result<(usize, usize)> {
    let range = range.into();

    range.offset_and_count(len).ok_or_else(|| {
        tracing::debug!(?range, len, "range can't be resolved");
        ArrayError::invalid_range("range", format!("{range:?} is not valid for length {len}"))
    })
}
