// Copyright (C) 2022-present The NetGauze Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A byte slice that remembers how far it sits from the start of the
//! message it was cut from.
//!
//! Parsers built with `nom` only ever see the remaining input; wrapping the
//! input in a [`WireSpan`] lets errors report the exact octet where parsing
//! went wrong without having to thread the original buffer around.


use nom::{AsBytes, Compare, CompareResult, InputIter, InputLength, InputTake, Needed, Slice};
use std::{
    iter::{Copied, Enumerate},
    ops::{Range, RangeFrom, RangeFull, RangeTo},
    slice::Iter,
};

#[derive(Debug, Clone, Copy)]
pub struct WireSpan<'a> {
    offset: usize,
    bytes: &'a [u8],
}

impl<'a> WireSpan<'a> {
    /// Span starting at offset zero
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { offset: 0, bytes }
    }

    /// Span that claims to start `offset` octets into some larger buffer.
    ///
    /// The offset is only used for reporting, the span never reads before
    /// its own first byte.
    pub const fn with_offset(offset: usize, bytes: &'a [u8]) -> Self {
        Self { offset, bytes }
    }

    /// Number of octets between the start of the original buffer and the
    /// first byte of this span.
    #[inline]
    pub const fn location_offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub const fn fragment(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Slice<RangeFrom<usize>> for WireSpan<'a> {
    #[inline]
    fn slice(&self, range: RangeFrom<usize>) -> Self {
        Self {
            offset: self.offset + range.start,
            bytes: &self.bytes[range],
        }
    }
}

impl<'a> Slice<RangeTo<usize>> for WireSpan<'a> {
    #[inline]
    fn slice(&self, range: RangeTo<usize>) -> Self {
        Self {
            offset: self.offset,
            bytes: &self.bytes[range],
        }
    }
}

impl<'a> Slice<Range<usize>> for WireSpan<'a> {
    #[inline]
    fn slice(&self, range: Range<usize>) -> Self {
        Self {
            offset: self.offset + range.start,
            bytes: &self.bytes[range],
        }
    }
}

impl<'a> Slice<RangeFull> for WireSpan<'a> {
    #[inline]
    fn slice(&self, _range: RangeFull) -> Self {
        *self
    }
}

impl<'a> InputIter for WireSpan<'a> {
    type Item = u8;
    type Iter = Enumerate<Self::IterElem>;
    type IterElem = Copied<Iter<'a, u8>>;

    #[inline]
    fn iter_indices(&self) -> Self::Iter {
        self.iter_elements().enumerate()
    }

    #[inline]
    fn iter_elements(&self) -> Self::IterElem {
        self.bytes.iter().copied()
    }

    #[inline]
    fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(Self::Item) -> bool,
    {
        self.bytes.iter().position(|b| predicate(*b))
    }

    #[inline]
    fn slice_index(&self, count: usize) -> Result<usize, Needed> {
        if self.bytes.len() >= count {
            Ok(count)
        } else {
            Err(Needed::new(count - self.bytes.len()))
        }
    }
}

impl<'a> InputLength for WireSpan<'a> {
    #[inline]
    fn input_len(&self) -> usize {
        self.bytes.len()
    }
}

impl<'a> InputTake for WireSpan<'a> {
    #[inline]
    fn take(&self, count: usize) -> Self {
        self.slice(..count)
    }

    /// Returns `(remaining, taken)` following `nom`'s convention
    #[inline]
    fn take_split(&self, count: usize) -> (Self, Self) {
        (self.slice(count..), self.slice(..count))
    }
}

impl<'a> core::ops::Deref for WireSpan<'a> {
    type Target = &'a [u8];

    fn deref(&self) -> &Self::Target {
        &self.bytes
    }
}

impl<'a> AsBytes for WireSpan<'a> {
    #[inline]
    fn as_bytes(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> PartialEq for WireSpan<'a> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.bytes == other.bytes
    }
}

impl<'a> Eq for WireSpan<'a> {}

impl<'a, 'b> Compare<&'b [u8]> for WireSpan<'a> {
    #[inline(always)]
    fn compare(&self, t: &'b [u8]) -> CompareResult {
        self.bytes.compare(t)
    }

    #[inline(always)]
    fn compare_no_case(&self, t: &'b [u8]) -> CompareResult {
        self.bytes.compare_no_case(t)
    }
}

impl<'a> From<&'a [u8]> for WireSpan<'a> {
    #[inline]
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}
