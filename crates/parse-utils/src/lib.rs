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

//! Reader and writer traits shared by every PDU in the BGP-4 codec, plus
//! the small combinators used to glue the per-PDU parsers together.

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

use bgp4_locate::WireSpan;
use nom::IResult;
use std::fmt::Debug;

pub type Span<'a> = WireSpan<'a>;

/// A PDU that can be read from the wire without any outside knowledge
pub trait ReadablePdu<'a, Error: Debug> {
    fn from_wire(buf: Span<'a>) -> IResult<Span<'a>, Self, Error>
    where
        Self: Sized;
}

/// A PDU whose parsing depends on a single value known by the caller, for
/// instance the length encoding chosen by an enclosing header or the
/// parsing context of the session.
pub trait ReadablePduWithOneInput<'a, T, ErrorType> {
    fn from_wire(buf: Span<'a>, input: T) -> IResult<Span<'a>, Self, ErrorType>
    where
        Self: Sized;
}

/// A PDU that can be written to any [`std::io::Write`]
#[allow(clippy::len_without_is_empty)]
pub trait WritablePdu<ErrorType> {
    /// Octets written even when all variable parts are empty
    const BASE_LENGTH: usize;

    /// Number of octets [`Self::write`] produces.
    ///
    /// This is the full on-wire size, which may differ from the value stored
    /// in the PDU's own length field when that field excludes the header.
    fn len(&self) -> usize;

    fn write<T: std::io::Write>(&self, writer: &mut T) -> Result<(), ErrorType>
    where
        Self: Sized;
}

/// Same as [`WritablePdu`] for PDUs whose encoding depends on one extra input
#[allow(clippy::len_without_is_empty)]
pub trait WritablePduWithOneInput<I, ErrorType> {
    const BASE_LENGTH: usize;

    fn len(&self, input: I) -> usize;

    fn write<T: std::io::Write>(&self, writer: &mut T, input: I) -> Result<(), ErrorType>
    where
        Self: Sized;
}

/// An error raised while parsing, together with the span where it happened.
/// The span should start, as close as possible, at the first octet that
/// made the parser fail.
pub trait LocatedParsingError {
    type Span;
    type Error;

    fn span(&self) -> &Self::Span;
    fn error(&self) -> &Self::Error;
}

/// Run `T`'s parser and lift its error into the caller's error type
#[inline]
pub fn parse_into_located<'a, Lin: Debug, L: From<Lin>, T: ReadablePdu<'a, Lin>>(
    buf: Span<'a>,
) -> IResult<Span<'a>, T, L> {
    T::from_wire(buf).map_err(|err| err.map(L::from))
}

#[inline]
pub fn parse_into_located_one_input<
    'a,
    I,
    Lin: Debug,
    L: From<Lin>,
    T: ReadablePduWithOneInput<'a, I, Lin>,
>(
    buf: Span<'a>,
    input: I,
) -> IResult<Span<'a>, T, L> {
    T::from_wire(buf, input).map_err(|err| err.map(L::from))
}

/// Apply `T`'s parser repeatedly until `buf` is exhausted
#[inline]
pub fn parse_till_empty<'a, T: ReadablePdu<'a, E>, E: Debug>(
    buf: Span<'a>,
) -> IResult<Span<'a>, Vec<T>, E> {
    let mut buf = buf;
    let mut parsed = Vec::new();
    while !buf.is_empty() {
        let (remainder, element) = T::from_wire(buf)?;
        parsed.push(element);
        buf = remainder;
    }
    Ok((buf, parsed))
}

/// Apply `T`'s parser repeatedly until `buf` is exhausted, lifting each error
/// into the caller's error type
#[inline]
pub fn parse_till_empty_into_located<'a, Lin: Debug, L: From<Lin>, T: ReadablePdu<'a, Lin>>(
    buf: Span<'a>,
) -> IResult<Span<'a>, Vec<T>, L> {
    let mut buf = buf;
    let mut parsed = Vec::new();
    while !buf.is_empty() {
        let (remainder, element) = parse_into_located(buf)?;
        parsed.push(element);
        buf = remainder;
    }
    Ok((buf, parsed))
}

/// Like [`parse_till_empty_into_located`] for parsers taking one extra input;
/// the input is cloned for every element.
#[inline]
pub fn parse_till_empty_into_with_one_input_located<
    'a,
    I: Clone,
    Lin: Debug,
    L: From<Lin>,
    T: ReadablePduWithOneInput<'a, I, Lin>,
>(
    buf: Span<'a>,
    input: I,
) -> IResult<Span<'a>, Vec<T>, L> {
    let mut buf = buf;
    let mut parsed = Vec::new();
    while !buf.is_empty() {
        let (remainder, element) = parse_into_located_one_input(buf, input.clone())?;
        parsed.push(element);
        buf = remainder;
    }
    Ok((buf, parsed))
}

/// serde mirror of [`nom::error::ErrorKind`], so nom errors can be embedded
/// in serializable error enums with `#[serde(with = "ErrorKindSerdeDeref")]`
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(remote = "nom::error::ErrorKind")]
pub enum ErrorKindSerdeDeref {
    Tag,
    MapRes,
    MapOpt,
    Alt,
    IsNot,
    IsA,
    SeparatedList,
    SeparatedNonEmptyList,
    Many0,
    Many1,
    ManyTill,
    Count,
    TakeUntil,
    LengthValue,
    TagClosure,
    Alpha,
    Digit,
    HexDigit,
    OctDigit,
    AlphaNumeric,
    Space,
    MultiSpace,
    LengthValueFn,
    Eof,
    Switch,
    TagBits,
    OneOf,
    NoneOf,
    Char,
    CrLf,
    RegexpMatch,
    RegexpMatches,
    RegexpFind,
    RegexpCapture,
    RegexpCaptures,
    TakeWhile1,
    Complete,
    Fix,
    Escaped,
    EscapedTransform,
    NonEmpty,
    ManyMN,
    Not,
    Permutation,
    Verify,
    TakeTill1,
    TakeWhileMN,
    TooLarge,
    Many0Count,
    Many1Count,
    Float,
    Satisfy,
    Fail,
}
