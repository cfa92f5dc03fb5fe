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

//! Deserializer for BGP Path Attributes

use crate::{
    community::Community,
    iana::{
        AsPathSegmentType, PathAttributeType, UndefinedAsPathSegmentType,
        UpdateMessageErrorSubCode,
    },
    path_attribute::*,
};
use bgp4_parse_utils::{
    parse_into_located_one_input, parse_till_empty, ErrorKindSerdeDeref, ReadablePdu,
    ReadablePduWithOneInput, Span,
};
use bgp4_serde_macros::LocatedError;
use nom::{
    error::ErrorKind,
    number::complete::{be_u16, be_u32, be_u8},
    IResult,
};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

pub(crate) const OPTIONAL_PATH_ATTRIBUTE_MASK: u8 = 0x80;
pub(crate) const TRANSITIVE_PATH_ATTRIBUTE_MASK: u8 = 0x40;
pub(crate) const PARTIAL_PATH_ATTRIBUTE_MASK: u8 = 0x20;
pub(crate) const EXTENDED_LENGTH_PATH_ATTRIBUTE_MASK: u8 = 0x10;
pub(crate) const ORIGIN_LEN: u16 = 1;
pub(crate) const NEXT_HOP_LEN: u16 = 4;
pub(crate) const MULTI_EXIT_DISCRIMINATOR_LEN: u16 = 4;
pub(crate) const LOCAL_PREFERENCE_LEN: u16 = 4;
pub(crate) const ATOMIC_AGGREGATE_LEN: u16 = 0;
pub(crate) const AGGREGATOR_LEN: u16 = 8;
pub(crate) const COMMUNITY_LEN: u16 = 4;

/// The length field of a path attribute as it was found on the wire; its
/// width is chosen by the extended length flag.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum PathAttributeLength {
    U8(u8),
    U16(u16),
}

impl From<PathAttributeLength> for u16 {
    fn from(value: PathAttributeLength) -> Self {
        match value {
            PathAttributeLength::U8(len) => len as u16,
            PathAttributeLength::U16(len) => len,
        }
    }
}

#[inline]
fn parse_attribute_length<'a, E: nom::error::ParseError<Span<'a>>>(
    buf: Span<'a>,
    extended_length: bool,
) -> IResult<Span<'a>, PathAttributeLength, E> {
    if extended_length {
        let (buf, raw) = be_u16(buf)?;
        Ok((buf, PathAttributeLength::U16(raw)))
    } else {
        let (buf, raw) = be_u8(buf)?;
        Ok((buf, PathAttributeLength::U8(raw)))
    }
}

#[inline]
fn check_length(attr_len: PathAttributeLength, expected: u16) -> bool {
    u16::from(attr_len) == expected
}

#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum PathAttributeParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    OriginError(#[from_located(module = "self")] OriginParsingError),
    AsPathError(#[from_located(module = "self")] AsPathParsingError),
    NextHopError(#[from_located(module = "self")] NextHopParsingError),
    MultiExitDiscriminatorError(
        #[from_located(module = "self")] MultiExitDiscriminatorParsingError,
    ),
    LocalPreferenceError(#[from_located(module = "self")] LocalPreferenceParsingError),
    AtomicAggregateError(#[from_located(module = "self")] AtomicAggregateParsingError),
    AggregatorError(#[from_located(module = "self")] AggregatorParsingError),
    CommunitiesError(#[from_located(module = "self")] CommunitiesParsingError),
    UnknownAttributeError(#[from_located(module = "self")] UnknownAttributeParsingError),
}

impl<'a> ReadablePdu<'a, LocatedPathAttributeParsingError<'a>> for PathAttribute {
    fn from_wire(buf: Span<'a>) -> IResult<Span<'a>, Self, LocatedPathAttributeParsingError<'a>> {
        let (buf, attributes) = be_u8(buf)?;
        let buf_before_code = buf;
        let (buf, code) = be_u8(buf)?;
        let optional = attributes & OPTIONAL_PATH_ATTRIBUTE_MASK == OPTIONAL_PATH_ATTRIBUTE_MASK;
        let transitive =
            attributes & TRANSITIVE_PATH_ATTRIBUTE_MASK == TRANSITIVE_PATH_ATTRIBUTE_MASK;
        let partial = attributes & PARTIAL_PATH_ATTRIBUTE_MASK == PARTIAL_PATH_ATTRIBUTE_MASK;
        let extended_length =
            attributes & EXTENDED_LENGTH_PATH_ATTRIBUTE_MASK == EXTENDED_LENGTH_PATH_ATTRIBUTE_MASK;
        let (buf, value) = match PathAttributeType::try_from(code) {
            Ok(PathAttributeType::Origin) => {
                let (buf, value) = parse_into_located_one_input(buf, extended_length)?;
                (buf, PathAttributeValue::Origin(value))
            }
            Ok(PathAttributeType::AsPath) => {
                let (buf, value) = parse_into_located_one_input(buf, extended_length)?;
                (buf, PathAttributeValue::AsPath(value))
            }
            Ok(PathAttributeType::NextHop) => {
                let (buf, value) = parse_into_located_one_input(buf, extended_length)?;
                (buf, PathAttributeValue::NextHop(value))
            }
            Ok(PathAttributeType::MultiExitDiscriminator) => {
                let (buf, value) = parse_into_located_one_input(buf, extended_length)?;
                (buf, PathAttributeValue::MultiExitDiscriminator(value))
            }
            Ok(PathAttributeType::LocalPreference) => {
                let (buf, value) = parse_into_located_one_input(buf, extended_length)?;
                (buf, PathAttributeValue::LocalPreference(value))
            }
            Ok(PathAttributeType::AtomicAggregate) => {
                let (buf, value) = parse_into_located_one_input(buf, extended_length)?;
                (buf, PathAttributeValue::AtomicAggregate(value))
            }
            Ok(PathAttributeType::Aggregator) => {
                let (buf, value) = parse_into_located_one_input(buf, extended_length)?;
                (buf, PathAttributeValue::Aggregator(value))
            }
            Ok(PathAttributeType::Communities) => {
                let (buf, value) = parse_into_located_one_input(buf, extended_length)?;
                (buf, PathAttributeValue::Communities(value))
            }
            Err(_) => {
                let (buf, value) = parse_into_located_one_input(buf_before_code, extended_length)?;
                (buf, PathAttributeValue::UnknownAttribute(value))
            }
        };
        Ok((buf, PathAttribute::new(optional, transitive, partial, value)))
    }
}

impl From<&PathAttributeParsingError> for UpdateMessageErrorSubCode {
    fn from(value: &PathAttributeParsingError) -> Self {
        let length_error = |invalid_length: bool| {
            if invalid_length {
                UpdateMessageErrorSubCode::AttributeLengthError
            } else {
                UpdateMessageErrorSubCode::MalformedAttributeList
            }
        };
        match value {
            PathAttributeParsingError::NomError(_) => {
                UpdateMessageErrorSubCode::MalformedAttributeList
            }
            PathAttributeParsingError::OriginError(err) => {
                length_error(matches!(err, OriginParsingError::InvalidOriginLength(_)))
            }
            PathAttributeParsingError::AsPathError(err) => match err {
                AsPathParsingError::NomError(_) => {
                    UpdateMessageErrorSubCode::MalformedAttributeList
                }
                AsPathParsingError::InvalidAsPathLength { .. }
                | AsPathParsingError::UndefinedAsPathSegmentType(_) => {
                    UpdateMessageErrorSubCode::MalformedAsPath
                }
            },
            PathAttributeParsingError::NextHopError(err) => {
                length_error(matches!(err, NextHopParsingError::InvalidNextHopLength(_)))
            }
            PathAttributeParsingError::MultiExitDiscriminatorError(err) => length_error(matches!(
                err,
                MultiExitDiscriminatorParsingError::InvalidLength(_)
            )),
            PathAttributeParsingError::LocalPreferenceError(err) => {
                length_error(matches!(err, LocalPreferenceParsingError::InvalidLength(_)))
            }
            PathAttributeParsingError::AtomicAggregateError(err) => {
                length_error(matches!(err, AtomicAggregateParsingError::InvalidLength(_)))
            }
            PathAttributeParsingError::AggregatorError(err) => {
                length_error(matches!(err, AggregatorParsingError::InvalidLength(_)))
            }
            PathAttributeParsingError::CommunitiesError(err) => length_error(matches!(
                err,
                CommunitiesParsingError::InvalidCommunitiesLength(_)
            )),
            PathAttributeParsingError::UnknownAttributeError(_) => {
                UpdateMessageErrorSubCode::MalformedAttributeList
            }
        }
    }
}

#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum OriginParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    InvalidOriginLength(PathAttributeLength),
}

impl<'a> ReadablePduWithOneInput<'a, bool, LocatedOriginParsingError<'a>> for Origin {
    fn from_wire(
        buf: Span<'a>,
        extended_length: bool,
    ) -> IResult<Span<'a>, Self, LocatedOriginParsingError<'a>> {
        let input = buf;
        let (buf, length) = parse_attribute_length(buf, extended_length)?;
        if !check_length(length, ORIGIN_LEN) {
            return Err(nom::Err::Error(LocatedOriginParsingError::new(
                input,
                OriginParsingError::InvalidOriginLength(length),
            )));
        }
        // Kept as received, values outside IGP/EGP/INCOMPLETE are judged above the codec
        let (buf, origin) = be_u8(buf)?;
        Ok((buf, Origin::new(origin)))
    }
}

#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum AsPathParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    /// A segment runs past the end of the attribute
    InvalidAsPathLength {
        expecting: usize,
        found: usize,
    },
    UndefinedAsPathSegmentType(#[from_external] UndefinedAsPathSegmentType),
}

impl<'a> ReadablePduWithOneInput<'a, bool, LocatedAsPathParsingError<'a>> for AsPath {
    fn from_wire(
        buf: Span<'a>,
        extended_length: bool,
    ) -> IResult<Span<'a>, Self, LocatedAsPathParsingError<'a>> {
        let (buf, length) = parse_attribute_length(buf, extended_length)?;
        let (buf, segments_buf) = nom::bytes::complete::take(u16::from(length))(buf)?;
        let (_, segments) = parse_till_empty(segments_buf)?;
        Ok((buf, AsPath::new(segments)))
    }
}

/// Segment type and count
const AS_PATH_SEGMENT_HEADER_LEN: usize = 2;

impl<'a> ReadablePdu<'a, LocatedAsPathParsingError<'a>> for AsPathSegment {
    fn from_wire(buf: Span<'a>) -> IResult<Span<'a>, Self, LocatedAsPathParsingError<'a>> {
        if buf.len() < AS_PATH_SEGMENT_HEADER_LEN {
            return Err(nom::Err::Error(LocatedAsPathParsingError::new(
                buf,
                AsPathParsingError::InvalidAsPathLength {
                    expecting: AS_PATH_SEGMENT_HEADER_LEN,
                    found: buf.len(),
                },
            )));
        }
        let (buf, segment_type) =
            nom::combinator::map_res(be_u8, AsPathSegmentType::try_from)(buf)?;
        let (buf, count) = be_u8(buf)?;
        let count = count as usize;
        let expecting = count * 4;
        if buf.len() < expecting {
            return Err(nom::Err::Error(LocatedAsPathParsingError::new(
                buf,
                AsPathParsingError::InvalidAsPathLength {
                    expecting,
                    found: buf.len(),
                },
            )));
        }
        let (buf, as_numbers) = nom::multi::many_m_n(count, count, be_u32)(buf)?;
        Ok((buf, AsPathSegment::new(segment_type, as_numbers)))
    }
}

#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum NextHopParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    InvalidNextHopLength(PathAttributeLength),
}

impl<'a> ReadablePduWithOneInput<'a, bool, LocatedNextHopParsingError<'a>> for NextHop {
    fn from_wire(
        buf: Span<'a>,
        extended_length: bool,
    ) -> IResult<Span<'a>, Self, LocatedNextHopParsingError<'a>> {
        let input = buf;
        let (buf, length) = parse_attribute_length(buf, extended_length)?;
        if !check_length(length, NEXT_HOP_LEN) {
            return Err(nom::Err::Error(LocatedNextHopParsingError::new(
                input,
                NextHopParsingError::InvalidNextHopLength(length),
            )));
        }
        let (buf, address) = be_u32(buf)?;
        Ok((buf, NextHop::new(Ipv4Addr::from(address))))
    }
}

#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum MultiExitDiscriminatorParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    InvalidLength(PathAttributeLength),
}

impl<'a> ReadablePduWithOneInput<'a, bool, LocatedMultiExitDiscriminatorParsingError<'a>>
    for MultiExitDiscriminator
{
    fn from_wire(
        buf: Span<'a>,
        extended_length: bool,
    ) -> IResult<Span<'a>, Self, LocatedMultiExitDiscriminatorParsingError<'a>> {
        let input = buf;
        let (buf, length) = parse_attribute_length(buf, extended_length)?;
        if !check_length(length, MULTI_EXIT_DISCRIMINATOR_LEN) {
            return Err(nom::Err::Error(
                LocatedMultiExitDiscriminatorParsingError::new(
                    input,
                    MultiExitDiscriminatorParsingError::InvalidLength(length),
                ),
            ));
        }
        let (buf, metric) = be_u32(buf)?;
        Ok((buf, MultiExitDiscriminator::new(metric)))
    }
}

#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum LocalPreferenceParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    InvalidLength(PathAttributeLength),
}

impl<'a> ReadablePduWithOneInput<'a, bool, LocatedLocalPreferenceParsingError<'a>>
    for LocalPreference
{
    fn from_wire(
        buf: Span<'a>,
        extended_length: bool,
    ) -> IResult<Span<'a>, Self, LocatedLocalPreferenceParsingError<'a>> {
        let input = buf;
        let (buf, length) = parse_attribute_length(buf, extended_length)?;
        if !check_length(length, LOCAL_PREFERENCE_LEN) {
            return Err(nom::Err::Error(LocatedLocalPreferenceParsingError::new(
                input,
                LocalPreferenceParsingError::InvalidLength(length),
            )));
        }
        let (buf, metric) = be_u32(buf)?;
        Ok((buf, LocalPreference::new(metric)))
    }
}

#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum AtomicAggregateParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    InvalidLength(PathAttributeLength),
}

impl<'a> ReadablePduWithOneInput<'a, bool, LocatedAtomicAggregateParsingError<'a>>
    for AtomicAggregate
{
    fn from_wire(
        buf: Span<'a>,
        extended_length: bool,
    ) -> IResult<Span<'a>, Self, LocatedAtomicAggregateParsingError<'a>> {
        let input = buf;
        let (buf, length) = parse_attribute_length(buf, extended_length)?;
        if !check_length(length, ATOMIC_AGGREGATE_LEN) {
            return Err(nom::Err::Error(LocatedAtomicAggregateParsingError::new(
                input,
                AtomicAggregateParsingError::InvalidLength(length),
            )));
        }
        Ok((buf, AtomicAggregate))
    }
}

#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum AggregatorParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    InvalidLength(PathAttributeLength),
}

impl<'a> ReadablePduWithOneInput<'a, bool, LocatedAggregatorParsingError<'a>> for Aggregator {
    fn from_wire(
        buf: Span<'a>,
        extended_length: bool,
    ) -> IResult<Span<'a>, Self, LocatedAggregatorParsingError<'a>> {
        let input = buf;
        let (buf, length) = parse_attribute_length(buf, extended_length)?;
        if !check_length(length, AGGREGATOR_LEN) {
            return Err(nom::Err::Error(LocatedAggregatorParsingError::new(
                input,
                AggregatorParsingError::InvalidLength(length),
            )));
        }
        let (buf, asn) = be_u32(buf)?;
        let (buf, origin) = be_u32(buf)?;
        Ok((buf, Aggregator::new(asn, Ipv4Addr::from(origin))))
    }
}

#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum CommunitiesParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    /// Length isn't a multiple of 4
    InvalidCommunitiesLength(PathAttributeLength),
}

impl<'a> ReadablePduWithOneInput<'a, bool, LocatedCommunitiesParsingError<'a>> for Communities {
    fn from_wire(
        buf: Span<'a>,
        extended_length: bool,
    ) -> IResult<Span<'a>, Self, LocatedCommunitiesParsingError<'a>> {
        let input = buf;
        let (buf, length) = parse_attribute_length(buf, extended_length)?;
        if u16::from(length) % COMMUNITY_LEN != 0 {
            return Err(nom::Err::Error(LocatedCommunitiesParsingError::new(
                input,
                CommunitiesParsingError::InvalidCommunitiesLength(length),
            )));
        }
        let (buf, communities_buf) = nom::bytes::complete::take(u16::from(length))(buf)?;
        let (_, communities) = parse_till_empty(communities_buf)?;
        Ok((buf, Communities::new(communities)))
    }
}

impl<'a> ReadablePdu<'a, LocatedCommunitiesParsingError<'a>> for Community {
    fn from_wire(buf: Span<'a>) -> IResult<Span<'a>, Self, LocatedCommunitiesParsingError<'a>> {
        let (buf, value) = be_u32(buf)?;
        Ok((buf, Community::new(value)))
    }
}

#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum UnknownAttributeParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    InvalidLength { expecting: usize, actual: usize },
}

impl<'a> ReadablePduWithOneInput<'a, bool, LocatedUnknownAttributeParsingError<'a>>
    for UnknownAttribute
{
    fn from_wire(
        buf: Span<'a>,
        extended_length: bool,
    ) -> IResult<Span<'a>, Self, LocatedUnknownAttributeParsingError<'a>> {
        let (buf, code) = be_u8(buf)?;
        let input = buf;
        let (buf, length) = parse_attribute_length(buf, extended_length)?;
        let length = u16::from(length) as usize;
        if length > buf.len() {
            return Err(nom::Err::Error(LocatedUnknownAttributeParsingError::new(
                input,
                UnknownAttributeParsingError::InvalidLength {
                    expecting: length,
                    actual: buf.len(),
                },
            )));
        }
        let (buf, value) = nom::bytes::complete::take(length)(buf)?;
        Ok((buf, UnknownAttribute::new(code, value.fragment().to_vec())))
    }
}
