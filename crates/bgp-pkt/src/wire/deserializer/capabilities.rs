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

//! Deserializer for the capabilities advertised in BGP Open Messages

use crate::{
    capabilities::*,
    iana::BgpCapabilityCode,
    wire::{
        FOUR_OCTET_AS_CAPABILITY_LENGTH, GRACEFUL_RESTART_ADDRESS_FAMILY_LENGTH,
        GRACEFUL_RESTART_HEADER_LENGTH, MULTI_PROTOCOL_EXTENSIONS_CAPABILITY_LENGTH,
        ROUTE_REFRESH_CAPABILITY_LENGTH,
    },
};
use bgp4_parse_utils::{
    parse_into_located, parse_till_empty, ErrorKindSerdeDeref, ReadablePdu, Span,
};
use bgp4_serde_macros::LocatedError;
use nom::{
    error::{ErrorKind, FromExternalError, ParseError},
    number::complete::{be_u16, be_u32, be_u8},
    IResult,
};
use serde::{Deserialize, Serialize};

const GRACEFUL_RESTART_RESTART_MASK: u16 = 0x8000;
const GRACEFUL_RESTART_NOTIFICATION_MASK: u16 = 0x4000;
const GRACEFUL_RESTART_FORWARDING_STATE_MASK: u8 = 0x80;

/// BGP Capability Parsing errors
#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum BgpCapabilityParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    InvalidRouteRefreshLength(u8),
    FourOctetAsCapabilityError(#[from_located(module = "self")] FourOctetAsCapabilityParsingError),
    MultiProtocolExtensionsCapabilityError(
        #[from_located(module = "self")] MultiProtocolExtensionsCapabilityParsingError,
    ),
    GracefulRestartCapabilityError(
        #[from_located(module = "self")] GracefulRestartCapabilityParsingError,
    ),
}

fn parse_unrecognized_capability(
    code: u8,
    buf: Span<'_>,
) -> IResult<Span<'_>, BgpCapability, LocatedBgpCapabilityParsingError<'_>> {
    let (buf, value) = nom::multi::length_count(be_u8, be_u8)(buf)?;
    Ok((
        buf,
        BgpCapability::Unrecognized(UnrecognizedCapability::new(code, value)),
    ))
}

/// Helper function to read and check the capability exact length
#[inline]
fn check_capability_length<'a, E, L: FromExternalError<Span<'a>, E> + ParseError<Span<'a>>>(
    buf: Span<'a>,
    expected: u8,
    err: fn(u8) -> E,
) -> IResult<Span<'a>, u8, L> {
    nom::combinator::map_res(be_u8, |length| {
        if length != expected {
            Err(err(length))
        } else {
            Ok(length)
        }
    })(buf)
}

fn parse_route_refresh_capability(
    buf: Span<'_>,
) -> IResult<Span<'_>, BgpCapability, LocatedBgpCapabilityParsingError<'_>> {
    let (buf, _) = check_capability_length(
        buf,
        ROUTE_REFRESH_CAPABILITY_LENGTH,
        BgpCapabilityParsingError::InvalidRouteRefreshLength,
    )?;
    Ok((buf, BgpCapability::RouteRefresh))
}

/// Capabilities with unknown codes come back as [`BgpCapability::Unrecognized`],
/// dropping them is left to the enclosing parameter.
impl<'a> ReadablePdu<'a, LocatedBgpCapabilityParsingError<'a>> for BgpCapability {
    fn from_wire(buf: Span<'a>) -> IResult<Span<'a>, Self, LocatedBgpCapabilityParsingError<'a>> {
        let (buf, code) = be_u8(buf)?;
        match BgpCapabilityCode::try_from(code) {
            Ok(BgpCapabilityCode::MultiProtocolExtensions) => {
                let (buf, cap) = parse_into_located(buf)?;
                Ok((buf, BgpCapability::MultiProtocolExtensions(cap)))
            }
            Ok(BgpCapabilityCode::RouteRefresh) => parse_route_refresh_capability(buf),
            Ok(BgpCapabilityCode::GracefulRestart) => {
                let (buf, cap) = parse_into_located(buf)?;
                Ok((buf, BgpCapability::GracefulRestart(cap)))
            }
            Ok(BgpCapabilityCode::FourOctetAs) => {
                let (buf, cap) = parse_into_located(buf)?;
                Ok((buf, BgpCapability::FourOctetAs(cap)))
            }
            Err(_) => parse_unrecognized_capability(code, buf),
        }
    }
}

#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum FourOctetAsCapabilityParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    InvalidLength(u8),
}

impl<'a> ReadablePdu<'a, LocatedFourOctetAsCapabilityParsingError<'a>> for FourOctetAsCapability {
    fn from_wire(
        buf: Span<'a>,
    ) -> IResult<Span<'a>, Self, LocatedFourOctetAsCapabilityParsingError<'a>> {
        let (buf, _) = check_capability_length(
            buf,
            FOUR_OCTET_AS_CAPABILITY_LENGTH,
            FourOctetAsCapabilityParsingError::InvalidLength,
        )?;
        let (buf, asn4) = be_u32(buf)?;
        Ok((buf, FourOctetAsCapability::new(asn4)))
    }
}

#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum MultiProtocolExtensionsCapabilityParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    InvalidLength(u8),
}

impl<'a> ReadablePdu<'a, LocatedMultiProtocolExtensionsCapabilityParsingError<'a>>
    for MultiProtocolExtensionsCapability
{
    fn from_wire(
        buf: Span<'a>,
    ) -> IResult<Span<'a>, Self, LocatedMultiProtocolExtensionsCapabilityParsingError<'a>> {
        let (buf, _) = check_capability_length(
            buf,
            MULTI_PROTOCOL_EXTENSIONS_CAPABILITY_LENGTH,
            MultiProtocolExtensionsCapabilityParsingError::InvalidLength,
        )?;
        let (buf, afi) = be_u16(buf)?;
        let (buf, _reserved) = be_u8(buf)?;
        let (buf, safi) = be_u8(buf)?;
        Ok((buf, MultiProtocolExtensionsCapability::new(afi, safi)))
    }
}

#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum GracefulRestartCapabilityParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    /// Length is shorter than the restart flags or leaves a partial address
    /// family
    InvalidLength(u8),
}

impl<'a> ReadablePdu<'a, LocatedGracefulRestartCapabilityParsingError<'a>>
    for GracefulRestartCapability
{
    fn from_wire(
        buf: Span<'a>,
    ) -> IResult<Span<'a>, Self, LocatedGracefulRestartCapabilityParsingError<'a>> {
        let (buf, length) = nom::combinator::map_res(be_u8, |length| {
            if length < GRACEFUL_RESTART_HEADER_LENGTH
                || (length - GRACEFUL_RESTART_HEADER_LENGTH) % GRACEFUL_RESTART_ADDRESS_FAMILY_LENGTH
                    != 0
            {
                Err(GracefulRestartCapabilityParsingError::InvalidLength(length))
            } else {
                Ok(length)
            }
        })(buf)?;
        let (buf, value_buf) = nom::bytes::complete::take(length)(buf)?;
        let (value_buf, header) = be_u16(value_buf)?;
        let restart = header & GRACEFUL_RESTART_RESTART_MASK == GRACEFUL_RESTART_RESTART_MASK;
        let graceful_notification =
            header & GRACEFUL_RESTART_NOTIFICATION_MASK == GRACEFUL_RESTART_NOTIFICATION_MASK;
        let time = header & GracefulRestartCapability::MAX_TIME;
        let (_, address_families) = parse_till_empty(value_buf)?;
        Ok((
            buf,
            GracefulRestartCapability::new(restart, graceful_notification, time, address_families),
        ))
    }
}

impl<'a> ReadablePdu<'a, LocatedGracefulRestartCapabilityParsingError<'a>>
    for GracefulRestartAddressFamily
{
    fn from_wire(
        buf: Span<'a>,
    ) -> IResult<Span<'a>, Self, LocatedGracefulRestartCapabilityParsingError<'a>> {
        let (buf, afi) = be_u16(buf)?;
        let (buf, safi) = be_u8(buf)?;
        let (buf, flags) = be_u8(buf)?;
        let forwarding_state =
            flags & GRACEFUL_RESTART_FORWARDING_STATE_MASK == GRACEFUL_RESTART_FORWARDING_STATE_MASK;
        Ok((
            buf,
            GracefulRestartAddressFamily::new(forwarding_state, afi, safi),
        ))
    }
}
