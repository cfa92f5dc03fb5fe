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

//! Deserializer for BGP Open message and its optional parameters

use crate::{
    capabilities::BgpCapability,
    iana::{
        BgpOpenMessageParameterType, OpenMessageErrorSubCode,
        UndefinedBgpOpenMessageParameterType,
    },
    open::{BgpOpenMessage, BgpOpenMessageParameter, BGP_VERSION},
    wire::deserializer::{capabilities::BgpCapabilityParsingError, BgpParsingContext},
};
use bgp4_parse_utils::{
    parse_till_empty_into_located, parse_till_empty_into_with_one_input_located,
    ErrorKindSerdeDeref, ReadablePduWithOneInput, Span,
};
use bgp4_serde_macros::LocatedError;
use nom::{
    error::ErrorKind,
    number::complete::{be_u16, be_u32, be_u8},
    IResult,
};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// BGP Open Message Parsing errors
#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum BgpOpenMessageParsingError {
    /// Errors triggered by the nom parser, see [nom::error::ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    UnsupportedVersionNumber(u8),
    ParameterError(#[from_located(module = "self")] BgpParameterParsingError),
}

/// BGP Open Message Parameter Parsing errors
#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum BgpParameterParsingError {
    /// Errors triggered by the nom parser, see [nom::error::ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    UndefinedParameterType(#[from_external] UndefinedBgpOpenMessageParameterType),
    CapabilityError(
        #[from_located(module = "crate::wire::deserializer::capabilities")]
        BgpCapabilityParsingError,
    ),
}

impl<'a> ReadablePduWithOneInput<'a, &BgpParsingContext, LocatedBgpOpenMessageParsingError<'a>>
    for BgpOpenMessage
{
    fn from_wire(
        buf: Span<'a>,
        ctx: &BgpParsingContext,
    ) -> IResult<Span<'a>, Self, LocatedBgpOpenMessageParsingError<'a>> {
        let (buf, _) = nom::combinator::map_res(be_u8, |x| {
            if x == BGP_VERSION {
                Ok(x)
            } else {
                Err(BgpOpenMessageParsingError::UnsupportedVersionNumber(x))
            }
        })(buf)?;
        let (buf, my_as) = be_u16(buf)?;
        let (buf, hold_time) = be_u16(buf)?;
        let (buf, bgp_id) = be_u32(buf)?;
        let bgp_id = Ipv4Addr::from(bgp_id);
        let (buf, params_len) = be_u8(buf)?;
        let (buf, params_buf) = nom::bytes::complete::take(params_len)(buf)?;
        let (_, params) = parse_till_empty_into_with_one_input_located(params_buf, ctx)?;
        Ok((buf, BgpOpenMessage::new(my_as, hold_time, bgp_id, params)))
    }
}

impl<'a> ReadablePduWithOneInput<'a, &BgpParsingContext, LocatedBgpParameterParsingError<'a>>
    for BgpOpenMessageParameter
{
    fn from_wire(
        buf: Span<'a>,
        ctx: &BgpParsingContext,
    ) -> IResult<Span<'a>, Self, LocatedBgpParameterParsingError<'a>> {
        let (buf, param_type) =
            nom::combinator::map_res(be_u8, BgpOpenMessageParameterType::try_from)(buf)?;
        match param_type {
            BgpOpenMessageParameterType::Capability => {
                let (buf, param_len) = be_u8(buf)?;
                let (buf, capabilities_buf) = nom::bytes::complete::take(param_len)(buf)?;
                let (_, capabilities): (_, Vec<BgpCapability>) =
                    parse_till_empty_into_located(capabilities_buf)?;
                let capabilities = capabilities
                    .into_iter()
                    .filter(|capability| match capability {
                        BgpCapability::Unrecognized(unrecognized)
                            if !ctx.keep_unrecognized_capabilities() =>
                        {
                            log::debug!(
                                "Skipping unrecognized capability code {} with {} octets",
                                unrecognized.code(),
                                unrecognized.value().len()
                            );
                            false
                        }
                        _ => true,
                    })
                    .collect();
                Ok((buf, BgpOpenMessageParameter::Capabilities(capabilities)))
            }
        }
    }
}

impl From<&BgpOpenMessageParsingError> for OpenMessageErrorSubCode {
    fn from(value: &BgpOpenMessageParsingError) -> Self {
        match value {
            BgpOpenMessageParsingError::NomError(_) => OpenMessageErrorSubCode::Unspecific,
            BgpOpenMessageParsingError::UnsupportedVersionNumber(_) => {
                OpenMessageErrorSubCode::UnsupportedVersionNumber
            }
            // Unknown parameter types, parameters overrunning the declared
            // parameters length and malformed known capabilities
            BgpOpenMessageParsingError::ParameterError(_) => {
                OpenMessageErrorSubCode::UnsupportedOptionalParameter
            }
        }
    }
}
