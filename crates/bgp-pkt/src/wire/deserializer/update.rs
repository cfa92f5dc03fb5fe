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

//! Deserializer for BGP Update message

use crate::{
    iana::UpdateMessageErrorSubCode,
    update::BgpUpdateMessage,
    wire::deserializer::{nlri::Ipv4PrefixParsingError, path_attribute::PathAttributeParsingError},
};
use bgp4_parse_utils::{parse_till_empty_into_located, ErrorKindSerdeDeref, ReadablePdu, Span};
use bgp4_serde_macros::LocatedError;
use nom::{error::ErrorKind, number::complete::be_u16, IResult};
use serde::{Deserialize, Serialize};

/// BGP Update Message Parsing errors
#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum BgpUpdateMessageParsingError {
    /// Errors triggered by the nom parser, see [nom::error::ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    /// Invalid prefix in either the withdrawn routes or the NLRI
    Ipv4PrefixError(
        #[from_located(module = "crate::wire::deserializer::nlri")] Ipv4PrefixParsingError,
    ),
    PathAttributeError(
        #[from_located(module = "crate::wire::deserializer::path_attribute")]
        PathAttributeParsingError,
    ),
}

impl<'a> ReadablePdu<'a, LocatedBgpUpdateMessageParsingError<'a>> for BgpUpdateMessage {
    fn from_wire(
        buf: Span<'a>,
    ) -> IResult<Span<'a>, Self, LocatedBgpUpdateMessageParsingError<'a>> {
        let (buf, withdrawn_len) = be_u16(buf)?;
        let (buf, withdrawn_buf) = nom::bytes::complete::take(withdrawn_len)(buf)?;
        let (_, withdrawn_routes) = parse_till_empty_into_located(withdrawn_buf)?;
        let (buf, path_attributes_len) = be_u16(buf)?;
        let (buf, path_attributes_buf) = nom::bytes::complete::take(path_attributes_len)(buf)?;
        let (_, path_attributes) = parse_till_empty_into_located(path_attributes_buf)?;
        // NLRI runs until the end of the message
        let (buf, nlri) = parse_till_empty_into_located(buf)?;
        Ok((
            buf,
            BgpUpdateMessage::new(withdrawn_routes, path_attributes, nlri),
        ))
    }
}

impl From<&BgpUpdateMessageParsingError> for UpdateMessageErrorSubCode {
    fn from(value: &BgpUpdateMessageParsingError) -> Self {
        match value {
            BgpUpdateMessageParsingError::NomError(_) => {
                UpdateMessageErrorSubCode::MalformedAttributeList
            }
            BgpUpdateMessageParsingError::Ipv4PrefixError(_) => {
                UpdateMessageErrorSubCode::InvalidNetworkField
            }
            BgpUpdateMessageParsingError::PathAttributeError(err) => err.into(),
        }
    }
}
