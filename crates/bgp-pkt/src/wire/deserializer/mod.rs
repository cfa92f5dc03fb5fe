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

//! Deserializer library for BGP's wire protocol

pub mod capabilities;
pub mod nlri;
pub mod notification;
pub mod open;
pub mod path_attribute;
pub mod route_refresh;
pub mod update;

use crate::{
    capabilities::BgpCapability,
    error::{BgpError, BgpErrorKind},
    iana::{BgpMessageType, MessageHeaderErrorSubCode, UndefinedBgpMessageType},
    open::BGP_VERSION,
    wire::{
        deserializer::{
            notification::BgpNotificationMessageParsingError, open::BgpOpenMessageParsingError,
            route_refresh::BgpRouteRefreshMessageParsingError,
            update::BgpUpdateMessageParsingError,
        },
        NOTIFICATION_MIN_MESSAGE_LENGTH, OPEN_MIN_MESSAGE_LENGTH, ROUTE_REFRESH_MESSAGE_LENGTH,
        UPDATE_MIN_MESSAGE_LENGTH,
    },
    BgpMessage,
};
use bgp4_parse_utils::{
    parse_into_located, parse_into_located_one_input, ErrorKindSerdeDeref, LocatedParsingError,
    ReadablePduWithOneInput, Span,
};
use bgp4_serde_macros::LocatedError;
use nom::{
    error::ErrorKind,
    number::complete::{be_u128, be_u16, be_u8},
    IResult,
};
use serde::{Deserialize, Serialize};

/// Min message size in BGP is 19 octets. They're counted from
/// 16-octets synchronization header, 2-octets length, and 1 octet for type.
pub const BGP_MIN_MESSAGE_LENGTH: u16 = 19;

/// [RFC4271](https://datatracker.ietf.org/doc/html/rfc4271) defined max length as 4096.
pub const BGP_MAX_MESSAGE_LENGTH: u16 = 4096;

/// Knobs that change how messages are decoded.
///
/// The defaults decode exactly what RFC4271 describes, minus the marker
/// check. The context is only read while decoding; a session learning
/// about its peer updates it between messages with
/// [`BgpParsingContext::update_capabilities`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BgpParsingContext {
    keep_unrecognized_capabilities: bool,
    validate_marker: bool,
    route_refresh: bool,
}

impl BgpParsingContext {
    pub const fn new(
        keep_unrecognized_capabilities: bool,
        validate_marker: bool,
        route_refresh: bool,
    ) -> Self {
        Self {
            keep_unrecognized_capabilities,
            validate_marker,
            route_refresh,
        }
    }

    /// Keep capabilities with unknown codes as [`BgpCapability::Unrecognized`]
    /// instead of dropping them
    pub const fn keep_unrecognized_capabilities(&self) -> bool {
        self.keep_unrecognized_capabilities
    }

    pub fn set_keep_unrecognized_capabilities(&mut self, value: bool) {
        self.keep_unrecognized_capabilities = value;
    }

    /// Reject messages whose marker isn't all ones
    pub const fn validate_marker(&self) -> bool {
        self.validate_marker
    }

    pub fn set_validate_marker(&mut self, value: bool) {
        self.validate_marker = value;
    }

    /// Accept ROUTE-REFRESH messages (type 5)
    pub const fn route_refresh(&self) -> bool {
        self.route_refresh
    }

    pub fn set_route_refresh(&mut self, value: bool) {
        self.route_refresh = value;
    }

    #[inline]
    pub fn update_capabilities(&mut self, capability: &BgpCapability) {
        if let BgpCapability::RouteRefresh = capability {
            self.route_refresh = true;
        }
    }
}

/// BGP Message Parsing errors
#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum BgpMessageParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),

    /// The first 16-bytes of a BGP message is NOT all set to `1`
    /// For simplicity, we carry the equivalent [`u128`] value that was invalid
    /// instead of the whole buffer
    ConnectionNotSynchronized(u128),

    /// Couldn't recognize the type octet in the BGPMessage, see
    /// [UndefinedBgpMessageType]
    UndefinedBgpMessageType(#[from_external] UndefinedBgpMessageType),

    /// BGP Message length is not in the defined \[min, max\] range for the
    /// given message type, or the buffer is shorter than the length
    BadMessageLength(u16),

    BgpOpenMessageParsingError(
        #[from_located(module = "crate::wire::deserializer::open")] BgpOpenMessageParsingError,
    ),

    BgpUpdateMessageParsingError(
        #[from_located(module = "crate::wire::deserializer::update")] BgpUpdateMessageParsingError,
    ),

    BgpNotificationMessageParsingError(
        #[from_located(module = "crate::wire::deserializer::notification")]
        BgpNotificationMessageParsingError,
    ),

    BgpRouteRefreshMessageParsingError(
        #[from_located(module = "crate::wire::deserializer::route_refresh")]
        BgpRouteRefreshMessageParsingError,
    ),
}

/// Check the length of a BGP message against the rules of RFC4271 Section
/// 6.1 for its type
#[inline]
const fn valid_length_for_type(message_type: BgpMessageType, length: u16) -> bool {
    match message_type {
        BgpMessageType::Open => length >= OPEN_MIN_MESSAGE_LENGTH,
        BgpMessageType::Update => length >= UPDATE_MIN_MESSAGE_LENGTH,
        BgpMessageType::Notification => length >= NOTIFICATION_MIN_MESSAGE_LENGTH,
        BgpMessageType::KeepAlive => length == BGP_MIN_MESSAGE_LENGTH,
        BgpMessageType::RouteRefresh => length == ROUTE_REFRESH_MESSAGE_LENGTH,
    }
}

impl<'a> ReadablePduWithOneInput<'a, &BgpParsingContext, LocatedBgpMessageParsingError<'a>>
    for BgpMessage
{
    fn from_wire(
        buf: Span<'a>,
        ctx: &BgpParsingContext,
    ) -> IResult<Span<'a>, Self, LocatedBgpMessageParsingError<'a>> {
        if buf.len() < BGP_MIN_MESSAGE_LENGTH as usize {
            return Err(nom::Err::Error(LocatedBgpMessageParsingError::new(
                buf,
                BgpMessageParsingError::NomError(ErrorKind::Eof),
            )));
        }
        let message_start = buf;
        let (buf, _) = nom::combinator::map_res(be_u128, |marker| {
            if marker == u128::MAX || !ctx.validate_marker() {
                Ok(marker)
            } else {
                Err(BgpMessageParsingError::ConnectionNotSynchronized(marker))
            }
        })(buf)?;

        let pre_len_buf = buf;
        let (buf, length) = be_u16(buf)?;
        let bad_length = || {
            nom::Err::Error(LocatedBgpMessageParsingError::new(
                pre_len_buf,
                BgpMessageParsingError::BadMessageLength(length),
            ))
        };
        // Fail early, before the length is used for any math
        if !(BGP_MIN_MESSAGE_LENGTH..=BGP_MAX_MESSAGE_LENGTH).contains(&length)
            || message_start.len() < length as usize
        {
            return Err(bad_length());
        }

        let (buf, message_type) = nom::combinator::map_res(be_u8, |code| {
            match BgpMessageType::try_from(code) {
                Ok(BgpMessageType::RouteRefresh) if !ctx.route_refresh() => {
                    Err(UndefinedBgpMessageType(code))
                }
                parsed => parsed,
            }
        })(buf)?;
        if !valid_length_for_type(message_type, length) {
            return Err(bad_length());
        }

        // Only read the subset that is defined by the length
        let (remainder_buf, body) =
            nom::bytes::complete::take(length - BGP_MIN_MESSAGE_LENGTH)(buf)?;
        let (body, msg) = match message_type {
            BgpMessageType::Open => {
                let (body, open) = parse_into_located_one_input(body, ctx)?;
                if !body.is_empty() {
                    return Err(nom::Err::Error(LocatedBgpMessageParsingError::new(
                        body,
                        BgpMessageParsingError::BgpOpenMessageParsingError(
                            BgpOpenMessageParsingError::NomError(ErrorKind::NonEmpty),
                        ),
                    )));
                }
                (body, BgpMessage::Open(open))
            }
            BgpMessageType::Update => {
                let (body, update) = parse_into_located(body)?;
                (body, BgpMessage::Update(update))
            }
            BgpMessageType::Notification => {
                let (body, notification) = parse_into_located(body)?;
                (body, BgpMessage::Notification(notification))
            }
            BgpMessageType::KeepAlive => (body, BgpMessage::KeepAlive),
            BgpMessageType::RouteRefresh => {
                let (body, route_refresh) = parse_into_located(body)?;
                (body, BgpMessage::RouteRefresh(route_refresh))
            }
        };

        // Make sure we consumed the full BGP message as specified by its length
        if !body.is_empty() {
            return Err(bad_length());
        }
        Ok((remainder_buf, msg))
    }
}

impl From<&BgpMessageParsingError> for BgpError {
    fn from(value: &BgpMessageParsingError) -> Self {
        match value {
            BgpMessageParsingError::NomError(_) => BgpError::new(
                BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageLength),
                vec![],
            ),
            BgpMessageParsingError::ConnectionNotSynchronized(_) => BgpError::new(
                BgpErrorKind::MessageHeaderError(
                    MessageHeaderErrorSubCode::ConnectionNotSynchronized,
                ),
                vec![],
            ),
            BgpMessageParsingError::UndefinedBgpMessageType(UndefinedBgpMessageType(code)) => {
                BgpError::new(
                    BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageType),
                    vec![*code],
                )
            }
            BgpMessageParsingError::BadMessageLength(length) => BgpError::new(
                BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageLength),
                length.to_be_bytes().to_vec(),
            ),
            BgpMessageParsingError::BgpOpenMessageParsingError(err) => {
                let data = match err {
                    BgpOpenMessageParsingError::UnsupportedVersionNumber(_) => {
                        u16::from(BGP_VERSION).to_be_bytes().to_vec()
                    }
                    _ => vec![],
                };
                BgpError::new(BgpErrorKind::OpenMessageError(err.into()), data)
            }
            BgpMessageParsingError::BgpUpdateMessageParsingError(err) => {
                BgpError::new(BgpErrorKind::UpdateMessageError(err.into()), vec![])
            }
            // Both bodies are fixed by the already validated length, so a failure
            // here means the length and the body disagree
            BgpMessageParsingError::BgpNotificationMessageParsingError(_)
            | BgpMessageParsingError::BgpRouteRefreshMessageParsingError(_) => BgpError::new(
                BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageLength),
                vec![],
            ),
        }
    }
}

impl<'a> From<LocatedBgpMessageParsingError<'a>> for BgpError {
    fn from(value: LocatedBgpMessageParsingError<'a>) -> Self {
        let error = BgpError::from(value.error());
        error.with_diagnostic(format!(
            "{:?} at offset {}",
            value.error(),
            value.span().location_offset()
        ))
    }
}
