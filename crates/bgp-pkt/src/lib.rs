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

//! BGP-4 message representation and wire codec.
//!
//! [`decode`] turns one framed message into a [`BgpMessage`] and [`encode`]
//! produces the exact octets a BGP speaker puts on the wire. Both work on
//! a single message at a time: splitting a TCP stream into messages, the
//! FSM and its timers are the caller's job.
//!
//! ```
//! use bgp4_pkt::{decode, encode, BgpMessage};
//!
//! let wire = encode(&BgpMessage::KeepAlive).unwrap();
//! assert_eq!(wire.len(), 19);
//! let (msg, consumed) = decode(&wire).unwrap();
//! assert_eq!(msg, BgpMessage::KeepAlive);
//! assert_eq!(consumed, 19);
//! ```

use crate::{
    error::BgpError,
    iana::BgpMessageType,
    notification::BgpNotificationMessage,
    open::BgpOpenMessage,
    route_refresh::BgpRouteRefreshMessage,
    update::BgpUpdateMessage,
    wire::{
        deserializer::{BgpParsingContext, LocatedBgpMessageParsingError},
        serializer::BgpMessageWritingError,
    },
};
use bgp4_parse_utils::{ReadablePduWithOneInput, Span, WritablePdu};
use serde::{Deserialize, Serialize};

pub mod capabilities;
pub mod community;
pub mod error;
pub mod iana;
pub mod notification;
pub mod open;
pub mod path_attribute;
pub mod route_refresh;
pub mod update;
pub mod wire;

/// BGP message wire format as defined by [RFC4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.1)
/// Here we don't keep the length and type in memory. The type is inferred by
/// the enum value, while the length is computed a serialization time.
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                                                               +
/// |                                                               |
/// +                                                               +
/// |                           Marker                              |
/// +                                                               +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          Length               |      Type     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum BgpMessage {
    Open(BgpOpenMessage),
    Update(BgpUpdateMessage),
    Notification(BgpNotificationMessage),
    KeepAlive,
    RouteRefresh(BgpRouteRefreshMessage),
}

impl BgpMessage {
    /// Get the BGP message IANA type
    pub const fn get_type(&self) -> BgpMessageType {
        match self {
            Self::Open(_) => BgpMessageType::Open,
            Self::Update(_) => BgpMessageType::Update,
            Self::Notification(_) => BgpMessageType::Notification,
            Self::KeepAlive => BgpMessageType::KeepAlive,
            Self::RouteRefresh(_) => BgpMessageType::RouteRefresh,
        }
    }
}

/// Decode the message at the start of `buf` with the default
/// [`BgpParsingContext`].
///
/// On success returns the message and the number of octets it took, which is
/// always the length from its header. Octets after the message are left
/// untouched for the next call.
pub fn decode(buf: &[u8]) -> Result<(BgpMessage, usize), BgpError> {
    decode_with_context(buf, &BgpParsingContext::default())
}

pub fn decode_with_context(
    buf: &[u8],
    ctx: &BgpParsingContext,
) -> Result<(BgpMessage, usize), BgpError> {
    let parsed: nom::IResult<Span<'_>, BgpMessage, LocatedBgpMessageParsingError<'_>> =
        BgpMessage::from_wire(Span::new(buf), ctx);
    match parsed {
        Ok((remainder, msg)) => {
            let consumed = remainder.location_offset();
            log::trace!("Decoded BGP {} message of {consumed} octets", msg.get_type());
            Ok((msg, consumed))
        }
        Err(nom::Err::Error(err)) | Err(nom::Err::Failure(err)) => {
            let error = BgpError::from(err);
            log::debug!("Failed to decode BGP message: {error}");
            Err(error)
        }
        // Every sub-length is read with a complete `take`, so this is unreachable
        Err(nom::Err::Incomplete(_)) => Err(BgpError::from(
            &wire::deserializer::BgpMessageParsingError::NomError(nom::error::ErrorKind::Eof),
        )),
    }
}

/// Encode `msg` with its marker, header length and type
pub fn encode(msg: &BgpMessage) -> Result<Vec<u8>, BgpMessageWritingError> {
    let mut buf = Vec::with_capacity(msg.len());
    msg.write(&mut buf)?;
    log::trace!("Encoded BGP {} message of {} octets", msg.get_type(), buf.len());
    Ok(buf)
}
