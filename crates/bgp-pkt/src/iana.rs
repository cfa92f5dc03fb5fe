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

//! BGP code points registered at IANA [BGP Parameters](https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml)
//!
//! Every registry is an enum with an explicit `#[repr(u8)]`. Converting a raw
//! octet goes through [`TryFrom<u8>`], which fails with an `Undefined*` type
//! carrying the octet, so parsers can surface it through
//! `nom::combinator::map_res`.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, FromRepr};

/// `From<$code> for u8` and `TryFrom<u8> for $code` backed by strum's
/// `from_repr`
macro_rules! u8_code_point {
    ($code:ident, $undefined:ident) => {
        impl From<$code> for u8 {
            fn from(value: $code) -> Self {
                value as u8
            }
        }

        impl TryFrom<u8> for $code {
            type Error = $undefined;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                Self::from_repr(value).ok_or($undefined(value))
            }
        }
    };
}

/// BGP Message types [BGP Message Types](https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-1)
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum BgpMessageType {
    Open = 1,
    Update = 2,
    Notification = 3,
    KeepAlive = 4,
    /// [RFC2918](https://datatracker.ietf.org/doc/html/rfc2918)
    RouteRefresh = 5,
}

/// The octet is not one of [`BgpMessageType`]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedBgpMessageType(pub u8);

u8_code_point!(BgpMessageType, UndefinedBgpMessageType);

/// Path attribute type codes understood by the codec. Other codes are carried
/// as [`crate::path_attribute::UnknownAttribute`].
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PathAttributeType {
    /// [RFC4271](https://datatracker.ietf.org/doc/html/rfc4271)
    Origin = 1,
    AsPath = 2,
    NextHop = 3,
    MultiExitDiscriminator = 4,
    LocalPreference = 5,
    AtomicAggregate = 6,
    Aggregator = 7,

    /// [RFC1997](https://datatracker.ietf.org/doc/html/rfc1997)
    Communities = 8,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedPathAttributeType(pub u8);

u8_code_point!(PathAttributeType, UndefinedPathAttributeType);

/// NOTIFICATION error codes [RFC4271 Section 4.5](https://datatracker.ietf.org/doc/html/rfc4271#section-4.5)
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum BgpErrorNotificationCode {
    MessageHeaderError = 1,
    OpenMessageError = 2,
    UpdateMessageError = 3,
    HoldTimerExpired = 4,
    FiniteStateMachineError = 5,
    Cease = 6,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedBgpErrorNotificationCode(pub u8);

u8_code_point!(BgpErrorNotificationCode, UndefinedBgpErrorNotificationCode);

/// [Message Header Error subcodes](https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-5)
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MessageHeaderErrorSubCode {
    Unspecific = 0,
    ConnectionNotSynchronized = 1,
    BadMessageLength = 2,
    BadMessageType = 3,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedMessageHeaderErrorSubCode(pub u8);

u8_code_point!(MessageHeaderErrorSubCode, UndefinedMessageHeaderErrorSubCode);

/// [OPEN Message Error subcodes](https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-6)
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum OpenMessageErrorSubCode {
    Unspecific = 0,
    UnsupportedVersionNumber = 1,
    BadPeerAs = 2,
    BadBgpIdentifier = 3,
    UnsupportedOptionalParameter = 4,
    UnacceptableHoldTime = 6,
    /// [RFC5492](https://datatracker.ietf.org/doc/html/rfc5492)
    UnsupportedCapability = 7,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedOpenMessageErrorSubCode(pub u8);

u8_code_point!(OpenMessageErrorSubCode, UndefinedOpenMessageErrorSubCode);

/// [UPDATE Message Error subcodes](https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-7)
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum UpdateMessageErrorSubCode {
    Unspecific = 0,
    MalformedAttributeList = 1,
    UnrecognizedWellKnownAttribute = 2,
    MissingWellKnownAttribute = 3,
    AttributeFlagsError = 4,
    AttributeLengthError = 5,
    InvalidOriginAttribute = 6,
    InvalidNextHopAttribute = 8,
    OptionalAttributeError = 9,
    InvalidNetworkField = 10,
    MalformedAsPath = 11,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedUpdateMessageErrorSubCode(pub u8);

u8_code_point!(UpdateMessageErrorSubCode, UndefinedUpdateMessageErrorSubCode);

/// [BGP Finite State Machine Error Subcodes](https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-finite-state-machine-error-subcodes)
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum FiniteStateMachineErrorSubCode {
    Unspecific = 0,
    /// [RFC6608](https://datatracker.ietf.org/doc/html/rfc6608)
    ReceiveUnexpectedMessageInOpenSentState = 1,
    ReceiveUnexpectedMessageInOpenConfirmState = 2,
    ReceiveUnexpectedMessageInEstablishedState = 3,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedFiniteStateMachineErrorSubCode(pub u8);

u8_code_point!(
    FiniteStateMachineErrorSubCode,
    UndefinedFiniteStateMachineErrorSubCode
);

/// [BGP Cease NOTIFICATION message subcodes](https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-8)
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum CeaseErrorSubCode {
    Unspecific = 0,
    /// [RFC4486](https://datatracker.ietf.org/doc/html/rfc4486)
    MaximumNumberOfPrefixesReached = 1,
    AdministrativeShutdown = 2,
    PeerDeConfigured = 3,
    AdministrativeReset = 4,
    ConnectionRejected = 5,
    OtherConfigurationChange = 6,
    ConnectionCollisionResolution = 7,
    OutOfResources = 8,
    /// [RFC8538](https://datatracker.ietf.org/doc/html/rfc8538)
    HardReset = 9,
    /// [RFC9384](https://datatracker.ietf.org/doc/html/rfc9384)
    BfdDown = 10,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedCeaseErrorSubCode(pub u8);

u8_code_point!(CeaseErrorSubCode, UndefinedCeaseErrorSubCode);

/// OPEN optional parameter types [RFC5492](https://datatracker.ietf.org/doc/html/rfc5492)
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum BgpOpenMessageParameterType {
    Capability = 2,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedBgpOpenMessageParameterType(pub u8);

u8_code_point!(
    BgpOpenMessageParameterType,
    UndefinedBgpOpenMessageParameterType
);

/// Capability codes with a dedicated representation, see
/// [Capability Codes](https://www.iana.org/assignments/capability-codes/capability-codes.xhtml)
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum BgpCapabilityCode {
    /// [RFC4760](https://datatracker.ietf.org/doc/html/rfc4760)
    MultiProtocolExtensions = 1,

    /// [RFC2918](https://datatracker.ietf.org/doc/html/rfc2918)
    RouteRefresh = 2,

    /// [RFC4724](https://datatracker.ietf.org/doc/html/rfc4724)
    GracefulRestart = 64,

    /// [RFC6793](https://datatracker.ietf.org/doc/html/rfc6793)
    FourOctetAs = 65,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedBgpCapabilityCode(pub u8);

u8_code_point!(BgpCapabilityCode, UndefinedBgpCapabilityCode);

/// AS_PATH segment types [RFC4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.3)
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum AsPathSegmentType {
    AsSet = 1,
    AsSequence = 2,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedAsPathSegmentType(pub u8);

u8_code_point!(AsPathSegmentType, UndefinedAsPathSegmentType);

/// ORIGIN attribute values [RFC4271](https://datatracker.ietf.org/doc/html/rfc4271#section-5.1.1)
#[repr(u8)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum OriginType {
    Igp = 0,
    Egp = 1,
    Incomplete = 2,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedOriginType(pub u8);

u8_code_point!(OriginType, UndefinedOriginType);

/// [Well-known Communities](https://www.iana.org/assignments/bgp-well-known-communities/bgp-well-known-communities.xhtml)
/// defined by [RFC1997](https://datatracker.ietf.org/doc/html/rfc1997)
#[repr(u32)]
#[derive(Display, FromRepr, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum WellKnownCommunity {
    NoExport = 0xFFFFFF01,
    NoAdvertise = 0xFFFFFF02,
    NoExportSubConfederation = 0xFFFFFF03,
}

impl From<WellKnownCommunity> for u32 {
    fn from(value: WellKnownCommunity) -> Self {
        value as u32
    }
}
