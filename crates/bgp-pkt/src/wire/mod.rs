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

//! Serialize/Deserialize BGP wire protocol

pub mod deserializer;
pub mod serializer;

/// Route refresh have fixed length as per RFC2918
pub(crate) const ROUTE_REFRESH_CAPABILITY_LENGTH: u8 = 0;

/// Multi Protocol extension have fixed length as per RFC4760
pub(crate) const MULTI_PROTOCOL_EXTENSIONS_CAPABILITY_LENGTH: u8 = 4;

/// Four octet as capability have fixed length as per RFC6793
pub(crate) const FOUR_OCTET_AS_CAPABILITY_LENGTH: u8 = 4;

/// 2-octet restart flags and time that precede the address families, RFC4724
pub(crate) const GRACEFUL_RESTART_HEADER_LENGTH: u8 = 2;

/// 2-octet AFI + 1-octet SAFI + 1-octet flags as per RFC4724
pub(crate) const GRACEFUL_RESTART_ADDRESS_FAMILY_LENGTH: u8 = 4;

/// Smallest OPEN: header and the 10 octets of fixed fields, RFC4271 Section 6.1
pub(crate) const OPEN_MIN_MESSAGE_LENGTH: u16 = 29;

/// Header plus the two 2-octet section lengths
pub(crate) const UPDATE_MIN_MESSAGE_LENGTH: u16 = 23;

/// Header plus error code and subcode
pub(crate) const NOTIFICATION_MIN_MESSAGE_LENGTH: u16 = 21;

/// Header plus AFI, reserved and SAFI, RFC2918
pub(crate) const ROUTE_REFRESH_MESSAGE_LENGTH: u16 = 23;

#[cfg(test)]
mod tests;
