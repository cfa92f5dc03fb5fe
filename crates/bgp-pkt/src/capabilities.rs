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

//! BGP Capabilities advertised in BGP Open Messages.
//! See [RFC5492 Capabilities Advertisement with BGP-4](https://datatracker.ietf.org/doc/html/rfc5492)

use crate::iana::BgpCapabilityCode;
use serde::{Deserialize, Serialize};

/// A single capability TLV inside a
/// [`crate::open::BgpOpenMessageParameter::Capabilities`].
///
/// ```text
/// +------------------------------+
/// | Capability Code (1 octet)    |
/// +------------------------------+
/// | Capability Length (1 octet)  |
/// +------------------------------+
/// | Capability Value (variable)  |
/// ~                              ~
/// +------------------------------+
/// ```
///
/// The length is never stored. Known codes have a fixed (or, for graceful
/// restart, derived) length, unknown codes keep their raw value.
#[derive(Debug, Hash, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum BgpCapability {
    /// [RFC4760](https://datatracker.ietf.org/doc/html/rfc4760)
    MultiProtocolExtensions(MultiProtocolExtensionsCapability),

    /// [RFC2918](https://datatracker.ietf.org/doc/html/rfc2918)
    RouteRefresh,

    /// [RFC4724](https://datatracker.ietf.org/doc/html/rfc4724)
    GracefulRestart(GracefulRestartCapability),

    /// [RFC6793](https://datatracker.ietf.org/doc/html/rfc6793)
    FourOctetAs(FourOctetAsCapability),

    Unrecognized(UnrecognizedCapability),
}

impl BgpCapability {
    /// The IANA code, or the raw code for [`BgpCapability::Unrecognized`]
    pub const fn code(&self) -> Result<BgpCapabilityCode, u8> {
        match self {
            Self::MultiProtocolExtensions(_) => Ok(BgpCapabilityCode::MultiProtocolExtensions),
            Self::RouteRefresh => Ok(BgpCapabilityCode::RouteRefresh),
            Self::GracefulRestart(_) => Ok(BgpCapabilityCode::GracefulRestart),
            Self::FourOctetAs(_) => Ok(BgpCapabilityCode::FourOctetAs),
            Self::Unrecognized(value) => Err(value.code),
        }
    }

    /// Raw capability code as written on the wire
    pub fn raw_code(&self) -> u8 {
        match self.code() {
            Ok(code) => code.into(),
            Err(code) => code,
        }
    }
}

/// Capability code not known to this crate, kept with its raw value
#[derive(Debug, Hash, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct UnrecognizedCapability {
    code: u8,
    value: Vec<u8>,
}

impl UnrecognizedCapability {
    /// `code` must not be one of [`BgpCapabilityCode`], writing such a
    /// capability fails with `BgpCapabilityWritingError::KnownCapabilityCode`
    pub const fn new(code: u8, value: Vec<u8>) -> Self {
        Self { code, value }
    }

    pub const fn code(&self) -> u8 {
        self.code
    }

    pub const fn value(&self) -> &Vec<u8> {
        &self.value
    }
}

/// Advertise a 4-octet ASN [RFC6793](https://datatracker.ietf.org/doc/html/rfc6793)
///
/// ```text
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                 Autonomous System Number (4 octets)           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Hash, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct FourOctetAsCapability {
    asn4: u32,
}

impl FourOctetAsCapability {
    pub const fn new(asn4: u32) -> Self {
        Self { asn4 }
    }

    pub const fn asn4(&self) -> u32 {
        self.asn4
    }
}

/// Multiprotocol support [RFC4760](https://datatracker.ietf.org/doc/html/rfc4760).
/// AFI and SAFI are kept as raw numbers; the codec never interprets them.
///
/// ```text
/// 0       7      15      23      31
/// +-------+-------+-------+-------+
/// |      AFI      | Res.  | SAFI  |
/// +-------+-------+-------+-------+
/// ```
#[derive(Debug, Hash, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct MultiProtocolExtensionsCapability {
    afi: u16,
    safi: u8,
}

impl MultiProtocolExtensionsCapability {
    pub const fn new(afi: u16, safi: u8) -> Self {
        Self { afi, safi }
    }

    pub const fn afi(&self) -> u16 {
        self.afi
    }

    pub const fn safi(&self) -> u8 {
        self.safi
    }
}

/// Graceful Restart Capability [RFC4724](https://datatracker.ietf.org/doc/html/rfc4724)
///
/// ```text
/// +--------------------------------------------------+
/// | Restart Flags (4 bits)                           |
/// +--------------------------------------------------+
/// | Restart Time in seconds (12 bits)                |
/// +--------------------------------------------------+
/// | Address Family Identifier (16 bits)              |
/// +--------------------------------------------------+
/// | Subsequent Address Family Identifier (8 bits)    |
/// +--------------------------------------------------+
/// | Flags for Address Family (8 bits)                |
/// +--------------------------------------------------+
/// | ...                                              |
/// +--------------------------------------------------+
/// ```
#[derive(Debug, Hash, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GracefulRestartCapability {
    restart: bool,
    graceful_notification: bool,
    time: u16,
    address_families: Vec<GracefulRestartAddressFamily>,
}

impl GracefulRestartCapability {
    /// Largest restart time that fits the 12-bit field
    pub const MAX_TIME: u16 = 0x0fff;

    /// `time` is truncated to its low 12 bits
    pub fn new(
        restart: bool,
        graceful_notification: bool,
        time: u16,
        address_families: Vec<GracefulRestartAddressFamily>,
    ) -> Self {
        Self {
            restart,
            graceful_notification,
            time: time & Self::MAX_TIME,
            address_families,
        }
    }

    pub const fn restart(&self) -> bool {
        self.restart
    }

    /// `N` bit from [RFC8538](https://datatracker.ietf.org/doc/html/rfc8538)
    pub const fn graceful_notification(&self) -> bool {
        self.graceful_notification
    }

    pub const fn time(&self) -> u16 {
        self.time
    }

    pub const fn address_families(&self) -> &Vec<GracefulRestartAddressFamily> {
        &self.address_families
    }
}

#[derive(Debug, Hash, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GracefulRestartAddressFamily {
    forwarding_state: bool,
    afi: u16,
    safi: u8,
}

impl GracefulRestartAddressFamily {
    pub const fn new(forwarding_state: bool, afi: u16, safi: u8) -> Self {
        Self {
            forwarding_state,
            afi,
            safi,
        }
    }

    pub const fn forwarding_state(&self) -> bool {
        self.forwarding_state
    }

    pub const fn afi(&self) -> u16 {
        self.afi
    }

    pub const fn safi(&self) -> u8 {
        self.safi
    }
}
