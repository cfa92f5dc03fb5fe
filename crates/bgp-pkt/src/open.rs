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

//! Representations for BGP Open message

use crate::capabilities::{BgpCapability, FourOctetAsCapability};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

pub const BGP_VERSION: u8 = 4;

/// Placeholder 2-octet ASN used in the fixed OPEN header by speakers whose
/// ASN doesn't fit in 16 bits [RFC6793](https://datatracker.ietf.org/doc/html/rfc6793)
pub const AS_TRANS: u16 = 23456;

/// BGP Open message
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+
/// |    Version    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     My Autonomous System      |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |           Hold Time           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         BGP Identifier                        |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// | Opt Parm Len  |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |             Optional Parameters (variable)                    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Hold time is kept as received; rejecting the values 1 and 2 is up to the
/// session.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BgpOpenMessage {
    version: u8,
    my_as: u16,
    hold_time: u16,
    bgp_id: Ipv4Addr,
    params: Vec<BgpOpenMessageParameter>,
}

impl BgpOpenMessage {
    pub const fn new(
        my_as: u16,
        hold_time: u16,
        bgp_id: Ipv4Addr,
        params: Vec<BgpOpenMessageParameter>,
    ) -> Self {
        Self {
            version: BGP_VERSION,
            my_as,
            hold_time,
            bgp_id,
            params,
        }
    }

    /// Build an OPEN for a 4-octet ASN.
    ///
    /// `my_as` carries the ASN itself when it fits in 16 bits and [`AS_TRANS`]
    /// otherwise. A [`BgpCapability::FourOctetAs`] with the full ASN is always
    /// appended as a parameter of its own, after `params`.
    pub fn new_with_asn(
        asn: u32,
        hold_time: u16,
        bgp_id: Ipv4Addr,
        params: Vec<BgpOpenMessageParameter>,
    ) -> Self {
        let my_as = u16::try_from(asn).unwrap_or(AS_TRANS);
        let mut params = params;
        params.push(BgpOpenMessageParameter::Capabilities(vec![
            BgpCapability::FourOctetAs(FourOctetAsCapability::new(asn)),
        ]));
        Self::new(my_as, hold_time, bgp_id, params)
    }

    pub const fn version(&self) -> u8 {
        self.version
    }

    pub const fn my_as(&self) -> u16 {
        self.my_as
    }

    pub const fn hold_time(&self) -> u16 {
        self.hold_time
    }

    pub const fn bgp_id(&self) -> Ipv4Addr {
        self.bgp_id
    }

    pub const fn params(&self) -> &Vec<BgpOpenMessageParameter> {
        &self.params
    }

    /// All the capabilities across all parameters, in wire order
    pub fn capabilities(&self) -> impl Iterator<Item = &BgpCapability> {
        self.params.iter().flat_map(|param| match param {
            BgpOpenMessageParameter::Capabilities(capabilities) => capabilities.iter(),
        })
    }

    /// The ASN advertised by the speaker: the value of the first four-octet AS
    /// capability when present, otherwise `my_as`
    pub fn asn4(&self) -> u32 {
        self.capabilities()
            .find_map(|capability| match capability {
                BgpCapability::FourOctetAs(four_octet) => Some(four_octet.asn4()),
                _ => None,
            })
            .unwrap_or(u32::from(self.my_as))
    }
}

/// Optional Parameter included in [`BgpOpenMessage`]. The parameter length
/// is computed while writing.
///
/// ```text
/// 0                   1
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-...
/// |  Parm. Type   | Parm. Length  |  Parameter Value (variable)
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-...
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum BgpOpenMessageParameter {
    /// Capabilities Advertisement [RFC5492](https://datatracker.ietf.org/doc/html/rfc5492)
    Capabilities(Vec<BgpCapability>),
}
