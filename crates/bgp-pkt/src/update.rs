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

use crate::path_attribute::PathAttribute;
use ipnet::{Ipv4Net, PrefixLenError};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// UPDATE messages are used to transfer routing information between BGP peers
/// as defined by [RFC4271](https://datatracker.ietf.org/doc/html/RFC4271).
///
/// ```text
/// +-----------------------------------------------------+
/// |   Withdrawn Routes Length (2 octets)                |
/// +-----------------------------------------------------+
/// |   Withdrawn Routes (variable)                       |
/// +-----------------------------------------------------+
/// |   Total Path Attribute Length (2 octets)            |
/// +-----------------------------------------------------+
/// |   Path Attributes (variable)                        |
/// +-----------------------------------------------------+
/// |   Network Layer Reachability Information (variable) |
/// +-----------------------------------------------------+
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BgpUpdateMessage {
    withdrawn_routes: Vec<Ipv4Prefix>,
    path_attributes: Vec<PathAttribute>,
    nlri: Vec<Ipv4Prefix>,
}

impl BgpUpdateMessage {
    #[inline]
    pub const fn new(
        withdrawn_routes: Vec<Ipv4Prefix>,
        path_attributes: Vec<PathAttribute>,
        nlri: Vec<Ipv4Prefix>,
    ) -> Self {
        Self {
            withdrawn_routes,
            path_attributes,
            nlri,
        }
    }

    pub const fn withdrawn_routes(&self) -> &Vec<Ipv4Prefix> {
        &self.withdrawn_routes
    }

    pub const fn path_attributes(&self) -> &Vec<PathAttribute> {
        &self.path_attributes
    }

    /// Network Layer Reachability Information
    pub const fn nlri(&self) -> &Vec<Ipv4Prefix> {
        &self.nlri
    }
}

/// IPv4 prefix as carried in withdrawn routes and NLRI.
///
/// Host bits beyond the prefix length are always zero, whatever the
/// constructor was given, so two prefixes with the same significant bits
/// always compare equal.
///
/// ```text
/// +---------------------------+
/// |   Length (1 octet)        |
/// +---------------------------+
/// |   Prefix (variable)       |
/// +---------------------------+
/// ```
#[derive(Debug, Hash, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "Ipv4Net", into = "Ipv4Net")]
pub struct Ipv4Prefix(Ipv4Net);

impl Ipv4Prefix {
    /// Fails when `prefix_len` is more than 32
    pub fn new(address: Ipv4Addr, prefix_len: u8) -> Result<Self, PrefixLenError> {
        Ok(Self::from_net(Ipv4Net::new(address, prefix_len)?))
    }

    pub fn from_net(net: Ipv4Net) -> Self {
        Self(net.trunc())
    }

    pub const fn net(&self) -> Ipv4Net {
        self.0
    }

    pub fn prefix_len(&self) -> u8 {
        self.0.prefix_len()
    }

    pub fn network(&self) -> Ipv4Addr {
        self.0.network()
    }

    /// The significant octets of the network address: `ceil(prefix_len / 8)`
    /// bytes with the trailing bits zeroed
    pub fn address_octets(&self) -> Vec<u8> {
        let count = usize::from(self.prefix_len().div_ceil(8));
        self.network().octets()[..count].to_vec()
    }
}

impl From<Ipv4Net> for Ipv4Prefix {
    fn from(net: Ipv4Net) -> Self {
        Self::from_net(net)
    }
}

impl From<Ipv4Prefix> for Ipv4Net {
    fn from(prefix: Ipv4Prefix) -> Self {
        prefix.0
    }
}
