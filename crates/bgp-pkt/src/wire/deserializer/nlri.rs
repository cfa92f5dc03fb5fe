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

//! Deserializer for the IPv4 prefixes carried in withdrawn routes and NLRI

use crate::update::Ipv4Prefix;
use bgp4_parse_utils::{ErrorKindSerdeDeref, ReadablePdu, Span};
use bgp4_serde_macros::LocatedError;
use ipnet::Ipv4Net;
use nom::{error::ErrorKind, number::complete::be_u8, IResult};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

const IPV4_MAX_PREFIX_LEN: u8 = 32;

#[derive(LocatedError, Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub enum Ipv4PrefixParsingError {
    /// Errors triggered by the nom parser, see [ErrorKind] for
    /// additional information.
    #[serde(with = "ErrorKindSerdeDeref")]
    NomError(#[from_nom] ErrorKind),
    InvalidIpv4PrefixLen(u8),
}

impl<'a> ReadablePdu<'a, LocatedIpv4PrefixParsingError<'a>> for Ipv4Prefix {
    fn from_wire(buf: Span<'a>) -> IResult<Span<'a>, Self, LocatedIpv4PrefixParsingError<'a>> {
        let input = buf;
        let (buf, prefix_len) = be_u8(buf)?;
        let invalid_len = || {
            nom::Err::Error(LocatedIpv4PrefixParsingError::new(
                input,
                Ipv4PrefixParsingError::InvalidIpv4PrefixLen(prefix_len),
            ))
        };
        if prefix_len > IPV4_MAX_PREFIX_LEN {
            return Err(invalid_len());
        }
        // The prefix value must fall into the octet boundary, even if the prefix_len
        // doesn't. For example, prefix_len=19 is carried in 3 octets
        let (buf, prefix) = nom::bytes::complete::take(prefix_len.div_ceil(8))(buf)?;
        let mut network = [0; 4];
        network[..prefix.len()].copy_from_slice(prefix.fragment());
        // Bits past the prefix length are dropped by the truncation in from_net
        let net = Ipv4Net::new(Ipv4Addr::from(network), prefix_len).map_err(|_| invalid_len())?;
        Ok((buf, Ipv4Prefix::from_net(net)))
    }
}
