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

//! BGP Communities [RFC1997](https://datatracker.ietf.org/doc/html/rfc1997)

use crate::iana::WellKnownCommunity;
use serde::{Deserialize, Serialize};

/// Four octet community value, conventionally written as `ASN:value`
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Community(u32);

impl Community {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn from_parts(asn: u16, value: u16) -> Self {
        Self(((asn as u32) << 16) | value as u32)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }

    /// `None` when the value isn't one of the RFC1997 well-known communities
    pub const fn well_known(&self) -> Option<WellKnownCommunity> {
        WellKnownCommunity::from_repr(self.0)
    }

    /// High order 16 bits
    pub const fn asn(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// Low order 16 bits
    pub const fn local_value(&self) -> u16 {
        (self.0 & 0xffff) as u16
    }
}

impl From<WellKnownCommunity> for Community {
    fn from(value: WellKnownCommunity) -> Self {
        Self(value.into())
    }
}

impl std::fmt::Display for Community {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.well_known() {
            Some(well_known) => write!(f, "{well_known}"),
            None => write!(f, "{}:{}", self.asn(), self.local_value()),
        }
    }
}
