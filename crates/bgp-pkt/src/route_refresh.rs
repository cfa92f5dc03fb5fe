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

//! Representation for the Route Refresh BGP message.

use serde::{Deserialize, Serialize};

/// Route Refresh message as defined in
/// Route Refresh Capability for BGP-4 [RFC2918](https://datatracker.ietf.org/doc/html/rfc2918)
///
/// ```text
///  0       7      15      23      31
/// +-------+-------+-------+-------+
/// |      AFI      | Res.  | SAFI  |
/// +-------+-------+-------+-------+
/// ```
///
/// The reserved octet is written as zero and ignored when reading.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct BgpRouteRefreshMessage {
    afi: u16,
    safi: u8,
}

impl BgpRouteRefreshMessage {
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
