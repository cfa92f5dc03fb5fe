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

//! Representation for the BGP NOTIFICATION message

use crate::error::BgpErrorKind;
use serde::{Deserialize, Serialize};

/// NOTIFICATION message [RFC4271](https://datatracker.ietf.org/doc/html/rfc4271#section-4.5)
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// | Error code    | Error subcode |   Data (variable)             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Code and subcode are kept raw so a NOTIFICATION carrying unregistered
/// values still decodes; [`BgpNotificationMessage::error_kind`] gives the
/// typed view.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BgpNotificationMessage {
    code: u8,
    subcode: u8,
    data: Vec<u8>,
}

impl BgpNotificationMessage {
    pub const fn new(code: u8, subcode: u8, data: Vec<u8>) -> Self {
        Self {
            code,
            subcode,
            data,
        }
    }

    pub fn from_kind(kind: BgpErrorKind, data: Vec<u8>) -> Self {
        Self::new(kind.code().into(), kind.subcode(), data)
    }

    pub const fn code(&self) -> u8 {
        self.code
    }

    pub const fn subcode(&self) -> u8 {
        self.subcode
    }

    pub const fn data(&self) -> &Vec<u8> {
        &self.data
    }

    /// `None` when the (code, subcode) pair isn't registered
    pub fn error_kind(&self) -> Option<BgpErrorKind> {
        BgpErrorKind::from_raw(self.code, self.subcode)
    }
}
