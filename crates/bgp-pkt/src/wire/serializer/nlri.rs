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

//! Serializer for the IPv4 prefixes carried in withdrawn routes and NLRI

use crate::update::Ipv4Prefix;
use bgp4_parse_utils::WritablePdu;
use bgp4_serde_macros::WritingError;
use byteorder::WriteBytesExt;
use std::io::Write;

#[derive(WritingError, Eq, PartialEq, Clone, Debug)]
pub enum Ipv4PrefixWritingError {
    StdIOError(#[from_std_io_error] String),
}

impl WritablePdu<Ipv4PrefixWritingError> for Ipv4Prefix {
    /// One octet for prefix length
    const BASE_LENGTH: usize = 1;

    fn len(&self) -> usize {
        Self::BASE_LENGTH + self.prefix_len().div_ceil(8) as usize
    }

    fn write<T: Write>(&self, writer: &mut T) -> Result<(), Ipv4PrefixWritingError> {
        writer.write_u8(self.prefix_len())?;
        // Host bits are already zero, so the trailing partial octet is padded
        writer.write_all(&self.address_octets())?;
        Ok(())
    }
}
