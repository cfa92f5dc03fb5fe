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

//! Serializer for BGP Update message

use crate::{
    path_attribute::PathAttribute,
    update::{BgpUpdateMessage, Ipv4Prefix},
    wire::serializer::{nlri::Ipv4PrefixWritingError, path_attribute::PathAttributeWritingError},
};
use bgp4_parse_utils::WritablePdu;
use bgp4_serde_macros::WritingError;
use byteorder::{NetworkEndian, WriteBytesExt};

#[derive(WritingError, Eq, PartialEq, Clone, Debug)]
pub enum BgpUpdateMessageWritingError {
    StdIOError(#[from_std_io_error] String),
    WithdrawnRoutesLengthOverflow(usize),
    PathAttributesLengthOverflow(usize),
    Ipv4PrefixError(#[from] Ipv4PrefixWritingError),
    PathAttributeError(#[from] PathAttributeWritingError),
}

impl WritablePdu<BgpUpdateMessageWritingError> for BgpUpdateMessage {
    /// 2-octet withdrawn routes length and 2-octet path attributes length
    const BASE_LENGTH: usize = 4;

    fn len(&self) -> usize {
        let withdrawn_len: usize = self.withdrawn_routes().iter().map(Ipv4Prefix::len).sum();
        let path_attrs_len: usize = self.path_attributes().iter().map(PathAttribute::len).sum();
        let nlri_len: usize = self.nlri().iter().map(Ipv4Prefix::len).sum();
        Self::BASE_LENGTH + withdrawn_len + path_attrs_len + nlri_len
    }

    fn write<T: std::io::Write>(&self, writer: &mut T) -> Result<(), BgpUpdateMessageWritingError> {
        let withdrawn_len: usize = self.withdrawn_routes().iter().map(Ipv4Prefix::len).sum();
        let withdrawn_len = u16::try_from(withdrawn_len).map_err(|_| {
            BgpUpdateMessageWritingError::WithdrawnRoutesLengthOverflow(withdrawn_len)
        })?;
        writer.write_u16::<NetworkEndian>(withdrawn_len)?;
        for withdrawn in self.withdrawn_routes() {
            withdrawn.write(writer)?;
        }
        let attrs_len: usize = self.path_attributes().iter().map(PathAttribute::len).sum();
        let attrs_len = u16::try_from(attrs_len)
            .map_err(|_| BgpUpdateMessageWritingError::PathAttributesLengthOverflow(attrs_len))?;
        writer.write_u16::<NetworkEndian>(attrs_len)?;
        for attr in self.path_attributes() {
            attr.write(writer)?;
        }
        for prefix in self.nlri() {
            prefix.write(writer)?;
        }
        Ok(())
    }
}
