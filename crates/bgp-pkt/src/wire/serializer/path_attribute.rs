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

//! Serializer for BGP Path Attributes

use crate::{
    iana::PathAttributeType,
    path_attribute::*,
    wire::deserializer::path_attribute::{
        AGGREGATOR_LEN, ATOMIC_AGGREGATE_LEN, COMMUNITY_LEN, EXTENDED_LENGTH_PATH_ATTRIBUTE_MASK,
        LOCAL_PREFERENCE_LEN, MULTI_EXIT_DISCRIMINATOR_LEN, NEXT_HOP_LEN, ORIGIN_LEN,
        OPTIONAL_PATH_ATTRIBUTE_MASK, PARTIAL_PATH_ATTRIBUTE_MASK, TRANSITIVE_PATH_ATTRIBUTE_MASK,
    },
};
use bgp4_parse_utils::WritablePdu;
use bgp4_serde_macros::WritingError;
use byteorder::{NetworkEndian, WriteBytesExt};
use std::io::Write;

/// Longest value that still fits the 1-octet length field
const MAX_SHORT_ATTRIBUTE_LEN: usize = u8::MAX as usize;

#[derive(WritingError, Eq, PartialEq, Clone, Debug)]
pub enum PathAttributeWritingError {
    StdIOError(#[from_std_io_error] String),
    /// Value is longer than the 2-octet extended length can carry
    AttributeLengthOverflow(usize),
    /// [`UnknownAttribute`] carrying a type code that has its own variant
    KnownAttributeCode(u8),
    AsPathError(#[from] AsPathWritingError),
}

impl PathAttributeValue {
    /// Length of the attribute value, without the attribute header
    pub fn value_len(&self) -> usize {
        match self {
            Self::Origin(_) => ORIGIN_LEN as usize,
            Self::AsPath(value) => value.len(),
            Self::NextHop(_) => NEXT_HOP_LEN as usize,
            Self::MultiExitDiscriminator(_) => MULTI_EXIT_DISCRIMINATOR_LEN as usize,
            Self::LocalPreference(_) => LOCAL_PREFERENCE_LEN as usize,
            Self::AtomicAggregate(_) => ATOMIC_AGGREGATE_LEN as usize,
            Self::Aggregator(_) => AGGREGATOR_LEN as usize,
            Self::Communities(value) => value.communities().len() * COMMUNITY_LEN as usize,
            Self::UnknownAttribute(value) => value.value().len(),
        }
    }
}

impl PathAttribute {
    /// The extended length bit is set only when the value doesn't fit in a
    /// 1-octet length
    pub fn extended_length(&self) -> bool {
        self.value().value_len() > MAX_SHORT_ATTRIBUTE_LEN
    }

    fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.optional() {
            flags |= OPTIONAL_PATH_ATTRIBUTE_MASK;
        }
        if self.transitive() {
            flags |= TRANSITIVE_PATH_ATTRIBUTE_MASK;
        }
        if self.partial() {
            flags |= PARTIAL_PATH_ATTRIBUTE_MASK;
        }
        if self.extended_length() {
            flags |= EXTENDED_LENGTH_PATH_ATTRIBUTE_MASK;
        }
        flags
    }
}

impl WritablePdu<PathAttributeWritingError> for PathAttribute {
    /// 1-octet flags, 1-octet type code and at least 1-octet length
    const BASE_LENGTH: usize = 3;

    fn len(&self) -> usize {
        let extra_length_octet = usize::from(self.extended_length());
        Self::BASE_LENGTH + extra_length_octet + self.value().value_len()
    }

    fn write<T: Write>(&self, writer: &mut T) -> Result<(), PathAttributeWritingError> {
        if let PathAttributeValue::UnknownAttribute(value) = self.value() {
            if PathAttributeType::try_from(value.code()).is_ok() {
                return Err(PathAttributeWritingError::KnownAttributeCode(value.code()));
            }
        }
        let value_len = self.value().value_len();
        writer.write_u8(self.flags())?;
        writer.write_u8(self.value().raw_code())?;
        if self.extended_length() {
            let value_len = u16::try_from(value_len)
                .map_err(|_| PathAttributeWritingError::AttributeLengthOverflow(value_len))?;
            writer.write_u16::<NetworkEndian>(value_len)?;
        } else {
            writer.write_u8(value_len as u8)?;
        }
        match self.value() {
            PathAttributeValue::Origin(value) => writer.write_u8(value.value())?,
            PathAttributeValue::AsPath(value) => value.write(writer)?,
            PathAttributeValue::NextHop(value) => {
                writer.write_u32::<NetworkEndian>(value.next_hop().into())?
            }
            PathAttributeValue::MultiExitDiscriminator(value) => {
                writer.write_u32::<NetworkEndian>(value.metric())?
            }
            PathAttributeValue::LocalPreference(value) => {
                writer.write_u32::<NetworkEndian>(value.metric())?
            }
            PathAttributeValue::AtomicAggregate(_) => {}
            PathAttributeValue::Aggregator(value) => {
                writer.write_u32::<NetworkEndian>(value.asn())?;
                writer.write_u32::<NetworkEndian>(value.origin().into())?;
            }
            PathAttributeValue::Communities(value) => {
                for community in value.communities() {
                    writer.write_u32::<NetworkEndian>(community.value())?;
                }
            }
            PathAttributeValue::UnknownAttribute(value) => writer.write_all(value.value())?,
        }
        Ok(())
    }
}

#[derive(WritingError, Eq, PartialEq, Clone, Debug)]
pub enum AsPathWritingError {
    StdIOError(#[from_std_io_error] String),
    /// More AS numbers in one segment than the 1-octet count can carry
    SegmentLengthOverflow(usize),
}

impl WritablePdu<AsPathWritingError> for AsPath {
    const BASE_LENGTH: usize = 0;

    fn len(&self) -> usize {
        Self::BASE_LENGTH + self.segments().iter().map(AsPathSegment::len).sum::<usize>()
    }

    fn write<T: Write>(&self, writer: &mut T) -> Result<(), AsPathWritingError> {
        for segment in self.segments() {
            segment.write(writer)?;
        }
        Ok(())
    }
}

impl WritablePdu<AsPathWritingError> for AsPathSegment {
    /// 1-octet segment type and 1-octet AS count
    const BASE_LENGTH: usize = 2;

    fn len(&self) -> usize {
        Self::BASE_LENGTH + self.as_numbers().len() * 4
    }

    fn write<T: Write>(&self, writer: &mut T) -> Result<(), AsPathWritingError> {
        let count = self.as_numbers().len();
        let count = u8::try_from(count)
            .map_err(|_| AsPathWritingError::SegmentLengthOverflow(count))?;
        writer.write_u8(self.segment_type().into())?;
        writer.write_u8(count)?;
        for asn in self.as_numbers() {
            writer.write_u32::<NetworkEndian>(*asn)?;
        }
        Ok(())
    }
}
