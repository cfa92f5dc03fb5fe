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

//! Serializer for the capabilities advertised in BGP Open Messages

use crate::{
    capabilities::*,
    iana::BgpCapabilityCode,
    wire::{
        FOUR_OCTET_AS_CAPABILITY_LENGTH, GRACEFUL_RESTART_ADDRESS_FAMILY_LENGTH,
        GRACEFUL_RESTART_HEADER_LENGTH, MULTI_PROTOCOL_EXTENSIONS_CAPABILITY_LENGTH,
        ROUTE_REFRESH_CAPABILITY_LENGTH,
    },
};
use bgp4_parse_utils::WritablePdu;
use bgp4_serde_macros::WritingError;
use byteorder::{NetworkEndian, WriteBytesExt};
use std::io::Write;

const GRACEFUL_RESTART_RESTART_BIT: u16 = 0x8000;
const GRACEFUL_RESTART_NOTIFICATION_BIT: u16 = 0x4000;
const GRACEFUL_RESTART_FORWARDING_STATE_BIT: u8 = 0x80;

#[derive(WritingError, Eq, PartialEq, Clone, Debug)]
pub enum BgpCapabilityWritingError {
    StdIOError(#[from_std_io_error] String),
    /// Capability value doesn't fit the 1-octet length field
    CapabilityLengthOverflow(usize),
    /// [`UnrecognizedCapability`] carrying a code that has its own variant
    KnownCapabilityCode(u8),
    FourOctetAsCapabilityError(#[from] FourOctetAsCapabilityWritingError),
    MultiProtocolExtensionsCapabilityError(#[from] MultiProtocolExtensionsCapabilityWritingError),
    GracefulRestartCapabilityError(#[from] GracefulRestartCapabilityWritingError),
}

impl WritablePdu<BgpCapabilityWritingError> for BgpCapability {
    // 1-octet length and 1-octet capability type
    const BASE_LENGTH: usize = 2;

    fn len(&self) -> usize {
        let value_len = match self {
            Self::MultiProtocolExtensions(value) => value.len(),
            Self::RouteRefresh => ROUTE_REFRESH_CAPABILITY_LENGTH as usize,
            Self::GracefulRestart(value) => value.len(),
            Self::FourOctetAs(value) => value.len(),
            Self::Unrecognized(value) => value.value().len(),
        };
        Self::BASE_LENGTH + value_len
    }

    fn write<T: Write>(&self, writer: &mut T) -> Result<(), BgpCapabilityWritingError> {
        if let Self::Unrecognized(value) = self {
            if BgpCapabilityCode::try_from(value.code()).is_ok() {
                return Err(BgpCapabilityWritingError::KnownCapabilityCode(value.code()));
            }
        }
        let value_len = self.len() - Self::BASE_LENGTH;
        let len = u8::try_from(value_len)
            .map_err(|_| BgpCapabilityWritingError::CapabilityLengthOverflow(value_len))?;
        writer.write_u8(self.raw_code())?;
        writer.write_u8(len)?;
        match self {
            Self::MultiProtocolExtensions(value) => value.write(writer)?,
            Self::RouteRefresh => {}
            Self::GracefulRestart(value) => value.write(writer)?,
            Self::FourOctetAs(value) => value.write(writer)?,
            Self::Unrecognized(value) => writer.write_all(value.value())?,
        }
        Ok(())
    }
}

#[derive(WritingError, Eq, PartialEq, Clone, Debug)]
pub enum FourOctetAsCapabilityWritingError {
    StdIOError(#[from_std_io_error] String),
}

impl WritablePdu<FourOctetAsCapabilityWritingError> for FourOctetAsCapability {
    const BASE_LENGTH: usize = FOUR_OCTET_AS_CAPABILITY_LENGTH as usize;

    fn len(&self) -> usize {
        Self::BASE_LENGTH
    }

    fn write<T: Write>(&self, writer: &mut T) -> Result<(), FourOctetAsCapabilityWritingError> {
        writer.write_u32::<NetworkEndian>(self.asn4())?;
        Ok(())
    }
}

#[derive(WritingError, Eq, PartialEq, Clone, Debug)]
pub enum MultiProtocolExtensionsCapabilityWritingError {
    StdIOError(#[from_std_io_error] String),
}

impl WritablePdu<MultiProtocolExtensionsCapabilityWritingError>
    for MultiProtocolExtensionsCapability
{
    const BASE_LENGTH: usize = MULTI_PROTOCOL_EXTENSIONS_CAPABILITY_LENGTH as usize;

    fn len(&self) -> usize {
        Self::BASE_LENGTH
    }

    fn write<T: Write>(
        &self,
        writer: &mut T,
    ) -> Result<(), MultiProtocolExtensionsCapabilityWritingError> {
        writer.write_u16::<NetworkEndian>(self.afi())?;
        writer.write_u8(0)?;
        writer.write_u8(self.safi())?;
        Ok(())
    }
}

#[derive(WritingError, Eq, PartialEq, Clone, Debug)]
pub enum GracefulRestartCapabilityWritingError {
    StdIOError(#[from_std_io_error] String),
}

impl WritablePdu<GracefulRestartCapabilityWritingError> for GracefulRestartCapability {
    const BASE_LENGTH: usize = GRACEFUL_RESTART_HEADER_LENGTH as usize;

    fn len(&self) -> usize {
        Self::BASE_LENGTH
            + self.address_families().len() * GRACEFUL_RESTART_ADDRESS_FAMILY_LENGTH as usize
    }

    fn write<T: Write>(&self, writer: &mut T) -> Result<(), GracefulRestartCapabilityWritingError> {
        let mut header = self.time() & GracefulRestartCapability::MAX_TIME;
        if self.restart() {
            header |= GRACEFUL_RESTART_RESTART_BIT;
        }
        if self.graceful_notification() {
            header |= GRACEFUL_RESTART_NOTIFICATION_BIT;
        }
        writer.write_u16::<NetworkEndian>(header)?;
        for address_family in self.address_families() {
            writer.write_u16::<NetworkEndian>(address_family.afi())?;
            writer.write_u8(address_family.safi())?;
            let flags = if address_family.forwarding_state() {
                GRACEFUL_RESTART_FORWARDING_STATE_BIT
            } else {
                0
            };
            writer.write_u8(flags)?;
        }
        Ok(())
    }
}
