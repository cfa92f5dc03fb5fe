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

//! Serializer library for BGP's wire protocol

pub mod capabilities;
pub mod nlri;
pub mod notification;
pub mod open;
pub mod path_attribute;
pub mod route_refresh;
pub mod update;

use crate::{
    wire::{
        deserializer::{BGP_MAX_MESSAGE_LENGTH, BGP_MIN_MESSAGE_LENGTH},
        serializer::{
            notification::BgpNotificationMessageWritingError, open::BgpOpenMessageWritingError,
            route_refresh::BgpRouteRefreshMessageWritingError,
            update::BgpUpdateMessageWritingError,
        },
    },
    BgpMessage,
};
use bgp4_parse_utils::WritablePdu;
use bgp4_serde_macros::WritingError;
use byteorder::{NetworkEndian, WriteBytesExt};

/// Authentication isn't supported, so the marker is always all ones
pub(crate) const BGP_MARKER: u128 = u128::MAX;

#[derive(WritingError, Eq, PartialEq, Clone, Debug)]
pub enum BgpMessageWritingError {
    /// The size of written message is larger than the 4,096 octets allowed
    /// by RFC4271
    BgpMessageLengthOverflow(usize),

    StdIOError(#[from_std_io_error] String),

    /// Error encountered during writing a [crate::open::BgpOpenMessage]
    OpenError(#[from] BgpOpenMessageWritingError),

    /// Error encountered during writing a [crate::update::BgpUpdateMessage]
    UpdateError(#[from] BgpUpdateMessageWritingError),

    NotificationError(#[from] BgpNotificationMessageWritingError),

    RouteRefreshError(#[from] BgpRouteRefreshMessageWritingError),
}

impl WritablePdu<BgpMessageWritingError> for BgpMessage {
    const BASE_LENGTH: usize = BGP_MIN_MESSAGE_LENGTH as usize;

    fn len(&self) -> usize {
        let body_len = match self {
            Self::Open(open) => open.len(),
            Self::Update(update) => update.len(),
            Self::Notification(notification) => notification.len(),
            Self::KeepAlive => 0,
            Self::RouteRefresh(route_refresh) => route_refresh.len(),
        };
        Self::BASE_LENGTH + body_len
    }

    fn write<T: std::io::Write>(&self, writer: &mut T) -> Result<(), BgpMessageWritingError> {
        let len = self.len();
        if len > BGP_MAX_MESSAGE_LENGTH as usize {
            return Err(BgpMessageWritingError::BgpMessageLengthOverflow(len));
        }
        writer.write_all(&BGP_MARKER.to_be_bytes())?;
        writer.write_u16::<NetworkEndian>(len as u16)?;
        writer.write_u8(self.get_type().into())?;
        match self {
            Self::Open(open) => open.write(writer)?,
            Self::Update(update) => update.write(writer)?,
            Self::Notification(notification) => notification.write(writer)?,
            Self::KeepAlive => {}
            Self::RouteRefresh(route_refresh) => route_refresh.write(writer)?,
        }
        Ok(())
    }
}
