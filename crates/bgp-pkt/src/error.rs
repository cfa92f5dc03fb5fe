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

//! The (code, subcode) error taxonomy of
//! [RFC4271 Section 4.5](https://datatracker.ietf.org/doc/html/rfc4271#section-4.5).
//!
//! Decoding failures are reported as [`BgpError`], which maps one to one onto
//! the NOTIFICATION a speaker sends before closing the session. The hold timer,
//! FSM and cease kinds are never raised by the codec but are representable so
//! a session can build its own NOTIFICATIONs from the same type.

use crate::{
    iana::{
        BgpErrorNotificationCode, CeaseErrorSubCode, FiniteStateMachineErrorSubCode,
        MessageHeaderErrorSubCode, OpenMessageErrorSubCode, UpdateMessageErrorSubCode,
    },
    notification::BgpNotificationMessage,
};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BgpErrorKind {
    #[error("Message Header Error ({0})")]
    MessageHeaderError(MessageHeaderErrorSubCode),

    #[error("OPEN Message Error ({0})")]
    OpenMessageError(OpenMessageErrorSubCode),

    #[error("UPDATE Message Error ({0})")]
    UpdateMessageError(UpdateMessageErrorSubCode),

    #[error("Hold Timer Expired")]
    HoldTimerExpired,

    #[error("Finite State Machine Error ({0})")]
    FiniteStateMachineError(FiniteStateMachineErrorSubCode),

    #[error("Cease ({0})")]
    Cease(CeaseErrorSubCode),
}

impl BgpErrorKind {
    pub const fn code(&self) -> BgpErrorNotificationCode {
        match self {
            Self::MessageHeaderError(_) => BgpErrorNotificationCode::MessageHeaderError,
            Self::OpenMessageError(_) => BgpErrorNotificationCode::OpenMessageError,
            Self::UpdateMessageError(_) => BgpErrorNotificationCode::UpdateMessageError,
            Self::HoldTimerExpired => BgpErrorNotificationCode::HoldTimerExpired,
            Self::FiniteStateMachineError(_) => BgpErrorNotificationCode::FiniteStateMachineError,
            Self::Cease(_) => BgpErrorNotificationCode::Cease,
        }
    }

    /// Raw subcode, zero for kinds without one
    pub fn subcode(&self) -> u8 {
        match self {
            Self::MessageHeaderError(sub) => (*sub).into(),
            Self::OpenMessageError(sub) => (*sub).into(),
            Self::UpdateMessageError(sub) => (*sub).into(),
            Self::HoldTimerExpired => 0,
            Self::FiniteStateMachineError(sub) => (*sub).into(),
            Self::Cease(sub) => (*sub).into(),
        }
    }

    /// Interpret a raw (code, subcode) pair. `None` when either value isn't
    /// registered. The subcode of Hold Timer Expired is ignored.
    pub fn from_raw(code: u8, subcode: u8) -> Option<Self> {
        let kind = match BgpErrorNotificationCode::try_from(code).ok()? {
            BgpErrorNotificationCode::MessageHeaderError => {
                Self::MessageHeaderError(MessageHeaderErrorSubCode::try_from(subcode).ok()?)
            }
            BgpErrorNotificationCode::OpenMessageError => {
                Self::OpenMessageError(OpenMessageErrorSubCode::try_from(subcode).ok()?)
            }
            BgpErrorNotificationCode::UpdateMessageError => {
                Self::UpdateMessageError(UpdateMessageErrorSubCode::try_from(subcode).ok()?)
            }
            BgpErrorNotificationCode::HoldTimerExpired => Self::HoldTimerExpired,
            BgpErrorNotificationCode::FiniteStateMachineError => Self::FiniteStateMachineError(
                FiniteStateMachineErrorSubCode::try_from(subcode).ok()?,
            ),
            BgpErrorNotificationCode::Cease => {
                Self::Cease(CeaseErrorSubCode::try_from(subcode).ok()?)
            }
        };
        Some(kind)
    }
}

fn diagnostic_suffix(diagnostic: &Option<String>) -> String {
    match diagnostic {
        Some(text) => format!(": {text}"),
        None => String::new(),
    }
}

/// A protocol error: the (code, subcode) pair, the NOTIFICATION data octets
/// and optional human readable context.
///
/// `data` follows RFC4271 Section 6 where the codec knows it, e.g. the
/// offending length for `BadMessageLength` or the largest supported version
/// for `UnsupportedVersionNumber`. Otherwise it is empty.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind}{}", diagnostic_suffix(.diagnostic))]
pub struct BgpError {
    kind: BgpErrorKind,
    data: Vec<u8>,
    diagnostic: Option<String>,
}

impl BgpError {
    pub const fn new(kind: BgpErrorKind, data: Vec<u8>) -> Self {
        Self {
            kind,
            data,
            diagnostic: None,
        }
    }

    pub fn with_diagnostic(self, diagnostic: impl Into<String>) -> Self {
        Self {
            diagnostic: Some(diagnostic.into()),
            ..self
        }
    }

    pub const fn kind(&self) -> BgpErrorKind {
        self.kind
    }

    pub fn code(&self) -> u8 {
        self.kind.code().into()
    }

    pub fn subcode(&self) -> u8 {
        self.kind.subcode()
    }

    pub const fn data(&self) -> &Vec<u8> {
        &self.data
    }

    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }
}

impl From<BgpErrorKind> for BgpError {
    fn from(kind: BgpErrorKind) -> Self {
        Self::new(kind, vec![])
    }
}

impl From<&BgpError> for BgpNotificationMessage {
    fn from(error: &BgpError) -> Self {
        BgpNotificationMessage::new(error.code(), error.subcode(), error.data.clone())
    }
}

impl From<BgpError> for BgpNotificationMessage {
    fn from(error: BgpError) -> Self {
        BgpNotificationMessage::new(error.code(), error.subcode(), error.data)
    }
}
