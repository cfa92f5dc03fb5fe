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

use crate::{
    error::{BgpError, BgpErrorKind},
    iana::{
        BgpErrorNotificationCode, CeaseErrorSubCode, FiniteStateMachineErrorSubCode,
        MessageHeaderErrorSubCode, OpenMessageErrorSubCode, UpdateMessageErrorSubCode,
    },
    notification::BgpNotificationMessage,
    wire::{
        deserializer::BgpParsingContext,
        serializer::{notification::BgpNotificationMessageWritingError, BgpMessageWritingError},
        tests::BGP_MARKER,
    },
    BgpMessage,
};
use bgp4_parse_utils::test_helpers::{
    combine, test_parsed_completely, test_parsed_completely_with_one_input, test_write,
};
use rstest::rstest;

#[test]
fn test_cease() -> Result<(), BgpMessageWritingError> {
    let good_wire = combine(vec![BGP_MARKER, &[0x00, 0x15, 0x03, 0x06, 0x02]]);
    let good = BgpMessage::Notification(BgpNotificationMessage::from_kind(
        BgpErrorKind::Cease(CeaseErrorSubCode::AdministrativeShutdown),
        vec![],
    ));

    test_parsed_completely_with_one_input(&good_wire, &BgpParsingContext::default(), &good);
    test_write(&good, &good_wire)?;
    Ok(())
}

#[test]
fn test_notification_with_data() -> Result<(), BgpNotificationMessageWritingError> {
    let good_wire = [0x02, 0x01, 0x00, 0x04];
    let good = BgpNotificationMessage::new(2, 1, vec![0x00, 0x04]);

    test_parsed_completely(&good_wire, &good);
    test_write(&good, &good_wire)?;
    assert_eq!(
        good.error_kind(),
        Some(BgpErrorKind::OpenMessageError(
            OpenMessageErrorSubCode::UnsupportedVersionNumber
        ))
    );
    Ok(())
}

#[test]
fn test_notification_unregistered_values() -> Result<(), BgpNotificationMessageWritingError> {
    let good_wire = [0x07, 0x63, 0xaa];
    let unknown_subcode_wire = [0x01, 0x09];
    let good = BgpNotificationMessage::new(7, 0x63, vec![0xaa]);
    let unknown_subcode = BgpNotificationMessage::new(1, 9, vec![]);

    test_parsed_completely(&good_wire, &good);
    test_parsed_completely(&unknown_subcode_wire, &unknown_subcode);
    test_write(&good, &good_wire)?;
    assert_eq!(good.error_kind(), None);
    assert_eq!(unknown_subcode.error_kind(), None);
    Ok(())
}

#[rstest]
#[case(
    BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageType),
    1,
    3
)]
#[case(
    BgpErrorKind::UpdateMessageError(UpdateMessageErrorSubCode::MalformedAsPath),
    3,
    11
)]
#[case(BgpErrorKind::HoldTimerExpired, 4, 0)]
#[case(
    BgpErrorKind::FiniteStateMachineError(FiniteStateMachineErrorSubCode::Unspecific),
    5,
    0
)]
#[case(BgpErrorKind::Cease(CeaseErrorSubCode::HardReset), 6, 9)]
fn test_error_kind_codes(#[case] kind: BgpErrorKind, #[case] code: u8, #[case] subcode: u8) {
    assert_eq!(u8::from(kind.code()), code);
    assert_eq!(kind.subcode(), subcode);
    assert_eq!(BgpErrorKind::from_raw(code, subcode), Some(kind));

    let notification = BgpNotificationMessage::from(BgpError::from(kind));
    assert_eq!(notification.code(), code);
    assert_eq!(notification.subcode(), subcode);
    assert!(notification.data().is_empty());
}

#[test]
fn test_error_display() {
    let err = BgpError::new(
        BgpErrorKind::UpdateMessageError(UpdateMessageErrorSubCode::AttributeLengthError),
        vec![],
    );
    assert_eq!(err.code(), u8::from(BgpErrorNotificationCode::UpdateMessageError));
    assert_eq!(err.diagnostic(), None);
    let plain = err.to_string();
    let detailed = err.with_diagnostic("ORIGIN length 2").to_string();
    assert!(detailed.starts_with(&plain));
    assert!(detailed.contains("ORIGIN length 2"));
}
