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
    capabilities::{BgpCapability, FourOctetAsCapability, MultiProtocolExtensionsCapability},
    community::Community,
    decode, decode_with_context, encode,
    error::BgpErrorKind,
    iana::{
        AsPathSegmentType, CeaseErrorSubCode, MessageHeaderErrorSubCode, OpenMessageErrorSubCode,
        OriginType, UndefinedBgpMessageType, UpdateMessageErrorSubCode, WellKnownCommunity,
    },
    notification::BgpNotificationMessage,
    open::{BgpOpenMessage, BgpOpenMessageParameter},
    path_attribute::*,
    route_refresh::BgpRouteRefreshMessage,
    update::{BgpUpdateMessage, Ipv4Prefix},
    wire::{
        deserializer::{
            BgpMessageParsingError, BgpParsingContext, LocatedBgpMessageParsingError,
        },
        serializer::{open::BgpOpenMessageWritingError, BgpMessageWritingError},
    },
    BgpMessage,
};
use bgp4_parse_utils::{
    test_helpers::{
        combine, test_parse_error_with_one_input, test_parsed_completely_with_one_input, test_write,
    },
    Span,
};
use rstest::rstest;
use std::net::Ipv4Addr;

mod notification;
mod open;

pub(crate) const BGP_MARKER: &[u8] = &[0xff; 16];
pub(crate) const MY_AS: &[u8] = &[0xfd, 0xe8];
pub(crate) const HOLD_TIME: &[u8] = &[0x00, 0xf0];
pub(crate) const BGP_ID: &[u8] = &[0x7f, 0x00, 0x00, 0x01];

/// A message with an arbitrary header, the length isn't checked against the body
fn message(length: u16, msg_type: u8, body: &[u8]) -> Vec<u8> {
    combine(vec![BGP_MARKER, &length.to_be_bytes(), &[msg_type], body])
}

/// Version, ASN, hold time and BGP id of an OPEN body
fn open_fixed_fields() -> Vec<u8> {
    combine(vec![&[0x04], MY_AS, HOLD_TIME, BGP_ID])
}

fn sample_messages() -> Vec<BgpMessage> {
    vec![
        BgpMessage::KeepAlive,
        BgpMessage::Open(BgpOpenMessage::new_with_asn(
            4_200_000_000,
            90,
            Ipv4Addr::new(192, 0, 2, 1),
            vec![BgpOpenMessageParameter::Capabilities(vec![
                BgpCapability::MultiProtocolExtensions(MultiProtocolExtensionsCapability::new(
                    1, 1,
                )),
                BgpCapability::RouteRefresh,
            ])],
        )),
        BgpMessage::Update(BgpUpdateMessage::new(
            vec![Ipv4Prefix::new(Ipv4Addr::new(10, 0, 0, 0), 8).unwrap()],
            vec![
                PathAttribute::with_default_flags(PathAttributeValue::Origin(Origin::from(
                    OriginType::Incomplete,
                ))),
                PathAttribute::with_default_flags(PathAttributeValue::AsPath(AsPath::new(vec![
                    AsPathSegment::new(AsPathSegmentType::AsSet, vec![65001, 65002]),
                ]))),
                PathAttribute::with_default_flags(PathAttributeValue::Communities(
                    Communities::new(vec![Community::from(WellKnownCommunity::NoAdvertise)]),
                )),
            ],
            vec![Ipv4Prefix::new(Ipv4Addr::new(198, 51, 100, 0), 24).unwrap()],
        )),
        BgpMessage::Notification(BgpNotificationMessage::from_kind(
            BgpErrorKind::Cease(CeaseErrorSubCode::AdministrativeReset),
            vec![],
        )),
        BgpMessage::RouteRefresh(BgpRouteRefreshMessage::new(1, 1)),
    ]
}

fn route_refresh_context() -> BgpParsingContext {
    BgpParsingContext::new(false, false, true)
}

#[test]
fn test_round_trip() -> Result<(), BgpMessageWritingError> {
    let ctx = route_refresh_context();
    for msg in sample_messages() {
        let wire = encode(&msg)?;
        let (decoded, consumed) = decode_with_context(&wire, &ctx).unwrap();
        assert_eq!(decoded, msg);
        assert_eq!(consumed, wire.len());
    }
    Ok(())
}

#[test]
fn test_header_length() -> Result<(), BgpMessageWritingError> {
    for msg in sample_messages() {
        let wire = encode(&msg)?;
        let length = u16::from_be_bytes([wire[16], wire[17]]);
        assert_eq!(length as usize, wire.len());
        assert!(length >= 19);
        assert_eq!(&wire[..16], BGP_MARKER);
    }
    Ok(())
}

#[test]
fn test_truncated_input() -> Result<(), BgpMessageWritingError> {
    let ctx = route_refresh_context();
    for msg in sample_messages() {
        let wire = encode(&msg)?;
        for n in 0..wire.len() {
            let err = decode_with_context(&wire[..n], &ctx).unwrap_err();
            assert_eq!(
                err.kind(),
                BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageLength),
                "truncated to {n} octets"
            );
        }
    }
    Ok(())
}

#[test]
fn test_decode_leaves_trailing_messages() -> Result<(), BgpMessageWritingError> {
    let keepalive = encode(&BgpMessage::KeepAlive)?;
    let notification = encode(&BgpMessage::Notification(BgpNotificationMessage::new(
        6,
        2,
        vec![],
    )))?;
    let stream = combine(vec![&keepalive, &notification]);

    let (first, consumed) = decode(&stream).unwrap();
    assert_eq!(first, BgpMessage::KeepAlive);
    assert_eq!(consumed, 19);
    let (second, consumed) = decode(&stream[consumed..]).unwrap();
    assert_eq!(
        second,
        BgpMessage::Notification(BgpNotificationMessage::new(6, 2, vec![]))
    );
    assert_eq!(consumed, 21);
    Ok(())
}

#[test]
fn test_decode_after_failure() -> Result<(), BgpMessageWritingError> {
    let bad = message(19, 9, &[]);
    let good = encode(&BgpMessage::KeepAlive)?;
    assert!(decode(&bad).is_err());
    assert_eq!(decode(&good).unwrap(), (BgpMessage::KeepAlive, 19));
    assert!(decode(&bad).is_err());
    assert_eq!(decode(&good).unwrap(), (BgpMessage::KeepAlive, 19));
    Ok(())
}

#[test]
fn test_marker_not_validated_by_default() {
    let wire = combine(vec![&[0u8; 16], &[0x00, 0x13, 0x04]]);
    assert_eq!(decode(&wire).unwrap(), (BgpMessage::KeepAlive, 19));
}

#[test]
fn test_marker_validation() {
    let wire = combine(vec![&[0u8; 16], &[0x00, 0x13, 0x04]]);
    let ctx = BgpParsingContext::new(false, true, false);
    let expected = LocatedBgpMessageParsingError::new(
        Span::new(&wire),
        BgpMessageParsingError::ConnectionNotSynchronized(0),
    );
    test_parse_error_with_one_input::<BgpMessage, &BgpParsingContext, _>(&wire, &ctx, &expected);

    let err = decode_with_context(&wire, &ctx).unwrap_err();
    assert_eq!(
        err.kind(),
        BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::ConnectionNotSynchronized)
    );
}

#[test]
fn test_undefined_message_type() {
    let wire = message(19, 7, &[]);
    let expected = LocatedBgpMessageParsingError::new(
        Span::with_offset(18, &wire[18..]),
        BgpMessageParsingError::UndefinedBgpMessageType(UndefinedBgpMessageType(7)),
    );
    test_parse_error_with_one_input::<BgpMessage, &BgpParsingContext, _>(
        &wire,
        &BgpParsingContext::default(),
        &expected,
    );

    let err = decode(&wire).unwrap_err();
    assert_eq!(err.diagnostic(), Some("UndefinedBgpMessageType(UndefinedBgpMessageType(7)) at offset 18"));
}

#[test]
fn test_bad_message_length_location() {
    let wire = message(4097, 4, &[]);
    let expected = LocatedBgpMessageParsingError::new(
        Span::with_offset(16, &wire[16..]),
        BgpMessageParsingError::BadMessageLength(4097),
    );
    test_parse_error_with_one_input::<BgpMessage, &BgpParsingContext, _>(
        &wire,
        &BgpParsingContext::default(),
        &expected,
    );
}

#[rstest]
#[case::short_buffer(
    vec![0xff; 10],
    BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageLength),
    vec![]
)]
#[case::length_below_header(
    message(18, 4, &[]),
    BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageLength),
    vec![0x00, 0x12]
)]
#[case::length_above_max(
    message(4097, 4, &[]),
    BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageLength),
    vec![0x10, 0x01]
)]
#[case::buffer_shorter_than_length(
    message(30, 4, &[]),
    BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageLength),
    vec![0x00, 0x1e]
)]
#[case::undefined_type(
    message(19, 7, &[]),
    BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageType),
    vec![7]
)]
#[case::route_refresh_not_enabled(
    message(23, 5, &[0x00, 0x01, 0x00, 0x01]),
    BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageType),
    vec![5]
)]
#[case::keepalive_with_body(
    message(20, 4, &[0x00]),
    BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageLength),
    vec![0x00, 0x14]
)]
#[case::open_too_short(
    message(28, 1, &[0x04, 0xfd, 0xe8, 0x00, 0xf0, 0x7f, 0x00, 0x00, 0x01]),
    BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageLength),
    vec![0x00, 0x1c]
)]
#[case::notification_too_short(
    message(20, 3, &[0x06]),
    BgpErrorKind::MessageHeaderError(MessageHeaderErrorSubCode::BadMessageLength),
    vec![0x00, 0x14]
)]
#[case::open_unsupported_version(
    message(29, 1, &[0x03, 0xfd, 0xe8, 0x00, 0xf0, 0x7f, 0x00, 0x00, 0x01, 0x00]),
    BgpErrorKind::OpenMessageError(OpenMessageErrorSubCode::UnsupportedVersionNumber),
    vec![0x00, 0x04]
)]
#[case::open_trailing_octets(
    message(30, 1, &[0x04, 0xfd, 0xe8, 0x00, 0xf0, 0x7f, 0x00, 0x00, 0x01, 0x00, 0xff]),
    BgpErrorKind::OpenMessageError(OpenMessageErrorSubCode::Unspecific),
    vec![]
)]
#[case::open_params_past_body(
    message(29, 1, &[0x04, 0xfd, 0xe8, 0x00, 0xf0, 0x7f, 0x00, 0x00, 0x01, 0x05]),
    BgpErrorKind::OpenMessageError(OpenMessageErrorSubCode::Unspecific),
    vec![]
)]
#[case::open_param_past_params_length(
    message(33, 1, &combine(vec![&open_fixed_fields(), &[0x04, 0x02, 0x05, 0x02, 0x00]])),
    BgpErrorKind::OpenMessageError(OpenMessageErrorSubCode::UnsupportedOptionalParameter),
    vec![]
)]
#[case::open_undefined_param_type(
    message(31, 1, &combine(vec![&open_fixed_fields(), &[0x02, 0x01, 0x00]])),
    BgpErrorKind::OpenMessageError(OpenMessageErrorSubCode::UnsupportedOptionalParameter),
    vec![]
)]
#[case::open_bad_capability_length(
    message(35, 1, &combine(vec![&open_fixed_fields(), &[0x06, 0x02, 0x04, 0x41, 0x02, 0x00, 0x01]])),
    BgpErrorKind::OpenMessageError(OpenMessageErrorSubCode::UnsupportedOptionalParameter),
    vec![]
)]
#[case::update_withdrawn_past_body(
    message(23, 2, &[0x00, 0x05, 0x00, 0x00]),
    BgpErrorKind::UpdateMessageError(UpdateMessageErrorSubCode::MalformedAttributeList),
    vec![]
)]
#[case::update_attributes_past_body(
    message(23, 2, &[0x00, 0x00, 0x00, 0x0a]),
    BgpErrorKind::UpdateMessageError(UpdateMessageErrorSubCode::MalformedAttributeList),
    vec![]
)]
#[case::update_prefix_too_long(
    message(24, 2, &[0x00, 0x01, 0x21, 0x00, 0x00]),
    BgpErrorKind::UpdateMessageError(UpdateMessageErrorSubCode::InvalidNetworkField),
    vec![]
)]
#[case::update_nlri_past_body(
    message(25, 2, &[0x00, 0x00, 0x00, 0x00, 0x18, 0x0a]),
    BgpErrorKind::UpdateMessageError(UpdateMessageErrorSubCode::InvalidNetworkField),
    vec![]
)]
#[case::update_origin_length(
    message(28, 2, &[0x00, 0x00, 0x00, 0x05, 0x40, 0x01, 0x02, 0x00, 0x00]),
    BgpErrorKind::UpdateMessageError(UpdateMessageErrorSubCode::AttributeLengthError),
    vec![]
)]
#[case::update_next_hop_past_section(
    message(28, 2, &[0x00, 0x00, 0x00, 0x05, 0x40, 0x03, 0x04, 0x0a, 0x00]),
    BgpErrorKind::UpdateMessageError(UpdateMessageErrorSubCode::MalformedAttributeList),
    vec![]
)]
#[case::update_as_path_segment_overrun(
    message(30, 2, &[0x00, 0x00, 0x00, 0x07, 0x40, 0x02, 0x04, 0x02, 0x02, 0x00, 0x00]),
    BgpErrorKind::UpdateMessageError(UpdateMessageErrorSubCode::MalformedAsPath),
    vec![]
)]
#[case::update_as_path_past_section(
    message(26, 2, &[0x00, 0x00, 0x00, 0x03, 0x40, 0x02, 0x08]),
    BgpErrorKind::UpdateMessageError(UpdateMessageErrorSubCode::MalformedAttributeList),
    vec![]
)]
#[case::open_param_past_short_params_length(
    message(31, 1, &combine(vec![&open_fixed_fields(), &[0x02, 0x02, 0x05]])),
    BgpErrorKind::OpenMessageError(OpenMessageErrorSubCode::UnsupportedOptionalParameter),
    vec![]
)]
#[case::update_communities_length(
    message(29, 2, &[0x00, 0x00, 0x00, 0x06, 0xc0, 0x08, 0x03, 0xff, 0xff, 0xff]),
    BgpErrorKind::UpdateMessageError(UpdateMessageErrorSubCode::AttributeLengthError),
    vec![]
)]
fn test_error_mapping(
    #[case] wire: Vec<u8>,
    #[case] kind: BgpErrorKind,
    #[case] data: Vec<u8>,
) {
    let err = decode(&wire).unwrap_err();
    assert_eq!(err.kind(), kind);
    assert_eq!(err.data(), &data);

    let notification = BgpNotificationMessage::from(&err);
    assert_eq!(notification.code(), u8::from(kind.code()));
    assert_eq!(notification.subcode(), kind.subcode());
    assert_eq!(notification.data(), &data);
    assert_eq!(notification.error_kind(), Some(kind));
}

#[test]
fn test_error_to_notification_message() -> Result<(), BgpMessageWritingError> {
    let wire = message(
        29,
        1,
        &[0x03, 0xfd, 0xe8, 0x00, 0xf0, 0x7f, 0x00, 0x00, 0x01, 0x00],
    );
    let err = decode(&wire).unwrap_err();
    let notification = BgpMessage::Notification(err.into());
    let expected = combine(vec![
        BGP_MARKER,
        &[0x00, 0x17, 0x03, 0x02, 0x01, 0x00, 0x04],
    ]);
    test_write(&notification, &expected)?;
    Ok(())
}

#[test]
fn test_message_length_overflow() {
    let nlri = (0..1100u32)
        .map(|i| Ipv4Prefix::new(Ipv4Addr::from(0x0a00_0000 + (i << 8)), 32).unwrap())
        .collect();
    let msg = BgpMessage::Update(BgpUpdateMessage::new(vec![], vec![], nlri));
    assert_eq!(
        encode(&msg),
        Err(BgpMessageWritingError::BgpMessageLengthOverflow(19 + 4 + 1100 * 5))
    );
}

#[test]
fn test_open_parameters_overflow() {
    let capabilities = (0..60)
        .map(|asn| BgpCapability::FourOctetAs(FourOctetAsCapability::new(asn)))
        .collect();
    let msg = BgpMessage::Open(BgpOpenMessage::new(
        65000,
        180,
        Ipv4Addr::LOCALHOST,
        vec![BgpOpenMessageParameter::Capabilities(capabilities)],
    ));
    assert_eq!(
        encode(&msg),
        Err(BgpMessageWritingError::OpenError(
            BgpOpenMessageWritingError::ParametersLengthOverflow(362)
        ))
    );
}

#[test]
fn test_parsing_context() {
    let ctx = BgpParsingContext::default();
    assert!(!ctx.keep_unrecognized_capabilities());
    assert!(!ctx.validate_marker());
    assert!(!ctx.route_refresh());

    let mut ctx = ctx;
    ctx.update_capabilities(&BgpCapability::FourOctetAs(FourOctetAsCapability::new(1)));
    assert!(!ctx.route_refresh());
    ctx.update_capabilities(&BgpCapability::RouteRefresh);
    assert!(ctx.route_refresh());

    ctx.set_validate_marker(true);
    ctx.set_keep_unrecognized_capabilities(true);
    assert_eq!(ctx, BgpParsingContext::new(true, true, true));
}

#[test]
fn test_parsing_context_serde() {
    let ctx: BgpParsingContext = serde_json::from_str("{}").unwrap();
    assert_eq!(ctx, BgpParsingContext::default());

    let ctx: BgpParsingContext = serde_json::from_str(r#"{"route_refresh": true}"#).unwrap();
    assert_eq!(ctx, route_refresh_context());

    let json = serde_json::to_string(&ctx).unwrap();
    assert_eq!(serde_json::from_str::<BgpParsingContext>(&json).unwrap(), ctx);
}

#[test]
fn test_message_serde() {
    for msg in sample_messages() {
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: BgpMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }
}

#[test]
fn test_decode_with_explicit_context() {
    let wire = message(23, 5, &[0x00, 0x02, 0x00, 0x80]);
    test_parsed_completely_with_one_input(
        &wire,
        &route_refresh_context(),
        &BgpMessage::RouteRefresh(BgpRouteRefreshMessage::new(2, 128)),
    );
}
