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
    capabilities::{
        BgpCapability, FourOctetAsCapability, MultiProtocolExtensionsCapability,
        UnrecognizedCapability,
    },
    iana::UndefinedBgpOpenMessageParameterType,
    open::{BgpOpenMessage, BgpOpenMessageParameter, AS_TRANS},
    wire::{
        deserializer::{
            capabilities::BgpCapabilityParsingError,
            open::{
                BgpOpenMessageParsingError, BgpParameterParsingError,
                LocatedBgpOpenMessageParsingError,
            },
            BgpParsingContext,
        },
        serializer::{open::BgpOpenMessageWritingError, BgpMessageWritingError},
        tests::{BGP_ID, BGP_MARKER, HOLD_TIME, MY_AS},
    },
    BgpMessage,
};
use bgp4_parse_utils::{
    test_helpers::{
        combine, test_parse_error_with_one_input, test_parsed_completely_with_one_input,
        test_write,
    },
    Span,
};
use nom::error::ErrorKind;
use std::net::Ipv4Addr;

#[test]
fn test_open_no_params() -> Result<(), BgpOpenMessageWritingError> {
    let good_wire = combine(vec![&[0x04], MY_AS, HOLD_TIME, BGP_ID, &[0x00]]);
    let good = BgpOpenMessage::new(65000, 240, Ipv4Addr::new(127, 0, 0, 1), vec![]);

    test_parsed_completely_with_one_input(&good_wire, &BgpParsingContext::default(), &good);
    test_write(&good, &good_wire)?;
    assert_eq!(good.version(), 4);
    assert_eq!(good.asn4(), 65000);
    Ok(())
}

#[test]
fn test_open_message() -> Result<(), BgpMessageWritingError> {
    let good_wire = combine(vec![
        BGP_MARKER,
        &[0x00, 0x1d, 0x01],
        &[0x04],
        MY_AS,
        HOLD_TIME,
        BGP_ID,
        &[0x00],
    ]);
    let good = BgpMessage::Open(BgpOpenMessage::new(
        65000,
        240,
        Ipv4Addr::new(127, 0, 0, 1),
        vec![],
    ));

    test_parsed_completely_with_one_input(&good_wire, &BgpParsingContext::default(), &good);
    test_write(&good, &good_wire)?;
    Ok(())
}

#[test]
fn test_open_with_capabilities() -> Result<(), BgpMessageWritingError> {
    let good_wire = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0x00, 0x2d, 0x01, 0x04, 0xfd, 0xe8, 0x00, 0xf0, 0xb0, 0x3a, 0x77, 0x36, 0x10, 0x02,
        0x0e, 0x01, 0x04, 0x00, 0x01, 0x00, 0x01, 0x02, 0x00, 0x41, 0x04, 0x00, 0x00, 0xfd, 0xe8,
    ];
    let good = BgpMessage::Open(BgpOpenMessage::new(
        65000,
        240,
        Ipv4Addr::new(176, 58, 119, 54),
        vec![BgpOpenMessageParameter::Capabilities(vec![
            BgpCapability::MultiProtocolExtensions(MultiProtocolExtensionsCapability::new(1, 1)),
            BgpCapability::RouteRefresh,
            BgpCapability::FourOctetAs(FourOctetAsCapability::new(65000)),
        ])],
    ));

    test_parsed_completely_with_one_input(&good_wire, &BgpParsingContext::default(), &good);
    test_write(&good, &good_wire)?;
    Ok(())
}

#[test]
fn test_open_wrong_version() {
    let bad_wire = combine(vec![&[0x05], MY_AS, HOLD_TIME, BGP_ID, &[0x00]]);
    let bad = LocatedBgpOpenMessageParsingError::new(
        Span::new(&bad_wire),
        BgpOpenMessageParsingError::UnsupportedVersionNumber(5),
    );
    test_parse_error_with_one_input::<BgpOpenMessage, &BgpParsingContext, _>(
        &bad_wire,
        &BgpParsingContext::default(),
        &bad,
    );
}

#[test]
fn test_open_bad_route_refresh_length() {
    let bad_wire = combine(vec![
        &[0x04],
        MY_AS,
        HOLD_TIME,
        BGP_ID,
        &[0x04, 0x02, 0x02, 0x02, 0x01],
    ]);
    let bad = LocatedBgpOpenMessageParsingError::new(
        Span::with_offset(13, &bad_wire[13..]),
        BgpOpenMessageParsingError::ParameterError(BgpParameterParsingError::CapabilityError(
            BgpCapabilityParsingError::InvalidRouteRefreshLength(1),
        )),
    );
    test_parse_error_with_one_input::<BgpOpenMessage, &BgpParsingContext, _>(
        &bad_wire,
        &BgpParsingContext::default(),
        &bad,
    );
}

#[test]
fn test_open_undefined_parameter_type() {
    let bad_wire = combine(vec![&[0x04], MY_AS, HOLD_TIME, BGP_ID, &[0x02, 0x01, 0x00]]);
    let bad = LocatedBgpOpenMessageParsingError::new(
        Span::with_offset(10, &bad_wire[10..]),
        BgpOpenMessageParsingError::ParameterError(
            BgpParameterParsingError::UndefinedParameterType(
                UndefinedBgpOpenMessageParameterType(1),
            ),
        ),
    );
    test_parse_error_with_one_input::<BgpOpenMessage, &BgpParsingContext, _>(
        &bad_wire,
        &BgpParsingContext::default(),
        &bad,
    );
}

#[test]
fn test_open_parameter_past_params_length() {
    let bad_wire = combine(vec![&[0x04], MY_AS, HOLD_TIME, BGP_ID, &[0x02, 0x02, 0x05]]);
    let bad = LocatedBgpOpenMessageParsingError::new(
        Span::with_offset(12, &bad_wire[12..]),
        BgpOpenMessageParsingError::ParameterError(BgpParameterParsingError::NomError(
            ErrorKind::Eof,
        )),
    );
    test_parse_error_with_one_input::<BgpOpenMessage, &BgpParsingContext, _>(
        &bad_wire,
        &BgpParsingContext::default(),
        &bad,
    );
}

#[test]
fn test_open_params_past_body() {
    let bad_wire = combine(vec![&[0x04], MY_AS, HOLD_TIME, BGP_ID, &[0x05, 0x02]]);
    let bad = LocatedBgpOpenMessageParsingError::new(
        Span::with_offset(10, &bad_wire[10..]),
        BgpOpenMessageParsingError::NomError(ErrorKind::Eof),
    );
    test_parse_error_with_one_input::<BgpOpenMessage, &BgpParsingContext, _>(
        &bad_wire,
        &BgpParsingContext::default(),
        &bad,
    );
}

#[test]
fn test_open_unrecognized_capability() -> Result<(), BgpOpenMessageWritingError> {
    let wire = combine(vec![
        &[0x04],
        MY_AS,
        HOLD_TIME,
        BGP_ID,
        &[0x0d, 0x02, 0x0b],
        &[0x63, 0x03, 0xaa, 0xbb, 0xcc],
        &[0x41, 0x04, 0x00, 0x00, 0xfd, 0xe8],
    ]);
    let skipped = BgpOpenMessage::new(
        65000,
        240,
        Ipv4Addr::new(127, 0, 0, 1),
        vec![BgpOpenMessageParameter::Capabilities(vec![
            BgpCapability::FourOctetAs(FourOctetAsCapability::new(65000)),
        ])],
    );
    let kept = BgpOpenMessage::new(
        65000,
        240,
        Ipv4Addr::new(127, 0, 0, 1),
        vec![BgpOpenMessageParameter::Capabilities(vec![
            BgpCapability::Unrecognized(UnrecognizedCapability::new(0x63, vec![0xaa, 0xbb, 0xcc])),
            BgpCapability::FourOctetAs(FourOctetAsCapability::new(65000)),
        ])],
    );
    let keep_ctx = BgpParsingContext::new(true, false, false);

    test_parsed_completely_with_one_input(&wire, &BgpParsingContext::default(), &skipped);
    test_parsed_completely_with_one_input(&wire, &keep_ctx, &kept);
    test_write(&kept, &wire)?;
    Ok(())
}

#[test]
fn test_open_multiple_parameters() -> Result<(), BgpOpenMessageWritingError> {
    let good_wire = combine(vec![
        &[0x04],
        MY_AS,
        HOLD_TIME,
        BGP_ID,
        &[0x0c],
        &[0x02, 0x06, 0x01, 0x04, 0x00, 0x02, 0x00, 0x01],
        &[0x02, 0x02, 0x02, 0x00],
    ]);
    let good = BgpOpenMessage::new(
        65000,
        240,
        Ipv4Addr::new(127, 0, 0, 1),
        vec![
            BgpOpenMessageParameter::Capabilities(vec![BgpCapability::MultiProtocolExtensions(
                MultiProtocolExtensionsCapability::new(2, 1),
            )]),
            BgpOpenMessageParameter::Capabilities(vec![BgpCapability::RouteRefresh]),
        ],
    );

    test_parsed_completely_with_one_input(&good_wire, &BgpParsingContext::default(), &good);
    test_write(&good, &good_wire)?;
    assert_eq!(good.capabilities().count(), 2);
    Ok(())
}

#[test]
fn test_open_four_octet_asn() -> Result<(), BgpOpenMessageWritingError> {
    let good_wire = combine(vec![
        &[0x04],
        &AS_TRANS.to_be_bytes(),
        HOLD_TIME,
        BGP_ID,
        &[0x08, 0x02, 0x06, 0x41, 0x04, 0xfa, 0x56, 0xea, 0x00],
    ]);
    let good = BgpOpenMessage::new_with_asn(
        4_200_000_000,
        240,
        Ipv4Addr::new(127, 0, 0, 1),
        vec![],
    );

    assert_eq!(good.my_as(), AS_TRANS);
    assert_eq!(good.asn4(), 4_200_000_000);
    test_parsed_completely_with_one_input(&good_wire, &BgpParsingContext::default(), &good);
    test_write(&good, &good_wire)?;

    let small = BgpOpenMessage::new_with_asn(65000, 240, Ipv4Addr::new(127, 0, 0, 1), vec![]);
    assert_eq!(small.my_as(), 65000);
    assert_eq!(small.asn4(), 65000);
    Ok(())
}
