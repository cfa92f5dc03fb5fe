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

#![no_main]
extern crate libfuzzer_sys;
use bgp4_pkt::{decode_with_context, encode, wire::deserializer::BgpParsingContext};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&[u8], bool, bool, bool)| {
    let (mut buf, keep_unrecognized_capabilities, validate_marker, route_refresh) = data;
    let ctx = BgpParsingContext::new(keep_unrecognized_capabilities, validate_marker, route_refresh);
    while let Ok((msg, consumed)) = decode_with_context(buf, &ctx) {
        // Anything that decodes must encode back to a message that decodes to the same value
        let wire = encode(&msg).expect("decoded message failed to encode");
        let (again, again_consumed) =
            decode_with_context(&wire, &ctx).expect("encoded message failed to decode");
        assert_eq!(again, msg);
        assert_eq!(again_consumed, wire.len());
        buf = &buf[consumed..];
    }
});
