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

//! Assertions used by the unit tests of the wire codecs

use crate::{ReadablePdu, ReadablePduWithOneInput, Span, WritablePdu, WritablePduWithOneInput};
use nom::IResult;
use std::{fmt::Debug, io::Cursor};

/// Concatenate several wire fragments into one buffer
pub fn combine(parts: Vec<&[u8]>) -> Vec<u8> {
    parts.concat()
}

fn check_complete<T: PartialEq + Debug, E: Debug>(
    parsed: IResult<Span<'_>, T, E>,
    expected: &T,
) -> T {
    let (remainder, value) = match parsed {
        Ok(ok) => ok,
        Err(err) => panic!("Parsing failed.\n\tExpected: {expected:?}\n\tError: {err:?}"),
    };
    assert_eq!(&value, expected);
    assert!(
        remainder.fragment().is_empty(),
        "Parser left unconsumed input: {remainder:?}"
    );
    value
}

fn check_error<T: Debug, E: Debug + Eq>(parsed: IResult<Span<'_>, T, E>, expected_err: &E) {
    match parsed {
        Err(nom::Err::Error(err)) => assert_eq!(&err, expected_err),
        other => panic!("Expected Err(nom::Err::Error({expected_err:?})), got {other:?}"),
    }
}

/// Parse `input` and assert the value equals `expected` with no input left
pub fn test_parsed_completely<'a, T, E>(input: &'a [u8], expected: &T) -> T
where
    T: ReadablePdu<'a, E> + PartialEq + Debug,
    E: Debug,
{
    check_complete(T::from_wire(Span::new(input)), expected)
}

pub fn test_parsed_completely_with_one_input<'a, T, I, E>(
    input: &'a [u8],
    parser_input: I,
    expected: &T,
) -> T
where
    T: ReadablePduWithOneInput<'a, I, E> + PartialEq + Debug,
    E: Debug,
{
    check_complete(T::from_wire(Span::new(input), parser_input), expected)
}

/// Parse `input` and assert it fails with the recoverable error `expected_err`
pub fn test_parse_error<'a, T, E>(input: &'a [u8], expected_err: &E)
where
    T: ReadablePdu<'a, E> + Debug,
    E: Debug + Eq,
{
    check_error(T::from_wire(Span::new(input)), expected_err)
}

pub fn test_parse_error_with_one_input<'a, T, I, E>(
    input: &'a [u8],
    parser_input: I,
    expected_err: &E,
) where
    T: ReadablePduWithOneInput<'a, I, E> + Debug,
    E: Debug + Eq,
{
    check_error(T::from_wire(Span::new(input), parser_input), expected_err)
}

/// Serialize `input`, compare against `expected` and check that
/// [`WritablePdu::len`] agrees with the number of octets written
pub fn test_write<T: WritablePdu<E>, E: Eq>(input: &T, expected: &[u8]) -> Result<(), E> {
    let mut buf: Vec<u8> = vec![];
    input.write(&mut Cursor::new(&mut buf))?;
    assert_eq!(buf, expected, "Serialized buffer differs from the expected one");
    assert_eq!(input.len(), expected.len(), "len() disagrees with the written length");
    Ok(())
}

pub fn test_write_with_one_input<I: Copy, T: WritablePduWithOneInput<I, E>, E: Eq>(
    input: &T,
    writer_input: I,
    expected: &[u8],
) -> Result<(), E> {
    let mut buf: Vec<u8> = vec![];
    input.write(&mut Cursor::new(&mut buf), writer_input)?;
    assert_eq!(buf, expected, "Serialized buffer differs from the expected one");
    assert_eq!(
        input.len(writer_input),
        expected.len(),
        "len() disagrees with the written length"
    );
    Ok(())
}
