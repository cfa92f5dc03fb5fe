use bgp4_parse_utils::{LocatedParsingError, Span};
use bgp4_serde_macros::LocatedError;
use nom::{combinator::map_res, number::complete::be_u8, IResult};

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct UndefinedMessageType(pub u8);

#[derive(LocatedError, Eq, PartialEq, Debug, Clone)]
pub enum TypeError {
    NomError(#[from_nom] nom::error::ErrorKind),
    Undefined(#[from_external] UndefinedMessageType),
}

fn message_type(value: u8) -> Result<u8, UndefinedMessageType> {
    if (1..=4).contains(&value) {
        Ok(value)
    } else {
        Err(UndefinedMessageType(value))
    }
}

fn parse(buf: Span<'_>) -> IResult<Span<'_>, u8, LocatedTypeError<'_>> {
    map_res(be_u8, message_type)(buf)
}

fn main() {
    let good = [2u8];
    assert_eq!(parse(Span::new(&good)).map(|(_, v)| v), Ok(2));

    let bad = [9u8];
    match parse(Span::new(&bad)) {
        Err(nom::Err::Error(err)) => {
            assert_eq!(err.error(), &TypeError::Undefined(UndefinedMessageType(9)));
            assert_eq!(err.span().location_offset(), 0);
        }
        _ => panic!("expected an error"),
    }

    let empty: [u8; 0] = [];
    match parse(Span::new(&empty)) {
        Err(nom::Err::Error(err)) => {
            assert_eq!(err.error(), &TypeError::NomError(nom::error::ErrorKind::Eof));
        }
        _ => panic!("expected an error"),
    }
}
