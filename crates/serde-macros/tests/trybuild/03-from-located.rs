use bgp4_parse_utils::Span;
use bgp4_serde_macros::LocatedError;
use nom::IResult;

#[derive(LocatedError, Eq, PartialEq, Debug, Clone)]
pub enum MessageError {
    NomError(#[from_nom] nom::error::ErrorKind),
    Body(#[from_located(module = "self")] BodyError),
    Inner(#[from_located(module = "")] inner::CapabilityError),
}

#[derive(LocatedError, Eq, PartialEq, Debug, Clone)]
pub enum BodyError {
    Truncated,
}

pub mod inner {
    use bgp4_serde_macros::LocatedError;

    #[derive(LocatedError, Eq, PartialEq, Debug, Clone)]
    pub enum CapabilityError {
        BadLength(u8),
    }
}

fn parse_body(buf: Span<'_>) -> IResult<Span<'_>, u8, LocatedBodyError<'_>> {
    Err(nom::Err::Error(LocatedBodyError::new(buf, BodyError::Truncated)))
}

fn parse_capability(buf: Span<'_>) -> IResult<Span<'_>, u8, inner::LocatedCapabilityError<'_>> {
    Err(nom::Err::Error(inner::LocatedCapabilityError::new(
        buf,
        inner::CapabilityError::BadLength(3),
    )))
}

fn parse(buf: Span<'_>) -> IResult<Span<'_>, u8, LocatedMessageError<'_>> {
    parse_body(buf).map_err(|err| err.map(LocatedMessageError::from))
}

fn parse_inner(buf: Span<'_>) -> IResult<Span<'_>, u8, LocatedMessageError<'_>> {
    parse_capability(buf).map_err(|err| err.map(LocatedMessageError::from))
}

fn main() {
    let span = Span::with_offset(19, &[1]);
    assert_eq!(
        parse(span),
        Err(nom::Err::Error(LocatedMessageError::new(
            span,
            MessageError::Body(BodyError::Truncated)
        )))
    );
    assert_eq!(
        parse_inner(span),
        Err(nom::Err::Error(LocatedMessageError::new(
            span,
            MessageError::Inner(inner::CapabilityError::BadLength(3))
        )))
    );
}
