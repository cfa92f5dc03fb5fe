use bgp4_parse_utils::LocatedParsingError;
use bgp4_parse_utils::Span;
use bgp4_serde_macros::LocatedError;

#[derive(LocatedError, Eq, PartialEq, Debug, Clone)]
pub enum HeaderError {
    BadLength(u16),
    BadType(u8),
}

fn main() {
    let span = Span::with_offset(16, &[0x00, 0x05]);
    let error = HeaderError::BadLength(5);
    let located = LocatedHeaderError::new(span, error.clone());
    assert_eq!(located.span(), &span);
    assert_eq!(located.error(), &error);
    let (span_out, error_out): (Span<'_>, HeaderError) = located.into();
    assert_eq!(span_out.location_offset(), 16);
    assert_eq!(error_out, error);
}
