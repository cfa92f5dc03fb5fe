use bgp4_serde_macros::WritingError;
use std::io::Write;

#[derive(WritingError, Eq, PartialEq, Debug, Clone)]
pub enum HeaderWritingError {
    StdIOError(#[from_std_io_error] String),
}

fn write_header(buf: &mut [u8]) -> Result<(), HeaderWritingError> {
    let mut cursor = std::io::Cursor::new(buf);
    cursor.write_all(&[0xff; 19])?;
    Ok(())
}

fn main() {
    let mut small = [0u8; 4];
    let err = write_header(&mut small);
    assert!(matches!(err, Err(HeaderWritingError::StdIOError(_))));

    let mut big = [0u8; 19];
    assert_eq!(write_header(&mut big), Ok(()));
}
