use bgp4_serde_macros::WritingError;

#[derive(WritingError, Eq, PartialEq, Debug, Clone)]
pub enum CapabilityWritingError {
    StdIOError(#[from_std_io_error] String),
    LengthOverflow(usize),
}

pub mod open {
    use bgp4_serde_macros::WritingError;

    #[derive(WritingError, Eq, PartialEq, Debug, Clone)]
    pub enum ParameterWritingError {
        StdIOError(#[from_std_io_error] String),
    }
}

#[derive(WritingError, Eq, PartialEq, Debug, Clone)]
pub enum MessageWritingError {
    StdIOError(#[from_std_io_error] String),
    CapabilityError(#[from] CapabilityWritingError),
    ParameterError(#[from] open::ParameterWritingError),
}

fn write_capability() -> Result<(), CapabilityWritingError> {
    Err(CapabilityWritingError::LengthOverflow(256))
}

fn write_message() -> Result<(), MessageWritingError> {
    write_capability()?;
    Ok(())
}

fn main() {
    assert_eq!(
        write_message(),
        Err(MessageWritingError::CapabilityError(
            CapabilityWritingError::LengthOverflow(256)
        ))
    );
    let nested: MessageWritingError = open::ParameterWritingError::StdIOError("eof".to_string()).into();
    assert!(matches!(nested, MessageWritingError::ParameterError(_)));
}
