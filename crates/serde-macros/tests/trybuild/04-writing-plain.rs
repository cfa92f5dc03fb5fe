use bgp4_serde_macros::WritingError;

#[derive(WritingError, Eq, PartialEq, Debug, Clone)]
pub enum KeepaliveWritingError {
    LengthOverflow(usize),
}

fn main() {
    let err = KeepaliveWritingError::LengthOverflow(5000);
    assert_eq!(err.clone(), KeepaliveWritingError::LengthOverflow(5000));
}
