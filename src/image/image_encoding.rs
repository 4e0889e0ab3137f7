
/// Storage type the frame values were decoded from.
#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum ImageEncoding {
    U8,
    F32,
    F64
}
