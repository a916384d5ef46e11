#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSegment {
    pub offset: u32,
    pub size: u32,
    /// Where the payload starts inside the module's buffer.
    pub data_begin: usize,
}
