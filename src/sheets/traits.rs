use crate::errors::ImportResult;
use crate::types::RawRow;

/// Turns an uploaded file into the cell grid of its first sheet.
pub trait SheetReader {
    fn read(content: &[u8]) -> ImportResult<Vec<RawRow>>;

    fn is_supported(filename: Option<&str>, content: &[u8]) -> bool;
}

/// Lowercased extension of `filename`, if it has one.
pub(crate) fn extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    Some(ext.to_lowercase())
}
