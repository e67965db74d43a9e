//! Standard stream access for the `-` input and document output.

use std::io::{self, Read, Write};

use crate::infrastructure::error::{InfraError, InfraResult};

/// Read all of `reader`, stdin in the binary.
pub fn read_all<R: Read>(mut reader: R) -> InfraResult<String> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|e| InfraError::io("read stdin", e))?;
    Ok(content)
}

/// Write serialized text as is and flush, stdout in the binary.
///
/// Unlike `print!`, a closed pipe is reported instead of panicking.
pub fn write_all<W: Write>(mut writer: W, text: &str) -> InfraResult<()> {
    writer
        .write_all(text.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| InfraError::io("write stdout", e))
}

pub fn read_stdin() -> InfraResult<String> {
    read_all(io::stdin().lock())
}

pub fn write_stdout(text: &str) -> InfraResult<()> {
    write_all(io::stdout().lock(), text)
}
