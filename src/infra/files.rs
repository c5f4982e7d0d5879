//! File and standard stream helpers for the binary.

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use tracing::debug;

use super::error::InfraError;

const STDIN_MARKER: &str = "-";

/// Read UTF-8 input from `path`, or from standard input when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, InfraError> {
    if path.as_os_str() == STDIN_MARKER {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|err| InfraError::read(path, err))?;
        debug!(target = "article_render::io", bytes = buffer.len(), "read stdin");
        return Ok(buffer);
    }

    let contents = fs::read_to_string(path).map_err(|err| InfraError::read(path, err))?;
    debug!(
        target = "article_render::io",
        path = %path.display(),
        bytes = contents.len(),
        "read input file"
    );
    Ok(contents)
}

/// Write `contents` to `path`, or to standard output when no path is given.
pub fn write_output(path: Option<&Path>, contents: &str) -> Result<(), InfraError> {
    match path {
        Some(path) => {
            fs::write(path, contents).map_err(|err| InfraError::write(path, err))?;
            debug!(
                target = "article_render::io",
                path = %path.display(),
                bytes = contents.len(),
                "wrote output file"
            );
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            if !contents.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
            Ok(())
        }
    }
}
