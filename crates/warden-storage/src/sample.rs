//! Demonstration content for a fresh sandbox.

use tracing::info;

use warden_core::error::AppError;

use crate::providers::local::SandboxReader;

/// Name of the sample greeting file.
pub const HELLO_FILE: &str = "hello.txt";

/// Exact contents of [`HELLO_FILE`].
pub const HELLO_CONTENT: &str = "Hello from safe file!\n";

/// Name of the nested sample readme.
pub const README_FILE: &str = "notes/readme.md";

/// Exact contents of [`README_FILE`].
pub const SAMPLE_README: &str = "# Notes\n\
\n\
This directory lives inside the sandbox. Files here can be read with\n\
`GET /api/files/read?filename=notes/readme.md` once logged in.\n";

/// Writes the sample files into the sandbox, overwriting earlier copies.
///
/// Returns the sandbox-relative paths written.
pub async fn setup_sample(reader: &SandboxReader) -> Result<Vec<String>, AppError> {
    let mut written = Vec::with_capacity(2);
    for (name, content) in [(HELLO_FILE, HELLO_CONTENT), (README_FILE, SAMPLE_README)] {
        let path = reader.write_file(name, content).await?;
        written.push(path.relative);
    }

    info!(
        base = %reader.guard().base().display(),
        files = written.len(),
        "Sample sandbox content written"
    );
    Ok(written)
}
