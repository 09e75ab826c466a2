use std::process::ExitCode;

/// Failure categories shared by the binaries. Code 2 is left to clap for
/// malformed command lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// An argument parsed but is unusable: bad seed URL, invalid corpus directory.
    InvalidInput,
    /// A file or directory could not be created, read, or written.
    Io,
    /// Building, saving, or loading an index failed.
    Build,
}

impl Failure {
    pub fn code(self) -> u8 {
        match self {
            Failure::InvalidInput => 3,
            Failure::Io => 4,
            Failure::Build => 5,
        }
    }
}

impl From<Failure> for ExitCode {
    fn from(f: Failure) -> Self { ExitCode::from(f.code()) }
}

