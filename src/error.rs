use std::fmt;

/// Fatal conditions for a report generation. Per-field parse failures never
/// reach this type — they degrade to empty display values inside the record
/// builder. An empty batch is not an error either; callers get an empty
/// record list and can react to it separately from an unreadable source.
#[derive(Debug)]
pub enum Error {
    /// The input source or the output artifact could not be read/written.
    Io(std::io::Error),
    /// The CSV source exists but cannot be parsed at the batch level.
    Csv(csv::Error),
    /// The extraction-collaborator payload is not valid JSON.
    Extraction(serde_json::Error),
    /// The CSV has no header row, so no field can ever be resolved.
    EmptyHeader,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Csv(e) => write!(f, "CSV error: {e}"),
            Error::Extraction(e) => write!(f, "extraction payload error: {e}"),
            Error::EmptyHeader => write!(f, "CSV file has no header row"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            Error::Extraction(e) => Some(e),
            Error::EmptyHeader => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Csv(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Extraction(e)
    }
}
