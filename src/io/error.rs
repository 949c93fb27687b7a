use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "I/O error for {path_desc}: {source}",
        path_desc = PathDisplay(path)
    )]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "failed to parse {format} {path_desc}: {details} (line {line_number})",
        path_desc = PathDisplay(path)
    )]
    Parse {
        format: &'static str,
        path: Option<PathBuf>,
        line_number: usize,
        details: String,
    },

    #[error(
        "failed to encode {format} for {path_desc}: {details}",
        path_desc = PathDisplay(path)
    )]
    Encode {
        format: &'static str,
        path: Option<PathBuf>,
        details: String,
    },
}

impl Error {
    pub fn from_io(source: std::io::Error, path: Option<PathBuf>) -> Self {
        Self::Io { path, source }
    }

    pub fn parse(
        format: &'static str,
        path: Option<PathBuf>,
        line_number: usize,
        details: impl Into<String>,
    ) -> Self {
        Self::Parse {
            format,
            path,
            line_number,
            details: details.into(),
        }
    }

    pub fn encode(format: &'static str, path: Option<PathBuf>, details: impl Into<String>) -> Self {
        Self::Encode {
            format,
            path,
            details: details.into(),
        }
    }

    /// Maps a JSON error onto the I/O or parse variant.
    pub(crate) fn from_json(err: serde_json::Error, path: Option<PathBuf>) -> Self {
        if err.is_io() {
            let source = std::io::Error::from(err);
            return Self::from_io(source, path);
        }
        Self::parse("JSON", path, err.line(), err.to_string())
    }

    /// Maps a CSV writer error onto the I/O or encode variant.
    pub(crate) fn from_csv(err: csv::Error, format: &'static str, path: Option<PathBuf>) -> Self {
        let details = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Self::from_io(source, path),
            _ => Self::encode(format, path, details),
        }
    }

    /// Attaches a path to an error raised on an anonymous stream.
    pub(crate) fn with_path(self, path: PathBuf) -> Self {
        match self {
            Self::Io { source, .. } => Self::Io {
                path: Some(path),
                source,
            },
            Self::Parse {
                format,
                line_number,
                details,
                ..
            } => Self::Parse {
                format,
                path: Some(path),
                line_number,
                details,
            },
            Self::Encode {
                format, details, ..
            } => Self::Encode {
                format,
                path: Some(path),
                details,
            },
        }
    }
}

struct PathDisplay<'a>(&'a Option<PathBuf>);

impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "file '{}'", p.display()),
            None => write!(f, "stream source"),
        }
    }
}
