use std::fmt;

/// What went wrong, at the granularity the command line reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Read,
    Import,
    Decode,
    GraphBuild,
    Inference,
    LabelFile,
    IndexOutOfRange,
}

/// Error surfaced by every fallible step of a classification run.
///
/// `context` is the short human description of the step that failed, the
/// source carries the underlying chain (I/O, protobuf, tract, image...).
#[derive(Debug)]
pub struct ClassifyError {
    pub kind: ErrorKind,
    pub context: String,
    source: anyhow::Error,
}

pub type ClassifyResult<T> = Result<T, ClassifyError>;

impl ClassifyError {
    pub fn new(
        kind: ErrorKind,
        context: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        ClassifyError { kind, context: context.into(), source: source.into() }
    }

    pub fn details(&self) -> String {
        format!("{:#}", self.source)
    }
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR]: {}\n{:#}", self.context, self.source)
    }
}

impl std::error::Error for ClassifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

/// Tags a lower level result with an [`ErrorKind`] and a context line.
pub trait ResultExt<T> {
    fn kind(self, kind: ErrorKind, context: &str) -> ClassifyResult<T>;
}

impl<T, E: Into<anyhow::Error>> ResultExt<T> for Result<T, E> {
    fn kind(self, kind: ErrorKind, context: &str) -> ClassifyResult<T> {
        self.map_err(|e| ClassifyError::new(kind, context, e))
    }
}
