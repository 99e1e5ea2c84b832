use arrow::error::ArrowError;
use std::result;
use thiserror::Error;

pub type Result<T> = result::Result<T, VegaLiteError>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    pub contexts: Vec<String>,
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, context) in self.contexts.iter().enumerate() {
            writeln!(f, "    Context[{i}]: {context}")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum VegaLiteError {
    #[error("Shorthand parsing error: {0}\n{1}")]
    ParseError(String, ErrorContext),

    #[error("Internal error: {0}\n{1}")]
    InternalError(String, ErrorContext),

    #[error("External error: {0}\n{1}")]
    ExternalError(String, ErrorContext),

    #[error("Vega-Lite specification error: {0}\n{1}")]
    SpecificationError(String, ErrorContext),

    #[error("Dataset error: {0}\n{1}")]
    DatasetError(String, ErrorContext),

    #[error("Dataset has {rows} rows, which exceeds the embedding limit of {max_rows}\n{context}")]
    MaxRowsError {
        rows: usize,
        max_rows: usize,
        context: ErrorContext,
    },

    #[error("Arrow error: {0}\n{1}")]
    ArrowError(ArrowError, ErrorContext),

    #[error("IO Error: {0}\n{1}")]
    IOError(std::io::Error, ErrorContext),

    #[cfg(feature = "json")]
    #[error("Serde JSON Error: {0}\n{1}")]
    SerdeJsonError(serde_json::Error, ErrorContext),
}

impl VegaLiteError {
    /// Append a new context level to the error
    pub fn with_context<S, F>(self, context_fn: F) -> Self
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        use VegaLiteError::*;
        match self {
            ParseError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                ParseError(msg, context)
            }
            InternalError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                InternalError(msg, context)
            }
            ExternalError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                ExternalError(msg, context)
            }
            SpecificationError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                SpecificationError(msg, context)
            }
            DatasetError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                DatasetError(msg, context)
            }
            MaxRowsError {
                rows,
                max_rows,
                mut context,
            } => {
                context.contexts.push(context_fn().into());
                MaxRowsError {
                    rows,
                    max_rows,
                    context,
                }
            }
            ArrowError(err, mut context) => {
                context.contexts.push(context_fn().into());
                ArrowError(err, context)
            }
            IOError(err, mut context) => {
                context.contexts.push(context_fn().into());
                IOError(err, context)
            }
            #[cfg(feature = "json")]
            SerdeJsonError(err, mut context) => {
                context.contexts.push(context_fn().into());
                SerdeJsonError(err, context)
            }
        }
    }

    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::ParseError(message.into(), Default::default())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::InternalError(message.into(), Default::default())
    }

    pub fn external<S: Into<String>>(message: S) -> Self {
        Self::ExternalError(message.into(), Default::default())
    }

    pub fn specification<S: Into<String>>(message: S) -> Self {
        Self::SpecificationError(message.into(), Default::default())
    }

    pub fn dataset<S: Into<String>>(message: S) -> Self {
        Self::DatasetError(message.into(), Default::default())
    }

    pub fn max_rows(rows: usize, max_rows: usize) -> Self {
        Self::MaxRowsError {
            rows,
            max_rows,
            context: Default::default(),
        }
    }

    /// Duplicate error. Not a precise Clone because some of the wrapped error types aren't Clone
    /// These are converted to external errors
    pub fn duplicate(&self) -> Self {
        use VegaLiteError::*;
        match self {
            ParseError(msg, context) => ParseError(msg.clone(), context.clone()),
            InternalError(msg, context) => InternalError(msg.clone(), context.clone()),
            ExternalError(msg, context) => ExternalError(msg.clone(), context.clone()),
            SpecificationError(msg, context) => SpecificationError(msg.clone(), context.clone()),
            DatasetError(msg, context) => DatasetError(msg.clone(), context.clone()),
            MaxRowsError {
                rows,
                max_rows,
                context,
            } => MaxRowsError {
                rows: *rows,
                max_rows: *max_rows,
                context: context.clone(),
            },
            ArrowError(err, context) => ExternalError(err.to_string(), context.clone()),
            IOError(err, context) => ExternalError(err.to_string(), context.clone()),
            #[cfg(feature = "json")]
            SerdeJsonError(err, context) => ExternalError(err.to_string(), context.clone()),
        }
    }
}

pub trait ResultWithContext<R> {
    fn with_context<S, F>(self, context_fn: F) -> Result<R>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<R, E> ResultWithContext<R> for result::Result<R, E>
where
    E: Into<VegaLiteError>,
{
    fn with_context<S, F>(self, context_fn: F) -> Result<R>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        match self {
            Ok(val) => Ok(val),
            Err(err) => {
                let err: VegaLiteError = err.into();
                Err(err.with_context(context_fn))
            }
        }
    }
}

impl<R> ResultWithContext<R> for Option<R> {
    fn with_context<S, F>(self, context_fn: F) -> Result<R>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        match self {
            Some(val) => Ok(val),
            None => Err(VegaLiteError::internal(context_fn().into())),
        }
    }
}

impl From<ArrowError> for VegaLiteError {
    fn from(err: ArrowError) -> Self {
        Self::ArrowError(err, Default::default())
    }
}

impl From<std::io::Error> for VegaLiteError {
    fn from(err: std::io::Error) -> Self {
        Self::IOError(err, Default::default())
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for VegaLiteError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerdeJsonError(err, Default::default())
    }
}

pub trait ToExternalError<T> {
    fn external<S: Into<String>>(self, context: S) -> Result<T>;
}

impl<T, E: std::error::Error> ToExternalError<T> for std::result::Result<T, E> {
    fn external<S: Into<String>>(self, context: S) -> Result<T> {
        match self {
            Ok(v) => Ok(v),
            Err(err) => {
                let context = ErrorContext {
                    contexts: vec![context.into()],
                };
                Err(VegaLiteError::ExternalError(err.to_string(), context))
            }
        }
    }
}
