//! The build's single error type.
//!
//! An [`Error`] is a chain of [`ErrorDetail`]s. The innermost link is the
//! cause (an I/O error, a bad front matter block, a failed query); outer links
//! add context such as the file or build stage that was being processed. Use
//! [`error!`](crate::error!) to build ad-hoc details with key/value parameters
//! and [`Chainable::chain_with()`] to wrap a failing result in more context.
//!
//! Every detail may report a [`Kind`] so callers can tell apart the failure
//! classes without matching on message text.

use std::{fmt, io};
use std::panic::Location;
use std::error::Error as StdError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
pub struct Error {
    detail: Vec<Box<dyn ErrorDetail>>,
    prev: Option<Box<Error>>,
    _location: &'static Location<'static>,
}

/// The failure classes a build can abort with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The text before a document's first `---` line was not empty.
    FrontMatter,
    /// A decoded record lacks a mandatory value.
    MissingField,
    /// A metadata block was not valid YAML for the record's schema.
    Decode,
    /// Reading, writing, or linking a file or directory failed.
    Io,
    /// Connecting to or querying the activity database failed.
    DataSource,
    /// A template failed to load, compile, or execute.
    Template,
    /// A stylesheet failed to compile.
    Stylesheet,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::FrontMatter => "bad frontmatter",
            Kind::MissingField => "missing required field",
            Kind::Decode => "invalid metadata",
            Kind::Io => "I/O failure",
            Kind::DataSource => "data source failure",
            Kind::Template => "template failure",
            Kind::Stylesheet => "stylesheet failure",
        }.fmt(f)
    }
}

pub trait ErrorDetail: fmt::Display + fmt::Debug + Send + Sync {
    fn context(&self) -> Vec<(Option<String>, String)> { vec![] }

    fn kind(&self) -> Option<Kind> { None }
}

impl Error {
    pub fn chain(self, mut other: Error) -> Self {
        #[inline]
        fn _chain(error: Error, behind: &mut Error) {
            if let Some(prev) = behind.prev.as_mut() {
                _chain(error, prev);
            } else {
                behind.prev = Some(Box::new(error));
            }
        }

        _chain(self, &mut other);
        other
    }

    /// The innermost error in the chain: the one everything else wraps.
    pub fn root(&self) -> &Error {
        let mut error = self;
        while let Some(prev) = error.prev.as_deref() {
            error = prev;
        }

        error
    }

    /// The kind of the deepest detail in the chain that declares one.
    pub fn kind(&self) -> Option<Kind> {
        let inner = self.prev.as_deref().and_then(|prev| prev.kind());
        inner.or_else(|| self.detail.iter().find_map(|d| d.kind()))
    }

    /// Renders the whole chain on one line, outermost context first.
    pub fn one_line(&self) -> String {
        let mut parts = vec![];
        let mut error = Some(self);
        while let Some(e) = error {
            for detail in &e.detail {
                let mut part = detail.to_string();
                for (key, value) in detail.context() {
                    match key {
                        Some(key) => part.push_str(&format!(" ({key}: {value})")),
                        None => part.push_str(&format!(" ({value})")),
                    }
                }

                parts.push(part);
            }

            error = e.prev.as_deref();
        }

        parts.join(": ")
    }
}

impl ErrorDetail for &(dyn StdError + Send + Sync) {
    fn context(&self) -> Vec<(Option<String>, String)> {
        let mut ctxt = vec![];
        let mut error = self.source();
        while let Some(e) = error {
            ctxt.push((None, e.to_string()));
            error = e.source();
        }

        ctxt
    }
}

macro_rules! impl_error_detail_with_std_error {
    ($T:ty => $kind:ident) => {
        impl $crate::error::ErrorDetail for $T {
            fn context(&self) -> Vec<(Option<String>, String)> {
                let error: &(dyn std::error::Error + Send + Sync) = self;
                error.context()
            }

            fn kind(&self) -> Option<$crate::error::Kind> {
                Some($crate::error::Kind::$kind)
            }
        }
    }
}

impl_error_detail_with_std_error!(io::Error => Io);
impl_error_detail_with_std_error!(serde_yaml::Error => Decode);
impl_error_detail_with_std_error!(postgres::Error => DataSource);

impl<T: ErrorDetail + 'static> From<T> for Error {
    #[track_caller]
    fn from(detail: T) -> Self {
        Error {
            prev: None,
            detail: vec![Box::new(detail)],
            _location: std::panic::Location::caller(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[derive(Copy, Clone)] struct Indent(usize);

        impl fmt::Display for Indent {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for _ in 0..(self.0 * 4) { write!(f, " ")? }
                Ok(())
            }
        }

        struct NestedError<'a>(Indent, &'a Error);

        impl fmt::Display for NestedError<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let NestedError(indent, e) = self;

                for detail in &e.detail {
                    let indent_line = format!("\n{indent}");

                    writeln!(f, "{indent}{}", format!("{:#}", detail).replace('\n', &indent_line))?;
                    if let Some(prev) = &e.prev {
                        NestedError(Indent(indent.0 + 1), prev).fmt(f)?;
                    }

                    for (key, value) in detail.context() {
                        let value = value.to_string().replace('\n', &indent_line);
                        if let Some(key) = key {
                            writeln!(f, "{indent}{key}: {value}")?;
                        } else {
                            writeln!(f, "{indent}{value}")?;
                        }
                    }

                    if std::env::var_os("RUST_BACKTRACE").is_some() {
                        writeln!(f, "{indent}[{}]", e._location)?;
                    }
                }

                Ok(())
            }
        }

        NestedError(Indent(0), self).fmt(f)
    }
}

#[derive(Debug)]
pub struct MakeshiftError {
    pub message: String,
    pub parameters: Vec<(Option<String>, String)>,
}

#[doc(hidden)]
#[macro_export]
macro_rules! err {
    ($($token:tt)*) => (Err($crate::error!($($token)*)));
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($msg:expr, $($rest:tt)*) => (
        $crate::error::Error::from($crate::error::MakeshiftError {
            message: $msg.to_string(),
            parameters: {
                #[allow(unused_mut)]
                let mut v: Vec<(Option<String>, String)> = Vec::new();
                $crate::error!(@param v $($rest)*);
                v
            },
        })
    );

    ($msg:expr) => ( $crate::error!($msg,) );

    (@param $v:ident $key:expr => $value:expr, $($rest:tt)*) => {
        $crate::error!(@param $v $key => $value);
        $crate::error!(@param $v $($rest)*);
    };

    (@param $v:ident $key:expr => $value:expr) => {
        $v.push((Some($key.to_string()), $value.to_string()));
    };

    (@param $v:ident $value:expr, $($rest:tt)*) => {
        $crate::error!(@param $v $value);
        $crate::error!(@param $v $($rest)*);
    };

    (@param $v:ident $value:expr) => {
        $v.push((None, $value.to_string()));
    };

    (@param $v:ident $(,)?) => { };
}

impl fmt::Display for MakeshiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message.fmt(f)
    }
}

impl ErrorDetail for MakeshiftError {
    fn context(&self) -> Vec<(Option<String>, String)> {
        self.parameters.clone()
    }
}

pub trait Chainable<T> {
    fn chain_with<F, E>(self, f: F) -> Result<T>
        where F: FnOnce() -> E, E: Into<Error>;
}

impl<T, E: Into<Error>> Chainable<T> for Result<T, E> {
    #[track_caller]
    fn chain_with<F, Err>(self, f: F) -> Result<T>
        where F: FnOnce() -> Err, Err: Into<Error>,
     {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(e.into().chain(f().into()))
        }
    }
}
