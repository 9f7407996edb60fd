//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{command, infra::database, query};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Shell [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an internal error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Returns this [`Error`] without its backtrace, as shown to users.
    #[must_use]
    pub fn brief(&self) -> String {
        let Self { code, message, .. } = self;
        format!("[{code}]: {message}")
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for clap::Error {
    fn try_as_error(&self) -> Option<Error> {
        let rendered = self.render().to_string();
        Some(Error {
            code: "BAD_INSTRUCTION",
            message: rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_owned(),
            backtrace: None,
        })
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

define_error! {
    enum ScooterError {
        #[code = "SCOOTER_NOT_FOUND"]
        #[message = "`Scooter` with the provided ID does not exist"]
        NotFound,

        #[code = "RENTAL_IN_PROGRESS"]
        #[message = "`Scooter` is rented at the moment"]
        RentalInProgress,

        #[code = "NOT_RENTED"]
        #[message = "`Scooter` is not rented"]
        NotRented,
    }
}

impl AsError for command::add_scooter::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "DUPLICATE_IDENTIFIER"]
                #[message = "`Scooter` with the provided ID already exists"]
                DuplicateIdentifier,

                #[code = "INVALID_PRICE"]
                #[message = "`Scooter` price per minute should be at least \
                             0.01"]
                InvalidPrice,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::DuplicateIdentifier(_) => {
                Some(Error::DuplicateIdentifier.into())
            }
            Self::InvalidPrice(_) => Some(Error::InvalidPrice.into()),
        }
    }
}

impl AsError for command::remove_scooter::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotFound(_) => Some(ScooterError::NotFound.into()),
            Self::RentalInProgress(_) => {
                Some(ScooterError::RentalInProgress.into())
            }
        }
    }
}

impl AsError for command::start_rent::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotFound(_) => Some(ScooterError::NotFound.into()),
            Self::RentalInProgress(_) => {
                Some(ScooterError::RentalInProgress.into())
            }
        }
    }
}

impl AsError for command::end_rent::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_TIME_RANGE"]
                #[message = "`Ride` should end after it starts"]
                InvalidTimeRange,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotRented(_) => Some(ScooterError::NotRented.into()),
            Self::InvalidTimeRange(_) => Some(Error::InvalidTimeRange.into()),
        }
    }
}

impl AsError for query::scooter::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotFound(_) => Some(ScooterError::NotFound.into()),
        }
    }
}
