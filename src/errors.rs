//! Module for errors.
use std::{error::Error, fmt::Display};

use crate::area::AreaLevel;

/// Error from resolving or archiving the code tables.
#[derive(Debug)]
pub enum CodeTableErr {
    // Inherited errors from std
    /// Error forwarded from std
    IO(::std::io::Error),

    // Other forwarded errors
    /// Database error
    Database(::rusqlite::Error),
    /// Error forwarded from the strum crate
    StrumError(strum::ParseError),
    /// General error with any cause information erased and replaced by a string
    GeneralError(String),

    // Integrity defects, these abort a run.
    /// A parent reference points at a code that is not in the result.
    DanglingReference {
        /// The record holding the reference.
        code: String,
        /// Which parent level the reference is for.
        level: AreaLevel,
        /// The missing code.
        target: String,
    },
    /// A code from an input table never made it into the result.
    MissingCode(String),
    /// The two hierarchy relation tables disagree on the ichiji code of a matome area.
    IchijiMismatch {
        /// The matome code both tables list.
        matome: String,
        /// The ichiji code recorded first.
        existing: String,
        /// The conflicting ichiji code.
        incoming: String,
    },
    /// A record carries a parent reference its level may not have.
    IllegalParentRef {
        /// The offending record.
        code: String,
        /// The level of the offending record.
        level: AreaLevel,
        /// The parent level that is not allowed.
        parent: AreaLevel,
    },
    /// A referenced code has no entry in the name lookup.
    MissingName(String),

    // My own errors from this crate
    /// No match in the archive.
    NotInIndex,
    /// The database structure is wrong.
    InvalidSchema,
    /// There was an internal logic error.
    LogicError(&'static str),
}

impl CodeTableErr {
    /// True for the errors that mean the resolved tree is not consistent and must not be emitted.
    pub fn is_integrity_defect(&self) -> bool {
        use crate::errors::CodeTableErr::*;

        matches!(
            self,
            DanglingReference { .. }
                | MissingCode(_)
                | IchijiMismatch { .. }
                | IllegalParentRef { .. }
                | MissingName(_)
        )
    }
}

impl Display for CodeTableErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        use crate::errors::CodeTableErr::*;

        match self {
            IO(err) => write!(f, "std lib io error: {}", err),

            Database(err) => write!(f, "database error: {}", err),
            StrumError(err) => write!(f, "error forwarded from strum crate: {}", err),
            GeneralError(msg) => write!(f, "general error forwarded: {}", msg),

            DanglingReference {
                code,
                level,
                target,
            } => write!(
                f,
                "integrity defect: {} refers to {} {} which is not in the result",
                code,
                level.as_static_str(),
                target
            ),
            MissingCode(code) => write!(f, "integrity defect: code {} missing from result", code),
            IchijiMismatch {
                matome,
                existing,
                incoming,
            } => write!(
                f,
                "integrity defect: matome {} has ichiji {} and {}",
                matome, existing, incoming
            ),
            IllegalParentRef {
                code,
                level,
                parent,
            } => write!(
                f,
                "integrity defect: {} at level {} may not reference a {} parent",
                code,
                level.as_static_str(),
                parent.as_static_str()
            ),
            MissingName(code) => write!(f, "integrity defect: no name for code {}", code),

            NotInIndex => write!(f, "no match in the index"),
            InvalidSchema => write!(f, "invalid index format"),
            LogicError(msg) => write!(f, "internal logic error: {}", msg),
        }
    }
}

impl Error for CodeTableErr {}

impl From<::std::io::Error> for CodeTableErr {
    fn from(err: ::std::io::Error) -> CodeTableErr {
        CodeTableErr::IO(err)
    }
}

impl From<::rusqlite::Error> for CodeTableErr {
    fn from(err: ::rusqlite::Error) -> CodeTableErr {
        CodeTableErr::Database(err)
    }
}

impl From<strum::ParseError> for CodeTableErr {
    fn from(err: strum::ParseError) -> CodeTableErr {
        CodeTableErr::StrumError(err)
    }
}

impl From<Box<dyn Error>> for CodeTableErr {
    fn from(err: Box<dyn Error>) -> CodeTableErr {
        CodeTableErr::GeneralError(err.to_string())
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
