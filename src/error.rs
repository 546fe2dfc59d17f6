use crate::types::{IfoKind, Magic, Table};
use thiserror::Error;

/// The error type of every decoding operation in this crate.
///
/// All variants abort the operation in progress; no partially decoded
/// structure is ever returned alongside them.
#[derive(Debug, Error)]
pub enum IfoError {
    /// The header did not start with the expected magic identifier.
    ///
    /// `expected` is `None` when the caller asked for either kind and the
    /// magic matched neither.
    #[error(
        "malformed IFO header: expected {}, found {:?}",
        expected_magic(.expected),
        String::from_utf8_lossy(.found)
    )]
    MalformedHeader {
        expected: Option<IfoKind>,
        found: Magic,
    },
    /// A table's stated bounds exceed the sector it was read from.
    #[error("{table} extends to byte {end}, past the {limit}-byte sector")]
    StructuralOverrun {
        table: Table,
        end: usize,
        limit: usize,
    },
    /// An I/O error reported by the sector source.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn expected_magic(expected: &Option<IfoKind>) -> String {
    match expected {
        Some(kind) => format!("{:?}", String::from_utf8_lossy(kind.magic())),
        None => "DVDVIDEO-VMG or DVDVIDEO-VTS".into(),
    }
}

/// Shorthand for results carrying an [`IfoError`].
///
/// [`IfoError`]: enum.IfoError.html
pub type Result<T> = std::result::Result<T, IfoError>;
