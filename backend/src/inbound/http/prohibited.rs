//! Shared refusal for routes every caller is denied.

use crate::domain::{Action, Error, Prohibition, authorize};

/// Error returned for a prohibited route, independent of caller and body.
pub(crate) fn refuse(prohibition: Prohibition) -> Error {
    match authorize(None, Action::Prohibited(prohibition)) {
        Err(denial) => denial.into(),
        Ok(()) => Error::internal("prohibited action was permitted"),
    }
}
