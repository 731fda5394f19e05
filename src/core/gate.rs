//! Display name gate
//!
//! The thread is not shown until a display name is known. A stored name
//! passes straight through; otherwise the user is asked until they give one
//! of at least `MIN_NAME_LEN` characters.

use std::io::{BufRead, Write};

use crate::consts::{MIN_NAME_LEN, NAME_KEY};
use crate::error::AppError;
use crate::store::KeyValueStore;

/// Trim a candidate name and check its length
pub(crate) fn validate_name(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_NAME_LEN {
        return Err(AppError::NameTooShort { min: MIN_NAME_LEN });
    }
    Ok(trimmed.to_string())
}

pub(crate) struct NameGate<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> NameGate<'a> {
    pub(crate) fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Previously accepted name; blank values count as absent
    pub(crate) fn stored(&self) -> Option<String> {
        self.store
            .get(NAME_KEY)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    }

    /// Validate and persist a name
    pub(crate) fn accept(&self, raw: &str) -> Result<String, AppError> {
        let name = validate_name(raw)?;
        self.store.set(NAME_KEY, &name)?;
        tracing::info!(name = %name, "display name stored");
        Ok(name)
    }

    pub(crate) fn forget(&self) -> Result<(), AppError> {
        self.store.remove(NAME_KEY)
    }

    /// Return the stored name, or ask for one until it is accepted.
    ///
    /// `Ok(None)` means input ended before a name was accepted.
    pub(crate) fn prompt<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut out: W,
    ) -> Result<Option<String>, AppError> {
        if let Some(name) = self.stored() {
            return Ok(Some(name));
        }

        writeln!(out, "Lonely? Never again.")?;
        loop {
            write!(out, "Enter your name to continue: ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(None);
            }
            match self.accept(&line) {
                Ok(name) => return Ok(Some(name)),
                Err(e @ AppError::NameTooShort { .. }) => writeln!(out, "{e}")?,
                Err(e) => return Err(e),
            }
        }
    }
}
