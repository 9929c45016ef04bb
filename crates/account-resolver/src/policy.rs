//! Tolerance policy for accounts that fail to resolve

use tracing::warn;

use crate::error::{ResolverError, Result};

/// Decides whether an unresolved account aborts the whole resolution call.
///
/// Only [`ResolverError::Unresolved`] is gated. Credential, rate-limit and
/// transport failures always propagate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorPolicy {
    ignore_unresolved: bool,
}

impl ErrorPolicy {
    /// Abort on the first unresolved account (the default)
    pub const STRICT: Self = Self {
        ignore_unresolved: false,
    };
    /// Skip unresolved accounts and keep going
    pub const TOLERANT: Self = Self {
        ignore_unresolved: true,
    };

    pub fn from_flag(ignore_unresolved: bool) -> Self {
        Self { ignore_unresolved }
    }

    /// Swallow `err` if the policy tolerates it, otherwise hand it back
    pub fn handle(&self, err: ResolverError) -> Result<()> {
        if self.ignore_unresolved && err.is_unresolved() {
            warn!(error = %err, "Ignoring account resolution error");
            return Ok(());
        }
        Err(err)
    }
}
