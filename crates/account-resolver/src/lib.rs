//! Social Account Resolver
//!
//! Turns externally sourced account keys into canonical provider-qualified
//! ID keys while keeping each key's payload attached.
//!
//! Input keys look like `"twitter:<username>"` (needs a lookup) or
//! `"twitter:<username>:<id>"` (already resolved, copied straight through).
//! Output keys look like `"1002:<id>"`.
//!
//! Usernames are looked up in chunks, a bounded number of chunks at a time,
//! in strictly sequential waves. See [`batch::run_in_waves`].

pub mod batch;
pub mod config;
pub mod error;
pub mod keys;
pub mod lookup;
pub mod partition;
pub mod policy;
pub mod reconcile;
pub mod resolver;
pub mod types;

pub use batch::{run_in_waves, BatchOptions};
pub use config::ResolverConfig;
pub use error::{ResolverError, Result};
pub use keys::{compose, TWITTER_PROVIDER_CODE};
pub use policy::ErrorPolicy;
pub use resolver::{AccountResolver, TwitterResolver};
pub use types::{Candidate, InputMap, ResultMap, ResultSink};
