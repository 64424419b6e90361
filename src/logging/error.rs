// SPDX-License-Identifier: Apache-2.0 OR MIT
// Status codes returned across the logging API

use thiserror::Error;

/// Errors returned by logger configuration calls
///
/// Filtering outcomes (level too low, topic disabled or unknown) are not
/// errors; a filtered log call simply produces no output.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogError {
    /// Generic failure, e.g. an attempt to remove the console output
    #[error("operation failed")]
    Failed,

    #[error("invalid argument")]
    InvalidArgument,

    #[error("not found")]
    NotFound,

    /// The lock adapter reported contention
    #[error("lock is busy")]
    Busy,

    /// The feature behind this call is switched off in [`Features`](crate::config::Features)
    #[error("feature disabled")]
    Disabled,

    /// A fixed-capacity registry has no free slot left
    #[error("capacity exhausted")]
    Full,
}
