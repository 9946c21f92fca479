//! Discord id newtypes and the workspace error type.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

snowflake!(
    /// A Discord user, stored as the key of their vouch stats.
    UserId
);
snowflake!(
    /// A guild channel or category.
    ChannelId
);
snowflake!(
    /// A guild role used by staff checks.
    RoleId
);

/// Result alias for configuration and startup code.
pub type Result<T> = std::result::Result<T, MixHavenError>;

/// Errors raised while preparing the bot to run.
#[derive(thiserror::Error, Debug)]
pub enum MixHavenError {
    /// A configuration field has an unusable value.
    #[error("Validation error on `{field}`: {message}")]
    Validation {
        /// Dotted path of the offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

impl MixHavenError {
    /// Validation failure on `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
