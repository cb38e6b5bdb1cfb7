/// Computation profile model
///
/// A profile is a named, reusable computation-environment template. Each
/// profile carries an ordered list of constants the caller can override at
/// submission time. Profiles are read-only from the client's perspective.

use serde::{Deserialize, Serialize};

use super::task::Constant;

/// A computation profile as returned by the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Profile name (unique identifier)
    pub name: String,

    /// Configurable constants, in platform-defined order
    #[serde(default)]
    pub constants: Vec<Constant>,
}
