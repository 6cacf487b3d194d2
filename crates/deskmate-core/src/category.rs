//! Help category record.

use serde::{Deserialize, Serialize};

/// A help category the user can open a conversation under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier
    pub id: String,
    /// Display name, also sent as the `category` field of analyze requests
    pub name: String,
    /// Short description shown on the category picker
    pub description: String,
}
