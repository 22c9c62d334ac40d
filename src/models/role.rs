use serde::{Deserialize, Serialize};

/// One of the two fixed partner identities. Every mood and message is tagged
/// with exactly one of these; there is no third value and no user table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "partner_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Girl,
    Boy,
}
