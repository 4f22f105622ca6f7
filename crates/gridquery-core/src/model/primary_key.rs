use serde::{Deserialize, Serialize};

///
/// PrimaryKeyInfo
///
/// An entity's primary id and primary name attribute logical names.
/// Cached per entity; an entity missing either attribute caches as absent.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PrimaryKeyInfo {
    pub id_attribute: String,
    pub name_attribute: String,
}
