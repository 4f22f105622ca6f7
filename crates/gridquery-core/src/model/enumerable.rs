use serde::{Deserialize, Serialize};

///
/// EnumerableValue
///
/// One labeled code of an enumerable field's fixed value set.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EnumerableValue {
    pub value: i32,
    pub label: String,
}

impl EnumerableValue {
    #[must_use]
    pub fn new(value: i32, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}
