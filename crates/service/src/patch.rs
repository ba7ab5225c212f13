//! Serde helpers for partial-update payloads.

use serde::{Deserialize, Deserializer};

/// Distinguishes an explicit `null` from an absent field.
///
/// Use with `#[serde(default, deserialize_with = "crate::patch::nullable")]` on an
/// `Option<Option<T>>`: absent gives `None`, `null` gives `Some(None)` (clear the
/// column) and a value gives `Some(Some(v))`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
