// SPDX-License-Identifier: GPL-3.0-or-later

//! Lenient decoding primitives for the Last.fm wire format.
//!
//! The service encodes most numbers as strings (`"page": "1"`) and
//! booleans as `"0"`/`"1"`, but older endpoints still emit native
//! numbers. Every helper here tries the string form first (the
//! service's primary encoding) and falls back to the native form, so
//! the two representations decode identically.
//!
//! Defaulting is deliberately narrow: only an *absent* value or an
//! *empty string* is softened. A non-empty value that fails to parse is
//! corrupt data and aborts the decode.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserializer};
use serde::Deserialize;

/// A scalar exactly as it appeared on the wire, before any policy is
/// applied. String first: untagged resolution tries variants in order,
/// which encodes the string-primary precedence.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Scalar {
    /// `"1"` (or any non-zero native number) reads as true, everything
    /// else as false. Never fails.
    pub fn truthy(&self) -> bool {
        match self {
            Scalar::Text(s) => s == "1",
            Scalar::Int(n) => *n != 0,
            Scalar::Float(x) => *x != 0.0,
        }
    }

    fn describe(&self) -> String {
        match self {
            Scalar::Text(s) => format!("'{s}'"),
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(x) => x.to_string(),
        }
    }
}

/// Decode an optional counter: absent or empty maps to `None`, a
/// parseable value maps to `Some`, anything else is an error naming the
/// field and the entity being decoded.
pub(crate) fn opt_f64<E: de::Error>(
    value: Option<Scalar>,
    field: &str,
    entity: &str,
) -> Result<Option<f64>, E> {
    match value {
        None => Ok(None),
        Some(Scalar::Text(s)) if s.is_empty() => Ok(None),
        Some(Scalar::Text(s)) => s.parse::<f64>().map(Some).map_err(|_| {
            E::custom(format!("{field} is not a valid number for {entity}"))
        }),
        Some(Scalar::Int(n)) => Ok(Some(n as f64)),
        Some(Scalar::Float(x)) => Ok(Some(x)),
    }
}

/// Like [`opt_f64`] but for integral counters.
pub(crate) fn opt_u64<E: de::Error>(
    value: Option<Scalar>,
    field: &str,
    entity: &str,
) -> Result<Option<u64>, E> {
    let bad = || E::custom(format!("{field} is not a valid number for {entity}"));
    match value {
        None => Ok(None),
        Some(Scalar::Text(s)) if s.is_empty() => Ok(None),
        Some(Scalar::Text(s)) => s.parse::<u64>().map(Some).map_err(|_| bad()),
        Some(Scalar::Int(n)) => u64::try_from(n).map(Some).map_err(|_| bad()),
        Some(Scalar::Float(_)) => Err(bad()),
    }
}

/// Decode a soft-defaulting counter: absent or empty becomes zero.
pub(crate) fn f64_or_zero<E: de::Error>(
    value: Option<Scalar>,
    field: &str,
    entity: &str,
) -> Result<f64, E> {
    Ok(opt_f64(value, field, entity)?.unwrap_or(0.0))
}

pub(crate) fn u64_or_zero<E: de::Error>(
    value: Option<Scalar>,
    field: &str,
    entity: &str,
) -> Result<u64, E> {
    Ok(opt_u64(value, field, entity)?.unwrap_or(0))
}

pub(crate) fn u32_or_zero<E: de::Error>(
    value: Option<Scalar>,
    field: &str,
    entity: &str,
) -> Result<u32, E> {
    let n = u64_or_zero(value, field, entity)?;
    u32::try_from(n)
        .map_err(|_| E::custom(format!("{field} is out of range for {entity}")))
}

/// Decode a required counter with no softening: identity-adjacent
/// numbers (info-page playcounts) where a default would silently
/// propagate a wrong value downstream.
pub(crate) fn strict_f64<E: de::Error>(
    value: Scalar,
    field: &str,
    entity: &str,
) -> Result<f64, E> {
    match value {
        Scalar::Text(s) => s.parse().map_err(|_| {
            E::custom(format!("{field} is not a valid number for {entity}"))
        }),
        Scalar::Int(n) => Ok(n as f64),
        Scalar::Float(x) => Ok(x),
    }
}

/// Identifiers come through as `""` when the service has none; an empty
/// identifier carries no information, so it collapses to `None`.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// `deserialize_with` shim for derived structs: string-or-number field
/// defaulting to zero when absent or empty.
pub fn soft_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    match value {
        None => Ok(0),
        Some(Scalar::Text(s)) if s.is_empty() => Ok(0),
        Some(Scalar::Text(s)) => s
            .parse::<u64>()
            .map_err(|_| de::Error::custom(format!("'{s}' is not a valid number"))),
        Some(Scalar::Int(n)) => {
            u64::try_from(n).map_err(|_| de::Error::custom(format!("{n} is not a valid count")))
        }
        Some(other) => Err(de::Error::custom(format!(
            "{} is not a valid count",
            other.describe()
        ))),
    }
}

pub fn soft_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = soft_u64(deserializer)?;
    u32::try_from(n).map_err(|_| de::Error::custom(format!("{n} is out of range")))
}

/// `"1"` is true, anything else (including an absent key) is false.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(|s| s.truthy())
        .unwrap_or(false))
}

/// The service returns a bare object instead of a one-element array
/// when a collection holds exactly one item.
///
/// Branches on the wire shape rather than going through an untagged
/// enum: untagged resolution reports a generic "did not match any
/// variant" error, which would discard the field-and-entity message a
/// failing element produced.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct OneOrMany<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> de::Visitor<'de> for OneOrMany<T> {
        type Value = Vec<T>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a sequence or a single element")
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(item) = seq.next_element()? {
                items.push(item);
            }
            Ok(items)
        }

        fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
        where
            A: de::MapAccess<'de>,
        {
            let item = T::deserialize(de::value::MapAccessDeserializer::new(map))?;
            Ok(vec![item])
        }
    }

    deserializer.deserialize_any(OneOrMany(PhantomData))
}

/// Timestamp container (`{"uts": "...", "#text": "..."}`) attached to
/// loved tracks, friends, and recent plays.
#[derive(Debug, Clone, Deserialize)]
pub struct EpochStamp {
    pub uts: Scalar,
    #[serde(rename = "#text", default)]
    pub text: Option<String>,
}

impl EpochStamp {
    /// Parse the epoch seconds, or `None` when the value is garbage.
    pub fn seconds(&self) -> Option<i64> {
        match &self.uts {
            Scalar::Text(s) => s.parse().ok(),
            Scalar::Int(n) => Some(*n),
            Scalar::Float(_) => None,
        }
    }
}
