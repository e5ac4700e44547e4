pub(crate) mod byte_array_hex {
    /// Serialize (via Serde) a byte array as a hex string.
    pub fn serialize<S: serde::Serializer>(dt: &[u8], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(hex::encode(dt).as_str())
    }

    /// Deserialize (via Serde) a byte array from a hex string.
    pub fn deserialize<'de, D: serde::Deserializer<'de>>(des: D) -> Result<Vec<u8>, D::Error> {
        struct HexVisitor;
        impl<'de> serde::de::Visitor<'de> for HexVisitor {
            type Value = Vec<u8>;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "A hex string.")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error, {
                let r = hex::decode(v).map_err(serde::de::Error::custom)?;
                Ok(r)
            }
        }
        des.deserialize_str(HexVisitor)
    }
}

pub(crate) mod deserialize_non_default {
    use serde::Deserialize;

    /// Deserialize a value, failing if it is equal to the default value of the
    /// type, e.g., a `0` numerator of an exchange rate.
    pub fn deserialize<'de, D, T>(des: D) -> Result<T, D::Error>
    where
        D: serde::Deserializer<'de>,
        T: Deserialize<'de> + Default + PartialEq, {
        let value = T::deserialize(des)?;
        if value == T::default() {
            Err(serde::de::Error::custom("Expected a non-default value."))
        } else {
            Ok(value)
        }
    }
}

pub(crate) mod duration_millis {
    use serde::Deserialize;
    /// Serialize (via Serde) chrono::Duration in milliseconds as an i64.
    pub fn serialize<S: serde::Serializer>(
        duration: &chrono::Duration,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        ser.serialize_i64(duration.num_milliseconds())
    }

    /// Deserialize (via Serde) chrono::Duration in milliseconds as an i64.
    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        des: D,
    ) -> Result<chrono::Duration, D::Error> {
        let millis = i64::deserialize(des)?;
        chrono::Duration::try_milliseconds(millis)
            .ok_or_else(|| serde::de::Error::custom("Duration in milliseconds out of range."))
    }
}

pub(crate) mod duration_seconds {
    use serde::Deserialize;
    /// Serialize (via Serde) chrono::Duration in whole seconds as an i64.
    pub fn serialize<S: serde::Serializer>(
        duration: &chrono::Duration,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        ser.serialize_i64(duration.num_seconds())
    }

    /// Deserialize (via Serde) chrono::Duration in seconds as an i64.
    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        des: D,
    ) -> Result<chrono::Duration, D::Error> {
        let secs = i64::deserialize(des)?;
        chrono::Duration::try_seconds(secs)
            .ok_or_else(|| serde::de::Error::custom("Duration in seconds out of range."))
    }
}

/// Values that are stored in a map keyed by one of their own fields, and are
/// transmitted as a plain list.
pub(crate) trait Keyed {
    type Key: Ord + Copy + std::fmt::Display;

    fn key(&self) -> Self::Key;
}

/// Serialize a map of [`Keyed`] values as a list of values in key order.
/// Deserialization rejects lists with duplicate keys.
pub(crate) mod keyed_list {
    use super::Keyed;
    use serde::de::Error;
    use std::{collections::BTreeMap, marker::PhantomData};

    pub fn serialize<S: serde::Serializer, V: Keyed + serde::Serialize>(
        dt: &BTreeMap<V::Key, V>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        ser.collect_seq(dt.values())
    }

    pub fn deserialize<'de, D, V>(des: D) -> Result<BTreeMap<V::Key, V>, D::Error>
    where
        D: serde::Deserializer<'de>,
        V: Keyed + serde::Deserialize<'de>, {
        struct KeyedVisitor<V> {
            _phantom: PhantomData<V>,
        }

        impl<'de, V: Keyed + serde::Deserialize<'de>> serde::de::Visitor<'de> for KeyedVisitor<V> {
            type Value = BTreeMap<V::Key, V>;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "A list of values with distinct identities.")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>, {
                let mut out = BTreeMap::new();
                while let Some(e) = seq.next_element::<V>()? {
                    let key = e.key();
                    if out.insert(key, e).is_some() {
                        return Err(A::Error::custom(format!(
                            "Duplicate identity {key} encountered."
                        )));
                    }
                }
                Ok(out)
            }
        }
        des.deserialize_seq(KeyedVisitor {
            _phantom: PhantomData,
        })
    }
}

pub(crate) mod ed25519_hex {
    /// Serialize (via Serde) an Ed25519 public key as a hex string.
    pub fn serialize<S: serde::Serializer>(
        key: &ed25519_dalek::VerifyingKey,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        super::byte_array_hex::serialize(key.as_bytes(), ser)
    }

    /// Deserialize (via Serde) an Ed25519 public key from a hex string,
    /// checking that it is a valid curve point.
    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        des: D,
    ) -> Result<ed25519_dalek::VerifyingKey, D::Error> {
        let bytes = super::byte_array_hex::deserialize(des)?;
        let bytes: [u8; ed25519_dalek::PUBLIC_KEY_LENGTH] =
            bytes.as_slice().try_into().map_err(|_| {
                serde::de::Error::custom(format!(
                    "Public key must be 32 bytes, but is {}.",
                    bytes.len()
                ))
            })?;
        ed25519_dalek::VerifyingKey::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}
