//! Versioned envelopes for genesis and snapshot data.
//!
//! Identity providers, anonymity revokers and the cryptographic parameters are
//! distributed as JSON documents of the form `{"version": 0, "value": ...}`.
//! Only version [`SUPPORTED_ENVELOPE_VERSION`] is understood. Any other
//! version is rejected without looking at the payload, there is no migration
//! between versions.
use crate::constants::SUPPORTED_ENVELOPE_VERSION;
use serde::{de::DeserializeOwned, Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use std::path::Path;
use thiserror::Error;

/// A value together with the version of its serialization format.
#[derive(SerdeSerialize, Debug, Clone, PartialEq, Eq)]
pub struct VersionedEnvelope<T> {
    pub version: u32,
    pub value:   T,
}

impl<T> VersionedEnvelope<T> {
    /// Wrap a value in an envelope of the current version.
    pub fn new(value: T) -> Self {
        Self {
            version: SUPPORTED_ENVELOPE_VERSION,
            value,
        }
    }
}

/// Reasons an envelope could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The document is not an envelope, or its payload does not have the
    /// expected shape.
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(#[from] serde_json::Error),
    /// The envelope is well formed, but of an unsupported version.
    #[error("Unsupported envelope version {found}, expected version {expected}.")]
    VersionMismatch { expected: u32, found: i128 },
}

/// Failure to read an envelope from a file.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Could not read {path}: {source}")]
    Io {
        path:   String,
        source: std::io::Error,
    },
    #[error("Could not decode {path}: {source}")]
    Decode { path: String, source: DecodeError },
}

/// The envelope as it appears on the wire, before the version is checked.
#[derive(SerdeDeserialize)]
#[serde(deny_unknown_fields)]
struct RawEnvelope {
    version: serde_json::Number,
    value:   serde_json::Value,
}

impl RawEnvelope {
    fn open<T: DeserializeOwned>(self) -> Result<T, DecodeError> {
        let found = if let Some(v) = self.version.as_u64() {
            i128::from(v)
        } else if let Some(v) = self.version.as_i64() {
            i128::from(v)
        } else {
            return Err(DecodeError::MalformedEnvelope(serde::de::Error::custom(
                format_args!("Envelope version {} is not an integer.", self.version),
            )));
        };
        if found != i128::from(SUPPORTED_ENVELOPE_VERSION) {
            return Err(DecodeError::VersionMismatch {
                expected: SUPPORTED_ENVELOPE_VERSION,
                found,
            });
        }
        Ok(serde_json::from_value(self.value)?)
    }
}

/// Decode the payload of a JSON envelope, reporting why decoding failed.
pub fn decode_strict<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    serde_json::from_slice::<RawEnvelope>(bytes)?.open()
}

/// Decode the payload of a JSON envelope, discarding the reason for failure.
pub fn decode_lenient<T: DeserializeOwned>(bytes: &[u8]) -> Option<T> {
    match decode_strict(bytes) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(target: "ccd_updates", "Ignoring envelope: {e}");
            None
        }
    }
}

/// Like [`decode_strict`], but reading the envelope from a reader.
pub fn decode_reader<T: DeserializeOwned>(reader: impl std::io::Read) -> Result<T, DecodeError> {
    serde_json::from_reader::<_, RawEnvelope>(reader)?.open()
}

/// Encode a value in an envelope of the current version.
pub fn encode<T: SerdeSerialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&VersionedEnvelope::new(value))
}

/// Encode a value in an envelope of the current version, writing it to
/// `writer`.
pub fn encode_writer<T: SerdeSerialize>(
    writer: impl std::io::Write,
    value: &T,
) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, &VersionedEnvelope::new(value))
}

/// Read and decode an envelope from the file at `path`.
///
/// Failures are logged at `warn` level since they usually prevent a node from
/// starting.
pub fn read_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ReadError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|source| {
        tracing::warn!(target: "ccd_updates", "Could not open {path_str}: {source}");
        ReadError::Io {
            path: path_str.clone(),
            source,
        }
    })?;
    decode_reader(std::io::BufReader::new(file)).map_err(|source| {
        tracing::warn!(target: "ccd_updates", "Could not decode {path_str}: {source}");
        ReadError::Decode {
            path: path_str,
            source,
        }
    })
}

/// Encode a value in an envelope of the current version and write it to the
/// file at `path`.
pub fn write_file<T: SerdeSerialize>(path: impl AsRef<Path>, value: &T) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    encode_writer(std::io::BufWriter::new(file), value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::identity::{
        tests::{ar_info, ip_info},
        AnonymityRevokers, CryptographicParameters, IdentityProviders,
    };
    use rand::{rngs::SmallRng, Rng, SeedableRng};
    use serde_json::json;

    fn providers() -> IdentityProviders { (0..3).map(ip_info).collect() }

    #[test]
    fn test_decode_identity_providers() {
        let ips = providers();
        let bytes = serde_json::to_vec(&json!({
            "version": 0,
            "value": serde_json::to_value(&ips).unwrap()
        }))
        .unwrap();
        let decoded: IdentityProviders = decode_strict(&bytes).expect("Valid envelope.");
        assert_eq!(decoded, ips);
        assert_eq!(decode_lenient::<IdentityProviders>(&bytes), Some(ips));
    }

    #[test]
    fn test_version_checked_before_value() {
        let bytes = br#"{"version": 7, "value": "not identity providers"}"#;
        assert!(matches!(
            decode_strict::<IdentityProviders>(bytes),
            Err(DecodeError::VersionMismatch {
                expected: 0,
                found:    7,
            })
        ));
        assert_eq!(decode_lenient::<IdentityProviders>(bytes), None);
    }

    #[test]
    fn test_version_mismatch() {
        let value = serde_json::to_value(providers()).unwrap();
        let mut versions = vec![1, -1, i128::from(i64::MIN), i128::from(u64::MAX)];
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        versions.extend((0..50).map(|_| i128::from(rng.gen_range(1..=i64::MAX))));
        for found in versions {
            // serde_json has no i128 numbers without arbitrary precision, so
            // the document is written by hand.
            let doc = format!(r#"{{"version": {found}, "value": {value}}}"#);
            match decode_strict::<IdentityProviders>(doc.as_bytes()) {
                Err(DecodeError::VersionMismatch { expected, found: f }) => {
                    assert_eq!(expected, 0);
                    assert_eq!(f, found);
                }
                other => panic!("Version {found} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_malformed_envelopes() {
        let docs = [
            json!({"version": 0}),
            json!({"value": []}),
            json!({"version": 0, "value": [], "extra": 1}),
            json!({"version": 0.5, "value": []}),
            json!({"version": "0", "value": []}),
            json!({"version": 0, "value": {"not": "a list"}}),
            json!("envelope"),
        ];
        for doc in docs {
            let bytes = serde_json::to_vec(&doc).unwrap();
            assert!(
                matches!(
                    decode_strict::<IdentityProviders>(&bytes),
                    Err(DecodeError::MalformedEnvelope(_))
                ),
                "{doc} should be malformed."
            );
        }
        // Too large to be read as an integer.
        let huge = br#"{"version": 100000000000000000000000, "value": []}"#;
        assert!(matches!(
            decode_strict::<IdentityProviders>(huge),
            Err(DecodeError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_round_trips() {
        let ips = providers();
        assert_eq!(decode_strict::<IdentityProviders>(&encode(&ips).unwrap()).unwrap(), ips);

        let ars: AnonymityRevokers = (1..=4).map(ar_info).collect();
        assert_eq!(decode_strict::<AnonymityRevokers>(&encode(&ars).unwrap()).unwrap(), ars);

        let mut rng = SmallRng::seed_from_u64(17);
        for _ in 0..10 {
            let mut generators = vec![0u8; rng.gen_range(0..256)];
            rng.fill(&mut generators[..]);
            let mut commitment_key = vec![0u8; 96];
            rng.fill(&mut commitment_key[..]);
            let params = CryptographicParameters {
                genesis_string:          format!("Genesis {}", rng.gen::<u32>()),
                bulletproof_generators:  generators,
                on_chain_commitment_key: commitment_key,
            };
            let mut buf = Vec::new();
            encode_writer(&mut buf, &params).unwrap();
            assert_eq!(decode_reader::<CryptographicParameters>(&buf[..]).unwrap(), params);
            let encoded = encode(&params).unwrap();
            assert_eq!(decode_strict::<CryptographicParameters>(&encoded).unwrap(), params);
        }
    }

    #[test]
    fn test_read_file() {
        let path = std::env::temp_dir().join(format!("ars-{}.json", std::process::id()));
        let ars: AnonymityRevokers = (1..=2).map(ar_info).collect();
        write_file(&path, &ars).unwrap();
        let read: AnonymityRevokers = read_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(read, ars);
        assert!(matches!(
            read_file::<AnonymityRevokers>(&path),
            Err(ReadError::Io { .. })
        ));
    }

    #[test]
    fn test_read_file_decode_failure() {
        let path = std::env::temp_dir().join(format!("ips-{}.json", std::process::id()));
        std::fs::write(&path, br#"{"version": 3, "value": []}"#).unwrap();
        let res = read_file::<IdentityProviders>(&path);
        std::fs::remove_file(&path).unwrap();
        match res {
            Err(e @ ReadError::Decode { .. }) => {
                let msg = e.to_string();
                assert!(msg.contains(&path.display().to_string()), "{msg}");
                assert!(msg.contains("Unsupported envelope version 3"), "{msg}");
            }
            other => panic!("Expected a decoding failure, got {other:?}"),
        }
    }
}
