//! Node-local operating limits.
//!
//! These are read once when the node starts, either from a JSON document or
//! from [`RuntimeParameters::default`], and are independent of the chain
//! parameters. A document is either wholly valid or rejected.
use crate::constants::*;
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use std::path::Path;
use thiserror::Error;

mod unchecked {
    use super::*;

    /// The document as written by the operator. Sizes are signed so that a
    /// negative size is reported against its key.
    #[derive(SerdeDeserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    pub struct RuntimeParameters {
        pub block_size: i128,
        #[serde(with = "crate::internal::duration_millis")]
        pub block_timeout: chrono::Duration,
        #[serde(with = "crate::internal::duration_millis")]
        pub early_block_threshold: chrono::Duration,
        #[serde(with = "crate::internal::duration_millis")]
        pub max_baking_delay: chrono::Duration,
        pub insertions_before_transaction_purge: u64,
        #[serde(with = "crate::internal::duration_seconds")]
        pub transactions_keep_alive_time: chrono::Duration,
        #[serde(with = "crate::internal::duration_seconds")]
        pub transactions_purging_delay: chrono::Duration,
        pub accounts_cache_size: i128,
        pub modules_cache_size: u64,
    }
}

/// Limits the node operates under.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", try_from = "unchecked::RuntimeParameters")]
pub struct RuntimeParameters {
    /// Maximum size of a block in bytes. Always positive.
    pub block_size: u64,
    /// Time budget for constructing a block.
    #[serde(with = "crate::internal::duration_millis")]
    pub block_timeout: chrono::Duration,
    /// Blocks received further than this ahead of their slot or round are
    /// considered early. Always positive.
    #[serde(with = "crate::internal::duration_millis")]
    pub early_block_threshold: chrono::Duration,
    /// Maximum time baking of a block may be delayed.
    #[serde(with = "crate::internal::duration_millis")]
    pub max_baking_delay: chrono::Duration,
    /// Number of transaction insertions between purges of the transaction
    /// table.
    pub insertions_before_transaction_purge: u64,
    /// How long a transaction is kept after it was last received.
    #[serde(with = "crate::internal::duration_seconds")]
    pub transactions_keep_alive_time: chrono::Duration,
    /// Time between purges of the transaction table.
    #[serde(with = "crate::internal::duration_seconds")]
    pub transactions_purging_delay: chrono::Duration,
    /// Number of accounts kept in the cache. Always positive.
    pub accounts_cache_size: u64,
    /// Number of smart contract modules kept in the cache.
    pub modules_cache_size: u64,
}

/// A runtime parameter with a value outside its allowed range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid runtime parameter {field}: {reason}")]
pub struct ValidationError {
    /// The name of the offending key in the configuration document.
    pub field:  &'static str,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum RuntimeParametersError {
    /// The document does not have the required keys, or their values are of
    /// the wrong type.
    #[error("Malformed runtime parameters: {0}")]
    Structure(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(#[from] ValidationError),
    #[error("Could not read runtime parameters: {0}")]
    Io(#[from] std::io::Error),
}

/// Convert a size to `u64`, requiring it to be positive.
fn positive_size(field: &'static str, name: &str, size: i128) -> Result<u64, ValidationError> {
    if size <= 0 {
        return Err(ValidationError {
            field,
            reason: format!("{name} must be positive, but is {size}."),
        });
    }
    u64::try_from(size).map_err(|_| ValidationError {
        field,
        reason: format!("{name} {size} is too large."),
    })
}

impl TryFrom<unchecked::RuntimeParameters> for RuntimeParameters {
    type Error = ValidationError;

    /// Checks are made in the same order as [`RuntimeParameters::validate`].
    fn try_from(value: unchecked::RuntimeParameters) -> Result<Self, Self::Error> {
        let block_size = positive_size("blockSize", "Block size", value.block_size)?;
        check_early_block_threshold(value.early_block_threshold)?;
        let accounts_cache_size =
            positive_size("accountsCacheSize", "Accounts cache size", value.accounts_cache_size)?;
        Ok(Self {
            block_size,
            block_timeout: value.block_timeout,
            early_block_threshold: value.early_block_threshold,
            max_baking_delay: value.max_baking_delay,
            insertions_before_transaction_purge: value.insertions_before_transaction_purge,
            transactions_keep_alive_time: value.transactions_keep_alive_time,
            transactions_purging_delay: value.transactions_purging_delay,
            accounts_cache_size,
            modules_cache_size: value.modules_cache_size,
        })
    }
}

fn check_early_block_threshold(threshold: chrono::Duration) -> Result<(), ValidationError> {
    if threshold <= chrono::Duration::zero() {
        return Err(ValidationError {
            field:  "earlyBlockThreshold",
            reason: format!(
                "Early block threshold must be positive, but is {}ms.",
                threshold.num_milliseconds()
            ),
        });
    }
    Ok(())
}

impl Default for RuntimeParameters {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            block_timeout: chrono::Duration::milliseconds(DEFAULT_BLOCK_TIMEOUT_MILLIS),
            early_block_threshold: chrono::Duration::milliseconds(
                DEFAULT_EARLY_BLOCK_THRESHOLD_MILLIS,
            ),
            max_baking_delay: chrono::Duration::milliseconds(DEFAULT_MAX_BAKING_DELAY_MILLIS),
            insertions_before_transaction_purge: DEFAULT_INSERTIONS_BEFORE_TRANSACTION_PURGE,
            transactions_keep_alive_time: chrono::Duration::seconds(
                DEFAULT_TRANSACTIONS_KEEP_ALIVE_SECS,
            ),
            transactions_purging_delay: chrono::Duration::seconds(
                DEFAULT_TRANSACTIONS_PURGING_DELAY_SECS,
            ),
            accounts_cache_size: DEFAULT_ACCOUNTS_CACHE_SIZE,
            modules_cache_size: DEFAULT_MODULES_CACHE_SIZE,
        }
    }
}

impl RuntimeParameters {
    /// Parse and validate a JSON document. The document must contain exactly
    /// the keys of [`RuntimeParameters`] in camel case.
    ///
    /// A value outside its allowed range is reported as
    /// [`RuntimeParametersError::Invalid`] naming the key, a document of the
    /// wrong shape as [`RuntimeParametersError::Structure`].
    pub fn parse(doc: &str) -> Result<Self, RuntimeParametersError> {
        let params: unchecked::RuntimeParameters = serde_json::from_str(doc)?;
        Ok(Self::try_from(params)?)
    }

    /// Like [`parse`](Self::parse), but for an already parsed document.
    pub fn from_value(doc: serde_json::Value) -> Result<Self, RuntimeParametersError> {
        let params: unchecked::RuntimeParameters = serde_json::from_value(doc)?;
        Ok(Self::try_from(params)?)
    }

    /// Read and validate the document at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RuntimeParametersError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents).map_err(|e| {
            tracing::warn!(
                target: "ccd_updates",
                "Rejecting runtime parameters in {}: {e}",
                path.display()
            );
            e
        })
    }

    /// Check the invariants of the parameters. Only the first violation is
    /// reported, in the order block size, early block threshold, accounts
    /// cache size.
    pub fn validate(&self) -> Result<(), ValidationError> {
        positive_size("blockSize", "Block size", self.block_size.into())?;
        check_early_block_threshold(self.early_block_threshold)?;
        positive_size(
            "accountsCacheSize",
            "Accounts cache size",
            self.accounts_cache_size.into(),
        )?;
        Ok(())
    }

    /// The document form of the parameters, accepted by
    /// [`from_value`](Self::from_value).
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "blockSize": self.block_size,
            "blockTimeout": self.block_timeout.num_milliseconds(),
            "earlyBlockThreshold": self.early_block_threshold.num_milliseconds(),
            "maxBakingDelay": self.max_baking_delay.num_milliseconds(),
            "insertionsBeforeTransactionPurge": self.insertions_before_transaction_purge,
            "transactionsKeepAliveTime": self.transactions_keep_alive_time.num_seconds(),
            "transactionsPurgingDelay": self.transactions_purging_delay.num_seconds(),
            "accountsCacheSize": self.accounts_cache_size,
            "modulesCacheSize": self.modules_cache_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> serde_json::Value {
        json!({
            "blockSize": 4_000_000,
            "blockTimeout": 2_500,
            "earlyBlockThreshold": 20_000,
            "maxBakingDelay": 5_000,
            "insertionsBeforeTransactionPurge": 500,
            "transactionsKeepAliveTime": 600,
            "transactionsPurgingDelay": 60,
            "accountsCacheSize": 5_000,
            "modulesCacheSize": 100
        })
    }

    #[test]
    fn test_parse() {
        let params = RuntimeParameters::parse(&document().to_string()).unwrap();
        assert_eq!(params.block_size, 4_000_000);
        assert_eq!(params.block_timeout, chrono::Duration::milliseconds(2_500));
        assert_eq!(params.transactions_keep_alive_time, chrono::Duration::minutes(10));
        assert_eq!(params.to_json(), document());
        // The serde representation agrees with the document form.
        assert_eq!(serde_json::to_value(params).unwrap(), document());
    }

    #[test]
    fn test_zero_block_size() {
        let mut doc = document();
        doc["blockSize"] = json!(0);
        match RuntimeParameters::from_value(doc) {
            Err(RuntimeParametersError::Invalid(e)) => assert_eq!(e.field, "blockSize"),
            other => panic!("Expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_first_violation_reported() {
        let mut doc = document();
        doc["earlyBlockThreshold"] = json!(-1);
        doc["accountsCacheSize"] = json!(0);
        match RuntimeParameters::from_value(doc.clone()) {
            Err(RuntimeParametersError::Invalid(e)) => {
                assert_eq!(e.field, "earlyBlockThreshold")
            }
            other => panic!("Expected a validation error, got {other:?}"),
        }
        doc["earlyBlockThreshold"] = json!(1);
        match RuntimeParameters::from_value(doc) {
            Err(RuntimeParametersError::Invalid(e)) => assert_eq!(e.field, "accountsCacheSize"),
            other => panic!("Expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_structural_failures() {
        let mut missing = document();
        missing.as_object_mut().unwrap().remove("modulesCacheSize");
        let mut unknown = document();
        unknown["bakingThreads"] = json!(4);
        let mut wrong_type = document();
        wrong_type["blockSize"] = json!("large");
        let mut fractional = document();
        fractional["accountsCacheSize"] = json!(2.5);
        for doc in [missing, unknown, wrong_type, fractional] {
            assert!(matches!(
                RuntimeParameters::from_value(doc),
                Err(RuntimeParametersError::Structure(_))
            ));
        }
    }

    #[test]
    fn test_negative_sizes_name_the_field() {
        for (field, value) in [
            ("blockSize", -1i64),
            ("blockSize", i64::MIN),
            ("accountsCacheSize", -5),
        ] {
            let mut doc = document();
            doc[field] = json!(value);
            match RuntimeParameters::parse(&doc.to_string()) {
                Err(RuntimeParametersError::Invalid(e)) => {
                    assert_eq!(e.field, field);
                    assert!(e.reason.contains(&value.to_string()), "{}", e.reason);
                }
                other => panic!("Expected a validation error for {field}, got {other:?}"),
            }
        }
        // A negative block size is reported before a bad threshold.
        let mut doc = document();
        doc["blockSize"] = json!(-1);
        doc["earlyBlockThreshold"] = json!(0);
        doc["accountsCacheSize"] = json!(-1);
        match RuntimeParameters::from_value(doc) {
            Err(RuntimeParametersError::Invalid(e)) => assert_eq!(e.field, "blockSize"),
            other => panic!("Expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_serde_deserialize_validates() {
        let mut doc = document();
        doc["accountsCacheSize"] = json!(-5);
        let err = serde_json::from_value::<RuntimeParameters>(doc).unwrap_err();
        assert!(err.to_string().contains("accountsCacheSize"), "{err}");
        assert_eq!(
            serde_json::from_value::<RuntimeParameters>(document()).unwrap(),
            RuntimeParameters::parse(&document().to_string()).unwrap()
        );
    }

    #[test]
    fn test_default() {
        let params = RuntimeParameters::default();
        assert_eq!(params.validate(), Ok(()));
        assert_eq!(params.block_size, 10_000_000);
        assert_eq!(params.early_block_threshold, chrono::Duration::seconds(30));
        assert_eq!(params.transactions_purging_delay, chrono::Duration::minutes(3));
        assert_eq!(
            RuntimeParameters::parse(&params.to_json().to_string()).unwrap(),
            params
        );
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("runtime-{}.json", std::process::id()));
        std::fs::write(&path, document().to_string()).unwrap();
        let params = RuntimeParameters::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(params.modules_cache_size, 100);
        assert!(matches!(
            RuntimeParameters::from_file(&path),
            Err(RuntimeParametersError::Io(_))
        ));
    }
}
