//! Governance keys and the access structures that authorize chain updates.
use super::basic::{UpdateKeysIndex, UpdateKeysThreshold, UpdatePublicKey};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use std::{collections::BTreeSet, marker::PhantomData};
use thiserror::Error;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[doc(hidden)]
/// A tag for added type safety when using HigherLevelKeys.
/// This type deliberately has no values. It is meant to exist purely as a
/// type-level marker.
pub enum RootKeysKind {}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[doc(hidden)]
/// A tag for added type safety when using HigherLevelKeys.
/// This type deliberately has no values. It is meant to exist purely as a
/// type-level marker.
pub enum Level1KeysKind {}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessStructureError {
    #[error("Threshold {threshold} too large for {keys} keys.")]
    ThresholdTooLarge { threshold: u16, keys: usize },
    #[error("Key index {index} is out of bounds for {keys} keys.")]
    KeyIndexOutOfBounds { index: u16, keys: usize },
}

mod unchecked {
    use super::*;

    #[derive(SerdeDeserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    pub struct HigherLevelAccessStructure {
        pub(super) keys:      Vec<UpdatePublicKey>,
        pub(super) threshold: UpdateKeysThreshold,
    }

    #[derive(SerdeDeserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AccessStructure {
        pub(super) authorized_keys: BTreeSet<UpdateKeysIndex>,
        pub(super) threshold:       UpdateKeysThreshold,
    }
}

#[derive(Debug, SerdeSerialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Either root, level1, or level 2 access structure. They all have the same
/// structure, keys and a threshold. The phantom type parameter is used for
/// added type safety to distinguish different access structures in different
/// contexts.
pub struct HigherLevelAccessStructure<Kind> {
    pub(crate) keys:      Vec<UpdatePublicKey>,
    pub(crate) threshold: UpdateKeysThreshold,
    #[serde(skip)]
    pub(crate) _phantom:  PhantomData<Kind>,
}

impl<Kind> HigherLevelAccessStructure<Kind> {
    /// Construct a new access structure, checking that the threshold can be
    /// met by the given keys.
    pub fn new(
        keys: Vec<UpdatePublicKey>,
        threshold: UpdateKeysThreshold,
    ) -> Result<Self, AccessStructureError> {
        if usize::from(threshold.get()) > keys.len() {
            return Err(AccessStructureError::ThresholdTooLarge {
                threshold: threshold.get(),
                keys:      keys.len(),
            });
        }
        Ok(Self {
            keys,
            threshold,
            _phantom: PhantomData,
        })
    }

    pub fn keys(&self) -> &[UpdatePublicKey] { &self.keys }

    pub fn threshold(&self) -> UpdateKeysThreshold { self.threshold }
}

impl<'de, Kind> SerdeDeserialize<'de> for HigherLevelAccessStructure<Kind> {
    fn deserialize<D: serde::Deserializer<'de>>(des: D) -> Result<Self, D::Error> {
        let raw = unchecked::HigherLevelAccessStructure::deserialize(des)?;
        Self::new(raw.keys, raw.threshold).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, SerdeSerialize, SerdeDeserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "unchecked::AccessStructure")]
#[serde(rename_all = "camelCase")]
/// And access structure for performing chain updates. The access structure is
/// only meaningful in the context of a list of update keys to which the indices
/// refer to.
pub struct AccessStructure {
    pub(crate) authorized_keys: BTreeSet<UpdateKeysIndex>,
    pub(crate) threshold:       UpdateKeysThreshold,
}

impl AccessStructure {
    pub fn new(
        authorized_keys: BTreeSet<UpdateKeysIndex>,
        threshold: UpdateKeysThreshold,
    ) -> Result<Self, AccessStructureError> {
        if usize::from(threshold.get()) > authorized_keys.len() {
            return Err(AccessStructureError::ThresholdTooLarge {
                threshold: threshold.get(),
                keys:      authorized_keys.len(),
            });
        }
        Ok(Self {
            authorized_keys,
            threshold,
        })
    }

    pub fn authorized_keys(&self) -> &BTreeSet<UpdateKeysIndex> { &self.authorized_keys }

    pub fn threshold(&self) -> UpdateKeysThreshold { self.threshold }

    /// Check that every index refers to one of `num_keys` keys.
    fn check_indices(&self, num_keys: usize) -> Result<(), AccessStructureError> {
        match self.authorized_keys.last() {
            Some(idx) if usize::from(idx.index) >= num_keys => {
                Err(AccessStructureError::KeyIndexOutOfBounds {
                    index: idx.index,
                    keys:  num_keys,
                })
            }
            _ => Ok(()),
        }
    }
}

impl TryFrom<unchecked::AccessStructure> for AccessStructure {
    type Error = AccessStructureError;

    fn try_from(value: unchecked::AccessStructure) -> Result<Self, Self::Error> {
        Self::new(value.authorized_keys, value.threshold)
    }
}

#[derive(Debug, SerdeSerialize, SerdeDeserialize, Clone, PartialEq, Eq)]
#[serde(remote = "Self", rename_all = "camelCase", deny_unknown_fields)]
/// Access structures for each of the different possible chain updates, togehter
/// with the context giving all the possible keys.
///
/// Unknown keys are rejected, so a [`AuthorizationsV1`] object does not decode
/// as [`AuthorizationsV0`]. When flattened into [`AuthorizationsV1`] only the
/// keys of this structure are passed on.
pub struct AuthorizationsV0 {
    /// The list of all keys that are currently authorized to perform updates.
    pub keys: Vec<UpdatePublicKey>,
    /// Access structure for emergency updates.
    pub emergency: AccessStructure,
    /// Access structure for protocol updates.
    pub protocol: AccessStructure,
    /// Access structure for updating the election difficulty, or the consensus
    /// parameters from chain parameters version 2.
    pub election_difficulty: AccessStructure,
    /// Access structure for updating the euro to energy exchange rate.
    pub euro_per_energy: AccessStructure,
    #[serde(rename = "microGTUPerEuro")]
    /// Access structure for updating the microccd per euro exchange rate.
    pub micro_gtu_per_euro: AccessStructure,
    /// Access structure for updating the foundation account.
    pub foundation_account: AccessStructure,
    /// Access structure for updating the mint distribution parameters.
    pub mint_distribution: AccessStructure,
    /// Access structure for updating the transaction fee distribution.
    pub transaction_fee_distribution: AccessStructure,
    #[serde(rename = "paramGASRewards")]
    /// Access structure for updating the gas reward distribution parameters.
    pub param_gas_rewards: AccessStructure,
    /// Access structure for updating the pool parameters. For V0 this is only
    /// the baker stake threshold, for V1 there are more.
    pub pool_parameters: AccessStructure,
    /// Access structure for adding new anonymity revokers.
    pub add_anonymity_revoker: AccessStructure,
    /// Access structure for adding new identity providers.
    pub add_identity_provider: AccessStructure,
}

impl AuthorizationsV0 {
    fn access_structures(&self) -> [&AccessStructure; 12] {
        [
            &self.emergency,
            &self.protocol,
            &self.election_difficulty,
            &self.euro_per_energy,
            &self.micro_gtu_per_euro,
            &self.foundation_account,
            &self.mint_distribution,
            &self.transaction_fee_distribution,
            &self.param_gas_rewards,
            &self.pool_parameters,
            &self.add_anonymity_revoker,
            &self.add_identity_provider,
        ]
    }

    /// Check that all access structures only refer to existing keys.
    pub fn check_key_indices(&self) -> Result<(), AccessStructureError> {
        self.access_structures()
            .into_iter()
            .try_for_each(|a| a.check_indices(self.keys.len()))
    }
}

impl SerdeSerialize for AuthorizationsV0 {
    fn serialize<S: serde::Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        AuthorizationsV0::serialize(self, ser)
    }
}

impl<'de> SerdeDeserialize<'de> for AuthorizationsV0 {
    fn deserialize<D: serde::Deserializer<'de>>(des: D) -> Result<Self, D::Error> {
        let auths = AuthorizationsV0::deserialize(des)?;
        auths
            .check_key_indices()
            .map_err(serde::de::Error::custom)?;
        Ok(auths)
    }
}

#[derive(Debug, SerdeSerialize, SerdeDeserialize, Clone, PartialEq, Eq)]
#[serde(remote = "Self", rename_all = "camelCase")]
/// Access structures for each of the different possible chain updates, togehter
/// with the context giving all the possible keys.
pub struct AuthorizationsV1 {
    #[serde(flatten)]
    pub v0:                  AuthorizationsV0,
    /// Keys for changing cooldown periods related to baking and delegating.
    pub cooldown_parameters: AccessStructure,
    /// Keys for changing the lenghts of the reward period.
    pub time_parameters:     AccessStructure,
}

impl AuthorizationsV1 {
    /// Check that all access structures only refer to existing keys.
    pub fn check_key_indices(&self) -> Result<(), AccessStructureError> {
        self.v0.check_key_indices()?;
        self.cooldown_parameters.check_indices(self.v0.keys.len())?;
        self.time_parameters.check_indices(self.v0.keys.len())
    }
}

impl SerdeSerialize for AuthorizationsV1 {
    fn serialize<S: serde::Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        AuthorizationsV1::serialize(self, ser)
    }
}

impl<'de> SerdeDeserialize<'de> for AuthorizationsV1 {
    fn deserialize<D: serde::Deserializer<'de>>(des: D) -> Result<Self, D::Error> {
        let auths = AuthorizationsV1::deserialize(des)?;
        auths
            .check_key_indices()
            .map_err(serde::de::Error::custom)?;
        Ok(auths)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn test_keys(n: u8) -> Vec<UpdatePublicKey> {
        (1..=n)
            .map(|i| UpdatePublicKey::from(&ed25519_dalek::SigningKey::from_bytes(&[i; 32])))
            .collect()
    }

    pub(crate) fn single_key_access() -> AccessStructure {
        AccessStructure::new(
            [UpdateKeysIndex { index: 0 }].into_iter().collect(),
            UpdateKeysThreshold::try_from(1).unwrap(),
        )
        .unwrap()
    }

    pub(crate) fn authorizations_v0() -> AuthorizationsV0 {
        let a = single_key_access();
        AuthorizationsV0 {
            keys: test_keys(2),
            emergency: a.clone(),
            protocol: a.clone(),
            election_difficulty: a.clone(),
            euro_per_energy: a.clone(),
            micro_gtu_per_euro: a.clone(),
            foundation_account: a.clone(),
            mint_distribution: a.clone(),
            transaction_fee_distribution: a.clone(),
            param_gas_rewards: a.clone(),
            pool_parameters: a.clone(),
            add_anonymity_revoker: a.clone(),
            add_identity_provider: a,
        }
    }

    pub(crate) fn authorizations_v1() -> AuthorizationsV1 {
        AuthorizationsV1 {
            v0:                  authorizations_v0(),
            cooldown_parameters: single_key_access(),
            time_parameters:     single_key_access(),
        }
    }

    #[test]
    fn test_threshold_too_large() {
        let keys = test_keys(1);
        let threshold = UpdateKeysThreshold::try_from(2).unwrap();
        assert_eq!(
            HigherLevelAccessStructure::<RootKeysKind>::new(keys.clone(), threshold),
            Err(AccessStructureError::ThresholdTooLarge {
                threshold: 2,
                keys:      1,
            })
        );
        let json = json!({
            "keys": serde_json::to_value(&keys).unwrap(),
            "threshold": 2
        });
        assert!(
            serde_json::from_value::<HigherLevelAccessStructure<Level1KeysKind>>(json).is_err()
        );
        assert!(serde_json::from_value::<AccessStructure>(json!({
            "authorizedKeys": [0],
            "threshold": 0
        }))
        .is_err());
    }

    #[test]
    fn test_authorizations_json() {
        let v1 = authorizations_v1();
        let value = serde_json::to_value(&v1).unwrap();
        // The V0 fields are flattened into the V1 object.
        assert!(value.get("emergency").is_some());
        assert!(value.get("cooldownParameters").is_some());
        let back: AuthorizationsV1 = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(back, v1);
        assert!(serde_json::from_value::<AuthorizationsV0>(value).is_err());
        let v0_value = serde_json::to_value(&v1.v0).unwrap();
        let v0: AuthorizationsV0 = serde_json::from_value(v0_value.clone()).unwrap();
        assert_eq!(v0, v1.v0);
        // The V0 object lacks the V1 access structures.
        assert!(serde_json::from_value::<AuthorizationsV1>(v0_value).is_err());
    }

    #[test]
    fn test_authorizations_index_out_of_bounds() {
        let mut auths = authorizations_v0();
        auths.protocol = AccessStructure::new(
            [UpdateKeysIndex { index: 5 }].into_iter().collect(),
            UpdateKeysThreshold::try_from(1).unwrap(),
        )
        .unwrap();
        let value = serde_json::to_value(&auths).unwrap();
        assert!(serde_json::from_value::<AuthorizationsV0>(value).is_err());
    }
}
