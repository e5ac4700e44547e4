//! Governance update values.
//!
//! An [`UpdateValue`] is a single governance update instruction together with
//! the [`ChainParameterVersion`] it was constructed for. Which kinds of update
//! exist in a version is decided by the [capability table](super::capabilities),
//! and the shape of the payload is decided by [`PayloadSchema::select`]. Both
//! are checked by [`UpdateValue::construct`], which is also the only way the
//! JSON decoder produces values, so an [`UpdateValue`] that exists is always
//! legal for its version.
use super::{
    basic::*,
    capabilities::{CapabilityFlag, ChainParameterVersion},
    chain_parameters::*,
    identity::{ArInfo, IpInfo},
    keys::{
        AuthorizationsV0, AuthorizationsV1, HigherLevelAccessStructure, Level1KeysKind,
        RootKeysKind,
    },
};
use derive_more::Display;
use serde::{de::Error as _, Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use sha2::Digest;
use thiserror::Error;

/// The kinds of governance updates.
#[derive(
    SerdeSerialize,
    SerdeDeserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Ord,
    PartialOrd,
    Display,
)]
#[serde(rename_all = "camelCase")]
pub enum UpdateKind {
    /// Announce a protocol update.
    Protocol,
    /// Update the election difficulty.
    ElectionDifficulty,
    /// Update the euro per energy exchange rate.
    EuroPerEnergy,
    /// Update the microCCD per euro exchange rate.
    #[serde(rename = "microGTUPerEuro")]
    MicroCcdPerEuro,
    /// Update the foundation account.
    FoundationAccount,
    /// Update the distribution of newly minted CCD.
    MintDistribution,
    /// Update the distribution of transaction fees.
    TransactionFeeDistribution,
    /// Update the GAS rewards.
    GasRewards,
    /// Update the pool parameters. Up to chain parameters version 0 this is
    /// only the baker stake threshold.
    PoolParameters,
    /// Add a new anonymity revoker.
    AddAnonymityRevoker,
    /// Add a new identity provider.
    AddIdentityProvider,
    /// Update the root keys.
    RootKeys,
    /// Update the level 1 keys.
    Level1Keys,
    /// Update the level 2 keys and the access structures built on them.
    Level2Keys,
    /// Update the cooldown periods of bakers and delegators.
    CooldownParameters,
    /// Update the reward period length and the mint rate.
    TimeParameters,
    /// Update the consensus timeout parameters.
    TimeoutParameters,
    /// Update the minimum time between blocks.
    MinBlockTime,
    /// Update the maximum energy of a block.
    BlockEnergyLimit,
    /// Update the parameters for selecting the finalization committee.
    FinalizationCommitteeParameters,
    /// Update the parameters of validator scores.
    ValidatorScoreParameters,
}

impl UpdateKind {
    /// All update kinds.
    pub const ALL: [UpdateKind; 21] = [
        UpdateKind::Protocol,
        UpdateKind::ElectionDifficulty,
        UpdateKind::EuroPerEnergy,
        UpdateKind::MicroCcdPerEuro,
        UpdateKind::FoundationAccount,
        UpdateKind::MintDistribution,
        UpdateKind::TransactionFeeDistribution,
        UpdateKind::GasRewards,
        UpdateKind::PoolParameters,
        UpdateKind::AddAnonymityRevoker,
        UpdateKind::AddIdentityProvider,
        UpdateKind::RootKeys,
        UpdateKind::Level1Keys,
        UpdateKind::Level2Keys,
        UpdateKind::CooldownParameters,
        UpdateKind::TimeParameters,
        UpdateKind::TimeoutParameters,
        UpdateKind::MinBlockTime,
        UpdateKind::BlockEnergyLimit,
        UpdateKind::FinalizationCommitteeParameters,
        UpdateKind::ValidatorScoreParameters,
    ];

    /// The feature that must be available for updates of this kind to exist,
    /// if any. Kinds without a required feature exist in every version.
    pub const fn required_capability(self) -> Option<CapabilityFlag> {
        match self {
            UpdateKind::ElectionDifficulty => Some(CapabilityFlag::ElectionDifficulty),
            UpdateKind::CooldownParameters => {
                Some(CapabilityFlag::CooldownParametersAccessStructure)
            }
            UpdateKind::TimeParameters => Some(CapabilityFlag::TimeParameters),
            UpdateKind::TimeoutParameters => Some(CapabilityFlag::TimeoutParameters),
            UpdateKind::MinBlockTime => Some(CapabilityFlag::MinBlockTime),
            UpdateKind::BlockEnergyLimit => Some(CapabilityFlag::BlockEnergyLimit),
            UpdateKind::FinalizationCommitteeParameters => {
                Some(CapabilityFlag::FinalizationCommitteeParameters)
            }
            UpdateKind::ValidatorScoreParameters => Some(CapabilityFlag::ValidatorScoreParameters),
            UpdateKind::Protocol
            | UpdateKind::EuroPerEnergy
            | UpdateKind::MicroCcdPerEuro
            | UpdateKind::FoundationAccount
            | UpdateKind::MintDistribution
            | UpdateKind::TransactionFeeDistribution
            | UpdateKind::GasRewards
            | UpdateKind::PoolParameters
            | UpdateKind::AddAnonymityRevoker
            | UpdateKind::AddIdentityProvider
            | UpdateKind::RootKeys
            | UpdateKind::Level1Keys
            | UpdateKind::Level2Keys => None,
        }
    }

    /// Whether updates of this kind exist in the given version.
    pub const fn is_supported(self, version: ChainParameterVersion) -> bool {
        match self.required_capability() {
            Some(flag) => version.supports(flag),
            None => true,
        }
    }
}

/// The shape of an update payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
///
/// Most variants are named after the type of the payload. Kinds whose payload
/// changed between chain parameter versions have one variant per shape.
pub enum PayloadSchema {
    /// A [`ProtocolUpdate`].
    ProtocolUpdate,
    /// An [`ElectionDifficulty`].
    ElectionDifficulty,
    /// An [`ExchangeRate`], used by both exchange rate updates.
    ExchangeRate,
    /// An [`AccountIndex`].
    AccountIndex,
    /// Mint distribution including the mint rate per slot.
    MintDistributionV0,
    /// Mint distribution without a mint rate.
    MintDistributionV1,
    TransactionFeeDistribution,
    /// GAS rewards including the reward for finalization proofs.
    GasRewardsV0,
    /// GAS rewards without the reward for finalization proofs.
    GasRewardsV1,
    /// Only the baker stake threshold.
    PoolParametersV0,
    /// Commission rates and bounds together with stake requirements.
    PoolParametersV1,
    ArInfo,
    IpInfo,
    /// A [`HigherLevelAccessStructure`] for the root keys.
    #[display(fmt = "HigherLevelAccessStructure<Root>")]
    RootKeys,
    /// A [`HigherLevelAccessStructure`] for the level 1 keys.
    #[display(fmt = "HigherLevelAccessStructure<Level1>")]
    Level1Keys,
    /// An [`AuthorizationsV0`].
    AuthorizationsV0,
    /// An [`AuthorizationsV1`], which adds the cooldown and time parameter
    /// access structures.
    AuthorizationsV1,
    CooldownParameters,
    TimeParameters,
    TimeoutParameters,
    /// A [`Duration`] in milliseconds.
    Duration,
    /// An amount of [`Energy`].
    Energy,
    FinalizationCommitteeParameters,
    ValidatorScoreParameters,
}

impl PayloadSchema {
    /// The payload schema of updates of kind `kind` in chain parameter version
    /// `version`. This is defined for every pair, including pairs where the
    /// kind does not exist. Encoding, decoding and construction of update
    /// values all go through this function.
    pub const fn select(kind: UpdateKind, version: ChainParameterVersion) -> PayloadSchema {
        use ChainParameterVersion::*;
        match kind {
            UpdateKind::Protocol => PayloadSchema::ProtocolUpdate,
            UpdateKind::ElectionDifficulty => PayloadSchema::ElectionDifficulty,
            UpdateKind::EuroPerEnergy | UpdateKind::MicroCcdPerEuro => PayloadSchema::ExchangeRate,
            UpdateKind::FoundationAccount => PayloadSchema::AccountIndex,
            UpdateKind::MintDistribution => match version {
                V0 => PayloadSchema::MintDistributionV0,
                V1 | V2 | V3 => PayloadSchema::MintDistributionV1,
            },
            UpdateKind::TransactionFeeDistribution => PayloadSchema::TransactionFeeDistribution,
            UpdateKind::GasRewards => match version {
                V0 | V1 => PayloadSchema::GasRewardsV0,
                V2 | V3 => PayloadSchema::GasRewardsV1,
            },
            UpdateKind::PoolParameters => match version {
                V0 => PayloadSchema::PoolParametersV0,
                V1 | V2 | V3 => PayloadSchema::PoolParametersV1,
            },
            UpdateKind::AddAnonymityRevoker => PayloadSchema::ArInfo,
            UpdateKind::AddIdentityProvider => PayloadSchema::IpInfo,
            UpdateKind::RootKeys => PayloadSchema::RootKeys,
            UpdateKind::Level1Keys => PayloadSchema::Level1Keys,
            UpdateKind::Level2Keys => match version {
                V0 => PayloadSchema::AuthorizationsV0,
                V1 | V2 | V3 => PayloadSchema::AuthorizationsV1,
            },
            UpdateKind::CooldownParameters => PayloadSchema::CooldownParameters,
            UpdateKind::TimeParameters => PayloadSchema::TimeParameters,
            UpdateKind::TimeoutParameters => PayloadSchema::TimeoutParameters,
            UpdateKind::MinBlockTime => PayloadSchema::Duration,
            UpdateKind::BlockEnergyLimit => PayloadSchema::Energy,
            UpdateKind::FinalizationCommitteeParameters => {
                PayloadSchema::FinalizationCommitteeParameters
            }
            UpdateKind::ValidatorScoreParameters => PayloadSchema::ValidatorScoreParameters,
        }
    }
}

/// SHA256 hash of a protocol update specification. The JSON representation is
/// a hex string.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct SpecificationHash {
    bytes: [u8; 32],
}

impl SpecificationHash {
    /// Hash the given specification document.
    pub fn of_document(document: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: sha2::Sha256::digest(document.as_ref()).into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8; 32] { &self.bytes }
}

impl From<[u8; 32]> for SpecificationHash {
    fn from(bytes: [u8; 32]) -> Self { Self { bytes } }
}

impl std::fmt::Display for SpecificationHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.bytes))
    }
}

impl std::str::FromStr for SpecificationHash {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| e.to_string())?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| format!("Hash must be 32 bytes, but is {}.", v.len()))?;
        Ok(Self { bytes })
    }
}

impl TryFrom<String> for SpecificationHash {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<SpecificationHash> for String {
    fn from(h: SpecificationHash) -> Self { h.to_string() }
}

#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// A generic protocol update. This is essentially an announcement of the
/// update. The details of the update will be communicated in some off-chain
/// way, and bakers will need to update their node software to support the
/// update.
pub struct ProtocolUpdate {
    pub message: String,
    #[serde(rename = "specificationURL")]
    pub specification_url: String,
    pub specification_hash: SpecificationHash,
    #[serde(with = "crate::internal::byte_array_hex")]
    pub specification_auxiliary_data: Vec<u8>,
}

impl ProtocolUpdate {
    /// Announce the protocol update described by `specification`, which is
    /// published at `specification_url`.
    pub fn new(
        message: String,
        specification_url: String,
        specification: &[u8],
        specification_auxiliary_data: Vec<u8>,
    ) -> Self {
        Self {
            message,
            specification_url,
            specification_hash: SpecificationHash::of_document(specification),
            specification_auxiliary_data,
        }
    }
}

/// The payload of a governance update. There is one variant for each
/// combination of update kind and payload schema.
///
/// The JSON serialization is only the payload itself, the kind and schema are
/// implied by the enclosing [`UpdateValue`].
#[derive(SerdeSerialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum UpdatePayload {
    Protocol(ProtocolUpdate),
    ElectionDifficulty(ElectionDifficulty),
    EuroPerEnergy(ExchangeRate),
    MicroCcdPerEuro(ExchangeRate),
    FoundationAccount(AccountIndex),
    MintDistributionV0(MintDistributionV0),
    MintDistributionV1(MintDistributionV1),
    TransactionFeeDistribution(TransactionFeeDistribution),
    GasRewardsV0(GasRewardsV0),
    GasRewardsV1(GasRewardsV1),
    PoolParametersV0(PoolParametersV0),
    PoolParametersV1(PoolParametersV1),
    AddAnonymityRevoker(Box<ArInfo>),
    AddIdentityProvider(Box<IpInfo>),
    RootKeys(HigherLevelAccessStructure<RootKeysKind>),
    Level1Keys(HigherLevelAccessStructure<Level1KeysKind>),
    Level2KeysV0(Box<AuthorizationsV0>),
    Level2KeysV1(Box<AuthorizationsV1>),
    CooldownParameters(CooldownParameters),
    TimeParameters(TimeParameters),
    TimeoutParameters(TimeoutParameters),
    MinBlockTime(Duration),
    BlockEnergyLimit(Energy),
    FinalizationCommitteeParameters(FinalizationCommitteeParameters),
    ValidatorScoreParameters(ValidatorScoreParameters),
}

impl UpdatePayload {
    /// The kind of update this payload belongs to.
    pub fn kind(&self) -> UpdateKind {
        match self {
            UpdatePayload::Protocol(_) => UpdateKind::Protocol,
            UpdatePayload::ElectionDifficulty(_) => UpdateKind::ElectionDifficulty,
            UpdatePayload::EuroPerEnergy(_) => UpdateKind::EuroPerEnergy,
            UpdatePayload::MicroCcdPerEuro(_) => UpdateKind::MicroCcdPerEuro,
            UpdatePayload::FoundationAccount(_) => UpdateKind::FoundationAccount,
            UpdatePayload::MintDistributionV0(_) | UpdatePayload::MintDistributionV1(_) => {
                UpdateKind::MintDistribution
            }
            UpdatePayload::TransactionFeeDistribution(_) => UpdateKind::TransactionFeeDistribution,
            UpdatePayload::GasRewardsV0(_) | UpdatePayload::GasRewardsV1(_) => {
                UpdateKind::GasRewards
            }
            UpdatePayload::PoolParametersV0(_) | UpdatePayload::PoolParametersV1(_) => {
                UpdateKind::PoolParameters
            }
            UpdatePayload::AddAnonymityRevoker(_) => UpdateKind::AddAnonymityRevoker,
            UpdatePayload::AddIdentityProvider(_) => UpdateKind::AddIdentityProvider,
            UpdatePayload::RootKeys(_) => UpdateKind::RootKeys,
            UpdatePayload::Level1Keys(_) => UpdateKind::Level1Keys,
            UpdatePayload::Level2KeysV0(_) | UpdatePayload::Level2KeysV1(_) => {
                UpdateKind::Level2Keys
            }
            UpdatePayload::CooldownParameters(_) => UpdateKind::CooldownParameters,
            UpdatePayload::TimeParameters(_) => UpdateKind::TimeParameters,
            UpdatePayload::TimeoutParameters(_) => UpdateKind::TimeoutParameters,
            UpdatePayload::MinBlockTime(_) => UpdateKind::MinBlockTime,
            UpdatePayload::BlockEnergyLimit(_) => UpdateKind::BlockEnergyLimit,
            UpdatePayload::FinalizationCommitteeParameters(_) => {
                UpdateKind::FinalizationCommitteeParameters
            }
            UpdatePayload::ValidatorScoreParameters(_) => UpdateKind::ValidatorScoreParameters,
        }
    }

    /// The schema of this payload.
    pub fn schema(&self) -> PayloadSchema {
        match self {
            UpdatePayload::Protocol(_) => PayloadSchema::ProtocolUpdate,
            UpdatePayload::ElectionDifficulty(_) => PayloadSchema::ElectionDifficulty,
            UpdatePayload::EuroPerEnergy(_) | UpdatePayload::MicroCcdPerEuro(_) => {
                PayloadSchema::ExchangeRate
            }
            UpdatePayload::FoundationAccount(_) => PayloadSchema::AccountIndex,
            UpdatePayload::MintDistributionV0(_) => PayloadSchema::MintDistributionV0,
            UpdatePayload::MintDistributionV1(_) => PayloadSchema::MintDistributionV1,
            UpdatePayload::TransactionFeeDistribution(_) => {
                PayloadSchema::TransactionFeeDistribution
            }
            UpdatePayload::GasRewardsV0(_) => PayloadSchema::GasRewardsV0,
            UpdatePayload::GasRewardsV1(_) => PayloadSchema::GasRewardsV1,
            UpdatePayload::PoolParametersV0(_) => PayloadSchema::PoolParametersV0,
            UpdatePayload::PoolParametersV1(_) => PayloadSchema::PoolParametersV1,
            UpdatePayload::AddAnonymityRevoker(_) => PayloadSchema::ArInfo,
            UpdatePayload::AddIdentityProvider(_) => PayloadSchema::IpInfo,
            UpdatePayload::RootKeys(_) => PayloadSchema::RootKeys,
            UpdatePayload::Level1Keys(_) => PayloadSchema::Level1Keys,
            UpdatePayload::Level2KeysV0(_) => PayloadSchema::AuthorizationsV0,
            UpdatePayload::Level2KeysV1(_) => PayloadSchema::AuthorizationsV1,
            UpdatePayload::CooldownParameters(_) => PayloadSchema::CooldownParameters,
            UpdatePayload::TimeParameters(_) => PayloadSchema::TimeParameters,
            UpdatePayload::TimeoutParameters(_) => PayloadSchema::TimeoutParameters,
            UpdatePayload::MinBlockTime(_) => PayloadSchema::Duration,
            UpdatePayload::BlockEnergyLimit(_) => PayloadSchema::Energy,
            UpdatePayload::FinalizationCommitteeParameters(_) => {
                PayloadSchema::FinalizationCommitteeParameters
            }
            UpdatePayload::ValidatorScoreParameters(_) => PayloadSchema::ValidatorScoreParameters,
        }
    }

    /// Parse a JSON payload of kind `kind` with the given schema.
    ///
    /// Pairs of kind and schema that no version selects are reported as an
    /// error.
    fn from_json(
        kind: UpdateKind,
        schema: PayloadSchema,
        value: serde_json::Value,
    ) -> serde_json::Result<Self> {
        use serde_json::from_value;
        let payload = match (kind, schema) {
            (UpdateKind::Protocol, PayloadSchema::ProtocolUpdate) => {
                UpdatePayload::Protocol(from_value(value)?)
            }
            (UpdateKind::ElectionDifficulty, PayloadSchema::ElectionDifficulty) => {
                UpdatePayload::ElectionDifficulty(from_value(value)?)
            }
            (UpdateKind::EuroPerEnergy, PayloadSchema::ExchangeRate) => {
                UpdatePayload::EuroPerEnergy(from_value(value)?)
            }
            (UpdateKind::MicroCcdPerEuro, PayloadSchema::ExchangeRate) => {
                UpdatePayload::MicroCcdPerEuro(from_value(value)?)
            }
            (UpdateKind::FoundationAccount, PayloadSchema::AccountIndex) => {
                UpdatePayload::FoundationAccount(from_value(value)?)
            }
            (UpdateKind::MintDistribution, PayloadSchema::MintDistributionV0) => {
                UpdatePayload::MintDistributionV0(from_value(value)?)
            }
            (UpdateKind::MintDistribution, PayloadSchema::MintDistributionV1) => {
                UpdatePayload::MintDistributionV1(from_value(value)?)
            }
            (UpdateKind::TransactionFeeDistribution, PayloadSchema::TransactionFeeDistribution) => {
                UpdatePayload::TransactionFeeDistribution(from_value(value)?)
            }
            (UpdateKind::GasRewards, PayloadSchema::GasRewardsV0) => {
                UpdatePayload::GasRewardsV0(from_value(value)?)
            }
            (UpdateKind::GasRewards, PayloadSchema::GasRewardsV1) => {
                UpdatePayload::GasRewardsV1(from_value(value)?)
            }
            (UpdateKind::PoolParameters, PayloadSchema::PoolParametersV0) => {
                UpdatePayload::PoolParametersV0(from_value(value)?)
            }
            (UpdateKind::PoolParameters, PayloadSchema::PoolParametersV1) => {
                UpdatePayload::PoolParametersV1(from_value(value)?)
            }
            (UpdateKind::AddAnonymityRevoker, PayloadSchema::ArInfo) => {
                UpdatePayload::AddAnonymityRevoker(from_value(value)?)
            }
            (UpdateKind::AddIdentityProvider, PayloadSchema::IpInfo) => {
                UpdatePayload::AddIdentityProvider(from_value(value)?)
            }
            (UpdateKind::RootKeys, PayloadSchema::RootKeys) => {
                UpdatePayload::RootKeys(from_value(value)?)
            }
            (UpdateKind::Level1Keys, PayloadSchema::Level1Keys) => {
                UpdatePayload::Level1Keys(from_value(value)?)
            }
            (UpdateKind::Level2Keys, PayloadSchema::AuthorizationsV0) => {
                UpdatePayload::Level2KeysV0(from_value(value)?)
            }
            (UpdateKind::Level2Keys, PayloadSchema::AuthorizationsV1) => {
                UpdatePayload::Level2KeysV1(from_value(value)?)
            }
            (UpdateKind::CooldownParameters, PayloadSchema::CooldownParameters) => {
                UpdatePayload::CooldownParameters(from_value(value)?)
            }
            (UpdateKind::TimeParameters, PayloadSchema::TimeParameters) => {
                UpdatePayload::TimeParameters(from_value(value)?)
            }
            (UpdateKind::TimeoutParameters, PayloadSchema::TimeoutParameters) => {
                UpdatePayload::TimeoutParameters(from_value(value)?)
            }
            (UpdateKind::MinBlockTime, PayloadSchema::Duration) => {
                UpdatePayload::MinBlockTime(from_value(value)?)
            }
            (UpdateKind::BlockEnergyLimit, PayloadSchema::Energy) => {
                UpdatePayload::BlockEnergyLimit(from_value(value)?)
            }
            (
                UpdateKind::FinalizationCommitteeParameters,
                PayloadSchema::FinalizationCommitteeParameters,
            ) => UpdatePayload::FinalizationCommitteeParameters(from_value(value)?),
            (UpdateKind::ValidatorScoreParameters, PayloadSchema::ValidatorScoreParameters) => {
                UpdatePayload::ValidatorScoreParameters(from_value(value)?)
            }
            (kind, schema) => {
                return Err(serde_json::Error::custom(format!(
                    "Updates of kind {kind} never have payload schema {schema}."
                )))
            }
        };
        Ok(payload)
    }
}

/// Reasons for rejecting a governance update.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UpdateValueError {
    #[error("Updates of kind {kind} are not supported in chain parameter version {version}.")]
    UnsupportedCapability {
        kind:    UpdateKind,
        version: ChainParameterVersion,
    },
    #[error(
        "The payload of an update of kind {kind} in chain parameter version {version} must have \
         schema {expected}."
    )]
    SchemaMismatch {
        kind:     UpdateKind,
        version:  ChainParameterVersion,
        expected: PayloadSchema,
    },
}

/// A governance update legal in its chain parameter version.
///
/// The JSON representation is
/// `{"chainParameterVersion": 2, "updateType": "minBlockTime", "update": 2000}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateValue {
    kind:    UpdateKind,
    version: ChainParameterVersion,
    payload: UpdatePayload,
}

impl UpdateValue {
    /// Construct an update of kind `kind` for chain parameter version
    /// `version`.
    ///
    /// This fails if the kind does not exist in the version, or if the payload
    /// is not of the schema selected by [`PayloadSchema::select`] for the
    /// kind and version. A payload of a different kind is always rejected.
    pub fn construct(
        kind: UpdateKind,
        version: ChainParameterVersion,
        payload: UpdatePayload,
    ) -> Result<Self, UpdateValueError> {
        if !kind.is_supported(version) {
            let err = UpdateValueError::UnsupportedCapability { kind, version };
            tracing::debug!(target: "ccd_updates", "Rejecting update: {err}");
            return Err(err);
        }
        let expected = PayloadSchema::select(kind, version);
        if payload.kind() != kind || payload.schema() != expected {
            tracing::debug!(
                target: "ccd_updates",
                "Rejecting update of kind {kind} with a {} payload of schema {}.",
                payload.kind(),
                payload.schema()
            );
            return Err(UpdateValueError::SchemaMismatch {
                kind,
                version,
                expected,
            });
        }
        Ok(Self {
            kind,
            version,
            payload,
        })
    }

    pub fn kind(&self) -> UpdateKind { self.kind }

    pub fn version(&self) -> ChainParameterVersion { self.version }

    pub fn payload(&self) -> &UpdatePayload { &self.payload }

    pub fn into_payload(self) -> UpdatePayload { self.payload }
}

mod repr {
    use super::*;

    #[derive(SerdeSerialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UpdateValueRef<'a> {
        pub(super) chain_parameter_version: ChainParameterVersion,
        pub(super) update_type:             UpdateKind,
        pub(super) update:                  &'a UpdatePayload,
    }

    #[derive(SerdeDeserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    pub struct UpdateValue {
        pub(super) chain_parameter_version: ChainParameterVersion,
        pub(super) update_type:             UpdateKind,
        pub(super) update:                  serde_json::Value,
    }
}

impl SerdeSerialize for UpdateValue {
    fn serialize<S: serde::Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        repr::UpdateValueRef {
            chain_parameter_version: self.version,
            update_type:             self.kind,
            update:                  &self.payload,
        }
        .serialize(ser)
    }
}

impl<'de> SerdeDeserialize<'de> for UpdateValue {
    fn deserialize<D: serde::Deserializer<'de>>(des: D) -> Result<Self, D::Error> {
        let repr::UpdateValue {
            chain_parameter_version: version,
            update_type: kind,
            update,
        } = repr::UpdateValue::deserialize(des)?;
        // Check the kind before looking at the payload, the selected schema is
        // meaningless for kinds that do not exist in the version.
        if !kind.is_supported(version) {
            let err = UpdateValueError::UnsupportedCapability { kind, version };
            tracing::debug!(target: "ccd_updates", "Rejecting update: {err}");
            return Err(D::Error::custom(err));
        }
        let schema = PayloadSchema::select(kind, version);
        let payload = UpdatePayload::from_json(kind, schema, update).map_err(|e| {
            tracing::debug!(
                target: "ccd_updates",
                "Rejecting update of kind {kind} in {version}, payload is not a {schema}: {e}"
            );
            D::Error::custom(e)
        })?;
        Self::construct(kind, version, payload).map_err(D::Error::custom)
    }
}
