//! Protocol generations and the optional features available in each of them.
//!
//! The chain parameters evolve in discrete generations, the
//! [chain parameter versions](ChainParameterVersion). Which governance
//! features are available in a given generation is answered by [`supports`],
//! and this is the only place where that relation is defined.

use derive_more::Display;
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use std::convert::TryFrom;
use thiserror::Error;

/// An enumeration of the supported versions of the consensus protocol.
/// Binary and JSON serializations are as Word64 corresponding to the protocol
/// number.
#[derive(
    SerdeSerialize, SerdeDeserialize, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Display,
)]
#[serde(into = "u64", try_from = "u64")]
pub enum ProtocolVersion {
    #[display(fmt = "P1")]
    P1,
    #[display(fmt = "P2")]
    P2,
    #[display(fmt = "P3")]
    P3,
    #[display(fmt = "P4")]
    P4,
    #[display(fmt = "P5")]
    P5,
    #[display(fmt = "P6")]
    P6,
    #[display(fmt = "P7")]
    P7,
    #[display(fmt = "P8")]
    P8,
    #[display(fmt = "P9")]
    P9,
}

#[derive(Debug, Error, Display)]
#[display(fmt = "Unknown protocol version {}.", version)]
/// A structure to represent conversion errors when converting integers to
/// protocol versions.
pub struct UnknownProtocolVersion {
    /// The version that was attempted to be converted, but is not supported.
    pub version: u64,
}

impl TryFrom<u64> for ProtocolVersion {
    type Error = UnknownProtocolVersion;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ProtocolVersion::P1),
            2 => Ok(ProtocolVersion::P2),
            3 => Ok(ProtocolVersion::P3),
            4 => Ok(ProtocolVersion::P4),
            5 => Ok(ProtocolVersion::P5),
            6 => Ok(ProtocolVersion::P6),
            7 => Ok(ProtocolVersion::P7),
            8 => Ok(ProtocolVersion::P8),
            9 => Ok(ProtocolVersion::P9),
            version => Err(UnknownProtocolVersion { version }),
        }
    }
}

impl From<ProtocolVersion> for u64 {
    fn from(pv: ProtocolVersion) -> Self {
        match pv {
            ProtocolVersion::P1 => 1,
            ProtocolVersion::P2 => 2,
            ProtocolVersion::P3 => 3,
            ProtocolVersion::P4 => 4,
            ProtocolVersion::P5 => 5,
            ProtocolVersion::P6 => 6,
            ProtocolVersion::P7 => 7,
            ProtocolVersion::P8 => 8,
            ProtocolVersion::P9 => 9,
        }
    }
}

impl ProtocolVersion {
    /// The chain parameter version used by this protocol version.
    pub const fn chain_parameter_version(self) -> ChainParameterVersion {
        use ProtocolVersion::*;
        match self {
            P1 | P2 | P3 => ChainParameterVersion::V0,
            P4 | P5 => ChainParameterVersion::V1,
            P6 | P7 => ChainParameterVersion::V2,
            P8 | P9 => ChainParameterVersion::V3,
        }
    }
}

/// A generation of the chain parameters. Versions are totally ordered, later
/// versions compare greater. The JSON representation is the version number.
#[derive(
    SerdeSerialize,
    SerdeDeserialize,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Display,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum ChainParameterVersion {
    /// Chain parameters of protocol versions 1 to 3.
    #[display(fmt = "CPV0")]
    V0,
    /// Chain parameters of protocol versions 4 and 5, introducing delegation.
    #[display(fmt = "CPV1")]
    V1,
    /// Chain parameters of protocol versions 6 and 7, introducing the
    /// timeout-based consensus protocol.
    #[display(fmt = "CPV2")]
    V2,
    /// Chain parameters of protocol version 8 onwards, introducing validator
    /// suspension.
    #[display(fmt = "CPV3")]
    V3,
}

#[derive(Debug, Error, Display, PartialEq, Eq)]
#[display(fmt = "Unknown chain parameter version {}.", version)]
/// An integer that does not denote a known [`ChainParameterVersion`].
pub struct UnknownChainParameterVersion {
    pub version: u8,
}

impl ChainParameterVersion {
    /// All chain parameter versions in increasing order.
    pub const ALL: [ChainParameterVersion; 4] = [
        ChainParameterVersion::V0,
        ChainParameterVersion::V1,
        ChainParameterVersion::V2,
        ChainParameterVersion::V3,
    ];

    /// Whether the given feature is available in this version.
    pub const fn supports(self, flag: CapabilityFlag) -> bool { supports(self, flag) }

    /// The features available in this version, in the order of
    /// [`CapabilityFlag::ALL`].
    pub fn supported_capabilities(self) -> impl Iterator<Item = CapabilityFlag> {
        CapabilityFlag::ALL
            .into_iter()
            .filter(move |flag| supports(self, *flag))
    }
}

impl TryFrom<u8> for ChainParameterVersion {
    type Error = UnknownChainParameterVersion;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ChainParameterVersion::V0),
            1 => Ok(ChainParameterVersion::V1),
            2 => Ok(ChainParameterVersion::V2),
            3 => Ok(ChainParameterVersion::V3),
            version => Err(UnknownChainParameterVersion { version }),
        }
    }
}

impl From<ChainParameterVersion> for u8 {
    fn from(cpv: ChainParameterVersion) -> Self {
        match cpv {
            ChainParameterVersion::V0 => 0,
            ChainParameterVersion::V1 => 1,
            ChainParameterVersion::V2 => 2,
            ChainParameterVersion::V3 => 3,
        }
    }
}

/// An optional protocol feature whose availability depends on the
/// [`ChainParameterVersion`].
#[derive(
    SerdeSerialize, SerdeDeserialize, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug,
)]
#[serde(rename_all = "camelCase")]
pub enum CapabilityFlag {
    /// The election difficulty of the leadership lottery. Removed with the
    /// timeout-based consensus protocol.
    ElectionDifficulty,
    /// A dedicated access structure for updating cooldown parameters.
    CooldownParametersAccessStructure,
    /// Reward period length and mint rate per payday.
    TimeParameters,
    /// Timeout parameters of the consensus protocol.
    TimeoutParameters,
    /// The minimum time between blocks.
    MinBlockTime,
    /// The maximum energy of a block.
    BlockEnergyLimit,
    /// Parameters determining the finalization committee.
    FinalizationCommitteeParameters,
    /// Parameters for suspending inactive validators.
    ValidatorScoreParameters,
}

impl CapabilityFlag {
    /// All capability flags.
    pub const ALL: [CapabilityFlag; 8] = [
        CapabilityFlag::ElectionDifficulty,
        CapabilityFlag::CooldownParametersAccessStructure,
        CapabilityFlag::TimeParameters,
        CapabilityFlag::TimeoutParameters,
        CapabilityFlag::MinBlockTime,
        CapabilityFlag::BlockEnergyLimit,
        CapabilityFlag::FinalizationCommitteeParameters,
        CapabilityFlag::ValidatorScoreParameters,
    ];
}

impl std::fmt::Display for CapabilityFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CapabilityFlag::ElectionDifficulty => "election difficulty",
            CapabilityFlag::CooldownParametersAccessStructure => {
                "cooldown parameters access structure"
            }
            CapabilityFlag::TimeParameters => "time parameters",
            CapabilityFlag::TimeoutParameters => "timeout parameters",
            CapabilityFlag::MinBlockTime => "minimum block time",
            CapabilityFlag::BlockEnergyLimit => "block energy limit",
            CapabilityFlag::FinalizationCommitteeParameters => "finalization committee parameters",
            CapabilityFlag::ValidatorScoreParameters => "validator score parameters",
        };
        f.write_str(name)
    }
}

/// Whether the feature `flag` is available in chain parameter version
/// `version`. Defined for every pair.
pub const fn supports(version: ChainParameterVersion, flag: CapabilityFlag) -> bool {
    use ChainParameterVersion::*;
    match flag {
        CapabilityFlag::ElectionDifficulty => matches!(version, V0 | V1),
        CapabilityFlag::CooldownParametersAccessStructure | CapabilityFlag::TimeParameters => {
            matches!(version, V1 | V2 | V3)
        }
        CapabilityFlag::TimeoutParameters
        | CapabilityFlag::MinBlockTime
        | CapabilityFlag::BlockEnergyLimit
        | CapabilityFlag::FinalizationCommitteeParameters => matches!(version, V2 | V3),
        CapabilityFlag::ValidatorScoreParameters => matches!(version, V3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference table, rows in the order of [`CapabilityFlag::ALL`], columns
    /// in the order of [`ChainParameterVersion::ALL`].
    const GOLDEN: [(CapabilityFlag, [bool; 4]); 8] = [
        (CapabilityFlag::ElectionDifficulty, [true, true, false, false]),
        (CapabilityFlag::CooldownParametersAccessStructure, [
            false, true, true, true,
        ]),
        (CapabilityFlag::TimeParameters, [false, true, true, true]),
        (CapabilityFlag::TimeoutParameters, [false, false, true, true]),
        (CapabilityFlag::MinBlockTime, [false, false, true, true]),
        (CapabilityFlag::BlockEnergyLimit, [false, false, true, true]),
        (CapabilityFlag::FinalizationCommitteeParameters, [
            false, false, true, true,
        ]),
        (CapabilityFlag::ValidatorScoreParameters, [
            false, false, false, true,
        ]),
    ];

    #[test]
    fn test_golden_table() {
        assert_eq!(GOLDEN.len(), CapabilityFlag::ALL.len());
        for ((flag, row), expected_flag) in GOLDEN.iter().zip(CapabilityFlag::ALL) {
            assert_eq!(*flag, expected_flag, "Golden table rows are out of order.");
            for (version, expected) in ChainParameterVersion::ALL.into_iter().zip(row) {
                assert_eq!(
                    supports(version, *flag),
                    *expected,
                    "supports({version}, {flag})"
                );
                // The lookup is deterministic.
                assert_eq!(supports(version, *flag), version.supports(*flag));
            }
        }
    }

    #[test]
    fn test_supported_capabilities() {
        assert_eq!(
            ChainParameterVersion::V0
                .supported_capabilities()
                .collect::<Vec<_>>(),
            vec![CapabilityFlag::ElectionDifficulty]
        );
        assert_eq!(
            ChainParameterVersion::V3.supported_capabilities().count(),
            CapabilityFlag::ALL.len() - 1
        );
    }

    #[test]
    fn test_protocol_to_chain_parameter_version() {
        let expected = [
            (1, ChainParameterVersion::V0),
            (3, ChainParameterVersion::V0),
            (4, ChainParameterVersion::V1),
            (5, ChainParameterVersion::V1),
            (6, ChainParameterVersion::V2),
            (7, ChainParameterVersion::V2),
            (8, ChainParameterVersion::V3),
            (9, ChainParameterVersion::V3),
        ];
        for (pv, cpv) in expected {
            let pv = ProtocolVersion::try_from(pv).expect("Known protocol version");
            assert_eq!(pv.chain_parameter_version(), cpv);
        }
        assert!(ProtocolVersion::try_from(0).is_err());
        assert!(ProtocolVersion::try_from(10).is_err());
    }

    #[test]
    fn test_version_json() {
        for cpv in ChainParameterVersion::ALL {
            let v = serde_json::to_value(cpv).unwrap();
            assert_eq!(serde_json::from_value::<ChainParameterVersion>(v).unwrap(), cpv);
        }
        assert!(serde_json::from_value::<ChainParameterVersion>(serde_json::json!(4)).is_err());
        assert!(ChainParameterVersion::V0 < ChainParameterVersion::V3);
    }
}
