//! Chain parameters that can be changed by governance updates.
//!
//! Several parameters have changed shape between chain parameter versions.
//! Each shape is a separate type here, e.g., [`MintDistributionV0`] and
//! [`MintDistributionV1`]; which one applies to a given version is decided by
//! [`PayloadSchema::select`](super::updates::PayloadSchema::select).
use super::basic::*;
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    #[error("Reward fractions exceed 100%.")]
    FractionsExceedOne,
    #[error("Timeout increase factor must be greater than 1.")]
    TimeoutIncreaseTooSmall,
    #[error("Timeout decrease factor must be strictly between 0 and 1.")]
    TimeoutDecreaseOutOfRange,
    #[error("Minimum number of finalizers ({min}) exceeds the maximum ({max}).")]
    FinalizerBounds { min: u32, max: u32 },
}

/// Checked construction of parameters from their unchecked serde
/// representation. Each type in here mirrors a public type of the parent
/// module, without the invariants.
mod unchecked {
    use super::*;

    #[derive(SerdeDeserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    pub struct MintDistributionV0 {
        pub(super) mint_per_slot:       MintRate,
        pub(super) baking_reward:       AmountFraction,
        pub(super) finalization_reward: AmountFraction,
    }

    #[derive(SerdeDeserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    pub struct MintDistributionV1 {
        pub(super) baking_reward:       AmountFraction,
        pub(super) finalization_reward: AmountFraction,
    }

    #[derive(SerdeDeserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    pub struct TransactionFeeDistribution {
        pub(super) baker:       AmountFraction,
        pub(super) gas_account: AmountFraction,
    }

    #[derive(SerdeDeserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    pub struct TimeoutParameters {
        pub(super) timeout_base:     Duration,
        pub(super) timeout_increase: Ratio,
        pub(super) timeout_decrease: Ratio,
    }

    #[derive(SerdeDeserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    pub struct FinalizationCommitteeParameters {
        pub(super) minimum_finalizers:                 u32,
        pub(super) maximum_finalizers:                 u32,
        pub(super) finalizer_relative_stake_threshold: PartsPerHundredThousands,
    }
}

#[derive(Debug, SerdeSerialize, SerdeDeserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "unchecked::MintDistributionV0")]
/// The distribution of newly minted CCD in chain parameters version 0. Minting
/// happens every slot.
pub struct MintDistributionV0 {
    /// The increase in CCD amount per slot.
    pub(crate) mint_per_slot:       MintRate,
    /// Fraction of newly minted CCD allocated to baker rewards.
    pub(crate) baking_reward:       AmountFraction,
    /// Fraction of newly minted CCD allocated to finalization rewards.
    pub(crate) finalization_reward: AmountFraction,
}

impl MintDistributionV0 {
    pub fn new(
        mint_per_slot: MintRate,
        baking_reward: AmountFraction,
        finalization_reward: AmountFraction,
    ) -> Result<Self, ParameterError> {
        (baking_reward + finalization_reward).ok_or(ParameterError::FractionsExceedOne)?;
        Ok(Self {
            mint_per_slot,
            baking_reward,
            finalization_reward,
        })
    }

    pub fn mint_per_slot(&self) -> MintRate { self.mint_per_slot }

    pub fn baking_reward(&self) -> AmountFraction { self.baking_reward }

    pub fn finalization_reward(&self) -> AmountFraction { self.finalization_reward }
}

impl TryFrom<unchecked::MintDistributionV0> for MintDistributionV0 {
    type Error = ParameterError;

    fn try_from(value: unchecked::MintDistributionV0) -> Result<Self, Self::Error> {
        Self::new(
            value.mint_per_slot,
            value.baking_reward,
            value.finalization_reward,
        )
    }
}

#[derive(Debug, SerdeSerialize, SerdeDeserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "unchecked::MintDistributionV1")]
/// The distribution of newly minted CCD from chain parameters version 1.
/// The rate of minting is part of the [`TimeParameters`]. The remaining
/// fraction is allocated to the foundation account.
pub struct MintDistributionV1 {
    /// Fraction of newly minted CCD allocated to baker rewards.
    pub(crate) baking_reward:       AmountFraction,
    /// Fraction of newly minted CCD allocated to finalization rewards.
    pub(crate) finalization_reward: AmountFraction,
}

impl MintDistributionV1 {
    pub fn new(
        baking_reward: AmountFraction,
        finalization_reward: AmountFraction,
    ) -> Result<Self, ParameterError> {
        (baking_reward + finalization_reward).ok_or(ParameterError::FractionsExceedOne)?;
        Ok(Self {
            baking_reward,
            finalization_reward,
        })
    }

    pub fn baking_reward(&self) -> AmountFraction { self.baking_reward }

    pub fn finalization_reward(&self) -> AmountFraction { self.finalization_reward }
}

impl TryFrom<unchecked::MintDistributionV1> for MintDistributionV1 {
    type Error = ParameterError;

    fn try_from(value: unchecked::MintDistributionV1) -> Result<Self, Self::Error> {
        Self::new(value.baking_reward, value.finalization_reward)
    }
}

#[derive(Debug, SerdeSerialize, SerdeDeserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "unchecked::TransactionFeeDistribution")]
/// Update the transaction fee distribution to the specified value.
pub struct TransactionFeeDistribution {
    /// The fraction that goes to the baker of the block.
    pub(crate) baker:       AmountFraction,
    /// The fraction that goes to the gas account. The remaining fraction will
    /// go to the foundation.
    pub(crate) gas_account: AmountFraction,
}

impl TransactionFeeDistribution {
    pub fn new(baker: AmountFraction, gas_account: AmountFraction) -> Result<Self, ParameterError> {
        (baker + gas_account).ok_or(ParameterError::FractionsExceedOne)?;
        Ok(Self { baker, gas_account })
    }

    pub fn baker(&self) -> AmountFraction { self.baker }

    pub fn gas_account(&self) -> AmountFraction { self.gas_account }
}

impl TryFrom<unchecked::TransactionFeeDistribution> for TransactionFeeDistribution {
    type Error = ParameterError;

    fn try_from(value: unchecked::TransactionFeeDistribution) -> Result<Self, Self::Error> {
        Self::new(value.baker, value.gas_account)
    }
}

#[derive(Debug, SerdeSerialize, SerdeDeserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// The reward fractions related to the gas account and inclusion of special
/// transactions, up to chain parameters version 1.
pub struct GasRewardsV0 {
    /// `BakerPrevTransFrac`: fraction of the previous gas account paid to the
    /// baker.
    pub baker:              AmountFraction,
    /// `FeeAddFinalisationProof`: fraction paid for including a finalization
    /// proof in a block.
    pub finalization_proof: AmountFraction,
    /// `FeeAccountCreation`: fraction paid for including each account creation
    /// transaction in a block.
    pub account_creation:   AmountFraction,
    /// `FeeUpdate`: fraction paid for including an update transaction in a
    /// block.
    pub chain_update:       AmountFraction,
}

#[derive(Debug, SerdeSerialize, SerdeDeserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// The reward fractions related to the gas account from chain parameters
/// version 2. Finalization proofs are no longer rewarded.
pub struct GasRewardsV1 {
    pub baker:            AmountFraction,
    pub account_creation: AmountFraction,
    pub chain_update:     AmountFraction,
}

#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// Parameters related to becoming a baker that apply to protocol versions 1-3.
pub struct PoolParametersV0 {
    /// Minimum amount of CCD that an account must stake to become a baker.
    pub minimum_threshold_for_baking: Amount,
}

#[derive(Debug, SerdeSerialize, SerdeDeserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Parameters related to staking pools. This applies to protocol version 4 and
/// up.
pub struct PoolParametersV1 {
    /// Fraction of finalization rewards charged by the passive delegation.
    pub passive_finalization_commission: AmountFraction,
    /// Fraction of baking rewards charged by the passive delegation.
    pub passive_baking_commission:       AmountFraction,
    /// Fraction of transaction rewards charged by the L-pool.
    pub passive_transaction_commission:  AmountFraction,
    /// Bounds on the commission rates that may be charged by bakers.
    #[serde(flatten)]
    pub commission_bounds:               CommissionRanges,
    /// Minimum equity capital required for a new baker.
    pub minimum_equity_capital:          Amount,
    /// Maximum fraction of the total staked capital of that a new baker can
    /// have.
    pub capital_bound:                   CapitalBound,
    /// The maximum leverage that a baker can have as a ratio of total stake
    /// to equity capital.
    pub leverage_bound:                  LeverageFactor,
}

#[derive(Debug, SerdeSerialize, SerdeDeserialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// The parameters that affect cooldown, i.e., the period of time between
/// stake being reduced and the stake becoming available to spend.
pub struct CooldownParameters {
    /// Number of seconds that pool owners must cooldown
    /// when reducing their equity capital or closing the pool.
    pub pool_owner_cooldown: DurationSeconds,
    /// Number of seconds that a delegator must cooldown
    /// when reducing their delegated stake.
    pub delegator_cooldown:  DurationSeconds,
}

#[derive(Debug, SerdeSerialize, SerdeDeserialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// The time parameters are introduced as of protocol version 4, and consist of
/// the reward period length and the mint rate per payday. These are coupled as
/// a change to either affects the overall rate of minting.
pub struct TimeParameters {
    pub reward_period_length: RewardPeriodLength,
    pub mint_per_payday:      MintRate,
}

#[derive(Debug, SerdeSerialize, SerdeDeserialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "unchecked::TimeoutParameters")]
/// Timeout parameters for the consensus protocol introduced in protocol
/// version 6.
pub struct TimeoutParameters {
    /// The base timeout duration for blocks.
    pub(crate) timeout_base:     Duration,
    /// Factor for increasing the timeout duration on a failed round.
    /// Always greater than 1.
    pub(crate) timeout_increase: Ratio,
    /// Factor for decreasing the timeout duration on a successful round.
    /// Always strictly between 0 and 1.
    pub(crate) timeout_decrease: Ratio,
}

impl TimeoutParameters {
    pub fn new(
        timeout_base: Duration,
        timeout_increase: Ratio,
        timeout_decrease: Ratio,
    ) -> Result<Self, ParameterError> {
        let one = num::rational::Ratio::from_integer(1u64);
        if timeout_increase.as_ratio() <= one {
            return Err(ParameterError::TimeoutIncreaseTooSmall);
        }
        let decrease = timeout_decrease.as_ratio();
        if decrease >= one || decrease == num::rational::Ratio::from_integer(0) {
            return Err(ParameterError::TimeoutDecreaseOutOfRange);
        }
        Ok(Self {
            timeout_base,
            timeout_increase,
            timeout_decrease,
        })
    }

    pub fn base(&self) -> Duration { self.timeout_base }

    pub fn increase(&self) -> Ratio { self.timeout_increase }

    pub fn decrease(&self) -> Ratio { self.timeout_decrease }
}

impl TryFrom<unchecked::TimeoutParameters> for TimeoutParameters {
    type Error = ParameterError;

    fn try_from(value: unchecked::TimeoutParameters) -> Result<Self, Self::Error> {
        Self::new(
            value.timeout_base,
            value.timeout_increase,
            value.timeout_decrease,
        )
    }
}

#[derive(Debug, SerdeSerialize, SerdeDeserialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "unchecked::FinalizationCommitteeParameters")]
/// Finalization committee parameters. These parameters control which validators
/// are in the finalization committee.
pub struct FinalizationCommitteeParameters {
    /// Minimum number of bakers to include in the finalization committee before
    /// the 'finalizer_relative_stake_threshold' takes effect.
    pub(crate) minimum_finalizers:                 u32,
    /// Maximum number of bakers to include in the finalization committee.
    pub(crate) maximum_finalizers:                 u32,
    /// Determining the staking threshold required for being eligible the
    /// finalization committee. The required amount is given by `total stake
    /// in pools * finalizer_relative_stake_threshold`.
    pub(crate) finalizer_relative_stake_threshold: PartsPerHundredThousands,
}

impl FinalizationCommitteeParameters {
    pub fn new(
        minimum_finalizers: u32,
        maximum_finalizers: u32,
        finalizer_relative_stake_threshold: PartsPerHundredThousands,
    ) -> Result<Self, ParameterError> {
        if minimum_finalizers > maximum_finalizers {
            return Err(ParameterError::FinalizerBounds {
                min: minimum_finalizers,
                max: maximum_finalizers,
            });
        }
        Ok(Self {
            minimum_finalizers,
            maximum_finalizers,
            finalizer_relative_stake_threshold,
        })
    }

    pub fn minimum_finalizers(&self) -> u32 { self.minimum_finalizers }

    pub fn maximum_finalizers(&self) -> u32 { self.maximum_finalizers }

    pub fn finalizer_relative_stake_threshold(&self) -> PartsPerHundredThousands {
        self.finalizer_relative_stake_threshold
    }
}

impl TryFrom<unchecked::FinalizationCommitteeParameters> for FinalizationCommitteeParameters {
    type Error = ParameterError;

    fn try_from(value: unchecked::FinalizationCommitteeParameters) -> Result<Self, Self::Error> {
        Self::new(
            value.minimum_finalizers,
            value.maximum_finalizers,
            value.finalizer_relative_stake_threshold,
        )
    }
}

#[derive(Debug, SerdeSerialize, SerdeDeserialize, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
/// Parameters used to decide when validators are suspended. Introduced in
/// protocol version 8.
pub struct ValidatorScoreParameters {
    /// Maximum number of consecutive rounds a validator is allowed to miss
    /// before being suspended.
    pub max_missed_rounds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fee_distribution_exceeding_one() {
        assert_eq!(
            serde_json::from_value::<TransactionFeeDistribution>(json!({
                "baker": 0.6,
                "gasAccount": 0.5
            }))
            .map_err(|e| e.to_string().contains("exceed")),
            Err(true)
        );
        let ok: TransactionFeeDistribution = serde_json::from_value(json!({
            "baker": 0.45,
            "gasAccount": 0.5
        }))
        .unwrap();
        assert_eq!(ok.baker(), AmountFraction::new(45_000).unwrap());
    }

    #[test]
    fn test_mint_distribution_shapes() {
        let v0 = json!({
            "mintPerSlot": 0.0000000761,
            "bakingReward": 0.6,
            "finalizationReward": 0.3
        });
        let v1 = json!({
            "bakingReward": 0.6,
            "finalizationReward": 0.3
        });
        assert!(serde_json::from_value::<MintDistributionV0>(v0.clone()).is_ok());
        assert!(serde_json::from_value::<MintDistributionV1>(v1.clone()).is_ok());
        // The shapes are not interchangeable.
        assert!(serde_json::from_value::<MintDistributionV1>(v0).is_err());
        assert!(serde_json::from_value::<MintDistributionV0>(v1).is_err());
    }

    #[test]
    fn test_gas_rewards_shapes() {
        let v0 = json!({
            "baker": 0.25,
            "finalizationProof": 0.005,
            "accountCreation": 0.02,
            "chainUpdate": 0.005
        });
        assert!(serde_json::from_value::<GasRewardsV0>(v0.clone()).is_ok());
        assert!(serde_json::from_value::<GasRewardsV1>(v0).is_err());
    }

    #[test]
    fn test_timeout_parameters() {
        let base = Duration { millis: 10_000 };
        let r = |n, d| Ratio::new(n, d).unwrap();
        assert!(TimeoutParameters::new(base, r(6, 5), r(1, 2)).is_ok());
        assert_eq!(
            TimeoutParameters::new(base, r(1, 1), r(1, 2)),
            Err(ParameterError::TimeoutIncreaseTooSmall)
        );
        assert_eq!(
            TimeoutParameters::new(base, r(3, 2), r(2, 2)),
            Err(ParameterError::TimeoutDecreaseOutOfRange)
        );
        assert_eq!(
            TimeoutParameters::new(base, r(3, 2), r(0, 2)),
            Err(ParameterError::TimeoutDecreaseOutOfRange)
        );
    }

    #[test]
    fn test_pool_parameters_json() {
        let value = json!({
            "passiveFinalizationCommission": 1.0,
            "passiveBakingCommission": 0.12,
            "passiveTransactionCommission": 0.12,
            "finalizationCommissionRange": {"min": 1.0, "max": 1.0},
            "bakingCommissionRange": {"min": 0.1, "max": 0.1},
            "transactionCommissionRange": {"min": 0.1, "max": 0.1},
            "minimumEquityCapital": "14000000000",
            "capitalBound": 0.25,
            "leverageBound": {"numerator": 3, "denominator": 1}
        });
        let params: PoolParametersV1 = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(params.minimum_equity_capital, Amount::from_micro_ccd(14_000_000_000));
        assert_eq!(serde_json::to_value(params).unwrap(), value);
    }

    #[test]
    fn test_finalization_committee_bounds() {
        assert_eq!(
            FinalizationCommitteeParameters::new(10, 5, PartsPerHundredThousands::ZERO),
            Err(ParameterError::FinalizerBounds { min: 10, max: 5 })
        );
    }
}
