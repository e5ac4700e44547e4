use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use std::{convert::TryFrom, fmt};
use thiserror::Error;

/// Epoch number
#[derive(SerdeSerialize, SerdeDeserialize)]
#[serde(transparent)]
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, FromStr, Display, From, Into,
)]
pub struct Epoch {
    pub epoch: u64,
}

/// Energy measure.
#[derive(SerdeSerialize, SerdeDeserialize)]
#[serde(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, FromStr, Display, From, Into)]
pub struct Energy {
    pub energy: u64,
}

/// Index of an account in the account table.
#[derive(SerdeSerialize, SerdeDeserialize)]
#[serde(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, FromStr, Display, From, Into)]
pub struct AccountIndex {
    pub index: u64,
}

/// A duration in milliseconds.
#[derive(SerdeSerialize, SerdeDeserialize)]
#[serde(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, FromStr, Display, From, Into)]
pub struct Duration {
    pub millis: u64,
}

/// A duration in whole seconds.
#[derive(SerdeSerialize, SerdeDeserialize)]
#[serde(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, FromStr, Display, From, Into)]
pub struct DurationSeconds {
    pub seconds: u64,
}

/// An amount of CCD, stored in micro CCD. The JSON representation is a
/// string containing the amount of micro CCD.
#[derive(SerdeSerialize, SerdeDeserialize)]
#[serde(try_from = "String", into = "String")]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, From, Into)]
pub struct Amount {
    pub micro_ccd: u64,
}

impl Amount {
    pub fn from_micro_ccd(micro_ccd: u64) -> Self { Self { micro_ccd } }

    /// The amount of `ccd` whole CCD, or [`None`] if it does not fit.
    pub fn from_ccd(ccd: u64) -> Option<Self> {
        Some(Self {
            micro_ccd: ccd.checked_mul(1_000_000)?,
        })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06} CCD", self.micro_ccd / 1_000_000, self.micro_ccd % 1_000_000)
    }
}

impl TryFrom<String> for Amount {
    type Error = std::num::ParseIntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self {
            micro_ccd: value.parse()?,
        })
    }
}

impl From<Amount> for String {
    fn from(value: Amount) -> Self { value.micro_ccd.to_string() }
}

/// The signature scheme of an [`UpdatePublicKey`]. Only Ed25519 is supported.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeId {
    Ed25519,
}

mod repr {
    use super::*;

    #[derive(SerdeSerialize, SerdeDeserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UpdatePublicKeyRepr {
        pub(super) scheme_id:  SchemeId,
        pub(super) verify_key: String,
    }

    #[derive(SerdeDeserialize)]
    pub struct InclusiveRangeUnchecked<T> {
        pub(super) min: T,
        pub(super) max: T,
    }
}
use repr::{InclusiveRangeUnchecked, UpdatePublicKeyRepr};

/// A single public key that can sign updates.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "UpdatePublicKeyRepr", into = "UpdatePublicKeyRepr")]
pub struct UpdatePublicKey {
    pub public: ed25519_dalek::VerifyingKey,
}

impl From<ed25519_dalek::VerifyingKey> for UpdatePublicKey {
    fn from(public: ed25519_dalek::VerifyingKey) -> Self { Self { public } }
}

impl From<&ed25519_dalek::SigningKey> for UpdatePublicKey {
    fn from(kp: &ed25519_dalek::SigningKey) -> Self {
        Self {
            public: kp.verifying_key(),
        }
    }
}

#[derive(Debug, Error)]
pub enum UpdatePublicKeyError {
    #[error("Verify key is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("Verify key must be exactly 32 bytes, but is {0}.")]
    Length(usize),
    #[error("Verify key is not a valid Ed25519 point: {0}")]
    Point(#[from] ed25519_dalek::SignatureError),
}

impl TryFrom<UpdatePublicKeyRepr> for UpdatePublicKey {
    type Error = UpdatePublicKeyError;

    fn try_from(value: UpdatePublicKeyRepr) -> Result<Self, Self::Error> {
        let SchemeId::Ed25519 = value.scheme_id;
        let bytes = hex::decode(value.verify_key)?;
        let bytes: [u8; ed25519_dalek::PUBLIC_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| UpdatePublicKeyError::Length(bytes.len()))?;
        let public = ed25519_dalek::VerifyingKey::from_bytes(&bytes)?;
        Ok(Self { public })
    }
}

impl From<UpdatePublicKey> for UpdatePublicKeyRepr {
    fn from(value: UpdatePublicKey) -> Self {
        Self {
            scheme_id:  SchemeId::Ed25519,
            verify_key: hex::encode(value.public.as_bytes()),
        }
    }
}

/// The minimum number of keys that must sign an update. Never zero.
#[derive(Debug, Clone, Copy, SerdeSerialize, SerdeDeserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UpdateKeysThreshold {
    #[serde(deserialize_with = "crate::internal::deserialize_non_default::deserialize")]
    pub(crate) threshold: u16,
}

impl UpdateKeysThreshold {
    pub fn get(self) -> u16 { self.threshold }
}

impl TryFrom<u16> for UpdateKeysThreshold {
    type Error = &'static str;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value == 0 {
            Err("Update keys threshold cannot be 0.")
        } else {
            Ok(Self { threshold: value })
        }
    }
}

/// Index of a key in the list of level 2 update keys.
#[derive(SerdeSerialize, SerdeDeserialize)]
#[serde(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromStr, Display, From, Into)]
pub struct UpdateKeysIndex {
    pub index: u16,
}

/// A fraction with five decimal digits of precision, in the range `[0, 1]`.
/// The JSON representation is a decimal number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartsPerHundredThousands {
    pub(crate) parts: u32,
}

impl PartsPerHundredThousands {
    pub const ONE: Self = Self { parts: 100_000 };
    pub const ZERO: Self = Self { parts: 0 };

    /// Construct a new value, returning [`None`] if the number of parts
    /// exceeds `100_000`.
    pub fn new(parts: u32) -> Option<Self> {
        if parts <= 100_000 {
            Some(Self { parts })
        } else {
            None
        }
    }

    pub fn parts(self) -> u32 { self.parts }

    pub fn is_zero(self) -> bool { self.parts == 0 }
}

/// Display the value as a fraction.
impl fmt::Display for PartsPerHundredThousands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = rust_decimal::Decimal::try_new(self.parts.into(), 5).map_err(|_| fmt::Error)?;
        x.normalize().fmt(f)
    }
}

/// Add two parts, checking that the result is still at most 100_000.
impl std::ops::Add for PartsPerHundredThousands {
    type Output = Option<Self>;

    fn add(self, rhs: Self) -> Self::Output {
        let parts = self.parts.checked_add(rhs.parts)?;
        Self::new(parts)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FractionParseError {
    #[error("Fraction should not have more than 5 decimals.")]
    TooPrecise,
    #[error("Fraction should not be negative.")]
    Negative,
    #[error("Fraction out of bounds.")]
    OutOfBounds,
    #[error("Not a decimal number: {0}")]
    NotANumber(String),
}

impl TryFrom<rust_decimal::Decimal> for PartsPerHundredThousands {
    type Error = FractionParseError;

    fn try_from(mut f: rust_decimal::Decimal) -> Result<Self, Self::Error> {
        f.normalize_assign();
        if f.scale() > 5 {
            return Err(FractionParseError::TooPrecise);
        }
        if !f.is_sign_positive() && !f.is_zero() {
            return Err(FractionParseError::Negative);
        }
        f.rescale(5);
        u32::try_from(f.mantissa())
            .ok()
            .and_then(Self::new)
            .ok_or(FractionParseError::OutOfBounds)
    }
}

impl std::str::FromStr for PartsPerHundredThousands {
    type Err = FractionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = s
            .parse::<rust_decimal::Decimal>()
            .map_err(|e| FractionParseError::NotANumber(e.to_string()))?;
        Self::try_from(decimal)
    }
}

impl SerdeSerialize for PartsPerHundredThousands {
    fn serialize<S: serde::Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let decimal = rust_decimal::Decimal::try_new(self.parts.into(), 5)
            .map_err(serde::ser::Error::custom)?;
        SerdeSerialize::serialize(&decimal.normalize(), ser)
    }
}

impl<'de> SerdeDeserialize<'de> for PartsPerHundredThousands {
    fn deserialize<D: serde::Deserializer<'de>>(des: D) -> Result<Self, D::Error> {
        let f: rust_decimal::Decimal = SerdeDeserialize::deserialize(des)?;
        Self::try_from(f).map_err(serde::de::Error::custom)
    }
}

/// A fraction of an amount, e.g., of newly minted CCD or of transaction fees.
#[derive(SerdeSerialize, SerdeDeserialize)]
#[serde(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromStr, Display, From, Into)]
pub struct AmountFraction {
    pub parts_per_hundred_thousands: PartsPerHundredThousands,
}

impl AmountFraction {
    pub fn new(parts: u32) -> Option<Self> {
        PartsPerHundredThousands::new(parts).map(Self::from)
    }
}

/// Add two amount fractions checking that they sum up to no more than 1.
impl std::ops::Add for AmountFraction {
    type Output = Option<Self>;

    fn add(self, rhs: Self) -> Self::Output {
        let parts_per_hundred_thousands =
            (self.parts_per_hundred_thousands + rhs.parts_per_hundred_thousands)?;
        Some(AmountFraction {
            parts_per_hundred_thousands,
        })
    }
}

/// Election difficulty of the leadership lottery. Always strictly below 1.
#[derive(SerdeSerialize, SerdeDeserialize)]
#[serde(try_from = "PartsPerHundredThousands", into = "PartsPerHundredThousands")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Into)]
pub struct ElectionDifficulty {
    pub(crate) parts_per_hundred_thousands: PartsPerHundredThousands,
}

impl ElectionDifficulty {
    pub fn new(parts: u32) -> Option<Self> {
        if parts < 100_000 {
            Some(Self {
                parts_per_hundred_thousands: PartsPerHundredThousands { parts },
            })
        } else {
            None
        }
    }
}

impl TryFrom<PartsPerHundredThousands> for ElectionDifficulty {
    type Error = &'static str;

    fn try_from(value: PartsPerHundredThousands) -> Result<Self, Self::Error> {
        Self::new(value.parts).ok_or("Election difficulty must be less than 1.")
    }
}

/// An exchange rate between two quantities. Neither the numerator nor the
/// denominator may be `0`.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRate {
    #[serde(deserialize_with = "crate::internal::deserialize_non_default::deserialize")]
    pub(crate) numerator:   u64,
    #[serde(deserialize_with = "crate::internal::deserialize_non_default::deserialize")]
    pub(crate) denominator: u64,
}

impl ExchangeRate {
    pub fn new(numerator: u64, denominator: u64) -> Option<Self> {
        if numerator == 0 || denominator == 0 {
            None
        } else {
            Some(Self {
                numerator,
                denominator,
            })
        }
    }

    pub fn numerator(&self) -> u64 { self.numerator }

    pub fn denominator(&self) -> u64 { self.denominator }

    /// The rate as a reduced rational number.
    pub fn as_ratio(&self) -> num::rational::Ratio<u64> {
        num::rational::Ratio::new(self.numerator, self.denominator)
    }
}

/// A rational number with a non-zero denominator.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    pub(crate) numerator:   u64,
    #[serde(deserialize_with = "crate::internal::deserialize_non_default::deserialize")]
    pub(crate) denominator: u64,
}

impl Ratio {
    pub fn new(numerator: u64, denominator: u64) -> Option<Self> {
        if denominator == 0 {
            None
        } else {
            Some(Self {
                numerator,
                denominator,
            })
        }
    }

    pub fn numerator(&self) -> u64 { self.numerator }

    pub fn denominator(&self) -> u64 { self.denominator }

    pub fn as_ratio(&self) -> num::rational::Ratio<u64> {
        num::rational::Ratio::new(self.numerator, self.denominator)
    }
}

/// The maximum leverage a validator may have, as the ratio of total stake to
/// equity capital. Always at least 1.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "Ratio", into = "Ratio")]
pub struct LeverageFactor {
    pub(crate) ratio: Ratio,
}

impl LeverageFactor {
    pub fn new(numerator: u64, denominator: u64) -> Option<Self> {
        let ratio = Ratio::new(numerator, denominator)?;
        if numerator >= denominator {
            Some(Self { ratio })
        } else {
            None
        }
    }

    pub fn numerator(&self) -> u64 { self.ratio.numerator }

    pub fn denominator(&self) -> u64 { self.ratio.denominator }
}

impl TryFrom<Ratio> for LeverageFactor {
    type Error = &'static str;

    fn try_from(value: Ratio) -> Result<Self, Self::Error> {
        Self::new(value.numerator, value.denominator).ok_or("Leverage factor must be at least 1.")
    }
}

impl From<LeverageFactor> for Ratio {
    fn from(value: LeverageFactor) -> Self { value.ratio }
}

/// The maximum fraction of the total staked capital a single pool may have.
/// Always strictly positive.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "AmountFraction", into = "AmountFraction")]
pub struct CapitalBound {
    pub(crate) bound: AmountFraction,
}

impl CapitalBound {
    pub fn new(bound: AmountFraction) -> Option<Self> {
        if bound.parts_per_hundred_thousands.is_zero() {
            None
        } else {
            Some(Self { bound })
        }
    }

    pub fn bound(&self) -> AmountFraction { self.bound }
}

impl TryFrom<AmountFraction> for CapitalBound {
    type Error = &'static str;

    fn try_from(value: AmountFraction) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("Capital bound must be greater than 0.")
    }
}

impl From<CapitalBound> for AmountFraction {
    fn from(value: CapitalBound) -> Self { value.bound }
}

/// A rate of minting, `mantissa * 10^(-exponent)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintRate {
    pub mantissa: u32,
    pub exponent: u8,
}

impl SerdeSerialize for MintRate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        let x = rust_decimal::Decimal::try_new(self.mantissa.into(), self.exponent.into())
            .map_err(serde::ser::Error::custom)?;
        SerdeSerialize::serialize(&x, serializer)
    }
}

impl<'de> SerdeDeserialize<'de> for MintRate {
    fn deserialize<D>(des: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let mut f: rust_decimal::Decimal = SerdeDeserialize::deserialize(des)?;
        // Decimals have a scale of at most 28, so larger exponents cannot be
        // expressed in JSON.
        f.normalize_assign();
        if f.is_sign_negative() && !f.is_zero() {
            return Err(serde::de::Error::custom("MintRate cannot be negative."));
        }
        if let Ok(exponent) = u8::try_from(f.scale()) {
            if let Ok(mantissa) = u32::try_from(f.mantissa()) {
                Ok(MintRate { mantissa, exponent })
            } else {
                Err(serde::de::Error::custom(
                    "Unsupported mantissa range for MintRate.",
                ))
            }
        } else {
            Err(serde::de::Error::custom(
                "Unsupported exponent range for MintRate.",
            ))
        }
    }
}

/// An inclusive range of values, `min <= max`.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "InclusiveRangeUnchecked<T>")]
#[serde(bound(deserialize = "T: SerdeDeserialize<'de> + PartialOrd"))]
pub struct InclusiveRange<T> {
    pub(crate) min: T,
    pub(crate) max: T,
}

impl<T: PartialOrd> InclusiveRange<T> {
    pub fn new(min: T, max: T) -> Option<Self> {
        if min <= max {
            Some(Self { min, max })
        } else {
            None
        }
    }

    pub fn contains(&self, x: &T) -> bool { &self.min <= x && x <= &self.max }
}

impl<T> InclusiveRange<T> {
    pub fn min(&self) -> &T { &self.min }

    pub fn max(&self) -> &T { &self.max }
}

impl<T: PartialOrd> TryFrom<InclusiveRangeUnchecked<T>> for InclusiveRange<T> {
    type Error = &'static str;

    fn try_from(value: InclusiveRangeUnchecked<T>) -> Result<Self, Self::Error> {
        Self::new(value.min, value.max).ok_or("Range minimum exceeds its maximum.")
    }
}

/// Ranges of allowed commission values that pools may choose from.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommissionRanges {
    /// The range of allowed finalization commissions.
    #[serde(rename = "finalizationCommissionRange")]
    pub finalization: InclusiveRange<AmountFraction>,
    /// The range of allowed baker commissions.
    #[serde(rename = "bakingCommissionRange")]
    pub baking:       InclusiveRange<AmountFraction>,
    /// The range of allowed transaction commissions.
    #[serde(rename = "transactionCommissionRange")]
    pub transaction:  InclusiveRange<AmountFraction>,
}

/// Length of a reward period in epochs.
/// Must always be a strictly positive integer.
#[derive(SerdeSerialize, SerdeDeserialize)]
#[serde(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Display, Into)]
pub struct RewardPeriodLength {
    #[serde(deserialize_with = "crate::internal::deserialize_non_default::deserialize")]
    pub(crate) reward_period_epochs: Epoch,
}

impl TryFrom<Epoch> for RewardPeriodLength {
    type Error = &'static str;

    fn try_from(value: Epoch) -> Result<Self, Self::Error> {
        if value.epoch == 0 {
            Err("Reward period length must be positive.")
        } else {
            Ok(Self {
                reward_period_epochs: value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fraction_json() {
        let f: AmountFraction = serde_json::from_value(json!(0.6)).expect("Valid fraction");
        assert_eq!(f, AmountFraction::new(60_000).unwrap());
        assert_eq!(serde_json::to_value(f).unwrap(), json!(0.6));
        let one: AmountFraction = serde_json::from_value(json!(1)).expect("One is valid");
        assert_eq!(one, AmountFraction::new(100_000).unwrap());
        assert!(serde_json::from_value::<AmountFraction>(json!(1.5)).is_err());
        assert!(serde_json::from_value::<AmountFraction>(json!(-0.1)).is_err());
        assert!(serde_json::from_value::<AmountFraction>(json!(0.123456)).is_err());
    }

    #[test]
    fn test_fraction_from_str() {
        assert_eq!(
            "0.25".parse::<PartsPerHundredThousands>(),
            Ok(PartsPerHundredThousands { parts: 25_000 })
        );
        assert_eq!("1".parse::<PartsPerHundredThousands>(), Ok(PartsPerHundredThousands::ONE));
        assert_eq!(
            "0.000001".parse::<PartsPerHundredThousands>(),
            Err(FractionParseError::TooPrecise)
        );
        assert_eq!(
            "-0.5".parse::<PartsPerHundredThousands>(),
            Err(FractionParseError::Negative)
        );
        assert!(matches!(
            "half".parse::<PartsPerHundredThousands>(),
            Err(FractionParseError::NotANumber(_))
        ));
    }

    #[test]
    fn test_fraction_sum() {
        let a = AmountFraction::new(60_000).unwrap();
        let b = AmountFraction::new(40_000).unwrap();
        assert_eq!(a + b, AmountFraction::new(100_000));
        assert_eq!(a + a, None);
    }

    #[test]
    fn test_election_difficulty_bounds() {
        assert!(ElectionDifficulty::new(99_999).is_some());
        assert!(ElectionDifficulty::new(100_000).is_none());
        assert!(serde_json::from_value::<ElectionDifficulty>(json!(1)).is_err());
        let d: ElectionDifficulty = serde_json::from_value(json!(0.025)).unwrap();
        assert_eq!(d, ElectionDifficulty::new(2_500).unwrap());
    }

    #[test]
    fn test_exchange_rate_non_zero() {
        assert!(serde_json::from_value::<ExchangeRate>(json!({
            "numerator": 0,
            "denominator": 1
        }))
        .is_err());
        let r: ExchangeRate = serde_json::from_value(json!({
            "numerator": 4,
            "denominator": 8
        }))
        .unwrap();
        assert_eq!(r.as_ratio(), num::rational::Ratio::new(1, 2));
    }

    #[test]
    fn test_range_and_bounds() {
        assert!(serde_json::from_value::<InclusiveRange<AmountFraction>>(json!({
            "min": 0.5,
            "max": 0.1
        }))
        .is_err());
        assert!(serde_json::from_value::<CapitalBound>(json!(0)).is_err());
        assert!(serde_json::from_value::<LeverageFactor>(json!({
            "numerator": 1,
            "denominator": 2
        }))
        .is_err());
        assert!(serde_json::from_value::<RewardPeriodLength>(json!(0)).is_err());
    }

    #[test]
    fn test_amount_and_mint_rate() {
        let a: Amount = serde_json::from_value(json!("14000000000")).unwrap();
        assert_eq!(Some(a), Amount::from_ccd(14_000));
        assert_eq!(Amount::from_ccd(u64::MAX / 1_000_000 + 1), None);
        assert_eq!(serde_json::to_value(a).unwrap(), json!("14000000000"));
        let r: MintRate = serde_json::from_value(json!(0.000261157877)).unwrap();
        assert_eq!(r, MintRate {
            mantissa: 261157877,
            exponent: 12,
        });
    }

    #[test]
    fn test_update_public_key() {
        let kp = ed25519_dalek::SigningKey::from_bytes(&[7u8; 32]);
        let key = UpdatePublicKey::from(&kp);
        let v = serde_json::to_value(&key).unwrap();
        assert_eq!(v["schemeId"], json!("Ed25519"));
        let back: UpdatePublicKey = serde_json::from_value(v).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_value::<UpdatePublicKey>(json!({
            "schemeId": "Ed25519",
            "verifyKey": "00ff"
        }))
        .is_err());
    }
}
