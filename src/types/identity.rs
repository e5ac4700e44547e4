//! Identity providers, anonymity revokers and the global cryptographic
//! parameters. These are part of genesis data and are distributed to nodes in
//! [versioned envelopes](crate::versioned).
use crate::internal::Keyed;
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};
use std::collections::BTreeMap;

/// Identity of an identity provider.
#[derive(SerdeSerialize, SerdeDeserialize)]
#[serde(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, FromStr, Display, From, Into)]
pub struct IpIdentity(pub u32);

/// Identity of an anonymity revoker. Never `0`.
#[derive(SerdeSerialize, SerdeDeserialize)]
#[serde(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, Into)]
pub struct ArIdentity(
    #[serde(deserialize_with = "crate::internal::deserialize_non_default::deserialize")] u32,
);

impl TryFrom<u32> for ArIdentity {
    type Error = &'static str;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            Err("Anonymity revoker identity cannot be 0.")
        } else {
            Ok(Self(value))
        }
    }
}

/// Public description of an identity provider or anonymity revoker.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub name:        String,
    pub url:         String,
    pub description: String,
}

/// Public information about an identity provider.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IpInfo {
    pub ip_identity:       IpIdentity,
    pub ip_description:    Description,
    /// Key used to verify identity objects issued by the provider. The bytes
    /// are not interpreted here.
    #[serde(with = "crate::internal::byte_array_hex")]
    pub ip_verify_key:     Vec<u8>,
    /// Key used to verify signatures on initial account creations.
    #[serde(with = "crate::internal::ed25519_hex")]
    pub ip_cdi_verify_key: ed25519_dalek::VerifyingKey,
}

impl Keyed for IpInfo {
    type Key = IpIdentity;

    fn key(&self) -> Self::Key { self.ip_identity }
}

/// Public information about an anonymity revoker.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArInfo {
    pub ar_identity:    ArIdentity,
    pub ar_description: Description,
    /// Elgamal public key of the anonymity revoker. The bytes are not
    /// interpreted here.
    #[serde(with = "crate::internal::byte_array_hex")]
    pub ar_public_key:  Vec<u8>,
}

impl Keyed for ArInfo {
    type Key = ArIdentity;

    fn key(&self) -> Self::Key { self.ar_identity }
}

/// The set of identity providers known to the chain, keyed by identity.
/// The JSON representation is a list, with no two entries sharing an identity.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct IdentityProviders {
    #[serde(with = "crate::internal::keyed_list")]
    pub providers: BTreeMap<IpIdentity, IpInfo>,
}

impl FromIterator<IpInfo> for IdentityProviders {
    /// Later entries replace earlier ones with the same identity.
    fn from_iter<T: IntoIterator<Item = IpInfo>>(iter: T) -> Self {
        Self {
            providers: iter.into_iter().map(|ip| (ip.ip_identity, ip)).collect(),
        }
    }
}

impl IdentityProviders {
    pub fn get(&self, id: IpIdentity) -> Option<&IpInfo> { self.providers.get(&id) }

    pub fn len(&self) -> usize { self.providers.len() }

    pub fn is_empty(&self) -> bool { self.providers.is_empty() }
}

/// The set of anonymity revokers known to the chain, keyed by identity.
/// The JSON representation is a list, with no two entries sharing an identity.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct AnonymityRevokers {
    #[serde(with = "crate::internal::keyed_list")]
    pub revokers: BTreeMap<ArIdentity, ArInfo>,
}

impl FromIterator<ArInfo> for AnonymityRevokers {
    /// Later entries replace earlier ones with the same identity.
    fn from_iter<T: IntoIterator<Item = ArInfo>>(iter: T) -> Self {
        Self {
            revokers: iter.into_iter().map(|ar| (ar.ar_identity, ar)).collect(),
        }
    }
}

impl AnonymityRevokers {
    pub fn get(&self, id: ArIdentity) -> Option<&ArInfo> { self.revokers.get(&id) }

    pub fn len(&self) -> usize { self.revokers.len() }

    pub fn is_empty(&self) -> bool { self.revokers.is_empty() }
}

/// Global cryptographic parameters of the chain.
#[derive(SerdeSerialize, SerdeDeserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CryptographicParameters {
    /// A free-form string used to distinguish between different chains.
    pub genesis_string:         String,
    /// Generators for the bulletproofs used in range proofs.
    #[serde(with = "crate::internal::byte_array_hex")]
    pub bulletproof_generators: Vec<u8>,
    /// The commitment key used for on-chain commitments.
    #[serde(with = "crate::internal::byte_array_hex")]
    pub on_chain_commitment_key: Vec<u8>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn ip_info(id: u32) -> IpInfo {
        IpInfo {
            ip_identity:       IpIdentity(id),
            ip_description:    Description {
                name:        format!("identity provider {id}"),
                url:         "https://example.com".into(),
                description: "Issues identities for testing.".into(),
            },
            ip_verify_key:     vec![id as u8; 48],
            ip_cdi_verify_key: ed25519_dalek::SigningKey::from_bytes(&[id as u8; 32])
                .verifying_key(),
        }
    }

    pub(crate) fn ar_info(id: u32) -> ArInfo {
        ArInfo {
            ar_identity:    ArIdentity::try_from(id).expect("Non-zero identity"),
            ar_description: Description {
                name:        format!("anonymity revoker {id}"),
                url:         "https://example.com".into(),
                description: "Revokes anonymity for testing.".into(),
            },
            ar_public_key:  vec![id as u8; 96],
        }
    }

    #[test]
    fn test_duplicate_identity_rejected() {
        let ip = serde_json::to_value(ip_info(3)).unwrap();
        let res = serde_json::from_value::<IdentityProviders>(json!([ip.clone(), ip]));
        assert!(res.is_err(), "Duplicate identity providers must be rejected.");
    }

    #[test]
    fn test_providers_listed_in_identity_order() {
        let ips: IdentityProviders = [ip_info(2), ip_info(0), ip_info(1)].into_iter().collect();
        let value = serde_json::to_value(&ips).unwrap();
        let ids: Vec<_> = value
            .as_array()
            .expect("Identity providers are a list.")
            .iter()
            .map(|ip| ip["ipIdentity"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_zero_ar_identity_rejected() {
        let mut ar = serde_json::to_value(ar_info(1)).unwrap();
        ar["arIdentity"] = json!(0);
        assert!(serde_json::from_value::<ArInfo>(ar).is_err());
    }
}
