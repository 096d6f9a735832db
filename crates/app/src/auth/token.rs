//! Bearer token wire format.
//!
//! A token reads `rm_v1_<uuid>.<secret>`: the UUID locates the stored row and
//! the 32-byte secret is hex encoded. Only a SHA-256 verifier of the whole
//! token is ever persisted.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

const PREFIX: &str = "rm";

const SECRET_BYTES: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiTokenError {
    #[error("api token is not of the form rm_<version>_<uuid>.<secret>")]
    InvalidFormat,

    #[error("api token version is not supported")]
    UnsupportedVersion,

    #[error("api token secret is not {SECRET_BYTES} hex encoded bytes")]
    InvalidSecretEncoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    /// Column value in `api_tokens.version`.
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

/// A complete bearer token, secret included.
///
/// `Debug` never prints the secret and the bytes are wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken {
    pub uuid: Uuid,
    pub version: ApiTokenVersion,
    secret: [u8; SECRET_BYTES],
}

impl ApiToken {
    /// A fresh token with a random secret from the OS RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut secret = [0_u8; SECRET_BYTES];

        OsRng.fill_bytes(&mut secret);

        Self {
            uuid: Uuid::now_v7(),
            version: ApiTokenVersion::V1,
            secret,
        }
    }

    /// The bearer string handed to the token holder.
    #[must_use]
    pub fn expose(&self) -> String {
        format!(
            "{PREFIX}_{}_{}.{}",
            self.version.segment(),
            self.uuid.simple(),
            hex::encode(self.secret)
        )
    }

    fn verifier_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        hasher.update(self.uuid.simple().to_string());
        hasher.update(b":");
        hasher.update(self.version.as_i16().to_string());
        hasher.update(b":");
        hasher.update(hex::encode(self.secret));

        hasher.finalize().into()
    }

    /// Hex SHA-256 over `{uuid}:{version}:{secret}`; the value stored at issue.
    #[must_use]
    pub fn verifier_hash(&self) -> String {
        hex::encode(self.verifier_digest())
    }

    /// Compare against a stored verifier in constant time.
    ///
    /// A stored value that is not 32 hex encoded bytes never matches.
    #[must_use]
    pub fn matches_verifier(&self, stored_hash: &str) -> bool {
        let mut stored = [0_u8; 32];

        if hex::decode_to_slice(stored_hash, &mut stored).is_err() {
            return false;
        }

        self.verifier_digest().as_slice().ct_eq(stored.as_slice()).into()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiToken")
            .field("uuid", &self.uuid)
            .field("version", &self.version)
            .field("secret", &"**redacted**")
            .finish()
    }
}

impl Drop for ApiToken {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

impl FromStr for ApiToken {
    type Err = ApiTokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (head, secret_hex) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

        let mut parts = head.splitn(3, '_');

        let (Some(PREFIX), Some(version), Some(uuid)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ApiTokenError::InvalidFormat);
        };

        let version = match version {
            "v1" => ApiTokenVersion::V1,
            _ => return Err(ApiTokenError::UnsupportedVersion),
        };

        let uuid = Uuid::try_parse(uuid).map_err(|_uuid| ApiTokenError::InvalidFormat)?;

        let mut secret = [0_u8; SECRET_BYTES];

        hex::decode_to_slice(secret_hex, &mut secret)
            .map_err(|_hex| ApiTokenError::InvalidSecretEncoding)?;

        Ok(Self {
            uuid,
            version,
            secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(secret_byte: u8) -> ApiToken {
        ApiToken {
            uuid: Uuid::nil(),
            version: ApiTokenVersion::V1,
            secret: [secret_byte; SECRET_BYTES],
        }
    }

    #[test]
    fn exposed_tokens_parse_back() -> Result<(), ApiTokenError> {
        let token = ApiToken::generate();
        let exposed = token.expose();

        assert!(exposed.starts_with("rm_v1_"), "unexpected token {exposed}");
        assert_eq!(exposed.parse::<ApiToken>()?, token);

        Ok(())
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let secret = "ab".repeat(SECRET_BYTES);
        let uuid = Uuid::nil().simple();

        let cases = [
            (format!("xx_v1_{uuid}.{secret}"), ApiTokenError::InvalidFormat),
            (format!("rm_v9_{uuid}.{secret}"), ApiTokenError::UnsupportedVersion),
            (format!("rm_v1_{uuid}.abc"), ApiTokenError::InvalidSecretEncoding),
            ("rm_v1_nope.aa".to_string(), ApiTokenError::InvalidFormat),
            ("no-dot".to_string(), ApiTokenError::InvalidFormat),
        ];

        for (token, expected) in cases {
            assert_eq!(token.parse::<ApiToken>().err(), Some(expected), "{token}");
        }
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let debug = format!("{:?}", fixed(0x11));

        assert!(debug.contains("**redacted**"), "{debug}");
        assert!(!debug.contains("1111"), "{debug}");
    }

    #[test]
    fn verifier_hash_is_stable_and_secret_dependent() {
        assert_eq!(fixed(0xCD).verifier_hash(), fixed(0xCD).verifier_hash());
        assert_ne!(fixed(0xCD).verifier_hash(), fixed(0xCE).verifier_hash());
        assert_eq!(fixed(0xCD).verifier_hash().len(), 64);
    }

    #[test]
    fn only_the_issued_verifier_matches() {
        let token = fixed(0x42);
        let stored = token.verifier_hash();

        assert!(token.matches_verifier(&stored));
        assert!(token.matches_verifier(&stored.to_uppercase()));
        assert!(!fixed(0x43).matches_verifier(&stored));
        assert!(!token.matches_verifier(&stored[..62]));
        assert!(!token.matches_verifier("not-hex"));
    }
}
