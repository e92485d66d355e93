//! Referral codes and links

use crate::error::ReferralError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Public site that referral links point to
pub const DEFAULT_BASE_URL: &str = "https://crypto-platform.com";

const CODE_PREFIX: &str = "REF";
const CODE_SUFFIX_LEN: usize = 6;
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Upper-cased ASCII alphanumeric referral code.
///
/// # Example
/// ```
/// use refnet_referral::ReferralCode;
///
/// let code: ReferralCode = "ref123abc".parse().unwrap();
/// assert_eq!(code.as_str(), "REF123ABC");
/// assert_eq!(
///     code.link("https://crypto-platform.com"),
///     "https://crypto-platform.com/ref/REF123ABC"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferralCode(String);

impl ReferralCode {
    pub fn new(code: &str) -> Result<Self, ReferralError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ReferralError::EmptyCode);
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ReferralError::InvalidCode(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// `REF` followed by six random characters from `[A-Z0-9]`
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let suffix: String = (0..CODE_SUFFIX_LEN)
            .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
            .collect();
        Self(format!("{CODE_PREFIX}{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shareable link, `{base_url}/ref/{code}`
    pub fn link(&self, base_url: &str) -> String {
        format!("{}/ref/{}", base_url.trim_end_matches('/'), self.0)
    }
}

impl fmt::Display for ReferralCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ReferralCode {
    type Err = ReferralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ReferralCode {
    type Error = ReferralError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<ReferralCode> for String {
    fn from(code: ReferralCode) -> Self {
        code.0
    }
}
