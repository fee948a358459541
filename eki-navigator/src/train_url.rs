//! Train detail URL normalization.
//!
//! The same train is reachable from every station page it calls at, each
//! time through a URL carrying page-specific parameters (departure station,
//! display flags). Only `tx` (the composite train token) and `dt` (the
//! date) identify the train.

use url::Url;
use url::form_urlencoded;

/// Parameters dropped from canonical fetch URLs.
const VOLATILE_PARAMS: [&str; 4] = ["dw", "departure", "SFF", "d"];

/// Error returned for a train URL that cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed train URL {url:?}: {reason}")]
pub struct MalformedUrlError {
    pub url: String,
    pub reason: &'static str,
}

/// A train detail URL reduced to its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTrainUrl {
    /// Dedup key: `tx=..&dt=..`, in that order.
    pub key: String,
    /// The URL with volatile parameters removed and an empty `departure`.
    pub canonical_url: String,
    /// Raw `tx` token, e.g. `1-0-1234M-1-20240316`.
    pub tx: String,
}

impl NormalizedTrainUrl {
    /// Train number: the third dash-separated component of `tx`.
    pub fn train_id(&self) -> Option<&str> {
        self.tx.split('-').nth(2)
    }

    /// The last two dash-separated components of `tx`.
    pub fn train_id2(&self) -> String {
        let parts: Vec<&str> = self.tx.split('-').collect();
        parts[parts.len().saturating_sub(2)..].join("-")
    }
}

/// Normalize a train detail URL.
///
/// # Examples
///
/// ```
/// use eki_navigator::train_url::normalize_train_url;
///
/// let a = normalize_train_url("https://ekitan.com/t?tx=1-2-345-6-7&dt=20240316&SFF=1").unwrap();
/// let b = normalize_train_url("https://ekitan.com/t?d=2&dt=20240316&tx=1-2-345-6-7").unwrap();
/// assert_eq!(a.key, b.key);
/// assert_eq!(a.key, "tx=1-2-345-6-7&dt=20240316");
/// assert!(a.canonical_url.ends_with("departure="));
/// ```
pub fn normalize_train_url(raw: &str) -> Result<NormalizedTrainUrl, MalformedUrlError> {
    let mut url = Url::parse(raw).map_err(|_| MalformedUrlError {
        url: raw.to_string(),
        reason: "not an absolute URL",
    })?;

    let param = |name: &str| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    };
    let tx = param("tx").ok_or_else(|| MalformedUrlError {
        url: raw.to_string(),
        reason: "missing tx parameter",
    })?;
    let dt = param("dt").unwrap_or_default();

    let key = form_urlencoded::Serializer::new(String::new())
        .append_pair("tx", &tx)
        .append_pair("dt", &dt)
        .finish();

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !VOLATILE_PARAMS.contains(&&**k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("departure", "");

    Ok(NormalizedTrainUrl {
        key,
        canonical_url: url.to_string(),
        tx,
    })
}
