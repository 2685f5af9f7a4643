//! Upstream target parsing.

use std::fmt;
use std::str::FromStr;

use axum::http::uri::Authority;

/// Why an upstream host setting was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("upstream host is empty")]
    Empty,

    #[error("`{0}` must be a bare host[:port], without scheme, path or credentials")]
    NotAnAuthority(String),
}

/// Where forwarded requests go. The scheme is always plain `http`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    authority: Authority,
}

impl UpstreamTarget {
    pub fn parse(host: &str) -> Result<Self, TargetError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(TargetError::Empty);
        }
        if host.contains(['/', '?', '#', '@']) {
            return Err(TargetError::NotAnAuthority(host.to_string()));
        }

        let authority =
            Authority::from_str(host).map_err(|_| TargetError::NotAnAuthority(host.to_string()))?;
        Ok(Self { authority })
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http://{}", self.authority)
    }
}
