use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Default address of a locally running backend.
const LOCAL_API_URL: &str = "http://localhost:8080";

/// Represents the backend the dashboard talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Backend running on the developer's machine.
    #[default]
    Local,
    /// Any other backend, addressed by its base URL.
    Custom { api_url: String },
}

impl Environment {
    /// Returns the base URL the `/api/...` endpoints are resolved against.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => LOCAL_API_URL.to_string(),
            Environment::Custom { api_url } => api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Picks the environment from an explicit URL, falling back to the named one.
    pub fn resolve(api_url: Option<&str>, named: Option<&str>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            return Environment::Custom {
                api_url: url.trim().to_string(),
            };
        }
        named
            .and_then(|name| name.parse::<Environment>().ok())
            .unwrap_or_default()
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(Environment::Custom {
                api_url: s.to_string(),
            });
        }
        Err(())
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_url())
    }
}
