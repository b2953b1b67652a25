//! Core domain types for buildnotify.

use std::collections::HashMap;

// ---------------------------------------------------------------------------
// CiFlavor
// ---------------------------------------------------------------------------

/// The CI system whose environment variables describe the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CiFlavor {
    Drone,
    Jenkins,
}

impl CiFlavor {
    /// Lower-case name used on the command line and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drone => "drone",
            Self::Jenkins => "jenkins",
        }
    }

    /// Guess the CI system from the variables it always exports.
    ///
    /// Drone sets `DRONE=true`; Jenkins sets `JENKINS_URL`.
    pub fn detect(env: &EnvSnapshot) -> Option<Self> {
        if env.get("DRONE") == "true" {
            Some(Self::Drone)
        } else if !env.get("JENKINS_URL").is_empty() {
            Some(Self::Jenkins)
        } else {
            None
        }
    }
}

impl std::fmt::Display for CiFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CiFlavor {
    type Err = crate::NotifyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drone" => Ok(Self::Drone),
            "jenkins" => Ok(Self::Jenkins),
            other => Err(crate::NotifyError::validation(format!(
                "unknown CI flavor '{other}' (expected drone or jenkins)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// EnvSnapshot
// ---------------------------------------------------------------------------

/// An owned copy of the process environment, taken once at start-up.
///
/// Every variable lookup goes through here so the rest of the code never
/// touches ambient global state. Absent variables read as `""`.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment. Non-UTF-8 entries are skipped.
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    /// Value of `name`, or the empty string when unset.
    pub fn get(&self, name: &str) -> &str {
        self.vars.get(name).map(String::as_str).unwrap_or("")
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flavor_from_str_is_case_insensitive() {
        assert_eq!("drone".parse::<CiFlavor>().unwrap(), CiFlavor::Drone);
        assert_eq!(" Jenkins ".parse::<CiFlavor>().unwrap(), CiFlavor::Jenkins);
        assert!("travis".parse::<CiFlavor>().is_err());
    }

    #[test]
    fn flavor_display_matches_as_str() {
        assert_eq!(CiFlavor::Drone.to_string(), "drone");
        assert_eq!(CiFlavor::Jenkins.to_string(), "jenkins");
    }

    #[test]
    fn detect_drone() {
        let env: EnvSnapshot = [("DRONE", "true"), ("JENKINS_URL", "http://ci")]
            .into_iter()
            .collect();
        assert_eq!(CiFlavor::detect(&env), Some(CiFlavor::Drone));
    }

    #[test]
    fn detect_jenkins() {
        let env: EnvSnapshot = [("JENKINS_URL", "https://jenkins.example.com/")]
            .into_iter()
            .collect();
        assert_eq!(CiFlavor::detect(&env), Some(CiFlavor::Jenkins));
    }

    #[test]
    fn detect_nothing() {
        let env: EnvSnapshot = [("DRONE", "false"), ("JENKINS_URL", "")]
            .into_iter()
            .collect();
        assert_eq!(CiFlavor::detect(&env), None);
    }

    #[test]
    fn missing_vars_read_empty() {
        let env = EnvSnapshot::default();
        assert_eq!(env.get("WEBEX_TOKEN"), "");
    }
}
