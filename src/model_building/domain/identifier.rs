use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a single identifier component (security limit)
const MAX_COMPONENT_LENGTH: usize = 1024;

/// Identifier value object: the stable (type, namespace, name, version) key of a
/// project or package.
///
/// Serialized as its colon separated string form, e.g. `Maven:org.example:lib:1.0.0`.
/// Empty components are allowed, so `NPM::left-pad:1.3.0` is a valid identifier.
/// The version is the last component and may itself contain colons, as in
/// Debian epoch versions (`Debian::libc6:1:2.31-13`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    kind: String,
    namespace: String,
    name: String,
    version: String,
}

impl Identifier {
    pub fn new(kind: &str, namespace: &str, name: &str, version: &str) -> Result<Self> {
        for (label, value) in [
            ("type", kind),
            ("namespace", namespace),
            ("name", name),
            ("version", version),
        ] {
            if value.len() > MAX_COMPONENT_LENGTH {
                anyhow::bail!(
                    "Identifier {} is too long ({} bytes). Maximum allowed: {} bytes",
                    label,
                    value.len(),
                    MAX_COMPONENT_LENGTH
                );
            }
            if label != "version" && value.contains(':') {
                anyhow::bail!("Identifier {} must not contain ':' (got '{}')", label, value);
            }
        }

        Ok(Self {
            kind: kind.to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
            version: version.to_string(),
        })
    }

    /// The package manager or project type, e.g. `Maven` or `NPM`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.kind, self.namespace, self.name, self.version
        )
    }
}

impl FromStr for Identifier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.splitn(4, ':').collect();
        if parts.len() != 4 {
            anyhow::bail!(
                "Invalid identifier '{}': expected 'type:namespace:name:version'",
                s
            );
        }
        Self::new(parts[0], parts[1], parts[2], parts[3])
    }
}

impl TryFrom<String> for Identifier {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_parse_and_display() {
        let id: Identifier = "Maven:org.example:lib:1.0.0".parse().unwrap();
        assert_eq!(id.kind(), "Maven");
        assert_eq!(id.namespace(), "org.example");
        assert_eq!(id.name(), "lib");
        assert_eq!(id.version(), "1.0.0");
        assert_eq!(id.to_string(), "Maven:org.example:lib:1.0.0");
    }

    #[test]
    fn test_identifier_empty_namespace() {
        let id: Identifier = "NPM::left-pad:1.3.0".parse().unwrap();
        assert_eq!(id.namespace(), "");
        assert_eq!(id.to_string(), "NPM::left-pad:1.3.0");
    }

    #[test]
    fn test_identifier_wrong_component_count() {
        assert!("NPM:left-pad:1.3.0".parse::<Identifier>().is_err());
        assert!("nope".parse::<Identifier>().is_err());
    }

    #[test]
    fn test_identifier_version_keeps_colons() {
        let id: Identifier = "Debian::libc6:1:2.31-13".parse().unwrap();
        assert_eq!(id.kind(), "Debian");
        assert_eq!(id.namespace(), "");
        assert_eq!(id.name(), "libc6");
        assert_eq!(id.version(), "1:2.31-13");
        assert_eq!(id.to_string(), "Debian::libc6:1:2.31-13");
    }

    #[test]
    fn test_identifier_colon_only_allowed_in_version() {
        assert!(Identifier::new("Debian", "", "lib:c6", "1.0").is_err());
        assert!(Identifier::new("Debian", "", "libc6", "1:2.31-13").is_ok());
    }

    #[test]
    fn test_identifier_empty_components() {
        let id: Identifier = ":::".parse().unwrap();
        assert_eq!(id, Identifier::new("", "", "", "").unwrap());
        assert_eq!(id.to_string(), ":::");
    }

    #[test]
    fn test_identifier_value_equality() {
        let a = Identifier::new("PyPI", "", "requests", "2.31.0").unwrap();
        let b: Identifier = "PyPI::requests:2.31.0".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_identifier_serde_as_string() {
        let id = Identifier::new("Cargo", "", "serde", "1.0.0").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"Cargo::serde:1.0.0\"");

        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_identifier_serde_epoch_version() {
        let id: Identifier = serde_json::from_str("\"Debian::libc6:1:2.31-13\"").unwrap();
        assert_eq!(id.version(), "1:2.31-13");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"Debian::libc6:1:2.31-13\""
        );
    }

    #[test]
    fn test_identifier_serde_rejects_malformed() {
        let result: std::result::Result<Identifier, _> = serde_json::from_str("\"nope\"");
        assert!(result.is_err());
    }
}
