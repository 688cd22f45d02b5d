//! Tolerant schemas for registry JSON
//!
//! Every field is optional: a missing field or one of an unexpected type
//! decodes to its default instead of failing the whole collection. Only a
//! top-level payload that is not an array of objects is rejected; `null`
//! elements of the array are skipped.

use super::package::{Package, PackageKind};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// Formula record as published by the registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFormula {
    #[serde(deserialize_with = "lenient")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub full_name: String,
    #[serde(deserialize_with = "lenient")]
    pub desc: String,
    #[serde(deserialize_with = "lenient")]
    pub homepage: String,
    #[serde(deserialize_with = "lenient")]
    pub versions: RawVersions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawVersions {
    #[serde(deserialize_with = "lenient")]
    pub stable: String,
}

/// Cask record as published by the registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCask {
    #[serde(deserialize_with = "lenient")]
    pub token: String,
    #[serde(deserialize_with = "lenient_strings")]
    pub name: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub desc: String,
    #[serde(deserialize_with = "lenient")]
    pub homepage: String,
    #[serde(deserialize_with = "lenient")]
    pub version: String,
}

impl RawFormula {
    /// Normalize into a package; records without a name are dropped
    pub fn into_package(self) -> Option<Package> {
        if self.name.is_empty() {
            return None;
        }
        Some(Package {
            id: self.name,
            full_name: self.full_name,
            description: self.desc,
            homepage: self.homepage,
            version: self.versions.stable,
            kind: PackageKind::Formula,
        })
    }
}

impl RawCask {
    /// Normalize into a package; records without a token are dropped
    pub fn into_package(self) -> Option<Package> {
        if self.token.is_empty() {
            return None;
        }
        Some(Package {
            full_name: self.name.into_iter().next().unwrap_or_default(),
            id: self.token,
            description: self.desc,
            homepage: self.homepage,
            version: self.version,
            kind: PackageKind::Cask,
        })
    }
}

/// Decode a registry array, skipping `null` elements
pub fn decode_collection<R: DeserializeOwned>(body: &[u8]) -> serde_json::Result<Vec<R>> {
    let records: Vec<Option<R>> = serde_json::from_slice(body)?;
    Ok(records.into_iter().flatten().collect())
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Array of strings where non-string elements become empty strings
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .iter()
            .map(|v| v.as_str().unwrap_or_default().to_string())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_elements_are_skipped() {
        let formulae: Vec<RawFormula> =
            decode_collection(br#"[null, {"name": "wget"}, null]"#).unwrap();
        assert_eq!(formulae.len(), 1);
        assert_eq!(formulae[0].name, "wget");

        let casks: Vec<RawCask> = decode_collection(b"[null]").unwrap();
        assert!(casks.is_empty());
    }

    #[test]
    fn non_array_payload_is_rejected() {
        assert!(decode_collection::<RawFormula>(br#"{"name": "wget"}"#).is_err());
        assert!(decode_collection::<RawFormula>(b"[1, 2]").is_err());
    }

    fn formula_from(value: serde_json::Value) -> Option<Package> {
        serde_json::from_value::<RawFormula>(value)
            .unwrap()
            .into_package()
    }

    fn cask_from(value: serde_json::Value) -> Option<Package> {
        serde_json::from_value::<RawCask>(value).unwrap().into_package()
    }

    #[test]
    fn formula_minimal_record() {
        let pkg = formula_from(json!({"name": "foo", "versions": {"stable": "1.2"}})).unwrap();
        assert_eq!(pkg.id, "foo");
        assert_eq!(pkg.version, "1.2");
        assert_eq!(pkg.kind, PackageKind::Formula);
        assert_eq!(pkg.description, "");
    }

    #[test]
    fn formula_full_record() {
        let pkg = formula_from(json!({
            "name": "wget",
            "full_name": "homebrew/core/wget",
            "desc": "Internet file retriever",
            "homepage": "https://www.gnu.org/software/wget/",
            "versions": {"stable": "1.24.5", "head": "HEAD", "bottle": true},
            "license": "GPL-3.0-or-later"
        }))
        .unwrap();
        assert_eq!(pkg.full_name, "homebrew/core/wget");
        assert_eq!(pkg.description, "Internet file retriever");
        assert_eq!(pkg.homepage, "https://www.gnu.org/software/wget/");
    }

    #[test]
    fn formula_without_name_is_dropped() {
        assert!(formula_from(json!({"versions": {"stable": "1.2"}})).is_none());
        assert!(formula_from(json!({"name": ""})).is_none());
        assert!(formula_from(json!({"name": 42})).is_none());
    }

    #[test]
    fn formula_tolerates_wrong_shapes() {
        let pkg = formula_from(json!({
            "name": "odd",
            "desc": null,
            "homepage": ["not", "a", "string"],
            "versions": "1.0"
        }))
        .unwrap();
        assert_eq!(pkg.description, "");
        assert_eq!(pkg.homepage, "");
        assert_eq!(pkg.version, "");

        let pkg = formula_from(json!({"name": "odd", "versions": {"stable": 3}})).unwrap();
        assert_eq!(pkg.version, "");
    }

    #[test]
    fn cask_minimal_record() {
        let pkg = cask_from(json!({"token": "bar", "version": "9"})).unwrap();
        assert_eq!(pkg.id, "bar");
        assert_eq!(pkg.version, "9");
        assert_eq!(pkg.kind, PackageKind::Cask);
        assert_eq!(pkg.full_name, "");
    }

    #[test]
    fn cask_full_name_is_first_name() {
        let pkg = cask_from(json!({"token": "vlc", "name": ["VLC media player", "VLC"]})).unwrap();
        assert_eq!(pkg.full_name, "VLC media player");

        let pkg = cask_from(json!({"token": "vlc", "name": "VLC"})).unwrap();
        assert_eq!(pkg.full_name, "");

        let pkg = cask_from(json!({"token": "vlc", "name": [7, "VLC"]})).unwrap();
        assert_eq!(pkg.full_name, "");
    }

    #[test]
    fn cask_without_token_is_dropped() {
        assert!(cask_from(json!({"version": "9"})).is_none());
    }

    #[test]
    fn collection_must_be_array_of_objects() {
        assert!(serde_json::from_str::<Vec<RawCask>>(r#"{"token": "vlc"}"#).is_err());
        assert!(serde_json::from_str::<Vec<RawCask>>(r#"["vlc"]"#).is_err());
        assert!(serde_json::from_str::<Vec<RawCask>>(r#"[{}]"#).is_ok());
    }

    #[test]
    fn reserialized_record_decodes_identically() {
        let raw: RawCask = serde_json::from_value(json!({
            "token": "firefox",
            "name": ["Mozilla Firefox"],
            "desc": "Web browser",
            "version": "121.0"
        }))
        .unwrap();
        let again: RawCask = serde_json::from_str(&serde_json::to_string(&raw).unwrap()).unwrap();
        assert_eq!(raw, again);
    }
}
