//! Project identity: the single source of every name-derived token.

use std::fmt;

use serde::Serialize;

/// The immutable pair of tokens threaded through every artifact.
///
/// Invariant: `uppercased` is computed once from `raw` at construction and
/// is never re-derived elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProjectIdentity {
    raw: String,
    uppercased: String,
}

impl ProjectIdentity {
    /// Derive the identity from a free-form project name.
    ///
    /// No normalisation is performed: the caller supplies a name that is
    /// already a valid CMake identifier and path component.
    pub fn derive(name: impl Into<String>) -> Self {
        let raw = name.into();
        let uppercased = raw.to_uppercase();
        Self { raw, uppercased }
    }

    /// Case-preserving token.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Upper-cased token, used for CMake variable prefixes.
    pub fn uppercased(&self) -> &str {
        &self.uppercased
    }
}

impl fmt::Display for ProjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_keeps_raw_and_uppercases() {
        let id = ProjectIdentity::derive("polycube_App");
        assert_eq!(id.raw(), "polycube_App");
        assert_eq!(id.uppercased(), "POLYCUBE_APP");
    }

    #[test]
    fn derive_does_not_normalise() {
        let id = ProjectIdentity::derive("my mesh-tool");
        assert_eq!(id.raw(), "my mesh-tool");
        assert_eq!(id.uppercased(), "MY MESH-TOOL");
    }

    #[test]
    fn derive_uses_unicode_case_folding() {
        let id = ProjectIdentity::derive("straße");
        assert_eq!(id.uppercased(), "STRASSE");
    }

    #[test]
    fn display_is_raw() {
        assert_eq!(ProjectIdentity::derive("Demo").to_string(), "Demo");
    }
}
