use std::collections::HashMap;
use std::path::Path;

/// Externally-configurable designer-id remapping.
///
/// Some registry events carry addresses that were later superseded; the
/// table maps each overridden id to its canonical one so the lookup can be
/// amended without touching handler logic. Unmapped ids pass through.
#[derive(Debug, Clone, Default)]
pub struct RemapTable {
    overrides: HashMap<String, String>,
}

impl RemapTable {
    pub fn new(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    /// Load from a JSON object file: `{"0xoverridden…": "0xcanonical…"}`.
    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let overrides = serde_json::from_str(&raw)?;
        Ok(Self { overrides })
    }

    pub fn canonical<'a>(&'a self, id: &'a str) -> &'a str {
        self.overrides.get(id).map(String::as_str).unwrap_or(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_ids_pass_through() {
        let table = RemapTable::default();
        assert_eq!(table.canonical("0xabc"), "0xabc");
    }

    #[test]
    fn overridden_ids_resolve_to_canonical() {
        let table = RemapTable::new(HashMap::from([(
            "0xaaa".to_string(),
            "0xbbb".to_string(),
        )]));
        assert_eq!(table.canonical("0xaaa"), "0xbbb");
        assert_eq!(table.canonical("0xbbb"), "0xbbb");
    }
}
