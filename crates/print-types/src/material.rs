use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Filament a part can be printed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Pla,
    Petg,
    Tpu,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 3] = [MaterialKind::Pla, MaterialKind::Petg, MaterialKind::Tpu];

    /// Lower-case identifier used by the storefront (`"pla"`, `"petg"`, `"tpu"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialKind::Pla => "pla",
            MaterialKind::Petg => "petg",
            MaterialKind::Tpu => "tpu",
        }
    }

    /// Upper-case label, as shown on order summaries.
    pub fn label(&self) -> &'static str {
        match self {
            MaterialKind::Pla => "PLA",
            MaterialKind::Petg => "PETG",
            MaterialKind::Tpu => "TPU",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A material name that is not one of the recognised kinds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown material: {name}")]
pub struct UnknownMaterial {
    pub name: String,
}

impl FromStr for MaterialKind {
    type Err = UnknownMaterial;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pla" => Ok(MaterialKind::Pla),
            "petg" => Ok(MaterialKind::Petg),
            "tpu" => Ok(MaterialKind::Tpu),
            _ => Err(UnknownMaterial { name: s.to_string() }),
        }
    }
}

/// Support structure setting chosen on the order form.
///
/// Carried through to the order summary; it does not change the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportMode {
    #[default]
    None,
    Auto,
    Everywhere,
}

impl fmt::Display for SupportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SupportMode::None => "none",
            SupportMode::Auto => "auto",
            SupportMode::Everywhere => "everywhere",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("PLA".parse::<MaterialKind>().unwrap(), MaterialKind::Pla);
        assert_eq!(" petg ".parse::<MaterialKind>().unwrap(), MaterialKind::Petg);
        assert_eq!("Tpu".parse::<MaterialKind>().unwrap(), MaterialKind::Tpu);
    }

    #[test]
    fn parse_unknown_material_fails() {
        let err = "abs".parse::<MaterialKind>().unwrap_err();
        assert_eq!(err.name, "abs");
        assert_eq!(err.to_string(), "unknown material: abs");
    }

    #[test]
    fn as_str_roundtrips_through_parse() {
        for kind in MaterialKind::ALL {
            assert_eq!(kind.as_str().parse::<MaterialKind>().unwrap(), kind);
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&MaterialKind::Petg).unwrap();
        assert_eq!(json, "\"petg\"");
        let mode: SupportMode = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(mode, SupportMode::Auto);
    }
}
