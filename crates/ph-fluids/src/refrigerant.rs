//! Refrigerant catalog.

use std::fmt;
use std::str::FromStr;

/// Refrigerants the simulator knows how to look up.
///
/// Only one is wired up; the identifier still travels through every
/// provider call so backends can reject what they do not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Refrigerant {
    /// 1,1,1,2-Tetrafluoroethane
    #[default]
    R134a,
}

impl Refrigerant {
    pub const ALL: [Refrigerant; 1] = [Refrigerant::R134a];

    pub fn key(&self) -> &'static str {
        match self {
            Refrigerant::R134a => "R134a",
        }
    }

    /// Get human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Refrigerant::R134a => "R-134a (Tetrafluoroethane)",
        }
    }

    pub(crate) fn rfluids_pure(&self) -> rfluids::substance::Pure {
        use rfluids::substance::Pure;
        match self {
            Refrigerant::R134a => Pure::R134a,
        }
    }
}

impl fmt::Display for Refrigerant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Refrigerant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "R134A" => Ok(Refrigerant::R134a),
            _ => Err(format!("unknown refrigerant '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_roundtrip() {
        for r in Refrigerant::ALL {
            assert_eq!(r.key().parse::<Refrigerant>().unwrap(), r);
        }
    }

    #[test]
    fn parse_accepts_common_spellings() {
        assert_eq!("R-134a".parse::<Refrigerant>().unwrap(), Refrigerant::R134a);
        assert_eq!("r134a".parse::<Refrigerant>().unwrap(), Refrigerant::R134a);
        assert!("R22".parse::<Refrigerant>().is_err());
    }
}
