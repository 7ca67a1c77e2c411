use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width hint for the iframe. Changing it never recomposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl Viewport {
    /// CSS width of the iframe.
    pub const fn width(self) -> &'static str {
        match self {
            Self::Mobile => "375px",
            Self::Tablet => "768px",
            Self::Desktop => "100%",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Viewport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mobile" => Ok(Self::Mobile),
            "tablet" => Ok(Self::Tablet),
            "desktop" => Ok(Self::Desktop),
            _ => Err(format!("unknown viewport `{s}` (expected mobile, tablet or desktop)")),
        }
    }
}
