// Theme and variation color assignment
use super::chart::ParseOptionError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const COLORS_LIGHT: [&str; 4] = ["#000000", "#4a90e2", "#ff8346", "#ffa500"];
const COLORS_DARK: [&str; 4] = ["#c7c5d0", "#4a90e2", "#ff8346", "#ffa500"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn palette(self) -> &'static [&'static str] {
        match self {
            Theme::Light => &COLORS_LIGHT,
            Theme::Dark => &COLORS_DARK,
        }
    }

    /// Color at `index`, cycling through the palette.
    pub fn color_at(self, index: usize) -> &'static str {
        let palette = self.palette();
        palette[index % palette.len()]
    }
}

impl FromStr for Theme {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParseOptionError::new("theme", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(Theme::Light.color_at(0), "#000000");
        assert_eq!(Theme::Light.color_at(4), "#000000");
        assert_eq!(Theme::Light.color_at(5), "#4a90e2");
        assert_eq!(Theme::Dark.color_at(0), "#c7c5d0");
        assert_eq!(Theme::Dark.color_at(3), "#ffa500");
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
    }
}
