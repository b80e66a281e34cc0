//! Color palettes exchanged with the site settings endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named slot in a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColorToken {
    PrimaryBackground,
    SecondaryBackground,
    TertiaryBackground,
    PrimaryColor,
    SecondaryColor,
    PrimaryBtn,
    SecondaryBtn,
    TertiaryBtn,
    QuaternaryBtn,
    BackToHomeBtn,
    GrayColor,
}

impl ColorToken {
    pub const ALL: [ColorToken; 11] = [
        Self::PrimaryBackground,
        Self::SecondaryBackground,
        Self::TertiaryBackground,
        Self::PrimaryColor,
        Self::SecondaryColor,
        Self::PrimaryBtn,
        Self::SecondaryBtn,
        Self::TertiaryBtn,
        Self::QuaternaryBtn,
        Self::BackToHomeBtn,
        Self::GrayColor,
    ];

    /// Key used on the wire and in the settings screen.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::PrimaryBackground => "primaryBackground",
            Self::SecondaryBackground => "secondaryBackground",
            Self::TertiaryBackground => "tertiaryBackground",
            Self::PrimaryColor => "primaryColor",
            Self::SecondaryColor => "secondaryColor",
            Self::PrimaryBtn => "primaryBtn",
            Self::SecondaryBtn => "secondaryBtn",
            Self::TertiaryBtn => "tertiaryBtn",
            Self::QuaternaryBtn => "quaternaryBtn",
            Self::BackToHomeBtn => "backToHomeBtn",
            Self::GrayColor => "grayColor",
        }
    }

    /// Human label shown next to the color picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PrimaryBackground => "Background Main",
            Self::SecondaryBackground => "Secondary Background",
            Self::TertiaryBackground => "Comments Background",
            Self::PrimaryColor => "Text Primary Color",
            Self::SecondaryColor => "Text Secondary Color",
            Self::PrimaryBtn => "Main Button Color",
            Self::SecondaryBtn => "Secondary Button",
            Self::TertiaryBtn => "Red Button",
            Self::QuaternaryBtn => "Golden Button",
            Self::BackToHomeBtn => "Back to home button",
            Self::GrayColor => "Gray Color",
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color token '{0}'")]
pub struct UnknownToken(pub String);

impl FromStr for ColorToken {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| UnknownToken(s.to_owned()))
    }
}

/// One complete set of color tokens.
///
/// Every token is a required field, so a palette missing a key cannot be
/// constructed or decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary_background: String,
    pub secondary_background: String,
    pub tertiary_background: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub primary_btn: String,
    pub secondary_btn: String,
    pub tertiary_btn: String,
    pub quaternary_btn: String,
    pub back_to_home_btn: String,
    pub gray_color: String,
}

impl Palette {
    #[must_use]
    pub fn get(&self, token: ColorToken) -> &str {
        match token {
            ColorToken::PrimaryBackground => &self.primary_background,
            ColorToken::SecondaryBackground => &self.secondary_background,
            ColorToken::TertiaryBackground => &self.tertiary_background,
            ColorToken::PrimaryColor => &self.primary_color,
            ColorToken::SecondaryColor => &self.secondary_color,
            ColorToken::PrimaryBtn => &self.primary_btn,
            ColorToken::SecondaryBtn => &self.secondary_btn,
            ColorToken::TertiaryBtn => &self.tertiary_btn,
            ColorToken::QuaternaryBtn => &self.quaternary_btn,
            ColorToken::BackToHomeBtn => &self.back_to_home_btn,
            ColorToken::GrayColor => &self.gray_color,
        }
    }

    pub fn set(&mut self, token: ColorToken, value: String) {
        let slot = match token {
            ColorToken::PrimaryBackground => &mut self.primary_background,
            ColorToken::SecondaryBackground => &mut self.secondary_background,
            ColorToken::TertiaryBackground => &mut self.tertiary_background,
            ColorToken::PrimaryColor => &mut self.primary_color,
            ColorToken::SecondaryColor => &mut self.secondary_color,
            ColorToken::PrimaryBtn => &mut self.primary_btn,
            ColorToken::SecondaryBtn => &mut self.secondary_btn,
            ColorToken::TertiaryBtn => &mut self.tertiary_btn,
            ColorToken::QuaternaryBtn => &mut self.quaternary_btn,
            ColorToken::BackToHomeBtn => &mut self.back_to_home_btn,
            ColorToken::GrayColor => &mut self.gray_color,
        };
        *slot = value;
    }

    /// `(token, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorToken, &str)> + '_ {
        ColorToken::ALL.into_iter().map(|t| (t, self.get(t)))
    }
}

/// The light and dark palettes, always travelling together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub light: Palette,
    pub dark: Palette,
}
