use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Visual theme offered on the generation form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Modern,
    Cartoon,
    Basic,
    Aesthetic,
    Trendy,
    Real,
    Alientheme,
}

impl Theme {
    pub const ALL: [Theme; 7] = [
        Theme::Modern,
        Theme::Cartoon,
        Theme::Basic,
        Theme::Aesthetic,
        Theme::Trendy,
        Theme::Real,
        Theme::Alientheme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Modern => "Modern",
            Theme::Cartoon => "Cartoon",
            Theme::Basic => "Basic",
            Theme::Aesthetic => "Aesthetic",
            Theme::Trendy => "Trendy",
            Theme::Real => "Real",
            Theme::Alientheme => "Alientheme",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown theme: {s}")))
    }
}

/// Color palette offered on the generation form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPalette {
    Bright,
    Pastel,
    Dark,
    Neutral,
    Colourful,
    BlackAndWhite,
}

impl ColorPalette {
    pub const ALL: [ColorPalette; 6] = [
        ColorPalette::Bright,
        ColorPalette::Pastel,
        ColorPalette::Dark,
        ColorPalette::Neutral,
        ColorPalette::Colourful,
        ColorPalette::BlackAndWhite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorPalette::Bright => "Bright",
            ColorPalette::Pastel => "Pastel",
            ColorPalette::Dark => "Dark",
            ColorPalette::Neutral => "Neutral",
            ColorPalette::Colourful => "Colourful",
            ColorPalette::BlackAndWhite => "black and White",
        }
    }
}

impl fmt::Display for ColorPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorPalette {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorPalette::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown color palette: {s}")))
    }
}

/// Raw generation form as submitted by the browser
#[derive(Debug, Clone, Deserialize)]
pub struct LogoForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub color_palette: String,
}

/// Validated logo generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoRequest {
    pub title: String,
    pub description: String,
    pub theme: Theme,
    pub color_palette: ColorPalette,
}

impl TryFrom<LogoForm> for LogoRequest {
    type Error = AppError;

    fn try_from(form: LogoForm) -> Result<Self, Self::Error> {
        Ok(LogoRequest {
            theme: form.theme.parse()?,
            color_palette: form.color_palette.parse()?,
            title: form.title,
            description: form.description,
        })
    }
}

impl LogoRequest {
    /// Natural-language prompt sent to the inference endpoint
    pub fn prompt(&self) -> String {
        format!(
            "Create a logo with the title as '{}' and description as '{}' in a perfect {} theme with a  accurate {} color palette to impress the users.",
            self.title, self.description, self.theme, self.color_palette
        )
    }

    /// File name offered when downloading the generated image
    pub fn download_file_name(&self, extension: &str) -> String {
        format!("{}_logo.{}", self.title.replace(' ', "_"), extension)
    }
}

/// Metadata written to the document store for a new logo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogo {
    pub title: String,
    pub description: String,
    pub file_url: String,
}

/// Logo record as read back from the user's collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoRecord {
    /// Store-assigned document id
    pub id: String,
    pub title: String,
    pub description: String,
    pub file_url: String,
    /// Server-assigned creation time; absent until the store materialises it
    pub timestamp: Option<DateTime<Utc>>,
}

impl LogoRecord {
    pub fn caption(&self) -> String {
        format!("{} - {}", self.title, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LogoRequest {
        LogoRequest {
            title: "Acme Rockets".to_string(),
            description: "fast delivery".to_string(),
            theme: Theme::Modern,
            color_palette: ColorPalette::BlackAndWhite,
        }
    }

    #[test]
    fn test_prompt_interpolation() {
        assert_eq!(
            request().prompt(),
            "Create a logo with the title as 'Acme Rockets' and description as 'fast delivery' \
             in a perfect Modern theme with a  accurate black and White color palette to impress the users."
        );
    }

    #[test]
    fn test_prompt_keeps_empty_fields() {
        let req = LogoRequest {
            title: String::new(),
            description: String::new(),
            theme: Theme::Alientheme,
            color_palette: ColorPalette::Pastel,
        };

        let prompt = req.prompt();
        assert!(prompt.contains("title as ''"));
        assert!(prompt.contains("description as ''"));
        assert!(prompt.contains("perfect Alientheme theme"));
        assert!(prompt.contains("accurate Pastel color palette"));
    }

    #[test]
    fn test_theme_parse() {
        for theme in Theme::ALL {
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), theme);
        }
        assert!("modern".parse::<Theme>().is_err());
        assert!("Retro".parse::<Theme>().is_err());
    }

    #[test]
    fn test_palette_parse() {
        for palette in ColorPalette::ALL {
            assert_eq!(palette.as_str().parse::<ColorPalette>().unwrap(), palette);
        }
        assert_eq!(
            "black and White".parse::<ColorPalette>().unwrap(),
            ColorPalette::BlackAndWhite
        );
        assert!("Black and White".parse::<ColorPalette>().is_err());
    }

    #[test]
    fn test_form_conversion_rejects_unknown_theme() {
        let form = LogoForm {
            title: "t".to_string(),
            description: "d".to_string(),
            theme: "Gothic".to_string(),
            color_palette: "Dark".to_string(),
        };

        let err = LogoRequest::try_from(form).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(msg) if msg.contains("Gothic")));
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(
            request().download_file_name("png"),
            "Acme_Rockets_logo.png"
        );
    }

    #[test]
    fn test_caption() {
        let record = LogoRecord {
            id: "abc".to_string(),
            title: "Acme".to_string(),
            description: "rockets".to_string(),
            file_url: "https://example.com/a.png".to_string(),
            timestamp: None,
        };
        assert_eq!(record.caption(), "Acme - rockets");
    }

    #[test]
    fn test_form_missing_choices_fail_validation() {
        let form: LogoForm = serde_json::from_str(r#"{"title": "t", "theme": "Modern"}"#).unwrap();
        assert!(form.color_palette.is_empty());

        let result = LogoRequest::try_from(form);
        assert!(
            matches!(result, Err(AppError::InvalidInput(ref msg)) if msg == "Unknown color palette: ")
        );
    }
}
