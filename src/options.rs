/// Render options: style presets and per-element inline styles
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Base set of inline styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Bare tags, no `style` attributes
    #[default]
    Plain,
    /// Inline styles used by the assessment portal
    Portal,
}

impl Theme {
    pub fn styles(self) -> Styles {
        match self {
            Theme::Plain => Styles::default(),
            Theme::Portal => Styles::portal(),
        }
    }
}

/// Inline CSS per element kind. `None` or an empty string emits no attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Styles {
    pub heading: Option<String>,
    pub paragraph: Option<String>,
    /// Applied to both `<ul>` and `<ol>`
    pub list: Option<String>,
    pub list_item: Option<String>,
    pub code: Option<String>,
    pub link: Option<String>,
}

impl Styles {
    pub fn portal() -> Self {
        Styles {
            heading: Some(
                "font-size:15px;font-weight:700;margin:18px 0 8px 0;color:var(--text-primary);"
                    .to_string(),
            ),
            paragraph: Some("margin:6px 0;line-height:1.7;".to_string()),
            list: Some("margin:8px 0 8px 4px;padding-left:20px;".to_string()),
            list_item: Some("margin-bottom:5px;line-height:1.6;".to_string()),
            code: Some(
                "background:rgba(255,255,255,0.1);padding:2px 6px;border-radius:4px;\
                 font-size:0.9em;font-family:monospace;"
                    .to_string(),
            ),
            link: Some(
                "color:var(--accent-primary);text-decoration:underline;word-break:break-all;"
                    .to_string(),
            ),
        }
    }

    /// Fields set in `overrides` replace the ones in `self`.
    pub fn overlay(self, overrides: &Styles) -> Styles {
        fn pick(base: Option<String>, over: &Option<String>) -> Option<String> {
            over.clone().or(base)
        }

        Styles {
            heading: pick(self.heading, &overrides.heading),
            paragraph: pick(self.paragraph, &overrides.paragraph),
            list: pick(self.list, &overrides.list),
            list_item: pick(self.list_item, &overrides.list_item),
            code: pick(self.code, &overrides.code),
            link: pick(self.link, &overrides.link),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    pub theme: Theme,
    pub styles: Styles,
}

impl RenderOptions {
    pub fn with_theme(theme: Theme) -> Self {
        RenderOptions {
            theme,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(Error::Options)
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The theme's styles with explicit overrides applied.
    pub fn effective_styles(&self) -> Styles {
        self.theme.styles().overlay(&self.styles)
    }
}
