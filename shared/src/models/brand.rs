//! Branding and theme settings

use serde::{Deserialize, Serialize};

/// Look and feel of the kitchen app
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrandSettings {
    pub id: String,
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_height: Option<u32>,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub text_color: String,
    pub header_background_color: String,
    pub card_background_color: String,
    pub border_color: String,
    pub success_color: String,
    pub warning_color: String,
    pub error_color: String,
    pub font_family: String,
    pub heading_font_family: String,
    pub font_size: String,
    pub heading_font_weight: String,
    pub body_font_weight: String,
    pub header_title: String,
    pub header_subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    pub border_radius: String,
    pub shadow_intensity: String,
    pub button_style: ButtonStyle,
    pub card_style: CardStyle,
}

impl BrandSettings {
    /// Every colour field with its name, for validation
    pub fn colors(&self) -> [(&'static str, &str); 11] {
        [
            ("primaryColor", &self.primary_color),
            ("secondaryColor", &self.secondary_color),
            ("accentColor", &self.accent_color),
            ("backgroundColor", &self.background_color),
            ("textColor", &self.text_color),
            ("headerBackgroundColor", &self.header_background_color),
            ("cardBackgroundColor", &self.card_background_color),
            ("borderColor", &self.border_color),
            ("successColor", &self.success_color),
            ("warningColor", &self.warning_color),
            ("errorColor", &self.error_color),
        ]
    }

    pub fn apply_preset(&mut self, preset: &ColorPreset) {
        self.primary_color = preset.primary.to_string();
        self.secondary_color = preset.secondary.to_string();
        self.accent_color = preset.accent.to_string();
        self.background_color = preset.background.to_string();
    }
}

impl Default for BrandSettings {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            company_name: "Kitchen Recipe Calculator".to_string(),
            logo: None,
            logo_width: Some(32),
            logo_height: Some(32),
            primary_color: "#2563eb".to_string(),
            secondary_color: "#7c3aed".to_string(),
            accent_color: "#059669".to_string(),
            background_color: "#f8fafc".to_string(),
            text_color: "#1f2937".to_string(),
            header_background_color: "#ffffff".to_string(),
            card_background_color: "#ffffff".to_string(),
            border_color: "#e5e7eb".to_string(),
            success_color: "#10b981".to_string(),
            warning_color: "#f59e0b".to_string(),
            error_color: "#ef4444".to_string(),
            font_family: "Inter, system-ui, sans-serif".to_string(),
            heading_font_family: "Inter, system-ui, sans-serif".to_string(),
            font_size: "16px".to_string(),
            heading_font_weight: "600".to_string(),
            body_font_weight: "400".to_string(),
            header_title: "Kitchen Recipe Calculator".to_string(),
            header_subtitle: "Scale recipes to exact quantities".to_string(),
            footer_text: Some(String::new()),
            custom_css: Some(String::new()),
            border_radius: "8px".to_string(),
            shadow_intensity: "medium".to_string(),
            button_style: ButtonStyle::Rounded,
            card_style: CardStyle::Elevated,
        }
    }
}

/// Button corner style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Rounded,
    Square,
    Pill,
}

/// Card surface style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    Flat,
    #[default]
    Elevated,
    Outlined,
}

/// A named colour scheme
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ColorPreset {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
}

pub static COLOR_PRESETS: [ColorPreset; 6] = [
    ColorPreset { name: "Ocean Blue", primary: "#2563eb", secondary: "#7c3aed", accent: "#059669", background: "#f8fafc" },
    ColorPreset { name: "Forest Green", primary: "#059669", secondary: "#0d9488", accent: "#f59e0b", background: "#f0fdf4" },
    ColorPreset { name: "Sunset Orange", primary: "#ea580c", secondary: "#dc2626", accent: "#7c3aed", background: "#fff7ed" },
    ColorPreset { name: "Royal Purple", primary: "#7c3aed", secondary: "#c026d3", accent: "#2563eb", background: "#faf5ff" },
    ColorPreset { name: "Professional Gray", primary: "#374151", secondary: "#6b7280", accent: "#2563eb", background: "#f9fafb" },
    ColorPreset { name: "Warm Cream", primary: "#92400e", secondary: "#b45309", accent: "#059669", background: "#fffbeb" },
];

/// Look up a preset by name (case-insensitive)
pub fn find_preset(name: &str) -> Option<&'static ColorPreset> {
    COLOR_PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}
