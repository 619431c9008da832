//! Colours, escaping and naming helpers shared by the renderers.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use sgraph_common::{AchievementBand, HierarchyLevel, ProfitStatus, Scope};
use sgraph_config::Config;

/// Presentation settings common to all renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStyle {
    /// Currency symbol printed in front of amounts.
    pub currency_symbol: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
        }
    }
}

impl RenderStyle {
    /// Takes the presentation settings from the report configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            currency_symbol: config.report.currency_symbol.clone(),
        }
    }
}

/// Utility functions for graph and report generation.
pub struct GraphUtils;

impl GraphUtils {
    /// Graphviz fill colour of a manager level.
    pub const fn level_fill(level: HierarchyLevel) -> &'static str {
        match level {
            HierarchyLevel::Cnf => "lightblue",
            HierarchyLevel::Super => "lightyellow",
            HierarchyLevel::Distributor => "lightgreen",
            HierarchyLevel::Rsm => "lightcoral",
            HierarchyLevel::Asm => "lightpink",
            HierarchyLevel::Employee => "white",
        }
    }

    /// Graphviz fill colour of an employee node.
    pub const fn status_fill(status: ProfitStatus) -> &'static str {
        match status {
            ProfitStatus::Profit => "lightgreen",
            ProfitStatus::Loss => "lightcoral",
        }
    }

    /// Hex colour of an achievement band.
    pub const fn band_hex(band: AchievementBand) -> &'static str {
        match band {
            AchievementBand::High => "#2e7d32",
            AchievementBand::Medium => "#f9a825",
            AchievementBand::Low => "#ef6c00",
            AchievementBand::Critical => "#c62828",
        }
    }

    /// Raster colour of an achievement band.
    pub fn band_rgb(band: AchievementBand) -> RGBColor {
        Self::parse_color(Self::band_hex(band)).unwrap_or(RGBColor(0, 0, 0))
    }

    /// Parses a `#rrggbb` colour.
    pub fn parse_color(color: &str) -> Option<RGBColor> {
        let hex = color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Escapes text for use inside a double-quoted DOT string.
    pub fn escape_dot(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => {}
                c => out.push(c),
            }
        }
        out
    }

    /// File-name friendly stem for a scope, e.g. `cnf_c1` or `employee_asha_k`.
    pub fn scope_slug(scope: &Scope) -> String {
        let raw = match scope {
            Scope::All => return "all".to_string(),
            Scope::Employee { name } => format!("employee {name}"),
            Scope::Entity { level, name } => format!("{level} {name}"),
        };
        let mut slug = String::with_capacity(raw.len());
        for c in raw.chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if !slug.ends_with('_') {
                slug.push('_');
            }
        }
        slug.trim_matches('_').to_string()
    }

    /// Width of the achievement bar as a fraction of its track.
    ///
    /// The track spans 0 to 150 percent.
    pub fn bar_fraction(pct: f64) -> f64 {
        if pct.is_finite() {
            (pct / 150.0).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(GraphUtils::parse_color("#FF0000"), Some(RGBColor(255, 0, 0)));
        assert_eq!(GraphUtils::parse_color("#2e7d32"), Some(RGBColor(46, 125, 50)));
        assert_eq!(GraphUtils::parse_color("red"), None);
        assert_eq!(GraphUtils::parse_color("#ZZ0000"), None);
        assert_eq!(GraphUtils::parse_color("#€000"), None);
    }

    #[test]
    fn test_escape_dot() {
        assert_eq!(GraphUtils::escape_dot(r#"A "B" \C"#), r#"A \"B\" \\C"#);
        assert_eq!(GraphUtils::escape_dot("a\nb"), "a\\nb");
    }

    #[test]
    fn test_scope_slug() {
        assert_eq!(GraphUtils::scope_slug(&Scope::All), "all");
        assert_eq!(
            GraphUtils::scope_slug(&Scope::employee("Asha K.")),
            "employee_asha_k"
        );
        assert_eq!(
            GraphUtils::scope_slug(&Scope::entity(HierarchyLevel::Cnf, "C1 / North")),
            "cnf_c1_north"
        );
    }

    #[test]
    fn test_bar_fraction_is_clamped() {
        assert!((GraphUtils::bar_fraction(75.0) - 0.5).abs() < 1e-12);
        assert!((GraphUtils::bar_fraction(400.0) - 1.0).abs() < 1e-12);
        assert!(GraphUtils::bar_fraction(-10.0).abs() < 1e-12);
        assert!(GraphUtils::bar_fraction(f64::NAN).abs() < 1e-12);
    }

    #[test]
    fn test_every_band_has_a_colour() {
        for band in [
            AchievementBand::High,
            AchievementBand::Medium,
            AchievementBand::Low,
            AchievementBand::Critical,
        ] {
            assert!(GraphUtils::parse_color(GraphUtils::band_hex(band)).is_some());
        }
    }
}
