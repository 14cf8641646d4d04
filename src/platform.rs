use crate::utils::hostname_of;
use crate::AnalysisReport;
use serde::Serialize;

pub const NO_TITLE_PLACEHOLDER: &str = "No title";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Twitter,
    LinkedIn,
    WhatsApp,
    Discord,
}

/// Display constraints of a platform's link card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformConfig {
    pub name: &'static str,
    pub aspect_ratio: &'static str,
    pub image_aspect: &'static str,
    pub max_width: u32,
    pub max_height: u32,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Facebook,
        Platform::Twitter,
        Platform::LinkedIn,
        Platform::WhatsApp,
        Platform::Discord,
    ];

    pub fn config(self) -> PlatformConfig {
        match self {
            Platform::Facebook => PlatformConfig {
                name: "Facebook",
                aspect_ratio: "1.91 / 1",
                image_aspect: "1.91:1",
                max_width: 527,
                max_height: 276,
            },
            Platform::Twitter => PlatformConfig {
                name: "Twitter / X",
                aspect_ratio: "1.91 / 1",
                image_aspect: "1.91:1",
                max_width: 506,
                max_height: 265,
            },
            Platform::LinkedIn => PlatformConfig {
                name: "LinkedIn",
                aspect_ratio: "1.91 / 1",
                image_aspect: "1.91:1",
                max_width: 552,
                max_height: 289,
            },
            Platform::WhatsApp => PlatformConfig {
                name: "WhatsApp",
                aspect_ratio: "1 / 1",
                image_aspect: "1:1",
                max_width: 300,
                max_height: 300,
            },
            Platform::Discord => PlatformConfig {
                name: "Discord",
                aspect_ratio: "1.91 / 1",
                image_aspect: "1.91:1",
                max_width: 400,
                max_height: 209,
            },
        }
    }
}

/// What a platform's link card would show for a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformPreview {
    pub platform: Platform,
    pub config: PlatformConfig,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub site_name: String,
}

impl PlatformPreview {
    pub fn from_report(report: &AnalysisReport, platform: Platform) -> Self {
        let og = &report.open_graph;
        let twitter = &report.twitter;
        let meta = &report.meta;

        let image = og.image.clone().or_else(|| twitter.image.clone());
        let title = og
            .title
            .clone()
            .or_else(|| twitter.title.clone())
            .or_else(|| meta.title.clone())
            .unwrap_or_else(|| NO_TITLE_PLACEHOLDER.to_string());
        let description = og
            .description
            .clone()
            .or_else(|| twitter.description.clone())
            .or_else(|| meta.description.clone());
        let site_name = og
            .site_name
            .clone()
            .unwrap_or_else(|| hostname_of(&report.url));

        Self {
            platform,
            config: platform.config(),
            image,
            image_alt: og.image_alt.clone(),
            title,
            description,
            site_name,
        }
    }

    /// Previews for every platform in [`Platform::ALL`] order.
    pub fn all(report: &AnalysisReport) -> Vec<Self> {
        Platform::ALL
            .iter()
            .map(|platform| Self::from_report(report, *platform))
            .collect()
    }
}
