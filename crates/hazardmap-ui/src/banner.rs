use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerTone {
    #[default]
    Info,
    Error,
}

/// Loading and error indicator shown above the map
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatusBanner {
    pub visible: bool,
    pub text: String,
    pub tone: BannerTone,
}

impl StatusBanner {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn loading_categories() -> Self {
        Self::shown("Loading categories…", BannerTone::Info)
    }

    pub fn loading_events() -> Self {
        Self::shown("Loading events…", BannerTone::Info)
    }

    /// Startup failure; the category list could not be loaded
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self::shown(format!("Error: {}", message), BannerTone::Error)
    }

    /// Failure of an event fetch
    pub fn load_error(message: impl std::fmt::Display) -> Self {
        Self::shown(format!("Error loading data: {}", message), BannerTone::Error)
    }

    fn shown(text: impl Into<String>, tone: BannerTone) -> Self {
        Self { visible: true, text: text.into(), tone }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_texts() {
        assert!(!StatusBanner::hidden().visible);
        assert_eq!(StatusBanner::loading_events().text, "Loading events…");
        assert_eq!(
            StatusBanner::load_error("API error 500: Internal Server Error").text,
            "Error loading data: API error 500: Internal Server Error"
        );
        assert_eq!(StatusBanner::error("boom").text, "Error: boom");
        assert!(StatusBanner::error("boom").visible);
        assert_eq!(StatusBanner::error("boom").tone, BannerTone::Error);
        assert_eq!(StatusBanner::loading_categories().tone, BannerTone::Info);
    }
}
