//! Render configuration

use std::path::PathBuf;

/// Directory name, below the user cache directory, where device templates
/// are usually synced to.
pub const TEMPLATE_DIR_NAME: &str = "remarkable-templates";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Where background templates are looked up.
    pub template_dir: PathBuf,
    /// Abort the conversion on strokes with an unknown tool or color instead
    /// of skipping them.
    pub strict: bool,
}

impl RenderConfig {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            strict: false,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(default_template_dir())
    }
}

pub fn default_template_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(TEMPLATE_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lenient_and_uses_cache_dir() {
        let config = RenderConfig::default();
        assert!(!config.strict);
        assert!(config.template_dir.ends_with(TEMPLATE_DIR_NAME));
        assert!(RenderConfig::new("/tmp/t").with_strict(true).strict);
    }
}
