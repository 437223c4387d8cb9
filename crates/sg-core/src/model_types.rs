/// Unified model type definition shared across the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoModel {
    Sora2,
    Sora2Pro,
}

impl VideoModel {
    /// Model name for display in UI
    pub fn name(&self) -> &str {
        match self {
            Self::Sora2 => "Sora 2",
            Self::Sora2Pro => "Sora 2 Pro",
        }
    }

    /// Model ID for API communication
    pub fn id(&self) -> &str {
        match self {
            Self::Sora2 => "sora-2",
            Self::Sora2Pro => "sora-2-pro",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &str {
        match self {
            Self::Sora2 => "Fast text-to-video (1-2 min)",
            Self::Sora2Pro => "Higher fidelity text-to-video, slower renders",
        }
    }

    /// Estimated generation time in seconds
    pub fn estimated_time_secs(&self) -> u32 {
        match self {
            Self::Sora2 => 90,
            Self::Sora2Pro => 240,
        }
    }

    /// All available models
    pub fn all() -> [VideoModel; 2] {
        [Self::Sora2, Self::Sora2Pro]
    }
}

impl Default for VideoModel {
    fn default() -> Self {
        Self::Sora2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_ids() {
        assert_eq!(VideoModel::Sora2.id(), "sora-2");
        assert_eq!(VideoModel::Sora2Pro.id(), "sora-2-pro");
    }

    #[test]
    fn test_default_model() {
        assert_eq!(VideoModel::default(), VideoModel::Sora2);
    }

    #[test]
    fn test_all_models() {
        assert_eq!(VideoModel::all().len(), 2);
    }
}
