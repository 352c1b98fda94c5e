use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CuratorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Daimyo,
    General,
    Background,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Daimyo, Category::General, Category::Background];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daimyo => "daimyo",
            Self::General => "general",
            Self::Background => "background",
        }
    }

    /// Key of this category's collection in the catalog payload.
    pub fn collection_key(self) -> &'static str {
        match self {
            Self::Daimyo => "daimyo",
            Self::General => "generals",
            Self::Background => "backgrounds",
        }
    }

    pub fn image_size(self) -> ImageSize {
        match self {
            Self::Background => ImageSize::Wide1280x720,
            Self::Daimyo | Self::General => ImageSize::Square256,
        }
    }

    /// Backgrounds are committed by their stored filename, portraits by id.
    pub fn commits_by_file(self) -> bool {
        matches!(self, Self::Background)
    }

    /// Lenient parse for untrusted metadata. `unknown`, blanks and any other
    /// unrecognized value yield `None`.
    pub fn from_hint(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CuratorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_hint(value).ok_or_else(|| {
            CuratorError::InvalidPayload(format!(
                "unknown category '{}' (expected daimyo, general or background)",
                value.trim()
            ))
        })
    }
}

/// Output dimensions. Fixed per category, never chosen independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "256x256")]
    Square256,
    #[serde(rename = "1280x720")]
    Wide1280x720,
}

impl ImageSize {
    pub fn dims(self) -> (u32, u32) {
        match self {
            Self::Square256 => (256, 256),
            Self::Wide1280x720 => (1280, 720),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square256 => "256x256",
            Self::Wide1280x720 => "1280x720",
        }
    }

    pub fn label(self) -> String {
        let (width, height) = self.dims();
        format!("{width} x {height}")
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
