//! Layout intent primitives shared by the host view, the player surface and
//! the controls overlay

use serde::{Deserialize, Serialize};

/// How one axis of a view wants to be sized by its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Fill the space offered by the parent
    MatchParent,
    /// Size to the content
    WrapContent,
    /// A fixed number of pixels
    Exact(u32),
}

impl Dimension {
    pub fn resolve(self, available: u32, content: u32) -> u32 {
        match self {
            Dimension::MatchParent => available,
            Dimension::WrapContent => content.min(available),
            Dimension::Exact(px) => px,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutIntent {
    pub width: Dimension,
    pub height: Dimension,
}

impl LayoutIntent {
    /// Fill both axes (full-screen)
    pub const fn fill() -> Self {
        Self {
            width: Dimension::MatchParent,
            height: Dimension::MatchParent,
        }
    }

    /// Fill the width and let the content drive the height (normal mode)
    pub const fn fill_width() -> Self {
        Self {
            width: Dimension::MatchParent,
            height: Dimension::WrapContent,
        }
    }

    /// Resolve the intent against the parent's available space and the
    /// content's natural size.
    pub fn resolve(&self, available: Size, content: Size) -> Size {
        Size {
            width: self.width.resolve(available.width, content.width),
            height: self.height.resolve(available.height, content.height),
        }
    }
}

impl Default for LayoutIntent {
    fn default() -> Self {
        Self::fill_width()
    }
}

/// Resolved pixel dimensions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Height that keeps a 16:9 frame at the given width
    pub fn widescreen(width: u32) -> Self {
        Self {
            width,
            height: width.saturating_mul(9) / 16,
        }
    }
}
