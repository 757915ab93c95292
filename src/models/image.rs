// Image entity

use serde::Deserialize;
use std::fmt;

/// Cover art or artist picture. Dimensions are null when unknown.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
    pub height: Option<u32>,
    pub url: String,
    pub width: Option<u32>,
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.height, self.width) {
            (Some(h), Some(w)) => write!(f, "{} x {}", h, w),
            _ => write!(f, "unknown size"),
        }
    }
}
