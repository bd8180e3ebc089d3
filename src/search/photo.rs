// SPDX-License-Identifier: MPL-2.0
//! Photo records as returned by the Unsplash search endpoint.

use serde::{Deserialize, Deserializer};

/// Image URLs at the resolutions the API publishes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoUrls {
    pub raw: String,
    pub full: String,
    pub regular: String,
    pub small: String,
}

/// Photographer credit attached to a photo.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoAuthor {
    pub name: String,
}

/// One search hit. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Photo {
    /// Opaque identifier. Expected unique per query, not enforced.
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub alt_description: String,
    pub width: u32,
    pub height: u32,
    pub urls: PhotoUrls,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user: Option<PhotoAuthor>,
    /// Dominant color as a `#rrggbb` string, used for placeholders.
    #[serde(default)]
    pub color: Option<String>,
}

impl Photo {
    /// Width over height, falling back to square for degenerate sizes.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Parses [`Photo::color`] into RGB components.
    #[must_use]
    pub fn placeholder_rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.as_deref()?.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Builds a photo with predictable URLs for tests.
    pub fn photo(id: &str) -> Photo {
        Photo {
            id: id.to_string(),
            alt_description: format!("alt {id}"),
            width: 400,
            height: 300,
            urls: PhotoUrls {
                raw: format!("https://images.test/{id}/raw"),
                full: format!("https://images.test/{id}/full"),
                regular: format!("https://images.test/{id}/regular"),
                small: format!("https://images.test/{id}/small"),
            },
            description: None,
            user: None,
            color: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_null_alt_description_as_empty() {
        let json = r##"{
            "id": "abc",
            "alt_description": null,
            "width": 4000,
            "height": 3000,
            "color": "#0c2640",
            "urls": {
                "raw": "https://images.unsplash.com/raw",
                "full": "https://images.unsplash.com/full",
                "regular": "https://images.unsplash.com/regular",
                "small": "https://images.unsplash.com/small",
                "thumb": "https://images.unsplash.com/thumb"
            },
            "user": { "name": "Jane Doe", "username": "jane" }
        }"##;
        let photo: Photo = serde_json::from_str(json).expect("valid photo json");
        assert_eq!(photo.alt_description, "");
        assert_eq!(photo.user.map(|u| u.name).as_deref(), Some("Jane Doe"));
        assert_eq!(photo.urls.small, "https://images.unsplash.com/small");
    }

    #[test]
    fn aspect_ratio_handles_zero_height() {
        let mut photo = fixtures::photo("a");
        assert!((photo.aspect_ratio() - 4.0 / 3.0).abs() < f32::EPSILON);
        photo.height = 0;
        assert!((photo.aspect_ratio() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn placeholder_rgb_parses_hex() {
        let mut photo = fixtures::photo("a");
        photo.color = Some("#0c2640".to_string());
        assert_eq!(photo.placeholder_rgb(), Some((0x0c, 0x26, 0x40)));
        photo.color = Some("blue".to_string());
        assert_eq!(photo.placeholder_rgb(), None);
    }
}
