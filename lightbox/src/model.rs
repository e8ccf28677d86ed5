//! Photo data model, manifest decoding, and tag grouping.

use crate::errors::LightboxError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One photo record from the content manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Capture date, as published.
    pub date: String,
    /// Capture location, as published.
    pub location: String,
    /// Category tag used to group photos into rows.
    #[serde(rename = "type")]
    pub tag: String,
    /// Base image filename, relative to the tier directory.
    pub image: String,
}

/// The versioned content manifest payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// All published photos, in publication order.
    pub photos: Vec<PhotoRecord>,
}

impl Manifest {
    /// Decodes a manifest from its JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, LightboxError> {
        let manifest: Self = serde_json::from_str(payload)?;
        Ok(manifest)
    }
}

/// An immutable photo value with its position in the containing list.
///
/// Constructed once from loaded content data, never mutated, and shared
/// read-only by every carousel and row that references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// Stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Capture date.
    pub date: String,
    /// Capture location.
    pub location: String,
    /// Category tag.
    pub tag: String,
    /// Base image filename.
    pub image: String,
    /// Position within the containing ordered list, assigned at
    /// list-build time.
    pub index: usize,
}

impl Photo {
    fn from_record(record: PhotoRecord, index: usize) -> Self {
        Self {
            id: record.id,
            title: record.title,
            date: record.date,
            location: record.location,
            tag: record.tag,
            image: record.image,
            index,
        }
    }

    /// Per-photo detail path.
    #[must_use]
    pub fn path(&self) -> String {
        format!("photos/{}/", self.id)
    }

    /// Full page title for this photo.
    #[must_use]
    pub fn page_title(&self, site_title: &str) -> String {
        format!("{site_title} \u{2014} {}", self.title)
    }
}

/// Image resolution tiers, derived from the same base filename by
/// directory convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    /// Low resolution for row thumbnails.
    Thumb,
    /// Medium resolution for feature backgrounds.
    Mid,
    /// High resolution for the full-screen carousel.
    Full,
}

impl Tier {
    /// The tier directory segment.
    #[must_use]
    pub fn dir(self) -> &'static str {
        match self {
            Self::Thumb => "400",
            Self::Mid => "800",
            Self::Full => "1600",
        }
    }
}

/// Resolves a photo's image path at a resolution tier.
///
/// With `nocredit` set, the credit-overlay suffix segment is dropped from
/// the filename; a presentation toggle, not a data contract change.
#[must_use]
pub fn image_path(photo: &Photo, tier: Tier, nocredit: bool) -> String {
    let image = if nocredit {
        photo.image.replace("_credit", "")
    } else {
        photo.image.clone()
    };
    format!("assets/photos/{}/{}", tier.dir(), image)
}

/// Appends a per-load cache-buster to the manifest path so repeat loads
/// defeat caching.
#[must_use]
pub fn manifest_url(path: &str) -> String {
    format!("{path}?{}", chrono::Utc::now().timestamp_millis())
}

/// Process-wide append-only photo list.
///
/// Populated once from the manifest; read-only afterwards. Consumers hold
/// cheap `Arc` views.
#[derive(Debug, Default)]
pub struct PhotoLibrary {
    photos: parking_lot::RwLock<Arc<[Photo]>>,
}

impl PhotoLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populates the library from a decoded manifest, assigning each photo
    /// its position in the process-wide list.
    pub fn publish(&self, manifest: Manifest) {
        let photos: Arc<[Photo]> = manifest
            .photos
            .into_iter()
            .enumerate()
            .map(|(index, record)| Photo::from_record(record, index))
            .collect();
        tracing::info!(count = photos.len(), "photo library published");
        *self.photos.write() = photos;
    }

    /// A shared read-only view of the full list.
    #[must_use]
    pub fn photos(&self) -> Arc<[Photo]> {
        Arc::clone(&self.photos.read())
    }

    /// Number of published photos.
    #[must_use]
    pub fn len(&self) -> usize {
        self.photos.read().len()
    }

    /// Whether the library has been populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photos.read().is_empty()
    }
}

/// Groups photos by tag in first-seen tag order, preserving each photo's
/// original relative order inside its group.
#[must_use]
pub fn group_by_tag(photos: &[Photo]) -> Vec<(String, Vec<Photo>)> {
    let mut rows: Vec<(String, Vec<Photo>)> = Vec::new();
    for photo in photos {
        match rows.iter_mut().find(|(tag, _)| *tag == photo.tag) {
            Some((_, members)) => members.push(photo.clone()),
            None => rows.push((photo.tag.clone(), vec![photo.clone()])),
        }
    }
    rows
}

/// Groups photos against a curated tag list, matching tags
/// case-insensitively as substrings, one row per listed tag.
///
/// A photo whose tag matches several listed tags appears in each matching
/// row; rows with no members are dropped.
#[must_use]
pub fn rows_for_tags(photos: &[Photo], tags: &[String]) -> Vec<(String, Vec<Photo>)> {
    let mut rows = Vec::new();
    for tag in tags {
        let needle = tag.to_lowercase();
        let members: Vec<Photo> = photos
            .iter()
            .filter(|photo| photo.tag.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        if !members.is_empty() {
            rows.push((tag.clone(), members));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn photo(id: &str, tag: &str, index: usize) -> Photo {
        Photo {
            id: id.to_string(),
            title: format!("Photo {id}"),
            date: "1939-05-17".to_string(),
            location: "Toronto".to_string(),
            tag: tag.to_string(),
            image: format!("{id}_credit.jpg"),
            index,
        }
    }

    #[test]
    fn test_manifest_decoding() {
        let payload = r#"{
            "photos": [
                {"id": "p1", "title": "Presses", "date": "1948",
                 "location": "Toronto", "type": "News", "image": "p1.jpg"}
            ]
        }"#;
        let manifest = Manifest::from_json(payload).unwrap();
        assert_eq!(manifest.photos.len(), 1);
        assert_eq!(manifest.photos[0].tag, "News");
    }

    #[test]
    fn test_manifest_rejects_bad_payload() {
        assert!(Manifest::from_json("{\"photos\": 3}").is_err());
    }

    #[test]
    fn test_library_publish_assigns_indexes() {
        let library = PhotoLibrary::new();
        library.publish(Manifest {
            photos: vec![
                PhotoRecord {
                    id: "a".into(),
                    title: "A".into(),
                    date: String::new(),
                    location: String::new(),
                    tag: "Navy".into(),
                    image: "a.jpg".into(),
                },
                PhotoRecord {
                    id: "b".into(),
                    title: "B".into(),
                    date: String::new(),
                    location: String::new(),
                    tag: "Fashion".into(),
                    image: "b.jpg".into(),
                },
            ],
        });

        let photos = library.photos();
        assert_eq!(photos[0].index, 0);
        assert_eq!(photos[1].index, 1);
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_image_path_tiers() {
        let p = photo("p1", "Navy", 0);
        assert_eq!(image_path(&p, Tier::Thumb, false), "assets/photos/400/p1_credit.jpg");
        assert_eq!(image_path(&p, Tier::Full, false), "assets/photos/1600/p1_credit.jpg");
    }

    #[test]
    fn test_nocredit_drops_suffix() {
        let p = photo("p1", "Navy", 0);
        assert_eq!(image_path(&p, Tier::Full, true), "assets/photos/1600/p1.jpg");
    }

    #[test]
    fn test_manifest_url_has_cache_buster() {
        let url = manifest_url("assets/data/data.json");
        let (path, buster) = url.split_once('?').unwrap();
        assert_eq!(path, "assets/data/data.json");
        assert!(buster.parse::<i64>().is_ok());
    }

    #[test]
    fn test_group_by_tag_first_seen_order() {
        let photos = vec![photo("a", "Navy", 0), photo("b", "Fashion", 1), photo("c", "Navy", 2)];
        let rows = group_by_tag(&photos);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "Navy");
        assert_eq!(rows[0].1.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(rows[1].0, "Fashion");
        assert_eq!(rows[1].1.len(), 1);
    }

    #[test]
    fn test_rows_for_tags_case_insensitive_substring() {
        let photos = vec![
            photo("a", "1939 Royal Visit", 0),
            photo("b", "royal visit 1939", 1),
            photo("c", "Navy", 2),
        ];
        let tags = vec!["1939 Royal Visit".to_string(), "Film and Television".to_string()];
        let rows = rows_for_tags(&photos, &tags);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1.len(), 1);
        assert_eq!(rows[0].1[0].id, "a");
    }

    #[test]
    fn test_page_title() {
        let p = photo("p1", "Navy", 0);
        assert_eq!(p.page_title("Gerald Richardson"), "Gerald Richardson \u{2014} Photo p1");
    }
}
