use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Tags carried in an item's `type` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Subtitle,
    Artwork,
    Music,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EpisodeMeta {
    #[serde(default, deserialize_with = "lenient_string")]
    pub show: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub season: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub episode: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilmMeta {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub language: Option<String>,
}

/// Discriminant assigned once when the manifest is decoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MediaKind {
    Episode(EpisodeMeta),
    Film(FilmMeta),
    #[default]
    Other,
}

/// An item is an episode iff its metadata carries a `show` field.
pub fn classify_episode(meta: &Value) -> bool {
    meta.as_object()
        .map(|fields| fields.contains_key("show"))
        .unwrap_or(false)
}

/// An item is a film iff its metadata carries a `title` and neither a `show`
/// nor an `artist` (music records also carry titles).
pub fn classify_film(meta: &Value) -> bool {
    meta.as_object()
        .map(|fields| {
            fields.contains_key("title")
                && !fields.contains_key("show")
                && !fields.contains_key("artist")
        })
        .unwrap_or(false)
}

impl MediaKind {
    pub fn classify(meta: &Value) -> Self {
        if classify_episode(meta) {
            serde_json::from_value(meta.clone())
                .map(MediaKind::Episode)
                .unwrap_or_default()
        } else if classify_film(meta) {
            serde_json::from_value(meta.clone())
                .map(MediaKind::Film)
                .unwrap_or_default()
        } else {
            MediaKind::Other
        }
    }

    pub fn as_episode(&self) -> Option<&EpisodeMeta> {
        match self {
            MediaKind::Episode(meta) => Some(meta),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            MediaKind::Episode(meta) => Some(meta.title.as_str()),
            MediaKind::Film(meta) => Some(meta.title.as_str()),
            MediaKind::Other => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            MediaKind::Episode(meta) => meta.language.as_deref(),
            MediaKind::Film(meta) => meta.language.as_deref(),
            MediaKind::Other => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    path: String,
    #[serde(default, rename = "type")]
    types: Vec<MediaType>,
    #[serde(default)]
    meta: Value,
}

/// One manifest entry. Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawItem")]
pub struct Item {
    pub path: String,
    pub types: Vec<MediaType>,
    pub kind: MediaKind,
}

impl From<RawItem> for Item {
    fn from(raw: RawItem) -> Self {
        Self {
            kind: MediaKind::classify(&raw.meta),
            path: raw.path,
            types: raw.types,
        }
    }
}

impl Item {
    pub fn has_type(&self, media_type: MediaType) -> bool {
        self.types.contains(&media_type)
    }

    /// True when the tag list is exactly `[video]`.
    pub fn is_video_only(&self) -> bool {
        self.types.len() == 1 && self.types[0] == MediaType::Video
    }

    pub fn display_title(&self) -> &str {
        self.kind.title().unwrap_or("No title")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Manifest {
    #[serde(default)]
    pub version: f64,
    #[serde(default)]
    pub items: Vec<Item>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_string(deserializer)?.unwrap_or_default())
}

// Manifests written by older scanners emit numeric season/episode values.
fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}
