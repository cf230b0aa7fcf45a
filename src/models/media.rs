use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Gif,
    Audio,
    Document,
}

impl MediaKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
            MediaKind::Gif => "GIF",
            MediaKind::Audio => "Audio",
            MediaKind::Document => "Document",
        }
    }

    pub fn as_param(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Gif => "gif",
            MediaKind::Audio => "audio",
            MediaKind::Document => "document",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaDimensions {
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub filename: String,
    #[serde(rename = "originalName", default)]
    pub original_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: i64,
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub dimensions: Option<MediaDimensions>,
    #[serde(rename = "altText", default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(rename = "isUsed", default)]
    pub is_used: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl MediaItem {
    pub fn display_name(&self) -> &str {
        self.original_name.as_deref().unwrap_or(&self.filename)
    }

    /// Human-readable size, binary units.
    pub fn size_display(&self) -> String {
        const KIB: f64 = 1024.0;
        const MIB: f64 = 1024.0 * 1024.0;
        let bytes = self.size as f64;
        if bytes >= MIB {
            format!("{:.1} MB", bytes / MIB)
        } else if bytes >= KIB {
            format!("{:.0} KB", bytes / KIB)
        } else {
            format!("{} B", self.size)
        }
    }

    pub fn dimensions_display(&self) -> String {
        match &self.dimensions {
            Some(d) => format!("{}x{}", d.width, d.height),
            None => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFolder {
    pub name: String,
    #[serde(default)]
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_media_item() {
        let json = r#"{
            "_id": "m1",
            "filename": "sunset-final.jpg",
            "originalName": "sunset.jpg",
            "type": "image",
            "mimeType": "image/jpeg",
            "size": 2621440,
            "url": "https://cdn.example.com/sunset-final.jpg",
            "dimensions": {"width": 1920, "height": 1080},
            "folder": "campaigns",
            "isUsed": true
        }"#;

        let item: MediaItem = serde_json::from_str(json).expect("Failed to parse media JSON");
        assert_eq!(item.kind, MediaKind::Image);
        assert_eq!(item.display_name(), "sunset.jpg");
        assert_eq!(item.size_display(), "2.5 MB");
        assert_eq!(item.dimensions_display(), "1920x1080");
    }

    #[test]
    fn test_size_display_units() {
        let mut item: MediaItem = serde_json::from_str(
            r#"{"_id": "m", "filename": "f", "type": "video", "url": "u"}"#,
        )
        .expect("Failed to parse minimal media JSON");

        item.size = 512;
        assert_eq!(item.size_display(), "512 B");
        item.size = 51200;
        assert_eq!(item.size_display(), "50 KB");
    }
}
