//! Models for catalog API payloads

use serde::{Deserialize, Serialize};

/// Kind discriminator for catalog items
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
    Person,
    /// Kinds this client does not browse (collections, networks, ...)
    #[serde(other)]
    Other,
}

impl MediaKind {
    /// Path segment used by the catalog API
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
            MediaKind::Person => "person",
            // unknown kinds route like movies, matching the browsing UI
            MediaKind::Other => "movie",
        }
    }
}

/// Trending window supported by the catalog API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

/// One item of a paged listing: a movie, a series, or a person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u64,
    /// Present in mixed result sets (multi search, trending)
    pub media_type: Option<MediaKind>,
    /// Movies carry `title`, series and people carry `name`
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub profile_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    pub popularity: Option<f64>,
}

impl MediaItem {
    /// Display title, regardless of item kind
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.name.as_deref())
    }

    /// Identity key for deduplication
    ///
    /// Mixed result sets need the kind discriminator: a movie and a series
    /// can share a numeric id. Items without their own `media_type` take the
    /// fallback kind of the listing they came from.
    pub fn key(&self, fallback: MediaKind) -> ItemKey {
        ItemKey {
            kind: self.media_type.unwrap_or(fallback),
            id: self.id,
        }
    }
}

/// Unique identity of an item within an accumulated result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub kind: MediaKind,
    pub id: u64,
}

fn default_page() -> u32 {
    1
}

fn default_total_pages() -> u32 {
    1
}

/// One page of catalog results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MediaItem>,
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

/// Genre attached to a media detail response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Trailer or clip attached to a media item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Video listing for a media item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Cast entry of a credits response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    pub order: Option<u32>,
}

/// Crew entry of a credits response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    pub job: Option<String>,
    pub department: Option<String>,
    pub profile_path: Option<String>,
}

/// Credits for a media item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// Still, poster, or profile image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub file_path: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Image collection for a media item or person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCollection {
    #[serde(default)]
    pub backdrops: Vec<Image>,
    #[serde(default)]
    pub posters: Vec<Image>,
    #[serde(default)]
    pub profiles: Vec<Image>,
}

/// Detail response for a movie or series, with appended sub-resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaDetails {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    pub number_of_seasons: Option<u32>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    pub videos: Option<VideoList>,
    pub credits: Option<Credits>,
    pub similar: Option<PagedResponse>,
    pub recommendations: Option<PagedResponse>,
    pub images: Option<ImageCollection>,
}

/// Combined movie/tv credits of a person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonCredits {
    #[serde(default)]
    pub cast: Vec<MediaItem>,
    #[serde(default)]
    pub crew: Vec<MediaItem>,
}

/// Detail response for a person, with appended sub-resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonDetails {
    pub id: u64,
    pub name: String,
    pub biography: Option<String>,
    pub birthday: Option<String>,
    pub place_of_birth: Option<String>,
    pub profile_path: Option<String>,
    pub known_for_department: Option<String>,
    pub popularity: Option<f64>,
    pub movie_credits: Option<PersonCredits>,
    pub tv_credits: Option<PersonCredits>,
    pub images: Option<ImageCollection>,
}

/// One episode of a season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: u64,
    pub name: String,
    pub overview: Option<String>,
    pub episode_number: u32,
    pub air_date: Option<String>,
    pub still_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

/// Detail response for a series season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonDetails {
    pub name: Option<String>,
    pub overview: Option<String>,
    pub season_number: u32,
    pub air_date: Option<String>,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_response_defaults() {
        let resp: PagedResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.page, 1);
        assert_eq!(resp.total_pages, 1);
        assert!(resp.results.is_empty());
    }

    #[test]
    fn test_media_item_mixed_search_payload() {
        let resp: PagedResponse = serde_json::from_str(
            r#"{
                "page": 1,
                "results": [
                    {"id": 550, "media_type": "movie", "title": "Fight Club", "vote_average": 8.4},
                    {"id": 550, "media_type": "tv", "name": "Some Show"},
                    {"id": 819, "media_type": "person", "name": "Edward Norton"}
                ],
                "total_pages": 3,
                "total_results": 55
            }"#,
        )
        .unwrap();

        assert_eq!(resp.results.len(), 3);
        assert_eq!(resp.results[0].display_title(), Some("Fight Club"));
        assert_eq!(resp.results[1].display_title(), Some("Some Show"));

        // same numeric id, different kinds: distinct identities
        let movie_key = resp.results[0].key(MediaKind::Movie);
        let tv_key = resp.results[1].key(MediaKind::Movie);
        assert_ne!(movie_key, tv_key);
    }

    #[test]
    fn test_media_item_key_falls_back_to_listing_kind() {
        let item: MediaItem =
            serde_json::from_str(r#"{"id": 42, "title": "Untyped"}"#).unwrap();

        assert_eq!(
            item.key(MediaKind::Tv),
            ItemKey {
                kind: MediaKind::Tv,
                id: 42
            }
        );
    }

    #[test]
    fn test_unknown_media_type_is_tolerated() {
        let item: MediaItem =
            serde_json::from_str(r#"{"id": 7, "media_type": "collection", "name": "Saga"}"#)
                .unwrap();

        assert_eq!(item.media_type, Some(MediaKind::Other));
        assert_eq!(item.key(MediaKind::Movie).kind, MediaKind::Other);
    }
}
