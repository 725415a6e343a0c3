use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(from = "RawPost")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    #[serde(rename = "likesCount")]
    pub likes_count: i64,
    #[serde(rename = "commentsCount")]
    pub comments_count: i64,
    pub hashtags: Option<Vec<String>>,
    pub mentions: Vec<String>,
    pub caption: Option<String>,
    pub timestamp: Option<String>,
    #[serde(rename = "displayUrl")]
    pub media_url: Option<String>,
}

// Records carry both Mongo's `_id` and the scraper's `id`, and any count may be null.
#[derive(Debug, Deserialize)]
struct RawPost {
    #[serde(rename = "_id", default)]
    mongo_id: Option<IdValue>,
    #[serde(default)]
    id: Option<IdValue>,
    #[serde(rename = "type", default)]
    post_type: Option<String>,
    #[serde(rename = "likesCount", default)]
    likes_count: Option<i64>,
    #[serde(rename = "commentsCount", default)]
    comments_count: Option<i64>,
    #[serde(default)]
    hashtags: Option<Vec<String>>,
    #[serde(default)]
    mentions: Option<Vec<String>>,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(rename = "displayUrl", default)]
    display_url: Option<String>,
    #[serde(default)]
    media_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdValue {
    Text(String),
    Number(i64),
    Other(serde_json::Value),
}

impl IdValue {
    fn into_string(self) -> String {
        match self {
            IdValue::Text(text) => text,
            IdValue::Number(number) => number.to_string(),
            IdValue::Other(value) => value.to_string(),
        }
    }
}

fn pick_id(mongo_id: Option<IdValue>, id: Option<IdValue>) -> String {
    mongo_id
        .or(id)
        .map(IdValue::into_string)
        .unwrap_or_default()
}

impl From<RawPost> for Post {
    fn from(raw: RawPost) -> Self {
        Self {
            id: pick_id(raw.mongo_id, raw.id),
            post_type: raw.post_type,
            likes_count: raw.likes_count.unwrap_or(0),
            comments_count: raw.comments_count.unwrap_or(0),
            hashtags: raw.hashtags,
            mentions: raw.mentions.unwrap_or_default(),
            caption: raw.caption,
            timestamp: raw.timestamp,
            media_url: raw.display_url.or(raw.media_url),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeData {
    pub date: String,
    pub likes: i64,
    pub comments: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostTypeData {
    #[serde(rename = "postType")]
    pub post_type: String,
    pub likes: i64,
    pub comments: i64,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HashtagCount {
    pub hashtag: String,
    pub count: u64,
    pub likes: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayData {
    pub day: String,
    #[serde(rename = "fullDay")]
    pub full_day: String,
    pub likes: i64,
    pub comments: i64,
    pub total: i64,
    pub ratio: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HourData {
    pub hour: String,
    pub likes: i64,
    pub comments: i64,
    pub total: i64,
    pub ratio: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub post_count: usize,
    pub total_likes: i64,
    pub total_comments: i64,
    pub time_data: Vec<TimeData>,
    pub post_type_data: Vec<PostTypeData>,
    pub hashtag_data: Vec<HashtagCount>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeInsights {
    pub day_data: Vec<DayData>,
    pub hour_data: Vec<HourData>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub post_type: String,
    pub expected_average_likes: f64,
    pub expected_average_comments: f64,
    pub engagement_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawTopPost")]
pub struct TopPost {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub engagement_score: f64,
    pub caption: Option<String>,
    pub timestamp: Option<String>,
    pub media_url: Option<String>,
    #[serde(rename = "likesCount")]
    pub likes_count: Option<i64>,
    #[serde(rename = "commentsCount")]
    pub comments_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawTopPost {
    #[serde(rename = "_id", default)]
    mongo_id: Option<IdValue>,
    #[serde(default)]
    id: Option<IdValue>,
    #[serde(rename = "type", default)]
    post_type: Option<String>,
    #[serde(default)]
    engagement_score: Option<f64>,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    media_url: Option<String>,
    #[serde(rename = "displayUrl", default)]
    display_url: Option<String>,
    #[serde(rename = "likesCount", default)]
    likes_count: Option<i64>,
    #[serde(rename = "commentsCount", default)]
    comments_count: Option<i64>,
}

impl From<RawTopPost> for TopPost {
    fn from(raw: RawTopPost) -> Self {
        Self {
            id: pick_id(raw.mongo_id, raw.id),
            post_type: raw.post_type,
            engagement_score: raw.engagement_score.unwrap_or(0.0),
            caption: raw.caption,
            timestamp: raw.timestamp,
            media_url: raw.media_url.or(raw.display_url),
            likes_count: raw.likes_count,
            comments_count: raw.comments_count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TopPostsResponse {
    pub status: String,
    #[serde(default)]
    pub top_posts: Vec<TopPost>,
}

#[derive(Debug, Serialize)]
pub struct CollectionRequest<'a> {
    pub collection_name: &'a str,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    pub direct_urls: Vec<String>,
    pub results_type: String,
    pub results_limit: u32,
    pub search_type: String,
    pub search_limit: u32,
    pub add_parent_data: bool,
}

#[derive(Debug, Deserialize)]
pub struct IngestResponse {
    pub data: IngestData,
}

#[derive(Debug, Deserialize)]
pub struct IngestData {
    #[serde(rename = "collectionName")]
    pub collection_name: String,
    #[serde(default)]
    pub data: Vec<Post>,
}

#[derive(Debug, Deserialize)]
pub struct IntakeRequest {
    pub handle: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IntakeResponse {
    pub collection_name: String,
    pub post_count: usize,
    pub redirect: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CollectionResponse {
    pub collection_name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RefreshParams {
    pub limit: Option<usize>,
}
