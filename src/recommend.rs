use crate::models::Recommendation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

const TEXT_PREFIX: &str = "Recommendations for next post types:";

#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationPayload {
    Direct(Vec<Recommendation>),
    Wrapped(Vec<Recommendation>),
    Text(Vec<Recommendation>),
    Unparseable(String),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PayloadSource {
    Direct,
    Wrapped,
    Text,
    Unparseable,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendations {
    pub source: PayloadSource,
    pub entries: Vec<Recommendation>,
}

#[derive(Debug, Deserialize)]
struct Stats {
    expected_average_likes: f64,
    expected_average_comments: f64,
    engagement_score: f64,
}

impl RecommendationPayload {
    pub fn source(&self) -> PayloadSource {
        match self {
            Self::Direct(_) => PayloadSource::Direct,
            Self::Wrapped(_) => PayloadSource::Wrapped,
            Self::Text(_) => PayloadSource::Text,
            Self::Unparseable(_) => PayloadSource::Unparseable,
        }
    }

    pub fn into_recommendations(self) -> Recommendations {
        let source = self.source();
        let entries = match self {
            Self::Direct(entries) | Self::Wrapped(entries) | Self::Text(entries) => entries,
            Self::Unparseable(raw) => {
                warn!(body = %raw, "no recommendation data could be parsed");
                Vec::new()
            }
        };
        Recommendations { source, entries }
    }
}

pub fn decode(body: &str) -> RecommendationPayload {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => decode_value(&value),
        Err(_) => decode_text(body),
    }
}

pub fn decode_value(value: &Value) -> RecommendationPayload {
    match value {
        Value::Object(map) => {
            if let Some(inner) = map.get("recommendations") {
                return match decode_value(inner) {
                    RecommendationPayload::Direct(entries)
                    | RecommendationPayload::Wrapped(entries)
                    | RecommendationPayload::Text(entries) => {
                        RecommendationPayload::Wrapped(entries)
                    }
                    unparseable => unparseable,
                };
            }
            let entries = from_object(map);
            if entries.is_empty() {
                RecommendationPayload::Unparseable(value.to_string())
            } else {
                RecommendationPayload::Direct(entries)
            }
        }
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(nested @ Value::Object(_)) => decode_value(&nested),
            _ => decode_text(text),
        },
        other => RecommendationPayload::Unparseable(other.to_string()),
    }
}

fn from_object(map: &Map<String, Value>) -> Vec<Recommendation> {
    map.iter()
        .filter(|(_, stats)| stats.get("expected_average_likes").is_some())
        .filter_map(|(post_type, stats)| {
            let stats = Stats::deserialize(stats).ok()?;
            Some(entry(post_type, stats))
        })
        .collect()
}

fn decode_text(text: &str) -> RecommendationPayload {
    let entries: Vec<Recommendation> = text.lines().filter_map(parse_line).collect();
    if entries.is_empty() {
        RecommendationPayload::Unparseable(text.to_string())
    } else {
        RecommendationPayload::Text(entries)
    }
}

fn parse_line(line: &str) -> Option<Recommendation> {
    let line = line.trim();
    let line = line.strip_prefix(TEXT_PREFIX).unwrap_or(line).trim();
    let split = line.find(": {")?;
    let post_type = line[..split].trim();
    if post_type.is_empty() {
        return None;
    }

    let body = &line[split + 2..];
    let end = body.find('}')?;
    let json = body[..=end].replace('\'', "\"");
    match serde_json::from_str::<Stats>(&json) {
        Ok(stats) => Some(entry(post_type, stats)),
        Err(err) => {
            warn!(line, "failed to parse recommendation line: {err}");
            None
        }
    }
}

fn entry(post_type: &str, stats: Stats) -> Recommendation {
    Recommendation {
        post_type: post_type.to_string(),
        expected_average_likes: stats.expected_average_likes,
        expected_average_comments: stats.expected_average_comments,
        engagement_score: stats.engagement_score,
    }
}
