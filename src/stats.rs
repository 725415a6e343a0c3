use crate::models::{
    DashboardSummary, DayData, HashtagCount, HourData, Post, PostTypeData, TimeData, TimeInsights,
};
use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike,
};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

pub const DEFAULT_HASHTAG_LIMIT: usize = 10;
const OTHER_POST_TYPE: &str = "Other";

const DAY_ABBR: [&str; 7] = ["Mon", "Tue", "Wed", "Thur", "Fri", "Sat", "Sun"];
const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn summarize(posts: &[Post]) -> DashboardSummary {
    summarize_in(posts, &Local)
}

pub fn summarize_in<Tz: TimeZone>(posts: &[Post], tz: &Tz) -> DashboardSummary {
    DashboardSummary {
        post_count: posts.len(),
        total_likes: posts.iter().map(|post| post.likes_count).sum(),
        total_comments: posts.iter().map(|post| post.comments_count).sum(),
        time_data: by_date_in(posts, tz),
        post_type_data: by_post_type(posts),
        hashtag_data: by_hashtag(posts, DEFAULT_HASHTAG_LIMIT),
    }
}

pub fn time_insights(posts: &[Post]) -> TimeInsights {
    time_insights_in(posts, &Local)
}

pub fn time_insights_in<Tz: TimeZone>(posts: &[Post], tz: &Tz) -> TimeInsights {
    TimeInsights {
        day_data: by_day_of_week_in(posts, tz),
        hour_data: by_hour_of_day_in(posts, tz),
    }
}

pub fn by_date(posts: &[Post]) -> Vec<TimeData> {
    by_date_in(posts, &Local)
}

pub fn by_date_in<Tz: TimeZone>(posts: &[Post], tz: &Tz) -> Vec<TimeData> {
    let mut days: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();

    for post in posts {
        let Some(when) = post_time(post) else {
            continue;
        };
        let entry = days.entry(when.with_timezone(tz).date_naive()).or_default();
        entry.0 += post.likes_count;
        entry.1 += post.comments_count;
    }

    days.into_iter()
        .map(|(date, (likes, comments))| TimeData {
            date: date.format("%Y-%m-%d").to_string(),
            likes,
            comments,
        })
        .collect()
}

pub fn by_post_type(posts: &[Post]) -> Vec<PostTypeData> {
    let mut rows: Vec<PostTypeData> = Vec::new();

    for post in posts {
        let post_type = post.post_type.as_deref().unwrap_or(OTHER_POST_TYPE);
        let index = match rows.iter().position(|row| row.post_type == post_type) {
            Some(index) => index,
            None => {
                rows.push(PostTypeData {
                    post_type: post_type.to_string(),
                    likes: 0,
                    comments: 0,
                    count: 0,
                });
                rows.len() - 1
            }
        };
        let row = &mut rows[index];
        row.likes += post.likes_count;
        row.comments += post.comments_count;
        row.count += 1;
    }

    rows
}

/// Most used hashtags, ties broken by the likes of the posts using them.
pub fn by_hashtag(posts: &[Post], limit: usize) -> Vec<HashtagCount> {
    let mut tags: HashMap<String, (u64, i64)> = HashMap::new();

    for post in posts {
        let Some(hashtags) = &post.hashtags else {
            continue;
        };
        for tag in hashtags {
            let entry = tags.entry(normalize_hashtag(tag)).or_default();
            entry.0 += 1;
            entry.1 += post.likes_count;
        }
    }

    let mut rows: Vec<HashtagCount> = tags
        .into_iter()
        .map(|(hashtag, (count, likes))| HashtagCount {
            hashtag,
            count,
            likes,
        })
        .collect();

    // hashtag as last key keeps the output stable across HashMap orderings
    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(b.likes.cmp(&a.likes))
            .then_with(|| a.hashtag.cmp(&b.hashtag))
    });
    rows.truncate(limit);
    rows
}

pub fn by_day_of_week(posts: &[Post]) -> Vec<DayData> {
    by_day_of_week_in(posts, &Local)
}

pub fn by_day_of_week_in<Tz: TimeZone>(posts: &[Post], tz: &Tz) -> Vec<DayData> {
    let mut buckets = [(0i64, 0i64); 7];

    for post in posts {
        let Some(when) = timed_post(post) else {
            continue;
        };
        let day = when.with_timezone(tz).weekday().num_days_from_monday() as usize;
        buckets[day].0 += post.likes_count;
        buckets[day].1 += post.comments_count;
    }

    buckets
        .iter()
        .enumerate()
        .map(|(index, &(likes, comments))| DayData {
            day: DAY_ABBR[index].to_string(),
            full_day: DAY_NAMES[index].to_string(),
            likes,
            comments,
            total: likes + comments,
            ratio: engagement_ratio(likes, comments),
        })
        .collect()
}

pub fn by_hour_of_day(posts: &[Post]) -> Vec<HourData> {
    by_hour_of_day_in(posts, &Local)
}

pub fn by_hour_of_day_in<Tz: TimeZone>(posts: &[Post], tz: &Tz) -> Vec<HourData> {
    let mut buckets = [(0i64, 0i64); 24];

    for post in posts {
        let Some(when) = timed_post(post) else {
            continue;
        };
        let hour = when.with_timezone(tz).hour() as usize;
        buckets[hour].0 += post.likes_count;
        buckets[hour].1 += post.comments_count;
    }

    buckets
        .iter()
        .enumerate()
        .map(|(hour, &(likes, comments))| HourData {
            hour: hour_label(hour),
            likes,
            comments,
            total: likes + comments,
            ratio: engagement_ratio(likes, comments),
        })
        .collect()
}

pub fn normalize_hashtag(tag: &str) -> String {
    if tag.starts_with('#') {
        tag.to_string()
    } else {
        format!("#{tag}")
    }
}

/// Parses the timestamp formats the backends emit. Naive values are UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

fn post_time(post: &Post) -> Option<DateTime<FixedOffset>> {
    post.timestamp.as_deref().and_then(parse_timestamp)
}

fn timed_post(post: &Post) -> Option<DateTime<FixedOffset>> {
    let raw = post.timestamp.as_deref()?;
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        warn!(post_id = %post.id, timestamp = raw, "skipping post with invalid timestamp");
    }
    parsed
}

fn engagement_ratio(likes: i64, comments: i64) -> f64 {
    let ratio = likes as f64 / comments.max(1) as f64;
    (ratio * 10.0).round() / 10.0
}

fn hour_label(hour: usize) -> String {
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let hour12 = match hour % 12 {
        0 => 12,
        other => other,
    };
    format!("{hour12}:00 {suffix}")
}
