// Dweve GQL-Cypher - GraphQL to Cypher translation
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Structured scalar values in the shape the Bolt driver expects.
//!
//! The serialized forms here are a wire contract: a duration is always
//! `{months, days, seconds: {low, high}, nanoseconds: {low, high}}`, an
//! integer is always `{low, high}`. Do not reorder or rename fields.

use crate::error::{Result, TranslateError};
use chrono::{DateTime as ChronoDateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 64-bit integer split into two's-complement 32-bit halves.
///
/// ```
/// # use gql_cypher::cypher::Integer;
/// let i = Integer::from_i64(60);
/// assert_eq!((i.low, i.high), (60, 0));
/// assert_eq!(Integer::from_i64(-1).to_i64(), -1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Integer {
    /// Low 32 bits.
    pub low: i32,
    /// High 32 bits.
    pub high: i32,
}

impl Integer {
    /// Split a 64-bit value.
    pub fn from_i64(value: i64) -> Self {
        Self {
            low: value as i32,
            high: (value >> 32) as i32,
        }
    }

    /// Reassemble the 64-bit value.
    pub fn to_i64(self) -> i64 {
        ((self.high as i64) << 32) | (self.low as u32 as i64)
    }
}

impl From<i64> for Integer {
    fn from(v: i64) -> Self {
        Integer::from_i64(v)
    }
}

/// Temporal field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemporalKind {
    /// Zoned date-time, normalized to UTC.
    DateTime,
    /// Date-time without zone.
    LocalDateTime,
    /// Calendar date.
    Date,
    /// Time of day with offset.
    Time,
    /// Time of day without offset.
    LocalTime,
    /// ISO-8601 duration.
    Duration,
}

impl TemporalKind {
    /// The GraphQL scalar name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalKind::DateTime => "DateTime",
            TemporalKind::LocalDateTime => "LocalDateTime",
            TemporalKind::Date => "Date",
            TemporalKind::Time => "Time",
            TemporalKind::LocalTime => "LocalTime",
            TemporalKind::Duration => "Duration",
        }
    }

    /// Resolve a GraphQL scalar name.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "DateTime" => Some(TemporalKind::DateTime),
            "LocalDateTime" => Some(TemporalKind::LocalDateTime),
            "Date" => Some(TemporalKind::Date),
            "Time" => Some(TemporalKind::Time),
            "LocalTime" => Some(TemporalKind::LocalTime),
            "Duration" => Some(TemporalKind::Duration),
            _ => None,
        }
    }
}

impl fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A duration as months, days, seconds and nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Duration {
    /// Whole months (years folded in).
    pub months: i64,
    /// Whole days (weeks folded in).
    pub days: i64,
    /// Seconds (hours and minutes folded in).
    pub seconds: Integer,
    /// Sub-second nanoseconds.
    pub nanoseconds: Integer,
}

/// A zoned date-time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTime {
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// Hour, 0-23.
    pub hour: u32,
    /// Minute.
    pub minute: u32,
    /// Second.
    pub second: u32,
    /// Nanosecond of second.
    pub nanosecond: u32,
    /// Offset from UTC in seconds.
    pub time_zone_offset_seconds: i32,
    /// IANA zone id; always `None` after UTC normalization.
    pub time_zone_id: Option<String>,
}

/// A date-time without zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalDateTime {
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// Hour, 0-23.
    pub hour: u32,
    /// Minute.
    pub minute: u32,
    /// Second.
    pub second: u32,
    /// Nanosecond of second.
    pub nanosecond: u32,
}

/// A calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Date {
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month.
    pub day: u32,
}

/// A time of day with a UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Time {
    /// Hour, 0-23.
    pub hour: u32,
    /// Minute.
    pub minute: u32,
    /// Second.
    pub second: u32,
    /// Nanosecond of second.
    pub nanosecond: u32,
    /// Offset from UTC in seconds.
    pub time_zone_offset_seconds: i32,
}

/// A time of day without offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalTime {
    /// Hour, 0-23.
    pub hour: u32,
    /// Minute.
    pub minute: u32,
    /// Second.
    pub second: u32,
    /// Nanosecond of second.
    pub nanosecond: u32,
}

/// Any temporal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Temporal {
    /// `Duration`
    Duration(Duration),
    /// `DateTime`
    DateTime(DateTime),
    /// `LocalDateTime`
    LocalDateTime(LocalDateTime),
    /// `Date`
    Date(Date),
    /// `Time`
    Time(Time),
    /// `LocalTime`
    LocalTime(LocalTime),
}

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<sign>-)?P(?:(?P<years>\d+)Y)?(?:(?P<months>\d+)M)?(?:(?P<weeks>\d+)W)?(?:(?P<days>\d+)D)?(?:T(?:(?P<hours>\d+)H)?(?:(?P<minutes>\d+)M)?(?:(?P<seconds>\d+)(?:\.(?P<fraction>\d{1,9}))?S)?)?$",
    )
    .expect("duration pattern is valid")
});

static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<time>\d{2}:\d{2}(?::\d{2}(?:\.\d{1,9})?)?)(?P<offset>Z|[+-]\d{2}:?\d{2})?$")
        .expect("time pattern is valid")
});

impl Temporal {
    /// Parse a GraphQL input string for the given temporal kind.
    pub fn parse(kind: TemporalKind, input: &str) -> Result<Self> {
        let invalid = || TranslateError::InvalidTemporal {
            kind: kind.as_str(),
            value: input.to_string(),
        };
        match kind {
            TemporalKind::Duration => parse_duration(input).map(Temporal::Duration),
            TemporalKind::DateTime => {
                let utc = ChronoDateTime::parse_from_rfc3339(input)
                    .map(|dt| dt.with_timezone(&Utc))
                    .or_else(|_| parse_naive_date_time(input).map(|naive| naive.and_utc()))
                    .map_err(|_| invalid())?;
                Ok(Temporal::DateTime(DateTime {
                    year: utc.year(),
                    month: utc.month(),
                    day: utc.day(),
                    hour: utc.hour(),
                    minute: utc.minute(),
                    second: utc.second(),
                    nanosecond: utc.nanosecond(),
                    time_zone_offset_seconds: 0,
                    time_zone_id: None,
                }))
            }
            TemporalKind::LocalDateTime => {
                let naive = parse_naive_date_time(input).map_err(|_| invalid())?;
                Ok(Temporal::LocalDateTime(LocalDateTime {
                    year: naive.year(),
                    month: naive.month(),
                    day: naive.day(),
                    hour: naive.hour(),
                    minute: naive.minute(),
                    second: naive.second(),
                    nanosecond: naive.nanosecond(),
                }))
            }
            TemporalKind::Date => {
                let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| invalid())?;
                Ok(Temporal::Date(Date {
                    year: date.year(),
                    month: date.month(),
                    day: date.day(),
                }))
            }
            TemporalKind::Time => {
                let caps = TIME_RE.captures(input).ok_or_else(invalid)?;
                let time = parse_naive_time(&caps["time"]).ok_or_else(invalid)?;
                let offset = match caps.name("offset") {
                    Some(m) => parse_offset(m.as_str()).ok_or_else(invalid)?,
                    None => 0,
                };
                Ok(Temporal::Time(Time {
                    hour: time.hour(),
                    minute: time.minute(),
                    second: time.second(),
                    nanosecond: time.nanosecond(),
                    time_zone_offset_seconds: offset,
                }))
            }
            TemporalKind::LocalTime => {
                let time = parse_naive_time(input).ok_or_else(invalid)?;
                Ok(Temporal::LocalTime(LocalTime {
                    hour: time.hour(),
                    minute: time.minute(),
                    second: time.second(),
                    nanosecond: time.nanosecond(),
                }))
            }
        }
    }

    /// Render as a Cypher constructor call, e.g. `duration({...})`.
    pub fn to_cypher_literal(&self) -> String {
        match self {
            Temporal::Duration(d) => format!(
                "duration({{months: {}, days: {}, seconds: {}, nanoseconds: {}}})",
                d.months,
                d.days,
                d.seconds.to_i64(),
                d.nanoseconds.to_i64()
            ),
            Temporal::DateTime(dt) => format!(
                "datetime({{year: {}, month: {}, day: {}, hour: {}, minute: {}, second: {}, nanosecond: {}, timezone: 'Z'}})",
                dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second, dt.nanosecond
            ),
            Temporal::LocalDateTime(dt) => format!(
                "localdatetime({{year: {}, month: {}, day: {}, hour: {}, minute: {}, second: {}, nanosecond: {}}})",
                dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second, dt.nanosecond
            ),
            Temporal::Date(d) => format!("date({{year: {}, month: {}, day: {}}})", d.year, d.month, d.day),
            Temporal::Time(t) => format!(
                "time({{hour: {}, minute: {}, second: {}, nanosecond: {}, timezone: '{}'}})",
                t.hour,
                t.minute,
                t.second,
                t.nanosecond,
                format_offset(t.time_zone_offset_seconds)
            ),
            Temporal::LocalTime(t) => format!(
                "localtime({{hour: {}, minute: {}, second: {}, nanosecond: {}}})",
                t.hour, t.minute, t.second, t.nanosecond
            ),
        }
    }
}

fn parse_duration(input: &str) -> Result<Duration> {
    let invalid = || TranslateError::InvalidTemporal {
        kind: "Duration",
        value: input.to_string(),
    };
    let caps = DURATION_RE.captures(input).ok_or_else(invalid)?;

    // "P" and "PT" match the grammar but carry no component.
    let has_component = ["years", "months", "weeks", "days", "hours", "minutes", "seconds"]
        .iter()
        .any(|name| caps.name(name).is_some());
    if !has_component || input.ends_with('T') {
        return Err(invalid());
    }

    let component = |name: &str| -> Result<i64> {
        match caps.name(name) {
            Some(m) => m.as_str().parse::<i64>().map_err(|_| invalid()),
            None => Ok(0),
        }
    };

    let sign = if caps.name("sign").is_some() { -1 } else { 1 };

    let months = component("years")?
        .checked_mul(12)
        .and_then(|y| y.checked_add(component("months").ok()?))
        .ok_or_else(invalid)?;
    let days = component("weeks")?
        .checked_mul(7)
        .and_then(|w| w.checked_add(component("days").ok()?))
        .ok_or_else(invalid)?;
    let seconds = component("hours")?
        .checked_mul(3600)
        .and_then(|h| h.checked_add(component("minutes").ok()?.checked_mul(60)?))
        .and_then(|hm| hm.checked_add(component("seconds").ok()?))
        .ok_or_else(invalid)?;
    let nanoseconds = match caps.name("fraction") {
        Some(m) => format!("{:0<9}", m.as_str()).parse::<i64>().map_err(|_| invalid())?,
        None => 0,
    };

    Ok(Duration {
        months: sign * months,
        days: sign * days,
        seconds: Integer::from_i64(sign * seconds),
        nanoseconds: Integer::from_i64(sign * nanoseconds),
    })
}

fn parse_naive_date_time(input: &str) -> std::result::Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M"))
}

fn parse_naive_time(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .ok()
}

fn parse_offset(offset: &str) -> Option<i32> {
    if offset == "Z" {
        return Some(0);
    }
    let sign = if offset.starts_with('-') { -1 } else { 1 };
    let digits: String = offset[1..].chars().filter(|c| *c != ':').collect();
    let hours: i32 = digits.get(0..2)?.parse().ok()?;
    let minutes: i32 = digits.get(2..4)?.parse().ok()?;
    Some(sign * (hours * 3600 + minutes * 60))
}

fn format_offset(seconds: i32) -> String {
    if seconds == 0 {
        return "Z".to_string();
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.abs();
    format!("{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

/// Spatial field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointKind {
    /// WGS-84 `{longitude, latitude, height?}`.
    Point,
    /// Cartesian `{x, y, z?}`.
    CartesianPoint,
}

impl PointKind {
    /// The GraphQL scalar name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PointKind::Point => "Point",
            PointKind::CartesianPoint => "CartesianPoint",
        }
    }

    /// Resolve a GraphQL scalar name.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "Point" => Some(PointKind::Point),
            "CartesianPoint" => Some(PointKind::CartesianPoint),
            _ => None,
        }
    }
}

/// A spatial point parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Point {
    /// WGS-84 coordinates.
    Geographic {
        /// Longitude in degrees.
        longitude: f64,
        /// Latitude in degrees.
        latitude: f64,
        /// Height in metres.
        #[serde(skip_serializing_if = "Option::is_none")]
        height: Option<f64>,
    },
    /// Cartesian coordinates.
    Cartesian {
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
        /// Z coordinate.
        #[serde(skip_serializing_if = "Option::is_none")]
        z: Option<f64>,
    },
}

impl Point {
    /// Read a point input object for the given kind.
    pub fn from_json(kind: PointKind, value: &serde_json::Value) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| TranslateError::InvalidPoint(format!("expected an object, got {}", value)))?;
        let coordinate = |name: &str| -> Result<Option<f64>> {
            match obj.get(name) {
                None | Some(serde_json::Value::Null) => Ok(None),
                Some(v) => v
                    .as_f64()
                    .map(Some)
                    .ok_or_else(|| TranslateError::InvalidPoint(format!("'{}' is not a number", name))),
            }
        };
        let required = |name: &str| -> Result<f64> {
            coordinate(name)?
                .ok_or_else(|| TranslateError::InvalidPoint(format!("missing '{}'", name)))
        };
        match kind {
            PointKind::Point => Ok(Point::Geographic {
                longitude: required("longitude")?,
                latitude: required("latitude")?,
                height: coordinate("height")?,
            }),
            PointKind::CartesianPoint => Ok(Point::Cartesian {
                x: required("x")?,
                y: required("y")?,
                z: coordinate("z")?,
            }),
        }
    }

    /// Render as a Cypher `point({...})` call.
    pub fn to_cypher_literal(&self) -> String {
        match self {
            Point::Geographic { longitude, latitude, height } => match height {
                Some(h) => format!("point({{longitude: {:?}, latitude: {:?}, height: {:?}}})", longitude, latitude, h),
                None => format!("point({{longitude: {:?}, latitude: {:?}}})", longitude, latitude),
            },
            Point::Cartesian { x, y, z } => match z {
                Some(z) => format!("point({{x: {:?}, y: {:?}, z: {:?}}})", x, y, z),
                None => format!("point({{x: {:?}, y: {:?}}})", x, y),
            },
        }
    }
}
