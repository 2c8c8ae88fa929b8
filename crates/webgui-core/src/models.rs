//! Wire models exchanged with the experimentum web server.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, UiError};

pub(crate) const TIME_FORMAT: &str = "%H:%M:%S, %d %b %Y";

/// One event of the experiment log stream.
///
/// The server sends `{"type": ..., "data": ...}`. `data` is ignored for
/// `started` and may be missing entirely; a `finished` without it carries an
/// empty summary.
#[derive(Debug, Clone, PartialEq)]
pub enum LogMessage {
    Started,
    Log(LogLine),
    /// Pre-rendered result table HTML.
    Table(String),
    Finished(RunSummary),
}

#[derive(Deserialize)]
struct RawMessage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl LogMessage {
    /// Decode a single event payload.
    pub fn parse(payload: &str) -> Result<Self> {
        let raw: RawMessage = serde_json::from_str(payload)?;
        match raw.kind.as_str() {
            "started" => Ok(LogMessage::Started),
            "log" => Ok(LogMessage::Log(serde_json::from_value(raw.data)?)),
            "table" => Ok(LogMessage::Table(serde_json::from_value(raw.data)?)),
            "finished" if raw.data.is_null() => Ok(LogMessage::Finished(RunSummary::default())),
            "finished" => Ok(LogMessage::Finished(serde_json::from_value(raw.data)?)),
            other => Err(UiError::UnknownMessage(other.to_string())),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LogMessage::Started => "started",
            LogMessage::Log(_) => "log",
            LogMessage::Table(_) => "table",
            LogMessage::Finished(_) => "finished",
        }
    }
}

/// A single line of experiment output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogLine {
    pub data: String,
    #[serde(default)]
    pub error: bool,
}

/// Payload of the terminal `finished` event. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default)]
    pub start: Option<Timestamp>,
    #[serde(default)]
    pub finished: Option<Timestamp>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub config_file: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub config_content: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A point in time as sent by the server: Unix seconds or a date string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Seconds(f64),
    Text(String),
}

impl Timestamp {
    /// Render in local time. Strings that are not recognised dates are shown verbatim.
    pub fn display(&self) -> String {
        match self {
            Timestamp::Seconds(secs) => {
                let whole = secs.floor();
                let nanos = ((secs - whole) * 1e9) as u32;
                match DateTime::from_timestamp(whole as i64, nanos) {
                    Some(dt) => dt.with_timezone(&Local).format(TIME_FORMAT).to_string(),
                    None => secs.to_string(),
                }
            }
            Timestamp::Text(text) => format_date(text),
        }
    }
}

fn format_date(text: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return dt.with_timezone(&Local).format(TIME_FORMAT).to_string();
    }
    // Naive timestamps are already in server local time
    match NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        Ok(naive) => naive.format(TIME_FORMAT).to_string(),
        Err(_) => text.to_string(),
    }
}

/// Status of one generated plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotStatus {
    #[serde(alias = "success")]
    Ok,
    Error,
}

/// One entry of the plot-generation response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotMessage {
    pub status: PlotStatus,
    #[serde(default)]
    pub message: String,
    /// URL of the rendered image; absent when generation failed.
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Success,
    Error,
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionStatus::Success => write!(f, "success"),
            ActionStatus::Error => write!(f, "error"),
        }
    }
}

/// Response of a migration action endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub status: ActionStatus,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_started_without_data() {
        assert_eq!(LogMessage::parse(r#"{"type":"started"}"#).unwrap(), LogMessage::Started);
        assert_eq!(
            LogMessage::parse(r#"{"type":"started","data":null}"#).unwrap(),
            LogMessage::Started
        );
    }

    #[test]
    fn parses_log_line_with_default_error_flag() {
        let msg = LogMessage::parse(r#"{"type":"log","data":{"data":" * Iterations: 100"}}"#).unwrap();
        assert_eq!(
            msg,
            LogMessage::Log(LogLine { data: " * Iterations: 100".into(), error: false })
        );
    }

    #[test]
    fn parses_finished_summary() {
        let msg = LogMessage::parse(
            r#"{"type":"finished","data":{"start":"2019-04-11 13:12:23","finished":1554988400,"config_file":"foo.json","config_content":"{}"}}"#,
        )
        .unwrap();
        let summary = match msg {
            LogMessage::Finished(summary) => summary,
            other => panic!("expected finished, got {other:?}"),
        };
        assert_eq!(summary.start, Some(Timestamp::Text("2019-04-11 13:12:23".into())));
        assert_eq!(summary.finished, Some(Timestamp::Seconds(1554988400.0)));
        assert_eq!(summary.config_file, "foo.json");
    }

    #[test]
    fn finished_tolerates_missing_summary_fields() {
        let nulls = LogMessage::parse(
            r#"{"type":"finished","data":{"start":null,"finished":null,"config_file":"foo.json","config_content":null}}"#,
        )
        .unwrap();
        assert_eq!(
            nulls,
            LogMessage::Finished(RunSummary { config_file: "foo.json".into(), ..Default::default() })
        );

        for payload in [r#"{"type":"finished"}"#, r#"{"type":"finished","data":null}"#] {
            assert_eq!(
                LogMessage::parse(payload).unwrap(),
                LogMessage::Finished(RunSummary::default())
            );
        }
    }

    #[test]
    fn rejects_unknown_type() {
        let err = LogMessage::parse(r#"{"type":"progress","data":3}"#).unwrap_err();
        assert!(matches!(err, UiError::UnknownMessage(ref t) if t == "progress"));
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(LogMessage::parse("finished"), Err(UiError::Json(_))));
    }

    #[test]
    fn naive_timestamp_is_reformatted() {
        let ts = Timestamp::Text("2019-04-11 13:12:23.123456".into());
        assert_eq!(ts.display(), "13:12:23, 11 Apr 2019");
    }

    #[test]
    fn unrecognised_timestamp_is_verbatim() {
        let ts = Timestamp::Text("yesterday".into());
        assert_eq!(ts.display(), "yesterday");
    }

    #[test]
    fn plot_status_accepts_success_alias() {
        let msg: PlotMessage =
            serde_json::from_str(r#"{"status":"success","message":"Generated plot: bar","file":"/img/bar.svg"}"#)
                .unwrap();
        assert_eq!(msg.status, PlotStatus::Ok);

        let failed: PlotMessage =
            serde_json::from_str(r#"{"status":"error","message":"boom","file":null}"#).unwrap();
        assert_eq!(failed.status, PlotStatus::Error);
        assert_eq!(failed.file, None);
    }
}
