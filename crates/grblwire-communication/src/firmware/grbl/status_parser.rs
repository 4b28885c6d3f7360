//! GRBL Status Report Parsing
//!
//! Extracts the fields of one received line. Each group is tried on its own
//! and is optional, so a single line such as
//! `<Idle|MPos:1.000,2.000,0.000|FS:0,0|WCO:0.000,0.000,0.000>` yields the
//! status report, the feed/spindle pair and the work coordinate offset at
//! once.
//!
//! Value lists commit all-or-nothing: a list with more than
//! [`MAX_AXES`] entries, or with any entry that is not a number, is dropped
//! as a whole. Empty entries (`1.0,,3.0`) leave that slot unset.
//!
//! Parsing is pure. Applying the result to tracked state is the
//! controller's job.

use grblwire_core::{CoordinateMode, MachineState, MAX_AXES};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Per-slot values from a comma-separated list; `None` for absent slots
pub type AxisValues = [Option<f64>; MAX_AXES];

/// Feed rate and spindle speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedSpindle {
    /// Current feed rate (units/min)
    pub feed_rate: f64,
    /// Current spindle speed; absent for `F:` reports
    pub spindle_speed: Option<f64>,
}

/// The angle-bracketed status report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    pub state: MachineState,
    /// Numeric suffix such as the `0` in `Hold:0`
    pub sub_state: Option<u8>,
    pub mode: CoordinateMode,
    /// Reported position in the frame named by `mode`
    ///
    /// All `None` when the list failed to convert.
    pub position: AxisValues,
}

/// Reply to a sent line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// `ok`
    Ok,
    /// `error:n`
    Error(u8),
    /// `ALARM:n`
    Alarm(u8),
}

/// Everything recognised in one line
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParsedLine {
    pub feed_spindle: Option<FeedSpindle>,
    pub offset: Option<AxisValues>,
    pub status: Option<StatusReport>,
    pub response: Option<Response>,
}

impl ParsedLine {
    /// Whether nothing in the line was recognised
    pub fn is_empty(&self) -> bool {
        self.feed_spindle.is_none()
            && self.offset.is_none()
            && self.status.is_none()
            && self.response.is_none()
    }
}

fn status_regex() -> &'static Regex {
    static STATUS_REGEX: OnceLock<Regex> = OnceLock::new();
    STATUS_REGEX.get_or_init(|| {
        Regex::new(r"<([A-Za-z]+)(?::(\d+))?\|(\w+):([-+\d.,]+)\|?.*>")
            .expect("invalid regex pattern")
    })
}

fn feed_spindle_regex() -> &'static Regex {
    static FS_REGEX: OnceLock<Regex> = OnceLock::new();
    FS_REGEX.get_or_init(|| {
        Regex::new(r"FS:(-?\d+\.?\d*),(-?\d+\.?\d*)").expect("invalid regex pattern")
    })
}

fn feed_regex() -> &'static Regex {
    static F_REGEX: OnceLock<Regex> = OnceLock::new();
    F_REGEX.get_or_init(|| Regex::new(r"\|F:(-?\d+\.?\d*)").expect("invalid regex pattern"))
}

fn offset_regex() -> &'static Regex {
    static WCO_REGEX: OnceLock<Regex> = OnceLock::new();
    WCO_REGEX.get_or_init(|| Regex::new(r"WCO:([-+\d.,]*)").expect("invalid regex pattern"))
}

/// Stateless line parser
pub struct StatusParser;

impl StatusParser {
    /// Parse every recognisable group of one line
    pub fn parse(line: &str) -> ParsedLine {
        ParsedLine {
            feed_spindle: Self::parse_feed_spindle(line),
            offset: Self::parse_offset(line),
            status: Self::parse_status(line),
            response: Self::parse_response(line),
        }
    }

    /// `FS:feed,speed`, or `F:feed` on builds without variable spindle
    pub fn parse_feed_spindle(line: &str) -> Option<FeedSpindle> {
        if let Some(caps) = feed_spindle_regex().captures(line) {
            let feed_rate = parse_number(&caps[1])?;
            let spindle_speed = parse_number(&caps[2])?;
            return Some(FeedSpindle {
                feed_rate,
                spindle_speed: Some(spindle_speed),
            });
        }

        let caps = feed_regex().captures(line)?;
        Some(FeedSpindle {
            feed_rate: parse_number(&caps[1])?,
            spindle_speed: None,
        })
    }

    /// `WCO:o0,o1,...`
    pub fn parse_offset(line: &str) -> Option<AxisValues> {
        let caps = offset_regex().captures(line)?;
        parse_values(&caps[1])
    }

    /// `<STATE[:sub]|MODE:p0,p1,...[|...]>`
    ///
    /// Returns `None` unless both the state and the coordinate mode are
    /// known tokens.
    pub fn parse_status(line: &str) -> Option<StatusReport> {
        let caps = status_regex().captures(line)?;

        let state = MachineState::from_token(&caps[1]);
        if state == MachineState::Unknown {
            tracing::debug!("Discarding status report with unknown state '{}'", &caps[1]);
            return None;
        }

        let mode = CoordinateMode::from_token(&caps[3]);
        if mode == CoordinateMode::Unknown {
            tracing::debug!("Discarding status report with unknown mode '{}'", &caps[3]);
            return None;
        }

        let sub_state = caps.get(2).and_then(|m| m.as_str().parse::<u8>().ok());
        let position = parse_values(&caps[4]).unwrap_or([None; MAX_AXES]);

        Some(StatusReport {
            state,
            sub_state,
            mode,
            position,
        })
    }

    /// `ok`, `error:n` or `ALARM:n`
    pub fn parse_response(line: &str) -> Option<Response> {
        if line == "ok" {
            return Some(Response::Ok);
        }
        if let Some(code) = line.strip_prefix("error:") {
            return code.trim().parse::<u8>().ok().map(Response::Error);
        }
        if let Some(code) = line.strip_prefix("ALARM:") {
            return code.trim().parse::<u8>().ok().map(Response::Alarm);
        }
        None
    }
}

fn parse_number(text: &str) -> Option<f64> {
    match text.trim().parse::<f64>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Failed to convert '{}': {}", text, e);
            None
        }
    }
}

/// Parse a comma-separated list into slots, all-or-nothing
fn parse_values(list: &str) -> Option<AxisValues> {
    let fields: Vec<&str> = list.split(',').collect();
    if fields.len() > MAX_AXES {
        tracing::debug!(
            "Ignoring list with {} values, at most {} axes are supported",
            fields.len(),
            MAX_AXES
        );
        return None;
    }

    let mut values = [None; MAX_AXES];
    for (slot, field) in values.iter_mut().zip(fields) {
        if field.trim().is_empty() {
            continue;
        }
        *slot = Some(parse_number(field)?);
    }
    Some(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_status_line() {
        let parsed = StatusParser::parse(
            "<Run|MPos:10.000,5.000,-1.000|FS:500,12000|WCO:1.000,2.000,3.000>",
        );
        let status = parsed.status.unwrap();
        assert_eq!(status.state, MachineState::Run);
        assert_eq!(status.mode, CoordinateMode::Machine);
        assert_eq!(status.position[0], Some(10.0));
        assert_eq!(status.position[2], Some(-1.0));
        assert_eq!(status.position[3], None);

        let fs = parsed.feed_spindle.unwrap();
        assert_eq!(fs.feed_rate, 500.0);
        assert_eq!(fs.spindle_speed, Some(12000.0));

        let offset = parsed.offset.unwrap();
        assert_eq!(offset[..3], [Some(1.0), Some(2.0), Some(3.0)]);
        assert!(parsed.response.is_none());
    }

    #[test]
    fn test_sub_state() {
        let status = StatusParser::parse_status("<Hold:1|WPos:0,0,0>").unwrap();
        assert_eq!(status.state, MachineState::Hold);
        assert_eq!(status.sub_state, Some(1));
        assert_eq!(status.mode, CoordinateMode::Work);
    }

    #[test]
    fn test_unknown_state_rejected() {
        assert!(StatusParser::parse_status("<Dancing|MPos:1,2,3>").is_none());
        assert!(StatusParser::parse_status("<Idle|Foo:1,2,3>").is_none());
    }

    #[test]
    fn test_feed_only() {
        let fs = StatusParser::parse_feed_spindle("<Idle|MPos:0,0,0|F:250.5>").unwrap();
        assert_eq!(fs.feed_rate, 250.5);
        assert_eq!(fs.spindle_speed, None);
    }

    #[test]
    fn test_too_many_offset_values() {
        assert!(StatusParser::parse_offset("WCO:1,2,3,4,5,6,7").is_none());
        assert!(StatusParser::parse_offset("WCO:1,2,3,4,5,6").is_some());
    }

    #[test]
    fn test_empty_fields_unset() {
        let offset = StatusParser::parse_offset("WCO:1.5,,3").unwrap();
        assert_eq!(offset[0], Some(1.5));
        assert_eq!(offset[1], None);
        assert_eq!(offset[2], Some(3.0));
    }

    #[test]
    fn test_bad_position_keeps_report() {
        let status = StatusParser::parse_status("<Idle|MPos:1.0,2..0.,3|Bf:15,128>").unwrap();
        assert_eq!(status.state, MachineState::Idle);
        assert_eq!(status.position, [None; MAX_AXES]);
    }

    #[test]
    fn test_responses() {
        assert_eq!(StatusParser::parse_response("ok"), Some(Response::Ok));
        assert_eq!(StatusParser::parse_response("error:20"), Some(Response::Error(20)));
        assert_eq!(StatusParser::parse_response("ALARM:1"), Some(Response::Alarm(1)));
        assert_eq!(StatusParser::parse_response("okay"), None);
        assert_eq!(StatusParser::parse_response("error:x"), None);
    }

    #[test]
    fn test_unrecognised_line() {
        assert!(StatusParser::parse("Grbl 1.1h ['$' for help]").is_empty());
        assert!(StatusParser::parse("[MSG:Caution: Unlocked]").is_empty());
    }
}
