use crate::cue::models::MSF;
use crate::timestamps::error::{TimestampError, TimestampResult};
use crate::timestamps::models::Timestamp;
use log::debug;
use std::path::Path;

pub mod error;
pub mod models;

/// Reads a timestamp list from disk and parses it.
pub async fn read_timestamps(path: impl AsRef<Path>) -> TimestampResult<Vec<Timestamp>> {
    let path = path.as_ref();
    debug!("Reading timestamps from {path:?}");

    let raw = tokio::fs::read_to_string(path).await?;
    parse_timestamps(&raw)
}

/// Parses "YouTube-style" timestamps, one `<timecode> <title>` entry per line.
///
/// Entries keep the order of the input lines. A trailing newline and one empty
/// final line are ignored, any other blank line is an error.
pub fn parse_timestamps(raw: &str) -> TimestampResult<Vec<Timestamp>> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut lines: Vec<&str> = raw.lines().collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let mut timestamps = Vec::with_capacity(lines.len());

    for (index, line) in lines.into_iter().enumerate() {
        timestamps.push(parse_line(index + 1, line)?);
    }

    debug!("Parsed {} timestamps", timestamps.len());

    Ok(timestamps)
}

fn parse_line(line_number: usize, line: &str) -> TimestampResult<Timestamp> {
    let malformed = |reason: String| TimestampError::MalformedTimestampLine {
        line_number,
        content: line.to_string(),
        reason,
    };

    if line.trim().is_empty() {
        return Err(malformed("blank line".to_string()));
    }

    let (token, rest) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| malformed("missing whitespace between timecode and title".to_string()))?;

    if token.is_empty() {
        return Err(malformed("line starts with whitespace".to_string()));
    }

    let title = rest.trim_start().trim_end();
    if title.is_empty() {
        return Err(malformed("missing title".to_string()));
    }

    let position = normalize(token).map_err(|e| malformed(e.to_string()))?;

    Ok(Timestamp {
        position,
        title: title.to_string(),
    })
}

/// Converts a `MM:SS` or `HH:MM:SS` timecode into the cue sheet `M:SS:FF` position.
///
/// Hours fold into the minutes field and frames are always zero. Values are not
/// range checked, `5:75` is accepted as 5 minutes and 75 seconds.
pub fn normalize(token: &str) -> TimestampResult<MSF> {
    let invalid = || TimestampError::InvalidTimecodeFormat(token.to_string());

    let components = token
        .split(':')
        .map(parse_component)
        .collect::<Option<Vec<u32>>>()
        .ok_or_else(invalid)?;

    let (minutes, seconds) = match components.as_slice() {
        [minutes, seconds] => (*minutes, *seconds),
        [hours, minutes, seconds] => {
            let minutes = hours
                .checked_mul(60)
                .and_then(|m| m.checked_add(*minutes))
                .ok_or_else(invalid)?;
            (minutes, *seconds)
        }
        _ => return Err(invalid()),
    };

    Ok(MSF {
        minutes,
        seconds,
        frames: 0,
    })
}

fn parse_component(component: &str) -> Option<u32> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    component.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn canonical(token: &str) -> String {
        normalize(token).unwrap().to_string()
    }

    #[test]
    fn normalize_minutes_seconds() {
        assert_eq!(canonical("5:09"), "5:09:00");
        assert_eq!(canonical("55:05"), "55:05:00");
        assert_eq!(canonical("0:00"), "0:00:00");
    }

    #[test]
    fn normalize_drops_leading_zero_on_minutes() {
        assert_eq!(canonical("05:09"), "5:09:00");
        assert_eq!(canonical("00:07"), "0:07:00");
    }

    #[test]
    fn normalize_folds_hours_into_minutes() {
        assert_eq!(canonical("00:55:45"), "55:45:00");
        assert_eq!(canonical("01:20:54"), "80:54:00");
        assert_eq!(canonical("02:54:01"), "174:01:00");
    }

    #[test]
    fn normalize_does_not_range_check() {
        // purely arithmetic: out-of-range seconds and minutes pass through
        assert_eq!(canonical("5:75"), "5:75:00");
        assert_eq!(canonical("1:99:99"), "159:99:00");
        assert_eq!(canonical("130:05"), "130:05:00");
        assert_eq!(canonical("48:00:00"), "2880:00:00");
    }

    #[test]
    fn normalize_frames_are_always_zero() {
        let msf = normalize("01:02:03").unwrap();
        assert_eq!(msf.minutes, 62);
        assert_eq!(msf.seconds, 3);
        assert_eq!(msf.frames, 0);
    }

    #[test]
    fn normalize_rejects_wrong_colon_count() {
        for token in ["5509", "", "1:2:3:4", "00:00:00:00:00"] {
            assert!(
                matches!(
                    normalize(token),
                    Err(TimestampError::InvalidTimecodeFormat(t)) if t == token
                ),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn normalize_rejects_non_numeric_components() {
        for token in ["aa:bb", "1:xx", "+1:05", "-1:05", "1::05", ":05", "1:05:", "1.5:05"] {
            assert!(
                matches!(normalize(token), Err(TimestampError::InvalidTimecodeFormat(_))),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn normalize_rejects_overflowing_minutes() {
        assert!(matches!(
            normalize("4294967295:00:00"),
            Err(TimestampError::InvalidTimecodeFormat(_))
        ));
        assert!(matches!(
            normalize("99999999999:00"),
            Err(TimestampError::InvalidTimecodeFormat(_))
        ));
    }

    #[test]
    fn parse_keeps_line_order() {
        let raw = "00:55:45 Pink Elephants on Parade\n01:20:54 Circle of Life\n02:54:01 Colours of the Wind\n";
        let timestamps = parse_timestamps(raw).unwrap();

        let titles: Vec<_> = timestamps.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            ["Pink Elephants on Parade", "Circle of Life", "Colours of the Wind"]
        );

        let positions: Vec<_> = timestamps.iter().map(|t| t.position.to_string()).collect();
        assert_eq!(positions, ["55:45:00", "80:54:00", "174:01:00"]);
    }

    #[test]
    fn parse_accepts_out_of_order_and_duplicate_timecodes() {
        let raw = "10:00 Late\n02:00 Early\n02:00 Same Again";
        let timestamps = parse_timestamps(raw).unwrap();

        let positions: Vec<_> = timestamps.iter().map(|t| t.position.to_string()).collect();
        assert_eq!(positions, ["10:00:00", "2:00:00", "2:00:00"]);
    }

    #[test]
    fn parse_title_keeps_inner_whitespace_and_trims_the_end() {
        let timestamps = parse_timestamps("3:15 Song  with   spaces \t \n").unwrap();
        assert_eq!(timestamps[0].title, "Song  with   spaces");
    }

    #[test]
    fn parse_splits_on_whole_whitespace_run() {
        let timestamps = parse_timestamps("3:15 \t Intro").unwrap();
        assert_eq!(timestamps[0].title, "Intro");
        assert_eq!(timestamps[0].position.to_string(), "3:15:00");
    }

    #[test]
    fn parse_ignores_one_empty_final_line_and_crlf() {
        let timestamps = parse_timestamps("0:00 One\r\n4:30 Two\r\n\r\n").unwrap();
        assert_eq!(timestamps.len(), 2);
        assert_eq!(timestamps[1].title, "Two");
    }

    #[test]
    fn parse_skips_byte_order_mark() {
        let timestamps = parse_timestamps("\u{feff}0:00 One").unwrap();
        assert_eq!(timestamps[0].position.to_string(), "0:00:00");
    }

    #[test]
    fn parse_empty_input_yields_no_entries() {
        assert!(parse_timestamps("").unwrap().is_empty());
        assert!(parse_timestamps("\n").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_line_without_title() {
        let err = parse_timestamps("00:55:45").unwrap_err();
        assert!(matches!(
            err,
            TimestampError::MalformedTimestampLine { line_number: 1, ref content, .. } if content == "00:55:45"
        ));

        let err = parse_timestamps("0:00 One\n00:55:45   ").unwrap_err();
        assert!(matches!(
            err,
            TimestampError::MalformedTimestampLine { line_number: 2, .. }
        ));
    }

    #[test]
    fn parse_rejects_interior_blank_line() {
        let err = parse_timestamps("0:00 One\n\n4:30 Two").unwrap_err();
        assert!(matches!(
            err,
            TimestampError::MalformedTimestampLine { line_number: 2, .. }
        ));
    }

    #[test]
    fn parse_rejects_invalid_timecode_with_line_context() {
        let err = parse_timestamps("0:00 One\n4-30 Two").unwrap_err();
        match err {
            TimestampError::MalformedTimestampLine {
                line_number,
                content,
                reason,
            } => {
                assert_eq!(line_number, 2);
                assert_eq!(content, "4-30 Two");
                assert!(reason.contains("Invalid timecode format"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_extra_trailing_blank_lines() {
        for raw in ["0:00 One\n\n\n", "0:00 One\n   ", "0:00 One\n\n\n \t"] {
            match parse_timestamps(raw) {
                Err(TimestampError::MalformedTimestampLine {
                    line_number,
                    reason,
                    ..
                }) => {
                    assert_eq!(line_number, 2, "{raw:?}");
                    assert_eq!(reason, "blank line");
                }
                other => panic!("{raw:?} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn parse_rejects_leading_whitespace() {
        assert!(matches!(
            parse_timestamps(" 0:00 One"),
            Err(TimestampError::MalformedTimestampLine { line_number: 1, .. })
        ));
    }

    #[tokio::test]
    async fn read_timestamps_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "00:00 Overture").unwrap();
        writeln!(file, "1:02:03 Finale").unwrap();

        let timestamps = read_timestamps(file.path()).await.unwrap();
        assert_eq!(timestamps.len(), 2);
        assert_eq!(timestamps[1].position.to_string(), "62:03:00");
    }

    #[tokio::test]
    async fn read_timestamps_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_timestamps(dir.path().join("missing.txt")).await;
        assert!(matches!(result, Err(TimestampError::IoError(_))));
    }
}
