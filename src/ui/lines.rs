//! Display line production for the monitors panel.
//!
//! Turns a snapshot into an ordered stream of [`LineToken`]s that any text
//! renderer can paint. The layout is two fixed-width columns (monitor name,
//! live count) followed by the monitor's result text; multi-line results
//! continue under the text column with blank-padded name/count columns.

use crate::data::{classify, AlertLevel, MonitorData};

/// Width of the monitor name column.
pub const NAME_COL_WIDTH: usize = 16;

/// Width of the live count column.
pub const COUNT_COL_WIDTH: usize = 4;

/// One unit of renderable output, emitted in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineToken {
    /// A run of text, optionally tagged with an alert style.
    Content {
        text: String,
        style: Option<AlertLevel>,
    },
    /// A blank column of fixed width.
    Padding { width: usize },
    /// Hard line break.
    Break,
}

impl LineToken {
    fn content(text: String) -> Self {
        LineToken::Content { text, style: None }
    }

    fn styled(text: String, style: AlertLevel) -> Self {
        LineToken::Content {
            text,
            style: Some(style),
        }
    }
}

/// Produce the display tokens for a snapshot.
///
/// Deterministic with respect to its inputs. Records are visited in
/// snapshot order and that order is preserved in the output; a record with
/// no result contributes nothing, not even a blank line. Result text is
/// passed through verbatim.
pub fn render_lines(data: &MonitorData, disabled: bool) -> Vec<LineToken> {
    let mut tokens = Vec::new();

    if disabled || data.monitors.is_empty() {
        return tokens;
    }

    for m in &data.monitors {
        // Only display a monitor if a result exists
        let Some(ref result) = m.result else {
            continue;
        };

        let level = classify(Some(m.count), m.count_min, m.count_max);

        for (i, line) in result.split('\n').enumerate() {
            if i == 0 {
                // Name column carries the alert style...
                tokens.push(LineToken::styled(
                    format!("{:<width$}", m.name, width = NAME_COL_WIDTH),
                    level,
                ));
                // ... and the count column shows the live count only for
                // pattern-matching monitors
                if m.pattern_match {
                    tokens.push(LineToken::content(format!(
                        "{:<width$}",
                        m.count,
                        width = COUNT_COL_WIDTH
                    )));
                } else {
                    tokens.push(LineToken::Padding {
                        width: COUNT_COL_WIDTH,
                    });
                }
            } else {
                // Continuation lines align under the text column
                tokens.push(LineToken::Padding {
                    width: NAME_COL_WIDTH,
                });
                tokens.push(LineToken::Padding {
                    width: COUNT_COL_WIDTH,
                });
            }

            tokens.push(LineToken::content(line.to_string()));
            tokens.push(LineToken::Break);
        }
    }

    // No trailing blank line
    if let Some(LineToken::Break) = tokens.last() {
        tokens.pop();
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MonitorRecord;
    use std::time::Instant;

    fn record(name: &str, result: Option<&str>) -> MonitorRecord {
        MonitorRecord {
            name: name.to_string(),
            result: result.map(str::to_string),
            refresh_interval: 3.0,
            time_until_refresh: 1.0,
            count: 1,
            count_min: None,
            count_max: None,
            pattern_match: false,
        }
    }

    fn snapshot(monitors: Vec<MonitorRecord>) -> MonitorData {
        MonitorData {
            monitors,
            last_updated: Instant::now(),
        }
    }

    #[test]
    fn test_empty_snapshot_renders_nothing() {
        assert!(render_lines(&snapshot(vec![]), false).is_empty());
    }

    #[test]
    fn test_disabled_renders_nothing() {
        let data = snapshot(vec![record("cron", Some("running"))]);
        assert!(render_lines(&data, true).is_empty());
    }

    #[test]
    fn test_missing_result_contributes_zero_tokens() {
        let data = snapshot(vec![record("dropbox", None)]);
        assert!(render_lines(&data, false).is_empty());

        // A no-data record between two visible ones leaves no gap
        let data = snapshot(vec![
            record("cron", Some("running")),
            record("dropbox", None),
            record("sshd", Some("listening")),
        ]);
        let tokens = render_lines(&data, false);
        // Two records, one line each: (name + count + text + break) * 2,
        // minus the trailing break
        assert_eq!(tokens.len(), 7);
    }

    #[test]
    fn test_single_line_record() {
        // Scenario: cron, running, count 1, no bounds, no pattern match
        let data = snapshot(vec![record("cron", Some("running"))]);
        let tokens = render_lines(&data, false);

        assert_eq!(
            tokens,
            vec![
                LineToken::Content {
                    text: "cron            ".to_string(),
                    style: Some(AlertLevel::Ok),
                },
                LineToken::Padding { width: 4 },
                LineToken::Content {
                    text: "running".to_string(),
                    style: None,
                },
            ]
        );
    }

    #[test]
    fn test_pattern_match_shows_count_with_warning_style() {
        // Scenario: nginx, 3 live but max 2 -> WARNING, count shown
        let mut nginx = record("nginx", Some("3 instances"));
        nginx.count = 3;
        nginx.count_min = Some(1);
        nginx.count_max = Some(2);
        nginx.pattern_match = true;

        let tokens = render_lines(&snapshot(vec![nginx]), false);

        assert_eq!(
            tokens[0],
            LineToken::Content {
                text: "nginx           ".to_string(),
                style: Some(AlertLevel::Warning),
            }
        );
        assert_eq!(
            tokens[1],
            LineToken::Content {
                text: "3   ".to_string(),
                style: None,
            }
        );
    }

    #[test]
    fn test_critical_when_expected_service_absent() {
        // Scenario: redis, 0 live but min 1 -> CRITICAL
        let mut redis = record("redis", Some("down"));
        redis.count = 0;
        redis.count_min = Some(1);
        redis.count_max = Some(1);

        let tokens = render_lines(&snapshot(vec![redis]), false);

        assert_eq!(
            tokens[0],
            LineToken::Content {
                text: "redis           ".to_string(),
                style: Some(AlertLevel::Critical),
            }
        );
        // Not a pattern-matching monitor: count column stays blank
        assert_eq!(tokens[1], LineToken::Padding { width: 4 });
    }

    #[test]
    fn test_count_column_blank_without_pattern_match() {
        let mut m = record("cron", Some("running"));
        m.count = 42;

        let tokens = render_lines(&snapshot(vec![m]), false);
        assert_eq!(tokens[1], LineToken::Padding { width: 4 });
    }

    #[test]
    fn test_multiline_result_pads_continuation_columns() {
        let data = snapshot(vec![record("postgres", Some("primary up\nreplica lagging"))]);
        let tokens = render_lines(&data, false);

        assert_eq!(
            tokens,
            vec![
                LineToken::Content {
                    text: "postgres        ".to_string(),
                    style: Some(AlertLevel::Ok),
                },
                LineToken::Padding { width: 4 },
                LineToken::Content {
                    text: "primary up".to_string(),
                    style: None,
                },
                LineToken::Break,
                LineToken::Padding { width: 16 },
                LineToken::Padding { width: 4 },
                LineToken::Content {
                    text: "replica lagging".to_string(),
                    style: None,
                },
            ]
        );
    }

    #[test]
    fn test_no_trailing_break() {
        let data = snapshot(vec![
            record("cron", Some("running")),
            record("sshd", Some("listening")),
        ]);
        let tokens = render_lines(&data, false);
        assert_ne!(tokens.last(), Some(&LineToken::Break));
    }

    #[test]
    fn test_snapshot_order_preserved() {
        let data = snapshot(vec![
            record("zebra", Some("z")),
            record("alpha", Some("a")),
        ]);
        let tokens = render_lines(&data, false);

        let names: Vec<&str> = tokens
            .iter()
            .filter_map(|t| match t {
                LineToken::Content {
                    text,
                    style: Some(_),
                } => Some(text.trim_end()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["zebra", "alpha"]);
    }

    #[test]
    fn test_long_name_is_not_truncated() {
        let data = snapshot(vec![record("a-very-long-monitor-name", Some("up"))]);
        let tokens = render_lines(&data, false);

        match &tokens[0] {
            LineToken::Content { text, .. } => assert_eq!(text, "a-very-long-monitor-name"),
            other => panic!("unexpected token: {:?}", other),
        }
    }

    #[test]
    fn test_result_text_passed_through_verbatim() {
        let data = snapshot(vec![record("weird", Some("tabs\tand \x07 bells"))]);
        let tokens = render_lines(&data, false);

        assert_eq!(
            tokens[2],
            LineToken::Content {
                text: "tabs\tand \x07 bells".to_string(),
                style: None,
            }
        );
    }
}
