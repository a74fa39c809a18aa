// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::path::Path;

use eventfile::Config;
use eventfile::Event;
use eventfile::EventFile;
use eventfile::Outcome;
use eventfile::Severity;
use jiff::tz::TimeZone;
use rand::Rng;
use tempfile::TempDir;

fn sink(path: &Path) -> EventFile {
    EventFile::new(
        Config::builder(path)
            .line_template("%date [%severity] %user: %message")
            .date_format("%Y-%m-%dT%H:%M:%S")
            .timezone(TimeZone::UTC)
            .included_severities([Severity::ERROR, Severity::WARNING])
            .excluded_keywords(["secret"])
            .build(),
    )
}

fn event(severity: Severity, message: &str) -> Event {
    Event::builder()
        .timestamp(1_700_000_000)
        .severity(severity)
        .uid(0)
        .ip("10.0.0.1")
        .message(message)
        .build()
}

#[test]
fn test_kept_event_is_written() {
    let dir = TempDir::new().expect("failed to create a temporary directory");
    let path = dir.path().join("events.log");
    let sink = sink(&path);

    let outcome = sink.log(&event(Severity::WARNING, "login ok"));
    assert!(outcome.is_written(), "{outcome:?}");

    let content = fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(content.trim_end(), @"2023-11-14T22:13:20 [warning] anon 10.0.0.1: login ok");
    assert_eq!(content.lines().count(), 1);
    assert!(content.ends_with('\n'));
}

#[test]
fn test_excluded_severity_is_skipped() {
    let dir = TempDir::new().expect("failed to create a temporary directory");
    let path = dir.path().join("events.log");
    fs::write(&path, "before\n").unwrap();
    let sink = sink(&path);

    let outcome = sink.log(&event(Severity::CRITICAL, "login ok"));
    assert!(matches!(outcome, Outcome::Skipped), "{outcome:?}");
    assert_eq!(fs::read_to_string(&path).unwrap(), "before\n");
}

#[test]
fn test_excluded_keyword_is_skipped() {
    let dir = TempDir::new().expect("failed to create a temporary directory");
    let path = dir.path().join("events.log");
    fs::write(&path, "before\n").unwrap();
    let sink = sink(&path);

    let outcome = sink.log(&event(Severity::WARNING, "the secret is out"));
    assert!(matches!(outcome, Outcome::Skipped), "{outcome:?}");
    assert_eq!(fs::read_to_string(&path).unwrap(), "before\n");
}

#[test]
fn test_keyword_in_derived_field_is_skipped() {
    let dir = TempDir::new().expect("failed to create a temporary directory");
    let path = dir.path().join("events.log");
    let sink = EventFile::new(
        Config::builder(&path)
            .line_template("%user %message")
            .include_severity(Severity::ERROR)
            .exclude_keyword(" anon ")
            .build(),
    );

    let anonymous = Event::builder().severity(Severity::ERROR).message("hi").build();
    assert!(sink.log(&anonymous).is_skipped());

    let known = anonymous.to_builder().uid(3).user_name("bob").build();
    assert!(sink.log(&known).is_written());
    assert_eq!(fs::read_to_string(&path).unwrap(), "bob  hi\n");
}

#[test]
fn test_unwritable_destination_fails() {
    let dir = TempDir::new().expect("failed to create a temporary directory");
    let path = dir.path().join("no-such-dir").join("events.log");
    let sink = sink(&path);

    match sink.log(&event(Severity::ERROR, "login ok")) {
        Outcome::WriteFailed(err) => {
            assert_eq!(err.message(), "failed to create log file");
        }
        outcome => panic!("unexpected outcome: {outcome:?}"),
    }
    assert!(!path.exists());

    let skipped = sink.log(&event(Severity::DEBUG, "login ok"));
    assert!(skipped.is_skipped());
}

#[test]
fn test_lines_accumulate_in_order() {
    let dir = TempDir::new().expect("failed to create a temporary directory");
    let path = dir.path().join("events.log");
    let sink = EventFile::new(
        Config::builder(&path)
            .line_template("%severity %message")
            .included_severities(Severity::ALL)
            .build(),
    );

    let mut expected = String::new();
    for (i, severity) in Severity::ALL.into_iter().enumerate() {
        let outcome = sink.log(&event(severity, &format!("event {i}")));
        assert!(outcome.is_written());
        expected.push_str(&format!("{} event {i}\n", severity.standard_name().unwrap()));
    }

    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn test_random_events_follow_rules() {
    let dir = TempDir::new().expect("failed to create a temporary directory");
    let path = dir.path().join("events.log");
    let sink = sink(&path);
    let words = ["alpha", "beta", "secret", "gamma", "top-secret", "delta"];

    let mut rng = rand::rng();
    let mut written = 0;
    for _ in 0..200 {
        let severity = Severity::new(rng.random_range(0..=9));
        let word = words[rng.random_range(0..words.len())];
        let message = format!("{word} #{}", rng.random_range(0..1000));

        let before = fs::read_to_string(&path).unwrap_or_default();
        let outcome = sink.log(&event(severity, &message));
        let after = fs::read_to_string(&path).unwrap_or_default();

        let kept = (severity == Severity::ERROR || severity == Severity::WARNING)
            && !message.contains("secret");
        if kept {
            assert!(outcome.is_written(), "{outcome:?}");
            let line = sink.render(&event(severity, &message));
            assert_eq!(after, format!("{before}{line}\n"));
            written += 1;
        } else {
            assert!(outcome.is_skipped(), "{outcome:?}");
            assert_eq!(after, before);
        }
    }

    let lines = fs::read_to_string(&path).unwrap_or_default().lines().count();
    assert_eq!(lines, written);
}
