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

use jiff::Timestamp;
use jiff::fmt::strtime;
use jiff::tz::TimeZone;

use crate::config::Config;
use crate::config::SeverityNames;
use crate::layout::markup::decode_angle_entities;
use crate::layout::markup::strip_tags;
use crate::layout::replace::replace_pairs;
use crate::record::Event;

/// A layout that renders an [`Event`] by filling the `%name` placeholders of a line template.
///
/// | placeholder | value                                                               |
/// |-------------|---------------------------------------------------------------------|
/// | `%date`     | the timestamp, formatted with the configured strftime format        |
/// | `%severity` | the configured severity name, or the severity code                  |
/// | `%type`     | the event type                                                      |
/// | `%uid`      | the user id                                                         |
/// | `%user`     | `<name> <ip>` for a known user, `anon <ip>` otherwise               |
/// | `%message`  | the message with its variables substituted and markup tags removed  |
/// | `%uri`      | the request URI                                                     |
/// | `%referer`  | the referer                                                         |
/// | `%link`     | the link with markup tags removed                                   |
///
/// Substitution is a single pass: placeholder values are inserted literally and never
/// expanded again. Afterwards `&gt;` and `&lt;` are turned back into `>` and `<`. The
/// rendered line has no trailing newline.
///
/// Rendering never fails. Fields the event does not carry render as empty strings, and a
/// timestamp or date format that cannot be formatted renders `%date` as an empty string.
///
/// # Examples
///
/// ```
/// use eventfile::Config;
/// use eventfile::Event;
/// use eventfile::Severity;
/// use eventfile::layout::TemplateLayout;
///
/// let config = Config::builder("events.log")
///     .line_template("[%severity] %user: %message")
///     .build();
/// let layout = TemplateLayout::new(&config);
///
/// let event = Event::builder()
///     .severity(Severity::WARNING)
///     .ip("10.0.0.1")
///     .message("login <em>ok</em>")
///     .build();
/// assert_eq!(layout.format(&event), "[warning] anon 10.0.0.1: login ok");
/// ```
#[derive(Debug, Clone)]
pub struct TemplateLayout {
    template: String,
    date_format: String,
    severity_names: SeverityNames,
    tz: TimeZone,
}

impl TemplateLayout {
    /// Create a layout from the template, date format, severity names and time zone of `config`.
    pub fn new(config: &Config) -> Self {
        TemplateLayout {
            template: config.line_template().to_owned(),
            date_format: config.date_format().to_owned(),
            severity_names: config.severity_names().clone(),
            tz: config.timezone().cloned().unwrap_or_else(TimeZone::system),
        }
    }

    /// Render `event` into a single line.
    pub fn format(&self, event: &Event) -> String {
        let fields = [
            ("%date", self.field_date(event)),
            ("%severity", self.field_severity(event)),
            ("%type", event.kind().to_owned()),
            ("%uid", field_uid(event)),
            ("%user", field_user(event)),
            ("%message", field_message(event)),
            ("%uri", event.request_uri().to_owned()),
            ("%referer", event.referer().to_owned()),
            ("%link", strip_tags(event.link())),
        ];

        let line = replace_pairs(&self.template, &fields);
        decode_angle_entities(&line)
    }

    fn field_date(&self, event: &Event) -> String {
        let timestamp = match Timestamp::from_second(event.timestamp()) {
            Ok(timestamp) => timestamp,
            Err(err) => {
                log::debug!(target: "eventfile", "timestamp {} out of range: {err}", event.timestamp());
                return String::new();
            }
        };

        let zoned = timestamp.to_zoned(self.tz.clone());
        strtime::format(self.date_format.as_str(), &zoned).unwrap_or_else(|err| {
            log::debug!(target: "eventfile", "cannot format date with {:?}: {err}", self.date_format);
            String::new()
        })
    }

    fn field_severity(&self, event: &Event) -> String {
        let severity = event.severity();
        match self.severity_names.get(severity) {
            Some(name) => name.to_owned(),
            None => severity.to_string(),
        }
    }
}

fn field_uid(event: &Event) -> String {
    event.uid().map(|uid| uid.to_string()).unwrap_or_default()
}

fn field_user(event: &Event) -> String {
    let name = match event.uid() {
        Some(uid) if uid > 0 => event.user_name().unwrap_or_default(),
        _ => "anon",
    };
    format!("{name} {}", event.ip())
}

fn field_message(event: &Event) -> String {
    let variables = event.variables().entries().collect::<Vec<_>>();
    strip_tags(&replace_pairs(event.message(), &variables))
}
