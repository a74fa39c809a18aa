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

use std::path::Path;

use crate::Error;
use crate::append::SingleFile;
use crate::config::Config;
use crate::filter::Filter;
use crate::filter::FilterResult;
use crate::layout::TemplateLayout;
use crate::record::Event;

/// The result of [`EventFile::log`].
#[derive(Debug)]
pub enum Outcome {
    /// The event passed the filters and its line was appended.
    Written,
    /// The event was rejected by a filter; nothing was written.
    Skipped,
    /// The event passed the filters but its line could not be appended.
    WriteFailed(Error),
}

impl Outcome {
    /// Whether the line was appended.
    pub fn is_written(&self) -> bool {
        matches!(self, Outcome::Written)
    }

    /// Whether the event was filtered out.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped)
    }

    /// The write error, if the event was kept but could not be written.
    pub fn write_error(&self) -> Option<&Error> {
        match self {
            Outcome::WriteFailed(err) => Some(err),
            Outcome::Written | Outcome::Skipped => None,
        }
    }
}

/// A sink that filters, renders and appends events to a flat log file.
///
/// Each call to [`log`](EventFile::log) renders the event, runs the [`Filter`] over the raw
/// event and the rendered line, and appends the line if it is kept. Everything happens on the
/// calling thread; the call returns once the line is on disk or the attempt failed.
///
/// The sink does not coordinate with other writers. Several sinks (or processes) appending to
/// the same file may interleave their lines.
///
/// # Examples
///
/// ```no_run
/// use eventfile::Config;
/// use eventfile::Event;
/// use eventfile::EventFile;
/// use eventfile::Outcome;
/// use eventfile::Severity;
///
/// let sink = EventFile::new(
///     Config::builder("/var/log/app/events.log")
///         .line_template("%date [%severity] %user: %message")
///         .date_format("%Y-%m-%d %H:%M:%S")
///         .included_severities([Severity::ERROR, Severity::WARNING])
///         .exclude_keyword("secret")
///         .build(),
/// );
///
/// let event = Event::builder()
///     .severity(Severity::WARNING)
///     .ip("10.0.0.1")
///     .message("login ok")
///     .build();
/// match sink.log(&event) {
///     Outcome::Written | Outcome::Skipped => {}
///     Outcome::WriteFailed(err) => eprintln!("{err}"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct EventFile {
    layout: TemplateLayout,
    filter: Filter,
    append: SingleFile,
}

impl EventFile {
    /// Create a sink from `config`.
    ///
    /// The destination is not touched until the first event is written.
    pub fn new(config: Config) -> Self {
        EventFile {
            layout: TemplateLayout::new(&config),
            filter: Filter::new(&config),
            append: SingleFile::new(config.destination_path()),
        }
    }

    /// The file lines are appended to.
    pub fn destination_path(&self) -> &Path {
        self.append.path()
    }

    /// Render `event` as it would be written, without filtering or writing it.
    pub fn render(&self, event: &Event) -> String {
        self.layout.format(event)
    }

    /// Filter, render and append one event.
    pub fn log(&self, event: &Event) -> Outcome {
        let line = self.render(event);
        log::trace!(target: "eventfile", "rendered event: {line}");

        if self.filter.matches(event, &line) == FilterResult::Reject {
            log::debug!(target: "eventfile", "skipped event of severity {}", event.severity());
            return Outcome::Skipped;
        }

        match self.append.append_line(&line) {
            Ok(()) => Outcome::Written,
            Err(err) => {
                log::warn!(target: "eventfile", "failed to write event: {err}");
                Outcome::WriteFailed(err)
            }
        }
    }
}
