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

//! Filters deciding whether an event is written.

pub use self::keyword::KeywordFilter;
pub use self::severity::SeverityFilter;

mod keyword;
mod severity;

use crate::config::Config;
use crate::record::Event;

/// The result of a filter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
    /// The event will be written without further filtering.
    Accept,
    /// The event should not be written.
    Reject,
    /// No decision could be made, further filtering should occur.
    Neutral,
}

/// The filter chain of an [`EventFile`](crate::EventFile).
///
/// The severity rule runs first and looks at the raw event. The keyword rule runs second and
/// looks at the rendered line, so the event must be rendered before it can be filtered. An event
/// no rule rejects is accepted.
#[derive(Debug, Clone)]
pub struct Filter {
    severity: SeverityFilter,
    keyword: KeywordFilter,
}

impl Filter {
    /// Create the filter chain from the rule sets of `config`.
    pub fn new(config: &Config) -> Self {
        Filter {
            severity: SeverityFilter::new(config.included_severities().iter().copied()),
            keyword: KeywordFilter::new(config.excluded_keywords()),
        }
    }

    /// Check `event`, rendered as `rendered`, against every rule in order.
    ///
    /// Returns either [`FilterResult::Accept`] or [`FilterResult::Reject`].
    pub fn matches(&self, event: &Event, rendered: &str) -> FilterResult {
        let checks: [&dyn Fn() -> FilterResult; 2] = [
            &|| self.severity.matches(event),
            &|| self.keyword.matches(rendered),
        ];

        for check in checks {
            match check() {
                FilterResult::Reject => return FilterResult::Reject,
                FilterResult::Accept => break,
                FilterResult::Neutral => {}
            }
        }

        FilterResult::Accept
    }
}
