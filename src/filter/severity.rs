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

use std::collections::BTreeSet;

use crate::filter::FilterResult;
use crate::record::Event;
use crate::record::Severity;

/// A filter that rejects events whose severity is not in an allow-list.
///
/// An empty allow-list rejects every event.
#[derive(Debug, Clone, Default)]
pub struct SeverityFilter {
    included: BTreeSet<Severity>,
}

impl SeverityFilter {
    /// Create a filter that lets through only the given severities.
    pub fn new(included: impl IntoIterator<Item = Severity>) -> Self {
        SeverityFilter {
            included: included.into_iter().collect(),
        }
    }

    pub(crate) fn matches(&self, event: &Event) -> FilterResult {
        let severity = event.severity();
        if self.included.contains(&severity) {
            FilterResult::Neutral
        } else {
            log::debug!(target: "eventfile", "severity {severity} is not included");
            FilterResult::Reject
        }
    }
}
