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

use crate::filter::FilterResult;

/// A filter that rejects rendered lines containing any of a list of keywords.
///
/// Keywords are trimmed and blank ones are dropped. Matching is a case-sensitive substring
/// search, without any pattern syntax or anchoring.
#[derive(Debug, Clone, Default)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    /// Create a filter from the configured keywords, keeping their order.
    pub fn new<K: AsRef<str>>(keywords: &[K]) -> Self {
        KeywordFilter {
            keywords: keywords
                .iter()
                .map(|k| k.as_ref().trim())
                .filter(|k| !k.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    pub(crate) fn matches(&self, rendered: &str) -> FilterResult {
        match self.keywords.iter().find(|k| rendered.contains(k.as_str())) {
            Some(keyword) => {
                log::debug!(target: "eventfile", "line contains excluded keyword {keyword:?}");
                FilterResult::Reject
            }
            None => FilterResult::Neutral,
        }
    }
}
