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

//! Configuration of an [`EventFile`](crate::EventFile).

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

use jiff::tz::TimeZone;

use crate::record::Severity;

/// Display names of severities, used for the `%severity` placeholder.
///
/// The default table maps `0..=7` to the standard names `emergency` through `debug`. Severities
/// missing from the table render as their decimal code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SeverityNames(BTreeMap<Severity, String>);

impl Default for SeverityNames {
    fn default() -> Self {
        Severity::ALL
            .into_iter()
            .filter_map(|s| s.standard_name().map(|name| (s, name)))
            .collect()
    }
}

impl SeverityNames {
    /// A table without any names; every severity renders as its code.
    pub fn empty() -> Self {
        SeverityNames(BTreeMap::new())
    }

    /// Look up the name of a severity.
    pub fn get(&self, severity: Severity) -> Option<&str> {
        self.0.get(&severity).map(String::as_str)
    }

    /// Set the name of a severity, returning the previous name if any.
    pub fn insert(&mut self, severity: Severity, name: impl Into<String>) -> Option<String> {
        self.0.insert(severity, name.into())
    }
}

impl<S, N> FromIterator<(S, N)> for SeverityNames
where
    S: Into<Severity>,
    N: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, N)>>(iter: I) -> Self {
        SeverityNames(
            iter.into_iter()
                .map(|(s, n)| (s.into(), n.into()))
                .collect(),
        )
    }
}

/// The settings of an [`EventFile`](crate::EventFile).
///
/// Every option has a default: empty strings for the path, template and date format, empty
/// rule sets, and the standard [`SeverityNames`]. Note that the default `included_severities`
/// is empty, which means nothing is written until severities are included.
///
/// A `Config` never changes after it is built. The destination path is not checked here; an
/// unusable path shows up as [`Outcome::WriteFailed`](crate::Outcome::WriteFailed) at write
/// time.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    destination_path: PathBuf,
    line_template: String,
    date_format: String,
    included_severities: BTreeSet<Severity>,
    excluded_keywords: Vec<String>,
    severity_names: SeverityNames,
    #[cfg_attr(feature = "serde", serde(skip))]
    timezone: Option<TimeZone>,
}

impl Config {
    /// Create a new builder writing to `destination_path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eventfile::Config;
    /// use eventfile::Severity;
    ///
    /// let config = Config::builder("/var/log/app/events.log")
    ///     .line_template("%date [%severity] %user: %message")
    ///     .date_format("%Y-%m-%d %H:%M:%S")
    ///     .included_severities([Severity::ERROR, Severity::WARNING])
    ///     .exclude_keyword("password")
    ///     .build();
    /// assert!(config.includes(Severity::ERROR));
    /// ```
    #[must_use]
    pub fn builder(destination_path: impl Into<PathBuf>) -> ConfigBuilder {
        ConfigBuilder {
            config: Config {
                destination_path: destination_path.into(),
                ..Config::default()
            },
        }
    }

    /// The file log lines are appended to.
    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    /// The line template with `%name` placeholders.
    pub fn line_template(&self) -> &str {
        &self.line_template
    }

    /// The strftime-style format of the `%date` placeholder.
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// The severities that are written.
    pub fn included_severities(&self) -> &BTreeSet<Severity> {
        &self.included_severities
    }

    /// Whether events of `severity` pass the severity rule.
    pub fn includes(&self, severity: Severity) -> bool {
        self.included_severities.contains(&severity)
    }

    /// Substrings that suppress a rendered line, as configured (untrimmed).
    pub fn excluded_keywords(&self) -> &[String] {
        &self.excluded_keywords
    }

    /// The display names of severities.
    pub fn severity_names(&self) -> &SeverityNames {
        &self.severity_names
    }

    /// The time zone of the `%date` placeholder; `None` means the system time zone.
    pub fn timezone(&self) -> Option<&TimeZone> {
        self.timezone.as_ref()
    }
}

/// Builder for [`Config`].
#[derive(Debug)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Sets the line template.
    ///
    /// Recognized placeholders are `%date`, `%severity`, `%type`, `%uid`, `%user`, `%message`,
    /// `%uri`, `%referer` and `%link`. Any other text is copied as is.
    pub fn line_template(mut self, template: impl Into<String>) -> Self {
        self.config.line_template = template.into();
        self
    }

    /// Sets the strftime-style format of the `%date` placeholder, e.g. `%Y-%m-%d %H:%M:%S`.
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.config.date_format = format.into();
        self
    }

    /// Adds one severity to the set of written severities.
    pub fn include_severity(mut self, severity: impl Into<Severity>) -> Self {
        self.config.included_severities.insert(severity.into());
        self
    }

    /// Replaces the set of written severities.
    pub fn included_severities<I, S>(mut self, severities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Severity>,
    {
        self.config.included_severities = severities.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one keyword to the exclusion list.
    pub fn exclude_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.config.excluded_keywords.push(keyword.into());
        self
    }

    /// Replaces the exclusion list. Order is kept; blank entries are ignored when filtering.
    pub fn excluded_keywords<I, K>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.config.excluded_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Overrides the display name of one severity in the current table.
    pub fn severity_name(mut self, severity: impl Into<Severity>, name: impl Into<String>) -> Self {
        self.config.severity_names.insert(severity.into(), name);
        self
    }

    /// Replaces the whole severity name table.
    pub fn severity_names(mut self, names: SeverityNames) -> Self {
        self.config.severity_names = names;
        self
    }

    /// Sets the time zone of the `%date` placeholder.
    ///
    /// Default to the system time zone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.config.timezone = Some(tz);
        self
    }

    /// Build the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.destination_path(), Path::new(""));
        assert_eq!(config.line_template(), "");
        assert_eq!(config.date_format(), "");
        assert!(config.included_severities().is_empty());
        assert!(config.excluded_keywords().is_empty());
        assert!(config.timezone().is_none());

        let names = config.severity_names();
        assert_eq!(names.get(Severity::EMERGENCY), Some("emergency"));
        assert_eq!(names.get(Severity::ALERT), Some("alert"));
        assert_eq!(names.get(Severity::CRITICAL), Some("critical"));
        assert_eq!(names.get(Severity::ERROR), Some("error"));
        assert_eq!(names.get(Severity::WARNING), Some("warning"));
        assert_eq!(names.get(Severity::NOTICE), Some("notice"));
        assert_eq!(names.get(Severity::INFO), Some("info"));
        assert_eq!(names.get(Severity::DEBUG), Some("debug"));
        assert_eq!(names.get(Severity::new(8)), None);
    }

    #[test]
    fn test_builder() {
        let config = Config::builder("events.log")
            .line_template("%message")
            .date_format("%Y")
            .include_severity(Severity::ERROR)
            .include_severity(4u8)
            .excluded_keywords(["a", " ", "b"])
            .exclude_keyword("c")
            .severity_name(Severity::WARNING, "WARN")
            .timezone(TimeZone::UTC)
            .build();

        assert_eq!(config.destination_path(), Path::new("events.log"));
        assert_eq!(config.line_template(), "%message");
        assert_eq!(config.date_format(), "%Y");
        assert!(config.includes(Severity::ERROR));
        assert!(config.includes(Severity::WARNING));
        assert!(!config.includes(Severity::CRITICAL));
        assert_eq!(config.excluded_keywords(), ["a", " ", "b", "c"]);
        assert_eq!(config.severity_names().get(Severity::WARNING), Some("WARN"));
        assert_eq!(config.severity_names().get(Severity::ERROR), Some("error"));
        assert_eq!(config.timezone(), Some(&TimeZone::UTC));
    }

    #[test]
    fn test_replace_severity_names() {
        let names: SeverityNames = [(3u8, "E")].into_iter().collect();
        let config = Config::builder("x.log").severity_names(names).build();
        assert_eq!(config.severity_names().get(Severity::ERROR), Some("E"));
        assert_eq!(config.severity_names().get(Severity::WARNING), None);

        let config = Config::builder("x.log")
            .severity_names(SeverityNames::empty())
            .build();
        assert_eq!(config.severity_names().get(Severity::ERROR), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial() {
        let config: Config = serde_json::from_str(
            r#"{
                "destination_path": "/tmp/events.log",
                "line_template": "%severity %message",
                "included_severities": [3, 4],
                "excluded_keywords": ["secret", ""]
            }"#,
        )
        .unwrap();

        assert_eq!(config.destination_path(), Path::new("/tmp/events.log"));
        assert_eq!(config.line_template(), "%severity %message");
        assert_eq!(config.date_format(), "");
        assert!(config.includes(Severity::ERROR));
        assert!(config.includes(Severity::WARNING));
        assert!(!config.includes(Severity::INFO));
        assert_eq!(config.excluded_keywords(), ["secret", ""]);
        assert_eq!(config.severity_names(), &SeverityNames::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_severity_names() {
        let config: Config =
            serde_json::from_str(r#"{ "severity_names": { "3": "ERR" } }"#).unwrap();
        assert_eq!(config.severity_names().get(Severity::ERROR), Some("ERR"));
        assert_eq!(config.severity_names().get(Severity::WARNING), None);
    }
}
