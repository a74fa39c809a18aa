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

//! The event record consumed by [`EventFile`](crate::EventFile).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The severity of an event, from `0` (emergency) to `7` (debug).
///
/// Lower values are more urgent. Codes outside `0..=7` are representable; they render as their
/// decimal code unless the configured name table says otherwise.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Severity(u8);

impl Severity {
    /// System is unusable.
    pub const EMERGENCY: Severity = Severity(0);
    /// Action must be taken immediately.
    pub const ALERT: Severity = Severity(1);
    /// Critical conditions.
    pub const CRITICAL: Severity = Severity(2);
    /// Error conditions.
    pub const ERROR: Severity = Severity(3);
    /// Warning conditions.
    pub const WARNING: Severity = Severity(4);
    /// Normal but significant conditions.
    pub const NOTICE: Severity = Severity(5);
    /// Informational messages.
    pub const INFO: Severity = Severity(6);
    /// Debug-level messages.
    pub const DEBUG: Severity = Severity(7);

    /// All standard severities, most urgent first.
    pub const ALL: [Severity; 8] = [
        Severity::EMERGENCY,
        Severity::ALERT,
        Severity::CRITICAL,
        Severity::ERROR,
        Severity::WARNING,
        Severity::NOTICE,
        Severity::INFO,
        Severity::DEBUG,
    ];

    /// Create a severity from its numeric code.
    pub const fn new(code: u8) -> Self {
        Severity(code)
    }

    /// The numeric code of this severity.
    pub const fn code(self) -> u8 {
        self.0
    }

    /// The standard lowercase name of this severity, if it is one of the eight standard codes.
    pub fn standard_name(self) -> Option<&'static str> {
        let name = match self.0 {
            0 => "emergency",
            1 => "alert",
            2 => "critical",
            3 => "error",
            4 => "warning",
            5 => "notice",
            6 => "info",
            7 => "debug",
            _ => return None,
        };
        Some(name)
    }
}

impl From<u8> for Severity {
    fn from(code: u8) -> Self {
        Severity(code)
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::NOTICE
    }
}

impl fmt::Debug for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.standard_name() {
            Some(name) => write!(f, "Severity({}: {name})", self.0),
            None => write!(f, "Severity({})", self.0),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Severity, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Ok(Severity(code));
        }

        for severity in Severity::ALL {
            if let Some(name) = severity.standard_name() {
                if s.eq_ignore_ascii_case(name) {
                    return Ok(severity);
                }
            }
        }

        Err(Error::new(format!("malformed severity: {s:?}")))
    }
}

/// The substitution variables attached to an event message.
///
/// Producers do not always hand over a well-formed mapping. [`Variables::Absent`] and
/// [`Variables::NotMap`] are both rendered as if the mapping were empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Variables {
    /// No variables were supplied.
    #[default]
    Absent,
    /// A placeholder-to-value mapping.
    Map(BTreeMap<String, String>),
    /// Something that is not a mapping was supplied in place of the variables.
    NotMap,
}

impl Variables {
    /// The mapping to apply to the message; empty unless this is [`Variables::Map`].
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        let map = match self {
            Variables::Map(map) => Some(map),
            Variables::Absent | Variables::NotMap => None,
        };
        map.into_iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Variables::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A structured event to be written by [`EventFile`](crate::EventFile).
///
/// Every field is optional from the producer's point of view; missing strings are empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Event {
    timestamp: i64,
    severity: Severity,
    kind: String,
    uid: Option<u64>,
    user_name: Option<String>,
    ip: String,
    message: String,
    variables: Variables,
    request_uri: String,
    referer: String,
    link: String,
}

impl Event {
    /// Returns a new builder.
    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }

    /// Seconds since the Unix epoch at which the event happened.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The severity of the event.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The category of the event, e.g. `php` or `user`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The id of the acting user. `None` and `Some(0)` both mean anonymous.
    pub fn uid(&self) -> Option<u64> {
        self.uid
    }

    /// The display name of the acting user.
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// The source IP address of the request.
    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// The message before variable substitution.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The substitution variables of the message.
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// The URI of the request that produced the event.
    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    /// The referer of the request that produced the event.
    pub fn referer(&self) -> &str {
        &self.referer
    }

    /// A link related to the event, possibly wrapped in markup.
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Create a builder initialized with the current event's values.
    pub fn to_builder(&self) -> EventBuilder {
        EventBuilder {
            event: self.clone(),
        }
    }
}

/// Builder for [`Event`].
#[derive(Debug, Default)]
pub struct EventBuilder {
    event: Event,
}

impl EventBuilder {
    /// Set [`timestamp`](Event::timestamp).
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.event.timestamp = timestamp;
        self
    }

    /// Set [`severity`](Event::severity).
    pub fn severity(mut self, severity: impl Into<Severity>) -> Self {
        self.event.severity = severity.into();
        self
    }

    /// Set [`kind`](Event::kind).
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.event.kind = kind.into();
        self
    }

    /// Set [`uid`](Event::uid).
    pub fn uid(mut self, uid: u64) -> Self {
        self.event.uid = Some(uid);
        self
    }

    /// Set [`user_name`](Event::user_name).
    pub fn user_name(mut self, name: impl Into<String>) -> Self {
        self.event.user_name = Some(name.into());
        self
    }

    /// Set [`ip`](Event::ip).
    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.event.ip = ip.into();
        self
    }

    /// Set [`message`](Event::message).
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.event.message = message.into();
        self
    }

    /// Set [`variables`](Event::variables).
    pub fn variables(mut self, variables: Variables) -> Self {
        self.event.variables = variables;
        self
    }

    /// Add one substitution variable, turning the variables into a mapping if needed.
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if !matches!(self.event.variables, Variables::Map(_)) {
            self.event.variables = Variables::Map(BTreeMap::new());
        }
        if let Variables::Map(map) = &mut self.event.variables {
            map.insert(key.into(), value.into());
        }
        self
    }

    /// Set [`request_uri`](Event::request_uri).
    pub fn request_uri(mut self, uri: impl Into<String>) -> Self {
        self.event.request_uri = uri.into();
        self
    }

    /// Set [`referer`](Event::referer).
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.event.referer = referer.into();
        self
    }

    /// Set [`link`](Event::link).
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.event.link = link.into();
        self
    }

    /// Invoke the builder and return an `Event`.
    pub fn build(self) -> Event {
        self.event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_str() {
        assert_eq!("4".parse::<Severity>().unwrap(), Severity::WARNING);
        assert_eq!("Warning".parse::<Severity>().unwrap(), Severity::WARNING);
        assert_eq!(" debug ".parse::<Severity>().unwrap(), Severity::DEBUG);
        assert_eq!("12".parse::<Severity>().unwrap(), Severity::new(12));

        let err = "loud".parse::<Severity>().unwrap_err();
        assert_eq!(err.to_string(), r#"malformed severity: "loud""#);
    }

    #[test]
    fn test_severity_names() {
        assert_eq!(Severity::EMERGENCY.standard_name(), Some("emergency"));
        assert_eq!(Severity::DEBUG.standard_name(), Some("debug"));
        assert_eq!(Severity::new(8).standard_name(), None);
        assert_eq!(Severity::new(8).to_string(), "8");
    }

    #[test]
    fn test_variables_entries() {
        let vars: Variables = [("@name", "bob"), ("%count", "3")].into_iter().collect();
        let entries = vars.entries().collect::<Vec<_>>();
        assert_eq!(entries, vec![("%count", "3"), ("@name", "bob")]);

        assert_eq!(Variables::Absent.entries().count(), 0);
        assert_eq!(Variables::NotMap.entries().count(), 0);
    }

    #[test]
    fn test_builder_variable_replaces_non_map() {
        let event = Event::builder()
            .variables(Variables::NotMap)
            .variable("@who", "alice")
            .build();
        assert_eq!(
            event.variables().entries().collect::<Vec<_>>(),
            vec![("@who", "alice")]
        );
    }
}
