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

//! Eventfile writes structured events to a flat log file, one line per event.
//!
//! # Overview
//!
//! An [`EventFile`] takes one [`Event`] at a time and runs it through three stages:
//!
//! 1. the [`TemplateLayout`](layout::TemplateLayout) renders it into a line by filling the
//!    `%name` placeholders of the configured template;
//! 2. the [`Filter`](filter::Filter) drops it if its severity is not included, or if the
//!    rendered line contains an excluded keyword;
//! 3. the [`SingleFile`](append::SingleFile) appender appends the line to the destination file,
//!    creating the file if needed.
//!
//! The result is an [`Outcome`]: `Written`, `Skipped` or `WriteFailed`.
//!
//! # Examples
//!
//! ```
//! use eventfile::Config;
//! use eventfile::Event;
//! use eventfile::EventFile;
//! use eventfile::Severity;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("events.log");
//!
//! let sink = EventFile::new(
//!     Config::builder(&path)
//!         .line_template("[%severity] %user: %message")
//!         .included_severities([Severity::ERROR, Severity::WARNING])
//!         .exclude_keyword("secret")
//!         .build(),
//! );
//!
//! let event = Event::builder()
//!     .severity(Severity::WARNING)
//!     .ip("10.0.0.1")
//!     .message("login ok")
//!     .build();
//! assert!(sink.log(&event).is_written());
//!
//! let debug = event.to_builder().severity(Severity::DEBUG).build();
//! assert!(sink.log(&debug).is_skipped());
//!
//! let content = std::fs::read_to_string(&path).unwrap();
//! assert_eq!(content, "[warning] anon 10.0.0.1: login ok\n");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod config;
pub mod filter;
pub mod layout;
pub mod record;

mod error;
mod sink;

pub use self::config::Config;
pub use self::error::Error;
pub use self::record::Event;
pub use self::record::Severity;
pub use self::sink::EventFile;
pub use self::sink::Outcome;
