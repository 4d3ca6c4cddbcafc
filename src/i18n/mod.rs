// SPDX-License-Identifier: MPL-2.0
//! Internationalization support backed by Fluent.
//!
//! Locale resolution order: CLI argument, config file, OS locale, `en-US`.

pub mod fluent;

pub use fluent::I18n;
