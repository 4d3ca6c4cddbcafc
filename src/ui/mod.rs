// SPDX-License-Identifier: MPL-2.0
//! UI components: one module per screen, plus the widget-state value objects
//! in [`state`].
//!
//! Every screen follows the same shape: a `Message` enum, a `State` value,
//! a pure-ish `update` returning an `Event` for the parent, and a `view`
//! over a `ViewContext`.

pub mod join;
pub mod new_password;
pub mod product_form;
pub mod product_list;
pub mod recover_password;
pub mod register;
pub mod state;
