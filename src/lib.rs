// SPDX-License-Identifier: MPL-2.0
//! `shopfront` is a storefront administration app built with the Iced GUI
//! framework.
//!
//! It covers account sign-up and password recovery through signed tokens,
//! an admin product-creation form with dynamic multi-value fields, and
//! drag-and-drop reordering of product images, persisted through CBOR-backed
//! data mappers.

pub mod app;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod store;
pub mod ui;
