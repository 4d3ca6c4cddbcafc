// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::join;
use crate::ui::new_password;
use crate::ui::product_form;
use crate::ui::product_list;
use crate::ui::recover_password;
use crate::ui::register;
use std::path::PathBuf;

use super::Screen;

/// Top-level messages consumed by the application update loop. The variants
/// forward lower-level component messages while keeping a single update
/// entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Join(join::Message),
    Register(register::Message),
    Recover(recover_password::Message),
    NewPassword(new_password::Message),
    ProductList(product_list::Message),
    ProductForm(product_form::Message),
    SwitchScreen(Screen),
    /// Result from the image picker dialog (empty when cancelled).
    ImagePickerResult(Vec<PathBuf>),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `es`, `en-US`).
    pub lang: Option<String>,
    /// Optional directory containing Fluent `.ftl` files for custom builds.
    pub i18n_dir: Option<String>,
    /// Optional data directory override (for the store files).
    /// Takes precedence over `SHOPFRONT_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
}
