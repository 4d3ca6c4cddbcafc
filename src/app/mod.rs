// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the screens and stores.
//!
//! The `App` struct wires together the screens, the user and catalog stores,
//! the token signer and localization, and translates component events into
//! side effects like store persistence or the image-picker task. Policy
//! decisions (token gating, which events persist which store) stay close to
//! the main update loop so user-facing behavior is easy to audit.

mod message;
pub mod paths;
mod screen;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::auth::TokenSigner;
use crate::config;
use crate::i18n::fluent::I18n;
use crate::store::{CatalogStore, UserStore};
use crate::ui::{join, new_password, product_form, recover_password, register};
use iced::{window, Element, Task};
use std::fmt;

pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 700;
pub const MIN_WINDOW_WIDTH: u32 = 600;
pub const MIN_WINDOW_HEIGHT: u32 = 500;

/// Secret used when neither the config file nor the environment provides
/// one. Fine for a local catalog, meaningless for anything shared.
const DEV_TOKEN_SECRET: &str = "shopfront-dev-secret";

/// Root Iced application state bridging screens, stores and localization.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    users: UserStore,
    catalog: CatalogStore,
    signer: TokenSigner,
    join: join::State,
    recover: recover_password::State,
    /// Present only while a verified join token is open.
    register: Option<register::State>,
    /// Present only while a verified recover token is open.
    new_password: Option<new_password::State>,
    product_form: product_form::State,
    /// Warning keys from store load/save problems, shown at the top.
    notices: Vec<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("users", &self.users.len())
            .field("products", &self.catalog.products().len())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .window(window_settings())
        .run()
}

impl App {
    /// Initializes application state from config, stores and flags.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_default();
        let i18n = I18n::new(flags.lang, flags.i18n_dir, &config);

        let secret = config
            .resolve_token_secret()
            .unwrap_or_else(|| DEV_TOKEN_SECRET.to_string());
        let signer = TokenSigner::new(&secret);

        let mut notices = Vec::new();
        let (users, users_warning) = UserStore::load();
        if let Some(key) = users_warning {
            notices.push(key);
        }
        let (catalog, catalog_warning) = CatalogStore::load();
        if let Some(key) = catalog_warning {
            notices.push(key);
        }

        let product_form = product_form::State::new(&catalog);

        let app = App {
            i18n,
            screen: Screen::Products,
            users,
            catalog,
            signer,
            join: join::State::new(),
            recover: recover_password::State::new(),
            register: None,
            new_password: None,
            product_form,
            notices,
        };

        (app, Task::none())
    }

    fn title(&self) -> String {
        self.i18n.tr("app-title")
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    /// Persists the user store, surfacing failures as notices.
    fn persist_users(&mut self) {
        if let Some(key) = self.users.save() {
            eprintln!("Failed to save user store");
            self.notices.push(key);
        }
    }

    /// Persists the catalog store, surfacing failures as notices.
    fn persist_catalog(&mut self) {
        if let Some(key) = self.catalog.save() {
            eprintln!("Failed to save catalog store");
            self.notices.push(key);
        }
    }
}
