// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Component updates return `Event`s; this module decides what each event
//! means at the application level: which store to persist, which screen to
//! enter, which task to spawn. Token gating lives here: the register and
//! new-password screens are only constructed after their token verifies.

use super::{App, Message, Screen};
use crate::auth::TokenPurpose;
use crate::ui::{join, new_password, product_form, product_list, recover_password, register};
use iced::Task;
use std::path::PathBuf;

/// Handles a top-level message.
pub fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::SwitchScreen(screen) => handle_switch_screen(app, screen),
        Message::Join(message) => handle_join_message(app, message),
        Message::Recover(message) => handle_recover_message(app, message),
        Message::Register(message) => handle_register_message(app, message),
        Message::NewPassword(message) => handle_new_password_message(app, message),
        Message::ProductList(message) => handle_product_list_message(app, message),
        Message::ProductForm(message) => handle_product_form_message(app, message),
        Message::ImagePickerResult(paths) => {
            handle_product_form_message(app, product_form::Message::ImagesPicked(paths))
        }
    }
}

/// Direct navigation. The token-gated screens cannot be entered this way:
/// without a live verified token they bounce to their entry screen.
fn handle_switch_screen(app: &mut App, screen: Screen) -> Task<Message> {
    app.screen = match screen {
        Screen::Register if app.register.is_none() => Screen::Join,
        Screen::NewPassword if app.new_password.is_none() => Screen::RecoverPassword,
        other => other,
    };
    Task::none()
}

fn handle_join_message(app: &mut App, message: join::Message) -> Task<Message> {
    match join::update(&mut app.join, message, &app.users, &app.signer) {
        join::Event::None | join::Event::TokenIssued => {}
        join::Event::OpenRegister(token) => {
            // The link stand-in is verified exactly like the emailed link
            // would be; a dead token leaves the user on the sign-up screen.
            if let Ok(claims) = app.signer.verify(&token, TokenPurpose::Join) {
                app.register = Some(register::State::new(token, claims.email));
                app.screen = Screen::Register;
            }
        }
    }
    Task::none()
}

fn handle_recover_message(app: &mut App, message: recover_password::Message) -> Task<Message> {
    match recover_password::update(&mut app.recover, message, &mut app.users, &app.signer) {
        recover_password::Event::None => {}
        recover_password::Event::TokenIssued => {
            // The token was written onto the user row; keep it durable.
            app.persist_users();
        }
        recover_password::Event::OpenNewPassword(token) => {
            if let Ok(claims) = app.signer.verify(&token, TokenPurpose::Recover) {
                app.new_password = Some(new_password::State::new(token, claims.email));
                app.screen = Screen::NewPassword;
            }
        }
    }
    Task::none()
}

fn handle_register_message(app: &mut App, message: register::Message) -> Task<Message> {
    let Some(state) = app.register.as_mut() else {
        return Task::none();
    };
    match register::update(state, message, &mut app.users, &app.signer) {
        register::Event::None => {}
        register::Event::Registered => app.persist_users(),
        register::Event::TokenRejected => {
            app.register = None;
            app.screen = Screen::Join;
        }
    }
    Task::none()
}

fn handle_new_password_message(app: &mut App, message: new_password::Message) -> Task<Message> {
    let Some(state) = app.new_password.as_mut() else {
        return Task::none();
    };
    match new_password::update(state, message, &mut app.users, &app.signer) {
        new_password::Event::None => {}
        new_password::Event::PasswordUpdated => app.persist_users(),
        new_password::Event::TokenRejected => {
            app.new_password = None;
            app.screen = Screen::RecoverPassword;
        }
    }
    Task::none()
}

fn handle_product_list_message(app: &mut App, message: product_list::Message) -> Task<Message> {
    match product_list::update(message) {
        product_list::Event::OpenForm => {
            app.screen = Screen::NewProduct;
        }
        product_list::Event::Delete(id) => {
            if app.catalog.delete_product(id) {
                app.persist_catalog();
            }
        }
    }
    Task::none()
}

fn handle_product_form_message(app: &mut App, message: product_form::Message) -> Task<Message> {
    match product_form::update(&mut app.product_form, message) {
        product_form::Event::None => Task::none(),
        product_form::Event::PickImages => pick_images_task(),
        product_form::Event::Submitted(draft) => {
            match app.catalog.create_product(draft) {
                Ok(product) => {
                    let name = product.name.clone();
                    app.persist_catalog();
                    // Fresh form with the updated option lists, plus the
                    // success banner for what was just created.
                    app.product_form = product_form::State::new(&app.catalog);
                    app.product_form.note_created(name);
                }
                Err(error) => {
                    eprintln!("Failed to create product: {error}");
                }
            }
            Task::none()
        }
    }
}

/// Opens the native multi-file picker restricted to the accepted formats.
fn pick_images_task() -> Task<Message> {
    Task::perform(
        async move {
            let dialog = rfd::AsyncFileDialog::new()
                .add_filter("Images", &["jpg", "jpeg", "png", "webp"]);

            match dialog.pick_files().await {
                Some(handles) => handles
                    .into_iter()
                    .map(|handle| handle.path().to_path_buf())
                    .collect(),
                None => Vec::<PathBuf>::new(),
            }
        },
        Message::ImagePickerResult,
    )
}
