// SPDX-License-Identifier: MPL-2.0
//! New-password screen, reachable only through a valid recover token.
//!
//! On top of the signature and expiry checks, the presented token must equal
//! the one stored on the account: issuing a newer recovery link invalidates
//! every older one.

use crate::auth::{PasswordDigest, SignedToken, TokenPurpose, TokenSigner};
use crate::domain::newtypes::password_length_ok;
use crate::i18n::fluent::I18n;
use crate::store::UserStore;
use iced::widget::{button, text, text_input, Column, Text};
use iced::{Element, Length};

// =============================================================================
// Messages
// =============================================================================

/// Messages emitted by the new-password screen.
#[derive(Debug, Clone)]
pub enum Message {
    PasswordChanged(String),
    RepeatChanged(String),
    Submit,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// The password was changed; the user store should be persisted.
    PasswordUpdated,
    /// The token no longer verifies; bounce back to the recovery screen.
    TokenRejected,
}

// =============================================================================
// State
// =============================================================================

/// State for the new-password screen.
#[derive(Debug, Clone)]
pub struct State {
    token: SignedToken,
    email: String,
    password_input: String,
    repeat_input: String,
    password_error: Option<&'static str>,
    repeat_error: Option<&'static str>,
    generic_error: Option<&'static str>,
    success_key: Option<&'static str>,
}

impl State {
    /// Builds the screen for a token the parent has already verified.
    #[must_use]
    pub fn new(token: SignedToken, email: String) -> Self {
        Self {
            token,
            email,
            password_input: String::new(),
            repeat_input: String::new(),
            password_error: None,
            repeat_error: None,
            generic_error: None,
            success_key: None,
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Process a new-password message and return the corresponding event.
pub fn update(
    state: &mut State,
    message: Message,
    users: &mut UserStore,
    signer: &TokenSigner,
) -> Event {
    match message {
        Message::PasswordChanged(input) => {
            state.password_input = input;
            state.password_error = None;
            state.generic_error = None;
            Event::None
        }
        Message::RepeatChanged(input) => {
            state.repeat_input = input;
            state.repeat_error = None;
            state.generic_error = None;
            Event::None
        }
        Message::Submit => {
            if signer.verify(&state.token, TokenPurpose::Recover).is_err() {
                return Event::TokenRejected;
            }

            let mut failed = false;
            if !password_length_ok(&state.password_input) {
                state.password_error = Some("auth-error-password-length");
                failed = true;
            }
            if state.password_input != state.repeat_input {
                state.repeat_error = Some("auth-error-password-mismatch");
                failed = true;
            }
            if failed {
                return Event::None;
            }

            if users.find_by_email(&state.email).is_none() {
                state.generic_error = Some("new-password-error-user-missing");
                return Event::None;
            }

            if !users.recover_token_matches(&state.email, &state.token) {
                state.generic_error = Some("new-password-error-token-mismatch");
                return Event::None;
            }

            let digest = PasswordDigest::create(&state.password_input);
            if !users.update_password(&state.email, digest) {
                state.generic_error = Some("new-password-error-user-missing");
                return Event::None;
            }

            state.success_key = Some("new-password-success");
            state.password_input.clear();
            state.repeat_input.clear();
            Event::PasswordUpdated
        }
    }
}

// =============================================================================
// View
// =============================================================================

/// Context required to render the new-password screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

/// Render the new-password screen.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut content = Column::new()
        .spacing(12)
        .max_width(420)
        .push(Text::new(ctx.i18n.tr("new-password-title")).size(28))
        .push(text(ctx.state.email.clone()))
        .push(text(ctx.i18n.tr("auth-password-label")))
        .push(
            text_input(
                &ctx.i18n.tr("auth-password-label"),
                &ctx.state.password_input,
            )
            .on_input(Message::PasswordChanged)
            .secure(true)
            .padding(8),
        );

    if let Some(key) = ctx.state.password_error {
        content = content.push(text(ctx.i18n.tr(key)));
    }

    content = content
        .push(text(ctx.i18n.tr("auth-repeat-password-label")))
        .push(
            text_input(
                &ctx.i18n.tr("auth-repeat-password-label"),
                &ctx.state.repeat_input,
            )
            .on_input(Message::RepeatChanged)
            .on_submit(Message::Submit)
            .secure(true)
            .padding(8),
        );

    if let Some(key) = ctx.state.repeat_error {
        content = content.push(text(ctx.i18n.tr(key)));
    }
    if let Some(key) = ctx.state.generic_error {
        content = content.push(text(ctx.i18n.tr(key)));
    }
    if let Some(key) = ctx.state.success_key {
        content = content.push(text(ctx.i18n.tr(key)));
    }

    content
        .push(
            button(Text::new(ctx.i18n.tr("new-password-submit")))
                .on_press(Message::Submit)
                .width(Length::Fill)
                .padding(10),
        )
        .into()
}
