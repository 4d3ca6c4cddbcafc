// SPDX-License-Identifier: MPL-2.0
//! Registration screen, reachable only through a valid join token.
//!
//! The parent verifies the token before constructing this state, but the
//! token is verified again on submit: it may have expired while the form
//! sat open.

use crate::auth::{PasswordDigest, SignedToken, TokenPurpose, TokenSigner};
use crate::domain::newtypes::{password_length_ok, EmailAddress};
use crate::i18n::fluent::I18n;
use crate::store::UserStore;
use iced::widget::{button, text, text_input, Column, Text};
use iced::{Element, Length};

// =============================================================================
// Messages
// =============================================================================

/// Messages emitted by the registration screen.
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
    /// The account was created; the user store should be persisted.
    Registered,
    /// The token no longer verifies; bounce back to the sign-up screen.
    TokenRejected,
}

// =============================================================================
// State
// =============================================================================

/// State for the registration screen.
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

/// Process a registration message and return the corresponding event.
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
            // The token may have expired while the form was open.
            if signer.verify(&state.token, TokenPurpose::Join).is_err() {
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

            let Some(email) = EmailAddress::parse(&state.email) else {
                return Event::TokenRejected;
            };

            if users.find_by_email(email.as_str()).is_some() {
                state.generic_error = Some("register-error-exists");
                return Event::None;
            }

            let digest = PasswordDigest::create(&state.password_input);
            if users.create(&email, digest).is_none() {
                state.generic_error = Some("register-error-exists");
                return Event::None;
            }

            state.success_key = Some("register-success");
            state.password_input.clear();
            state.repeat_input.clear();
            Event::Registered
        }
    }
}

// =============================================================================
// View
// =============================================================================

/// Context required to render the registration screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

/// Render the registration screen.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut content = Column::new()
        .spacing(12)
        .max_width(420)
        .push(Text::new(ctx.i18n.tr("register-title")).size(28))
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
            button(Text::new(ctx.i18n.tr("register-submit")))
                .on_press(Message::Submit)
                .width(Length::Fill)
                .padding(10),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret")
    }

    fn fresh_state() -> State {
        let token = signer().sign("new@example.com", TokenPurpose::Join);
        State::new(token, "new@example.com".to_string())
    }

    #[test]
    fn short_password_sets_error() {
        let mut state = fresh_state();
        state.password_input = "12345".to_string();
        state.repeat_input = "12345".to_string();
        let event = update(&mut state, Message::Submit, &mut UserStore::default(), &signer());
        assert!(matches!(event, Event::None));
        assert_eq!(state.password_error, Some("auth-error-password-length"));
    }

    #[test]
    fn mismatched_passwords_set_error() {
        let mut state = fresh_state();
        state.password_input = "secret-1".to_string();
        state.repeat_input = "secret-2".to_string();
        let event = update(&mut state, Message::Submit, &mut UserStore::default(), &signer());
        assert!(matches!(event, Event::None));
        assert_eq!(state.repeat_error, Some("auth-error-password-mismatch"));
    }

    #[test]
    fn valid_submission_creates_the_account() {
        let mut users = UserStore::default();
        let mut state = fresh_state();
        state.password_input = "secret-1".to_string();
        state.repeat_input = "secret-1".to_string();

        let event = update(&mut state, Message::Submit, &mut users, &signer());
        assert!(matches!(event, Event::Registered));
        assert_eq!(state.success_key, Some("register-success"));

        let user = users.find_by_email("new@example.com").expect("created");
        assert!(user.password.verify("secret-1"));
    }

    #[test]
    fn duplicate_account_sets_generic_error() {
        let mut users = UserStore::default();
        let _ = users.create(
            &EmailAddress::parse("new@example.com").unwrap(),
            PasswordDigest::create("already"),
        );

        let mut state = fresh_state();
        state.password_input = "secret-1".to_string();
        state.repeat_input = "secret-1".to_string();

        let event = update(&mut state, Message::Submit, &mut users, &signer());
        assert!(matches!(event, Event::None));
        assert_eq!(state.generic_error, Some("register-error-exists"));
        assert_eq!(users.len(), 1);
    }

    #[test]
    fn wrong_purpose_token_is_rejected_on_submit() {
        let token = signer().sign("new@example.com", TokenPurpose::Recover);
        let mut state = State::new(token, "new@example.com".to_string());
        state.password_input = "secret-1".to_string();
        state.repeat_input = "secret-1".to_string();

        let event = update(&mut state, Message::Submit, &mut UserStore::default(), &signer());
        assert!(matches!(event, Event::TokenRejected));
    }
}
