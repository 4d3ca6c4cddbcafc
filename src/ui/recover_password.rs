// SPDX-License-Identifier: MPL-2.0
//! Password-recovery screen: issues a signed recover token for an existing
//! account and records it on the user row.
//!
//! As with sign-up, mail transport is excluded; a "continue recovery" action
//! stands in for the emailed link once a token exists.

use crate::auth::{SignedToken, TokenPurpose, TokenSigner};
use crate::domain::newtypes::EmailAddress;
use crate::i18n::fluent::I18n;
use crate::store::UserStore;
use iced::widget::{button, text, text_input, Column, Text};
use iced::{Element, Length};

// =============================================================================
// Messages
// =============================================================================

/// Messages emitted by the recovery screen.
#[derive(Debug, Clone)]
pub enum Message {
    EmailChanged(String),
    Submit,
    OpenNewPassword,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// A recover token was issued and stored on the account; the user store
    /// should be persisted.
    TokenIssued,
    /// The user followed the recovery link stand-in.
    OpenNewPassword(SignedToken),
}

// =============================================================================
// State
// =============================================================================

/// State for the password-recovery screen.
#[derive(Debug, Clone, Default)]
pub struct State {
    email_input: String,
    error_key: Option<&'static str>,
    success_key: Option<&'static str>,
    issued: Option<SignedToken>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn issued_token(&self) -> Option<&SignedToken> {
        self.issued.as_ref()
    }
}

/// Process a recovery message and return the corresponding event.
pub fn update(
    state: &mut State,
    message: Message,
    users: &mut UserStore,
    signer: &TokenSigner,
) -> Event {
    match message {
        Message::EmailChanged(input) => {
            state.email_input = input;
            state.error_key = None;
            Event::None
        }
        Message::Submit => {
            let Some(email) = EmailAddress::parse(&state.email_input) else {
                state.error_key = Some("auth-error-invalid-email");
                state.success_key = None;
                return Event::None;
            };

            if users.find_by_email(email.as_str()).is_none() {
                state.error_key = Some("recover-error-unknown-email");
                state.success_key = None;
                return Event::None;
            }

            let token = signer.sign(email.as_str(), TokenPurpose::Recover);
            users.set_recover_token(email.as_str(), &token);
            state.issued = Some(token);
            state.error_key = None;
            state.success_key = Some("recover-success");
            Event::TokenIssued
        }
        Message::OpenNewPassword => match state.issued.clone() {
            Some(token) => Event::OpenNewPassword(token),
            None => Event::None,
        },
    }
}

// =============================================================================
// View
// =============================================================================

/// Context required to render the recovery screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

/// Render the recovery screen.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut content = Column::new()
        .spacing(12)
        .max_width(420)
        .push(Text::new(ctx.i18n.tr("recover-title")).size(28))
        .push(text(ctx.i18n.tr("auth-email-label")))
        .push(
            text_input(
                &ctx.i18n.tr("auth-email-label"),
                &ctx.state.email_input,
            )
            .on_input(Message::EmailChanged)
            .on_submit(Message::Submit)
            .padding(8),
        );

    if let Some(key) = ctx.state.error_key {
        content = content.push(text(ctx.i18n.tr(key)));
    }
    if let Some(key) = ctx.state.success_key {
        content = content.push(text(ctx.i18n.tr(key)));
    }

    content = content.push(
        button(Text::new(ctx.i18n.tr("recover-submit")))
            .on_press(Message::Submit)
            .width(Length::Fill)
            .padding(10),
    );

    if ctx.state.issued.is_some() {
        content = content.push(
            button(Text::new(ctx.i18n.tr("recover-open-new-password")))
                .on_press(Message::OpenNewPassword)
                .padding(8),
        );
    }

    content.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PasswordDigest;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret")
    }

    fn store_with_user() -> UserStore {
        let mut users = UserStore::default();
        let _ = users.create(
            &EmailAddress::parse("user@example.com").unwrap(),
            PasswordDigest::create("secret1"),
        );
        users
    }

    #[test]
    fn unknown_email_sets_error() {
        let mut users = UserStore::default();
        let mut state = State::new();
        state.email_input = "ghost@example.com".to_string();
        let event = update(&mut state, Message::Submit, &mut users, &signer());
        assert!(matches!(event, Event::None));
        assert_eq!(state.error_key, Some("recover-error-unknown-email"));
    }

    #[test]
    fn known_email_issues_and_stores_token() {
        let mut users = store_with_user();
        let mut state = State::new();
        state.email_input = "user@example.com".to_string();

        let event = update(&mut state, Message::Submit, &mut users, &signer());
        assert!(matches!(event, Event::TokenIssued));
        assert_eq!(state.success_key, Some("recover-success"));

        let token = state.issued_token().expect("token stored");
        assert!(users.recover_token_matches("user@example.com", token));
    }

    #[test]
    fn a_second_request_replaces_the_stored_token() {
        let mut users = store_with_user();
        let mut state = State::new();
        state.email_input = "user@example.com".to_string();

        update(&mut state, Message::Submit, &mut users, &signer());
        let first = state.issued_token().unwrap().clone();
        update(&mut state, Message::Submit, &mut users, &signer());
        let second = state.issued_token().unwrap().clone();

        assert!(users.recover_token_matches("user@example.com", &second));
        if first.as_str() != second.as_str() {
            assert!(!users.recover_token_matches("user@example.com", &first));
        }
    }

    #[test]
    fn open_new_password_requires_issued_token() {
        let mut users = store_with_user();
        let mut state = State::new();
        let event = update(&mut state, Message::OpenNewPassword, &mut users, &signer());
        assert!(matches!(event, Event::None));
    }
}
