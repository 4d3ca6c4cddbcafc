// SPDX-License-Identifier: MPL-2.0
//! Sign-up screen: collects an email and issues a signed join token.
//!
//! Mail transport is out of scope for the desktop build, so after a token is
//! issued the screen offers a "continue registration" action that plays the
//! role of the emailed link.

use crate::auth::{SignedToken, TokenPurpose, TokenSigner};
use crate::domain::newtypes::EmailAddress;
use crate::i18n::fluent::I18n;
use crate::store::UserStore;
use iced::widget::{button, text, text_input, Column, Text};
use iced::{Element, Length};

// =============================================================================
// Messages
// =============================================================================

/// Messages emitted by the sign-up screen.
#[derive(Debug, Clone)]
pub enum Message {
    EmailChanged(String),
    Submit,
    OpenRegister,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// A join token was issued for the entered email.
    TokenIssued,
    /// The user followed the registration link stand-in.
    OpenRegister(SignedToken),
}

// =============================================================================
// State
// =============================================================================

/// State for the sign-up screen.
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

/// Process a sign-up message and return the corresponding event.
pub fn update(
    state: &mut State,
    message: Message,
    users: &UserStore,
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

            if users.find_by_email(email.as_str()).is_some() {
                state.error_key = Some("join-error-exists");
                state.success_key = None;
                return Event::None;
            }

            let token = signer.sign(email.as_str(), TokenPurpose::Join);
            state.issued = Some(token);
            state.error_key = None;
            state.success_key = Some("join-success");
            Event::TokenIssued
        }
        Message::OpenRegister => match state.issued.clone() {
            Some(token) => Event::OpenRegister(token),
            None => Event::None,
        },
    }
}

// =============================================================================
// View
// =============================================================================

/// Context required to render the sign-up screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

/// Render the sign-up screen.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut content = Column::new()
        .spacing(12)
        .max_width(420)
        .push(Text::new(ctx.i18n.tr("join-title")).size(28))
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
        button(Text::new(ctx.i18n.tr("join-submit")))
            .on_press(Message::Submit)
            .width(Length::Fill)
            .padding(10),
    );

    if ctx.state.issued.is_some() {
        content = content.push(
            button(Text::new(ctx.i18n.tr("join-open-register")))
                .on_press(Message::OpenRegister)
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

    #[test]
    fn invalid_email_sets_error() {
        let mut state = State::new();
        state.email_input = "nonsense".to_string();
        let event = update(&mut state, Message::Submit, &UserStore::default(), &signer());
        assert!(matches!(event, Event::None));
        assert_eq!(state.error_key, Some("auth-error-invalid-email"));
        assert!(state.issued_token().is_none());
    }

    #[test]
    fn existing_account_sets_error() {
        let mut users = UserStore::default();
        let _ = users.create(
            &EmailAddress::parse("user@example.com").unwrap(),
            PasswordDigest::create("secret1"),
        );

        let mut state = State::new();
        state.email_input = "user@example.com".to_string();
        let event = update(&mut state, Message::Submit, &users, &signer());
        assert!(matches!(event, Event::None));
        assert_eq!(state.error_key, Some("join-error-exists"));
    }

    #[test]
    fn fresh_email_issues_a_join_token() {
        let mut state = State::new();
        state.email_input = "new@example.com".to_string();
        let event = update(&mut state, Message::Submit, &UserStore::default(), &signer());
        assert!(matches!(event, Event::TokenIssued));
        assert_eq!(state.success_key, Some("join-success"));

        let token = state.issued_token().expect("token stored").clone();
        let claims = signer()
            .verify(&token, TokenPurpose::Join)
            .expect("token verifies");
        assert_eq!(claims.email, "new@example.com");
    }

    #[test]
    fn open_register_requires_an_issued_token() {
        let mut state = State::new();
        let event = update(
            &mut state,
            Message::OpenRegister,
            &UserStore::default(),
            &signer(),
        );
        assert!(matches!(event, Event::None));
    }

    #[test]
    fn typing_clears_the_error() {
        let mut state = State::new();
        state.error_key = Some("join-error-exists");
        update(
            &mut state,
            Message::EmailChanged("a".to_string()),
            &UserStore::default(),
            &signer(),
        );
        assert!(state.error_key.is_none());
    }
}
