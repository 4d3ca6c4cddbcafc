// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Renders the navigation bar, store-warning notices and the current screen.

use super::{App, Message, Screen};
use crate::ui::{join, new_password, product_form, product_list, recover_password, register};
use iced::widget::{button, scrollable, text, Column, Container, Row, Text};
use iced::{Element, Length};

/// Renders the current application view based on the active screen.
pub fn view(app: &App) -> Element<'_, Message> {
    let nav = nav_bar(app);

    let screen: Element<'_, Message> = match app.screen {
        Screen::Join => join::view(join::ViewContext {
            i18n: &app.i18n,
            state: &app.join,
        })
        .map(Message::Join),
        Screen::Register => match &app.register {
            Some(state) => register::view(register::ViewContext {
                i18n: &app.i18n,
                state,
            })
            .map(Message::Register),
            None => join::view(join::ViewContext {
                i18n: &app.i18n,
                state: &app.join,
            })
            .map(Message::Join),
        },
        Screen::RecoverPassword => recover_password::view(recover_password::ViewContext {
            i18n: &app.i18n,
            state: &app.recover,
        })
        .map(Message::Recover),
        Screen::NewPassword => match &app.new_password {
            Some(state) => new_password::view(new_password::ViewContext {
                i18n: &app.i18n,
                state,
            })
            .map(Message::NewPassword),
            None => recover_password::view(recover_password::ViewContext {
                i18n: &app.i18n,
                state: &app.recover,
            })
            .map(Message::Recover),
        },
        Screen::Products => product_list::view(product_list::ViewContext {
            i18n: &app.i18n,
            products: app.catalog.products(),
        })
        .map(Message::ProductList),
        Screen::NewProduct => product_form::view(product_form::ViewContext {
            i18n: &app.i18n,
            state: &app.product_form,
        })
        .map(Message::ProductForm),
    };

    let mut column = Column::new().spacing(16).push(nav);

    for key in &app.notices {
        column = column.push(text(app.i18n.tr(key)));
    }

    column = column.push(scrollable(
        Container::new(screen).width(Length::Fill).padding(24),
    ));

    Container::new(column)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn nav_bar(app: &App) -> Element<'_, Message> {
    let entries = [
        ("nav-products", Screen::Products),
        ("nav-new-product", Screen::NewProduct),
        ("nav-join", Screen::Join),
        ("nav-recover", Screen::RecoverPassword),
    ];

    let mut row = Row::new().spacing(8).padding(8);
    for (key, screen) in entries {
        let label = Text::new(app.i18n.tr(key));
        let mut entry = button(label).padding(8);
        if app.screen != screen {
            entry = entry.on_press(Message::SwitchScreen(screen));
        }
        row = row.push(entry);
    }
    row.into()
}
