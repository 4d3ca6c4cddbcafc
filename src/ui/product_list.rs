// SPDX-License-Identifier: MPL-2.0
//! Admin product list: existing products plus the entry point to the form.

use crate::domain::catalog::Product;
use crate::i18n::fluent::I18n;
use iced::widget::{button, text, Column, Row, Text};
use iced::{Element, Length};

/// Messages emitted by the product list.
#[derive(Debug, Clone)]
pub enum Message {
    NewProduct,
    Delete(u64),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    OpenForm,
    /// Delete the product with this id; the catalog should be persisted.
    Delete(u64),
}

/// Process a product-list message and return the corresponding event.
pub fn update(message: Message) -> Event {
    match message {
        Message::NewProduct => Event::OpenForm,
        Message::Delete(id) => Event::Delete(id),
    }
}

/// Context required to render the product list.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub products: &'a [Product],
}

/// Render the product list.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut content = Column::new()
        .spacing(12)
        .push(Text::new(ctx.i18n.tr("products-title")).size(28))
        .push(
            button(Text::new(ctx.i18n.tr("products-new-link")))
                .on_press(Message::NewProduct)
                .padding(8),
        );

    if ctx.products.is_empty() {
        content = content.push(text(ctx.i18n.tr("products-empty")));
    }

    for product in ctx.products {
        let row = Row::new()
            .spacing(16)
            .push(text(product.name.clone()).width(Length::FillPortion(3)))
            .push(text(product.brand.clone()).width(Length::FillPortion(2)))
            .push(text(format!("{:.2} €", product.price)).width(Length::FillPortion(1)))
            .push(
                button(Text::new(ctx.i18n.tr("products-delete")))
                    .on_press(Message::Delete(product.id))
                    .padding(4),
            );
        content = content.push(row);
    }

    content.into()
}
