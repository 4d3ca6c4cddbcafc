// SPDX-License-Identifier: MPL-2.0
//! Admin product-creation form.
//!
//! Hosts the dynamic multi-value fields (SEO names, colors, size/stock rows,
//! image attachments) on top of the widget-state value objects in
//! [`crate::ui::state`]. Validation mirrors the storefront's product schema;
//! a clean submission produces a [`ProductDraft`] for the catalog mapper.

use crate::domain::catalog::{Category, Gender, ProductDraft, StockEntry};
use crate::domain::newtypes::{DiscountPercent, Price};
use crate::i18n::fluent::I18n;
use crate::store::CatalogStore;
use crate::ui::state::{
    AttachmentId, AttachmentList, ComboboxState, DragState, DropTarget, MultiSelectState,
    SeoNamesState, SizeRowsState,
};
use iced::widget::image::{Handle, Image};
use iced::widget::{button, text, text_input, Column, Row, Text};
use iced::{Element, Length};
use std::collections::HashMap;
use std::path::PathBuf;

/// Image-count rule: a product carries between 3 and 6 images.
pub const MIN_IMAGES: usize = 3;
/// See [`MIN_IMAGES`].
pub const MAX_IMAGES: usize = 6;
/// Maximum size per attached image.
pub const MAX_IMAGE_BYTES: u64 = 1024 * 1024 * 5;

/// Minimum product-name length.
const MIN_NAME_CHARS: usize = 4;

fn accepted_format(path: &std::path::Path) -> bool {
    matches!(
        image_rs::ImageFormat::from_path(path),
        Ok(image_rs::ImageFormat::Jpeg | image_rs::ImageFormat::Png | image_rs::ImageFormat::WebP)
    )
}

// =============================================================================
// Messages
// =============================================================================

/// Messages shared by every combobox-shaped field on the form.
#[derive(Debug, Clone)]
pub enum ComboMessage {
    Opened,
    Closed,
    QueryChanged(String),
    Picked(String),
    /// The query names an option that does not exist yet; create it.
    AddOption,
}

/// Messages emitted by the product form.
#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    SeoPendingChanged(String),
    SeoAdded,
    SeoRemoved(usize),
    ManufacturerChanged(String),
    PriceChanged(String),
    DiscountChanged(String),
    GenderPicked(Gender),
    Brand(ComboMessage),
    Category(ComboMessage),
    SubCategory(ComboMessage),
    Colors(ComboMessage),
    ColorChipRemoved(String),
    Sizes(ComboMessage),
    SizeUnitsChanged(usize, String),
    SizeRemoved(usize),
    /// Open the native file picker for images.
    PickImages,
    /// Result of the file picker (empty when cancelled).
    ImagesPicked(Vec<PathBuf>),
    ImageGrabbed(AttachmentId),
    ImageDropped { index: usize, id: AttachmentId },
    DragCancelled,
    ImageMarked(AttachmentId),
    ImageRestored(AttachmentId),
    ImageRemoved(AttachmentId),
    Submit,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// The form asks for the native image picker.
    PickImages,
    /// Validation passed; hand the draft to the catalog mapper.
    Submitted(ProductDraft),
}

// =============================================================================
// State
// =============================================================================

/// Per-field validation errors, as i18n keys.
#[derive(Debug, Clone, Default)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub manufacturer: Option<&'static str>,
    pub price: Option<&'static str>,
    pub discount: Option<&'static str>,
    pub category: Option<&'static str>,
    pub sub_category: Option<&'static str>,
    pub colors: Option<&'static str>,
    pub sizes: Option<&'static str>,
    pub units: Option<&'static str>,
    pub images: Option<&'static str>,
}

/// State for the product form.
///
/// Lookup options are snapshotted from the catalog when the form opens,
/// the way the admin page loads its option lists once; "add option" picks
/// extend the snapshot locally and become real rows at create time.
#[derive(Debug, Clone)]
pub struct State {
    name_input: String,
    manufacturer_input: String,
    price_input: String,
    discount_input: String,
    gender: Gender,
    seo: SeoNamesState,
    brand: ComboboxState,
    category: ComboboxState,
    sub_category: ComboboxState,
    colors: MultiSelectState,
    sizes: SizeRowsState,
    brand_options: Vec<String>,
    category_options: Vec<String>,
    color_options: Vec<String>,
    size_options: Vec<String>,
    categories: Vec<Category>,
    sub_category_options: Vec<String>,
    attachments: AttachmentList,
    attachment_bytes: HashMap<AttachmentId, u64>,
    drag: DragState,
    errors: FieldErrors,
    /// Name of the product created by the previous submission, for the
    /// success banner.
    success: Option<String>,
}

impl State {
    /// Builds the form with option lists loaded from the catalog.
    #[must_use]
    pub fn new(catalog: &CatalogStore) -> Self {
        Self {
            name_input: String::new(),
            manufacturer_input: String::new(),
            price_input: String::new(),
            discount_input: String::new(),
            gender: Gender::default(),
            seo: SeoNamesState::new(),
            brand: ComboboxState::new(),
            category: ComboboxState::new(),
            sub_category: ComboboxState::new(),
            colors: MultiSelectState::new(),
            sizes: SizeRowsState::new(),
            brand_options: catalog.brands().into_iter().map(|b| b.name).collect(),
            category_options: catalog.categories().into_iter().map(|c| c.name).collect(),
            color_options: catalog.colors().into_iter().map(|c| c.name).collect(),
            size_options: catalog.sizes().into_iter().map(|s| s.size).collect(),
            categories: catalog.categories(),
            sub_category_options: Vec::new(),
            attachments: AttachmentList::new(),
            attachment_bytes: HashMap::new(),
            drag: DragState::default(),
            errors: FieldErrors::default(),
            success: None,
        }
    }

    /// Shows the success banner for a product created from this form.
    pub fn note_created(&mut self, name: String) {
        self.success = Some(name);
    }

    #[must_use]
    pub fn attachments(&self) -> &AttachmentList {
        &self.attachments
    }

    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn refresh_sub_categories(&mut self) {
        self.sub_category_options = self
            .category
            .selection()
            .and_then(|name| {
                self.categories
                    .iter()
                    .find(|category| category.name == name)
            })
            .map(|category| {
                category
                    .sub_categories
                    .iter()
                    .map(|sub| sub.name.clone())
                    .collect()
            })
            .unwrap_or_default();
        self.sub_category.clear_selection();
    }

    fn rebuild_attachment_bytes(&mut self) {
        self.attachment_bytes = self
            .attachments
            .records()
            .iter()
            .map(|record| {
                let bytes = std::fs::metadata(&record.source)
                    .map(|meta| meta.len())
                    .unwrap_or(0);
                (record.id, bytes)
            })
            .collect();
    }

    /// First format/size problem among the records that would be submitted.
    fn attachment_problem(&self) -> Option<&'static str> {
        for record in self.attachments.submission_records() {
            if !accepted_format(&record.source) {
                return Some("product-images-format-error");
            }
            let bytes = self.attachment_bytes.get(&record.id).copied().unwrap_or(0);
            if bytes > MAX_IMAGE_BYTES {
                return Some("product-images-size-error");
            }
        }
        None
    }

    /// Validates the whole form, recording per-field errors.
    /// Returns the draft when everything passes.
    fn validate(&mut self) -> Option<ProductDraft> {
        let mut errors = FieldErrors::default();

        let name = self.name_input.trim();
        if name.chars().count() < MIN_NAME_CHARS {
            errors.name = Some("product-name-error");
        }

        let manufacturer = self.manufacturer_input.trim();
        if manufacturer.is_empty() {
            errors.manufacturer = Some("product-manufacturer-error");
        }

        let price = Price::parse(&self.price_input);
        if price.is_none() {
            errors.price = Some("product-price-error");
        }

        let discount = DiscountPercent::parse(&self.discount_input);
        if discount.is_none() {
            errors.discount = Some("product-discount-error");
        }

        let category = self.category.selection().unwrap_or_default().to_string();
        if category.is_empty() {
            errors.category = Some("product-category-error");
        }
        let sub_category = self
            .sub_category
            .selection()
            .unwrap_or_default()
            .to_string();
        if sub_category.is_empty() {
            errors.sub_category = Some("product-subcategory-error");
        }

        if self.colors.selections().is_empty() {
            errors.colors = Some("product-color-error");
        }

        if self.sizes.rows().is_empty() {
            errors.sizes = Some("product-size-error");
        }
        if !self.sizes.all_units_valid() {
            errors.units = Some("product-size-units-error");
        }

        let image_count = self.attachments.submission_len();
        if !(MIN_IMAGES..=MAX_IMAGES).contains(&image_count) {
            errors.images = Some("product-images-count-error");
        } else if let Some(problem) = self.attachment_problem() {
            errors.images = Some(problem);
        }

        let clean = errors.name.is_none()
            && errors.manufacturer.is_none()
            && errors.price.is_none()
            && errors.discount.is_none()
            && errors.category.is_none()
            && errors.sub_category.is_none()
            && errors.colors.is_none()
            && errors.sizes.is_none()
            && errors.units.is_none()
            && errors.images.is_none();
        self.errors = errors;

        if !clean {
            return None;
        }

        let units = self
            .sizes
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| StockEntry {
                size: row.size.clone(),
                units: self.sizes.units_of(index).unwrap_or(0),
            })
            .collect();

        Some(ProductDraft {
            name: name.to_string(),
            manufacturer_id: manufacturer.to_string(),
            price: price.map(Price::value).unwrap_or(0.0),
            discount: discount.map(DiscountPercent::value).unwrap_or(0.0),
            gender: self.gender,
            brand: self.brand.selection().unwrap_or_default().to_string(),
            category,
            sub_category,
            colors: self.colors.selections().to_vec(),
            units,
            seo_names: self.seo.entries().to_vec(),
            image_urls: self
                .attachments
                .submission_records()
                .map(|record| record.source.to_string_lossy().into_owned())
                .collect(),
        })
    }
}

// =============================================================================
// Update
// =============================================================================

/// Applies a combobox message; returns the newly picked value, if any.
fn apply_combo(
    combo: &mut ComboboxState,
    options: &mut Vec<String>,
    message: ComboMessage,
) -> Option<String> {
    match message {
        ComboMessage::Opened => {
            combo.opened();
            None
        }
        ComboMessage::Closed => {
            combo.close();
            None
        }
        ComboMessage::QueryChanged(query) => {
            combo.query_changed(query);
            None
        }
        ComboMessage::Picked(name) => {
            combo.select(&name);
            Some(name)
        }
        ComboMessage::AddOption => {
            if !combo.offers_add(options) {
                return None;
            }
            let name = combo.query().to_string();
            options.push(name.clone());
            combo.select(&name);
            Some(name)
        }
    }
}

/// Process a product-form message and return the corresponding event.
pub fn update(state: &mut State, message: Message) -> Event {
    match message {
        Message::NameChanged(input) => {
            state.name_input = input;
            state.errors.name = None;
        }
        Message::SeoPendingChanged(input) => state.seo.pending_changed(input),
        Message::SeoAdded => state.seo.add(),
        Message::SeoRemoved(index) => state.seo.remove(index),
        Message::ManufacturerChanged(input) => {
            state.manufacturer_input = input;
            state.errors.manufacturer = None;
        }
        Message::PriceChanged(input) => {
            state.price_input = input;
            state.errors.price = None;
        }
        Message::DiscountChanged(input) => {
            state.discount_input = input;
            state.errors.discount = None;
        }
        Message::GenderPicked(gender) => state.gender = gender,
        Message::Brand(inner) => {
            apply_combo(&mut state.brand, &mut state.brand_options, inner);
        }
        Message::Category(inner) => {
            if apply_combo(&mut state.category, &mut state.category_options, inner).is_some() {
                state.refresh_sub_categories();
                state.errors.category = None;
            }
        }
        Message::SubCategory(inner) => {
            if apply_combo(
                &mut state.sub_category,
                &mut state.sub_category_options,
                inner,
            )
            .is_some()
            {
                state.errors.sub_category = None;
            }
        }
        Message::Colors(inner) => match inner {
            ComboMessage::Opened => state.colors.opened(),
            ComboMessage::Closed => state.colors.close(),
            ComboMessage::QueryChanged(query) => state.colors.query_changed(query),
            ComboMessage::Picked(name) => {
                state.colors.toggle(&name);
                state.errors.colors = None;
            }
            // The palette is fixed; there is nothing to add.
            ComboMessage::AddOption => {}
        },
        Message::ColorChipRemoved(name) => state.colors.remove(&name),
        Message::Sizes(inner) => match inner {
            ComboMessage::Opened => state.sizes.opened(),
            ComboMessage::Closed => state.sizes.close(),
            ComboMessage::QueryChanged(query) => state.sizes.query_changed(query),
            ComboMessage::Picked(name) => {
                state.sizes.choose(&name);
                state.errors.sizes = None;
            }
            ComboMessage::AddOption => {
                if state.sizes.offers_custom(&state.size_options) {
                    if let Some(name) = state.sizes.add_custom() {
                        state.size_options.push(name);
                        state.errors.sizes = None;
                    }
                }
            }
        },
        Message::SizeUnitsChanged(index, value) => {
            state.sizes.units_changed(index, value);
            state.errors.units = None;
        }
        Message::SizeRemoved(index) => state.sizes.remove(index),
        Message::PickImages => return Event::PickImages,
        Message::ImagesPicked(paths) => {
            if !paths.is_empty() {
                state.attachments.replace_with(paths);
                state.drag.cancel();
                state.rebuild_attachment_bytes();
                state.errors.images = state.attachment_problem();
            }
        }
        Message::ImageGrabbed(id) => state.drag.grab(id),
        Message::ImageDropped { index, id } => {
            if let Some(request) = state.drag.drop_on(DropTarget { index, id }) {
                state.attachments.reconcile_move(request);
            }
        }
        Message::DragCancelled => state.drag.cancel(),
        Message::ImageMarked(id) => state.attachments.mark_for_deletion(id),
        Message::ImageRestored(id) => state.attachments.restore(id),
        Message::ImageRemoved(id) => {
            state.attachments.remove(id);
            state.attachment_bytes.remove(&id);
        }
        Message::Submit => {
            state.success = None;
            if let Some(draft) = state.validate() {
                return Event::Submitted(draft);
            }
        }
    }
    Event::None
}

// =============================================================================
// View
// =============================================================================

/// Context required to render the product form.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

/// Render the product form.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let state = ctx.state;

    let mut content = Column::new()
        .spacing(14)
        .max_width(520)
        .push(Text::new(i18n.tr("product-form-title")).size(28));

    if let Some(name) = &state.success {
        content = content.push(text(
            i18n.tr_with_args("product-form-success", &[("name", name.as_str())]),
        ));
    }

    content = content.push(labeled_input(
        i18n,
        "product-name-label",
        &state.name_input,
        state.errors.name,
        Message::NameChanged,
    ));

    content = content.push(seo_section(i18n, state));

    content = content.push(labeled_input(
        i18n,
        "product-manufacturer-label",
        &state.manufacturer_input,
        state.errors.manufacturer,
        Message::ManufacturerChanged,
    ));

    content = content.push(suffixed_input(
        i18n,
        "product-price-label",
        "product-price-suffix",
        &state.price_input,
        state.errors.price,
        Message::PriceChanged,
    ));
    content = content.push(suffixed_input(
        i18n,
        "product-discount-label",
        "product-discount-suffix",
        &state.discount_input,
        state.errors.discount,
        Message::DiscountChanged,
    ));

    content = content.push(gender_section(i18n, state));

    content = content.push(
        combobox_section(
            i18n,
            "product-category-label",
            &state.category,
            &state.category_options,
            state.errors.category,
            true,
        )
        .map(Message::Category),
    );
    content = content.push(
        combobox_section(
            i18n,
            "product-subcategory-label",
            &state.sub_category,
            &state.sub_category_options,
            state.errors.sub_category,
            true,
        )
        .map(Message::SubCategory),
    );
    content = content.push(
        combobox_section(
            i18n,
            "product-brand-label",
            &state.brand,
            &state.brand_options,
            None,
            true,
        )
        .map(Message::Brand),
    );

    content = content.push(colors_section(i18n, state));
    content = content.push(sizes_section(i18n, state));
    content = content.push(images_section(i18n, state));

    content
        .push(
            button(Text::new(i18n.tr("product-submit")))
                .on_press(Message::Submit)
                .padding(10),
        )
        .into()
}

fn labeled_input<'a>(
    i18n: &'a I18n,
    label_key: &str,
    value: &str,
    error: Option<&'static str>,
    on_input: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    let mut column = Column::new()
        .spacing(4)
        .push(text(i18n.tr(label_key)))
        .push(text_input("", value).on_input(on_input).padding(8));
    if let Some(key) = error {
        column = column.push(text(i18n.tr(key)));
    }
    column.into()
}

fn suffixed_input<'a>(
    i18n: &'a I18n,
    label_key: &str,
    suffix_key: &str,
    value: &str,
    error: Option<&'static str>,
    on_input: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    let row = Row::new()
        .spacing(8)
        .push(
            text_input("", value)
                .on_input(on_input)
                .padding(8)
                .width(Length::Fill),
        )
        .push(text(i18n.tr(suffix_key)));
    let mut column = Column::new()
        .spacing(4)
        .push(text(i18n.tr(label_key)))
        .push(row);
    if let Some(key) = error {
        column = column.push(text(i18n.tr(key)));
    }
    column.into()
}

fn seo_section<'a>(i18n: &'a I18n, state: &'a State) -> Element<'a, Message> {
    let mut column = Column::new()
        .spacing(4)
        .push(text(i18n.tr("product-seo-label")))
        .push(
            text_input("", state.seo.pending())
                .on_input(Message::SeoPendingChanged)
                .on_submit(Message::SeoAdded)
                .padding(8),
        );

    if state.seo.can_add() {
        column = column.push(
            button(Text::new(i18n.tr("product-seo-add")))
                .on_press(Message::SeoAdded)
                .padding(6),
        );
    }

    for (index, entry) in state.seo.entries().iter().enumerate() {
        column = column.push(
            Row::new()
                .spacing(8)
                .push(text(entry.clone()).width(Length::Fill))
                .push(button(Text::new("x")).on_press(Message::SeoRemoved(index))),
        );
    }

    column.into()
}

fn gender_section<'a>(i18n: &'a I18n, state: &'a State) -> Element<'a, Message> {
    let mut row = Row::new().spacing(8);
    for gender in Gender::ALL {
        let label = Text::new(gender.to_string());
        let mut option = button(label).padding(6);
        if state.gender != gender {
            option = option.on_press(Message::GenderPicked(gender));
        }
        row = row.push(option);
    }
    Column::new()
        .spacing(4)
        .push(text(i18n.tr("product-gender-label")))
        .push(row)
        .into()
}

/// A combobox field: query input, a toggle for the option panel, the
/// filtered options (plus "+ Add" when the query is new), and the current
/// selection.
fn combobox_section<'a>(
    i18n: &'a I18n,
    label_key: &str,
    state: &'a ComboboxState,
    options: &'a [String],
    error: Option<&'static str>,
    allow_add: bool,
) -> Element<'a, ComboMessage> {
    let toggle = if state.shows_options() {
        button(Text::new("▴")).on_press(ComboMessage::Closed)
    } else {
        button(Text::new("▾")).on_press(ComboMessage::Opened)
    };

    let input_row = Row::new()
        .spacing(8)
        .push(
            text_input("", state.query())
                .on_input(ComboMessage::QueryChanged)
                .padding(8)
                .width(Length::Fill),
        )
        .push(toggle.padding(6));

    let mut column = Column::new()
        .spacing(4)
        .push(text(i18n.tr(label_key)))
        .push(input_row);

    if state.shows_options() {
        if state.no_match(options) {
            column = column.push(text(i18n.tr("combobox-no-match")));
        } else {
            for option in state.filtered(options) {
                column = column.push(
                    button(Text::new(option.clone()))
                        .on_press(ComboMessage::Picked(option.clone()))
                        .width(Length::Fill)
                        .padding(6),
                );
            }
        }
        if allow_add && state.offers_add(options) {
            column = column.push(
                button(Text::new(i18n.tr("combobox-add-option")))
                    .on_press(ComboMessage::AddOption)
                    .padding(6),
            );
        }
    }

    if let Some(selection) = state.selection() {
        column = column.push(text(selection.to_string()));
    }
    if let Some(key) = error {
        column = column.push(text(i18n.tr(key)));
    }

    column.into()
}

fn colors_section<'a>(i18n: &'a I18n, state: &'a State) -> Element<'a, Message> {
    let toggle = if state.colors.shows_options() {
        button(Text::new("▴")).on_press(Message::Colors(ComboMessage::Closed))
    } else {
        button(Text::new("▾")).on_press(Message::Colors(ComboMessage::Opened))
    };

    let input_row = Row::new()
        .spacing(8)
        .push(
            text_input("", state.colors.query())
                .on_input(|q| Message::Colors(ComboMessage::QueryChanged(q)))
                .padding(8)
                .width(Length::Fill),
        )
        .push(toggle.padding(6));

    let mut column = Column::new()
        .spacing(4)
        .push(text(i18n.tr("product-color-label")))
        .push(input_row);

    if state.colors.shows_options() {
        if state.colors.no_match(&state.color_options) {
            column = column.push(text(i18n.tr("product-color-no-match")));
        } else {
            for option in state.colors.filtered(&state.color_options) {
                let label = if state.colors.is_selected(option) {
                    format!("✓ {option}")
                } else {
                    option.clone()
                };
                column = column.push(
                    button(Text::new(label))
                        .on_press(Message::Colors(ComboMessage::Picked(option.clone())))
                        .width(Length::Fill)
                        .padding(6),
                );
            }
        }
    }

    if !state.colors.selections().is_empty() {
        let mut chips = Row::new().spacing(6);
        for color in state.colors.selections() {
            chips = chips.push(
                Row::new()
                    .spacing(2)
                    .push(text(color.clone()))
                    .push(
                        button(Text::new("x"))
                            .on_press(Message::ColorChipRemoved(color.clone()))
                            .padding(2),
                    ),
            );
        }
        column = column.push(chips);
    }
    if let Some(key) = state.errors.colors {
        column = column.push(text(i18n.tr(key)));
    }

    column.into()
}

fn sizes_section<'a>(i18n: &'a I18n, state: &'a State) -> Element<'a, Message> {
    let toggle = if state.sizes.shows_options() {
        button(Text::new("▴")).on_press(Message::Sizes(ComboMessage::Closed))
    } else {
        button(Text::new("▾")).on_press(Message::Sizes(ComboMessage::Opened))
    };

    let input_row = Row::new()
        .spacing(8)
        .push(
            text_input("", state.sizes.query())
                .on_input(|q| Message::Sizes(ComboMessage::QueryChanged(q)))
                .padding(8)
                .width(Length::Fill),
        )
        .push(toggle.padding(6));

    let mut column = Column::new()
        .spacing(4)
        .push(text(i18n.tr("product-size-label")))
        .push(input_row);

    if state.sizes.shows_options() {
        if state.sizes.no_match(&state.size_options) {
            column = column.push(text(i18n.tr("product-size-no-match")));
        } else {
            for option in state.sizes.filtered(&state.size_options) {
                let label = if state.sizes.is_chosen(option) {
                    format!("✓ {option}")
                } else {
                    option.clone()
                };
                column = column.push(
                    button(Text::new(label))
                        .on_press(Message::Sizes(ComboMessage::Picked(option.clone())))
                        .width(Length::Fill)
                        .padding(6),
                );
            }
        }
        if state.sizes.offers_custom(&state.size_options) {
            column = column.push(
                button(Text::new(i18n.tr("combobox-add-option")))
                    .on_press(Message::Sizes(ComboMessage::AddOption))
                    .padding(6),
            );
        }
    }

    for (index, row) in state.sizes.rows().iter().enumerate() {
        let units_valid = state.sizes.units_of(index).is_some();
        let mut size_row = Row::new()
            .spacing(8)
            .push(text(row.size.clone()))
            .push(text(i18n.tr("product-size-stock-label")))
            .push(
                text_input("", &row.units_input)
                    .on_input(move |value| Message::SizeUnitsChanged(index, value))
                    .padding(6)
                    .width(Length::Fixed(80.0)),
            )
            .push(button(Text::new("X")).on_press(Message::SizeRemoved(index)));
        if !units_valid {
            size_row = size_row.push(text(i18n.tr("product-size-units-error")));
        }
        column = column.push(size_row);
    }

    if let Some(key) = state.errors.sizes {
        column = column.push(text(i18n.tr(key)));
    }
    if let Some(key) = state.errors.units {
        column = column.push(text(i18n.tr(key)));
    }

    column.into()
}

fn images_section<'a>(i18n: &'a I18n, state: &'a State) -> Element<'a, Message> {
    let mut column = Column::new()
        .spacing(6)
        .push(text(i18n.tr("product-images-label")))
        .push(
            button(Text::new(i18n.tr("product-images-pick")))
                .on_press(Message::PickImages)
                .padding(8),
        );

    if let Some(key) = state.errors.images {
        column = column.push(text(i18n.tr(key)));
    }

    for (index, record) in state.attachments.records().iter().enumerate() {
        let file_name = record
            .source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if record.marked_for_deletion {
            column = column.push(
                Row::new()
                    .spacing(8)
                    .push(text(file_name).width(Length::Fill))
                    .push(
                        button(Text::new(i18n.tr("product-image-restore")))
                            .on_press(Message::ImageRestored(record.id))
                            .padding(4),
                    )
                    .push(
                        button(Text::new("x"))
                            .on_press(Message::ImageRemoved(record.id))
                            .padding(4),
                    ),
            );
            continue;
        }

        let thumbnail = Image::new(Handle::from_path(&record.source)).width(Length::Fixed(
            if index == 0 { 220.0 } else { 90.0 },
        ));

        let mut row = Row::new().spacing(8).push(thumbnail);
        if index == 0 {
            row = row.push(text(i18n.tr("product-images-cover")));
        }

        if state.drag.is_dragging(record.id) {
            row = row.push(
                button(Text::new(i18n.tr("product-image-grab")))
                    .on_press(Message::DragCancelled)
                    .padding(4),
            );
        } else if state.drag.is_active() {
            row = row.push(
                button(Text::new(i18n.tr("product-image-drop")))
                    .on_press(Message::ImageDropped {
                        index,
                        id: record.id,
                    })
                    .padding(4),
            );
        } else {
            row = row.push(
                button(Text::new(i18n.tr("product-image-grab")))
                    .on_press(Message::ImageGrabbed(record.id))
                    .padding(4),
            );
        }

        row = row.push(
            button(Text::new(i18n.tr("product-image-delete")))
                .on_press(Message::ImageMarked(record.id))
                .padding(4),
        );

        column = column.push(row);
    }

    column.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn catalog() -> CatalogStore {
        CatalogStore::with_defaults()
    }

    /// Writes `count` small fake png files and returns their paths.
    fn fake_images(dir: &std::path::Path, count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|i| {
                let path = dir.join(format!("img-{i}.png"));
                fs::write(&path, b"png bytes").expect("write fake image");
                path
            })
            .collect()
    }

    fn fill_valid(state: &mut State, images: Vec<PathBuf>) {
        update(state, Message::NameChanged("Air Runner".to_string()));
        update(state, Message::ManufacturerChanged("AR-001".to_string()));
        update(state, Message::PriceChanged("79.95".to_string()));
        update(
            state,
            Message::Category(ComboMessage::QueryChanged("zapatos".to_string())),
        );
        update(state, Message::Category(ComboMessage::AddOption));
        update(
            state,
            Message::SubCategory(ComboMessage::QueryChanged("Running".to_string())),
        );
        update(state, Message::SubCategory(ComboMessage::AddOption));
        update(
            state,
            Message::Colors(ComboMessage::Picked("black".to_string())),
        );
        update(
            state,
            Message::Sizes(ComboMessage::QueryChanged("42".to_string())),
        );
        update(state, Message::Sizes(ComboMessage::AddOption));
        update(state, Message::ImagesPicked(images));
    }

    #[test]
    fn empty_form_fails_validation_with_field_errors() {
        let mut state = State::new(&catalog());
        let event = update(&mut state, Message::Submit);
        assert!(matches!(event, Event::None));
        assert_eq!(state.errors().name, Some("product-name-error"));
        assert_eq!(state.errors().colors, Some("product-color-error"));
        assert_eq!(state.errors().sizes, Some("product-size-error"));
        assert_eq!(state.errors().images, Some("product-images-count-error"));
    }

    #[test]
    fn valid_form_produces_a_draft() {
        let dir = tempdir().expect("temp dir");
        let mut state = State::new(&catalog());
        fill_valid(&mut state, fake_images(dir.path(), 3));

        let event = update(&mut state, Message::Submit);
        let Event::Submitted(draft) = event else {
            panic!("expected a draft, got {:?}", state.errors());
        };
        assert_eq!(draft.name, "Air Runner");
        assert_eq!(draft.price, 79.95);
        assert_eq!(draft.discount, 0.0);
        assert_eq!(draft.colors, ["black"]);
        assert_eq!(draft.units.len(), 1);
        assert_eq!(draft.units[0].size, "42");
        assert_eq!(draft.image_urls.len(), 3);
    }

    #[test]
    fn too_many_images_fail_the_count_rule() {
        let dir = tempdir().expect("temp dir");
        let mut state = State::new(&catalog());
        fill_valid(&mut state, fake_images(dir.path(), 7));

        let event = update(&mut state, Message::Submit);
        assert!(matches!(event, Event::None));
        assert_eq!(state.errors().images, Some("product-images-count-error"));
    }

    #[test]
    fn unsupported_format_is_reported_at_pick_time() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("scan.tiff");
        fs::write(&path, b"tiff bytes").expect("write file");

        let mut state = State::new(&catalog());
        update(&mut state, Message::ImagesPicked(vec![path]));
        assert_eq!(state.errors().images, Some("product-images-format-error"));
    }

    #[test]
    fn oversized_image_is_reported() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("huge.png");
        let blob = vec![0u8; (MAX_IMAGE_BYTES + 1) as usize];
        fs::write(&path, blob).expect("write file");

        let mut state = State::new(&catalog());
        update(&mut state, Message::ImagesPicked(vec![path]));
        assert_eq!(state.errors().images, Some("product-images-size-error"));
    }

    #[test]
    fn marking_an_image_drops_it_from_the_draft() {
        let dir = tempdir().expect("temp dir");
        let mut state = State::new(&catalog());
        fill_valid(&mut state, fake_images(dir.path(), 4));

        let marked = state.attachments().records()[3].id;
        update(&mut state, Message::ImageMarked(marked));

        let event = update(&mut state, Message::Submit);
        let Event::Submitted(draft) = event else {
            panic!("expected a draft, got {:?}", state.errors());
        };
        assert_eq!(draft.image_urls.len(), 3);
    }

    #[test]
    fn grab_and_drop_reorders_the_attachments() {
        let dir = tempdir().expect("temp dir");
        let mut state = State::new(&catalog());
        fill_valid(&mut state, fake_images(dir.path(), 3));

        let records = state.attachments().records().to_vec();
        update(&mut state, Message::ImageGrabbed(records[2].id));
        update(
            &mut state,
            Message::ImageDropped {
                index: 0,
                id: records[0].id,
            },
        );

        let order: Vec<_> = state
            .attachments()
            .records()
            .iter()
            .map(|record| record.original_index)
            .collect();
        assert_eq!(order, [2, 0, 1]);
    }

    #[test]
    fn cancelled_picker_keeps_existing_attachments() {
        let dir = tempdir().expect("temp dir");
        let mut state = State::new(&catalog());
        update(&mut state, Message::ImagesPicked(fake_images(dir.path(), 3)));
        assert_eq!(state.attachments().len(), 3);

        update(&mut state, Message::ImagesPicked(Vec::new()));
        assert_eq!(state.attachments().len(), 3);
    }

    #[test]
    fn category_pick_resets_sub_category() {
        let mut catalog = catalog();
        catalog
            .create_product(ProductDraft {
                name: "Seed".to_string(),
                manufacturer_id: "S-1".to_string(),
                price: 10.0,
                discount: 0.0,
                gender: Gender::Male,
                brand: "Nike".to_string(),
                category: "zapatos".to_string(),
                sub_category: "Running".to_string(),
                colors: vec!["black".to_string()],
                units: vec![StockEntry {
                    size: "42".to_string(),
                    units: 1,
                }],
                seo_names: vec![],
                image_urls: vec!["a".into(), "b".into(), "c".into()],
            })
            .expect("seed product");

        let mut state = State::new(&catalog);
        update(
            &mut state,
            Message::Category(ComboMessage::Picked("zapatos".to_string())),
        );
        assert_eq!(state.sub_category_options, ["Running"]);

        update(
            &mut state,
            Message::SubCategory(ComboMessage::Picked("Running".to_string())),
        );
        assert_eq!(state.sub_category.selection(), Some("Running"));

        // Picking a different category invalidates the sub-category.
        update(
            &mut state,
            Message::Category(ComboMessage::QueryChanged("ropa".to_string())),
        );
        update(&mut state, Message::Category(ComboMessage::AddOption));
        assert!(state.sub_category.selection().is_none());
        assert!(state.sub_category_options.is_empty());
    }
}
