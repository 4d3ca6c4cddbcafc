// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Each widget's state is an explicit value object transitioned by pure
//! reducer methods, kept separate from rendering so the dropdown, selection
//! and reordering logic is testable on its own.

pub mod attachments;
pub mod combobox;
pub mod multi_select;
pub mod seo_names;
pub mod size_rows;

// Re-export commonly used types for convenience
pub use attachments::{
    AttachmentId, AttachmentList, DragState, DropTarget, ImageRecord, MoveRequest,
};
pub use combobox::ComboboxState;
pub use multi_select::MultiSelectState;
pub use seo_names::SeoNamesState;
pub use size_rows::SizeRowsState;
