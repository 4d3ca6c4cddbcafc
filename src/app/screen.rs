// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration for application navigation.

/// Screens the user can navigate between.
///
/// `Register` and `NewPassword` are token-gated: they are only entered
/// through a verified signed token, never directly from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Join,
    Register,
    RecoverPassword,
    NewPassword,
    Products,
    NewProduct,
}
