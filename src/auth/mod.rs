// SPDX-License-Identifier: MPL-2.0
//! Account security primitives: signed one-time tokens and password digests.

pub mod password;
pub mod token;

pub use password::PasswordDigest;
pub use token::{SignedToken, TokenPurpose, TokenSigner};
