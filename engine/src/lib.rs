// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), no_std)]

mod engine;

pub use engine::Utf8Engine;
pub use engine::{DecodeOutcome, ErrKind, Error, Event};
