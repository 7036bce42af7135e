// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

pub mod boolean;
pub mod number;
pub mod undefined;
pub mod utf8;

pub use boolean::BoolContainer;
pub use number::NumberContainer;
pub use undefined::UndefinedContainer;
pub use utf8::Utf8Container;
