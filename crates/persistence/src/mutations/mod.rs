// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! Mutations are only called from inside a store transaction so that a
//! change and its audit event are committed together.

pub mod audit;
pub mod availability;
pub mod bookings;
pub mod settings;
