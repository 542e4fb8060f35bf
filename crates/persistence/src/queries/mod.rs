// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every query uses the Diesel DSL and takes the connection it runs on,
//! so the same function serves plain reads and reads inside a transaction.

pub mod audit;
pub mod availability;
pub mod bookings;
pub mod settings;
