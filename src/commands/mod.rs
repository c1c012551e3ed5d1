// Copyright (c) Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod session;
pub mod categories;
pub mod transactions;
pub mod importer;
pub mod reports;
pub mod forecast;
pub mod doctor;
