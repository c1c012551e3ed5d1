// Copyright (c) Budgetwise Developers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod budget;
pub mod categorize;
pub mod cli;
pub mod db;
pub mod forecast;
pub mod models;
pub mod report;
pub mod utils;
pub mod commands;
