// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod summary;
pub mod analytics;
pub mod budgets;
pub mod categories;
pub mod notifications;
pub mod exporter;
pub mod doctor;
