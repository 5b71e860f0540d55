// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod extraction_result;
pub mod run_report;
pub mod template;
pub mod url_entry;
