// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Errors raised by the profiler.

use thiserror::Error;

/// An error from report generation or export.
#[derive(Debug, Error)]
pub enum ProfilerError {
    /// A report was requested before any sample was collected.
    #[error("cannot generate a performance report: no samples have been collected yet")]
    NoSamples,

    /// The report could not be serialized.
    #[error("failed to serialize performance report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A specialized `Result` type for profiler operations.
pub type Result<T> = std::result::Result<T, ProfilerError>;
