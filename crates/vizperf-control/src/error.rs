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

//! Errors raised by the quality controller.

use thiserror::Error;
use vizperf_core::control::QualityLevel;

/// An explicit quality request that cannot be honoured.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QualityError {
    /// No preset is registered for the requested level.
    #[error("no quality preset registered for level '{0}'")]
    UnregisteredLevel(QualityLevel),

    /// The name does not denote a quality level.
    #[error("unknown quality level '{0}'")]
    UnknownLevel(String),
}

/// A specialized `Result` type for quality operations.
pub type Result<T> = std::result::Result<T, QualityError>;
