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

//! Threshold warnings raised by the profiler.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How serious a performance warning is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, no action needed.
    Info,
    /// Performance is degraded.
    Warning,
    /// Performance is unacceptable and remediation is recommended.
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

/// A recorded threshold violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceWarning {
    /// Severity of the violation.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Name of the offending metric (e.g. `fps`, `memoryUsage`, `frameTime`).
    pub metric: String,
    /// The observed value.
    pub value: f64,
    /// The threshold that was crossed.
    pub threshold: f64,
    /// Clock time of the observation, in milliseconds.
    pub timestamp: f64,
    /// Optional remediation hints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl fmt::Display for PerformanceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}={:.2}, threshold={:.2})",
            self.severity, self.message, self.metric, self.value, self.threshold
        )
    }
}
