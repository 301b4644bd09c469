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

//! Quality-change notifications.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use serde::Serialize;
use vizperf_core::control::QualityLevel;

/// What caused a quality change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ChangeReason {
    /// The evaluation loop stepped the level.
    #[serde(rename_all = "camelCase")]
    Automatic {
        /// Window average that triggered the step.
        average_fps: f64,
    },
    /// A caller set or stepped the level explicitly.
    Manual,
}

/// A completed quality transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityChange {
    /// Level before the change.
    pub from: QualityLevel,
    /// Level after the change.
    pub to: QualityLevel,
    /// Cause of the change.
    pub reason: ChangeReason,
    /// Clock time of the change in milliseconds.
    pub timestamp: f64,
}

/// Fan-out of quality changes to bounded subscriber channels.
///
/// If a subscriber's buffer is full, new events are dropped for it.
#[derive(Debug)]
pub(crate) struct ChangeBroadcaster {
    senders: Vec<Sender<QualityChange>>,
    buffer_size: usize,
}

impl ChangeBroadcaster {
    pub(crate) fn new(buffer_size: usize) -> Self {
        Self {
            senders: Vec::new(),
            buffer_size: buffer_size.max(1),
        }
    }

    pub(crate) fn subscribe(&mut self) -> Receiver<QualityChange> {
        let (tx, rx) = crossbeam_channel::bounded(self.buffer_size);
        self.senders.push(tx);
        rx
    }

    pub(crate) fn emit(&mut self, change: QualityChange) {
        self.senders.retain(|tx| match tx.try_send(change) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                log::trace!("AdaptiveQuality: subscriber buffer full, event dropped");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.senders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(to: QualityLevel) -> QualityChange {
        QualityChange {
            from: QualityLevel::High,
            to,
            reason: ChangeReason::Manual,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_full_buffer_drops_new_events() {
        let mut hub = ChangeBroadcaster::new(1);
        let rx = hub.subscribe();
        hub.emit(change(QualityLevel::Medium));
        hub.emit(change(QualityLevel::Low));
        assert_eq!(rx.try_recv().map(|c| c.to), Ok(QualityLevel::Medium));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_disconnected_subscribers_are_pruned() {
        let mut hub = ChangeBroadcaster::new(4);
        let kept = hub.subscribe();
        drop(hub.subscribe());
        hub.emit(change(QualityLevel::Ultra));
        assert_eq!(hub.subscriber_count(), 1);
        assert!(kept.try_recv().is_ok());
    }

    #[test]
    fn test_reason_serializes_with_tag() {
        let json = serde_json::to_string(&ChangeReason::Automatic { average_fps: 30.0 }).unwrap();
        assert_eq!(json, r#"{"kind":"automatic","averageFps":30.0}"#);
    }
}
