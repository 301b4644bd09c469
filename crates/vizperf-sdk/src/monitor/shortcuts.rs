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

//! Keyboard bindings.

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyChord {
    /// The character key, case-insensitive.
    pub key: char,
    /// Control held.
    pub ctrl: bool,
    /// Shift held.
    pub shift: bool,
    /// Alt held.
    pub alt: bool,
}

impl KeyChord {
    /// A bare key press.
    pub fn key(key: char) -> Self {
        Self {
            key,
            ..Default::default()
        }
    }

    /// `key` with Ctrl and Shift held.
    pub fn ctrl_shift(key: char) -> Self {
        Self {
            key,
            ctrl: true,
            shift: true,
            alt: false,
        }
    }
}

/// What a bound chord asks the dashboard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonitorAction {
    /// Ctrl+Shift+P.
    ToggleVisibility,
    /// Ctrl+Shift+R.
    Reset,
}

/// Resolves a chord to its bound action.
pub fn action_for(chord: KeyChord) -> Option<MonitorAction> {
    if !chord.ctrl || !chord.shift || chord.alt {
        return None;
    }
    match chord.key.to_ascii_lowercase() {
        'p' => Some(MonitorAction::ToggleVisibility),
        'r' => Some(MonitorAction::Reset),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings() {
        assert_eq!(
            action_for(KeyChord::ctrl_shift('P')),
            Some(MonitorAction::ToggleVisibility)
        );
        assert_eq!(action_for(KeyChord::ctrl_shift('r')), Some(MonitorAction::Reset));
        assert_eq!(action_for(KeyChord::key('p')), None);
        assert_eq!(
            action_for(KeyChord {
                alt: true,
                ..KeyChord::ctrl_shift('p')
            }),
            None
        );
    }
}
