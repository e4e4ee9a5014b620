// Copyright 2026 The Matrix.org Foundation C.I.C.
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

//! State queries: formatting snapshot, pending attributes and toolbar
//! button states.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use super::ComposerModel;
use crate::document::AttributeSet;
use crate::formatting_state::{
    derive_state, ActionState, FormatAction, FormattingState,
};

impl ComposerModel {
    pub fn formatting_state(&self) -> FormattingState {
        self.state
    }

    /// Replace the toggle flags with the host's own. Subsequent toggles
    /// negate these values.
    pub fn set_formatting_state(&mut self, state: FormattingState) {
        self.state = state;
    }

    pub fn pending_attributes(&self) -> &AttributeSet {
        &self.pending
    }

    /// The state the current selection would report if re-derived from
    /// the document now.
    pub fn derived_state(&self) -> FormattingState {
        derive_state(&self.document, self.selection, &self.pending)
    }

    /// Highlighting for every toolbar button.
    pub fn action_states(&self) -> HashMap<FormatAction, ActionState> {
        let in_bullet = self.pending.is_bulleted();
        FormatAction::iter()
            .map(|action| {
                let active = match action {
                    FormatAction::Bold => self.state.bold,
                    FormatAction::Italic => self.state.italic,
                    FormatAction::Underline => self.state.underline,
                    FormatAction::BulletList => in_bullet,
                };
                (action, ActionState::from(active))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ActionState, ComposerModel, FormatAction, FormattingState, Selection,
    };

    fn model_with_text(text: &str) -> ComposerModel {
        let mut m = ComposerModel::new();
        m.replace_text(text).unwrap();
        m
    }

    #[test]
    fn all_actions_default_to_enabled() {
        let model = ComposerModel::new();
        let states = model.action_states();
        assert_eq!(states.len(), 4);
        assert!(states.values().all(|s| *s == ActionState::Enabled));
    }

    #[test]
    fn bold_action_is_reversed_when_bold_is_active() {
        let mut model = model_with_text("hello");
        model.select(Selection::new(0, 5));
        model.bold().unwrap();
        assert_eq!(
            model.action_states().get(&FormatAction::Bold),
            Some(&ActionState::Reversed)
        );
        assert_eq!(
            model.action_states().get(&FormatAction::Italic),
            Some(&ActionState::Enabled)
        );
    }

    #[test]
    fn pending_formats_reverse_actions() {
        let mut model = model_with_text("aaabbb");
        model.select(Selection::caret(3));
        model.italic().unwrap();
        model.underline().unwrap();
        let states = model.action_states();
        assert_eq!(states[&FormatAction::Italic], ActionState::Reversed);
        assert_eq!(states[&FormatAction::Underline], ActionState::Reversed);
        assert_eq!(states[&FormatAction::Bold], ActionState::Enabled);
    }

    #[test]
    fn bullet_action_is_reversed_inside_a_list() {
        let mut model = ComposerModel::new();
        model.toggle_bullet_list().unwrap();
        assert_eq!(
            model.action_states()[&FormatAction::BulletList],
            ActionState::Reversed
        );
    }

    #[test]
    fn host_state_can_disagree_with_the_document() {
        let mut model = model_with_text("abc");
        model.set_formatting_state(FormattingState {
            underline: true,
            ..Default::default()
        });
        assert!(model.formatting_state().underline);
        assert!(!model.derived_state().underline);
    }
}
