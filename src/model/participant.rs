//! Roster types: who can be assigned.

use serde::{Deserialize, Serialize};

/// A person on the roster.
///
/// Hidden participants stay on the roster but are not eligible for new
/// assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub visible: bool,
}

impl Participant {
    /// A visible participant.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
        }
    }
}

/// The ordered roster, as read from the roster store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self { participants }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Whether `name` may be assigned: a visible participant with that exact,
    /// non-empty name.
    pub fn is_eligible(&self, name: &str) -> bool {
        !name.is_empty()
            && self
                .participants
                .iter()
                .any(|p| p.visible && p.name == name)
    }

    /// Visible, named participants in roster order.
    pub fn eligible(&self) -> impl Iterator<Item = &Participant> {
        self.participants
            .iter()
            .filter(|p| p.visible && !p.name.is_empty())
    }

    /// The option list offered for a single-assignee slot:
    /// an empty "unassigned" choice followed by every eligible name.
    pub fn choices(&self) -> Vec<String> {
        std::iter::once(String::new())
            .chain(self.eligible().map(|p| p.name.clone()))
            .collect()
    }

    pub fn find(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    pub(crate) fn find_mut(&mut self, name: &str) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.name == name)
    }

    pub(crate) fn push(&mut self, participant: Participant) {
        self.participants.push(participant);
    }

    /// Removes the named participant, returning whether one was removed.
    pub(crate) fn remove(&mut self, name: &str) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.name != name);
        self.participants.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_roster() -> Roster {
        Roster::new(vec![
            Participant::new("Ana"),
            Participant {
                name: "Bruno".into(),
                visible: false,
            },
            Participant::new("Carla"),
        ])
    }

    #[test]
    fn choices_offer_only_visible_names_after_blank() {
        assert_eq!(sample_roster().choices(), vec!["", "Ana", "Carla"]);
    }

    #[test]
    fn hidden_participants_are_not_eligible() {
        let roster = sample_roster();
        assert!(roster.is_eligible("Ana"));
        assert!(!roster.is_eligible("Bruno"));
        assert!(!roster.is_eligible("Daniel"));
        assert!(!roster.is_eligible(""));
    }

    #[test]
    fn unnamed_rows_never_become_choices() {
        let roster = Roster::new(vec![Participant::new(""), Participant::new("Ana")]);
        assert_eq!(roster.choices(), vec!["", "Ana"]);
    }

    #[test]
    fn remove_reports_whether_anything_changed() {
        let mut roster = sample_roster();
        assert!(roster.remove("Bruno"));
        assert!(!roster.remove("Bruno"));
        assert_eq!(roster.participants().len(), 2);
    }
}
