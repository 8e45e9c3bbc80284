// src/domain/checklist/entity.rs
use std::collections::{BTreeMap, HashMap};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChecklistItemId(pub i64);

impl From<ChecklistItemId> for i64 {
    fn from(value: ChecklistItemId) -> Self {
        value.0
    }
}

/// One entry of the fixed document catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub label: String,
    pub sort_order: i64,
}

impl ChecklistItem {
    /// Audit field name under which status changes of this item are logged.
    pub fn audit_field(&self) -> String {
        format!("ITEM:{}", self.label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecklistStatus {
    Present,
    Absent,
}

impl ChecklistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistStatus::Present => "presenta",
            ChecklistStatus::Absent => "no_presenta",
        }
    }

    /// Anything other than the two wire values means "unset".
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        match raw.trim() {
            "presenta" => Some(ChecklistStatus::Present),
            "no_presenta" => Some(ChecklistStatus::Absent),
            _ => None,
        }
    }

    /// Wire value of an optional status; unset is the empty string.
    pub fn wire_value(status: Option<Self>) -> &'static str {
        status.map(|s| s.as_str()).unwrap_or("")
    }
}

impl fmt::Display for ChecklistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status per catalog item for a single case. Items missing from the map are unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistState(BTreeMap<ChecklistItemId, ChecklistStatus>);

impl ChecklistState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the state from client input keyed by catalog item id.
    ///
    /// Ids outside the catalog are ignored and unknown status values collapse
    /// to unset.
    pub fn from_submitted(catalog: &[ChecklistItem], submitted: &HashMap<i64, String>) -> Self {
        let mut state = Self::new();
        for item in catalog {
            let status = submitted
                .get(&item.id.0)
                .and_then(|raw| ChecklistStatus::parse_lenient(raw));
            state.set(item.id, status);
        }
        state
    }

    pub fn status_of(&self, id: ChecklistItemId) -> Option<ChecklistStatus> {
        self.0.get(&id).copied()
    }

    pub fn set(&mut self, id: ChecklistItemId, status: Option<ChecklistStatus>) {
        match status {
            Some(status) => {
                self.0.insert(id, status);
            }
            None => {
                self.0.remove(&id);
            }
        }
    }

    pub fn is_all_unset(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChecklistItemId, ChecklistStatus)> + '_ {
        self.0.iter().map(|(id, status)| (*id, *status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<ChecklistItem> {
        ["SOLICITUD", "TRANSPARENCIA"]
            .iter()
            .enumerate()
            .map(|(idx, label)| ChecklistItem {
                id: ChecklistItemId(idx as i64 + 1),
                label: (*label).to_string(),
                sort_order: idx as i64 + 1,
            })
            .collect()
    }

    #[test]
    fn status_values_outside_the_enum_are_unset() {
        assert_eq!(
            ChecklistStatus::parse_lenient("presenta"),
            Some(ChecklistStatus::Present)
        );
        assert_eq!(
            ChecklistStatus::parse_lenient("no_presenta"),
            Some(ChecklistStatus::Absent)
        );
        assert_eq!(ChecklistStatus::parse_lenient("PRESENTA"), None);
        assert_eq!(ChecklistStatus::parse_lenient("maybe"), None);
        assert_eq!(ChecklistStatus::parse_lenient(""), None);
    }

    #[test]
    fn submitted_state_only_keeps_known_items() {
        let submitted = HashMap::from([
            (1, "presenta".to_string()),
            (2, "bogus".to_string()),
            (99, "no_presenta".to_string()),
        ]);
        let state = ChecklistState::from_submitted(&catalog(), &submitted);

        assert_eq!(
            state.status_of(ChecklistItemId(1)),
            Some(ChecklistStatus::Present)
        );
        assert_eq!(state.status_of(ChecklistItemId(2)), None);
        assert_eq!(state.status_of(ChecklistItemId(99)), None);
        assert_eq!(state.iter().count(), 1);
    }

    #[test]
    fn empty_submission_is_all_unset() {
        let state = ChecklistState::from_submitted(&catalog(), &HashMap::new());
        assert!(state.is_all_unset());
    }

    #[test]
    fn audit_field_uses_item_label() {
        assert_eq!(catalog()[0].audit_field(), "ITEM:SOLICITUD");
        assert_eq!(ChecklistStatus::wire_value(None), "");
    }
}
