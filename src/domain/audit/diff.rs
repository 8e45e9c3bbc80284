// src/domain/audit/diff.rs
use crate::domain::checklist::{ChecklistItem, ChecklistState, ChecklistStatus};

/// A named accessor over one mutable field of `T`.
pub struct AuditedField<T> {
    pub name: &'static str,
    pub read: fn(&T) -> Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: String,
    pub old_value: String,
    pub new_value: String,
}

/// Compare two optional values, treating `None` and `""` as the same value.
pub fn diff_values(
    field: impl Into<String>,
    old: Option<&str>,
    new: Option<&str>,
) -> Option<FieldChange> {
    let old = old.unwrap_or_default();
    let new = new.unwrap_or_default();
    if old == new {
        return None;
    }
    Some(FieldChange {
        field: field.into(),
        old_value: old.to_string(),
        new_value: new.to_string(),
    })
}

/// One change per field whose value differs between `before` and `after`,
/// in the order of `fields`.
pub fn diff_fields<T>(fields: &[AuditedField<T>], before: &T, after: &T) -> Vec<FieldChange> {
    fields
        .iter()
        .filter_map(|field| {
            let old = (field.read)(before);
            let new = (field.read)(after);
            diff_values(field.name, old.as_deref(), new.as_deref())
        })
        .collect()
}

/// Status changes per catalog item, keyed `ITEM:<label>`.
pub fn diff_checklist(
    catalog: &[ChecklistItem],
    before: &ChecklistState,
    after: &ChecklistState,
) -> Vec<FieldChange> {
    catalog
        .iter()
        .filter_map(|item| {
            diff_values(
                item.audit_field(),
                Some(ChecklistStatus::wire_value(before.status_of(item.id))),
                Some(ChecklistStatus::wire_value(after.status_of(item.id))),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checklist::ChecklistItemId;

    struct Sample {
        a: Option<String>,
        b: Option<String>,
    }

    const SAMPLE_FIELDS: &[AuditedField<Sample>] = &[
        AuditedField {
            name: "a",
            read: |s: &Sample| s.a.clone(),
        },
        AuditedField {
            name: "b",
            read: |s: &Sample| s.b.clone(),
        },
    ];

    #[test]
    fn changed_value_yields_one_change() {
        let change = diff_values("name", Some("A"), Some("B")).unwrap();
        assert_eq!(change.field, "name");
        assert_eq!(change.old_value, "A");
        assert_eq!(change.new_value, "B");
    }

    #[test]
    fn equal_values_yield_nothing() {
        assert_eq!(diff_values("name", Some("A"), Some("A")), None);
    }

    #[test]
    fn null_and_empty_are_equivalent() {
        assert_eq!(diff_values("name", None, Some("")), None);
        assert_eq!(diff_values("name", Some(""), None), None);
        assert_eq!(diff_values("name", None, None), None);
    }

    #[test]
    fn diff_fields_follows_field_order() {
        let before = Sample {
            a: Some("1".into()),
            b: None,
        };
        let after = Sample {
            a: Some("2".into()),
            b: Some("x".into()),
        };
        let changes = diff_fields(SAMPLE_FIELDS, &before, &after);
        let names: Vec<_> = changes.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(changes[1].old_value, "");
    }

    #[test]
    fn checklist_diff_uses_wire_values() {
        let catalog = vec![
            ChecklistItem {
                id: ChecklistItemId(1),
                label: "SOLICITUD".into(),
                sort_order: 1,
            },
            ChecklistItem {
                id: ChecklistItemId(2),
                label: "TRANSPARENCIA".into(),
                sort_order: 2,
            },
        ];
        let mut before = ChecklistState::new();
        before.set(ChecklistItemId(2), Some(ChecklistStatus::Absent));
        let mut after = ChecklistState::new();
        after.set(ChecklistItemId(1), Some(ChecklistStatus::Present));

        let changes = diff_checklist(&catalog, &before, &after);
        assert_eq!(
            changes,
            vec![
                FieldChange {
                    field: "ITEM:SOLICITUD".into(),
                    old_value: "".into(),
                    new_value: "presenta".into(),
                },
                FieldChange {
                    field: "ITEM:TRANSPARENCIA".into(),
                    old_value: "no_presenta".into(),
                    new_value: "".into(),
                },
            ]
        );
    }
}
