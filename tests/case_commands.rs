// tests/case_commands.rs
use expedientes::application::{
    ApplicationError,
    commands::cases::{
        AdjustVisitsCommand, CreateCaseCommand, DeleteCaseCommand, UpdateCaseCommand,
        VisitAdjustment,
    },
    queries::cases::GetCaseQuery,
};
use expedientes::domain::{case::CaseCodeError, errors::DomainError, user::Role};
use std::collections::HashMap;

mod support;

use support::{AuditRow, case_fields, test_app};

fn case_rows(rows: Vec<AuditRow>) -> Vec<AuditRow> {
    rows.into_iter()
        .filter(|row| row.entity == "cases" || row.entity == "case_checklist")
        .collect()
}

#[tokio::test]
async fn create_stores_the_canonical_code_and_logs_creation() {
    let app = test_app().await;

    let created = app.create_case("35-0126-dpcjm", "Plaza Central").await;
    assert_eq!(created.case.code, "0035/0126/DPCJM");
    assert_eq!(created.case.visit_count, 0);
    assert_eq!(created.case.created_by, Some(app.admin.id.0));
    assert_eq!(created.checklist.len(), 11);
    assert!(created.checklist.iter().all(|entry| entry.status.is_none()));

    let rows = case_rows(app.audit_rows().await);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].action, "CREATE");
    assert_eq!(rows[0].entity_id, Some(created.case.id));
}

#[tokio::test]
async fn duplicate_codes_conflict_after_normalization() {
    let app = test_app().await;
    app.create_case("35/0126", "Plaza Central").await;

    let err = app
        .services
        .case_commands
        .create_case(
            &app.admin,
            CreateCaseCommand {
                fields: case_fields("0035-0126", "Otra"),
                checklist: HashMap::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(DomainError::Conflict(_))));
    assert_eq!(case_rows(app.audit_rows().await).len(), 1);
}

#[tokio::test]
async fn invalid_codes_are_rejected_with_the_code_error() {
    let app = test_app().await;

    let err = app
        .services
        .case_commands
        .create_case(
            &app.admin,
            CreateCaseCommand {
                fields: case_fields("35/126", "Plaza"),
                checklist: HashMap::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidCode(CaseCodeError::InvalidPeriod))
    ));
}

#[tokio::test]
async fn readers_cannot_create_cases() {
    let app = test_app().await;
    let reader = app.user_with_role("lectora", Role::Reader).await;

    let err = app
        .services
        .case_commands
        .create_case(
            &reader,
            CreateCaseCommand {
                fields: case_fields("1/0126", "Plaza"),
                checklist: HashMap::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Forbidden(_)));
}

#[tokio::test]
async fn visit_counter_never_goes_below_zero() {
    let app = test_app().await;
    let capture = app.user_with_role("captura", Role::Capture).await;
    let id = app.create_case("7/0126", "Bodega").await.case.id;
    let adjust = |adjustment| AdjustVisitsCommand { id, adjustment };

    let unchanged = app
        .services
        .case_commands
        .adjust_visits(&capture, adjust(VisitAdjustment::Decrement))
        .await
        .unwrap();
    assert_eq!(unchanged.visit_count, 0);
    assert_eq!(unchanged.updated_by, Some(capture.id.0));
    let rows = case_rows(app.audit_rows().await);
    assert_eq!(rows.len(), 2);
    let last = rows.last().unwrap();
    assert_eq!(last.field.as_deref(), Some("visit_count"));
    assert_eq!(last.old_value.as_deref(), Some("0"));
    assert_eq!(last.new_value.as_deref(), Some("0"));

    for _ in 0..2 {
        app.services
            .case_commands
            .adjust_visits(&capture, adjust(VisitAdjustment::Increment))
            .await
            .unwrap();
    }
    let after = app
        .services
        .case_commands
        .adjust_visits(&capture, adjust(VisitAdjustment::Decrement))
        .await
        .unwrap();
    assert_eq!(after.visit_count, 1);

    let visits: Vec<(String, String)> = case_rows(app.audit_rows().await)
        .into_iter()
        .filter(|row| row.field.as_deref() == Some("visit_count"))
        .map(|row| (row.old_value.unwrap(), row.new_value.unwrap()))
        .collect();
    assert_eq!(
        visits,
        vec![
            ("0".to_string(), "0".to_string()),
            ("0".to_string(), "1".to_string()),
            ("1".to_string(), "2".to_string()),
            ("2".to_string(), "1".to_string()),
        ]
    );
}

#[tokio::test]
async fn update_logs_one_entry_per_changed_field_and_item() {
    let app = test_app().await;
    let id = app.create_case("12/0126", "Plaza Central").await.case.id;

    let mut fields = case_fields("12/0126", "Plaza Norte");
    fields.phone = Some("449 123 4567".into());
    let checklist = HashMap::from([(1, "presenta".to_string()), (2, "tal vez".to_string())]);

    let updated = app
        .services
        .case_commands
        .update_case(
            &app.admin,
            UpdateCaseCommand {
                id,
                fields: fields.clone(),
                checklist: checklist.clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.case.property_name, "Plaza Norte");
    assert_eq!(updated.checklist[0].status.as_deref(), Some("presenta"));
    assert_eq!(updated.checklist[1].status, None);

    let changes: Vec<(String, String, String, String)> = case_rows(app.audit_rows().await)
        .into_iter()
        .filter(|row| row.action == "UPDATE")
        .map(|row| {
            (
                row.entity,
                row.field.unwrap(),
                row.old_value.unwrap(),
                row.new_value.unwrap(),
            )
        })
        .collect();
    assert_eq!(
        changes,
        vec![
            (
                "cases".into(),
                "property_name".into(),
                "Plaza Central".into(),
                "Plaza Norte".into()
            ),
            ("cases".into(), "phone".into(), "".into(), "449 123 4567".into()),
            (
                "case_checklist".into(),
                "ITEM:SOLICITUD".into(),
                "".into(),
                "presenta".into()
            ),
        ]
    );

    // Saving the same values again records nothing.
    app.services
        .case_commands
        .update_case(&app.admin, UpdateCaseCommand { id, fields, checklist })
        .await
        .unwrap();
    let updates = case_rows(app.audit_rows().await)
        .into_iter()
        .filter(|row| row.action == "UPDATE")
        .count();
    assert_eq!(updates, 3);
}

#[tokio::test]
async fn omitted_checklist_items_become_unset() {
    let app = test_app().await;
    let id = app.create_case("13/0126", "Plaza").await.case.id;
    let update = |checklist| UpdateCaseCommand {
        id,
        fields: case_fields("13/0126", "Plaza"),
        checklist,
    };

    app.services
        .case_commands
        .update_case(
            &app.admin,
            update(HashMap::from([(3, "no_presenta".to_string())])),
        )
        .await
        .unwrap();
    let cleared = app
        .services
        .case_commands
        .update_case(&app.admin, update(HashMap::new()))
        .await
        .unwrap();
    assert!(cleared.checklist.iter().all(|entry| entry.status.is_none()));

    let last = case_rows(app.audit_rows().await).pop().unwrap();
    assert_eq!(last.field.as_deref(), Some("ITEM:CARTA PODER COMPLETA"));
    assert_eq!(last.old_value.as_deref(), Some("no_presenta"));
    assert_eq!(last.new_value.as_deref(), Some(""));
}

#[tokio::test]
async fn updating_a_missing_case_is_not_found_even_with_bad_input() {
    let app = test_app().await;

    let err = app
        .services
        .case_commands
        .update_case(
            &app.admin,
            UpdateCaseCommand {
                id: 999,
                fields: case_fields("not a code", ""),
                checklist: HashMap::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn delete_removes_the_case_and_records_its_code() {
    let app = test_app().await;
    let id = app.create_case("35/0126", "Plaza").await.case.id;

    app.services
        .case_commands
        .delete_case(&app.admin, DeleteCaseCommand { id })
        .await
        .unwrap();

    let err = app
        .services
        .case_queries
        .get_case(&app.admin, GetCaseQuery { id })
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));

    let last = case_rows(app.audit_rows().await).pop().unwrap();
    assert_eq!(last.action, "DELETE");
    assert_eq!(last.entity_id, Some(id));
    assert_eq!(last.new_value.as_deref(), Some("EXP:0035/0126/DPCJM"));

    let leftover: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM case_checklist WHERE case_id = ?")
        .bind(id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(leftover, 0);

    let again = app
        .services
        .case_commands
        .delete_case(&app.admin, DeleteCaseCommand { id })
        .await
        .unwrap_err();
    assert!(matches!(again, ApplicationError::NotFound(_)));
}
