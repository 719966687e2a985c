use chrono::NaiveDate;
use std::collections::HashSet;
use userbase_core::{User, UserDraft, UserField, UserId, UserValidationError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn new_user_keeps_inputs_and_starts_unsaved() {
    let today = date(2026, 10, 18);
    let user = User::with_creation_date("grahamm2", "password1", Some(today)).unwrap();

    assert_eq!(user.username(), "grahamm2");
    assert_eq!(user.password(), "password1");
    assert_eq!(user.creation_date(), Some(today));
    assert_eq!(user.id(), None);
    assert!(!user.is_persisted());
}

#[test]
fn two_argument_constructor_leaves_date_unset() {
    let user = User::new("alice", "secret").unwrap();
    assert_eq!(user.creation_date(), None);
}

#[test]
fn accepts_values_at_the_length_limits() {
    let user = User::new("u".repeat(20), "p".repeat(60)).unwrap();
    assert_eq!(user.username().len(), 20);
    assert_eq!(user.password().len(), 60);
}

#[test]
fn rejects_username_over_twenty_characters() {
    let err = User::new("a".repeat(21), "password1").unwrap_err();
    assert_eq!(
        err,
        UserValidationError::TooLong {
            field: UserField::Username,
            max: 20,
            actual: 21,
        }
    );
}

#[test]
fn rejects_password_over_sixty_characters() {
    let err = User::new("alice", "p".repeat(61)).unwrap_err();
    assert!(matches!(
        err,
        UserValidationError::TooLong {
            field: UserField::Password,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "password field cannot be greater than 60 characters (got 61)"
    );
}

#[test]
fn failed_setters_keep_previous_values() {
    let mut user = User::new("alice", "secret").unwrap();

    assert!(user.set_username("b".repeat(21)).is_err());
    assert!(user.set_password("c".repeat(61)).is_err());
    assert_eq!(user.username(), "alice");
    assert_eq!(user.password(), "secret");

    user.set_username("bob").unwrap();
    user.set_password("hunter2").unwrap();
    user.set_creation_date(Some(date(2024, 2, 29)));
    assert_eq!(user.username(), "bob");
    assert_eq!(user.password(), "hunter2");
    assert_eq!(user.creation_date(), Some(date(2024, 2, 29)));
}

#[test]
fn restore_round_trips_all_fields() {
    let created = date(2020, 1, 31);
    let user = User::restore(UserId::new(42), "carol", "pw", Some(created)).unwrap();

    assert_eq!(user.id(), Some(UserId::new(42)));
    assert_eq!(user.username(), "carol");
    assert_eq!(user.password(), "pw");
    assert_eq!(user.creation_date(), Some(created));
}

#[test]
fn empty_draft_reports_missing_username_first() {
    let err = User::draft().build().unwrap_err();
    assert_eq!(
        err,
        UserValidationError::Missing {
            field: UserField::Username
        }
    );
    assert_eq!(err.to_string(), "username field cannot be absent");
}

#[test]
fn draft_with_id_only_reports_missing_fields() {
    let draft = UserDraft::with_id(UserId::new(5)).username(Some("dave".to_string()));
    let err = draft.build().unwrap_err();
    assert_eq!(
        err,
        UserValidationError::Missing {
            field: UserField::Password
        }
    );
}

#[test]
fn completed_draft_builds_user_with_identity() {
    let user: User = UserDraft::with_id(UserId::new(9))
        .username(Some("erin".to_string()))
        .password(Some("pw".to_string()))
        .creation_date(Some(date(2025, 5, 1)))
        .try_into()
        .unwrap();

    assert_eq!(user.id(), Some(UserId::new(9)));
    assert_eq!(user.username(), "erin");
}

#[test]
fn draft_build_still_enforces_lengths() {
    let err = User::draft()
        .username(Some("x".repeat(25)))
        .password(Some("pw".to_string()))
        .build()
        .unwrap_err();
    assert!(matches!(err, UserValidationError::TooLong { actual: 25, .. }));
}

#[test]
fn equality_uses_assigned_identity_only() {
    let first = User::restore(UserId::new(1), "alice", "a", None).unwrap();
    let same_id = User::restore(UserId::new(1), "bob", "b", Some(date(2000, 1, 1))).unwrap();
    let other_id = User::restore(UserId::new(2), "alice", "a", None).unwrap();

    assert_eq!(first, same_id);
    assert_ne!(first, other_id);
}

#[test]
fn unsaved_users_are_only_equal_to_themselves() {
    let first = User::new("alice", "a").unwrap();
    let twin = User::new("alice", "a").unwrap();

    let alias = &first;
    assert_eq!(&first, alias);
    assert_ne!(first, twin);
    assert_ne!(first, User::restore(UserId::new(1), "alice", "a", None).unwrap());
}

#[test]
fn hash_follows_identity() {
    let mut seen = HashSet::new();
    seen.insert(User::restore(UserId::new(7), "alice", "a", None).unwrap());

    let renamed = User::restore(UserId::new(7), "zed", "z", None).unwrap();
    assert!(seen.contains(&renamed));
    assert!(!seen.insert(renamed));
}

#[test]
fn display_renders_all_fields() {
    let unsaved = User::new("grahamm2", "password1").unwrap();
    assert_eq!(
        unsaved.to_string(),
        "User{id=none, username='grahamm2', password='password1', creation_date=none}"
    );

    let saved = User::restore(UserId::new(3), "grahamm2", "password1", Some(date(2026, 10, 18)))
        .unwrap();
    assert_eq!(
        saved.to_string(),
        "User{id=3, username='grahamm2', password='password1', creation_date=2026-10-18}"
    );
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let user = User::restore(UserId::new(11), "frank", "pw", Some(date(2023, 7, 4))).unwrap();

    let json = serde_json::to_value(&user).unwrap();
    assert_eq!(json["id"], 11);
    assert_eq!(json["username"], "frank");
    assert_eq!(json["password"], "pw");
    assert_eq!(json["creation_date"], "2023-07-04");

    let decoded: User = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.id(), user.id());
    assert_eq!(decoded.username(), "frank");
    assert_eq!(decoded.creation_date(), user.creation_date());
}

#[test]
fn deserialize_rejects_missing_and_oversized_fields() {
    let missing = serde_json::json!({ "username": "grace" });
    let err = serde_json::from_value::<User>(missing).unwrap_err();
    assert!(
        err.to_string().contains("password field cannot be absent"),
        "unexpected error: {err}"
    );

    let oversized = serde_json::json!({
        "id": null,
        "username": "g".repeat(21),
        "password": "pw",
        "creation_date": null
    });
    let err = serde_json::from_value::<User>(oversized).unwrap_err();
    assert!(
        err.to_string()
            .contains("username field cannot be greater than 20 characters"),
        "unexpected error: {err}"
    );
}
