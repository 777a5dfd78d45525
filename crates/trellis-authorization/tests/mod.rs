//! Integration tests for the grant resolution engine

use std::collections::HashSet;

use assert_matches::assert_matches;
use trellis_authorization::{
    check_assignment, resolve_grant_options, AssignmentDecision, AssignmentRequest, GrantOption,
    ResourceGrant, ResourcePrivilege,
};
use trellis_core::UserId;
use uuid::Uuid;

fn user(name: &str) -> UserId {
    UserId(Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()))
}

#[test]
fn owner_sees_all_options_for_a_reader() {
    let result = resolve_grant_options(
        ResourceGrant::hierarchy(),
        ResourceGrant::Reader,
        ResourceGrant::Owner.privileges(),
    );
    assert_eq!(
        result.options,
        [
            GrantOption::Revoke,
            GrantOption::Level(ResourceGrant::Reader),
            GrantOption::Level(ResourceGrant::Writer),
            GrantOption::Level(ResourceGrant::Owner),
        ]
    );
    assert_eq!(result.current, ResourceGrant::Reader);
    assert!(!result.read_only);
}

#[test]
fn writer_sees_reader_and_writer_for_a_reader() {
    let result = resolve_grant_options(
        ResourceGrant::hierarchy(),
        ResourceGrant::Reader,
        ResourceGrant::Writer.privileges(),
    );
    assert_eq!(
        result.options,
        [
            GrantOption::Level(ResourceGrant::Reader),
            GrantOption::Level(ResourceGrant::Writer),
        ]
    );
    assert!(!result.read_only);
}

#[test]
fn reader_viewing_a_writer_is_locked() {
    let result = resolve_grant_options(
        ResourceGrant::hierarchy(),
        ResourceGrant::Writer,
        ResourceGrant::Reader.privileges(),
    );
    assert_eq!(result.current, ResourceGrant::Writer);
    assert_eq!(result.options, [GrantOption::Level(ResourceGrant::Writer)]);
    assert!(result.read_only);
}

#[test]
fn owner_viewing_an_owner_keeps_all_options() {
    let result = resolve_grant_options(
        ResourceGrant::hierarchy(),
        ResourceGrant::Owner,
        ResourceGrant::Owner.privileges(),
    );
    assert_eq!(
        result.options,
        [
            GrantOption::Revoke,
            GrantOption::Level(ResourceGrant::Reader),
            GrantOption::Level(ResourceGrant::Writer),
            GrantOption::Level(ResourceGrant::Owner),
        ]
    );
    assert_eq!(result.current, ResourceGrant::Owner);
    assert!(!result.read_only);
}

#[test]
fn bare_read_privilege_degenerates_to_locked_current_value() {
    // can_read alone does not cover can_share_read, so even the
    // subject's own level is out of reach.
    let privileges = HashSet::from([ResourcePrivilege::CanRead]);
    let result =
        resolve_grant_options(ResourceGrant::hierarchy(), ResourceGrant::Reader, &privileges);
    assert_eq!(result.options, [GrantOption::Level(ResourceGrant::Reader)]);
    assert!(result.read_only);
}

#[test]
fn resolution_is_idempotent() {
    let first = resolve_grant_options(
        ResourceGrant::hierarchy(),
        ResourceGrant::Writer,
        ResourceGrant::Writer.privileges(),
    );
    let second = resolve_grant_options(
        ResourceGrant::hierarchy(),
        ResourceGrant::Writer,
        ResourceGrant::Writer.privileges(),
    );
    assert_eq!(first, second);
}

#[test]
fn resolution_result_serializes_for_the_view_layer() {
    let result = resolve_grant_options(
        ResourceGrant::hierarchy(),
        ResourceGrant::Reader,
        ResourceGrant::Writer.privileges(),
    );
    let json = serde_json::to_value(&result).expect("serializes");
    assert_eq!(json["current"], "READER");
    assert_eq!(json["read_only"], false);
    assert_eq!(json["options"][0]["level"], "READER");
}

#[test]
fn offered_options_pass_the_assignment_rules() {
    // Whatever the resolver offers a writer for a reader subject must
    // also clear the write-side checks (owner count permitting).
    let alice = user("alice");
    let bob = user("bob");
    let privileges = ResourceGrant::Writer.privileges();
    let result =
        resolve_grant_options(ResourceGrant::hierarchy(), ResourceGrant::Reader, privileges);
    assert!(!result.read_only);

    for target in result.options {
        let decision = check_assignment(
            ResourceGrant::hierarchy(),
            &AssignmentRequest {
                issuer: alice,
                issuer_grant: Some(ResourceGrant::Writer),
                issuer_is_admin: false,
                issuer_privileges: privileges,
                subject: bob.into(),
                subject_grant: Some(ResourceGrant::Reader),
                owner_count: 1,
                target,
            },
        );
        assert_matches!(decision, AssignmentDecision::Granted);
    }
}

#[test]
fn revocation_offered_to_owner_is_blocked_for_the_last_owner() {
    // The resolver offers Revoke to an owner looking at another owner,
    // but the write-side last-owner rule still rejects it. The two
    // layers are deliberately separate: offerability is per-subject,
    // membership protection needs the owner count.
    let alice = user("alice");
    let bob = user("bob");
    let privileges = ResourceGrant::Owner.privileges();
    let result =
        resolve_grant_options(ResourceGrant::hierarchy(), ResourceGrant::Owner, privileges);
    assert!(result.options.contains(&GrantOption::Revoke));

    let decision = check_assignment(
        ResourceGrant::hierarchy(),
        &AssignmentRequest {
            issuer: alice,
            issuer_grant: Some(ResourceGrant::Owner),
            issuer_is_admin: false,
            issuer_privileges: privileges,
            subject: bob.into(),
            subject_grant: Some(ResourceGrant::Owner),
            owner_count: 1,
            target: GrantOption::Revoke,
        },
    );
    assert_matches!(decision, AssignmentDecision::Denied { .. });
}
