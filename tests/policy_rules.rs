use chrono::Utc;
use entity::role::Role;
use entity::submission::Model as SubmissionModel;
use entity::user::Model as UserModel;
use group_portal::policy::{self, MAX_TEAM_MEMBERS};
use group_portal::types::error::AppError;
use uuid::Uuid;

fn user(role: Role, group_id: Option<Uuid>, is_approved: bool) -> UserModel {
    UserModel {
        id: Uuid::new_v4(),
        email: format!("{}@test.com", Uuid::new_v4()),
        name: format!("{role} user"),
        role,
        password_hash: None,
        group_id,
        is_approved,
        created_at: Utc::now(),
    }
}

fn submission(group_id: Uuid, uploaded_by: Option<Uuid>) -> SubmissionModel {
    SubmissionModel {
        id: Uuid::new_v4(),
        group_id,
        title: "Report".into(),
        file_url: None,
        submitted_at: Utc::now(),
        uploaded_by,
    }
}

fn forbidden_message(res: Result<(), AppError>) -> String {
    match res {
        Err(AppError::Forbidden(msg)) => msg,
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

#[test]
fn owner_passes_every_role_gate() {
    let owner = user(Role::Owner, None, true);
    assert!(policy::require_role(&owner, &[Role::Leader]).is_ok());
    assert!(policy::require_role(&owner, &[]).is_ok());

    let admin = user(Role::Admin, None, true);
    assert!(policy::require_role(&admin, &[Role::Admin]).is_ok());
    assert!(policy::require_role(&admin, &[Role::Leader]).is_err());
}

#[test]
fn role_assignment_hierarchy() {
    let owner = user(Role::Owner, None, true);
    let admin = user(Role::Admin, None, true);
    let other_admin = user(Role::Admin, None, true);
    let leader = user(Role::Leader, Some(Uuid::new_v4()), true);
    let member = user(Role::Member, None, false);

    assert!(policy::check_role_assignment(&admin, &member, Role::Leader).is_ok());
    assert!(policy::check_role_assignment(&owner, &admin, Role::Owner).is_ok());

    assert_eq!(
        forbidden_message(policy::check_role_assignment(&admin, &admin, Role::Member)),
        "You cannot change your own role"
    );
    assert_eq!(
        forbidden_message(policy::check_role_assignment(&admin, &member, Role::Owner)),
        "Only owner can assign owner role"
    );
    assert_eq!(
        forbidden_message(policy::check_role_assignment(&admin, &owner, Role::Member)),
        "Cannot modify owner account"
    );
    assert_eq!(
        forbidden_message(policy::check_role_assignment(&admin, &other_admin, Role::Member)),
        "Admins cannot modify other admins"
    );
    assert!(policy::check_role_assignment(&leader, &member, Role::Member).is_err());
}

#[test]
fn leader_needs_a_group() {
    let group = Uuid::new_v4();
    let loner = user(Role::Member, None, false);
    let placed = user(Role::Member, Some(group), false);

    assert_eq!(
        forbidden_message(policy::resolve_role_group(&loner, Role::Leader, None).map(|_| ())),
        "Leader must belong to a team"
    );
    assert_eq!(policy::resolve_role_group(&placed, Role::Leader, None).unwrap(), Some(group));

    let requested = Uuid::new_v4();
    assert_eq!(
        policy::resolve_role_group(&placed, Role::Member, Some(requested)).unwrap(),
        Some(requested)
    );
    assert_eq!(policy::resolve_role_group(&loner, Role::Admin, None).unwrap(), None);
}

#[test]
fn single_leader_names_the_incumbent() {
    let group = Uuid::new_v4();
    let incumbent = user(Role::Leader, Some(group), true);
    let challenger = user(Role::Member, Some(group), true);

    assert!(policy::check_single_leader(challenger.id, None).is_ok());
    assert!(policy::check_single_leader(incumbent.id, Some(&incumbent)).is_ok());

    let msg = forbidden_message(policy::check_single_leader(challenger.id, Some(&incumbent)));
    assert!(msg.contains(&incumbent.name));
}

#[test]
fn capacity_boundary() {
    assert!(policy::check_capacity(0).is_ok());
    assert!(policy::check_capacity(MAX_TEAM_MEMBERS - 1).is_ok());
    assert_eq!(
        forbidden_message(policy::check_capacity(MAX_TEAM_MEMBERS)),
        "Team is full. Maximum 10 members allowed per team."
    );
    assert!(policy::check_capacity(MAX_TEAM_MEMBERS + 3).is_err());
}

#[test]
fn upload_gate() {
    let group = Uuid::new_v4();
    let other = Uuid::new_v4();

    assert!(policy::check_upload(&user(Role::Admin, None, false), other).is_ok());
    assert!(policy::check_upload(&user(Role::Owner, None, false), other).is_ok());
    assert!(policy::check_upload(&user(Role::Leader, Some(group), false), group).is_ok());
    assert!(policy::check_upload(&user(Role::Member, Some(group), true), group).is_ok());

    assert!(policy::check_upload(&user(Role::Leader, Some(group), true), other).is_err());
    assert!(policy::check_upload(&user(Role::Member, Some(group), true), other).is_err());
    assert!(policy::check_upload(&user(Role::Member, None, true), group).is_err());

    let msg = forbidden_message(policy::check_upload(&user(Role::Member, Some(group), false), group));
    assert!(msg.contains("approved by your team leader"));
}

#[test]
fn moderation_stays_inside_the_group() {
    let group = Uuid::new_v4();
    let leader = user(Role::Leader, Some(group), true);
    let teammate = user(Role::Member, Some(group), false);
    let outsider = user(Role::Member, Some(Uuid::new_v4()), false);
    let drifter = user(Role::Member, None, false);

    assert!(policy::check_group_moderation(&leader, &teammate).is_ok());
    assert!(policy::check_group_moderation(&leader, &outsider).is_err());
    assert!(policy::check_group_moderation(&leader, &drifter).is_err());
    assert!(policy::check_group_moderation(&teammate, &teammate).is_err());
    assert!(policy::check_group_moderation(&user(Role::Admin, Some(group), true), &teammate).is_err());
    assert!(policy::check_group_moderation(&user(Role::Owner, Some(group), true), &teammate).is_ok());
}

#[test]
fn moderation_only_reaches_members() {
    let group = Uuid::new_v4();
    let leader = user(Role::Leader, Some(group), true);

    for role in [Role::Owner, Role::Admin, Role::Leader] {
        let msg = forbidden_message(policy::check_group_moderation(&leader, &user(role, Some(group), false)));
        assert!(msg.contains("members of your team"));
    }
    assert!(policy::check_group_moderation(&leader, &leader).is_err());
}

#[test]
fn team_change_rules() {
    let member = user(Role::Member, None, false);
    let other = user(Role::Member, None, false);
    let admin = user(Role::Admin, None, true);
    let owner = user(Role::Owner, None, true);

    assert!(policy::check_team_change(&member, &member).is_ok());
    assert!(policy::check_team_change(&member, &other).is_err());
    assert!(policy::check_team_change(&admin, &other).is_ok());
    assert!(policy::check_team_change(&admin, &owner).is_err());
    assert!(policy::check_team_change(&owner, &admin).is_ok());
}

#[test]
fn visibility_rules() {
    let group = Uuid::new_v4();
    let member = user(Role::Member, Some(group), false);
    let mate = user(Role::Member, Some(group), false);
    let stranger = user(Role::Member, Some(Uuid::new_v4()), false);
    let loner = user(Role::Member, None, false);
    let admin = user(Role::Admin, None, true);

    assert!(policy::check_group_view(&member, group).is_ok());
    assert!(policy::check_group_view(&stranger, group).is_err());
    assert!(policy::check_group_view(&admin, group).is_ok());

    assert!(policy::check_user_view(&member, &mate).is_ok());
    assert!(policy::check_user_view(&member, &stranger).is_err());
    assert!(policy::check_user_view(&loner, &loner).is_ok());
    assert!(policy::check_user_view(&loner, &user(Role::Member, None, false)).is_err());
    assert!(policy::check_user_view(&admin, &stranger).is_ok());
}

#[test]
fn submission_edit_rules() {
    let group = Uuid::new_v4();
    let uploader = user(Role::Member, Some(group), true);
    let mate = user(Role::Member, Some(group), true);
    let leader = user(Role::Leader, Some(group), true);
    let foreign_leader = user(Role::Leader, Some(Uuid::new_v4()), true);
    let s = submission(group, Some(uploader.id));

    assert!(policy::check_submission_edit(&uploader, &s).is_ok());
    assert!(policy::check_submission_edit(&leader, &s).is_ok());
    assert!(policy::check_submission_edit(&user(Role::Admin, None, true), &s).is_ok());
    assert!(policy::check_submission_edit(&mate, &s).is_err());
    assert!(policy::check_submission_edit(&foreign_leader, &s).is_err());
}

#[test]
fn profile_and_removal_rules() {
    let member = user(Role::Member, None, false);
    let other = user(Role::Member, None, false);
    let admin = user(Role::Admin, None, true);
    let owner = user(Role::Owner, None, true);

    assert!(policy::check_profile_edit(&member, &member).is_ok());
    assert!(policy::check_profile_edit(&member, &other).is_err());
    assert!(policy::check_profile_edit(&admin, &other).is_ok());
    assert!(policy::check_profile_edit(&admin, &owner).is_err());
    assert!(policy::check_profile_edit(&owner, &owner).is_ok());

    assert!(policy::check_user_removal(&admin, &other).is_ok());
    assert!(policy::check_user_removal(&admin, &admin).is_err());
    assert!(policy::check_user_removal(&admin, &owner).is_err());
    assert!(policy::check_user_removal(&owner, &admin).is_ok());
    assert!(policy::check_user_removal(&member, &other).is_err());
}
