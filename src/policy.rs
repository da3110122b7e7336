//! Authorization and role-transition rules.
//!
//! Everything here is a pure check over rows that the caller already loaded,
//! so the route handlers stay a sequence of "load, check, write" steps and the
//! rules themselves can be exercised without a database.

use entity::role::Role;
use entity::submission::Model as SubmissionModel;
use entity::user::Model as UserModel;
use uuid::Uuid;

use crate::types::error::AppError;

/// Hard cap on users per group.
pub const MAX_TEAM_MEMBERS: u64 = 10;

pub fn is_elevated(role: Role) -> bool {
    matches!(role, Role::Owner | Role::Admin)
}

/// Route-level gate. The owner passes every gate; everybody else has to be listed.
pub fn require_role(actor: &UserModel, allowed: &[Role]) -> Result<(), AppError> {
    if actor.role == Role::Owner || allowed.contains(&actor.role) {
        return Ok(());
    }
    Err(AppError::forbidden("You do not have permission to perform this action"))
}

/// Who may put `new_role` on `target`.
pub fn check_role_assignment(actor: &UserModel, target: &UserModel, new_role: Role) -> Result<(), AppError> {
    require_role(actor, &[Role::Admin])?;

    if actor.id == target.id {
        return Err(AppError::forbidden("You cannot change your own role"));
    }
    if new_role == Role::Owner && actor.role != Role::Owner {
        return Err(AppError::forbidden("Only owner can assign owner role"));
    }
    if target.role == Role::Owner && actor.role != Role::Owner {
        return Err(AppError::forbidden("Cannot modify owner account"));
    }
    if target.role == Role::Admin && actor.role == Role::Admin {
        return Err(AppError::forbidden("Admins cannot modify other admins"));
    }
    Ok(())
}

/// Group the target ends up in after a role change. Leaders need one.
pub fn resolve_role_group(target: &UserModel, new_role: Role, requested: Option<Uuid>) -> Result<Option<Uuid>, AppError> {
    let group = requested.or(target.group_id);
    if new_role == Role::Leader && group.is_none() {
        return Err(AppError::forbidden("Leader must belong to a team"));
    }
    Ok(group)
}

/// One leader per team. Re-confirming the current leader is fine.
pub fn check_single_leader(target_id: Uuid, existing_leader: Option<&UserModel>) -> Result<(), AppError> {
    match existing_leader {
        Some(leader) if leader.id != target_id => Err(AppError::forbidden(format!(
            "Team already has a leader: {}. Please remove the current leader first.",
            leader.name
        ))),
        _ => Ok(()),
    }
}

pub fn check_capacity(member_count: u64) -> Result<(), AppError> {
    if member_count >= MAX_TEAM_MEMBERS {
        return Err(AppError::forbidden(format!(
            "Team is full. Maximum {MAX_TEAM_MEMBERS} members allowed per team."
        )));
    }
    Ok(())
}

/// Users move themselves; admin and owner may move anybody but the owner.
pub fn check_team_change(actor: &UserModel, target: &UserModel) -> Result<(), AppError> {
    if actor.id == target.id {
        return Ok(());
    }
    if !is_elevated(actor.role) {
        return Err(AppError::forbidden("You can only change your own team"));
    }
    if target.role == Role::Owner && actor.role != Role::Owner {
        return Err(AppError::forbidden("Cannot modify owner account"));
    }
    Ok(())
}

/// Approve / reject: a leader acting on a plain member of their own group.
/// Elevated accounts and other leaders can land in a group through join-team,
/// they are never subject to moderation.
pub fn check_group_moderation(actor: &UserModel, target: &UserModel) -> Result<(), AppError> {
    require_role(actor, &[Role::Leader])?;

    match (actor.group_id, target.group_id) {
        (Some(mine), Some(theirs)) if mine == theirs => {}
        (Some(_), Some(_)) => return Err(AppError::forbidden("You can only manage users in your own group")),
        _ => return Err(AppError::forbidden("Leader must belong to a team to manage users")),
    }

    if target.role != Role::Member {
        return Err(AppError::forbidden("You can only manage members of your team"));
    }

    Ok(())
}

/// The approval gate.
pub fn check_upload(actor: &UserModel, group_id: Uuid) -> Result<(), AppError> {
    if is_elevated(actor.role) {
        return Ok(());
    }
    if actor.group_id != Some(group_id) {
        return Err(AppError::forbidden("You can only upload to your own group"));
    }
    match actor.role {
        Role::Leader => Ok(()),
        _ if actor.is_approved => Ok(()),
        _ => Err(AppError::forbidden(
            "Your account must be approved by your team leader before uploading files",
        )),
    }
}

/// Profiles are visible to their owner, to elevated roles and to teammates.
pub fn check_user_view(actor: &UserModel, target: &UserModel) -> Result<(), AppError> {
    if actor.id == target.id || is_elevated(actor.role) {
        return Ok(());
    }
    match (actor.group_id, target.group_id) {
        (Some(mine), Some(theirs)) if mine == theirs => Ok(()),
        _ => Err(AppError::forbidden("You can only view members of your own group")),
    }
}

pub fn check_group_view(actor: &UserModel, group_id: Uuid) -> Result<(), AppError> {
    if is_elevated(actor.role) {
        return Ok(());
    }
    if actor.group_id != Some(group_id) {
        return Err(AppError::forbidden("You can only view your own group"));
    }
    Ok(())
}

/// Edit, replace or delete a submission: elevated roles, the uploader, or the
/// leader of the submission's group.
pub fn check_submission_edit(actor: &UserModel, submission: &SubmissionModel) -> Result<(), AppError> {
    if is_elevated(actor.role) || submission.uploaded_by == Some(actor.id) {
        return Ok(());
    }
    if actor.role == Role::Leader && actor.group_id == Some(submission.group_id) {
        return Ok(());
    }
    Err(AppError::forbidden("You cannot modify this submission"))
}

/// Profile edits: yourself, or an elevated role. Only the owner touches the owner.
pub fn check_profile_edit(actor: &UserModel, target: &UserModel) -> Result<(), AppError> {
    if actor.id == target.id {
        return Ok(());
    }
    if target.role == Role::Owner && actor.role != Role::Owner {
        return Err(AppError::forbidden("Cannot modify owner account"));
    }
    require_role(actor, &[Role::Admin])
}

pub fn check_user_removal(actor: &UserModel, target: &UserModel) -> Result<(), AppError> {
    require_role(actor, &[Role::Admin])?;
    if actor.id == target.id {
        return Err(AppError::forbidden("You cannot delete your own account"));
    }
    if target.role == Role::Owner && actor.role != Role::Owner {
        return Err(AppError::forbidden("Cannot modify owner account"));
    }
    Ok(())
}
