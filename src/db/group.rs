use std::collections::HashMap;

use crate::db::portal_db::PortalDb;
use crate::types::{error::AppError, group::GroupView};
use crate::utils::token;
use chrono::Utc;
use entity::group::{ActiveModel as GroupActive, Column, Entity as Group, Model as GroupModel};
use entity::role::Role;
use entity::submission::{Column as SubmissionColumn, Entity as Submission, Model as SubmissionModel};
use entity::user::{Column as UserColumn, Entity as User};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

impl PortalDb {
    pub async fn count_groups(&self) -> Result<u64, AppError> {
        Ok(Group::find().count(&self.database_connection).await?)
    }

    pub async fn create_group(&self, name: String, leader_name: Option<String>) -> Result<GroupModel, AppError> {
        let group = GroupActive {
            id: Set(token::new_id()),
            name: Set(name),
            leader_name: Set(leader_name),
            created_at: Set(Utc::now()),
        };
        Ok(group.insert(&self.database_connection).await?)
    }

    pub async fn get_group(&self, id: Uuid) -> Result<GroupModel, AppError> {
        Ok(Group::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Group not found".to_string()))?)
    }

    pub async fn get_group_view(&self, id: Uuid) -> Result<GroupView, AppError> {
        let group = self.get_group(id).await?;
        let members = self.count_members_in_group(id).await?;
        Ok(GroupView::new(group, members))
    }

    /// Every group with its member count, newest first.
    pub async fn list_groups(&self) -> Result<Vec<GroupView>, AppError> {
        let groups = Group::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.database_connection)
            .await?;

        let counts: HashMap<Uuid, i64> = User::find()
            .select_only()
            .column(UserColumn::GroupId)
            .column_as(Expr::col(UserColumn::Id).count(), "member_count")
            .filter(UserColumn::GroupId.is_not_null())
            .group_by(UserColumn::GroupId)
            .into_tuple::<(Uuid, i64)>()
            .all(&self.database_connection)
            .await?
            .into_iter()
            .collect();

        Ok(groups
            .into_iter()
            .map(|g| {
                let members = counts.get(&g.id).copied().unwrap_or(0).max(0) as u64;
                GroupView::new(g, members)
            })
            .collect())
    }

    pub async fn update_group(
        &self,
        id: Uuid,
        name: Option<String>,
        leader_name: Option<String>,
    ) -> Result<GroupModel, AppError> {
        let current = self.get_group(id).await?;
        if name.is_none() && leader_name.is_none() {
            return Ok(current);
        }
        let mut am: GroupActive = current.into();
        if let Some(name) = name {
            am.name = Set(name);
        }
        if let Some(leader_name) = leader_name {
            am.leader_name = Set(Some(leader_name));
        }
        Ok(am.update(&self.database_connection).await?)
    }

    /// Detaches members (leaders step down to member) and drops the group's
    /// submissions along with it. Returns the group and the removed submissions
    /// so the caller can clean up stored files.
    pub async fn delete_group(&self, id: Uuid) -> Result<(GroupModel, Vec<SubmissionModel>), AppError> {
        let txn = self.database_connection.begin().await?;
        let group = Group::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Group not found".into()))?;

        User::update_many()
            .col_expr(UserColumn::Role, Expr::value(Role::Member))
            .filter(UserColumn::GroupId.eq(id))
            .filter(UserColumn::Role.eq(Role::Leader))
            .exec(&txn)
            .await?;
        User::update_many()
            .col_expr(UserColumn::GroupId, Expr::value(Option::<Uuid>::None))
            .col_expr(UserColumn::IsApproved, Expr::value(false))
            .filter(UserColumn::GroupId.eq(id))
            .exec(&txn)
            .await?;

        let submissions = Submission::find()
            .filter(SubmissionColumn::GroupId.eq(id))
            .all(&txn)
            .await?;
        Submission::delete_many()
            .filter(SubmissionColumn::GroupId.eq(id))
            .exec(&txn)
            .await?;

        Group::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok((group, submissions))
    }
}
