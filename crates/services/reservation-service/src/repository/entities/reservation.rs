//! Reservation database entity for SeaORM.

use sea_orm::entity::prelude::*;

use common::AppResult;
use domain::{Reservation, ReservationType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub reservation_time: DateTimeUtc,
    #[sea_orm(column_name = "type")]
    pub reservation_type: i32,
    pub no_of_guests: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::UserId",
        to = "super::employee::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain entity, taking the display name from the owner row.
    ///
    /// Fails if the stored type ordinal is outside the known meal slots.
    pub fn into_domain(self, owner: Option<super::employee::Model>) -> AppResult<Reservation> {
        Ok(Reservation {
            id: self.id,
            user_id: self.user_id,
            name: owner.map(|o| o.name).unwrap_or_default(),
            reservation_time: self.reservation_time,
            reservation_type: ReservationType::try_from(self.reservation_type)?,
            no_of_guests: self.no_of_guests,
            created_at: self.created_at,
        })
    }
}
