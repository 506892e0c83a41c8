//! Query helpers restricting rows to a single customer domain.

use sea_orm::sea_query::SelectStatement;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect, QueryTrait};
use uuid::Uuid;

use crate::entities::user;

/// Sub-select of every user id belonging to `domain_id`.
///
/// Owner-scoped tables filter with `owner_column.in_subquery(...)`.
pub fn domain_user_ids(domain_id: Uuid) -> SelectStatement {
    user::Entity::find()
        .select_only()
        .column(user::Column::Id)
        .filter(user::Column::DomainId.eq(domain_id))
        .into_query()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::PostgresQueryBuilder;

    #[test]
    fn test_domain_user_ids_selects_ids_only() {
        let domain_id = Uuid::nil();
        let sql = domain_user_ids(domain_id).to_string(PostgresQueryBuilder);
        assert!(sql.starts_with(r#"SELECT "users"."id" FROM "users""#));
        assert!(sql.contains(r#""users"."domain_id" = '00000000-0000-0000-0000-000000000000'"#));
    }
}
