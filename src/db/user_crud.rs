use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::models::{NewUser, User};

use super::DbError;

pub(crate) async fn insert_user(
    conn: &mut AsyncPgConnection,
    new_user: &NewUser,
) -> Result<User, DbError> {
    use crate::schema::users::dsl::users;

    let user = diesel::insert_into(users)
        .values(new_user)
        .returning(User::as_returning())
        .get_result(conn)
        .await?;

    Ok(user)
}

pub(crate) async fn find_user_by_id(
    conn: &mut AsyncPgConnection,
    user_id: i32,
) -> Result<Option<User>, DbError> {
    use crate::schema::users::dsl::*;

    let user = users
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .await
        .optional()?;

    Ok(user)
}

pub(crate) async fn list_users(conn: &mut AsyncPgConnection) -> Result<Vec<User>, DbError> {
    use crate::schema::users::dsl::*;

    let rows = users
        .order(id.asc())
        .select(User::as_select())
        .load(conn)
        .await?;

    Ok(rows)
}
