//! [`Department`]-related endpoints.

use axum::Json;
use serde::Serialize;
use service::{domain, query, Query as _};
use uuid::Uuid;

use crate::{define_error, AsError, Context, Error};

/// Department offering vacancies, as exposed by the API.
#[derive(Clone, Debug, Serialize)]
pub struct Department {
    /// ID of this [`Department`].
    pub id: Uuid,

    /// Name of this [`Department`].
    pub name: String,
}

impl From<domain::Department> for Department {
    fn from(d: domain::Department) -> Self {
        Self {
            id: d.id.into(),
            name: d.name.to_string(),
        }
    }
}

/// Lists all the [`Department`]s ordered by their names.
#[tracing::instrument(skip_all)]
pub async fn list(ctx: Context) -> Result<Json<Vec<Department>>, Error> {
    let departments = ctx
        .service()
        .execute(query::department::List::by(()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(departments.into_iter().map(Into::into).collect()))
}

define_error! {
    enum DepartmentError {
        #[code = "DEPARTMENT_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Department not found"]
        NotExists,
    }
}
