use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct StudentDoc {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    /// `MALE` or `FEMALE`
    #[schema(example = "MALE")]
    pub gender: String,
}

#[derive(ToSchema)]
pub struct NewStudentDoc {
    pub name: String,
    pub email: String,
    /// `MALE` or `FEMALE`
    #[schema(example = "FEMALE")]
    pub gender: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::list_students,
        crate::routes::students::add_student,
        crate::routes::students::delete_student,
    ),
    components(
        schemas(
            HealthResponse,
            StudentDoc,
            NewStudentDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;
