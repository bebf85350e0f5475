//! OpenAPI documentation, served at `/swagger-ui` and `/scalar`.

use utoipa::OpenApi;

use crate::modules::lessons::controller as lessons;
use crate::modules::lessons::model::{
    CreateLessonDto, Lesson, LessonWithUsers, PaginatedLessonsResponse, UpdateLessonDto,
};
use crate::modules::packages::controller as packages;
use crate::modules::packages::model::{
    CreatePackageDto, Package, PaginatedPackagesResponse, UpdatePackageDto,
};
use crate::modules::roles::controller as roles;
use crate::modules::roles::model::{
    Role, RoleAssignmentDto, RolesIndexResponse, UserRolesResponse, UserWithRoles,
};
use crate::modules::units::controller as units;
use crate::modules::units::model::{CreateUnitDto, PaginatedUnitsResponse, Unit, UpdateUnitDto};
use crate::modules::users::controller as users;
use crate::modules::users::model::{
    CreateUserDto, PaginatedUsersResponse, UpdateUserDto, User, UserSummary,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ClassTrack API",
        description = "Education management: lessons, users, roles, units and packages.",
        version = "1.0.0"
    ),
    paths(
        lessons::index,
        lessons::store,
        lessons::show,
        lessons::update,
        lessons::destroy,
        users::index,
        users::store,
        users::show,
        users::update,
        users::destroy,
        units::index,
        units::store,
        units::show,
        units::update,
        units::destroy,
        packages::index,
        packages::store,
        packages::show,
        packages::update,
        packages::destroy,
        roles::index,
        roles::assign_role,
        roles::remove_role,
        roles::get_user_roles,
    ),
    components(schemas(
        Lesson,
        LessonWithUsers,
        CreateLessonDto,
        UpdateLessonDto,
        PaginatedLessonsResponse,
        User,
        UserSummary,
        CreateUserDto,
        UpdateUserDto,
        PaginatedUsersResponse,
        Unit,
        CreateUnitDto,
        UpdateUnitDto,
        PaginatedUnitsResponse,
        Package,
        CreatePackageDto,
        UpdatePackageDto,
        PaginatedPackagesResponse,
        Role,
        RoleAssignmentDto,
        RolesIndexResponse,
        UserRolesResponse,
        UserWithRoles,
    )),
    tags(
        (name = "Lessons", description = "Lesson management with staff/student association sync"),
        (name = "Users", description = "User management"),
        (name = "Units", description = "Units of competency reference data"),
        (name = "Packages", description = "Training package reference data"),
        (name = "Roles", description = "Role assignment"),
    )
)]
pub struct ApiDoc;
