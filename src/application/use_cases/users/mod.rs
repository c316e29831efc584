//! User Use Cases
//!
//! Accounts, authentication sessions and permissions.

mod authenticate_user;
mod delete_user;
mod ensure_admin;
mod get_user_profile;
mod logout;
mod register_user;
mod update_permission;
mod validate_session;

pub use authenticate_user::AuthenticateUserUseCase;
pub use delete_user::DeleteUserUseCase;
pub use ensure_admin::EnsureAdminUseCase;
pub use get_user_profile::GetUserProfileUseCase;
pub use logout::LogoutUseCase;
pub use register_user::RegisterUserUseCase;
pub use update_permission::UpdatePermissionUseCase;
pub use validate_session::ValidateSessionUseCase;
