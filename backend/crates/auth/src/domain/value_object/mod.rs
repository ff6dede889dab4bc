//! Domain Value Objects

pub mod code_type;
pub mod login_method;
pub mod user_status;

pub use code_type::CodeType;
pub use login_method::LoginMethod;
pub use user_status::UserStatus;
