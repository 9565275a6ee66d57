pub mod auth;
pub mod generate;
pub mod health;
pub mod logos;
pub mod session;

pub use auth::{index, login, login_form, logout, signup, signup_form};
pub use generate::{generate_form, generate_logo};
pub use health::health_check;
pub use logos::list_logos;
