pub mod image;
pub mod logo;
pub mod user;

pub use image::{GeneratedImage, ImageFormat};
pub use logo::{ColorPalette, LogoForm, LogoRecord, LogoRequest, NewLogo, Theme};
pub use user::{CredentialsForm, SessionUser, UserAccount};
