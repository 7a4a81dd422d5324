pub mod io;
pub mod rgb;
pub mod traits;

pub use self::io::RgbImageBuf;
pub use self::rgb::ImageRgb8;
pub use self::traits::{ImageView, Rows};
