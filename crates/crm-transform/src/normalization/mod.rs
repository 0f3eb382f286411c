//! Single-field normalizers.
//!
//! Each function is total: malformed input yields a deterministic value or a
//! typed failure variant, never an error.
//!
//! - **phone**: digit extraction and the `(DD)9DDDDDDDD` template
//! - **name**: prefix stripping, letter filtering, diacritic removal
//! - **datetime**: permissive date parsing to `YYYY-MM-DD`

pub mod datetime;
pub mod name;
pub mod phone;

pub use datetime::{canonicalize_date, parse_registration_date};
pub use name::{clean_name_text, strip_diacritics};
pub use phone::{PHONE_DIGIT_WINDOW, canonicalize_phone};
