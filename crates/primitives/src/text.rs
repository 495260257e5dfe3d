//! Text-like data objects: `string`, `char`, `bytes`, `regex`

use once_cell::sync::Lazy;
use phi_engine::{Template, DATA_ATTR};

static STRING: Lazy<Template> = Lazy::new(|| Template::builder("string").free(DATA_ATTR).build());
static CHAR: Lazy<Template> = Lazy::new(|| Template::builder("char").free(DATA_ATTR).build());
static BYTES: Lazy<Template> = Lazy::new(|| Template::builder("bytes").free(DATA_ATTR).build());
static REGEX: Lazy<Template> = Lazy::new(|| Template::builder("regex").free(DATA_ATTR).build());

/// The `string` data object
pub fn string() -> Template {
    STRING.clone()
}

/// The `char` data object
pub fn character() -> Template {
    CHAR.clone()
}

/// The `bytes` data object
pub fn bytes() -> Template {
    BYTES.clone()
}

/// The `regex` data object
pub fn regex() -> Template {
    REGEX.clone()
}
