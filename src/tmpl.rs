//! HTML templates, embedded in the binary and compiled once at startup.

use once_cell::sync::Lazy;
use tera::Tera;

/// Compiled template set.
///
/// Template sources are embedded with `include_str!`, so a syntax error shows
/// up the first time any handler renders, not at some later deploy.
pub static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_template("index.html", include_str!("../templates/index.html"))
        .expect("embedded index.html template is well-formed");
    tera
});
