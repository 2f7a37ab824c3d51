use regex::Regex;
use std::sync::LazyLock;

/// Chequeo basico de formato de email: parte local no vacia, un `@`, un
/// punto en el dominio y sin espacios en blanco.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
