pub mod alumnos;
pub mod auth;
