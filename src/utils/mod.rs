pub mod edad;
pub mod email;
pub mod errors;
pub mod jwt;
pub mod matricula;
pub mod password;
