//! # Kardex API
//!
//! API REST para la administracion de registros de alumnos, con un flujo de
//! autenticacion y registro de usuarios con control de acceso por rol
//! (ADMIN, COORDINADOR, ALUMNO).
//!
//! ## Arquitectura
//!
//! El codigo sigue una estructura modular por funcionalidad:
//!
//! ```text
//! src/
//! ├── config/          # Configuracion por variables de entorno
//! ├── middleware/      # Validacion de token y filtro de roles
//! ├── modules/
//! │   ├── alumnos/     # CRUD de alumnos con soft-delete
//! │   └── auth/        # Login, registro y roles
//! ├── storage/         # Colecciones JSON respaldadas en archivo
//! └── utils/           # Errores, jwt, password, matricula, edad
//! ```
//!
//! Cada modulo de funcionalidad se compone de `controller.rs` (handlers
//! HTTP), `service.rs` (reglas de negocio), `repository.rs` (persistencia),
//! `model.rs` (entidades y DTOs) y `router.rs`.
//!
//! ## Persistencia
//!
//! Las colecciones (`alumnos.json`, `usuarios.json`) viven como arreglos
//! JSON en disco bajo `KARDEX_DATA_DIR` y se reescriben completas en cada
//! mutacion. La eliminacion de alumnos es logica: el registro se marca con
//! `isDeleted`/`deletedAt` y desaparece de todas las lecturas por defecto.
//!
//! ## Autorizacion
//!
//! Las rutas de alumnos requieren un header `Authorization` cuyo contenido
//! determina el rol por convencion (`tipo1`/`tipo2`/`tipo3`); cada ruta
//! aplica ademas su propio conjunto de roles permitidos. El login emite un
//! token JWT con el id, email y rol del usuario.

pub mod config;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod storage;
pub mod utils;
