use chrono::{NaiveDate, Utc};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::modules::alumnos::model::{
    ActualizarAlumnoDto, Alumno, CrearAlumnoDto, Estado, parsear_fecha,
};
use crate::modules::alumnos::repository::AlumnoRepository;
use crate::utils::edad::calcular_edad;
use crate::utils::errors::{AppError, formatear_errores};
use crate::utils::matricula::generar_matricula;

/// Edad minima (exclusiva) para registrar un alumno.
const EDAD_MINIMA: u32 = 15;

/// Intentos de generacion de matricula antes de aceptar la ultima candidata.
const REINTENTOS_MATRICULA: usize = 5;

/// Reglas de negocio de alumnos por encima del repositorio: validacion en
/// lote, campos derivados y semantica de soft-delete.
#[derive(Clone)]
pub struct AlumnoService {
    repo: AlumnoRepository,
}

impl AlumnoService {
    pub fn new(repo: AlumnoRepository) -> Self {
        Self { repo }
    }

    /// Valida y persiste un alumno nuevo. Los errores de validacion se
    /// acumulan para reportarse todos en una sola respuesta.
    #[instrument(skip(self, dto))]
    pub async fn crear_alumno(&self, dto: CrearAlumnoDto) -> Result<Alumno, AppError> {
        let mut errores = match dto.validate() {
            Ok(()) => Vec::new(),
            Err(e) => formatear_errores(&e),
        };

        requerido(&dto.nombre, "El nombre es obligatorio", &mut errores);
        requerido(
            &dto.apellido_paterno,
            "El apellidoPaterno es obligatorio",
            &mut errores,
        );
        requerido(
            &dto.apellido_materno,
            "El apellidoMaterno es obligatorio",
            &mut errores,
        );
        requerido(&dto.email, "El email es obligatorio", &mut errores);
        requerido(
            &dto.carrera_programa,
            "La carreraPrograma es obligatoria",
            &mut errores,
        );
        if dto.semestre.is_none() {
            errores.push("El semestre es obligatorio".to_string());
        }

        let fecha_nacimiento = fecha_requerida(
            &dto.fecha_nacimiento,
            "La fechaNacimiento es obligatoria",
            &mut errores,
        );
        let fecha_ingreso = fecha_requerida(
            &dto.fecha_ingreso,
            "La fechaIngreso es obligatoria",
            &mut errores,
        );

        if let Some(nacimiento) = fecha_nacimiento {
            if calcular_edad(nacimiento) <= EDAD_MINIMA {
                errores.push(format!("El alumno debe ser mayor de {} años", EDAD_MINIMA));
            }
        }

        if let Some(email) = dto.email.as_deref() {
            if self.repo.buscar_por_email(email).await.is_some() {
                errores.push("El email ya esta registrado.".to_string());
            }
        }

        if !errores.is_empty() {
            return Err(AppError::validacion(errores));
        }

        // Despues de la validacion todos los campos requeridos existen.
        let nombre = dto.nombre.unwrap_or_default();
        let apellido_paterno = dto.apellido_paterno.unwrap_or_default();
        let fecha_ingreso = fecha_ingreso.unwrap_or_default();
        let ahora = Utc::now();

        let matricula = self
            .generar_matricula_unica(fecha_ingreso, &nombre, &apellido_paterno)
            .await;

        let alumno = Alumno {
            id: Uuid::new_v4(),
            matricula,
            nombre,
            apellido_paterno,
            apellido_materno: dto.apellido_materno.unwrap_or_default(),
            fecha_nacimiento: fecha_nacimiento.unwrap_or_default(),
            email: dto.email.unwrap_or_default().to_lowercase(),
            carrera_programa: dto.carrera_programa.unwrap_or_default(),
            semestre: dto.semestre.unwrap_or_default(),
            fecha_ingreso,
            telefono: dto.telefono,
            perfil: dto.perfil,
            estado: Estado::Activo,
            materias_inscritas: Vec::new(),
            created_at: ahora,
            updated_at: ahora,
            is_deleted: false,
            deleted_at: None,
        };

        Ok(self.repo.guardar(alumno).await?)
    }

    pub async fn obtener_todos(&self) -> Vec<Alumno> {
        self.repo.obtener_todos().await
    }

    pub async fn obtener_alumno(&self, id: Uuid) -> Option<Alumno> {
        self.repo
            .obtener_por_id(id)
            .await
            .map(|registro| registro.alumno)
    }

    /// Aplica un parche campo por campo sobre el registro actual y lo
    /// revalida como en la creacion, permitiendo el email propio. El id, la
    /// matricula, la fecha de ingreso y la fecha de creacion se preservan.
    #[instrument(skip(self, dto))]
    pub async fn actualizar_alumno(
        &self,
        id: Uuid,
        dto: ActualizarAlumnoDto,
    ) -> Result<Alumno, AppError> {
        let registro = self.repo.obtener_por_id(id).await.ok_or_else(|| {
            AppError::no_encontrado(format!("No se encontro el alumno con el id: {}", id))
        })?;

        let mut errores = match dto.validate() {
            Ok(()) => Vec::new(),
            Err(e) => formatear_errores(&e),
        };

        let mut alumno = registro.alumno;

        aplicar_texto(dto.nombre, &mut alumno.nombre, "El nombre es obligatorio", &mut errores);
        aplicar_texto(
            dto.apellido_paterno,
            &mut alumno.apellido_paterno,
            "El apellidoPaterno es obligatorio",
            &mut errores,
        );
        aplicar_texto(
            dto.apellido_materno,
            &mut alumno.apellido_materno,
            "El apellidoMaterno es obligatorio",
            &mut errores,
        );
        aplicar_texto(
            dto.carrera_programa,
            &mut alumno.carrera_programa,
            "La carreraPrograma es obligatoria",
            &mut errores,
        );

        if let Some(valor) = dto.fecha_nacimiento.as_deref() {
            match parsear_fecha(valor) {
                Some(fecha) => alumno.fecha_nacimiento = fecha,
                None => errores.push("La fecha no tiene un formato valido".to_string()),
            }
        }
        if calcular_edad(alumno.fecha_nacimiento) <= EDAD_MINIMA {
            errores.push(format!("El alumno debe ser mayor de {} años", EDAD_MINIMA));
        }

        if let Some(email) = dto.email.as_deref() {
            alumno.email = email.to_lowercase();
        }
        // El email (posiblemente nuevo) no puede pertenecer a otro alumno.
        if let Some(existente) = self.repo.buscar_por_email(&alumno.email).await {
            if existente.id != alumno.id {
                errores.push("El email ya esta registrado.".to_string());
            }
        }

        if let Some(semestre) = dto.semestre {
            alumno.semestre = semestre;
        }
        if let Some(telefono) = dto.telefono {
            alumno.telefono = Some(telefono);
        }
        if let Some(perfil) = dto.perfil {
            alumno.perfil = Some(perfil);
        }
        if let Some(estado) = dto.estado.as_deref() {
            if let Err(mensaje) = alumno.cambiar_estado(estado) {
                errores.push(mensaje);
            }
        }
        if let Some(materias) = dto.materias_inscritas {
            alumno.materias_inscritas.clear();
            for materia in &materias {
                alumno.inscribir_materia(materia);
            }
        }

        if !errores.is_empty() {
            return Err(AppError::validacion(errores));
        }

        alumno.updated_at = Utc::now();
        Ok(self.repo.actualizar(registro.indice, alumno).await?)
    }

    /// Soft-delete: devuelve el registro tal como estaba antes de marcarse.
    #[instrument(skip(self))]
    pub async fn eliminar_alumno(&self, id: Uuid) -> Result<Alumno, AppError> {
        let registro = self.repo.obtener_por_id(id).await.ok_or_else(|| {
            AppError::no_encontrado(format!("No se encontro un alumno con el id: {}", id))
        })?;

        let eliminado = self.repo.eliminar(registro.indice).await?;
        eliminado.ok_or_else(|| {
            AppError::no_encontrado(format!("No se encontro un alumno con el id: {}", id))
        })
    }

    /// La matricula lleva un sufijo aleatorio de 3 digitos, asi que puede
    /// colisionar; se reintenta un numero acotado de veces contra el
    /// repositorio antes de aceptar la ultima candidata.
    async fn generar_matricula_unica(
        &self,
        fecha_ingreso: NaiveDate,
        nombre: &str,
        apellido_paterno: &str,
    ) -> String {
        let mut candidata = generar_matricula(fecha_ingreso, nombre, apellido_paterno);
        for _ in 1..REINTENTOS_MATRICULA {
            if self.repo.buscar_por_matricula(&candidata).await.is_none() {
                break;
            }
            candidata = generar_matricula(fecha_ingreso, nombre, apellido_paterno);
        }
        candidata
    }
}

fn requerido(valor: &Option<String>, mensaje: &str, errores: &mut Vec<String>) {
    if valor.as_deref().is_none_or(|v| v.trim().is_empty()) {
        errores.push(mensaje.to_string());
    }
}

fn fecha_requerida(
    valor: &Option<String>,
    mensaje_faltante: &str,
    errores: &mut Vec<String>,
) -> Option<NaiveDate> {
    match valor.as_deref() {
        None => {
            errores.push(mensaje_faltante.to_string());
            None
        }
        Some(texto) => match parsear_fecha(texto) {
            Some(fecha) => Some(fecha),
            None => {
                errores.push("La fecha no tiene un formato valido".to_string());
                None
            }
        },
    }
}

/// Aplica un campo de texto del parche; una cadena en blanco no es un valor
/// valido para un campo obligatorio.
fn aplicar_texto(
    nuevo: Option<String>,
    destino: &mut String,
    mensaje: &str,
    errores: &mut Vec<String>,
) {
    if let Some(valor) = nuevo {
        if valor.trim().is_empty() {
            errores.push(mensaje.to_string());
        } else {
            *destino = valor;
        }
    }
}
