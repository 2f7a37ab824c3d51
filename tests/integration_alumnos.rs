mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use common::{TOKEN_ADMIN, TOKEN_ALUMNO, TOKEN_COORDINADOR, email_unico, peticion, setup_app};

fn cuerpo_valido(email: &str) -> Value {
    json!({
        "nombre": "Ana",
        "apellidoPaterno": "Lopez",
        "apellidoMaterno": "Ramos",
        "fechaNacimiento": "2000-03-25",
        "email": email,
        "carreraPrograma": "Derecho",
        "semestre": 3,
        "fechaIngreso": "2024-08-15",
    })
}

#[tokio::test]
async fn crear_alumno_devuelve_registro_con_campos_derivados() {
    let app = setup_app().await;
    let email = email_unico();

    let (status, cuerpo) = peticion(
        &app,
        "POST",
        "/api/alumnos",
        Some(TOKEN_ADMIN),
        Some(cuerpo_valido(&email.to_uppercase())),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(cuerpo["mensaje"], "Alumno creado correctamente");

    let data = &cuerpo["data"];
    // Matricula: M + año de ingreso + iniciales + sufijo de 3 digitos.
    let matricula = data["matricula"].as_str().unwrap();
    assert!(matricula.starts_with("M24LA"), "matricula: {}", matricula);
    assert_eq!(matricula.len(), 8);
    assert!(matricula[5..].chars().all(|c| c.is_ascii_digit()));

    assert_eq!(data["estado"], "activo");
    assert_eq!(data["semestre"], 3);
    assert_eq!(data["email"], email.to_lowercase());
    assert_eq!(data["materiasInscritas"], json!([]));
    assert_eq!(data["isDeleted"], false);
    assert!(data["id"].as_str().unwrap().parse::<Uuid>().is_ok());
}

#[tokio::test]
async fn crear_sin_header_authorization_es_rechazado() {
    let app = setup_app().await;

    let (status, cuerpo) = peticion(
        &app,
        "POST",
        "/api/alumnos",
        None,
        Some(cuerpo_valido(&email_unico())),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(cuerpo["mensaje"], "Token invalido");
}

#[tokio::test]
async fn token_sin_tipo_conocido_es_rechazado() {
    let app = setup_app().await;

    let (status, cuerpo) = peticion(
        &app,
        "GET",
        "/api/alumnos",
        Some("Bearer cualquier-cosa"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(cuerpo["mensaje"], "Token invalido");
}

#[tokio::test]
async fn crear_con_rol_alumno_es_prohibido() {
    let app = setup_app().await;

    let (status, _) = peticion(
        &app,
        "POST",
        "/api/alumnos",
        Some(TOKEN_ALUMNO),
        Some(cuerpo_valido(&email_unico())),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn listado_solo_para_coordinador() {
    let app = setup_app().await;

    let (status, _) = peticion(&app, "GET", "/api/alumnos", Some(TOKEN_ADMIN), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn listado_sin_alumnos_registrados() {
    let app = setup_app().await;

    let (status, cuerpo) =
        peticion(&app, "GET", "/api/alumnos", Some(TOKEN_COORDINADOR), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["msg"], "No se encontraron alumnos registrados");
    assert_eq!(cuerpo["data"], json!([]));
}

#[tokio::test]
async fn crear_con_campos_faltantes_acumula_errores() {
    let app = setup_app().await;

    let (status, cuerpo) = peticion(
        &app,
        "POST",
        "/api/alumnos",
        Some(TOKEN_ADMIN),
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(cuerpo["mensaje"], "Ocurrio un error al crear el alumno");

    let errores = cuerpo["error"].as_array().unwrap();
    assert!(errores.contains(&json!("El nombre es obligatorio")));
    assert!(errores.contains(&json!("La fechaNacimiento es obligatoria")));
    assert!(errores.contains(&json!("La fechaIngreso es obligatoria")));
    assert!(errores.contains(&json!("El semestre es obligatorio")));
}

#[tokio::test]
async fn un_solo_error_se_reporta_como_cadena() {
    let app = setup_app().await;
    let email = email_unico();

    let (status, _) = peticion(
        &app,
        "POST",
        "/api/alumnos",
        Some(TOKEN_ADMIN),
        Some(cuerpo_valido(&email)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, cuerpo) = peticion(
        &app,
        "POST",
        "/api/alumnos",
        Some(TOKEN_ADMIN),
        Some(cuerpo_valido(&email)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(cuerpo["error"], "El email ya esta registrado.");
}

#[tokio::test]
async fn alumno_menor_de_16_es_rechazado() {
    let app = setup_app().await;
    let mut cuerpo_alumno = cuerpo_valido(&email_unico());
    cuerpo_alumno["fechaNacimiento"] = json!("2015-01-01");

    let (status, cuerpo) = peticion(
        &app,
        "POST",
        "/api/alumnos",
        Some(TOKEN_ADMIN),
        Some(cuerpo_alumno),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(cuerpo["error"], "El alumno debe ser mayor de 15 años");
}

#[tokio::test]
async fn obtener_alumno_inexistente_es_404() {
    let app = setup_app().await;
    let id = Uuid::new_v4();

    let (status, cuerpo) = peticion(
        &app,
        "GET",
        &format!("/api/alumnos/{}", id),
        Some(TOKEN_COORDINADOR),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        cuerpo["mensaje"],
        format!("No se encontro el alumno con el {} solicitado.", id)
    );
}

#[tokio::test]
async fn flujo_completo_de_alumno() {
    let app = setup_app().await;
    let email = email_unico();

    // Alta por un admin.
    let (status, cuerpo) = peticion(
        &app,
        "POST",
        "/api/alumnos",
        Some(TOKEN_ADMIN),
        Some(cuerpo_valido(&email)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = cuerpo["data"]["id"].as_str().unwrap().to_string();
    let matricula = cuerpo["data"]["matricula"].as_str().unwrap().to_string();

    // El coordinador lo ve en el listado.
    let (status, cuerpo) =
        peticion(&app, "GET", "/api/alumnos", Some(TOKEN_COORDINADOR), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["msg"], "Operacion exitosa");
    assert_eq!(cuerpo["data"].as_array().unwrap().len(), 1);

    // Consulta individual con rol alumno.
    let ruta = format!("/api/alumnos/{}", id);
    let (status, cuerpo) = peticion(&app, "GET", &ruta, Some(TOKEN_ALUMNO), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["data"]["email"], email);

    // Actualizacion parcial: el id y la matricula se conservan.
    let (status, cuerpo) = peticion(
        &app,
        "PUT",
        &ruta,
        Some(TOKEN_COORDINADOR),
        Some(json!({
            "semestre": 4,
            "estado": "graduado",
            "materiasInscritas": ["Calculo I", "Historia", "Calculo I"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["mensaje"], "Informacion del alumno actualizada con exito");
    assert_eq!(cuerpo["data"]["id"], id);
    assert_eq!(cuerpo["data"]["matricula"], matricula);
    assert_eq!(cuerpo["data"]["semestre"], 4);
    assert_eq!(cuerpo["data"]["estado"], "graduado");
    assert_eq!(
        cuerpo["data"]["materiasInscritas"],
        json!(["Calculo I", "Historia"])
    );

    // Baja logica: devuelve el registro y lo oculta de las lecturas.
    let (status, cuerpo) = peticion(&app, "DELETE", &ruta, Some(TOKEN_COORDINADOR), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cuerpo["mensaje"], "Alumno eliminado correctamente");
    assert_eq!(cuerpo["data"]["id"], id);

    let (status, _) = peticion(&app, "GET", &ruta, Some(TOKEN_COORDINADOR), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, cuerpo) = peticion(&app, "GET", "/api/alumnos", Some(TOKEN_COORDINADOR), None).await;
    assert_eq!(cuerpo["data"], json!([]));

    // Una segunda baja sobre el mismo id ya no lo encuentra.
    let (status, cuerpo) = peticion(&app, "DELETE", &ruta, Some(TOKEN_COORDINADOR), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        cuerpo["mensaje"],
        format!("No se encontro un alumno con el id: {}", id)
    );
}

#[tokio::test]
async fn actualizar_con_email_de_otro_alumno_es_rechazado() {
    let app = setup_app().await;
    let email_a = email_unico();
    let email_b = email_unico();

    let (_, cuerpo_a) = peticion(
        &app,
        "POST",
        "/api/alumnos",
        Some(TOKEN_ADMIN),
        Some(cuerpo_valido(&email_a)),
    )
    .await;
    let (_, cuerpo_b) = peticion(
        &app,
        "POST",
        "/api/alumnos",
        Some(TOKEN_ADMIN),
        Some(cuerpo_valido(&email_b)),
    )
    .await;
    let id_b = cuerpo_b["data"]["id"].as_str().unwrap();

    let (status, cuerpo) = peticion(
        &app,
        "PUT",
        &format!("/api/alumnos/{}", id_b),
        Some(TOKEN_COORDINADOR),
        Some(json!({ "email": email_a })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(cuerpo["mensaje"], "Error al actualizar al alumno");
    assert_eq!(cuerpo["error"], "El email ya esta registrado.");

    // El email propio si es aceptado.
    let id_a = cuerpo_a["data"]["id"].as_str().unwrap();
    let (status, _) = peticion(
        &app,
        "PUT",
        &format!("/api/alumnos/{}", id_a),
        Some(TOKEN_COORDINADOR),
        Some(json!({ "email": email_a })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn actualizar_con_estado_desconocido_es_rechazado() {
    let app = setup_app().await;

    let (_, cuerpo) = peticion(
        &app,
        "POST",
        "/api/alumnos",
        Some(TOKEN_ADMIN),
        Some(cuerpo_valido(&email_unico())),
    )
    .await;
    let id = cuerpo["data"]["id"].as_str().unwrap().to_string();
    let ruta = format!("/api/alumnos/{}", id);

    let (status, cuerpo) = peticion(
        &app,
        "PUT",
        &ruta,
        Some(TOKEN_COORDINADOR),
        Some(json!({ "estado": "expulsado" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(cuerpo["error"], "Estado invalido: expulsado");

    // El estado original se conserva.
    let (_, cuerpo) = peticion(&app, "GET", &ruta, Some(TOKEN_COORDINADOR), None).await;
    assert_eq!(cuerpo["data"]["estado"], "activo");
}

#[tokio::test]
async fn eliminar_solo_para_coordinador() {
    let app = setup_app().await;

    let (_, cuerpo) = peticion(
        &app,
        "POST",
        "/api/alumnos",
        Some(TOKEN_ADMIN),
        Some(cuerpo_valido(&email_unico())),
    )
    .await;
    let id = cuerpo["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = peticion(
        &app,
        "DELETE",
        &format!("/api/alumnos/{}", id),
        Some(TOKEN_ADMIN),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
