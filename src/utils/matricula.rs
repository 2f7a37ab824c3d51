use chrono::{Datelike, NaiveDate};
use rand::Rng;

/// Genera una matricula combinando el año de ingreso y las iniciales:
/// prefijo `M`, 2 digitos del año, inicial del apellido paterno, inicial del
/// nombre y un sufijo aleatorio de 3 digitos (100-999).
///
/// El sufijo no es criptografico y las colisiones son posibles; quien llama
/// debe reintentar o delegar la unicidad al almacenamiento.
pub fn generar_matricula(fecha_ingreso: NaiveDate, nombre: &str, apellido_paterno: &str) -> String {
    let anio = fecha_ingreso.year() % 100;
    let inicial_nombre = inicial(nombre);
    let inicial_apellido = inicial(apellido_paterno);
    let sufijo: u32 = rand::thread_rng().gen_range(100..1000);

    format!("M{anio:02}{inicial_apellido}{inicial_nombre}{sufijo}")
}

fn inicial(texto: &str) -> String {
    texto
        .trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default()
}
