use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

/// Edad en años cumplidos al momento actual.
pub fn calcular_edad(fecha_nacimiento: NaiveDate) -> u32 {
    calcular_edad_en(fecha_nacimiento, Utc::now())
}

/// Edad en años cumplidos en el instante `ahora`.
///
/// Reinterpreta la diferencia en milisegundos como una fecha relativa a la
/// epoca Unix y resta 1970 al componente de año. El resultado puede desviarse
/// un año cerca de los limites de año calendario por los dias bisiestos
/// acumulados.
pub fn calcular_edad_en(fecha_nacimiento: NaiveDate, ahora: DateTime<Utc>) -> u32 {
    let nacimiento_ms = fecha_nacimiento
        .and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp_millis();
    let dif = ahora.timestamp_millis() - nacimiento_ms;

    DateTime::from_timestamp_millis(dif)
        .map(|edad| (edad.year() - 1970).unsigned_abs())
        .unwrap_or(0)
}
