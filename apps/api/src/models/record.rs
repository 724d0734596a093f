use serde::{Deserialize, Deserializer, Serialize};

/// One DIC filing, as assembled by the front-end form or pre-filled from the
/// PDF extraction. Every field is nullable: an absent value is meaningful
/// (it exports as an empty element) and never an error.
///
/// JSON field names are the camelCase Spanish identifiers fixed by the
/// extraction contract (`datosSolicitante.nombreRazonSocial`, …).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectRecord {
    pub datos_solicitante: Solicitante,
    pub representante_notificacion: Representante,
    pub tipo_de_uso: TipoUso,
    pub descripcion: Descripcion,
    pub parcelas_afectadas: Vec<ParcelaAfectada>,
    pub parametros_urbanisticos: ParametrosUrbanisticos,
    pub propietarios_colindantes: Vec<PropietarioColindante>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Solicitante {
    pub nombre_razon_social: Option<String>,
    pub apellidos: Option<String>,
    pub nif_cif: Option<String>,
    pub provincia: Option<String>,
    pub municipio: Option<String>,
    pub calle_plaza: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cp: Option<String>,
    pub correo_electronico: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Representante {
    pub nombre_razon_social: Option<String>,
    pub apellidos: Option<String>,
    pub nif: Option<String>,
    pub correo_electronico: Option<String>,
    pub canal_preferente_notificacion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TipoUso {
    pub categoria_actividad: Option<String>,
    pub subcategoria_especifica: Option<String>,
    /// Tri-state: explicitly yes, explicitly no, or not answered.
    #[serde(deserialize_with = "lenient_bool")]
    pub seleccion: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Descripcion {
    pub asunto: Option<String>,
    pub descripcion_actuacion: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub coste_ejecucion_material: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub porcentaje: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub canon: Option<f64>,
    pub plazo_vigencia: Option<String>,
    pub solicitud_justificacion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParcelaAfectada {
    pub referencia_catastral: Option<String>,
    pub provincia: Option<String>,
    pub localidad: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub poligono: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub parcela: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub superficie_parcela: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub superficie_vinculada: Option<f64>,
    /// Shown in the form's parcel table; not part of the exported document.
    #[serde(deserialize_with = "lenient_f64")]
    pub total_superficie: Option<f64>,
}

/// One row of the constructions table. Installations share the exact same
/// columns, so the same struct backs both tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Construccion {
    pub uso: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub superficie_ocupada: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub superficie_construida: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub edificabilidad: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub numero_plantas: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub altura: Option<f64>,
    /// Captured by the form; the exported document has no column for it.
    #[serde(deserialize_with = "lenient_f64")]
    pub volumen: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub separacion_al_eje_caminos: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub separacion_a_caminos: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub separacion_a_lindes: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub coste_transformacion: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub coste_total: Option<f64>,
}

pub type Instalacion = Construccion;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vial {
    #[serde(deserialize_with = "lenient_f64")]
    pub superficie_ocupada: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub coste_transformacion: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TecnicoRedactor {
    pub nombre: Option<String>,
    pub titulacion: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub colegiado_numero: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParametrosUrbanisticos {
    pub construcciones: Vec<Construccion>,
    pub instalaciones: Vec<Instalacion>,
    pub viales: Vec<Vial>,
    pub tecnico_redactor: TecnicoRedactor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropietarioColindante {
    pub nombre: Option<String>,
    pub direccion_completa: Option<String>,
    pub referencia_catastral: Option<String>,
}

impl Construccion {
    /// Field name / value pairs for every numeric column, in table order.
    pub fn numeric_fields(&self) -> [(&'static str, Option<f64>); 11] {
        [
            ("superficieOcupada", self.superficie_ocupada),
            ("superficieConstruida", self.superficie_construida),
            ("edificabilidad", self.edificabilidad),
            ("numeroPlantas", self.numero_plantas),
            ("altura", self.altura),
            ("volumen", self.volumen),
            ("separacionAlEjeCaminos", self.separacion_al_eje_caminos),
            ("separacionACaminos", self.separacion_a_caminos),
            ("separacionALindes", self.separacion_a_lindes),
            ("costeTransformacion", self.coste_transformacion),
            ("costeTotal", self.coste_total),
        ]
    }
}

impl Vial {
    pub fn numeric_fields(&self) -> [(&'static str, Option<f64>); 2] {
        [
            ("superficieOcupada", self.superficie_ocupada),
            ("costeTransformacion", self.coste_transformacion),
        ]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient deserializers
// ────────────────────────────────────────────────────────────────────────────

/// Numeric fields arrive as JSON numbers from the extraction, but as free
/// text from the form's table cells. Accept a number, a numeric string, or
/// null; anything that does not parse to a finite number is absent.
fn lenient_f64<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(de)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => {
            s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    })
}

/// Identifier-like fields (postal code, plot numbers) are strings in the
/// contract, but the model occasionally returns them as bare numbers.
fn lenient_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(de)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts a JSON boolean or its string form; anything else is unanswered.
fn lenient_bool<'de, D>(de: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(de)?;
    Ok(match value {
        serde_json::Value::Bool(b) => Some(b),
        serde_json::Value::String(s) => match s.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}
