// Extraction prompt for the DIC filing PDF.
// The field names below are the serde contract of `models::record` — the
// model's reply deserializes straight into `ProjectRecord`, so any rename
// there must be mirrored here.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

const EXTRACTION_PROMPT: &str = r#"Analiza el PDF adjunto (una solicitud de Declaración de Interés Comunitario) y extrae los datos relevantes en formato JSON con exactamente esta estructura:

{
  "datosSolicitante": {
    "nombreRazonSocial": "string" | null, "apellidos": "string" | null,
    "nifCif": "string" | null, "provincia": "string" | null,
    "municipio": "string" | null, "callePlaza": "string" | null,
    "cp": "string" | null, "correoElectronico": "string" | null
  },
  "representanteNotificacion": {
    "nombreRazonSocial": "string" | null, "apellidos": "string" | null,
    "nif": "string" | null, "correoElectronico": "string" | null,
    "canalPreferenteNotificacion": "string" | null
  },
  "tipoDeUso": {
    "categoriaActividad": "string" | null,
    "subcategoriaEspecifica": "string" | null,
    "seleccion": true | false | null
  },
  "descripcion": {
    "asunto": "string" | null, "descripcionActuacion": "string" | null,
    "costeEjecucionMaterial": number | null, "porcentaje": number | null,
    "canon": number | null, "plazoVigencia": "string" | null,
    "solicitudJustificacion": "string" | null
  },
  "parcelasAfectadas": [
    {
      "referenciaCatastral": "string" | null, "provincia": "string" | null,
      "localidad": "string" | null, "poligono": "string" | null,
      "parcela": "string" | null, "superficieParcela": number | null,
      "superficieVinculada": number | null, "totalSuperficie": number | null
    }
  ],
  "parametrosUrbanisticos": {
    "construcciones": [
      {
        "uso": "string" | null, "superficieOcupada": number | null,
        "superficieConstruida": number | null, "edificabilidad": number | null,
        "numeroPlantas": number | null, "altura": number | null,
        "volumen": number | null, "separacionAlEjeCaminos": number | null,
        "separacionACaminos": number | null, "separacionALindes": number | null,
        "costeTransformacion": number | null, "costeTotal": number | null
      }
    ],
    "instalaciones": [ /* misma estructura que construcciones */ ],
    "viales": [
      { "superficieOcupada": number | null, "costeTransformacion": number | null }
    ],
    "tecnicoRedactor": {
      "nombre": "string" | null, "titulacion": "string" | null,
      "colegiadoNumero": "string" | null
    }
  },
  "propietariosColindantes": [
    {
      "nombre": "string" | null, "direccionCompleta": "string" | null,
      "referenciaCatastral": "string" | null
    }
  ]
}

REGLAS:
1. Las superficies se expresan en metros cuadrados; extrae solo el valor numérico.
2. Los importes monetarios se expresan en euros; extrae solo el valor numérico.
3. Conserva las tablas (parcelas, construcciones, instalaciones, viales, propietarios colindantes) en el orden en que aparecen en el documento.
4. No inventes datos: si un campo no aparece en el PDF, usa null."#;

/// The full prompt sent alongside the PDF.
pub fn extraction_prompt() -> String {
    format!("{EXTRACTION_PROMPT}\n\n{JSON_ONLY_INSTRUCTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_every_top_level_section() {
        let prompt = extraction_prompt();
        for section in [
            "datosSolicitante",
            "representanteNotificacion",
            "tipoDeUso",
            "descripcion",
            "parcelasAfectadas",
            "parametrosUrbanisticos",
            "propietariosColindantes",
        ] {
            assert!(prompt.contains(section), "prompt is missing {section}");
        }
    }

    #[test]
    fn test_prompt_ends_with_json_only_instruction() {
        assert!(extraction_prompt().contains("exclusivamente un objeto JSON"));
    }
}
