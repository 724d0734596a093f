//! Form-level predicate checks, run before an export is handed out.
//!
//! These mirror the checks the browser form applies: a required applicant
//! name, a permissive email shape, and non-negative numeric table cells.
//! The serializer itself never validates — a record that fails here still
//! serializes fine; the gate exists so users do not file incomplete
//! documents by accident.

use serde::Serialize;

use crate::models::record::ProjectRecord;

/// One failed check, addressed by form section / row / field so a client
/// can highlight the offending cell.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub section: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub errors: Vec<FieldError>,
}

const MSG_NAME_REQUIRED: &str = "El nombre es obligatorio.";
const MSG_BAD_EMAIL: &str = "El formato del correo electrónico no es válido.";
const MSG_NEGATIVE: &str = "Debe ser un valor positivo.";

pub fn validate_record(record: &ProjectRecord) -> ValidationReport {
    let mut errors = Vec::new();

    let sol = &record.datos_solicitante;
    if sol
        .nombre_razon_social
        .as_deref()
        .map_or(true, |n| n.trim().is_empty())
    {
        errors.push(FieldError {
            section: "datosSolicitante",
            index: None,
            field: "nombreRazonSocial",
            message: MSG_NAME_REQUIRED,
        });
    }

    if let Some(email) = sol.correo_electronico.as_deref() {
        if !email.is_empty() && !is_email_like(email) {
            errors.push(FieldError {
                section: "datosSolicitante",
                index: None,
                field: "correoElectronico",
                message: MSG_BAD_EMAIL,
            });
        }
    }
    if let Some(email) = record.representante_notificacion.correo_electronico.as_deref() {
        if !email.is_empty() && !is_email_like(email) {
            errors.push(FieldError {
                section: "representanteNotificacion",
                index: None,
                field: "correoElectronico",
                message: MSG_BAD_EMAIL,
            });
        }
    }

    let parametros = &record.parametros_urbanisticos;
    for (section, rows) in [
        ("construcciones", &parametros.construcciones),
        ("instalaciones", &parametros.instalaciones),
    ] {
        for (index, row) in rows.iter().enumerate() {
            for (field, value) in row.numeric_fields() {
                if value.is_some_and(|v| v < 0.0) {
                    errors.push(FieldError {
                        section,
                        index: Some(index),
                        field,
                        message: MSG_NEGATIVE,
                    });
                }
            }
        }
    }
    for (index, vial) in parametros.viales.iter().enumerate() {
        for (field, value) in vial.numeric_fields() {
            if value.is_some_and(|v| v < 0.0) {
                errors.push(FieldError {
                    section: "viales",
                    index: Some(index),
                    field,
                    message: MSG_NEGATIVE,
                });
            }
        }
    }

    ValidationReport {
        passed: errors.is_empty(),
        errors,
    }
}

/// Mirrors the form's permissive `\S+@\S+\.\S+` shape check: within one
/// whitespace-free token, something before an `@`, and after it a dot with
/// content on both sides. Deliberately loose — real validation happens when
/// the platform notifies the address.
fn is_email_like(text: &str) -> bool {
    text.split_whitespace().any(|token| {
        let Some((local, domain)) = token.split_once('@') else {
            return false;
        };
        if local.is_empty() {
            return false;
        }
        domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{Construccion, Solicitante, Vial};

    fn named_record() -> ProjectRecord {
        ProjectRecord {
            datos_solicitante: Solicitante {
                nombre_razon_social: Some("Acme S.L.".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_record_fails_on_required_name() {
        let report = validate_record(&ProjectRecord::default());
        assert!(!report.passed);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field, "nombreRazonSocial");
    }

    #[test]
    fn test_whitespace_only_name_still_fails() {
        let mut record = ProjectRecord::default();
        record.datos_solicitante.nombre_razon_social = Some("   ".to_string());
        assert!(!validate_record(&record).passed);
    }

    #[test]
    fn test_named_record_passes() {
        assert!(validate_record(&named_record()).passed);
    }

    #[test]
    fn test_bad_applicant_email_fails() {
        let mut record = named_record();
        record.datos_solicitante.correo_electronico = Some("not-an-email".to_string());
        let report = validate_record(&record);
        assert!(!report.passed);
        assert_eq!(report.errors[0].section, "datosSolicitante");
        assert_eq!(report.errors[0].field, "correoElectronico");
    }

    #[test]
    fn test_empty_email_is_allowed() {
        let mut record = named_record();
        record.datos_solicitante.correo_electronico = Some(String::new());
        assert!(validate_record(&record).passed);
    }

    #[test]
    fn test_bad_representative_email_fails() {
        let mut record = named_record();
        record.representante_notificacion.correo_electronico = Some("a@b".to_string());
        let report = validate_record(&record);
        assert!(!report.passed);
        assert_eq!(report.errors[0].section, "representanteNotificacion");
    }

    #[test]
    fn test_negative_construction_cell_is_reported_with_row_index() {
        let mut record = named_record();
        record.parametros_urbanisticos.construcciones = vec![
            Construccion::default(),
            Construccion {
                altura: Some(-3.0),
                ..Default::default()
            },
        ];
        let report = validate_record(&record);
        assert!(!report.passed);
        assert_eq!(report.errors[0].section, "construcciones");
        assert_eq!(report.errors[0].index, Some(1));
        assert_eq!(report.errors[0].field, "altura");
    }

    #[test]
    fn test_negative_vial_cell_is_reported() {
        let mut record = named_record();
        record.parametros_urbanisticos.viales = vec![Vial {
            superficie_ocupada: None,
            coste_transformacion: Some(-1.0),
        }];
        let report = validate_record(&record);
        assert!(!report.passed);
        assert_eq!(report.errors[0].section, "viales");
        assert_eq!(report.errors[0].field, "costeTransformacion");
    }

    #[test]
    fn test_absent_numeric_cells_are_valid() {
        let mut record = named_record();
        record.parametros_urbanisticos.instalaciones = vec![Construccion::default()];
        assert!(validate_record(&record).passed);
    }

    #[test]
    fn test_zero_is_a_valid_cell_value() {
        let mut record = named_record();
        record.parametros_urbanisticos.viales = vec![Vial {
            superficie_ocupada: Some(0.0),
            coste_transformacion: Some(0.0),
        }];
        assert!(validate_record(&record).passed);
    }

    // ── is_email_like ───────────────────────────────────────────────────────

    #[test]
    fn test_email_shape_accepts_ordinary_addresses() {
        assert!(is_email_like("ana@example.com"));
        assert!(is_email_like("a.b+c@sub.example.co"));
    }

    #[test]
    fn test_email_shape_rejects_missing_parts() {
        assert!(!is_email_like("example.com"));
        assert!(!is_email_like("@example.com"));
        assert!(!is_email_like("ana@example"));
        assert!(!is_email_like("ana@example."));
        assert!(!is_email_like(""));
    }

    #[test]
    fn test_email_shape_matches_inside_surrounding_text() {
        // The form's check was a search, not a full-string match.
        assert!(is_email_like("contacto: ana@example.com (oficina)"));
    }
}
