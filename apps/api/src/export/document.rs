//! Field-to-tag mapping for the DIC filing document.
//!
//! The element sequence below is a compatibility contract with the regional
//! filing platform: a flat run of siblings under `<XML>`, legacy placeholder
//! elements at fixed positions (the consumer expects fixed field
//! cardinality), and repeated groups in input order. Derivations baked into
//! the mapping:
//!
//! - `*_T` companions classify a tax identifier as `CIF` when its first
//!   character is an ASCII uppercase letter, `NIF` otherwise.
//! - `CANALSOL` is always `TELEMATICA`; `CANALREP` falls back to the same
//!   constant when the representative has no stored preference.
//! - The `RADIO*` indicator block carries one fixed answer profile; the
//!   form's `tipoDeUso` selections do not drive it (platform contract).
//! - Roadway rows are folded into the installations wrapper `c0071` under a
//!   fixed use label; they do not get a wrapper of their own.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::export::writer::{fmt_num, XmlWriter, XML_DECLARATION};
use crate::models::record::{ParcelaAfectada, ProjectRecord};

pub const EXPORT_FILE_NAME: &str = "formulario_dic.xml";
pub const DATA_URI_PREFIX: &str = "data:application/xml;base64,";

const FORM_ID: &str = "DIC";
const CANAL_TELEMATICA: &str = "TELEMATICA";
const USO_VIAL: &str = "Vial/Circulación";

/// Fixed indicator answer profile. Every element must be present even though
/// none of them derives from the record.
const RADIO_PROFILE: &[(&str, &str)] = &[
    ("RADIOI1", "No"),
    ("RADIOI2", "No"),
    ("RADIOI3", "No"),
    ("RADIODT", "Si"),
    ("RADIOT1", "No"),
    ("RADIOT2", "No"),
    ("RADIOT3", "No"),
    ("RADIOT4", "No"),
    ("RADIOT5", "No"),
    ("RADIOT6", "No"),
    ("RADIOT7", "No"),
    ("RADIOT8", "No"),
    ("RADIOE1", "No"),
    ("RADIOO1", "No"),
];

/// Serializes a record to the complete XML text. Total: never fails, even on
/// a fully blank record. The output contains only Latin-1 characters.
pub fn export_xml(record: &ProjectRecord) -> String {
    let mut w = XmlWriter::new();
    w.raw(XML_DECLARATION);
    w.open("XML");

    // ── Applicant ───────────────────────────────────────────────────────────
    let sol = &record.datos_solicitante;
    w.cdata("IDFORM", FORM_ID);
    w.cdata_opt("c0002", sol.nombre_razon_social.as_deref());
    let nif_cif = sol.nif_cif.as_deref().unwrap_or("");
    w.open("NiXCiF_c0003");
    w.cdata("c0003", nif_cif);
    w.cdata("c0003_T", tax_id_type(nif_cif));
    w.close("NiXCiF_c0003");
    // Province/municipality ride in `TeV` companions; the paired code
    // elements are always empty.
    w.open("c0004");
    w.cdata("c0004Com1", "");
    w.cdata_opt("c0004Com1_T", sol.provincia.as_deref());
    w.cdata("c0004Com2", "");
    w.cdata_opt("c0004Com2_T", sol.municipio.as_deref());
    w.close("c0004");
    w.cdata_opt("c0007", sol.calle_plaza.as_deref());
    w.cdata_opt("c0010", sol.cp.as_deref());
    w.cdata_opt("EMAILSOL", sol.correo_electronico.as_deref());
    w.cdata("CANALSOL", CANAL_TELEMATICA);

    // ── Representative ──────────────────────────────────────────────────────
    let rep = &record.representante_notificacion;
    w.cdata_opt("c0013", rep.nombre_razon_social.as_deref());
    w.cdata_opt("c0012", rep.apellidos.as_deref());
    let nif_rep = rep.nif.as_deref().unwrap_or("");
    w.open("NiXCiF_c0014");
    w.cdata("c0014", nif_rep);
    w.cdata("c0014_T", tax_id_type(nif_rep));
    w.close("NiXCiF_c0014");
    w.cdata_opt("c0022", rep.correo_electronico.as_deref());
    let canal_rep = match rep.canal_preferente_notificacion.as_deref() {
        Some(canal) if !canal.is_empty() => canal,
        _ => CANAL_TELEMATICA,
    };
    w.cdata("CANALREP", canal_rep);

    // ── Indicator block ─────────────────────────────────────────────────────
    for (tag, value) in RADIO_PROFILE {
        w.cdata(tag, value);
    }

    // ── Description ─────────────────────────────────────────────────────────
    let desc = &record.descripcion;
    w.cdata_opt("ASUNTDESC", desc.asunto.as_deref());
    w.cdata_opt("c0030", desc.descripcion_actuacion.as_deref());
    w.cdata_num("leyCosteEjecu", desc.coste_ejecucion_material);
    w.cdata_num("leyPorcentaje", desc.porcentaje);
    w.cdata_num("leyCoste", desc.canon);
    w.cdata_opt("PLZVIG", desc.plazo_vigencia.as_deref());
    w.cdata_opt("c0034", desc.solicitud_justificacion.as_deref());

    // ── Affected parcels ────────────────────────────────────────────────────
    let parcelas = &record.parcelas_afectadas;
    w.open("c0140");
    for p in parcelas {
        w.open("ITEM_c0140");
        w.cdata_opt("CL00c0140", p.referencia_catastral.as_deref());
        w.cdata("CL01c0140", "");
        w.cdata_opt("CL01c0140TeV", p.provincia.as_deref());
        w.cdata("CL02c0140", "");
        w.cdata_opt("CL02c0140TeV", p.localidad.as_deref());
        w.cdata_opt("CL03c0140", p.poligono.as_deref());
        w.cdata_opt("CL04c0140", p.parcela.as_deref());
        w.cdata_num("CL05c0140", p.superficie_parcela);
        w.cdata_num("CL06c0140", p.superficie_vinculada);
        w.close("ITEM_c0140");
    }
    w.close("c0140");

    // Totals over the parcel table, null-as-zero. `c0142` reappears further
    // down as SUPVINC and both occurrences must carry the same value.
    let total_superficie_parcela = sum_parcelas(parcelas, |p| p.superficie_parcela);
    let total_superficie_vinculada = sum_parcelas(parcelas, |p| p.superficie_vinculada);
    w.cdata("c0141", &fmt_num(Some(total_superficie_parcela)));
    w.cdata("c0142", &fmt_num(Some(total_superficie_vinculada)));

    // ── Constructions ───────────────────────────────────────────────────────
    // Column order differs from the installations wrapper below (plantas and
    // altura come before superficie construida here). Both orders are fixed
    // by the platform schema.
    let parametros = &record.parametros_urbanisticos;
    w.open("c0049");
    for c in &parametros.construcciones {
        w.open("ITEM_c0049");
        w.cdata_opt("CL00c0049", c.uso.as_deref());
        w.cdata_num("CL01c0049", c.superficie_ocupada);
        w.cdata_num("CL02c0049", c.numero_plantas);
        w.cdata_num("CL03c0049", c.altura);
        w.cdata_num("CL04c0049", c.superficie_construida);
        w.cdata_num("CL05c0049", c.edificabilidad);
        w.cdata_num("CL06c0049", c.separacion_a_caminos);
        w.cdata_num("CL07c0049", c.separacion_a_lindes);
        w.cdata_num("CL08c0049", c.separacion_al_eje_caminos);
        w.cdata_num("CL09c0049", c.coste_transformacion);
        w.cdata_num("CL10c0049", c.coste_total);
        w.close("ITEM_c0049");
    }
    w.close("c0049");

    // Legacy placeholders. `c0060` is the one bare element in the document;
    // the rest carry an empty CDATA payload.
    w.cdata("c0059", "");
    w.open("c0060");
    w.close("c0060");
    w.cdata("c0061", "");
    w.cdata("c0064", "");
    w.cdata("c0065", "");
    w.cdata("c0070", "");

    // ── Installations (and roadways, folded in) ─────────────────────────────
    w.open("c0071");
    for i in &parametros.instalaciones {
        w.open("ITEM_c0071");
        w.cdata_opt("CL00c0071", i.uso.as_deref());
        w.cdata_num("CL01c0071", i.superficie_ocupada);
        w.cdata_num("CL02c0071", i.superficie_construida);
        w.cdata_num("CL03c0071", i.numero_plantas);
        w.cdata_num("CL04c0071", i.altura);
        w.cdata_num("CL05c0071", i.edificabilidad);
        w.cdata_num("CL06c0071", i.separacion_a_caminos);
        w.cdata_num("CL07c0071", i.separacion_a_lindes);
        w.cdata_num("CL08c0071", i.separacion_al_eje_caminos);
        w.cdata_num("CL09c0071", i.coste_transformacion);
        w.cdata_num("CL10c0071", i.coste_total);
        w.close("ITEM_c0071");
    }
    for v in &parametros.viales {
        w.open("ITEM_c0071");
        w.cdata("CL00c0071", USO_VIAL);
        w.cdata_num("CL01c0071", v.superficie_ocupada);
        w.cdata("CL02c0071", "");
        w.cdata("CL03c0071", "");
        w.cdata("CL04c0071", "");
        w.cdata("CL05c0071", "");
        w.cdata("CL06c0071", "");
        w.cdata("CL07c0071", "");
        w.cdata("CL08c0071", "");
        w.cdata_num("CL09c0071", v.coste_transformacion);
        w.cdata("CL10c0071", "");
        w.close("ITEM_c0071");
    }
    w.close("c0071");

    w.cdata("c0081", "");
    w.cdata("c0082", "");
    w.cdata("c0085", "");
    w.cdata("c0135", "");
    w.cdata("c0134", "");
    w.cdata("SUPVINC", &fmt_num(Some(total_superficie_vinculada)));

    for i in 1..=8 {
        w.cdata(&format!("ad{i}"), "");
    }

    // ── Drafting technician ─────────────────────────────────────────────────
    let tecnico = &parametros.tecnico_redactor;
    w.cdata_opt("c0130", tecnico.nombre.as_deref());
    w.cdata_opt("c0131", tecnico.titulacion.as_deref());
    w.cdata_opt("c0132", tecnico.colegiado_numero.as_deref());

    // ── Adjoining owners ────────────────────────────────────────────────────
    w.open("c0143");
    for pc in &record.propietarios_colindantes {
        w.open("ITEM_c0143");
        w.cdata_opt("CL00c0143", pc.nombre.as_deref());
        w.cdata("CL01c0143", "");
        w.cdata("CL01c0143TeV", "");
        w.cdata("CL02c0143", "");
        w.cdata("CL02c0143TeV", "");
        w.cdata_opt("CL03c0143", pc.direccion_completa.as_deref());
        w.cdata("CL04c0143", "");
        w.cdata("CL05c0143", "");
        w.cdata("CL06c0143", "");
        w.cdata_opt("CL07c0143", pc.referencia_catastral.as_deref());
        w.cdata("CL08c0143", "");
        w.cdata("CL08c0143TeV", "");
        w.cdata("CL09c0143", "");
        w.cdata("CL09c0143TeV", "");
        w.cdata("CL10c0143", "");
        w.cdata("CL11c0143", "");
        w.close("ITEM_c0143");
    }
    w.close("c0143");

    w.close("XML");
    w.into_string()
}

/// Serializes and packages the document as base64 of its Latin-1 bytes,
/// ready for a `data:application/xml;base64,` download URI.
pub fn export_xml_base64(record: &ProjectRecord) -> String {
    BASE64.encode(latin1_bytes(&export_xml(record)))
}

/// One byte per character. Sanitization guarantees every code point fits;
/// anything larger here is a broken pipeline invariant, not user error.
fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let cp = c as u32;
            debug_assert!(cp <= 255, "export text escaped the Latin-1 pipeline");
            cp as u8
        })
        .collect()
}

/// `CIF` when the identifier starts with an ASCII uppercase letter (company
/// registrations), `NIF` otherwise — including the empty identifier.
fn tax_id_type(id: &str) -> &'static str {
    if id.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        "CIF"
    } else {
        "NIF"
    }
}

fn sum_parcelas(parcelas: &[ParcelaAfectada], field: impl Fn(&ParcelaAfectada) -> Option<f64>) -> f64 {
    parcelas.iter().map(|p| field(p).unwrap_or(0.0)).sum()
}
