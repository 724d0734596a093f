// Shared prompt fragments. Each service that calls the model defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// Instruction appended to every structured-output prompt. The response
/// cleanup in `llm_client` tolerates violations, but asking first keeps the
/// failure rate down.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Devuelve exclusivamente un objeto JSON válido y puro, SIN encabezados, \
    SIN markdown, SIN explicaciones y SIN texto fuera del objeto JSON. \
    Usa null para cualquier dato que no aparezca en el documento.";
