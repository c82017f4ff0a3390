//! Prompts for advanced-backend care-event extraction.
//!
//! Designed for small instruction-tuned models with JSON grammar
//! constraints; the heuristic parser remains the ground truth for the
//! reply shape.

/// System prompt for Spanish care-note extraction.
pub const SYSTEM_PROMPT: &str = r#"You are a pet care assistant that extracts care events from short Spanish notes.

Extract events with the following information:
- kind: one of medication, vaccine, deworming, grooming, weight
- full_name: the treatment name; add a " (dosis i/n)" suffix only for one dose out of a series
- date: ISO-8601 UTC instant for the event
- dosage: amount with unit, e.g. "500 mg" (null if not mentioned)
- frequency: dosing cadence such as "cada 8 h" (null if not mentioned)
- manufacturer: laboratory or brand named after "lab", "laboratorio" or "marca" (null if not mentioned)

Common Spanish cues:
- hoy = today, manana = tomorrow
- "en N dias/semanas/meses" = offset from the reference instant
- a weekday name means the next such weekday after the reference
- vacuna, rabia, moquillo, parvovirus indicate a vaccine
- desparasitar and its forms indicate deworming

Output JSON with an "events" array and a "warnings" array."#;

/// User prompt template for quick-add parsing.
pub fn make_quick_add_prompt(text: &str, reference_rfc3339: &str) -> String {
    format!(
        r#"Extract all care events from this Spanish note, resolving relative dates against the reference instant {}:

"{}"

Return a JSON object with an "events" array and a "warnings" array. Each event should have:
- kind: medication | vaccine | deworming | grooming | weight
- full_name: the treatment name
- date: ISO-8601 UTC instant
- dosage: amount with unit (null if not specified)
- frequency: cadence like "cada 8 h" (null if not specified)
- notes: free text (null if not specified)
- manufacturer: laboratory or brand (null if not specified)"#,
        reference_rfc3339, text
    )
}

/// User prompt template for prescription-label extraction.
pub fn make_prescription_prompt(text: &str, reference_rfc3339: &str) -> String {
    format!(
        r#"Extract the prescription described by this label text, resolving relative dates against the reference instant {}:

"{}"

Return a single JSON object with:
- kind: medication | vaccine | deworming | grooming | weight (null if unclear)
- name: the product name (null if unclear)
- dosage: amount with unit (null if not specified)
- frequency: cadence like "cada 12 h" (null if not specified)
- manufacturer: laboratory or brand (null if not specified)
- date: ISO-8601 UTC instant (null if no date on the label)
- confidence: a number in [0,1] for how complete the read is"#,
        reference_rfc3339, text
    )
}

/// JSON grammar constraint so a llama.cpp backend cannot emit a malformed reply.
pub const JSON_GRAMMAR: &str = r#"
root ::= object
object ::= "{" ws "\"events\"" ws ":" ws events ws "," ws "\"warnings\"" ws ":" ws warnings ws "}"
events ::= "[" ws (event (ws "," ws event)*)? ws "]"
warnings ::= "[" ws (string (ws "," ws string)*)? ws "]"
event ::= "{" ws
    "\"kind\"" ws ":" ws string ws "," ws
    "\"full_name\"" ws ":" ws string ws "," ws
    "\"date\"" ws ":" ws string ws "," ws
    "\"dosage\"" ws ":" ws (string | "null") ws "," ws
    "\"frequency\"" ws ":" ws (string | "null") ws "," ws
    "\"notes\"" ws ":" ws (string | "null") ws "," ws
    "\"manufacturer\"" ws ":" ws (string | "null") ws
"}"
string ::= "\"" ([^"\\] | "\\" .)* "\""
ws ::= [ \t\n]*
"#;

/// Example few-shot prompts for better extraction accuracy.
pub const FEW_SHOT_EXAMPLES: &[(&str, &str)] = &[
    (
        "amoxicilina 500 mg cada 12 horas",
        r#"{"events":[{"kind":"medication","full_name":"amoxicilina","date":"2024-01-01T10:00:00Z","dosage":"500 mg","frequency":"cada 12 h","notes":null,"manufacturer":null}],"warnings":[]}"#,
    ),
    (
        "vacuna rabia mañana a las 3pm",
        r#"{"events":[{"kind":"vaccine","full_name":"vacuna rabia","date":"2024-01-02T15:00:00Z","dosage":null,"frequency":null,"notes":null,"manufacturer":null}],"warnings":[]}"#,
    ),
    (
        "corte de uñas el viernes",
        r#"{"events":[{"kind":"grooming","full_name":"corte de uñas","date":"2024-01-05T09:00:00Z","dosage":null,"frequency":null,"notes":null,"manufacturer":null}],"warnings":[]}"#,
    ),
];

/// Build a complete prompt with system context and few-shot examples.
pub fn build_full_prompt(text: &str, reference_rfc3339: &str, include_examples: bool) -> String {
    let mut prompt = String::new();

    // System context
    prompt.push_str("<|system|>\n");
    prompt.push_str(SYSTEM_PROMPT);
    prompt.push_str("\n<|end|>\n");

    // Few-shot examples
    if include_examples {
        for (input, output) in FEW_SHOT_EXAMPLES {
            prompt.push_str("<|user|>\n");
            prompt.push_str(&make_quick_add_prompt(input, "2024-01-01T09:00:00+00:00"));
            prompt.push_str("\n<|end|>\n");
            prompt.push_str("<|assistant|>\n");
            prompt.push_str(output);
            prompt.push_str("\n<|end|>\n");
        }
    }

    // Actual request
    prompt.push_str("<|user|>\n");
    prompt.push_str(&make_quick_add_prompt(text, reference_rfc3339));
    prompt.push_str("\n<|end|>\n");
    prompt.push_str("<|assistant|>\n");

    prompt
}
