//! Spanish vocabulary tables for the interpreter.
//!
//! Every keyword the parser and scheduler match against lives here as data,
//! so swapping the locale means editing tables, not control flow. Keyword
//! matching is substring containment on lowercased input, which is why some
//! entries are stems ("desparasit" covers desparasitación, desparasitar,
//! desparasitante).

use chrono::Weekday;

/// Words that resolve to the reference date.
pub const TODAY_WORDS: &[&str] = &["hoy"];

/// Words that resolve to the reference date plus one day.
pub const TOMORROW_WORDS: &[&str] = &["mañana", "manana"];

/// Weekday names, accented and unaccented spellings.
pub const WEEKDAYS: &[(&str, Weekday)] = &[
    ("lunes", Weekday::Mon),
    ("martes", Weekday::Tue),
    ("miércoles", Weekday::Wed),
    ("miercoles", Weekday::Wed),
    ("jueves", Weekday::Thu),
    ("viernes", Weekday::Fri),
    ("sábado", Weekday::Sat),
    ("sabado", Weekday::Sat),
    ("domingo", Weekday::Sun),
];

/// Dosage units, longest spellings first so the alternation prefers them.
/// Both the micro sign (µ) and the Greek mu (μ) show up in OCR output.
pub const DOSE_UNITS: &[&str] = &["mcg", "mg", "ml", "ug", "µg", "μg", "g"];

/// Trigger word for recurrence phrases ("cada 8 horas").
pub const FREQUENCY_TRIGGER: &str = "cada";

/// Labels that introduce a manufacturer ("Laboratorio: Zoetis").
pub const MANUFACTURER_LABELS: &[&str] = &["laboratorio", "fabricante", "marca"];

/// Vaccine keywords. "vacuna" also hits vacunación by containment.
pub const VACCINE_KEYWORDS: &[&str] = &["vacuna", "refuerzo", "antirrábica", "antirrabica"];

/// Deworming keywords, mostly stems.
pub const DEWORMING_KEYWORDS: &[&str] = &[
    "desparasit",
    "antiparasit",
    "pipeta",
    "vermífugo",
    "vermifugo",
];

/// Medication signals: dose units, recurrence, and common presentation words.
pub const MEDICATION_KEYWORDS: &[&str] = &[
    "mg",
    "ml",
    "mcg",
    "cada ",
    "dosis",
    "pastilla",
    "comprimido",
    "jarabe",
    "gotas",
    "antibiótico",
    "antibiotico",
];

/// Connective words dropped from the end of a cut event name, so
/// "corte de uñas el viernes" names the event "corte de uñas".
pub const TRAILING_CONNECTIVES: &[&str] = &[
    "el", "la", "los", "las", "al", "a", "de", "del", "para", "por", "en", "y", "e",
];

/// Warning emitted when quick-add input is empty or whitespace.
pub const EMPTY_INPUT_WARNING: &str = "Texto vacío";

/// Warning emitted when the assistant feature flag is off.
pub const ASSISTANT_DISABLED_WARNING: &str = "Asistente desactivado";

/// Note attached to the annual booster event of a vaccine series.
pub const BOOSTER_NOTE: &str = "Refuerzo";

/// Marker that opens a dose-position suffix, searched case-insensitively.
pub const DOSE_MARKER: &str = " (dosis ";

/// Build the dose-position suffix for dose `position` of `total`.
pub fn dose_suffix(position: u32, total: u32) -> String {
    format!(" (dosis {}/{})", position, total)
}
