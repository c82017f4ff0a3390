//! Assistant facade with advanced-backend fallback.
//!
//! One advanced attempt per call, never a retry: a backend failure is
//! logged and the heuristic path answers in the same call, so callers
//! only ever see a final result. The feature flag is a hard kill switch
//! that returns placeholders without running either path.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use pawplan_core::models::{
    EventKind, PrescriptionExtraction, ProposedEvent, QuickAddResult, WeightAnomaly, WeightSample,
};
use pawplan_core::parser::extract_prescription;
use pawplan_core::schedule::{ScheduleRecommender, SeriesRequest};
use pawplan_core::vocab;
use pawplan_core::weight;
use pawplan_core::QuickAddParser;

use crate::backend::SmartBackend;
use crate::config::EngineConfig;
use crate::ocr::{OcrError, TextRecognizer};

/// The app-facing assistant surface over parsing, scheduling, and
/// weight analysis.
pub struct CareEngine {
    config: EngineConfig,
    backend: Option<Box<dyn SmartBackend>>,
    recognizer: Option<Box<dyn TextRecognizer>>,
    parser: QuickAddParser,
    recommender: ScheduleRecommender,
}

impl CareEngine {
    /// Engine with heuristics only.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            backend: None,
            recognizer: None,
            parser: QuickAddParser::new(),
            recommender: ScheduleRecommender::new(),
        }
    }

    /// Attach an advanced backend tried before the heuristics.
    pub fn with_backend(mut self, backend: Box<dyn SmartBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach a platform text recognizer for image scanning.
    pub fn with_recognizer(mut self, recognizer: Box<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// The configuration snapshot this engine was built with.
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Access the recommender for rule-table customization.
    pub fn recommender_mut(&mut self) -> &mut ScheduleRecommender {
        &mut self.recommender
    }

    /// Parse a free-form care note into proposed events.
    ///
    /// Disabled feature: zero events plus a warning. Otherwise the
    /// advanced backend gets a single attempt when preferred and
    /// available; any failure falls through to the heuristic parser.
    pub fn parse_quick_add(
        &self,
        text: &str,
        default_kind: Option<EventKind>,
        reference: DateTime<Utc>,
    ) -> QuickAddResult {
        if !self.config.feature_enabled {
            return QuickAddResult {
                events: Vec::new(),
                warnings: vec![vocab::ASSISTANT_DISABLED_WARNING.into()],
            };
        }

        if let Some(backend) = self.advanced() {
            match backend.parse_quick_add(text, reference) {
                Ok(result) => {
                    debug!(events = result.events.len(), "advanced quick-add parse");
                    return result;
                }
                Err(error) => {
                    warn!(%error, "advanced quick-add failed, using heuristics");
                }
            }
        }

        self.parser.parse(text, default_kind, reference)
    }

    /// Read prescription or label text into a scored extraction.
    pub fn extract_prescription(
        &self,
        text: &str,
        reference: DateTime<Utc>,
    ) -> PrescriptionExtraction {
        if !self.config.feature_enabled {
            return PrescriptionExtraction::default();
        }

        if let Some(backend) = self.advanced() {
            match backend.extract_prescription(text, reference) {
                Ok(extraction) => {
                    debug!(
                        confidence = extraction.confidence,
                        "advanced prescription extraction"
                    );
                    return extraction;
                }
                Err(error) => {
                    warn!(%error, "advanced extraction failed, using heuristics");
                }
            }
        }

        extract_prescription(text, reference)
    }

    /// Recognize text in a prescription photo, then extract from it.
    ///
    /// Only the OCR collaborator's own errors cross this boundary; the
    /// extraction itself never fails.
    pub fn scan_prescription(
        &self,
        image: &[u8],
        reference: DateTime<Utc>,
    ) -> Result<PrescriptionExtraction, OcrError> {
        if !self.config.feature_enabled {
            return Ok(PrescriptionExtraction::default());
        }

        let recognizer = self.recognizer.as_deref().ok_or(OcrError::NotConfigured)?;
        let lines = recognizer.recognize_text(image)?;
        Ok(self.extract_prescription(&lines.join("\n"), reference))
    }

    /// Expand an anchor event into a full dose series.
    ///
    /// Always the deterministic rule path; no backend is consulted.
    pub fn recommend(&self, request: &SeriesRequest) -> Vec<ProposedEvent> {
        if !self.config.feature_enabled {
            return Vec::new();
        }
        self.recommender.recommend(request)
    }

    /// Flag a statistically anomalous latest weight reading.
    pub fn analyze_weight(&self, samples: &[WeightSample]) -> Option<WeightAnomaly> {
        if !self.config.feature_enabled {
            return None;
        }
        weight::analyze(samples)
    }

    /// The backend, when the flags allow an advanced attempt.
    fn advanced(&self) -> Option<&dyn SmartBackend> {
        if self.config.prefer_advanced && self.config.advanced_available {
            self.backend.as_deref()
        } else {
            None
        }
    }
}

impl Default for CareEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, BackendResult};
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    /// Backend that counts attempts and always fails.
    struct FailingBackend {
        calls: Arc<AtomicUsize>,
    }

    impl FailingBackend {
        fn new() -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    impl SmartBackend for FailingBackend {
        fn parse_quick_add(
            &self,
            _text: &str,
            _reference: DateTime<Utc>,
        ) -> BackendResult<QuickAddResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(BackendError::Unavailable)
        }

        fn extract_prescription(
            &self,
            _text: &str,
            _reference: DateTime<Utc>,
        ) -> BackendResult<PrescriptionExtraction> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(BackendError::Unavailable)
        }
    }

    /// Backend that answers with a recognizable canned event.
    struct CannedBackend;

    impl SmartBackend for CannedBackend {
        fn parse_quick_add(
            &self,
            _text: &str,
            reference: DateTime<Utc>,
        ) -> BackendResult<QuickAddResult> {
            Ok(QuickAddResult {
                events: vec![ProposedEvent {
                    kind: EventKind::Vaccine,
                    full_name: "respuesta avanzada".into(),
                    base_name: "respuesta avanzada".into(),
                    date: reference,
                    dosage: None,
                    frequency: None,
                    notes: None,
                    manufacturer: None,
                }],
                warnings: Vec::new(),
            })
        }

        fn extract_prescription(
            &self,
            _text: &str,
            _reference: DateTime<Utc>,
        ) -> BackendResult<PrescriptionExtraction> {
            Ok(PrescriptionExtraction {
                name: Some("respuesta avanzada".into()),
                confidence: 0.75,
                ..Default::default()
            })
        }
    }

    struct FixedRecognizer(Vec<String>);

    impl TextRecognizer for FixedRecognizer {
        fn recognize_text(&self, _image: &[u8]) -> Result<Vec<String>, OcrError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_disabled_engine_short_circuits() {
        let config = EngineConfig {
            feature_enabled: false,
            prefer_advanced: true,
            advanced_available: true,
        };
        let (backend, _calls) = FailingBackend::new();
        let engine = CareEngine::new(config).with_backend(Box::new(backend));

        let result = engine.parse_quick_add("vacuna rabia mañana", None, reference());
        assert!(result.events.is_empty());
        assert_eq!(
            result.warnings,
            vec![vocab::ASSISTANT_DISABLED_WARNING.to_string()]
        );

        let extraction = engine.extract_prescription("Amoxicilina 500 mg", reference());
        assert_eq!(extraction, PrescriptionExtraction::default());

        let request = SeriesRequest::new(EventKind::Vaccine, "Rabia".into(), reference());
        assert!(engine.recommend(&request).is_empty());
    }

    #[test]
    fn test_backend_failure_falls_through_to_heuristics() {
        let (backend, _calls) = FailingBackend::new();
        let engine =
            CareEngine::new(EngineConfig::with_advanced(true)).with_backend(Box::new(backend));

        let result = engine.parse_quick_add("vacuna rabia mañana a las 3pm", None, reference());

        assert_eq!(result.events.len(), 1);
        let event = &result.events[0];
        assert_eq!(event.kind, EventKind::Vaccine);
        assert_eq!(event.base_name, "vacuna rabia");
        assert_eq!(
            event.date,
            Utc.with_ymd_and_hms(2024, 1, 2, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_exactly_one_backend_attempt_per_call() {
        let (backend, calls) = FailingBackend::new();
        let engine =
            CareEngine::new(EngineConfig::with_advanced(true)).with_backend(Box::new(backend));

        engine.parse_quick_add("vacuna rabia", None, reference());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        engine.extract_prescription("Amoxicilina 500 mg", reference());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_backend_not_consulted_when_unavailable() {
        let (backend, calls) = FailingBackend::new();
        let engine =
            CareEngine::new(EngineConfig::with_advanced(false)).with_backend(Box::new(backend));

        let result = engine.parse_quick_add("amoxicilina 500 mg", None, reference());
        assert_eq!(result.events.len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_backend_not_consulted_when_not_preferred() {
        let (backend, calls) = FailingBackend::new();
        let engine = CareEngine::new(EngineConfig::new()).with_backend(Box::new(backend));

        engine.parse_quick_add("amoxicilina 500 mg", None, reference());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_successful_backend_reply_is_returned_as_is() {
        let engine = CareEngine::new(EngineConfig::with_advanced(true))
            .with_backend(Box::new(CannedBackend));

        let result = engine.parse_quick_add("lo que sea", None, reference());
        assert_eq!(result.events[0].full_name, "respuesta avanzada");

        let extraction = engine.extract_prescription("lo que sea", reference());
        assert_eq!(extraction.name.as_deref(), Some("respuesta avanzada"));
        assert_eq!(extraction.confidence, 0.75);
    }

    #[test]
    fn test_scan_prescription_joins_lines() {
        let recognizer = FixedRecognizer(vec![
            "Amoxicilina 500 mg".into(),
            "Laboratorio: Cinfa".into(),
            "Tomar cada 8 horas".into(),
        ]);
        let engine = CareEngine::new(EngineConfig::new()).with_recognizer(Box::new(recognizer));

        let extraction = engine.scan_prescription(&[0u8; 4], reference()).unwrap();
        assert_eq!(extraction.name.as_deref(), Some("Amoxicilina"));
        assert_eq!(extraction.dosage.as_deref(), Some("500 mg"));
        assert_eq!(extraction.frequency.as_deref(), Some("cada 8 h"));
        assert_eq!(extraction.manufacturer.as_deref(), Some("Cinfa"));
    }

    #[test]
    fn test_scan_without_recognizer_errors() {
        let engine = CareEngine::new(EngineConfig::new());
        assert!(matches!(
            engine.scan_prescription(&[0u8; 4], reference()),
            Err(OcrError::NotConfigured)
        ));
    }

    #[test]
    fn test_recommend_passthrough() {
        let engine = CareEngine::default();
        let request = SeriesRequest::new(EventKind::Vaccine, "Rabia".into(), reference());

        let events = engine.recommend(&request);
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].full_name, "Rabia (dosis 1/3)");
    }

    #[test]
    fn test_analyze_weight_passthrough() {
        use chrono::Duration;

        let engine = CareEngine::default();
        let samples: Vec<WeightSample> = [13.0, 9.0, 11.0, 9.0, 11.0]
            .iter()
            .enumerate()
            .map(|(days_ago, kg)| {
                WeightSample::new(reference() - Duration::days(days_ago as i64), *kg)
            })
            .collect();

        let anomaly = engine.analyze_weight(&samples).unwrap();
        assert!(anomaly.is_anomalous);
        assert!((anomaly.z_score - 3.0).abs() < 1e-9);
    }
}
