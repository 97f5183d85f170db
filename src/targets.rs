//! Built-in export targets
//!
//! The fixed set of collections this tool archives: one events target, one
//! users target, the open-question proposal collections and the
//! closed-question questionnaires. Keys double as file stems and progress
//! labels; ids are the platform's opaque node identifiers.

/// The four data kinds the exporter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Proposals,
    Replies,
    Events,
    Users,
}

/// One named data collection to export
#[derive(Debug, Clone)]
pub struct ExportTarget {
    pub kind: TargetKind,
    /// Human-readable key used for file naming and progress display
    pub key: String,
    /// Opaque source node id (collect step or questionnaire), where applicable
    pub source_id: Option<String>,
}

impl ExportTarget {
    /// The users collection
    pub fn users() -> Self {
        Self {
            kind: TargetKind::Users,
            key: "USERS".to_string(),
            source_id: None,
        }
    }

    /// The events collection
    pub fn events() -> Self {
        Self {
            kind: TargetKind::Events,
            key: "EVENTS".to_string(),
            source_id: None,
        }
    }

    /// A proposal collection identified by its collect step id
    pub fn proposals(key: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Proposals,
            key: key.into(),
            source_id: Some(id.into()),
        }
    }

    /// A questionnaire identified by its node id
    pub fn replies(key: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Replies,
            key: key.into(),
            source_id: Some(id.into()),
        }
    }
}

/// The open-question proposal collections (collect step ids)
const PROPOSALS_TO_EXPORT: &[(&str, &str)] = &[
    (
        "LA_TRANSITION_ECOLOGIQUE",
        "Q29sbGVjdFN0ZXA6OTgxZmM3MDUtMWNlMC0xMWU5LTk0ZDItZmExNjNlZWIxMWUx",
    ),
    (
        "LA_FISCALITE_ET_LES_DEPENSES_PUBLIQUES",
        "Q29sbGVjdFN0ZXA6ZjhlYWUxYmMtMWNlMC0xMWU5LTk0ZDItZmExNjNlZWIxMWUx",
    ),
    (
        "DEMOCRATIE_ET_CITOYENNETE",
        "Q29sbGVjdFN0ZXA6OTNhODAyZmQtMWNkZC0xMWU5LTk0ZDItZmExNjNlZWIxMWUx",
    ),
    (
        "ORGANISATION_DE_LETAT_ET_DES_SERVICES_PUBLICS",
        "Q29sbGVjdFN0ZXA6MjNmY2UwNjMtMWNlMS0xMWU5LTk0ZDItZmExNjNlZWIxMWUx",
    ),
];

/// The closed-question questionnaires (questionnaire node ids)
const QUESTIONNAIRES_TO_EXPORT: &[(&str, &str)] = &[
    (
        "QUESTIONNAIRE_RESTITUER_UNE_RIL",
        "UXVlc3Rpb25uYWlyZToxNGNhMTIyNi0xZTEzLTExZTktOTRkMi1mYTE2M2VlYjExZTE=",
    ),
    (
        "QUESTIONNAIRE_ORGANISER_UNE_RIL",
        "UXVlc3Rpb25uYWlyZTo4ZDk1ZjQ1My0xMmEyLTExZTktODljYy0wMjQyYWMxMTAwMDQ=",
    ),
    (
        "QUESTIONNAIRE_LA_TRANSITION_ECOLOGIQUE",
        "UXVlc3Rpb25uYWlyZTo5ZTVkY2Q0ZC0xYzlmLTExZTktOTRkMi1mYTE2M2VlYjExZTE=",
    ),
    (
        "QUESTIONNAIRE_LA_FISCALITE_ET_LES_DEPENSES_PUBLIQUES",
        "UXVlc3Rpb25uYWlyZTo5NTFhMTZkZS0xY2EyLTExZTktOTRkMi1mYTE2M2VlYjExZTE=",
    ),
    (
        "QUESTIONNAIRE_DEMOCRATIE_ET_CITOYENNETE",
        "UXVlc3Rpb25uYWlyZTo5NTNjYjdjYS0xY2E0LTExZTktOTRkMi1mYTE2M2VlYjExZTE=",
    ),
    (
        "QUESTIONNAIRE_ORGANISATION_DE_LETAT_ET_DES_SERVICES_PUBLICS",
        "UXVlc3Rpb25uYWlyZTowN2I3ZTNiOC0xY2E3LTExZTktOTRkMi1mYTE2M2VlYjExZTE=",
    ),
];

/// All built-in targets, in launch and report order
///
/// The RIL questionnaires come right after users; then events, the
/// open-question collections and the remaining questionnaires.
pub fn builtin_targets() -> Vec<ExportTarget> {
    let mut targets = vec![ExportTarget::users()];
    for (key, id) in &QUESTIONNAIRES_TO_EXPORT[..2] {
        targets.push(ExportTarget::replies(*key, *id));
    }
    targets.push(ExportTarget::events());
    for (key, id) in PROPOSALS_TO_EXPORT {
        targets.push(ExportTarget::proposals(*key, *id));
    }
    for (key, id) in &QUESTIONNAIRES_TO_EXPORT[2..] {
        targets.push(ExportTarget::replies(*key, *id));
    }
    targets
}
