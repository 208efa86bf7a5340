//! Round template validation shared by create and update.

use serde_json::Value;

use super::domain::{RoundTemplate, RoundTemplateDraft};
use crate::error::ServiceError;
use crate::ids::RoundTemplateId;

/// True when the sequences, sorted, are exactly `1..=N`.
pub fn sequences_are_contiguous<I>(sequences: I) -> bool
where
    I: IntoIterator<Item = u32>,
{
    let mut sorted: Vec<u32> = sequences.into_iter().collect();
    sorted.sort_unstable();
    sorted
        .iter()
        .zip(1u32..)
        .all(|(sequence, expected)| *sequence == expected)
}

/// Field checks reject as validation errors; a broken ordering is forbidden.
pub fn validate_drafts(drafts: &[RoundTemplateDraft]) -> Result<(), ServiceError> {
    if drafts.is_empty() {
        return Err(ServiceError::validation(
            "an assessment needs at least one round",
        ));
    }

    for draft in drafts {
        if draft.name.trim().is_empty() {
            return Err(ServiceError::validation("round name must not be empty"));
        }
        if draft.duration == 0 {
            return Err(ServiceError::validation(format!(
                "round '{}' must last at least one minute",
                draft.name
            )));
        }
        if draft.sequence == 0 {
            return Err(ServiceError::validation(format!(
                "round '{}' must have a sequence of at least 1",
                draft.name
            )));
        }
    }

    if !sequences_are_contiguous(drafts.iter().map(|draft| draft.sequence)) {
        return Err(ServiceError::forbidden(
            "Round sequences must be consecutive starting from 1",
        ));
    }

    Ok(())
}

/// Materializes validated drafts ordered by sequence.
pub fn build_rounds(drafts: Vec<RoundTemplateDraft>) -> Vec<RoundTemplate> {
    let mut rounds: Vec<RoundTemplate> = drafts
        .into_iter()
        .map(|draft| RoundTemplate {
            id: RoundTemplateId::generate(),
            round_type: draft.round_type,
            name: draft.name.trim().to_string(),
            description: draft.description,
            duration: draft.duration,
            sequence: draft.sequence,
            config: draft.config.unwrap_or(Value::Null),
        })
        .collect();
    rounds.sort_by_key(|round| round.sequence);
    rounds
}

/// Sum of round minutes; a total that does not fit is a validation error.
pub fn total_duration(rounds: &[RoundTemplate]) -> Result<u32, ServiceError> {
    rounds
        .iter()
        .try_fold(0u32, |total, round| total.checked_add(round.duration))
        .ok_or_else(|| ServiceError::validation("total assessment duration is too large"))
}
