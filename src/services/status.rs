// ABOUTME: Dashboard computations: per-attribute stats, the level state, and the overview
// ABOUTME: Fetches rows from the record store and reduces them with the status engines

use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::resources::ServerResources;
use futures_util::future::join_all;
use serde::Serialize;
use status_core::constants::attributes;
use status_core::models::{PersonalConstants, Record};
use status_engine::{
    compute_attribute_score, compute_experience_state, Attribute, Breakdown, LevelState,
};

/// One stat as served by `/api/stats/:name`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatResponse {
    /// Requested name, first letter upper and the rest lower
    pub name: String,
    /// Rounded total (or total experience for the experience pseudo-stat)
    pub value: f64,
    /// Per-metric scores, an error marker, or the level breakdown
    pub breakdown: StatBreakdown,
}

/// Breakdown shapes a stat can carry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatBreakdown {
    /// Attribute scores
    Score(Breakdown),
    /// Experience pseudo-stat
    Experience(ExperienceBreakdown),
}

/// Breakdown of the experience pseudo-stat
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExperienceBreakdown {
    /// Total experience
    pub experience: f64,
    /// Current level
    pub current_level: u32,
    /// Percentage of the current level completed
    pub progress_percentage: f64,
}

/// Everything the dashboard renders in one response
#[derive(Debug, Clone, Serialize)]
pub struct StatusOverview {
    /// The six attributes, in dashboard order
    pub attributes: Vec<StatResponse>,
    /// Level state
    pub experience: LevelState,
    /// Whose stats these are
    pub profile: PersonalConstants,
}

/// First letter upper, rest lower
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

/// Sum the experience log and place it on the configured curve
///
/// # Errors
///
/// Returns an error if the experience log cannot be read
pub async fn level_state(resources: &ServerResources) -> AppResult<LevelState> {
    let rows: Vec<_> = resources
        .database
        .list_experience()
        .await?
        .into_iter()
        .map(Record::into_fields)
        .collect();

    Ok(compute_experience_state(&rows, &resources.level_curve))
}

/// Compute one stat by name
///
/// Unknown attributes and attributes without rows are reported inside the
/// breakdown, not as errors.
///
/// # Errors
///
/// Returns `INVALID_INPUT` for a blank name, or a database error if rows
/// cannot be fetched
pub async fn stat(resources: &ServerResources, name: &str) -> AppResult<StatResponse> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::invalid_input("Missing stat name"));
    }

    if name.eq_ignore_ascii_case(attributes::EXPERIENCE) {
        let state = level_state(resources).await?;
        return Ok(StatResponse {
            name: capitalize(name),
            value: state.total_experience,
            breakdown: StatBreakdown::Experience(ExperienceBreakdown {
                experience: state.total_experience,
                current_level: state.current_level,
                progress_percentage: state.progress_percentage,
            }),
        });
    }

    // Unknown names never reach the store
    let rows = if Attribute::parse(name).is_some() {
        resources
            .database
            .list_attribute_logs_for(name)
            .await?
            .into_iter()
            .map(Record::into_fields)
            .collect()
    } else {
        Vec::new()
    };

    let score = compute_attribute_score(Some(name), &rows, resources.profile());
    AppLogger::log_stat_computed(name, score.total, score.breakdown.error_message().as_deref());

    Ok(StatResponse {
        name: capitalize(name),
        value: score.total,
        breakdown: StatBreakdown::Score(score.breakdown),
    })
}

/// Evaluate every attribute concurrently, then the level state
///
/// # Errors
///
/// Returns the first database error encountered
pub async fn overview(resources: &ServerResources) -> AppResult<StatusOverview> {
    let attributes = join_all(
        Attribute::ALL
            .into_iter()
            .map(|attribute| stat(resources, attribute.as_str())),
    )
    .await
    .into_iter()
    .collect::<AppResult<Vec<_>>>()?;

    Ok(StatusOverview {
        attributes,
        experience: level_state(resources).await?,
        profile: resources.profile().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("strength"), "Strength");
        assert_eq!(capitalize("sTRENGTH"), "Strength");
        assert_eq!(capitalize("WISDOM"), "Wisdom");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_experience_breakdown_shape() {
        let stat = StatResponse {
            name: "Experience".to_owned(),
            value: 150.0,
            breakdown: StatBreakdown::Experience(ExperienceBreakdown {
                experience: 150.0,
                current_level: 2,
                progress_percentage: 50.0,
            }),
        };
        let json = serde_json::to_value(&stat).unwrap();
        assert_eq!(json["breakdown"]["current_level"], 2);
        assert_eq!(json["breakdown"]["experience"], 150.0);
    }
}
