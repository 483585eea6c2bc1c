// ABOUTME: Template matching and scoring with a synthesized default structure fallback
// ABOUTME: Storage failures degrade to "no template" so generation can always proceed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use pierre_core::constants::templates::{
    DEFAULT_TEMPLATE_SESSIONS, DURATION_TOLERANCE_WEEKS, POPULARITY_SATURATION, SCORE_BASE,
    SCORE_DURATION_CLOSE, SCORE_DURATION_MATCH, SCORE_POPULARITY_MAX, SCORE_SESSIONS_CLOSE,
    SCORE_SESSIONS_MATCH,
};
use pierre_core::models::{
    ExperienceLevel, ProgramStructure, ProgramTemplate, TrainingGoal, WeekPattern,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::splits::{default_split, goal_focus};
use super::TemplateRepository;

/// Weeks per mesocycle in synthesized structures
const DEFAULT_MESOCYCLE_WEEKS: u32 = 4;
/// Deload cadence recorded on synthesized structures
const DEFAULT_DELOAD_FREQUENCY: u32 = 4;

/// A stored template with its match score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateMatch {
    /// The matched template
    pub template: ProgramTemplate,
    /// Higher is better
    pub score: f64,
    /// Human-readable scoring breakdown
    pub reasons: Vec<String>,
}

/// Picks a stored template for a request or synthesizes one
#[derive(Clone)]
pub struct TemplateSelector {
    repository: Arc<dyn TemplateRepository>,
}

impl TemplateSelector {
    /// Create a selector over a template store
    #[must_use]
    pub fn new(repository: Arc<dyn TemplateRepository>) -> Self {
        Self { repository }
    }

    /// Templates for a goal and experience level, most used first
    ///
    /// Storage failures are logged and yield an empty list.
    pub async fn match_templates(
        &self,
        goal: TrainingGoal,
        experience_level: ExperienceLevel,
        sessions_per_week: Option<u32>,
        duration_weeks: Option<u32>,
    ) -> Vec<ProgramTemplate> {
        match self
            .repository
            .get_by_criteria(goal, experience_level, sessions_per_week, duration_weeks)
            .await
        {
            Ok(templates) => templates,
            Err(e) => {
                warn!(
                    goal = %goal,
                    experience = %experience_level,
                    error = %e,
                    "Template lookup failed, continuing without a template"
                );
                Vec::new()
            }
        }
    }

    /// Highest scoring template within the duration window, if any
    pub async fn select_best_template(
        &self,
        goal: TrainingGoal,
        experience_level: ExperienceLevel,
        sessions_per_week: u32,
        duration_weeks: u32,
    ) -> Option<TemplateMatch> {
        let templates = self
            .match_templates(goal, experience_level, None, Some(duration_weeks))
            .await;
        if templates.is_empty() {
            info!(goal = %goal, experience = %experience_level, "No templates found");
            return None;
        }

        let mut scored: Vec<TemplateMatch> = templates
            .into_iter()
            .map(|template| score_template(template, sessions_per_week, duration_weeks))
            .collect();
        // stable: equal scores keep usage order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        let best = scored.into_iter().next()?;
        info!(
            template = %best.template.name,
            score = best.score,
            reasons = %best.reasons.join(", "),
            "Selected template"
        );
        Some(best)
    }

    /// Synthesized structure for requests no stored template serves
    #[must_use]
    pub fn default_structure(
        goal: TrainingGoal,
        sessions_per_week: u32,
        duration_weeks: u32,
    ) -> ProgramStructure {
        let (split_type, workouts) = default_split(goal, sessions_per_week);
        debug!(split_type, sessions_per_week, "Using default workout structure");
        ProgramStructure {
            mesocycle_length: DEFAULT_MESOCYCLE_WEEKS.min(duration_weeks.max(1)),
            deload_frequency: DEFAULT_DELOAD_FREQUENCY,
            split_type: split_type.to_owned(),
            weeks: vec![WeekPattern {
                focus: goal_focus(goal).to_owned(),
                workouts,
            }],
        }
    }

    /// Record one use of a template
    pub async fn increment_usage_count(&self, template_id: Uuid) -> bool {
        increment_usage_count(self.repository.as_ref(), template_id).await
    }
}

/// Sessions per week a template is built for
fn template_sessions(template: &ProgramTemplate) -> u32 {
    let sessions = template
        .sessions_per_week()
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_TEMPLATE_SESSIONS);
    u32::try_from(sessions).unwrap_or(u32::MAX)
}

/// Score a template against the requested sessions and duration
#[must_use]
pub fn score_template(
    template: ProgramTemplate,
    sessions_per_week: u32,
    duration_weeks: u32,
) -> TemplateMatch {
    let mut score = SCORE_BASE;
    let mut reasons = vec!["Goal and experience match".to_owned()];

    let sessions = template_sessions(&template);
    if sessions == sessions_per_week {
        score += SCORE_SESSIONS_MATCH;
        reasons.push(format!("Exact sessions match ({sessions_per_week}/week)"));
    } else if sessions.abs_diff(sessions_per_week) <= 1 {
        score += SCORE_SESSIONS_CLOSE;
        reasons.push(format!(
            "Close sessions match ({sessions} vs {sessions_per_week})"
        ));
    }

    let duration = template.duration_weeks;
    if duration == duration_weeks {
        score += SCORE_DURATION_MATCH;
        reasons.push(format!("Exact duration match ({duration_weeks} weeks)"));
    } else if duration.abs_diff(duration_weeks) <= DURATION_TOLERANCE_WEEKS {
        score += SCORE_DURATION_CLOSE;
        reasons.push(format!(
            "Close duration ({duration} vs {duration_weeks} weeks)"
        ));
    }

    let usage = template.usage_count;
    score += (usage as f64 / POPULARITY_SATURATION).min(1.0) * SCORE_POPULARITY_MAX;
    if usage > 0 {
        reasons.push(format!("Used {usage} times"));
    }

    TemplateMatch {
        template,
        score,
        reasons,
    }
}

/// Add one to a template's usage count
///
/// Prefers the store's atomic increment. Stores without one fall back to a
/// read-modify-write, which can lose increments under concurrent use.
/// Failures are logged and reported as `false`.
pub async fn increment_usage_count(repository: &dyn TemplateRepository, template_id: Uuid) -> bool {
    match repository.try_increment_usage_atomic(template_id).await {
        Ok(Some(updated)) => return updated,
        Ok(None) => {}
        Err(e) => {
            warn!(template_id = %template_id, error = %e, "Atomic usage increment failed");
            return false;
        }
    }

    warn!(
        template_id = %template_id,
        "Template store lacks atomic increment; concurrent usage updates may be lost"
    );
    let current = match repository.get_by_id(template_id).await {
        Ok(Some(template)) => template.usage_count,
        Ok(None) => return false,
        Err(e) => {
            warn!(template_id = %template_id, error = %e, "Usage count read failed");
            return false;
        }
    };
    repository
        .set_usage_count(template_id, current.saturating_add(1))
        .await
        .unwrap_or_else(|e| {
            warn!(template_id = %template_id, error = %e, "Usage count write failed");
            false
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::memory::system_templates;

    fn ppl() -> ProgramTemplate {
        system_templates().remove(0)
    }

    #[test]
    fn test_exact_match_scores_highest() {
        // 20 + 30 + 25 + 15
        let exact = score_template(ppl(), 4, 8);
        assert!((exact.score - 90.0).abs() < 1e-9);
        assert_eq!(exact.reasons.len(), 4);
        assert_eq!(exact.reasons[1], "Exact sessions match (4/week)");
    }

    #[test]
    fn test_close_match_reasons() {
        // 20 + 15 + 10 + 15
        let close = score_template(ppl(), 3, 10);
        assert!((close.score - 60.0).abs() < 1e-9);
        assert_eq!(close.reasons[1], "Close sessions match (4 vs 3)");
        assert_eq!(close.reasons[2], "Close duration (8 vs 10 weeks)");
    }

    #[test]
    fn test_popularity_saturates() {
        let mut template = ppl();
        template.usage_count = 0;
        let unused = score_template(template.clone(), 1, 20);
        assert!((unused.score - SCORE_BASE).abs() < 1e-9);
        assert_eq!(unused.reasons.len(), 1);

        template.usage_count = 50;
        let half = score_template(template, 1, 20);
        assert!((half.score - 27.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_structure_counts_as_three_sessions() {
        let mut template = ppl();
        template.structure.weeks.clear();
        assert_eq!(template_sessions(&template), 3);
    }
}
