// ABOUTME: Prompts for model-backed exercise selection
// ABOUTME: System prompt loaded at compile time plus a user prompt rendered from slot requirements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise Selection Prompts
//!
//! The system prompt lives in a markdown file beside this module and is
//! embedded at compile time. The user prompt lists the slot's parameters and
//! every candidate exercise as `- id: name (muscles: ..., equipment: ...)`,
//! then shows the JSON shape the model must return.

use std::fmt::Write;

use pierre_core::models::{Exercise, SlotRequirements};

use super::sanitize::sanitize_limitations;

/// System prompt for exercise selection
pub const EXERCISE_SELECTION_SYSTEM_PROMPT: &str = include_str!("exercise_selection_system.md");

const RESPONSE_SHAPE: &str = r#"Return your response as a JSON object with this exact structure:
{
  "exercises": [
    {
      "exercise_id": "the-exercise-slug",
      "exercise_name": "Exercise Name",
      "sets": 4,
      "reps": "8-10",
      "rest_seconds": 90,
      "notes": "Keep core tight",
      "order": 1,
      "superset_group": null
    }
  ],
  "workout_notes": "Brief overview of the workout focus",
  "estimated_duration_minutes": 45
}"#;

/// One candidate line
fn format_exercise(exercise: &Exercise) -> String {
    format!(
        "- {}: {} (muscles: {}, equipment: {})",
        exercise.id,
        exercise.name,
        exercise.primary_muscles.join(", "),
        exercise.equipment.join(", ")
    )
}

fn limitations_section(limitations: &[String]) -> Option<String> {
    let cleaned = sanitize_limitations(limitations);
    if cleaned.is_empty() {
        return None;
    }
    Some(format!(
        "**User Limitations (AVOID exercises that stress these areas):**\n- {}",
        cleaned.join("\n- ")
    ))
}

/// Render the user prompt for one workout
#[must_use]
pub fn build_user_prompt(requirements: &SlotRequirements) -> String {
    let count = requirements.exercise_count;
    let equipment = if requirements.available_equipment.is_empty() {
        "Bodyweight only".to_owned()
    } else {
        requirements.available_equipment.join(", ")
    };
    let deload = if requirements.is_deload {
        "Yes (reduce volume and intensity)"
    } else {
        "No"
    };

    let mut prompt = String::with_capacity(2048);
    let _ = writeln!(
        prompt,
        "Select {count} exercises for a {} workout.\n",
        requirements.workout_type
    );
    let _ = writeln!(
        prompt,
        "**Target Muscle Groups:** {}\n",
        requirements.target_muscles.join(", ")
    );
    let _ = writeln!(prompt, "**Available Equipment:** {equipment}\n");
    let _ = writeln!(prompt, "**Training Parameters:**");
    let _ = writeln!(prompt, "- Goal: {}", requirements.goal.title());
    let _ = writeln!(
        prompt,
        "- Experience Level: {}",
        requirements.experience_level.title()
    );
    let _ = writeln!(
        prompt,
        "- Intensity: {}%",
        (requirements.intensity_percent * 100.0) as u32
    );
    let _ = writeln!(
        prompt,
        "- Volume Modifier: {:.2}x",
        requirements.volume_modifier
    );
    let _ = writeln!(prompt, "- Deload Week: {deload}\n");

    if let Some(section) = limitations_section(&requirements.limitations) {
        let _ = writeln!(prompt, "{section}\n");
    }

    let _ = writeln!(prompt, "**Available Exercises (select from these only):**");
    for exercise in &requirements.candidates {
        let _ = writeln!(prompt, "{}", format_exercise(exercise));
    }

    let _ = writeln!(
        prompt,
        "\nSelect the best {count} exercises and provide:\n\
         1. Exercise order (most demanding first)\n\
         2. Sets and reps appropriate for the goal and intensity\n\
         3. Rest periods in seconds\n\
         4. Brief form cues or notes if helpful\n"
    );
    prompt.push_str(RESPONSE_SHAPE);
    prompt
}
