// ABOUTME: Default exercise catalog covering push, pull, leg, and bodyweight movements
// ABOUTME: Seed data for the in-memory repository used in composition and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::{Exercise, ExerciseCategory, MovementPattern};

/// Common gym exercises in catalog order
#[must_use]
pub fn default_exercises() -> Vec<Exercise> {
    use ExerciseCategory::{Compound, Isolation};
    use MovementPattern::{Hinge, Pull, Push, Squat};

    vec![
        // Push
        Exercise::new("barbell-bench-press", "Barbell Bench Press", Push, Compound)
            .with_primary(&["chest"])
            .with_secondary(&["anterior_deltoid", "triceps"])
            .with_equipment(&["barbell", "bench"])
            .with_aliases(&["Bench Press", "Flat Bench Press"])
            .with_one_rep_max(),
        Exercise::new("incline-dumbbell-press", "Incline Dumbbell Press", Push, Compound)
            .with_primary(&["chest", "anterior_deltoid"])
            .with_secondary(&["triceps"])
            .with_equipment(&["dumbbells", "bench"])
            .with_aliases(&["Incline DB Press"])
            .with_one_rep_max(),
        Exercise::new("overhead-press", "Overhead Press", Push, Compound)
            .with_primary(&["anterior_deltoid"])
            .with_secondary(&["triceps", "chest"])
            .with_equipment(&["barbell"])
            .with_aliases(&["OHP", "Military Press"])
            .with_one_rep_max(),
        Exercise::new("tricep-pushdown", "Tricep Pushdown", Push, Isolation)
            .with_primary(&["triceps"])
            .with_equipment(&["cables"]),
        // Pull
        Exercise::new("barbell-row", "Barbell Row", Pull, Compound)
            .with_primary(&["lats", "rhomboids"])
            .with_secondary(&["biceps", "rear_deltoid"])
            .with_equipment(&["barbell"])
            .with_aliases(&["Bent Over Row"])
            .with_one_rep_max(),
        Exercise::new("lat-pulldown", "Lat Pulldown", Pull, Compound)
            .with_primary(&["lats"])
            .with_secondary(&["biceps"])
            .with_equipment(&["cables"]),
        Exercise::new("dumbbell-curl", "Dumbbell Curl", Pull, Isolation)
            .with_primary(&["biceps"])
            .with_secondary(&["forearms"])
            .with_equipment(&["dumbbells"])
            .with_aliases(&["Bicep Curl"]),
        // Legs
        Exercise::new("barbell-squat", "Barbell Squat", Squat, Compound)
            .with_primary(&["quadriceps", "glutes"])
            .with_secondary(&["hamstrings", "core"])
            .with_equipment(&["barbell", "squat_rack"])
            .with_aliases(&["Back Squat"])
            .with_one_rep_max(),
        Exercise::new("romanian-deadlift", "Romanian Deadlift", Hinge, Compound)
            .with_primary(&["hamstrings", "glutes"])
            .with_secondary(&["lower_back"])
            .with_equipment(&["barbell"])
            .with_aliases(&["RDL"])
            .with_one_rep_max(),
        Exercise::new("leg-press", "Leg Press", Squat, Compound)
            .with_primary(&["quadriceps"])
            .with_secondary(&["glutes"])
            .with_equipment(&["leg_press_machine"]),
        Exercise::new("leg-curl", "Leg Curl", Hinge, Isolation)
            .with_primary(&["hamstrings"])
            .with_equipment(&["leg_curl_machine"]),
        Exercise::new("calf-raise", "Calf Raise", Push, Isolation)
            .with_primary(&["calves"])
            .with_equipment(&["dumbbells"]),
        // Bodyweight
        Exercise::new("push-up", "Push-Up", Push, Compound)
            .with_primary(&["chest"])
            .with_secondary(&["anterior_deltoid", "triceps"])
            .with_aliases(&["Pushup", "Press-Up"]),
        Exercise::new("pull-up", "Pull-Up", Pull, Compound)
            .with_primary(&["lats"])
            .with_secondary(&["biceps"])
            .with_equipment(&["pull_up_bar"])
            .with_aliases(&["Pullup"]),
    ]
}
