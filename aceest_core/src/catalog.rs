//! Built-in reference content: exercise suggestions and diet plans.
//!
//! This content is static and never touches the workout store.

use crate::Category;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A suggested exercise for one workout phase
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExerciseSuggestion {
    pub name: String,
    pub suggested_minutes: u32,
    pub note: String,
}

/// Training goal a diet plan is written for
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DietGoal {
    WeightLoss,
    MuscleGain,
    Endurance,
}

/// Meal suggestions for a goal
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DietPlan {
    pub goal: DietGoal,
    pub title: String,
    pub meals: Vec<String>,
}

/// All static reference content served alongside the log
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    pub exercises: BTreeMap<Category, Vec<ExerciseSuggestion>>,
    pub diet: Vec<DietPlan>,
}

static REFERENCE_CATALOG: Lazy<ReferenceCatalog> = Lazy::new(build_reference_catalog);

/// Get a reference to the cached reference catalog
pub fn get_reference_catalog() -> &'static ReferenceCatalog {
    &REFERENCE_CATALOG
}

fn suggestion(name: &str, suggested_minutes: u32, note: &str) -> ExerciseSuggestion {
    ExerciseSuggestion {
        name: name.into(),
        suggested_minutes,
        note: note.into(),
    }
}

/// Builds the reference catalog
pub fn build_reference_catalog() -> ReferenceCatalog {
    let mut exercises = BTreeMap::new();

    exercises.insert(
        Category::WarmUp,
        vec![
            suggestion("Jumping Jacks", 3, "Raise heart rate gradually"),
            suggestion("Arm Circles", 2, "Forward then backward"),
            suggestion("Light Jog", 5, "Conversational pace"),
            suggestion("Dynamic Leg Swings", 3, "Front-to-back and side-to-side"),
        ],
    );

    exercises.insert(
        Category::Workout,
        vec![
            suggestion("Push-ups", 10, "3 sets to near failure"),
            suggestion("Squats", 15, "Bodyweight or goblet"),
            suggestion("Running", 30, "Steady state"),
            suggestion("Plank", 5, "Hold 45s, rest 15s"),
            suggestion("Cycling", 40, "Zone 2"),
        ],
    );

    exercises.insert(
        Category::CoolDown,
        vec![
            suggestion("Walking", 5, "Let heart rate settle"),
            suggestion("Hamstring Stretch", 3, "Hold each side 30s"),
            suggestion("Child's Pose", 2, "Breathe slowly"),
            suggestion("Foam Rolling", 5, "Quads, calves, upper back"),
        ],
    );

    let diet = vec![
        DietPlan {
            goal: DietGoal::WeightLoss,
            title: "Weight Loss".into(),
            meals: vec![
                "Oatmeal with berries".into(),
                "Grilled chicken salad".into(),
                "Steamed vegetables with quinoa".into(),
                "Greek yogurt".into(),
            ],
        },
        DietPlan {
            goal: DietGoal::MuscleGain,
            title: "Muscle Gain".into(),
            meals: vec![
                "Eggs and whole-grain toast".into(),
                "Chicken breast with brown rice".into(),
                "Salmon with sweet potato".into(),
                "Protein shake with banana".into(),
            ],
        },
        DietPlan {
            goal: DietGoal::Endurance,
            title: "Endurance".into(),
            meals: vec![
                "Banana and peanut butter".into(),
                "Whole-wheat pasta with lean mince".into(),
                "Lentil soup".into(),
                "Trail mix".into(),
            ],
        },
    ];

    ReferenceCatalog { exercises, diet }
}

impl ReferenceCatalog {
    /// Suggestions for one category (empty if none)
    pub fn exercises_for(&self, category: Category) -> &[ExerciseSuggestion] {
        self.exercises
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn diet_plan(&self, goal: DietGoal) -> Option<&DietPlan> {
        self.diet.iter().find(|p| p.goal == goal)
    }

    /// Validate the catalog for structural problems
    ///
    /// Returns a list of problems (empty if valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for category in Category::ALL {
            let suggestions = self.exercises_for(category);
            if suggestions.is_empty() {
                errors.push(format!("Category {} has no exercise suggestions", category));
            }
            for s in suggestions {
                if s.suggested_minutes == 0 {
                    errors.push(format!(
                        "Suggestion '{}' in {} has zero suggested minutes",
                        s.name, category
                    ));
                }
            }
        }

        for plan in &self.diet {
            if plan.meals.is_empty() {
                errors.push(format!("Diet plan '{}' has no meals", plan.title));
            }
        }

        errors
    }
}
