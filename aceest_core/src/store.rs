//! In-memory categorized workout store.
//!
//! The store owns one sequence of entries per category. Every category is
//! present from construction onward and no other key is ever added. Entries
//! are append-only; a rejected submission leaves the store untouched.

use crate::{
    stats, CategorizedEntry, Category, CategoryMap, DurationInput, Error, Listing, Progress,
    Result, Summary, TextInput, WorkoutEntry, WorkoutInput,
};
use chrono::{Local, NaiveDateTime, SubsecRound};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-lifetime workout log shared by all request handlers
#[derive(Debug)]
pub struct WorkoutStore {
    workouts: RwLock<CategoryMap>,
}

impl Default for WorkoutStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutStore {
    /// Create a store with every category bound to an empty sequence
    pub fn new() -> Self {
        let workouts = Category::ALL.iter().map(|&c| (c, Vec::new())).collect();
        Self {
            workouts: RwLock::new(workouts),
        }
    }

    // Appends are all-or-nothing, so a panicking holder can't leave a
    // half-written map behind.
    fn read(&self) -> RwLockReadGuard<'_, CategoryMap> {
        self.workouts.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CategoryMap> {
        self.workouts.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate and append an entry stamped with the current local time
    pub fn add(
        &self,
        category: &str,
        exercise: &str,
        duration: impl Into<DurationInput>,
    ) -> Result<WorkoutEntry> {
        let category: Category = category.parse()?;
        let (exercise, duration) = validate(Some(exercise), Some(&duration.into()))?;
        Ok(self.append(category, exercise, duration, wall_clock))
    }

    /// Validate and append an entry with an explicit timestamp
    pub fn add_at(
        &self,
        category: &str,
        exercise: &str,
        duration: &DurationInput,
        now: NaiveDateTime,
    ) -> Result<WorkoutEntry> {
        let category: Category = category.parse()?;
        let (exercise, duration) = validate(Some(exercise), Some(duration))?;
        Ok(self.append(category, exercise, duration, || now))
    }

    /// Apply a decoded submission, defaulting the category to `Workout`
    ///
    /// A category that is not a string is reported as an invalid category,
    /// and an exercise that is not a string as a missing one. Returns the
    /// category the entry was filed under alongside the entry.
    pub fn submit(&self, input: &WorkoutInput) -> Result<(Category, WorkoutEntry)> {
        let category = match &input.category {
            None => Category::default(),
            Some(raw) => match raw.as_text() {
                Some(name) => name.parse()?,
                None => {
                    return Err(Error::InvalidCategory {
                        allowed: Category::names(),
                    })
                }
            },
        };
        let exercise = input.exercise.as_ref().and_then(TextInput::as_text);

        let (exercise, duration) = validate(exercise, input.duration.as_ref())?;
        Ok((category, self.append(category, exercise, duration, wall_clock)))
    }

    /// Stamp and push an already validated entry
    ///
    /// The timestamp is taken under the write lock so insertion order and
    /// timestamp order agree.
    fn append(
        &self,
        category: Category,
        exercise: String,
        duration: u32,
        stamp: impl FnOnce() -> NaiveDateTime,
    ) -> WorkoutEntry {
        let entry = {
            let mut workouts = self.write();
            let entry = WorkoutEntry {
                exercise,
                duration,
                timestamp: stamp(),
            };
            workouts.entry(category).or_default().push(entry.clone());
            entry
        };

        tracing::info!(
            "Logged {} min of '{}' under {}",
            entry.duration,
            entry.exercise,
            category
        );
        entry
    }

    /// Snapshot of the grouped map
    pub fn by_category(&self) -> CategoryMap {
        self.read().clone()
    }

    /// Total number of entries across all categories
    pub fn len(&self) -> usize {
        self.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattened listing in category order, then insertion order
    pub fn list(&self) -> Listing {
        let by_category = self.by_category();
        let workouts: Vec<CategorizedEntry> = iter_flat(&by_category)
            .map(|(category, entry)| CategorizedEntry {
                category,
                entry: entry.clone(),
            })
            .collect();

        tracing::debug!("Listed {} workouts", workouts.len());
        Listing {
            count: workouts.len(),
            workouts,
            by_category,
        }
    }

    /// Total minutes with a motivational message
    pub fn summarize(&self) -> Summary {
        stats::summarize(self.by_category())
    }

    /// Per-category totals and percentage shares
    pub fn progress(&self) -> Progress {
        stats::compute_progress(&self.read())
    }
}

/// Current local time at the precision timestamps are displayed with
fn wall_clock() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Validate the exercise name and duration of a submission
///
/// The category is parsed by the caller first. After that the exercise
/// name is checked, then the duration; the first failure wins.
fn validate(exercise: Option<&str>, duration: Option<&DurationInput>) -> Result<(String, u32)> {
    let exercise = exercise.map(str::trim).unwrap_or("");
    if exercise.is_empty() {
        return Err(Error::MissingField { field: "exercise" });
    }

    let duration = duration
        .ok_or_else(|| Error::InvalidDuration("missing".into()))?
        .to_minutes()?;

    Ok((exercise.to_string(), duration))
}

/// Lazily walk a grouped map in category order, then insertion order
pub fn iter_flat(workouts: &CategoryMap) -> impl Iterator<Item = (Category, &WorkoutEntry)> {
    workouts
        .iter()
        .flat_map(|(&category, entries)| entries.iter().map(move |e| (category, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MotivationTier, TIMESTAMP_FORMAT};
    use std::sync::Arc;
    use std::thread;

    fn at(ts: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn test_new_store_has_all_categories() {
        let store = WorkoutStore::new();
        let map = store.by_category();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), Category::ALL.to_vec());
        assert!(map.values().all(Vec::is_empty));
    }

    #[test]
    fn test_fresh_store_lists_nothing() {
        let store = WorkoutStore::new();
        let listing = store.list();
        assert_eq!(listing.count, 0);
        assert!(listing.workouts.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_warmup_entry() {
        crate::logging::init_test();
        let store = WorkoutStore::new();
        let entry = store.add("Warm-up", "Stretching", 10).unwrap();
        assert_eq!(entry.exercise, "Stretching");
        assert_eq!(entry.duration, 10);

        let listing = store.list();
        assert_eq!(listing.count, 1);
        assert_eq!(listing.workouts[0].category, Category::WarmUp);
        assert_eq!(listing.workouts[0].entry, entry);
    }

    #[test]
    fn test_add_trims_exercise_and_stamps_time() {
        let store = WorkoutStore::new();
        let now = at("2024-05-01 18:05:09");
        let entry = store
            .add_at("Cool-down", "  Yoga  ", &DurationInput::from(15), now)
            .unwrap();
        assert_eq!(entry.exercise, "Yoga");
        assert_eq!(entry.timestamp, now);
        assert_eq!(
            entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            "2024-05-01 18:05:09"
        );
    }

    #[test]
    fn test_invalid_category_leaves_store_unchanged() {
        let store = WorkoutStore::new();
        let err = store.add("InvalidCat", "Test", 10).unwrap_err();
        assert!(matches!(err, Error::InvalidCategory { .. }));
        assert_eq!(store.list().count, 0);
    }

    #[test]
    fn test_category_checked_first() {
        let store = WorkoutStore::new();
        let err = store.add("Stretch", "", "abc").unwrap_err();
        assert!(matches!(err, Error::InvalidCategory { .. }));
    }

    #[test]
    fn test_blank_exercise_rejected() {
        let store = WorkoutStore::new();
        for blank in ["", "   ", "\t\n"] {
            let err = store.add("Workout", blank, 10).unwrap_err();
            assert!(matches!(err, Error::MissingField { field: "exercise" }));
        }
        // Exercise is checked before duration
        let err = store.add("Workout", " ", -1).unwrap_err();
        assert!(matches!(err, Error::MissingField { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_bad_durations_rejected() {
        let store = WorkoutStore::new();
        assert!(matches!(
            store.add("Workout", "X", -5),
            Err(Error::InvalidDuration(_))
        ));
        assert!(matches!(
            store.add("Workout", "X", "abc"),
            Err(Error::InvalidDuration(_))
        ));
        assert!(matches!(
            store.add("Workout", "X", 0),
            Err(Error::InvalidDuration(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_fractional_duration_truncates() {
        let store = WorkoutStore::new();
        let entry = store.add("Workout", "Cycling", 30.5).unwrap();
        assert_eq!(entry.duration, 30);
    }

    #[test]
    fn test_summary_tiers() {
        let store = WorkoutStore::new();
        store.add("Workout", "Running", 45).unwrap();
        let summary = store.summarize();
        assert_eq!(summary.total_time, 45);
        assert_eq!(summary.motivation.tier, MotivationTier::Medium);

        let store = WorkoutStore::new();
        store.add("Workout", "Marathon", 90).unwrap();
        let summary = store.summarize();
        assert_eq!(summary.total_time, 90);
        assert_eq!(summary.motivation.tier, MotivationTier::High);

        assert_eq!(WorkoutStore::new().summarize().motivation.tier, MotivationTier::Low);
    }

    #[test]
    fn test_listing_order_is_category_then_insertion() {
        let store = WorkoutStore::new();
        store.add("Cool-down", "Walk", 5).unwrap();
        store.add("Workout", "Squats", 20).unwrap();
        store.add("Warm-up", "Jog", 10).unwrap();
        store.add("Workout", "Lunges", 15).unwrap();

        let names: Vec<_> = store
            .list()
            .workouts
            .into_iter()
            .map(|w| (w.category, w.entry.exercise))
            .collect();
        assert_eq!(
            names,
            vec![
                (Category::WarmUp, "Jog".to_string()),
                (Category::Workout, "Squats".to_string()),
                (Category::Workout, "Lunges".to_string()),
                (Category::CoolDown, "Walk".to_string()),
            ]
        );
    }

    #[test]
    fn test_reads_are_idempotent() {
        let store = WorkoutStore::new();
        store.add("Warm-up", "Jog", 10).unwrap();
        store.add("Workout", "Rowing", 25).unwrap();

        assert_eq!(store.list(), store.list());
        assert_eq!(store.summarize(), store.summarize());
        assert_eq!(store.progress(), store.progress());
    }

    #[test]
    fn test_total_matches_successful_adds() {
        let store = WorkoutStore::new();
        let attempts: [(&str, &str, DurationInput); 6] = [
            ("Warm-up", "Jog", 10.into()),
            ("Workout", "Row", "abc".into()),
            ("Workout", "Squats", 20.into()),
            ("Nope", "Squats", 20.into()),
            ("Cool-down", "Walk", "7".into()),
            ("Cool-down", "", 7.into()),
        ];

        let mut expected = 0u64;
        for (category, exercise, duration) in attempts {
            if let Ok(entry) = store.add(category, exercise, duration) {
                expected += u64::from(entry.duration);
            }
        }

        assert_eq!(expected, 37);
        assert_eq!(store.summarize().total_time, expected);
        assert_eq!(store.progress().total_time, expected);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_submit_defaults_category() {
        let store = WorkoutStore::new();
        let input: WorkoutInput =
            serde_json::from_str(r#"{"workout": "Running", "duration": 30}"#).unwrap();
        let (category, entry) = store.submit(&input).unwrap();
        assert_eq!(category, Category::Workout);
        assert_eq!(entry.exercise, "Running");
    }

    #[test]
    fn test_submit_validation_order() {
        let store = WorkoutStore::new();

        let input = WorkoutInput {
            category: Some("Bogus".into()),
            exercise: Some(TextInput::Other(serde_json::json!(5))),
            duration: Some("abc".into()),
        };
        assert!(matches!(store.submit(&input), Err(Error::InvalidCategory { .. })));

        let input = WorkoutInput {
            duration: Some(10.into()),
            ..Default::default()
        };
        assert!(matches!(store.submit(&input), Err(Error::MissingField { .. })));

        let input = WorkoutInput {
            exercise: Some("X".into()),
            ..Default::default()
        };
        assert!(matches!(store.submit(&input), Err(Error::InvalidDuration(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_submit_wrongly_typed_fields() {
        let store = WorkoutStore::new();

        let input: WorkoutInput =
            serde_json::from_str(r#"{"category": 7, "exercise": "Rowing", "duration": 10}"#)
                .unwrap();
        assert!(matches!(store.submit(&input), Err(Error::InvalidCategory { .. })));

        let input: WorkoutInput =
            serde_json::from_str(r#"{"category": "Bogus", "exercise": ["x"], "duration": 10}"#)
                .unwrap();
        assert!(matches!(store.submit(&input), Err(Error::InvalidCategory { .. })));

        let input: WorkoutInput =
            serde_json::from_str(r#"{"category": "Workout", "exercise": 5, "duration": 10}"#)
                .unwrap();
        assert!(matches!(
            store.submit(&input),
            Err(Error::MissingField { field: "exercise" })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        crate::logging::init_test();
        let store = Arc::new(WorkoutStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let category = Category::ALL[i % 3].as_str();
                    for n in 0..50 {
                        store
                            .add(category, &format!("worker {} set {}", i, n), 1)
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let listing = store.list();
        assert_eq!(listing.count, 400);
        assert_eq!(store.summarize().total_time, 400);

        // Timestamps never go backwards within a category
        for entries in listing.by_category.values() {
            assert!(entries
                .windows(2)
                .all(|pair| pair[0].timestamp <= pair[1].timestamp));
        }
    }
}
