use chrono::{DateTime, Utc};
use derive_more::{AsRef, Display};

use crate::{
    FetchError, Load, Name, NameError, Reps, RepsError, Session, Sets, SetsError, UserID, Weight,
    WeightError, WriteError,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    /// Workouts of the given user, most recent first.
    async fn read_workouts(&self, user_id: UserID) -> Result<Vec<WorkoutEntry>, FetchError>;
    async fn create_workout(
        &self,
        user_id: UserID,
        workout: NewWorkout,
    ) -> Result<WorkoutEntry, WriteError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, WriteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    pub id: WorkoutID,
    pub user_id: UserID,
    pub exercise: Name,
    pub weight: Weight,
    pub sets: Sets,
    pub reps: Reps,
    pub created_at: DateTime<Utc>,
}

impl Load for WorkoutEntry {
    fn weight(&self) -> Weight {
        self.weight
    }

    fn sets(&self) -> Sets {
        self.sets
    }

    fn reps(&self) -> Reps {
        self.reps
    }
}

/// Identifier assigned by the backing service.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(String);

impl From<String> for WorkoutID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub exercise: Name,
    pub weight: Weight,
    pub sets: Sets,
    pub reps: Reps,
}

impl NewWorkout {
    /// Converts the raw values of the add form.
    pub fn parse(
        exercise: &str,
        weight: &str,
        sets: &str,
        reps: &str,
    ) -> Result<Self, NewWorkoutError> {
        Ok(Self {
            exercise: Name::new(exercise)?,
            weight: Weight::try_from(weight)?,
            sets: Sets::try_from(sets)?,
            reps: Reps::try_from(reps)?,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NewWorkoutError {
    #[error(transparent)]
    Exercise(#[from] NameError),
    #[error(transparent)]
    Weight(#[from] WeightError),
    #[error(transparent)]
    Sets(#[from] SetsError),
    #[error(transparent)]
    Reps(#[from] RepsError),
}

/// Workout log of the signed-in user
///
/// Keeps the entries of the last successful fetch, most recent first. The cache is only changed
/// after the backing service has confirmed an operation.
pub struct WorkoutLog<R> {
    repository: R,
    user_id: UserID,
    entries: Vec<WorkoutEntry>,
    loaded: bool,
}

impl<R: WorkoutRepository> WorkoutLog<R> {
    pub fn new(repository: R, session: &Session) -> Self {
        Self {
            repository,
            user_id: session.user_id(),
            entries: vec![],
            loaded: false,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[WorkoutEntry] {
        &self.entries
    }

    /// Whether a fetch has completed, successfully or not.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub async fn list(&mut self) -> Result<&[WorkoutEntry], FetchError> {
        let result = log_on_error!(
            self.repository.read_workouts(self.user_id),
            FetchError,
            "get",
            "workouts"
        );
        self.loaded = true;
        let mut entries = result?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.entries = entries;
        Ok(&self.entries)
    }

    pub async fn add(&mut self, workout: NewWorkout) -> Result<WorkoutEntry, WriteError> {
        let entry = log_on_error!(
            self.repository.create_workout(self.user_id, workout),
            WriteError,
            "create",
            "workout"
        )?;
        self.entries.insert(0, entry.clone());
        Ok(entry)
    }

    pub async fn remove(&mut self, id: &WorkoutID) -> Result<(), WriteError> {
        let deleted_id = log_on_error!(
            self.repository.delete_workout(id.clone()),
            WriteError,
            "delete",
            "workout"
        )?;
        self.entries.retain(|e| e.id != deleted_id);
        Ok(())
    }
}
