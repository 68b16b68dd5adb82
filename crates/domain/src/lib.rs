#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    log::debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    log::error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

mod calculator;
mod error;
mod name;
mod plate;
mod session;
mod training;
mod user;
mod workout;

pub use calculator::{
    Load, OneRepMaxError, compute_volume, estimate_one_rep_max, round_to_one_decimal,
    volume_scale,
};
pub use error::{AuthError, FetchError, StorageError, WriteError};
pub use name::{Name, NameError};
pub use plate::{DENOMINATIONS, Plate, PlateColor, decompose_plates, loaded_weight};
pub use session::{Credentials, Session, SessionGate, SessionRepository, SubscriptionID};
pub use training::{Reps, RepsError, Sets, SetsError, Weight, WeightError};
pub use user::{User, UserID};
pub use workout::{
    NewWorkout, NewWorkoutError, WorkoutEntry, WorkoutID, WorkoutLog, WorkoutRepository,
};
