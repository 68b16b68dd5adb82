//! Cached REST
//!
//! The hosted backend is the authoritative data source for accounts and workouts. The session
//! issued on sign-in is kept in a local store, so that it survives page reloads and can authorize
//! subsequent table requests.

use chrono::Utc;
use log::{debug, error};
use liftkit_domain as domain;

use super::SessionStore;
use super::local_storage::LocalStorage;
use super::rest::{Config, GlooNetSendRequest, REST, SendRequest};

#[derive(Clone)]
pub struct CachedREST<S: SendRequest, T: SessionStore> {
    pub rest: REST<S>,
    pub store: T,
}

impl CachedREST<GlooNetSendRequest, LocalStorage> {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            rest: REST::new(config),
            store: LocalStorage,
        }
    }
}

impl<S: SendRequest, T: SessionStore> CachedREST<S, T> {
    fn session(&self, user_id: domain::UserID) -> Result<domain::Session, domain::StorageError> {
        match self.store.read_session() {
            Ok(Some(session)) if session.user_id() == user_id => Ok(session),
            Ok(_) => Err(domain::StorageError::NoSession),
            Err(err) => Err(domain::StorageError::Other(err.into())),
        }
    }

    fn store_session(&self, session: &domain::Session) {
        if let Err(err) = self.store.write_session(session) {
            error!("failed to write session into local storage: {err}");
        }
    }
}

impl<S: SendRequest, T: SessionStore> domain::SessionRepository for CachedREST<S, T> {
    /// An expired session is renewed with its refresh token. If renewal fails, the session is
    /// discarded.
    async fn read_session(&self) -> Result<Option<domain::Session>, domain::AuthError> {
        let session = self
            .store
            .read_session()
            .map_err(|err| domain::StorageError::Other(err.into()))?;

        let Some(session) = session else {
            return Ok(None);
        };

        if !session.is_expired(Utc::now()) {
            return Ok(Some(session));
        }

        match self.rest.refresh_session(&session).await {
            Ok(session) => {
                self.store_session(&session);
                Ok(Some(session))
            }
            Err(err) => {
                debug!("failed to refresh session: {err}");
                if let Err(err) = self.store.clear_session() {
                    error!("failed to remove session from local storage: {err}");
                }
                Ok(None)
            }
        }
    }

    async fn sign_in(
        &self,
        credentials: &domain::Credentials,
    ) -> Result<domain::Session, domain::AuthError> {
        let session = self
            .rest
            .sign_in(credentials)
            .await
            .map_err(domain::StorageError::into_auth_error)?;
        self.store_session(&session);
        Ok(session)
    }

    async fn sign_up(
        &self,
        credentials: &domain::Credentials,
    ) -> Result<Option<domain::Session>, domain::AuthError> {
        let session = self
            .rest
            .sign_up(credentials)
            .await
            .map_err(domain::StorageError::into_auth_error)?;
        if let Some(ref session) = session {
            self.store_session(session);
        }
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), domain::AuthError> {
        let result = match self.store.read_session() {
            Ok(Some(session)) => self
                .rest
                .sign_out(&session)
                .await
                .map_err(domain::StorageError::into_auth_error),
            Ok(None) => Ok(()),
            Err(err) => Err(domain::StorageError::Other(err.into()).into()),
        };
        if let Err(err) = self.store.clear_session() {
            error!("failed to remove session from local storage: {err}");
        }
        result
    }
}

impl<S: SendRequest, T: SessionStore> domain::WorkoutRepository for CachedREST<S, T> {
    async fn read_workouts(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::WorkoutEntry>, domain::FetchError> {
        let session = self.session(user_id)?;
        Ok(self.rest.read_workouts(&session).await?)
    }

    async fn create_workout(
        &self,
        user_id: domain::UserID,
        workout: domain::NewWorkout,
    ) -> Result<domain::WorkoutEntry, domain::WriteError> {
        let session = self.session(user_id)?;
        Ok(self.rest.create_workout(&session, workout).await?)
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::WriteError> {
        let session = match self.store.read_session() {
            Ok(Some(session)) => session,
            Ok(None) => return Err(domain::StorageError::NoSession.into()),
            Err(err) => return Err(domain::StorageError::Other(err.into()).into()),
        };
        Ok(self.rest.delete_workout(&session, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use liftkit_domain::{SessionRepository, WorkoutRepository};

    use crate::rest::{self, Method, Request, Response};

    use super::*;

    const URL: &str = "https://example.supabase.co";
    const ANON_KEY: &str = "anon";
    const USER_ID: u128 = 1;

    #[tokio::test]
    async fn test_sign_in() {
        let cached_rest = cached_rest_with_response(None, Some(response(200, session_json())));

        assert_eq!(
            cached_rest
                .sign_in(&credentials())
                .await
                .unwrap(),
            session()
        );
        assert_eq!(*cached_rest.store.session.borrow(), Some(session()));

        let request = cached_rest.rest.sender.request.borrow().clone().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, format!("{URL}/auth/v1/token"));
        assert_eq!(
            request.query,
            vec![("grant_type".to_string(), "password".to_string())]
        );
        assert_eq!(
            request.body,
            Some(json!({"email": "alice@example.com", "password": "secret"}))
        );
        assert_eq!(
            request.headers,
            vec![
                ("apikey".to_string(), ANON_KEY.to_string()),
                ("Authorization".to_string(), format!("Bearer {ANON_KEY}")),
            ]
        );
    }

    #[tokio::test]
    async fn test_sign_in_rejected() {
        let cached_rest = cached_rest_with_response(
            None,
            Some(Response {
                status: 400,
                status_text: "Bad Request".to_string(),
                body: r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#
                    .to_string(),
            }),
        );

        assert!(matches!(
            cached_rest.sign_in(&credentials()).await,
            Err(domain::AuthError::Service(message)) if message == "Invalid login credentials"
        ));
        assert_eq!(*cached_rest.store.session.borrow(), None);
    }

    #[tokio::test]
    async fn test_sign_in_no_connection() {
        let cached_rest = cached_rest_with_response(None, None);

        assert!(matches!(
            cached_rest.sign_in(&credentials()).await,
            Err(domain::AuthError::Storage(domain::StorageError::NoConnection))
        ));
    }

    #[tokio::test]
    async fn test_sign_up() {
        let cached_rest = cached_rest_with_response(None, Some(response(200, session_json())));

        assert_eq!(
            cached_rest.sign_up(&credentials()).await.unwrap(),
            Some(session())
        );
        assert_eq!(*cached_rest.store.session.borrow(), Some(session()));
        assert_eq!(
            cached_rest.rest.sender.request.borrow().clone().unwrap().url,
            format!("{URL}/auth/v1/signup")
        );
    }

    #[tokio::test]
    async fn test_sign_up_confirmation_required() {
        let cached_rest = cached_rest_with_response(
            None,
            Some(response(
                200,
                json!({
                    "id": "00000000-0000-0000-0000-000000000001",
                    "email": "alice@example.com",
                    "confirmation_sent_at": "2026-10-16T08:30:00Z",
                }),
            )),
        );

        assert_eq!(cached_rest.sign_up(&credentials()).await.unwrap(), None);
        assert_eq!(*cached_rest.store.session.borrow(), None);
    }

    #[tokio::test]
    async fn test_read_session() {
        assert_eq!(
            cached_rest_with_response(None, None)
                .read_session()
                .await
                .unwrap(),
            None
        );
        assert_eq!(
            cached_rest_with_response(Some(session()), None)
                .read_session()
                .await
                .unwrap(),
            Some(session())
        );
    }

    #[tokio::test]
    async fn test_read_session_refreshes_expired_session() {
        let cached_rest = cached_rest_with_response(
            Some(expired_session()),
            Some(response(200, session_json())),
        );

        assert_eq!(
            cached_rest.read_session().await.unwrap(),
            Some(session())
        );
        assert_eq!(*cached_rest.store.session.borrow(), Some(session()));

        let request = cached_rest.rest.sender.request.borrow().clone().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, format!("{URL}/auth/v1/token"));
        assert_eq!(
            request.query,
            vec![("grant_type".to_string(), "refresh_token".to_string())]
        );
        assert_eq!(request.body, Some(json!({"refresh_token": "stale refresh"})));
    }

    #[tokio::test]
    async fn test_read_session_discards_unrenewable_session() {
        let cached_rest = cached_rest_with_response(
            Some(expired_session()),
            Some(Response {
                status: 400,
                status_text: "Bad Request".to_string(),
                body: r#"{"error":"invalid_grant","error_description":"Invalid Refresh Token"}"#
                    .to_string(),
            }),
        );

        assert_eq!(cached_rest.read_session().await.unwrap(), None);
        assert_eq!(*cached_rest.store.session.borrow(), None);

        let cached_rest = cached_rest_with_response(Some(expired_session()), None);

        assert_eq!(cached_rest.read_session().await.unwrap(), None);
        assert_eq!(*cached_rest.store.session.borrow(), None);
    }

    #[tokio::test]
    async fn test_sign_out() {
        let cached_rest = cached_rest_with_response(
            Some(session()),
            Some(Response {
                status: 204,
                status_text: "No Content".to_string(),
                body: String::new(),
            }),
        );

        assert!(cached_rest.sign_out().await.is_ok());
        assert_eq!(*cached_rest.store.session.borrow(), None);

        let request = cached_rest.rest.sender.request.borrow().clone().unwrap();
        assert_eq!(request.url, format!("{URL}/auth/v1/logout"));
        assert!(
            request
                .headers
                .contains(&("Authorization".to_string(), "Bearer access".to_string()))
        );
    }

    #[tokio::test]
    async fn test_sign_out_no_connection() {
        let cached_rest = cached_rest_with_response(Some(session()), None);

        assert!(matches!(
            cached_rest.sign_out().await,
            Err(domain::AuthError::Storage(domain::StorageError::NoConnection))
        ));
        assert_eq!(*cached_rest.store.session.borrow(), None);
    }

    #[tokio::test]
    async fn test_read_workouts() {
        let cached_rest = cached_rest_with_response(
            Some(session()),
            Some(response(200, json!([workout_json(2), workout_json(1)]))),
        );

        assert_eq!(
            cached_rest.read_workouts(USER_ID.into()).await.unwrap(),
            vec![workout(2), workout(1)]
        );

        let request = cached_rest.rest.sender.request.borrow().clone().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, format!("{URL}/rest/v1/workouts"));
        assert_eq!(
            request.query,
            vec![
                ("select".to_string(), "*".to_string()),
                (
                    "user_id".to_string(),
                    "eq.00000000-0000-0000-0000-000000000001".to_string()
                ),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
        assert_eq!(
            request.headers,
            vec![
                ("apikey".to_string(), ANON_KEY.to_string()),
                ("Authorization".to_string(), "Bearer access".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_read_workouts_with_unrestricted_rows() {
        let mut blank_exercise = workout_json(2);
        blank_exercise["exercise"] = json!(" ");
        let mut negative_weight = workout_json(1);
        negative_weight["weight"] = json!(-2.5);

        let cached_rest = cached_rest_with_response(
            Some(session()),
            Some(response(200, json!([blank_exercise, negative_weight]))),
        );

        let entries = cached_rest.read_workouts(USER_ID.into()).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].exercise.to_string(), " ");
        assert_eq!(f32::from(entries[1].weight), -2.5);
    }

    #[tokio::test]
    async fn test_read_workouts_no_session() {
        assert!(matches!(
            cached_rest_with_response(None, None)
                .read_workouts(USER_ID.into())
                .await,
            Err(domain::FetchError::Storage(domain::StorageError::NoSession))
        ));
        assert!(matches!(
            cached_rest_with_response(Some(session()), None)
                .read_workouts(2.into())
                .await,
            Err(domain::FetchError::Storage(domain::StorageError::NoSession))
        ));
    }

    #[tokio::test]
    async fn test_read_workouts_expired_token() {
        let cached_rest = cached_rest_with_response(
            Some(session()),
            Some(Response {
                status: 401,
                status_text: "Unauthorized".to_string(),
                body: r#"{"code":"PGRST301","message":"JWT expired"}"#.to_string(),
            }),
        );

        assert!(matches!(
            cached_rest.read_workouts(USER_ID.into()).await,
            Err(domain::FetchError::Storage(domain::StorageError::Service { status: 401, message }))
                if message == "JWT expired"
        ));
    }

    #[tokio::test]
    async fn test_create_workout() {
        let cached_rest = cached_rest_with_response(
            Some(session()),
            Some(response(201, json!([workout_json(1)]))),
        );

        assert_eq!(
            cached_rest
                .create_workout(
                    USER_ID.into(),
                    domain::NewWorkout::parse("Knebøy", "100", "5", "5").unwrap()
                )
                .await
                .unwrap(),
            workout(1)
        );

        let request = cached_rest.rest.sender.request.borrow().clone().unwrap();
        assert_eq!(request.method, Method::Post);
        assert!(
            request
                .headers
                .contains(&("Prefer".to_string(), "return=representation".to_string()))
        );
        assert_eq!(
            request.body,
            Some(json!([{
                "exercise": "Knebøy",
                "weight": 100.0,
                "sets": 5,
                "reps": 5,
                "user_id": "00000000-0000-0000-0000-000000000001",
            }]))
        );
    }

    #[tokio::test]
    async fn test_create_workout_sends_decimal_weight() {
        let cached_rest = cached_rest_with_response(
            Some(session()),
            Some(response(201, json!([workout_json(1)]))),
        );

        cached_rest
            .create_workout(
                USER_ID.into(),
                domain::NewWorkout::parse("Squat", "82.3", "3", "5").unwrap(),
            )
            .await
            .unwrap();

        let request = cached_rest.rest.sender.request.borrow().clone().unwrap();
        assert!(
            request
                .body
                .unwrap()
                .to_string()
                .contains(r#""weight":82.3"#)
        );
    }

    #[tokio::test]
    async fn test_create_workout_empty_response() {
        let cached_rest =
            cached_rest_with_response(Some(session()), Some(response(201, json!([]))));

        assert!(matches!(
            cached_rest
                .create_workout(
                    USER_ID.into(),
                    domain::NewWorkout::parse("Knebøy", "100", "5", "5").unwrap()
                )
                .await,
            Err(domain::WriteError::Storage(domain::StorageError::Other(_)))
        ));
    }

    #[tokio::test]
    async fn test_delete_workout() {
        let cached_rest = cached_rest_with_response(
            Some(session()),
            Some(Response {
                status: 204,
                status_text: "No Content".to_string(),
                body: String::new(),
            }),
        );

        assert_eq!(
            cached_rest.delete_workout("7".into()).await.unwrap(),
            domain::WorkoutID::from("7")
        );

        let request = cached_rest.rest.sender.request.borrow().clone().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.query, vec![("id".to_string(), "eq.7".to_string())]);
    }

    #[tokio::test]
    async fn test_delete_workout_no_connection() {
        assert!(matches!(
            cached_rest_with_response(Some(session()), None)
                .delete_workout("7".into())
                .await,
            Err(domain::WriteError::Storage(domain::StorageError::NoConnection))
        ));
    }

    fn cached_rest_with_response(
        session: Option<domain::Session>,
        response: Option<Response>,
    ) -> CachedREST<MockSendRequest, MemoryStore> {
        CachedREST {
            rest: REST {
                config: Config::new(URL, ANON_KEY),
                sender: MockSendRequest {
                    request: RefCell::new(None),
                    response: RefCell::new(response),
                },
            },
            store: MemoryStore {
                session: RefCell::new(session),
            },
        }
    }

    fn response(status: u16, body: serde_json::Value) -> Response {
        Response {
            status,
            status_text: String::new(),
            body: body.to_string(),
        }
    }

    fn credentials() -> domain::Credentials {
        domain::Credentials::new("alice@example.com", "secret").unwrap()
    }

    fn session() -> domain::Session {
        domain::Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: DateTime::from_timestamp(4_102_444_800, 0),
            user: domain::User {
                id: USER_ID.into(),
                email: "alice@example.com".to_string(),
            },
        }
    }

    fn expired_session() -> domain::Session {
        domain::Session {
            access_token: "stale access".to_string(),
            refresh_token: "stale refresh".to_string(),
            expires_at: DateTime::from_timestamp(1_000_000_000, 0),
            ..session()
        }
    }

    fn session_json() -> serde_json::Value {
        json!({
            "access_token": "access",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 4_102_444_800_i64,
            "refresh_token": "refresh",
            "user": {
                "id": "00000000-0000-0000-0000-000000000001",
                "email": "alice@example.com",
            },
        })
    }

    fn workout(id: u32) -> domain::WorkoutEntry {
        serde_json::from_value::<rest::Workout>(workout_json(id))
            .unwrap()
            .into()
    }

    fn workout_json(id: u32) -> serde_json::Value {
        json!({
            "id": id,
            "user_id": "00000000-0000-0000-0000-000000000001",
            "exercise": "Knebøy",
            "weight": 100.0,
            "sets": 5,
            "reps": 5,
            "created_at": format!("2026-10-{:02}T08:30:00+00:00", 10 + id),
        })
    }

    struct MockSendRequest {
        request: RefCell<Option<Request>>,
        response: RefCell<Option<Response>>,
    }

    impl SendRequest for MockSendRequest {
        async fn send_request(&self, request: Request) -> Result<Response, domain::StorageError> {
            *self.request.borrow_mut() = Some(request);
            (*self.response.borrow_mut())
                .take()
                .ok_or(domain::StorageError::NoConnection)
        }
    }

    struct MemoryStore {
        session: RefCell<Option<domain::Session>>,
    }

    impl SessionStore for MemoryStore {
        fn read_session(&self) -> Result<Option<domain::Session>, String> {
            Ok(self.session.borrow().clone())
        }

        fn write_session(&self, session: &domain::Session) -> Result<(), String> {
            *self.session.borrow_mut() = Some(session.clone());
            Ok(())
        }

        fn clear_session(&self) -> Result<(), String> {
            *self.session.borrow_mut() = None;
            Ok(())
        }
    }
}
