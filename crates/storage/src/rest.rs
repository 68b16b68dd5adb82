//! REST
//!
//! Client for a hosted backend exposing a PostgREST table API and a GoTrue identity API. All
//! requests are authorized with the project's anonymous key and, for table access, the access
//! token of the signed-in user.

use chrono::{DateTime, Utc};
use liftkit_domain as domain;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use uuid::Uuid;

const WORKOUTS: &str = "rest/v1/workouts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub url: String,
    pub anon_key: String,
}

impl Config {
    #[must_use]
    pub fn new(url: &str, anon_key: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    /// Configuration provided by `LIFTKIT_SUPABASE_URL` and `LIFTKIT_SUPABASE_ANON_KEY` at build time.
    #[must_use]
    pub fn from_build_env() -> Option<Self> {
        Some(Self::new(
            option_env!("LIFTKIT_SUPABASE_URL")?,
            option_env!("LIFTKIT_SUPABASE_ANON_KEY")?,
        ))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl Request {
    fn new(method: Method, url: String) -> Self {
        Self {
            method,
            url,
            query: vec![],
            headers: vec![],
            body: None,
        }
    }

    fn query(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl Response {
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, domain::StorageError>;
}

#[derive(Clone)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, domain::StorageError> {
        let mut builder = match request.method {
            Method::Get => gloo_net::http::Request::get(&request.url),
            Method::Post => gloo_net::http::Request::post(&request.url),
            Method::Delete => gloo_net::http::Request::delete(&request.url),
        };
        builder = builder.query(
            request
                .query
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let request = match request.body {
            Some(ref body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|err| domain::StorageError::Other(err.into()))?;

        let response = request
            .send()
            .await
            .map_err(|_| domain::StorageError::NoConnection)?;
        let status = response.status();
        let status_text = response.status_text();
        let body = response
            .text()
            .await
            .map_err(|err| domain::StorageError::Other(err.into()))?;

        Ok(Response {
            status,
            status_text,
            body,
        })
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub config: Config,
    pub sender: S,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            sender: GlooNetSendRequest,
        }
    }
}

impl<S: SendRequest> REST<S> {
    pub async fn sign_in(
        &self,
        credentials: &domain::Credentials,
    ) -> Result<domain::Session, domain::StorageError> {
        let session: Session = self
            .fetch(
                self.auth_request(Method::Post, "auth/v1/token")
                    .query("grant_type", "password")
                    .json(json!({
                        "email": credentials.email,
                        "password": credentials.password,
                    })),
            )
            .await?;
        Ok(session.into())
    }

    pub async fn refresh_session(
        &self,
        session: &domain::Session,
    ) -> Result<domain::Session, domain::StorageError> {
        let session: Session = self
            .fetch(
                self.auth_request(Method::Post, "auth/v1/token")
                    .query("grant_type", "refresh_token")
                    .json(json!({ "refresh_token": session.refresh_token })),
            )
            .await?;
        Ok(session.into())
    }

    pub async fn sign_up(
        &self,
        credentials: &domain::Credentials,
    ) -> Result<Option<domain::Session>, domain::StorageError> {
        let response: SignUp = self
            .fetch(
                self.auth_request(Method::Post, "auth/v1/signup")
                    .json(json!({
                        "email": credentials.email,
                        "password": credentials.password,
                    })),
            )
            .await?;
        match response {
            SignUp::Session(session) => Ok(Some(session.into())),
            SignUp::User(user) => {
                debug!("confirmation pending for user {}", user.id);
                Ok(None)
            }
        }
    }

    pub async fn sign_out(&self, session: &domain::Session) -> Result<(), domain::StorageError> {
        self.fetch_no_content(
            self.auth_request(Method::Post, "auth/v1/logout")
                .header("Authorization", &bearer(&session.access_token)),
        )
        .await
    }

    pub async fn read_workouts(
        &self,
        session: &domain::Session,
    ) -> Result<Vec<domain::WorkoutEntry>, domain::StorageError> {
        let workouts: Vec<Workout> = self
            .fetch(
                self.table_request(Method::Get, WORKOUTS, session)
                    .query("select", "*")
                    .query("user_id", &format!("eq.{}", session.user_id()))
                    .query("order", "created_at.desc"),
            )
            .await?;
        Ok(workouts
            .into_iter()
            .map(domain::WorkoutEntry::from)
            .collect())
    }

    pub async fn create_workout(
        &self,
        session: &domain::Session,
        workout: domain::NewWorkout,
    ) -> Result<domain::WorkoutEntry, domain::StorageError> {
        let mut workouts: Vec<Workout> = self
            .fetch(
                self.table_request(Method::Post, WORKOUTS, session)
                    .header("Prefer", "return=representation")
                    .json(json!([NewWorkout::new(session.user_id(), &workout)])),
            )
            .await?;
        if workouts.is_empty() {
            return Err(domain::StorageError::Other(
                "no workout returned after insert".into(),
            ));
        }
        Ok(workouts.swap_remove(0).into())
    }

    pub async fn delete_workout(
        &self,
        session: &domain::Session,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::StorageError> {
        self.fetch_no_content(
            self.table_request(Method::Delete, WORKOUTS, session)
                .query("id", &format!("eq.{id}")),
        )
        .await?;
        Ok(id)
    }

    fn auth_request(&self, method: Method, path: &str) -> Request {
        Request::new(method, self.config.endpoint(path))
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &bearer(&self.config.anon_key))
    }

    fn table_request(&self, method: Method, path: &str, session: &domain::Session) -> Request {
        Request::new(method, self.config.endpoint(path))
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &bearer(&session.access_token))
    }

    async fn fetch<T>(&self, request: Request) -> Result<T, domain::StorageError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self.sender.send_request(request).await?;
        if !response.ok() {
            return Err(service_error(&response));
        }
        serde_json::from_str::<T>(&response.body).map_err(|err| {
            domain::StorageError::Other(format!("deserialization failed: {err}").into())
        })
    }

    async fn fetch_no_content(&self, request: Request) -> Result<(), domain::StorageError> {
        let response = self.sender.send_request(request).await?;
        if !response.ok() {
            return Err(service_error(&response));
        }
        Ok(())
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn service_error(response: &Response) -> domain::StorageError {
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message.or(body.msg).or(body.error_description))
        .unwrap_or_else(|| format!("{} {}", response.status, response.status_text));
    domain::StorageError::Service {
        status: response.status,
        message,
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl From<Session> for domain::Session {
    fn from(value: Session) -> Self {
        domain::Session {
            access_token: value.access_token,
            refresh_token: value.refresh_token,
            expires_at: value
                .expires_at
                .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0)),
            user: value.user.into(),
        }
    }
}

impl From<domain::Session> for Session {
    fn from(value: domain::Session) -> Self {
        Session {
            access_token: value.access_token,
            refresh_token: value.refresh_token,
            expires_at: value.expires_at.map(|expires_at| expires_at.timestamp()),
            user: value.user.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<User> for domain::User {
    fn from(value: User) -> Self {
        domain::User {
            id: value.id.into(),
            email: value.email.unwrap_or_default(),
        }
    }
}

impl From<domain::User> for User {
    fn from(value: domain::User) -> Self {
        User {
            id: *value.id,
            email: Some(value.email),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SignUp {
    Session(Session),
    User(User),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    pub user_id: Uuid,
    pub exercise: String,
    pub weight: f64,
    pub sets: u32,
    pub reps: u32,
    pub created_at: DateTime<Utc>,
}

impl From<Workout> for domain::WorkoutEntry {
    fn from(value: Workout) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let weight = value.weight as f32;

        domain::WorkoutEntry {
            id: value.id.into(),
            user_id: value.user_id.into(),
            exercise: domain::Name::from_stored(value.exercise),
            weight: domain::Weight::from_stored(weight),
            sets: value.sets.into(),
            reps: value.reps.into(),
            created_at: value.created_at,
        }
    }
}

#[derive(Serialize)]
struct NewWorkout {
    exercise: String,
    weight: f64,
    sets: u32,
    reps: u32,
    user_id: Uuid,
}

impl NewWorkout {
    fn new(user_id: domain::UserID, workout: &domain::NewWorkout) -> Self {
        Self {
            exercise: workout.exercise.to_string(),
            weight: decimal_weight(workout.weight.into()),
            sets: workout.sets.into(),
            reps: workout.reps.into(),
            user_id: *user_id,
        }
    }
}

/// Widens a weight by its shortest decimal representation, so that `82.3` is sent as `82.3`.
fn decimal_weight(weight: f32) -> f64 {
    weight
        .to_string()
        .parse()
        .unwrap_or_else(|_| f64::from(weight))
}

/// Accepts identifiers stored as text as well as numeric identity columns.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ID {
        Text(String),
        Number(i64),
    }

    Ok(match ID::deserialize(deserializer)? {
        ID::Text(text) => text,
        ID::Number(number) => number.to_string(),
    })
}
