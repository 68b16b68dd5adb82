use chrono::{DateTime, Utc};

use crate::{AuthError, User, UserID};

#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    /// Session persisted by a previous sign-in, if any.
    async fn read_session(&self) -> Result<Option<Session>, AuthError>;
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;
    /// Registers a new account. No session is returned if the account must be confirmed first.
    async fn sign_up(&self, credentials: &Credentials) -> Result<Option<Session>, AuthError>;
    async fn sign_out(&self) -> Result<(), AuthError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: User,
}

impl Session {
    #[must_use]
    pub fn user_id(&self) -> UserID {
        self.user.id
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Result<Self, AuthError> {
        let email = email.trim();

        if email.is_empty() {
            return Err(AuthError::InvalidInput("E-mail must not be empty".to_string()));
        }

        if password.is_empty() {
            return Err(AuthError::InvalidInput(
                "Password must not be empty".to_string(),
            ));
        }

        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubscriptionID(usize);

type Subscriber = Box<dyn Fn(Option<&Session>)>;

/// Holds the current session and notifies subscribers on every change.
pub struct SessionGate<R> {
    repository: R,
    session: Option<Session>,
    subscribers: Vec<(SubscriptionID, Subscriber)>,
    next_subscription_id: usize,
}

impl<R: SessionRepository> SessionGate<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            session: None,
            subscribers: vec![],
            next_subscription_id: 0,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn subscribe(&mut self, callback: impl Fn(Option<&Session>) + 'static) -> SubscriptionID {
        let id = SubscriptionID(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionID) {
        self.subscribers.retain(|(subscription_id, _)| *subscription_id != id);
    }

    pub async fn initialize(&mut self) -> Result<Option<&Session>, AuthError> {
        let session = log_on_error!(
            self.repository.read_session(),
            AuthError,
            "restore",
            "session"
        )?;
        self.set_session(session);
        Ok(self.session.as_ref())
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Session, AuthError> {
        let credentials = Credentials::new(email, password)?;
        let session = log_on_error!(
            self.repository.sign_in(&credentials),
            AuthError,
            "sign in",
            "user"
        )?;
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Option<&Session>, AuthError> {
        let credentials = Credentials::new(email, password)?;
        let session = log_on_error!(
            self.repository.sign_up(&credentials),
            AuthError,
            "sign up",
            "user"
        )?;
        if session.is_some() {
            self.set_session(session);
        }
        Ok(self.session.as_ref())
    }

    /// The local session is dropped even if the service rejects the request.
    pub async fn sign_out(&mut self) -> Result<(), AuthError> {
        let result = log_on_error!(
            self.repository.sign_out(),
            AuthError,
            "sign out",
            "user"
        );
        self.set_session(None);
        result
    }

    fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
        for (_, callback) in &self.subscribers {
            callback(self.session.as_ref());
        }
    }
}
