//! Use case tests against in-memory fakes.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use platform::mailer::{MailError, Mailer};

use crate::application::config::AuthConfig;
use crate::application::manage_students::ManageStudentsUseCase;
use crate::application::password_reset::{PasswordResetUseCase, ResetConfirmInput};
use crate::application::refresh::RefreshUseCase;
use crate::application::resend_otp::ResendOtpUseCase;
use crate::application::sign_in::{SignInInput, SignInUseCase};
use crate::application::sign_up::{SignUpInput, SignUpUseCase};
use crate::application::verify_otp::{VerifyOtpInput, VerifyOtpUseCase};
use crate::domain::entity::{Session, User};
use crate::domain::repository::{EnrollmentPort, SessionRepository, UserRepository};
use crate::domain::value_object::{Email, StudentId, UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
struct MemStore {
    users: Arc<Mutex<HashMap<UserId, User>>>,
    sessions: Arc<Mutex<HashMap<UserId, Session>>>,
    /// Seeded student ids, counted as taken alongside the stored users
    reserved_student_ids: Arc<Mutex<HashSet<String>>>,
}

impl MemStore {
    /// Mark the entire PROD-1000..9999 range as taken
    fn reserve_all_student_ids(&self) {
        let mut reserved = self.reserved_student_ids.lock().unwrap();
        for n in 1000..=9999 {
            reserved.insert(format!("PROD-{n}"));
        }
    }

    fn user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned()
    }

    fn stored_otp(&self, email: &str) -> String {
        self.user_by_email(email)
            .and_then(|u| u.otp_code.map(|o| o.as_str().to_string()))
            .expect("user has no OTP")
    }
}

impl UserRepository for MemStore {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.user_by_email(email.as_str()))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.user_by_email(email.as_str()).is_some())
    }

    async fn exists_by_student_id(&self, student_id: &StudentId) -> AuthResult<bool> {
        if self
            .reserved_student_ids
            .lock()
            .unwrap()
            .contains(student_id.as_str())
        {
            return Ok(true);
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.student_id.as_ref() == Some(student_id)))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        self.users.lock().unwrap().insert(user.id, user.clone());
        Ok(())
    }

    async fn list_students(&self) -> AuthResult<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .filter(|u| !u.role.is_admin() && u.is_active)
            .cloned()
            .collect())
    }
}

impl SessionRepository for MemStore {
    async fn replace_for_user(&self, session: &Session) -> AuthResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.user_id, session.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> AuthResult<Option<Session>> {
        Ok(self.sessions.lock().unwrap().get(user_id).cloned())
    }
}

#[derive(Clone, Default)]
struct StubEnrollment {
    known_branch: Option<i32>,
    calls: Arc<Mutex<Vec<(UserId, i32)>>>,
}

impl EnrollmentPort for StubEnrollment {
    async fn open_request(&self, student_id: &UserId, branch_id: i32) -> AuthResult<bool> {
        self.calls.lock().unwrap().push((*student_id, branch_id));
        Ok(self.known_branch == Some(branch_id))
    }
}

#[derive(Clone, Default)]
struct StubMailer {
    fail: bool,
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl Mailer for StubMailer {
    async fn send_mail(&self, to: &str, subject: &str, _body: &str) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Transport("gateway down".into()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        Ok(())
    }
}

struct TestEnv {
    store: Arc<MemStore>,
    enrollment: Arc<StubEnrollment>,
    mailer: Arc<StubMailer>,
    config: Arc<AuthConfig>,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            store: Arc::new(MemStore::default()),
            enrollment: Arc::new(StubEnrollment {
                known_branch: Some(1),
                ..Default::default()
            }),
            mailer: Arc::new(StubMailer::default()),
            config: Arc::new(AuthConfig::with_random_secret()),
        }
    }

    fn sign_up_use_case(&self) -> SignUpUseCase<MemStore, StubEnrollment, StubMailer> {
        SignUpUseCase::new(
            self.store.clone(),
            self.enrollment.clone(),
            self.mailer.clone(),
            self.config.clone(),
        )
    }

    fn sign_in_use_case(&self) -> SignInUseCase<MemStore, MemStore> {
        SignInUseCase::new(self.store.clone(), self.store.clone(), self.config.clone())
    }

    async fn sign_up(&self, email: &str, branch: Option<i32>) {
        self.sign_up_use_case()
            .execute(SignUpInput {
                username: "taro".into(),
                email: email.into(),
                password: "hunter2hunter2".into(),
                role: None,
                college: Some("Example Institute".into()),
                phone_number: None,
                branch,
            })
            .await
            .expect("signup failed");
    }

    async fn verify(&self, email: &str) {
        let otp = self.store.stored_otp(email);
        VerifyOtpUseCase::new(self.store.clone())
            .execute(VerifyOtpInput {
                email: email.into(),
                otp,
            })
            .await
            .expect("verification failed");
    }
}

#[tokio::test]
async fn sign_up_creates_inactive_user_with_otp_and_student_id() {
    let env = TestEnv::new();
    env.sign_up("taro@example.com", Some(1)).await;

    let user = env.store.user_by_email("taro@example.com").unwrap();
    assert!(!user.is_active);
    assert!(!user.is_verified);
    assert!(user.otp_code.is_some());
    assert!(user.otp_expires_at.is_some());

    let student_id = user.student_id.expect("no student id assigned");
    assert!(StudentId::parse(student_id.as_str()).is_ok());

    // A pending course request was opened for the chosen branch
    let calls = env.enrollment.calls.lock().unwrap().clone();
    assert_eq!(calls, vec![(user.id, 1)]);

    // And the OTP mail went out
    assert_eq!(env.mailer.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn sign_up_rejects_duplicate_email() {
    let env = TestEnv::new();
    env.sign_up("taro@example.com", None).await;

    let result = env
        .sign_up_use_case()
        .execute(SignUpInput {
            username: "other".into(),
            email: "taro@example.com".into(),
            password: "hunter2hunter2".into(),
            role: None,
            college: None,
            phone_number: None,
            branch: None,
        })
        .await;

    assert!(matches!(result, Err(AuthError::EmailTaken)));
}

#[tokio::test]
async fn sign_up_honors_the_requested_role() {
    let env = TestEnv::new();

    env.sign_up_use_case()
        .execute(SignUpInput {
            username: "hanako".into(),
            email: "hanako@example.com".into(),
            password: "hunter2hunter2".into(),
            role: Some("admin".into()),
            college: None,
            phone_number: None,
            branch: None,
        })
        .await
        .unwrap();

    let user = env.store.user_by_email("hanako@example.com").unwrap();
    assert!(user.role.is_admin());

    // Omitted role falls back to a student account
    env.sign_up("taro@example.com", None).await;
    let user = env.store.user_by_email("taro@example.com").unwrap();
    assert!(!user.role.is_admin());
}

#[tokio::test]
async fn sign_up_rejects_unknown_role() {
    let env = TestEnv::new();

    let result = env
        .sign_up_use_case()
        .execute(SignUpInput {
            username: "taro".into(),
            email: "taro@example.com".into(),
            password: "hunter2hunter2".into(),
            role: Some("superuser".into()),
            college: None,
            phone_number: None,
            branch: None,
        })
        .await;

    assert!(matches!(result, Err(AuthError::Validation(_))));
    assert!(env.store.user_by_email("taro@example.com").is_none());
}

#[tokio::test]
async fn sign_up_gives_up_when_student_ids_run_out() {
    let env = TestEnv::new();
    env.store.reserve_all_student_ids();

    let result = env
        .sign_up_use_case()
        .execute(SignUpInput {
            username: "taro".into(),
            email: "taro@example.com".into(),
            password: "hunter2hunter2".into(),
            role: None,
            college: None,
            phone_number: None,
            branch: None,
        })
        .await;

    assert!(matches!(result, Err(AuthError::StudentIdExhausted)));
    assert!(env.store.user_by_email("taro@example.com").is_none());
}

#[tokio::test]
async fn sign_up_survives_unknown_branch_and_mail_failure() {
    let env = TestEnv {
        enrollment: Arc::new(StubEnrollment {
            known_branch: None,
            ..Default::default()
        }),
        mailer: Arc::new(StubMailer {
            fail: true,
            ..Default::default()
        }),
        ..TestEnv::new()
    };

    // Unknown branch and a dead mail gateway, signup still succeeds
    env.sign_up("taro@example.com", Some(42)).await;

    let user = env.store.user_by_email("taro@example.com").unwrap();
    assert!(user.otp_code.is_some());
    assert!(env.mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn verify_otp_activates_account() {
    let env = TestEnv::new();
    env.sign_up("taro@example.com", None).await;
    env.verify("taro@example.com").await;

    let user = env.store.user_by_email("taro@example.com").unwrap();
    assert!(user.is_active);
    assert!(user.is_verified);
    assert!(user.otp_code.is_none());
    assert!(user.otp_expires_at.is_none());
}

#[tokio::test]
async fn verify_otp_wrong_code_leaves_fields_untouched() {
    let env = TestEnv::new();
    env.sign_up("taro@example.com", None).await;

    let stored = env.store.stored_otp("taro@example.com");
    let wrong = if stored == "1234" { "4321" } else { "1234" };

    let result = VerifyOtpUseCase::new(env.store.clone())
        .execute(VerifyOtpInput {
            email: "taro@example.com".into(),
            otp: wrong.into(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::OtpInvalid)));

    let user = env.store.user_by_email("taro@example.com").unwrap();
    assert!(!user.is_active);
    assert!(user.otp_code.is_some());
    assert!(user.otp_expires_at.is_some());
}

#[tokio::test]
async fn login_before_verification_gives_explicit_error() {
    let env = TestEnv::new();
    env.sign_up("taro@example.com", None).await;

    let result = env
        .sign_in_use_case()
        .execute(SignInInput {
            email: "taro@example.com".into(),
            password: "hunter2hunter2".into(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::AccountInactive)));
}

#[tokio::test]
async fn login_wrong_password_is_invalid_credentials() {
    let env = TestEnv::new();
    env.sign_up("taro@example.com", None).await;
    env.verify("taro@example.com").await;

    let result = env
        .sign_in_use_case()
        .execute(SignInInput {
            email: "taro@example.com".into(),
            password: "not-the-password".into(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));

    // Unknown email gives the same error
    let result = env
        .sign_in_use_case()
        .execute(SignInInput {
            email: "nobody@example.com".into(),
            password: "hunter2hunter2".into(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn second_login_replaces_the_session() {
    let env = TestEnv::new();
    env.sign_up("taro@example.com", None).await;
    env.verify("taro@example.com").await;

    let input = || SignInInput {
        email: "taro@example.com".into(),
        password: "hunter2hunter2".into(),
    };

    env.sign_in_use_case().execute(input()).await.unwrap();
    let second = env.sign_in_use_case().execute(input()).await.unwrap();

    let user = env.store.user_by_email("taro@example.com").unwrap();
    let sessions = env.store.sessions.lock().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[&user.id].session_key, second.access);
}

#[tokio::test]
async fn login_issues_tokens_that_validate() {
    let env = TestEnv::new();
    env.sign_up("taro@example.com", None).await;
    env.verify("taro@example.com").await;

    let output = env
        .sign_in_use_case()
        .execute(SignInInput {
            email: "taro@example.com".into(),
            password: "hunter2hunter2".into(),
        })
        .await
        .unwrap();

    let issuer = env.config.token_issuer();
    let claims = issuer.validate_access(&output.access).unwrap();
    assert_eq!(claims.role, "student");
    assert_eq!(claims.username, "taro");
    assert!(issuer.validate_refresh(&output.refresh).is_ok());

    // Refresh mints a fresh access token from the refresh token
    let refreshed = RefreshUseCase::new(env.config.clone())
        .execute(&output.refresh)
        .unwrap();
    assert!(issuer.validate_access(&refreshed.access).is_ok());

    // An access token is not accepted where a refresh is expected
    let result = RefreshUseCase::new(env.config.clone()).execute(&output.access);
    assert!(matches!(result, Err(AuthError::TokenInvalid)));
}

#[tokio::test]
async fn resend_otp_refuses_verified_accounts() {
    let env = TestEnv::new();
    env.sign_up("taro@example.com", None).await;
    env.verify("taro@example.com").await;

    let result = ResendOtpUseCase::new(env.store.clone(), env.mailer.clone())
        .execute("taro@example.com".into())
        .await;

    assert!(matches!(result, Err(AuthError::AlreadyVerified)));
}

#[tokio::test]
async fn resend_otp_rotates_the_code() {
    let env = TestEnv::new();
    env.sign_up("taro@example.com", None).await;
    let first = env.store.stored_otp("taro@example.com");

    // Retry until the random draw differs; 4-digit space, so a couple
    // of attempts is plenty
    for _ in 0..20 {
        ResendOtpUseCase::new(env.store.clone(), env.mailer.clone())
            .execute("taro@example.com".into())
            .await
            .unwrap();
        if env.store.stored_otp("taro@example.com") != first {
            return;
        }
    }
    panic!("resend never rotated the OTP");
}

#[tokio::test]
async fn password_reset_flow_changes_the_password() {
    let env = TestEnv::new();
    env.sign_up("taro@example.com", None).await;
    env.verify("taro@example.com").await;

    let reset = PasswordResetUseCase::new(env.store.clone(), env.mailer.clone());
    reset.request("taro@example.com".into()).await.unwrap();

    let otp = env.store.stored_otp("taro@example.com");
    reset
        .confirm(ResetConfirmInput {
            email: "taro@example.com".into(),
            otp,
            password: "new-password-99".into(),
        })
        .await
        .unwrap();

    // OTP is consumed by the reset
    let user = env.store.user_by_email("taro@example.com").unwrap();
    assert!(user.otp_code.is_none());

    let old = env
        .sign_in_use_case()
        .execute(SignInInput {
            email: "taro@example.com".into(),
            password: "hunter2hunter2".into(),
        })
        .await;
    assert!(matches!(old, Err(AuthError::InvalidCredentials)));

    env.sign_in_use_case()
        .execute(SignInInput {
            email: "taro@example.com".into(),
            password: "new-password-99".into(),
        })
        .await
        .expect("new password should work");
}

#[tokio::test]
async fn password_reset_confirm_rejects_wrong_otp() {
    let env = TestEnv::new();
    env.sign_up("taro@example.com", None).await;
    env.verify("taro@example.com").await;

    let reset = PasswordResetUseCase::new(env.store.clone(), env.mailer.clone());
    reset.request("taro@example.com".into()).await.unwrap();

    let stored = env.store.stored_otp("taro@example.com");
    let wrong = if stored == "1234" { "4321" } else { "1234" };

    let result = reset
        .confirm(ResetConfirmInput {
            email: "taro@example.com".into(),
            otp: wrong.into(),
            password: "new-password-99".into(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::OtpInvalid)));
}

#[tokio::test]
async fn soft_delete_removes_student_from_listing() {
    let env = TestEnv::new();
    env.sign_up("taro@example.com", None).await;
    env.verify("taro@example.com").await;

    let manage = ManageStudentsUseCase::new(env.store.clone());
    assert_eq!(manage.list().await.unwrap().len(), 1);

    let user = env.store.user_by_email("taro@example.com").unwrap();
    manage.delete(&user.id).await.unwrap();

    // Gone from the listing, but the row and its student id survive
    assert!(manage.list().await.unwrap().is_empty());
    let user = env.store.user_by_email("taro@example.com").unwrap();
    assert!(!user.is_active);
    assert!(user.student_id.is_some());

    let result = env
        .sign_in_use_case()
        .execute(SignInInput {
            email: "taro@example.com".into(),
            password: "hunter2hunter2".into(),
        })
        .await;
    assert!(matches!(result, Err(AuthError::AccountInactive)));
}
