//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::mailer::Mailer;

use crate::application::config::AuthConfig;
use crate::application::manage_students::{ManageStudentsUseCase, StudentUpdate};
use crate::application::password_reset::{PasswordResetUseCase, ResetConfirmInput};
use crate::application::profile::{ProfileUpdate, ProfileUseCase};
use crate::application::refresh::RefreshUseCase;
use crate::application::resend_otp::ResendOtpUseCase;
use crate::application::sign_in::{SignInInput, SignInUseCase};
use crate::application::sign_up::{SignUpInput, SignUpUseCase};
use crate::application::verify_otp::{VerifyOtpInput, VerifyOtpUseCase};
use crate::domain::repository::{EnrollmentPort, SessionRepository, UserRepository};
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    DetailResponse, EmailRequest, LoginRequest, LoginResponse, PasswordResetConfirmRequest,
    ProfileResponse, ProfileUpdateRequest, RefreshRequest, RefreshResponse, SignUpRequest,
    StudentUpdateRequest, UserResponse, VerifyOtpRequest,
};
use crate::presentation::middleware::AuthContext;

/// Shared state for auth handlers
pub struct AuthAppState<R, E, M>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub enrollment: Arc<E>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: every field is an Arc, so cloning must not require
// E: Clone or M: Clone the way a derive would
impl<R, E, M> Clone for AuthAppState<R, E, M>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            enrollment: self.enrollment.clone(),
            mailer: self.mailer.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Registration and Verification
// ============================================================================

/// POST /api/signup
pub async fn sign_up<R, E, M>(
    State(state): State<AuthAppState<R, E, M>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.enrollment.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    use_case
        .execute(SignUpInput {
            username: req.username,
            email: req.email,
            password: req.password,
            role: req.role,
            college: req.college,
            phone_number: req.phone_number,
            branch: req.branch,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DetailResponse::new(
            "OTP sent to your email for verification.",
        )),
    ))
}

/// POST /api/verify-otp
pub async fn verify_otp<R, E, M>(
    State(state): State<AuthAppState<R, E, M>>,
    Json(req): Json<VerifyOtpRequest>,
) -> AuthResult<Json<DetailResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = VerifyOtpUseCase::new(state.repo.clone());
    use_case
        .execute(VerifyOtpInput {
            email: req.email,
            otp: req.otp,
        })
        .await?;

    Ok(Json(DetailResponse::new("Account verified successfully!")))
}

/// POST /api/resend-otp
pub async fn resend_otp<R, E, M>(
    State(state): State<AuthAppState<R, E, M>>,
    Json(req): Json<EmailRequest>,
) -> AuthResult<Json<DetailResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ResendOtpUseCase::new(state.repo.clone(), state.mailer.clone());
    use_case.execute(req.email).await?;

    Ok(Json(DetailResponse::new(
        "A new OTP has been sent to your email.",
    )))
}

// ============================================================================
// Login and Tokens
// ============================================================================

/// POST /api/login
pub async fn login<R, E, M>(
    State(state): State<AuthAppState<R, E, M>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        access: output.access,
        refresh: output.refresh,
    }))
}

/// POST /api/login/refresh
pub async fn refresh<R, E, M>(
    State(state): State<AuthAppState<R, E, M>>,
    Json(req): Json<RefreshRequest>,
) -> AuthResult<Json<RefreshResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = RefreshUseCase::new(state.config.clone());
    let output = use_case.execute(&req.refresh)?;

    Ok(Json(RefreshResponse {
        access: output.access,
    }))
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/password-reset-otp
pub async fn password_reset_request<R, E, M>(
    State(state): State<AuthAppState<R, E, M>>,
    Json(req): Json<EmailRequest>,
) -> AuthResult<Json<DetailResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(state.repo.clone(), state.mailer.clone());
    use_case.request(req.email).await?;

    Ok(Json(DetailResponse::new("OTP has been sent to your email.")))
}

/// POST /api/password-reset-confirm
pub async fn password_reset_confirm<R, E, M>(
    State(state): State<AuthAppState<R, E, M>>,
    Json(req): Json<PasswordResetConfirmRequest>,
) -> AuthResult<Json<DetailResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = PasswordResetUseCase::new(state.repo.clone(), state.mailer.clone());
    use_case
        .confirm(ResetConfirmInput {
            email: req.email,
            otp: req.otp,
            password: req.password,
        })
        .await?;

    Ok(Json(DetailResponse::new(
        "Password has been reset successfully.",
    )))
}

// ============================================================================
// Dashboard and Profile
// ============================================================================

/// GET /api/student/dashboard
pub async fn student_dashboard<R, E, M>(
    State(state): State<AuthAppState<R, E, M>>,
    ctx: AuthContext,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let user = use_case.get(&ctx.user_id).await?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// GET /api/profile
pub async fn profile_get<R, E, M>(
    State(state): State<AuthAppState<R, E, M>>,
    ctx: AuthContext,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let user = use_case.get(&ctx.user_id).await?;

    Ok(Json(ProfileResponse::from_user(&user)))
}

/// PATCH /api/profile
pub async fn profile_update<R, E, M>(
    State(state): State<AuthAppState<R, E, M>>,
    ctx: AuthContext,
    Json(req): Json<ProfileUpdateRequest>,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ProfileUseCase::new(state.repo.clone());
    let user = use_case
        .update(
            &ctx.user_id,
            ProfileUpdate {
                username: req.username,
                college: req.college,
                phone_number: req.phone_number,
            },
        )
        .await?;

    Ok(Json(ProfileResponse::from_user(&user)))
}

// ============================================================================
// Student Management (admin)
// ============================================================================

/// GET /api/admin/students
pub async fn students_list<R, E, M>(
    State(state): State<AuthAppState<R, E, M>>,
    ctx: AuthContext,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    ctx.require_admin()?;

    let use_case = ManageStudentsUseCase::new(state.repo.clone());
    let students = use_case.list().await?;

    Ok(Json(students.iter().map(UserResponse::from_user).collect()))
}

/// GET /api/admin/students/{id}
pub async fn student_get<R, E, M>(
    State(state): State<AuthAppState<R, E, M>>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    ctx.require_admin()?;

    let id = parse_user_id(&id)?;
    let use_case = ManageStudentsUseCase::new(state.repo.clone());
    let user = use_case.get(&id).await?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// PATCH /api/admin/students/{id}
pub async fn student_update<R, E, M>(
    State(state): State<AuthAppState<R, E, M>>,
    ctx: AuthContext,
    Path(id): Path<String>,
    Json(req): Json<StudentUpdateRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    ctx.require_admin()?;

    let id = parse_user_id(&id)?;
    let use_case = ManageStudentsUseCase::new(state.repo.clone());
    let user = use_case
        .update(
            &id,
            StudentUpdate {
                username: req.username,
                college: req.college,
                phone_number: req.phone_number,
            },
        )
        .await?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// DELETE /api/admin/students/{id}
pub async fn student_delete<R, E, M>(
    State(state): State<AuthAppState<R, E, M>>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    E: EnrollmentPort + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    ctx.require_admin()?;

    let id = parse_user_id(&id)?;
    let use_case = ManageStudentsUseCase::new(state.repo.clone());
    use_case.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_user_id(raw: &str) -> AuthResult<UserId> {
    raw.parse().map_err(|_| AuthError::UserNotFound)
}
