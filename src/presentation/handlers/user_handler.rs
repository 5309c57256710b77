use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;

use crate::{
    domain::{
        error::DomainError, repositories::user_store::UserStore,
        services::password_service::PasswordHasher,
    },
    usecase::{
        authenticate_user_usecase::{AuthOutcome, AuthenticateUserUsecase},
        create_user_usecase::CreateUserUsecase,
        get_user_usecase::GetUserUsecase,
    },
};

/// Error body sent for every raised domain error; the message text is the
/// error's fixed contract string.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/* Router Function and Handler Function */

/// Routes for the three user operations. The handlers pass the raw request
/// body through; payload parsing and validation belong to the usecases.
pub fn create_user_router<
    S: UserStore + Send + Sync + 'static,
    P: PasswordHasher + Send + Sync + 'static,
>(
    create_service: CreateUserUsecase<S, P>,
    get_service: GetUserUsecase<S>,
    login_service: AuthenticateUserUsecase<S, P>,
) -> Router {
    let state = AppState {
        create_service: Arc::new(create_service),
        get_service: Arc::new(get_service),
        login_service: Arc::new(login_service),
    };

    Router::new()
        .route("/users", post(create::<S, P>))
        .route("/users/query", post(query::<S, P>))
        .route("/login", post(login::<S, P>))
        .with_state(state)
}

pub struct AppState<S: UserStore, P: PasswordHasher> {
    pub create_service: Arc<CreateUserUsecase<S, P>>,
    pub get_service: Arc<GetUserUsecase<S>>,
    pub login_service: Arc<AuthenticateUserUsecase<S, P>>,
}

impl<S: UserStore, P: PasswordHasher> Clone for AppState<S, P> {
    fn clone(&self) -> Self {
        Self {
            create_service: self.create_service.clone(),
            get_service: self.get_service.clone(),
            login_service: self.login_service.clone(),
        }
    }
}

// handler function

async fn create<S: UserStore + Send + Sync, P: PasswordHasher + Send + Sync>(
    State(state): State<AppState<S, P>>,
    body: String,
) -> Response {
    match state.create_service.create_user(Some(&body)).await {
        Ok(ack) => (StatusCode::CREATED, Json(ack)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn query<S: UserStore + Send + Sync, P: PasswordHasher + Send + Sync>(
    State(state): State<AppState<S, P>>,
    body: String,
) -> Response {
    match state.get_service.get_user(Some(&body)).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn login<S: UserStore + Send + Sync, P: PasswordHasher + Send + Sync>(
    State(state): State<AppState<S, P>>,
    body: String,
) -> Response {
    match state.login_service.authenticate(Some(&body)).await {
        Ok(AuthOutcome::Granted(user)) => (StatusCode::OK, Json(user)).into_response(),
        // denied logins are values, not errors; the sentinel body goes out as-is
        Ok(denied) => (StatusCode::UNAUTHORIZED, Json(denied)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: DomainError) -> Response {
    let status = match err {
        DomainError::StoreLookup | DomainError::StoreQuery | DomainError::StoreWrite => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::BAD_REQUEST,
    };

    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}
