use actix_session::Session;
use actix_web::dev::{
    self, Extensions, Payload, Service, ServiceRequest, ServiceResponse, Transform,
};
use actix_web::{web::Data, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::time::Instant;

use crate::middleware::csrf::get_or_create_csrf_token;
use crate::session::authenticate_client_by_session;
use crate::user::Profile;

/// Client data stored for a single request cycle.
/// Distinct from ClientCtx because it is defined through request data.
#[derive(Clone, Debug)]
pub struct ClientCtxInner {
    /// User data. None is a guest.
    pub client: Option<Profile>,
    /// CSRF token for form protection
    pub csrf_token: String,
    /// Time the request started.
    pub request_start: Instant,
}

impl Default for ClientCtxInner {
    fn default() -> Self {
        Self {
            client: None,
            csrf_token: String::new(), // Populated from session
            request_start: Instant::now(),
        }
    }
}

impl ClientCtxInner {
    pub async fn from_session(session: &Session) -> Self {
        let client = authenticate_client_by_session(session).await;
        let csrf_token = get_or_create_csrf_token(session).unwrap_or_else(|_| String::new());

        ClientCtxInner {
            client,
            csrf_token,
            ..Default::default()
        }
    }
}

/// Client context passed to routes.
/// Wraps ClientCtxInner, which is set at the beginning of the request.
#[derive(Clone, Debug)]
pub struct ClientCtx(Data<ClientCtxInner>);

impl Default for ClientCtx {
    fn default() -> Self {
        Self(Data::new(ClientCtxInner::default()))
    }
}

impl ClientCtx {
    fn get_or_default_from_extensions(extensions: &mut Extensions) -> Self {
        match extensions.get::<Data<ClientCtxInner>>() {
            Some(cbox) => Self(cbox.clone()),
            None => {
                let cbox = Data::new(ClientCtxInner::default());
                extensions.insert(cbox.clone());
                Self(cbox)
            }
        }
    }

    /// Returns either the user's id or None.
    pub fn get_id(&self) -> Option<i32> {
        self.0.client.as_ref().map(|u| u.id)
    }

    pub fn get_user(&self) -> Option<&Profile> {
        self.0.client.as_ref()
    }

    pub fn get_csrf_token(&self) -> &str {
        &self.0.csrf_token
    }

    pub fn is_user(&self) -> bool {
        self.0.client.is_some()
    }

    /// Staff or superuser.
    pub fn is_elevated(&self) -> bool {
        self.0
            .client
            .as_ref()
            .map(|u| u.is_elevated())
            .unwrap_or(false)
    }

    /// Require a logged-in user. Returns the profile or ErrorUnauthorized.
    pub fn require_login(&self) -> Result<&Profile, actix_web::Error> {
        self.0
            .client
            .as_ref()
            .ok_or_else(|| actix_web::error::ErrorUnauthorized("Login required"))
    }

    /// Require a staff or superuser account.
    pub fn require_elevated(&self) -> Result<&Profile, actix_web::Error> {
        let profile = self.require_login()?;
        if !profile.is_elevated() {
            return Err(actix_web::error::ErrorForbidden(
                "Insufficient permissions",
            ));
        }
        Ok(profile)
    }
}

/// This implementation is what actually provides the `client: ClientCtx` in
/// the parameters of route functions.
impl FromRequest for ClientCtx {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(ClientCtx::get_or_default_from_extensions(
            &mut req.extensions_mut(),
        )))
    }
}

impl<S: 'static, B> Transform<S, ServiceRequest> for ClientCtx
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ClientCtxMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ClientCtxMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Client context middleware
pub struct ClientCtxMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ClientCtxMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();

        // Borrows of `req` must be done in a precise way to avoid conflicts.
        // This order is important.
        let (httpreq, payload) = req.into_parts();
        let session = Session::extract(&httpreq).into_inner();
        let req = ServiceRequest::from_parts(httpreq, payload);

        Box::pin(async move {
            match session {
                Ok(session) => {
                    let inner = ClientCtxInner::from_session(&session).await;
                    req.extensions_mut().insert(Data::new(inner));
                }
                Err(err) => {
                    log::error!("Unable to extract Session data in middleware: {}", err);
                }
            };

            svc.call(req).await
        })
    }
}
