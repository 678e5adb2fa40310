use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::{ErrorForbidden, ErrorUnauthorized};
use actix_web::{http::header, Error, HttpMessage};
use futures::future::LocalBoxFuture;

use crate::auth::config::AuthConfig;
use crate::auth::token::verify_token;
use crate::auth::Principal;
use crate::db::UserOperations;
use crate::models::status::UserRole;
use crate::models::user::User;

#[derive(Clone)]
pub struct AuthLayer {
    cfg: AuthConfig,
    user_ops: UserOperations,
}

impl AuthLayer {
    pub fn new(cfg: AuthConfig, user_ops: UserOperations) -> Self {
        Self { cfg, user_ops }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
            inner: self.clone(),
        }))
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
    inner: AuthLayer,
}

fn principal_from_user(user: &User) -> Result<Principal, Error> {
    if user.is_banned {
        return Err(ErrorForbidden("account banned"));
    }
    match user.role {
        UserRole::Student => Ok(Principal::Student {
            user_id: user.user_id,
        }),
        UserRole::Vendor => {
            let canteen_id = user
                .canteen_id
                .ok_or_else(|| ErrorUnauthorized("vendor has no canteen"))?;
            Ok(Principal::Vendor {
                user_id: user.user_id,
                canteen_id,
            })
        }
        UserRole::Admin => Ok(Principal::Admin {
            user_id: user.user_id,
        }),
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Bypass only '/', '/health' and registration
        let path = req.path().to_string();
        if path == "/"
            || path == "/health"
            || path == "/users/register"
            || path == "/users/register_vendor"
        {
            let fut = self.service.call(req);
            #[allow(clippy::redundant_async_block)]
            return Box::pin(async move { fut.await });
        }

        let token_opt = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string());
        if token_opt.as_deref().unwrap_or("").is_empty() {
            return Box::pin(async { Err(ErrorUnauthorized("missing or invalid auth header")) });
        }

        let token = token_opt.unwrap();
        let inner = self.inner.clone();
        let srv = self.service.clone();
        Box::pin(async move {
            // Dev bypass: token matches DEV_BYPASS_TOKEN and the acting
            // user id comes from an `as=<user_id>` query parameter.
            let user_id = if inner.cfg.dev_bypass_token.as_deref() == Some(token.as_str()) {
                let acting: Option<i32> = req
                    .query_string()
                    .split('&')
                    .find_map(|pair| pair.strip_prefix("as="))
                    .and_then(|v| v.parse().ok());
                acting.ok_or_else(|| ErrorUnauthorized("bypass token requires `as` param"))?
            } else {
                verify_token(&token, &inner.cfg.jwt_secret)
                    .map_err(|_| ErrorUnauthorized("unauthorized"))?
                    .sub
            };

            let user_ops = inner.user_ops.clone();
            let lookup = actix_web::web::block(move || user_ops.get_user_by_id(user_id)).await;

            match lookup {
                Ok(Ok(user)) => {
                    let principal = principal_from_user(&user)?;
                    req.extensions_mut().insert(principal);
                    srv.call(req).await
                }
                _ => Err(ErrorUnauthorized("unknown user")),
            }
        })
    }
}
