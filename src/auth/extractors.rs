use crate::auth::principal::Principal;
use actix_web::dev::Payload;
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};

pub struct PrincipalExtractor(pub Principal);

impl FromRequest for PrincipalExtractor {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(p) = req.extensions().get::<Principal>() {
            return ready(Ok(PrincipalExtractor(p.clone())));
        }
        ready(Err(ErrorUnauthorized("missing principal")))
    }
}

pub struct StudentPrincipal {
    user_id: i32,
}

impl StudentPrincipal {
    pub fn user_id(&self) -> i32 {
        self.user_id
    }
}

impl FromRequest for StudentPrincipal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(p) = req.extensions().get::<Principal>() {
            if let Principal::Student { user_id } = p.clone() {
                return ready(Ok(StudentPrincipal { user_id }));
            }
            return ready(Err(actix_web::error::ErrorForbidden(
                "students only",
            )));
        }
        ready(Err(ErrorUnauthorized("missing principal")))
    }
}

pub struct VendorPrincipal {
    pub user_id: i32,
    pub canteen_id: i32,
}

impl FromRequest for VendorPrincipal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(p) = req.extensions().get::<Principal>() {
            if let Principal::Vendor {
                user_id,
                canteen_id,
            } = p.clone()
            {
                return ready(Ok(VendorPrincipal {
                    user_id,
                    canteen_id,
                }));
            }
            return ready(Err(actix_web::error::ErrorForbidden("vendors only")));
        }
        ready(Err(ErrorUnauthorized("missing principal")))
    }
}

pub struct AdminPrincipal {
    pub user_id: i32,
}

impl FromRequest for AdminPrincipal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(p) = req.extensions().get::<Principal>() {
            if let Principal::Admin { user_id } = p.clone() {
                return ready(Ok(AdminPrincipal { user_id }));
            }
            return ready(Err(actix_web::error::ErrorForbidden("admins only")));
        }
        ready(Err(ErrorUnauthorized("missing principal")))
    }
}
