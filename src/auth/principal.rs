use crate::db::OrderActor;

/// Authenticated identity attached to the request by the auth middleware.
#[derive(Clone, Debug)]
pub enum Principal {
    Student {
        user_id: i32,
    },
    Vendor {
        user_id: i32,
        canteen_id: i32,
    },
    Admin {
        user_id: i32,
    },
}

impl Principal {
    pub fn user_id(&self) -> i32 {
        match self {
            Self::Student { user_id }
            | Self::Vendor { user_id, .. }
            | Self::Admin { user_id } => *user_id,
        }
    }

    pub fn order_actor(&self) -> OrderActor {
        match self {
            Self::Student { user_id } => OrderActor::Student(*user_id),
            Self::Vendor {
                user_id,
                canteen_id,
            } => OrderActor::Vendor {
                user_id: *user_id,
                canteen_id: *canteen_id,
            },
            Self::Admin { .. } => OrderActor::Admin,
        }
    }
}
