use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::io::Write;
use utoipa::ToSchema;

macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            pub fn get_enum_from_str(value: &str) -> Option<Self> {
                match value {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ToSql<Text, Pg> for $name {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                out.write_all(self.as_str().as_bytes())?;
                Ok(IsNull::No)
            }
        }

        impl FromSql<Text, Pg> for $name {
            fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
                let raw = std::str::from_utf8(bytes.as_bytes())?;
                Self::get_enum_from_str(raw).ok_or_else(|| {
                    format!("Unrecognised {} value: {}", stringify!($name), raw).into()
                })
            }
        }
    };
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow, Serialize, Deserialize,
    ToSchema,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Vendor,
    Admin,
}

text_enum!(UserRole {
    Student => "student",
    Vendor => "vendor",
    Admin => "admin",
});

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow, Serialize, Deserialize,
    ToSchema,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

text_enum!(OrderStatus {
    Placed => "placed",
    Preparing => "preparing",
    Ready => "ready",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Transition table: forward along placed -> preparing -> ready ->
    /// completed, or sideways into cancelled from any non-terminal state.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match (self, next) {
            (Self::Placed, Self::Preparing)
            | (Self::Preparing, Self::Ready)
            | (Self::Ready, Self::Completed) => true,
            (from, Self::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow, Serialize, Deserialize,
    ToSchema,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cod,
    Upi,
    Card,
}

text_enum!(PaymentMethod {
    Cod => "cod",
    Upi => "upi",
    Card => "card",
});

impl PaymentMethod {
    /// The transaction ledger keeps a coarser mode than the order's
    /// payment method: upi and card both settle as "online".
    pub fn ledger_mode(&self) -> TxnMode {
        match self {
            Self::Cod => TxnMode::Cod,
            Self::Upi | Self::Card => TxnMode::Online,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow, Serialize, Deserialize,
    ToSchema,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

text_enum!(PaymentStatus {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
    Refunded => "refunded",
});

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow, Serialize, Deserialize,
    ToSchema,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum TxnMode {
    Cod,
    Online,
}

text_enum!(TxnMode {
    Cod => "cod",
    Online => "online",
});

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow, Serialize, Deserialize,
    ToSchema,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum TxnStatus {
    Pending,
    Paid,
    Failed,
}

text_enum!(TxnStatus {
    Pending => "pending",
    Paid => "paid",
    Failed => "failed",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions_are_allowed() {
        assert!(OrderStatus::Placed.can_transition_to(OrderStatus::Preparing));
        assert!(OrderStatus::Preparing.can_transition_to(OrderStatus::Ready));
        assert!(OrderStatus::Ready.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn cancellation_is_allowed_from_any_non_terminal_state() {
        for from in [
            OrderStatus::Placed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
        ] {
            assert!(from.can_transition_to(OrderStatus::Cancelled));
        }
    }

    #[test]
    fn terminal_states_reject_every_transition() {
        for from in [OrderStatus::Completed, OrderStatus::Cancelled] {
            for to in [
                OrderStatus::Placed,
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Completed,
                OrderStatus::Cancelled,
            ] {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    #[test]
    fn backward_and_skipping_edges_are_rejected() {
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Placed));
        assert!(!OrderStatus::Placed.can_transition_to(OrderStatus::Ready));
        assert!(!OrderStatus::Placed.can_transition_to(OrderStatus::Completed));
        assert!(!OrderStatus::Preparing.can_transition_to(OrderStatus::Placed));
    }

    #[test]
    fn ledger_mode_collapses_online_methods() {
        assert_eq!(PaymentMethod::Cod.ledger_mode(), TxnMode::Cod);
        assert_eq!(PaymentMethod::Upi.ledger_mode(), TxnMode::Online);
        assert_eq!(PaymentMethod::Card.ledger_mode(), TxnMode::Online);
    }

    #[test]
    fn text_round_trip() {
        assert_eq!(
            OrderStatus::get_enum_from_str("preparing"),
            Some(OrderStatus::Preparing)
        );
        assert_eq!(OrderStatus::get_enum_from_str("unknown"), None);
        assert_eq!(TxnStatus::Paid.as_str(), "paid");
    }
}
