//! Domain models for the purchases service.

pub mod money;
pub mod purchase;

pub use money::{
    CONVERTED_SCALE, ConvertedAmount, ORIGIN_COUNTRY, ORIGIN_CURRENCY, PurchaseAmount, is_origin,
};
pub use purchase::{ConvertedPurchase, MAX_LABEL_LEN, NewPurchase, Purchase, PurchaseId};
