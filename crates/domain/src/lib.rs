mod client;
mod product;
mod recurrence;
mod reminder;
mod sale;
mod shared;
mod user;

pub use client::Client;
pub use product::Product;
pub use recurrence::{next_occurrence, Frequency, InvalidFrequencyError};
pub use reminder::{
    Reminder, ReminderEvaluation, ReminderStatus, NOTIFICATION_TOLERANCE_MILLIS,
};
pub use sale::{Sale, SaleItem, SaleItemKind};
pub use shared::email::{Email, InvalidEmailError};
pub use shared::entity::{Entity, ID};
pub use user::User;
