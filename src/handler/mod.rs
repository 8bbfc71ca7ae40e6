pub mod admin;
pub mod auth;
pub mod bids;
pub mod chat;
pub mod notifications;
pub mod payments;
pub mod prices;
pub mod requests;
pub mod uploads;
