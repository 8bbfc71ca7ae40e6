pub mod biddb;
pub mod chatdb;
pub mod db;
pub mod paymentdb;
pub mod pricedb;
pub mod requestdb;
pub mod settingsdb;
pub mod userdb;
