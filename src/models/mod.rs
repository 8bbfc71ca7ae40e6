pub mod bidmodel;
pub mod chatmodel;
pub mod notificationmodel;
pub mod paymentmodel;
pub mod requestmodel;
pub mod settingsmodel;
pub mod usermodel;
